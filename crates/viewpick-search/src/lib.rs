#![forbid(unsafe_code)]
//! viewpick-search: which intermediate models are worth materializing.
//!
//! Responsibilities:
//! - Enumerate every candidate materialization plan under the cap K.
//! - Model how a materialized node discounts its downstream dependents
//!   (decay factors by graph distance and fan-out).
//! - Score each candidate (total cost + storage footprint) and keep the
//!   ones that fit the storage budget.
//!
//! **No I/O and no database access** here; the graph arrives fully costed.

pub mod config;
pub mod config_cost;
pub mod decay;
pub mod enumerate;
pub mod search;

pub use config::Configuration;
pub use config_cost::{ConfigCostEstimator, ConfigCosts};
pub use decay::{decay_factors, DecayTable};
pub use enumerate::Configurations;
pub use search::{rank, ScoredConfig, SearchEngine};
