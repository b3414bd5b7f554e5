#![forbid(unsafe_code)]
//! viewpick-core: model graph, identifiers, configuration, and the catalog
//! boundary for the view-selection advisor.
//!
//! Responsibilities:
//! - Represent the dbt model DAG (queries, edges, per-node cost attributes).
//! - Validate graph integrity (mutual edges, acyclicity) at construction.
//! - Define the `Catalog` trait that the database crate implements.
//!
//! **No I/O, no database client, no async** here. Higher crates drive this.

pub mod catalog;
pub mod config;
pub mod error;
pub mod graph;
pub mod hash;
pub mod id;
pub mod prelude;

pub use catalog::{Catalog, DependencyRow, ModelRow};
pub use config::AdvisorConfig;
pub use error::{Error, Result};
pub use graph::{Model, ModelGraph};
pub use id::ModelId;

/// Crate version, recorded in advice reports for provenance.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
