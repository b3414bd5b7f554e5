//! Convenient re-exports for downstream crates.

pub use crate::catalog::{Catalog, DependencyRow, ModelRow};
pub use crate::config::AdvisorConfig;
pub use crate::error::{Error, Result};
pub use crate::graph::{Model, ModelGraph};
pub use crate::hash::Hash256;
pub use crate::id::ModelId;
