//! The data-access boundary.
//!
//! The advisor never talks to a database directly; it consumes the four
//! logical row sets plus plan estimation and the storage budget through this
//! trait. The concrete Postgres implementation lives in `viewpick-db`, and
//! tests substitute an in-memory fixture. Only the trait lives here so any
//! crate can depend on the API without pulling a database client.

use serde::{Deserialize, Serialize};

use crate::id::ModelId;

/// One row of the model table: identifier plus compiled query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelRow {
    pub id: ModelId,
    pub sql: String,
}

/// One row of the dependency table: a model, its direct upstream
/// identifiers, and the reference string other models use for it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DependencyRow {
    pub id: ModelId,
    pub depends_on: Vec<ModelId>,
    pub reference: String,
}

/// External data-access collaborator for one advisory run.
///
/// Calls take `&mut self` because implementations typically hold a database
/// connection. A failure from any method aborts the run; the core never
/// retries.
pub trait Catalog {
    type Error: std::error::Error + Send + Sync + 'static;

    /// All models with their compiled query text.
    fn all_models(&mut self) -> Result<Vec<ModelRow>, Self::Error>;

    /// All direct-dependency edges plus each model's reference string.
    fn model_dependencies(&mut self) -> Result<Vec<DependencyRow>, Self::Error>;

    /// Identifiers of the terminal models that must always be computed.
    fn destination_nodes(&mut self) -> Result<Vec<ModelId>, Self::Error>;

    /// Per-model maintenance-fraction overrides; a `None` fraction means the
    /// catalog has no opinion and the neutral default stands.
    fn maintenance_fractions(&mut self) -> Result<Vec<(ModelId, Option<f64>)>, Self::Error>;

    /// Submit one query for plan estimation and return the planner's JSON
    /// output verbatim. Must not execute the query or mutate data.
    fn explain(&mut self, sql: &str) -> Result<serde_json::Value, Self::Error>;

    /// Remaining-storage-budget scalar, in bytes-equivalent units.
    fn storage_budget(&mut self) -> Result<f64, Self::Error>;
}
