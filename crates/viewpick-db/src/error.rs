use thiserror::Error;

pub type Result<T> = std::result::Result<T, DbError>;

#[derive(Debug, Error)]
pub enum DbError {
    /// The working environment is unusable: missing project files, a broken
    /// `profiles.yml`, an unreachable database, or missing catalog tables.
    #[error("Environment error: {0}")]
    Environment(String),

    /// The storage-budget query failed; no advisory can be given without it.
    #[error("Storage budget unavailable: {0}")]
    Budget(String),

    /// A query against the catalog tables failed mid-run.
    #[error("Database error: {0}")]
    Backend(#[from] ::postgres::Error),
}
