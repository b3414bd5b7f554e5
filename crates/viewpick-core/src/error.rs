use thiserror::Error;

/// Canonical result for core.
pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    Config(String),

    #[error("Graph integrity violated: {0}")]
    Graph(String),

    // Higher layers may map collaborator failures into this variant when no
    // more specific kind applies.
    #[error("Internal invariant failed: {0}")]
    Invariant(String),
}
