#![forbid(unsafe_code)]
//! viewpick-db: the environment-facing collaborators.
//!
//! Everything that touches the outside world lives here: locating the dbt
//! project on disk, reading database credentials out of `profiles.yml`, and
//! the Postgres implementation of the `Catalog` trait. The advisory core
//! never imports this crate; it sees only the trait.
//!
//! All database access is read-only: plan estimation uses `EXPLAIN`, which
//! never executes the query or mutates data.

pub mod error;
pub mod pg;
pub mod profiles;
pub mod project;

pub use error::{DbError, Result};
pub use pg::PgCatalog;
pub use profiles::{load_credentials, DbCredentials, DEFAULT_PROFILE};
pub use project::ProjectDir;
