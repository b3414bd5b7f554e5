//! Postgres implementation of the `Catalog` trait.
//!
//! The companion dbt package leaves four tables in the configured schema;
//! their presence is verified once at connect time so a half-installed
//! package fails before any advisory work starts. Everything else is a
//! straight read: the four row sets, one `EXPLAIN (FORMAT JSON)` per model,
//! and the storage-budget scalar.

use std::collections::HashSet;

use postgres::{Client, NoTls};
use serde_json::Value;

use viewpick_core::catalog::{Catalog, DependencyRow, ModelRow};
use viewpick_core::ModelId;

use crate::error::{DbError, Result};
use crate::profiles::DbCredentials;

/// Tables the companion dbt package must have produced.
pub const REQUIRED_TABLES: [&str; 4] = [
    "all_models_plus_code",
    "model_dependencies",
    "destination_nodes",
    "avg_maintenance_fractions",
];

pub struct PgCatalog {
    client: Client,
    schema: String,
    dbname: String,
}

impl PgCatalog {
    /// Connect and verify that the required catalog tables exist.
    pub fn connect(creds: &DbCredentials) -> Result<Self> {
        let client = postgres::Config::new()
            .host(&creds.host)
            .port(creds.port)
            .user(&creds.user)
            .password(&creds.password)
            .dbname(&creds.dbname)
            .connect(NoTls)
            .map_err(|e| {
                DbError::Environment(format!(
                    "cannot reach database `{}` at {}:{}: {e}",
                    creds.dbname, creds.host, creds.port
                ))
            })?;

        let mut catalog = Self {
            client,
            schema: creds.schema.clone(),
            dbname: creds.dbname.clone(),
        };
        catalog.check_required_tables()?;
        Ok(catalog)
    }

    fn check_required_tables(&mut self) -> Result<()> {
        let rows = self.client.query(
            "SELECT table_name FROM information_schema.tables \
             WHERE table_schema = $1 AND table_type = 'BASE TABLE'",
            &[&self.schema],
        )?;
        let present: HashSet<String> = rows.iter().map(|row| row.get(0)).collect();

        let missing: Vec<&str> = REQUIRED_TABLES
            .iter()
            .copied()
            .filter(|table| !present.contains(*table))
            .collect();

        if !missing.is_empty() {
            return Err(DbError::Environment(format!(
                "the following tables should be present in {}.{} but were not \
                 found: {}; make sure the companion dbt package has been run",
                self.dbname,
                self.schema,
                missing.join(", ")
            )));
        }
        Ok(())
    }

    fn table(&self, name: &str) -> String {
        format!("{}.{}", self.schema, name)
    }
}

impl Catalog for PgCatalog {
    type Error = DbError;

    fn all_models(&mut self) -> Result<Vec<ModelRow>> {
        let query = format!(
            "SELECT model_id, compiled_code FROM {}",
            self.table("all_models_plus_code")
        );
        let rows = self.client.query(query.as_str(), &[])?;
        Ok(rows
            .iter()
            .map(|row| ModelRow {
                id: ModelId::new(row.get::<_, String>(0)),
                sql: row.get(1),
            })
            .collect())
    }

    fn model_dependencies(&mut self) -> Result<Vec<DependencyRow>> {
        let query = format!(
            "SELECT model_id, depends_on, compiled_code_reference FROM {}",
            self.table("model_dependencies")
        );
        let rows = self.client.query(query.as_str(), &[])?;
        rows.iter()
            .map(|row| {
                let id = ModelId::new(row.get::<_, String>(0));
                let depends_on = parse_id_list(&row.get::<_, String>(1))?;
                Ok(DependencyRow {
                    id,
                    depends_on,
                    reference: row.get(2),
                })
            })
            .collect()
    }

    fn destination_nodes(&mut self) -> Result<Vec<ModelId>> {
        let query = format!("SELECT model_id FROM {}", self.table("destination_nodes"));
        let rows = self.client.query(query.as_str(), &[])?;
        Ok(rows
            .iter()
            .map(|row| ModelId::new(row.get::<_, String>(0)))
            .collect())
    }

    fn maintenance_fractions(&mut self) -> Result<Vec<(ModelId, Option<f64>)>> {
        let query = format!(
            "SELECT model_id, avg_maintenance_fraction FROM {}",
            self.table("avg_maintenance_fractions")
        );
        let rows = self.client.query(query.as_str(), &[])?;
        Ok(rows
            .iter()
            .map(|row| (ModelId::new(row.get::<_, String>(0)), row.get(1)))
            .collect())
    }

    fn explain(&mut self, sql: &str) -> Result<Value> {
        #[cfg(feature = "tracing")]
        tracing::debug!(query_bytes = sql.len(), "requesting plan estimate");

        let explain = format!("EXPLAIN (FORMAT JSON) {sql}");
        let row = self.client.query_one(explain.as_str(), &[])?;
        Ok(row.get(0))
    }

    fn storage_budget(&mut self) -> Result<f64> {
        let row = self
            .client
            .query_one("SELECT pg_database_size($1)", &[&self.dbname])
            .map_err(|e| DbError::Budget(e.to_string()))?;
        let bytes: i64 = row.get(0);
        Ok(bytes as f64)
    }
}

/// The dependency table stores upstream lists as bracketed literals, e.g.
/// `['model.proj.a', 'model.proj.b']`.
fn parse_id_list(raw: &str) -> Result<Vec<ModelId>> {
    let inner = raw
        .trim()
        .strip_prefix('[')
        .and_then(|rest| rest.strip_suffix(']'))
        .ok_or_else(|| {
            DbError::Environment(format!("malformed dependency list: {raw}"))
        })?;

    Ok(inner
        .split(',')
        .filter_map(|part| {
            let id = part.trim().trim_matches(|c| c == '\'' || c == '"');
            (!id.is_empty()).then(|| ModelId::from(id))
        })
        .collect())
}
