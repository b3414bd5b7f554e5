//! Plan-tree parsing and normalization.
//!
//! Postgres `EXPLAIN (FORMAT JSON)` output looks like:
//!
//! ```json
//! [ { "Plan": { "Plan Rows": 100, "Plan Width": 8, "Plans": [ ... ] } } ]
//! ```
//!
//! The outer one-element list and the `"Plan"` wrapper are both peeled here;
//! the rest of the crate only ever sees `PlanTree`.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PlanError {
    #[error("malformed plan node: `{0}` missing or not numeric")]
    MissingField(&'static str),

    #[error("malformed plan output: {0}")]
    Shape(String),
}

/// One node of an estimated execution plan.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanNode {
    /// Expected output row count.
    pub rows: f64,
    /// Expected row width, in bytes.
    pub width: f64,
    pub children: Vec<PlanNode>,
}

impl PlanNode {
    /// This node's cost contribution: expected rows × expected width.
    pub fn contribution(&self) -> f64 {
        self.rows * self.width
    }
}

/// A normalized execution-plan tree for one query.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlanTree {
    pub root: PlanNode,
}

impl PlanTree {
    /// Normalize the planner's output: accept either a plan object or a
    /// one-element list wrapping one, with or without the `"Plan"` envelope.
    pub fn from_explain_json(value: &Value) -> Result<Self, PlanError> {
        let entry = match value {
            Value::Array(items) => items
                .first()
                .ok_or_else(|| PlanError::Shape("plan list is empty".to_string()))?,
            other => other,
        };
        let node = entry.get("Plan").unwrap_or(entry);
        Ok(Self {
            root: parse_node(node)?,
        })
    }
}

fn parse_node(value: &Value) -> Result<PlanNode, PlanError> {
    let map = value
        .as_object()
        .ok_or_else(|| PlanError::Shape(format!("plan node is not an object: {value}")))?;

    let rows = numeric_field(map, "Plan Rows")?;
    let width = numeric_field(map, "Plan Width")?;

    // A node without a "Plans" entry is a leaf, not an error.
    let children = match map.get("Plans") {
        None => Vec::new(),
        Some(Value::Array(subplans)) => subplans
            .iter()
            .map(parse_node)
            .collect::<Result<Vec<_>, _>>()?,
        Some(other) => {
            return Err(PlanError::Shape(format!(
                "`Plans` is not a list: {other}"
            )))
        }
    };

    Ok(PlanNode {
        rows,
        width,
        children,
    })
}

fn numeric_field(
    map: &serde_json::Map<String, Value>,
    field: &'static str,
) -> Result<f64, PlanError> {
    map.get(field)
        .and_then(Value::as_f64)
        .ok_or(PlanError::MissingField(field))
}
