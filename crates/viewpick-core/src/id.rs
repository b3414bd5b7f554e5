//! Strongly-typed model identifiers.
//!
//! dbt identifies models by strings like `model.jaffle_shop.orders`. Wrapping
//! them keeps graph maps from being indexed by arbitrary strings, and `Ord`
//! gives every enumeration over the graph a stable, deterministic order.

use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ModelId(String);

impl ModelId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ModelId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ModelId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ModelId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

// Lets `BTreeMap<ModelId, _>` and `HashSet<ModelId>` be probed with `&str`.
impl Borrow<str> for ModelId {
    fn borrow(&self) -> &str {
        &self.0
    }
}
