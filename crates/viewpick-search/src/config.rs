//! Candidate materialization plans.

use serde::{Deserialize, Serialize};
use std::fmt;

use viewpick_core::ModelId;

/// One candidate plan: either the sentinel "materialize nothing", or a set
/// of intermediate models to persist simultaneously.
///
/// Invariants (upheld by the enumerator): members name existing intermediate
/// models, |members| ≤ K, and order carries no meaning.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Configuration {
    /// Nothing materialized; every candidate run is compared against this.
    Baseline,
    Materialize(Vec<ModelId>),
}

impl Configuration {
    /// The models this plan materializes (empty for the baseline).
    pub fn members(&self) -> &[ModelId] {
        match self {
            Configuration::Baseline => &[],
            Configuration::Materialize(members) => members,
        }
    }

    pub fn is_baseline(&self) -> bool {
        matches!(self, Configuration::Baseline)
    }

    pub fn len(&self) -> usize {
        self.members().len()
    }

    pub fn is_empty(&self) -> bool {
        self.members().is_empty()
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Configuration::Baseline => f.write_str("none"),
            Configuration::Materialize(members) => {
                for (i, id) in members.iter().enumerate() {
                    if i > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{id}")?;
                }
                Ok(())
            }
        }
    }
}
