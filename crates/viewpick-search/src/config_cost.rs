//! Scoring one candidate plan.
//!
//! cost_of(m) = storage_cost(m) + creation_cost(m) × decay_factor(m),
//! summed over the plan's members plus every destination node (the two sets
//! never overlap: destinations are not candidates). The storage footprint
//! sums storage_cost over the same set. Decay factors are computed fresh on
//! every call, so scoring the same plan twice gives identical results.

use serde::{Deserialize, Serialize};

use viewpick_core::graph::ModelGraph;
use viewpick_core::ModelId;

use crate::config::Configuration;
use crate::decay::{decay_factors, DecayTable};

/// (total cost, total storage footprint) for one candidate plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct ConfigCosts {
    pub total: f64,
    pub storage: f64,
}

/// Scores candidate plans against one fully-costed graph.
pub struct ConfigCostEstimator<'a> {
    graph: &'a ModelGraph,
    apply_maintenance_fraction: bool,
}

impl<'a> ConfigCostEstimator<'a> {
    pub fn new(graph: &'a ModelGraph) -> Self {
        Self {
            graph,
            apply_maintenance_fraction: false,
        }
    }

    /// Multiply each model's maintenance fraction into its creation cost.
    /// Off by default; fractions default to 1 either way.
    pub fn with_maintenance_fraction(mut self, apply: bool) -> Self {
        self.apply_maintenance_fraction = apply;
        self
    }

    pub fn estimate(&self, config: &Configuration) -> ConfigCosts {
        let decay = decay_factors(config, self.graph);

        let mut costs = ConfigCosts::default();
        for id in config.members() {
            self.accumulate(&mut costs, id, &decay);
        }
        for id in self.graph.destinations() {
            self.accumulate(&mut costs, id, &decay);
        }
        costs
    }

    fn accumulate(&self, costs: &mut ConfigCosts, id: &ModelId, decay: &DecayTable) {
        let Some(model) = self.graph.get(id) else {
            return;
        };
        let mut creation = model.creation_cost * decay.factor(id);
        if self.apply_maintenance_fraction {
            creation *= model.maintenance_fraction;
        }
        costs.total += model.storage_cost + creation;
        costs.storage += model.storage_cost;
    }
}
