//! Exhaustive scoring of candidate plans under the storage budget.
//!
//! Every candidate is scored; a candidate whose storage footprint is not
//! strictly under the budget is dropped entirely, whatever its cost. The
//! surviving set is returned in enumeration order; `rank` applies the
//! stable by-cost ordering the reporting layer presents.

use serde::{Deserialize, Serialize};

use crate::config::Configuration;
use crate::config_cost::ConfigCostEstimator;

/// One surviving candidate with its scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoredConfig {
    pub config: Configuration,
    pub total_cost: f64,
    pub storage_cost: f64,
}

pub struct SearchEngine<'a> {
    estimator: ConfigCostEstimator<'a>,
    storage_budget: f64,
}

impl<'a> SearchEngine<'a> {
    pub fn new(estimator: ConfigCostEstimator<'a>, storage_budget: f64) -> Self {
        Self {
            estimator,
            storage_budget,
        }
    }

    /// Score every candidate and keep those that fit the budget.
    pub fn run(&self, candidates: impl IntoIterator<Item = Configuration>) -> Vec<ScoredConfig> {
        let mut survivors = Vec::new();
        for config in candidates {
            let costs = self.estimator.estimate(&config);

            #[cfg(feature = "tracing")]
            tracing::trace!(
                config = %config,
                total = costs.total,
                storage = costs.storage,
                "scored configuration"
            );

            if costs.storage < self.storage_budget {
                survivors.push(ScoredConfig {
                    config,
                    total_cost: costs.total,
                    storage_cost: costs.storage,
                });
            }
        }
        survivors
    }
}

/// Stable ascending sort by total cost; equal costs keep enumeration order.
pub fn rank(results: &mut [ScoredConfig]) {
    results.sort_by(|a, b| {
        a.total_cost
            .partial_cmp(&b.total_cost)
            .unwrap_or(std::cmp::Ordering::Equal)
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::enumerate::Configurations;
    use viewpick_core::catalog::{DependencyRow, ModelRow};
    use viewpick_core::graph::ModelGraph;
    use viewpick_core::ModelId;

    /// Two intermediates feeding one destination, uniform costs.
    fn graph(storage: f64, creation: f64) -> ModelGraph {
        let models = ["x", "y", "z"]
            .iter()
            .map(|id| ModelRow {
                id: ModelId::from(*id),
                sql: format!("select * from {id}_src"),
            })
            .collect();
        let deps = vec![
            DependencyRow {
                id: "x".into(),
                depends_on: vec![],
                reference: "\"db\".\"s\".\"x\"".to_string(),
            },
            DependencyRow {
                id: "y".into(),
                depends_on: vec![],
                reference: "\"db\".\"s\".\"y\"".to_string(),
            },
            DependencyRow {
                id: "z".into(),
                depends_on: vec!["x".into(), "y".into()],
                reference: "\"db\".\"s\".\"z\"".to_string(),
            },
        ];
        let mut g = ModelGraph::build(models, deps, vec!["z".into()]).unwrap();
        for id in ["x", "y", "z"] {
            let m = g.get_mut(&id.into()).unwrap();
            m.storage_cost = storage;
            m.creation_cost = creation;
        }
        g
    }

    #[test]
    fn over_budget_candidates_are_dropped_entirely() {
        let g = graph(60.0, 1.0);
        // Baseline stores 60 (z); any single materialization stores 120;
        // pairs store 180. Budget 100 keeps only the baseline.
        let engine = SearchEngine::new(ConfigCostEstimator::new(&g), 100.0);
        let results = engine.run(Configurations::new(g.intermediates(), 2));
        assert_eq!(results.len(), 1);
        assert!(results[0].config.is_baseline());
    }

    #[test]
    fn budget_bound_is_strict() {
        let g = graph(50.0, 1.0);
        // Baseline stores exactly 50; a budget of 50 must exclude it.
        let engine = SearchEngine::new(ConfigCostEstimator::new(&g), 50.0);
        let results = engine.run(vec![Configuration::Baseline]);
        assert!(results.is_empty());
    }

    #[test]
    fn rank_is_ascending_and_stable() {
        let mut g = graph(1.0, 100.0);
        // x is nearly free to keep around, so persisting it beats recomputing
        // the expensive destination at full cost.
        g.get_mut(&"x".into()).unwrap().creation_cost = 1.0;
        let engine = SearchEngine::new(ConfigCostEstimator::new(&g), 1e9);
        let mut results = engine.run(Configurations::new(g.intermediates(), 2));
        rank(&mut results);
        for pair in results.windows(2) {
            assert!(pair[0].total_cost <= pair[1].total_cost);
        }
        assert_eq!(
            results[0].config,
            Configuration::Materialize(vec!["x".into()])
        );
    }

    #[test]
    fn membership_does_not_depend_on_evaluation_order() {
        let g = graph(10.0, 10.0);
        let engine = SearchEngine::new(ConfigCostEstimator::new(&g), 1e9);
        let forward: Vec<_> = engine.run(Configurations::new(g.intermediates(), 2));
        let mut reversed: Vec<_> = Configurations::new(g.intermediates(), 2).collect();
        reversed.reverse();
        let backward = engine.run(reversed);
        assert_eq!(forward.len(), backward.len());
        for result in &forward {
            assert!(backward.iter().any(|r| r.config == result.config));
        }
    }
}
