//! Decay factors: how much cheaper recomputation gets near a materialized
//! ancestor.
//!
//! Each materialized model propagates a discount curve over its downstream
//! transitive closure: direct dependents take the curve's first entry,
//! dependents-of-dependents the second, and so on. A node farther than the
//! curve reaches pays full cost. A materialized node with two or more
//! direct dependents uses the steeper curve, since its fixed cost is
//! amortized over more consumers.
//!
//! Propagation is a queue-driven breadth-first walk per materialized model
//! (bounded by curve length, no recursion), and a node reached from several
//! materialized ancestors keeps the minimum factor.

use std::collections::{HashMap, HashSet, VecDeque};

use viewpick_core::graph::ModelGraph;
use viewpick_core::ModelId;

use crate::config::Configuration;

/// Discount curve when the materialized ancestor has fan-out ≥ 2.
const SHARED_ANCESTOR_CURVE: [f64; 6] = [0.01, 0.25, 0.50, 0.70, 0.80, 0.90];

/// Discount curve when the materialized ancestor has fan-out 1.
const SINGLE_CONSUMER_CURVE: [f64; 6] = [0.25, 0.60, 0.60, 0.80, 0.90, 0.95];

/// Per-model multiplicative discounts for one configuration. Models absent
/// from the table (or never reached) pay full cost.
#[derive(Debug, Clone)]
pub struct DecayTable {
    factors: HashMap<ModelId, f64>,
}

impl DecayTable {
    pub fn factor(&self, id: &ModelId) -> f64 {
        self.factors.get(id).copied().unwrap_or(1.0)
    }
}

/// Compute the decay factor of every model under `config`.
///
/// The baseline configuration returns the all-ones table without touching
/// the graph. Tables are computed fresh on every call; nothing accumulates
/// across configurations.
pub fn decay_factors(config: &Configuration, graph: &ModelGraph) -> DecayTable {
    let mut factors: HashMap<ModelId, f64> =
        graph.ids().map(|id| (id.clone(), 1.0)).collect();

    for materialized in config.members() {
        // Enumerator-produced members always exist; a hand-built stray id
        // simply propagates nothing.
        let Some(node) = graph.get(materialized) else {
            continue;
        };
        if node.fan_out() == 0 {
            continue;
        }

        let curve: &[f64] = if node.fan_out() >= 2 {
            &SHARED_ANCESTOR_CURVE
        } else {
            &SINGLE_CONSUMER_CURVE
        };

        // Breadth-first over the downstream closure. First arrival at a node
        // is its shortest distance from `materialized`, and the curves never
        // decrease with distance, so per-ancestor pruning on `seen` is exact.
        let mut seen: HashSet<&ModelId> = HashSet::new();
        let mut queue: VecDeque<(&ModelId, usize)> = VecDeque::new();
        for dependent in &node.referenced_by {
            if seen.insert(dependent) {
                queue.push_back((dependent, 0));
            }
        }

        while let Some((id, index)) = queue.pop_front() {
            let value = curve[index];
            let entry = factors.entry(id.clone()).or_insert(1.0);
            if value < *entry {
                *entry = value;
            }

            // Past the curve's end the factor is 1: nothing left to spread.
            if index + 1 >= curve.len() {
                continue;
            }
            if let Some(next) = graph.get(id) {
                for dependent in &next.referenced_by {
                    if seen.insert(dependent) {
                        queue.push_back((dependent, index + 1));
                    }
                }
            }
        }
    }

    DecayTable { factors }
}
