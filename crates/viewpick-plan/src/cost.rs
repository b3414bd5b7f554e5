//! Per-query cost estimation over a normalized plan tree.
//!
//! Creation cost sums `rows × width` over every node; storage cost is the
//! root's contribution alone, standing in for the size of the output
//! relation. Accumulation is a pure sum, so traversal order is irrelevant.

use serde::{Deserialize, Serialize};

use crate::tree::PlanTree;

/// The pair of costs derived from one execution plan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PlanCosts {
    /// Size of the output relation (root rows × root width).
    pub storage: f64,
    /// Work to compute it (rows × width summed over the whole tree).
    pub creation: f64,
}

pub fn estimate_plan_costs(tree: &PlanTree) -> PlanCosts {
    let mut creation = 0.0;
    let mut stack = vec![&tree.root];
    while let Some(node) = stack.pop() {
        creation += node.contribution();
        stack.extend(node.children.iter());
    }

    PlanCosts {
        storage: tree.root.contribution(),
        creation,
    }
}
