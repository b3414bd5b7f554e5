#![forbid(unsafe_code)]
//! viewpick-plan: execution-plan trees and per-query cost estimation.
//!
//! The database's planner hands back a hierarchical plan, sometimes wrapped
//! in a one-element list. That shape is normalized exactly once at the
//! boundary (`PlanTree::from_explain_json`); everything downstream works on
//! the plain tree. Costing is a pure sum over node contributions, so calls
//! are independent and restartable by construction.

pub mod cost;
pub mod tree;

pub use cost::{estimate_plan_costs, PlanCosts};
pub use tree::{PlanError, PlanNode, PlanTree};
