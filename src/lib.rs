#![forbid(unsafe_code)]
//! Umbrella crate for the viewpick workspace: re-exports the pieces most
//! callers need. Integration tests and benches build against this.

pub use viewpick_advisor::{AdviceReport, AdviceRow, Advisor, AdvisorError};
pub use viewpick_core::prelude::*;
pub use viewpick_plan::{estimate_plan_costs, PlanCosts, PlanTree};
pub use viewpick_rewrite::inline_all;
pub use viewpick_search::{Configuration, Configurations, SearchEngine};
