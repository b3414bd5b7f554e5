#![forbid(unsafe_code)]
//! viewpick-advisor: drive one advisory run end to end.
//!
//! The `Advisor` pulls the four row sets out of a `Catalog`, assembles and
//! validates the graph, inlines every query, prices each model with one
//! plan-estimation call, and hands the costed graph to the search. The
//! result is an `AdviceReport`: ranked surviving configurations with their
//! deviation from the do-nothing baseline, plus provenance (run id, DAG
//! hash) for comparing runs.

pub mod advisor;
pub mod report;

pub use advisor::{Advisor, AdvisorError, Result};
pub use report::{AdviceReport, AdviceRow, ReportId};
