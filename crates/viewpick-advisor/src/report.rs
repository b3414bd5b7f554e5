//! The advisory report handed to the presentation layer.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use viewpick_core::graph::ModelGraph;
use viewpick_core::hash::{digest, Hash256};
use viewpick_search::{Configuration, ScoredConfig};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ReportId(pub Uuid);

/// One surviving configuration, with its deviation from the baseline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceRow {
    pub config: Configuration,
    pub total_cost: f64,
    pub storage_cost: f64,
    /// Deviation from the baseline cost, in percent (negative is cheaper).
    pub pct_vs_baseline: f64,
}

/// The outcome of one advisory run, rows already ranked by total cost.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdviceReport {
    pub id: ReportId,

    /// Stable digest of the inlined DAG, for recognizing comparable runs.
    pub graph_hash: Hash256,

    /// Advisor version string for provenance.
    pub advisor_version: String,

    /// Cost of materializing nothing; all rows are compared against this.
    pub baseline_cost: f64,

    /// Storage budget the candidates were filtered against.
    pub storage_budget: f64,

    pub rows: Vec<AdviceRow>,
}

impl AdviceReport {
    pub fn assemble(
        graph: &ModelGraph,
        baseline_cost: f64,
        storage_budget: f64,
        ranked: Vec<ScoredConfig>,
    ) -> Self {
        let graph_hash = digest(
            graph
                .models()
                .flat_map(|m| [m.id.as_str().as_bytes(), m.inlined_sql.as_bytes()]),
        );

        let rows = ranked
            .into_iter()
            .map(|scored| AdviceRow {
                pct_vs_baseline: pct_deviation(scored.total_cost, baseline_cost),
                config: scored.config,
                total_cost: scored.total_cost,
                storage_cost: scored.storage_cost,
            })
            .collect();

        Self {
            id: ReportId(Uuid::new_v4()),
            graph_hash,
            advisor_version: viewpick_core::VERSION.to_string(),
            baseline_cost,
            storage_budget,
            rows,
        }
    }

    /// The cheapest surviving configuration, if any survived the budget.
    pub fn best(&self) -> Option<&AdviceRow> {
        self.rows.first()
    }
}

/// Percentage deviation of `cost` from `baseline`; zero when the baseline
/// itself is zero (an empty or cost-free project).
pub fn pct_deviation(cost: f64, baseline: f64) -> f64 {
    if baseline == 0.0 {
        return 0.0;
    }
    (cost / baseline - 1.0) * 100.0
}
