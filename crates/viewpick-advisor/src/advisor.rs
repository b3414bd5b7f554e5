//! The advisory pipeline.
//!
//! One run is strictly sequential: rows → graph → inline → cost → search.
//! Any failure aborts the whole run; nothing partial is reported and the
//! database is never mutated.

use thiserror::Error;

use viewpick_core::catalog::Catalog;
use viewpick_core::graph::ModelGraph;
use viewpick_core::{AdvisorConfig, ModelId};
use viewpick_plan::{estimate_plan_costs, PlanError, PlanTree};
use viewpick_rewrite::inline_all;
use viewpick_search::{
    rank, ConfigCostEstimator, Configuration, Configurations, SearchEngine,
};

use crate::report::AdviceReport;

pub type Result<T> = std::result::Result<T, AdvisorError>;

#[derive(Debug, Error)]
pub enum AdvisorError {
    #[error(transparent)]
    Core(#[from] viewpick_core::Error),

    #[error("plan estimation for model `{model}` returned a malformed plan: {source}")]
    Plan {
        model: ModelId,
        #[source]
        source: PlanError,
    },

    /// Failures surfaced by the catalog collaborator: environment, budget,
    /// or backend errors (see `viewpick-db`).
    #[error("catalog failure: {0}")]
    Catalog(#[source] Box<dyn std::error::Error + Send + Sync>),
}

fn catalog_err<E>(e: E) -> AdvisorError
where
    E: std::error::Error + Send + Sync + 'static,
{
    AdvisorError::Catalog(Box::new(e))
}

/// Orchestrates one advisory run over any `Catalog` implementation.
pub struct Advisor<C: Catalog> {
    catalog: C,
    config: AdvisorConfig,
}

impl<C: Catalog> Advisor<C> {
    pub fn new(catalog: C, config: AdvisorConfig) -> Self {
        Self { catalog, config }
    }

    /// Run the full pipeline and return the ranked report.
    pub fn advise(&mut self) -> Result<AdviceReport> {
        self.config.validate()?;

        let mut graph = self.load_graph()?;
        inline_all(&mut graph)?;
        self.attach_costs(&mut graph)?;

        let budget = self.catalog.storage_budget().map_err(catalog_err)?;

        let estimator = ConfigCostEstimator::new(&graph)
            .with_maintenance_fraction(self.config.apply_maintenance_fraction);
        let baseline = estimator.estimate(&Configuration::Baseline);

        let engine = SearchEngine::new(estimator, budget);
        let candidates =
            Configurations::new(graph.intermediates(), self.config.max_materializations);
        let mut results = engine.run(candidates);
        rank(&mut results);

        Ok(AdviceReport::assemble(
            &graph,
            baseline.total,
            budget,
            results,
        ))
    }

    fn load_graph(&mut self) -> Result<ModelGraph> {
        let models = self.catalog.all_models().map_err(catalog_err)?;
        let dependencies = self.catalog.model_dependencies().map_err(catalog_err)?;
        let destinations = self.catalog.destination_nodes().map_err(catalog_err)?;

        let mut graph = ModelGraph::build(models, dependencies, destinations)?;

        for (id, fraction) in self.catalog.maintenance_fractions().map_err(catalog_err)? {
            if let Some(model) = graph.get_mut(&id) {
                model.maintenance_fraction = fraction.unwrap_or(1.0);
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            models = graph.len(),
            destinations = graph.destinations().len(),
            "graph assembled"
        );

        Ok(graph)
    }

    /// One plan-estimation call per model, against its inlined query.
    fn attach_costs(&mut self, graph: &mut ModelGraph) -> Result<()> {
        let ids: Vec<ModelId> = graph.ids().cloned().collect();
        for id in ids {
            let sql = graph.expect(&id)?.inlined_sql.clone();
            let payload = self.catalog.explain(&sql).map_err(catalog_err)?;
            let tree = PlanTree::from_explain_json(&payload).map_err(|source| {
                AdvisorError::Plan {
                    model: id.clone(),
                    source,
                }
            })?;
            let costs = estimate_plan_costs(&tree);

            #[cfg(feature = "tracing")]
            tracing::trace!(
                model = %id,
                storage = costs.storage,
                creation = costs.creation,
                "model costed"
            );

            let model = graph.get_mut(&id).expect("id came from this graph");
            model.storage_cost = costs.storage;
            model.creation_cost = costs.creation;
        }
        Ok(())
    }
}
