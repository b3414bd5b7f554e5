//! In-memory representation of the model DAG.
//!
//! A `Model` carries its compiled query text (raw and inlined), its direct
//! upstream and downstream edges, and the per-node cost attributes filled in
//! by the costing pass. `ModelGraph` owns the nodes, keeps the two edge
//! directions mutually inverse, and rejects cyclic input at construction.
//!
//! Upstream identifiers that do not name a tracked model are raw source
//! relations: they stay on the `depends_on` list so the inliner can skip
//! them, but they get no node and no reverse edge.

use std::collections::{BTreeMap, HashMap, VecDeque};

use serde::{Deserialize, Serialize};

use crate::catalog::{DependencyRow, ModelRow};
use crate::error::{Error, Result};
use crate::id::ModelId;

/// One node in the dependency graph.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Model {
    pub id: ModelId,

    /// Compiled query text as delivered by the catalog.
    pub raw_sql: String,

    /// Query text after inlining; starts equal to `raw_sql`.
    pub inlined_sql: String,

    /// Fully-qualified reference string (`"db"."schema"."alias"`) by which
    /// other models' query text refers to this model's materialized form.
    pub reference: String,

    /// Direct upstream identifiers, models and raw sources alike.
    pub depends_on: Vec<ModelId>,

    /// Direct downstream model identifiers (inverse of `depends_on`,
    /// restricted to tracked models).
    pub referenced_by: Vec<ModelId>,

    /// Estimated output-relation size (row count × row width of the plan root).
    pub storage_cost: f64,

    /// Estimated cost of computing the relation (row count × row width summed
    /// over every plan node).
    pub creation_cost: f64,

    /// Reserved multiplier in (0, 1]; neutral unless the catalog overrides it.
    pub maintenance_fraction: f64,
}

impl Model {
    fn skeleton(id: ModelId, sql: String) -> Self {
        Self {
            id,
            inlined_sql: sql.clone(),
            raw_sql: sql,
            reference: String::new(),
            depends_on: Vec::new(),
            referenced_by: Vec::new(),
            storage_cost: 0.0,
            creation_cost: 0.0,
            maintenance_fraction: 1.0,
        }
    }

    /// Number of direct downstream model dependents (graph fan-out).
    pub fn fan_out(&self) -> usize {
        self.referenced_by.len()
    }
}

/// The dependency graph for one advisory run.
///
/// Nodes are stored in a `BTreeMap` so every iteration over the graph is in
/// lexicographic identifier order, which keeps enumeration and reports
/// deterministic across runs.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ModelGraph {
    models: BTreeMap<ModelId, Model>,
    destinations: Vec<ModelId>,
}

impl ModelGraph {
    /// Assemble and validate the graph from catalog rows.
    ///
    /// Fails with `Error::Graph` if a dependency or destination row names a
    /// model absent from the model table, or if the model-to-model edges
    /// contain a cycle.
    pub fn build(
        models: Vec<ModelRow>,
        dependencies: Vec<DependencyRow>,
        destinations: Vec<ModelId>,
    ) -> Result<Self> {
        let mut nodes: BTreeMap<ModelId, Model> = BTreeMap::new();
        for row in models {
            nodes.insert(row.id.clone(), Model::skeleton(row.id, row.sql));
        }

        for row in dependencies {
            if !nodes.contains_key(&row.id) {
                return Err(Error::Graph(format!(
                    "dependency row names unknown model `{}`",
                    row.id
                )));
            }

            // Reverse edges first: only tracked models get one.
            for upstream in &row.depends_on {
                if let Some(up) = nodes.get_mut(upstream) {
                    if !up.referenced_by.contains(&row.id) {
                        up.referenced_by.push(row.id.clone());
                    }
                }
            }

            let node = nodes.get_mut(&row.id).expect("checked above");
            node.depends_on = row.depends_on;
            node.reference = row.reference;
        }

        let mut seen = Vec::with_capacity(destinations.len());
        for dest in destinations {
            if !nodes.contains_key(&dest) {
                return Err(Error::Graph(format!(
                    "destination node `{dest}` is not a known model"
                )));
            }
            if !seen.contains(&dest) {
                seen.push(dest);
            }
        }

        let graph = Self {
            models: nodes,
            destinations: seen,
        };
        graph.check_acyclic()?;
        Ok(graph)
    }

    /// Kahn's algorithm over the model-to-model edges. Every node must be
    /// drained from the ready queue; a leftover node sits on a cycle.
    fn check_acyclic(&self) -> Result<()> {
        let mut in_degree: HashMap<&ModelId, usize> = HashMap::new();
        for model in self.models.values() {
            in_degree.entry(&model.id).or_insert(0);
            for downstream in &model.referenced_by {
                *in_degree.entry(downstream).or_insert(0) += 1;
            }
        }

        let mut ready: VecDeque<&ModelId> = in_degree
            .iter()
            .filter_map(|(id, &deg)| (deg == 0).then_some(*id))
            .collect();

        let mut drained = 0usize;
        while let Some(id) = ready.pop_front() {
            drained += 1;
            for downstream in &self.models[id].referenced_by {
                let deg = in_degree.get_mut(downstream).expect("edge into known node");
                *deg -= 1;
                if *deg == 0 {
                    ready.push_back(downstream);
                }
            }
        }

        if drained < self.models.len() {
            let stuck = in_degree
                .iter()
                .find(|(_, &deg)| deg > 0)
                .map(|(id, _)| id.as_str())
                .unwrap_or("<unknown>");
            return Err(Error::Graph(format!(
                "dependency cycle detected through model `{stuck}`"
            )));
        }
        Ok(())
    }

    pub fn get(&self, id: &ModelId) -> Option<&Model> {
        self.models.get(id)
    }

    pub fn get_mut(&mut self, id: &ModelId) -> Option<&mut Model> {
        self.models.get_mut(id)
    }

    /// Node lookup that treats absence as a broken invariant.
    pub fn expect(&self, id: &ModelId) -> Result<&Model> {
        self.models
            .get(id)
            .ok_or_else(|| Error::Graph(format!("model `{id}` missing from graph")))
    }

    pub fn contains(&self, id: &ModelId) -> bool {
        self.models.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.models.len()
    }

    pub fn is_empty(&self) -> bool {
        self.models.is_empty()
    }

    /// All nodes, in identifier order.
    pub fn models(&self) -> impl Iterator<Item = &Model> {
        self.models.values()
    }

    pub fn ids(&self) -> impl Iterator<Item = &ModelId> {
        self.models.keys()
    }

    /// Terminal models that every candidate plan must compute.
    pub fn destinations(&self) -> &[ModelId] {
        &self.destinations
    }

    /// Models eligible for materialization: everything not a destination,
    /// in identifier order.
    pub fn intermediates(&self) -> Vec<ModelId> {
        self.models
            .keys()
            .filter(|id| !self.destinations.contains(*id))
            .cloned()
            .collect()
    }

    /// A topological order over the model-to-model edges, upstream first.
    /// The graph was validated acyclic at construction, so this always
    /// covers every node.
    pub fn topological_order(&self) -> Vec<ModelId> {
        let mut in_degree: BTreeMap<&ModelId, usize> = BTreeMap::new();
        for model in self.models.values() {
            in_degree.entry(&model.id).or_insert(0);
            for downstream in &model.referenced_by {
                *in_degree.entry(downstream).or_insert(0) += 1;
            }
        }

        let mut ready: VecDeque<&ModelId> = in_degree
            .iter()
            .filter_map(|(id, &deg)| (deg == 0).then_some(*id))
            .collect();

        let mut order = Vec::with_capacity(self.models.len());
        while let Some(id) = ready.pop_front() {
            order.push(id.clone());
            for downstream in &self.models[id].referenced_by {
                let deg = in_degree.get_mut(downstream).expect("edge into known node");
                *deg -= 1;
                if *deg == 0 {
                    ready.push_back(downstream);
                }
            }
        }
        order
    }
}
