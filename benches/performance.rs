use criterion::{criterion_group, criterion_main, Criterion};

use viewpick_core::catalog::{DependencyRow, ModelRow};
use viewpick_core::graph::ModelGraph;
use viewpick_core::ModelId;
use viewpick_search::{ConfigCostEstimator, Configurations, SearchEngine};

/// Layered DAG: `width` intermediates per layer, each reading the whole
/// previous layer, with one destination on top.
fn make_graph(layers: usize, width: usize) -> ModelGraph {
    let mut models = Vec::new();
    let mut dependencies = Vec::new();

    let mut previous: Vec<String> = Vec::new();
    for layer in 0..layers {
        let mut current = Vec::new();
        for slot in 0..width {
            let id = format!("m{layer}_{slot}");
            models.push(ModelRow {
                id: ModelId::from(id.as_str()),
                sql: format!("select * from src_{id}"),
            });
            dependencies.push(DependencyRow {
                id: ModelId::from(id.as_str()),
                depends_on: previous.iter().map(|p| ModelId::from(p.as_str())).collect(),
                reference: format!("\"db\".\"s\".\"{id}\""),
            });
            current.push(id);
        }
        previous = current;
    }

    models.push(ModelRow {
        id: "dest".into(),
        sql: "select 1".to_string(),
    });
    dependencies.push(DependencyRow {
        id: "dest".into(),
        depends_on: previous.iter().map(|p| ModelId::from(p.as_str())).collect(),
        reference: "\"db\".\"s\".\"dest\"".to_string(),
    });

    let mut graph = ModelGraph::build(models, dependencies, vec!["dest".into()]).unwrap();
    let ids: Vec<ModelId> = graph.ids().cloned().collect();
    for (i, id) in ids.iter().enumerate() {
        let model = graph.get_mut(id).unwrap();
        model.storage_cost = 10.0 + i as f64;
        model.creation_cost = 100.0 + i as f64;
    }
    graph
}

fn bench_search(c: &mut Criterion) {
    let graph = make_graph(4, 4);
    c.bench_function("score_all_configurations_k2", |b| {
        b.iter(|| {
            let engine = SearchEngine::new(ConfigCostEstimator::new(&graph), f64::MAX);
            let candidates = Configurations::new(graph.intermediates(), 2);
            let results = engine.run(candidates);
            assert!(!results.is_empty());
        })
    });
}

fn bench_enumeration(c: &mut Criterion) {
    let graph = make_graph(5, 4);
    c.bench_function("enumerate_configurations_k3", |b| {
        b.iter(|| Configurations::new(graph.intermediates(), 3).count())
    });
}

criterion_group!(benches, bench_search, bench_enumeration);
criterion_main!(benches);
