//! Bottom-up query inlining over a topological order.
//!
//! Models are visited upstream-first, so by the time a model is processed
//! every tracked upstream already holds its fully-inlined text; one textual
//! splice per dependency finishes the job. No adjacency list is mutated, so
//! a node reachable from several destinations is rewritten exactly once and
//! every path sees the same result.
//!
//! Substitution is textual: every occurrence of the upstream's reference
//! string is replaced, wherever it appears syntactically.

use viewpick_core::graph::ModelGraph;
use viewpick_core::{Error, Result};

/// Rewrite every model in place. After this returns, `inlined_sql` on each
/// node references only raw source relations.
pub fn inline_all(graph: &mut ModelGraph) -> Result<()> {
    let order = graph.topological_order();

    for id in order {
        let model = graph.expect(&id)?;

        // Substitutions for this node: one per upstream that is a tracked
        // model. Upstream ids absent from the graph are raw sources and
        // contribute nothing.
        let mut substitutions = Vec::new();
        for upstream_id in &model.depends_on {
            let Some(upstream) = graph.get(upstream_id) else {
                continue;
            };
            if upstream.reference.is_empty() {
                // A model with no recorded reference string cannot appear in
                // downstream text; splicing on "" would corrupt the query.
                return Err(Error::Graph(format!(
                    "model `{upstream_id}` has no reference string but is depended on by `{id}`"
                )));
            }
            substitutions.push((upstream.reference.clone(), upstream.inlined_sql.clone()));
        }

        if substitutions.is_empty() {
            continue;
        }

        let mut sql = model.inlined_sql.clone();
        for (reference, upstream_sql) in substitutions {
            sql = sql.replace(&reference, &format!("( {upstream_sql} )"));
        }
        graph
            .get_mut(&id)
            .expect("id came from this graph")
            .inlined_sql = sql;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use viewpick_core::catalog::{DependencyRow, ModelRow};
    use viewpick_core::ModelId;

    fn model(id: &str, sql: &str) -> ModelRow {
        ModelRow {
            id: id.into(),
            sql: sql.to_string(),
        }
    }

    fn dep(id: &str, upstream: &[&str]) -> DependencyRow {
        DependencyRow {
            id: id.into(),
            depends_on: upstream.iter().map(|u| ModelId::from(*u)).collect(),
            reference: format!("\"db\".\"main\".\"{id}\""),
        }
    }

    fn sql_of<'a>(graph: &'a ModelGraph, id: &str) -> &'a str {
        &graph.get(&id.into()).unwrap().inlined_sql
    }

    #[test]
    fn source_only_model_is_untouched() {
        let mut graph = ModelGraph::build(
            vec![model("a", "select * from raw.events")],
            vec![dep("a", &["raw.events"])],
            vec!["a".into()],
        )
        .unwrap();
        inline_all(&mut graph).unwrap();
        assert_eq!(sql_of(&graph, "a"), "select * from raw.events");
    }

    #[test]
    fn chain_inlines_transitively() {
        let mut graph = ModelGraph::build(
            vec![
                model("a", "select * from raw.events"),
                model("b", "select x from \"db\".\"main\".\"a\""),
                model("c", "select y from \"db\".\"main\".\"b\""),
            ],
            vec![
                dep("a", &["raw.events"]),
                dep("b", &["a"]),
                dep("c", &["b"]),
            ],
            vec!["c".into()],
        )
        .unwrap();
        inline_all(&mut graph).unwrap();
        assert_eq!(
            sql_of(&graph, "c"),
            "select y from ( select x from ( select * from raw.events ) )"
        );
    }

    #[test]
    fn diamond_inlines_both_paths() {
        // a feeds b and c; d reads both. The shared upstream must be spliced
        // into each path independently.
        let mut graph = ModelGraph::build(
            vec![
                model("a", "select * from raw.t"),
                model("b", "select b from \"db\".\"main\".\"a\""),
                model("c", "select c from \"db\".\"main\".\"a\""),
                model(
                    "d",
                    "select * from \"db\".\"main\".\"b\" join \"db\".\"main\".\"c\" using (k)",
                ),
            ],
            vec![
                dep("a", &["raw.t"]),
                dep("b", &["a"]),
                dep("c", &["a"]),
                dep("d", &["b", "c"]),
            ],
            vec!["d".into()],
        )
        .unwrap();
        inline_all(&mut graph).unwrap();
        let d = sql_of(&graph, "d");
        assert!(!d.contains("\"db\".\"main\".\"b\""));
        assert!(!d.contains("\"db\".\"main\".\"c\""));
        assert_eq!(d.matches("select * from raw.t").count(), 2);
    }

    #[test]
    fn every_textual_occurrence_is_replaced() {
        let mut graph = ModelGraph::build(
            vec![
                model("a", "select 1"),
                model(
                    "b",
                    "select * from \"db\".\"main\".\"a\" union select * from \"db\".\"main\".\"a\"",
                ),
            ],
            vec![dep("a", &[]), dep("b", &["a"])],
            vec!["b".into()],
        )
        .unwrap();
        inline_all(&mut graph).unwrap();
        assert_eq!(sql_of(&graph, "b").matches("( select 1 )").count(), 2);
    }

    #[test]
    fn missing_reference_string_is_an_error() {
        // `a` never got a dependency row, so its reference string is unknown.
        let mut graph = ModelGraph::build(
            vec![model("a", "select 1"), model("b", "select 2")],
            vec![dep("b", &["a"])],
            vec!["b".into()],
        )
        .unwrap();
        assert!(inline_all(&mut graph).is_err());
    }
}
