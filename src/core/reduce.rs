//! Transitive reduction of the skill graph
//!
//! An edge `u -> v` is redundant when `v` can also be reached from `u` through
//! a longer path. Redundancy is decided against the full edge set, so the
//! result does not depend on the order edges are examined in. For a DAG the
//! reduction is unique.

use crate::core::error::{GraphError, Result};
use crate::core::models::SkillGraph;
use crate::{debug, info};
use petgraph::algo::tred::{dag_to_toposorted_adjacency_list, dag_transitive_reduction_closure};
use petgraph::algo::{tarjan_scc, toposort};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;

/// Outcome of a reduction
#[derive(Debug, Clone)]
pub struct Reduction {
    /// Graph with the minimal edge set, same nodes and attributes
    pub graph: SkillGraph,
    /// Edges that were dropped, as `(prerequisite, dependent)`
    pub removed: Vec<(String, String)>,
}

/// Compute the transitive reduction of `graph`
///
/// Node attributes are copied verbatim; only edges change.
///
/// # Errors
/// Returns `GraphError::Cycle` if the graph is not acyclic.
pub fn transitive_reduction(graph: &SkillGraph) -> Result<Reduction> {
    let (dg, index) = to_petgraph(graph);

    let order = toposort(&dg, None).map_err(|_| cycle_error(&dg))?;
    let (adjacency, revmap) = dag_to_toposorted_adjacency_list::<_, u32>(&dg, &order);
    let (reduced, _closure) = dag_transitive_reduction_closure(&adjacency);

    let mut removed = Vec::new();
    let reduced_graph = graph.with_edges_filtered(|prereq, skill| {
        let keep = reduced.contains_edge(
            revmap[index[prereq].index()],
            revmap[index[skill].index()],
        );
        if !keep {
            debug!("Removing redundant edge {prereq} -> {skill}");
            removed.push((prereq.to_string(), skill.to_string()));
        }
        keep
    });

    info!(
        "Transitive reduction removed {} of {} edges",
        removed.len(),
        graph.edge_count()
    );

    Ok(Reduction {
        graph: reduced_graph,
        removed,
    })
}

/// Fail unless the graph is acyclic
///
/// # Errors
/// Returns `GraphError::Cycle` naming the skills on a cycle.
pub fn ensure_acyclic(graph: &SkillGraph) -> Result<()> {
    let (dg, _) = to_petgraph(graph);
    toposort(&dg, None).map_err(|_| cycle_error(&dg))?;
    Ok(())
}

/// Mirror the skill graph into a petgraph `DiGraph`, node weights are skill names
fn to_petgraph(graph: &SkillGraph) -> (DiGraph<&str, ()>, HashMap<&str, NodeIndex>) {
    let mut dg = DiGraph::with_capacity(graph.skill_count(), graph.edge_count());
    let mut index = HashMap::with_capacity(graph.skill_count());

    for name in &graph.skills {
        index.insert(name.as_str(), dg.add_node(name.as_str()));
    }
    for (prereq, skill) in graph.edges() {
        dg.add_edge(index[prereq], index[skill], ());
    }

    (dg, index)
}

/// Build a cycle error from the first strongly connected component that forms a cycle
fn cycle_error(dg: &DiGraph<&str, ()>) -> GraphError {
    let mut skills: Vec<String> = tarjan_scc(dg)
        .into_iter()
        .find(|component| {
            component.len() > 1 || dg.contains_edge(component[0], component[0])
        })
        .map(|component| component.iter().map(|&n| dg[n].to_string()).collect())
        .unwrap_or_default();
    skills.sort();
    GraphError::Cycle { skills }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::builder::build_graph;
    use crate::core::color::ColorScheme;
    use crate::core::error::Error;
    use crate::core::loader::parse_skills;

    fn graph_from(json: &str) -> SkillGraph {
        build_graph(&parse_skills(json).unwrap(), ColorScheme::Gradient)
    }

    fn reachability(graph: &SkillGraph) -> Vec<(String, String, bool)> {
        let mut pairs = Vec::new();
        for u in &graph.skills {
            for v in &graph.skills {
                pairs.push((u.clone(), v.clone(), graph.reaches(u, v)));
            }
        }
        pairs
    }

    const DIAMOND: &str = r#"{
        "A": {},
        "B": {"depends_on": ["A"]},
        "C": {"depends_on": ["A"]},
        "D": {"depends_on": ["B", "C", "A"]},
        "E": {"depends_on": ["D", "A", "B"]}
    }"#;

    /// Chain with skip edges, a separate component, and an isolated skill
    const CHAIN_AND_ISLAND: &str = r#"{
        "A": {},
        "B": {"depends_on": ["A"]},
        "C": {"depends_on": ["B"]},
        "D": {"depends_on": ["C", "A"]},
        "E": {"depends_on": ["D", "B"]},
        "X": {},
        "Y": {"depends_on": ["X"]},
        "Z": {"depends_on": ["Y", "X"]},
        "W": {}
    }"#;

    #[test]
    fn test_removes_shortcut_edges() {
        let graph = graph_from(DIAMOND);
        let reduction = transitive_reduction(&graph).unwrap();

        let edges = reduction.graph.edges();
        assert_eq!(edges.len(), 5);
        assert!(reduction.graph.has_edge("A", "B"));
        assert!(reduction.graph.has_edge("A", "C"));
        assert!(reduction.graph.has_edge("B", "D"));
        assert!(reduction.graph.has_edge("C", "D"));
        assert!(reduction.graph.has_edge("D", "E"));
        assert!(!reduction.graph.has_edge("A", "D"));
        assert!(!reduction.graph.has_edge("A", "E"));
        assert!(!reduction.graph.has_edge("B", "E"));
        assert_eq!(reduction.removed.len(), 3);
    }

    #[test]
    fn test_preserves_reachability() {
        let graph = graph_from(DIAMOND);
        let reduction = transitive_reduction(&graph).unwrap();
        assert_eq!(reachability(&graph), reachability(&reduction.graph));
    }

    #[test]
    fn test_preserves_nodes_and_attributes() {
        let graph = graph_from(DIAMOND);
        let reduction = transitive_reduction(&graph).unwrap();

        assert_eq!(reduction.graph.skills, graph.skills);
        for name in &graph.skills {
            assert_eq!(reduction.graph.node(name), graph.node(name));
        }
    }

    #[test]
    fn test_idempotent() {
        let graph = graph_from(DIAMOND);
        let once = transitive_reduction(&graph).unwrap();
        let twice = transitive_reduction(&once.graph).unwrap();

        assert_eq!(once.graph.edges(), twice.graph.edges());
        assert!(twice.removed.is_empty());
    }

    #[test]
    fn test_chain_with_separate_component() {
        let graph = graph_from(CHAIN_AND_ISLAND);
        let reduction = transitive_reduction(&graph).unwrap();

        let mut removed = reduction.removed.clone();
        removed.sort();
        assert_eq!(
            removed,
            vec![
                ("A".to_string(), "D".to_string()),
                ("B".to_string(), "E".to_string()),
                ("X".to_string(), "Z".to_string()),
            ]
        );
        assert_eq!(reduction.graph.edges().len(), 6);
        assert!(reduction.graph.has_edge("X", "Y"));
        assert!(reduction.graph.has_edge("Y", "Z"));
        assert!(!reduction.graph.reaches("A", "Z"));
        assert!(!reduction.graph.reaches("X", "E"));
        assert_eq!(reduction.graph.skills, graph.skills);
        assert_eq!(reachability(&graph), reachability(&reduction.graph));

        let twice = transitive_reduction(&reduction.graph).unwrap();
        assert_eq!(twice.graph.edges(), reduction.graph.edges());
        assert!(twice.removed.is_empty());
    }

    #[test]
    fn test_no_redundant_edges_is_noop() {
        let graph = graph_from(
            r#"{"A": {}, "B": {"depends_on": ["A"]}, "C": {"depends_on": ["B"]}, "D": {}}"#,
        );
        let reduction = transitive_reduction(&graph).unwrap();

        assert_eq!(reduction.graph.edges(), graph.edges());
        assert!(reduction.removed.is_empty());
    }

    #[test]
    fn test_two_cycle_is_graph_error() {
        let graph = graph_from(r#"{"A": {"depends_on": ["B"]}, "B": {"depends_on": ["A"]}}"#);
        let err = transitive_reduction(&graph).unwrap_err();

        match err {
            Error::Graph(GraphError::Cycle { skills }) => assert_eq!(skills, vec!["A", "B"]),
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_self_dependency_is_graph_error() {
        let graph = graph_from(r#"{"A": {"depends_on": ["A"]}, "B": {}}"#);
        let err = ensure_acyclic(&graph).unwrap_err();

        match err {
            Error::Graph(GraphError::Cycle { skills }) => assert_eq!(skills, vec!["A"]),
            other => panic!("expected cycle error, got {other:?}"),
        }
    }

    #[test]
    fn test_acyclic_graph_passes_check() {
        assert!(ensure_acyclic(&graph_from(DIAMOND)).is_ok());
    }
}
