//! Known-topology regression tests.
//!
//! The fixture below has two cyclic clusters and one diamond:
//!
//! ```text
//! 1 <------ 4 -----------> 5 ------> 7
//! | ↖       ^              |      ↗  |
//! |    ↖    |              |    ↗    |
//! v       ↖ |              v  ↗      v
//! 2 -----> 3               6 <------ 8
//!
//! 9 -----> 10
//! |         ^
//! v         |
//! 11 ----> 12
//! ```

use std::collections::{BTreeMap, BTreeSet};

use tangle_core::{AnalysisConfig, Graph};

const FIXTURE: [(&str, &str); 15] = [
    ("1", "2"),
    ("2", "3"),
    ("3", "1"),
    ("3", "4"),
    ("4", "1"),
    ("4", "5"),
    ("5", "6"),
    ("5", "7"),
    ("6", "7"),
    ("7", "8"),
    ("8", "6"),
    ("9", "10"),
    ("9", "11"),
    ("11", "12"),
    ("12", "10"),
];

fn build_graph() -> Graph {
    Graph::from_edges(FIXTURE).expect("fixture names are valid")
}

fn degree_table(graph: &Graph, degree: impl Fn(&Graph, &str) -> usize) -> BTreeMap<String, usize> {
    graph
        .vertices()
        .map(|v| (v.to_string(), degree(graph, v.name())))
        .collect()
}

fn expected(table: &[(&str, usize)]) -> BTreeMap<String, usize> {
    table.iter().map(|(k, v)| ((*k).to_string(), *v)).collect()
}

fn component_sets(graph: &Graph) -> BTreeSet<BTreeSet<String>> {
    graph
        .strongly_connected_components()
        .iter()
        .map(|c| c.members().iter().map(ToString::to_string).collect())
        .collect()
}

fn set_of(names: &[&str]) -> BTreeSet<String> {
    names.iter().map(|s| (*s).to_string()).collect()
}

// ---------------------------------------------------------------------------
// Degree bookkeeping
// ---------------------------------------------------------------------------

#[test]
fn fixture_degree_tables() {
    let mut graph = build_graph();

    let mut indegree = expected(&[
        ("1", 2),
        ("2", 1),
        ("3", 1),
        ("4", 1),
        ("5", 1),
        ("6", 2),
        ("7", 2),
        ("8", 1),
        ("9", 0),
        ("10", 2),
        ("11", 1),
        ("12", 1),
    ]);
    let mut outdegree = expected(&[
        ("1", 1),
        ("2", 1),
        ("3", 2),
        ("4", 2),
        ("5", 2),
        ("6", 1),
        ("7", 1),
        ("8", 1),
        ("9", 2),
        ("10", 0),
        ("11", 1),
        ("12", 1),
    ]);

    assert_eq!(graph.edge_count(), 15);
    assert_eq!(graph.vertex_count(), 12);
    assert_eq!(degree_table(&graph, Graph::indegree), indegree);
    assert_eq!(degree_table(&graph, Graph::outdegree), outdegree);

    // Duplicate inserts change nothing.
    assert!(!graph.insert_edge("1", "2").expect("valid names"));
    assert!(!graph.insert_edge("2", "3").expect("valid names"));
    assert_eq!(graph.edge_count(), 15);
    assert_eq!(degree_table(&graph, Graph::indegree), indegree);
    assert_eq!(degree_table(&graph, Graph::outdegree), outdegree);

    // Delete an existing edge, then repeat the delete.
    assert!(graph.delete_edge("3", "1"));
    assert!(!graph.delete_edge("3", "1"));
    *indegree.get_mut("1").expect("1 tracked") -= 1;
    *outdegree.get_mut("3").expect("3 tracked") -= 1;
    assert_eq!(degree_table(&graph, Graph::indegree), indegree);
    assert_eq!(degree_table(&graph, Graph::outdegree), outdegree);

    // Removing both of 9's edges removes 9 itself.
    assert!(graph.delete_edge("9", "10"));
    assert!(graph.delete_edge("9", "11"));
    assert_eq!(graph.edge_count(), 12);
    assert_eq!(graph.vertex_count(), 11);
    assert!(!graph.contains_vertex("9"));
}

#[test]
fn small_graph_loses_vertex_with_its_last_edges() {
    let mut graph = Graph::from_edges([("1", "2"), ("3", "1"), ("2", "4"), ("2", "5"), ("2", "3")])
        .expect("valid names");
    graph.insert_edge("9", "4").expect("valid names");
    graph.insert_edge("9", "5").expect("valid names");

    let vertices = graph.vertex_count();
    let edges = graph.edge_count();

    assert!(graph.delete_edge("9", "4"));
    assert!(graph.contains_vertex("9"));
    assert!(graph.delete_edge("9", "5"));

    assert!(!graph.contains_vertex("9"));
    assert_eq!(graph.vertex_count(), vertices - 1);
    assert_eq!(graph.edge_count(), edges - 2);
    // 4 and 5 keep their edges from 2.
    assert_eq!(graph.indegree("4"), 1);
    assert_eq!(graph.indegree("5"), 1);
}

// ---------------------------------------------------------------------------
// Topological ordering
// ---------------------------------------------------------------------------

#[test]
fn acyclic_tracks_cycle_edits() {
    let mut graph = build_graph();
    assert!(!graph.acyclic().is_acyclic(), "fixture has cycles");

    graph.delete_edge("3", "1");
    graph.delete_edge("3", "4");
    graph.delete_edge("8", "6");

    let sort = graph.acyclic();
    assert!(sort.is_acyclic(), "all cycles broken");
    assert_eq!(sort.order().len(), graph.vertex_count());
    let position = |name: &str| {
        sort.order()
            .iter()
            .position(|v| v == name)
            .unwrap_or_else(|| panic!("{name} missing"))
    };
    for (from, to) in graph.edges() {
        assert!(position(from.name()) < position(to.name()), "{from} before {to}");
    }

    graph.insert_edge("5", "3").expect("valid names");
    graph.insert_edge("3", "4").expect("valid names");
    assert!(!graph.acyclic().is_acyclic(), "3 -> 4 -> 5 -> 3 closes a cycle");
}

#[test]
fn cyclic_fixture_emits_only_the_free_vertices() {
    let sort = build_graph().acyclic();
    let emitted: BTreeSet<String> = sort.order().iter().map(ToString::to_string).collect();

    // Everything in 1..=8 is on or behind a cycle; 9..=12 form a DAG.
    assert_eq!(emitted, set_of(&["9", "10", "11", "12"]));
    assert_eq!(sort.blocked().len(), 8);
}

// ---------------------------------------------------------------------------
// Strongly connected components
// ---------------------------------------------------------------------------

#[test]
fn fixture_components() {
    let mut graph = build_graph();

    let expected: BTreeSet<BTreeSet<String>> = [
        set_of(&["1", "2", "3", "4"]),
        set_of(&["6", "7", "8"]),
        set_of(&["5"]),
        set_of(&["9"]),
        set_of(&["10"]),
        set_of(&["11"]),
        set_of(&["12"]),
    ]
    .into_iter()
    .collect();
    assert_eq!(graph.strongly_connected_components().len(), 7);
    assert_eq!(component_sets(&graph), expected);

    graph.insert_edge("2", "9").expect("valid names");
    graph.insert_edge("10", "2").expect("valid names");

    let merged: BTreeSet<BTreeSet<String>> = [
        set_of(&["1", "2", "3", "4", "9", "10", "11", "12"]),
        set_of(&["6", "7", "8"]),
        set_of(&["5"]),
    ]
    .into_iter()
    .collect();
    assert_eq!(graph.strongly_connected_components().len(), 3);
    assert_eq!(component_sets(&graph), merged);
}

#[test]
fn fixture_cycles_are_the_multi_member_components() {
    let components = build_graph().strongly_connected_components_with(&AnalysisConfig::lexical());
    let cycles: Vec<Vec<String>> = components
        .cycles()
        .into_iter()
        .map(|c| c.members().iter().map(ToString::to_string).collect())
        .collect();

    assert_eq!(cycles, [vec!["1", "2", "3", "4"], vec!["6", "7", "8"]]);
}
