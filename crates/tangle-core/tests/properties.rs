//! Property tests: random edit scripts checked against a petgraph oracle.
//!
//! Vertex names come from a small alphabet so scripts hit duplicates,
//! deletes of live edges, self-loops, and vertex re-creation often.

use std::collections::{BTreeSet, HashSet};

use petgraph::algo::{is_cyclic_directed, kosaraju_scc};
use petgraph::graphmap::DiGraphMap;
use proptest::prelude::*;
use tangle_core::{AnalysisConfig, Graph};

const ALPHABET: [&str; 8] = ["a", "b", "c", "d", "e", "f", "g", "h"];

#[derive(Debug, Clone)]
enum Op {
    Insert(usize, usize),
    Delete(usize, usize),
}

fn arb_op() -> impl Strategy<Value = Op> {
    let vertex = 0..ALPHABET.len();
    prop_oneof![
        3 => (vertex.clone(), vertex.clone()).prop_map(|(a, b)| Op::Insert(a, b)),
        1 => (vertex.clone(), vertex).prop_map(|(a, b)| Op::Delete(a, b)),
    ]
}

/// Replay `ops` on both a [`Graph`] and a plain edge set.
fn replay(ops: &[Op]) -> (Graph, HashSet<(usize, usize)>) {
    let mut graph = Graph::new();
    let mut edges = HashSet::new();
    for op in ops {
        match *op {
            Op::Insert(a, b) => {
                let inserted = graph
                    .insert_edge(ALPHABET[a], ALPHABET[b])
                    .expect("alphabet names are valid");
                assert_eq!(inserted, edges.insert((a, b)));
            }
            Op::Delete(a, b) => {
                let deleted = graph.delete_edge(ALPHABET[a], ALPHABET[b]);
                assert_eq!(deleted, edges.remove(&(a, b)));
            }
        }
    }
    (graph, edges)
}

fn oracle(edges: &HashSet<(usize, usize)>) -> DiGraphMap<usize, ()> {
    let mut oracle = DiGraphMap::new();
    for &(a, b) in edges {
        oracle.add_edge(a, b, ());
    }
    oracle
}

proptest! {
    #![proptest_config(proptest::test_runner::Config::with_cases(512))]

    #[test]
    fn counters_match_the_edge_set(ops in prop::collection::vec(arb_op(), 0..64)) {
        let (graph, edges) = replay(&ops);

        let live: BTreeSet<usize> = edges.iter().flat_map(|&(a, b)| [a, b]).collect();
        prop_assert_eq!(graph.edge_count(), edges.len());
        prop_assert_eq!(graph.vertex_count(), live.len());
        prop_assert_eq!(graph.edges().count(), edges.len());

        for (i, name) in ALPHABET.iter().enumerate() {
            let indegree = edges.iter().filter(|&&(_, b)| b == i).count();
            let outdegree = edges.iter().filter(|&&(a, _)| a == i).count();
            prop_assert_eq!(graph.indegree(name), indegree, "indegree of {}", name);
            prop_assert_eq!(graph.outdegree(name), outdegree, "outdegree of {}", name);
            prop_assert_eq!(graph.contains_vertex(name), live.contains(&i));
        }
    }

    #[test]
    fn acyclic_agrees_with_petgraph(ops in prop::collection::vec(arb_op(), 0..64)) {
        let (graph, edges) = replay(&ops);
        let expected = !is_cyclic_directed(&oracle(&edges));

        for config in [AnalysisConfig::default(), AnalysisConfig::lexical()] {
            let sort = graph.acyclic_with(&config);
            prop_assert_eq!(sort.is_acyclic(), expected);
            prop_assert_eq!(sort.order().len() + sort.blocked().len(), graph.vertex_count());

            if sort.is_acyclic() {
                let position = |name: &str| sort.order().iter().position(|v| v == name);
                for (from, to) in graph.edges() {
                    prop_assert!(position(from.name()) < position(to.name()));
                }
            }
        }
    }

    #[test]
    fn components_agree_with_petgraph(ops in prop::collection::vec(arb_op(), 0..64)) {
        let (graph, edges) = replay(&ops);

        let expected: BTreeSet<BTreeSet<String>> = kosaraju_scc(&oracle(&edges))
            .into_iter()
            .map(|scc| scc.into_iter().map(|i| ALPHABET[i].to_string()).collect())
            .collect();

        let components = graph.strongly_connected_components();
        let actual: BTreeSet<BTreeSet<String>> = components
            .iter()
            .map(|c| c.members().iter().map(ToString::to_string).collect())
            .collect();

        prop_assert_eq!(components.len(), expected.len());
        prop_assert_eq!(actual, expected);

        for component in &components {
            let first = component.members()[0].name();
            let self_loop = component.len() == 1 && graph.contains_edge(first, first);
            prop_assert_eq!(component.is_cyclic(), component.len() > 1 || self_loop);
        }
    }

    #[test]
    fn cycle_verdicts_agree(ops in prop::collection::vec(arb_op(), 0..64)) {
        let (graph, _) = replay(&ops);
        let has_cycle_component = !graph.strongly_connected_components().cycles().is_empty();
        prop_assert_eq!(graph.acyclic().is_acyclic(), !has_cycle_component);
    }
}

#[test]
fn deep_chain_sorts_without_recursion() {
    let names: Vec<String> = (0..100_000).map(|i| format!("n{i}")).collect();
    let mut graph = Graph::new();
    for pair in names.windows(2) {
        graph.insert_edge(&pair[0], &pair[1]).expect("valid names");
    }

    let sort = graph.acyclic();
    assert!(sort.is_acyclic());
    assert_eq!(sort.order().len(), names.len());
    assert_eq!(sort.order()[0], names[0].as_str());

    let components = graph.strongly_connected_components();
    assert_eq!(components.len(), names.len());
    assert!(components.cycles().is_empty());
}
