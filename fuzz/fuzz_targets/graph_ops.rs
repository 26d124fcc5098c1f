#![no_main]

use std::collections::HashSet;

use libfuzzer_sys::fuzz_target;
use tangle_core::{AnalysisConfig, Graph};

const NAMES: [&str; 6] = ["a", "b", "c", "d", "e", "f"];

// Every 3 bytes is one op: [kind, from, to]. Odd kinds delete.
fuzz_target!(|data: &[u8]| {
    let mut graph = Graph::new();
    let mut edges: HashSet<(usize, usize)> = HashSet::new();

    for chunk in data.chunks_exact(3) {
        let from = usize::from(chunk[1]) % NAMES.len();
        let to = usize::from(chunk[2]) % NAMES.len();
        if chunk[0] & 1 == 1 {
            let removed = graph.delete_edge(NAMES[from], NAMES[to]);
            assert_eq!(removed, edges.remove(&(from, to)));
        } else {
            let inserted = graph
                .insert_edge(NAMES[from], NAMES[to])
                .expect("names are non-empty");
            assert_eq!(inserted, edges.insert((from, to)));
        }
    }

    assert_eq!(graph.edge_count(), edges.len());
    assert_eq!(graph.edges().count(), edges.len());

    let mut live = 0;
    let mut indegree_sum = 0;
    for (i, name) in NAMES.iter().enumerate() {
        let indegree = graph.indegree(name);
        let outdegree = graph.outdegree(name);
        assert_eq!(indegree, edges.iter().filter(|&&(_, b)| b == i).count());
        assert_eq!(outdegree, edges.iter().filter(|&&(a, _)| a == i).count());
        assert_eq!(graph.contains_vertex(name), indegree + outdegree > 0);
        live += usize::from(graph.contains_vertex(name));
        indegree_sum += indegree;
    }
    assert_eq!(graph.vertex_count(), live);
    assert_eq!(indegree_sum, graph.edge_count());

    for config in [AnalysisConfig::default(), AnalysisConfig::lexical()] {
        let sort = graph.acyclic_with(&config);
        assert_eq!(sort.order().len() + sort.blocked().len(), graph.vertex_count());

        let components = graph.strongly_connected_components_with(&config);
        let members: usize = components.iter().map(|c| c.len()).sum();
        assert_eq!(members, graph.vertex_count());
        assert_eq!(sort.is_acyclic(), components.cycles().is_empty());
    }
});
