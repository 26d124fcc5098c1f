//! Summary statistics for a graph.
//!
//! - `vertex_count` / `edge_count`: the store's cached counters.
//! - `source_count`: vertices with indegree zero.
//! - `sink_count`: vertices with outdegree zero.
//! - `self_loop_count`: edges `v -> v`.
//! - `max_indegree` / `max_outdegree`: largest degrees over all vertices.
//! - `density`: `edge_count / (vertex_count * (vertex_count - 1))`, zero
//!   for fewer than two vertices. Self-loops count as edges, so a graph
//!   full of them can exceed 1.0.

use serde::Serialize;

use crate::store::Graph;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GraphStats {
    pub vertex_count: usize,
    pub edge_count: usize,
    pub source_count: usize,
    pub sink_count: usize,
    pub self_loop_count: usize,
    pub max_indegree: usize,
    pub max_outdegree: usize,
    pub density: f64,
}

impl Graph {
    #[must_use]
    pub fn stats(&self) -> GraphStats {
        let mut stats = GraphStats {
            vertex_count: self.vertex_count(),
            edge_count: self.edge_count(),
            source_count: 0,
            sink_count: 0,
            self_loop_count: 0,
            max_indegree: 0,
            max_outdegree: 0,
            density: compute_density(self.vertex_count(), self.edge_count()),
        };

        for id in self.live_ids() {
            let indegree = self.indegree_of(id);
            let outdegree = self.outdegree_of(id);
            if indegree == 0 {
                stats.source_count += 1;
            }
            if outdegree == 0 {
                stats.sink_count += 1;
            }
            if self.targets(id).contains(&id) {
                stats.self_loop_count += 1;
            }
            stats.max_indegree = stats.max_indegree.max(indegree);
            stats.max_outdegree = stats.max_outdegree.max(outdegree);
        }

        stats
    }
}

#[allow(clippy::cast_precision_loss)]
fn compute_density(vertices: usize, edges: usize) -> f64 {
    if vertices < 2 {
        return 0.0;
    }
    edges as f64 / (vertices * (vertices - 1)) as f64
}
