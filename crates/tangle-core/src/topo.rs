//! Topological ordering and cycle detection (Kahn's algorithm).
//!
//! # Algorithm
//!
//! 1. Copy the indegree of every live vertex into a scratch table.
//! 2. Seed a FIFO queue with the vertices whose copied indegree is zero.
//! 3. Pop a vertex, emit it, and decrement the copied indegree of each of
//!    its destinations; a destination reaching zero joins the queue.
//! 4. Stop when the queue drains.
//!
//! The graph is acyclic iff every vertex was emitted. Vertices on a cycle,
//! or reachable only through one, never reach zero and stay behind; they are
//! reported as [`TopologicalSort::blocked`]. The store itself is never
//! modified.
//!
//! # Complexity
//!
//! O(V + E).

#![allow(clippy::module_name_repetitions)]

use std::collections::VecDeque;

use tracing::{debug, instrument};

use crate::config::AnalysisConfig;
use crate::store::Graph;
use crate::vertex::Vertex;

/// Result of [`Graph::acyclic`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TopologicalSort {
    order: Vec<Vertex>,
    blocked: Vec<Vertex>,
}

impl TopologicalSort {
    /// Emitted vertices in Kahn order.
    ///
    /// When [`is_acyclic`](Self::is_acyclic) holds this is a full
    /// topological order: for every edge `u -> w`, `u` precedes `w`.
    #[must_use]
    pub fn order(&self) -> &[Vertex] {
        &self.order
    }

    /// Vertices that were never emitted because they sit on, or behind, a
    /// cycle. Empty exactly when the graph is acyclic.
    #[must_use]
    pub fn blocked(&self) -> &[Vertex] {
        &self.blocked
    }

    #[must_use]
    pub const fn is_acyclic(&self) -> bool {
        self.blocked.is_empty()
    }

    /// `(order, is_acyclic)`.
    #[must_use]
    pub fn into_parts(self) -> (Vec<Vertex>, bool) {
        let acyclic = self.is_acyclic();
        (self.order, acyclic)
    }
}

impl Graph {
    /// Topologically sort the graph, reporting whether it is acyclic.
    ///
    /// A cyclic graph is not an error: the order simply stops short.
    #[must_use]
    pub fn acyclic(&self) -> TopologicalSort {
        self.acyclic_with(&AnalysisConfig::default())
    }

    /// [`acyclic`](Self::acyclic) with an explicit seed order.
    #[must_use]
    #[instrument(skip_all, fields(vertices = self.vertex_count(), edges = self.edge_count()))]
    pub fn acyclic_with(&self, config: &AnalysisConfig) -> TopologicalSort {
        let ids = self.ordered_ids(config.vertex_order);

        let mut indegree = vec![0usize; self.slot_count()];
        for &id in &ids {
            indegree[id.index()] = self.indegree_of(id);
        }

        let mut queue: VecDeque<_> = ids
            .iter()
            .copied()
            .filter(|id| indegree[id.index()] == 0)
            .collect();

        let mut emitted = vec![false; self.slot_count()];
        let mut order = Vec::with_capacity(ids.len());

        while let Some(id) = queue.pop_front() {
            emitted[id.index()] = true;
            if let Some(vertex) = self.vertex(id) {
                order.push(vertex.clone());
            }

            for &target in self.targets(id) {
                let remaining = &mut indegree[target.index()];
                *remaining -= 1;
                if *remaining == 0 {
                    queue.push_back(target);
                }
            }
        }

        let blocked: Vec<Vertex> = ids
            .iter()
            .filter(|id| !emitted[id.index()])
            .filter_map(|&id| self.vertex(id).cloned())
            .collect();

        debug!(
            emitted = order.len(),
            blocked = blocked.len(),
            "topological sort finished"
        );

        TopologicalSort { order, blocked }
    }
}
