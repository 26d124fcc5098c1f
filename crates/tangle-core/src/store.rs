//! The graph store: vertices, edges, and degree counters.
//!
//! # Overview
//!
//! [`Graph`] is the only component that mutates state. Vertices are never
//! added or removed directly; they follow the edges that touch them:
//!
//! - A vertex is created the first time it appears as an endpoint of an
//!   inserted edge.
//! - A vertex is erased (name, degrees, adjacency) the moment a deletion
//!   drops both its indegree and outdegree to zero. If the name shows up
//!   again later it starts from a clean slot.
//!
//! # Layout
//!
//! Names are interned into dense slot indices. Each slot owns the vertex
//! name, its ordered destination list, and its two degree counters. Freed
//! slots go on a free list and are reused by the next new vertex, so slot
//! order (the default enumeration order) depends on the mutation history.
//!
//! # Invariants
//!
//! After every public operation:
//!
//! - `vertex_count()` equals the number of vertices with indegree or
//!   outdegree above zero.
//! - `edge_count()` equals the number of distinct `(from, to)` pairs.
//! - `outdegree(v)` equals the length of `v`'s destination list and
//!   `indegree(v)` equals the number of lists containing `v`.
//!
//! # Concurrency
//!
//! Mutation takes `&mut self`, so the borrow checker rules out concurrent
//! mutation and mutation during analysis. To share a graph across threads,
//! put the whole `Graph` behind a mutex; nothing inside it synchronizes.

#![allow(clippy::module_name_repetitions)]

use std::collections::HashMap;
use std::fmt;

use tracing::trace;

use crate::config::VertexOrder;
use crate::error::GraphError;
use crate::vertex::{Vertex, VertexId};

#[derive(Debug, Clone, Default)]
struct Slot {
    /// `None` while the slot sits on the free list.
    vertex: Option<Vertex>,
    /// Destinations in insertion order. Never contains duplicates.
    targets: Vec<VertexId>,
    indegree: usize,
    outdegree: usize,
}

impl Slot {
    fn occupied(vertex: Vertex) -> Self {
        Self {
            vertex: Some(vertex),
            ..Self::default()
        }
    }
}

/// A mutable directed graph keyed by vertex name.
///
/// ```
/// use tangle_core::Graph;
///
/// let mut graph = Graph::new();
/// graph.insert_edge("fetch", "build")?;
/// graph.insert_edge("build", "deploy")?;
///
/// assert_eq!(graph.vertex_count(), 3);
/// assert!(graph.acyclic().is_acyclic());
///
/// graph.delete_edge("build", "deploy");
/// assert!(!graph.contains_vertex("deploy"));
/// # Ok::<(), tangle_core::GraphError>(())
/// ```
#[derive(Debug, Clone, Default)]
pub struct Graph {
    index: HashMap<Vertex, VertexId>,
    slots: Vec<Slot>,
    free: Vec<VertexId>,
    edge_count: usize,
}

impl Graph {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph from `(from, to)` pairs. Duplicate pairs collapse.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyVertexName`] on the first pair with an
    /// empty endpoint.
    pub fn from_edges<I, A, B>(edges: I) -> Result<Self, GraphError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut graph = Self::new();
        graph.try_extend(edges)?;
        Ok(graph)
    }

    /// Insert every pair, returning how many new edges were recorded.
    ///
    /// # Errors
    ///
    /// Stops at the first pair with an empty endpoint. Pairs before it stay
    /// inserted.
    pub fn try_extend<I, A, B>(&mut self, edges: I) -> Result<usize, GraphError>
    where
        I: IntoIterator<Item = (A, B)>,
        A: AsRef<str>,
        B: AsRef<str>,
    {
        let mut added = 0;
        for (from, to) in edges {
            if self.insert_edge(from.as_ref(), to.as_ref())? {
                added += 1;
            }
        }
        Ok(added)
    }

    /// Record the edge `from -> to`.
    ///
    /// Returns `Ok(false)` without touching any counter when the edge is
    /// already present. Self-loops are allowed.
    ///
    /// # Errors
    ///
    /// Returns [`GraphError::EmptyVertexName`] if either name is empty; the
    /// graph is left unchanged.
    pub fn insert_edge(&mut self, from: &str, to: &str) -> Result<bool, GraphError> {
        if from.is_empty() || to.is_empty() {
            return Err(GraphError::EmptyVertexName);
        }
        if self.contains_edge(from, to) {
            return Ok(false);
        }

        let from_id = self.intern(from)?;
        let to_id = self.intern(to)?;

        let source = &mut self.slots[from_id.index()];
        source.targets.push(to_id);
        source.outdegree += 1;
        self.slots[to_id.index()].indegree += 1;
        self.edge_count += 1;

        trace!(from, to, edges = self.edge_count, "edge inserted");
        Ok(true)
    }

    /// Remove the edge `from -> to`.
    ///
    /// Returns `false` (and changes nothing) when the edge is absent. Each
    /// endpoint whose degrees both reach zero is erased; for a self-loop the
    /// single vertex is checked once.
    pub fn delete_edge(&mut self, from: &str, to: &str) -> bool {
        let (Some(from_id), Some(to_id)) = (self.lookup(from), self.lookup(to)) else {
            return false;
        };

        let targets = &mut self.slots[from_id.index()].targets;
        let Some(position) = targets.iter().position(|&t| t == to_id) else {
            return false;
        };
        targets.remove(position);

        self.edge_count -= 1;
        self.slots[from_id.index()].outdegree -= 1;
        self.slots[to_id.index()].indegree -= 1;

        self.prune_if_isolated(from_id);
        if to_id != from_id {
            self.prune_if_isolated(to_id);
        }

        trace!(from, to, edges = self.edge_count, "edge deleted");
        true
    }

    #[must_use]
    pub fn vertex_count(&self) -> usize {
        self.index.len()
    }

    #[must_use]
    pub const fn edge_count(&self) -> usize {
        self.edge_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Number of edges ending at `name`; zero for unknown vertices.
    #[must_use]
    pub fn indegree(&self, name: &str) -> usize {
        self.lookup(name)
            .map_or(0, |id| self.slots[id.index()].indegree)
    }

    /// Number of edges starting at `name`; zero for unknown vertices.
    #[must_use]
    pub fn outdegree(&self, name: &str) -> usize {
        self.lookup(name)
            .map_or(0, |id| self.slots[id.index()].outdegree)
    }

    #[must_use]
    pub fn contains_vertex(&self, name: &str) -> bool {
        self.index.contains_key(name)
    }

    #[must_use]
    pub fn contains_edge(&self, from: &str, to: &str) -> bool {
        match (self.lookup(from), self.lookup(to)) {
            (Some(from_id), Some(to_id)) => self.slots[from_id.index()].targets.contains(&to_id),
            _ => false,
        }
    }

    /// All current vertices in slot order.
    pub fn vertices(&self) -> impl Iterator<Item = &Vertex> {
        self.slots.iter().filter_map(|slot| slot.vertex.as_ref())
    }

    /// Destinations of `name` in insertion order. Empty for unknown vertices.
    pub fn neighbors<'a>(&'a self, name: &str) -> impl Iterator<Item = &'a Vertex> + use<'a> {
        let targets: &'a [VertexId] = self
            .lookup(name)
            .map_or(&[][..], |id| self.targets(id));
        targets.iter().filter_map(|&id| self.vertex(id))
    }

    /// Every recorded `(from, to)` pair, grouped by source in slot order.
    pub fn edges(&self) -> impl Iterator<Item = (&Vertex, &Vertex)> {
        self.slots.iter().flat_map(move |slot| {
            slot.vertex.iter().flat_map(move |from| {
                slot.targets
                    .iter()
                    .filter_map(move |&id| self.vertex(id).map(|to| (from, to)))
            })
        })
    }

    // -----------------------------------------------------------------------
    // Crate-internal index access for the analyzers
    // -----------------------------------------------------------------------

    pub(crate) fn lookup(&self, name: &str) -> Option<VertexId> {
        self.index.get(name).copied()
    }

    pub(crate) fn vertex(&self, id: VertexId) -> Option<&Vertex> {
        self.slots.get(id.index()).and_then(|slot| slot.vertex.as_ref())
    }

    pub(crate) fn targets(&self, id: VertexId) -> &[VertexId] {
        self.slots
            .get(id.index())
            .map_or(&[][..], |slot| slot.targets.as_slice())
    }

    pub(crate) fn indegree_of(&self, id: VertexId) -> usize {
        self.slots.get(id.index()).map_or(0, |slot| slot.indegree)
    }

    pub(crate) fn outdegree_of(&self, id: VertexId) -> usize {
        self.slots.get(id.index()).map_or(0, |slot| slot.outdegree)
    }

    /// Upper bound (exclusive) on slot indices, for sizing per-vertex tables.
    pub(crate) const fn slot_count(&self) -> usize {
        self.slots.len()
    }

    pub(crate) fn live_ids(&self) -> impl Iterator<Item = VertexId> {
        self.slots
            .iter()
            .enumerate()
            .filter(|(_, slot)| slot.vertex.is_some())
            .map(|(index, _)| VertexId::new(index))
    }

    /// Live vertex ids in the requested enumeration order.
    pub(crate) fn ordered_ids(&self, order: VertexOrder) -> Vec<VertexId> {
        let mut ids: Vec<VertexId> = self.live_ids().collect();
        if order == VertexOrder::Lexical {
            ids.sort_by(|a, b| self.vertex(*a).cmp(&self.vertex(*b)));
        }
        ids
    }

    fn intern(&mut self, name: &str) -> Result<VertexId, GraphError> {
        if let Some(id) = self.lookup(name) {
            return Ok(id);
        }

        let vertex = Vertex::new(name)?;
        let id = if let Some(id) = self.free.pop() {
            self.slots[id.index()] = Slot::occupied(vertex.clone());
            id
        } else {
            self.slots.push(Slot::occupied(vertex.clone()));
            VertexId::new(self.slots.len() - 1)
        };
        self.index.insert(vertex, id);

        trace!(vertex = name, slot = id.index(), "vertex created");
        Ok(id)
    }

    fn prune_if_isolated(&mut self, id: VertexId) {
        let slot = &mut self.slots[id.index()];
        if slot.indegree != 0 || slot.outdegree != 0 {
            return;
        }
        if let Some(vertex) = slot.vertex.take() {
            *slot = Slot::default();
            self.index.remove(&vertex);
            self.free.push(id);
            trace!(vertex = vertex.name(), slot = id.index(), "vertex pruned");
        }
    }
}

/// One `from -> to` line per edge.
impl fmt::Display for Graph {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (from, to) in self.edges() {
            writeln!(f, "{from} -> {to}")?;
        }
        Ok(())
    }
}
