//! Strongly connected components (Tarjan's algorithm).
//!
//! # Overview
//!
//! Every vertex moves through three states during one decomposition:
//! unvisited, on-stack (visiting), and resolved (popped into a component).
//! A vertex never goes back to unvisited.
//!
//! On first visit a vertex gets `dfn = low = counter` and is pushed on the
//! component stack. For each destination `w` of `v`:
//!
//! - `w` unvisited: walk into `w`; when it finishes, `low[v] = min(low[v], low[w])`.
//! - `w` visited and still on the stack: `low[v] = min(low[v], dfn[w])`.
//! - `w` visited and popped: `w` belongs to a finished component; ignore it.
//!
//! Once all destinations are done, `dfn[v] == low[v]` marks `v` as the root
//! of a component: pop the stack down to and including `v`.
//!
//! # Explicit stack
//!
//! The walk keeps its own frame stack of `(vertex, next destination)` pairs
//! instead of recursing, so path length is bounded by heap, not by the
//! thread's call stack. The frame stack and the component stack are
//! distinct: the first holds the active DFS path, the second holds every
//! visited vertex not yet assigned to a component.
//!
//! # Output order
//!
//! Components come out in Tarjan emission order, which is a reverse
//! topological order of the condensation. Members within a component are
//! sorted by name.

#![allow(clippy::module_name_repetitions)]

use fixedbitset::FixedBitSet;
use tracing::{debug, instrument};

use crate::config::AnalysisConfig;
use crate::store::Graph;
use crate::vertex::{Vertex, VertexId};

/// One strongly connected component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Component {
    members: Vec<Vertex>,
    cyclic: bool,
}

impl Component {
    /// Members sorted by name. Never empty.
    #[must_use]
    pub fn members(&self) -> &[Vertex] {
        &self.members
    }

    #[must_use]
    pub const fn len(&self) -> usize {
        self.members.len()
    }

    /// Always `false`: a component holds at least one vertex.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.members.is_empty()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.members
            .binary_search_by(|member| member.name().cmp(name))
            .is_ok()
    }

    /// `true` for components that contain a directed cycle: more than one
    /// member, or a single member with a self-loop.
    #[must_use]
    pub const fn is_cyclic(&self) -> bool {
        self.cyclic
    }

    #[must_use]
    pub fn into_members(self) -> Vec<Vertex> {
        self.members
    }
}

/// A partition of the graph's vertices into strongly connected components.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Components {
    components: Vec<Component>,
}

impl Components {
    /// Number of components.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.components.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Component> {
        self.components.iter()
    }

    /// The component holding `name`, if the vertex exists.
    #[must_use]
    pub fn component_of(&self, name: &str) -> Option<&Component> {
        self.components.iter().find(|c| c.contains(name))
    }

    /// Components that contain a cycle, ordered by their smallest member.
    #[must_use]
    pub fn cycles(&self) -> Vec<&Component> {
        let mut cycles: Vec<&Component> = self
            .components
            .iter()
            .filter(|component| component.is_cyclic())
            .collect();
        cycles.sort_unstable_by(|a, b| a.members.cmp(&b.members));
        cycles
    }

    #[must_use]
    pub fn into_vec(self) -> Vec<Component> {
        self.components
    }
}

impl<'a> IntoIterator for &'a Components {
    type Item = &'a Component;
    type IntoIter = std::slice::Iter<'a, Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.iter()
    }
}

impl IntoIterator for Components {
    type Item = Component;
    type IntoIter = std::vec::IntoIter<Component>;

    fn into_iter(self) -> Self::IntoIter {
        self.components.into_iter()
    }
}

impl Graph {
    /// Partition all vertices into strongly connected components.
    #[must_use]
    pub fn strongly_connected_components(&self) -> Components {
        self.strongly_connected_components_with(&AnalysisConfig::default())
    }

    /// [`strongly_connected_components`](Self::strongly_connected_components)
    /// with an explicit root order.
    #[must_use]
    #[instrument(skip_all, fields(vertices = self.vertex_count(), edges = self.edge_count()))]
    pub fn strongly_connected_components_with(&self, config: &AnalysisConfig) -> Components {
        let mut tarjan = Tarjan::new(self);
        for root in self.ordered_ids(config.vertex_order) {
            if !tarjan.visited.contains(root.index()) {
                tarjan.walk(root);
            }
        }

        let components = Components {
            components: tarjan.components,
        };
        debug!(
            components = components.len(),
            cyclic = components.iter().filter(|c| c.is_cyclic()).count(),
            "scc decomposition finished"
        );
        components
    }
}

/// A DFS frame: the vertex and the position of its next destination.
struct Frame {
    vertex: VertexId,
    next: usize,
}

/// Working state for one decomposition run.
struct Tarjan<'g> {
    graph: &'g Graph,
    counter: usize,
    dfn: Vec<usize>,
    low: Vec<usize>,
    visited: FixedBitSet,
    on_stack: FixedBitSet,
    stack: Vec<VertexId>,
    components: Vec<Component>,
}

impl<'g> Tarjan<'g> {
    fn new(graph: &'g Graph) -> Self {
        let slots = graph.slot_count();
        Self {
            graph,
            counter: 0,
            dfn: vec![0; slots],
            low: vec![0; slots],
            visited: FixedBitSet::with_capacity(slots),
            on_stack: FixedBitSet::with_capacity(slots),
            stack: Vec::new(),
            components: Vec::new(),
        }
    }

    fn enter(&mut self, v: VertexId) -> Frame {
        let i = v.index();
        self.dfn[i] = self.counter;
        self.low[i] = self.counter;
        self.counter += 1;
        self.visited.insert(i);
        self.on_stack.insert(i);
        self.stack.push(v);
        Frame { vertex: v, next: 0 }
    }

    fn walk(&mut self, root: VertexId) {
        let graph = self.graph;
        let mut frames = vec![self.enter(root)];

        while let Some(frame) = frames.last_mut() {
            let v = frame.vertex;

            if let Some(&w) = graph.targets(v).get(frame.next) {
                frame.next += 1;
                if !self.visited.contains(w.index()) {
                    let child = self.enter(w);
                    frames.push(child);
                } else if self.on_stack.contains(w.index()) {
                    self.low[v.index()] = self.low[v.index()].min(self.dfn[w.index()]);
                }
                continue;
            }

            frames.pop();
            if self.low[v.index()] == self.dfn[v.index()] {
                self.resolve(v);
            }
            if let Some(parent) = frames.last() {
                let p = parent.vertex.index();
                self.low[p] = self.low[p].min(self.low[v.index()]);
            }
        }
    }

    /// Pop the component rooted at `root` off the stack.
    fn resolve(&mut self, root: VertexId) {
        let mut ids = Vec::new();
        while let Some(w) = self.stack.pop() {
            self.on_stack.set(w.index(), false);
            ids.push(w);
            if w == root {
                break;
            }
        }

        let cyclic = ids.len() > 1 || self.graph.targets(root).contains(&root);
        let mut members: Vec<Vertex> = ids
            .into_iter()
            .filter_map(|id| self.graph.vertex(id).cloned())
            .collect();
        members.sort_unstable();

        self.components.push(Component { members, cyclic });
    }
}
