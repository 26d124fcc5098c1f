#![forbid(unsafe_code)]
//! tangle-core library.
//!
//! A mutable directed graph with three capabilities:
//!
//! - [`Graph`]: incremental edge insertion and deletion. Vertices appear
//!   with their first edge and disappear with their last one.
//! - [`Graph::acyclic`]: Kahn topological ordering with a cycle verdict.
//! - [`Graph::strongly_connected_components`]: Tarjan decomposition on an
//!   explicit stack.
//!
//! Both analyses are read-only and cannot fail; a cycle is a result, not an
//! error.
//!
//! # Conventions
//!
//! - **Errors**: [`GraphError`] at the graph boundary; `anyhow::Result` for
//!   config loading.
//! - **Logging**: `tracing` macros only. The library never installs a
//!   subscriber.

pub mod config;
pub mod error;
pub mod scc;
pub mod stats;
pub mod store;
pub mod topo;
pub mod vertex;

pub use config::{AnalysisConfig, TangleConfig, VertexOrder};
pub use error::{ErrorCode, GraphError};
pub use scc::{Component, Components};
pub use stats::GraphStats;
pub use store::Graph;
pub use topo::TopologicalSort;
pub use vertex::Vertex;
