pub mod completions;
pub mod cycles;
pub mod edges;
pub mod order;
pub mod scc;
pub mod stats;
