//! `tg stats`: summary statistics for the replayed graph.

use std::io::Write;

use clap::Args;
use tangle_core::{Graph, GraphStats};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `tg stats`.
#[derive(Args, Debug, Default)]
pub struct StatsArgs {}

/// Execute `tg stats`.
pub fn run_stats(_args: &StatsArgs, graph: &Graph, output: OutputMode) -> anyhow::Result<()> {
    let stats = graph.stats();
    render_mode(output, &stats, render_stats_text, render_stats_human)
}

fn render_stats_text(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "vertices {}", stats.vertex_count)?;
    writeln!(w, "edges {}", stats.edge_count)?;
    writeln!(w, "sources {}", stats.source_count)?;
    writeln!(w, "sinks {}", stats.sink_count)?;
    writeln!(w, "self_loops {}", stats.self_loop_count)?;
    writeln!(w, "max_indegree {}", stats.max_indegree)?;
    writeln!(w, "max_outdegree {}", stats.max_outdegree)?;
    writeln!(w, "density {:.4}", stats.density)
}

fn render_stats_human(stats: &GraphStats, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Graph statistics")?;
    pretty_kv(w, "Vertices", stats.vertex_count.to_string())?;
    pretty_kv(w, "Edges", stats.edge_count.to_string())?;
    pretty_kv(w, "Sources", stats.source_count.to_string())?;
    pretty_kv(w, "Sinks", stats.sink_count.to_string())?;
    pretty_kv(w, "Self-loops", stats.self_loop_count.to_string())?;
    pretty_kv(w, "Max indegree", stats.max_indegree.to_string())?;
    pretty_kv(w, "Max outdegree", stats.max_outdegree.to_string())?;
    pretty_kv(w, "Density", format!("{:.4}", stats.density))
}
