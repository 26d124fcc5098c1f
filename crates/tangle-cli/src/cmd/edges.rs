//! `tg edges`: print the replayed graph as `from -> to` lines.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tangle_core::{Graph, Vertex};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `tg edges`.
#[derive(Args, Debug, Default)]
pub struct EdgesArgs {}

#[derive(Debug, Serialize)]
struct EdgeOutput {
    from: Vertex,
    to: Vertex,
}

#[derive(Debug, Serialize)]
struct EdgesOutput {
    vertex_count: usize,
    edge_count: usize,
    edges: Vec<EdgeOutput>,
}

impl From<&Graph> for EdgesOutput {
    fn from(graph: &Graph) -> Self {
        Self {
            vertex_count: graph.vertex_count(),
            edge_count: graph.edge_count(),
            edges: graph
                .edges()
                .map(|(from, to)| EdgeOutput {
                    from: from.clone(),
                    to: to.clone(),
                })
                .collect(),
        }
    }
}

/// Execute `tg edges`.
pub fn run_edges(_args: &EdgesArgs, graph: &Graph, output: OutputMode) -> anyhow::Result<()> {
    let payload = EdgesOutput::from(graph);
    render_mode(output, &payload, render_edges_text, render_edges_human)
}

fn render_edges_text(payload: &EdgesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for edge in &payload.edges {
        writeln!(w, "{} -> {}", edge.from, edge.to)?;
    }
    Ok(())
}

fn render_edges_human(payload: &EdgesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Edges")?;
    pretty_kv(w, "Vertices", payload.vertex_count.to_string())?;
    pretty_kv(w, "Edges", payload.edge_count.to_string())?;
    if payload.edges.is_empty() {
        writeln!(w, "\n(empty graph)")?;
        return Ok(());
    }
    writeln!(w)?;
    render_edges_text(payload, w)
}
