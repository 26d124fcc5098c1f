//! `tg order`: topological order with an acyclicity verdict.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tangle_core::{AnalysisConfig, Graph, Vertex};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `tg order`.
#[derive(Args, Debug, Default)]
pub struct OrderArgs {}

#[derive(Debug, Serialize)]
struct OrderOutput {
    acyclic: bool,
    order: Vec<Vertex>,
    blocked: Vec<Vertex>,
}

/// Execute `tg order`. A cyclic graph is reported, not treated as a failure.
pub fn run_order(
    _args: &OrderArgs,
    graph: &Graph,
    analysis: AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let sort = graph.acyclic_with(&analysis);
    let payload = OrderOutput {
        acyclic: sort.is_acyclic(),
        order: sort.order().to_vec(),
        blocked: sort.blocked().to_vec(),
    };

    render_mode(output, &payload, render_order_text, render_order_human)
}

fn render_order_text(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    writeln!(w, "acyclic {}", payload.acyclic)?;
    for vertex in &payload.order {
        writeln!(w, "{vertex}")?;
    }
    for vertex in &payload.blocked {
        writeln!(w, "blocked {vertex}")?;
    }
    Ok(())
}

fn render_order_human(payload: &OrderOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Topological order")?;
    pretty_kv(w, "Acyclic", if payload.acyclic { "yes" } else { "no" })?;
    pretty_kv(w, "Ordered", payload.order.len().to_string())?;

    if payload.order.is_empty() {
        writeln!(w, "\n(no vertex is free of cycles)")?;
    } else {
        writeln!(w)?;
        for (idx, vertex) in payload.order.iter().enumerate() {
            writeln!(w, "{:>4}. {vertex}", idx + 1)?;
        }
    }

    if !payload.blocked.is_empty() {
        writeln!(w, "\nBlocked by cycles ({}):", payload.blocked.len())?;
        for vertex in &payload.blocked {
            writeln!(w, "  - {vertex}")?;
        }
        writeln!(w, "\nRun `tg cycles` to see which cycles hold them.")?;
    }

    Ok(())
}
