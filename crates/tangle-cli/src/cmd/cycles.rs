//! `tg cycles`: list cycles (strongly connected components with a cycle).

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tangle_core::{AnalysisConfig, Graph, Vertex};

use crate::output::{OutputMode, render_mode};

/// Arguments for `tg cycles`.
#[derive(Args, Debug, Default)]
pub struct CyclesArgs {}

#[derive(Debug, Serialize)]
struct CyclesOutput {
    cycles: Vec<Vec<Vertex>>,
}

/// Execute `tg cycles`. Finding cycles is not an error; exit status stays 0.
pub fn run_cycles(
    _args: &CyclesArgs,
    graph: &Graph,
    analysis: AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let components = graph.strongly_connected_components_with(&analysis);
    let payload = CyclesOutput {
        cycles: components
            .cycles()
            .into_iter()
            .map(|component| component.members().to_vec())
            .collect(),
    };

    render_mode(output, &payload, render_cycles_text, render_cycles_human)
}

fn render_cycles_text(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for cycle in &payload.cycles {
        let members: Vec<&str> = cycle.iter().map(Vertex::name).collect();
        writeln!(w, "{}", members.join(" "))?;
    }
    Ok(())
}

fn render_cycles_human(payload: &CyclesOutput, w: &mut dyn Write) -> std::io::Result<()> {
    if payload.cycles.is_empty() {
        writeln!(w, "No cycles found.")?;
        return Ok(());
    }

    writeln!(w, "Cycles ({})", payload.cycles.len())?;

    for (idx, cycle) in payload.cycles.iter().enumerate() {
        writeln!(w, "\nCycle {}:", idx + 1)?;
        for vertex in cycle {
            writeln!(w, "  - {vertex}")?;
        }
    }

    Ok(())
}
