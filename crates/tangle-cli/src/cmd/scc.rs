//! `tg scc`: partition the graph into strongly connected components.

use std::io::Write;

use clap::Args;
use serde::Serialize;
use tangle_core::{AnalysisConfig, Components, Graph, Vertex};

use crate::output::{OutputMode, pretty_kv, pretty_section, render_mode};

/// Arguments for `tg scc`.
#[derive(Args, Debug, Default)]
pub struct SccArgs {}

#[derive(Debug, Serialize)]
struct ComponentOutput {
    members: Vec<Vertex>,
    cyclic: bool,
}

#[derive(Debug, Serialize)]
struct SccOutput {
    count: usize,
    components: Vec<ComponentOutput>,
}

impl From<Components> for SccOutput {
    fn from(components: Components) -> Self {
        let components: Vec<ComponentOutput> = components
            .into_iter()
            .map(|component| {
                let cyclic = component.is_cyclic();
                ComponentOutput {
                    members: component.into_members(),
                    cyclic,
                }
            })
            .collect();
        Self {
            count: components.len(),
            components,
        }
    }
}

/// Execute `tg scc`.
pub fn run_scc(
    _args: &SccArgs,
    graph: &Graph,
    analysis: AnalysisConfig,
    output: OutputMode,
) -> anyhow::Result<()> {
    let payload = SccOutput::from(graph.strongly_connected_components_with(&analysis));
    render_mode(output, &payload, render_scc_text, render_scc_human)
}

fn render_scc_text(payload: &SccOutput, w: &mut dyn Write) -> std::io::Result<()> {
    for component in &payload.components {
        let members: Vec<&str> = component.members.iter().map(Vertex::name).collect();
        if component.cyclic {
            writeln!(w, "{}\tcyclic", members.join(" "))?;
        } else {
            writeln!(w, "{}", members.join(" "))?;
        }
    }
    Ok(())
}

fn render_scc_human(payload: &SccOutput, w: &mut dyn Write) -> std::io::Result<()> {
    pretty_section(w, "Strongly connected components")?;
    pretty_kv(w, "Components", payload.count.to_string())?;
    let cyclic = payload.components.iter().filter(|c| c.cyclic).count();
    pretty_kv(w, "Cyclic", cyclic.to_string())?;

    for (idx, component) in payload.components.iter().enumerate() {
        let members: Vec<&str> = component.members.iter().map(Vertex::name).collect();
        let marker = if component.cyclic { " (cycle)" } else { "" };
        writeln!(w, "\n{:>4}. {{{}}}{marker}", idx + 1, members.join(", "))?;
    }

    Ok(())
}
