//! Edge scripts: the mutation log `tg` replays into a fresh graph.
//!
//! One operation per line. `#` starts a comment and blank lines are skipped.
//!
//! ```text
//! # build a triangle
//! a -> b
//! b c
//! c -> a
//! - b -> c     # delete
//! ```
//!
//! With an arrow, everything on either side (trimmed) is the vertex name, so
//! names may contain spaces. Without one, the line must hold exactly two
//! whitespace-separated names.

use std::io::{self, Read};
use std::path::{Path, PathBuf};

use tangle_core::{ErrorCode, Graph, GraphError};
use thiserror::Error;
use tracing::debug;

use crate::output::CliError;

/// One parsed script line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EdgeOp<'a> {
    Insert { from: &'a str, to: &'a str },
    Delete { from: &'a str, to: &'a str },
}

#[derive(Debug, Error)]
pub enum ScriptError {
    #[error("failed to read {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("line {line}: {reason}")]
    Malformed { line: usize, reason: String },

    #[error("line {line}: {source}")]
    Vertex {
        line: usize,
        #[source]
        source: GraphError,
    },
}

impl From<&ScriptError> for CliError {
    fn from(err: &ScriptError) -> Self {
        let code = match err {
            ScriptError::Read { .. } | ScriptError::Malformed { .. } => ErrorCode::InputParseError,
            ScriptError::Vertex { source, .. } => source.code(),
        };
        Self::from_code(code, err.to_string())
    }
}

/// Parse one line. `Ok(None)` for blank and comment-only lines.
///
/// # Errors
///
/// Returns a reason when the line is neither an insert nor a delete.
pub fn parse_line(raw: &str) -> Result<Option<EdgeOp<'_>>, String> {
    let line = raw.split_once('#').map_or(raw, |(body, _)| body).trim();
    if line.is_empty() {
        return Ok(None);
    }

    let (delete, body) = match line.strip_prefix('-') {
        Some(rest) if rest.starts_with(char::is_whitespace) => (true, rest.trim_start()),
        _ => (false, line),
    };

    let (from, to) = if let Some((from, to)) = body.split_once("->") {
        if to.contains("->") {
            return Err("more than one `->` on the line".to_string());
        }
        (from.trim(), to.trim())
    } else {
        let mut names = body.split_whitespace();
        match (names.next(), names.next(), names.next()) {
            (Some(from), Some(to), None) => (from, to),
            _ => return Err(format!("expected `FROM -> TO` or `FROM TO`, got `{line}`")),
        }
    };

    Ok(Some(if delete {
        EdgeOp::Delete { from, to }
    } else {
        EdgeOp::Insert { from, to }
    }))
}

/// Replay a whole script into a fresh graph.
///
/// Deletes of absent edges and duplicate inserts are no-ops, same as on
/// [`Graph`] directly.
///
/// # Errors
///
/// Fails on the first malformed line or empty vertex name.
pub fn replay(script: &str) -> Result<Graph, ScriptError> {
    let mut graph = Graph::new();
    let mut applied = 0usize;

    for (index, raw) in script.lines().enumerate() {
        let line = index + 1;
        let op = parse_line(raw).map_err(|reason| ScriptError::Malformed { line, reason })?;
        match op {
            Some(EdgeOp::Insert { from, to }) => {
                graph
                    .insert_edge(from, to)
                    .map_err(|source| ScriptError::Vertex { line, source })?;
            }
            Some(EdgeOp::Delete { from, to }) => {
                graph.delete_edge(from, to);
            }
            None => continue,
        }
        applied += 1;
    }

    debug!(
        operations = applied,
        vertices = graph.vertex_count(),
        edges = graph.edge_count(),
        "edge script replayed"
    );
    Ok(graph)
}

/// Read the script from `path`, or stdin when absent, and replay it.
///
/// # Errors
///
/// Fails when the input cannot be read or does not parse.
pub fn load_graph(path: Option<&Path>) -> Result<Graph, ScriptError> {
    let script = match path {
        Some(path) => std::fs::read_to_string(path).map_err(|source| ScriptError::Read {
            path: path.to_path_buf(),
            source,
        })?,
        None => {
            let mut buf = String::new();
            io::stdin()
                .read_to_string(&mut buf)
                .map_err(|source| ScriptError::Read {
                    path: PathBuf::from("<stdin>"),
                    source,
                })?;
            buf
        }
    };
    replay(&script)
}
