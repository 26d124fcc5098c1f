use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::env;
use std::path::{Path, PathBuf};
use tracing::debug;

/// File name looked up in the working directory.
pub const CONFIG_FILE_NAME: &str = "tangle.toml";

/// Environment variable overriding [`AnalysisConfig::vertex_order`].
pub const VERTEX_ORDER_ENV: &str = "TANGLE_VERTEX_ORDER";

/// Order in which analyses enumerate vertices.
///
/// Analyses start from vertices in this order: Kahn seeds its queue with
/// zero-indegree vertices, Tarjan picks DFS roots. Neighbors are always
/// walked in edge insertion order.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VertexOrder {
    /// Slot order. Cheap, but depends on the insert/delete history.
    #[default]
    Insertion,
    /// Sorted by vertex name. Reproducible for a given edge set.
    Lexical,
}

impl VertexOrder {
    fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "insertion" => Some(Self::Insertion),
            "lexical" => Some(Self::Lexical),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisConfig {
    #[serde(default)]
    pub vertex_order: VertexOrder,
}

impl AnalysisConfig {
    #[must_use]
    pub const fn lexical() -> Self {
        Self {
            vertex_order: VertexOrder::Lexical,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputConfig {
    /// `pretty`, `text` or `json`. Unset means "decide from the terminal".
    #[serde(default)]
    pub format: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TangleConfig {
    #[serde(default)]
    pub analysis: AnalysisConfig,
    #[serde(default)]
    pub output: OutputConfig,
}

/// Read and parse a TOML config file.
///
/// # Errors
///
/// Fails when the file cannot be read or is not valid config TOML.
pub fn load_config(path: &Path) -> Result<TangleConfig> {
    let content = std::fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;

    toml::from_str::<TangleConfig>(&content)
        .with_context(|| format!("Failed to parse {}", path.display()))
}

/// Find the config that applies to `dir`.
///
/// Looks at `dir/tangle.toml`, then `<user config dir>/tangle/config.toml`.
/// Falls back to defaults when neither exists.
///
/// # Errors
///
/// Fails when a discovered file cannot be read or parsed.
pub fn discover_config(dir: &Path) -> Result<TangleConfig> {
    for candidate in candidate_paths(dir) {
        if candidate.exists() {
            debug!(path = %candidate.display(), "loading config");
            return load_config(&candidate);
        }
    }
    Ok(TangleConfig::default())
}

fn candidate_paths(dir: &Path) -> Vec<PathBuf> {
    let mut paths = vec![dir.join(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("tangle/config.toml"));
    }
    paths
}

/// Resolve the effective config: explicit path, else discovery from `dir`,
/// then `TANGLE_VERTEX_ORDER` on top.
///
/// # Errors
///
/// Fails on unreadable or malformed config, or an unknown env value.
pub fn resolve_config(explicit: Option<&Path>, dir: &Path) -> Result<TangleConfig> {
    let mut config = match explicit {
        Some(path) => load_config(path)?,
        None => discover_config(dir)?,
    };

    let env_order = env::var(VERTEX_ORDER_ENV).ok();
    apply_env_order(&mut config, env_order.as_deref())?;
    Ok(config)
}

fn apply_env_order(config: &mut TangleConfig, raw: Option<&str>) -> Result<()> {
    let Some(raw) = raw else {
        return Ok(());
    };
    let order = VertexOrder::parse(raw).with_context(|| {
        format!("Invalid {VERTEX_ORDER_ENV} value '{raw}'. Expected one of: insertion, lexical")
    })?;
    config.analysis.vertex_order = order;
    Ok(())
}
