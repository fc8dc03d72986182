//! Configuration loading.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

/// Top-level adaptest configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdaptestConfig {
    /// Question bank file or directory.
    #[serde(default = "default_bank")]
    pub bank: PathBuf,
    /// Directory session reports are written to.
    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,
    /// Fixed selection seed; omit for entropy-backed selection.
    #[serde(default)]
    pub seed: Option<u64>,
    /// Probability a simulated candidate answers correctly.
    #[serde(default = "default_sim_accuracy")]
    pub sim_accuracy: f64,
    /// Whether to attach a narrative summary to finished sessions.
    #[serde(default = "default_true")]
    pub summaries: bool,
}

fn default_bank() -> PathBuf {
    PathBuf::from("banks")
}
fn default_output_dir() -> PathBuf {
    PathBuf::from("./adaptest-results")
}
fn default_sim_accuracy() -> f64 {
    0.7
}
fn default_true() -> bool {
    true
}

impl Default for AdaptestConfig {
    fn default() -> Self {
        Self {
            bank: default_bank(),
            output_dir: default_output_dir(),
            seed: None,
            sim_accuracy: default_sim_accuracy(),
            summaries: default_true(),
        }
    }
}

/// Load configuration from well-known paths.
///
/// Search order:
/// 1. `adaptest.toml` in the current directory
/// 2. `~/.config/adaptest/config.toml`
///
/// Environment variable override: `ADAPTEST_OUTPUT_DIR`.
pub fn load_config() -> Result<AdaptestConfig> {
    load_config_from(None)
}

/// Load config from an explicit path, or search the default locations.
pub fn load_config_from(path: Option<&Path>) -> Result<AdaptestConfig> {
    let config_path = if let Some(p) = path {
        if p.exists() {
            Some(p.to_path_buf())
        } else {
            anyhow::bail!("config file not found: {}", p.display());
        }
    } else {
        let local = PathBuf::from("adaptest.toml");
        if local.exists() {
            Some(local)
        } else if let Some(global) = global_config_path() {
            if global.exists() {
                Some(global)
            } else {
                None
            }
        } else {
            None
        }
    };

    let mut config = match config_path {
        Some(path) => {
            let content = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read config: {}", path.display()))?;
            toml::from_str::<AdaptestConfig>(&content)
                .with_context(|| format!("failed to parse config: {}", path.display()))?
        }
        None => AdaptestConfig::default(),
    };

    if let Ok(dir) = std::env::var("ADAPTEST_OUTPUT_DIR") {
        config.output_dir = PathBuf::from(dir);
    }

    Ok(config)
}

fn global_config_path() -> Option<PathBuf> {
    std::env::var("HOME")
        .ok()
        .map(|h| PathBuf::from(h).join(".config").join("adaptest").join("config.toml"))
}
