use std::fs;
use std::path::PathBuf;

use serde::{Deserialize, Serialize};

use crate::output::OverwritePolicy;

/// Optional TOML configuration shared by both binaries.
///
/// Command-line flags take precedence over anything set here.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Config {
    // password the encryption key is derived from
    pub password: Option<String>,

    #[serde(default)]
    pub output: OutputConfig,
}

/// output destination configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OutputConfig {
    // append transformed lines to this file instead of the console
    pub path: Option<PathBuf>,

    // resolution to apply when the output file already exists;
    // prompts interactively when unset
    pub on_conflict: Option<OverwritePolicy>,
}

pub fn load(path: &str) -> anyhow::Result<Config> {
    let content = fs::read_to_string(path)?;
    let config: Config = toml::from_str(&content)?;
    Ok(config)
}
