//! Configuration loading
//!
//! Settings are layered: built-in defaults, then the user config file, then
//! the nearest project config (`.whflow/config.yaml`), then command-line and
//! environment overrides applied by the caller.

use directories::ProjectDirs;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Directory holding project-level configuration
pub const PROJECT_DIR: &str = ".whflow";
pub const CONFIG_FILE: &str = "config.yaml";

/// Accepted values for `default_format`
pub const OUTPUT_FORMATS: &[&str] = &["auto", "table", "json", "yaml", "csv", "tsv"];

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid config file {path}: {message}")]
    Parse { path: PathBuf, message: String },
}

/// Effective configuration after all layers are merged
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Config {
    /// Directory with extra workflow definitions
    pub workflow_dir: Option<PathBuf>,

    /// Output format name used when none is given on the command line
    pub default_format: Option<String>,

    /// Fail coverage checks on any gap
    pub strict: bool,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            workflow_dir: None,
            default_format: None,
            strict: true,
        }
    }
}

/// One config file as written on disk; every key optional
#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
struct ConfigLayer {
    workflow_dir: Option<PathBuf>,
    default_format: Option<String>,
    strict: Option<bool>,
}

impl Config {
    /// Load user and project configuration relative to the current directory
    pub fn load() -> Result<Self, ConfigError> {
        let cwd = std::env::current_dir().map_err(|source| ConfigError::Read {
            path: PathBuf::from("."),
            source,
        })?;
        let user = ProjectDirs::from("dev", "warehouse-flow", "whflow")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILE));
        Self::load_from(user.as_deref(), &cwd)
    }

    /// Load with an explicit user config path and starting directory
    pub fn load_from(user_config: Option<&Path>, start_dir: &Path) -> Result<Self, ConfigError> {
        let mut config = Config::default();

        if let Some(path) = user_config {
            if path.is_file() {
                let base = path.parent().unwrap_or(start_dir).to_path_buf();
                config.apply(read_layer(path)?, &base);
            }
        }

        if let Some(path) = find_project_config(start_dir) {
            // .whflow/config.yaml -> paths are relative to the project root
            let base = path
                .parent()
                .and_then(|p| p.parent())
                .unwrap_or(start_dir)
                .to_path_buf();
            config.apply(read_layer(&path)?, &base);
        }

        Ok(config)
    }

    fn apply(&mut self, layer: ConfigLayer, base: &Path) {
        if let Some(dir) = layer.workflow_dir {
            self.workflow_dir = Some(if dir.is_relative() { base.join(dir) } else { dir });
        }
        if let Some(format) = layer.default_format {
            self.default_format = Some(format);
        }
        if let Some(strict) = layer.strict {
            self.strict = strict;
        }
    }

    /// Override the workflow directory (command line or environment)
    pub fn with_workflow_dir(mut self, dir: Option<PathBuf>) -> Self {
        if dir.is_some() {
            self.workflow_dir = dir;
        }
        self
    }
}

fn read_layer(path: &Path) -> Result<ConfigLayer, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    if content.trim().is_empty() {
        return Ok(ConfigLayer::default());
    }
    let layer: ConfigLayer = serde_yml::from_str(&content).map_err(|e| ConfigError::Parse {
        path: path.to_path_buf(),
        message: e.to_string(),
    })?;

    if let Some(format) = &layer.default_format {
        if !OUTPUT_FORMATS.contains(&format.to_lowercase().as_str()) {
            return Err(ConfigError::Parse {
                path: path.to_path_buf(),
                message: format!(
                    "unknown default_format '{}' (expected one of: {})",
                    format,
                    OUTPUT_FORMATS.join(", ")
                ),
            });
        }
    }
    Ok(layer)
}

/// Walk up from `start` looking for `.whflow/config.yaml`
fn find_project_config(start: &Path) -> Option<PathBuf> {
    start
        .ancestors()
        .map(|dir| dir.join(PROJECT_DIR).join(CONFIG_FILE))
        .find(|candidate| candidate.is_file())
}
