//! YAML script-set parsing.
//!
//! Parses script declarations from YAML files. Validation here is limited
//! to structural problems (duplicate ids); missing dependencies and cycles
//! are planning concerns and surface from [`crate::planner::plan`].

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;
use thiserror::Error;

/// Errors that can occur when loading a script set.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to read the script-set file.
    #[error("failed to read file: {0}")]
    IoError(#[from] std::io::Error),

    /// Failed to parse YAML.
    #[error("YAML parse error: {0}")]
    YamlError(#[from] serde_yaml::Error),

    /// Structurally invalid script set.
    #[error("invalid script set: {0}")]
    InvalidConfig(String),
}

/// Top-level script-set file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptSetConfig {
    /// Declared scripts.
    pub scripts: Vec<ScriptConfig>,
}

/// One script declaration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScriptConfig {
    /// Unique script id.
    pub id: u32,
    /// Ids this script depends on. The list may repeat ids or reference
    /// ids that no script declares; the planner reports the latter as
    /// warnings rather than rejecting the set.
    #[serde(default)]
    pub depends_on: Vec<u32>,
    /// Behavior of the bundled simulated action.
    #[serde(default)]
    pub action: ActionConfig,
}

/// Simulated-action knobs for a script.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ActionConfig {
    /// Milliseconds the action sleeps to mimic scan work.
    pub sleep_ms: Option<u64>,
    /// Fail the action instead of succeeding.
    pub fail: bool,
}

/// YAML script-set loader.
pub struct ScriptSetLoader;

impl ScriptSetLoader {
    /// Load a script set from a file.
    pub fn load_script_set(path: impl AsRef<Path>) -> Result<ScriptSetConfig, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::parse_script_set(&content)
    }

    /// Parse a script set from a YAML string.
    pub fn parse_script_set(yaml: &str) -> Result<ScriptSetConfig, ConfigError> {
        let config: ScriptSetConfig = serde_yaml::from_str(yaml)?;
        Self::validate_script_set(&config)?;
        Ok(config)
    }

    /// Validate a script set.
    fn validate_script_set(config: &ScriptSetConfig) -> Result<(), ConfigError> {
        // Check for duplicate script ids
        let mut ids: HashSet<u32> = HashSet::new();
        for script in &config.scripts {
            if !ids.insert(script.id) {
                return Err(ConfigError::InvalidConfig(format!(
                    "duplicate script id: {}",
                    script.id
                )));
            }
        }

        Ok(())
    }
}
