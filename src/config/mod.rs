//! Script-set configuration.
//!
//! This module provides YAML-based script declarations and turns them into
//! runnable scripts with simulated actions.

mod catalog;
mod yaml;

pub use catalog::{build_scripts, sample_scripts};
pub use yaml::{ActionConfig, ConfigError, ScriptConfig, ScriptSetConfig, ScriptSetLoader};

use std::path::Path;

use crate::core::script::Script;

/// Load a script-set file and build runnable scripts from it.
pub fn load_script_set(path: impl AsRef<Path>) -> Result<Vec<Script>, ConfigError> {
    let config = ScriptSetLoader::load_script_set(path)?;
    Ok(build_scripts(&config))
}
