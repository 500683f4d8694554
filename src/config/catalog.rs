//! Building runnable scripts from declarations.
//!
//! Declared scripts get the bundled simulated action: an optional sleep to
//! mimic scan work and an optional forced failure. Library users who need
//! real actions construct [`Script`] values directly instead.

use std::time::Duration;

use tracing::debug;

use crate::core::script::{Script, ScriptError};
use crate::core::types::ScriptId;

use super::yaml::{ActionConfig, ScriptConfig, ScriptSetConfig};

/// Turn a parsed script set into runnable scripts.
pub fn build_scripts(config: &ScriptSetConfig) -> Vec<Script> {
    config.scripts.iter().map(build_script).collect()
}

fn build_script(config: &ScriptConfig) -> Script {
    let id = ScriptId::new(config.id);
    let deps: Vec<ScriptId> = config.depends_on.iter().copied().map(ScriptId::new).collect();
    let action = config.action.clone();

    Script::from_fn(id, deps, move || simulated_run(id, action.clone()))
}

async fn simulated_run(id: ScriptId, action: ActionConfig) -> Result<(), ScriptError> {
    if let Some(ms) = action.sleep_ms {
        tokio::time::sleep(Duration::from_millis(ms)).await;
    }
    if action.fail {
        return Err(ScriptError::Failed(format!("script {} is configured to fail", id)));
    }
    debug!(script = %id, "simulated scan finished");
    Ok(())
}

/// The built-in demo set: five scan scripts with a diamond-shaped
/// dependency graph that plans into four waves.
pub fn sample_scripts() -> Vec<Script> {
    let declarations: [(u32, &[u32]); 5] = [
        (1, &[4, 5]),
        (2, &[1]),
        (3, &[4, 5, 1]),
        (4, &[5]),
        (5, &[]),
    ];

    declarations
        .iter()
        .map(|&(id, deps)| ScriptConfig {
            id,
            depends_on: deps.to_vec(),
            action: ActionConfig {
                sleep_ms: Some(20),
                fail: false,
            },
        })
        .map(|config| build_script(&config))
        .collect()
}
