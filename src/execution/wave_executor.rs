//! Wave execution engine.
//!
//! Runs each wave of a plan with one tokio task per script and a hard
//! barrier between waves: wave `i + 1` starts only after every unit of
//! wave `i` has finished, successfully or not.

use std::collections::HashMap;
use std::panic;
use std::sync::Arc;
use std::time::Instant;

use thiserror::Error;
use tokio::task::JoinSet;
use tracing::{debug, info, info_span, Instrument};

use crate::core::plan::ExecutionPlan;
use crate::core::script::{Script, ScriptAction, ScriptError};
use crate::core::types::ScriptId;

/// Errors that can occur while executing a plan.
#[derive(Debug, Error)]
pub enum ExecuteError {
    /// A script's action failed. Reported only after its whole wave
    /// finished; later waves never start.
    #[error("script {id} failed in wave {wave}: {source}")]
    ScriptFailed {
        id: ScriptId,
        wave: usize,
        #[source]
        source: ScriptError,
    },

    /// A worker was torn down before its script could finish.
    #[error("execution interrupted in wave {wave}")]
    Interrupted { wave: usize },

    /// The plan references an id the executor holds no script for.
    #[error("plan references unknown script {id}")]
    UnknownScript { id: ScriptId },
}

/// Executes plans against a read-only catalog of script actions.
///
/// The catalog is built once from the script set; executing a plan borrows
/// it immutably, so one executor can run any number of plans.
pub struct WaveExecutor {
    catalog: HashMap<ScriptId, Arc<dyn ScriptAction>>,
}

impl WaveExecutor {
    /// Build an executor over the given scripts.
    pub fn new(scripts: &[Script]) -> Self {
        let catalog = scripts
            .iter()
            .map(|script| (script.id(), Arc::clone(script.action())))
            .collect();

        Self { catalog }
    }

    /// Run every wave of `plan` in order.
    ///
    /// All scripts of a wave run concurrently. On failure the remaining
    /// units of that wave still run to completion, then the first observed
    /// failure is returned and later waves are skipped. A panicking action
    /// is resumed on the caller once its wave has drained.
    pub async fn execute(&self, plan: &ExecutionPlan) -> Result<(), ExecuteError> {
        let started = Instant::now();

        for (wave_index, wave) in plan.waves().iter().enumerate() {
            // Resolve the whole wave up front so a stale plan aborts
            // before any script runs.
            let mut actions = Vec::with_capacity(wave.len());
            for &id in wave {
                match self.catalog.get(&id) {
                    Some(action) => actions.push((id, Arc::clone(action))),
                    None => return Err(ExecuteError::UnknownScript { id }),
                }
            }

            info!(wave = wave_index, scripts = wave.len(), "starting wave");

            let mut workers = JoinSet::new();
            for (id, action) in actions {
                let span = info_span!("script_run", script = %id, wave = wave_index);
                workers.spawn(async move { (id, action.run().await) }.instrument(span));
            }

            // Wave barrier: drain every worker before acting on failures,
            // so siblings of a failed script always get to finish.
            let mut first_failure: Option<(ScriptId, ScriptError)> = None;
            let mut panic_payload = None;
            let mut interrupted = false;

            while let Some(joined) = workers.join_next().await {
                match joined {
                    Ok((id, Ok(()))) => {
                        debug!(script = %id, wave = wave_index, "script finished");
                    }
                    Ok((id, Err(error))) => {
                        debug!(script = %id, wave = wave_index, %error, "script failed");
                        if first_failure.is_none() {
                            first_failure = Some((id, error));
                        }
                    }
                    Err(join_error) if join_error.is_panic() => {
                        if panic_payload.is_none() {
                            panic_payload = Some(join_error.into_panic());
                        }
                    }
                    Err(_) => {
                        interrupted = true;
                    }
                }
            }

            if let Some(payload) = panic_payload {
                panic::resume_unwind(payload);
            }
            if let Some((id, source)) = first_failure {
                return Err(ExecuteError::ScriptFailed {
                    id,
                    wave: wave_index,
                    source,
                });
            }
            if interrupted {
                return Err(ExecuteError::Interrupted { wave: wave_index });
            }
        }

        debug!(
            waves = plan.wave_count(),
            scripts = plan.total_scripts(),
            elapsed_ms = started.elapsed().as_millis() as u64,
            "execution complete"
        );

        Ok(())
    }
}
