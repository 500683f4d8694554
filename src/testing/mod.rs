//! Testing utilities for users of the scanwave library.
//!
//! This module provides helpers for asserting scheduling behavior:
//!
//! - [`CompletionLog`]: A shared, ordered record of script completions
//! - [`CountingAction`]: An action that counts how many times it ran
//! - [`FailingAction`]: An action that always fails with a fixed message
//! - [`wave_index_of`]: Find which wave of a plan holds a given script

use async_trait::async_trait;
use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::{Arc, Mutex};

use crate::core::plan::ExecutionPlan;
use crate::core::script::{Script, ScriptAction, ScriptError};
use crate::core::types::ScriptId;

/// A shared, ordered record of script completions.
///
/// Clones share the same underlying log, so one handle can be split across
/// many scripts and inspected after execution.
///
/// # Example
///
/// ```
/// use scanwave::testing::{recording_script, CompletionLog};
///
/// let log = CompletionLog::new();
/// let scripts = vec![
///     recording_script(1, [2], &log),
///     recording_script(2, Vec::<u32>::new(), &log),
/// ];
/// // After executing: log.position(2) < log.position(1)
/// # let _ = scripts;
/// ```
#[derive(Clone, Default)]
pub struct CompletionLog {
    entries: Arc<Mutex<Vec<ScriptId>>>,
}

impl CompletionLog {
    /// Create a new, empty log.
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completion.
    pub fn push(&self, id: ScriptId) {
        self.entries.lock().expect("log lock poisoned").push(id);
    }

    /// All recorded ids, in completion order.
    pub fn entries(&self) -> Vec<ScriptId> {
        self.entries.lock().expect("log lock poisoned").clone()
    }

    /// Position of `id` in the completion order, if it completed.
    pub fn position(&self, id: u32) -> Option<usize> {
        let id = ScriptId::new(id);
        self.entries().iter().position(|entry| *entry == id)
    }

    /// Whether `id` completed.
    pub fn contains(&self, id: u32) -> bool {
        self.position(id).is_some()
    }

    /// Number of recorded completions.
    pub fn len(&self) -> usize {
        self.entries().len()
    }

    /// Whether nothing completed.
    pub fn is_empty(&self) -> bool {
        self.entries().is_empty()
    }
}

/// Action that appends its script's id to a [`CompletionLog`] on success.
pub struct RecordingAction {
    id: ScriptId,
    log: CompletionLog,
}

impl RecordingAction {
    /// Create a recording action for `id`.
    pub fn new(id: u32, log: &CompletionLog) -> Arc<Self> {
        Arc::new(Self {
            id: ScriptId::new(id),
            log: log.clone(),
        })
    }
}

#[async_trait]
impl ScriptAction for RecordingAction {
    async fn run(&self) -> Result<(), ScriptError> {
        self.log.push(self.id);
        Ok(())
    }
}

/// Build a script that records its completion in `log`.
pub fn recording_script<I>(id: u32, dependencies: I, log: &CompletionLog) -> Script
where
    I: IntoIterator,
    I::Item: Into<ScriptId>,
{
    Script::new(id, dependencies, RecordingAction::new(id, log))
}

/// Action that counts how many times it ran.
///
/// Useful for asserting that the executor runs each scheduled script
/// exactly once.
#[derive(Default)]
pub struct CountingAction {
    runs: AtomicU32,
}

impl CountingAction {
    /// Create a new counting action.
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Number of completed runs.
    pub fn runs(&self) -> u32 {
        self.runs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ScriptAction for CountingAction {
    async fn run(&self) -> Result<(), ScriptError> {
        self.runs.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }
}

/// Action that always fails with a fixed message.
pub struct FailingAction {
    message: String,
}

impl FailingAction {
    /// Create an action failing with `message`.
    pub fn new(message: impl Into<String>) -> Arc<Self> {
        Arc::new(Self {
            message: message.into(),
        })
    }
}

#[async_trait]
impl ScriptAction for FailingAction {
    async fn run(&self) -> Result<(), ScriptError> {
        Err(ScriptError::Failed(self.message.clone()))
    }
}

/// Index of the wave that contains `id`, if the plan schedules it.
pub fn wave_index_of(plan: &ExecutionPlan, id: u32) -> Option<usize> {
    let id = ScriptId::new(id);
    plan.waves().iter().position(|wave| wave.contains(&id))
}
