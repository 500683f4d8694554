//! Execution plans: ordered waves of mutually independent scripts.

use serde::Serialize;
use thiserror::Error;

use crate::core::types::ScriptId;

/// Diagnostic for a declared dependency on an id missing from the input set.
///
/// The offending edge is dropped from the graph and planning continues; the
/// dependent script is scheduled as if the edge were never declared.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error, Serialize)]
#[error("Script {script} depends on missing {missing}")]
pub struct MissingDependency {
    /// The script that declared the dependency.
    pub script: ScriptId,
    /// The id no known script carries.
    pub missing: ScriptId,
}

/// The result of planning: waves to execute in order, plus diagnostics.
///
/// Immutable once built. Wave order is semantic (wave `i` must fully finish
/// before wave `i + 1` starts); order of ids within a wave is not.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionPlan {
    waves: Vec<Vec<ScriptId>>,
    warnings: Vec<MissingDependency>,
}

impl ExecutionPlan {
    pub(crate) fn new(waves: Vec<Vec<ScriptId>>, warnings: Vec<MissingDependency>) -> Self {
        Self { waves, warnings }
    }

    /// The scheduled waves, in execution order.
    pub fn waves(&self) -> &[Vec<ScriptId>] {
        &self.waves
    }

    /// Number of waves in the plan.
    pub fn wave_count(&self) -> usize {
        self.waves.len()
    }

    /// Total number of scheduled scripts across all waves.
    pub fn total_scripts(&self) -> usize {
        self.waves.iter().map(Vec::len).sum()
    }

    /// Size of each wave, in execution order.
    pub fn wave_sizes(&self) -> Vec<usize> {
        self.waves.iter().map(Vec::len).collect()
    }

    /// Mean number of scripts per wave, or `0.0` for an empty plan.
    pub fn average_parallelism(&self) -> f64 {
        if self.waves.is_empty() {
            return 0.0;
        }
        self.total_scripts() as f64 / self.waves.len() as f64
    }

    /// Missing-dependency diagnostics collected while building the graph.
    pub fn warnings(&self) -> &[MissingDependency] {
        &self.warnings
    }

    /// True when no scripts were scheduled.
    pub fn is_empty(&self) -> bool {
        self.waves.is_empty()
    }
}
