//! Wave planning: layered topological scheduling of script sets.
//!
//! [`plan`] arranges a set of scripts into an [`ExecutionPlan`]: an ordered
//! sequence of waves where every script appears after all of its known
//! dependencies and scripts within a wave are mutually independent.

mod graph;

use thiserror::Error;
use tracing::debug;

use crate::core::plan::ExecutionPlan;
use crate::core::script::Script;

use graph::DependencyGraph;

/// Errors that can occur during planning.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum PlanError {
    /// Part of the graph can never reach zero remaining dependencies.
    #[error("cyclic dependency detected: {unresolved} script(s) unresolved")]
    CycleDetected {
        /// Scripts left unscheduled when the ready queue drained. Counts
        /// cycle members and everything downstream of them.
        unresolved: usize,
    },
}

/// Plan execution waves for `scripts`.
///
/// Dependencies on unknown ids are dropped and reported as warnings on the
/// returned plan. A dependency cycle is fatal: no partial plan is returned,
/// because every schedule of the remaining scripts would deadlock.
///
/// Runs in O(V + E) over the script count and declared dependency count.
pub fn plan(scripts: &[Script]) -> Result<ExecutionPlan, PlanError> {
    let graph = DependencyGraph::build(scripts);
    let known = graph.script_count();

    let (waves, warnings) = graph.into_waves();

    let scheduled: usize = waves.iter().map(Vec::len).sum();
    if scheduled != known {
        return Err(PlanError::CycleDetected {
            unresolved: known - scheduled,
        });
    }

    debug!(
        scripts = known,
        waves = waves.len(),
        warnings = warnings.len(),
        "plan ready"
    );

    Ok(ExecutionPlan::new(waves, warnings))
}
