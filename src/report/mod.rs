//! Execution reporting for human and machine consumption.
//!
//! A report is a snapshot of what the core already exposes: plan
//! statistics, the optimality verdict, and missing-dependency warnings.
//! It never reaches back into planner or executor state.

use std::fmt;
use std::time::Duration;

use serde::Serialize;

use crate::core::plan::ExecutionPlan;
use crate::core::script::Script;
use crate::validate;

/// Summary of a planning and execution run.
#[derive(Debug, Clone, Serialize)]
pub struct ExecutionReport {
    /// Total scripts scheduled.
    pub total_scripts: usize,
    /// Number of execution waves.
    pub wave_count: usize,
    /// Scripts per wave, in execution order.
    pub wave_sizes: Vec<usize>,
    /// Scheduled scripts divided by wave count.
    pub average_parallelism: f64,
    /// Whether the plan uses the minimum possible number of waves.
    pub optimal: bool,
    /// Wall-clock execution time in milliseconds.
    pub elapsed_ms: u64,
    /// Missing-dependency warnings, already formatted.
    pub warnings: Vec<String>,
}

impl ExecutionReport {
    /// Build a report for a run that took `elapsed` to execute.
    ///
    /// For a planning-only report, pass `Duration::ZERO`.
    pub fn new(plan: &ExecutionPlan, scripts: &[Script], elapsed: Duration) -> Self {
        Self {
            total_scripts: plan.total_scripts(),
            wave_count: plan.wave_count(),
            wave_sizes: plan.wave_sizes(),
            average_parallelism: plan.average_parallelism(),
            optimal: validate::is_optimal(plan, scripts),
            elapsed_ms: elapsed.as_millis() as u64,
            warnings: plan.warnings().iter().map(ToString::to_string).collect(),
        }
    }
}

impl fmt::Display for ExecutionReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "============== Execution Report ==============")?;
        for warning in &self.warnings {
            writeln!(f, "Warning: {}", warning)?;
        }
        writeln!(f, "Total scripts         : {}", self.total_scripts)?;
        writeln!(f, "Total execution waves : {}", self.wave_count)?;
        writeln!(f, "Scripts per wave      : {:?}", self.wave_sizes)?;
        writeln!(f, "Average parallelism   : {:.2}", self.average_parallelism)?;
        writeln!(f, "Optimal wave count?   : {}", self.optimal)?;
        writeln!(f, "Elapsed               : {} ms", self.elapsed_ms)?;
        write!(f, "==============================================")
    }
}
