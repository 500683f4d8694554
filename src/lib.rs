//! scanwave: a minimal wave-based scheduler for interdependent scan scripts.
//!
//! Scripts declare integer ids and the ids they depend on. [`plan`] layers
//! them into dependency-respecting waves with a topological sort, the
//! [`validate`] module independently checks that a schedule is as short as
//! possible, and [`WaveExecutor`] runs each wave with full intra-wave
//! concurrency and a hard barrier between waves.

pub mod config;
pub mod core;
pub mod execution;
pub mod planner;
pub mod report;
pub mod testing;
pub mod validate;

pub use crate::config::{load_script_set, sample_scripts, ConfigError};
pub use crate::core::plan::{ExecutionPlan, MissingDependency};
pub use crate::core::script::{ActionFuture, Script, ScriptAction, ScriptError};
pub use crate::core::types::ScriptId;
pub use crate::execution::{ExecuteError, WaveExecutor};
pub use crate::planner::{plan, PlanError};
pub use crate::report::ExecutionReport;
