//! Wave execution engine.
//!
//! Runs a planned schedule against a script catalog: one tokio task per
//! script per wave, with a full barrier between waves.

mod wave_executor;

pub use wave_executor::{ExecuteError, WaveExecutor};
