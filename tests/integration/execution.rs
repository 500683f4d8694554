//! Execution integration tests.
//!
//! Tests that verify the full pipeline from script declarations through
//! planning, wave execution, and reporting.

use scanwave::testing::{recording_script, wave_index_of, CompletionLog, FailingAction};
use scanwave::{
    planner, sample_scripts, ExecuteError, ExecutionReport, Script, ScriptId, WaveExecutor,
};
use std::time::{Duration, Instant};

/// Test: the built-in sample set runs end to end and reports optimal.
#[tokio::test]
async fn test_sample_set_runs_end_to_end() {
    let scripts = sample_scripts();
    let plan = planner::plan(&scripts).unwrap();

    let executor = WaveExecutor::new(&scripts);
    let started = Instant::now();
    executor.execute(&plan).await.unwrap();
    let elapsed = started.elapsed();

    let report = ExecutionReport::new(&plan, &scripts, elapsed);
    assert_eq!(report.total_scripts, 5);
    assert_eq!(report.wave_count, 4);
    assert_eq!(report.wave_sizes, vec![1, 1, 1, 2]);
    assert!(report.optimal);
    assert!(report.warnings.is_empty());
}

/// Test: every script completes after all of its dependencies.
#[tokio::test]
async fn test_execution_respects_dependency_order() {
    let log = CompletionLog::new();
    let scripts = vec![
        recording_script(1, [4, 5], &log),
        recording_script(2, [1], &log),
        recording_script(3, [4, 5, 1], &log),
        recording_script(4, [5], &log),
        recording_script(5, Vec::<u32>::new(), &log),
    ];

    let plan = planner::plan(&scripts).unwrap();
    let executor = WaveExecutor::new(&scripts);
    executor.execute(&plan).await.unwrap();

    assert_eq!(log.len(), 5);
    for script in &scripts {
        let position = log.position(script.id().value()).unwrap();
        for dep in script.dependencies() {
            let dep_position = log.position(dep.value()).unwrap();
            assert!(
                dep_position < position,
                "script {} finished before its dependency {}",
                script.id(),
                dep
            );
        }
    }
}

/// Test: a script with a missing dependency still runs, in the first wave.
#[tokio::test]
async fn test_execution_with_missing_dependency_warning() {
    let log = CompletionLog::new();
    let scripts = vec![recording_script(1, [99], &log)];

    let plan = planner::plan(&scripts).unwrap();
    assert_eq!(wave_index_of(&plan, 1), Some(0));

    let executor = WaveExecutor::new(&scripts);
    executor.execute(&plan).await.unwrap();

    assert!(log.contains(1));

    let report = ExecutionReport::new(&plan, &scripts, Duration::ZERO);
    assert_eq!(report.warnings, vec!["Script 1 depends on missing 99"]);
    assert!(report.optimal);
}

/// Test: a failure in one wave prevents all later waves from starting.
#[tokio::test]
async fn test_execution_failure_skips_later_waves() {
    let log = CompletionLog::new();
    let scripts = vec![
        recording_script(1, Vec::<u32>::new(), &log),
        Script::new(2, [1], FailingAction::new("scan tool crashed")),
        recording_script(3, [2], &log),
        recording_script(4, [2], &log),
    ];

    let plan = planner::plan(&scripts).unwrap();
    let executor = WaveExecutor::new(&scripts);
    let err = executor.execute(&plan).await.unwrap_err();

    match err {
        ExecuteError::ScriptFailed { id, wave, source } => {
            assert_eq!(id, ScriptId::new(2));
            assert_eq!(wave, 1);
            assert_eq!(source.to_string(), "scan tool crashed");
        }
        other => panic!("unexpected error: {}", other),
    }

    // Wave zero ran; nothing after the failing wave did.
    assert!(log.contains(1));
    assert!(!log.contains(3));
    assert!(!log.contains(4));
}

/// Test: one executor can run the same plan twice.
#[tokio::test]
async fn test_executor_is_reusable_across_runs() {
    let log = CompletionLog::new();
    let scripts = vec![
        recording_script(1, [2], &log),
        recording_script(2, Vec::<u32>::new(), &log),
    ];

    let plan = planner::plan(&scripts).unwrap();
    let executor = WaveExecutor::new(&scripts);

    executor.execute(&plan).await.unwrap();
    executor.execute(&plan).await.unwrap();

    assert_eq!(log.len(), 4);
}

/// Test: a wide wave of slow scripts runs concurrently, not serially.
#[tokio::test(flavor = "multi_thread")]
async fn test_execution_overlaps_scripts_within_a_wave() {
    const WAVE_WIDTH: u32 = 8;
    const SLEEP_MS: u64 = 50;

    let scripts: Vec<Script> = (0..WAVE_WIDTH)
        .map(|id| {
            Script::from_fn(id, Vec::<u32>::new(), || async {
                tokio::time::sleep(Duration::from_millis(SLEEP_MS)).await;
                Ok(())
            })
        })
        .collect();

    let plan = planner::plan(&scripts).unwrap();
    assert_eq!(plan.wave_count(), 1);

    let executor = WaveExecutor::new(&scripts);
    let started = Instant::now();
    executor.execute(&plan).await.unwrap();
    let elapsed = started.elapsed();

    // Serial execution would need WAVE_WIDTH * SLEEP_MS.
    assert!(
        elapsed < Duration::from_millis(SLEEP_MS * WAVE_WIDTH as u64 / 2),
        "wave took {:?}, expected concurrent execution",
        elapsed
    );
}
