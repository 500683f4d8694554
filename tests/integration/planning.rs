//! Planning integration tests.
//!
//! Tests that verify wave layering against known dependency shapes, the
//! missing-dependency diagnostics, cycle rejection, and the independent
//! optimality checks.

use scanwave::{planner, validate, PlanError, Script, ScriptId};

use crate::common;

fn noop_set(declarations: &[(u32, Vec<u32>)]) -> Vec<Script> {
    declarations
        .iter()
        .map(|(id, deps)| Script::noop(*id, deps.clone()))
        .collect()
}

/// Waves as plain integers with intra-wave order normalized, since only
/// the wave boundaries are semantic.
fn sorted_waves(plan: &scanwave::ExecutionPlan) -> Vec<Vec<u32>> {
    plan.waves()
        .iter()
        .map(|wave| {
            let mut ids: Vec<u32> = wave.iter().map(ScriptId::value).collect();
            ids.sort_unstable();
            ids
        })
        .collect()
}

/// Test: the five-script diamond lands in four waves with 2 and 3 together.
#[test]
fn test_planning_diamond_set_into_four_waves() {
    let scripts = noop_set(&[
        (1, vec![4, 5]),
        (2, vec![1]),
        (3, vec![4, 5, 1]),
        (4, vec![5]),
        (5, vec![]),
    ]);

    let plan = planner::plan(&scripts).unwrap();

    assert_eq!(
        sorted_waves(&plan),
        vec![vec![5], vec![4], vec![1], vec![2, 3]]
    );
    assert!(plan.warnings().is_empty());
    assert!(validate::is_optimal(&plan, &scripts));
}

/// Test: a dependency on an undeclared id is reported, not fatal.
#[test]
fn test_planning_missing_dependency_is_a_warning() {
    let scripts = noop_set(&[(1, vec![99])]);

    let plan = planner::plan(&scripts).unwrap();

    assert_eq!(sorted_waves(&plan), vec![vec![1]]);
    assert_eq!(plan.warnings().len(), 1);
    assert_eq!(
        plan.warnings()[0].to_string(),
        "Script 1 depends on missing 99"
    );
    assert!(validate::is_optimal(&plan, &scripts));
}

/// Test: a two-script cycle fails planning with the unresolved count.
#[test]
fn test_planning_cycle_is_fatal() {
    let scripts = noop_set(&[(1, vec![2]), (2, vec![1])]);

    let err = planner::plan(&scripts).unwrap_err();

    assert_eq!(err, PlanError::CycleDetected { unresolved: 2 });
}

/// Test: scripts downstream of a cycle count as unresolved too.
#[test]
fn test_planning_counts_scripts_stuck_behind_a_cycle() {
    let scripts = noop_set(&[
        (1, vec![2]),
        (2, vec![1]),
        (3, vec![2]),
        (4, vec![]),
        (5, vec![4]),
    ]);

    let err = planner::plan(&scripts).unwrap_err();

    assert_eq!(err, PlanError::CycleDetected { unresolved: 3 });
}

/// Test: an empty script set plans into an empty plan.
#[test]
fn test_planning_empty_set() {
    let plan = planner::plan(&[]).unwrap();

    assert!(plan.is_empty());
    assert_eq!(plan.average_parallelism(), 0.0);
    assert!(validate::is_optimal(&plan, &[]));
}

/// Test: duplicate dependency declarations do not distort the schedule.
#[test]
fn test_planning_tolerates_duplicate_dependencies() {
    let scripts = noop_set(&[(1, vec![2, 2, 2]), (2, vec![])]);

    let plan = planner::plan(&scripts).unwrap();

    assert_eq!(sorted_waves(&plan), vec![vec![2], vec![1]]);
    assert!(validate::is_optimal(&plan, &scripts));
}

/// Test: planning the same input twice yields the same waves.
#[test]
fn test_planning_is_deterministic() {
    let scripts = common::random_acyclic_scripts(500, 8, 7);

    let first = planner::plan(&scripts).unwrap();
    let second = planner::plan(&scripts).unwrap();

    assert_eq!(first.waves(), second.waves());
}

/// Test: a generated thousand-script set plans completely and optimally.
#[test]
fn test_planning_random_set_is_complete_and_optimal() {
    let scripts = common::random_acyclic_scripts(1_000, 10, 7);

    let plan = planner::plan(&scripts).unwrap();

    assert_eq!(plan.total_scripts(), 1_000);
    assert!(plan.warnings().is_empty());
    assert!(validate::contains_every_script_exactly_once(&plan, &scripts));
    assert!(validate::is_optimal(&plan, &scripts));
}

/// Test: wave count always equals the critical path length plus one.
#[test]
fn test_planning_wave_count_tracks_critical_path() {
    for seed in [1, 2, 3, 4, 5] {
        let scripts = common::random_acyclic_scripts(200, 6, seed);
        let plan = planner::plan(&scripts).unwrap();

        assert_eq!(
            plan.wave_count(),
            validate::critical_path_length(&scripts) + 1,
            "seed {} produced a non-minimal plan",
            seed
        );
    }
}
