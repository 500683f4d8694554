//! Plan validation: an independent optimality oracle.
//!
//! These checks rebuild their own view of the dependency graph instead of
//! reusing the planner's internals, so a planner defect cannot vouch for
//! its own output. They never fail loudly: malformed plans simply validate
//! as `false`.

use std::collections::{HashMap, HashSet, VecDeque};

use crate::core::plan::ExecutionPlan;
use crate::core::script::Script;
use crate::core::types::ScriptId;

/// True iff every input script id appears in exactly one wave of `plan`
/// and the plan schedules nothing else.
pub fn contains_every_script_exactly_once(plan: &ExecutionPlan, scripts: &[Script]) -> bool {
    let expected: HashSet<ScriptId> = scripts.iter().map(Script::id).collect();

    let mut seen = HashSet::with_capacity(expected.len());
    for wave in plan.waves() {
        for &id in wave {
            if !seen.insert(id) {
                return false;
            }
        }
    }

    seen == expected
}

/// Length in edges of the longest dependency chain in `scripts`.
///
/// Edges to unknown ids are ignored, mirroring how planning treats them; a
/// script whose dependencies are all missing sits at depth zero. For a
/// cyclic input the unreachable part contributes nothing.
pub fn critical_path_length(scripts: &[Script]) -> usize {
    let known: HashSet<ScriptId> = scripts.iter().map(Script::id).collect();

    let mut dependents: HashMap<ScriptId, Vec<ScriptId>> = HashMap::new();
    let mut remaining: HashMap<ScriptId, usize> = HashMap::with_capacity(scripts.len());

    for script in scripts {
        remaining.entry(script.id()).or_insert(0);

        for &parent in script.dependencies() {
            if !known.contains(&parent) {
                continue;
            }
            dependents.entry(parent).or_default().push(script.id());
            *remaining.entry(script.id()).or_insert(0) += 1;
        }
    }

    let mut depth: HashMap<ScriptId, usize> = HashMap::with_capacity(scripts.len());
    let mut queue: VecDeque<ScriptId> = VecDeque::new();
    for (&id, &count) in &remaining {
        if count == 0 {
            depth.insert(id, 0);
            queue.push_back(id);
        }
    }

    // Longest-path over the topological order: a script's depth is one more
    // than the deepest of its satisfied parents.
    let mut max_depth = 0;
    while let Some(parent) = queue.pop_front() {
        let parent_depth = depth.get(&parent).copied().unwrap_or(0);
        max_depth = max_depth.max(parent_depth);

        if let Some(children) = dependents.get(&parent) {
            for &child in children {
                let child_depth = depth.entry(child).or_insert(0);
                *child_depth = (*child_depth).max(parent_depth + 1);

                if let Some(count) = remaining.get_mut(&child) {
                    *count -= 1;
                    if *count == 0 {
                        queue.push_back(child);
                    }
                }
            }
        }
    }

    max_depth
}

/// True iff `plan` schedules every script exactly once using the minimum
/// possible number of waves.
///
/// The minimum is `critical_path_length + 1`: each edge of the longest
/// chain forces a wave boundary, and the chain's head needs one more.
pub fn is_optimal(plan: &ExecutionPlan, scripts: &[Script]) -> bool {
    if scripts.is_empty() {
        return plan.is_empty();
    }

    if !contains_every_script_exactly_once(plan, scripts) {
        return false;
    }

    plan.wave_count() == critical_path_length(scripts) + 1
}
