//! Dependency graph construction.
//!
//! Builds the reverse adjacency ("dependents") and per-script remaining
//! dependency counts that wave layering consumes.

use std::collections::{HashMap, HashSet, VecDeque};

use tracing::debug;

use crate::core::plan::MissingDependency;
use crate::core::script::Script;
use crate::core::types::ScriptId;

/// Adjacency and indegree view of a script set.
///
/// Ephemeral: built for a single planning call and consumed by
/// [`into_waves`](Self::into_waves). Edges pointing at unknown ids are
/// dropped at build time and recorded as warnings.
pub(crate) struct DependencyGraph {
    /// Parent id to the ids that depend on it, in declaration order.
    dependents: HashMap<ScriptId, Vec<ScriptId>>,
    /// Script id to the count of its not-yet-satisfied known dependencies.
    /// Every known script has an entry, even with no dependencies.
    remaining_deps: HashMap<ScriptId, usize>,
    /// One entry per dropped edge, in input order.
    warnings: Vec<MissingDependency>,
}

impl DependencyGraph {
    /// Build the graph for `scripts` in a single pass over the declarations.
    ///
    /// Duplicate declared dependencies are kept as distinct edges; they are
    /// counted on build and decremented once each during layering, so they
    /// cancel out without changing the schedule.
    pub(crate) fn build(scripts: &[Script]) -> Self {
        let known: HashSet<ScriptId> = scripts.iter().map(Script::id).collect();

        let mut dependents: HashMap<ScriptId, Vec<ScriptId>> = HashMap::new();
        let mut remaining_deps: HashMap<ScriptId, usize> = HashMap::with_capacity(scripts.len());
        let mut warnings = Vec::new();

        for script in scripts {
            remaining_deps.entry(script.id()).or_insert(0);

            for &parent in script.dependencies() {
                if !known.contains(&parent) {
                    warnings.push(MissingDependency {
                        script: script.id(),
                        missing: parent,
                    });
                    continue;
                }

                dependents.entry(parent).or_default().push(script.id());
                *remaining_deps.entry(script.id()).or_insert(0) += 1;
            }
        }

        debug!(
            scripts = scripts.len(),
            dropped_edges = warnings.len(),
            "dependency graph built"
        );

        Self {
            dependents,
            remaining_deps,
            warnings,
        }
    }

    /// Number of known scripts in the graph.
    pub(crate) fn script_count(&self) -> usize {
        self.remaining_deps.len()
    }

    /// Consume the graph and layer it into execution waves.
    ///
    /// Layered Kahn's algorithm: scripts with no remaining dependencies are
    /// ready; each wave is a snapshot of the ready queue, and ids that
    /// become ready while a wave drains belong to a later wave. Scripts
    /// caught in a cycle never become ready and are simply absent from the
    /// returned waves.
    pub(crate) fn into_waves(mut self) -> (Vec<Vec<ScriptId>>, Vec<MissingDependency>) {
        let mut ready: Vec<ScriptId> = self
            .remaining_deps
            .iter()
            .filter(|(_, remaining)| **remaining == 0)
            .map(|(&id, _)| id)
            .collect();
        // Seed in ascending id order so plans are reproducible run to run.
        ready.sort_unstable();

        let mut queue: VecDeque<ScriptId> = ready.into();
        let mut waves = Vec::new();

        while !queue.is_empty() {
            // Freeze the wave boundary before draining.
            let wave_size = queue.len();
            let mut wave = Vec::with_capacity(wave_size);

            for _ in 0..wave_size {
                let id = queue.pop_front().expect("queue holds the snapshot");
                wave.push(id);

                if let Some(children) = self.dependents.get(&id) {
                    for &child in children {
                        let remaining = self
                            .remaining_deps
                            .get_mut(&child)
                            .expect("dependent of a known script is known");
                        *remaining -= 1;
                        if *remaining == 0 {
                            queue.push_back(child);
                        }
                    }
                }
            }

            waves.push(wave);
        }

        (waves, self.warnings)
    }
}
