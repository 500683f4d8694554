//! Common test utilities shared across integration tests.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use scanwave::Script;

/// Generate `count` no-op scripts whose dependencies only reference lower
/// ids, so the resulting set is acyclic by construction.
///
/// Each script declares between zero and `max_deps` dependencies, drawn
/// uniformly from the ids below it. The same seed always produces the same
/// set.
pub fn random_acyclic_scripts(count: u32, max_deps: u32, seed: u64) -> Vec<Script> {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut scripts = Vec::with_capacity(count as usize);

    for id in 0..count {
        let dep_count = rng.gen_range(0..=max_deps);
        let mut deps: Vec<u32> = Vec::with_capacity(dep_count as usize);
        for _ in 0..dep_count {
            if id == 0 {
                break;
            }
            deps.push(rng.gen_range(0..id));
        }
        scripts.push(Script::noop(id, deps));
    }

    scripts
}
