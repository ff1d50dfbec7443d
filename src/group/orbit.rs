//! Breadth-first orbit enumeration under a list of group generators.

use std::hash::Hash;

use indexmap::IndexSet;
use log;

use crate::permutation::Permutation;

#[cfg(test)]
#[path = "orbit_tests.rs"]
mod orbit_tests;

/// Trait for structures that a permutation can relabel.
///
/// The single required method writes the image into a caller-owned scratch
/// instance so that hot loops can reuse one buffer instead of allocating per
/// application. Any future parallelisation must give each worker its own
/// scratch instance.
pub trait Permutable: Clone + Eq + Hash {
    /// Writes the image of `self` under `perm` into `out`.
    fn permute_to(&self, perm: &Permutation, out: &mut Self);
}

/// Enumerates the orbit of `seed` under the group generated by `generators`.
///
/// The orbit is traversed breadth-first with the generators applied in the
/// order supplied, so the discovery order is deterministic. Every reachable
/// image is visited exactly once.
///
/// # Arguments
///
/// * `generators` - The generators of the acting group.
/// * `seed` - The structure whose orbit is to be enumerated.
///
/// # Returns
///
/// The orbit of `seed` as an insertion-ordered set, with `seed` first.
pub fn orbit<T: Permutable>(generators: &[Permutation], seed: &T) -> IndexSet<T> {
    let mut orb = IndexSet::from([seed.clone()]);
    let mut queue = vec![seed.clone()];
    let mut scratch = seed.clone();
    let mut front = 0;
    while front < queue.len() {
        let current = queue[front].clone();
        front += 1;
        for generator in generators {
            current.permute_to(generator, &mut scratch);
            if !orb.contains(&scratch) {
                orb.insert(scratch.clone());
                queue.push(scratch.clone());
            }
        }
    }
    log::debug!("Orbit of size {} enumerated.", orb.len());
    orb
}
