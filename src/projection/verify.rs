//! Independent certification that a claimed spanning family is invariant
//! under the group action.

use indexmap::IndexMap;
use log;
use ndarray::{Array1, Array2};
use num::BigRational;

use crate::group::orbit::orbit;
use crate::linalg::{is_zero_vector, matvec, null_space};
use crate::permutation::Permutation;
use crate::sparse::{SparseSet, SparseSimplexVector};

#[cfg(test)]
#[path = "verify_tests.rs"]
mod verify_tests;

/// Extends `index_of` with stable positions for every key appearing in any of
/// the given vectors.
fn augment_index_of(
    index_of: &mut IndexMap<SparseSet, usize>,
    subspace_generators: &[SparseSimplexVector],
) {
    let mut index = index_of.len();
    for sgen in subspace_generators {
        for (key, _) in sgen.iter() {
            index_of.entry(key.clone()).or_insert_with(|| {
                let assigned = index;
                index += 1;
                assigned
            });
        }
    }
}

/// Stacks the given vectors into a dense matrix over the common coordinate
/// space described by `index_of`.
fn matrix_representation(
    index_of: &IndexMap<SparseSet, usize>,
    subspace_generators: &[SparseSimplexVector],
) -> Array2<BigRational> {
    let mut sgen_matrix = Array2::<BigRational>::zeros((subspace_generators.len(), index_of.len()));
    for (row, sgen) in subspace_generators.iter().enumerate() {
        for (key, value) in sgen.iter() {
            let col = *index_of
                .get(key)
                .expect("A key of an indexed vector is missing from the index.");
            sgen_matrix[(row, col)] = value.clone();
        }
    }
    sgen_matrix
}

/// Checks that the linear span of `subspace_generators` is invariant under
/// the group generated by `group_generators`.
///
/// The claimed subspace is re-expressed in a common coordinate space indexed
/// by every key appearing in any of its generators, and described by the
/// kernel of the stacked generator matrix. The full orbit of each generator
/// vector under the induced action is then checked against that kernel.
///
/// Failure is reported through the returned boolean, never through a panic:
/// an orbit image whose support escapes the keys of the given vectors makes
/// invariance structurally impossible, and an orbit image not annihilated by
/// the kernel is not expressible inside the claimed subspace. When `verbose`
/// is set, each failure path logs a human-readable explanation before
/// returning.
///
/// # Arguments
///
/// * `group_generators` - The generators of the acting group.
/// * `subspace_generators` - The vectors claimed to span an invariant
///   subspace.
/// * `verbose` - Whether failures are explained on the log output.
///
/// # Returns
///
/// `true` if and only if the span of `subspace_generators` is closed under
/// the group action restricted to the coordinate support of the given
/// vectors.
pub fn spans_invariant_subspace(
    group_generators: &[Permutation],
    subspace_generators: &[SparseSimplexVector],
    verbose: bool,
) -> bool {
    let mut index_of = IndexMap::<SparseSet, usize>::new();
    augment_index_of(&mut index_of, subspace_generators);
    let ker = null_space(&matrix_representation(&index_of, subspace_generators));

    for sgen in subspace_generators {
        for o_sgen in &orbit(group_generators, sgen) {
            let mut new_sgen = Array1::<BigRational>::zeros(index_of.len());
            let mut escaped_key = None;
            for (key, value) in o_sgen.iter() {
                match index_of.get(key) {
                    Some(&index) => new_sgen[index] = value.clone(),
                    None => {
                        escaped_key = Some(key.clone());
                        break;
                    }
                }
            }
            if let Some(key) = escaped_key {
                if verbose {
                    log::warn!(
                        "The given vectors do not span an invariant subspace, because {key} is in \
                         the support of the orbit of {sgen}, but not in the support of the given \
                         vectors."
                    );
                }
                return false;
            }
            if !is_zero_vector(&matvec(&ker, &new_sgen)) {
                if verbose {
                    log::warn!(
                        "The given vectors do not span an invariant subspace, because {o_sgen}, \
                         in the orbit of {sgen}, is not in the spanned subspace L. Here, ker L =\n\
                         {ker}"
                    );
                }
                return false;
            }
        }
    }
    true
}
