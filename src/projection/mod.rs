//! Character-weighted projections onto isotypic components.
//!
//! For each representative of an orbit of combinatorial objects, the block
//!
//! ```math
//!     B = \sum_{g \in \Gamma} \chi(g)\, \phi(g)
//! ```
//!
//! of the projection matrix is accumulated row by row, where `$\phi(g)$` is
//! the permutation matrix of `$g$` on the orbit and `$\chi$` is the
//! character. Each `$\phi(g)$` being a permutation matrix, the row
//! corresponding to an orbit element `$f$` receives a contribution
//! `$\chi(g)$` in the column `$g(f)$` for every `$g \in \Gamma$`; summing
//! class by class and skipping classes on which the character vanishes keeps
//! the work proportional to the total size of the contributing classes.

use anyhow;
use derive_builder::Builder;
use indexmap::IndexSet;
use log;
use ndarray::Array1;
use num::{BigInt, BigRational};
use num_traits::{Signed, Zero};

use crate::group::orbit::{orbit, Permutable};
use crate::io::IsotypicSink;
use crate::linalg::rowspace::RowspaceTracker;
use crate::permutation::Permutation;
use crate::sparse::{SparseIsotypicBasis, SparseSet, SparseSimplexVector};

pub mod verify;
pub use verify::spans_invariant_subspace;

#[cfg(test)]
mod projection_tests;

/// A character-weighted projection of a permutation action, set up once per
/// (group, character) pair and applicable to any family of orbit
/// representatives of the induced action.
///
/// The group itself is never enumerated here: the orbit structure comes from
/// the generators, and the projection sums run over the supplied conjugacy
/// classes only.
#[derive(Builder, Clone)]
#[builder(build_fn(validate = "Self::validate"))]
pub struct CharacterProjection<'a> {
    /// The order of the acting group. Must equal the sum of the conjugacy
    /// class sizes; this is a caller contract and is not separately verified.
    order: usize,

    /// The generators of the acting group.
    generators: &'a [Permutation],

    /// The conjugacy classes of the acting group, class 0 containing the
    /// identity. Within each class, elements are iterated in the order given,
    /// so a fixed input yields a fixed arithmetic path and a reproducible
    /// output order.
    conjugacy_classes: &'a [Vec<Permutation>],

    /// One exact character value per conjugacy class.
    character: &'a [BigRational],
}

impl<'a> CharacterProjectionBuilder<'a> {
    fn validate(&self) -> Result<(), String> {
        let order = self
            .order
            .ok_or_else(|| "The group order has not been set.".to_string())?;
        if order == 0 {
            return Err("The group order must be positive.".to_string());
        }
        let conjugacy_classes = self
            .conjugacy_classes
            .ok_or_else(|| "The conjugacy classes have not been set.".to_string())?;
        let character = self
            .character
            .ok_or_else(|| "The character has not been set.".to_string())?;
        if character.len() != conjugacy_classes.len() {
            return Err(format!(
                "The character has {} value(s), but the group has {} conjugacy class(es).",
                character.len(),
                conjugacy_classes.len()
            ));
        }
        // The identically zero character is legal and yields empty outputs,
        // but a nonzero character must not vanish at the identity, since the
        // normalisation constant χ(e)/|Γ| would zero every emitted
        // coefficient.
        if !character.iter().all(|x| x.is_zero()) && character[0].is_zero() {
            return Err(
                "The character vanishes at the identity but not everywhere.".to_string(),
            );
        }
        Ok(())
    }
}

impl<'a> CharacterProjection<'a> {
    /// Returns a builder to construct a new character projection.
    pub fn builder() -> CharacterProjectionBuilder<'a> {
        CharacterProjectionBuilder::default()
    }

    /// The normalisation constant `$\chi(e) / |\Gamma|$`.
    fn normalisation(&self) -> BigRational {
        &self.character[0] / BigRational::from_integer(BigInt::from(self.order))
    }

    /// Computes a basis of the isotypic component of the character, one
    /// independent family per orbit.
    ///
    /// For each orbit representative, the orbit of the induced action is
    /// enumerated and indexed, the character-weighted projection of every
    /// orbit element is formed in the orbit's local coordinates, and only
    /// projections that increase the rowspace seen so far are kept. Accepted
    /// rows are integer-snapped, rescaled by `$\chi(e)/|\Gamma|$` and
    /// re-expressed over the orbit elements themselves.
    ///
    /// Orbits are processed independently: distinct orbits contribute to
    /// orthogonal coordinate blocks, so no cross-orbit independence check is
    /// needed.
    ///
    /// # Arguments
    ///
    /// * `orbit_representatives` - One combinatorial object per orbit of the
    ///   induced action.
    /// * `sink` - An optional output channel. When present, accepted vectors
    ///   are streamed to it in discovery order and the returned basis is
    ///   empty.
    ///
    /// # Returns
    ///
    /// The linearly independent basis vectors, in discovery order.
    pub fn basis(
        &self,
        orbit_representatives: &[SparseSet],
        mut sink: Option<&mut dyn IsotypicSink>,
    ) -> Result<SparseIsotypicBasis, anyhow::Error> {
        let mut basis_hash_vectors = SparseIsotypicBasis::new();
        let c0_ord = self.normalisation();
        let one_half = BigRational::new(BigInt::from(1), BigInt::from(2));

        // One scratch set receives every permutation image in the hot loop.
        // Sequential processing guarantees no reader ever observes it
        // mid-mutation; any future parallelisation needs one scratch per
        // worker.
        let mut working_set = SparseSet::default();

        for orep in orbit_representatives {
            // The rows and columns of the block B are indexed by the orbit of
            // orep, in discovery order.
            let face_orbit = orbit(self.generators, orep);
            log::debug!(
                "Projecting an orbit of size {} for a group of order {}.",
                face_orbit.len(),
                self.order
            );
            let mut tracker = RowspaceTracker::new(face_orbit.len());

            // For each potential new row of the block B, check if it is
            // linearly independent from what is already there.
            for f in &face_orbit {
                let mut new_sparse_eq = Array1::<BigRational>::zeros(face_orbit.len());
                for (i, class) in self.conjugacy_classes.iter().enumerate() {
                    if self.character[i].is_zero() {
                        continue;
                    }
                    for g in class {
                        f.permute_to(g, &mut working_set);
                        let index =
                            face_orbit.get_index_of(&working_set).unwrap_or_else(|| {
                                panic!(
                                    "The image {working_set} of {f} under {g} escapes the orbit of {orep}."
                                )
                            });
                        let accumulated = &new_sparse_eq[index] + &self.character[i];
                        new_sparse_eq[index] = accumulated;
                    }
                }

                if tracker.test_and_add(&new_sparse_eq) {
                    let mut new_hash_eq = SparseSimplexVector::new();
                    for (index, entry) in new_sparse_eq.iter().enumerate() {
                        if entry.is_zero() {
                            continue;
                        }
                        // The theoretical value of each entry is an integer;
                        // snapping before the χ(e)/|Γ| rescale recovers it
                        // exactly even if the accumulation path introduced
                        // residual imprecision.
                        let snapped = (entry + &one_half).floor();
                        assert!(
                            (&snapped - entry).abs() < one_half,
                            "The projection entry {entry} is not within 1/2 of an integer."
                        );
                        let key = face_orbit
                            .get_index(index)
                            .expect("An indexed orbit element cannot be retrieved.")
                            .clone();
                        new_hash_eq.insert(key, snapped * &c0_ord);
                    }
                    if let Some(sink) = sink.as_deref_mut() {
                        sink.emit_vector(&new_hash_eq)?;
                    } else {
                        basis_hash_vectors.push(new_hash_eq);
                    }
                }
            }
        }
        Ok(basis_hash_vectors)
    }

    /// Computes the full, possibly dependent, projected family of every orbit
    /// element, or only the set of combinatorial objects that can carry a
    /// nonzero projected coefficient.
    ///
    /// This is the unfiltered sibling of [`Self::basis`]: no rank filtering
    /// is performed and the coefficients are rescaled by `$\chi(e)/|\Gamma|$`
    /// without integer snapping. A consecutive-duplicate guard skips a vector
    /// identical to the immediately preceding one; non-adjacent duplicates
    /// are not filtered.
    ///
    /// # Arguments
    ///
    /// * `orbit_representatives` - One combinatorial object per orbit of the
    ///   induced action.
    /// * `calculate_support` - If `true`, accumulate the support set and emit
    ///   no spanning vectors; if `false`, the converse. The two outputs are
    ///   mutually exclusive per call.
    /// * `sink` - An optional output channel. When present, spanning vectors
    ///   (or the final support set) are streamed to it and the corresponding
    ///   in-memory output stays empty.
    ///
    /// # Returns
    ///
    /// The spanning vectors and the support set; one of the two is empty
    /// depending on `calculate_support`.
    pub fn spanning_set_and_support(
        &self,
        orbit_representatives: &[SparseSet],
        calculate_support: bool,
        mut sink: Option<&mut dyn IsotypicSink>,
    ) -> Result<(Vec<SparseSimplexVector>, IndexSet<SparseSet>), anyhow::Error> {
        let mut spanning_hash_vectors = Vec::<SparseSimplexVector>::new();
        let mut support = IndexSet::<SparseSet>::new();
        let c0_ord = self.normalisation();

        let mut working_set = SparseSet::default();

        let mut old_hash_eq = SparseSimplexVector::new();
        for orep in orbit_representatives {
            for f in &orbit(self.generators, orep) {
                let mut new_hash_eq = SparseSimplexVector::new();
                for (i, class) in self.conjugacy_classes.iter().enumerate() {
                    if self.character[i].is_zero() {
                        continue;
                    }
                    let weight = &self.character[i] * &c0_ord;
                    for g in class {
                        f.permute_to(g, &mut working_set);
                        new_hash_eq.add_assign_at(&working_set, &weight);
                    }
                }
                // Guard against the most trivial repetition.
                if new_hash_eq == old_hash_eq {
                    continue;
                }
                old_hash_eq = new_hash_eq.clone();
                if calculate_support {
                    for (key, _) in old_hash_eq.iter() {
                        support.insert(key.clone());
                    }
                } else if let Some(sink) = sink.as_deref_mut() {
                    sink.emit_vector(&new_hash_eq)?;
                } else {
                    spanning_hash_vectors.push(new_hash_eq);
                }
            }
        }

        if calculate_support {
            if let Some(sink) = sink.as_deref_mut() {
                sink.emit_support(&support)?;
            }
        }
        Ok((spanning_hash_vectors, support))
    }
}
