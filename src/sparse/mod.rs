//! Hash-keyed sparse structures for combinatorial group actions.
//!
//! The types here form the coordinate system of the engine: group elements
//! relabel [`SparseSet`]s, and isotypic vectors are default-zero maps from
//! [`SparseSet`]s to exact rational coefficients.

use std::collections::BTreeMap;
use std::fmt;

use itertools::Itertools;
use num::BigRational;
use num_traits::Zero;

use crate::group::orbit::Permutable;
use crate::permutation::Permutation;


/// A finite set of integer point-labels on which a group acts by relabelling.
///
/// Labels are kept sorted and deduplicated, so equality, hashing and ordering
/// are structural. This is required because sets are used as keys of
/// [`SparseSimplexVector`]s and as members of orbit sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SparseSet(Vec<usize>);

impl SparseSet {
    /// Constructs a set from an arbitrary collection of labels, sorting and
    /// deduplicating them.
    pub fn from_labels<I: IntoIterator<Item = usize>>(labels: I) -> Self {
        let mut labels = labels.into_iter().collect::<Vec<usize>>();
        labels.sort_unstable();
        labels.dedup();
        Self(labels)
    }

    pub fn contains(&self, label: usize) -> bool {
        self.0.binary_search(&label).is_ok()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Iterates over the labels in ascending order.
    pub fn iter(&self) -> impl Iterator<Item = &usize> {
        self.0.iter()
    }

    /// Removes all labels, retaining the allocation so that the set can be
    /// reused as a scratch buffer in hot loops.
    pub fn clear(&mut self) {
        self.0.clear();
    }

    /// Returns the image of this set under a permutation as a fresh set.
    pub fn permuted(&self, perm: &Permutation) -> Self {
        let mut out = Self::default();
        self.permute_to(perm, &mut out);
        out
    }
}

impl FromIterator<usize> for SparseSet {
    fn from_iter<I: IntoIterator<Item = usize>>(iter: I) -> Self {
        Self::from_labels(iter)
    }
}

impl Permutable for SparseSet {
    /// Writes the image of `self` under `perm` into `out` without allocating,
    /// provided `out` has sufficient capacity from earlier reuse.
    fn permute_to(&self, perm: &Permutation, out: &mut Self) {
        out.0.clear();
        out.0.extend(self.0.iter().map(|&label| perm.act(label)));
        out.0.sort_unstable();
    }
}

impl fmt::Display for SparseSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{{{}}}", self.0.iter().join(" "))
    }
}

/// A vector of the permutation module in the natural (facet-indicator)
/// coordinate system: a default-zero mapping from [`SparseSet`] to exact
/// rational coefficient.
///
/// Entries with zero coefficient are never materialised. The backing map is
/// ordered by key so that iteration, display and hashing are deterministic,
/// which in turn lets whole vectors be members of orbit sets.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct SparseSimplexVector(BTreeMap<SparseSet, BigRational>);

impl SparseSimplexVector {
    pub fn new() -> Self {
        Self::default()
    }

    /// The coefficient of `key`, which is zero for absent keys.
    pub fn coefficient(&self, key: &SparseSet) -> BigRational {
        self.0.get(key).cloned().unwrap_or_else(BigRational::zero)
    }

    /// Sets the coefficient of `key`, removing the entry if `value` is zero.
    pub fn insert(&mut self, key: SparseSet, value: BigRational) {
        if value.is_zero() {
            self.0.remove(&key);
        } else {
            self.0.insert(key, value);
        }
    }

    /// Adds `delta` to the coefficient of `key`, removing the entry if the
    /// sum vanishes.
    pub fn add_assign_at(&mut self, key: &SparseSet, delta: &BigRational) {
        let updated = self.coefficient(key) + delta;
        self.insert(key.clone(), updated);
    }

    /// Iterates over the nonzero entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&SparseSet, &BigRational)> {
        self.0.iter()
    }

    /// The number of nonzero entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl FromIterator<(SparseSet, BigRational)> for SparseSimplexVector {
    fn from_iter<I: IntoIterator<Item = (SparseSet, BigRational)>>(iter: I) -> Self {
        let mut vector = Self::new();
        for (key, value) in iter {
            vector.insert(key, value);
        }
        vector
    }
}

impl Permutable for SparseSimplexVector {
    fn permute_to(&self, perm: &Permutation, out: &mut Self) {
        out.0.clear();
        for (key, value) in &self.0 {
            out.0.insert(key.permuted(perm), value.clone());
        }
    }
}

impl fmt::Display for SparseSimplexVector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{{{}}}",
            self.0
                .iter()
                .map(|(key, value)| format!("({key} {value})"))
                .join(" ")
        )
    }
}

/// An ordered family of sparse isotypic vectors, in discovery order.
pub type SparseIsotypicBasis = Vec<SparseSimplexVector>;
