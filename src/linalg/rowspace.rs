//! Incremental maintenance of a rowspace and its complementary kernel.

use ndarray::{Array1, Array2};
use num::BigRational;

use crate::linalg::{is_zero_vector, matvec, null_space};

#[cfg(test)]
#[path = "rowspace_tests.rs"]
mod rowspace_tests;

/// Tracks a growing matrix of accepted rows together with the complementary
/// kernel of its rowspace.
///
/// A candidate row lies in the rowspace already accepted if and only if it is
/// orthogonal to every kernel row, so testing a candidate costs one
/// matrix–vector product against the kernel instead of a refactorisation of
/// the accepted matrix. The kernel is only recomputed when a candidate is
/// actually accepted.
///
/// Invariants: `kernel · accepted^T = 0` at all times, and the ranks of the
/// two matrices sum to the ambient dimension.
pub struct RowspaceTracker {
    /// The linearly independent rows accepted so far.
    accepted: Array2<BigRational>,

    /// A basis for the kernel of [`Self::accepted`]. Before any row is
    /// accepted, this is the full identity.
    kernel: Array2<BigRational>,
}

impl RowspaceTracker {
    /// Creates a tracker over an ambient space of dimension `dim` with no
    /// accepted rows.
    pub fn new(dim: usize) -> Self {
        Self {
            accepted: Array2::zeros((0, dim)),
            kernel: Array2::eye(dim),
        }
    }

    /// The ambient dimension of the tracked rowspace.
    pub fn dim(&self) -> usize {
        self.accepted.ncols()
    }

    /// The number of rows accepted so far.
    pub fn rank(&self) -> usize {
        self.accepted.nrows()
    }

    /// The accepted rows.
    pub fn accepted(&self) -> &Array2<BigRational> {
        &self.accepted
    }

    /// A basis for the kernel of the accepted rowspace.
    pub fn kernel(&self) -> &Array2<BigRational> {
        &self.kernel
    }

    /// Tests `candidate` for linear independence from the accepted rows and,
    /// if independent, appends it.
    ///
    /// Returns `true` if the candidate increased the rowspace and was
    /// appended, and `false` if it already lay inside the accepted rowspace,
    /// in which case the state is unchanged. All-zero candidates are always
    /// rejected by the same test.
    ///
    /// # Panics
    ///
    /// Panics if the length of `candidate` differs from [`Self::dim`].
    pub fn test_and_add(&mut self, candidate: &Array1<BigRational>) -> bool {
        assert_eq!(
            candidate.len(),
            self.dim(),
            "The candidate does not live in the tracked space."
        );
        if is_zero_vector(&matvec(&self.kernel, candidate)) {
            return false;
        }
        self.accepted
            .push_row(candidate.view())
            .expect("Unable to append an accepted row.");
        self.kernel = null_space(&self.accepted);
        true
    }
}
