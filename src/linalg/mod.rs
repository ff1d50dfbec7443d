//! Exact dense linear algebra over the rationals.
//!
//! The matrices involved in isotypic projections are local to one orbit at a
//! time and therefore small; a straightforward Gaussian elimination in exact
//! arithmetic is all that is needed. No floating-point state is involved
//! anywhere, so there are no thresholds and no pivot-magnitude concerns.

use std::collections::HashSet;

use log;
use ndarray::{s, Array1, Array2, Axis, Zip};
use num::BigRational;
use num_traits::{One, Zero};

pub mod rowspace;


/// Converts a matrix into its unique reduced row echelon form using Gaussian
/// elimination over the rationals.
///
/// # Arguments
///
/// * `mat` - A rectangular matrix.
///
/// # Returns
///
/// * The reduced row echelon form of `mat`.
/// * The nullity of `mat`.
pub fn rref(mat: &Array2<BigRational>) -> (Array2<BigRational>, usize) {
    let mut mat = mat.clone();
    let nrows = mat.nrows();
    let ncols = mat.ncols();
    let mut rank = 0usize;

    let mut pivot_row = 0usize;
    let mut pivot_col = 0usize;

    while pivot_row < nrows && pivot_col < ncols {
        // Find the pivot in column pivot_col.
        let rel_i_nonzero_option = mat
            .slice(s![pivot_row.., pivot_col])
            .iter()
            .position(|x| !x.is_zero());
        if let Some(rel_i_nonzero) = rel_i_nonzero_option {
            if rel_i_nonzero > 0 {
                // Swap row pivot_row with row (pivot_row + rel_i_nonzero).
                let (mut mat_above, mut mat_below) =
                    mat.view_mut().split_at(Axis(0), pivot_row + 1);
                let row_from = mat_above.slice_mut(s![pivot_row, ..]);
                let row_to = mat_below.slice_mut(s![rel_i_nonzero - 1, ..]);
                Zip::from(row_from).and(row_to).for_each(std::mem::swap);
            }

            // Scale all elements in the pivot row to make the pivot element unity.
            let pivot_val = mat[(pivot_row, pivot_col)].clone();
            for j in pivot_col..ncols {
                let scaled = &mat[(pivot_row, j)] / &pivot_val;
                mat[(pivot_row, j)] = scaled;
            }

            // Eliminate below the pivot.
            for i in (pivot_row + 1)..nrows {
                debug_assert!(mat[(pivot_row, pivot_col)].is_one());
                let f = mat[(i, pivot_col)].clone();
                // row_i -= f * pivot_row
                mat[(i, pivot_col)] = BigRational::zero();
                for j in (pivot_col + 1)..ncols {
                    let reduced = &mat[(i, j)] - &mat[(pivot_row, j)] * &f;
                    mat[(i, j)] = reduced;
                }
            }

            // Eliminate above the pivot.
            for i in (0..pivot_row).rev() {
                debug_assert!(mat[(pivot_row, pivot_col)].is_one());
                let f = mat[(i, pivot_col)].clone();
                // row_i -= f * pivot_row
                mat[(i, pivot_col)] = BigRational::zero();
                for j in (pivot_col + 1)..ncols {
                    let reduced = &mat[(i, j)] - &mat[(pivot_row, j)] * &f;
                    mat[(i, j)] = reduced;
                }
            }

            // Pivot column increases rank.
            pivot_row += 1;
            pivot_col += 1;
            rank += 1;
        } else {
            // No pivot in this column; pass to next column.
            pivot_col += 1;
        }
    }
    (mat, ncols - rank)
}

/// Determines a basis for the kernel of a matrix via Gaussian elimination
/// over the rationals.
///
/// The kernel of an `$m \times n$` matrix `$\mathbf{M}$` is the space of the
/// solutions to the equation
///
/// ```math
///     \mathbf{M} \mathbf{x} = \mathbf{0},
/// ```
///
/// where `$\mathbf{x}$` is an `$n \times 1$` column vector.
///
/// # Arguments
///
/// * `mat` - A rectangular matrix.
///
/// # Returns
///
/// A matrix whose rows form a basis for the kernel of `mat`. The matrix has
/// zero rows if `mat` has full column rank.
pub fn null_space(mat: &Array2<BigRational>) -> Array2<BigRational> {
    let (mat_rref, nullity) = rref(mat);
    let ncols = mat.ncols();
    let pivot_cols: Vec<usize> = mat_rref
        .axis_iter(Axis(0))
        .filter_map(|row| row.iter().position(|x| !x.is_zero()))
        .collect();
    let rank = ncols - nullity;
    assert_eq!(rank, pivot_cols.len());
    log::debug!("Rank: {rank}");
    log::debug!("Kernel dim: {nullity}");

    let pivot_cols_set = pivot_cols.iter().copied().collect::<HashSet<_>>();
    let mut kernel = Array2::<BigRational>::zeros((nullity, ncols));
    for (kernel_row, non_pivot_col) in (0..ncols)
        .filter(|col| !pivot_cols_set.contains(col))
        .enumerate()
    {
        kernel[(kernel_row, non_pivot_col)] = BigRational::one();
        for (i, &pivot_col) in pivot_cols.iter().enumerate() {
            kernel[(kernel_row, pivot_col)] = -mat_rref[(i, non_pivot_col)].clone();
        }
    }
    kernel
}

/// Computes the matrix–vector product `mat · vector` in exact arithmetic.
///
/// # Panics
///
/// Panics if the number of columns of `mat` differs from the length of
/// `vector`.
pub fn matvec(mat: &Array2<BigRational>, vector: &Array1<BigRational>) -> Array1<BigRational> {
    assert_eq!(
        mat.ncols(),
        vector.len(),
        "Incompatible dimensions for a matrix-vector product."
    );
    mat.axis_iter(Axis(0))
        .map(|row| {
            row.iter()
                .zip(vector.iter())
                .map(|(a, b)| a * b)
                .sum::<BigRational>()
        })
        .collect::<Array1<BigRational>>()
}

/// Returns `true` if every entry of `vector` is zero. An empty vector is
/// zero.
pub fn is_zero_vector(vector: &Array1<BigRational>) -> bool {
    vector.iter().all(|x| x.is_zero())
}
