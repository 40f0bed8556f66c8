//! Dense-matrix helpers for pulling submatrices out of a universe matrix.

use nalgebra::{DMatrix, DVector, RowDVector};
use rand::Rng;

/// Row `row` of `m`, keeping only the columns listed in `columns` (in that order).
pub fn row_map(m: &DMatrix<f64>, row: usize, columns: &[usize]) -> RowDVector<f64> {
    RowDVector::from_iterator(columns.len(), columns.iter().map(|&c| m[(row, c)]))
}

/// Column `col` of `m`, keeping only the rows listed in `rows` (in that order).
pub fn col_map(m: &DMatrix<f64>, col: usize, rows: &[usize]) -> DVector<f64> {
    DVector::from_iterator(rows.len(), rows.iter().map(|&r| m[(r, col)]))
}

/// The square submatrix with entry `(i, j) = m[(indices[i], indices[j])]`.
pub fn submatrix(m: &DMatrix<f64>, indices: &[usize]) -> DMatrix<f64> {
    let k = indices.len();
    DMatrix::from_fn(k, k, |i, j| m[(indices[i], indices[j])])
}

/// Square matrix with entries drawn uniformly from `[-1, 1]`.
pub fn random_matrix<R: Rng + ?Sized>(rng: &mut R, n: usize) -> DMatrix<f64> {
    DMatrix::from_fn(n, n, |_, _| rng.gen_range(-1.0..=1.0))
}

/// True when no entry is NaN or infinite.
pub fn all_finite(m: &DMatrix<f64>) -> bool {
    m.iter().all(|x| x.is_finite())
}

/// Largest absolute entrywise difference.
///
/// # Panics
///
/// Panics if `a` and `b` differ in shape.
pub fn max_abs_diff(a: &DMatrix<f64>, b: &DMatrix<f64>) -> f64 {
    assert_eq!(a.shape(), b.shape());
    a.iter()
        .zip(b.iter())
        .fold(0.0f64, |acc, (x, y)| acc.max((x - y).abs()))
}
