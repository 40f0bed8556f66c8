//! Sherman–Morrison rank-1 inverse update.
//!
//! Given `inv = A^-1`, computes `(A + u v)^-1` as
//! `inv - (inv u)(v inv) / (1 + v inv u)` in O(n^2).
//!
//! Sherman, J.; Morrison, W. J. (1949). "Adjustment of an Inverse Matrix
//! Corresponding to Changes in the Elements of a Given Column or a Given Row
//! of the Original Matrix". Annals of Mathematical Statistics 20: 621.

use nalgebra::{DMatrix, DVector, RowDVector};

/// Update `inv` in place to the inverse of `A + u v`.
///
/// Returns the denominator `1 + v inv u`. When it is zero the updated
/// matrix is singular and `inv` fills with non-finite values; nothing here
/// tries to detect or recover from that.
pub fn sherman_morrison_update(
    inv: &mut DMatrix<f64>,
    u: &DVector<f64>,
    v: &RowDVector<f64>,
) -> f64 {
    let inv_u: DVector<f64> = &*inv * u;
    let v_inv: RowDVector<f64> = v * &*inv;
    let denom = 1.0 + v_inv.dot(&u.transpose());
    inv.ger(-1.0 / denom, &inv_u, &v_inv.transpose(), 1.0);
    denom
}

/// Out-of-place variant of [`sherman_morrison_update`].
pub fn sherman_morrison(inv: &DMatrix<f64>, u: &DVector<f64>, v: &RowDVector<f64>) -> DMatrix<f64> {
    let mut updated = inv.clone();
    sherman_morrison_update(&mut updated, u, v);
    updated
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dense::max_abs_diff;

    #[test]
    fn test_matches_direct_inverse() {
        let a = DMatrix::from_row_slice(3, 3, &[4.0, 1.0, 0.5, 1.0, 3.0, 0.2, 0.5, 0.2, 2.0]);
        let inv = a.clone().try_inverse().unwrap();
        let u = DVector::from_column_slice(&[0.3, -0.1, 0.7]);
        let v = RowDVector::from_row_slice(&[0.2, 0.4, -0.5]);

        let updated = sherman_morrison(&inv, &u, &v);
        let expected = (a + &u * &v).try_inverse().unwrap();
        assert!(max_abs_diff(&updated, &expected) < 1e-12);
    }

    #[test]
    fn test_zero_perturbation_is_identity() {
        let a = DMatrix::from_row_slice(2, 2, &[2.0, 1.0, 1.0, 3.0]);
        let mut inv = a.try_inverse().unwrap();
        let before = inv.clone();
        let denom = sherman_morrison_update(&mut inv, &DVector::zeros(2), &RowDVector::zeros(2));
        assert_eq!(denom, 1.0);
        assert_eq!(inv, before);
    }

    #[test]
    fn test_singular_update_goes_non_finite() {
        // A = I, u v = -e0 e0^T makes A + u v singular.
        let mut inv = DMatrix::<f64>::identity(2, 2);
        let u = DVector::from_column_slice(&[1.0, 0.0]);
        let v = RowDVector::from_row_slice(&[-1.0, 0.0]);
        let denom = sherman_morrison_update(&mut inv, &u, &v);
        assert_eq!(denom, 0.0);
        assert!(!crate::dense::all_finite(&inv));
    }
}
