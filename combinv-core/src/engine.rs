//! Incremental inversion of the active submatrix.
//!
//! The active submatrix holds the rows and columns of the universe matrix
//! picked out by the current selection. Swapping one selected item for
//! another replaces one row and one column, which two Sherman–Morrison
//! updates translate into the new inverse without refactorising.

use nalgebra::{DMatrix, DVector, RowDVector};

use crate::dense::{all_finite, col_map, max_abs_diff, row_map, submatrix};
use crate::error::EngineError;
use crate::index_map::IndexMap;
use crate::rank_one::sherman_morrison_update;
use crate::selection::{Replacement, Selection};

/// Active submatrix and its inverse, kept in step across single-item swaps.
#[derive(Clone, Debug)]
pub struct IncrementalInverse<'a> {
    universe: &'a DMatrix<f64>,
    map: IndexMap,
    matrix: DMatrix<f64>,
    inverse: DMatrix<f64>,
}

impl<'a> IncrementalInverse<'a> {
    /// Build the submatrix for `selection` and invert it directly.
    pub fn new(universe: &'a DMatrix<f64>, selection: &Selection) -> Result<Self, EngineError> {
        let (rows, cols) = universe.shape();
        let width = selection.width();
        if rows != cols || rows != width as usize {
            return Err(EngineError::DimensionMismatch { rows, cols, width });
        }
        let map = IndexMap::from_selection(selection);
        let matrix = submatrix(universe, map.backward());
        let inverse = matrix.clone().try_inverse().ok_or(EngineError::Singular)?;
        Ok(Self {
            universe,
            map,
            matrix,
            inverse,
        })
    }

    /// Move to `next`, which must differ from the current selection by at
    /// most one swapped item. Returns the swap, or `None` if nothing changed.
    pub fn advance_to(&mut self, next: &Selection) -> Result<Option<Replacement>, EngineError> {
        let Some(replacement) = self.selection().replacement_to(next)? else {
            return Ok(None);
        };
        self.replace(replacement)?;
        Ok(Some(replacement))
    }

    /// Swap `removed` out of the selection and `added` in, updating the
    /// submatrix and its inverse. Returns the local slot that changed.
    pub fn replace(&mut self, replacement: Replacement) -> Result<usize, EngineError> {
        let slot = self.map.swap(replacement)?;
        let added = replacement.added;
        let k = self.map.len();

        // Replacement row and column, indexed through the updated map.
        let new_row = row_map(self.universe, added, self.map.backward());
        let new_col = col_map(self.universe, added, self.map.backward());

        // Row swap: A + e_p (new_row - row_p).
        let u_row = DVector::<f64>::from_fn(k, |i, _| if i == slot { 1.0 } else { 0.0 });
        let v_row: RowDVector<f64> = &new_row - &self.matrix.row(slot);
        sherman_morrison_update(&mut self.inverse, &u_row, &v_row);
        self.matrix.set_row(slot, &new_row);

        // Column swap on the row-updated matrix: A + (new_col - col_p) e_p^T.
        let u_col: DVector<f64> = &new_col - &self.matrix.column(slot);
        let v_col = RowDVector::<f64>::from_fn(k, |_, j| if j == slot { 1.0 } else { 0.0 });
        sherman_morrison_update(&mut self.inverse, &u_col, &v_col);
        self.matrix.set_column(slot, &new_col);

        debug_assert!(self.map.is_consistent());
        Ok(slot)
    }

    pub fn selection(&self) -> Selection {
        self.map.selection()
    }

    pub fn index_map(&self) -> &IndexMap {
        &self.map
    }

    /// The active submatrix.
    pub fn matrix(&self) -> &DMatrix<f64> {
        &self.matrix
    }

    /// The maintained inverse of the active submatrix.
    pub fn inverse(&self) -> &DMatrix<f64> {
        &self.inverse
    }

    pub fn is_finite(&self) -> bool {
        all_finite(&self.inverse)
    }

    /// Invert the active submatrix from scratch.
    pub fn direct_inverse(&self) -> Option<DMatrix<f64>> {
        self.matrix.clone().try_inverse()
    }

    /// Largest entrywise gap between the maintained and the direct inverse,
    /// relative to the largest direct entry (or absolute when that is below 1).
    /// `None` if the active submatrix is singular.
    pub fn max_deviation(&self) -> Option<f64> {
        self.direct_inverse()
            .map(|direct| max_abs_diff(&direct, &self.inverse) / direct.amax().max(1.0))
    }
}
