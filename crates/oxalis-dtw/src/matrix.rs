//! Dense cost matrix shared by the local and accumulated outputs.

use std::ops::Index;

use crate::error::DtwError;

/// Row-major `rows x cols` grid of cost values.
///
/// Both the local and accumulated cost matrices use this representation.
/// Cells are addressable by `(row, col)` so arbitrary plotting or analysis
/// consumers can walk the grid without knowing its storage layout.
#[derive(Debug, Clone, PartialEq)]
pub struct CostMatrix {
    rows: usize,
    cols: usize,
    data: Vec<f64>,
}

impl CostMatrix {
    /// Build a matrix from row-major data.
    ///
    /// # Errors
    ///
    /// Returns [`DtwError::ShapeMismatch`] when `data.len() != rows * cols`.
    /// A zero-by-zero matrix is representable (with empty data) so that
    /// downstream code can be exercised against the degenerate case.
    pub fn from_vec(rows: usize, cols: usize, data: Vec<f64>) -> Result<Self, DtwError> {
        if data.len() != rows * cols {
            return Err(DtwError::ShapeMismatch { rows, cols, len: data.len() });
        }
        Ok(Self { rows, cols, data })
    }

    /// Internal constructor for pre-validated data.
    pub(crate) fn from_raw(rows: usize, cols: usize, data: Vec<f64>) -> Self {
        debug_assert_eq!(data.len(), rows * cols);
        Self { rows, cols, data }
    }

    /// Number of rows.
    #[must_use]
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    #[must_use]
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// True when the matrix has zero rows or zero columns.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows == 0 || self.cols == 0
    }

    /// Value at `(row, col)`.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows` or `col >= cols`.
    #[must_use]
    pub fn get(&self, row: usize, col: usize) -> f64 {
        assert!(row < self.rows, "row index {row} out of bounds for {} rows", self.rows);
        assert!(col < self.cols, "column index {col} out of bounds for {} columns", self.cols);
        self.data[row * self.cols + col]
    }

    /// Borrow a single row as a slice.
    ///
    /// # Panics
    ///
    /// Panics if `row >= rows`.
    #[must_use]
    pub fn row(&self, row: usize) -> &[f64] {
        assert!(row < self.rows, "row index {row} out of bounds for {} rows", self.rows);
        &self.data[row * self.cols..(row + 1) * self.cols]
    }

    /// Iterate over `(row, col, value)` in row-major order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, usize, f64)> + '_ {
        (0..self.rows).flat_map(move |r| {
            (0..self.cols).map(move |c| (r, c, self.data[r * self.cols + c]))
        })
    }
}

impl Index<(usize, usize)> for CostMatrix {
    type Output = f64;

    fn index(&self, (row, col): (usize, usize)) -> &Self::Output {
        assert!(row < self.rows && col < self.cols, "index ({row}, {col}) out of bounds");
        &self.data[row * self.cols + col]
    }
}
