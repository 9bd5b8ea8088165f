//! Cost-matrix construction via the classic DTW dynamic program.

use tracing::instrument;

use crate::distance::{AlignmentCost, PointDistance};
use crate::error::DtwError;
use crate::matrix::CostMatrix;
use crate::series::SeriesView;

/// Output of [`Dtw::cost_matrices`].
///
/// Both matrices share the trimmed `(m-1) x (n-1)` shape for inputs of
/// length `m` and `n`; cell `(i, j)` refers to sample `i + 1` of the first
/// series against sample `j + 1` of the second. `distance` is the minimal
/// total alignment cost, equal to the bottom-right accumulated cell.
#[derive(Debug, Clone)]
pub struct CostMatrices {
    /// Pointwise distances over the interior cells.
    pub local: CostMatrix,
    /// Minimal cumulative cost to reach each interior cell from the origin.
    pub accumulated: CostMatrix,
    /// Minimal total alignment cost between the two full series.
    pub distance: AlignmentCost,
}

/// Immutable DTW configuration. Thread-safe and copyable.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Dtw {
    distance: PointDistance,
}

impl Dtw {
    /// Create a DTW calculator with the default absolute-difference distance.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a DTW calculator with an explicit pointwise distance.
    #[must_use]
    pub fn with_distance(distance: PointDistance) -> Self {
        Self { distance }
    }

    /// Return the configured pointwise distance.
    #[must_use]
    pub fn distance(&self) -> PointDistance {
        self.distance
    }

    /// Build the local and accumulated cost matrices for a pair of series.
    ///
    /// Fills a full `m x n` working grid with cell `(0, 0)` anchored at zero
    /// and the rest of row 0 and column 0 held at infinity, so every valid
    /// path is forced through the origin. Each interior cell accumulates its
    /// local cost plus the cheapest of its three predecessors (above, left,
    /// diagonal). The boundary row and column are then trimmed away, leaving
    /// two `(m-1) x (n-1)` matrices.
    ///
    /// Runs in O(m * n) time and space. Deterministic, no side effects.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::SeriesTooShort`] | Either input has fewer than 2 samples |
    #[instrument(skip(s, t), fields(m = s.len(), n = t.len()))]
    pub fn cost_matrices(
        &self,
        s: SeriesView<'_>,
        t: SeriesView<'_>,
    ) -> Result<CostMatrices, DtwError> {
        let m = s.len();
        let n = t.len();
        if m < 2 {
            return Err(DtwError::SeriesTooShort { len: m });
        }
        if n < 2 {
            return Err(DtwError::SeriesTooShort { len: n });
        }

        let a = s.as_slice();
        let b = t.as_slice();

        // Full working grid, row-major. Infinity everywhere except the
        // origin anchor, which every path must pass through.
        let mut grid = vec![f64::INFINITY; m * n];
        grid[0] = 0.0;

        let mut local = vec![0.0; (m - 1) * (n - 1)];

        for i in 1..m {
            for j in 1..n {
                let cost = self.distance.eval(a[i], b[j]);
                local[(i - 1) * (n - 1) + (j - 1)] = cost;

                let above = grid[(i - 1) * n + j];
                let left = grid[i * n + (j - 1)];
                let diag = grid[(i - 1) * n + (j - 1)];
                grid[i * n + j] = cost + above.min(left).min(diag);
            }
        }

        let min_distance = grid[m * n - 1];

        // Trim the boundary row and column.
        let mut accumulated = Vec::with_capacity((m - 1) * (n - 1));
        for i in 1..m {
            accumulated.extend_from_slice(&grid[i * n + 1..(i + 1) * n]);
        }

        Ok(CostMatrices {
            local: CostMatrix::from_raw(m - 1, n - 1, local),
            accumulated: CostMatrix::from_raw(m - 1, n - 1, accumulated),
            distance: AlignmentCost::new(min_distance),
        })
    }
}
