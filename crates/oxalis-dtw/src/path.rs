//! Warp-path backtracking over the accumulated-cost matrix.

use tracing::instrument;

use crate::error::DtwError;
use crate::matrix::CostMatrix;

/// One element of a warp path.
///
/// The terminal origin anchor is a distinct variant rather than a fake
/// `(row, col, cost)` triple, so consumers cannot mistake it for a measured
/// cell. Every path ends with exactly one [`PathStep::OriginAnchor`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathStep {
    /// A visited cell of the accumulated-cost matrix.
    Measured {
        /// Row index into the trimmed matrix.
        row: usize,
        /// Column index into the trimmed matrix.
        col: usize,
        /// Accumulated cost at that cell.
        cost: f64,
    },
    /// The untrimmed boundary origin that anchors every alignment. Carries
    /// no cost; it lies outside the trimmed matrix.
    OriginAnchor,
}

impl PathStep {
    /// True for the terminal origin anchor.
    #[must_use]
    pub fn is_anchor(&self) -> bool {
        matches!(self, Self::OriginAnchor)
    }

    /// Return `(row, col)` for a measured step, `None` for the anchor.
    #[must_use]
    pub fn cell(&self) -> Option<(usize, usize)> {
        match *self {
            Self::Measured { row, col, .. } => Some((row, col)),
            Self::OriginAnchor => None,
        }
    }
}

/// Optimal alignment path through the accumulated-cost matrix.
///
/// Steps are ordered **from the end of the alignment to the start**: the
/// first element is the bottom-right matrix corner and the last is the
/// origin anchor. Callers needing forward-time order must reverse it
/// themselves. The path owns its data and holds no reference to the matrix
/// that produced it.
#[derive(Debug, Clone, PartialEq)]
pub struct WarpPath(Vec<PathStep>);

impl WarpPath {
    /// Reconstruct the minimum-cost alignment by backward greedy descent.
    ///
    /// Starts at the bottom-right cell and repeatedly moves to the cheapest
    /// of the three predecessor cells (above, left, diagonal), with a fixed
    /// deterministic tie-break priority of above, then left, then diagonal.
    /// Once row 1 or column 1 is reached the remaining steps are forced:
    /// at row 1 only horizontal moves are taken, at column 1 only vertical
    /// ones. Every forced run ends at cell `(1, 0)`, after which the path
    /// terminates with the origin anchor; row 0 is reachable only when the
    /// matrix itself has a single row.
    ///
    /// # Errors
    ///
    /// | Variant | Condition |
    /// |---|---|
    /// | [`DtwError::EmptyMatrix`] | `accumulated` has zero rows or columns |
    #[instrument(skip(accumulated), fields(rows = accumulated.rows(), cols = accumulated.cols()))]
    pub fn backtrack(accumulated: &CostMatrix) -> Result<Self, DtwError> {
        if accumulated.is_empty() {
            return Err(DtwError::EmptyMatrix);
        }

        let mut row = accumulated.rows() - 1;
        let mut col = accumulated.cols() - 1;

        let mut steps = vec![PathStep::Measured {
            row,
            col,
            cost: accumulated.get(row, col),
        }];

        while row > 0 && col > 0 {
            if row == 1 {
                // Effective top edge: only a horizontal move remains.
                col -= 1;
            } else if col == 1 {
                row -= 1;
            } else {
                let above = accumulated.get(row - 1, col);
                let left = accumulated.get(row, col - 1);
                let diag = accumulated.get(row - 1, col - 1);

                if above <= left && above <= diag {
                    row -= 1;
                } else if left <= diag {
                    col -= 1;
                } else {
                    row -= 1;
                    col -= 1;
                }
            }

            steps.push(PathStep::Measured {
                row,
                col,
                cost: accumulated.get(row, col),
            });
        }

        steps.push(PathStep::OriginAnchor);
        Ok(Self(steps))
    }

    /// The path elements, end-of-alignment first.
    #[must_use]
    pub fn steps(&self) -> &[PathStep] {
        &self.0
    }

    /// Number of elements, including the terminal anchor.
    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Always `false`: a backtracked path has at least one measured step
    /// and the anchor.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<'a> IntoIterator for &'a WarpPath {
    type Item = &'a PathStep;
    type IntoIter = std::slice::Iter<'a, PathStep>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn matrix(rows: usize, cols: usize, data: Vec<f64>) -> CostMatrix {
        CostMatrix::from_vec(rows, cols, data).unwrap()
    }

    fn cells(path: &WarpPath) -> Vec<Option<(usize, usize)>> {
        path.steps().iter().map(PathStep::cell).collect()
    }

    #[test]
    fn empty_matrix_is_rejected() {
        let m = matrix(0, 0, vec![]);
        assert!(matches!(WarpPath::backtrack(&m), Err(DtwError::EmptyMatrix)));
    }

    #[test]
    fn single_cell_matrix_yields_cell_then_anchor() {
        let m = matrix(1, 1, vec![2.5]);
        let path = WarpPath::backtrack(&m).unwrap();
        assert_eq!(
            path.steps(),
            &[
                PathStep::Measured { row: 0, col: 0, cost: 2.5 },
                PathStep::OriginAnchor,
            ]
        );
    }

    #[test]
    fn starts_at_bottom_right_ends_at_anchor() {
        let m = matrix(3, 4, vec![
            0.0, 1.0, 3.0, 6.0,
            1.0, 0.0, 1.0, 3.0,
            3.0, 1.0, 0.0, 1.0,
        ]);
        let path = WarpPath::backtrack(&m).unwrap();
        assert_eq!(path.steps().first().unwrap().cell(), Some((2, 3)));
        assert!(path.steps().last().unwrap().is_anchor());
        // Exactly one anchor, at the end.
        let anchors = path.steps().iter().filter(|s| s.is_anchor()).count();
        assert_eq!(anchors, 1);
    }

    #[test]
    fn steps_never_increase_and_move_by_at_most_one() {
        let m = matrix(4, 4, vec![
            0.0, 2.0, 5.0, 9.0,
            2.0, 1.0, 3.0, 6.0,
            5.0, 3.0, 1.0, 2.0,
            9.0, 6.0, 2.0, 1.0,
        ]);
        let path = WarpPath::backtrack(&m).unwrap();
        let measured: Vec<(usize, usize)> =
            path.steps().iter().filter_map(PathStep::cell).collect();
        for pair in measured.windows(2) {
            let (r0, c0) = pair[0];
            let (r1, c1) = pair[1];
            assert!(r1 <= r0 && c1 <= c0, "coordinate increased: {pair:?}");
            assert!(r0 - r1 <= 1 && c0 - c1 <= 1, "step too large: {pair:?}");
            assert!(r0 - r1 + (c0 - c1) >= 1, "no progress: {pair:?}");
        }
    }

    #[test]
    fn tie_break_prefers_above_then_left() {
        // All-zero matrix: from (2,2) every predecessor ties, so the first
        // move must go up; the i==1 forced rule then walks left.
        let m = matrix(3, 3, vec![0.0; 9]);
        let path = WarpPath::backtrack(&m).unwrap();
        assert_eq!(
            cells(&path),
            vec![Some((2, 2)), Some((1, 2)), Some((1, 1)), Some((1, 0)), None]
        );
    }

    #[test]
    fn interior_left_beats_diagonal_on_tie() {
        // At (2,2): above=5, left=1, diag=1. Left wins the tie, after which
        // the j==1 forced rule walks up.
        let m = matrix(3, 3, vec![
            0.0, 9.0, 9.0,
            9.0, 1.0, 5.0,
            9.0, 1.0, 2.0,
        ]);
        let path = WarpPath::backtrack(&m).unwrap();
        assert_eq!(
            cells(&path),
            vec![Some((2, 2)), Some((2, 1)), Some((1, 1)), Some((1, 0)), None]
        );
    }

    #[test]
    fn diagonal_chosen_when_strictly_cheapest() {
        let m = matrix(3, 3, vec![
            0.0, 4.0, 9.0,
            4.0, 1.0, 5.0,
            9.0, 5.0, 2.0,
        ]);
        let path = WarpPath::backtrack(&m).unwrap();
        // (2,2) -> diag (1,1) -> forced (1,0) -> anchor.
        assert_eq!(
            cells(&path),
            vec![Some((2, 2)), Some((1, 1)), Some((1, 0)), None]
        );
    }

    #[test]
    fn single_row_matrix_exits_immediately() {
        // col > 0 but row == 0: the loop never runs.
        let m = matrix(1, 4, vec![1.0, 2.0, 3.0, 4.0]);
        let path = WarpPath::backtrack(&m).unwrap();
        assert_eq!(cells(&path), vec![Some((0, 3)), None]);
    }

    #[test]
    fn iterates_in_reverse_chronological_order() {
        let m = matrix(2, 2, vec![0.0, 1.0, 1.0, 0.0]);
        let path = WarpPath::backtrack(&m).unwrap();
        let collected: Vec<&PathStep> = (&path).into_iter().collect();
        assert_eq!(collected.len(), path.len());
        assert_eq!(collected[0].cell(), Some((1, 1)));
        assert!(collected.last().unwrap().is_anchor());
    }
}
