//! Pointwise distance functions and the alignment-cost newtype.

use std::cmp::Ordering;
use std::fmt;

/// Distance between two individual samples.
///
/// Both variants are true metrics on finite inputs, so every local cost is
/// finite and non-negative.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PointDistance {
    /// `|x - y|` (default).
    #[default]
    AbsoluteDifference,

    /// `(x - y)^2`. Penalizes large deviations more heavily.
    SquaredDifference,
}

impl PointDistance {
    /// Evaluate the distance between two samples.
    #[must_use]
    pub fn eval(self, x: f64, y: f64) -> f64 {
        match self {
            Self::AbsoluteDifference => (x - y).abs(),
            Self::SquaredDifference => (x - y).powi(2),
        }
    }
}

/// Minimal total alignment cost between two series.
///
/// The raw accumulated value at the bottom-right cell of the cost matrix;
/// no normalization by path length is applied.
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd)]
pub struct AlignmentCost(f64);

impl AlignmentCost {
    pub(crate) fn new(value: f64) -> Self {
        Self(value)
    }

    /// Raw cost value.
    #[must_use]
    pub fn value(self) -> f64 {
        self.0
    }

    /// Total ordering comparison using [`f64::total_cmp`].
    #[must_use]
    pub fn total_cmp(&self, other: &Self) -> Ordering {
        self.0.total_cmp(&other.0)
    }
}

impl fmt::Display for AlignmentCost {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.6}", self.0)
    }
}
