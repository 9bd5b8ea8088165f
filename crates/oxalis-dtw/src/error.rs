//! Error types for cost-matrix construction and path backtracking.

/// Invalid-input errors from DTW computation.
///
/// Every variant is surfaced to the caller before any output is produced;
/// there are no partial results and nothing is coerced silently.
#[derive(Debug, thiserror::Error)]
pub enum DtwError {
    /// Returned when an empty slice is provided as a series.
    #[error("series must be non-empty")]
    EmptySeries,

    /// Returned when a series contains NaN, infinity, or negative infinity.
    /// NaN would otherwise propagate silently through the dynamic program.
    #[error("series contains non-finite value at index {index}")]
    NonFiniteValue {
        /// Position of the first non-finite value found.
        index: usize,
    },

    /// Returned when a series is too short for the cost-matrix boundary
    /// scheme, which needs at least one interior cell per axis.
    #[error("series has {len} sample(s); at least 2 are required")]
    SeriesTooShort {
        /// Length of the offending series.
        len: usize,
    },

    /// Returned when backtracking is asked to start on a matrix with zero
    /// rows or columns, which has no defined start cell.
    #[error("cannot backtrack an empty accumulated-cost matrix")]
    EmptyMatrix,

    /// Returned when matrix data does not match its declared shape.
    #[error("matrix data has {len} cell(s) but shape is {rows} x {cols}")]
    ShapeMismatch {
        /// Declared row count.
        rows: usize,
        /// Declared column count.
        cols: usize,
        /// Actual number of data cells supplied.
        len: usize,
    },
}
