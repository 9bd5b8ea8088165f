//! Classic dynamic time warping.
//!
//! Pure math library — zero I/O. Builds the local and accumulated cost
//! matrices for a pair of real-valued series via the standard DTW dynamic
//! program, and backtracks the accumulated matrix into the optimal warp
//! path. Sequence generation and plotting live with the callers.

mod distance;
mod dtw;
mod error;
mod matrix;
mod path;
mod series;

pub use distance::{AlignmentCost, PointDistance};
pub use dtw::{CostMatrices, Dtw};
pub use error::DtwError;
pub use matrix::CostMatrix;
pub use path::{PathStep, WarpPath};
pub use series::{Series, SeriesView};
