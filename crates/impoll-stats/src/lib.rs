//! impoll-stats - Descriptive statistics for live poll values
//!
//! Pure functions over a snapshot of values:
//!
//! - **DescriptiveStats**: count, mean, median, sample variance and SD,
//!   bias-corrected skewness and excess kurtosis, min, max
//! - **Quantiles**: linear interpolation between closest ranks
//! - **Formatting**: fixed per-statistic precision with trailing zeros
//!   stripped and a placeholder for undefined results
//!
//! Statistics that need more data than the sample has are `None` rather
//! than errors, so a display can show a placeholder while the class is
//! still submitting.

pub mod format;
pub mod quantile;
pub mod summary;

pub use format::*;
pub use quantile::*;
pub use summary::*;
