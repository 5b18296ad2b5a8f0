//! Error types for impoll-render

use thiserror::Error;

use crate::histogram::BinCount;

/// Errors from building chart data
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RenderError {
    /// Bucket count outside the supported range
    #[error("Invalid bin count {0}: must be between {min} and {max}", min = BinCount::MIN, max = BinCount::MAX)]
    InvalidBinCount(usize),
}
