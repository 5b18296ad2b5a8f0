//! Error types for impoll-core

use std::fmt;

use thiserror::Error;

use impoll_render::RenderError;
use impoll_store::StoreError;

/// Result type alias for dashboard operations
pub type Result<T> = std::result::Result<T, DashboardError>;

/// Main error type for dashboard operations
#[derive(Error, Debug)]
pub enum DashboardError {
    /// Submitted input was rejected; nothing was stored
    #[error("Invalid value {input:?}: {reason}")]
    InvalidValue { input: String, reason: InvalidReason },

    /// Backing store failure
    #[error("Store error: {0}")]
    Store(StoreError),

    /// Configuration could not be loaded
    #[error("Config error: {0}")]
    Config(#[from] ConfigError),

    /// Chart options out of range
    #[error("Render error: {0}")]
    Render(#[from] RenderError),
}

impl DashboardError {
    /// Rejected input, recoverable by asking the participant again
    pub fn is_invalid_value(&self) -> bool {
        matches!(self, DashboardError::InvalidValue { .. })
    }

    /// The deployment is broken (disk, permissions)
    pub fn is_storage_unavailable(&self) -> bool {
        matches!(self, DashboardError::Store(StoreError::StorageUnavailable(_)))
    }
}

impl From<StoreError> for DashboardError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::InvalidValue(value) => DashboardError::InvalidValue {
                input: value.to_string(),
                reason: InvalidReason::NonFinite,
            },
            other => DashboardError::Store(other),
        }
    }
}

/// Why an input was rejected
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InvalidReason {
    Missing,
    NotNumeric,
    NonFinite,
}

impl fmt::Display for InvalidReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            InvalidReason::Missing => "enter a number first",
            InvalidReason::NotNumeric => "not a number",
            InvalidReason::NonFinite => "value must be a finite number",
        };
        f.write_str(text)
    }
}

/// Errors that can occur when loading configuration
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),

    #[error("TOML parse error: {0}")]
    Parse(String),

    #[error("Invalid setting: {0}")]
    Invalid(String),
}
