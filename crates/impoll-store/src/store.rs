use std::num::NonZeroUsize;

use crate::observation::Observation;

/// The trait that all value log backends implement.
///
/// Observations are immutable: the only mutations are appending one value
/// and clearing everything.
pub trait ValueStore: Send + Sync {
    /// Append a finite value. Returns the stored observation.
    fn insert(&self, value: f64) -> Result<Observation, StoreError>;

    /// Remove every observation. Calling it on an empty store is a no-op.
    fn clear(&self) -> Result<(), StoreError>;

    /// All observations, ascending id.
    fn read_all(&self) -> Result<Vec<Observation>, StoreError>;

    /// The `n` most recently inserted observations, ascending id.
    fn read_recent(&self, n: NonZeroUsize) -> Result<Vec<Observation>, StoreError>;

    /// Number of stored observations.
    fn count(&self) -> Result<usize, StoreError>;
}

/// Errors from the value store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid value: {0} is not a finite number")]
    InvalidValue(f64),

    #[error("Storage unavailable: {0}")]
    StorageUnavailable(String),

    #[error("Corrupt entry: {0}")]
    Corrupt(String),
}

impl StoreError {
    pub(crate) fn unavailable(context: &'static str) -> impl FnOnce(rusqlite::Error) -> Self {
        move |e| StoreError::StorageUnavailable(format!("{}: {}", context, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn store_error_display() {
        let err = StoreError::InvalidValue(f64::NAN);
        assert!(err.to_string().contains("NaN"));

        let err = StoreError::StorageUnavailable("open data.db: permission denied".into());
        assert!(err.to_string().contains("permission denied"));
    }
}
