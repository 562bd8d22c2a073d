//! Error types for ft-store.

use thiserror::Error;

use ft_core::{CoreError, VehicleId};

/// Errors that can occur reading or writing the telemetry store.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("vehicle {0} not found")]
    VehicleNotFound(VehicleId),

    #[error("stored value could not be decoded: {0}")]
    Decode(#[from] CoreError),

    #[error("store lock poisoned by a panicking writer")]
    Poisoned,

    #[cfg(feature = "sqlite")]
    #[error("SQLite error: {0}")]
    Sqlite(#[from] rusqlite::Error),
}

impl StoreError {
    /// `true` when retrying the same call cannot succeed: the row is missing
    /// or holds data that does not decode.
    pub fn is_permanent(&self) -> bool {
        matches!(self, StoreError::VehicleNotFound(_) | StoreError::Decode(_))
    }
}

/// Alias for `Result<T, StoreError>`.
pub type StoreResult<T> = Result<T, StoreError>;
