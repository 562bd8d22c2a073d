use ft_core::{CoreError, VehicleId};
use ft_store::StoreError;
use thiserror::Error;
use tokio::task::JoinError;

/// Errors that end one vehicle's runner.  Provider failures never appear
/// here; they are retried inside the runner.
#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("vehicle {0} has no route assignment")]
    Unassigned(VehicleId),

    #[error("invalid mission: {0}")]
    Mission(#[from] CoreError),

    #[error("store operation failed: {0}")]
    Store(#[from] StoreError),

    #[error("store call panicked or was cancelled: {0}")]
    StoreTask(#[from] JoinError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
