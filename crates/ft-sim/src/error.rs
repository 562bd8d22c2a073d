use std::path::PathBuf;

use ft_store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum FleetError {
    #[error("fleet configuration error: {0}")]
    Config(String),

    #[error("cannot read config file {path}: {source}")]
    Io {
        path:   PathBuf,
        source: std::io::Error,
    },

    #[error("config file is not valid JSON: {0}")]
    Json(#[from] serde_json::Error),

    #[error("store error while assembling the fleet: {0}")]
    Store(#[from] StoreError),
}

pub type FleetResult<T> = Result<T, FleetError>;
