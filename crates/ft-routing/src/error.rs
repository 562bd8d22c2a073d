//! Routing-subsystem error type.

use thiserror::Error;

/// Errors produced by `ft-routing`.
///
/// Every variant is transient from the simulator's point of view: the
/// runner backs off and asks again.
#[derive(Debug, Error)]
pub enum RoutingError {
    #[cfg(feature = "http")]
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("malformed provider response: {0}")]
    Malformed(#[from] serde_json::Error),

    #[error("provider returned no usable geometry")]
    EmptyGeometry,

    #[error("routing provider rejected the request: {0}")]
    Api(String),

    #[error("admission gate closed")]
    GateClosed,

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type RoutingResult<T> = Result<T, RoutingError>;
