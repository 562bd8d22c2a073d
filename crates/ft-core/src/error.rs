//! Core error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`.

use thiserror::Error;

use crate::RouteId;

/// The top-level error type for `ft-core`.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A route resolved to fewer than two waypoints; no mission can be built.
    #[error("route {route} has {count} waypoint(s); a mission needs at least 2")]
    MissionTooShort { route: RouteId, count: usize },

    #[error("parse error: {0}")]
    Parse(String),
}

/// Shorthand result type for `ft-core`.
pub type CoreResult<T> = Result<T, CoreError>;
