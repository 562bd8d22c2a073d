//! `PathBuilder` — turns a mission into a dense, stop-annotated path.

use tracing::{debug, warn};

use ft_core::Mission;

use crate::path::{RoutedPath, StopIndex};
use crate::{AdmissionGate, RouteProvider, RoutingError, RoutingResult};

/// Shared by every vehicle task (wrap in `Arc`).  Holds the provider and the
/// fleet-wide [`AdmissionGate`]; no per-vehicle state.
///
/// # Type parameter
///
/// `P` must implement [`RouteProvider`] (e.g. [`crate::GeoapifyProvider`]).
pub struct PathBuilder<P: RouteProvider> {
    provider: P,
    gate:     AdmissionGate,
}

impl<P: RouteProvider> PathBuilder<P> {
    pub fn new(provider: P, gate: AdmissionGate) -> Self {
        Self { provider, gate }
    }

    #[inline]
    pub fn gate(&self) -> &AdmissionGate {
        &self.gate
    }

    #[inline]
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Build the path for `mission`, or [`RoutedPath::empty`] on any failure.
    ///
    /// Failures are logged here; the caller only sees "no geometry".
    pub async fn build(&self, mission: &Mission) -> RoutedPath {
        match self.try_build(mission).await {
            Ok(path) => path,
            Err(err) => {
                warn!(route = %mission.route, direction = %mission.direction, error = %err,
                      "route build failed");
                RoutedPath::empty()
            }
        }
    }

    /// Build the path for `mission`, surfacing the failure cause.
    ///
    /// Waits on the admission gate for the duration of the provider call only;
    /// snapping happens after the slot is released.
    pub async fn try_build(&self, mission: &Mission) -> RoutingResult<RoutedPath> {
        let coords = mission.coordinates();

        let points = {
            let _permit = self.gate.admit().await?;
            self.provider.route(&coords).await?
        };

        // A single point cannot be driven along.
        if points.len() < 2 {
            return Err(RoutingError::EmptyGeometry);
        }

        let stops = StopIndex::snap(&points, mission.destinations());
        debug!(route = %mission.route, points = points.len(), stops = stops.len(), "route built");
        Ok(RoutedPath { points, stops })
    }
}
