//! The `TelemetryStore` trait implemented by all backends.

use chrono::{DateTime, Duration, Utc};

use ft_core::{
    ArrivalRecord, Direction, GeoPoint, RouteId, TelemetryPacket, Vehicle, VehicleId,
    VehicleState, Waypoint,
};

use crate::StoreResult;

/// Positions retained per vehicle when no bound is configured.
pub const DEFAULT_MAX_POSITIONS: usize = 1_000;

/// Read/write contract between the simulator and its persistence layer.
///
/// Every method is a single atomic read, append, or update, so cancelling a
/// vehicle task between calls never leaves partial state behind.
///
/// # Thread safety
///
/// One store is shared by every vehicle task and the maintenance task, hence
/// `Send + Sync`.  Implementations serialise their own writes.  Calls block;
/// async callers move them onto tokio's blocking pool, hence `'static`.
pub trait TelemetryStore: Send + Sync + 'static {
    // ── Reference data ────────────────────────────────────────────────────

    /// Every vehicle known to the store, ordered by id.
    fn vehicles(&self) -> StoreResult<Vec<Vehicle>>;

    /// Waypoints of `route` in ascending `sequence`.  Empty for an unknown
    /// route.
    fn route_waypoints(&self, route: RouteId) -> StoreResult<Vec<Waypoint>>;

    // ── Resumption state ──────────────────────────────────────────────────

    /// # Errors
    ///
    /// [`StoreError::VehicleNotFound`][crate::StoreError::VehicleNotFound]
    /// for an unknown vehicle.
    fn load_vehicle_state(&self, vehicle: &VehicleId) -> StoreResult<VehicleState>;

    fn save_vehicle_state(
        &self,
        vehicle:    &VehicleId,
        location:   GeoPoint,
        path_index: usize,
        direction:  Direction,
    ) -> StoreResult<()>;

    // ── Telemetry ─────────────────────────────────────────────────────────

    /// Append one packet, then discard that vehicle's oldest packets beyond
    /// the configured bound.
    fn append_position(&self, packet: &TelemetryPacket) -> StoreResult<()>;

    fn append_arrival(&self, arrival: &ArrivalRecord) -> StoreResult<()>;

    /// Delete arrivals strictly older than `cutoff`; returns the number
    /// deleted.
    fn prune_arrivals(&self, cutoff: DateTime<Utc>) -> StoreResult<usize>;

    /// Delete arrivals older than `retention` as seen from `now`.
    fn prune_older_than(&self, retention: Duration, now: DateTime<Utc>) -> StoreResult<usize> {
        self.prune_arrivals(now - retention)
    }

    // ── Read-back ─────────────────────────────────────────────────────────

    /// Up to `limit` most recent packets for `vehicle`, newest first.
    fn recent_positions(&self, vehicle: &VehicleId, limit: usize) -> StoreResult<Vec<TelemetryPacket>>;

    /// All retained arrivals for `vehicle`, oldest first.
    fn arrivals(&self, vehicle: &VehicleId) -> StoreResult<Vec<ArrivalRecord>>;

    /// The newest packet of every vehicle whose route has a waypoint named
    /// `waypoint_name`, ordered by vehicle id.
    fn latest_positions_for_waypoint(&self, waypoint_name: &str) -> StoreResult<Vec<TelemetryPacket>>;
}
