//! `ft-core` — foundational types for the `ft` fleet telemetry simulator.
//!
//! This crate is a dependency of every other `ft-*` crate.  It has no `ft-*`
//! dependencies and minimal external ones (`chrono`, `rand`, `thiserror`,
//! plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                                   |
//! |-----------------|------------------------------------------------------------|
//! | [`ids`]         | `RouteId`, `WaypointId`, `VehicleId`                       |
//! | [`geo`]         | `GeoPoint`, distance, initial bearing, destination point  |
//! | [`waypoint`]    | `Waypoint`, `WaypointKind`, `Direction`, `Mission`         |
//! | [`vehicle`]     | `Vehicle`, `VehicleState`, `ServiceClass`                  |
//! | [`telemetry`]   | `TelemetryPacket`, `ArrivalRecord`, `VehicleStatus`, …     |
//! | [`rng`]         | `VehicleRng` (per-vehicle, deterministic)                  |
//! | [`error`]       | `CoreError`, `CoreResult`                                  |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod telemetry;
pub mod vehicle;
pub mod waypoint;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{CoreError, CoreResult};
pub use geo::GeoPoint;
pub use ids::{RouteId, VehicleId, WaypointId};
pub use rng::VehicleRng;
pub use telemetry::{format_timestamp, parse_timestamp, ArrivalRecord, GpsHealth, TelemetryPacket, VehicleStatus};
pub use vehicle::{ServiceClass, Vehicle, VehicleState};
pub use waypoint::{Direction, Mission, Waypoint, WaypointKind};
