//! `ft-routing` — dense path geometry for missions.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                     |
//! |---------------|--------------------------------------------------------------|
//! | [`provider`]  | `RouteProvider` trait — the external routing service seam    |
//! | [`geoapify`]  | `GeoapifyProvider` (feature = `"http"` only)                 |
//! | [`gate`]      | `AdmissionGate` — fleet-wide bound on in-flight requests     |
//! | [`path`]      | `RoutedPath`, `StopIndex`, `StopInfo`, `snap_nearest`        |
//! | [`builder`]   | `PathBuilder<P>` — gate + provider + waypoint snapping       |
//! | [`error`]     | `RoutingError`, `RoutingResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                       |
//! |---------|--------------------------------------------------------------|
//! | `http`  | Enables the Geoapify routing client via `reqwest` (default). |
//!
//! # Failure model
//!
//! [`PathBuilder::build`] never fails: transport errors, non-success
//! responses and empty geometry all collapse into [`RoutedPath::empty`],
//! which callers treat as "back off and retry".  Use
//! [`PathBuilder::try_build`] to see the underlying [`RoutingError`].

pub mod builder;
pub mod error;
pub mod gate;
pub mod path;
pub mod provider;

#[cfg(feature = "http")]
pub mod geoapify;


pub use builder::PathBuilder;
pub use error::{RoutingError, RoutingResult};
pub use gate::AdmissionGate;
pub use path::{snap_nearest, RoutedPath, StopIndex, StopInfo};
pub use provider::{parse_geojson_route, RouteProvider};

#[cfg(feature = "http")]
pub use geoapify::GeoapifyProvider;
