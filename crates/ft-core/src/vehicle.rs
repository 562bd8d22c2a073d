//! Vehicle reference data and durable resumption state.

use std::str::FromStr;

use crate::{CoreError, CoreResult, Direction, GeoPoint, RouteId, VehicleId};

/// Service class — decides whether skippable stops are honoured.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ServiceClass {
    /// Calls at every stop.
    #[default]
    Local,
    /// Passes through stops flagged `is_skippable`.
    Express,
}

impl ServiceClass {
    #[inline]
    pub fn skips_optional_stops(self) -> bool {
        self == ServiceClass::Express
    }

    pub fn as_str(self) -> &'static str {
        match self {
            ServiceClass::Local   => "Local",
            ServiceClass::Express => "Express",
        }
    }
}

impl FromStr for ServiceClass {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "Local"   => Ok(ServiceClass::Local),
            "Express" => Ok(ServiceClass::Express),
            other     => Err(CoreError::Parse(format!("unknown service class {other:?}"))),
        }
    }
}

/// Reference data for one vehicle, as read from the store at start-up.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Vehicle {
    pub id:            VehicleId,
    pub region:        String,
    pub seats:         Option<u32>,
    pub service_class: ServiceClass,
}

/// Durable, resumable per-vehicle state.
///
/// Owned by the store; read and written only by the vehicle's own runner.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct VehicleState {
    pub vehicle:    VehicleId,
    /// `None` for a vehicle with no route assignment; such vehicles are not
    /// simulated.
    pub route:      Option<RouteId>,
    pub direction:  Direction,
    /// Last persisted coordinate; `None` starts the vehicle at the mission
    /// origin.
    pub last_known: Option<GeoPoint>,
    pub path_index: usize,
}

impl VehicleState {
    /// Fresh state: forward direction, no position, index 0.
    pub fn new(vehicle: VehicleId, route: Option<RouteId>) -> Self {
        Self {
            vehicle,
            route,
            direction:  Direction::Forward,
            last_known: None,
            path_index: 0,
        }
    }
}
