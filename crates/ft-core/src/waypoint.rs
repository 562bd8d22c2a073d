//! Route waypoints, travel direction, and the per-direction `Mission`.

use std::fmt;
use std::str::FromStr;

use crate::{CoreError, CoreResult, GeoPoint, RouteId, WaypointId};

// ── WaypointKind ──────────────────────────────────────────────────────────────

/// Role of a waypoint within its route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum WaypointKind {
    Start,
    Stop,
    End,
}

impl WaypointKind {
    pub fn as_str(self) -> &'static str {
        match self {
            WaypointKind::Start => "start",
            WaypointKind::Stop  => "stop",
            WaypointKind::End   => "end",
        }
    }
}

impl FromStr for WaypointKind {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "start" => Ok(WaypointKind::Start),
            "stop"  => Ok(WaypointKind::Stop),
            "end"   => Ok(WaypointKind::End),
            other   => Err(CoreError::Parse(format!("unknown waypoint type {other:?}"))),
        }
    }
}

// ── Waypoint ──────────────────────────────────────────────────────────────────

/// A named, ordered, geographically fixed point on a route.
///
/// Immutable reference data: created by route provisioning and never mutated
/// by the simulation.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Waypoint {
    pub id:            WaypointId,
    /// Position of this waypoint within its route (ascending = forward).
    pub sequence:      u32,
    pub name:          String,
    pub location:      GeoPoint,
    pub kind:          WaypointKind,
    /// Long dwell when the vehicle stops here.
    pub is_major_stop: bool,
    /// Express-class vehicles pass through without stopping.
    pub is_skippable:  bool,
}

// ── Direction ─────────────────────────────────────────────────────────────────

/// Which way a vehicle is traversing its route.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Direction {
    #[default]
    Forward,
    Backward,
}

impl Direction {
    #[inline]
    pub fn flipped(self) -> Direction {
        match self {
            Direction::Forward  => Direction::Backward,
            Direction::Backward => Direction::Forward,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Forward  => "forward",
            Direction::Backward => "backward",
        }
    }
}

impl FromStr for Direction {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "forward"  => Ok(Direction::Forward),
            "backward" => Ok(Direction::Backward),
            other      => Err(CoreError::Parse(format!("unknown direction {other:?}"))),
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Mission ───────────────────────────────────────────────────────────────────

/// One directional traversal of a route's waypoints.
///
/// A mission is recomputed from the owning route every cycle rather than
/// mutated in place: [`Mission::new`] sorts by `sequence` and reverses the
/// list for [`Direction::Backward`].
#[derive(Clone, Debug, PartialEq)]
pub struct Mission {
    pub route:     RouteId,
    pub direction: Direction,
    waypoints:     Vec<Waypoint>,
}

impl Mission {
    /// Build the mission for `route` travelled in `direction`.
    ///
    /// # Errors
    ///
    /// [`CoreError::MissionTooShort`] if fewer than two waypoints are given.
    pub fn new(route: RouteId, direction: Direction, mut waypoints: Vec<Waypoint>) -> CoreResult<Self> {
        if waypoints.len() < 2 {
            return Err(CoreError::MissionTooShort { route, count: waypoints.len() });
        }
        waypoints.sort_by_key(|w| w.sequence);
        if direction == Direction::Backward {
            waypoints.reverse();
        }
        Ok(Self { route, direction, waypoints })
    }

    /// Waypoints in travel order.
    #[inline]
    pub fn waypoints(&self) -> &[Waypoint] {
        &self.waypoints
    }

    /// The first waypoint in travel order (where the vehicle departs from).
    #[inline]
    pub fn origin(&self) -> &Waypoint {
        &self.waypoints[0]
    }

    /// Waypoints a vehicle can arrive at, in travel order: everything except
    /// the route's [`WaypointKind::Start`] terminus, whichever direction the
    /// mission runs.
    pub fn destinations(&self) -> impl Iterator<Item = &Waypoint> {
        self.waypoints.iter().filter(|w| w.kind != WaypointKind::Start)
    }

    /// Coordinates in travel order, as sent to the routing provider.
    pub fn coordinates(&self) -> Vec<GeoPoint> {
        self.waypoints.iter().map(|w| w.location).collect()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.waypoints.len()
    }

    /// Always `false`: a mission holds at least two waypoints.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.waypoints.is_empty()
    }
}
