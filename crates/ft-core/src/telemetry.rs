//! Telemetry packets, arrival records, and their wire conventions.
//!
//! Timestamps are UTC and serialised as RFC 3339 with microsecond precision
//! and a `Z` suffix, so lexical order equals chronological order in any store
//! that keeps them as text.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, SecondsFormat, Utc};

use crate::geo::normalize_degrees;
use crate::{CoreError, CoreResult, GeoPoint, VehicleId, WaypointId};

// ── VehicleStatus ─────────────────────────────────────────────────────────────

/// Runner lifecycle state, reported in every packet.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum VehicleStatus {
    #[default]
    Initializing,
    Moving,
    Stopped,
    Finished,
}

impl VehicleStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            VehicleStatus::Initializing => "initializing",
            VehicleStatus::Moving       => "moving",
            VehicleStatus::Stopped      => "stopped",
            VehicleStatus::Finished     => "finished",
        }
    }
}

impl FromStr for VehicleStatus {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "initializing" => Ok(VehicleStatus::Initializing),
            "moving"       => Ok(VehicleStatus::Moving),
            "stopped"      => Ok(VehicleStatus::Stopped),
            "finished"     => Ok(VehicleStatus::Finished),
            other          => Err(CoreError::Parse(format!("unknown vehicle status {other:?}"))),
        }
    }
}

impl fmt::Display for VehicleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── GpsHealth ─────────────────────────────────────────────────────────────────

/// Health of the (simulated) GPS receiver.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GpsHealth {
    #[default]
    Functional,
    Degraded,
    Lost,
}

impl GpsHealth {
    pub fn as_str(self) -> &'static str {
        match self {
            GpsHealth::Functional => "functional",
            GpsHealth::Degraded   => "degraded",
            GpsHealth::Lost       => "lost",
        }
    }
}

impl FromStr for GpsHealth {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s {
            "functional" => Ok(GpsHealth::Functional),
            "degraded"   => Ok(GpsHealth::Degraded),
            "lost"       => Ok(GpsHealth::Lost),
            other        => Err(CoreError::Parse(format!("unknown GPS status {other:?}"))),
        }
    }
}

// ── TelemetryPacket ───────────────────────────────────────────────────────────

/// One GPS fix emitted by a vehicle.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TelemetryPacket {
    pub vehicle:     VehicleId,
    pub timestamp:   DateTime<Utc>,
    pub location:    GeoPoint,
    pub speed_kmh:   f64,
    /// Degrees clockwise from north, `[0, 360)`.
    pub heading_deg: f64,
    pub status:      VehicleStatus,
    pub gps:         GpsHealth,
}

impl TelemetryPacket {
    /// Build a packet with wire rounding applied: coordinates to 6 decimals,
    /// speed and heading to 2.
    pub fn new(
        vehicle:     VehicleId,
        timestamp:   DateTime<Utc>,
        location:    GeoPoint,
        speed_kmh:   f64,
        heading_deg: f64,
        status:      VehicleStatus,
        gps:         GpsHealth,
    ) -> Self {
        Self {
            vehicle,
            timestamp,
            location: GeoPoint::new(round_to(location.lat, 6), round_to(location.lon, 6)),
            speed_kmh: round_to(speed_kmh, 2),
            heading_deg: normalize_degrees(round_to(heading_deg, 2)),
            status,
            gps,
        }
    }
}

// ── ArrivalRecord ─────────────────────────────────────────────────────────────

/// A vehicle calling at a waypoint.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ArrivalRecord {
    pub vehicle:   VehicleId,
    pub waypoint:  WaypointId,
    pub timestamp: DateTime<Utc>,
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// RFC 3339, microsecond precision, `Z` suffix.
pub fn format_timestamp(ts: DateTime<Utc>) -> String {
    ts.to_rfc3339_opts(SecondsFormat::Micros, true)
}

/// Inverse of [`format_timestamp`]; accepts any RFC 3339 offset.
pub fn parse_timestamp(s: &str) -> CoreResult<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| CoreError::Parse(format!("bad timestamp {s:?}: {e}")))
}

#[inline]
fn round_to(value: f64, decimals: i32) -> f64 {
    let scale = 10f64.powi(decimals);
    (value * scale).round() / scale
}
