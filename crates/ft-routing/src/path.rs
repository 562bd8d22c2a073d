//! Dense path geometry and the path-index → waypoint stop mapping.

use std::collections::BTreeMap;
use std::io;

use ft_core::{GeoPoint, Waypoint, WaypointId};

use crate::RoutingResult;

// ── Snapping ──────────────────────────────────────────────────────────────────

/// Index of the path point geodesically closest to `target`.
///
/// Ties resolve to the lowest index.  `None` for an empty path.  This is a
/// linear scan; paths from the provider are a few thousand points at most.
pub fn snap_nearest(points: &[GeoPoint], target: GeoPoint) -> Option<usize> {
    let mut best: Option<(usize, f64)> = None;
    for (i, &p) in points.iter().enumerate() {
        let d = p.distance_m(target);
        match best {
            Some((_, best_d)) if d >= best_d => {}
            _ => best = Some((i, d)),
        }
    }
    best.map(|(i, _)| i)
}

// ── StopIndex ─────────────────────────────────────────────────────────────────

/// Stop policy flags for one mapped waypoint.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct StopInfo {
    pub waypoint:     WaypointId,
    pub is_major:     bool,
    pub is_skippable: bool,
}

impl From<&Waypoint> for StopInfo {
    fn from(w: &Waypoint) -> Self {
        Self {
            waypoint:     w.id,
            is_major:     w.is_major_stop,
            is_skippable: w.is_skippable,
        }
    }
}

/// Maps path indices to the waypoints they represent.
///
/// When two waypoints snap to the same index the one later in travel order
/// wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StopIndex {
    stops: BTreeMap<usize, StopInfo>,
}

impl StopIndex {
    /// Snap each of `waypoints` onto `points`.
    pub fn snap<'a>(points: &[GeoPoint], waypoints: impl IntoIterator<Item = &'a Waypoint>) -> Self {
        let stops = waypoints
            .into_iter()
            .filter_map(|w| snap_nearest(points, w.location).map(|i| (i, StopInfo::from(w))))
            .collect();
        Self { stops }
    }

    #[inline]
    pub fn get(&self, path_index: usize) -> Option<&StopInfo> {
        self.stops.get(&path_index)
    }

    /// `(path_index, stop)` in ascending path order.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &StopInfo)> {
        self.stops.iter().map(|(&i, s)| (i, s))
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.stops.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.stops.is_empty()
    }
}

// ── RoutedPath ────────────────────────────────────────────────────────────────

/// Dense geometry for one mission attempt plus its stop mapping.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RoutedPath {
    /// Path points in travel order.
    pub points: Vec<GeoPoint>,
    pub stops:  StopIndex,
}

impl RoutedPath {
    /// The "no geometry" result; callers back off and retry.
    pub fn empty() -> Self {
        Self::default()
    }

    /// `true` when there is nothing to drive along.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Index of the final path point.  Zero for an empty path.
    #[inline]
    pub fn last_index(&self) -> usize {
        self.points.len().saturating_sub(1)
    }

    /// Write the geometry as `latitude,longitude` CSV rows with a header.
    pub fn write_csv<W: io::Write>(&self, out: W) -> RoutingResult<()> {
        let mut w = csv::Writer::from_writer(out);
        w.write_record(["latitude", "longitude"])?;
        for p in &self.points {
            w.write_record([p.lat.to_string(), p.lon.to_string()])?;
        }
        w.flush().map_err(csv::Error::from)?;
        Ok(())
    }
}
