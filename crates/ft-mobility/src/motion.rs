//! Constant-speed path following.
//!
//! Pure functions; the runner owns the state and does the I/O.

use ft_core::GeoPoint;
use ft_routing::snap_nearest;

/// Result of one tick of motion.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Step {
    pub position:    GeoPoint,
    pub path_index:  usize,
    /// Initial bearing from the pre-step position towards the next point.
    pub heading_deg: f64,
    /// `true` when this step landed exactly on `points[path_index]`.
    pub reached:     bool,
}

/// Metres covered in one tick at `speed_kmh`.
#[inline]
pub fn metres_per_tick(speed_kmh: f64, tick_secs: f64) -> f64 {
    speed_kmh * 1000.0 / 3600.0 * tick_secs
}

/// Advance from `position` (somewhere on segment `index → index + 1`) by up
/// to `coverable_m` metres towards `points[index + 1]`.
///
/// When the remaining distance fits in one tick the vehicle lands exactly on
/// the next point and any overshoot is discarded.  Caller guarantees
/// `index + 1 < points.len()`.
pub fn advance(points: &[GeoPoint], position: GeoPoint, index: usize, coverable_m: f64) -> Step {
    let next      = points[index + 1];
    let heading   = position.initial_bearing_deg(next);
    let remaining = position.distance_m(next);

    if coverable_m >= remaining {
        Step { position: next, path_index: index + 1, heading_deg: heading, reached: true }
    } else {
        Step {
            position:    position.destination(heading, coverable_m),
            path_index:  index,
            heading_deg: heading,
            reached:     false,
        }
    }
}

/// Path index to resume from.
///
/// The persisted coordinate snaps to its nearest path point, clamped to
/// `last - 1` so there is always one segment left to drive.  No coordinate
/// starts at 0.
pub fn resume_index(points: &[GeoPoint], last_known: Option<GeoPoint>) -> usize {
    let Some(at) = last_known else { return 0 };
    let ceiling = points.len().saturating_sub(2);
    snap_nearest(points, at).map_or(0, |i| i.min(ceiling))
}
