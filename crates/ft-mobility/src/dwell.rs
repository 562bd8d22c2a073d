//! Stop/skip decisions and dwell durations.

use std::time::Duration;

use ft_core::{ServiceClass, VehicleRng};
use ft_routing::StopInfo;

/// How long a vehicle waits at stops and at the end of a mission.
///
/// Ranges are inclusive whole seconds, drawn uniformly.
#[derive(Clone, Debug, PartialEq)]
pub struct DwellPolicy {
    pub major_secs:        u64,
    pub minor_secs_min:    u64,
    pub minor_secs_max:    u64,
    pub terminus_secs_min: u64,
    pub terminus_secs_max: u64,
}

impl Default for DwellPolicy {
    fn default() -> Self {
        Self {
            major_secs:        600,
            minor_secs_min:    240,
            minor_secs_max:    300,
            terminus_secs_min: 600,
            terminus_secs_max: 900,
        }
    }
}

impl DwellPolicy {
    /// Zero-length dwells everywhere.
    pub fn none() -> Self {
        Self {
            major_secs:        0,
            minor_secs_min:    0,
            minor_secs_max:    0,
            terminus_secs_min: 0,
            terminus_secs_max: 0,
        }
    }

    /// Dwell at an intermediate or final waypoint.
    pub fn at_stop(&self, stop: &StopInfo, rng: &mut VehicleRng) -> Duration {
        if stop.is_major {
            Duration::from_secs(self.major_secs)
        } else {
            draw(rng, self.minor_secs_min, self.minor_secs_max)
        }
    }

    /// Dwell after a mission completes, before the return trip.
    pub fn at_terminus(&self, rng: &mut VehicleRng) -> Duration {
        draw(rng, self.terminus_secs_min, self.terminus_secs_max)
    }
}

fn draw(rng: &mut VehicleRng, lo: u64, hi: u64) -> Duration {
    Duration::from_secs(rng.gen_range(lo..=hi.max(lo)))
}

/// Whether a vehicle of `class` halts at `stop`.
///
/// Express services pass skippable stops; everyone else halts everywhere.
#[inline]
pub fn halts_at(stop: &StopInfo, class: ServiceClass) -> bool {
    !(stop.is_skippable && class.skips_optional_stops())
}
