//! Wall-clock source for packet timestamps.

use chrono::{DateTime, Duration, Utc};
use tokio::time::Instant;

/// Source of packet and arrival timestamps.
pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// Wall time derived from the tokio clock.
///
/// Anchored once to a wall-clock instant, then advanced by
/// `tokio::time::Instant`.  Under a paused test runtime the timestamps
/// follow virtual time, so dwell and tick sleeps show up in the packets.
#[derive(Clone, Debug)]
pub struct RuntimeClock {
    wall_origin: DateTime<Utc>,
    origin:      Instant,
}

impl RuntimeClock {
    /// Anchor at the current wall time.
    pub fn new() -> Self {
        Self::starting_at(Utc::now())
    }

    /// Anchor at `wall_origin`; the first `now()` returns roughly that.
    pub fn starting_at(wall_origin: DateTime<Utc>) -> Self {
        Self { wall_origin, origin: Instant::now() }
    }
}

impl Default for RuntimeClock {
    fn default() -> Self {
        Self::new()
    }
}

impl Clock for RuntimeClock {
    fn now(&self) -> DateTime<Utc> {
        let elapsed = Duration::from_std(self.origin.elapsed()).unwrap_or(Duration::zero());
        self.wall_origin + elapsed
    }
}
