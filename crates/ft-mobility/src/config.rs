//! Per-runner tunables.

use std::time::Duration;

use crate::DwellPolicy;

/// Timing and retry settings shared by every runner of a fleet.
#[derive(Clone, Debug, PartialEq)]
pub struct RunnerConfig {
    /// Inclusive range the vehicle's constant speed is drawn from.
    pub speed_kmh_min:             f64,
    pub speed_kmh_max:             f64,
    /// Simulated time per motion step; also the real sleep between steps.
    pub tick:                      Duration,
    /// Wait before re-requesting a path after the provider returned nothing.
    pub provider_backoff:          Duration,
    pub dwell:                     DwellPolicy,
    /// Persist resumable state every N motion ticks.  0 disables mid-mission
    /// checkpoints; mission completion always persists.
    pub checkpoint_interval_ticks: u32,
    /// Retries of a failed store call before the runner gives up; 0 retries
    /// without limit.
    pub store_retry_attempts:      u32,
    /// First wait after a failed store call; doubles per retry up to
    /// `store_retry_backoff_max`.
    pub store_retry_backoff:       Duration,
    pub store_retry_backoff_max:   Duration,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            speed_kmh_min:             35.0,
            speed_kmh_max:             60.0,
            tick:                      Duration::from_secs(1),
            provider_backoff:          Duration::from_secs(60),
            dwell:                     DwellPolicy::default(),
            checkpoint_interval_ticks: 1,
            store_retry_attempts:      0,
            store_retry_backoff:       Duration::from_secs(1),
            store_retry_backoff_max:   Duration::from_secs(60),
        }
    }
}
