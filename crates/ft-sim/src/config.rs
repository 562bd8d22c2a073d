//! Fleet configuration, loaded from JSON by the application.

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use ft_mobility::{DwellPolicy, RunnerConfig};

use crate::{FleetError, FleetResult};

/// Top-level fleet configuration.
///
/// Every field has a default, so an empty JSON object `{}` is a valid
/// configuration.  Unknown fields are rejected to catch typos.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FleetConfig {
    /// Simulate only vehicles registered in this region.  `None` simulates
    /// every vehicle that has a route.
    pub region: Option<String>,

    /// Master RNG seed for speed and dwell draws.
    pub seed: u64,

    /// Routing requests allowed in flight at once, fleet-wide.
    pub max_concurrent_route_requests: usize,

    /// Inclusive range each vehicle's constant speed is drawn from.
    pub speed_kmh_min: f64,
    pub speed_kmh_max: f64,

    pub tick_interval_secs:    u64,
    pub provider_backoff_secs: u64,

    pub major_dwell_secs:        u64,
    pub minor_dwell_secs_min:    u64,
    pub minor_dwell_secs_max:    u64,
    pub terminus_dwell_secs_min: u64,
    pub terminus_dwell_secs_max: u64,

    /// Persist resumable state every N motion ticks (0 = only at mission end).
    pub checkpoint_interval_ticks: u32,

    /// Retries of a failed store call before a runner gives up (0 = no limit).
    pub store_retry_attempts:         u32,
    /// First retry wait; doubles per retry up to the max.
    pub store_retry_backoff_secs:     u64,
    pub store_retry_backoff_max_secs: u64,

    /// How often the maintenance task prunes arrival history.
    pub prune_interval_secs:    u64,
    /// Arrival records older than this many days are pruned.
    pub arrival_retention_days: u32,

    /// Positions retained per vehicle by the store.
    pub max_positions_per_vehicle: usize,
}

impl Default for FleetConfig {
    fn default() -> Self {
        Self {
            region:                        None,
            seed:                          0,
            max_concurrent_route_requests: 4,
            speed_kmh_min:                 35.0,
            speed_kmh_max:                 60.0,
            tick_interval_secs:            1,
            provider_backoff_secs:         60,
            major_dwell_secs:              600,
            minor_dwell_secs_min:          240,
            minor_dwell_secs_max:          300,
            terminus_dwell_secs_min:       600,
            terminus_dwell_secs_max:       900,
            checkpoint_interval_ticks:     1,
            store_retry_attempts:          0,
            store_retry_backoff_secs:      1,
            store_retry_backoff_max_secs:  60,
            prune_interval_secs:           3_600,
            arrival_retention_days:        3,
            max_positions_per_vehicle:     1_000,
        }
    }
}

impl FleetConfig {
    /// Read and validate a JSON config file.
    pub fn load(path: &Path) -> FleetResult<Self> {
        let text = std::fs::read_to_string(path)
            .map_err(|source| FleetError::Io { path: path.to_path_buf(), source })?;
        Self::from_json(&text)
    }

    /// Parse and validate a JSON document.
    pub fn from_json(text: &str) -> FleetResult<Self> {
        let config: Self = serde_json::from_str(text)?;
        config.validate()?;
        Ok(config)
    }

    /// Reject settings the simulator cannot run with.
    pub fn validate(&self) -> FleetResult<()> {
        let fail = |msg: String| Err(FleetError::Config(msg));

        if self.max_concurrent_route_requests == 0 {
            return fail("max_concurrent_route_requests must be at least 1".into());
        }
        if !(self.speed_kmh_min > 0.0 && self.speed_kmh_min.is_finite() && self.speed_kmh_max.is_finite()) {
            return fail(format!("speed_kmh_min must be positive, got {}", self.speed_kmh_min));
        }
        if self.speed_kmh_min > self.speed_kmh_max {
            return fail(format!(
                "speed range is inverted: {} > {}",
                self.speed_kmh_min, self.speed_kmh_max
            ));
        }
        if self.tick_interval_secs == 0 {
            return fail("tick_interval_secs must be at least 1".into());
        }
        if self.provider_backoff_secs == 0 {
            return fail("provider_backoff_secs must be at least 1".into());
        }
        if self.minor_dwell_secs_min > self.minor_dwell_secs_max {
            return fail(format!(
                "minor dwell range is inverted: {} > {}",
                self.minor_dwell_secs_min, self.minor_dwell_secs_max
            ));
        }
        if self.terminus_dwell_secs_min > self.terminus_dwell_secs_max {
            return fail(format!(
                "terminus dwell range is inverted: {} > {}",
                self.terminus_dwell_secs_min, self.terminus_dwell_secs_max
            ));
        }
        if self.store_retry_backoff_secs > self.store_retry_backoff_max_secs {
            return fail(format!(
                "store retry backoff exceeds its cap: {} > {}",
                self.store_retry_backoff_secs, self.store_retry_backoff_max_secs
            ));
        }
        if self.prune_interval_secs == 0 {
            return fail("prune_interval_secs must be at least 1".into());
        }
        if self.max_positions_per_vehicle == 0 {
            return fail("max_positions_per_vehicle must be at least 1".into());
        }
        Ok(())
    }

    /// Settings handed to every vehicle runner.
    pub fn runner_config(&self) -> RunnerConfig {
        RunnerConfig {
            speed_kmh_min:             self.speed_kmh_min,
            speed_kmh_max:             self.speed_kmh_max,
            tick:                      Duration::from_secs(self.tick_interval_secs),
            provider_backoff:          Duration::from_secs(self.provider_backoff_secs),
            dwell:                     DwellPolicy {
                major_secs:        self.major_dwell_secs,
                minor_secs_min:    self.minor_dwell_secs_min,
                minor_secs_max:    self.minor_dwell_secs_max,
                terminus_secs_min: self.terminus_dwell_secs_min,
                terminus_secs_max: self.terminus_dwell_secs_max,
            },
            checkpoint_interval_ticks: self.checkpoint_interval_ticks,
            store_retry_attempts:      self.store_retry_attempts,
            store_retry_backoff:       Duration::from_secs(self.store_retry_backoff_secs),
            store_retry_backoff_max:   Duration::from_secs(self.store_retry_backoff_max_secs),
        }
    }

    #[inline]
    pub fn prune_interval(&self) -> Duration {
        Duration::from_secs(self.prune_interval_secs)
    }

    #[inline]
    pub fn arrival_retention(&self) -> chrono::Duration {
        chrono::Duration::days(i64::from(self.arrival_retention_days))
    }
}
