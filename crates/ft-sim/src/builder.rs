//! Fluent builder for constructing a [`Fleet`].

use std::sync::Arc;

use tracing::{debug, info};

use ft_core::VehicleRng;
use ft_mobility::{Clock, RunnerContext, RuntimeClock, VehicleRunner};
use ft_routing::{AdmissionGate, PathBuilder, RouteProvider};
use ft_store::TelemetryStore;

use crate::{Fleet, FleetConfig, FleetResult};

/// Fluent builder for [`Fleet<P, S>`].
///
/// # Required inputs
///
/// - [`FleetConfig`] — region filter, seed, timings, limits
/// - `P: RouteProvider` — the routing service (e.g. [`ft_routing::GeoapifyProvider`])
/// - `Arc<S>` where `S: TelemetryStore` — shared with the caller
///
/// # Optional inputs (have defaults)
///
/// | Method       | Default                                  |
/// |--------------|------------------------------------------|
/// | `.clock(c)`  | `RuntimeClock` anchored at the wall time |
///
/// # Example
///
/// ```rust,ignore
/// let store = Arc::new(SqliteStore::open(path, config.max_positions_per_vehicle)?);
/// let fleet = FleetBuilder::new(config, GeoapifyProvider::new(key)?, store).build()?;
/// let mut running = fleet.spawn();
/// running.supervise().await;
/// ```
pub struct FleetBuilder<P: RouteProvider, S: TelemetryStore> {
    config:   FleetConfig,
    provider: P,
    store:    Arc<S>,
    clock:    Option<Arc<dyn Clock>>,
}

impl<P: RouteProvider, S: TelemetryStore> FleetBuilder<P, S> {
    pub fn new(config: FleetConfig, provider: P, store: Arc<S>) -> Self {
        Self { config, provider, store, clock: None }
    }

    /// Supply the timestamp source for packets and pruning.
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = Some(clock);
        self
    }

    /// Validate the config, select eligible vehicles, and create one runner
    /// per vehicle.
    ///
    /// A vehicle is eligible when it is in the configured region (if any)
    /// and its persisted state names a route.  Runners are seeded from the
    /// fleet seed and the vehicle's position in the id-ordered roster.
    pub fn build(self) -> FleetResult<Fleet<P, S>> {
        self.config.validate()?;

        let clock = self
            .clock
            .unwrap_or_else(|| Arc::new(RuntimeClock::new()) as Arc<dyn Clock>);
        let gate = AdmissionGate::new(self.config.max_concurrent_route_requests);
        let ctx = RunnerContext {
            builder: Arc::new(PathBuilder::new(self.provider, gate)),
            store:   Arc::clone(&self.store),
            clock:   Arc::clone(&clock),
        };
        let runner_config = self.config.runner_config();

        let mut runners = Vec::new();
        for vehicle in self.store.vehicles()? {
            if let Some(region) = &self.config.region {
                if &vehicle.region != region {
                    continue;
                }
            }
            let state = self.store.load_vehicle_state(&vehicle.id)?;
            if state.route.is_none() {
                debug!(vehicle = %vehicle.id, "no route assigned; not simulated");
                continue;
            }
            let rng = VehicleRng::new(self.config.seed, runners.len() as u64);
            runners.push(VehicleRunner::new(vehicle, ctx.clone(), runner_config.clone(), rng));
        }

        info!(vehicles = runners.len(), region = ?self.config.region,
              route_slots = self.config.max_concurrent_route_requests, "fleet assembled");

        Ok(Fleet {
            runners,
            store: self.store,
            clock,
            prune_interval:    self.config.prune_interval(),
            arrival_retention: self.config.arrival_retention(),
        })
    }
}
