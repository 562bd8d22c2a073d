//! `VehicleRunner` — one long-lived task per vehicle.

use std::sync::Arc;

use chrono::{DateTime, Duration as ChronoDuration, Utc};
use tokio::sync::watch;
use tokio::task;
use tokio::time::sleep;
use tracing::{debug, info, warn};

use ft_core::{
    ArrivalRecord, GeoPoint, GpsHealth, Mission, TelemetryPacket, Vehicle, VehicleId, VehicleRng,
    VehicleStatus,
};
use ft_routing::{PathBuilder, RouteProvider, RoutedPath, StopInfo};
use ft_store::{StoreResult, TelemetryStore};

use crate::{dwell, motion, Clock, MobilityError, MobilityResult, RunnerConfig};

/// Handles shared by every runner of a fleet.
pub struct RunnerContext<P: RouteProvider, S: TelemetryStore> {
    pub builder: Arc<PathBuilder<P>>,
    pub store:   Arc<S>,
    pub clock:   Arc<dyn Clock>,
}

impl<P: RouteProvider, S: TelemetryStore> Clone for RunnerContext<P, S> {
    fn clone(&self) -> Self {
        Self {
            builder: Arc::clone(&self.builder),
            store:   Arc::clone(&self.store),
            clock:   Arc::clone(&self.clock),
        }
    }
}

/// Drives one vehicle around its route forever.
///
/// The runner exclusively owns the vehicle's position, direction, and
/// status.  Each mission cycle reloads the persisted [`VehicleState`]
/// and the route's waypoints, so the mission is recomputed from the store
/// every time.
///
/// # Lifecycle
///
/// ```text
/// initializing ──path──▶ moving ⇄ stopped ──last index──▶ finished ──dwell──▶ initializing
///      ▲  │ no geometry
///      └──┘ back off, retry
/// ```
///
/// [`VehicleState`]: ft_core::VehicleState
pub struct VehicleRunner<P: RouteProvider, S: TelemetryStore> {
    vehicle:    Vehicle,
    speed_kmh:  f64,
    ctx:        RunnerContext<P, S>,
    config:     RunnerConfig,
    rng:        VehicleRng,
    status:     watch::Sender<VehicleStatus>,
    /// Timestamp of the previous packet; keeps this vehicle's series strictly
    /// increasing.
    last_stamp: Option<DateTime<Utc>>,
}

impl<P: RouteProvider, S: TelemetryStore> VehicleRunner<P, S> {
    /// Create a runner; the vehicle's constant speed is drawn from `rng`
    /// within the configured range.
    pub fn new(vehicle: Vehicle, ctx: RunnerContext<P, S>, config: RunnerConfig, mut rng: VehicleRng) -> Self {
        let hi = config.speed_kmh_max.max(config.speed_kmh_min);
        let speed_kmh = rng.gen_range(config.speed_kmh_min..=hi);
        let (status, _) = watch::channel(VehicleStatus::Initializing);
        Self { vehicle, speed_kmh, ctx, config, rng, status, last_stamp: None }
    }

    #[inline]
    pub fn vehicle_id(&self) -> &VehicleId {
        &self.vehicle.id
    }

    #[inline]
    pub fn speed_kmh(&self) -> f64 {
        self.speed_kmh
    }

    #[inline]
    pub fn status(&self) -> VehicleStatus {
        *self.status.borrow()
    }

    /// Observe status transitions.  Receivers stay valid after the runner
    /// ends; they then report the final status.
    pub fn subscribe(&self) -> watch::Receiver<VehicleStatus> {
        self.status.subscribe()
    }

    /// Run mission cycles until an unrecoverable error.
    ///
    /// Never returns `Ok`; cancellation is the normal way to stop a runner.
    pub async fn run(mut self) -> MobilityResult<()> {
        info!(vehicle = %self.vehicle.id, speed_kmh = self.speed_kmh,
              service = self.vehicle.service_class.as_str(), "runner started");
        loop {
            self.run_mission().await?;
        }
    }

    /// One full cycle: plan, drive to the last path point, finish, flip
    /// direction, dwell at the terminus.
    pub async fn run_mission(&mut self) -> MobilityResult<()> {
        self.set_status(VehicleStatus::Initializing);

        let id = self.vehicle.id.clone();
        let vehicle = id.clone();
        let state = self.with_store("load state", move |s| s.load_vehicle_state(&vehicle)).await?;
        let route = state.route.ok_or_else(|| MobilityError::Unassigned(id.clone()))?;
        let waypoints = self.with_store("load waypoints", move |s| s.route_waypoints(route)).await?;
        let mission = Mission::new(route, state.direction, waypoints)?;

        let path = self.acquire_path(&mission).await;
        let last = path.last_index();
        let mut index = motion::resume_index(&path.points, state.last_known);
        let mut position = path.points[index];
        debug!(vehicle = %id, route = %route, direction = %mission.direction,
               points = path.points.len(), start_index = index, "mission planned");

        self.set_status(VehicleStatus::Moving);
        let step_m = motion::metres_per_tick(self.speed_kmh, self.config.tick.as_secs_f64());
        let mut ticks: u64 = 0;

        while index < last {
            let step = motion::advance(&path.points, position, index, step_m);
            position = step.position;
            index = step.path_index;
            self.emit(position, step.heading_deg).await?;

            if step.reached {
                if let Some(stop) = path.stops.get(index) {
                    self.visit(stop, position, step.heading_deg).await?;
                }
            }

            ticks += 1;
            let every = u64::from(self.config.checkpoint_interval_ticks);
            if every > 0 && ticks % every == 0 {
                let (vehicle, direction) = (id.clone(), mission.direction);
                self.with_store("checkpoint", move |s| s.save_vehicle_state(&vehicle, position, index, direction))
                    .await?;
            }

            sleep(self.config.tick).await;
        }

        self.set_status(VehicleStatus::Finished);
        self.emit(position, 0.0).await?;

        let next = mission.direction.flipped();
        let vehicle = id.clone();
        self.with_store("save state", move |s| s.save_vehicle_state(&vehicle, position, 0, next)).await?;

        let dwell = self.config.dwell.at_terminus(&mut self.rng);
        info!(vehicle = %id, route = %route, next_direction = %next,
              dwell_secs = dwell.as_secs(), "mission finished");
        sleep(dwell).await;
        Ok(())
    }

    // ── Internals ─────────────────────────────────────────────────────────

    /// Request a path until the provider yields one.  Status stays
    /// `Initializing` and no packets are emitted meanwhile.
    async fn acquire_path(&self, mission: &Mission) -> RoutedPath {
        loop {
            let path = self.ctx.builder.build(mission).await;
            if !path.is_empty() {
                return path;
            }
            warn!(vehicle = %self.vehicle.id, route = %mission.route,
                  backoff_secs = self.config.provider_backoff.as_secs(),
                  "no geometry; retrying after backoff");
            sleep(self.config.provider_backoff).await;
        }
    }

    /// Handle arrival at a mapped waypoint: halt, record, dwell.
    async fn visit(&mut self, stop: &StopInfo, position: GeoPoint, heading: f64) -> MobilityResult<()> {
        if !dwell::halts_at(stop, self.vehicle.service_class) {
            debug!(vehicle = %self.vehicle.id, waypoint = %stop.waypoint, "skipping stop");
            return Ok(());
        }

        self.set_status(VehicleStatus::Stopped);
        let timestamp = self.emit(position, heading).await?;
        let arrival = ArrivalRecord { vehicle: self.vehicle.id.clone(), waypoint: stop.waypoint, timestamp };
        self.with_store("append arrival", move |s| s.append_arrival(&arrival)).await?;

        let dwell = self.config.dwell.at_stop(stop, &mut self.rng);
        debug!(vehicle = %self.vehicle.id, waypoint = %stop.waypoint, major = stop.is_major,
               dwell_secs = dwell.as_secs(), "arrived at stop");
        sleep(dwell).await;

        self.set_status(VehicleStatus::Moving);
        Ok(())
    }

    /// Build and persist one packet at the current status; returns its
    /// timestamp.
    async fn emit(&mut self, position: GeoPoint, heading: f64) -> MobilityResult<DateTime<Utc>> {
        let status = self.status();
        let speed = if status == VehicleStatus::Moving { self.speed_kmh } else { 0.0 };
        let timestamp = self.next_stamp();
        let packet = TelemetryPacket::new(
            self.vehicle.id.clone(),
            timestamp,
            position,
            speed,
            heading,
            status,
            GpsHealth::Functional,
        );
        self.with_store("append position", move |s| s.append_position(&packet)).await?;
        Ok(timestamp)
    }

    fn next_stamp(&mut self) -> DateTime<Utc> {
        let now = self.ctx.clock.now();
        let stamp = match self.last_stamp {
            Some(prev) if now <= prev => prev + ChronoDuration::microseconds(1),
            _ => now,
        };
        self.last_stamp = Some(stamp);
        stamp
    }

    fn set_status(&self, status: VehicleStatus) {
        self.status.send_replace(status);
    }

    /// Run a store call on the blocking pool, retrying failures with a
    /// doubling backoff capped at `store_retry_backoff_max`.
    ///
    /// Permanent errors end the runner at once.  Anything else is retried
    /// until `store_retry_attempts` is spent (never, when it is 0).
    async fn with_store<T, F>(&self, op: &'static str, call: F) -> MobilityResult<T>
    where
        T: Send + 'static,
        F: Fn(&S) -> StoreResult<T> + Send + Sync + 'static,
    {
        let call = Arc::new(call);
        let limit = self.config.store_retry_attempts;
        let mut backoff = self.config.store_retry_backoff;
        let mut retries = 0u32;
        loop {
            let (store, call) = (Arc::clone(&self.ctx.store), Arc::clone(&call));
            let err = match task::spawn_blocking(move || (*call)(&*store)).await? {
                Ok(value) => return Ok(value),
                Err(err) => err,
            };
            if err.is_permanent() || (limit > 0 && retries >= limit) {
                return Err(MobilityError::Store(err));
            }
            retries += 1;
            warn!(vehicle = %self.vehicle.id, op, attempt = retries, error = %err,
                  backoff_ms = backoff.as_millis() as u64, "store call failed; retrying");
            sleep(backoff).await;
            backoff = backoff.saturating_mul(2).min(self.config.store_retry_backoff_max);
        }
    }
}
