//! Unit tests for ft-mobility.
//!
//! Runner scenarios use a paused tokio clock so tick, dwell, and backoff
//! sleeps complete instantly and deterministically.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::thread::{self, ThreadId};
use std::time::Duration;

use chrono::{DateTime, TimeZone, Utc};

use ft_core::{
    ArrivalRecord, Direction, GeoPoint, RouteId, ServiceClass, TelemetryPacket, Vehicle, VehicleId,
    VehicleRng, VehicleState, VehicleStatus, Waypoint, WaypointId, WaypointKind,
};
use ft_routing::{AdmissionGate, PathBuilder, RouteProvider, RoutingError, RoutingResult};
use ft_store::{MemoryStore, StoreError, StoreResult, TelemetryStore};

use crate::{DwellPolicy, RunnerConfig, RunnerContext, RuntimeClock, VehicleRunner};

// ── Helpers ───────────────────────────────────────────────────────────────────

fn t0() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 9, 0, 0).unwrap()
}

/// Geometry is the requested waypoints themselves.
struct EchoProvider;

impl RouteProvider for EchoProvider {
    async fn route(&self, waypoints: &[GeoPoint]) -> RoutingResult<Vec<GeoPoint>> {
        Ok(waypoints.to_vec())
    }
}

/// Always fails; counts requests.
#[derive(Default)]
struct DownProvider {
    calls: Arc<AtomicUsize>,
}

impl RouteProvider for DownProvider {
    async fn route(&self, _waypoints: &[GeoPoint]) -> RoutingResult<Vec<GeoPoint>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(RoutingError::Api("502 Bad Gateway".into()))
    }
}

fn wp(id: i64, sequence: u32, kind: WaypointKind, lon: f64, skippable: bool) -> Waypoint {
    Waypoint {
        id:            WaypointId(id),
        sequence,
        name:          format!("wp-{id}"),
        location:      GeoPoint::new(0.0, lon),
        kind,
        is_major_stop: false,
        is_skippable:  skippable,
    }
}

/// start(0,0) → stop(0,0.01) → end(0,0.02), segments of ~1.1 km.
fn equator_route(stop_skippable: bool) -> Vec<Waypoint> {
    vec![
        wp(1, 1, WaypointKind::Start, 0.0, false),
        wp(2, 2, WaypointKind::Stop, 0.01, stop_skippable),
        wp(3, 3, WaypointKind::End, 0.02, false),
    ]
}

/// Fast enough that one 1 s tick covers a whole segment; short dwells.
fn fast_config() -> RunnerConfig {
    RunnerConfig {
        speed_kmh_min:             5_000.0,
        speed_kmh_max:             5_000.0,
        tick:                      Duration::from_secs(1),
        provider_backoff:          Duration::from_secs(60),
        dwell:                     DwellPolicy {
            major_secs:        30,
            minor_secs_min:    10,
            minor_secs_max:    10,
            terminus_secs_min: 20,
            terminus_secs_max: 20,
        },
        checkpoint_interval_ticks: 1,
        store_retry_attempts:      0,
        store_retry_backoff:       Duration::from_secs(1),
        store_retry_backoff_max:   Duration::from_secs(4),
    }
}

fn vehicle(class: ServiceClass) -> Vehicle {
    Vehicle {
        id:            VehicleId::from("bus-1"),
        region:        "Punjab".into(),
        seats:         Some(40),
        service_class: class,
    }
}

fn seeded_store(class: ServiceClass, waypoints: Vec<Waypoint>, state: impl FnOnce(&mut VehicleState)) -> Arc<MemoryStore> {
    let store = MemoryStore::new(100);
    store.add_route(RouteId(7), waypoints).unwrap();
    let v = vehicle(class);
    let mut s = VehicleState::new(v.id.clone(), Some(RouteId(7)));
    state(&mut s);
    store.add_vehicle(v, s).unwrap();
    Arc::new(store)
}

fn runner<P: RouteProvider, S: TelemetryStore>(
    provider: P,
    store:    Arc<S>,
    class:    ServiceClass,
    config:   RunnerConfig,
) -> VehicleRunner<P, S> {
    let ctx = RunnerContext {
        builder: Arc::new(PathBuilder::new(provider, AdmissionGate::new(4))),
        store,
        clock:   Arc::new(RuntimeClock::starting_at(t0())),
    };
    VehicleRunner::new(vehicle(class), ctx, config, VehicleRng::new(42, 0))
}

/// Packets for bus-1, oldest first.
fn packets<S: TelemetryStore>(store: &S) -> Vec<TelemetryPacket> {
    let mut out = store.recent_positions(&VehicleId::from("bus-1"), usize::MAX).unwrap();
    out.reverse();
    out
}

fn arrival_ids<S: TelemetryStore>(store: &S) -> Vec<i64> {
    store
        .arrivals(&VehicleId::from("bus-1"))
        .unwrap()
        .iter()
        .map(|a: &ArrivalRecord| a.waypoint.0)
        .collect()
}

// ── Motion ────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod motion {
    use ft_core::GeoPoint;

    use crate::motion::{advance, metres_per_tick, resume_index};

    fn line() -> Vec<GeoPoint> {
        (0..5).map(|i| GeoPoint::new(0.0, i as f64 * 0.01)).collect()
    }

    #[test]
    fn speed_to_metres() {
        assert!((metres_per_tick(36.0, 1.0) - 10.0).abs() < 1e-9);
        assert!((metres_per_tick(54.0, 2.0) - 30.0).abs() < 1e-9);
    }

    #[test]
    fn overshoot_lands_exactly_on_next_point() {
        let pts = line();
        let step = advance(&pts, pts[1], 1, 1e6);
        assert_eq!(step.position, pts[2]);
        assert_eq!(step.path_index, 2);
        assert!(step.reached);
        assert!((step.heading_deg - 90.0).abs() < 1e-6);
    }

    #[test]
    fn partial_step_moves_along_bearing() {
        let pts = line();
        let step = advance(&pts, pts[0], 0, 100.0);
        assert_eq!(step.path_index, 0);
        assert!(!step.reached);
        assert!((pts[0].distance_m(step.position) - 100.0).abs() < 0.01);
        assert!(step.position.lon > 0.0 && step.position.lon < 0.01);
    }

    #[test]
    fn exact_remaining_distance_counts_as_reached() {
        let pts = line();
        let d = pts[0].distance_m(pts[1]);
        let step = advance(&pts, pts[0], 0, d);
        assert!(step.reached);
        assert_eq!(step.path_index, 1);
    }

    #[test]
    fn resume_without_position_starts_at_zero() {
        assert_eq!(resume_index(&line(), None), 0);
    }

    #[test]
    fn resume_snaps_to_nearest_point() {
        let pts = line();
        assert_eq!(resume_index(&pts, Some(GeoPoint::new(0.0001, 0.0199))), 2);
        assert_eq!(resume_index(&pts, Some(pts[1])), 1);
    }

    #[test]
    fn resume_never_lands_on_final_index() {
        let pts = line();
        let last = pts.len() - 1;
        for p in &pts {
            assert!(resume_index(&pts, Some(*p)) < last);
        }
        assert_eq!(resume_index(&pts, Some(GeoPoint::new(0.0, 5.0))), last - 1);
    }
}

// ── Dwell policy ──────────────────────────────────────────────────────────────

#[cfg(test)]
mod dwell {
    use std::time::Duration;

    use ft_core::{ServiceClass, VehicleRng, WaypointId};
    use ft_routing::StopInfo;

    use crate::dwell::halts_at;
    use crate::DwellPolicy;

    fn stop(is_major: bool, is_skippable: bool) -> StopInfo {
        StopInfo { waypoint: WaypointId(1), is_major, is_skippable }
    }

    #[test]
    fn major_stop_uses_fixed_dwell() {
        let mut rng = VehicleRng::new(1, 0);
        let d = DwellPolicy::default().at_stop(&stop(true, false), &mut rng);
        assert_eq!(d, Duration::from_secs(600));
    }

    #[test]
    fn ordinary_and_terminus_dwells_within_range() {
        let policy = DwellPolicy::default();
        let mut rng = VehicleRng::new(1, 3);
        for _ in 0..200 {
            let minor = policy.at_stop(&stop(false, false), &mut rng).as_secs();
            assert!((240..=300).contains(&minor));
            let end = policy.at_terminus(&mut rng).as_secs();
            assert!((600..=900).contains(&end));
        }
    }

    #[test]
    fn none_policy_is_zero() {
        let mut rng = VehicleRng::new(1, 0);
        let policy = DwellPolicy::none();
        assert_eq!(policy.at_stop(&stop(false, false), &mut rng), Duration::ZERO);
        assert_eq!(policy.at_terminus(&mut rng), Duration::ZERO);
    }

    #[test]
    fn only_express_skips_skippable_stops() {
        assert!(!halts_at(&stop(false, true), ServiceClass::Express));
        assert!(halts_at(&stop(false, true), ServiceClass::Local));
        assert!(halts_at(&stop(false, false), ServiceClass::Express));
        assert!(halts_at(&stop(true, false), ServiceClass::Local));
    }
}

// ── Clock ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod clock {
    use std::time::Duration;

    use super::t0;
    use crate::{Clock, RuntimeClock};

    #[tokio::test(start_paused = true)]
    async fn runtime_clock_follows_tokio_time() {
        let clock = RuntimeClock::starting_at(t0());
        assert_eq!(clock.now(), t0());
        tokio::time::advance(Duration::from_secs(90)).await;
        assert_eq!((clock.now() - t0()).num_seconds(), 90);
    }
}

// ── Runner scenarios ──────────────────────────────────────────────────────────

#[cfg(test)]
mod runner {
    use super::*;

    #[tokio::test(start_paused = true)]
    async fn speed_drawn_within_configured_range() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let config = RunnerConfig::default();
        for slot in 0..20 {
            let ctx = RunnerContext {
                builder: Arc::new(PathBuilder::new(EchoProvider, AdmissionGate::new(4))),
                store:   Arc::clone(&store),
                clock:   Arc::new(RuntimeClock::starting_at(t0())),
            };
            let r = VehicleRunner::new(vehicle(ServiceClass::Local), ctx, config.clone(), VehicleRng::new(9, slot));
            assert!((35.0..=60.0).contains(&r.speed_kmh()));
        }
    }

    #[tokio::test(start_paused = true)]
    async fn arriving_at_a_stop_halts_and_records_arrival() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();

        let pk = packets(&*store);
        let statuses: Vec<_> = pk.iter().map(|p| p.status).collect();
        assert_eq!(
            statuses,
            [
                VehicleStatus::Moving,
                VehicleStatus::Stopped,
                VehicleStatus::Moving,
                VehicleStatus::Stopped,
                VehicleStatus::Finished,
            ]
        );

        let halted = &pk[1];
        assert_eq!(halted.location, GeoPoint::new(0.0, 0.01));
        assert_eq!(halted.speed_kmh, 0.0);
        assert_eq!(pk[0].speed_kmh, 5_000.0);

        let arrivals = store.arrivals(&VehicleId::from("bus-1")).unwrap();
        assert_eq!(arrival_ids(&*store), [2, 3]);
        assert_eq!(arrivals[0].timestamp, halted.timestamp);
    }

    #[tokio::test(start_paused = true)]
    async fn express_passes_skippable_stop() {
        let store = seeded_store(ServiceClass::Express, equator_route(true), |_| {});
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Express, fast_config());
        r.run_mission().await.unwrap();

        assert_eq!(arrival_ids(&*store), [3]);
        let pk = packets(&*store);
        assert!(
            pk.iter()
                .filter(|p| p.location == GeoPoint::new(0.0, 0.01))
                .all(|p| p.status == VehicleStatus::Moving)
        );
    }

    #[tokio::test(start_paused = true)]
    async fn local_halts_at_skippable_stop() {
        let store = seeded_store(ServiceClass::Local, equator_route(true), |_| {});
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();
        assert_eq!(arrival_ids(&*store), [2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn finishing_flips_direction_and_persists_index_zero() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();

        assert_eq!(r.status(), VehicleStatus::Finished);
        let state = store.load_vehicle_state(&VehicleId::from("bus-1")).unwrap();
        assert_eq!(state.direction, Direction::Backward);
        assert_eq!(state.path_index, 0);
        assert_eq!(state.last_known, Some(GeoPoint::new(0.0, 0.02)));

        let last = packets(&*store).pop().unwrap();
        assert_eq!(last.status, VehicleStatus::Finished);
        assert_eq!(last.speed_kmh, 0.0);
        assert_eq!(last.heading_deg, 0.0);
    }

    #[tokio::test(start_paused = true)]
    async fn return_trip_runs_backward_and_flips_again() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();
        r.run_mission().await.unwrap();

        // The route's start terminus is never an arrival, even when reached.
        assert_eq!(arrival_ids(&*store), [2, 3, 2]);
        let halts = packets(&*store).iter().filter(|p| p.status == VehicleStatus::Stopped).count();
        assert_eq!(halts, 3);
        let state = store.load_vehicle_state(&VehicleId::from("bus-1")).unwrap();
        assert_eq!(state.direction, Direction::Forward);
        assert_eq!(state.last_known, Some(GeoPoint::new(0.0, 0.0)));

        // Heading west on the way back.
        let westbound = packets(&*store)
            .into_iter()
            .filter(|p| p.status == VehicleStatus::Moving)
            .last()
            .unwrap();
        assert!((westbound.heading_deg - 270.0).abs() < 0.01);
    }

    #[tokio::test(start_paused = true)]
    async fn resume_from_persisted_position() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |s| {
            s.last_known = Some(GeoPoint::new(0.0, 0.0199));
        });
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();

        // Clamped to the penultimate point, so only the final stop remains.
        assert_eq!(arrival_ids(&*store), [3]);
        assert_eq!(packets(&*store)[0].location, GeoPoint::new(0.0, 0.02));
    }

    #[tokio::test(start_paused = true)]
    async fn timestamps_strictly_increase() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();
        r.run_mission().await.unwrap();

        let pk = packets(&*store);
        assert!(pk.windows(2).all(|w| w[0].timestamp < w[1].timestamp));
        // Stop dwell shows up as elapsed time between the halt and the next move.
        assert!((pk[2].timestamp - pk[1].timestamp).num_seconds() >= 10);
    }

    #[tokio::test(start_paused = true)]
    async fn checkpoints_persist_mid_segment_position() {
        let mut config = fast_config();
        config.speed_kmh_min = 36.0;
        config.speed_kmh_max = 36.0;
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, config);
        let task = tokio::spawn(r.run());

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let state = store.load_vehicle_state(&VehicleId::from("bus-1")).unwrap();
        task.abort();

        let at = state.last_known.unwrap();
        assert_eq!(state.path_index, 0);
        assert_eq!(state.direction, Direction::Forward);
        assert!(at.lon > 0.0 && at.lon < 0.01);
        assert!((GeoPoint::new(0.0, 0.0).distance_m(at) - 30.0).abs() < 0.5);
    }

    #[tokio::test(start_paused = true)]
    async fn checkpoints_can_be_disabled() {
        let mut config = fast_config();
        config.speed_kmh_min = 36.0;
        config.speed_kmh_max = 36.0;
        config.checkpoint_interval_ticks = 0;
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, config);
        let task = tokio::spawn(r.run());

        tokio::time::sleep(Duration::from_millis(2_500)).await;
        let state = store.load_vehicle_state(&VehicleId::from("bus-1")).unwrap();
        task.abort();

        assert_eq!(state.last_known, None);
        assert_eq!(packets(&*store).len(), 3);
    }

    #[tokio::test(start_paused = true)]
    async fn no_geometry_backs_off_without_packets() {
        let provider = DownProvider::default();
        let calls = Arc::clone(&provider.calls);
        let store = seeded_store(ServiceClass::Local, equator_route(false), |_| {});
        let r = runner(provider, Arc::clone(&store), ServiceClass::Local, fast_config());
        let status = r.subscribe();
        let task = tokio::spawn(r.run());

        tokio::time::sleep(Duration::from_secs(30)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 1);
        assert_eq!(*status.borrow(), VehicleStatus::Initializing);
        assert!(packets(&*store).is_empty());

        tokio::time::sleep(Duration::from_secs(60)).await;
        assert_eq!(calls.load(Ordering::SeqCst), 2);
        assert_eq!(*status.borrow(), VehicleStatus::Initializing);
        assert!(packets(&*store).is_empty());
        task.abort();
    }

    #[tokio::test(start_paused = true)]
    async fn unassigned_vehicle_ends_runner() {
        let store = seeded_store(ServiceClass::Local, equator_route(false), |s| s.route = None);
        let r = runner(EchoProvider, store, ServiceClass::Local, fast_config());
        assert!(matches!(r.run().await, Err(crate::MobilityError::Unassigned(_))));
    }

    #[tokio::test(start_paused = true)]
    async fn single_waypoint_route_is_fatal() {
        let store = seeded_store(ServiceClass::Local, vec![wp(1, 1, WaypointKind::Start, 0.0, false)], |_| {});
        let r = runner(EchoProvider, store, ServiceClass::Local, fast_config());
        assert!(matches!(r.run().await, Err(crate::MobilityError::Mission(_))));
    }
}

// ── Store failures ────────────────────────────────────────────────────────────

/// Delegates to a `MemoryStore`, failing the first `failures` position
/// appends.  Records the thread every append runs on.
struct FlakyStore {
    inner:    MemoryStore,
    failures: AtomicUsize,
    threads:  Mutex<Vec<ThreadId>>,
}

impl FlakyStore {
    fn new(inner: MemoryStore, failures: usize) -> Self {
        Self { inner, failures: AtomicUsize::new(failures), threads: Mutex::new(Vec::new()) }
    }
}

impl TelemetryStore for FlakyStore {
    fn vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        self.inner.vehicles()
    }

    fn route_waypoints(&self, route: RouteId) -> StoreResult<Vec<Waypoint>> {
        self.inner.route_waypoints(route)
    }

    fn load_vehicle_state(&self, vehicle: &VehicleId) -> StoreResult<VehicleState> {
        self.inner.load_vehicle_state(vehicle)
    }

    fn save_vehicle_state(&self, vehicle: &VehicleId, location: GeoPoint, path_index: usize, direction: Direction) -> StoreResult<()> {
        self.inner.save_vehicle_state(vehicle, location, path_index, direction)
    }

    fn append_position(&self, packet: &TelemetryPacket) -> StoreResult<()> {
        self.threads.lock().unwrap().push(thread::current().id());
        let failing = self
            .failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok();
        if failing {
            return Err(StoreError::Poisoned);
        }
        self.inner.append_position(packet)
    }

    fn append_arrival(&self, arrival: &ArrivalRecord) -> StoreResult<()> {
        self.inner.append_arrival(arrival)
    }

    fn prune_arrivals(&self, cutoff: DateTime<Utc>) -> StoreResult<usize> {
        self.inner.prune_arrivals(cutoff)
    }

    fn recent_positions(&self, vehicle: &VehicleId, limit: usize) -> StoreResult<Vec<TelemetryPacket>> {
        self.inner.recent_positions(vehicle, limit)
    }

    fn arrivals(&self, vehicle: &VehicleId) -> StoreResult<Vec<ArrivalRecord>> {
        self.inner.arrivals(vehicle)
    }

    fn latest_positions_for_waypoint(&self, waypoint_name: &str) -> StoreResult<Vec<TelemetryPacket>> {
        self.inner.latest_positions_for_waypoint(waypoint_name)
    }
}

fn flaky(failures: usize) -> Arc<FlakyStore> {
    let inner = MemoryStore::new(100);
    inner.add_route(RouteId(7), equator_route(false)).unwrap();
    let v = vehicle(ServiceClass::Local);
    let state = VehicleState::new(v.id.clone(), Some(RouteId(7)));
    inner.add_vehicle(v, state).unwrap();
    Arc::new(FlakyStore::new(inner, failures))
}

#[cfg(test)]
mod store_failures {
    use tokio::time::Instant;

    use super::*;

    #[tokio::test(start_paused = true)]
    async fn transient_failures_are_retried() {
        let store = flaky(2);
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();
        assert_eq!(packets(&*store).len(), 5);
    }

    #[tokio::test(start_paused = true)]
    async fn persistent_failure_ends_runner() {
        let store = flaky(usize::MAX);
        let mut config = fast_config();
        config.store_retry_attempts = 1;
        let r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, config);
        let result = r.run().await;
        assert!(matches!(result, Err(crate::MobilityError::Store(StoreError::Poisoned))));
        assert!(packets(&*store).is_empty());
    }

    #[tokio::test(start_paused = true)]
    async fn long_outage_is_survived_without_a_retry_cap() {
        let store = flaky(25);
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();
        assert_eq!(packets(&*store).len(), 5);
        assert_eq!(arrival_ids(&*store), [2, 3]);
    }

    #[tokio::test(start_paused = true)]
    async fn retry_backoff_doubles_up_to_cap() {
        let clean = flaky(0);
        let mut r = runner(EchoProvider, Arc::clone(&clean), ServiceClass::Local, fast_config());
        let start = Instant::now();
        r.run_mission().await.unwrap();
        let baseline = start.elapsed();

        let store = flaky(5);
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        let start = Instant::now();
        r.run_mission().await.unwrap();

        // 1 + 2 + 4 + 4 + 4 with the cap at 4 s.
        assert_eq!(start.elapsed() - baseline, Duration::from_secs(15));
    }

    #[tokio::test(start_paused = true)]
    async fn store_calls_run_off_the_runtime_thread() {
        let store = flaky(0);
        let mut r = runner(EchoProvider, Arc::clone(&store), ServiceClass::Local, fast_config());
        r.run_mission().await.unwrap();

        let runtime = thread::current().id();
        let threads = store.threads.lock().unwrap();
        assert_eq!(threads.len(), 5);
        assert!(threads.iter().all(|&t| t != runtime));
    }

    #[tokio::test(start_paused = true)]
    async fn missing_vehicle_is_not_retried() {
        let store = MemoryStore::new(100);
        store.add_route(RouteId(7), equator_route(false)).unwrap();
        let r = runner(EchoProvider, Arc::new(store), ServiceClass::Local, fast_config());

        let start = Instant::now();
        let result = r.run().await;
        assert!(matches!(result, Err(crate::MobilityError::Store(StoreError::VehicleNotFound(_)))));
        assert_eq!(start.elapsed(), Duration::ZERO);
    }
}
