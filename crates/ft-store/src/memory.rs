//! In-process store backend.
//!
//! Holds everything behind one `Mutex`.  Used by tests and by dry runs that
//! have no database.

use std::collections::VecDeque;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rustc_hash::FxHashMap;

use ft_core::{
    ArrivalRecord, Direction, GeoPoint, RouteId, TelemetryPacket, Vehicle, VehicleId,
    VehicleState, Waypoint,
};

use crate::{StoreError, StoreResult, TelemetryStore, DEFAULT_MAX_POSITIONS};

#[derive(Default)]
struct Tables {
    routes:    FxHashMap<RouteId, Vec<Waypoint>>,
    vehicles:  Vec<Vehicle>,
    states:    FxHashMap<VehicleId, VehicleState>,
    positions: FxHashMap<VehicleId, VecDeque<TelemetryPacket>>,
    arrivals:  Vec<ArrivalRecord>,
}

/// A [`TelemetryStore`] kept entirely in memory.
pub struct MemoryStore {
    tables:        Mutex<Tables>,
    max_positions: usize,
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new(DEFAULT_MAX_POSITIONS)
    }
}

impl MemoryStore {
    /// Empty store retaining at most `max_positions` packets per vehicle.
    pub fn new(max_positions: usize) -> Self {
        Self {
            tables: Mutex::new(Tables::default()),
            max_positions,
        }
    }

    /// Register a route's waypoints (any order; kept sorted by `sequence`).
    pub fn add_route(&self, route: RouteId, mut waypoints: Vec<Waypoint>) -> StoreResult<()> {
        waypoints.sort_by_key(|w| w.sequence);
        self.lock()?.routes.insert(route, waypoints);
        Ok(())
    }

    /// Register a vehicle with its initial resumption state.
    pub fn add_vehicle(&self, vehicle: Vehicle, state: VehicleState) -> StoreResult<()> {
        let mut t = self.lock()?;
        t.states.insert(vehicle.id.clone(), state);
        t.vehicles.retain(|v| v.id != vehicle.id);
        t.vehicles.push(vehicle);
        t.vehicles.sort_by(|a, b| a.id.cmp(&b.id));
        Ok(())
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Tables>> {
        self.tables.lock().map_err(|_| StoreError::Poisoned)
    }
}

impl TelemetryStore for MemoryStore {
    fn vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        Ok(self.lock()?.vehicles.clone())
    }

    fn route_waypoints(&self, route: RouteId) -> StoreResult<Vec<Waypoint>> {
        Ok(self.lock()?.routes.get(&route).cloned().unwrap_or_default())
    }

    fn load_vehicle_state(&self, vehicle: &VehicleId) -> StoreResult<VehicleState> {
        self.lock()?
            .states
            .get(vehicle)
            .cloned()
            .ok_or_else(|| StoreError::VehicleNotFound(vehicle.clone()))
    }

    fn save_vehicle_state(
        &self,
        vehicle:    &VehicleId,
        location:   GeoPoint,
        path_index: usize,
        direction:  Direction,
    ) -> StoreResult<()> {
        let mut t = self.lock()?;
        let state = t
            .states
            .get_mut(vehicle)
            .ok_or_else(|| StoreError::VehicleNotFound(vehicle.clone()))?;
        state.last_known = Some(location);
        state.path_index = path_index;
        state.direction  = direction;
        Ok(())
    }

    fn append_position(&self, packet: &TelemetryPacket) -> StoreResult<()> {
        let mut t = self.lock()?;
        let ring = t.positions.entry(packet.vehicle.clone()).or_default();
        ring.push_back(packet.clone());
        while ring.len() > self.max_positions {
            ring.pop_front();
        }
        Ok(())
    }

    fn append_arrival(&self, arrival: &ArrivalRecord) -> StoreResult<()> {
        self.lock()?.arrivals.push(arrival.clone());
        Ok(())
    }

    fn prune_arrivals(&self, cutoff: DateTime<Utc>) -> StoreResult<usize> {
        let mut t = self.lock()?;
        let before = t.arrivals.len();
        t.arrivals.retain(|a| a.timestamp >= cutoff);
        Ok(before - t.arrivals.len())
    }

    fn recent_positions(&self, vehicle: &VehicleId, limit: usize) -> StoreResult<Vec<TelemetryPacket>> {
        let t = self.lock()?;
        Ok(t.positions
            .get(vehicle)
            .map(|ring| ring.iter().rev().take(limit).cloned().collect())
            .unwrap_or_default())
    }

    fn arrivals(&self, vehicle: &VehicleId) -> StoreResult<Vec<ArrivalRecord>> {
        Ok(self
            .lock()?
            .arrivals
            .iter()
            .filter(|a| &a.vehicle == vehicle)
            .cloned()
            .collect())
    }

    fn latest_positions_for_waypoint(&self, waypoint_name: &str) -> StoreResult<Vec<TelemetryPacket>> {
        let t = self.lock()?;
        let mut out = Vec::new();
        for vehicle in &t.vehicles {
            let Some(route) = t.states.get(&vehicle.id).and_then(|s| s.route) else {
                continue;
            };
            let serves = t
                .routes
                .get(&route)
                .is_some_and(|wps| wps.iter().any(|w| w.name == waypoint_name));
            if !serves {
                continue;
            }
            if let Some(latest) = t.positions.get(&vehicle.id).and_then(|ring| ring.back()) {
                out.push(latest.clone());
            }
        }
        Ok(out)
    }
}
