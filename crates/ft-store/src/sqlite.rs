//! SQLite store backend (feature `sqlite`).
//!
//! One database file holding reference data (`routes`, `waypoints`,
//! `vehicles`) and time-series data (`live_gps_positions`,
//! `waypoint_history`).  Timestamps are stored as RFC 3339 text in the fixed
//! format of [`ft_core::format_timestamp`], so text comparison is
//! chronological.

use std::path::Path;
use std::sync::{Mutex, MutexGuard};

use chrono::{DateTime, Utc};
use rusqlite::{params, Connection, OptionalExtension, Row};

use ft_core::{
    format_timestamp, parse_timestamp, ArrivalRecord, Direction, GeoPoint, RouteId,
    TelemetryPacket, Vehicle, VehicleId, VehicleState, Waypoint, WaypointId,
};

use crate::{StoreError, StoreResult, TelemetryStore};

const SCHEMA: &str = "
    PRAGMA journal_mode = WAL;
    PRAGMA synchronous  = NORMAL;
    CREATE TABLE IF NOT EXISTS routes (
        route_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        route_name TEXT NOT NULL UNIQUE
    );
    CREATE TABLE IF NOT EXISTS waypoints (
        waypoint_id   INTEGER PRIMARY KEY AUTOINCREMENT,
        route_id      INTEGER NOT NULL REFERENCES routes (route_id),
        sequence      INTEGER NOT NULL,
        waypoint_name TEXT    NOT NULL,
        is_major_stop BOOLEAN DEFAULT 0,
        is_skippable  BOOLEAN DEFAULT 0,
        latitude      REAL    NOT NULL,
        longitude     REAL    NOT NULL,
        waypoint_type TEXT    NOT NULL,
        UNIQUE (route_id, sequence)
    );
    CREATE TABLE IF NOT EXISTS vehicles (
        vehicle_id         TEXT PRIMARY KEY,
        license_plate      TEXT NOT NULL UNIQUE,
        vehicle_type       TEXT NOT NULL,
        region             TEXT NOT NULL,
        seats              INTEGER,
        service_type       TEXT DEFAULT 'Local',
        current_route_id   INTEGER REFERENCES routes (route_id),
        last_known_lat     REAL,
        last_known_lon     REAL,
        last_segment_index INTEGER DEFAULT 0,
        direction          TEXT DEFAULT 'forward'
    );
    CREATE TABLE IF NOT EXISTS live_gps_positions (
        id         INTEGER PRIMARY KEY AUTOINCREMENT,
        vehicle_id TEXT NOT NULL,
        timestamp  TEXT NOT NULL,
        latitude   REAL NOT NULL,
        longitude  REAL NOT NULL,
        speed_kmh  REAL,
        heading    REAL,
        status     TEXT,
        gps_status TEXT DEFAULT 'functional'
    );
    CREATE TABLE IF NOT EXISTS waypoint_history (
        history_id        INTEGER PRIMARY KEY AUTOINCREMENT,
        vehicle_id        TEXT    NOT NULL REFERENCES vehicles (vehicle_id),
        waypoint_id       INTEGER NOT NULL REFERENCES waypoints (waypoint_id),
        arrival_timestamp TEXT    NOT NULL
    );
    CREATE INDEX IF NOT EXISTS idx_live_vehicle_ts
        ON live_gps_positions (vehicle_id, timestamp DESC);
    CREATE INDEX IF NOT EXISTS idx_history_vehicle_ts
        ON waypoint_history (vehicle_id, arrival_timestamp DESC);
";

const PACKET_COLUMNS: &str =
    "vehicle_id, timestamp, latitude, longitude, speed_kmh, heading, status, gps_status";

/// A [`TelemetryStore`] backed by one SQLite database.
///
/// The connection sits behind a `Mutex`; each trait method holds it for one
/// statement or one transaction, which serialises the insert-then-trim of
/// `append_position` per vehicle.
pub struct SqliteStore {
    conn:          Mutex<Connection>,
    max_positions: usize,
}

impl SqliteStore {
    /// Open (or create) the database at `path` and ensure the schema exists.
    pub fn open(path: &Path, max_positions: usize) -> StoreResult<Self> {
        Self::from_connection(Connection::open(path)?, max_positions)
    }

    /// A private in-memory database, mainly for tests.
    pub fn open_in_memory(max_positions: usize) -> StoreResult<Self> {
        Self::from_connection(Connection::open_in_memory()?, max_positions)
    }

    fn from_connection(conn: Connection, max_positions: usize) -> StoreResult<Self> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self { conn: Mutex::new(conn), max_positions })
    }

    fn lock(&self) -> StoreResult<MutexGuard<'_, Connection>> {
        self.conn.lock().map_err(|_| StoreError::Poisoned)
    }

    /// Checkpoint the WAL into the main database file.
    pub fn checkpoint(&self) -> StoreResult<()> {
        self.lock()?.execute_batch("PRAGMA wal_checkpoint(TRUNCATE);")?;
        Ok(())
    }
}

// ── Row decoding ──────────────────────────────────────────────────────────────

/// Columns in [`PACKET_COLUMNS`] order, as raw SQLite values.
type PacketRow = (String, String, f64, f64, Option<f64>, Option<f64>, Option<String>, Option<String>);

fn packet_row(row: &Row<'_>) -> rusqlite::Result<PacketRow> {
    Ok((
        row.get(0)?,
        row.get(1)?,
        row.get(2)?,
        row.get(3)?,
        row.get(4)?,
        row.get(5)?,
        row.get(6)?,
        row.get(7)?,
    ))
}

fn decode_packet(raw: PacketRow) -> StoreResult<TelemetryPacket> {
    let (vehicle, ts, lat, lon, speed, heading, status, gps) = raw;
    Ok(TelemetryPacket {
        vehicle:     VehicleId(vehicle),
        timestamp:   parse_timestamp(&ts)?,
        location:    GeoPoint::new(lat, lon),
        speed_kmh:   speed.unwrap_or(0.0),
        heading_deg: heading.unwrap_or(0.0),
        status:      status.as_deref().unwrap_or("initializing").parse()?,
        gps:         gps.as_deref().unwrap_or("functional").parse()?,
    })
}

impl TelemetryStore for SqliteStore {
    fn vehicles(&self) -> StoreResult<Vec<Vehicle>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT vehicle_id, region, seats, service_type FROM vehicles ORDER BY vehicle_id",
        )?;
        let rows = stmt
            .query_map([], |r| {
                Ok((
                    r.get::<_, String>(0)?,
                    r.get::<_, String>(1)?,
                    r.get::<_, Option<u32>>(2)?,
                    r.get::<_, Option<String>>(3)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, region, seats, service)| -> StoreResult<Vehicle> {
                Ok(Vehicle {
                    id: VehicleId(id),
                    region,
                    seats,
                    service_class: service.as_deref().unwrap_or("Local").parse()?,
                })
            })
            .collect()
    }

    fn route_waypoints(&self, route: RouteId) -> StoreResult<Vec<Waypoint>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT waypoint_id, sequence, waypoint_name, latitude, longitude, waypoint_type, \
                    is_major_stop, is_skippable \
             FROM waypoints WHERE route_id = ?1 ORDER BY sequence ASC",
        )?;
        let rows = stmt
            .query_map(params![route.0], |r| {
                Ok((
                    r.get::<_, i64>(0)?,
                    r.get::<_, u32>(1)?,
                    r.get::<_, String>(2)?,
                    r.get::<_, f64>(3)?,
                    r.get::<_, f64>(4)?,
                    r.get::<_, String>(5)?,
                    r.get::<_, Option<bool>>(6)?,
                    r.get::<_, Option<bool>>(7)?,
                ))
            })?
            .collect::<rusqlite::Result<Vec<_>>>()?;

        rows.into_iter()
            .map(|(id, sequence, name, lat, lon, kind, major, skip)| -> StoreResult<Waypoint> {
                Ok(Waypoint {
                    id:            WaypointId(id),
                    sequence,
                    name,
                    location:      GeoPoint::new(lat, lon),
                    kind:          kind.parse()?,
                    is_major_stop: major.unwrap_or(false),
                    is_skippable:  skip.unwrap_or(false),
                })
            })
            .collect()
    }

    fn load_vehicle_state(&self, vehicle: &VehicleId) -> StoreResult<VehicleState> {
        let conn = self.lock()?;
        let row = conn
            .query_row(
                "SELECT current_route_id, last_known_lat, last_known_lon, last_segment_index, direction \
                 FROM vehicles WHERE vehicle_id = ?1",
                params![vehicle.as_str()],
                |r| {
                    Ok((
                        r.get::<_, Option<i64>>(0)?,
                        r.get::<_, Option<f64>>(1)?,
                        r.get::<_, Option<f64>>(2)?,
                        r.get::<_, Option<i64>>(3)?,
                        r.get::<_, Option<String>>(4)?,
                    ))
                },
            )
            .optional()?
            .ok_or_else(|| StoreError::VehicleNotFound(vehicle.clone()))?;

        let (route, lat, lon, index, direction) = row;
        Ok(VehicleState {
            vehicle:    vehicle.clone(),
            route:      route.map(RouteId),
            direction:  direction.as_deref().unwrap_or("forward").parse::<Direction>()?,
            last_known: lat.zip(lon).map(|(lat, lon)| GeoPoint::new(lat, lon)),
            path_index: index.unwrap_or(0).max(0) as usize,
        })
    }

    fn save_vehicle_state(
        &self,
        vehicle:    &VehicleId,
        location:   GeoPoint,
        path_index: usize,
        direction:  Direction,
    ) -> StoreResult<()> {
        let updated = self.lock()?.execute(
            "UPDATE vehicles SET last_known_lat = ?1, last_known_lon = ?2, \
                    last_segment_index = ?3, direction = ?4 \
             WHERE vehicle_id = ?5",
            params![location.lat, location.lon, path_index as i64, direction.as_str(), vehicle.as_str()],
        )?;
        if updated == 0 {
            return Err(StoreError::VehicleNotFound(vehicle.clone()));
        }
        Ok(())
    }

    fn append_position(&self, packet: &TelemetryPacket) -> StoreResult<()> {
        let conn = self.lock()?;
        let tx = conn.unchecked_transaction()?;
        tx.execute(
            &format!("INSERT INTO live_gps_positions ({PACKET_COLUMNS}) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)"),
            params![
                packet.vehicle.as_str(),
                format_timestamp(packet.timestamp),
                packet.location.lat,
                packet.location.lon,
                packet.speed_kmh,
                packet.heading_deg,
                packet.status.as_str(),
                packet.gps.as_str(),
            ],
        )?;
        tx.execute(
            "DELETE FROM live_gps_positions WHERE id IN ( \
                 SELECT id FROM live_gps_positions WHERE vehicle_id = ?1 \
                 ORDER BY timestamp DESC, id DESC LIMIT -1 OFFSET ?2 \
             )",
            params![packet.vehicle.as_str(), self.max_positions as i64],
        )?;
        tx.commit()?;
        Ok(())
    }

    fn append_arrival(&self, arrival: &ArrivalRecord) -> StoreResult<()> {
        self.lock()?.execute(
            "INSERT INTO waypoint_history (vehicle_id, waypoint_id, arrival_timestamp) \
             VALUES (?1, ?2, ?3)",
            params![arrival.vehicle.as_str(), arrival.waypoint.0, format_timestamp(arrival.timestamp)],
        )?;
        Ok(())
    }

    fn prune_arrivals(&self, cutoff: DateTime<Utc>) -> StoreResult<usize> {
        let deleted = self.lock()?.execute(
            "DELETE FROM waypoint_history WHERE arrival_timestamp < ?1",
            params![format_timestamp(cutoff)],
        )?;
        Ok(deleted)
    }

    fn recent_positions(&self, vehicle: &VehicleId, limit: usize) -> StoreResult<Vec<TelemetryPacket>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(&format!(
            "SELECT {PACKET_COLUMNS} FROM live_gps_positions WHERE vehicle_id = ?1 \
             ORDER BY timestamp DESC, id DESC LIMIT ?2"
        ))?;
        let rows = stmt
            .query_map(params![vehicle.as_str(), limit as i64], packet_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(decode_packet).collect()
    }

    fn arrivals(&self, vehicle: &VehicleId) -> StoreResult<Vec<ArrivalRecord>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT waypoint_id, arrival_timestamp FROM waypoint_history \
             WHERE vehicle_id = ?1 ORDER BY arrival_timestamp ASC, history_id ASC",
        )?;
        let rows = stmt
            .query_map(params![vehicle.as_str()], |r| Ok((r.get::<_, i64>(0)?, r.get::<_, String>(1)?)))?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter()
            .map(|(waypoint, ts)| -> StoreResult<ArrivalRecord> {
                Ok(ArrivalRecord {
                    vehicle:   vehicle.clone(),
                    waypoint:  WaypointId(waypoint),
                    timestamp: parse_timestamp(&ts)?,
                })
            })
            .collect()
    }

    fn latest_positions_for_waypoint(&self, waypoint_name: &str) -> StoreResult<Vec<TelemetryPacket>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare_cached(
            "SELECT p.vehicle_id, p.timestamp, p.latitude, p.longitude, p.speed_kmh, p.heading, \
                    p.status, p.gps_status \
             FROM live_gps_positions p \
             INNER JOIN ( \
                 SELECT vehicle_id, MAX(timestamp) AS max_ts \
                 FROM live_gps_positions GROUP BY vehicle_id \
             ) latest ON p.vehicle_id = latest.vehicle_id AND p.timestamp = latest.max_ts \
             INNER JOIN vehicles v ON p.vehicle_id = v.vehicle_id \
             WHERE v.current_route_id IN ( \
                 SELECT DISTINCT route_id FROM waypoints WHERE waypoint_name = ?1 \
             ) \
             GROUP BY p.vehicle_id \
             ORDER BY p.vehicle_id",
        )?;
        let rows = stmt
            .query_map(params![waypoint_name], packet_row)?
            .collect::<rusqlite::Result<Vec<_>>>()?;
        rows.into_iter().map(decode_packet).collect()
    }
}
