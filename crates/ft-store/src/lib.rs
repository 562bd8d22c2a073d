//! `ft-store` — the telemetry store contract and its backends.
//!
//! Two backends implement [`TelemetryStore`]:
//!
//! | Feature   | Backend        | Durability                                   |
//! |-----------|----------------|----------------------------------------------|
//! | *(none)*  | `MemoryStore`  | process lifetime; tests and dry runs         |
//! | `sqlite`  | `SqliteStore`  | single database file, WAL journal            |
//!
//! Both serialise their own writes behind a mutex, so the per-vehicle
//! position bound holds even when many vehicle tasks append concurrently.
//!
//! # Usage
//!
//! ```rust,ignore
//! use ft_store::{SqliteStore, TelemetryStore};
//!
//! let store = SqliteStore::open(Path::new("tracking.db"), 1_000)?;
//! for vehicle in store.vehicles()? {
//!     let state = store.load_vehicle_state(&vehicle.id)?;
//!     println!("{} on {:?}", vehicle.id, state.route);
//! }
//! ```

pub mod error;
pub mod memory;
pub mod store;

#[cfg(feature = "sqlite")]
pub mod sqlite;


pub use error::{StoreError, StoreResult};
pub use memory::MemoryStore;
pub use store::{TelemetryStore, DEFAULT_MAX_POSITIONS};

#[cfg(feature = "sqlite")]
pub use sqlite::SqliteStore;
