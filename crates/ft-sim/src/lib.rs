//! `ft-sim` — fleet orchestrator for the ft simulator.
//!
//! # Task layout
//!
//! ```text
//! FleetBuilder::build
//!   ① validate FleetConfig
//!   ② one PathBuilder + AdmissionGate shared by every vehicle
//!   ③ roster = store.vehicles() ∩ region ∩ has-route
//!   ④ one VehicleRunner per roster entry, seeded (fleet seed, slot)
//!
//! Fleet::spawn
//!   ├─ vehicle task × N   — VehicleRunner::run, forever
//!   └─ maintenance task   — every prune_interval: prune arrivals older
//!                           than arrival_retention
//! ```
//!
//! Tasks are independent: a runner that fails (store gone, broken route)
//! ends alone and is logged by [`RunningFleet::next_exit`].  Shutdown is
//! external ([`RunningFleet::shutdown`] or dropping the handle).
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use ft_sim::{FleetBuilder, FleetConfig};
//!
//! let config = FleetConfig::load(Path::new("fleet.json"))?;
//! let fleet = FleetBuilder::new(config, provider, store).build()?;
//! let mut running = fleet.spawn();
//! tokio::select! {
//!     _ = running.supervise() => {}
//!     _ = tokio::signal::ctrl_c() => {}
//! }
//! running.shutdown().await;
//! ```

pub mod builder;
pub mod config;
pub mod error;
pub mod fleet;
pub mod maintenance;


pub use builder::FleetBuilder;
pub use config::FleetConfig;
pub use error::{FleetError, FleetResult};
pub use fleet::{Fleet, RunningFleet, StatusMap, TaskExit};
pub use maintenance::prune_loop;
