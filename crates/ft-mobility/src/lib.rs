//! `ft-mobility` — the per-vehicle runner.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                          |
//! |-------------|-------------------------------------------------------------------|
//! | [`motion`]  | constant-speed stepping along a path, resume-index snapping       |
//! | [`dwell`]   | `DwellPolicy`, express stop-skipping rule                         |
//! | [`clock`]   | `Clock` trait, `RuntimeClock`                                     |
//! | [`config`]  | `RunnerConfig`                                                    |
//! | [`runner`]  | `VehicleRunner<P, S>`, `RunnerContext<P, S>`                      |
//! | [`error`]   | `MobilityError`, `MobilityResult<T>`                              |
//!
//! # Movement model (constant speed, tick by tick)
//!
//! Each tick a vehicle covers `speed × tick` metres towards the next path
//! point:
//!
//! 1. If that reaches the next point, the vehicle lands exactly on it and the
//!    path index advances by one.  Leftover distance is discarded.
//! 2. Otherwise it moves that far along the initial great-circle bearing.
//! 3. A packet is written every tick.  Landing on a mapped waypoint either
//!    halts the vehicle (speed-0 packet, arrival record, dwell) or, for an
//!    express vehicle at a skippable stop, passes straight through.
//! 4. At the last path point the vehicle reports `finished`, flips direction,
//!    persists `(position, 0, new direction)`, and dwells before the return
//!    trip.

pub mod clock;
pub mod config;
pub mod dwell;
pub mod error;
pub mod motion;
pub mod runner;

#[cfg(test)]
mod tests;

pub use clock::{Clock, RuntimeClock};
pub use config::RunnerConfig;
pub use dwell::DwellPolicy;
pub use error::{MobilityError, MobilityResult};
pub use runner::{RunnerContext, VehicleRunner};
