//! Deterministic per-vehicle RNG.
//!
//! # Determinism strategy
//!
//! Each vehicle gets its own independent `SmallRng` seeded by:
//!
//!   seed = fleet_seed XOR (slot * MIXING_CONSTANT)
//!
//! where `slot` is the vehicle's position in the fleet roster.  The mixing
//! constant is the 64-bit fractional part of the golden ratio, which spreads
//! consecutive slots uniformly across the seed space.  Vehicles never share
//! RNG state, so one task's draws cannot perturb another's.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

/// 64-bit fractional golden-ratio constant for seed mixing.
const MIXING_CONSTANT: u64 = 0x9e37_79b9_7f4a_7c15;

/// Per-vehicle deterministic RNG.  Moved into the vehicle's task; never shared.
pub struct VehicleRng(SmallRng);

impl VehicleRng {
    /// Seed deterministically from the fleet seed and a roster slot.
    pub fn new(fleet_seed: u64, slot: u64) -> Self {
        let seed = fleet_seed ^ slot.wrapping_mul(MIXING_CONSTANT);
        VehicleRng(SmallRng::seed_from_u64(seed))
    }

    /// Generate a value uniformly in `range`.
    #[inline]
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.0.gen_range(range)
    }
}
