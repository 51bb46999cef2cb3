//! Exogenous customer demand.
//!
//! RULE: Nothing in the simulation may call any platform RNG.
//! All randomness flows through a `DemandGenerator` seeded from the
//! game's master seed, so a run is fully reproducible from the seed.

use crate::types::Units;
use rand::SeedableRng;
use rand_pcg::Pcg64Mcg;

/// Produces the customer order the retailer faces each round.
/// Production and test randomness are different implementations of
/// this one interface.
pub trait DemandGenerator: Send {
    fn next_customer_order(&mut self) -> Units;
}

/// Uniform draw over `[min, max]` inclusive, from a seeded PCG stream.
pub struct UniformDemand {
    min: Units,
    max: Units,
    rng: Pcg64Mcg,
}

impl UniformDemand {
    pub fn new(seed: u64, min: Units, max: Units) -> Self {
        assert!(min <= max, "demand range is empty");
        assert!(min >= 0, "demand cannot be negative");
        Self {
            min,
            max,
            rng: Pcg64Mcg::seed_from_u64(seed),
        }
    }
}

impl DemandGenerator for UniformDemand {
    fn next_customer_order(&mut self) -> Units {
        use rand::RngCore;
        let span = (self.max - self.min + 1) as u64;
        self.min + (self.rng.next_u64() % span) as Units
    }
}

/// Replays a fixed sequence, then repeats the last value. Test use only,
/// but lives here so integration tests and the runner can share it.
pub struct FixedDemand {
    sequence: Vec<Units>,
    next: usize,
}

impl FixedDemand {
    pub fn new(sequence: Vec<Units>) -> Self {
        assert!(!sequence.is_empty(), "sequence must not be empty");
        Self { sequence, next: 0 }
    }

    /// The same value every round.
    pub fn constant(value: Units) -> Self {
        Self::new(vec![value])
    }
}

impl DemandGenerator for FixedDemand {
    fn next_customer_order(&mut self) -> Units {
        let value = self.sequence[self.next];
        if self.next + 1 < self.sequence.len() {
            self.next += 1;
        }
        value
    }
}
