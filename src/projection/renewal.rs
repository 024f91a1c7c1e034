//! Lease renewal decision policies
//!
//! The default policy is a deterministic probability threshold so that a
//! valuation is a pure function of its inputs. A seeded Monte Carlo policy
//! is available for simulation runs; identical seeds reproduce identical
//! results.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

/// Default probability at or above which a lease is assumed to renew
pub const DEFAULT_RENEWAL_THRESHOLD_PERCENT: f64 = 50.0;

/// How a lease's renewal probability is turned into a renew / vacate decision
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum RenewalPolicy {
    /// Renew iff probability >= `min_probability_percent`
    Threshold { min_probability_percent: f64 },
    /// Renew iff a uniform draw in [0, 100) falls below the probability.
    /// Each renewal test gets its own stream derived from `seed`, the
    /// lease's roster index and the renewal number.
    Seeded { seed: u64 },
}

impl Default for RenewalPolicy {
    fn default() -> Self {
        RenewalPolicy::Threshold {
            min_probability_percent: DEFAULT_RENEWAL_THRESHOLD_PERCENT,
        }
    }
}

impl RenewalPolicy {
    /// Decide whether the lease at `lease_index` renews at its
    /// `renewal_number`-th expiry (0 for the contract expiry)
    pub fn renews(&self, lease_index: usize, renewal_number: u32, probability_percent: f64) -> bool {
        match *self {
            RenewalPolicy::Threshold { min_probability_percent } => {
                probability_percent >= min_probability_percent
            }
            RenewalPolicy::Seeded { seed } => {
                let mut rng = ChaCha8Rng::seed_from_u64(lease_stream_seed(seed, lease_index, renewal_number));
                let draw: f64 = rng.gen_range(0.0..100.0);
                draw < probability_percent
            }
        }
    }
}

/// Mix the run seed with the lease index and renewal number (splitmix64 finalizer)
fn lease_stream_seed(seed: u64, lease_index: usize, renewal_number: u32) -> u64 {
    let stream = ((lease_index as u64) << 16) ^ u64::from(renewal_number);
    let mut z = seed ^ stream.wrapping_add(1).wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z = (z ^ (z >> 30)).wrapping_mul(0xBF58_476D_1CE4_E5B9);
    z = (z ^ (z >> 27)).wrapping_mul(0x94D0_49BB_1331_11EB);
    z ^ (z >> 31)
}
