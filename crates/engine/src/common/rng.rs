//! Seeded xorshift pseudo-random generator.
//!
//! The random access pattern must be replayable: two runs with the same seed
//! produce the same address stream, so tests and animation replays are
//! deterministic. The generator is therefore explicit state carried in the
//! simulation snapshot, never an ambient global.
//!
//! The algorithm is a 64-bit xorshift (13/7/17 triple), cheap enough to run
//! every step and more than adequate for load-spreading purposes.

use serde::{Deserialize, Serialize};

/// Fallback seed substituted when a caller supplies zero.
///
/// A xorshift register must never be all-zero or it stays zero forever.
const SEED_FALLBACK: u64 = 0x9E37_79B9_7F4A_7C15;

/// 64-bit xorshift generator state.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct XorShift64 {
    state: u64,
}

impl XorShift64 {
    /// Creates a generator from the given seed.
    ///
    /// A zero seed is replaced with a fixed non-zero constant; the all-zero
    /// state is a fixed point of the xorshift transition.
    ///
    /// # Examples
    ///
    /// ```
    /// use ilvsim_core::common::XorShift64;
    ///
    /// let mut a = XorShift64::new(42);
    /// let mut b = XorShift64::new(42);
    /// assert_eq!(a.next_u64(), b.next_u64());
    /// ```
    pub const fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { SEED_FALLBACK } else { seed },
        }
    }

    /// Advances the generator and returns the next 64-bit value.
    pub const fn next_u64(&mut self) -> u64 {
        let mut x = self.state;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.state = x;
        x
    }

    /// Advances the generator and returns a value uniformly below `bound`.
    ///
    /// Uses simple modulo reduction; the bias is negligible for the address
    /// ranges the simulator draws from and irrelevant to load spreading.
    ///
    /// # Arguments
    ///
    /// * `bound` - Exclusive upper bound; must be non-zero.
    pub const fn next_below(&mut self, bound: u64) -> u64 {
        self.next_u64() % bound
    }
}
