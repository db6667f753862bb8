//! Step-indexed address generators.
//!
//! Each access pattern maps a step index to the next byte address. All
//! patterns are deterministic given the configuration and the generator state
//! passed in; the random pattern draws from the injected generator rather
//! than any ambient source, so a run can be replayed from its seed.

use crate::common::{Addr, XorShift64};
use crate::config::{AccessPattern, InterleaveConfig};

/// Multiplier of the fixed linear-congruential pointer-chase walk.
const CHASE_MUL: u64 = 17;

/// Increment of the fixed linear-congruential pointer-chase walk.
const CHASE_INC: u64 = 31;

/// Returns the address accessed at step `i` under the configured pattern.
///
/// # Arguments
///
/// * `config` - Validated interleaving configuration.
/// * `rng` - Generator state; advanced only by the random pattern.
/// * `i` - Zero-based step index.
///
/// # Examples
///
/// ```
/// use ilvsim_core::common::{Addr, XorShift64};
/// use ilvsim_core::config::InterleaveConfig;
/// use ilvsim_core::model::next_address;
///
/// let config = InterleaveConfig::default(); // sequential, 64-byte blocks
/// let mut rng = XorShift64::new(config.seed);
/// assert_eq!(next_address(&config, &mut rng, 3), Addr::new(192));
/// ```
pub fn next_address(config: &InterleaveConfig, rng: &mut XorShift64, i: u64) -> Addr {
    let block_bytes = config.block_bytes as u64;
    match config.pattern {
        AccessPattern::Sequential => Addr::new(i * block_bytes),
        AccessPattern::Random => Addr::new(rng.next_below(config.memory_bytes())),
        AccessPattern::Stride => Addr::new(i * config.stride as u64 * block_bytes),
        // Not true pointer chasing: a fixed congruential walk that revisits
        // nearby blocks often enough to exercise the hit path.
        AccessPattern::PointerChase => {
            Addr::new((i * CHASE_MUL + CHASE_INC) % config.memory_bytes())
        }
    }
}
