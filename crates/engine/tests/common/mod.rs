//! Shared helpers for the engine test suite.
//!
//! Small, deterministic configurations and a bounded polling helper; every
//! geometry here is tiny enough to verify by hand in the test comments.

use std::time::{Duration, Instant};

use ilvsim_core::config::{
    AccessPattern, CacheModelConfig, DriverConfig, InterleaveConfig, InterleavingKind,
};

/// Four-module bit-interleaved sequential configuration.
///
/// With 64-byte blocks, step `i` accesses address `i * 64`, block `i`,
/// module `i % 4`.
pub fn bit_sequential() -> InterleaveConfig {
    InterleaveConfig {
        kind: InterleavingKind::Bit,
        modules: 4,
        block_bytes: 64,
        pattern: AccessPattern::Sequential,
        stride: 1,
        memory_mib: 64,
        seed: 1,
    }
}

/// Four-module pointer-chase configuration.
///
/// The chase walk visits `(i * 17 + 31) % memory`; with 64-byte blocks the
/// first two steps land in block 0 (addresses 31 and 48), so step 1 is the
/// earliest possible window hit.
pub fn bit_chase() -> InterleaveConfig {
    InterleaveConfig {
        pattern: AccessPattern::PointerChase,
        ..bit_sequential()
    }
}

/// Random-pattern configuration with an explicit seed.
pub fn random_with_seed(seed: u64) -> InterleaveConfig {
    InterleaveConfig {
        pattern: AccessPattern::Random,
        seed,
        ..bit_sequential()
    }
}

/// Single-set, two-way cache with 64-byte lines.
///
/// With these parameters:
///   - set index is always 0
///   - tag = addr / 64
pub fn tiny_cache() -> CacheModelConfig {
    CacheModelConfig {
        sets: 1,
        ways: 2,
        line_bytes: 64,
    }
}

/// Driver configuration that ticks back-to-back with no pacing delay.
pub fn unpaced(total_steps: u64) -> DriverConfig {
    DriverConfig {
        total_steps,
        step_interval_ms: 0,
    }
}

/// Polls `cond` once a millisecond until it holds or `deadline_ms` elapses.
///
/// Returns the final evaluation, so callers can assert on it directly.
pub fn wait_until(deadline_ms: u64, cond: impl Fn() -> bool) -> bool {
    let deadline = Instant::now() + Duration::from_millis(deadline_ms);
    while Instant::now() < deadline {
        if cond() {
            return true;
        }
        std::thread::sleep(Duration::from_millis(1));
    }
    cond()
}
