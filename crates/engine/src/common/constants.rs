//! Fixed model constants.
//!
//! This module defines the constants the interleaving model is calibrated
//! against. It includes:
//! 1. **History Constants:** Depth of the rolling access window.
//! 2. **Latency Constants:** Fixed hit and miss costs in nanoseconds.
//! 3. **Placement Constants:** Block-group sizes for the coarser interleaving kinds.
//! 4. **Memory Constants:** Byte-scaling factors.

/// Maximum number of access records kept in the rolling history window.
///
/// The window doubles as the hit-classification structure: an access hits when
/// a record for the same block/module pair is still inside the window.
pub const HISTORY_DEPTH: usize = 50;

/// Latency charged for an access that hits in the rolling window, in nanoseconds.
pub const HIT_LATENCY_NS: f64 = 5.0;

/// Latency charged for an access that misses the rolling window, in nanoseconds.
///
/// The 20x hit/miss ratio is a fixed model parameter, not a measured value.
pub const MISS_LATENCY_NS: f64 = 100.0;

/// Number of consecutive blocks grouped per module under word interleaving.
pub const WORD_GROUP_BLOCKS: u64 = 4;

/// Number of consecutive blocks grouped per module under page interleaving.
pub const PAGE_GROUP_BLOCKS: u64 = 64;

/// Number of consecutive blocks grouped per module under bank interleaving.
pub const BANK_GROUP_BLOCKS: u64 = 16;

/// Bytes per mebibyte; scales the configured memory size to an address range.
pub const BYTES_PER_MIB: u64 = 1024 * 1024;
