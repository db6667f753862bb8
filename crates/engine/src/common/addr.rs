//! Byte address and block number types.
//!
//! This module defines strong types for byte addresses and block numbers to
//! prevent accidental mixing of the two units. It provides the following:
//! 1. **Type Safety:** Distinguishes raw byte addresses from block-granular indices.
//! 2. **Derivation:** Converts an address into the block that contains it.
//! 3. **Serialization:** Both types serialize as plain integers for snapshot export.

use serde::{Deserialize, Serialize};

/// A byte address in the simulated memory space.
///
/// Addresses are produced by the access-pattern generators and consumed by the
/// placement and cache models. They carry no alignment guarantees.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Addr(pub u64);

/// A block number: a byte address divided by the configured block size.
///
/// Blocks are the unit of interleaving granularity; the placement model maps
/// block numbers onto memory modules.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct BlockNum(pub u64);

impl Addr {
    /// Creates a new address from a raw 64-bit value.
    #[inline(always)]
    pub const fn new(addr: u64) -> Self {
        Self(addr)
    }

    /// Returns the raw 64-bit address value.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }

    /// Returns the block containing this address for the given block size.
    ///
    /// # Arguments
    ///
    /// * `block_bytes` - Block size in bytes; must be non-zero (enforced by
    ///   configuration validation before any model function runs).
    ///
    /// # Examples
    ///
    /// ```
    /// use ilvsim_core::common::{Addr, BlockNum};
    ///
    /// assert_eq!(Addr::new(130).block(64), BlockNum(2));
    /// ```
    #[inline(always)]
    pub const fn block(self, block_bytes: u64) -> BlockNum {
        BlockNum(self.0 / block_bytes)
    }
}

impl BlockNum {
    /// Returns the raw 64-bit block number.
    #[inline(always)]
    pub const fn val(self) -> u64 {
        self.0
    }
}
