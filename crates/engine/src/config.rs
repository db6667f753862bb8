//! Configuration system for the interleaving simulator.
//!
//! This module defines all configuration structures and enums used to
//! parameterize the engine. It provides:
//! 1. **Defaults:** Baseline model constants (modules, block size, memory, steps).
//! 2. **Structures:** Configs for the interleaving model, the cache snapshot
//!    model, and the stepping driver.
//! 3. **Enums:** Interleaving kind and access pattern selection.
//! 4. **Validation:** Eager `validate()` methods that reject malformed input
//!    with a [`ConfigError`] instead of letting bad divisors and shift amounts
//!    propagate into the models.
//!
//! Configuration is supplied via JSON (serde) or constructed in code; use the
//! `Default` impls for a ready-to-run baseline.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::common::ConfigError;

/// Default configuration constants for the simulator.
///
/// These values define the baseline model configuration when not explicitly
/// overridden in a JSON document.
mod defaults {
    /// Number of memory modules accesses are spread across.
    pub const MODULES: usize = 4;

    /// Block size in bytes; the unit of interleaving granularity.
    pub const BLOCK_BYTES: usize = 64;

    /// Stride multiplier for the stride access pattern, in blocks.
    pub const STRIDE: usize = 4;

    /// Simulated memory size in MiB; bounds the random and pointer-chase
    /// address ranges.
    pub const MEMORY_MIB: usize = 64;

    /// Seed for the injected pseudo-random generator.
    pub const SEED: u64 = 0x1D27_2C6A;

    /// Number of sets in the cache snapshot model.
    pub const CACHE_SETS: usize = 16;

    /// Associativity of the cache snapshot model.
    pub const CACHE_WAYS: usize = 2;

    /// Line size of the cache snapshot model in bytes.
    pub const CACHE_LINE_BYTES: usize = 64;

    /// Number of steps a driver runs before reaching its terminal state.
    pub const TOTAL_STEPS: u64 = 200;

    /// Milliseconds between driver ticks.
    pub const STEP_INTERVAL_MS: u64 = 16;
}

/// Block-to-module placement strategies.
///
/// Selects how consecutive block numbers are distributed across memory
/// modules. The coarser kinds group runs of blocks onto one module before
/// rotating to the next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum InterleavingKind {
    /// Fine-grained interleaving: consecutive blocks rotate across modules.
    #[default]
    Bit,
    /// Word interleaving: groups of 4 consecutive blocks share a module.
    Word,
    /// Page interleaving: groups of 64 consecutive blocks share a module.
    Page,
    /// Bank interleaving: groups of 16 consecutive blocks share a module.
    Bank,
}

/// Synthetic access pattern generators.
///
/// Each pattern maps a step index to the next byte address to access.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub enum AccessPattern {
    /// Consecutive blocks in ascending order.
    #[default]
    Sequential,
    /// Uniform pseudo-random addresses over the whole memory range, drawn
    /// from the seeded generator carried in the simulation state.
    Random,
    /// Every `stride`-th block in ascending order.
    Stride,
    /// A fixed linear-congruential walk approximating dependent loads.
    #[serde(alias = "PointerChasing")]
    PointerChase,
}

/// Interleaving model configuration.
///
/// # Examples
///
/// Creating a default configuration:
///
/// ```
/// use ilvsim_core::config::InterleaveConfig;
///
/// let config = InterleaveConfig::default();
/// assert_eq!(config.modules, 4);
/// assert!(config.validate().is_ok());
/// ```
///
/// Deserializing from JSON:
///
/// ```
/// use ilvsim_core::config::{AccessPattern, InterleaveConfig, InterleavingKind};
///
/// let json = r#"{
///     "kind": "Bank",
///     "modules": 8,
///     "block_bytes": 128,
///     "pattern": "Stride",
///     "stride": 2,
///     "memory_mib": 256,
///     "seed": 7
/// }"#;
///
/// let config: InterleaveConfig = serde_json::from_str(json).unwrap();
/// assert_eq!(config.kind, InterleavingKind::Bank);
/// assert_eq!(config.pattern, AccessPattern::Stride);
/// assert_eq!(config.block_bytes, 128);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterleaveConfig {
    /// Block-to-module placement strategy.
    #[serde(default)]
    pub kind: InterleavingKind,

    /// Number of memory modules; must be positive.
    #[serde(default = "InterleaveConfig::default_modules")]
    pub modules: usize,

    /// Block size in bytes; must be a power of two.
    #[serde(default = "InterleaveConfig::default_block_bytes")]
    pub block_bytes: usize,

    /// Access pattern generator.
    #[serde(default)]
    pub pattern: AccessPattern,

    /// Stride multiplier in blocks (stride pattern only); must be positive
    /// when the stride pattern is selected.
    #[serde(default = "InterleaveConfig::default_stride")]
    pub stride: usize,

    /// Simulated memory size in MiB; must be positive.
    #[serde(default = "InterleaveConfig::default_memory_mib")]
    pub memory_mib: usize,

    /// Seed for the injected pseudo-random generator. Runs with equal seeds
    /// and configs produce identical access streams.
    #[serde(default = "InterleaveConfig::default_seed")]
    pub seed: u64,
}

impl InterleaveConfig {
    /// Returns the default module count.
    fn default_modules() -> usize {
        defaults::MODULES
    }

    /// Returns the default block size in bytes.
    fn default_block_bytes() -> usize {
        defaults::BLOCK_BYTES
    }

    /// Returns the default stride multiplier.
    fn default_stride() -> usize {
        defaults::STRIDE
    }

    /// Returns the default memory size in MiB.
    fn default_memory_mib() -> usize {
        defaults::MEMORY_MIB
    }

    /// Returns the default generator seed.
    fn default_seed() -> u64 {
        defaults::SEED
    }

    /// Checks the configuration for values the model cannot operate on.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] naming the first offending field: zero
    /// modules, a non-power-of-two block size, an empty memory range, or a
    /// zero stride combined with the stride pattern.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.modules == 0 {
            return Err(ConfigError::ZeroModules);
        }
        if !self.block_bytes.is_power_of_two() {
            return Err(ConfigError::BlockNotPowerOfTwo(self.block_bytes));
        }
        if self.memory_mib == 0 {
            return Err(ConfigError::ZeroMemory);
        }
        if self.pattern == AccessPattern::Stride && self.stride == 0 {
            return Err(ConfigError::ZeroStride);
        }
        Ok(())
    }

    /// Returns the size of the simulated memory range in bytes.
    pub const fn memory_bytes(&self) -> u64 {
        self.memory_mib as u64 * crate::common::constants::BYTES_PER_MIB
    }
}

impl Default for InterleaveConfig {
    /// Creates a default interleaving configuration.
    ///
    /// Bit interleaving over four modules, 64-byte blocks, sequential
    /// accesses, 64 MiB of simulated memory, and a fixed seed.
    fn default() -> Self {
        Self {
            kind: InterleavingKind::default(),
            modules: defaults::MODULES,
            block_bytes: defaults::BLOCK_BYTES,
            pattern: AccessPattern::default(),
            stride: defaults::STRIDE,
            memory_mib: defaults::MEMORY_MIB,
            seed: defaults::SEED,
        }
    }
}

/// Cache snapshot model configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheModelConfig {
    /// Number of sets; must be a power of two (used as a set-index mask).
    #[serde(default = "CacheModelConfig::default_sets")]
    pub sets: usize,

    /// Associativity (lines per set); must be positive.
    #[serde(default = "CacheModelConfig::default_ways")]
    pub ways: usize,

    /// Line size in bytes; must be a power of two (its log2 is the
    /// set-index shift).
    #[serde(default = "CacheModelConfig::default_line_bytes")]
    pub line_bytes: usize,
}

impl CacheModelConfig {
    /// Returns the default set count.
    fn default_sets() -> usize {
        defaults::CACHE_SETS
    }

    /// Returns the default associativity.
    fn default_ways() -> usize {
        defaults::CACHE_WAYS
    }

    /// Returns the default line size in bytes.
    fn default_line_bytes() -> usize {
        defaults::CACHE_LINE_BYTES
    }

    /// Checks the configuration for values the bit-slicing math cannot
    /// operate on.
    ///
    /// # Errors
    ///
    /// Returns a [`ConfigError`] for a non-power-of-two set count or line
    /// size, or a zero way count. Validating up front is what keeps the
    /// address decomposition in the cache model branch-free.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.sets.is_power_of_two() {
            return Err(ConfigError::SetsNotPowerOfTwo(self.sets));
        }
        if !self.line_bytes.is_power_of_two() {
            return Err(ConfigError::LineNotPowerOfTwo(self.line_bytes));
        }
        if self.ways == 0 {
            return Err(ConfigError::ZeroWays);
        }
        Ok(())
    }

    /// Returns the number of address bits consumed by the line offset.
    pub const fn line_shift(&self) -> u32 {
        self.line_bytes.trailing_zeros()
    }

    /// Returns the number of address bits consumed by the set index.
    pub const fn set_shift(&self) -> u32 {
        self.sets.trailing_zeros()
    }
}

impl Default for CacheModelConfig {
    /// Creates a default cache snapshot configuration: 16 sets, 2 ways,
    /// 64-byte lines.
    fn default() -> Self {
        Self {
            sets: defaults::CACHE_SETS,
            ways: defaults::CACHE_WAYS,
            line_bytes: defaults::CACHE_LINE_BYTES,
        }
    }
}

/// Stepping driver configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverConfig {
    /// Number of steps after which the run reaches its terminal state; must
    /// be positive.
    #[serde(default = "DriverConfig::default_total_steps")]
    pub total_steps: u64,

    /// Delay between ticks in milliseconds. Zero means tick back-to-back
    /// with no pacing delay.
    #[serde(default = "DriverConfig::default_step_interval_ms")]
    pub step_interval_ms: u64,
}

impl DriverConfig {
    /// Returns the default total step count.
    fn default_total_steps() -> u64 {
        defaults::TOTAL_STEPS
    }

    /// Returns the default tick interval in milliseconds.
    fn default_step_interval_ms() -> u64 {
        defaults::STEP_INTERVAL_MS
    }

    /// Checks the configuration for a runnable step budget.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::ZeroSteps`] when `total_steps` is zero.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.total_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        Ok(())
    }

    /// Returns the tick interval as a [`Duration`].
    pub const fn step_interval(&self) -> Duration {
        Duration::from_millis(self.step_interval_ms)
    }
}

impl Default for DriverConfig {
    /// Creates a default driver configuration: 200 steps at a 16 ms cadence.
    fn default() -> Self {
        Self {
            total_steps: defaults::TOTAL_STEPS,
            step_interval_ms: defaults::STEP_INTERVAL_MS,
        }
    }
}
