//! Common utilities and types used throughout the interleaving simulator.
//!
//! This module provides fundamental building blocks that are shared across all
//! components of the engine. It includes:
//! 1. **Address Types:** Strong types for byte addresses and block numbers.
//! 2. **Constants:** Fixed model parameters (history depth, latencies, group sizes).
//! 3. **Error Handling:** Configuration and step-failure error types.
//! 4. **Randomness:** A seeded, injectable pseudo-random generator for replayable runs.

/// Address and block-number type definitions.
pub mod addr;

/// Fixed model constants used throughout the engine.
pub mod constants;

/// Error types for configuration validation and step failures.
pub mod error;

/// Seeded xorshift pseudo-random generator.
pub mod rng;

pub use addr::{Addr, BlockNum};
pub use error::{ConfigError, StepError};
pub use rng::XorShift64;
