//! Stepping driver and simulation wiring.
//!
//! This module owns every lifecycle and timing concern in the engine; the
//! models it drives are pure functions. It provides:
//! 1. **Driver:** A generic timer-paced stepping engine with start/pause/reset
//!    controls and an observer callback per completed step.
//! 2. **Simulator:** A convenience wrapper wiring the interleaving model into
//!    a driver.

/// Generic timer-paced stepping driver.
pub mod driver;

/// Interleaving model wired into a driver.
pub mod simulator;

pub use driver::Driver;
pub use simulator::InterleaveSimulator;
