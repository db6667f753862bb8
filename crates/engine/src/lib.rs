//! Memory-interleaving simulation engine.
//!
//! This crate implements a deterministic model of memory-module interleaving
//! and cache behavior with the following:
//! 1. **Model:** Pure state transitions — block-to-module placement, synthetic
//!    access patterns, rolling-window hit classification, and a separate
//!    set-associative cache snapshot model.
//! 2. **Driver:** A generic timer-paced stepping engine with start/pause/reset
//!    lifecycle controls and per-step observation.
//! 3. **Configuration:** JSON-deserializable, eagerly validated configs for
//!    the model, the cache geometry, and the driver.
//! 4. **Statistics:** Per-step derived metrics and a sectioned run report.
//!
//! The split is deliberate: models are pure functions over immutable
//! snapshots and the driver is the only component with timers or lifecycle,
//! so the transition logic stays trivially testable.

/// Common types and constants (addresses, errors, fixed parameters, RNG).
pub mod common;
/// Simulator configuration (defaults, enums, validation).
pub mod config;
/// Pure simulation models (placement, patterns, interleaving, cache).
pub mod model;
/// Stepping driver and simulation wiring.
pub mod sim;
/// Run statistics collection and reporting.
pub mod stats;

/// Interleaving model configuration; use `InterleaveConfig::default()` or
/// deserialize from JSON.
pub use crate::config::InterleaveConfig;
/// Generic stepping driver; owns lifecycle and pacing for one run.
pub use crate::sim::Driver;
/// Interleaving model wired into a driver; construct with
/// `InterleaveSimulator::new`.
pub use crate::sim::InterleaveSimulator;
/// Condensed run report; build with `RunSummary::from_state`.
pub use crate::stats::RunSummary;
