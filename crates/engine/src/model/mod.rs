//! Pure simulation models.
//!
//! Everything in this module is a pure function over immutable snapshots:
//! each call returns a new state and mutates nothing in place. The stepping
//! driver in [`crate::sim`] is the only component with lifecycle or timing
//! concerns; keeping the transitions pure is what makes them trivially
//! testable. It provides:
//! 1. **Placement:** Block-to-module mapping for each interleaving kind.
//! 2. **Patterns:** Step-indexed address generators (sequential, random, stride,
//!    pointer-chase).
//! 3. **Interleaving:** The per-access state transition (hit classification,
//!    usage accounting, derived statistics).
//! 4. **Cache:** A separate set-associative snapshot model with timestamp-based
//!    replacement.

/// Set-associative cache snapshot model.
pub mod cache;

/// Interleaving state and the per-access transition.
pub mod interleave;

/// Step-indexed address generators.
pub mod pattern;

/// Per-step derived statistics.
pub mod stats;

pub use cache::{CacheLine, CacheSnapshot};
pub use interleave::{AccessRecord, InterleaveState, ModuleUsage, module_for_block, step};
pub use pattern::next_address;
pub use stats::StepStats;
