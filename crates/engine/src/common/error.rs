//! Configuration and step-failure error definitions.
//!
//! This module defines the error taxonomy for the engine. It provides:
//! 1. **Configuration Errors:** Raised eagerly when a configuration is validated,
//!    before any model function can be handed malformed parameters.
//! 2. **Step Errors:** Fatal failures of a caller-supplied step function; a run
//!    that hits one stops and preserves its last good state.
//!
//! The engine performs no I/O, so no error here is recoverable or retryable.

use thiserror::Error;

/// A malformed configuration, detected at validation time.
///
/// Every variant names the offending field and value so the caller can fix the
/// input rather than chase a nonsensical index downstream.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// Module count must be positive; zero modules would make every placement
    /// computation divide by zero.
    #[error("module count must be greater than zero")]
    ZeroModules,

    /// Block size must be a power of two; it is used as a divisor when
    /// deriving block numbers and as a shift base in the cache model.
    #[error("block size must be a power of two, got {0}")]
    BlockNotPowerOfTwo(usize),

    /// Simulated memory must be non-empty for the random and pointer-chase
    /// patterns to have an address range to draw from.
    #[error("memory size must be greater than zero MiB")]
    ZeroMemory,

    /// The stride pattern multiplies by the stride; a zero stride would pin
    /// every access to address zero.
    #[error("stride must be greater than zero for the stride pattern")]
    ZeroStride,

    /// Set count must be a power of two; it is used as a bit-mask when
    /// splitting an address into set index and tag.
    #[error("set count must be a power of two, got {0}")]
    SetsNotPowerOfTwo(usize),

    /// Line size must be a power of two; its log2 is the set-index shift.
    #[error("line size must be a power of two, got {0}")]
    LineNotPowerOfTwo(usize),

    /// Associativity must be positive; a zero-way cache has no lines.
    #[error("way count must be greater than zero")]
    ZeroWays,

    /// A driver must have at least one step to run.
    #[error("total steps must be greater than zero")]
    ZeroSteps,
}

/// A fatal failure raised by a step function.
///
/// The driver treats any step failure as terminal for that run: ticking stops,
/// the last good state is preserved, and the error is surfaced to the caller.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
#[error("step {step_index} failed: {message}")]
pub struct StepError {
    /// Index of the step that failed.
    pub step_index: u64,
    /// Human-readable failure description.
    pub message: String,
}

impl StepError {
    /// Creates a step error for the given step index.
    ///
    /// # Arguments
    ///
    /// * `step_index` - Index of the failing step.
    /// * `message` - Failure description.
    pub fn new(step_index: u64, message: impl Into<String>) -> Self {
        Self {
            step_index,
            message: message.into(),
        }
    }
}
