//! Interleaving state and the per-access transition.
//!
//! The heart of the model: [`step`] consumes a state snapshot and produces the
//! next one for a single simulated access. It performs:
//! 1. **Placement:** Derive the address, its block, and the owning module.
//! 2. **Hit Classification:** Check the rolling history for a recent access to
//!    the same block/module pair.
//! 3. **Accounting:** Bump the owning module's counter and recompute every
//!    module's utilization from the new total.
//! 4. **History:** Append the record, truncating the window to its fixed depth.
//! 5. **Statistics:** Recompute the derived statistics from scratch.
//!
//! The rolling window is a deliberate approximation of temporal locality, not
//! a faithful cache: the window itself is the "cache", bounded at
//! [`HISTORY_DEPTH`] entries. Consumers that want real set/way semantics use
//! the separate snapshot model in [`crate::model::cache`].

use serde::{Deserialize, Serialize};

use super::pattern::next_address;
use super::stats::StepStats;
use crate::common::constants::{
    BANK_GROUP_BLOCKS, HISTORY_DEPTH, HIT_LATENCY_NS, MISS_LATENCY_NS, PAGE_GROUP_BLOCKS,
    WORD_GROUP_BLOCKS,
};
use crate::common::{Addr, BlockNum, XorShift64};
use crate::config::{InterleaveConfig, InterleavingKind};

/// One simulated memory access. Immutable once created.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct AccessRecord {
    /// Byte address that was accessed.
    pub addr: Addr,
    /// Module the access was routed to.
    pub module: usize,
    /// Whether the access hit in the rolling window.
    pub hit: bool,
    /// Latency charged to the access in nanoseconds.
    pub latency_ns: f64,
}

/// Per-module access accounting.
///
/// Utilization is recomputed from the counters on every step, never drifted
/// incrementally.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct ModuleUsage {
    /// Module index.
    pub module: usize,
    /// Accesses routed to this module so far.
    pub accesses: u64,
    /// Share of all accesses routed to this module, in percent.
    pub utilization_pct: f64,
}

impl ModuleUsage {
    /// Creates a zeroed usage table with one entry per module.
    ///
    /// # Arguments
    ///
    /// * `modules` - Number of modules; entries are indexed by module id.
    pub fn init(modules: usize) -> Vec<Self> {
        (0..modules)
            .map(|module| Self {
                module,
                accesses: 0,
                utilization_pct: 0.0,
            })
            .collect()
    }
}

/// Full interleaving simulation state.
///
/// A value type: [`step`] returns a new state and never mutates its input.
/// Whoever holds the latest returned value owns the run.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct InterleaveState {
    /// Rolling access history, newest last, at most [`HISTORY_DEPTH`] entries.
    pub history: Vec<AccessRecord>,
    /// Per-module accounting, one entry per module.
    pub usage: Vec<ModuleUsage>,
    /// Statistics derived from the most recent access.
    pub stats: StepStats,
    /// Cumulative hit count across the whole run (the history window only
    /// retains the newest records).
    pub hits: u64,
    /// Cumulative latency across the whole run in nanoseconds.
    pub total_latency_ns: f64,
    /// Pseudo-random generator state; advancing it inside the snapshot keeps
    /// random runs replayable from the seed.
    pub rng: XorShift64,
}

impl InterleaveState {
    /// Creates the initial state for a run: empty history, zeroed usage
    /// table, and a generator seeded from the configuration.
    pub fn new(config: &InterleaveConfig) -> Self {
        Self {
            history: Vec::new(),
            usage: ModuleUsage::init(config.modules),
            stats: StepStats::default(),
            hits: 0,
            total_latency_ns: 0.0,
            rng: XorShift64::new(config.seed),
        }
    }
}

/// Maps a block number onto a module under the configured placement.
///
/// The word/page/bank group sizes are fixed policy constants, not derived
/// from the block size.
///
/// # Examples
///
/// ```
/// use ilvsim_core::common::BlockNum;
/// use ilvsim_core::config::InterleaveConfig;
/// use ilvsim_core::model::module_for_block;
///
/// let config = InterleaveConfig::default(); // bit interleaving, 4 modules
/// assert_eq!(module_for_block(&config, BlockNum(5)), 1);
/// assert_eq!(
///     module_for_block(&config, BlockNum(0)),
///     module_for_block(&config, BlockNum(4)),
/// );
/// ```
pub fn module_for_block(config: &InterleaveConfig, block: BlockNum) -> usize {
    let modules = config.modules as u64;
    let module = match config.kind {
        InterleavingKind::Bit => block.val() % modules,
        InterleavingKind::Word => (block.val() / WORD_GROUP_BLOCKS) % modules,
        InterleavingKind::Page => (block.val() / PAGE_GROUP_BLOCKS) % modules,
        InterleavingKind::Bank => (block.val() / BANK_GROUP_BLOCKS) % modules,
    };
    module as usize
}

/// Classifies an access against the current history window.
///
/// An access hits when some record already in the window (before this access
/// is appended) resolves to the same block and the same module. The block is
/// re-derived from each record's own address.
fn classify_hit(config: &InterleaveConfig, history: &[AccessRecord], block: BlockNum, module: usize) -> bool {
    let block_bytes = config.block_bytes as u64;
    history
        .iter()
        .any(|r| r.module == module && r.addr.block(block_bytes) == block)
}

/// Advances the simulation by one access, returning the new state.
///
/// Pure: the input state is only read. The step index `i` is the zero-based
/// position of this access in the run; the caller (normally the driver)
/// supplies consecutive indices starting from zero.
///
/// # Arguments
///
/// * `state` - Current state snapshot.
/// * `config` - Validated interleaving configuration.
/// * `i` - Zero-based step index of this access.
pub fn step(state: &InterleaveState, config: &InterleaveConfig, i: u64) -> InterleaveState {
    let mut rng = state.rng;
    let addr = next_address(config, &mut rng, i);
    let block_bytes = config.block_bytes as u64;
    let block = addr.block(block_bytes);
    let module = module_for_block(config, block);

    let hit = classify_hit(config, &state.history, block, module);
    let latency_ns = if hit { HIT_LATENCY_NS } else { MISS_LATENCY_NS };

    // The new total counts this access; utilization is expressed against it.
    let total = i + 1;
    let mut usage = state.usage.clone();
    usage[module].accesses += 1;
    for entry in &mut usage {
        entry.utilization_pct = entry.accesses as f64 / total as f64 * 100.0;
    }

    // Keep the newest HISTORY_DEPTH - 1 records, then append.
    let keep_from = state.history.len().saturating_sub(HISTORY_DEPTH - 1);
    let mut history = state.history[keep_from..].to_vec();
    history.push(AccessRecord {
        addr,
        module,
        hit,
        latency_ns,
    });

    let stats = StepStats::recompute(config, &usage, latency_ns, total);

    InterleaveState {
        history,
        usage,
        stats,
        hits: state.hits + u64::from(hit),
        total_latency_ns: state.total_latency_ns + latency_ns,
        rng,
    }
}
