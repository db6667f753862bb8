//! Set-associative cache snapshot model.
//!
//! A second, separate pure model with real set/way semantics, distinct from
//! the rolling-window approximation in [`crate::model::interleave`]. It
//! provides:
//! 1. **Address Decomposition:** Line-offset / set-index / tag bit slicing.
//! 2. **Lookup:** Hit detection against valid lines with matching tags.
//! 3. **Replacement:** First invalid line, otherwise the least recently
//!    accessed line (smallest access stamp, first minimum scanned on ties).
//!
//! Every operation returns a new snapshot; nothing is mutated in place.

use serde::{Deserialize, Serialize};

use crate::common::Addr;
use crate::config::CacheModelConfig;

/// One cache line: tag, state bits, and the stamp of its last access.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheLine {
    /// Tag of the block occupying this line, or `None` when invalid.
    pub tag: Option<u64>,
    /// Whether the line holds a block.
    pub valid: bool,
    /// Whether the held block has been modified.
    pub dirty: bool,
    /// Access counter value when this line was last touched; the replacement
    /// victim is the valid line with the smallest stamp.
    pub last_accessed: u64,
}

/// Immutable cache snapshot: `sets × ways` lines plus a running access count.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    /// Line storage, outer index = set, inner index = way.
    pub sets: Vec<Vec<CacheLine>>,
    /// Number of accesses applied to reach this snapshot; also the source of
    /// the per-line access stamps.
    pub access_count: u64,
}

impl CacheSnapshot {
    /// Creates an all-invalid snapshot for the given geometry.
    pub fn new(config: &CacheModelConfig) -> Self {
        Self {
            sets: vec![vec![CacheLine::default(); config.ways]; config.sets],
            access_count: 0,
        }
    }

    /// Returns the number of valid lines across the whole snapshot.
    pub fn occupied_lines(&self) -> usize {
        self.sets
            .iter()
            .flat_map(|set| set.iter())
            .filter(|line| line.valid)
            .count()
    }
}

/// Applies one access to the snapshot, returning the hit flag and the new
/// snapshot.
///
/// The winning line — the hit line or the replacement victim — is rewritten
/// with the new tag, `valid` set, `dirty` cleared, and a fresh access stamp.
/// Note that a hit therefore also clears `dirty`: the model treats every
/// access as a clean refill of the line. Callers tracking write-back cost
/// must account for dirtiness themselves.
///
/// # Arguments
///
/// * `snapshot` - Current cache snapshot.
/// * `config` - Validated cache geometry.
/// * `addr` - Byte address being accessed.
///
/// # Examples
///
/// ```
/// use ilvsim_core::common::Addr;
/// use ilvsim_core::config::CacheModelConfig;
/// use ilvsim_core::model::cache::{self, CacheSnapshot};
///
/// let config = CacheModelConfig::default();
/// let snapshot = CacheSnapshot::new(&config);
///
/// let (hit, snapshot) = cache::access(&snapshot, &config, Addr::new(0x1000));
/// assert!(!hit);
/// let (hit, _) = cache::access(&snapshot, &config, Addr::new(0x1000));
/// assert!(hit);
/// ```
pub fn access(
    snapshot: &CacheSnapshot,
    config: &CacheModelConfig,
    addr: Addr,
) -> (bool, CacheSnapshot) {
    let set_index = ((addr.val() >> config.line_shift()) & (config.sets as u64 - 1)) as usize;
    let tag = addr.val() >> (config.line_shift() + config.set_shift());

    let mut next = snapshot.clone();
    let set = &mut next.sets[set_index];

    let hit_way = set
        .iter()
        .position(|line| line.valid && line.tag == Some(tag));

    let way = hit_way.unwrap_or_else(|| victim_way(set));

    set[way] = CacheLine {
        tag: Some(tag),
        valid: true,
        dirty: false,
        last_accessed: snapshot.access_count + 1,
    };
    next.access_count = snapshot.access_count + 1;

    (hit_way.is_some(), next)
}

/// Selects the way to overwrite on a miss.
///
/// Prefers the first invalid line; with a full set, picks the valid line with
/// the smallest access stamp, taking the first minimum encountered.
fn victim_way(set: &[CacheLine]) -> usize {
    if let Some(way) = set.iter().position(|line| !line.valid) {
        return way;
    }
    let mut victim = 0;
    for (way, line) in set.iter().enumerate() {
        if line.last_accessed < set[victim].last_accessed {
            victim = way;
        }
    }
    victim
}
