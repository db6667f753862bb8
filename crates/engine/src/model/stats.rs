//! Per-step derived statistics.
//!
//! Statistics are recomputed from scratch on every step rather than nudged
//! incrementally; drift can never accumulate and each snapshot stands alone.

use serde::{Deserialize, Serialize};

use super::interleave::ModuleUsage;
use crate::config::InterleaveConfig;

/// Statistics derived from the most recent access and the usage table.
#[derive(Clone, Copy, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct StepStats {
    /// Instantaneous throughput implied by the last access, in MB/s: one
    /// block transferred in that access's latency.
    pub bandwidth_mb_s: f64,
    /// Latency of the last access in nanoseconds.
    pub last_latency_ns: f64,
    /// Load symmetry score: `100 - stddev(utilization)`. 100 means perfectly
    /// even spreading across modules.
    pub module_balance: f64,
    /// Total accesses simulated so far, including the last one.
    pub total_accesses: u64,
}

impl StepStats {
    /// Recomputes the statistics after an access.
    ///
    /// # Arguments
    ///
    /// * `config` - Interleaving configuration (block size).
    /// * `usage` - Usage table with utilization already recomputed for the
    ///   new total.
    /// * `latency_ns` - Latency charged to the access that just completed.
    /// * `total_accesses` - Total accesses including the one that just
    ///   completed.
    pub fn recompute(
        config: &InterleaveConfig,
        usage: &[ModuleUsage],
        latency_ns: f64,
        total_accesses: u64,
    ) -> Self {
        let latency_s = latency_ns * 1e-9;
        let bandwidth_mb_s = (config.block_bytes as f64 / latency_s) / 1024.0 / 1024.0;
        Self {
            bandwidth_mb_s,
            last_latency_ns: latency_ns,
            module_balance: 100.0 - utilization_stddev(usage),
            total_accesses,
        }
    }
}

/// Returns the population standard deviation of the utilization column.
///
/// An empty table reports zero spread.
fn utilization_stddev(usage: &[ModuleUsage]) -> f64 {
    if usage.is_empty() {
        return 0.0;
    }
    let n = usage.len() as f64;
    let mean = usage.iter().map(|u| u.utilization_pct).sum::<f64>() / n;
    let variance = usage
        .iter()
        .map(|u| {
            let d = u.utilization_pct - mean;
            d * d
        })
        .sum::<f64>()
        / n;
    variance.sqrt()
}
