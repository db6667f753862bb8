//! Run statistics collection and reporting.
//!
//! This module condenses a finished (or in-flight) simulation state into a
//! report. It provides:
//! 1. **Totals:** Access, hit, and miss counts with the derived hit rate.
//! 2. **Latency:** Average and most-recent access latency.
//! 3. **Throughput:** The instantaneous bandwidth figure from the last step.
//! 4. **Modules:** Per-module access counts and utilization, plus the balance
//!    score.
//!
//! The summary is serializable for machine-readable export and printable in
//! sectioned human-readable form.

use serde::Serialize;

use crate::config::InterleaveConfig;
use crate::model::{InterleaveState, ModuleUsage};

/// Section names for selective report output.
///
/// Valid section identifiers: `"summary"`, `"modules"`, `"latency"`. Pass an
/// empty slice to `print_sections` to print all sections.
pub const REPORT_SECTIONS: &[&str] = &["summary", "modules", "latency"];

/// Condensed report over a simulation state.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct RunSummary {
    /// Placement strategy the run used, as configured.
    pub kind: crate::config::InterleavingKind,
    /// Access pattern the run used, as configured.
    pub pattern: crate::config::AccessPattern,
    /// Total accesses simulated.
    pub total_accesses: u64,
    /// Accesses that hit in the rolling window.
    pub hits: u64,
    /// Accesses that missed the rolling window.
    pub misses: u64,
    /// Hit share in percent.
    pub hit_rate_pct: f64,
    /// Mean access latency in nanoseconds.
    pub avg_latency_ns: f64,
    /// Latency of the final access in nanoseconds.
    pub last_latency_ns: f64,
    /// Instantaneous throughput implied by the final access, in MB/s.
    pub bandwidth_mb_s: f64,
    /// Load symmetry score across modules (100 = perfectly even).
    pub module_balance: f64,
    /// Per-module accounting.
    pub modules: Vec<ModuleUsage>,
}

impl RunSummary {
    /// Builds a summary from a state snapshot.
    ///
    /// An empty run (zero accesses) reports zeroed rates rather than
    /// dividing by zero.
    pub fn from_state(config: &InterleaveConfig, state: &InterleaveState) -> Self {
        let total = state.stats.total_accesses;
        let hits = state.hits;
        let (hit_rate_pct, avg_latency_ns) = if total == 0 {
            (0.0, 0.0)
        } else {
            (
                hits as f64 / total as f64 * 100.0,
                state.total_latency_ns / total as f64,
            )
        };
        Self {
            kind: config.kind,
            pattern: config.pattern,
            total_accesses: total,
            hits,
            misses: total - hits,
            hit_rate_pct,
            avg_latency_ns,
            last_latency_ns: state.stats.last_latency_ns,
            bandwidth_mb_s: state.stats.bandwidth_mb_s,
            module_balance: state.stats.module_balance,
            modules: state.usage.clone(),
        }
    }

    /// Prints only the requested report sections to stdout.
    ///
    /// Each element of `sections` should be one of `"summary"`, `"modules"`,
    /// or `"latency"`. Pass an empty slice to print all sections (same as
    /// `print()`).
    ///
    /// # Arguments
    ///
    /// * `sections` - Slice of section names to print, or empty for all.
    pub fn print_sections(&self, sections: &[String]) {
        let want = |s: &str| sections.is_empty() || sections.iter().any(|x| x == s);

        if want("summary") {
            println!("\n==========================================================");
            println!("MEMORY INTERLEAVING SIMULATION STATISTICS");
            println!("==========================================================");
            println!("placement                {:?}", self.kind);
            println!("pattern                  {:?}", self.pattern);
            println!("sim_accesses             {}", self.total_accesses);
            println!("sim_hits                 {}", self.hits);
            println!("sim_misses               {}", self.misses);
            println!("sim_hit_rate             {:.2}%", self.hit_rate_pct);
            println!("----------------------------------------------------------");
        }
        if want("modules") {
            println!("MODULE BREAKDOWN");
            for usage in &self.modules {
                println!(
                    "  module[{:<2}]             {:<10} ({:.2}%)",
                    usage.module, usage.accesses, usage.utilization_pct
                );
            }
            println!("  balance                {:.2}", self.module_balance);
            println!("----------------------------------------------------------");
        }
        if want("latency") {
            println!("LATENCY / THROUGHPUT");
            println!("  latency.avg            {:.2} ns", self.avg_latency_ns);
            println!("  latency.last           {:.2} ns", self.last_latency_ns);
            println!("  bandwidth.last         {:.2} MB/s", self.bandwidth_mb_s);
        }
        println!("==========================================================");
    }

    /// Prints all report sections to stdout.
    ///
    /// Equivalent to `print_sections(&[])`.
    pub fn print(&self) {
        self.print_sections(&[]);
    }
}
