//! Run Summary Tests.
//!
//! Verifies the condensed run report: totals, rates, latency aggregation,
//! and JSON export. Uses tiny runs whose arithmetic is checkable by hand.

use ilvsim_core::config::InterleaveConfig;
use ilvsim_core::model::{InterleaveState, step};
use ilvsim_core::stats::{REPORT_SECTIONS, RunSummary};
use pretty_assertions::assert_eq;

use crate::common::{bit_chase, bit_sequential};

/// Runs `n` consecutive steps from a fresh state.
fn run_steps(config: &InterleaveConfig, n: u64) -> InterleaveState {
    let mut state = InterleaveState::new(config);
    for i in 0..n {
        state = step(&state, config, i);
    }
    state
}

/// An empty run reports zeroed rates, never NaN.
#[test]
fn empty_run_reports_zeros() {
    let config = bit_sequential();
    let state = InterleaveState::new(&config);
    let summary = RunSummary::from_state(&config, &state);

    assert_eq!(summary.total_accesses, 0);
    assert_eq!(summary.hits, 0);
    assert_eq!(summary.misses, 0);
    assert_eq!(summary.hit_rate_pct, 0.0);
    assert_eq!(summary.avg_latency_ns, 0.0);
    assert!(summary.hit_rate_pct.is_finite());
}

/// Four all-miss sequential steps: 0% hit rate, 100 ns average latency,
/// perfectly balanced modules.
#[test]
fn all_miss_run_summary() {
    let config = bit_sequential();
    let state = run_steps(&config, 4);
    let summary = RunSummary::from_state(&config, &state);

    assert_eq!(summary.total_accesses, 4);
    assert_eq!(summary.hits, 0);
    assert_eq!(summary.misses, 4);
    assert_eq!(summary.hit_rate_pct, 0.0);
    assert_eq!(summary.avg_latency_ns, 100.0);
    assert_eq!(summary.module_balance, 100.0);
    assert_eq!(summary.modules.len(), 4);
    for usage in &summary.modules {
        assert_eq!(usage.utilization_pct, 25.0);
    }
}

/// The chase walk's second access hits: one hit in two accesses is a 50%
/// rate and a (100 + 5) / 2 = 52.5 ns average.
#[test]
fn mixed_run_averages_latency() {
    let config = bit_chase();
    let state = run_steps(&config, 2);
    let summary = RunSummary::from_state(&config, &state);

    assert_eq!(summary.total_accesses, 2);
    assert_eq!(summary.hits, 1);
    assert_eq!(summary.misses, 1);
    assert_eq!(summary.hit_rate_pct, 50.0);
    assert!((summary.avg_latency_ns - 52.5).abs() < 1e-9);
    assert_eq!(summary.last_latency_ns, 5.0);
}

/// The summary serializes with its documented field names.
#[test]
fn summary_serializes_to_json() {
    let config = bit_sequential();
    let state = run_steps(&config, 3);
    let summary = RunSummary::from_state(&config, &state);

    let value = serde_json::to_value(&summary).unwrap();
    assert_eq!(value["total_accesses"], 3);
    assert_eq!(value["misses"], 3);
    assert_eq!(value["kind"], "Bit");
    assert_eq!(value["pattern"], "Sequential");
    assert!(value["modules"].as_array().unwrap().len() == 4);
}

/// The section list is stable; consumers select from it.
#[test]
fn report_sections_are_stable() {
    assert_eq!(REPORT_SECTIONS, &["summary", "modules", "latency"]);
}
