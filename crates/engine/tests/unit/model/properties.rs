//! Model Property Tests.
//!
//! Structural invariants of the interleaving transition, exercised across
//! randomized configurations and run lengths:
//! - The rolling history never exceeds its fixed depth.
//! - Every record routes to a module inside the configured range.
//! - Utilization percentages are individually bounded and sum to 100.

use ilvsim_core::config::{AccessPattern, InterleaveConfig, InterleavingKind};
use ilvsim_core::model::{InterleaveState, step};
use proptest::prelude::*;

/// Strategy over valid interleaving configurations.
fn config_strategy() -> impl Strategy<Value = InterleaveConfig> {
    (
        prop_oneof![
            Just(InterleavingKind::Bit),
            Just(InterleavingKind::Word),
            Just(InterleavingKind::Page),
            Just(InterleavingKind::Bank),
        ],
        prop_oneof![
            Just(AccessPattern::Sequential),
            Just(AccessPattern::Random),
            Just(AccessPattern::Stride),
            Just(AccessPattern::PointerChase),
        ],
        1_usize..=8,     // modules
        0_u32..=4,       // block_bytes = 16 << exp
        1_usize..=8,     // stride
        1_usize..=64,    // memory_mib
        any::<u64>(),    // seed
    )
        .prop_map(|(kind, pattern, modules, block_exp, stride, memory_mib, seed)| {
            InterleaveConfig {
                kind,
                modules,
                block_bytes: 16 << block_exp,
                pattern,
                stride,
                memory_mib,
                seed,
            }
        })
}

proptest! {
    /// The history window never exceeds 50 records, for any configuration
    /// and any run length.
    #[test]
    fn history_never_exceeds_depth(config in config_strategy(), steps in 0_u64..300) {
        prop_assert!(config.validate().is_ok());

        let mut state = InterleaveState::new(&config);
        for i in 0..steps {
            state = step(&state, &config, i);
            prop_assert!(state.history.len() <= 50);
        }
    }

    /// Every record's module index stays inside the configured range.
    #[test]
    fn modules_stay_in_range(config in config_strategy(), steps in 1_u64..200) {
        let mut state = InterleaveState::new(&config);
        for i in 0..steps {
            state = step(&state, &config, i);
        }
        prop_assert!(state.history.iter().all(|r| r.module < config.modules));
    }

    /// Utilization percentages are individually inside [0, 100] and sum to
    /// 100 (one access is always routed somewhere).
    #[test]
    fn utilization_bounded_and_complete(config in config_strategy(), steps in 1_u64..200) {
        let mut state = InterleaveState::new(&config);
        for i in 0..steps {
            state = step(&state, &config, i);
        }

        for usage in &state.usage {
            prop_assert!(usage.utilization_pct >= 0.0);
            prop_assert!(usage.utilization_pct <= 100.0 + 1e-9);
        }
        let sum: f64 = state.usage.iter().map(|u| u.utilization_pct).sum();
        prop_assert!((sum - 100.0).abs() < 1e-6);
        prop_assert!(sum <= 100.0 * config.modules as f64 + 1e-6);
    }

    /// Per-module counters account for every access exactly once.
    #[test]
    fn access_counters_sum_to_steps(config in config_strategy(), steps in 1_u64..200) {
        let mut state = InterleaveState::new(&config);
        for i in 0..steps {
            state = step(&state, &config, i);
        }
        let total: u64 = state.usage.iter().map(|u| u.accesses).sum();
        prop_assert_eq!(total, steps);
        prop_assert_eq!(state.stats.total_accesses, steps);
    }
}
