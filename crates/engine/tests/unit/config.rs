//! # Configuration Tests
//!
//! Comprehensive tests for configuration structures, deserialization,
//! defaults, and eager validation.

use std::time::Duration;

use ilvsim_core::common::ConfigError;
use ilvsim_core::config::{
    AccessPattern, CacheModelConfig, DriverConfig, InterleaveConfig, InterleavingKind,
};

// ══════════════════════════════════════════════════════════
// 1. Defaults
// ══════════════════════════════════════════════════════════

#[test]
fn interleave_config_defaults() {
    let config = InterleaveConfig::default();
    assert_eq!(config.kind, InterleavingKind::Bit);
    assert_eq!(config.pattern, AccessPattern::Sequential);
    assert_eq!(config.modules, 4);
    assert_eq!(config.block_bytes, 64);
    assert_eq!(config.memory_mib, 64);
    assert!(config.validate().is_ok());
}

#[test]
fn cache_config_defaults() {
    let config = CacheModelConfig::default();
    assert_eq!(config.sets, 16);
    assert_eq!(config.ways, 2);
    assert_eq!(config.line_bytes, 64);
    assert!(config.validate().is_ok());
}

#[test]
fn driver_config_defaults() {
    let config = DriverConfig::default();
    assert_eq!(config.total_steps, 200);
    assert_eq!(config.step_interval_ms, 16);
    assert_eq!(config.step_interval(), Duration::from_millis(16));
    assert!(config.validate().is_ok());
}

#[test]
fn memory_bytes_scales_mib() {
    let config = InterleaveConfig {
        memory_mib: 3,
        ..InterleaveConfig::default()
    };
    assert_eq!(config.memory_bytes(), 3 * 1024 * 1024);
}

// ══════════════════════════════════════════════════════════
// 2. Interleave validation
// ══════════════════════════════════════════════════════════

#[test]
fn zero_modules_rejected() {
    let config = InterleaveConfig {
        modules: 0,
        ..InterleaveConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroModules));
}

#[test]
fn non_power_of_two_block_rejected() {
    let config = InterleaveConfig {
        block_bytes: 48,
        ..InterleaveConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::BlockNotPowerOfTwo(48)));
}

#[test]
fn zero_memory_rejected() {
    let config = InterleaveConfig {
        memory_mib: 0,
        ..InterleaveConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroMemory));
}

/// A zero stride only matters when the stride pattern is selected.
#[test]
fn zero_stride_rejected_only_for_stride_pattern() {
    let stride_pattern = InterleaveConfig {
        pattern: AccessPattern::Stride,
        stride: 0,
        ..InterleaveConfig::default()
    };
    assert_eq!(stride_pattern.validate(), Err(ConfigError::ZeroStride));

    let sequential = InterleaveConfig {
        pattern: AccessPattern::Sequential,
        stride: 0,
        ..InterleaveConfig::default()
    };
    assert!(sequential.validate().is_ok());
}

// ══════════════════════════════════════════════════════════
// 3. Cache validation
// ══════════════════════════════════════════════════════════

#[test]
fn non_power_of_two_sets_rejected() {
    let config = CacheModelConfig {
        sets: 12,
        ..CacheModelConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::SetsNotPowerOfTwo(12)));
}

#[test]
fn non_power_of_two_line_rejected() {
    let config = CacheModelConfig {
        line_bytes: 3,
        ..CacheModelConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::LineNotPowerOfTwo(3)));
}

#[test]
fn zero_ways_rejected() {
    let config = CacheModelConfig {
        ways: 0,
        ..CacheModelConfig::default()
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroWays));
}

/// Shift amounts fall straight out of the power-of-two geometry:
/// 64-byte lines consume 6 offset bits, 16 sets consume 4 index bits.
#[test]
fn shift_amounts_follow_geometry() {
    let config = CacheModelConfig::default();
    assert_eq!(config.line_shift(), 6);
    assert_eq!(config.set_shift(), 4);
}

// ══════════════════════════════════════════════════════════
// 4. Driver validation
// ══════════════════════════════════════════════════════════

#[test]
fn zero_steps_rejected() {
    let config = DriverConfig {
        total_steps: 0,
        step_interval_ms: 16,
    };
    assert_eq!(config.validate(), Err(ConfigError::ZeroSteps));
}

// ══════════════════════════════════════════════════════════
// 5. Deserialization
// ══════════════════════════════════════════════════════════

/// Omitted fields fall back to the documented defaults.
#[test]
fn partial_json_uses_defaults() {
    let config: InterleaveConfig = serde_json::from_str(r#"{ "modules": 8 }"#).unwrap();
    assert_eq!(config.modules, 8);
    assert_eq!(config.kind, InterleavingKind::Bit);
    assert_eq!(config.block_bytes, 64);
}

#[test]
fn full_json_round_trip() {
    let config = InterleaveConfig {
        kind: InterleavingKind::Bank,
        modules: 8,
        block_bytes: 128,
        pattern: AccessPattern::Stride,
        stride: 2,
        memory_mib: 256,
        seed: 7,
    };
    let json = serde_json::to_string(&config).unwrap();
    let back: InterleaveConfig = serde_json::from_str(&json).unwrap();
    assert_eq!(back, config);
}

/// The long-form pattern name is accepted as an alias.
#[test]
fn pointer_chasing_alias_accepted() {
    let config: InterleaveConfig =
        serde_json::from_str(r#"{ "pattern": "PointerChasing" }"#).unwrap();
    assert_eq!(config.pattern, AccessPattern::PointerChase);
}
