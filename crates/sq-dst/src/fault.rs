//! Deterministic invalid-input injection.
//!
//! A sequential list has no I/O to fail, so faults here are bad inputs
//! from the caller:
//! - position 0
//! - positions past the valid range
//! - deletes issued against an empty list

use serde::Serialize;

use crate::random::DeterministicRng;

/// Configuration for fault injection.
#[derive(Debug, Clone, Serialize)]
pub struct FaultConfig {
    /// Probability that a generated position is replaced by an invalid one
    pub invalid_position_probability: f64,
    /// Of the invalid positions, the share that are 0 (the rest overshoot)
    pub zero_position_share: f64,
    /// How far past the valid range an overshooting position may land
    pub overshoot_max: usize,
    /// Probability that a delete is issued even when the list is empty
    pub empty_delete_probability: f64,
    /// Whether fault injection is enabled
    pub enabled: bool,
}

impl Default for FaultConfig {
    fn default() -> Self {
        Self {
            invalid_position_probability: 0.05, // 5% chance
            zero_position_share: 0.3,
            overshoot_max: 4,
            empty_delete_probability: 0.5,
            enabled: true,
        }
    }
}

impl FaultConfig {
    /// No faults - every generated operation is valid.
    #[must_use]
    pub fn none() -> Self {
        Self {
            invalid_position_probability: 0.0,
            zero_position_share: 0.0,
            overshoot_max: 0,
            empty_delete_probability: 0.0,
            enabled: false,
        }
    }

    /// Aggressive faults for stress testing.
    #[must_use]
    pub fn aggressive() -> Self {
        Self {
            invalid_position_probability: 0.3, // 30% chance
            zero_position_share: 0.5,
            overshoot_max: 16,
            empty_delete_probability: 1.0,
            enabled: true,
        }
    }

    /// Look up a preset by name (`none`, `default`, `aggressive`).
    #[must_use]
    pub fn from_preset(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "none" | "off" => Some(Self::none()),
            "default" => Some(Self::default()),
            "aggressive" => Some(Self::aggressive()),
            _ => None,
        }
    }
}

/// Deterministic fault injector.
///
/// The same seed produces the same fault sequence.
pub struct FaultInjector {
    rng: DeterministicRng,
    config: FaultConfig,
    invalid_positions_count: u64,
    empty_deletes_count: u64,
}

/// Maximum number of faults before warning.
const FAULTS_COUNT_WARNING_MAX: u64 = 10_000_000;

impl FaultInjector {
    /// Create a new fault injector with the given RNG and config.
    pub fn new(rng: DeterministicRng, config: FaultConfig) -> Self {
        debug_assert!(
            (0.0..=1.0).contains(&config.invalid_position_probability),
            "Invalid position probability must be in [0.0, 1.0]"
        );
        debug_assert!(
            (0.0..=1.0).contains(&config.zero_position_share),
            "Zero position share must be in [0.0, 1.0]"
        );
        debug_assert!(
            (0.0..=1.0).contains(&config.empty_delete_probability),
            "Empty delete probability must be in [0.0, 1.0]"
        );

        Self {
            rng,
            config,
            invalid_positions_count: 0,
            empty_deletes_count: 0,
        }
    }

    /// Possibly replace `position` with one outside `1..=valid_max`.
    pub fn maybe_corrupt_position(&mut self, position: usize, valid_max: usize) -> usize {
        if !self.config.enabled || !self.rng.gen_bool(self.config.invalid_position_probability) {
            return position;
        }

        self.invalid_positions_count += 1;
        debug_assert!(
            self.invalid_positions_count < FAULTS_COUNT_WARNING_MAX,
            "Very high number of faults - possible issue with test"
        );

        if self.config.overshoot_max == 0 || self.rng.gen_bool(self.config.zero_position_share) {
            0
        } else {
            valid_max + self.rng.gen_range(1..=self.config.overshoot_max)
        }
    }

    /// Whether to issue a delete against an empty list.
    pub fn should_delete_when_empty(&mut self) -> bool {
        if !self.config.enabled {
            return false;
        }

        let result = self.rng.gen_bool(self.config.empty_delete_probability);
        if result {
            self.empty_deletes_count += 1;
        }
        result
    }

    /// Get fault statistics.
    #[must_use]
    pub fn stats(&self) -> FaultStats {
        FaultStats {
            invalid_positions_count: self.invalid_positions_count,
            empty_deletes_count: self.empty_deletes_count,
        }
    }
}

/// Statistics about injected faults.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct FaultStats {
    pub invalid_positions_count: u64,
    pub empty_deletes_count: u64,
}

impl FaultStats {
    #[must_use]
    pub fn faults_count(&self) -> u64 {
        self.invalid_positions_count + self.empty_deletes_count
    }
}
