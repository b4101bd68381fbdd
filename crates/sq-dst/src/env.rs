//! DST environment combining the operation RNG and the fault injector.
//!
//! The `DstEnv` is the central context for deterministic simulation tests:
//! it turns one seed into a reproducible stream of list operations.

use serde::Serialize;

use crate::fault::{FaultConfig, FaultInjector};
use crate::random::DeterministicRng;

/// One simulated call against a sequential list.
///
/// Positions are 1-based logical positions and may be invalid when the
/// fault injector decided so.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "op", rename_all = "snake_case")]
pub enum SimOp {
    Init,
    Insert { position: usize, value: i32 },
    Delete { position: usize },
    GetElem { position: usize },
    LocateElem { value: i32 },
}

/// Relative weights for `[Init, Insert, Delete, GetElem, LocateElem]`.
///
/// Inserts outweigh deletes so runs drift toward a full list and exercise
/// capacity exhaustion.
const OP_WEIGHTS: [u32; 5] = [1, 45, 34, 10, 10];

/// Complete DST environment.
///
/// Given the same seed and config, the same operations are produced.
///
/// # Usage
///
/// ```rust
/// use sq_dst::{DstEnv, FaultConfig, SimOp};
///
/// let mut env = DstEnv::with_fault_config(12345, FaultConfig::none());
/// for _ in 0..100 {
///     if let SimOp::Insert { position, .. } = env.next_op(0, 50) {
///         assert_eq!(position, 1);
///     }
/// }
/// ```
pub struct DstEnv {
    seed: u64,
    rng: DeterministicRng,
    fault: FaultInjector,
    ops_count: u64,
}

impl DstEnv {
    /// Create a new DST environment with the default fault configuration.
    pub fn new(seed: u64) -> Self {
        Self::with_fault_config(seed, FaultConfig::default())
    }

    /// Create with custom fault configuration.
    pub fn with_fault_config(seed: u64, fault_config: FaultConfig) -> Self {
        debug_assert!(seed != 0, "DST seeds are non-zero");

        let mut master_rng = DeterministicRng::new(seed);
        let rng = master_rng.fork();
        let fault = FaultInjector::new(master_rng.fork(), fault_config);

        Self {
            seed,
            rng,
            fault,
            ops_count: 0,
        }
    }

    /// Produce the next operation for a list of `len` elements out of
    /// `capacity`.
    pub fn next_op(&mut self, len: usize, capacity: usize) -> SimOp {
        debug_assert!(len <= capacity, "Length must not exceed capacity");
        self.ops_count += 1;

        match self.rng.choose_weighted(&OP_WEIGHTS) {
            Some(0) => SimOp::Init,
            Some(2) if len > 0 || self.fault.should_delete_when_empty() => SimOp::Delete {
                position: self.position_in(len),
            },
            Some(3) if len > 0 => SimOp::GetElem {
                position: self.position_in(len),
            },
            Some(4) => SimOp::LocateElem {
                value: self.rng.gen_value(),
            },
            // Inserts, plus reads and deletes that have nothing to address.
            _ => SimOp::Insert {
                position: self.position_in(len + 1),
                value: self.rng.gen_value(),
            },
        }
    }

    /// A position in `1..=valid_max`, possibly corrupted by the injector.
    fn position_in(&mut self, valid_max: usize) -> usize {
        let position = self.rng.gen_range(1..=valid_max.max(1));
        self.fault.maybe_corrupt_position(position, valid_max)
    }

    /// Format seed for error messages.
    ///
    /// Use this in test failures so the seed can be easily copied.
    #[must_use]
    pub fn format_seed(&self) -> String {
        format!("DST_SEED={}", self.seed)
    }

    /// Get summary statistics.
    #[must_use]
    pub fn stats(&self) -> DstStats {
        let fault_stats = self.fault.stats();
        DstStats {
            seed: self.seed,
            ops_count: self.ops_count,
            rng_calls: self.rng.calls_count(),
            invalid_positions: fault_stats.invalid_positions_count,
            empty_deletes: fault_stats.empty_deletes_count,
        }
    }
}

/// Statistics about DST execution.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct DstStats {
    /// Seed used for reproducibility
    pub seed: u64,
    /// Number of operations generated
    pub ops_count: u64,
    /// Number of random values generated
    pub rng_calls: u64,
    /// Positions replaced by invalid ones
    pub invalid_positions: u64,
    /// Deletes issued against an empty list
    pub empty_deletes: u64,
}

impl std::fmt::Display for DstStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "DST_SEED={} ops={} rng_calls={} invalid_positions={} empty_deletes={}",
            self.seed, self.ops_count, self.rng_calls, self.invalid_positions, self.empty_deletes
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn position_of(op: SimOp) -> Option<usize> {
        match op {
            SimOp::Insert { position, .. }
            | SimOp::Delete { position }
            | SimOp::GetElem { position } => Some(position),
            SimOp::Init | SimOp::LocateElem { .. } => None,
        }
    }

    #[test]
    fn test_determinism() {
        let mut env1 = DstEnv::new(42);
        let mut env2 = DstEnv::new(42);

        for len in 0..100 {
            assert_eq!(env1.next_op(len % 10, 10), env2.next_op(len % 10, 10));
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut env1 = DstEnv::new(42);
        let mut env2 = DstEnv::new(43);

        let seq1: Vec<SimOp> = (0..20).map(|_| env1.next_op(5, 10)).collect();
        let seq2: Vec<SimOp> = (0..20).map(|_| env2.next_op(5, 10)).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_no_faults_means_valid_positions() {
        let mut env = DstEnv::with_fault_config(12345, FaultConfig::none());

        for _ in 0..1_000 {
            match env.next_op(4, 8) {
                SimOp::Insert { position, .. } => assert!((1..=5).contains(&position)),
                SimOp::Delete { position } | SimOp::GetElem { position } => {
                    assert!((1..=4).contains(&position))
                }
                SimOp::Init | SimOp::LocateElem { .. } => {}
            }
        }
        assert_eq!(env.stats().invalid_positions, 0);
    }

    #[test]
    fn test_no_delete_on_empty_without_faults() {
        let mut env = DstEnv::with_fault_config(12345, FaultConfig::none());

        for _ in 0..1_000 {
            assert!(!matches!(env.next_op(0, 8), SimOp::Delete { .. }));
        }
    }

    #[test]
    fn test_aggressive_faults_produce_invalid_positions() {
        let mut env = DstEnv::with_fault_config(12345, FaultConfig::aggressive());

        let invalid = (0..1_000)
            .filter_map(|_| position_of(env.next_op(4, 8)))
            .filter(|&p| p == 0 || p > 5)
            .count();
        assert!(invalid > 0);
        assert!(env.stats().invalid_positions > 0);
    }

    #[test]
    fn test_stats() {
        let mut env = DstEnv::new(12345);
        for _ in 0..10 {
            let _ = env.next_op(3, 5);
        }

        let stats = env.stats();
        assert_eq!(stats.seed, 12345);
        assert_eq!(stats.ops_count, 10);
        assert!(stats.rng_calls >= 10);
        assert!(stats.to_string().starts_with("DST_SEED=12345 ops=10"));
    }

    #[test]
    fn test_format_seed() {
        let env = DstEnv::new(12345);
        assert_eq!(env.format_seed(), "DST_SEED=12345");
    }

    #[test]
    fn test_sim_op_serializes_tagged() {
        let op = SimOp::Insert {
            position: 3,
            value: 1,
        };
        let json = serde_json::to_string(&op).unwrap();
        assert_eq!(json, r#"{"op":"insert","position":3,"value":1}"#);
    }
}
