//! # sq-dst
//!
//! Deterministic Simulation Testing for the sequential list.
//!
//! A single seed drives a reproducible stream of list operations, with
//! invalid inputs injected at configurable rates.
//!
//! ## Usage
//!
//! ```rust
//! use sq_dst::{DstEnv, SimOp};
//!
//! let mut env = DstEnv::new(12345);
//! let mut len = 0usize;
//! for _ in 0..10 {
//!     match env.next_op(len, 50) {
//!         SimOp::Insert { position, .. } if (1..=len + 1).contains(&position) => len += 1,
//!         _ => {}
//!     }
//! }
//! ```
//!
//! ## Reproducibility
//!
//! To reproduce a failing test:
//! ```bash
//! DST_SEED=12345 cargo test
//! ```

pub mod env;
pub mod fault;
pub mod random;

pub use env::{DstEnv, DstStats, SimOp};
pub use fault::{FaultConfig, FaultInjector, FaultStats};
pub use random::DeterministicRng;

/// Operations per run when `DST_ITERATIONS` is unset.
pub const DEFAULT_ITERATIONS: u64 = 1_000;

/// A `DST_SEED` value that cannot drive a run.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SeedError {
    #[error("DST_SEED must be a valid u64, got '{value}'")]
    Malformed { value: String },

    /// Simulation components assert a non-zero seed.
    #[error("seed must be non-zero")]
    Zero,
}

/// Parse a seed as written in `DST_SEED`.
///
/// # Errors
///
/// `Malformed` for anything but a decimal `u64`, `Zero` for 0.
pub fn parse_seed(value: &str) -> Result<u64, SeedError> {
    let seed: u64 = value.trim().parse().map_err(|_| SeedError::Malformed {
        value: value.to_string(),
    })?;
    if seed == 0 {
        return Err(SeedError::Zero);
    }
    Ok(seed)
}

/// Seed from `DST_SEED`, or `None` when the variable is unset.
///
/// # Errors
///
/// See [`parse_seed`].
pub fn seed_from_env() -> Result<Option<u64>, SeedError> {
    match std::env::var("DST_SEED") {
        Ok(value) => {
            let seed = parse_seed(&value)?;
            tracing::info!(seed, "DST_SEED={} (from environment)", seed);
            Ok(Some(seed))
        }
        Err(_) => Ok(None),
    }
}

/// A fresh random non-zero seed, logged for reproduction.
#[must_use]
pub fn generate_seed() -> u64 {
    let seed = rand::random::<u64>().max(1);
    tracing::info!(seed, "DST_SEED={} (randomly generated)", seed);
    seed
}

/// Get DST seed from environment or generate random one.
///
/// For tests: panics on a bad `DST_SEED`. Binaries use [`seed_from_env`].
#[must_use]
pub fn get_or_generate_seed() -> u64 {
    match seed_from_env() {
        Ok(Some(seed)) => seed,
        Ok(None) => generate_seed(),
        Err(e) => panic!("{}", e),
    }
}

/// Number of operations per DST run, from `DST_ITERATIONS`.
#[must_use]
pub fn iterations_from_env() -> u64 {
    std::env::var("DST_ITERATIONS")
        .ok()
        .and_then(|s| s.parse().ok())
        .unwrap_or(DEFAULT_ITERATIONS)
}
