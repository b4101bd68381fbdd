//! Seeded randomness for list simulations.
//!
//! Every draw in a run goes through a [`DeterministicRng`], so the operation
//! stream is fully determined by its `DST_SEED`.

use rand::{Rng, SeedableRng};
use rand_xoshiro::Xoshiro256StarStar;

/// Deterministic random number generator.
///
/// Given the same seed, always produces the same sequence.
///
/// # Example
///
/// ```rust
/// use sq_dst::DeterministicRng;
///
/// let mut rng = DeterministicRng::new(12345);
/// let a: u64 = rng.gen();
/// let b = rng.gen_range(1..=10usize);
///
/// let mut rng2 = DeterministicRng::new(12345);
/// assert_eq!(rng2.gen::<u64>(), a);
/// assert_eq!(rng2.gen_range(1..=10usize), b);
/// ```
pub struct DeterministicRng {
    rng: Xoshiro256StarStar,
    calls_count: u64,
}

/// Maximum number of RNG calls before warning.
const RNG_CALLS_WARNING_THRESHOLD: u64 = 1_000_000_000;

/// Element values are drawn from `-VALUE_SPREAD..=VALUE_SPREAD` so that
/// duplicates are common enough to exercise first-match search.
pub const VALUE_SPREAD: i32 = 16;

impl DeterministicRng {
    /// Create a new RNG with the given seed.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        debug_assert!(seed != 0, "DST seeds are non-zero");

        Self {
            rng: Xoshiro256StarStar::seed_from_u64(seed),
            calls_count: 0,
        }
    }

    /// Number of random values generated.
    #[must_use]
    pub fn calls_count(&self) -> u64 {
        self.calls_count
    }

    fn count_call(&mut self) {
        self.calls_count += 1;
        debug_assert!(
            self.calls_count < RNG_CALLS_WARNING_THRESHOLD,
            "Very high number of RNG calls - possible infinite loop"
        );
    }

    /// Generate a random value of type T.
    pub fn gen<T>(&mut self) -> T
    where
        rand::distributions::Standard: rand::distributions::Distribution<T>,
    {
        self.count_call();
        self.rng.gen()
    }

    /// Generate a random value in the given range.
    pub fn gen_range<T, R>(&mut self, range: R) -> T
    where
        T: rand::distributions::uniform::SampleUniform,
        R: rand::distributions::uniform::SampleRange<T>,
    {
        self.count_call();
        self.rng.gen_range(range)
    }

    /// Generate a boolean with the given probability of true.
    pub fn gen_bool(&mut self, probability: f64) -> bool {
        debug_assert!(
            (0.0..=1.0).contains(&probability),
            "Probability must be in [0.0, 1.0]"
        );
        self.count_call();
        self.rng.gen_bool(probability)
    }

    /// Generate a list element value.
    pub fn gen_value(&mut self) -> i32 {
        self.gen_range(-VALUE_SPREAD..=VALUE_SPREAD)
    }

    /// Pick an index according to relative `weights`.
    ///
    /// Returns `None` if all weights are zero.
    pub fn choose_weighted(&mut self, weights: &[u32]) -> Option<usize> {
        let total: u64 = weights.iter().map(|&w| u64::from(w)).sum();
        if total == 0 {
            return None;
        }

        let mut pick = self.gen_range(0..total);
        for (index, &weight) in weights.iter().enumerate() {
            let weight = u64::from(weight);
            if pick < weight {
                return Some(index);
            }
            pick -= weight;
        }
        None
    }

    /// Derive an independent generator for another simulation component.
    ///
    /// Consumes one draw from `self`; a derived seed of zero is bumped to 1.
    #[must_use]
    pub fn fork(&mut self) -> Self {
        let seed = self.gen::<u64>().max(1);
        Self::new(seed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_determinism() {
        let mut rng1 = DeterministicRng::new(42);
        let mut rng2 = DeterministicRng::new(42);

        for _ in 0..100 {
            assert_eq!(rng1.gen::<u64>(), rng2.gen::<u64>());
        }
    }

    #[test]
    fn test_different_seeds() {
        let mut rng1 = DeterministicRng::new(42);
        let mut rng2 = DeterministicRng::new(43);

        let seq1: Vec<u64> = (0..10).map(|_| rng1.gen()).collect();
        let seq2: Vec<u64> = (0..10).map(|_| rng2.gen()).collect();
        assert_ne!(seq1, seq2);
    }

    #[test]
    fn test_gen_value_in_spread() {
        let mut rng = DeterministicRng::new(12345);

        for _ in 0..1_000 {
            let value = rng.gen_value();
            assert!((-VALUE_SPREAD..=VALUE_SPREAD).contains(&value));
        }
    }

    #[test]
    fn test_gen_bool_extremes() {
        let mut rng = DeterministicRng::new(12345);

        for _ in 0..10 {
            assert!(!rng.gen_bool(0.0));
            assert!(rng.gen_bool(1.0));
        }
    }

    #[test]
    fn test_choose_weighted() {
        let mut rng = DeterministicRng::new(12345);

        assert_eq!(rng.choose_weighted(&[]), None);
        assert_eq!(rng.choose_weighted(&[0, 0]), None);

        for _ in 0..100 {
            assert_eq!(rng.choose_weighted(&[0, 5, 0]), Some(1));
            let index = rng.choose_weighted(&[1, 1, 1]).unwrap();
            assert!(index < 3);
        }
    }

    #[test]
    fn test_fork_is_reproducible_and_independent() {
        let mut parent_a = DeterministicRng::new(12345);
        let mut parent_b = DeterministicRng::new(12345);
        let mut ops_a = parent_a.fork();
        let mut ops_b = parent_b.fork();
        let mut faults_a = parent_a.fork();

        let values_a: Vec<i32> = (0..20).map(|_| ops_a.gen_value()).collect();
        let values_b: Vec<i32> = (0..20).map(|_| ops_b.gen_value()).collect();
        assert_eq!(values_a, values_b);

        let faults: Vec<i32> = (0..20).map(|_| faults_a.gen_value()).collect();
        assert_ne!(values_a, faults);

        assert_eq!(parent_a.calls_count(), 2);
        assert_eq!(ops_a.calls_count(), 20);
    }
}
