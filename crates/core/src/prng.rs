//! Seedable random sources for the chaos game.
//!
//! The engine only needs uniform integer choices among a handful of
//! vertices, so the seam is a small [`RandomSource`] trait. [`Xorshift64`]
//! is the default implementation: pure integer arithmetic, so a given seed
//! produces the same vertex sequence on every platform.

use serde::{Deserialize, Serialize};

/// A source of uniformly distributed 64-bit values.
///
/// Implementors only supply [`next_u64`](RandomSource::next_u64); the
/// derived helpers are shared. Tests inject sources with fixed output to
/// drive the engine along a known path.
pub trait RandomSource {
    /// Returns the next raw 64-bit value.
    fn next_u64(&mut self) -> u64;

    /// Returns a uniformly distributed usize in [0, max).
    ///
    /// Uses modulo reduction; the bias is negligible for the tiny `max`
    /// values used here.
    ///
    /// # Panics
    ///
    /// Panics if `max` is 0.
    fn next_usize(&mut self, max: usize) -> usize {
        (self.next_u64() % max as u64) as usize
    }

    /// Returns a uniformly distributed f64 in [0, 1) built from the upper 53 bits.
    fn next_f64(&mut self) -> f64 {
        (self.next_u64() >> 11) as f64 / (1u64 << 53) as f64
    }
}

impl<R: RandomSource + ?Sized> RandomSource for &mut R {
    fn next_u64(&mut self) -> u64 {
        (**self).next_u64()
    }
}

/// Xorshift64 deterministic PRNG with shifts (13, 7, 17).
///
/// A seed of 0 is replaced with a non-zero fallback, since zero is a fixed
/// point of the xorshift recurrence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Xorshift64 {
    state: u64,
}

impl Xorshift64 {
    const FALLBACK_SEED: u64 = 0x5EED_DEAD_BEEF_CAFE;

    /// Creates a new PRNG with the given seed.
    pub fn new(seed: u64) -> Self {
        Self {
            state: if seed == 0 { Self::FALLBACK_SEED } else { seed },
        }
    }
}

impl RandomSource for Xorshift64 {
    fn next_u64(&mut self) -> u64 {
        self.state ^= self.state << 13;
        self.state ^= self.state >> 7;
        self.state ^= self.state << 17;
        self.state
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn next_u64_produces_known_golden_value_for_seed_42() {
        // Changing this value invalidates every saved seed file.
        let mut rng = Xorshift64::new(42);
        assert_eq!(rng.next_u64(), 45_454_805_674);
    }

    #[test]
    fn seed_zero_does_not_produce_all_zeros() {
        let mut rng = Xorshift64::new(0);
        for _ in 0..3 {
            assert_ne!(rng.next_u64(), 0, "seed=0 guard failed");
        }
    }

    #[test]
    fn two_instances_with_same_seed_produce_identical_choices() {
        let mut rng_a = Xorshift64::new(42);
        let mut rng_b = Xorshift64::new(42);
        for i in 0..1000 {
            assert_eq!(
                rng_a.next_usize(3),
                rng_b.next_usize(3),
                "sequences diverged at index {i}"
            );
        }
    }

    #[test]
    fn next_usize_hits_every_vertex() {
        let mut rng = Xorshift64::new(7777);
        let mut seen = [0u32; 3];
        for _ in 0..3000 {
            seen[rng.next_usize(3)] += 1;
        }
        for (i, &count) in seen.iter().enumerate() {
            assert!(count > 800, "vertex {i} chosen only {count} times");
        }
    }

    #[test]
    fn mutable_reference_forwards_to_inner_source() {
        fn draw<R: RandomSource>(mut rng: R) -> u64 {
            rng.next_u64()
        }
        let mut owned = Xorshift64::new(99);
        let mut copy = owned.clone();
        assert_eq!(draw(&mut owned), copy.next_u64());
        assert_eq!(owned.next_u64(), copy.next_u64());
    }

    #[test]
    fn serialization_roundtrip_preserves_state() {
        let mut rng = Xorshift64::new(42);
        for _ in 0..50 {
            rng.next_u64();
        }
        let json = serde_json::to_string(&rng).unwrap();
        let mut restored: Xorshift64 = serde_json::from_str(&json).unwrap();
        for i in 0..100 {
            assert_eq!(
                rng.next_u64(),
                restored.next_u64(),
                "sequences diverged after deserialization at index {i}"
            );
        }
    }

    mod proptests {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn next_usize_in_bounds_for_any_seed_and_max(
                seed: u64,
                max in 1_usize..10_000,
            ) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_usize(max);
                    prop_assert!(v < max, "next_usize({max}) = {v} for seed {seed}");
                }
            }

            #[test]
            fn next_f64_in_unit_interval_for_any_seed(seed: u64) {
                let mut rng = Xorshift64::new(seed);
                for _ in 0..100 {
                    let v = rng.next_f64();
                    prop_assert!((0.0..1.0).contains(&v), "next_f64() = {v} for seed {seed}");
                }
            }
        }
    }
}
