//! Sampling strategies for drawing candidate positions inside a [`SpawnRegion`].
//!
//! The placement validator only depends on [`CandidateSampling`]; the shipped
//! strategy is [`AnnulusSampling`].
use mint::Vector2;
use rand::RngCore;

use crate::region::SpawnRegion;

pub mod annulus;

pub use annulus::{sample_annulus_point, AnnulusSampling};

/// Trait for single-candidate sampling.
pub trait CandidateSampling: Send + Sync {
    fn sample(&self, region: &SpawnRegion, rng: &mut dyn RngCore) -> Vector2<f32>;
}

/// Generate a random float in the range [0, 1].
#[inline]
pub(crate) fn rand01(rng: &mut dyn RngCore) -> f32 {
    (rng.next_u32() as f32) / ((u32::MAX as f32) + 1.0)
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) struct FixedRng {
        pub(crate) value: u32,
    }

    impl RngCore for FixedRng {
        fn next_u32(&mut self) -> u32 {
            self.value
        }

        fn next_u64(&mut self) -> u64 {
            self.value as u64
        }

        fn fill_bytes(&mut self, dest: &mut [u8]) {
            let bytes = self.value.to_le_bytes();
            for (i, b) in dest.iter_mut().enumerate() {
                *b = bytes[i % 4];
            }
        }
    }

    #[test]
    fn rand01_returns_zero_for_zero_input() {
        let mut rng = FixedRng { value: 0 };
        assert_eq!(rand01(&mut rng), 0.0);
    }

    #[test]
    fn rand01_values_in_range() {
        for value in [0, 1, 100, 1000, u32::MAX / 2, u32::MAX - 1, u32::MAX] {
            let mut rng = FixedRng { value };
            let result = rand01(&mut rng);
            assert!(
                (0.0..=1.0).contains(&result),
                "rand01({}) = {} is out of range [0,1]",
                value,
                result
            );
        }
    }

    #[test]
    fn rand01_distribution_properties() {
        let mut rng = FixedRng {
            value: u32::MAX / 2,
        };
        assert!((rand01(&mut rng) - 0.5).abs() < 0.001);
    }
}
