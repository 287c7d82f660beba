//! Area-uniform sampling over an annulus.
use std::f32::consts::TAU;

use glam::Vec2;
use mint::Vector2;
use rand::RngCore;

use crate::region::SpawnRegion;
use crate::sampling::{rand01, CandidateSampling};

/// Uniform sampling over the area of a [`SpawnRegion`].
///
/// The squared radius is drawn uniformly between `min_radius²` and
/// `max_radius²`, so the density per unit area is constant across the ring
/// instead of piling up near the inner rim.
#[derive(Debug, Clone, Copy, Default)]
pub struct AnnulusSampling;

impl AnnulusSampling {
    pub fn new() -> Self {
        Self
    }
}

impl CandidateSampling for AnnulusSampling {
    fn sample(&self, region: &SpawnRegion, rng: &mut dyn RngCore) -> Vector2<f32> {
        sample_annulus_point(region, rng).into()
    }
}

/// Draws one point uniformly distributed over the area of `region`.
///
/// Consumes exactly two `u32` draws from `rng` (radius first, then angle).
pub fn sample_annulus_point(region: &SpawnRegion, rng: &mut dyn RngCore) -> Vec2 {
    let min_sq = region.min_radius * region.min_radius;
    let max_sq = region.max_radius * region.max_radius;

    let r_sq = min_sq + rand01(rng) * (max_sq - min_sq);
    let r = r_sq
        .sqrt()
        .clamp(region.min_radius, region.max_radius.max(region.min_radius));
    let theta = rand01(rng) * TAU;

    region.center + Vec2::from_angle(theta) * r
}
