//! The ring-shaped spawn region shared by the sampler, validator and scheduler.
use std::f32::consts::PI;

use glam::Vec2;

use crate::error::{Error, Result};

/// An annulus between `min_radius` and `max_radius` around `center`.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnRegion {
    /// World-space center of the ring.
    pub center: Vec2,
    /// Inner radius; points closer to the center are outside the region.
    pub min_radius: f32,
    /// Outer radius; must be strictly greater than `min_radius`.
    pub max_radius: f32,
}

impl Default for SpawnRegion {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            min_radius: 2.0,
            max_radius: 10.0,
        }
    }
}

impl SpawnRegion {
    /// Creates a region centered on the origin.
    pub fn new(min_radius: f32, max_radius: f32) -> Self {
        Self {
            center: Vec2::ZERO,
            min_radius,
            max_radius,
        }
    }

    /// Sets the center in world coordinates.
    pub fn with_center(mut self, center: impl Into<mint::Vector2<f32>>) -> Self {
        self.center = Vec2::from(center.into());
        self
    }

    /// Validates the region, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.center.is_finite() {
            return Err(Error::InvalidConfig("center must be finite".into()));
        }
        if !self.min_radius.is_finite() || !self.max_radius.is_finite() {
            return Err(Error::InvalidConfig("radii must be finite".into()));
        }
        if self.min_radius < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_radius must be >= 0 (got {})",
                self.min_radius
            )));
        }
        if self.min_radius >= self.max_radius {
            return Err(Error::InvalidConfig(format!(
                "min_radius must be < max_radius (got {} >= {})",
                self.min_radius, self.max_radius
            )));
        }

        Ok(())
    }

    /// Whether `p` lies inside the ring, rims included.
    pub fn contains(&self, p: Vec2) -> bool {
        let d = p.distance(self.center);
        d >= self.min_radius && d <= self.max_radius
    }

    /// Like [`SpawnRegion::contains`], but lets points within [`SpawnRegion::rim_tolerance`]
    /// of either rim through.
    ///
    /// Sampled points are `center + offset` in `f32`; far from the origin the
    /// sum rounds enough to move a rim point slightly outside the ring.
    pub fn contains_approx(&self, p: Vec2) -> bool {
        let d = p.distance(self.center);
        let tolerance = self.rim_tolerance();
        d >= self.min_radius - tolerance && d <= self.max_radius + tolerance
    }

    /// Rounding slack for distances measured from `center`.
    pub fn rim_tolerance(&self) -> f32 {
        let magnitude = self.center.x.abs() + self.center.y.abs() + self.max_radius;
        16.0 * f32::EPSILON * magnitude
    }

    /// Area of the ring in world units.
    pub fn area(&self) -> f32 {
        PI * (self.max_radius * self.max_radius - self.min_radius * self.min_radius)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn validate_rejects_inverted_or_degenerate_radii() {
        assert!(SpawnRegion::new(2.0, 5.0).validate().is_ok());
        assert!(SpawnRegion::new(0.0, 0.1).validate().is_ok());

        for (min, max) in [(5.0, 2.0), (3.0, 3.0), (-1.0, 2.0), (0.0, f32::NAN)] {
            let err = SpawnRegion::new(min, max).validate().unwrap_err();
            assert!(matches!(err, Error::InvalidConfig(_)), "{min}..{max}");
        }

        let off = SpawnRegion::new(1.0, 2.0).with_center(Vec2::new(f32::INFINITY, 0.0));
        assert!(off.validate().is_err());
    }

    #[test]
    fn contains_includes_both_rims() {
        let region = SpawnRegion::new(2.0, 5.0).with_center(Vec2::new(10.0, -3.0));
        assert!(region.contains(Vec2::new(12.0, -3.0)));
        assert!(region.contains(Vec2::new(10.0, 2.0)));
        assert!(!region.contains(Vec2::new(10.0, -3.0)));
        assert!(!region.contains(Vec2::new(16.0, -3.0)));
    }

    #[test]
    fn approx_containment_scales_with_center_magnitude() {
        let near = SpawnRegion::new(2.0, 5.0);
        assert!(near.rim_tolerance() < 1e-4);
        assert!(near.contains_approx(Vec2::new(5.0, 0.0)));
        assert!(!near.contains_approx(Vec2::new(5.001, 0.0)));
        assert!(!near.contains_approx(Vec2::new(1.999, 0.0)));

        let far = SpawnRegion::new(2.0, 5.0).with_center(Vec2::new(1.0e4, 1.0e4));
        let just_outside = far.center + Vec2::new(5.0 + far.rim_tolerance() * 0.5, 0.0);
        assert!(!far.contains(just_outside));
        assert!(far.contains_approx(just_outside));
        assert!(!far.contains_approx(far.center + Vec2::new(5.1, 0.0)));
    }

    #[test]
    fn area_matches_ring_formula() {
        let region = SpawnRegion::new(1.0, 2.0);
        assert!((region.area() - 3.0 * PI).abs() < 1e-5);
    }
}
