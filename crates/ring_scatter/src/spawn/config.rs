//! Session configuration.
use glam::Vec2;

use crate::error::Result;
use crate::placement::{Category, PlacementRequest};
use crate::region::SpawnRegion;

/// Everything a [`crate::spawn::SpawnScheduler`] needs to run one session.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SpawnConfig {
    /// Ring every point is placed in.
    pub region: SpawnRegion,
    /// Token placement request; tokens keep clear of other tokens.
    pub tokens: PlacementRequest,
    /// Obstacle placement request; obstacles keep clear of everything.
    pub obstacles: PlacementRequest,
    /// Token slots processed per tick. `0` places all tokens in one call.
    pub tokens_per_tick: usize,
}

impl Default for SpawnConfig {
    fn default() -> Self {
        Self {
            region: SpawnRegion::default(),
            tokens: PlacementRequest::new(100).with_min_spacing(0.5),
            obstacles: PlacementRequest::new(0).with_min_spacing(0.5),
            tokens_per_tick: 0,
        }
    }
}

impl SpawnConfig {
    /// Creates a configuration for `region` with nothing requested yet.
    pub fn new(region: SpawnRegion) -> Self {
        Self {
            region,
            tokens: PlacementRequest::default(),
            obstacles: PlacementRequest::default(),
            tokens_per_tick: 0,
        }
    }

    /// Sets the region center in world coordinates.
    pub fn with_center(mut self, center: Vec2) -> Self {
        self.region.center = center;
        self
    }

    /// Sets the number of tokens.
    pub fn with_token_count(mut self, count: usize) -> Self {
        self.tokens.count = count;
        self
    }

    /// Sets the number of obstacles.
    pub fn with_obstacle_count(mut self, count: usize) -> Self {
        self.obstacles.count = count;
        self
    }

    /// Sets the minimum spacing for both categories.
    pub fn with_min_spacing(mut self, min_spacing: f32) -> Self {
        self.tokens.min_spacing = min_spacing;
        self.obstacles.min_spacing = min_spacing;
        self
    }

    /// Sets the attempt budget for both categories.
    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.tokens.max_attempts = max_attempts;
        self.obstacles.max_attempts = max_attempts;
        self
    }

    /// Replaces the token request.
    pub fn with_token_request(mut self, request: PlacementRequest) -> Self {
        self.tokens = request;
        self
    }

    /// Replaces the obstacle request.
    pub fn with_obstacle_request(mut self, request: PlacementRequest) -> Self {
        self.obstacles = request;
        self
    }

    /// Spreads token placement over ticks of at most `tokens_per_tick` slots.
    pub fn with_tokens_per_tick(mut self, tokens_per_tick: usize) -> Self {
        self.tokens_per_tick = tokens_per_tick;
        self
    }

    pub fn request(&self, category: Category) -> &PlacementRequest {
        match category {
            Category::Token => &self.tokens,
            Category::Obstacle => &self.obstacles,
        }
    }

    /// Whether token placement is spread across more than one tick.
    pub fn is_amortized(&self) -> bool {
        self.tokens_per_tick > 0 && self.tokens.count > self.tokens_per_tick
    }

    /// Number of scheduler steps the token phase takes.
    pub fn token_ticks(&self) -> usize {
        if self.is_amortized() {
            self.tokens.count.div_ceil(self.tokens_per_tick)
        } else {
            1
        }
    }

    /// Validates the configuration, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        self.region.validate()?;
        self.tokens.validate()?;
        self.obstacles.validate()?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn builders_set_both_categories() {
        let config = SpawnConfig::new(SpawnRegion::new(1.0, 4.0))
            .with_token_count(12)
            .with_obstacle_count(3)
            .with_min_spacing(0.25)
            .with_max_attempts(9)
            .with_center(Vec2::new(1.0, 2.0));

        assert_eq!(config.tokens.count, 12);
        assert_eq!(config.obstacles.count, 3);
        assert_eq!(config.request(Category::Obstacle).min_spacing, 0.25);
        assert_eq!(config.request(Category::Token).max_attempts, 9);
        assert_eq!(config.region.center, Vec2::new(1.0, 2.0));
    }

    #[test]
    fn amortization_needs_more_tokens_than_one_batch() {
        let base = SpawnConfig::new(SpawnRegion::new(1.0, 4.0)).with_token_count(10);
        assert!(!base.is_amortized());
        assert_eq!(base.token_ticks(), 1);

        assert!(!base.clone().with_tokens_per_tick(10).is_amortized());

        let ticked = base.with_tokens_per_tick(3);
        assert!(ticked.is_amortized());
        assert_eq!(ticked.token_ticks(), 4);
    }

    #[test]
    fn validate_reports_first_invalid_part() {
        assert!(SpawnConfig::default().validate().is_ok());
        assert!(SpawnConfig::new(SpawnRegion::new(4.0, 1.0))
            .validate()
            .is_err());
        assert!(SpawnConfig::default()
            .with_max_attempts(0)
            .validate()
            .is_err());
    }
}
