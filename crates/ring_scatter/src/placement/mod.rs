//! Placement primitives: categories, requests, the occupancy registry and the
//! rejection-sampling validator.
use std::fmt;

use glam::Vec2;

use crate::error::{Error, Result};

pub mod registry;
pub mod validator;

pub use registry::OccupancyRegistry;
pub use validator::{place_one, place_one_traced, PlacementAttempt};

pub const DEFAULT_MAX_ATTEMPTS: u32 = 30;

/// The two kinds of points a session places.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Category {
    Token,
    Obstacle,
}

impl Category {
    pub const ALL: [Category; 2] = [Category::Token, Category::Obstacle];

    /// The scope this category validates its spacing against.
    ///
    /// Tokens only keep clear of other tokens; obstacles keep clear of everything.
    pub fn validation_scope(self) -> Scope {
        match self {
            Category::Token => Scope::TokensOnly,
            Category::Obstacle => Scope::All,
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Category::Token => f.write_str("token"),
            Category::Obstacle => f.write_str("obstacle"),
        }
    }
}

/// Which stored categories a spacing query considers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Scope {
    TokensOnly,
    All,
}

impl Scope {
    #[inline]
    pub fn includes(self, category: Category) -> bool {
        match self {
            Scope::TokensOnly => category == Category::Token,
            Scope::All => true,
        }
    }
}

/// A point accepted by the validator and recorded in the registry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlacedPoint {
    pub position: Vec2,
    pub category: Category,
}

impl PlacedPoint {
    pub fn new(position: Vec2, category: Category) -> Self {
        Self { position, category }
    }
}

/// How many points of one category to place and how each placement is validated.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct PlacementRequest {
    /// Number of placement slots.
    pub count: usize,
    /// Minimum distance to every point in the validation scope.
    pub min_spacing: f32,
    /// Candidates drawn per slot before the slot is given up.
    pub max_attempts: u32,
}

impl Default for PlacementRequest {
    fn default() -> Self {
        Self {
            count: 0,
            min_spacing: 0.0,
            max_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl PlacementRequest {
    pub fn new(count: usize) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn with_min_spacing(mut self, min_spacing: f32) -> Self {
        self.min_spacing = min_spacing;
        self
    }

    pub fn with_max_attempts(mut self, max_attempts: u32) -> Self {
        self.max_attempts = max_attempts;
        self
    }

    /// Validates the request, returning an error if invalid.
    pub fn validate(&self) -> Result<()> {
        if !self.min_spacing.is_finite() || self.min_spacing < 0.0 {
            return Err(Error::InvalidConfig(format!(
                "min_spacing must be finite and >= 0 (got {})",
                self.min_spacing
            )));
        }
        if self.max_attempts == 0 {
            return Err(Error::InvalidConfig("max_attempts must be > 0".into()));
        }

        Ok(())
    }
}
