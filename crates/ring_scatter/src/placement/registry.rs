//! Storage for accepted points and the minimum-distance queries the validator runs.
use glam::Vec2;

use crate::placement::{Category, PlacedPoint, Scope};

/// Ordered collection of every point placed during a session.
///
/// Queries are linear scans; sessions place tens to a few hundred points.
#[derive(Debug, Clone, Default)]
pub struct OccupancyRegistry {
    points: Vec<PlacedPoint>,
}

impl OccupancyRegistry {
    pub fn new() -> Self {
        Self { points: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            points: Vec::with_capacity(cap),
        }
    }

    #[inline]
    pub fn record(&mut self, point: PlacedPoint) {
        self.points.push(point);
    }

    /// Minimum squared distance from `candidate` to any stored point in `scope`,
    /// or `f32::INFINITY` when the scope is empty.
    pub fn min_distance_squared(&self, candidate: Vec2, scope: Scope) -> f32 {
        let mut best = f32::INFINITY;
        for p in &self.points {
            if !scope.includes(p.category) {
                continue;
            }
            let dsq = candidate.distance_squared(p.position);
            if dsq < best {
                best = dsq;
            }
        }
        best
    }

    pub fn clear(&mut self) {
        self.points.clear();
    }

    pub fn len(&self) -> usize {
        self.points.len()
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn count(&self, category: Category) -> usize {
        self.points
            .iter()
            .filter(|p| p.category == category)
            .count()
    }

    pub fn iter(&self) -> impl Iterator<Item = &PlacedPoint> {
        self.points.iter()
    }

    pub fn points(&self) -> &[PlacedPoint] {
        &self.points
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn token(x: f32, y: f32) -> PlacedPoint {
        PlacedPoint::new(Vec2::new(x, y), Category::Token)
    }

    fn obstacle(x: f32, y: f32) -> PlacedPoint {
        PlacedPoint::new(Vec2::new(x, y), Category::Obstacle)
    }

    #[test]
    fn empty_scope_is_infinitely_far() {
        let mut registry = OccupancyRegistry::new();
        assert_eq!(
            registry.min_distance_squared(Vec2::ZERO, Scope::All),
            f32::INFINITY
        );

        registry.record(obstacle(1.0, 0.0));
        assert_eq!(
            registry.min_distance_squared(Vec2::ZERO, Scope::TokensOnly),
            f32::INFINITY
        );
        assert_eq!(registry.min_distance_squared(Vec2::ZERO, Scope::All), 1.0);
    }

    #[test]
    fn scope_filters_categories() {
        let mut registry = OccupancyRegistry::with_capacity(3);
        registry.record(token(3.0, 0.0));
        registry.record(obstacle(0.0, 1.0));
        registry.record(token(0.0, -2.0));

        assert_eq!(
            registry.min_distance_squared(Vec2::ZERO, Scope::TokensOnly),
            4.0
        );
        assert_eq!(registry.min_distance_squared(Vec2::ZERO, Scope::All), 1.0);
        assert_eq!(registry.count(Category::Token), 2);
        assert_eq!(registry.count(Category::Obstacle), 1);
    }

    #[test]
    fn record_keeps_insertion_order_and_clear_empties() {
        let mut registry = OccupancyRegistry::new();
        registry.record(token(1.0, 1.0));
        registry.record(obstacle(2.0, 2.0));
        assert_eq!(registry.len(), 2);
        assert_eq!(registry.points()[0], token(1.0, 1.0));
        assert_eq!(registry.iter().nth(1), Some(&obstacle(2.0, 2.0)));

        registry.clear();
        assert!(registry.is_empty());
        assert_eq!(registry.count(Category::Token), 0);
    }
}
