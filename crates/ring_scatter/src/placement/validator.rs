//! Rejection-sampling validator: draw candidates until one keeps its distance.
use glam::Vec2;
use rand::RngCore;

use crate::placement::{OccupancyRegistry, PlacementRequest, Scope};
use crate::region::SpawnRegion;
use crate::sampling::CandidateSampling;

/// Outcome of one placement slot.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlacementAttempt {
    /// Accepted position, or `None` when the attempt budget ran out.
    pub position: Option<Vec2>,
    /// Number of candidates drawn, including the accepted one.
    pub attempts: u32,
}

impl PlacementAttempt {
    pub fn is_placed(&self) -> bool {
        self.position.is_some()
    }
}

/// Draws up to `request.max_attempts` candidates and returns the first one that
/// lies inside `region` (within [`SpawnRegion::rim_tolerance`]) and is at least `request.min_spacing` away from every
/// point of `existing` in `scope`.
///
/// A candidate at exactly `min_spacing` is accepted.
pub fn place_one(
    region: &SpawnRegion,
    existing: &OccupancyRegistry,
    request: &PlacementRequest,
    scope: Scope,
    sampler: &dyn CandidateSampling,
    rng: &mut dyn RngCore,
) -> Option<Vec2> {
    place_one_traced(region, existing, request, scope, sampler, rng).position
}

/// Like [`place_one`], but also reports how many candidates were drawn.
pub fn place_one_traced(
    region: &SpawnRegion,
    existing: &OccupancyRegistry,
    request: &PlacementRequest,
    scope: Scope,
    sampler: &dyn CandidateSampling,
    rng: &mut dyn RngCore,
) -> PlacementAttempt {
    let min_spacing_sq = request.min_spacing * request.min_spacing;

    for attempt in 1..=request.max_attempts {
        let candidate = Vec2::from(sampler.sample(region, rng));

        // Custom samplers may step outside the ring; rim rounding is tolerated.
        if !region.contains_approx(candidate) {
            continue;
        }

        if existing.min_distance_squared(candidate, scope) < min_spacing_sq {
            continue;
        }

        return PlacementAttempt {
            position: Some(candidate),
            attempts: attempt,
        };
    }

    PlacementAttempt {
        position: None,
        attempts: request.max_attempts,
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use std::sync::atomic::{AtomicUsize, Ordering};

    use mint::Vector2;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    use super::*;
    use crate::placement::{Category, PlacedPoint};
    use crate::sampling::AnnulusSampling;

    /// Replays a fixed list of candidates, cycling when exhausted.
    pub(crate) struct ScriptedSampling {
        points: Vec<Vec2>,
        next: AtomicUsize,
    }

    impl ScriptedSampling {
        pub(crate) fn new(points: Vec<Vec2>) -> Self {
            Self {
                points,
                next: AtomicUsize::new(0),
            }
        }

        pub(crate) fn drawn(&self) -> usize {
            self.next.load(Ordering::Relaxed)
        }
    }

    impl CandidateSampling for ScriptedSampling {
        fn sample(&self, _region: &SpawnRegion, _rng: &mut dyn RngCore) -> Vector2<f32> {
            let i = self.next.fetch_add(1, Ordering::Relaxed);
            self.points[i % self.points.len()].into()
        }
    }

    fn region() -> SpawnRegion {
        SpawnRegion::new(2.0, 5.0)
    }

    #[test]
    fn zero_spacing_accepts_first_candidate() {
        let mut registry = OccupancyRegistry::new();
        registry.record(PlacedPoint::new(Vec2::new(3.0, 0.0), Category::Token));

        let sampler = ScriptedSampling::new(vec![Vec2::new(3.0, 0.0), Vec2::new(0.0, 4.0)]);
        let request = PlacementRequest::new(1).with_min_spacing(0.0);
        let mut rng = StdRng::seed_from_u64(1);

        let attempt = place_one_traced(
            &region(),
            &registry,
            &request,
            Scope::TokensOnly,
            &sampler,
            &mut rng,
        );
        assert_eq!(attempt.position, Some(Vec2::new(3.0, 0.0)));
        assert_eq!(attempt.attempts, 1);
    }

    #[test]
    fn exact_spacing_is_accepted_closer_is_rejected() {
        let mut registry = OccupancyRegistry::new();
        registry.record(PlacedPoint::new(Vec2::new(3.0, 0.0), Category::Token));

        let sampler = ScriptedSampling::new(vec![Vec2::new(3.5, 0.0), Vec2::new(4.0, 0.0)]);
        let request = PlacementRequest::new(1).with_min_spacing(1.0);
        let mut rng = StdRng::seed_from_u64(1);

        let attempt = place_one_traced(
            &region(),
            &registry,
            &request,
            Scope::TokensOnly,
            &sampler,
            &mut rng,
        );
        assert_eq!(attempt.position, Some(Vec2::new(4.0, 0.0)));
        assert_eq!(attempt.attempts, 2);
    }

    #[test]
    fn exhausted_budget_returns_none_after_all_attempts() {
        let mut registry = OccupancyRegistry::new();
        registry.record(PlacedPoint::new(Vec2::new(3.0, 0.0), Category::Token));

        let sampler = ScriptedSampling::new(vec![Vec2::new(3.1, 0.0)]);
        let request = PlacementRequest::new(1)
            .with_min_spacing(1.0)
            .with_max_attempts(7);
        let mut rng = StdRng::seed_from_u64(1);

        let attempt = place_one_traced(
            &region(),
            &registry,
            &request,
            Scope::TokensOnly,
            &sampler,
            &mut rng,
        );
        assert!(!attempt.is_placed());
        assert_eq!(attempt.attempts, 7);
        assert_eq!(sampler.drawn(), 7);
    }

    #[test]
    fn scope_decides_whether_obstacles_block() {
        let mut registry = OccupancyRegistry::new();
        registry.record(PlacedPoint::new(Vec2::new(3.0, 0.0), Category::Obstacle));

        let request = PlacementRequest::new(1)
            .with_min_spacing(1.0)
            .with_max_attempts(1);
        let mut rng = StdRng::seed_from_u64(1);

        let sampler = ScriptedSampling::new(vec![Vec2::new(3.2, 0.0)]);
        let token = place_one(
            &region(),
            &registry,
            &request,
            Scope::TokensOnly,
            &sampler,
            &mut rng,
        );
        assert_eq!(token, Some(Vec2::new(3.2, 0.0)));

        let sampler = ScriptedSampling::new(vec![Vec2::new(3.2, 0.0)]);
        let obstacle = place_one(&region(), &registry, &request, Scope::All, &sampler, &mut rng);
        assert_eq!(obstacle, None);
    }

    #[test]
    fn candidates_outside_ring_are_rejected() {
        let registry = OccupancyRegistry::new();
        let sampler = ScriptedSampling::new(vec![
            Vec2::new(1.0, 0.0),
            Vec2::new(6.0, 0.0),
            Vec2::new(0.0, -2.5),
        ]);
        let request = PlacementRequest::new(1);
        let mut rng = StdRng::seed_from_u64(1);

        let attempt = place_one_traced(
            &region(),
            &registry,
            &request,
            Scope::All,
            &sampler,
            &mut rng,
        );
        assert_eq!(attempt.position, Some(Vec2::new(0.0, -2.5)));
        assert_eq!(attempt.attempts, 3);
    }

    #[test]
    fn zero_spacing_accepts_every_first_candidate_far_from_origin() {
        let region = SpawnRegion::new(2.0, 5.0).with_center(Vec2::new(1.0e4, 1.0e4));
        let registry = OccupancyRegistry::new();
        let request = PlacementRequest::new(1)
            .with_min_spacing(0.0)
            .with_max_attempts(1);
        let mut rng = StdRng::seed_from_u64(1);

        let rejected = (0..10_000)
            .filter(|_| {
                let attempt = place_one_traced(
                    &region,
                    &registry,
                    &request,
                    Scope::TokensOnly,
                    &AnnulusSampling,
                    &mut rng,
                );
                !attempt.is_placed()
            })
            .count();
        assert_eq!(rejected, 0);
    }

    #[test]
    fn seeded_runs_are_identical() {
        let request = PlacementRequest::new(1)
            .with_min_spacing(0.8)
            .with_max_attempts(20);
        let run = |seed: u64| {
            let mut rng = StdRng::seed_from_u64(seed);
            let mut registry = OccupancyRegistry::new();
            let mut out = Vec::new();
            for _ in 0..40 {
                let p = place_one(
                    &region(),
                    &registry,
                    &request,
                    Scope::TokensOnly,
                    &AnnulusSampling,
                    &mut rng,
                );
                if let Some(p) = p {
                    registry.record(PlacedPoint::new(p, Category::Token));
                }
                out.push(p);
            }
            out
        };

        assert_eq!(run(9), run(9));
        assert_ne!(run(9), run(10));
    }
}
