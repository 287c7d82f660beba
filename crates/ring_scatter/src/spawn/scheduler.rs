//! Tick-driven scheduler that places tokens, then obstacles, inside a ring.
use rand::rngs::StdRng;
use rand::{RngCore, SeedableRng};
use tracing::{debug, error, info, warn};

use crate::error::{Error, Result};
use crate::placement::{place_one_traced, Category, OccupancyRegistry, PlacedPoint};
use crate::sampling::{AnnulusSampling, CandidateSampling};
use crate::spawn::events::{EventSink, SpawnEvent, SpawnEventKind};
use crate::spawn::{CategoryTally, SpawnConfig, SpawnHost, SpawnPhase, SpawnSession, SpawnSummary};

/// Owns the registry, RNG and session state of one spawn session.
///
/// The scheduler never runs on its own: the environment calls
/// [`SpawnScheduler::start_session`] once and [`SpawnScheduler::tick`] once per
/// step until the phase is terminal. The host passed to each call instantiates
/// accepted points; handles are kept until [`SpawnScheduler::teardown`].
pub struct SpawnScheduler<H, R = StdRng> {
    config: SpawnConfig,
    sampler: Box<dyn CandidateSampling>,
    rng: R,
    phase: SpawnPhase,
    registry: OccupancyRegistry,
    handles: Vec<H>,
    session: Option<SpawnSession>,
    summary: SpawnSummary,
}

impl<H> SpawnScheduler<H, StdRng> {
    /// Creates a scheduler with a seeded [`StdRng`] and [`AnnulusSampling`].
    pub fn new(config: SpawnConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }
}

impl<H, R: RngCore> SpawnScheduler<H, R> {
    /// Creates a scheduler drawing from `rng`.
    pub fn with_rng(config: SpawnConfig, rng: R) -> Self {
        Self {
            config,
            sampler: Box::new(AnnulusSampling),
            rng,
            phase: SpawnPhase::Idle,
            registry: OccupancyRegistry::new(),
            handles: Vec::new(),
            session: None,
            summary: SpawnSummary::default(),
        }
    }

    /// Replaces the candidate sampler.
    pub fn with_sampling<S: CandidateSampling + 'static>(mut self, sampling: S) -> Self {
        self.sampler = Box::new(sampling);
        self
    }

    pub fn config(&self) -> &SpawnConfig {
        &self.config
    }

    pub fn phase(&self) -> SpawnPhase {
        self.phase
    }

    pub fn registry(&self) -> &OccupancyRegistry {
        &self.registry
    }

    /// Token-phase progress; `None` before start and after the last token slot.
    pub fn session(&self) -> Option<&SpawnSession> {
        self.session.as_ref()
    }

    pub fn summary(&self) -> &SpawnSummary {
        &self.summary
    }

    pub fn handles(&self) -> &[H] {
        &self.handles
    }

    /// Accepted points paired with the handles their host returned.
    pub fn placements(&self) -> impl Iterator<Item = (&PlacedPoint, &H)> {
        self.registry.iter().zip(self.handles.iter())
    }

    /// Token slots consumed so far, placed or skipped.
    pub fn spawned_token_count(&self) -> usize {
        match &self.session {
            Some(session) => session.spawned_token_count,
            None => self.summary.tokens.placed + self.summary.tokens.shortfalls,
        }
    }

    /// Validates the configuration and places the first batch.
    ///
    /// Without amortization the whole session (tokens, then obstacles) runs in
    /// this call and the scheduler ends in [`SpawnPhase::Done`]. Otherwise the
    /// first `tokens_per_tick` token slots are processed and the scheduler
    /// yields in [`SpawnPhase::PlacingTokens`].
    ///
    /// Configuration errors move the scheduler to [`SpawnPhase::ConfigInvalid`],
    /// emit one [`SpawnEvent::ConfigRejected`] and are returned.
    pub fn start_session<T>(
        &mut self,
        host: &mut T,
        sink: &mut dyn EventSink,
    ) -> Result<SpawnPhase>
    where
        T: SpawnHost<Handle = H>,
    {
        if self.phase != SpawnPhase::Idle {
            warn!("Spawn session already started (phase {:?}).", self.phase);
            return Err(Error::SessionNotIdle { phase: self.phase });
        }

        if let Err(err) = self.check_config(host) {
            error!("Spawn session rejected: {}.", err);
            self.transition(SpawnPhase::ConfigInvalid, sink);
            if sink.wants(SpawnEventKind::ConfigRejected) {
                sink.send(SpawnEvent::ConfigRejected {
                    message: err.to_string(),
                });
            }
            return Err(err);
        }

        let tokens = self.config.tokens.count;
        let obstacles = self.config.obstacles.count;
        info!(
            "Spawn session started: {} token(s), {} obstacle(s), {} tick(s) for tokens.",
            tokens,
            obstacles,
            self.config.token_ticks(),
        );
        if sink.wants(SpawnEventKind::SessionStarted) {
            sink.send(SpawnEvent::SessionStarted {
                region: self.config.region,
                token_count: tokens,
                obstacle_count: obstacles,
                tokens_per_tick: self.config.tokens_per_tick,
            });
        }

        self.summary = SpawnSummary {
            tokens: CategoryTally {
                requested: tokens,
                ..Default::default()
            },
            obstacles: CategoryTally {
                requested: obstacles,
                ..Default::default()
            },
            ticks: 0,
        };
        self.registry = OccupancyRegistry::with_capacity(tokens + obstacles);

        let batch = if self.config.is_amortized() {
            self.config.tokens_per_tick
        } else {
            tokens
        };
        self.session = Some(SpawnSession::new(tokens, batch));
        self.transition(SpawnPhase::PlacingTokens, sink);
        self.token_tick(host, sink);

        if !self.config.is_amortized() {
            self.place_obstacles(host, sink);
        }

        Ok(self.phase)
    }

    /// Advances the session by one step and returns the resulting phase.
    ///
    /// No-op outside [`SpawnPhase::PlacingTokens`] and
    /// [`SpawnPhase::PlacingObstacles`].
    pub fn tick<T>(&mut self, host: &mut T, sink: &mut dyn EventSink) -> SpawnPhase
    where
        T: SpawnHost<Handle = H>,
    {
        match self.phase {
            SpawnPhase::PlacingTokens => self.token_tick(host, sink),
            SpawnPhase::PlacingObstacles => {
                self.summary.ticks += 1;
                self.place_obstacles(host, sink);
            }
            _ => {}
        }
        self.phase
    }

    /// Destroys every instantiated handle, clears the registry and stops the session.
    ///
    /// Returns the number of handles destroyed. Calling it again returns 0.
    pub fn teardown<T>(&mut self, host: &mut T, sink: &mut dyn EventSink) -> usize
    where
        T: SpawnHost<Handle = H>,
    {
        if self.phase == SpawnPhase::Cancelled {
            return 0;
        }

        let destroyed = self.handles.len();
        for handle in self.handles.drain(..) {
            host.destroy(handle);
        }
        self.registry.clear();
        self.session = None;
        self.transition(SpawnPhase::Cancelled, sink);

        info!("Spawn session torn down: {} handle(s) destroyed.", destroyed);
        if sink.wants(SpawnEventKind::TornDown) {
            sink.send(SpawnEvent::TornDown { destroyed });
        }
        destroyed
    }

    fn check_config<T: SpawnHost>(&self, host: &T) -> Result<()> {
        self.config.validate()?;
        for category in Category::ALL {
            let count = self.config.request(category).count;
            if count > 0 && !host.has_factory(category) {
                return Err(Error::MissingFactory { category, count });
            }
        }
        Ok(())
    }

    fn token_tick<T>(&mut self, host: &mut T, sink: &mut dyn EventSink)
    where
        T: SpawnHost<Handle = H>,
    {
        let Some(mut session) = self.session else {
            return;
        };

        let start = session.spawned_token_count;
        for slot in start..start + session.next_batch() {
            self.place_slot(Category::Token, slot, host, sink);
            session.spawned_token_count += 1;
        }
        self.summary.ticks += 1;

        debug!(
            "Token tick {}: {}/{} slot(s) consumed.",
            self.summary.ticks, session.spawned_token_count, session.total_tokens
        );
        if sink.wants(SpawnEventKind::TickFinished) {
            sink.send(SpawnEvent::TickFinished {
                tick: self.summary.ticks,
                spawned_tokens: session.spawned_token_count,
                total_tokens: session.total_tokens,
            });
        }

        if session.is_complete() {
            self.session = None;
            self.transition(SpawnPhase::PlacingObstacles, sink);
        } else {
            self.session = Some(session);
        }
    }

    fn place_obstacles<T>(&mut self, host: &mut T, sink: &mut dyn EventSink)
    where
        T: SpawnHost<Handle = H>,
    {
        for slot in 0..self.config.obstacles.count {
            self.place_slot(Category::Obstacle, slot, host, sink);
        }

        self.transition(SpawnPhase::Done, sink);
        info!(
            "Spawn session finished: {} placed, {} shortfall(s).",
            self.summary.total_placed(),
            self.summary.total_shortfalls(),
        );
        if sink.wants(SpawnEventKind::SessionFinished) {
            sink.send(SpawnEvent::SessionFinished {
                summary: self.summary,
            });
        }
    }

    fn place_slot<T>(
        &mut self,
        category: Category,
        slot: usize,
        host: &mut T,
        sink: &mut dyn EventSink,
    ) where
        T: SpawnHost<Handle = H>,
    {
        let request = *self.config.request(category);
        let attempt = place_one_traced(
            &self.config.region,
            &self.registry,
            &request,
            category.validation_scope(),
            self.sampler.as_ref(),
            &mut self.rng,
        );

        match attempt.position {
            Some(position) => {
                let point = PlacedPoint::new(position, category);
                self.registry.record(point);
                self.handles.push(host.instantiate(category, position));
                self.summary.tally_mut(category).placed += 1;
                if sink.wants(SpawnEventKind::PointPlaced) {
                    sink.send(SpawnEvent::PointPlaced { slot, point });
                }
            }
            None => {
                self.summary.tally_mut(category).shortfalls += 1;
                let message = format!(
                    "No valid position for {} slot {} after {} attempt(s)",
                    category, slot, attempt.attempts
                );
                warn!("{}.", message);
                if sink.wants(SpawnEventKind::Shortfall) {
                    sink.send(SpawnEvent::Shortfall {
                        category,
                        slot,
                        attempts: attempt.attempts,
                        message,
                    });
                }
            }
        }
    }

    fn transition(&mut self, to: SpawnPhase, sink: &mut dyn EventSink) {
        let from = self.phase;
        if from == to {
            return;
        }
        self.phase = to;
        debug!("Spawn phase {:?} -> {:?}.", from, to);
        if sink.wants(SpawnEventKind::PhaseChanged) {
            sink.send(SpawnEvent::PhaseChanged { from, to });
        }
    }
}
