//! Event types and sinks for observing spawn sessions.
//!
//! This module defines [`SpawnEvent`] and a set of sinks and adapters to emit,
//! collect, or forward events while a [`crate::spawn::SpawnScheduler`] runs.
use crate::placement::{Category, PlacedPoint};
use crate::region::SpawnRegion;
use crate::spawn::{SpawnPhase, SpawnSummary};

/// Describes events emitted by spawn sessions.
#[non_exhaustive]
#[derive(Debug, Clone, PartialEq)]
pub enum SpawnEvent {
    /// Emitted once the configuration passed validation.
    SessionStarted {
        /// Region used for the session.
        region: SpawnRegion,
        /// Token slots requested.
        token_count: usize,
        /// Obstacle slots requested.
        obstacle_count: usize,
        /// Token slots per tick, `0` when not amortized.
        tokens_per_tick: usize,
    },

    /// Emitted on every state machine transition.
    PhaseChanged {
        from: SpawnPhase,
        to: SpawnPhase,
    },

    /// Emitted when a point was accepted and instantiated.
    PointPlaced {
        /// Slot index within its category.
        slot: usize,
        /// The accepted point.
        point: PlacedPoint,
    },

    /// Non-fatal warning: a slot ran out of attempts and was skipped.
    Shortfall {
        category: Category,
        /// Slot index within its category.
        slot: usize,
        /// Candidates drawn before giving up.
        attempts: u32,
        /// Human-readable message.
        message: String,
    },

    /// Emitted at the end of each amortized token tick.
    TickFinished {
        /// One-based tick number; `start_session` is tick 1.
        tick: usize,
        spawned_tokens: usize,
        total_tokens: usize,
    },

    /// Emitted when the session reaches `Done`.
    SessionFinished { summary: SpawnSummary },

    /// Fatal-to-session error: the configuration was rejected.
    ConfigRejected {
        /// Human-readable message.
        message: String,
    },

    /// Emitted once when a session is torn down.
    TornDown {
        /// Number of handles passed to the destruction hook.
        destroyed: usize,
    },
}

/// Discriminant of [`SpawnEvent`], used by sinks to opt out of event kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpawnEventKind {
    SessionStarted,
    PhaseChanged,
    PointPlaced,
    Shortfall,
    TickFinished,
    SessionFinished,
    ConfigRejected,
    TornDown,
}

impl SpawnEvent {
    pub fn kind(&self) -> SpawnEventKind {
        match self {
            SpawnEvent::SessionStarted { .. } => SpawnEventKind::SessionStarted,
            SpawnEvent::PhaseChanged { .. } => SpawnEventKind::PhaseChanged,
            SpawnEvent::PointPlaced { .. } => SpawnEventKind::PointPlaced,
            SpawnEvent::Shortfall { .. } => SpawnEventKind::Shortfall,
            SpawnEvent::TickFinished { .. } => SpawnEventKind::TickFinished,
            SpawnEvent::SessionFinished { .. } => SpawnEventKind::SessionFinished,
            SpawnEvent::ConfigRejected { .. } => SpawnEventKind::ConfigRejected,
            SpawnEvent::TornDown { .. } => SpawnEventKind::TornDown,
        }
    }

    /// Whether this event reports a problem (warning or error).
    pub fn is_diagnostic(&self) -> bool {
        matches!(
            self,
            SpawnEvent::Shortfall { .. } | SpawnEvent::ConfigRejected { .. }
        )
    }
}

/// A generic event sink that accepts [`SpawnEvent`]s.
pub trait EventSink {
    fn send(&mut self, event: SpawnEvent);

    /// Lets emitters skip building events the sink would drop.
    fn wants(&self, _kind: SpawnEventKind) -> bool {
        true
    }

    fn send_many<I>(&mut self, events: I)
    where
        Self: Sized,
        I: IntoIterator<Item = SpawnEvent>,
    {
        for e in events {
            self.send(e);
        }
    }
}

/// A no-op event sink.
impl EventSink for () {
    #[inline]
    fn send(&mut self, _event: SpawnEvent) {}

    #[inline]
    fn wants(&self, _kind: SpawnEventKind) -> bool {
        false
    }
}

/// An event sink that forwards to a user-provided closure.
pub struct FnSink<F>
where
    F: FnMut(SpawnEvent),
{
    f: F,
}

impl<F> FnSink<F>
where
    F: FnMut(SpawnEvent),
{
    pub fn new(f: F) -> Self {
        Self { f }
    }
}

impl<F> EventSink for FnSink<F>
where
    F: FnMut(SpawnEvent),
{
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        (self.f)(event);
    }
}

/// An event sink that collects all events in a `Vec`.
#[derive(Default)]
pub struct VecSink {
    events: Vec<SpawnEvent>,
}

impl VecSink {
    pub fn new() -> Self {
        Self { events: Vec::new() }
    }

    pub fn with_capacity(cap: usize) -> Self {
        Self {
            events: Vec::with_capacity(cap),
        }
    }

    pub fn into_inner(self) -> Vec<SpawnEvent> {
        self.events
    }

    pub fn as_slice(&self) -> &[SpawnEvent] {
        &self.events
    }

    /// Number of collected events of `kind`.
    pub fn count(&self, kind: SpawnEventKind) -> usize {
        self.events.iter().filter(|e| e.kind() == kind).count()
    }

    pub fn clear(&mut self) {
        self.events.clear();
    }

    pub fn len(&self) -> usize {
        self.events.len()
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }
}

impl EventSink for VecSink {
    #[inline]
    fn send(&mut self, event: SpawnEvent) {
        self.events.push(event);
    }
}

/// Fan-out sink that forwards each event to all contained sinks.
pub struct MultiSink<S: EventSink> {
    pub(crate) sinks: Vec<S>,
}

impl<S: EventSink> MultiSink<S> {
    pub fn new() -> Self {
        Self { sinks: Vec::new() }
    }

    pub fn with_sinks(sinks: Vec<S>) -> Self {
        Self { sinks }
    }

    pub fn push(&mut self, sink: S) {
        self.sinks.push(sink);
    }

    pub fn is_empty(&self) -> bool {
        self.sinks.is_empty()
    }

    pub fn len(&self) -> usize {
        self.sinks.len()
    }
}

impl<S: EventSink> Default for MultiSink<S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<S: EventSink> EventSink for MultiSink<S> {
    fn send(&mut self, event: SpawnEvent) {
        let Some(last_idx) = self.sinks.len().checked_sub(1) else {
            return;
        };
        for i in 0..last_idx {
            if self.sinks[i].wants(event.kind()) {
                self.sinks[i].send(event.clone());
            }
        }
        if self.sinks[last_idx].wants(event.kind()) {
            self.sinks[last_idx].send(event);
        }
    }

    fn wants(&self, kind: SpawnEventKind) -> bool {
        self.sinks.iter().any(|s| s.wants(kind))
    }
}
