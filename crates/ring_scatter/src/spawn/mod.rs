//! Session-level spawning: configuration, the tick-driven scheduler, the host
//! collaborator trait and diagnostics events.
pub mod config;
pub mod events;
pub mod host;
pub mod scheduler;

pub use config::SpawnConfig;
pub use host::SpawnHost;
pub use scheduler::SpawnScheduler;

use crate::placement::Category;

/// Lifecycle of a [`SpawnScheduler`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SpawnPhase {
    /// No session has been started.
    Idle,
    /// Tokens are being placed, possibly across several ticks.
    PlacingTokens,
    /// All token slots are consumed; obstacles are placed on the next tick.
    PlacingObstacles,
    /// Every slot has been processed.
    Done,
    /// The configuration was rejected at session start.
    ConfigInvalid,
    /// The session was torn down; no further ticks are processed.
    Cancelled,
}

impl SpawnPhase {
    /// Whether `tick` still has work to do in this phase.
    pub fn is_active(self) -> bool {
        matches!(self, SpawnPhase::PlacingTokens | SpawnPhase::PlacingObstacles)
    }

    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            SpawnPhase::Done | SpawnPhase::ConfigInvalid | SpawnPhase::Cancelled
        )
    }
}

/// Progress of the token phase while it is spread across ticks.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SpawnSession {
    /// Token slots consumed so far, placed or not.
    pub spawned_token_count: usize,
    /// Token slots requested.
    pub total_tokens: usize,
    /// Slots processed per tick.
    pub pending_batch_size: usize,
}

impl SpawnSession {
    pub fn new(total_tokens: usize, pending_batch_size: usize) -> Self {
        Self {
            spawned_token_count: 0,
            total_tokens,
            pending_batch_size,
        }
    }

    pub fn remaining(&self) -> usize {
        self.total_tokens.saturating_sub(self.spawned_token_count)
    }

    /// Size of the next tick's batch.
    pub fn next_batch(&self) -> usize {
        self.pending_batch_size.min(self.remaining())
    }

    pub fn is_complete(&self) -> bool {
        self.spawned_token_count >= self.total_tokens
    }
}

/// Placed and skipped counts for one category.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct CategoryTally {
    pub requested: usize,
    pub placed: usize,
    pub shortfalls: usize,
}

/// Counters for a whole session; kept after the session itself is gone.
#[non_exhaustive]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SpawnSummary {
    pub tokens: CategoryTally,
    pub obstacles: CategoryTally,
    /// Number of scheduler steps that did work, `start_session` included.
    pub ticks: usize,
}

impl SpawnSummary {
    pub fn tally(&self, category: Category) -> &CategoryTally {
        match category {
            Category::Token => &self.tokens,
            Category::Obstacle => &self.obstacles,
        }
    }

    pub(crate) fn tally_mut(&mut self, category: Category) -> &mut CategoryTally {
        match category {
            Category::Token => &mut self.tokens,
            Category::Obstacle => &mut self.obstacles,
        }
    }

    pub fn total_placed(&self) -> usize {
        self.tokens.placed + self.obstacles.placed
    }

    pub fn total_shortfalls(&self) -> usize {
        self.tokens.shortfalls + self.obstacles.shortfalls
    }
}
