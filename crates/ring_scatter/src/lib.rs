#![forbid(unsafe_code)]
//! ring_scatter: spacing-aware placement of tokens and obstacles inside an annulus.
//!
//! Modules:
//! - region: the ring every point is placed in
//! - sampling: candidate generation (area-uniform annulus sampling)
//! - placement: categories, occupancy registry, rejection-sampling validator
//! - spawn: session config, tick-driven scheduler, host trait, events
//!
//! For examples and docs, see README and docs.rs.
pub mod error;
pub mod placement;
pub mod region;
pub mod sampling;
pub mod spawn;

/// Convenient re-exports for common types. Import with `use ring_scatter::prelude::*;`.
pub mod prelude {
    pub use crate::error::{Error, Result};
    pub use crate::placement::{
        place_one, place_one_traced, Category, OccupancyRegistry, PlacedPoint, PlacementAttempt,
        PlacementRequest, Scope,
    };
    pub use crate::region::SpawnRegion;
    pub use crate::sampling::{sample_annulus_point, AnnulusSampling, CandidateSampling};
    pub use crate::spawn::events::{
        EventSink, FnSink, MultiSink, SpawnEvent, SpawnEventKind, VecSink,
    };
    pub use crate::spawn::host::RecordingHost;
    pub use crate::spawn::{
        CategoryTally, SpawnConfig, SpawnHost, SpawnPhase, SpawnScheduler, SpawnSession,
        SpawnSummary,
    };
}
