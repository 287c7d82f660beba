//! Bevy plugin for ring_scatter: per-frame spawn scheduling, prefab hosts and config assets.
#![forbid(unsafe_code)]

#[cfg(feature = "ron")]
pub use assets::{RingSpawnerConfigAsset, RingSpawnerConfigAssetLoader, RingSpawnerFromAsset};
use bevy::prelude::*;
use bevy::transform::TransformSystems;
pub use events::{ChannelSink, RingScatterBus, RingScatterMessage};
pub use host::{CommandsHost, Prefab, RingPlaced};
use ring_scatter::prelude::{SpawnConfig, SpawnPhase, SpawnScheduler, SpawnSummary};

#[cfg(feature = "ron")]
mod assets;
mod events;
mod host;

/// Convenient re-exports for common types. Import with `use bevy_ring_scatter::prelude::*;`.
pub mod prelude {
    pub use ring_scatter::prelude::*;

    #[cfg(feature = "ron")]
    pub use crate::assets::{
        RingSpawnerConfigAsset, RingSpawnerConfigAssetLoader, RingSpawnerFromAsset,
    };
    pub use crate::events::{ChannelSink, RingScatterBus, RingScatterMessage};
    pub use crate::host::{CommandsHost, Prefab, RingPlaced};
    pub use crate::{RingScatterPlugin, RingSpawnFinished, RingSpawner};
}

/// Bevy plugin that drives every [`RingSpawner`] once per frame.
pub struct RingScatterPlugin;

impl Plugin for RingScatterPlugin {
    fn build(&self, app: &mut App) {
        #[cfg(feature = "ron")]
        app.init_asset::<RingSpawnerConfigAsset>()
            .init_asset_loader::<RingSpawnerConfigAssetLoader>()
            .add_systems(
                PostUpdate,
                assets::resolve_asset_spawners.before(start_spawners),
            );

        add_spawner_systems(app);
    }
}

fn add_spawner_systems(app: &mut App) {
    app.add_message::<RingScatterMessage>()
        .init_resource::<RingScatterBus>()
        // Runs after propagation so a new spawner sees its final GlobalTransform.
        // Spawners started this frame get their second tick next frame.
        .add_systems(
            PostUpdate,
            (
                tick_spawners,
                start_spawners,
                events::drain_ring_scatter_messages,
            )
                .chain()
                .after(TransformSystems::Propagate),
        )
        .add_observer(teardown_spawner);
}

/// Places tokens and obstacles in a ring around its entity.
///
/// The configured region center is offset by the entity's [`GlobalTransform`],
/// if any, read on the first frame after transform propagation. Placed entities
/// carry [`RingPlaced`] and are despawned when this component is removed,
/// replaced by a new [`RingSpawner`], or its entity is despawned.
#[derive(Component)]
pub struct RingSpawner {
    pub config: SpawnConfig,
    pub seed: u64,
    pub token_prefab: Option<Prefab>,
    pub obstacle_prefab: Option<Prefab>,
    scheduler: Option<SpawnScheduler<Entity>>,
}

impl RingSpawner {
    pub fn new(config: SpawnConfig, seed: u64) -> Self {
        Self {
            config,
            seed,
            token_prefab: None,
            obstacle_prefab: None,
            scheduler: None,
        }
    }

    pub fn with_token_prefab(mut self, prefab: Prefab) -> Self {
        self.token_prefab = Some(prefab);
        self
    }

    pub fn with_obstacle_prefab(mut self, prefab: Prefab) -> Self {
        self.obstacle_prefab = Some(prefab);
        self
    }

    /// Phase of the running session, [`SpawnPhase::Idle`] before the first frame.
    pub fn phase(&self) -> SpawnPhase {
        self.scheduler
            .as_ref()
            .map_or(SpawnPhase::Idle, |scheduler| scheduler.phase())
    }

    pub fn summary(&self) -> Option<&SpawnSummary> {
        self.scheduler.as_ref().map(|scheduler| scheduler.summary())
    }

    pub fn scheduler(&self) -> Option<&SpawnScheduler<Entity>> {
        self.scheduler.as_ref()
    }
}

/// [`EntityEvent`] triggered on the spawner entity when its session reaches [`SpawnPhase::Done`].
#[non_exhaustive]
#[derive(EntityEvent, Clone, Debug)]
pub struct RingSpawnFinished {
    /// The spawner entity.
    pub entity: Entity,
    pub summary: SpawnSummary,
}

fn start_spawners(
    mut commands: Commands,
    bus: Res<RingScatterBus>,
    mut spawners: Query<(Entity, Option<&GlobalTransform>, &mut RingSpawner)>,
) {
    for (entity, transform, spawner) in spawners.iter_mut() {
        if spawner.scheduler.is_some() {
            continue;
        }
        let spawner = spawner.into_inner();

        let mut config = spawner.config.clone();
        if let Some(transform) = transform {
            let center = config.region.center + transform.translation().truncate();
            config = config.with_center(center);
        }

        let mut scheduler = SpawnScheduler::new(config, spawner.seed);
        let mut host = CommandsHost::new(
            &mut commands,
            entity,
            spawner.token_prefab.as_ref(),
            spawner.obstacle_prefab.as_ref(),
        );
        let mut sink = bus.sink(entity);

        match scheduler.start_session(&mut host, &mut sink) {
            Ok(SpawnPhase::Done) => {
                commands.trigger(RingSpawnFinished {
                    entity,
                    summary: *scheduler.summary(),
                });
            }
            Ok(_) => {}
            Err(err) => warn!("RingSpawner {:?} not started: {}", entity, err),
        }
        spawner.scheduler = Some(scheduler);
    }
}

fn tick_spawners(
    mut commands: Commands,
    bus: Res<RingScatterBus>,
    mut spawners: Query<(Entity, &mut RingSpawner)>,
) {
    for (entity, spawner) in spawners.iter_mut() {
        let spawner = spawner.into_inner();
        let Some(scheduler) = spawner.scheduler.as_mut() else {
            continue;
        };
        if !scheduler.phase().is_active() {
            continue;
        }

        let mut host = CommandsHost::new(
            &mut commands,
            entity,
            spawner.token_prefab.as_ref(),
            spawner.obstacle_prefab.as_ref(),
        );
        let mut sink = bus.sink(entity);

        if scheduler.tick(&mut host, &mut sink) == SpawnPhase::Done {
            commands.trigger(RingSpawnFinished {
                entity,
                summary: *scheduler.summary(),
            });
        }
    }
}

/// Runs when the component is removed, overwritten by an insert, or despawned.
fn teardown_spawner(
    replace: On<Replace, RingSpawner>,
    mut commands: Commands,
    bus: Res<RingScatterBus>,
    mut spawners: Query<&mut RingSpawner>,
) {
    let entity = replace.entity;
    let Ok(mut spawner) = spawners.get_mut(entity) else {
        return;
    };
    let Some(scheduler) = spawner.scheduler.as_mut() else {
        return;
    };

    let mut host = CommandsHost::new(&mut commands, entity, None, None);
    let mut sink = bus.sink(entity);
    let destroyed = scheduler.teardown(&mut host, &mut sink);
    debug!("RingSpawner {:?} replaced: {} placement(s) despawned", entity, destroyed);
}
