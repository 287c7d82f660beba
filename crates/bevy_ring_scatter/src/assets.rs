use core::result::Result;

use bevy::asset::io::Reader;
use bevy::asset::{AssetLoader, LoadContext};
use bevy::prelude::*;
use bevy::reflect::TypePath;
use bevy::tasks::ConditionalSendFuture;
use ring_scatter::prelude::SpawnConfig;
use serde::{Deserialize, Serialize};

use crate::host::Prefab;
use crate::RingSpawner;

/// Spawner configuration stored as a RON asset.
///
/// ```ron
/// (
///     config: (
///         region: (center: (0.0, 0.0), min_radius: 2.0, max_radius: 5.0),
///         tokens: (count: 10, min_spacing: 0.5, max_attempts: 50),
///         obstacles: (count: 2, min_spacing: 0.5, max_attempts: 50),
///         tokens_per_tick: 0,
///     ),
///     seed: 7,
/// )
/// ```
#[derive(Asset, TypePath, Clone, Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct RingSpawnerConfigAsset {
    pub config: SpawnConfig,
    pub seed: u64,
}

/// Asset loader for [`RingSpawnerConfigAsset`] using RON files with `.ringspawn` extension.
#[derive(TypePath)]
pub struct RingSpawnerConfigAssetLoader;

impl AssetLoader for RingSpawnerConfigAssetLoader {
    type Asset = RingSpawnerConfigAsset;
    type Settings = ();
    type Error = anyhow::Error;

    fn extensions(&self) -> &[&str] {
        &["ringspawn"]
    }

    fn load(
        &self,
        reader: &mut dyn Reader,
        _settings: &Self::Settings,
        _context: &mut LoadContext,
    ) -> impl ConditionalSendFuture<Output = Result<Self::Asset, Self::Error>> {
        Box::pin(async move {
            let mut bytes = Vec::new();
            reader.read_to_end(&mut bytes).await?;
            let asset: RingSpawnerConfigAsset =
                ron::de::from_bytes(&bytes).map_err(|e| anyhow::anyhow!(e))?;
            asset.config.validate().map_err(|e| anyhow::anyhow!(e))?;
            Ok(asset)
        })
    }
}

impl FromWorld for RingSpawnerConfigAssetLoader {
    fn from_world(_: &mut World) -> Self {
        RingSpawnerConfigAssetLoader
    }
}

/// A spawner whose configuration comes from a [`RingSpawnerConfigAsset`].
///
/// Replaced by a [`RingSpawner`] as soon as the asset is loaded.
#[derive(Component, Debug, Clone)]
pub struct RingSpawnerFromAsset {
    pub config: Handle<RingSpawnerConfigAsset>,
    /// Overrides the seed stored in the asset.
    pub seed: Option<u64>,
    pub token_prefab: Option<Prefab>,
    pub obstacle_prefab: Option<Prefab>,
}

impl RingSpawnerFromAsset {
    pub fn new(config: Handle<RingSpawnerConfigAsset>) -> Self {
        Self {
            config,
            seed: None,
            token_prefab: None,
            obstacle_prefab: None,
        }
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    pub fn with_token_prefab(mut self, prefab: Prefab) -> Self {
        self.token_prefab = Some(prefab);
        self
    }

    pub fn with_obstacle_prefab(mut self, prefab: Prefab) -> Self {
        self.obstacle_prefab = Some(prefab);
        self
    }
}

pub(crate) fn resolve_asset_spawners(
    mut commands: Commands,
    pending: Query<(Entity, &RingSpawnerFromAsset)>,
    assets: Res<Assets<RingSpawnerConfigAsset>>,
) {
    for (entity, from_asset) in pending.iter() {
        let Some(asset) = assets.get(&from_asset.config) else {
            continue;
        };

        let mut spawner = RingSpawner::new(
            asset.config.clone(),
            from_asset.seed.unwrap_or(asset.seed),
        );
        spawner.token_prefab = from_asset.token_prefab.clone();
        spawner.obstacle_prefab = from_asset.obstacle_prefab.clone();

        commands
            .entity(entity)
            .remove::<RingSpawnerFromAsset>()
            .insert(spawner);
    }
}
