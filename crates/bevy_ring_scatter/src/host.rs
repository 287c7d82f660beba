use std::fmt;
use std::sync::Arc;

use bevy::prelude::*;
use ring_scatter::prelude::{Category, SpawnHost};

/// Adds the visual or physical parts of a placed point to its freshly spawned entity.
///
/// The entity already carries a [`Transform`] and [`GlobalTransform`] at the
/// placed position and a [`RingPlaced`] marker when the prefab runs.
#[derive(Clone)]
pub struct Prefab(Arc<dyn Fn(&mut EntityCommands, Vec2) + Send + Sync>);

impl Prefab {
    pub fn new(f: impl Fn(&mut EntityCommands, Vec2) + Send + Sync + 'static) -> Self {
        Self(Arc::new(f))
    }

    /// A prefab that inserts a clone of `bundle`.
    pub fn from_bundle<B: Bundle + Clone>(bundle: B) -> Self {
        Self::new(move |entity, _| {
            entity.insert(bundle.clone());
        })
    }

    fn apply(&self, entity: &mut EntityCommands, position: Vec2) {
        (self.0)(entity, position);
    }
}

impl fmt::Debug for Prefab {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Prefab(..)")
    }
}

/// Marker on every entity spawned for a placed point.
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct RingPlaced {
    /// Spawner entity that owns this placement.
    pub spawner: Entity,
    pub category: Category,
}

/// [`SpawnHost`] that spawns placed points through [`Commands`] and despawns them on teardown.
pub struct CommandsHost<'a, 'w, 's> {
    commands: &'a mut Commands<'w, 's>,
    spawner: Entity,
    tokens: Option<&'a Prefab>,
    obstacles: Option<&'a Prefab>,
    z: f32,
}

impl<'a, 'w, 's> CommandsHost<'a, 'w, 's> {
    pub fn new(
        commands: &'a mut Commands<'w, 's>,
        spawner: Entity,
        tokens: Option<&'a Prefab>,
        obstacles: Option<&'a Prefab>,
    ) -> Self {
        Self {
            commands,
            spawner,
            tokens,
            obstacles,
            z: 0.0,
        }
    }

    /// Sets the z coordinate of spawned transforms.
    pub fn with_z(mut self, z: f32) -> Self {
        self.z = z;
        self
    }

    fn prefab(&self, category: Category) -> Option<&'a Prefab> {
        match category {
            Category::Token => self.tokens,
            Category::Obstacle => self.obstacles,
        }
    }
}

impl SpawnHost for CommandsHost<'_, '_, '_> {
    type Handle = Entity;

    fn has_factory(&self, category: Category) -> bool {
        self.prefab(category).is_some()
    }

    fn instantiate(&mut self, category: Category, position: Vec2) -> Entity {
        let prefab = self.prefab(category);
        let transform = Transform::from_translation(position.extend(self.z));
        // Spawned after propagation; set the global transform for this frame's render.
        let mut entity = self.commands.spawn((
            RingPlaced {
                spawner: self.spawner,
                category,
            },
            transform,
            GlobalTransform::from(transform),
        ));
        if let Some(prefab) = prefab {
            prefab.apply(&mut entity, position);
        }
        entity.id()
    }

    fn destroy(&mut self, handle: Entity) {
        // The placed entity may already be gone (despawned by gameplay code).
        self.commands.entity(handle).try_despawn();
    }
}
