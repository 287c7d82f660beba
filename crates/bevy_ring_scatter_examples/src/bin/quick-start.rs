use bevy::prelude::*;
use bevy_ring_scatter::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(RingScatterPlugin)
        .add_systems(Startup, spawn_scene)
        .add_systems(Update, respawn_on_space)
        .add_observer(log_finished)
        .run();
}

fn spawner() -> RingSpawner {
    // World units are pixels with the default 2D camera.
    let config = SpawnConfig::new(SpawnRegion::new(120.0, 320.0))
        .with_token_count(100)
        .with_obstacle_count(12)
        .with_min_spacing(24.0)
        .with_max_attempts(30)
        .with_tokens_per_tick(5);

    RingSpawner::new(config, 42)
        .with_token_prefab(Prefab::from_bundle(Sprite::from_color(
            Color::srgb(0.95, 0.8, 0.25),
            Vec2::splat(10.0),
        )))
        .with_obstacle_prefab(Prefab::from_bundle(Sprite::from_color(
            Color::srgb(0.8, 0.3, 0.3),
            Vec2::splat(22.0),
        )))
}

fn spawn_scene(mut commands: Commands) {
    commands.spawn(Camera2d);
    commands.spawn((Transform::default(), spawner()));
}

/// Despawning the spawner despawns everything it placed; a fresh one starts over.
fn respawn_on_space(
    mut commands: Commands,
    keys: Res<ButtonInput<KeyCode>>,
    spawners: Query<Entity, With<RingSpawner>>,
) {
    if !keys.just_pressed(KeyCode::Space) {
        return;
    }
    for entity in spawners.iter() {
        commands.entity(entity).despawn();
    }
    commands.spawn((Transform::default(), spawner()));
}

fn log_finished(finished: On<RingSpawnFinished>) {
    info!(
        "Spawner {} finished after {} tick(s): {} token(s), {} obstacle(s), {} shortfall(s)",
        finished.entity,
        finished.summary.ticks,
        finished.summary.tokens.placed,
        finished.summary.obstacles.placed,
        finished.summary.total_shortfalls()
    );
}
