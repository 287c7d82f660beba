use bevy::prelude::*;
use bevy_ring_scatter::prelude::*;

fn main() {
    App::new()
        .add_plugins(DefaultPlugins)
        .add_plugins(RingScatterPlugin)
        .add_systems(Startup, setup)
        .add_systems(Update, on_ring_scatter_message)
        .run();
}

/// Spawns a spawner whose configuration is loaded from `assets/arena.ringspawn`.
fn setup(mut commands: Commands, asset_server: Res<AssetServer>) {
    commands.spawn(Camera2d);

    let token = Prefab::new(|entity, _| {
        entity.insert(Sprite::from_color(
            Color::srgb(0.4, 0.85, 1.0),
            Vec2::splat(8.0),
        ));
    });
    // Obstacles grow with their distance from the ring center.
    let obstacle = Prefab::new(|entity, position| {
        let size = 12.0 + position.length() * 0.05;
        entity.insert(Sprite::from_color(
            Color::srgb(0.6, 0.6, 0.65),
            Vec2::splat(size),
        ));
    });

    commands.spawn((
        Transform::default(),
        RingSpawnerFromAsset::new(asset_server.load("arena.ringspawn"))
            .with_token_prefab(token)
            .with_obstacle_prefab(obstacle),
    ));
}

fn on_ring_scatter_message(mut reader: MessageReader<RingScatterMessage>) {
    for msg in reader.read() {
        let spawner = msg.spawner;

        match &msg.event {
            SpawnEvent::SessionStarted {
                token_count,
                obstacle_count,
                tokens_per_tick,
                ..
            } => {
                info!(
                    "Spawner {:?} started: {token_count} token(s), {obstacle_count} obstacle(s), {tokens_per_tick} per tick",
                    spawner
                );
            }
            SpawnEvent::PhaseChanged { from, to } => {
                info!("Spawner {:?}: {:?} -> {:?}", spawner, from, to);
            }
            SpawnEvent::PointPlaced { slot, point } => {
                debug!(
                    "{} #{} at ({:.1},{:.1})",
                    point.category, slot, point.position.x, point.position.y
                );
            }
            SpawnEvent::TickFinished {
                tick,
                spawned_tokens,
                total_tokens,
            } => {
                info!("Tick {tick}: {spawned_tokens}/{total_tokens} token slot(s)");
            }
            SpawnEvent::Shortfall { message, .. } => {
                warn!("{}", message);
            }
            SpawnEvent::ConfigRejected { message } => {
                error!("Spawner {:?} rejected: {}", spawner, message);
            }
            SpawnEvent::SessionFinished { summary } => {
                info!(
                    "Spawner {:?} done: {} placed, {} shortfall(s)",
                    spawner,
                    summary.total_placed(),
                    summary.total_shortfalls()
                );
            }
            _ => {}
        }
    }
}
