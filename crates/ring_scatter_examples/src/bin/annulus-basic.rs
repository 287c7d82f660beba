use glam::Vec2;
use ring_scatter::prelude::*;
use ring_scatter_examples::{init_tracing, render_session_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // Ring between radius 2 and 5 around the origin.
    let region = SpawnRegion::new(2.0, 5.0).with_center(Vec2::ZERO);

    // Ten tokens, half a unit apart, everything placed in one call.
    let config = SpawnConfig::new(region)
        .with_token_count(10)
        .with_obstacle_count(0)
        .with_min_spacing(0.5)
        .with_max_attempts(50);

    let mut scheduler = SpawnScheduler::new(config, 2025);
    let mut host = RecordingHost::new();
    let mut sink = VecSink::new();

    let phase = scheduler.start_session(&mut host, &mut sink)?;
    let summary = scheduler.summary();
    tracing::info!(
        "Phase {:?}: {} token(s) placed, {} shortfall(s), {} event(s)",
        phase,
        summary.tokens.placed,
        summary.tokens.shortfalls,
        sink.len()
    );

    let rc = RenderConfig::new((800, 800), &region);
    render_session_to_png(
        &region,
        scheduler.registry().points(),
        &rc,
        "annulus-basic.png",
    )?;

    Ok(())
}
