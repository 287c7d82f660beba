use glam::Vec2;
use ring_scatter::prelude::*;
use ring_scatter_examples::{init_tracing, render_session_to_png, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    let region = SpawnRegion::new(4.0, 20.0).with_center(Vec2::new(5.0, 5.0));

    // 200 tokens spread over 25 ticks, then 15 obstacles on the following tick.
    let config = SpawnConfig::new(region)
        .with_token_count(200)
        .with_obstacle_count(15)
        .with_min_spacing(1.0)
        .with_max_attempts(30)
        .with_tokens_per_tick(8);

    let mut scheduler = SpawnScheduler::new(config, 7);
    let mut host = RecordingHost::new();

    // Only print progress; everything else is logged by the scheduler.
    let mut sink = FnSink::new(|event| {
        if let SpawnEvent::TickFinished {
            tick,
            spawned_tokens,
            total_tokens,
        } = event
        {
            println!("tick {tick:>2}: {spawned_tokens:>3}/{total_tokens} token slots");
        }
    });

    let mut phase = scheduler.start_session(&mut host, &mut sink)?;
    while phase.is_active() {
        phase = scheduler.tick(&mut host, &mut sink);
    }

    let summary = scheduler.summary();
    tracing::info!(
        "Finished in {} tick(s): {} placed, {} shortfall(s)",
        summary.ticks,
        summary.total_placed(),
        summary.total_shortfalls()
    );

    let rc = RenderConfig::new((1000, 1000), &region);
    render_session_to_png(
        &region,
        scheduler.registry().points(),
        &rc,
        "amortized-ticks.png",
    )?;

    Ok(())
}
