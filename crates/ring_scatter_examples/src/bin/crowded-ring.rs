use ring_scatter::prelude::*;
use ring_scatter_examples::{init_tracing, render_session_to_png, CircleStyle, RenderConfig};

fn main() -> anyhow::Result<()> {
    init_tracing();

    // A thin ring that cannot hold 60 tokens two units apart.
    // Slots that run out of attempts are skipped with a warning.
    let region = SpawnRegion::new(5.0, 6.0);
    let config = SpawnConfig::new(region)
        .with_token_count(60)
        .with_obstacle_count(10)
        .with_min_spacing(2.0)
        .with_max_attempts(20);

    let mut scheduler = SpawnScheduler::new(config, 99);
    let mut host = RecordingHost::new();
    let mut sink = VecSink::new();

    let phase = scheduler.start_session(&mut host, &mut sink)?;

    let summary = scheduler.summary();
    for category in Category::ALL {
        let tally = summary.tally(category);
        tracing::info!(
            "{}: {}/{} placed, {} shortfall(s)",
            category,
            tally.placed,
            tally.requested,
            tally.shortfalls
        );
    }
    tracing::info!(
        "Phase {:?} with {} warning event(s)",
        phase,
        sink.count(SpawnEventKind::Shortfall)
    );

    let rc = RenderConfig::new((800, 800), &region)
        .with_background([12, 16, 24])
        .with_token_style(CircleStyle {
            color: [120, 220, 255],
            radius: 8,
        });
    render_session_to_png(
        &region,
        scheduler.registry().points(),
        &rc,
        "crowded-ring.png",
    )?;

    Ok(())
}
