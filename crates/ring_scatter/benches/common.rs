use std::time::Duration;

use criterion::{Criterion, Throughput};
use ring_scatter::prelude::{SpawnConfig, SpawnRegion};

pub const SAMPLE_SIZE: usize = 20;
pub const WARM_UP: Duration = Duration::from_secs(1);
pub const MEASUREMENT_TIME: Duration = Duration::from_secs(2);

pub const TOKEN_COUNTS: [usize; 4] = [25, 50, 100, 200];

pub fn default_criterion() -> Criterion {
    Criterion::default()
        .configure_from_args()
        .sample_size(SAMPLE_SIZE)
        .warm_up_time(WARM_UP)
        .measurement_time(MEASUREMENT_TIME)
}

pub fn elements_throughput(elements: usize) -> Throughput {
    Throughput::Elements(elements.max(1) as u64)
}

/// Ring 4..20 with spacing 1.0; roughly a quarter of its packing capacity at 200 tokens.
pub fn bench_config(tokens: usize) -> SpawnConfig {
    SpawnConfig::new(SpawnRegion::new(4.0, 20.0))
        .with_token_count(tokens)
        .with_obstacle_count(tokens / 10)
        .with_min_spacing(1.0)
        .with_max_attempts(30)
}
