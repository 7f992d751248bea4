//! Replay a generated workload with and without the range cache.
//!
//! Reads the same environment variables as the server (`ARRAY_LEN`,
//! `CACHE_CAPACITY`, `WORKLOAD_QUERIES`, ...) and logs timings, speedup and
//! cache statistics.

use anyhow::{ensure, Context};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use range_cache::replay::{replay_cached, replay_uncached};
use range_cache::workload::generate;
use range_cache::{ArrayStore, Config, RangeQueryCache};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "range_cache=info,replay=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    let workload = config.workload();
    info!(
        "Replaying {} queries over {} cells (cache capacity {})",
        workload.queries, workload.array_len, config.cache_capacity
    );

    let base = ArrayStore::random(config.array_len, config.cell_max_value, config.array_seed)
        .context("failed to build array")?;
    let queries = generate(&workload).context("failed to generate workload")?;

    let mut plain = base.clone();
    let uncached = replay_uncached(&mut plain, &queries)?;

    let mut cached_store = base;
    let mut cache = RangeQueryCache::new(config.cache_capacity)?;
    let cached = replay_cached(&mut cache, &mut cached_store, &queries)?;

    ensure!(
        uncached.checksum == cached.checksum,
        "cached replay diverged: {} != {}",
        uncached.checksum,
        cached.checksum
    );

    let speedup = if cached.elapsed.is_zero() {
        f64::INFINITY
    } else {
        uncached.elapsed.as_secs_f64() / cached.elapsed.as_secs_f64()
    };

    info!("No cache : {:8.3} s", uncached.elapsed.as_secs_f64());
    info!(
        "LRU cache: {:8.3} s  (speedup x{:.1})",
        cached.elapsed.as_secs_f64(),
        speedup
    );
    if let Some(stats) = cached.stats {
        info!(
            "hits={} misses={} evictions={} invalidations={} hit_rate={:.3}",
            stats.hits,
            stats.misses,
            stats.evictions,
            stats.invalidations,
            stats.hit_rate()
        );
    }

    Ok(())
}
