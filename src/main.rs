//! Audit Cache - a Redis-backed cache with call auditing
//!
//! Demo binary: exercises the typed facade against a running Redis server,
//! prints the audit trail, and fetches a page twice to show the hit path.

use std::sync::Arc;
use std::time::Duration;

use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use audit_cache::{replay, Cache, Config, HttpFetcher, PageCache, RedisStore};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing subscriber with env filter
    // Defaults to "info" level, can be overridden with RUST_LOG env var
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "audit_cache=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!(
        "Configuration loaded: redis_url={}, page_ttl={}s, fetch_timeout={}s",
        config.redis_url, config.page_ttl, config.fetch_timeout
    );

    let store = Arc::new(RedisStore::connect(&config.redis_url).await?);
    info!("Store connected");

    // Typed facade: store one value of each payload type and read them back.
    let cache = Cache::new(store.clone());

    let key = cache.store("Hello").await?;
    info!("stored text under {key}, got back {:?}", cache.get_str(&key).await?);

    let key = cache.store(42i64).await?;
    info!("stored integer under {key}, got back {:?}", cache.get_int(&key).await?);

    let key = cache.store(1.5f64).await?;
    info!("stored float under {key}, got back {:?}", cache.get_float(&key).await?);

    // Every store above went through the audit trail.
    replay(cache.audit()).await?;

    // Page cache: the second fetch inside the TTL window is served from the
    // store without touching the network.
    let pages = PageCache::with_ttl(
        store,
        HttpFetcher::with_timeout(Duration::from_secs(config.fetch_timeout)),
        config.page_ttl,
    );
    let url = "http://example.com";
    let content = pages.fetch(url).await?;
    info!("fetched {} ({} bytes)", url, content.len());
    let content = pages.fetch(url).await?;
    info!(
        "fetched {} again ({} bytes), access count {}",
        url,
        content.len(),
        pages.access_count(url).await?
    );

    Ok(())
}
