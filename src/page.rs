//! Page Cache Module
//!
//! Caches content fetched from slow external targets with a fixed TTL, and
//! counts accesses per target independently of cache hits and misses. The
//! access counter tells "how many times was this requested"; the cache
//! entry's presence tells "did we actually re-fetch".

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;

use crate::cache::as_text;
use crate::error::{CacheError, Result};
use crate::store::{KvStore, StoreHandle};

/// Default TTL for cached page content, in seconds.
pub const DEFAULT_PAGE_TTL: u64 = 10;

// == Key Derivation ==
fn cache_key(url: &str) -> String {
    format!("cache:{url}")
}

fn count_key(url: &str) -> String {
    format!("count:{url}")
}

// == Fetcher Interface ==
/// The underlying fetch operation the cache guards.
///
/// One attempt per call; retries are the caller's concern.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    /// Fetches the content of `url`.
    async fn fetch(&self, url: &str) -> Result<String>;
}

/// Shared fetchers delegate through the Arc, so one fetcher can back
/// several caches (or stay observable from tests).
#[async_trait]
impl<F: PageFetcher + ?Sized> PageFetcher for Arc<F> {
    async fn fetch(&self, url: &str) -> Result<String> {
        (**self).fetch(url).await
    }
}

// == HTTP Fetcher ==
/// HTTP fetcher backed by reqwest.
///
/// Returns the response body for any HTTP status; status handling is left
/// to the caller, matching the single-attempt contract.
#[derive(Default)]
pub struct HttpFetcher {
    client: reqwest::Client,
    timeout: Option<Duration>,
}

impl HttpFetcher {
    /// Creates a fetcher with no request timeout.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a fetcher that aborts each request after `timeout`.
    pub fn with_timeout(timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            timeout: Some(timeout),
        }
    }
}

#[async_trait]
impl PageFetcher for HttpFetcher {
    async fn fetch(&self, url: &str) -> Result<String> {
        let mut request = self.client.get(url);
        if let Some(timeout) = self.timeout {
            request = request.timeout(timeout);
        }
        let response = request
            .send()
            .await
            .map_err(|e| CacheError::FetchFailed(e.to_string()))?;
        response
            .text()
            .await
            .map_err(|e| CacheError::FetchFailed(e.to_string()))
    }
}

// == Page Cache ==
/// Keyed cache with a fixed time-to-live per entry, guarding a slow
/// external fetch.
///
/// Expiration is enforced by the store (`set_ex`); this layer never polls
/// deadlines. Two concurrent fetches of the same expired target may both
/// miss and both re-fetch; that window of duplicate work is accepted in
/// exchange for not locking across requests.
pub struct PageCache<F: PageFetcher> {
    store: StoreHandle,
    fetcher: F,
    ttl: u64,
}

impl<F: PageFetcher> PageCache<F> {
    // == Constructor ==
    /// Creates a page cache with the default TTL.
    pub fn new(store: StoreHandle, fetcher: F) -> Self {
        Self::with_ttl(store, fetcher, DEFAULT_PAGE_TTL)
    }

    /// Creates a page cache with a specific TTL in seconds.
    pub fn with_ttl(store: StoreHandle, fetcher: F, ttl: u64) -> Self {
        Self { store, fetcher, ttl }
    }

    // == Fetch ==
    /// Returns the content of `url`, from cache when a live entry exists.
    ///
    /// The access counter for `url` is incremented on every call, hit or
    /// miss, before the cache is consulted, so it also advances when the
    /// underlying fetch later fails. On a miss the fetched content is
    /// written back with the configured TTL; on fetch failure the error
    /// propagates and nothing is written.
    pub async fn fetch(&self, url: &str) -> Result<String> {
        self.store.incr(&count_key(url)).await?;

        if let Some(raw) = self.store.get(&cache_key(url)).await? {
            debug!("page cache hit for {}", url);
            return as_text(raw);
        }

        debug!("page cache miss for {}, fetching", url);
        let content = self.fetcher.fetch(url).await?;
        self.store
            .set_ex(&cache_key(url), self.ttl, content.clone().into_bytes())
            .await?;
        Ok(content)
    }

    // == Access Count ==
    /// How many times `url` has been requested, 0 if never.
    pub async fn access_count(&self, url: &str) -> Result<u64> {
        match self.store.get(&count_key(url)).await? {
            Some(raw) => {
                let text = String::from_utf8(raw)
                    .map_err(|e| CacheError::ValueConversion(e.to_string()))?;
                text.parse()
                    .map_err(|e: std::num::ParseIntError| {
                        CacheError::ValueConversion(e.to_string())
                    })
            }
            None => Ok(0),
        }
    }
}
