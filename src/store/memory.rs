//! In-Memory Store Backend
//!
//! HashMap-backed implementation of the store interface with TTL support.
//! Used by the test suite and for running without a Redis server.

use std::collections::HashMap;
use std::time::{SystemTime, UNIX_EPOCH};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::error::{CacheError, Result};
use crate::store::KvStore;

// == Entry ==
/// A single stored value with an optional expiration deadline.
#[derive(Debug, Clone)]
struct Entry {
    /// The stored bytes
    value: Vec<u8>,
    /// Expiration timestamp (Unix milliseconds), None = no expiration
    expires_at: Option<u64>,
}

impl Entry {
    /// Creates a new entry with an optional TTL.
    fn new(value: Vec<u8>, ttl_seconds: Option<u64>) -> Self {
        let expires_at = ttl_seconds.map(|ttl| current_timestamp_ms() + ttl * 1000);
        Self { value, expires_at }
    }

    /// An entry is expired once the current time reaches its deadline.
    fn is_expired(&self) -> bool {
        match self.expires_at {
            Some(expires) => current_timestamp_ms() >= expires,
            None => false,
        }
    }
}

// == Memory Store ==
/// In-process key-value store with Redis-like semantics.
///
/// Scalar entries and lists live in separate maps, mirroring the type split
/// Redis enforces between strings and lists. All access is serialized
/// through one async mutex; expired entries are dropped on read.
#[derive(Debug, Default)]
pub struct MemoryStore {
    inner: Mutex<Inner>,
}

#[derive(Debug, Default)]
struct Inner {
    entries: HashMap<String, Entry>,
    lists: HashMap<String, Vec<Vec<u8>>>,
}

impl MemoryStore {
    // == Constructor ==
    /// Creates a new empty store.
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KvStore for MemoryStore {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let mut inner = self.inner.lock().await;
        match inner.entries.get(key) {
            Some(entry) if entry.is_expired() => {}
            Some(entry) => return Ok(Some(entry.value.clone())),
            None => return Ok(None),
        }
        // Expired entries read as absent and are dropped on the way out.
        inner.entries.remove(key);
        Ok(None)
    }

    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.entries.insert(key.to_string(), Entry::new(value, None));
        Ok(())
    }

    async fn set_ex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner
            .entries
            .insert(key.to_string(), Entry::new(value, Some(ttl_secs)));
        Ok(())
    }

    async fn incr(&self, key: &str) -> Result<u64> {
        let mut inner = self.inner.lock().await;
        // Expired counters restart from zero, as they would in Redis.
        let current = match inner.entries.get(key) {
            Some(entry) if !entry.is_expired() => {
                let text = std::str::from_utf8(&entry.value)
                    .map_err(|e| CacheError::ValueConversion(e.to_string()))?;
                text.parse::<u64>()
                    .map_err(|e| CacheError::ValueConversion(e.to_string()))?
            }
            _ => 0,
        };
        let next = current + 1;
        inner
            .entries
            .insert(key.to_string(), Entry::new(next.to_string().into_bytes(), None));
        Ok(next)
    }

    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.lists.entry(key.to_string()).or_default().push(value);
        Ok(())
    }

    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>> {
        let inner = self.inner.lock().await;
        let Some(list) = inner.lists.get(key) else {
            return Ok(Vec::new());
        };
        match normalize_range(list.len(), start, stop) {
            Some((from, to)) => Ok(list[from..=to].to_vec()),
            None => Ok(Vec::new()),
        }
    }

    async fn flush_all(&self) -> Result<()> {
        let mut inner = self.inner.lock().await;
        inner.entries.clear();
        inner.lists.clear();
        Ok(())
    }
}

// == Utility Functions ==
/// Returns current Unix timestamp in milliseconds.
fn current_timestamp_ms() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("Time went backwards")
        .as_millis() as u64
}

/// Resolves Redis-style inclusive list bounds to concrete indices.
///
/// Negative indices count back from the end. Returns None when the resolved
/// range selects nothing.
fn normalize_range(len: usize, start: isize, stop: isize) -> Option<(usize, usize)> {
    if len == 0 {
        return None;
    }
    let len = len as isize;
    let start = if start < 0 { (len + start).max(0) } else { start };
    let stop = if stop < 0 { len + stop } else { stop.min(len - 1) };
    if start >= len || stop < 0 || start > stop {
        return None;
    }
    Some((start as usize, stop as usize))
}
