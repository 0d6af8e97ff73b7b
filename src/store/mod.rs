//! Key-Value Store Module
//!
//! Narrow interface over the external key-value store, with a Redis backend
//! for production and an in-memory backend for tests and offline use.
//!
//! Every primitive is individually atomic on the store side; the interface
//! deliberately exposes nothing transactional across keys.

use std::sync::Arc;

use async_trait::async_trait;

use crate::error::Result;

mod memory;
mod redis;

// Re-export public types
pub use memory::MemoryStore;
pub use redis::RedisStore;

// == Store Interface ==
/// Operations the cache needs from a key-value store.
///
/// `get` distinguishes "absent" from "present" via `Option`; an absent key
/// is never an error. `incr` creates the counter at 0 before incrementing,
/// `rpush` appends to an ordered list, and `lrange` reads a slice of it
/// using Redis index conventions (inclusive bounds, negatives from the end).
#[async_trait]
pub trait KvStore: Send + Sync {
    /// Reads the raw bytes stored under `key`, or `None` if absent.
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Stores `value` under `key` with no expiration.
    async fn set(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Stores `value` under `key`, expiring after `ttl_secs` seconds.
    async fn set_ex(&self, key: &str, ttl_secs: u64, value: Vec<u8>) -> Result<()>;

    /// Atomically increments the integer at `key`, creating it at 0 first.
    /// Returns the value after the increment.
    async fn incr(&self, key: &str) -> Result<u64>;

    /// Appends `value` to the tail of the list at `key`.
    async fn rpush(&self, key: &str, value: Vec<u8>) -> Result<()>;

    /// Reads elements `start..=stop` of the list at `key`. Negative indices
    /// count from the end; `(0, -1)` reads the whole list.
    async fn lrange(&self, key: &str, start: isize, stop: isize) -> Result<Vec<Vec<u8>>>;

    /// Clears all state. Intended for test setup/reset only.
    async fn flush_all(&self) -> Result<()>;
}

// == Store Handle ==
/// Shared handle to a store, threaded explicitly through every component.
pub type StoreHandle = Arc<dyn KvStore>;
