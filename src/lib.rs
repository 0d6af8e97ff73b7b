//! Audit Cache - a Redis-backed cache with call auditing
//!
//! Provides a typed cache facade whose store operation is instrumented with
//! a persistent call counter and call history, a replay utility for that
//! history, and a TTL page cache guarding slow external fetches.

pub mod cache;
pub mod config;
pub mod error;
pub mod instrument;
pub mod page;
pub mod replay;
pub mod store;

pub use cache::{Cache, CacheValue};
pub use config::Config;
pub use error::{CacheError, Result};
pub use instrument::Instrumented;
pub use page::{HttpFetcher, PageCache};
pub use replay::replay;
pub use store::{KvStore, MemoryStore, RedisStore, StoreHandle};
