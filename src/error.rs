//! Error types for the cache
//!
//! Provides unified error handling using thiserror.
//!
//! An absent key is not an error anywhere in this crate: lookups return
//! `Ok(None)` so callers can tell "no value" apart from a broken store or a
//! value that would not convert.

use thiserror::Error;

// == Cache Error Enum ==
/// Unified error type for the cache library.
#[derive(Error, Debug)]
pub enum CacheError {
    /// The backing store could not be reached or rejected a command
    #[error("store unavailable: {0}")]
    StoreUnavailable(#[from] redis::RedisError),

    /// A stored value could not be converted to the requested type
    #[error("value conversion failed: {0}")]
    ValueConversion(String),

    /// The underlying page fetch failed; no cache entry was written
    #[error("fetch failed: {0}")]
    FetchFailed(String),

    /// Writing replay output to the sink failed
    #[error("replay output failed: {0}")]
    Io(#[from] std::io::Error),
}

// == Result Type Alias ==
/// Convenience Result type for the cache library.
pub type Result<T> = std::result::Result<T, CacheError>;
