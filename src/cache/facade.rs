//! Cache Facade Module
//!
//! Typed store/retrieve facade over the key-value store, with the store
//! operation wrapped by the instrumentation layer so every write is
//! auditable.

use uuid::Uuid;

use crate::cache::value::{as_float, as_int, as_text, CacheValue};
use crate::error::Result;
use crate::instrument::Instrumented;
use crate::store::{KvStore, StoreHandle};

/// Stable name of the instrumented store operation; the audit keys
/// (`cache.store`, `cache.store:inputs`, `cache.store:outputs`) derive
/// from it.
pub const STORE_OP: &str = "cache.store";

// == Cache ==
/// Typed cache facade.
///
/// Values go in under freshly generated random keys and come back out
/// through caller-chosen converters. The facade holds no state of its own;
/// everything lives in the store behind the handle.
pub struct Cache {
    store: StoreHandle,
    store_op: Instrumented,
}

impl Cache {
    // == Constructor ==
    /// Creates a cache over the given store handle.
    pub fn new(store: StoreHandle) -> Self {
        let store_op = Instrumented::new(store.clone(), STORE_OP);
        Self { store, store_op }
    }

    // == Store ==
    /// Stores a value under a freshly generated random key and returns the
    /// key.
    ///
    /// Accepts anything convertible into [`CacheValue`]: text, bytes,
    /// integers, floats. Each call is counted and recorded in the audit
    /// trail before and after the write.
    pub async fn store(&self, data: impl Into<CacheValue>) -> Result<String> {
        let value = data.into();
        let args = format!("({value})");
        let bytes = value.into_bytes();
        let store = self.store.clone();
        self.store_op
            .invoke(args, || async move {
                let key = Uuid::new_v4().to_string();
                store.set(&key, bytes).await?;
                Ok(key)
            })
            .await
    }

    // == Get ==
    /// Reads the value under `key` and applies `convert` to the raw bytes.
    ///
    /// An absent key is `Ok(None)`, never an error. Converter failures
    /// surface as `ValueConversion`.
    pub async fn get<T>(
        &self,
        key: &str,
        convert: impl FnOnce(Vec<u8>) -> Result<T>,
    ) -> Result<Option<T>> {
        match self.store.get(key).await? {
            Some(raw) => convert(raw).map(Some),
            None => Ok(None),
        }
    }

    /// Reads the raw bytes under `key` unconverted.
    pub async fn get_bytes(&self, key: &str) -> Result<Option<Vec<u8>>> {
        self.get(key, Ok).await
    }

    /// Reads the value under `key` as UTF-8 text.
    pub async fn get_str(&self, key: &str) -> Result<Option<String>> {
        self.get(key, as_text).await
    }

    /// Reads the value under `key` as a decimal integer.
    pub async fn get_int(&self, key: &str) -> Result<Option<i64>> {
        self.get(key, as_int).await
    }

    /// Reads the value under `key` as a decimal float.
    pub async fn get_float(&self, key: &str) -> Result<Option<f64>> {
        self.get(key, as_float).await
    }

    // == Audit ==
    /// The instrumented store operation, for replay and audit inspection.
    pub fn audit(&self) -> &Instrumented {
        &self.store_op
    }
}
