//! Property-Based Tests for the Cache Facade
//!
//! Uses proptest to verify round-trip identity, not-found semantics, and
//! audit-trail accuracy over generated payloads.

use std::future::Future;
use std::sync::Arc;

use proptest::prelude::*;

use crate::cache::Cache;
use crate::store::MemoryStore;

// == Helpers ==
fn block_on<T>(future: impl Future<Output = T>) -> T {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("test runtime")
        .block_on(future)
}

fn fresh_cache() -> Cache {
    Cache::new(Arc::new(MemoryStore::new()))
}

// == Strategies ==
/// Printable text payloads, zero-length included
fn text_strategy() -> impl Strategy<Value = String> {
    "[ -~]{0,64}".prop_map(|s| s)
}

/// Arbitrary byte payloads, zero-length included
fn bytes_strategy() -> impl Strategy<Value = Vec<u8>> {
    prop::collection::vec(any::<u8>(), 0..256)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn prop_text_round_trip(value in text_strategy()) {
        block_on(async {
            let cache = fresh_cache();
            let key = cache.store(value.as_str()).await.unwrap();
            prop_assert_eq!(cache.get_str(&key).await.unwrap(), Some(value));
            Ok(())
        })?;
    }

    #[test]
    fn prop_bytes_round_trip(value in bytes_strategy()) {
        block_on(async {
            let cache = fresh_cache();
            let key = cache.store(value.clone()).await.unwrap();
            prop_assert_eq!(cache.get_bytes(&key).await.unwrap(), Some(value));
            Ok(())
        })?;
    }

    #[test]
    fn prop_int_round_trip(value in any::<i64>()) {
        block_on(async {
            let cache = fresh_cache();
            let key = cache.store(value).await.unwrap();
            prop_assert_eq!(cache.get_int(&key).await.unwrap(), Some(value));
            Ok(())
        })?;
    }

    #[test]
    fn prop_never_stored_keys_read_as_none(key in "[a-f0-9]{8,32}") {
        block_on(async {
            let cache = fresh_cache();
            prop_assert_eq!(cache.get_bytes(&key).await.unwrap(), None);
            Ok(())
        })?;
    }

    #[test]
    fn prop_audit_trail_matches_calls(values in prop::collection::vec(text_strategy(), 1..16)) {
        block_on(async {
            let cache = fresh_cache();
            let mut keys = Vec::new();
            for value in &values {
                keys.push(cache.store(value.as_str()).await.unwrap());
            }

            // Counter equals N, history lists grew in lock-step, outputs in
            // call order.
            prop_assert_eq!(cache.audit().calls().await.unwrap(), values.len() as u64);
            let records = cache.audit().records().await.unwrap();
            prop_assert_eq!(records.len(), values.len());
            for (record, key) in records.iter().zip(&keys) {
                prop_assert_eq!(&record.output, key);
            }
            Ok(())
        })?;
    }
}
