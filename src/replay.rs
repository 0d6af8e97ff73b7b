//! Replay Module
//!
//! Reconstructs the recorded call history of an instrumented operation and
//! renders it one line per call.

use std::io::{self, Write};

use crate::error::Result;
use crate::instrument::Instrumented;

/// Writes the call history of `op` to `out`.
///
/// The first line summarizes the total call count (0 if the operation was
/// never called); each following line shows one recorded call as
/// `<name>(<input>) -> <output>`. Inputs and outputs pair up in call order,
/// only as far as both lists reach.
pub async fn write_replay<W: Write>(op: &Instrumented, out: &mut W) -> Result<()> {
    let calls = op.calls().await?;
    writeln!(out, "{} was called {} times:", op.name(), calls)?;
    for record in op.records().await? {
        writeln!(out, "{}({}) -> {}", op.name(), record.input, record.output)?;
    }
    Ok(())
}

/// Prints the call history of `op` to standard output.
pub async fn replay(op: &Instrumented) -> Result<()> {
    let stdout = io::stdout();
    let mut out = stdout.lock();
    write_replay(op, &mut out).await
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::Cache;
    use crate::store::{KvStore, MemoryStore, StoreHandle};
    use std::sync::Arc;

    async fn replayed(op: &Instrumented) -> String {
        let mut out = Vec::new();
        write_replay(op, &mut out).await.unwrap();
        String::from_utf8(out).unwrap()
    }

    #[tokio::test]
    async fn test_replay_never_called() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        let output = replayed(cache.audit()).await;
        assert_eq!(output, "cache.store was called 0 times:\n");
    }

    #[tokio::test]
    async fn test_replay_lists_calls_in_order() {
        let cache = Cache::new(Arc::new(MemoryStore::new()));

        let key_a = cache.store("a").await.unwrap();
        let key_b = cache.store(7i64).await.unwrap();

        let output = replayed(cache.audit()).await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "cache.store was called 2 times:");
        assert_eq!(lines[1], format!("cache.store(\"a\") -> {key_a}"));
        assert_eq!(lines[2], format!("cache.store(7) -> {key_b}"));
    }

    #[tokio::test]
    async fn test_replay_tolerates_unequal_lists() {
        let store: StoreHandle = Arc::new(MemoryStore::new());
        let cache = Cache::new(store.clone());

        let key = cache.store("a").await.unwrap();
        // Inject a dangling input with no matching output.
        store
            .rpush("cache.store:inputs", b"(\"dangling\")".to_vec())
            .await
            .unwrap();

        let output = replayed(cache.audit()).await;
        let lines: Vec<&str> = output.lines().collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], "cache.store was called 1 times:");
        assert_eq!(lines[1], format!("cache.store(\"a\") -> {key}"));
    }
}
