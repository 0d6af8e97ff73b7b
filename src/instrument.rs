//! Call Instrumentation Module
//!
//! Cross-cutting call counting and call history recording for
//! store-mutating operations. Both live in the external store under keys
//! derived from a caller-supplied stable operation name, so they persist
//! across process restarts and are shared by every process using the same
//! store.
//!
//! Counting and recording are independent behaviors; [`Instrumented`]
//! composes them around one operation in a fixed order. The pair is not
//! transactional: under concurrent callers the counter and the history
//! lists may interleave, which is accepted.

use std::future::Future;

use crate::error::{CacheError, Result};
use crate::store::{KvStore, StoreHandle};

// == Key Derivation ==
fn inputs_key(name: &str) -> String {
    format!("{name}:inputs")
}

fn outputs_key(name: &str) -> String {
    format!("{name}:outputs")
}

// == Call Counter ==
/// Counts invocations of a named operation in the store.
///
/// The counter key is the operation name itself. It never resets except by
/// clearing the store.
pub struct CallCounter {
    store: StoreHandle,
    name: String,
}

impl CallCounter {
    /// Creates a counter for the operation `name`.
    pub fn new(store: StoreHandle, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// Increments the counter and returns the new value.
    pub async fn bump(&self) -> Result<u64> {
        self.store.incr(&self.name).await
    }

    /// Reads the current count, defaulting to 0 when the key is absent.
    pub async fn value(&self) -> Result<u64> {
        match self.store.get(&self.name).await? {
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

// == Call History ==
/// One recorded invocation: the argument snapshot paired with its output.
#[derive(Debug, Clone, PartialEq)]
pub struct CallRecord {
    /// String snapshot of the call arguments
    pub input: String,
    /// String snapshot of the call result
    pub output: String,
}

/// Records (input, output) snapshots of a named operation in two
/// append-only store lists that grow in lock-step.
pub struct CallHistory {
    store: StoreHandle,
    name: String,
}

impl CallHistory {
    /// Creates a history log for the operation `name`.
    pub fn new(store: StoreHandle, name: impl Into<String>) -> Self {
        Self {
            store,
            name: name.into(),
        }
    }

    /// Appends an argument snapshot to the inputs list.
    pub async fn record_input(&self, args: &str) -> Result<()> {
        self.store
            .rpush(&inputs_key(&self.name), args.as_bytes().to_vec())
            .await
    }

    /// Appends a result snapshot to the outputs list.
    pub async fn record_output(&self, output: &str) -> Result<()> {
        self.store
            .rpush(&outputs_key(&self.name), output.as_bytes().to_vec())
            .await
    }

    /// Reads the full history, pairing inputs with outputs in call order.
    ///
    /// If the lists disagree in length the extra tail is dropped; a
    /// mismatch cannot happen under correct instrumentation but must not
    /// panic here.
    pub async fn records(&self) -> Result<Vec<CallRecord>> {
        let inputs = self.store.lrange(&inputs_key(&self.name), 0, -1).await?;
        let outputs = self.store.lrange(&outputs_key(&self.name), 0, -1).await?;
        Ok(inputs
            .into_iter()
            .zip(outputs)
            .map(|(input, output)| CallRecord {
                input: String::from_utf8_lossy(&input).into_owned(),
                output: String::from_utf8_lossy(&output).into_owned(),
            })
            .collect())
    }
}

// == Instrumented Operation ==
/// Composes counting and history recording around one operation.
///
/// Per call the order is fixed: count, record input, run the operation,
/// record output. The operation's result passes through unchanged. If the
/// operation fails, the count and the input record remain and no output is
/// recorded; the error propagates to the caller.
pub struct Instrumented {
    name: String,
    counter: CallCounter,
    history: CallHistory,
}

impl Instrumented {
    /// Wraps the operation `name` over the given store handle.
    pub fn new(store: StoreHandle, name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            counter: CallCounter::new(store.clone(), name.clone()),
            history: CallHistory::new(store, name.clone()),
            name,
        }
    }

    /// The stable operation name the store keys derive from.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Runs `op` with both instrumentation behaviors applied.
    ///
    /// `args` is the pre-rendered argument snapshot; the output snapshot is
    /// the `Display` form of the operation's result.
    pub async fn invoke<T, F, Fut>(&self, args: String, op: F) -> Result<T>
    where
        F: FnOnce() -> Fut,
        Fut: Future<Output = Result<T>>,
        T: std::fmt::Display,
    {
        self.counter.bump().await?;
        self.history.record_input(&args).await?;
        let output = op().await?;
        self.history.record_output(&output.to_string()).await?;
        Ok(output)
    }

    /// Total number of recorded invocations, 0 if never called.
    pub async fn calls(&self) -> Result<u64> {
        self.counter.value().await
    }

    /// The recorded (input, output) pairs in call order.
    pub async fn records(&self) -> Result<Vec<CallRecord>> {
        self.history.records().await
    }
}
