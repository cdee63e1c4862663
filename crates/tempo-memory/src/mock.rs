//! Mock long-term store for deterministic testing.
//!
//! Returns pre-configured snapshots or failures without making any HTTP
//! calls.

use async_trait::async_trait;
use std::sync::{Arc, Mutex};

use tempo_core::{Result, TempoError};

use crate::longterm::LongTermStore;

/// A mock L3 store that pops queued results in order.
///
/// # Example
/// ```
/// use tempo_memory::MockLongTermStore;
/// let store = MockLongTermStore::new()
///     .with_snapshot(vec![serde_json::json!({"fact": "likes rust"})]);
/// ```
pub struct MockLongTermStore {
    results: Arc<Mutex<Vec<MockResult>>>,
    /// User ids this store was asked about (for assertions in tests).
    pub requests: Arc<Mutex<Vec<String>>>,
}

enum MockResult {
    Snapshot(Vec<serde_json::Value>),
    Failure(String),
}

impl Default for MockLongTermStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MockLongTermStore {
    pub fn new() -> Self {
        Self {
            results: Arc::new(Mutex::new(vec![])),
            requests: Arc::new(Mutex::new(vec![])),
        }
    }

    /// Queue a successful snapshot.
    pub fn with_snapshot(self, entries: Vec<serde_json::Value>) -> Self {
        self.results.lock().unwrap().push(MockResult::Snapshot(entries));
        self
    }

    /// Queue a failure.
    pub fn with_failure(self, reason: &str) -> Self {
        self.results
            .lock()
            .unwrap()
            .push(MockResult::Failure(reason.to_string()));
        self
    }

    /// User ids fetched so far.
    pub fn recorded_requests(&self) -> Vec<String> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl LongTermStore for MockLongTermStore {
    async fn fetch(&self, user_id: &str) -> Result<Vec<serde_json::Value>> {
        self.requests.lock().unwrap().push(user_id.to_string());
        let mut results = self.results.lock().unwrap();
        if results.is_empty() {
            return Ok(vec![]);
        }
        match results.remove(0) {
            MockResult::Snapshot(entries) => Ok(entries),
            MockResult::Failure(reason) => Err(TempoError::Memory(reason)),
        }
    }
}
