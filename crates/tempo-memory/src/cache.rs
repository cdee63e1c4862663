use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use parking_lot::RwLock;
use tempo_core::{ContextRecord, Message};
use tracing::{debug, warn};

use crate::longterm::{L3Status, LoadOutcome, LongTermStore};
use crate::state::{MemoryState, MemoryStats, Tier};

/// Session-scoped handle over a [`MemoryState`].
///
/// Explicitly constructed and passed by reference to consumers — there is
/// no process-wide singleton, so concurrent sessions each get their own
/// tiers and teardown is just dropping the handle.
///
/// The only suspending operation is [`Memory::load_long_term`]. Tier
/// mutations that land while a load is in flight commit independently
/// against disjoint tiers; the lock is never held across an await.
#[derive(Clone)]
pub struct Memory {
    inner: Arc<MemoryInner>,
}

struct MemoryInner {
    state: RwLock<MemoryState>,
    store: Arc<dyn LongTermStore>,
    /// Next load sequence number to hand out.
    issued_seq: AtomicU64,
    /// Highest sequence number that has committed to L3.
    committed_seq: AtomicU64,
    /// When set, an L3 load that resolves after a newer one already
    /// committed is discarded instead of last-write-wins.
    discard_stale: bool,
}

impl Memory {
    pub fn new(store: Arc<dyn LongTermStore>) -> Self {
        Self::with_state(store, MemoryState::new())
    }

    pub fn with_state(store: Arc<dyn LongTermStore>, state: MemoryState) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                state: RwLock::new(state),
                store,
                issued_seq: AtomicU64::new(0),
                committed_seq: AtomicU64::new(0),
                discard_stale: false,
            }),
        }
    }

    /// Enable stale-response discarding for overlapping L3 loads.
    /// Default behavior is last completion wins.
    pub fn discard_stale_loads(store: Arc<dyn LongTermStore>, state: MemoryState) -> Self {
        Self {
            inner: Arc::new(MemoryInner {
                state: RwLock::new(state),
                store,
                issued_seq: AtomicU64::new(0),
                committed_seq: AtomicU64::new(0),
                discard_stale: true,
            }),
        }
    }

    /// Replace L1 wholesale with the given turns.
    pub fn update_l1(&self, turns: Vec<Message>) {
        self.inner.state.write().update_l1(turns);
    }

    /// Absorb one completed context record into L2.
    pub fn absorb_to_l2(&self, record: ContextRecord) {
        self.inner.state.write().absorb_to_l2(record);
    }

    /// Empty one tier, or all three when `tier` is `None`.
    pub fn clear(&self, tier: Option<Tier>) {
        self.inner.state.write().clear(tier);
    }

    pub fn stats(&self) -> MemoryStats {
        self.inner.state.read().stats()
    }

    pub fn l1(&self) -> Vec<Message> {
        self.inner.state.read().l1().to_vec()
    }

    pub fn l2(&self) -> Vec<ContextRecord> {
        self.inner.state.read().l2().to_vec()
    }

    pub fn l3(&self) -> Vec<serde_json::Value> {
        self.inner.state.read().l3().to_vec()
    }

    pub fn l3_status(&self) -> L3Status {
        self.inner.state.read().l3_status()
    }

    /// Fetch the full L3 snapshot for `user_id` and replace the tier.
    ///
    /// Any failure — transport, non-2xx, wrong content type, malformed
    /// body — resets L3 to empty and is swallowed here: the outcome carries
    /// the reason for diagnostics, but nothing propagates to the caller.
    /// Retrying is a manual action (call this again).
    pub async fn load_long_term(&self, user_id: &str) -> LoadOutcome {
        let seq = self.inner.issued_seq.fetch_add(1, Ordering::SeqCst) + 1;
        self.inner.state.write().set_l3_loading();
        debug!(user_id, seq, "loading long-term memory");

        match self.inner.store.fetch(user_id).await {
            Ok(entries) => {
                if self.inner.discard_stale
                    && seq <= self.inner.committed_seq.load(Ordering::SeqCst)
                {
                    debug!(user_id, seq, "discarding stale L3 load");
                    return LoadOutcome::Discarded;
                }
                let count = entries.len();
                self.inner.state.write().replace_l3(entries);
                self.inner.committed_seq.fetch_max(seq, Ordering::SeqCst);
                debug!(user_id, count, "long-term memory loaded");
                LoadOutcome::Loaded(count)
            }
            Err(e) => {
                let reason = e.to_string();
                if self.inner.discard_stale
                    && seq <= self.inner.committed_seq.load(Ordering::SeqCst)
                {
                    debug!(user_id, seq, "discarding stale L3 failure");
                    return LoadOutcome::Discarded;
                }
                warn!(user_id, %reason, "long-term memory unavailable, degrading to empty");
                self.inner.state.write().reset_l3();
                self.inner.committed_seq.fetch_max(seq, Ordering::SeqCst);
                LoadOutcome::Unavailable(reason)
            }
        }
    }
}
