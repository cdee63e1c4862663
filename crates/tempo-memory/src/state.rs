use serde::{Deserialize, Serialize};
use tempo_core::{ContextRecord, Message};

use crate::longterm::L3Status;

/// Default L1 window — how many of the most recent turns L1 holds.
pub const DEFAULT_L1_WINDOW: usize = 5;

/// Default L2 bound — absorbed records beyond this are dropped oldest-first.
pub const DEFAULT_L2_CAPACITY: usize = 50;

/// Names one of the three memory tiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Tier {
    L1,
    L2,
    L3,
}

/// Per-tier counts plus the approximate serialized footprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MemoryStats {
    pub l1_count: usize,
    pub l2_count: usize,
    pub l3_count: usize,
    /// Serialized byte length of all three tiers combined.
    pub total_size: usize,
}

/// The tiered memory of one chat session.
///
/// Plain data — no I/O. [`crate::Memory`] wraps this for shared access and
/// drives the L3 load.
#[derive(Debug)]
pub struct MemoryState {
    l1: Vec<Message>,
    l2: Vec<ContextRecord>,
    l3: Vec<serde_json::Value>,
    l3_status: L3Status,
    l1_window: usize,
    l2_capacity: usize,
}

impl Default for MemoryState {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryState {
    pub fn new() -> Self {
        Self::with_limits(DEFAULT_L1_WINDOW, DEFAULT_L2_CAPACITY)
    }

    pub fn with_limits(l1_window: usize, l2_capacity: usize) -> Self {
        Self {
            l1: Vec::new(),
            l2: Vec::new(),
            l3: Vec::new(),
            l3_status: L3Status::Empty,
            l1_window,
            l2_capacity,
        }
    }

    /// Replace L1 wholesale with the given turns, keeping only the most
    /// recent `l1_window` of them. Full replace, never a merge.
    pub fn update_l1(&mut self, turns: Vec<Message>) {
        let skip = turns.len().saturating_sub(self.l1_window);
        self.l1 = turns.into_iter().skip(skip).collect();
    }

    /// Append one record to L2, dropping from the front to keep the
    /// `l2_capacity` most recently absorbed records.
    pub fn absorb_to_l2(&mut self, record: ContextRecord) {
        self.l2.push(record);
        if self.l2.len() > self.l2_capacity {
            let excess = self.l2.len() - self.l2_capacity;
            self.l2.drain(..excess);
        }
    }

    /// Replace L3 wholesale with a fetched snapshot.
    pub(crate) fn replace_l3(&mut self, entries: Vec<serde_json::Value>) {
        self.l3 = entries;
        self.l3_status = L3Status::Loaded;
    }

    /// Reset L3 to empty (fetch failed or tier cleared).
    pub(crate) fn reset_l3(&mut self) {
        self.l3.clear();
        self.l3_status = L3Status::Empty;
    }

    pub(crate) fn set_l3_loading(&mut self) {
        self.l3_status = L3Status::Loading;
    }

    /// Empty one tier, or all three when `tier` is `None`. Idempotent.
    pub fn clear(&mut self, tier: Option<Tier>) {
        match tier {
            Some(Tier::L1) => self.l1.clear(),
            Some(Tier::L2) => self.l2.clear(),
            Some(Tier::L3) => self.reset_l3(),
            None => {
                self.l1.clear();
                self.l2.clear();
                self.reset_l3();
            }
        }
    }

    /// Counts per tier plus the combined serialized size. Pure read.
    pub fn stats(&self) -> MemoryStats {
        let total_size = serialized_len(&self.l1) + serialized_len(&self.l2) + serialized_len(&self.l3);
        MemoryStats {
            l1_count: self.l1.len(),
            l2_count: self.l2.len(),
            l3_count: self.l3.len(),
            total_size,
        }
    }

    pub fn l1(&self) -> &[Message] {
        &self.l1
    }

    pub fn l2(&self) -> &[ContextRecord] {
        &self.l2
    }

    pub fn l3(&self) -> &[serde_json::Value] {
        &self.l3
    }

    pub fn l3_status(&self) -> L3Status {
        self.l3_status
    }

    pub fn l1_window(&self) -> usize {
        self.l1_window
    }

    pub fn l2_capacity(&self) -> usize {
        self.l2_capacity
    }
}

fn serialized_len<T: Serialize>(value: &T) -> usize {
    serde_json::to_vec(value).map(|v| v.len()).unwrap_or(0)
}
