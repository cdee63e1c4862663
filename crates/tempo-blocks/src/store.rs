use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::types::{BlockStatus, TimeBlock};

/// Rolled-up numbers for one day's blocks.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayStats {
    pub total: usize,
    pub completed: usize,
    pub in_progress: usize,
    pub total_duration_mins: i64,
}

/// The time-blocking calendar's client state.
#[derive(Debug)]
pub struct TimeBlockStore {
    blocks: Vec<TimeBlock>,
    selected_date: NaiveDate,
    selected_block: Option<Uuid>,
}

impl TimeBlockStore {
    pub fn new() -> Self {
        Self {
            blocks: Vec::new(),
            selected_date: Utc::now().date_naive(),
            selected_block: None,
        }
    }

    pub fn blocks(&self) -> &[TimeBlock] {
        &self.blocks
    }

    pub fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    pub fn select_date(&mut self, date: NaiveDate) {
        self.selected_date = date;
    }

    pub fn selected_block(&self) -> Option<&TimeBlock> {
        self.selected_block.and_then(|id| self.get(id))
    }

    pub fn select_block(&mut self, id: Option<Uuid>) {
        self.selected_block = id;
    }

    pub fn get(&self, id: Uuid) -> Option<&TimeBlock> {
        self.blocks.iter().find(|b| b.id == id)
    }

    /// Replace all blocks wholesale (e.g. after an agent planned the day).
    pub fn set_blocks(&mut self, blocks: Vec<TimeBlock>) {
        self.blocks = blocks;
    }

    pub fn add(&mut self, block: TimeBlock) -> Uuid {
        let id = block.id;
        self.blocks.push(block);
        id
    }

    pub fn remove(&mut self, id: Uuid) {
        self.blocks.retain(|b| b.id != id);
        if self.selected_block == Some(id) {
            self.selected_block = None;
        }
    }

    fn set_status(&mut self, id: Uuid, status: BlockStatus) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
            block.status = status;
        }
    }

    pub fn start(&mut self, id: Uuid) {
        self.set_status(id, BlockStatus::InProgress);
    }

    /// Pausing drops back to pending; there is no separate paused state.
    pub fn pause(&mut self, id: Uuid) {
        self.set_status(id, BlockStatus::Pending);
    }

    pub fn complete(&mut self, id: Uuid) {
        self.set_status(id, BlockStatus::Completed);
    }

    /// Duplicate a block: fresh id, " (copy)" suffix, back to pending.
    pub fn duplicate(&mut self, id: Uuid) -> Option<Uuid> {
        let original = self.get(id)?;
        let mut copy = original.clone();
        copy.id = Uuid::new_v4();
        copy.title = format!("{} (copy)", original.title);
        copy.status = BlockStatus::Pending;
        let new_id = copy.id;
        self.blocks.push(copy);
        Some(new_id)
    }

    /// Move a block to a new slot, recomputing its duration.
    pub fn reschedule(&mut self, id: Uuid, start: DateTime<Utc>, end: DateTime<Utc>) {
        if let Some(block) = self.blocks.iter_mut().find(|b| b.id == id) {
            block.start = start;
            block.end = end;
            block.duration_mins = (end - start).num_minutes();
        }
    }

    pub fn blocks_for_date(&self, date: NaiveDate) -> Vec<&TimeBlock> {
        self.blocks
            .iter()
            .filter(|b| b.start.date_naive() == date)
            .collect()
    }

    pub fn day_stats(&self, date: NaiveDate) -> DayStats {
        let blocks = self.blocks_for_date(date);
        DayStats {
            total: blocks.len(),
            completed: blocks
                .iter()
                .filter(|b| b.status == BlockStatus::Completed)
                .count(),
            in_progress: blocks
                .iter()
                .filter(|b| b.status == BlockStatus::InProgress)
                .count(),
            total_duration_mins: blocks.iter().map(|b| b.duration_mins).sum(),
        }
    }
}

impl Default for TimeBlockStore {
    fn default() -> Self {
        Self::new()
    }
}
