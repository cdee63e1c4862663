//! # tempo-blocks
//!
//! Client state for the time-blocking calendar. Purely local — blocks are
//! created and edited in the UI; scheduling suggestions come through the
//! `time_blocking` agent, not from here.

pub mod store;
pub mod types;

pub use store::{DayStats, TimeBlockStore};
pub use types::{BlockStatus, TimeBlock};
