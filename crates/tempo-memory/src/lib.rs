//! # tempo-memory
//!
//! Three-tier memory cache for the Tempo chat surface:
//!
//! - **L1 (immediate context)**: the most recent N conversation turns,
//!   replaced wholesale on every update (in-memory, ephemeral).
//! - **L2 (session memory)**: absorbed context records, bounded FIFO of 50
//!   entries (in-memory, ephemeral).
//! - **L3 (long-term memory)**: server-persisted snapshot fetched wholesale
//!   from the memory API and cached read-mostly on the client.
//!
//! Nothing here persists on-device. A [`Memory`] is created per user
//! session and discarded with it. L3 loads degrade to an empty tier on any
//! failure — the chat surface must stay usable with no long-term memory
//! rather than block or error out.

pub mod cache;
pub mod longterm;
pub mod mock;
pub mod state;

pub use cache::Memory;
pub use longterm::{HttpLongTermStore, L3Status, LoadOutcome, LongTermStore};
pub use mock::MockLongTermStore;
pub use state::{MemoryState, MemoryStats, Tier, DEFAULT_L1_WINDOW, DEFAULT_L2_CAPACITY};
