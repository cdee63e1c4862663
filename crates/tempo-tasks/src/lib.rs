//! # tempo-tasks
//!
//! The kanban task manager's client state. Three layers:
//!
//! - [`types`]: the task graph as the task store API serves it.
//! - [`api`]: thin HTTP client over the task store endpoints.
//! - [`store`]: the reactive store the UI reads — every mutation calls the
//!   API and then refetches the whole graph; failures become a non-blocking
//!   error string, never a panic.

pub mod api;
pub mod store;
pub mod types;

pub use api::TaskApi;
pub use store::TaskStore;
pub use types::{
    ChecklistItem, Priority, Project, ProjectKey, Subtask, Task, TaskCreate, TaskGraph, TaskUpdate,
    ViewMode,
};
