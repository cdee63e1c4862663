//! # tempo-core
//!
//! Core types, errors, and primitives for the Tempo productivity client.
//! This crate defines the shared vocabulary used by every other crate in
//! the workspace: conversation messages, memory context records, id
//! aliases, and the unified error type.

pub mod context;
pub mod error;
pub mod message;
pub mod types;

pub use context::ContextRecord;
pub use error::{Result, TempoError};
pub use message::{Message, Role};
pub use types::*;
