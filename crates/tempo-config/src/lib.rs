//! # tempo-config
//!
//! Configuration system for the Tempo client. Reads from `tempo.toml` and
//! environment variables — in that precedence order for URLs and logging,
//! with env as the fallback for anything the file leaves unset.

pub mod loader;
pub mod schema;

pub use loader::ConfigLoader;
pub use schema::{BackendConfig, LoggingConfig, MemoryConfig, TempoConfig, UiConfig};
