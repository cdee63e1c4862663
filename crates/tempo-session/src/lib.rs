//! # tempo-session
//!
//! Ties the workspace together into per-user sessions. A [`Session`] is an
//! explicitly constructed object owning its own memory tiers, task store,
//! time-block store, and chat state — there is no process-wide singleton,
//! so concurrent sessions coexist and teardown is dropping the session.

pub mod app;
pub mod chat;
pub mod session;

pub use app::AppState;
pub use chat::ChatSession;
pub use session::{Session, Sessions};
