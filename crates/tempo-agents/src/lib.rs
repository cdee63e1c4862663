//! # tempo-agents
//!
//! Client for the external agent execution API (`POST /api/agents/execute`).
//! The backend runs LangGraph-style agents; this crate only speaks the wire
//! contract: a JSON envelope in, either a JSON result or a chunked byte
//! stream back. Streamed bytes are passed through verbatim — rendering is
//! the consumer's problem.
//!
//! [`AgentBackend`] is the seam: [`HttpAgentBackend`] for production,
//! [`MockAgentBackend`] for deterministic tests.

pub mod backend;
pub mod http;
pub mod mock;

pub use backend::{AgentBackend, AgentRequest, AgentResponse, AgentType, StreamEvent};
pub use http::HttpAgentBackend;
pub use mock::MockAgentBackend;
