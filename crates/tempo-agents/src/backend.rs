use async_trait::async_trait;
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tempo_core::Result;
use tokio::sync::mpsc;

/// Which backend agent handles a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AgentType {
    /// Default agent for the chat surface.
    Consolidator,
    TimeBlocking,
    TaskManager,
    MemoryManager,
}

/// The `POST /api/agents/execute` envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentRequest {
    pub agent_type: AgentType,
    pub input_data: serde_json::Value,
    #[serde(default)]
    pub stream: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
}

impl AgentRequest {
    pub fn new(agent_type: AgentType, input_data: serde_json::Value) -> Self {
        Self {
            agent_type,
            input_data,
            stream: false,
            user_id: None,
        }
    }

    pub fn streaming(mut self) -> Self {
        self.stream = true;
        self
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }
}

/// Non-streaming execution result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AgentResponse {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data: Option<serde_json::Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stream_id: Option<String>,
}

/// One event on a streaming execution.
#[derive(Debug, Clone)]
pub enum StreamEvent {
    /// A raw chunk of the response body, passed through verbatim.
    Chunk(Bytes),
    /// The transport failed mid-stream.
    Error(String),
    /// The body ended.
    Done,
}

/// Executes agent requests against some backend.
#[async_trait]
pub trait AgentBackend: Send + Sync {
    fn name(&self) -> &str;

    /// Execute and wait for the full JSON result.
    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse>;

    /// Execute with `stream: true`; chunks arrive on the returned channel.
    async fn execute_stream(&self, request: &AgentRequest) -> Result<mpsc::Receiver<StreamEvent>>;
}
