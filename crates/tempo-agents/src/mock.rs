//! Mock agent backend for deterministic testing.
//!
//! Returns pre-configured responses without making any HTTP calls.

use async_trait::async_trait;
use bytes::Bytes;
use std::sync::{Arc, Mutex};
use tempo_core::{Result, TempoError};
use tokio::sync::mpsc;

use crate::backend::{AgentBackend, AgentRequest, AgentResponse, StreamEvent};

/// A mock backend that pops queued responses in order.
pub struct MockAgentBackend {
    responses: Arc<Mutex<Vec<MockResponse>>>,
    /// All requests received (for assertions in tests).
    pub requests: Arc<Mutex<Vec<AgentRequest>>>,
    name: String,
}

#[derive(Clone)]
enum MockResponse {
    Json(AgentResponse),
    Error(String),
}

impl MockAgentBackend {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            responses: Arc::new(Mutex::new(vec![])),
            requests: Arc::new(Mutex::new(vec![])),
            name: name.into(),
        }
    }

    /// Queue a successful result with the given `data` payload.
    pub fn with_data(self, data: serde_json::Value) -> Self {
        self.responses.lock().unwrap().push(MockResponse::Json(AgentResponse {
            success: true,
            data: Some(data),
            error: None,
            stream_id: None,
        }));
        self
    }

    /// Queue a `success: false` result carrying a backend-side error string.
    pub fn with_backend_error(self, error: &str) -> Self {
        self.responses.lock().unwrap().push(MockResponse::Json(AgentResponse {
            success: false,
            data: None,
            error: Some(error.to_string()),
            stream_id: None,
        }));
        self
    }

    /// Queue a transport-level failure.
    pub fn with_transport_error(self, error: &str) -> Self {
        self.responses
            .lock()
            .unwrap()
            .push(MockResponse::Error(error.to_string()));
        self
    }

    /// Requests made so far.
    pub fn recorded_requests(&self) -> Vec<AgentRequest> {
        self.requests.lock().unwrap().clone()
    }

    fn next_response(&self) -> MockResponse {
        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            MockResponse::Json(AgentResponse {
                success: true,
                data: Some(serde_json::json!({"reply": "(mock: no more queued responses)"})),
                error: None,
                stream_id: None,
            })
        } else {
            responses.remove(0)
        }
    }
}

#[async_trait]
impl AgentBackend for MockAgentBackend {
    fn name(&self) -> &str {
        &self.name
    }

    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse> {
        self.requests.lock().unwrap().push(request.clone());
        match self.next_response() {
            MockResponse::Json(resp) => Ok(resp),
            MockResponse::Error(e) => Err(TempoError::Transport(e)),
        }
    }

    async fn execute_stream(&self, request: &AgentRequest) -> Result<mpsc::Receiver<StreamEvent>> {
        self.requests.lock().unwrap().push(request.clone());
        let mock = self.next_response();
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            match mock {
                MockResponse::Json(resp) => {
                    // Stream the data payload word by word as raw bytes.
                    let text = resp
                        .data
                        .as_ref()
                        .and_then(|d| d["reply"].as_str())
                        .unwrap_or_default()
                        .to_string();
                    for word in text.split_whitespace() {
                        let _ = tx.send(StreamEvent::Chunk(Bytes::from(format!("{word} ")))).await;
                    }
                    let _ = tx.send(StreamEvent::Done).await;
                }
                MockResponse::Error(e) => {
                    let _ = tx.send(StreamEvent::Error(e)).await;
                }
            }
        });

        Ok(rx)
    }
}
