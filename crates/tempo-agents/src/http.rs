use async_trait::async_trait;
use futures::StreamExt;
use reqwest::Client;
use tempo_core::{Result, TempoError};
use tokio::sync::mpsc;
use tracing::debug;

use crate::backend::{AgentBackend, AgentRequest, AgentResponse, StreamEvent};

/// HTTP implementation of [`AgentBackend`].
pub struct HttpAgentBackend {
    client: Client,
    base_url: String,
}

impl HttpAgentBackend {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    pub fn with_client(mut self, client: Client) -> Self {
        self.client = client;
        self
    }

    async fn send(&self, request: &AgentRequest) -> Result<reqwest::Response> {
        let resp = self
            .client
            .post(format!("{}/api/agents/execute", self.base_url))
            .json(request)
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(TempoError::Api {
                status: status.as_u16(),
                body,
            });
        }
        Ok(resp)
    }
}

#[async_trait]
impl AgentBackend for HttpAgentBackend {
    fn name(&self) -> &str {
        "http"
    }

    async fn execute(&self, request: &AgentRequest) -> Result<AgentResponse> {
        debug!(agent_type = ?request.agent_type, "executing agent request");
        let resp = self.send(request).await?;
        resp.json::<AgentResponse>()
            .await
            .map_err(|e| TempoError::Agent(e.to_string()))
    }

    async fn execute_stream(&self, request: &AgentRequest) -> Result<mpsc::Receiver<StreamEvent>> {
        let mut request = request.clone();
        request.stream = true;
        debug!(agent_type = ?request.agent_type, "executing streaming agent request");

        let resp = self.send(&request).await?;
        let (tx, rx) = mpsc::channel(64);

        tokio::spawn(async move {
            let mut body = resp.bytes_stream();
            while let Some(chunk) = body.next().await {
                let event = match chunk {
                    Ok(bytes) => StreamEvent::Chunk(bytes),
                    Err(e) => {
                        let _ = tx.send(StreamEvent::Error(e.to_string())).await;
                        return;
                    }
                };
                if tx.send(event).await.is_err() {
                    // Receiver dropped — the consumer gave up on the stream.
                    return;
                }
            }
            let _ = tx.send(StreamEvent::Done).await;
        });

        Ok(rx)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::AgentType;
    use axum::routing::post;
    use axum::{Json, Router};
    use serde_json::json;

    async fn serve(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{addr}")
    }

    #[tokio::test]
    async fn test_execute_round_trip() {
        let app = Router::new().route(
            "/api/agents/execute",
            post(|Json(req): Json<AgentRequest>| async move {
                assert_eq!(req.agent_type, AgentType::Consolidator);
                Json(AgentResponse {
                    success: true,
                    data: Some(json!({"reply": "hello"})),
                    error: None,
                    stream_id: None,
                })
            }),
        );
        let base = serve(app).await;

        let backend = HttpAgentBackend::new(base);
        let req = AgentRequest::new(AgentType::Consolidator, json!({"messages": []}))
            .with_user("user-1");
        let resp = backend.execute(&req).await.unwrap();
        assert!(resp.success);
        assert_eq!(resp.data.unwrap()["reply"], "hello");
    }

    #[tokio::test]
    async fn test_execute_non_2xx_is_api_error() {
        let app = Router::new().route(
            "/api/agents/execute",
            post(|| async { (axum::http::StatusCode::BAD_GATEWAY, "upstream died") }),
        );
        let base = serve(app).await;

        let backend = HttpAgentBackend::new(base);
        let req = AgentRequest::new(AgentType::TaskManager, json!({}));
        let err = backend.execute(&req).await.unwrap_err();
        assert!(matches!(err, TempoError::Api { status: 502, .. }));
    }

    #[tokio::test]
    async fn test_stream_passes_bytes_through() {
        let app = Router::new().route(
            "/api/agents/execute",
            post(|| async { "first chunk then more" }),
        );
        let base = serve(app).await;

        let backend = HttpAgentBackend::new(base);
        let req = AgentRequest::new(AgentType::Consolidator, json!({})).streaming();
        let mut rx = backend.execute_stream(&req).await.unwrap();

        let mut collected = Vec::new();
        let mut done = false;
        while let Some(event) = rx.recv().await {
            match event {
                StreamEvent::Chunk(bytes) => collected.extend_from_slice(&bytes),
                StreamEvent::Done => done = true,
                StreamEvent::Error(e) => panic!("stream error: {e}"),
            }
        }
        assert!(done);
        assert_eq!(collected, b"first chunk then more");
    }
}
