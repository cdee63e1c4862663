use reqwest::Client;
use serde_json::json;
use tempo_core::{Result, TempoError};

use crate::types::{ProjectKey, TaskCreate, TaskGraph, TaskUpdate};

/// Thin client over the task store API.
///
/// Non-2xx statuses surface as [`TempoError::Api`]; the store layer turns
/// them into user-facing error strings.
pub struct TaskApi {
    client: Client,
    base_url: String,
}

impl TaskApi {
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

    async fn check(resp: reqwest::Response) -> Result<reqwest::Response> {
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

    /// `GET /tasks` — the full task graph.
    pub async fn get_tasks(&self) -> Result<TaskGraph> {
        let resp = self
            .client
            .get(format!("{}/tasks", self.base_url))
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;
        Self::check(resp)
            .await?
            .json::<TaskGraph>()
            .await
            .map_err(|e| TempoError::Task(e.to_string()))
    }

    /// `POST /tasks/{project}` — create a task on a board.
    pub async fn create_task(&self, project: ProjectKey, task: &TaskCreate) -> Result<serde_json::Value> {
        let resp = self
            .client
            .post(format!("{}/tasks/{}", self.base_url, project))
            .json(task)
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;
        Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| TempoError::Task(e.to_string()))
    }

    /// `PUT /tasks/{id}` — patch a task.
    pub async fn update_task(&self, task_id: &str, updates: &TaskUpdate) -> Result<serde_json::Value> {
        let resp = self
            .client
            .put(format!("{}/tasks/{}", self.base_url, task_id))
            .json(updates)
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;
        Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| TempoError::Task(e.to_string()))
    }

    /// `DELETE /tasks/{id}`.
    pub async fn delete_task(&self, task_id: &str) -> Result<serde_json::Value> {
        let resp = self
            .client
            .delete(format!("{}/tasks/{}", self.base_url, task_id))
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;
        Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| TempoError::Task(e.to_string()))
    }

    /// `POST /tasks/{id}/move` — reassign a task to another board.
    pub async fn move_task(
        &self,
        task_id: &str,
        source: ProjectKey,
        target: ProjectKey,
    ) -> Result<serde_json::Value> {
        let resp = self
            .client
            .post(format!("{}/tasks/{}/move", self.base_url, task_id))
            .json(&json!({
                "source_project": source,
                "target_project": target,
            }))
            .send()
            .await
            .map_err(|e| TempoError::Transport(e.to_string()))?;
        Self::check(resp)
            .await?
            .json()
            .await
            .map_err(|e| TempoError::Task(e.to_string()))
    }
}
