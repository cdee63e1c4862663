use tracing::warn;

use crate::api::TaskApi;
use crate::types::{ProjectKey, TaskCreate, TaskGraph, TaskUpdate};

/// The reactive task store the UI reads.
///
/// Holds the last fetched graph plus loading/error flags. Every mutation
/// calls the API and then refetches the whole graph — retry is just
/// refetching. Failures never evict last-good data; they set [`Self::error`]
/// for a non-blocking notification and are otherwise swallowed.
pub struct TaskStore {
    api: TaskApi,
    data: Option<TaskGraph>,
    loading: bool,
    error: Option<String>,
}

impl TaskStore {
    pub fn new(api: TaskApi) -> Self {
        Self {
            api,
            data: None,
            loading: false,
            error: None,
        }
    }

    pub fn data(&self) -> Option<&TaskGraph> {
        self.data.as_ref()
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn error(&self) -> Option<&str> {
        self.error.as_deref()
    }

    pub fn clear_error(&mut self) {
        self.error = None;
    }

    /// Fetch the full graph, replacing the cached one.
    pub async fn fetch(&mut self) {
        self.loading = true;
        self.error = None;
        match self.api.get_tasks().await {
            Ok(graph) => {
                self.data = Some(graph);
            }
            Err(e) => {
                warn!(error = %e, "task graph fetch failed");
                self.error = Some(format!("Failed to fetch tasks: {e}"));
            }
        }
        self.loading = false;
    }

    pub async fn create(&mut self, project: ProjectKey, task: TaskCreate) {
        self.error = None;
        match self.api.create_task(project, &task).await {
            Ok(_) => self.fetch().await,
            Err(e) => {
                warn!(error = %e, %project, "task create failed");
                self.error = Some(format!("Failed to create task: {e}"));
            }
        }
    }

    pub async fn update(&mut self, task_id: &str, updates: TaskUpdate) {
        self.error = None;
        match self.api.update_task(task_id, &updates).await {
            Ok(_) => self.fetch().await,
            Err(e) => {
                warn!(error = %e, task_id, "task update failed");
                self.error = Some(format!("Failed to update task: {e}"));
            }
        }
    }

    pub async fn delete(&mut self, task_id: &str) {
        self.error = None;
        match self.api.delete_task(task_id).await {
            Ok(_) => self.fetch().await,
            Err(e) => {
                warn!(error = %e, task_id, "task delete failed");
                self.error = Some(format!("Failed to delete task: {e}"));
            }
        }
    }

    /// Reassign a task across boards. The cached graph is patched first so
    /// a drag lands instantly; the refetch brings the authoritative state.
    pub async fn move_task(&mut self, task_id: &str, source: ProjectKey, target: ProjectKey) {
        self.error = None;
        if let Some(graph) = self.data.as_mut() {
            graph.apply_move(task_id, source, target);
        }
        match self.api.move_task(task_id, source, target).await {
            Ok(_) => self.fetch().await,
            Err(e) => {
                warn!(error = %e, task_id, "task move failed");
                // The optimistic patch may now be wrong; refetch to recover.
                self.fetch().await;
                self.error = Some(format!("Failed to move task: {e}"));
            }
        }
    }

    /// Reorder within one board. Purely local — the API has no ordering
    /// endpoint, so this only drives the drag-and-drop preview.
    pub fn reorder(&mut self, project: ProjectKey, from: usize, to: usize) {
        if let Some(graph) = self.data.as_mut() {
            graph.reorder(project, from, to);
        }
    }
}
