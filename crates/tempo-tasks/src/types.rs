use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tempo_core::TaskId;

/// Task priority as the backend encodes it: 0, 1, 3, or 5.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub enum Priority {
    None,
    Low,
    Medium,
    High,
}

impl From<Priority> for u8 {
    fn from(p: Priority) -> u8 {
        match p {
            Priority::None => 0,
            Priority::Low => 1,
            Priority::Medium => 3,
            Priority::High => 5,
        }
    }
}

impl TryFrom<u8> for Priority {
    type Error = String;

    fn try_from(v: u8) -> Result<Self, Self::Error> {
        match v {
            0 => Ok(Priority::None),
            1 => Ok(Priority::Low),
            3 => Ok(Priority::Medium),
            5 => Ok(Priority::High),
            other => Err(format!("invalid priority value: {other}")),
        }
    }
}

/// The four fixed project boards.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ProjectKey {
    Goals,
    Code,
    Pentest,
    Brain,
}

impl std::fmt::Display for ProjectKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            ProjectKey::Goals => "GOALS",
            ProjectKey::Code => "CODE",
            ProjectKey::Pentest => "PENTEST",
            ProjectKey::Brain => "BRAIN",
        };
        f.write_str(s)
    }
}

/// How a project board renders.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    List,
    Kanban,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Subtask {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChecklistItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    pub completed: bool,
    pub priority: Priority,
    #[serde(default)]
    pub subtasks: Vec<Subtask>,
    #[serde(default)]
    pub items: Vec<ChecklistItem>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub color: String,
    pub view_mode: ViewMode,
    #[serde(default)]
    pub tasks: Vec<Task>,
}

/// The full task graph as `GET /tasks` serves it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskGraph {
    pub version: String,
    pub last_update: String,
    pub projects: BTreeMap<ProjectKey, Project>,
}

/// Payload for `POST /tasks/{project}`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TaskCreate {
    pub title: String,
    pub priority: Priority,
}

/// Patch payload for `PUT /tasks/{id}` — only set fields are sent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TaskUpdate {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub priority: Option<Priority>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subtasks: Option<Vec<Subtask>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub items: Option<Vec<ChecklistItem>>,
}

impl TaskGraph {
    /// Find a task anywhere in the graph.
    pub fn find_task(&self, task_id: &str) -> Option<(&ProjectKey, &Task)> {
        self.projects.iter().find_map(|(key, project)| {
            project.tasks.iter().find(|t| t.id == task_id).map(|t| (key, t))
        })
    }

    /// Drag-and-drop bookkeeping within one board: move the task at `from`
    /// to position `to`. Out-of-range indices are clamped; a missing
    /// project is a no-op.
    pub fn reorder(&mut self, project: ProjectKey, from: usize, to: usize) {
        let Some(board) = self.projects.get_mut(&project) else {
            return;
        };
        if board.tasks.is_empty() {
            return;
        }
        let from = from.min(board.tasks.len() - 1);
        let to = to.min(board.tasks.len() - 1);
        let task = board.tasks.remove(from);
        board.tasks.insert(to, task);
    }

    /// Drag-and-drop bookkeeping across boards: detach the task from
    /// `source` and append it to `target`. Returns whether the task was
    /// found and moved. The server-side reassignment goes through
    /// `POST /tasks/{id}/move`; this only keeps the cached graph coherent
    /// until the refetch lands.
    pub fn apply_move(&mut self, task_id: &str, source: ProjectKey, target: ProjectKey) -> bool {
        if source == target {
            return self.projects.get(&source).is_some_and(|p| p.tasks.iter().any(|t| t.id == task_id));
        }
        let Some(task) = self
            .projects
            .get_mut(&source)
            .and_then(|p| {
                let idx = p.tasks.iter().position(|t| t.id == task_id)?;
                Some(p.tasks.remove(idx))
            })
        else {
            return false;
        };
        match self.projects.get_mut(&target) {
            Some(board) => {
                board.tasks.push(task);
                true
            }
            None => {
                // Unknown target — put the task back where it was.
                if let Some(board) = self.projects.get_mut(&source) {
                    board.tasks.push(task);
                }
                false
            }
        }
    }
}
