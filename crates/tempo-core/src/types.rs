use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for a UI session.
pub type SessionId = Uuid;

/// Identifier for a user, as the backend knows them.
pub type UserId = String;

/// Identifier for a task (assigned by the task store API).
pub type TaskId = String;

/// A signed-in user.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
}

/// Which top-level surface the UI is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Section {
    Calendar,
    TimeBlocks,
    Chat,
    Settings,
}

/// Calendar granularity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewMode {
    Day,
    Week,
    Month,
}

/// UI color theme.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    Light,
    Dark,
    System,
}
