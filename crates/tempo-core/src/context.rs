use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::message::Message;

/// A unit of conversational context — the thing the memory tiers hold.
///
/// A record is a completed slice of conversation (one or more turns) plus
/// whatever metadata the producer attached. L2 absorbs these when a turn
/// completes; L1 is rebuilt from the live transcript instead.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ContextRecord {
    pub messages: Vec<Message>,
    pub timestamp: DateTime<Utc>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<Uuid>,
    #[serde(default, skip_serializing_if = "serde_json::Map::is_empty")]
    pub metadata: serde_json::Map<String, serde_json::Value>,
}

impl ContextRecord {
    /// Wrap a batch of messages as a single absorbable record.
    pub fn from_messages(messages: Vec<Message>) -> Self {
        Self {
            messages,
            timestamp: Utc::now(),
            user_id: None,
            session_id: None,
            metadata: Default::default(),
        }
    }

    pub fn with_user(mut self, user_id: impl Into<String>) -> Self {
        self.user_id = Some(user_id.into());
        self
    }

    pub fn with_session(mut self, session_id: Uuid) -> Self {
        self.session_id = Some(session_id);
        self
    }
}
