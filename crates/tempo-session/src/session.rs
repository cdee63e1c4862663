use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use tempo_agents::{AgentBackend, HttpAgentBackend};
use tempo_blocks::TimeBlockStore;
use tempo_config::TempoConfig;
use tempo_core::{SessionId, User, UserId};
use tempo_memory::{
    HttpLongTermStore, LoadOutcome, LongTermStore, Memory, MemoryState,
};
use tempo_tasks::{TaskApi, TaskStore};
use tracing::info;
use uuid::Uuid;

use crate::app::AppState;
use crate::chat::ChatSession;

/// One signed-in user's UI session.
///
/// Everything in here is session-scoped: memory tiers, cached task graph,
/// time blocks, navigation. Dropping the session discards all of it; only
/// L3 survives, server-side.
pub struct Session {
    id: SessionId,
    user_id: UserId,
    created_at: DateTime<Utc>,
    app: AppState,
    memory: Memory,
    chat: ChatSession,
    tasks: TaskStore,
    blocks: TimeBlockStore,
}

impl Session {
    /// Build a session wired to the HTTP backends from config.
    pub fn connect(config: &TempoConfig, user: User) -> Self {
        let agent: Arc<dyn AgentBackend> =
            Arc::new(HttpAgentBackend::new(config.backend.agent_url.clone()));
        let store: Arc<dyn LongTermStore> =
            Arc::new(HttpLongTermStore::new(config.backend.memory_url.clone()));
        let tasks = TaskStore::new(TaskApi::new(config.backend.task_url.clone()));
        Self::assemble(config, user, agent, store, tasks)
    }

    /// Build a session with injected backends (tests, offline mode).
    pub fn with_backends(
        config: &TempoConfig,
        user: User,
        agent: Arc<dyn AgentBackend>,
        store: Arc<dyn LongTermStore>,
        tasks: TaskStore,
    ) -> Self {
        Self::assemble(config, user, agent, store, tasks)
    }

    fn assemble(
        config: &TempoConfig,
        user: User,
        agent: Arc<dyn AgentBackend>,
        store: Arc<dyn LongTermStore>,
        tasks: TaskStore,
    ) -> Self {
        let user_id = user.id.clone();
        let state = MemoryState::with_limits(config.memory.l1_window, config.memory.l2_capacity);
        let memory = if config.memory.discard_stale_loads {
            Memory::discard_stale_loads(store, state)
        } else {
            Memory::with_state(store, state)
        };
        let chat = ChatSession::new(
            agent,
            memory.clone(),
            user_id.clone(),
            config.memory.l1_window,
        );

        let mut app = AppState::new();
        app.login(user);

        info!(%user_id, "session created");
        Self {
            id: Uuid::new_v4(),
            user_id,
            created_at: Utc::now(),
            app,
            memory,
            chat,
            tasks,
            blocks: TimeBlockStore::new(),
        }
    }

    pub fn id(&self) -> SessionId {
        self.id
    }

    pub fn user_id(&self) -> &str {
        &self.user_id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn app(&self) -> &AppState {
        &self.app
    }

    pub fn app_mut(&mut self) -> &mut AppState {
        &mut self.app
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    pub fn chat(&self) -> &ChatSession {
        &self.chat
    }

    pub fn chat_mut(&mut self) -> &mut ChatSession {
        &mut self.chat
    }

    pub fn tasks(&self) -> &TaskStore {
        &self.tasks
    }

    pub fn tasks_mut(&mut self) -> &mut TaskStore {
        &mut self.tasks
    }

    pub fn blocks(&self) -> &TimeBlockStore {
        &self.blocks
    }

    pub fn blocks_mut(&mut self) -> &mut TimeBlockStore {
        &mut self.blocks
    }

    /// Load (or manually retry) the L3 snapshot for this session's user.
    /// Triggered once on session start and again on demand.
    pub async fn load_long_term(&self) -> LoadOutcome {
        self.memory.load_long_term(&self.user_id).await
    }
}

/// Registry of live sessions, keyed by session id.
///
/// Ending a session removes and drops it — the in-memory tiers go with it.
#[derive(Default)]
pub struct Sessions {
    sessions: HashMap<SessionId, Session>,
}

impl Sessions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, session: Session) -> SessionId {
        let id = session.id();
        self.sessions.insert(id, session);
        id
    }

    pub fn get(&self, id: SessionId) -> Option<&Session> {
        self.sessions.get(&id)
    }

    pub fn get_mut(&mut self, id: SessionId) -> Option<&mut Session> {
        self.sessions.get_mut(&id)
    }

    /// Tear a session down.
    pub fn end(&mut self, id: SessionId) -> bool {
        let removed = self.sessions.remove(&id).is_some();
        if removed {
            info!(%id, "session ended");
        }
        removed
    }

    pub fn active_count(&self) -> usize {
        self.sessions.len()
    }
}
