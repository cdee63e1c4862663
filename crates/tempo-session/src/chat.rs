use std::sync::Arc;

use serde_json::json;
use tempo_agents::{AgentBackend, AgentRequest, AgentType, StreamEvent};
use tempo_core::{ContextRecord, Message, Result, TempoError};
use tempo_memory::Memory;
use tokio::sync::mpsc;
use tracing::debug;

/// One user's conversation with the consolidator agent.
///
/// Owns the transcript and keeps the memory tiers in step with it: L1 is
/// rebuilt from the most recent turns around every exchange, and each
/// completed exchange is absorbed into L2.
pub struct ChatSession {
    backend: Arc<dyn AgentBackend>,
    memory: Memory,
    transcript: Vec<Message>,
    user_id: String,
    l1_window: usize,
}

impl ChatSession {
    pub fn new(
        backend: Arc<dyn AgentBackend>,
        memory: Memory,
        user_id: impl Into<String>,
        l1_window: usize,
    ) -> Self {
        Self {
            backend,
            memory,
            transcript: Vec::new(),
            user_id: user_id.into(),
            l1_window,
        }
    }

    pub fn transcript(&self) -> &[Message] {
        &self.transcript
    }

    pub fn memory(&self) -> &Memory {
        &self.memory
    }

    /// Rebuild L1 from the transcript tail.
    fn sync_l1(&self) {
        let skip = self.transcript.len().saturating_sub(self.l1_window);
        self.memory.update_l1(self.transcript[skip..].to_vec());
    }

    fn build_input(&self) -> serde_json::Value {
        json!({
            "messages": self.memory.l1(),
            "memory_context": {
                "L1": self.memory.l1(),
                "L2": self.memory.l2(),
                "L3": self.memory.l3(),
            },
            "user_id": self.user_id,
        })
    }

    /// Send one user turn and wait for the full reply.
    ///
    /// On failure the user turn stays in the transcript (and L1) so the
    /// caller can retry; nothing is absorbed into L2 for a failed exchange.
    pub async fn send(&mut self, text: impl Into<String>) -> Result<Message> {
        let user_msg = Message::user(text);
        self.transcript.push(user_msg.clone());
        self.sync_l1();

        let request = AgentRequest::new(AgentType::Consolidator, self.build_input())
            .with_user(self.user_id.clone());
        let response = self.backend.execute(&request).await?;

        if !response.success {
            return Err(TempoError::Agent(
                response.error.unwrap_or_else(|| "unknown agent failure".into()),
            ));
        }

        let reply_text = response
            .data
            .as_ref()
            .and_then(|d| d["reply"].as_str().map(str::to_string))
            .or_else(|| response.data.as_ref().map(|d| d.to_string()))
            .unwrap_or_default();

        let assistant_msg = Message::assistant(reply_text);
        self.commit_exchange(user_msg, assistant_msg.clone());
        Ok(assistant_msg)
    }

    /// Send one user turn with `stream: true`; raw chunks arrive on the
    /// returned channel. Accumulate the text and pass it to
    /// [`Self::finish_streamed_turn`] once the stream ends.
    pub async fn send_streaming(
        &mut self,
        text: impl Into<String>,
    ) -> Result<mpsc::Receiver<StreamEvent>> {
        let user_msg = Message::user(text);
        self.transcript.push(user_msg);
        self.sync_l1();

        let request = AgentRequest::new(AgentType::Consolidator, self.build_input())
            .with_user(self.user_id.clone())
            .streaming();
        self.backend.execute_stream(&request).await
    }

    /// Commit the assistant side of a streamed exchange.
    pub fn finish_streamed_turn(&mut self, full_text: impl Into<String>) -> Message {
        let assistant_msg = Message::assistant(full_text);
        // The user turn is already in the transcript from send_streaming.
        let user_msg = self
            .transcript
            .last()
            .cloned()
            .unwrap_or_else(|| Message::user(""));
        self.commit_exchange(user_msg, assistant_msg.clone());
        assistant_msg
    }

    fn commit_exchange(&mut self, user_msg: Message, assistant_msg: Message) {
        self.transcript.push(assistant_msg.clone());
        self.absorb(user_msg, assistant_msg);
    }

    fn absorb(&mut self, user_msg: Message, assistant_msg: Message) {
        debug!(turns = self.transcript.len(), "absorbing completed exchange");
        self.memory.absorb_to_l2(
            ContextRecord::from_messages(vec![user_msg, assistant_msg])
                .with_user(self.user_id.clone()),
        );
        self.sync_l1();
    }

    /// Wipe the conversation but not the memory tiers.
    pub fn reset_transcript(&mut self) {
        self.transcript.clear();
        self.sync_l1();
    }
}
