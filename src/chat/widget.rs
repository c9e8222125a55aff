//! Chat widget controller: open/close, composition, and the send path.
//!
//! DESIGN
//! ======
//! One `ChatWidget` per visitor session. The transcript lives behind a
//! `RwLock` whose guards are never held across the completion call.
//!
//! Sends are serialized by `send_gate` (FIFO). Holding its turn, a send
//! appends the user message (clearing the composition in the same write),
//! then hands the turn to a spawned task that awaits the gateway and appends
//! the reply. Back-to-back sends therefore land as user, reply, user, reply
//! and never interleave.
//!
//! Once the user message is in, the reply is owed: neither closing the
//! widget nor dropping the caller's future cancels it. The reply shows up
//! the next time the widget is viewed.

use std::sync::Arc;

use serde::Serialize;
use tokio::sync::{Mutex, OwnedMutexGuard, RwLock};
use tracing::{error, info};
use uuid::Uuid;

use super::ChatError;
use super::store::{ConversationStore, Message};
use crate::i18n::Language;
use crate::services::gateway::CompletionGateway;

struct WidgetState {
    store: ConversationStore,
    open: bool,
}

/// Point-in-time copy of a widget for rendering.
#[derive(Debug, Clone, Serialize)]
pub struct WidgetView {
    pub id: Uuid,
    pub open: bool,
    pub composition: String,
    pub messages: Vec<Message>,
}

/// Where one send landed in the transcript.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SendOutcome {
    pub user_index: usize,
    pub reply_index: usize,
    pub reply: String,
}

pub struct ChatWidget {
    id: Uuid,
    gateway: CompletionGateway,
    state: RwLock<WidgetState>,
    send_gate: Arc<Mutex<()>>,
}

impl ChatWidget {
    #[must_use]
    pub fn new(id: Uuid, gateway: CompletionGateway) -> Self {
        Self {
            id,
            gateway,
            state: RwLock::new(WidgetState { store: ConversationStore::new(), open: false }),
            send_gate: Arc::new(Mutex::new(())),
        }
    }

    #[must_use]
    pub fn id(&self) -> Uuid {
        self.id
    }

    /// Open the widget, seeding the welcome message on an empty transcript.
    pub async fn open(&self, language: Language) {
        let mut state = self.state.write().await;
        state.open = true;
        if state.store.seed_welcome_if_empty(language) {
            info!(session_id = %self.id, %language, "chat: welcome seeded");
        }
    }

    pub async fn close(&self) {
        self.state.write().await.open = false;
    }

    /// Flip open/closed. Returns the new open flag.
    pub async fn toggle(&self, language: Language) -> bool {
        let mut state = self.state.write().await;
        state.open = !state.open;
        if state.open && state.store.seed_welcome_if_empty(language) {
            info!(session_id = %self.id, %language, "chat: welcome seeded");
        }
        state.open
    }

    pub async fn is_open(&self) -> bool {
        self.state.read().await.open
    }

    pub async fn update_composition(&self, text: impl Into<String>) {
        self.state.write().await.store.update_composition(text);
    }

    pub async fn composition(&self) -> String {
        self.state.read().await.store.read_composition().to_string()
    }

    /// Send whatever is in the composition buffer once earlier sends finish.
    ///
    /// # Errors
    ///
    /// [`ChatError::EmptyMessage`] when the buffer is blank; nothing changes.
    pub async fn send(self: &Arc<Self>, language: Language) -> Result<SendOutcome, ChatError> {
        let turn = Arc::clone(&self.send_gate).lock_owned().await;
        let (text, user_index) = {
            let mut state = self.state.write().await;
            let text = state
                .store
                .send_composition()
                .ok_or(ChatError::EmptyMessage)?;
            (text, state.store.len() - 1)
        };
        self.spawn_reply(turn, text, user_index, language).await
    }

    /// Send `text` directly once earlier sends finish. Clears the
    /// composition buffer when the message is appended.
    ///
    /// # Errors
    ///
    /// [`ChatError::EmptyMessage`] when `text` is blank; nothing changes.
    pub async fn send_text(
        self: &Arc<Self>,
        text: impl Into<String>,
        language: Language,
    ) -> Result<SendOutcome, ChatError> {
        let text = text.into();
        if text.trim().is_empty() {
            return Err(ChatError::EmptyMessage);
        }
        let turn = Arc::clone(&self.send_gate).lock_owned().await;
        let user_index = {
            let mut state = self.state.write().await;
            if !state.store.append_user_message(text.clone()) {
                return Err(ChatError::EmptyMessage);
            }
            state.store.len() - 1
        };
        self.spawn_reply(turn, text, user_index, language).await
    }

    /// Second half of a send: fetch and append the reply on a detached task.
    ///
    /// Called right after the user message lands, with no await in between.
    /// The task owns the widget and the send turn, so dropping the caller's
    /// future (client disconnect) still ends in exactly one appended reply,
    /// and the next send waits for it.
    async fn spawn_reply(
        self: &Arc<Self>,
        turn: OwnedMutexGuard<()>,
        text: String,
        user_index: usize,
        language: Language,
    ) -> Result<SendOutcome, ChatError> {
        info!(session_id = %self.id, user_index, %language, "chat: user message appended");

        let widget = Arc::clone(self);
        let task = tokio::spawn(async move {
            let _turn = turn;
            let reply = widget.gateway.get_reply(&text, language).await;
            let reply_index = {
                let mut state = widget.state.write().await;
                state.store.append_assistant_message(reply.clone());
                state.store.len() - 1
            };
            info!(session_id = %widget.id, reply_index, "chat: reply appended");
            SendOutcome { user_index, reply_index, reply }
        });

        task.await.map_err(|e| {
            error!(session_id = %self.id, user_index, error = %e, "chat: reply task failed");
            ChatError::ReplyTask(e.to_string())
        })
    }

    /// Whether a send currently holds this widget's turn.
    #[must_use]
    pub fn is_sending(&self) -> bool {
        self.send_gate.try_lock().is_err()
    }

    pub async fn messages(&self) -> Vec<Message> {
        self.state.read().await.store.snapshot()
    }

    pub async fn view(&self) -> WidgetView {
        let state = self.state.read().await;
        WidgetView {
            id: self.id,
            open: state.open,
            composition: state.store.read_composition().to_string(),
            messages: state.store.snapshot(),
        }
    }
}

#[cfg(test)]
#[path = "widget_test.rs"]
mod tests;
