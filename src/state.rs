//! Shared application state.
//!
//! DESIGN
//! ======
//! `AppState` is injected into Axum handlers via the `State` extractor.
//! It holds the completion gateway and a map of live chat sessions. Each
//! session is one widget instance; nothing outlives the process.
//!
//! Every lookup stamps the session's `last_seen`. Sessions idle longer than
//! the configured TTL are dropped by `evict_idle`, which the session sweeper
//! calls on an interval. A session with a send in flight is never evicted.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::sync::RwLock;
use uuid::Uuid;

use crate::chat::{ChatError, ChatWidget};
use crate::llm::LlmComplete;
use crate::services::gateway::CompletionGateway;

/// One live widget plus the last time a request touched it.
pub struct SessionEntry {
    pub widget: Arc<ChatWidget>,
    pub last_seen: Instant,
}

/// Shared application state, injected into Axum handlers via State extractor.
/// Clone is required by Axum; all inner fields are Arc-wrapped or Clone.
#[derive(Clone)]
pub struct AppState {
    pub gateway: CompletionGateway,
    pub sessions: Arc<RwLock<HashMap<Uuid, SessionEntry>>>,
    /// Directory holding the pre-built landing page.
    pub site_dir: PathBuf,
}

impl AppState {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmComplete>>, site_dir: PathBuf) -> Self {
        Self { gateway: CompletionGateway::new(llm), sessions: Arc::new(RwLock::new(HashMap::new())), site_dir }
    }

    /// Register a fresh, closed widget with an empty transcript.
    pub async fn create_session(&self) -> Arc<ChatWidget> {
        let id = Uuid::new_v4();
        let widget = Arc::new(ChatWidget::new(id, self.gateway.clone()));
        let entry = SessionEntry { widget: Arc::clone(&widget), last_seen: Instant::now() };
        self.sessions.write().await.insert(id, entry);
        widget
    }

    /// Look up a session and mark it as seen now.
    ///
    /// # Errors
    ///
    /// [`ChatError::SessionNotFound`] for an unknown id.
    pub async fn session(&self, id: Uuid) -> Result<Arc<ChatWidget>, ChatError> {
        let mut sessions = self.sessions.write().await;
        let entry = sessions
            .get_mut(&id)
            .ok_or(ChatError::SessionNotFound(id))?;
        entry.last_seen = Instant::now();
        Ok(Arc::clone(&entry.widget))
    }

    /// Drop a session. In-flight sends keep their own handle and finish
    /// against the detached widget.
    ///
    /// # Errors
    ///
    /// [`ChatError::SessionNotFound`] for an unknown id.
    pub async fn remove_session(&self, id: Uuid) -> Result<(), ChatError> {
        self.sessions
            .write()
            .await
            .remove(&id)
            .map(|_| ())
            .ok_or(ChatError::SessionNotFound(id))
    }

    pub async fn session_count(&self) -> usize {
        self.sessions.read().await.len()
    }

    /// Drop every session last seen more than `ttl` before `now`, skipping
    /// sessions with a send in flight. Returns how many were dropped.
    pub async fn evict_idle(&self, now: Instant, ttl: Duration) -> usize {
        let mut sessions = self.sessions.write().await;
        let before = sessions.len();
        sessions.retain(|_, entry| {
            now.saturating_duration_since(entry.last_seen) <= ttl || entry.widget.is_sending()
        });
        before - sessions.len()
    }
}


#[cfg(test)]
#[path = "state_test.rs"]
mod tests;
