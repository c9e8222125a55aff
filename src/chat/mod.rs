//! Chat: the embedded assistant widget.
//!
//! DESIGN
//! ======
//! `store` holds the append-only transcript and composition buffer;
//! `widget` drives one visitor's conversation against the completion
//! gateway.

pub mod store;
pub mod widget;

use uuid::Uuid;

pub use store::{ConversationStore, Message};
pub use widget::{ChatWidget, SendOutcome, WidgetView};

#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("chat session not found: {0}")]
    SessionNotFound(Uuid),
    #[error("message text is empty")]
    EmptyMessage,
    #[error("reply task failed: {0}")]
    ReplyTask(String),
}

impl crate::error::ErrorCode for ChatError {
    fn error_code(&self) -> &'static str {
        match self {
            Self::SessionNotFound(_) => "E_SESSION_NOT_FOUND",
            Self::EmptyMessage => "E_EMPTY_MESSAGE",
            Self::ReplyTask(_) => "E_REPLY_TASK",
        }
    }
}
