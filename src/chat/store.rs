//! Conversation store: the transcript and the composition buffer.
//!
//! DESIGN
//! ======
//! Append-only: messages are pushed to the end and never edited, removed or
//! reordered, so any clone of `messages` is a prefix of every later one.
//! The first entry can only come from `seed_welcome_if_empty`.

use serde::{Deserialize, Serialize};

use crate::i18n::{self, Language};

/// One turn in the transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Message {
    pub text: String,
    pub is_user: bool,
}

impl Message {
    #[must_use]
    pub fn user(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_user: true }
    }

    #[must_use]
    pub fn assistant(text: impl Into<String>) -> Self {
        Self { text: text.into(), is_user: false }
    }
}

#[derive(Debug, Clone, Default)]
pub struct ConversationStore {
    messages: Vec<Message>,
    composition: String,
}

impl ConversationStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a visitor message and clear the composition buffer.
    ///
    /// Returns `false` without touching any state when `text` is blank.
    /// The stored text is not trimmed.
    pub fn append_user_message(&mut self, text: impl Into<String>) -> bool {
        let text = text.into();
        if text.trim().is_empty() {
            return false;
        }
        self.messages.push(Message::user(text));
        self.composition.clear();
        true
    }

    pub fn append_assistant_message(&mut self, text: impl Into<String>) {
        self.messages.push(Message::assistant(text));
    }

    /// Seed the localized welcome message if nothing has been said yet.
    /// Returns whether a message was appended.
    pub fn seed_welcome_if_empty(&mut self, language: Language) -> bool {
        if !self.messages.is_empty() {
            return false;
        }
        self.messages.push(Message::assistant(i18n::welcome(language)));
        true
    }

    pub fn update_composition(&mut self, text: impl Into<String>) {
        self.composition = text.into();
    }

    #[must_use]
    pub fn read_composition(&self) -> &str {
        &self.composition
    }

    /// Move the composition buffer into a new user message.
    ///
    /// Returns the sent text, or `None` (buffer untouched) when it is blank.
    pub fn send_composition(&mut self) -> Option<String> {
        if self.composition.trim().is_empty() {
            return None;
        }
        let text = std::mem::take(&mut self.composition);
        self.messages.push(Message::user(text.clone()));
        Some(text)
    }

    #[must_use]
    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    #[must_use]
    pub fn snapshot(&self) -> Vec<Message> {
        self.messages.clone()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.messages.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }
}

#[cfg(test)]
#[path = "store_test.rs"]
mod tests;
