//! Completion gateway: one visitor message in, one assistant reply out.
//!
//! DESIGN
//! ======
//! Builds a single-shot prompt (persona + product facts + demo link + the
//! visitor's literal message) and sends it to the configured LLM. Every
//! failure is logged and resolved to the localized connection fallback, so
//! `get_reply` returns a plain `String` and callers have no error branch.
//!
//! Without a configured LLM the gateway still answers, always with the
//! fallback text.

use std::fmt::Write;
use std::sync::Arc;

use tracing::{info, warn};

use crate::error::ErrorCode;
use crate::i18n::{self, DEMO_FORM_URL, Language};
use crate::llm::LlmComplete;
use crate::llm::types::FailureKind;

/// Product facts every prompt must carry.
pub const PRODUCT_FACTS: [&str; 4] = [
    "We create fully customized scheduling systems",
    "Each system is tailored to the specific needs of the salon/clinic",
    "We offer complete training and support",
    "The system can be integrated with Google Calendar and Instagram",
];

#[derive(Clone)]
pub struct CompletionGateway {
    llm: Option<Arc<dyn LlmComplete>>,
}

impl CompletionGateway {
    #[must_use]
    pub fn new(llm: Option<Arc<dyn LlmComplete>>) -> Self {
        Self { llm }
    }

    #[must_use]
    pub fn is_configured(&self) -> bool {
        self.llm.is_some()
    }

    /// Produce the assistant reply for `user_text`.
    ///
    /// Issues at most one provider request and never retries. Transport
    /// failures, non-2xx statuses and malformed payloads all yield the
    /// fallback literal for `language`.
    pub async fn get_reply(&self, user_text: &str, language: Language) -> String {
        let Some(llm) = &self.llm else {
            warn!(%language, "gateway: LLM not configured, using fallback");
            return i18n::connection_fallback(language).to_string();
        };

        let prompt = build_prompt(user_text, language);
        info!(%language, message_len = user_text.len(), "gateway: requesting completion");

        match llm.complete(&prompt).await {
            Ok(reply) => {
                info!(%language, reply_len = reply.len(), "gateway: completion ok");
                reply
            }
            Err(e) => {
                let kind = FailureKind::from(&e);
                warn!(
                    %language,
                    kind = kind.as_str(),
                    code = e.error_code(),
                    error = %e,
                    "gateway: completion failed, using fallback"
                );
                i18n::connection_fallback(language).to_string()
            }
        }
    }
}

// =============================================================================
// PROMPT
// =============================================================================

/// Build the single prompt sent for one visitor message.
#[must_use]
pub fn build_prompt(user_text: &str, language: Language) -> String {
    let mut out = String::with_capacity(1024 + user_text.len());
    out.push_str(
        "You are a helpful assistant for BeautyBook, a custom scheduling system for beauty salons and clinics. ",
    );
    out.push_str(
        "Your main goal is to guide users to schedule a demo of our customized scheduling system. \
         Always be friendly and professional. ",
    );
    let _ = writeln!(out, "The demo can be scheduled via our form here: {DEMO_FORM_URL}");
    out.push('\n');
    out.push_str("Key points to mention:\n");
    for fact in PRODUCT_FACTS {
        let _ = writeln!(out, "- {fact}");
    }
    out.push('\n');
    out.push_str("If the user shows interest, encourage them to schedule a demo through our form.\n");
    let _ = writeln!(out, "Answer in {}.", language.english_name());
    out.push('\n');
    let _ = write!(out, "Current user message: {user_text}");
    out
}

#[cfg(test)]
#[path = "gateway_test.rs"]
mod tests;
