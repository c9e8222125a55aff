//! BeautyBook landing page service.
//!
//! Serves the static landing page and hosts the embedded chat assistant:
//! per-visitor chat sessions whose replies come from a generative-language
//! API, with localized canned replies whenever that API is unavailable.

pub mod chat;
pub mod error;
pub mod i18n;
pub mod llm;
pub mod routes;
pub mod services;
pub mod state;
