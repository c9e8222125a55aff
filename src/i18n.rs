//! Display languages and the chat widget's localized strings.
//!
//! DESIGN
//! ======
//! The landing page owns the full string dictionary; the chat only needs a
//! welcome line and a connection-fallback line per language. Both are
//! looked up by `(Language, MessageId)` so callers never branch on the
//! language themselves.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Demo-request form linked from every canned reply and the `/demo` route.
pub const DEMO_FORM_URL: &str = "https://forms.gle/LYj8wuZzbvjup1Vi8";

// =============================================================================
// LANGUAGE
// =============================================================================

/// Display language selected by the visitor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    Pt,
    #[default]
    En,
    Es,
}

impl Language {
    /// Resolve a language code. Only the exact codes `pt` and `es` select
    /// those languages; any other input, including `PT` or ` es`, is English.
    #[must_use]
    pub fn from_code(code: &str) -> Self {
        match code {
            "pt" => Self::Pt,
            "es" => Self::Es,
            _ => Self::En,
        }
    }

    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Pt => "pt",
            Self::En => "en",
            Self::Es => "es",
        }
    }

    /// Language name as written in English, used inside prompts.
    #[must_use]
    pub fn english_name(self) -> &'static str {
        match self {
            Self::Pt => "Portuguese",
            Self::En => "English",
            Self::Es => "Spanish",
        }
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

// Unknown codes resolve to English instead of failing deserialization.
impl<'de> Deserialize<'de> for Language {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let raw = String::deserialize(deserializer)?;
        Ok(Self::from_code(&raw))
    }
}

// =============================================================================
// MESSAGES
// =============================================================================

/// Identifiers for the strings the chat widget renders on its own.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageId {
    /// First assistant turn shown when the widget opens on an empty transcript.
    Welcome,
    /// Canned reply used whenever a real completion cannot be produced.
    ConnectionFallback,
}

/// Look up a localized chat string.
#[must_use]
pub fn text(language: Language, id: MessageId) -> &'static str {
    match (id, language) {
        (MessageId::Welcome, Language::Pt) => {
            "Olá! 👋 Sou o assistente virtual do BeautyBook. Estou aqui para ajudar você a descobrir como nosso sistema de agendamento personalizado pode transformar seu negócio. Gostaria de agendar uma demonstração gratuita?"
        }
        (MessageId::Welcome, Language::Es) => {
            "¡Hola! 👋 Soy el asistente virtual de BeautyBook. Estoy aquí para ayudarte a descubrir cómo nuestro sistema de programación personalizado puede transformar tu negocio. ¿Te gustaría programar una demostración gratuita?"
        }
        (MessageId::Welcome, Language::En) => {
            "Hello! 👋 I'm BeautyBook's virtual assistant. I'm here to help you discover how our custom scheduling system can transform your business. Would you like to schedule a free demonstration?"
        }
        (MessageId::ConnectionFallback, Language::Pt) => {
            "Desculpe, estou com dificuldades de conexão no momento. Por favor, tente novamente mais tarde ou acesse nosso formulário para agendar sua demonstração: https://forms.gle/LYj8wuZzbvjup1Vi8"
        }
        (MessageId::ConnectionFallback, Language::Es) => {
            "Lo siento, estoy teniendo dificultades de conexión en este momento. Por favor, inténtelo de nuevo más tarde o acceda a nuestro formulario para programar su demostración: https://forms.gle/LYj8wuZzbvjup1Vi8"
        }
        (MessageId::ConnectionFallback, Language::En) => {
            "Sorry, I'm having connection difficulties at the moment. Please try again later or access our form to schedule your demonstration: https://forms.gle/LYj8wuZzbvjup1Vi8"
        }
    }
}

#[must_use]
pub fn welcome(language: Language) -> &'static str {
    text(language, MessageId::Welcome)
}

#[must_use]
pub fn connection_fallback(language: Language) -> &'static str {
    text(language, MessageId::ConnectionFallback)
}

#[cfg(test)]
#[path = "i18n_test.rs"]
mod tests;
