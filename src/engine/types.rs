// XO AI Engine — Core types
// Data structures live in atoms/types.rs; this module adds their behaviour.

pub use crate::atoms::types::*;

use chrono::Utc;

impl ProviderKind {
    pub fn default_base_url(&self) -> &str {
        match self {
            ProviderKind::Groq => "https://api.groq.com/openai/v1",
            ProviderKind::OpenAI => "https://api.openai.com/v1",
            ProviderKind::OpenRouter => "https://openrouter.ai/api/v1",
            ProviderKind::Ollama => "http://localhost:11434/v1",
            ProviderKind::Custom => "",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            ProviderKind::Groq => "groq",
            ProviderKind::OpenAI => "openai",
            ProviderKind::OpenRouter => "openrouter",
            ProviderKind::Ollama => "ollama",
            ProviderKind::Custom => "custom",
        }
    }
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::System => "system",
            Role::User => "user",
            Role::Assistant => "assistant",
        }
    }
}

impl Message {
    /// Un-stamped message, as placed in an outbound payload.
    pub fn new(role: Role, content: impl Into<String>) -> Self {
        Message { role, content: content.into(), timestamp: None }
    }

    pub fn system(content: impl Into<String>) -> Self {
        Self::new(Role::System, content)
    }

    pub fn user(content: impl Into<String>) -> Self {
        Self::new(Role::User, content)
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(Role::Assistant, content)
    }

    /// Stamp with the current time, for display.
    pub fn stamped(mut self) -> Self {
        self.timestamp = Some(Utc::now());
        self
    }

    /// Copy without the display timestamp.
    pub fn to_wire(&self) -> Self {
        Message::new(self.role, self.content.clone())
    }
}

/// Truncate to at most `max_bytes`, backing off to a char boundary.
pub fn truncate_utf8(s: &str, max_bytes: usize) -> &str {
    if s.len() <= max_bytes {
        return s;
    }
    let mut end = max_bytes;
    while end > 0 && !s.is_char_boundary(end) {
        end -= 1;
    }
    &s[..end]
}
