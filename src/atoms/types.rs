// ── XO Atoms: Pure Data Types ─────────────────────────────────────────────────
// Plain struct/enum definitions with no I/O.
//
// Re-exported from engine/types.rs via
//   pub use crate::atoms::types::*;
// so `use crate::engine::types::*` brings everything into scope.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

// ── Provider config ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderConfig {
    pub kind: ProviderKind,
    pub api_key: String,
    pub base_url: Option<String>,
}

/// Every supported provider speaks the OpenAI chat-completions wire format;
/// the kind only decides the default base URL and the log name.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ProviderKind {
    #[default]
    Groq,
    OpenAI,
    OpenRouter,
    Ollama,
    Custom,
}

// ── Messages ───────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

/// One entry of the conversation log, or of an outbound payload.
/// The timestamp is display-only and is never serialised onto the wire.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    #[serde(skip)]
    pub timestamp: Option<DateTime<Utc>>,
}

// ── Outbound request ───────────────────────────────────────────────────────

/// Body of `POST /chat/completions`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatPayload {
    pub model: String,
    pub messages: Vec<Message>,
    pub temperature: f64,
    pub max_tokens: u32,
    #[serde(default)]
    pub stream: bool,
}

// ── Provider replies ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenUsage {
    pub input_tokens: u64,
    pub output_tokens: u64,
    pub total_tokens: u64,
}

/// One parsed SSE event from a streamed completion.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreamChunk {
    pub delta_text: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
    /// The actual model name returned by the API
    pub model: Option<String>,
}

/// A finished reply, whether it arrived in one body or as a stream.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Completion {
    pub text: String,
    pub model: Option<String>,
    pub finish_reason: Option<String>,
    pub usage: Option<TokenUsage>,
}
