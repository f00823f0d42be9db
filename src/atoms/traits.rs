// ── XO Atoms: Provider trait ───────────────────────────────────────────────
// The seam between the engine and any chat-completion backend.
// Concrete implementations live in engine/providers/; tests plug in stubs.

use async_trait::async_trait;
use thiserror::Error;

use crate::atoms::types::{ChatPayload, Completion};

// ── Provider errors ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProviderError {
    /// Connection, TLS or stream read failure.
    #[error("Transport error: {0}")]
    Transport(String),

    /// 401 / 403 from the provider.
    #[error("Authentication failed: {0}")]
    Auth(String),

    /// 429 from the provider, with the `Retry-After` hint when one was sent.
    #[error("Rate limited{}: {message}", retry_hint(.retry_after_secs))]
    RateLimited { message: String, retry_after_secs: Option<u64> },

    /// Any other non-2xx response.
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// 2xx response whose body did not contain a usable reply.
    #[error("Malformed response: {0}")]
    Malformed(String),
}

fn retry_hint(secs: &Option<u64>) -> String {
    match secs {
        Some(s) => format!(" (retry after {}s)", s),
        None => String::new(),
    }
}

impl ProviderError {
    /// Failures that a retry can never fix: a rejected key or a model
    /// identifier the provider does not know.
    pub fn is_configuration(&self) -> bool {
        match self {
            ProviderError::Auth(_) => true,
            ProviderError::Api { status, message } => {
                *status == 404 || message.contains("model_not_found")
            }
            _ => false,
        }
    }
}

// ── AiProvider ─────────────────────────────────────────────────────────────

/// A chat-completion backend. One instance serves one credential.
#[async_trait]
pub trait AiProvider: Send + Sync {
    /// Short name used in log lines and error messages.
    fn name(&self) -> &str;

    /// Blocking-style call: one request, one complete reply.
    async fn chat(&self, payload: &ChatPayload) -> Result<Completion, ProviderError>;

    /// Streamed call. `on_delta` is invoked once per text fragment, in
    /// arrival order; the returned completion holds their concatenation.
    async fn chat_stream(
        &self,
        payload: &ChatPayload,
        on_delta: &mut (dyn for<'a> FnMut(&'a str) + Send),
    ) -> Result<Completion, ProviderError>;
}
