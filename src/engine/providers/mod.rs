// XO AI Engine — AI Provider Registry
// AnyProvider wraps Box<dyn AiProvider> so callers never name a concrete
// backend. Every supported kind speaks the OpenAI wire format today.

pub mod openai;

pub use openai::OpenAiProvider;

use crate::atoms::error::EngineResult;
use crate::atoms::traits::{AiProvider, ProviderError};
use crate::engine::types::{ChatPayload, Completion, ProviderConfig, ProviderKind};

/// Type-erased AI provider.
pub struct AnyProvider(Box<dyn AiProvider>);

impl AnyProvider {
    /// Construct the right concrete provider from a `ProviderConfig`.
    /// Fails only when the HTTP client cannot be built.
    ///
    /// To add a provider with a different wire format, create
    /// engine/providers/{name}.rs, implement AiProvider, add a match arm.
    pub fn from_config(config: &ProviderConfig) -> EngineResult<Self> {
        let provider: Box<dyn AiProvider> = match config.kind {
            ProviderKind::Groq
            | ProviderKind::OpenAI
            | ProviderKind::OpenRouter
            | ProviderKind::Ollama
            | ProviderKind::Custom => Box::new(OpenAiProvider::new(config)?),
        };
        Ok(AnyProvider(provider))
    }

    /// Wrap an already-built provider (used by tests and embedders).
    pub fn from_boxed(provider: Box<dyn AiProvider>) -> Self {
        AnyProvider(provider)
    }

    pub fn name(&self) -> &str {
        self.0.name()
    }

    pub async fn chat(&self, payload: &ChatPayload) -> Result<Completion, ProviderError> {
        self.0.chat(payload).await
    }

    pub async fn chat_stream(
        &self,
        payload: &ChatPayload,
        on_delta: &mut (dyn FnMut(&str) + Send),
    ) -> Result<Completion, ProviderError> {
        self.0.chat_stream(payload, on_delta).await
    }
}
