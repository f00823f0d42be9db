// ── XO Atoms: Error Types ──────────────────────────────────────────────────
// Single canonical error enum for the engine, built with `thiserror`.
//
// Design rules:
//   • Variants are coarse-grained by domain (config, network).
//   • The `#[from]` attribute wires external error conversions automatically.
//   • No variant carries secret material (API keys) in its message.
//   • Provider call failures stay `ProviderError`; they never become an
//     `EngineError`, the turn handler turns them into a reply.

use thiserror::Error;

// ── Primary error enum ─────────────────────────────────────────────────────

#[derive(Debug, Error)]
pub enum EngineError {
    /// Config file could not be parsed.
    #[error("Config parse error: {0}")]
    Toml(#[from] toml::de::Error),

    /// The HTTP client could not be built (TLS backend, proxy settings).
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Engine configuration is invalid or missing (credential, mode name…).
    #[error("Configuration error: {0}")]
    Config(String),
}

// ── Convenience constructors ───────────────────────────────────────────────

impl EngineError {
    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config(message.into())
    }

    pub fn is_config(&self) -> bool {
        matches!(self, Self::Config(_) | Self::Toml(_))
    }
}

// ── Convenience alias ──────────────────────────────────────────────────────

/// All engine operations should return this type.
pub type EngineResult<T> = Result<T, EngineError>;
