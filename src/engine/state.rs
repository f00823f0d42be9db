// engine/state.rs — Process-wide engine state.
// Holds the loaded configuration and the connector that turns a resolved
// ProviderConfig into a live provider. Built once at startup; every turn
// borrows it immutably.

use log::info;
use std::sync::Arc;

use crate::atoms::error::EngineResult;
use crate::engine::config::EngineConfig;
use crate::engine::providers::AnyProvider;
use crate::engine::types::*;

/// Builds a provider for a resolved credential. Swappable so tests can
/// observe whether a provider was ever constructed.
pub type Connector = Arc<dyn Fn(&ProviderConfig) -> EngineResult<AnyProvider> + Send + Sync>;

pub struct EngineState {
    pub config: EngineConfig,
    connector: Connector,
}

impl EngineState {
    pub fn new(config: EngineConfig) -> Self {
        Self::with_connector(config, Arc::new(AnyProvider::from_config))
    }

    pub fn with_connector(config: EngineConfig, connector: Connector) -> Self {
        EngineState { config, connector }
    }

    /// Resolve the credential and build the provider. A missing credential
    /// fails here, before any provider exists; so does an HTTP client that
    /// cannot be built.
    pub fn connect(&self) -> EngineResult<AnyProvider> {
        let provider_config = self.config.provider_config()?;
        let provider = (self.connector)(&provider_config)?;
        info!(
            "[engine] Connected provider {} ({})",
            provider.name(),
            provider_config.base_url.as_deref().unwrap_or(provider_config.kind.default_base_url())
        );
        Ok(provider)
    }
}
