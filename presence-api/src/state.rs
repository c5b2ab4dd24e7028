//! App state: registry and config.

use std::sync::Arc;

use presence_core::error::Result;
use presence_core::types::RegistryConfig;
use presence_registry::MemoryRegistry;

#[derive(Clone, Debug, Default)]
pub struct ApiConfig {
    pub registry: RegistryConfig,
}

impl ApiConfig {
    /// Reads the configuration from the process environment (and `.env`, if present).
    pub fn from_env() -> Result<Self> {
        let _ = dotenvy::dotenv();

        Ok(Self {
            registry: RegistryConfig::from_lookup(|key| std::env::var(key).ok())?,
        })
    }
}

pub struct AppState {
    pub config: ApiConfig,
    pub registry: Arc<MemoryRegistry>,
}

impl AppState {
    pub fn new(config: ApiConfig) -> Self {
        Self {
            registry: Arc::new(MemoryRegistry::with_config(config.registry)),
            config,
        }
    }
}
