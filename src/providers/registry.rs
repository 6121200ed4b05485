//! Provider registry
//!
//! In-memory registry for storing and retrieving providers and their
//! metadata, plus the process-wide instance a host resolves its configured
//! provider from.

use std::collections::HashMap;
use std::sync::{Arc, OnceLock};

use tracing::{info, warn};

use crate::config::AppConfig;
use crate::providers::{
    MockProvider, MockProviderConfig, ProviderMetadata, SsoProvider,
};

/// Error type for registry operations
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("Provider '{name}' not found")]
    ProviderNotFound { name: String },
}

/// Global provider registry instance
static REGISTRY: OnceLock<ProviderRegistry> = OnceLock::new();

#[derive(Clone, Default)]
pub struct ProviderRegistry {
    providers: HashMap<String, Arc<dyn SsoProvider>>,
    metadata: HashMap<String, ProviderMetadata>,
}

impl ProviderRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry containing every provider this crate ships.
    pub fn from_config(config: &AppConfig) -> Self {
        let mut registry = Self::new();
        let mock = MockProvider::new(MockProviderConfig::from(config));
        registry.register(Arc::new(mock), MockProvider::metadata());
        registry
    }

    /// The process-wide registry, built from `config` on the first call.
    /// Later calls return the same instance and ignore their argument.
    pub fn global(config: &AppConfig) -> &'static ProviderRegistry {
        REGISTRY.get_or_init(|| {
            info!(profile = %config.profile, "Initializing provider registry");
            Self::from_config(config)
        })
    }

    pub fn register(&mut self, provider: Arc<dyn SsoProvider>, metadata: ProviderMetadata) {
        let name = metadata.name.clone();
        self.providers.insert(name.clone(), provider);
        self.metadata.insert(name, metadata);
    }

    pub fn get(&self, name: &str) -> Result<Arc<dyn SsoProvider>, RegistryError> {
        self.providers
            .get(name)
            .cloned()
            .ok_or_else(|| RegistryError::ProviderNotFound {
                name: name.to_string(),
            })
    }

    /// Get metadata for all providers, sorted by name for stable ordering
    pub fn list_metadata(&self) -> Vec<ProviderMetadata> {
        let mut metadata: Vec<_> = self.metadata.values().cloned().collect();
        metadata.sort_by(|a, b| a.name.cmp(&b.name));
        metadata
    }

    pub fn get_metadata(&self, name: &str) -> Result<&ProviderMetadata, RegistryError> {
        self.metadata
            .get(name)
            .ok_or_else(|| RegistryError::ProviderNotFound {
                name: name.to_string(),
            })
    }

    /// The provider selected by `SSO_PROVIDER`, if it names a registered one.
    pub fn active(&self, config: &AppConfig) -> Option<Arc<dyn SsoProvider>> {
        let name = config.sso_provider.as_deref()?;
        match self.get(name) {
            Ok(provider) => Some(provider),
            Err(err) => {
                warn!(error = %err, "Configured SSO provider is not registered");
                None
            }
        }
    }
}

/// Resolve the configured provider from the process-wide registry.
pub fn active_provider(config: &AppConfig) -> Option<Arc<dyn SsoProvider>> {
    ProviderRegistry::global(config).active(config)
}
