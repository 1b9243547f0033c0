//! Factory and registry resolving backend names into configured providers.
//!
//! Built-in backends register at construction; hosts may register their own
//! under any name, and re-registering a name replaces the builder (last
//! writer wins), so built-ins and external backends share one namespace.
//! Providers are memoized per (name, configuration) pair.

use std::collections::HashMap;
use std::sync::Arc;

use context_core::{ContextBackend, ContextError, Result};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::ProviderConfig;
use crate::file_backend::FileBackend;
use crate::memory_backend::MemoryBackend;
use crate::provider::ContextProvider;

type BackendBuilder = Arc<dyn Fn(&ProviderConfig) -> Result<Arc<dyn ContextBackend>> + Send + Sync>;

/// Registry of named backend builders and the providers built from them.
pub struct ContextProviders {
    builders: RwLock<HashMap<String, BackendBuilder>>,
    providers: RwLock<HashMap<(String, ProviderConfig), ContextProvider>>,
}

impl ContextProviders {
    /// Registry with the built-in `plain-file` and `memory` backends.
    pub fn new() -> Self {
        let mut builders: HashMap<String, BackendBuilder> = HashMap::new();

        builders.insert(
            "plain-file".to_string(),
            Arc::new(|config: &ProviderConfig| {
                let root = config.root.clone().ok_or_else(|| {
                    ContextError::Config("plain-file backend requires a root path".to_string())
                })?;
                Ok(Arc::new(FileBackend::new(root)?) as Arc<dyn ContextBackend>)
            }),
        );
        builders.insert(
            "memory".to_string(),
            Arc::new(|_: &ProviderConfig| {
                Ok(Arc::new(MemoryBackend::new()) as Arc<dyn ContextBackend>)
            }),
        );

        Self {
            builders: RwLock::new(builders),
            providers: RwLock::new(HashMap::new()),
        }
    }

    /// Adds a backend builder under `name`; re-registering the same name
    /// replaces the previous builder.
    pub async fn register<F>(&self, name: impl Into<String>, builder: F)
    where
        F: Fn(&ProviderConfig) -> Result<Arc<dyn ContextBackend>> + Send + Sync + 'static,
    {
        let name = name.into();
        debug!(backend = %name, "Registering context backend");
        self.builders.write().await.insert(name, Arc::new(builder));
    }

    /// True iff a builder is registered under `name`.
    pub async fn has_provider(&self, name: &str) -> bool {
        self.builders.read().await.contains_key(name)
    }

    /// Resolves `name` and `config` into a provider, reusing the memoized one
    /// for a structurally equal (name, config) pair. Fails with
    /// `UnknownBackend` when nothing is registered under `name`; there is no
    /// fallback backend.
    pub async fn get_provider(&self, name: &str, config: ProviderConfig) -> Result<ContextProvider> {
        let key = (name.to_string(), config);

        if let Some(provider) = self.providers.read().await.get(&key) {
            return Ok(provider.clone());
        }

        let builder = self
            .builders
            .read()
            .await
            .get(name)
            .cloned()
            .ok_or_else(|| ContextError::UnknownBackend(name.to_string()))?;

        let mut providers = self.providers.write().await;
        // A concurrent resolver may have won the race for this pair.
        if let Some(provider) = providers.get(&key) {
            return Ok(provider.clone());
        }

        let backend = builder(&key.1)?;
        let provider = ContextProvider::new(backend);
        providers.insert(key, provider.clone());
        info!(backend = %name, "Constructed context provider");
        Ok(provider)
    }
}

impl Default for ContextProviders {
    fn default() -> Self {
        Self::new()
    }
}
