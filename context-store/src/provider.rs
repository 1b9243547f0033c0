//! Provider: owns the per-id cache of context objects over one configured backend.

use std::collections::HashMap;
use std::sync::Arc;

use context_core::{ContextBackend, ContextError, ContextId, Document, Result};
use tokio::sync::{Mutex, RwLock};
use tracing::{debug, info};

use crate::context::ChatContext;

/// Cloneable handle to a configured backend plus its cached contexts.
///
/// At most one [`ChatContext`] exists per (provider, id): repeated retrieval
/// for the same id returns the same shared handle, so in-process mutations
/// are visible to every caller.
#[derive(Clone)]
pub struct ContextProvider {
    backend: Arc<dyn ContextBackend>,
    contexts: Arc<RwLock<HashMap<ContextId, ChatContext>>>,
    // Per-id creation gates: concurrent get_or_create calls for one
    // unmaterialized id collapse into a single load/create, without
    // serializing unrelated ids against each other.
    creating: Arc<Mutex<HashMap<ContextId, Arc<Mutex<()>>>>>,
}

impl std::fmt::Debug for ContextProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ContextProvider").finish_non_exhaustive()
    }
}

impl ContextProvider {
    pub fn new(backend: Arc<dyn ContextBackend>) -> Self {
        Self {
            backend,
            contexts: Arc::new(RwLock::new(HashMap::new())),
            creating: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    /// Returns the cached context for `id`, or materializes one.
    ///
    /// On a cache miss the persisted document is loaded when it exists
    /// (`defaults` are ignored — existing data always wins); when none
    /// exists the context is initialized from `defaults` and persisted
    /// before this call resolves, so a document is on disk by the time the
    /// caller holds the handle. A corrupt persisted document is an error,
    /// never silently replaced with defaults.
    pub async fn get_or_create(
        &self,
        id: impl Into<ContextId>,
        defaults: Document,
    ) -> Result<ChatContext> {
        let id = id.into();

        if let Some(context) = self.contexts.read().await.get(&id) {
            return Ok(context.clone());
        }

        let gate = {
            let mut creating = self.creating.lock().await;
            creating
                .entry(id.clone())
                .or_insert_with(|| Arc::new(Mutex::new(())))
                .clone()
        };
        let _guard = gate.lock().await;

        // The gate's previous holder may have materialized this id already.
        if let Some(context) = self.contexts.read().await.get(&id) {
            return Ok(context.clone());
        }

        let values = match self.backend.load(&id).await {
            Ok(doc) => {
                debug!(id = %id, keys = doc.len(), "Loaded persisted context");
                doc
            }
            Err(ContextError::NotFound(_)) => {
                info!(id = %id, "No persisted context, initializing from defaults");
                self.backend.save(&id, &defaults).await?;
                defaults
            }
            Err(e) => return Err(e),
        };

        let context = ChatContext::new(id.clone(), values, Arc::clone(&self.backend));
        self.contexts.write().await.insert(id.clone(), context.clone());
        self.creating.lock().await.remove(&id);

        Ok(context)
    }

    /// Cache-only lookup; never touches the backend. `None` means no context
    /// has been materialized for `id` in this process — call
    /// [`ContextProvider::get_or_create`] first to guarantee presence.
    pub async fn get(&self, id: impl Into<ContextId>) -> Option<ChatContext> {
        let id = id.into();
        self.contexts.read().await.get(&id).cloned()
    }

    /// Evicts the cached context and removes the persisted document.
    pub async fn delete(&self, id: impl Into<ContextId>) -> Result<()> {
        let id = id.into();
        self.contexts.write().await.remove(&id);
        self.backend.remove(&id).await?;
        info!(id = %id, "Deleted context");
        Ok(())
    }

    /// Ids with a persisted document, straight from the backend.
    pub async fn list_ids(&self) -> Result<Vec<ContextId>> {
        self.backend.list().await
    }
}
