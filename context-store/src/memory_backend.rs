//! In-memory context backend: volatile, for tests, development and short-lived bots.

use std::collections::HashMap;
use std::sync::Arc;

use async_trait::async_trait;
use context_core::{ContextBackend, ContextError, ContextId, Document, Result};
use tokio::sync::RwLock;

/// Keeps every document in a process-local map; data is lost on restart.
#[derive(Debug, Clone, Default)]
pub struct MemoryBackend {
    docs: Arc<RwLock<HashMap<ContextId, Document>>>,
}

impl MemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of stored documents.
    pub async fn len(&self) -> usize {
        self.docs.read().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl ContextBackend for MemoryBackend {
    async fn load(&self, id: &ContextId) -> Result<Document> {
        self.docs
            .read()
            .await
            .get(id)
            .cloned()
            .ok_or_else(|| ContextError::NotFound(id.to_string()))
    }

    async fn save(&self, id: &ContextId, doc: &Document) -> Result<()> {
        self.docs.write().await.insert(id.clone(), doc.clone());
        Ok(())
    }

    async fn remove(&self, id: &ContextId) -> Result<()> {
        self.docs.write().await.remove(id);
        Ok(())
    }

    async fn list(&self) -> Result<Vec<ContextId>> {
        Ok(self.docs.read().await.keys().cloned().collect())
    }
}
