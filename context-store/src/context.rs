//! The per-entity context object: an in-memory key-value view mirrored to a backend.
//!
//! Reads only touch the in-memory map and never wait on backend I/O. Every
//! mutation updates the map first, then persists the full document through a
//! per-object write gate: a context never has two writes racing against the
//! same file, and a persisted snapshot is never older than the one before it.

use std::sync::Arc;

use context_core::{ContextBackend, ContextId, Document, Result};
use serde_json::Value;
use tokio::sync::{Mutex, RwLock};
use tracing::debug;

/// Cheaply cloneable handle to one entity's context. All clones share state:
/// a mutation through one handle is immediately visible through the others,
/// even while its persistence write is still in flight.
#[derive(Clone)]
pub struct ChatContext {
    inner: Arc<ContextInner>,
}

struct ContextInner {
    id: ContextId,
    values: RwLock<Document>,
    // tokio mutexes queue waiters in FIFO order, so writes settle in the
    // order their mutations were issued.
    write_gate: Mutex<()>,
    backend: Arc<dyn ContextBackend>,
}

impl std::fmt::Debug for ChatContext {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ChatContext")
            .field("id", &self.inner.id)
            .finish_non_exhaustive()
    }
}

impl ChatContext {
    pub(crate) fn new(id: ContextId, values: Document, backend: Arc<dyn ContextBackend>) -> Self {
        Self {
            inner: Arc::new(ContextInner {
                id,
                values: RwLock::new(values),
                write_gate: Mutex::new(()),
                backend,
            }),
        }
    }

    /// Id of the entity this context belongs to.
    pub fn id(&self) -> &ContextId {
        &self.inner.id
    }

    /// Value stored under `key`, or `None` when absent.
    pub async fn get(&self, key: &str) -> Option<Value> {
        self.inner.values.read().await.get(key).cloned()
    }

    /// One result document for several keys; absent keys are omitted.
    pub async fn get_many(&self, keys: &[&str]) -> Document {
        let values = self.inner.values.read().await;
        let mut out = Document::new();
        for key in keys {
            if let Some(value) = values.get(*key) {
                out.insert((*key).to_string(), value.clone());
            }
        }
        out
    }

    /// Snapshot of the whole mapping; mutating the returned map does not
    /// affect the context.
    pub async fn all(&self) -> Document {
        self.inner.values.read().await.clone()
    }

    /// Inserts or overwrites one key, then persists the document.
    pub async fn set(&self, key: impl Into<String>, value: impl Into<Value>) -> Result<()> {
        {
            let mut values = self.inner.values.write().await;
            values.insert(key.into(), value.into());
        }
        self.persist().await
    }

    /// Shallow merge: keys present in `entries` overwrite, the rest stay
    /// untouched. Persists the document.
    pub async fn set_many(&self, entries: Document) -> Result<()> {
        {
            let mut values = self.inner.values.write().await;
            for (key, value) in entries {
                values.insert(key, value);
            }
        }
        self.persist().await
    }

    /// Deletes the named keys; absent keys are a no-op. Persists the document.
    pub async fn remove(&self, keys: &[&str]) -> Result<()> {
        {
            let mut values = self.inner.values.write().await;
            for key in keys {
                values.remove(*key);
            }
        }
        self.persist().await
    }

    /// Empties the mapping, persisting an empty document.
    pub async fn clear(&self) -> Result<()> {
        self.inner.values.write().await.clear();
        self.persist().await
    }

    // Full-document write behind the gate. The snapshot is taken after the
    // gate is acquired, so what lands on disk is at least as new as any
    // previously persisted snapshot. On failure the in-memory mutation stays.
    async fn persist(&self) -> Result<()> {
        let _gate = self.inner.write_gate.lock().await;
        let snapshot = self.inner.values.read().await.clone();
        debug!(id = %self.inner.id, keys = snapshot.len(), "Persisting context");
        self.inner.backend.save(&self.inner.id, &snapshot).await
    }
}
