//! Backend contract: the capability set a concrete context store must satisfy.

use async_trait::async_trait;

use crate::error::Result;
use crate::types::{ContextId, Document};

/// Storage backend for per-entity context documents.
///
/// One document per entity id. `load` fails with `ContextError::NotFound` when no
/// document exists and `ContextError::CorruptDocument` when one exists but does not
/// parse as a JSON object; everything else propagates as-is.
#[async_trait]
pub trait ContextBackend: Send + Sync {
    /// Loads the full persisted document for `id`.
    async fn load(&self, id: &ContextId) -> Result<Document>;

    /// Durably replaces the document for `id`. Atomic with respect to concurrent
    /// or subsequent loads: a reader never observes a partial write.
    async fn save(&self, id: &ContextId, doc: &Document) -> Result<()>;

    /// Discards the document for `id` entirely; removing an absent document is a no-op.
    async fn remove(&self, id: &ContextId) -> Result<()>;

    /// Enumerates the ids that currently have a persisted document.
    async fn list(&self) -> Result<Vec<ContextId>>;
}
