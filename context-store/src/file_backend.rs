//! File-backed context storage: one JSON document per entity under a root directory.
//!
//! Saves go to a temp file in the same directory followed by a rename over the
//! target, so a concurrent read or a crash mid-write never observes a
//! truncated or mixed-content document.

use std::path::PathBuf;

use async_trait::async_trait;
use context_core::{ContextBackend, ContextError, ContextId, Document, Result};
use tokio::fs;
use tracing::{debug, info};
use uuid::Uuid;

/// Stores each context as `<root>/<id>.json`.
#[derive(Debug, Clone)]
pub struct FileBackend {
    root: PathBuf,
}

impl FileBackend {
    /// Creates the backend, creating the root directory if missing.
    pub fn new(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        std::fs::create_dir_all(&root)?;
        info!(root = %root.display(), "File context backend ready");
        Ok(Self { root })
    }

    /// Path of the document for `id`.
    pub fn document_path(&self, id: &ContextId) -> PathBuf {
        self.root.join(format!("{}.json", id))
    }
}

#[async_trait]
impl ContextBackend for FileBackend {
    async fn load(&self, id: &ContextId) -> Result<Document> {
        let path = self.document_path(id);
        let bytes = match fs::read(&path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(ContextError::NotFound(id.to_string()))
            }
            Err(e) => return Err(e.into()),
        };

        match serde_json::from_slice::<serde_json::Value>(&bytes) {
            Ok(serde_json::Value::Object(doc)) => {
                debug!(id = %id, keys = doc.len(), "Loaded context document");
                Ok(doc)
            }
            Ok(other) => Err(ContextError::CorruptDocument {
                path: path.display().to_string(),
                reason: format!("expected a JSON object, found {}", json_type_name(&other)),
            }),
            Err(e) => Err(ContextError::CorruptDocument {
                path: path.display().to_string(),
                reason: e.to_string(),
            }),
        }
    }

    async fn save(&self, id: &ContextId, doc: &Document) -> Result<()> {
        let path = self.document_path(id);
        let tmp = self
            .root
            .join(format!("{}.json.{}.tmp", id, Uuid::new_v4().simple()));

        let data =
            serde_json::to_vec(doc).map_err(|e| ContextError::WriteFailure(e.to_string()))?;

        fs::write(&tmp, &data)
            .await
            .map_err(|e| ContextError::WriteFailure(format!("{}: {}", tmp.display(), e)))?;

        if let Err(e) = fs::rename(&tmp, &path).await {
            let _ = fs::remove_file(&tmp).await;
            return Err(ContextError::WriteFailure(format!(
                "{}: {}",
                path.display(),
                e
            )));
        }

        debug!(id = %id, path = %path.display(), keys = doc.len(), "Saved context document");
        Ok(())
    }

    async fn remove(&self, id: &ContextId) -> Result<()> {
        let path = self.document_path(id);
        match fs::remove_file(&path).await {
            Ok(()) => {
                info!(id = %id, "Removed context document");
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }

    async fn list(&self) -> Result<Vec<ContextId>> {
        let mut ids = Vec::new();
        let mut entries = fs::read_dir(&self.root).await?;
        while let Some(entry) = entries.next_entry().await? {
            let path = entry.path();
            if path.extension().and_then(|e| e.to_str()) == Some("json") {
                if let Some(stem) = path.file_stem().and_then(|s| s.to_str()) {
                    ids.push(ContextId::from(stem));
                }
            }
        }
        Ok(ids)
    }
}

fn json_type_name(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "a boolean",
        serde_json::Value::Number(_) => "a number",
        serde_json::Value::String(_) => "a string",
        serde_json::Value::Array(_) => "an array",
        serde_json::Value::Object(_) => "an object",
    }
}
