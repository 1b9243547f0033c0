//! Provider configuration: typed, structurally comparable, immutable once a provider is built.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Configuration handed to a backend builder.
///
/// Providers are memoized per (backend name, configuration) pair; equality is
/// structural, so two configs with the same root resolve to the same provider.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ProviderConfig {
    /// Root directory for file-based backends; one `<id>.json` per entity.
    pub root: Option<PathBuf>,
}

impl ProviderConfig {
    /// Config rooted at the given directory.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            root: Some(root.into()),
        }
    }
}
