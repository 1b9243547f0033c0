//! Core types: entity id and the per-entity key-value document.

use serde::{Deserialize, Serialize};

/// The JSON object persisted for one entity: plain key-value pairs, no envelope or metadata.
pub type Document = serde_json::Map<String, serde_json::Value>;

/// Entity id scoping one context document (a chat, user or conversation id).
///
/// Ids arrive as strings or integers; both normalize to the same string identity,
/// so `ContextId::from(42)` and `ContextId::from("42")` address the same document.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(String);

impl ContextId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContextId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ContextId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for ContextId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<i32> for ContextId {
    fn from(id: i32) -> Self {
        Self(id.to_string())
    }
}

impl From<i64> for ContextId {
    fn from(id: i64) -> Self {
        Self(id.to_string())
    }
}

impl From<u64> for ContextId {
    fn from(id: u64) -> Self {
        Self(id.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_and_string_ids_normalize_to_same_identity() {
        assert_eq!(ContextId::from(42), ContextId::from("42"));
        assert_eq!(ContextId::from(42i64).as_str(), "42");
    }

    #[test]
    fn display_matches_normalized_form() {
        assert_eq!(ContextId::from(7u64).to_string(), "7");
        assert_eq!(ContextId::from("chat-99").to_string(), "chat-99");
    }
}
