//! # context-store
//!
//! Concrete context storage for conversational state: the file and in-memory
//! backends, the per-entity [`ChatContext`] object, the [`ContextProvider`]
//! cache, and the [`ContextProviders`] factory resolving backend names into
//! configured providers.

pub mod config;
pub mod context;
pub mod factory;
pub mod file_backend;
pub mod memory_backend;
pub mod provider;

pub use context_core::{ContextBackend, ContextError, ContextId, Document, Result};

pub use config::ProviderConfig;
pub use context::ChatContext;
pub use factory::ContextProviders;
pub use file_backend::FileBackend;
pub use memory_backend::MemoryBackend;
pub use provider::ContextProvider;
