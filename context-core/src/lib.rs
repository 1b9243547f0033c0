//! # context-core
//!
//! Core types and traits for the chat context storage layer: [`ContextBackend`], [`ContextId`],
//! the error taxonomy, and tracing initialization. Backend-agnostic; used by context-store.

pub mod backend;
pub mod error;
pub mod logger;
pub mod types;

pub use backend::ContextBackend;
pub use error::{ContextError, Result};
pub use logger::init_tracing;
pub use types::{ContextId, Document};
