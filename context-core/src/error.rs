use thiserror::Error;

#[derive(Error, Debug)]
pub enum ContextError {
    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("No context document for id: {0}")]
    NotFound(String),

    #[error("Corrupt context document at {path}: {reason}")]
    CorruptDocument { path: String, reason: String },

    #[error("Write failure: {0}")]
    WriteFailure(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, ContextError>;
