//! Error types for the jonny engine.

/// Top-level error type for the dialogue engine.
#[derive(Debug, thiserror::Error)]
pub enum AgentError {
    /// Speech recognition stream error (open failure, backend fault).
    #[error("recognizer error: {0}")]
    Recognizer(String),

    /// Configuration error.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience result type.
pub type Result<T> = std::result::Result<T, AgentError>;
