//! Error types for the stepwise pipeline
//!
//! Step-level problems never surface here: they become a failed step
//! outcome instead. These errors cover setup and the audit trail.

use thiserror::Error;

/// Result type alias for stepwise operations
pub type Result<T> = std::result::Result<T, StepwiseError>;

/// Main error type for stepwise operations
#[derive(Debug, Error)]
pub enum StepwiseError {
    /// Invalid or unusable configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Writing an audit record failed
    #[error("Audit error: {0}")]
    Audit(String),

    /// Building a language model client failed
    #[error("LLM error: {0}")]
    Llm(#[from] llm::LlmError),

    /// Shared tooling failure (environment lookups)
    #[error(transparent)]
    Tooling(#[from] tooling::ToolingError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serde(#[from] serde_json::Error),

    /// TOML parse error
    #[error("TOML parse error: {0}")]
    Toml(#[from] toml::de::Error),
}

impl StepwiseError {
    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create an audit error
    pub fn audit(msg: impl Into<String>) -> Self {
        Self::Audit(msg.into())
    }
}
