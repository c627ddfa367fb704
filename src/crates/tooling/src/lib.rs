//! Shared helpers for the stepwise workspace
//!
//! # Modules
//!
//! - `config` - Environment variable loading and `${VAR}` expansion
//! - `error` - Error chain formatting for user-facing failure reasons
//! - `logging` - Tracing subscriber setup, scope timing and secret redaction

pub mod config;
pub mod error;
pub mod logging;

use thiserror::Error;

/// Errors that can occur in the tooling crate
#[derive(Debug, Error)]
pub enum ToolingError {
    /// General error with message
    #[error("Tooling error: {0}")]
    General(String),

    /// Invalid or missing configuration value
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for tooling operations
pub type Result<T> = std::result::Result<T, ToolingError>;

/// Get version information
pub fn version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_version() {
        assert!(!version().is_empty());
    }

    #[test]
    fn test_config_error_display() {
        let err = ToolingError::Config("missing provider".to_string());
        assert_eq!(err.to_string(), "Configuration error: missing provider");
    }
}
