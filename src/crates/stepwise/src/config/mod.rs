//! Application configuration
//!
//! TOML files layered over defaults, then environment overrides.

pub mod loader;
pub mod schema;

pub use loader::{apply_env_overrides, ConfigLoader, ENV_PREFIX};
pub use schema::{AuditConfig, ConfigFile, LlmConfig, LoggingConfig, StepwiseConfig, ToolsConfig};
