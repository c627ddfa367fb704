//! Configuration management utilities
//!
//! Environment variable loading with proper error handling, plus `${VAR}`
//! expansion for values read from configuration files.
//!
//! # Example
//!
//! ```rust,ignore
//! use tooling::config::{build_env_key, get_env_bool, get_env_parse};
//!
//! let max_tokens: Option<u32> = get_env_parse(&build_env_key("STEPWISE_", "llm_max_tokens"))?;
//! let audit: Option<bool> = get_env_bool("STEPWISE_AUDIT_ENABLED")?;
//! ```

mod env;

pub use env::{
    build_env_key, expand_env_var, get_env, get_env_bool, get_env_parse, is_env_reference,
};
