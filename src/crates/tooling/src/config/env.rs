//! Environment variable loading utilities

use crate::{Result, ToolingError};
use std::env;
use std::str::FromStr;

/// Load an environment variable as a string
///
/// Returns `Ok(None)` when the variable is not set and an error when it is
/// set but not valid UTF-8.
pub fn get_env(key: &str) -> Result<Option<String>> {
    match env::var(key) {
        Ok(val) => Ok(Some(val)),
        Err(env::VarError::NotPresent) => Ok(None),
        Err(env::VarError::NotUnicode(_)) => Err(ToolingError::Config(format!(
            "Environment variable {} contains invalid UTF-8",
            key
        ))),
    }
}

/// Load and parse an environment variable
///
/// ```rust,ignore
/// let max_tokens: Option<u32> = get_env_parse("STEPWISE_LLM_MAX_TOKENS")?;
/// ```
pub fn get_env_parse<T>(key: &str) -> Result<Option<T>>
where
    T: FromStr,
    T::Err: std::fmt::Display,
{
    match get_env(key)? {
        Some(val) => {
            let parsed = val.trim().parse::<T>().map_err(|e| {
                ToolingError::Config(format!(
                    "Failed to parse environment variable {}: {}",
                    key, e
                ))
            })?;
            Ok(Some(parsed))
        }
        None => Ok(None),
    }
}

/// Load a boolean environment variable
///
/// Accepts "true", "1", "yes", "on" and "false", "0", "no", "off"
/// (case-insensitive).
pub fn get_env_bool(key: &str) -> Result<Option<bool>> {
    match get_env(key)? {
        Some(val) => {
            let result = match val.trim().to_lowercase().as_str() {
                "true" | "1" | "yes" | "on" => true,
                "false" | "0" | "no" | "off" => false,
                _ => {
                    return Err(ToolingError::Config(format!(
                        "Invalid boolean value for {}: {}",
                        key, val
                    )))
                }
            };
            Ok(Some(result))
        }
        None => Ok(None),
    }
}

/// Build a prefixed environment variable name
///
/// ```rust,ignore
/// let key = build_env_key("STEPWISE_", "log_level"); // "STEPWISE_LOG_LEVEL"
/// ```
pub fn build_env_key(prefix: &str, name: &str) -> String {
    format!("{}{}", prefix, name.to_uppercase())
}

/// Expand a `${VAR_NAME}` reference to the variable's value.
///
/// Anything that is not exactly one `${...}` reference is returned unchanged,
/// as is a reference to an unset variable.
pub fn expand_env_var(value: &str) -> String {
    match env_reference(value) {
        Some(var_name) => env::var(var_name).unwrap_or_else(|_| value.to_string()),
        None => value.to_string(),
    }
}

/// True when `value` is a `${VAR}` reference, i.e. one that
/// [`expand_env_var`] could not resolve.
pub fn is_env_reference(value: &str) -> bool {
    env_reference(value).is_some()
}

fn env_reference(value: &str) -> Option<&str> {
    value
        .strip_prefix("${")
        .and_then(|rest| rest.strip_suffix('}'))
        .filter(|name| !name.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_env_missing() {
        let result = get_env("STEPWISE_TOOLING_MISSING_VAR_12345").unwrap();
        assert!(result.is_none());
    }

    #[test]
    fn test_get_env_parse() {
        env::set_var("STEPWISE_TOOLING_MAX_TOKENS", " 1000 ");
        let result: Option<u32> = get_env_parse("STEPWISE_TOOLING_MAX_TOKENS").unwrap();
        assert_eq!(result, Some(1000));
        env::remove_var("STEPWISE_TOOLING_MAX_TOKENS");
    }

    #[test]
    fn test_get_env_parse_invalid() {
        env::set_var("STEPWISE_TOOLING_BAD_TEMPERATURE", "warm");
        let result: Result<Option<f32>> = get_env_parse("STEPWISE_TOOLING_BAD_TEMPERATURE");
        assert!(result.is_err());
        env::remove_var("STEPWISE_TOOLING_BAD_TEMPERATURE");
    }

    #[test]
    fn test_get_env_bool() {
        let cases = [
            ("true", true),
            ("ON", true),
            ("1", true),
            ("yes", true),
            ("false", false),
            ("Off", false),
            ("0", false),
            ("no", false),
        ];

        for (value, expected) in cases {
            env::set_var("STEPWISE_TOOLING_BOOL", value);
            let result = get_env_bool("STEPWISE_TOOLING_BOOL").unwrap();
            assert_eq!(result, Some(expected), "Failed for value: {}", value);
        }

        env::remove_var("STEPWISE_TOOLING_BOOL");
    }

    #[test]
    fn test_get_env_bool_invalid() {
        env::set_var("STEPWISE_TOOLING_BOOL_INVALID", "maybe");
        assert!(get_env_bool("STEPWISE_TOOLING_BOOL_INVALID").is_err());
        env::remove_var("STEPWISE_TOOLING_BOOL_INVALID");
    }

    #[test]
    fn test_build_env_key() {
        assert_eq!(build_env_key("STEPWISE_", "log_level"), "STEPWISE_LOG_LEVEL");
        assert_eq!(build_env_key("", "debug"), "DEBUG");
    }

    #[test]
    fn test_expand_env_var() {
        env::set_var("STEPWISE_TOOLING_KEY", "key-123");
        assert_eq!(expand_env_var("${STEPWISE_TOOLING_KEY}"), "key-123");
        assert_eq!(expand_env_var("literal-key"), "literal-key");
        assert_eq!(
            expand_env_var("${STEPWISE_TOOLING_UNSET_KEY}"),
            "${STEPWISE_TOOLING_UNSET_KEY}"
        );
        env::remove_var("STEPWISE_TOOLING_KEY");
    }

    #[test]
    fn test_is_env_reference() {
        assert!(is_env_reference("${STEPWISE_TOOLING_UNSET_KEY}"));
        assert!(!is_env_reference("${}"));
        assert!(!is_env_reference("sk-literal"));
        assert!(!is_env_reference("prefix-${VAR}"));
    }
}
