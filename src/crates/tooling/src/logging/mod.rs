//! Logging utilities
//!
//! Subscriber installation plus small helpers for structured logging with
//! tracing.

use crate::{Result, ToolingError};
use regex::Regex;
use std::str::FromStr;
use std::sync::LazyLock;
use std::time::Instant;
use tracing::debug;
use tracing_subscriber::EnvFilter;

/// Output format of the installed subscriber
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    #[default]
    Compact,
    Pretty,
    Json,
}

impl FromStr for LogFormat {
    type Err = ToolingError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "compact" => Ok(Self::Compact),
            "pretty" => Ok(Self::Pretty),
            "json" => Ok(Self::Json),
            other => Err(ToolingError::Config(format!(
                "Unknown log format: {} (expected compact, pretty or json)",
                other
            ))),
        }
    }
}

/// Install the global tracing subscriber.
///
/// `RUST_LOG` takes precedence over `level` when it is set. Logs go to
/// stderr so that answers printed on stdout stay clean.
pub fn init_tracing(level: &str, format: LogFormat) -> Result<()> {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(level))
        .map_err(|e| ToolingError::Config(format!("Invalid log level {}: {}", level, e)))?;

    let builder = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr);

    let installed = match format {
        LogFormat::Compact => builder.compact().try_init(),
        LogFormat::Pretty => builder.pretty().try_init(),
        LogFormat::Json => builder.json().try_init(),
    };

    installed.map_err(|e| ToolingError::General(format!("Failed to install subscriber: {}", e)))
}

/// RAII guard for logging scope entry and exit
///
/// ```rust
/// use tooling::logging::LogGuard;
///
/// fn handle_query() {
///     let _guard = LogGuard::new("handle_query");
///     // exit and elapsed time are logged when the guard drops
/// }
/// ```
pub struct LogGuard {
    name: String,
    start: Instant,
}

impl LogGuard {
    /// Create a new log guard
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        debug!("Entering: {}", name);

        Self {
            name,
            start: Instant::now(),
        }
    }

    /// Get elapsed time since guard creation
    pub fn elapsed(&self) -> std::time::Duration {
        self.start.elapsed()
    }
}

impl Drop for LogGuard {
    fn drop(&mut self) {
        debug!(
            "Exiting: {} (elapsed: {})",
            self.name,
            format_duration(self.start.elapsed())
        );
    }
}

/// Format duration in human-readable form
///
/// ```rust
/// use tooling::logging::format_duration;
/// use std::time::Duration;
///
/// assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
/// assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
/// ```
pub fn format_duration(duration: std::time::Duration) -> String {
    let micros = duration.as_micros();

    if micros < 1000 {
        format!("{}μs", micros)
    } else if micros < 1_000_000 {
        format!("{}ms", micros / 1000)
    } else if micros < 60_000_000 {
        format!("{:.2}s", micros as f64 / 1_000_000.0)
    } else {
        let seconds = micros / 1_000_000;
        format!("{}m{}s", seconds / 60, seconds % 60)
    }
}

static SECRET_PATTERNS: LazyLock<Vec<(Regex, &'static str)>> = LazyLock::new(|| {
    [
        (r#"(?i)(api[\s_-]?key|apikey)(["']?\s*[:=]\s*)["']?[^\s"',]+["']?"#, "$1$2[REDACTED]"),
        (r"(?i)(password|passwd|pwd)\s*[:=]\s*\S+", "$1: [REDACTED]"),
        (r"(?i)(secret)\s*[:=]\s*\S+", "$1: [REDACTED]"),
        (r"(?i)(authorization)\s*:\s*bearer\s+\S+", "$1: Bearer [REDACTED]"),
        (r"([?&]key=)[^&\s]+", "$1[REDACTED]"),
    ]
    .into_iter()
    .filter_map(|(pattern, replacement)| Regex::new(pattern).ok().map(|re| (re, replacement)))
    .collect()
});

/// Redact API keys, passwords and bearer tokens before text is logged or
/// echoed.
///
/// ```rust
/// use tooling::logging::sanitize_for_logging;
///
/// let sanitized = sanitize_for_logging("api_key = \"sk-abc123\"");
/// assert!(sanitized.contains("[REDACTED]"));
/// assert!(!sanitized.contains("sk-abc123"));
/// ```
pub fn sanitize_for_logging(input: &str) -> String {
    SECRET_PATTERNS
        .iter()
        .fold(input.to_string(), |text, (re, replacement)| {
            re.replace_all(&text, *replacement).into_owned()
        })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    #[test]
    fn test_log_format_parse() {
        assert_eq!("compact".parse::<LogFormat>().unwrap(), LogFormat::Compact);
        assert_eq!("Pretty".parse::<LogFormat>().unwrap(), LogFormat::Pretty);
        assert_eq!(" json ".parse::<LogFormat>().unwrap(), LogFormat::Json);
        assert!("xml".parse::<LogFormat>().is_err());
    }

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(Duration::from_micros(500)), "500μs");
        assert_eq!(format_duration(Duration::from_millis(500)), "500ms");
        assert_eq!(format_duration(Duration::from_millis(1500)), "1.50s");
        assert_eq!(format_duration(Duration::from_secs(125)), "2m5s");
    }

    #[test]
    fn test_sanitize_toml_api_key() {
        let sanitized = sanitize_for_logging("api_key = \"AIzaSyExample\"");
        assert!(sanitized.contains("[REDACTED]"));
        assert!(!sanitized.contains("AIzaSyExample"));
    }

    #[test]
    fn test_sanitize_query_parameter_key() {
        let sanitized = sanitize_for_logging("POST /models/gemini:generateContent?key=abc123&alt=json");
        assert!(!sanitized.contains("abc123"));
        assert!(sanitized.contains("alt=json"));
    }

    #[test]
    fn test_sanitize_bearer_token() {
        let sanitized = sanitize_for_logging("Authorization: Bearer sk-live-xyz");
        assert!(sanitized.contains("Bearer [REDACTED]"));
        assert!(!sanitized.contains("sk-live-xyz"));
    }

    #[test]
    fn test_sanitize_preserves_safe_data() {
        let input = "provider = \"gemini\"\nmodel = \"gemini-1.5-pro\"";
        assert_eq!(sanitize_for_logging(input), input);
    }

    #[test]
    fn test_log_guard_elapsed() {
        let guard = LogGuard::new("test");
        std::thread::sleep(Duration::from_millis(10));
        assert!(guard.elapsed() >= Duration::from_millis(10));
    }
}
