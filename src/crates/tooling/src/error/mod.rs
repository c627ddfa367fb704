//! Error chain formatting
//!
//! Failure reasons end up in user-facing text and audit records, so the
//! helper here flattens an error and its `source()` chain into a string.

use std::error::Error as StdError;

/// Flatten an error chain onto one line: `outer: inner: root`.
///
/// A source whose message is already contained in the previous one is
/// skipped, since many wrappers repeat their cause in `Display`.
pub fn inline_error_chain(error: &dyn StdError) -> String {
    let mut result = error.to_string();
    let mut current = error.source();

    while let Some(source) = current {
        let message = source.to_string();
        if !result.contains(&message) {
            result.push_str(": ");
            result.push_str(&message);
        }
        current = source.source();
    }

    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fmt;

    #[derive(Debug)]
    struct Wrapped {
        message: &'static str,
        source: std::io::Error,
    }

    impl fmt::Display for Wrapped {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write!(f, "{}", self.message)
        }
    }

    impl StdError for Wrapped {
        fn source(&self) -> Option<&(dyn StdError + 'static)> {
            Some(&self.source)
        }
    }

    fn wrapped() -> Wrapped {
        Wrapped {
            message: "backend call failed",
            source: std::io::Error::new(std::io::ErrorKind::ConnectionRefused, "connection refused"),
        }
    }

    #[test]
    fn test_inline_error_chain() {
        assert_eq!(
            inline_error_chain(&wrapped()),
            "backend call failed: connection refused"
        );
    }

    #[test]
    fn test_inline_error_chain_skips_repeated_cause() {
        let err = crate::ToolingError::Io(std::io::Error::new(
            std::io::ErrorKind::NotFound,
            "history file missing",
        ));
        assert_eq!(inline_error_chain(&err), "I/O error: history file missing");
    }
}
