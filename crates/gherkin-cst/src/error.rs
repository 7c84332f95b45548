//! Error types for configuration and byte input.
//!
//! Malformed Gherkin is never an error: it produces a tree with
//! diagnostics. These errors cover input that cannot be parsed at all and
//! invalid configuration.

use gherkin_cst_dialects::DialectError;
use thiserror::Error;

/// Invalid [`ParseOptions`](crate::ParseOptions).
///
/// # Examples
///
/// ```
/// use gherkin_cst::ParseOptions;
///
/// let err = ParseOptions::new().with_default_language("xx").unwrap_err();
/// assert_eq!(err.to_string(), "invalid default language: unknown language: xx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigError {
    /// The default language does not name a bundled dialect.
    #[error("invalid default language: {0}")]
    Language(#[from] DialectError),
}

/// Input that cannot be turned into a tree.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    /// The bytes are not valid UTF-8.
    #[error("feature source is not valid UTF-8: {0}")]
    InvalidUtf8(#[from] std::str::Utf8Error),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wraps_dialect_errors() {
        let err = ConfigError::from(DialectError::UnknownLanguage("xx".into()));
        assert_eq!(
            err.to_string(),
            "invalid default language: unknown language: xx"
        );
    }

    #[test]
    fn reports_utf8_position() {
        let bytes = [b'F', 0xff];
        let Err(utf8) = std::str::from_utf8(&bytes) else {
            panic!("bytes should be invalid UTF-8");
        };
        let err = ParseError::from(utf8);
        assert!(err.to_string().contains("index 1"), "{err}");
    }
}
