//! Error types raised by dialect lookups.

use thiserror::Error;

/// Errors surfaced while resolving dialects and keyword roles.
///
/// # Examples
/// ```
/// use gherkin_cst_dialects::try_dialect;
///
/// let err = try_dialect("xx").unwrap_err();
/// assert_eq!(err.to_string(), "unknown language: xx");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialectError {
    /// No bundled dialect is registered under the requested code.
    #[error("unknown language: {0}")]
    UnknownLanguage(String),
    /// The text does not name a keyword role.
    #[error("unknown keyword role: {0}")]
    UnknownRole(String),
    /// The bundled dialect data could not be decoded.
    #[error("malformed dialect data: {0}")]
    MalformedData(String),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn formats_unknown_language() {
        let err = DialectError::UnknownLanguage("xx".into());
        assert_eq!(err.to_string(), "unknown language: xx");
    }

    #[test]
    fn formats_malformed_data() {
        let err = DialectError::MalformedData("expected value at line 1".into());
        assert_eq!(
            err.to_string(),
            "malformed dialect data: expected value at line 1"
        );
    }
}
