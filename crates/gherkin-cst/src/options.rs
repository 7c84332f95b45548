//! Parse configuration.
//!
//! Options can be built in code or loaded from environment variables
//! prefixed with `GHERKIN_CST_`.

use std::env;
use std::path::{Path, PathBuf};

use gherkin_cst_dialects::{Dialect, default_dialect, try_dialect};

use crate::error::ConfigError;

/// Environment variable naming the default dialect.
pub const LANGUAGE_VAR: &str = "GHERKIN_CST_LANGUAGE";
/// Environment variable naming the path recorded on parsed trees.
pub const PATH_VAR: &str = "GHERKIN_CST_PATH";

/// Options controlling a parse.
///
/// # Environment Variables
///
/// - `GHERKIN_CST_LANGUAGE`: dialect used when a document has no
///   `# language:` directive
/// - `GHERKIN_CST_PATH`: path recorded on the tree for diagnostics
///
/// # Examples
///
/// ```
/// use gherkin_cst::ParseOptions;
///
/// let options = ParseOptions::new()
///     .with_default_language("fr")?
///     .with_path("features/guess.feature");
/// assert_eq!(options.default_language(), "fr");
/// # Ok::<(), gherkin_cst::ConfigError>(())
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    dialect: &'static Dialect,
    path: Option<PathBuf>,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            dialect: default_dialect(),
            path: None,
        }
    }
}

impl ParseOptions {
    /// English with no path.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Load options from environment variables.
    ///
    /// Unset or empty variables keep their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Language`] if `GHERKIN_CST_LANGUAGE` names no
    /// bundled dialect.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load options through `lookup`, which maps a variable name to its value.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Language`] if the language value names no
    /// bundled dialect.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|value: &String| !value.trim().is_empty());
        Self::default().apply_overrides(
            value(LANGUAGE_VAR).as_deref().map(str::trim),
            value(PATH_VAR).map(PathBuf::from),
        )
    }

    /// Apply optional overrides, for example from command-line flags.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Language`] if `language` names no bundled
    /// dialect.
    pub fn apply_overrides(
        mut self,
        language: Option<&str>,
        path: Option<PathBuf>,
    ) -> Result<Self, ConfigError> {
        if let Some(code) = language {
            self = self.with_default_language(code)?;
        }
        if let Some(path) = path {
            self.path = Some(path);
        }
        Ok(self)
    }

    /// Use `code` when a document has no language directive.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Language`] if `code` names no bundled dialect.
    pub fn with_default_language(mut self, code: &str) -> Result<Self, ConfigError> {
        self.dialect = try_dialect(code)?;
        Ok(self)
    }

    /// Record `path` on parsed trees.
    #[must_use]
    pub fn with_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.path = Some(path.into());
        self
    }

    /// Dialect used when a document has no language directive.
    #[must_use]
    pub fn default_dialect(&self) -> &'static Dialect {
        self.dialect
    }

    /// Code of the default dialect.
    #[must_use]
    pub fn default_language(&self) -> &'static str {
        self.dialect.code()
    }

    /// Path recorded on parsed trees.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.path.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use gherkin_cst_dialects::DialectError;
    use rstest::rstest;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn defaults_to_english_without_path() {
        let options = ParseOptions::default();
        assert_eq!(options.default_language(), "en");
        assert_eq!(options.path(), None);
    }

    #[test]
    fn reads_variables() {
        let options = ParseOptions::from_lookup(lookup(&[
            (LANGUAGE_VAR, " ht "),
            (PATH_VAR, "features/a.feature"),
        ]));
        let Ok(options) = options else {
            panic!("variables should be accepted");
        };
        assert_eq!(options.default_language(), "ht");
        assert_eq!(options.path(), Some(Path::new("features/a.feature")));
    }

    #[rstest]
    #[case(&[])]
    #[case(&[(LANGUAGE_VAR, ""), (PATH_VAR, "  ")])]
    fn blank_variables_keep_defaults(#[case] vars: &[(&str, &str)]) {
        assert_eq!(ParseOptions::from_lookup(lookup(vars)), Ok(ParseOptions::default()));
    }

    #[test]
    fn rejects_unknown_language() {
        let result = ParseOptions::from_lookup(lookup(&[(LANGUAGE_VAR, "xx")]));
        assert_eq!(
            result,
            Err(ConfigError::Language(DialectError::UnknownLanguage(
                "xx".into()
            )))
        );
    }

    #[test]
    fn overrides_take_precedence() {
        let base = ParseOptions::new().with_path("a.feature");
        let Ok(options) = base.apply_overrides(Some("fr"), Some(PathBuf::from("b.feature"))) else {
            panic!("overrides should be accepted");
        };
        assert_eq!(options.default_language(), "fr");
        assert_eq!(options.path(), Some(Path::new("b.feature")));
    }
}
