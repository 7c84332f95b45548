//! Diagnostics recorded while lexing and parsing.
//!
//! Parsing never fails; problems are collected as [`Diagnostic`] values
//! attached to the tree and ordered by position.

use std::fmt;

use crate::syntax::SyntaxKind;
use crate::text::Span;

/// How serious a diagnostic is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// The document does not conform to the grammar.
    Error,
    /// The document parses but something was ignored.
    Warning,
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Error => "error",
            Self::Warning => "warning",
        })
    }
}

/// What went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(tag = "type", rename_all = "snake_case"))]
pub enum DiagnosticKind {
    /// A required token was absent and a missing token stands in for it.
    MissingToken {
        /// Kind of the synthesised token.
        expected: SyntaxKind,
    },
    /// Source text did not fit the grammar and was kept as skipped trivia.
    UnexpectedContent {
        /// Short description of what was found.
        found: String,
    },
    /// A language directive named a dialect that is not bundled.
    UnknownLanguage {
        /// The code from the directive.
        code: String,
    },
}

impl DiagnosticKind {
    /// Stable code identifying the kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::MissingToken { .. } => "GHK1001",
            Self::UnexpectedContent { .. } => "GHK1002",
            Self::UnknownLanguage { .. } => "GHK1003",
        }
    }

    /// Default severity of the kind.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        match self {
            Self::MissingToken { .. } | Self::UnexpectedContent { .. } => Severity::Error,
            Self::UnknownLanguage { .. } => Severity::Warning,
        }
    }
}

impl fmt::Display for DiagnosticKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingToken { expected } => write!(f, "expected {}", expected.describe()),
            Self::UnexpectedContent { found } => write!(f, "unexpected {found}"),
            Self::UnknownLanguage { code } => {
                write!(f, "unknown language `{code}`, keeping the current dialect")
            }
        }
    }
}

/// A problem found in a document, located by byte span.
///
/// # Examples
///
/// ```
/// use gherkin_cst::{Diagnostic, Severity, Span, SyntaxKind};
///
/// let diagnostic = Diagnostic::missing_token(12, SyntaxKind::VerticalBarToken);
/// assert_eq!(diagnostic.span(), Span::empty(12));
/// assert_eq!(diagnostic.severity(), Severity::Error);
/// assert_eq!(diagnostic.to_string(), "error[GHK1001]: expected `|` at 12..12");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Diagnostic {
    span: Span,
    severity: Severity,
    #[cfg_attr(feature = "serde", serde(flatten))]
    kind: DiagnosticKind,
}

impl Diagnostic {
    /// Create a diagnostic with the kind's default severity.
    #[must_use]
    pub fn new(span: Span, kind: DiagnosticKind) -> Self {
        Self {
            span,
            severity: kind.severity(),
            kind,
        }
    }

    /// A missing token of `expected` at `offset`.
    #[must_use]
    pub fn missing_token(offset: usize, expected: SyntaxKind) -> Self {
        Self::new(Span::empty(offset), DiagnosticKind::MissingToken { expected })
    }

    /// Unexpected content over `span`.
    #[must_use]
    pub fn unexpected_content(span: Span, found: impl Into<String>) -> Self {
        Self::new(
            span,
            DiagnosticKind::UnexpectedContent {
                found: found.into(),
            },
        )
    }

    /// An unknown language code in the directive over `span`.
    #[must_use]
    pub fn unknown_language(span: Span, code: impl Into<String>) -> Self {
        Self::new(span, DiagnosticKind::UnknownLanguage { code: code.into() })
    }

    /// Source span the diagnostic refers to.
    #[must_use]
    pub const fn span(&self) -> Span {
        self.span
    }

    /// Severity.
    #[must_use]
    pub const fn severity(&self) -> Severity {
        self.severity
    }

    /// What went wrong.
    #[must_use]
    pub const fn kind(&self) -> &DiagnosticKind {
        &self.kind
    }

    /// Stable code of the kind.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        self.kind.code()
    }

    /// Whether the diagnostic is an error.
    #[must_use]
    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Human-readable message without location.
    #[must_use]
    pub fn message(&self) -> String {
        self.kind.to_string()
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}[{}]: {} at {}",
            self.severity,
            self.code(),
            self.kind,
            self.span
        )
    }
}

/// Order diagnostics by position, keeping discovery order for ties.
pub(crate) fn sort_by_position(diagnostics: &mut [Diagnostic]) {
    diagnostics.sort_by_key(|diagnostic| (diagnostic.span.start(), diagnostic.span.end()));
}
