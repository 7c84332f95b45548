//! The parsed tree and the entry points that build it.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use gherkin_cst_dialects::Dialect;
use log::debug;

use crate::ast::Document;
use crate::diagnostics::Diagnostic;
use crate::error::ParseError;
use crate::options::ParseOptions;
use crate::parser;
use crate::syntax::{GreenNode, SyntaxNode};
use crate::text::{LineSpan, SourceText, Span};

struct TreeData {
    source: SourceText,
    green: GreenNode,
    diagnostics: Vec<Diagnostic>,
    options: ParseOptions,
    dialect: &'static Dialect,
}

/// An immutable, lossless syntax tree for one feature file.
///
/// Rendering the tree with [`Display`](fmt::Display) reproduces the source
/// exactly. Syntax errors never prevent a tree from being built; they are
/// reported by [`diagnostics`](Self::diagnostics). Cloning is cheap and the
/// tree can be shared across threads.
///
/// # Examples
///
/// ```
/// use gherkin_cst::SyntaxTree;
/// use gherkin_cst::ast::Section;
///
/// let source = "Feature: Guess the word\n\n  Scenario: Maker starts\n    Given a game\n";
/// let tree = SyntaxTree::parse_text(source);
/// assert_eq!(tree.to_string(), source);
/// assert!(!tree.has_errors());
///
/// let feature = tree.document().feature().unwrap();
/// assert_eq!(feature.name().as_deref(), Some("Guess the word"));
/// ```
#[derive(Clone)]
pub struct SyntaxTree(Arc<TreeData>);

impl SyntaxTree {
    /// Parse `source` with default options.
    #[must_use]
    pub fn parse_text(source: &str) -> Self {
        Self::parse_text_with(source, &ParseOptions::default())
    }

    /// Parse `source` with `options`.
    ///
    /// A `# language:` directive in the document header overrides the
    /// configured default dialect.
    #[must_use]
    pub fn parse_text_with(source: &str, options: &ParseOptions) -> Self {
        if let Some(path) = options.path() {
            debug!("parsing {}", path.display());
        }
        let parsed = parser::parse(source, options.default_dialect());
        Self(Arc::new(TreeData {
            source: SourceText::new(source),
            green: parsed.green,
            diagnostics: parsed.diagnostics,
            options: options.clone(),
            dialect: parsed.dialect,
        }))
    }

    /// Parse UTF-8 encoded `bytes` with `options`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::InvalidUtf8`] when `bytes` are not UTF-8.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst::{ParseError, ParseOptions, SyntaxTree};
    ///
    /// let err = SyntaxTree::parse_bytes(b"Feature: \xff\n", &ParseOptions::default());
    /// assert!(matches!(err, Err(ParseError::InvalidUtf8(_))));
    /// ```
    pub fn parse_bytes(bytes: &[u8], options: &ParseOptions) -> Result<Self, ParseError> {
        let source = std::str::from_utf8(bytes)?;
        Ok(Self::parse_text_with(source, options))
    }

    /// The root node.
    #[must_use]
    pub fn root(&self) -> SyntaxNode {
        SyntaxNode::new_root(self.0.green.clone())
    }

    /// Typed view of the root.
    #[must_use]
    pub fn document(&self) -> Document {
        Document::new(self.root())
    }

    /// The position-free green root.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    /// Diagnostics ordered by position.
    #[must_use]
    pub fn diagnostics(&self) -> &[Diagnostic] {
        &self.0.diagnostics
    }

    /// Whether any diagnostic is an error.
    #[must_use]
    pub fn has_errors(&self) -> bool {
        self.0.diagnostics.iter().any(Diagnostic::is_error)
    }

    /// Diagnostics that fall within the text of `node`.
    pub fn diagnostics_in<'a>(&'a self, node: &SyntaxNode) -> impl Iterator<Item = &'a Diagnostic> {
        let span = node.span();
        self.0
            .diagnostics
            .iter()
            .filter(move |diagnostic| span.contains_span(diagnostic.span()))
    }

    /// Options the tree was parsed with.
    #[must_use]
    pub fn options(&self) -> &ParseOptions {
        &self.0.options
    }

    /// Path recorded in the options.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        self.0.options.path()
    }

    /// Dialect in effect for the document.
    #[must_use]
    pub fn dialect(&self) -> &'static Dialect {
        self.0.dialect
    }

    /// The source text.
    #[must_use]
    pub fn source(&self) -> &SourceText {
        &self.0.source
    }

    /// Line and column range of `span`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst::SyntaxTree;
    ///
    /// let tree = SyntaxTree::parse_text("Feature: f\n  Scenario: s\n    Given\n");
    /// let missing = &tree.diagnostics()[0];
    /// assert_eq!(tree.location(missing.span()).start.to_string(), "4:1");
    /// ```
    #[must_use]
    pub fn location(&self, span: Span) -> LineSpan {
        self.0.source.line_span(span)
    }

    /// Diagnostics as a pretty-printed JSON array.
    ///
    /// # Errors
    ///
    /// Returns an error if serialisation fails.
    #[cfg(feature = "serde")]
    pub fn diagnostics_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.0.diagnostics)
    }
}

impl fmt::Display for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.green, f)
    }
}

impl fmt::Debug for SyntaxTree {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SyntaxTree")
            .field("path", &self.path())
            .field("dialect", &self.0.dialect.code())
            .field("diagnostics", &self.0.diagnostics)
            .finish_non_exhaustive()
    }
}
