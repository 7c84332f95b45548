//! Lossless, error-tolerant concrete syntax trees for Gherkin.
//!
//! [`SyntaxTree::parse_text`] turns a feature file into an immutable tree
//! that keeps every byte of the input as token text or trivia, so the tree
//! prints back to exactly the source. Malformed input still yields a tree:
//! absent tokens become missing tokens and each recovery is recorded as a
//! [`Diagnostic`].
//!
//! The tree has two layers. Green nodes ([`GreenNode`], [`GreenToken`]) are
//! shared and position-free; red nodes ([`SyntaxNode`], [`SyntaxToken`]) add
//! parents and offsets on demand. The [`ast`] module offers typed views for
//! consumers that want features, scenarios and steps rather than raw nodes.
//!
//! ```
//! use gherkin_cst::{SyntaxKind, SyntaxTree};
//!
//! let source = "Feature: Guess the word\n  Scenario: Maker starts\n    Given a word\n";
//! let tree = SyntaxTree::parse_text(source);
//! assert_eq!(tree.to_string(), source);
//! assert_eq!(tree.root().kind(), SyntaxKind::Document);
//! ```

pub mod ast;
mod diagnostics;
mod error;
mod escape;
mod lexer;
mod options;
mod parser;
mod syntax;
mod text;
mod tree;

pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use error::{ConfigError, ParseError};
pub use escape::{
    DocStringDelimiter, escape_doc_string, escape_table_cell, unescape_doc_string,
    unescape_table_cell,
};
pub use options::{LANGUAGE_VAR, PATH_VAR, ParseOptions};
pub use syntax::{
    Descendants, GreenElement, GreenNode, GreenToken, SectionHeader, SyntaxElement,
    SyntaxFactory, SyntaxKind, SyntaxNode, SyntaxToken, Tokens, Trivia, TriviaKind,
};
pub use text::{LinePosition, LineSpan, SourceText, Span};
pub use tree::SyntaxTree;
