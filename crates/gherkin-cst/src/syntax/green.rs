//! Immutable, position-independent tree storage.
//!
//! Green elements know their kind, text and width but not where they sit in
//! a document, so identical subtrees can be shared. Children live behind
//! `Arc`, which makes the whole tree `Send + Sync` and cheap to clone.

use std::fmt;
use std::sync::Arc;

use super::kind::SyntaxKind;
use super::trivia::{Trivia, trivia_len};

#[derive(PartialEq, Eq, Hash)]
struct GreenTokenData {
    kind: SyntaxKind,
    text: Box<str>,
    value: Option<Box<str>>,
    leading: Vec<Trivia>,
    trailing: Vec<Trivia>,
    missing: bool,
}

/// A token with its leading and trailing trivia.
///
/// `value` differs from `text` only when escapes were decoded, as in table
/// cells and doc strings. A *missing* token has empty text and stands in for
/// a token the grammar required but the source lacked.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenToken(Arc<GreenTokenData>);

impl GreenToken {
    pub(crate) fn new(
        kind: SyntaxKind,
        text: &str,
        value: Option<&str>,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> Self {
        debug_assert!(kind.is_token(), "{kind} is not a token kind");
        let value = value.filter(|value| *value != text).map(Into::into);
        Self(Arc::new(GreenTokenData {
            kind,
            text: text.into(),
            value,
            leading,
            trailing,
            missing: false,
        }))
    }

    pub(crate) fn missing(kind: SyntaxKind, leading: Vec<Trivia>, trailing: Vec<Trivia>) -> Self {
        debug_assert!(kind.is_token(), "{kind} is not a token kind");
        Self(Arc::new(GreenTokenData {
            kind,
            text: "".into(),
            value: None,
            leading,
            trailing,
            missing: true,
        }))
    }

    /// Kind of the token.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Source text of the token, excluding trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.0.text
    }

    /// Semantic value: the decoded text where escapes apply, else the text.
    #[must_use]
    pub fn value(&self) -> &str {
        self.0.value.as_deref().unwrap_or(&self.0.text)
    }

    /// Whether the value differs from the source text.
    #[must_use]
    pub fn has_decoded_value(&self) -> bool {
        self.0.value.is_some()
    }

    /// Trivia preceding the token.
    #[must_use]
    pub fn leading_trivia(&self) -> &[Trivia] {
        &self.0.leading
    }

    /// Trivia following the token.
    #[must_use]
    pub fn trailing_trivia(&self) -> &[Trivia] {
        &self.0.trailing
    }

    /// Whether the token was synthesised by error recovery.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.0.missing
    }

    /// Byte width of the text.
    #[must_use]
    pub fn width(&self) -> usize {
        self.0.text.len()
    }

    /// Byte width of the leading trivia.
    #[must_use]
    pub fn leading_width(&self) -> usize {
        trivia_len(&self.0.leading)
    }

    /// Byte width of the trailing trivia.
    #[must_use]
    pub fn trailing_width(&self) -> usize {
        trivia_len(&self.0.trailing)
    }

    /// Byte width of the text and all trivia.
    #[must_use]
    pub fn full_width(&self) -> usize {
        self.leading_width() + self.width() + self.trailing_width()
    }

    /// Append trivia, text and trailing trivia to `out`.
    pub fn write_to(&self, out: &mut String) {
        for trivia in &self.0.leading {
            out.push_str(trivia.text());
        }
        out.push_str(&self.0.text);
        for trivia in &self.0.trailing {
            out.push_str(trivia.text());
        }
    }
}

impl fmt::Debug for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_missing() {
            write!(f, "{:?} (missing)", self.kind())
        } else {
            write!(f, "{:?} {:?}", self.kind(), self.text())
        }
    }
}

impl fmt::Display for GreenToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.full_width());
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

#[derive(PartialEq, Eq, Hash)]
struct GreenNodeData {
    kind: SyntaxKind,
    children: Vec<GreenElement>,
    full_width: usize,
}

/// An interior node owning its children in source order.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GreenNode(Arc<GreenNodeData>);

impl GreenNode {
    pub(crate) fn new(kind: SyntaxKind, children: Vec<GreenElement>) -> Self {
        debug_assert!(kind.is_node(), "{kind} is not a node kind");
        let full_width = children.iter().map(GreenElement::full_width).sum();
        Self(Arc::new(GreenNodeData {
            kind,
            children,
            full_width,
        }))
    }

    /// Kind of the node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.0.kind
    }

    /// Children in source order.
    #[must_use]
    pub fn children(&self) -> &[GreenElement] {
        &self.0.children
    }

    /// Byte width of every descendant token including trivia.
    #[must_use]
    pub fn full_width(&self) -> usize {
        self.0.full_width
    }

    /// Append the full text of the subtree to `out`.
    pub fn write_to(&self, out: &mut String) {
        for child in &self.0.children {
            match child {
                GreenElement::Node(node) => node.write_to(out),
                GreenElement::Token(token) => token.write_to(out),
            }
        }
    }
}

impl fmt::Debug for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GreenNode")
            .field("kind", &self.kind())
            .field("full_width", &self.full_width())
            .field("children", &self.children())
            .finish()
    }
}

impl fmt::Display for GreenNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut out = String::with_capacity(self.full_width());
        self.write_to(&mut out);
        f.write_str(&out)
    }
}

/// Either a green node or a green token.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum GreenElement {
    /// An interior node.
    Node(GreenNode),
    /// A leaf token.
    Token(GreenToken),
}

impl GreenElement {
    /// Kind of the element.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    /// Byte width including trivia.
    #[must_use]
    pub fn full_width(&self) -> usize {
        match self {
            Self::Node(node) => node.full_width(),
            Self::Token(token) => token.full_width(),
        }
    }

    /// The node, if the element is one.
    #[must_use]
    pub fn as_node(&self) -> Option<&GreenNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// The token, if the element is one.
    #[must_use]
    pub fn as_token(&self) -> Option<&GreenToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

impl From<GreenNode> for GreenElement {
    fn from(node: GreenNode) -> Self {
        Self::Node(node)
    }
}

impl From<GreenToken> for GreenElement {
    fn from(token: GreenToken) -> Self {
        Self::Token(token)
    }
}
