//! Typed views over syntax nodes.
//!
//! Each view wraps a [`SyntaxNode`] of one kind and exposes the decoded
//! content of its children. Views never own data beyond the node handle;
//! accessors walk the tree on demand.

mod section;
mod step;

use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

pub use section::{Background, Document, Examples, Feature, Rule, Scenario, Section};
pub use step::{DocString, Step, Table, TableCell, TableRow};

/// A typed view over a node of a known kind.
pub trait AstNode: Sized {
    /// Whether nodes of `kind` can be viewed as `Self`.
    fn can_cast(kind: SyntaxKind) -> bool;

    /// View `node` as `Self` if its kind fits.
    fn cast(node: SyntaxNode) -> Option<Self>;

    /// The underlying node.
    fn syntax(&self) -> &SyntaxNode;
}

macro_rules! ast_node {
    ($(#[$meta:meta])* $name:ident, $($kind:ident)|+) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq)]
        pub struct $name(SyntaxNode);

        impl AstNode for $name {
            fn can_cast(kind: SyntaxKind) -> bool {
                matches!(kind, $(SyntaxKind::$kind)|+)
            }

            fn cast(node: SyntaxNode) -> Option<Self> {
                Self::can_cast(node.kind()).then_some(Self(node))
            }

            fn syntax(&self) -> &SyntaxNode {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                std::fmt::Display::fmt(&self.0, f)
            }
        }
    };
}

pub(crate) use ast_node;

/// Child nodes of `node` viewed as `N`.
pub(crate) fn children<'a, N: AstNode + 'a>(
    node: &'a SyntaxNode,
) -> impl Iterator<Item = N> + 'a {
    node.child_nodes().filter_map(N::cast)
}

/// First child node of `node` viewed as `N`.
pub(crate) fn child<N: AstNode>(node: &SyntaxNode) -> Option<N> {
    children(node).next()
}

ast_node!(
    /// Free text: a name, step text, cell text or doc string content.
    Text,
    LiteralText | InterpolatedText
);

impl Text {
    /// Whether the text contains placeholders.
    #[must_use]
    pub fn is_interpolated(&self) -> bool {
        self.0.kind() == SyntaxKind::InterpolatedText
    }

    /// Decoded text with placeholders written as `<name>`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst::SyntaxTree;
    ///
    /// let tree = SyntaxTree::parse_text("Feature: f\n  Scenario Outline: s\n    Given <n> items\n");
    /// let feature = tree.document().feature().unwrap();
    /// let step = feature.scenarios().next().unwrap().steps().next().unwrap();
    /// assert_eq!(step.text(), "<n> items");
    /// assert_eq!(step.placeholders(), vec!["n"]);
    /// ```
    #[must_use]
    pub fn value(&self) -> String {
        let mut value = String::new();
        for token in self.0.descendant_tokens() {
            match token.kind() {
                SyntaxKind::LessThanToken | SyntaxKind::GreaterThanToken | SyntaxKind::IdentifierToken => {
                    value.push_str(token.text());
                }
                _ => value.push_str(token.value()),
            }
        }
        value
    }

    /// Names of the placeholders in source order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        self.0
            .descendant_tokens()
            .filter(|token| token.kind() == SyntaxKind::IdentifierToken)
            .map(|token| token.text().to_owned())
            .collect()
    }

    /// Whether the text is a missing token standing in for absent text.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.0.descendant_tokens().all(|token| token.is_missing())
    }
}

ast_node!(
    /// Tags above a section.
    Tags,
    Tags
);

impl Tags {
    /// Tag tokens in source order.
    pub fn tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.0.child_tokens()
    }

    /// Tag names without the leading `@`.
    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.tokens()
            .map(|tag| {
                let text = tag.text();
                text.strip_prefix('@').unwrap_or(text).to_owned()
            })
            .collect()
    }
}

ast_node!(
    /// Description lines below a section header.
    Description,
    Description
);

impl Description {
    /// Each line without indentation or trailing whitespace.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.0
            .child_tokens()
            .map(|line| line.value().to_owned())
            .collect()
    }
}
