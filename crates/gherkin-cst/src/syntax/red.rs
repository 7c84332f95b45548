//! Positioned, navigable views over green trees.
//!
//! A [`SyntaxNode`] pairs a green node with its parent and absolute offset.
//! Red nodes are created on demand while walking the tree and are cheap to
//! clone.

use std::fmt;
use std::sync::Arc;

use gherkin_cst_dialects::KeywordRole;

use super::green::{GreenElement, GreenNode, GreenToken};
use super::kind::SyntaxKind;
use super::trivia::Trivia;
use crate::text::Span;

struct NodeData {
    green: GreenNode,
    parent: Option<SyntaxNode>,
    index: usize,
    offset: usize,
}

/// A node positioned within a tree.
#[derive(Clone)]
pub struct SyntaxNode(Arc<NodeData>);

impl SyntaxNode {
    /// Make `green` the root of a tree starting at offset zero.
    #[must_use]
    pub fn new_root(green: GreenNode) -> Self {
        Self(Arc::new(NodeData {
            green,
            parent: None,
            index: 0,
            offset: 0,
        }))
    }

    fn new_child(green: GreenNode, parent: Self, index: usize, offset: usize) -> Self {
        Self(Arc::new(NodeData {
            green,
            parent: Some(parent),
            index,
            offset,
        }))
    }

    /// Kind of the node.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.0.green.kind()
    }

    /// Underlying green node.
    #[must_use]
    pub fn green(&self) -> &GreenNode {
        &self.0.green
    }

    /// Parent node, `None` for the root.
    #[must_use]
    pub fn parent(&self) -> Option<Self> {
        self.0.parent.clone()
    }

    /// Position among the parent's children.
    #[must_use]
    pub fn index(&self) -> usize {
        self.0.index
    }

    /// Iterate from this node's parent up to the root.
    pub fn ancestors(&self) -> impl Iterator<Item = Self> {
        std::iter::successors(self.parent(), Self::parent)
    }

    /// Span including the leading trivia of the first token and the trailing
    /// trivia of the last.
    #[must_use]
    pub fn full_span(&self) -> Span {
        Span::new(self.0.offset, self.0.offset + self.0.green.full_width())
    }

    /// Span excluding the outer trivia.
    #[must_use]
    pub fn span(&self) -> Span {
        let full = self.full_span();
        let start = self.first_token().map_or(full.start(), |t| t.span().start());
        let end = self.last_token().map_or(full.end(), |t| t.span().end());
        Span::new(start, end.max(start))
    }

    /// Text of the node without its outer trivia.
    #[must_use]
    pub fn text(&self) -> String {
        let full = self.full_text();
        let span = self.span();
        let start = span.start() - self.0.offset;
        full.get(start..start + span.len())
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Text of the node including every trivia piece.
    #[must_use]
    pub fn full_text(&self) -> String {
        self.0.green.to_string()
    }

    /// Children in source order.
    pub fn children(&self) -> impl Iterator<Item = SyntaxElement> + '_ {
        let mut offset = self.0.offset;
        self.0
            .green
            .children()
            .iter()
            .enumerate()
            .map(move |(index, child)| {
                let start = offset;
                offset += child.full_width();
                match child {
                    GreenElement::Node(node) => SyntaxElement::Node(Self::new_child(
                        node.clone(),
                        self.clone(),
                        index,
                        start,
                    )),
                    GreenElement::Token(token) => SyntaxElement::Token(SyntaxToken {
                        green: token.clone(),
                        parent: self.clone(),
                        index,
                        offset: start,
                    }),
                }
            })
    }

    /// Child nodes in source order.
    pub fn child_nodes(&self) -> impl Iterator<Item = Self> + '_ {
        self.children().filter_map(SyntaxElement::into_node)
    }

    /// Child tokens in source order.
    pub fn child_tokens(&self) -> impl Iterator<Item = SyntaxToken> + '_ {
        self.children().filter_map(SyntaxElement::into_token)
    }

    /// First child node of `kind`.
    #[must_use]
    pub fn child_node(&self, kind: SyntaxKind) -> Option<Self> {
        self.child_nodes().find(|node| node.kind() == kind)
    }

    /// First child token of `kind`.
    #[must_use]
    pub fn child_token(&self, kind: SyntaxKind) -> Option<SyntaxToken> {
        self.child_tokens().find(|token| token.kind() == kind)
    }

    /// This node and every descendant node in preorder.
    #[must_use]
    pub fn descendants(&self) -> Descendants {
        Descendants {
            stack: vec![self.clone()],
        }
    }

    /// Every token of the subtree in source order.
    #[must_use]
    pub fn descendant_tokens(&self) -> Tokens {
        Tokens {
            stack: vec![SyntaxElement::Node(self.clone())],
        }
    }

    /// First token of the subtree.
    #[must_use]
    pub fn first_token(&self) -> Option<SyntaxToken> {
        match self.children().next()? {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.first_token(),
        }
    }

    /// Last token of the subtree.
    #[must_use]
    pub fn last_token(&self) -> Option<SyntaxToken> {
        let last = self.0.green.children().len().checked_sub(1)?;
        match self.children().nth(last)? {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.last_token(),
        }
    }

    /// Token whose full span contains `offset`.
    ///
    /// The end of the document resolves to its last token.
    #[must_use]
    pub fn token_at_offset(&self, offset: usize) -> Option<SyntaxToken> {
        let full = self.full_span();
        if offset == full.end() {
            return self.last_token();
        }
        if !full.contains(offset) {
            return None;
        }
        let child = self.children().find(|child| {
            let span = child.full_span();
            span.contains(offset)
        })?;
        match child {
            SyntaxElement::Token(token) => Some(token),
            SyntaxElement::Node(node) => node.token_at_offset(offset),
        }
    }

    /// Deepest node whose span covers `span`.
    #[must_use]
    pub fn covering_node(&self, span: Span) -> Self {
        self.child_nodes()
            .find(|child| child.full_span().contains_span(span) && !child.full_span().is_empty())
            .map_or_else(|| self.clone(), |child| child.covering_node(span))
    }

    /// Indented outline of the subtree, one element per line.
    ///
    /// Nodes print as `Kind@start..end`, tokens add their text and trivia.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst::SyntaxTree;
    ///
    /// let tree = SyntaxTree::parse_text("Feature: x\n");
    /// let dump = tree.root().debug_dump();
    /// assert!(dump.starts_with("Document@0..11\n  Feature@0..11\n"));
    /// assert!(dump.contains("FeatureKeyword@0..7 \"Feature\""));
    /// ```
    #[must_use]
    pub fn debug_dump(&self) -> String {
        Dump(self).to_string()
    }

    fn dump_into(&self, f: &mut fmt::Formatter<'_>, depth: usize) -> fmt::Result {
        let indent = "  ".repeat(depth);
        writeln!(f, "{indent}{:?}@{}", self.kind(), self.full_span())?;
        for child in self.children() {
            match child {
                SyntaxElement::Node(node) => node.dump_into(f, depth + 1)?,
                SyntaxElement::Token(token) => writeln!(f, "{indent}  {token:?}")?,
            }
        }
        Ok(())
    }
}

/// Indented rendering of a subtree, one element per line.
struct Dump<'a>(&'a SyntaxNode);

impl fmt::Display for Dump<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.dump_into(f, 0)
    }
}

impl PartialEq for SyntaxNode {
    fn eq(&self, other: &Self) -> bool {
        self.0.offset == other.0.offset && self.0.green == other.0.green
    }
}

impl Eq for SyntaxNode {}

impl fmt::Debug for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.full_span())
    }
}

impl fmt::Display for SyntaxNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0.green, f)
    }
}

/// A token positioned within a tree.
#[derive(Clone)]
pub struct SyntaxToken {
    green: GreenToken,
    parent: SyntaxNode,
    index: usize,
    offset: usize,
}

impl SyntaxToken {
    /// Kind of the token.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        self.green.kind()
    }

    /// Underlying green token.
    #[must_use]
    pub fn green(&self) -> &GreenToken {
        &self.green
    }

    /// Node owning the token.
    #[must_use]
    pub fn parent(&self) -> SyntaxNode {
        self.parent.clone()
    }

    /// Position among the parent's children.
    #[must_use]
    pub fn index(&self) -> usize {
        self.index
    }

    /// Source text, excluding trivia.
    #[must_use]
    pub fn text(&self) -> &str {
        self.green.text()
    }

    /// Decoded value; equal to the text unless escapes were decoded.
    #[must_use]
    pub fn value(&self) -> &str {
        self.green.value()
    }

    /// Whether the token was synthesised by error recovery.
    #[must_use]
    pub fn is_missing(&self) -> bool {
        self.green.is_missing()
    }

    /// Grammar role of a keyword token.
    #[must_use]
    pub fn keyword_role(&self) -> Option<KeywordRole> {
        self.kind().keyword_role()
    }

    /// Trivia before the token.
    #[must_use]
    pub fn leading_trivia(&self) -> &[Trivia] {
        self.green.leading_trivia()
    }

    /// Trivia after the token.
    #[must_use]
    pub fn trailing_trivia(&self) -> &[Trivia] {
        self.green.trailing_trivia()
    }

    /// Span of the text alone.
    #[must_use]
    pub fn span(&self) -> Span {
        let start = self.offset + self.green.leading_width();
        Span::new(start, start + self.green.width())
    }

    /// Span of the text and its trivia.
    #[must_use]
    pub fn full_span(&self) -> Span {
        Span::new(self.offset, self.offset + self.green.full_width())
    }

    /// Spans of each leading trivia piece.
    #[must_use]
    pub fn leading_trivia_spans(&self) -> Vec<(Span, &Trivia)> {
        trivia_spans(self.offset, self.leading_trivia())
    }

    /// Spans of each trailing trivia piece.
    #[must_use]
    pub fn trailing_trivia_spans(&self) -> Vec<(Span, &Trivia)> {
        trivia_spans(self.span().end(), self.trailing_trivia())
    }
}

fn trivia_spans(start: usize, trivia: &[Trivia]) -> Vec<(Span, &Trivia)> {
    let mut offset = start;
    trivia
        .iter()
        .map(|piece| {
            let span = Span::new(offset, offset + piece.text_len());
            offset = span.end();
            (span, piece)
        })
        .collect()
}

impl PartialEq for SyntaxToken {
    fn eq(&self, other: &Self) -> bool {
        self.offset == other.offset && self.green == other.green
    }
}

impl Eq for SyntaxToken {}

impl fmt::Debug for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}@{}", self.kind(), self.span())?;
        if self.is_missing() {
            f.write_str(" (missing)")?;
        } else {
            write!(f, " {:?}", self.text())?;
        }
        for trivia in self.leading_trivia() {
            write!(f, " <{trivia:?}")?;
        }
        for trivia in self.trailing_trivia() {
            write!(f, " >{trivia:?}")?;
        }
        Ok(())
    }
}

impl fmt::Display for SyntaxToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.text())
    }
}

/// Either a node or a token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SyntaxElement {
    /// An interior node.
    Node(SyntaxNode),
    /// A leaf token.
    Token(SyntaxToken),
}

impl SyntaxElement {
    /// Kind of the element.
    #[must_use]
    pub fn kind(&self) -> SyntaxKind {
        match self {
            Self::Node(node) => node.kind(),
            Self::Token(token) => token.kind(),
        }
    }

    /// Span including trivia.
    #[must_use]
    pub fn full_span(&self) -> Span {
        match self {
            Self::Node(node) => node.full_span(),
            Self::Token(token) => token.full_span(),
        }
    }

    /// Span excluding outer trivia.
    #[must_use]
    pub fn span(&self) -> Span {
        match self {
            Self::Node(node) => node.span(),
            Self::Token(token) => token.span(),
        }
    }

    /// The node, if the element is one.
    #[must_use]
    pub fn into_node(self) -> Option<SyntaxNode> {
        match self {
            Self::Node(node) => Some(node),
            Self::Token(_) => None,
        }
    }

    /// The token, if the element is one.
    #[must_use]
    pub fn into_token(self) -> Option<SyntaxToken> {
        match self {
            Self::Token(token) => Some(token),
            Self::Node(_) => None,
        }
    }
}

/// Preorder iterator over a node and its descendant nodes.
#[derive(Debug, Clone)]
pub struct Descendants {
    stack: Vec<SyntaxNode>,
}

impl Iterator for Descendants {
    type Item = SyntaxNode;

    fn next(&mut self) -> Option<Self::Item> {
        let node = self.stack.pop()?;
        let children: Vec<_> = node.child_nodes().collect();
        self.stack.extend(children.into_iter().rev());
        Some(node)
    }
}

/// Iterator over the tokens of a subtree in source order.
#[derive(Debug, Clone)]
pub struct Tokens {
    stack: Vec<SyntaxElement>,
}

impl Iterator for Tokens {
    type Item = SyntaxToken;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            match self.stack.pop()? {
                SyntaxElement::Token(token) => return Some(token),
                SyntaxElement::Node(node) => {
                    let children: Vec<_> = node.children().collect();
                    self.stack.extend(children.into_iter().rev());
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::syntax::trivia::Trivia;

    fn token(kind: SyntaxKind, text: &str, leading: Vec<Trivia>, trailing: Vec<Trivia>) -> GreenElement {
        GreenToken::new(kind, text, None, leading, trailing).into()
    }

    fn sample() -> SyntaxNode {
        // "# c\nFeature: x\n"
        let name = GreenNode::new(
            SyntaxKind::LiteralText,
            vec![token(
                SyntaxKind::LiteralToken,
                "x",
                vec![],
                vec![Trivia::newline("\n")],
            )],
        );
        let feature = GreenNode::new(
            SyntaxKind::Feature,
            vec![
                token(
                    SyntaxKind::FeatureKeyword,
                    "Feature",
                    vec![Trivia::comment("# c"), Trivia::newline("\n")],
                    vec![],
                ),
                token(
                    SyntaxKind::ColonToken,
                    ":",
                    vec![],
                    vec![Trivia::whitespace(" ")],
                ),
                name.into(),
            ],
        );
        let eof = token(SyntaxKind::EndOfFileToken, "", vec![], vec![]);
        SyntaxNode::new_root(GreenNode::new(
            SyntaxKind::Document,
            vec![feature.into(), eof],
        ))
    }

    #[test]
    fn spans_exclude_outer_trivia() {
        let root = sample();
        let Some(feature) = root.child_node(SyntaxKind::Feature) else {
            panic!("feature node expected");
        };
        assert_eq!(feature.full_span(), Span::new(0, 15));
        assert_eq!(feature.span(), Span::new(4, 14));
        assert_eq!(feature.text(), "Feature: x");
    }

    #[test]
    fn tokens_follow_source_order() {
        let kinds: Vec<_> = sample().descendant_tokens().map(|t| t.kind()).collect();
        assert_eq!(
            kinds,
            vec![
                SyntaxKind::FeatureKeyword,
                SyntaxKind::ColonToken,
                SyntaxKind::LiteralToken,
                SyntaxKind::EndOfFileToken,
            ]
        );
    }

    #[test]
    fn descendants_are_preorder() {
        let kinds: Vec<_> = sample().descendants().map(|n| n.kind()).collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::Document, SyntaxKind::Feature, SyntaxKind::LiteralText]
        );
    }

    #[test]
    fn ancestors_reach_root() {
        let Some(token) = sample().token_at_offset(13) else {
            panic!("token expected at offset 13");
        };
        assert_eq!(token.kind(), SyntaxKind::LiteralToken);
        let kinds: Vec<_> = std::iter::once(token.parent())
            .chain(token.parent().ancestors())
            .map(|n| n.kind())
            .collect();
        assert_eq!(
            kinds,
            vec![SyntaxKind::LiteralText, SyntaxKind::Feature, SyntaxKind::Document]
        );
    }

    #[test]
    fn leading_trivia_resolves_to_its_token() {
        let Some(token) = sample().token_at_offset(1) else {
            panic!("token expected at offset 1");
        };
        assert_eq!(token.kind(), SyntaxKind::FeatureKeyword);
        let spans: Vec<_> = token
            .leading_trivia_spans()
            .into_iter()
            .map(|(span, _)| span)
            .collect();
        assert_eq!(spans, vec![Span::new(0, 3), Span::new(3, 4)]);
    }

    #[test]
    fn end_offset_resolves_to_last_token() {
        let root = sample();
        let last = root.token_at_offset(root.full_span().end());
        assert_eq!(last.map(|t| t.kind()), Some(SyntaxKind::EndOfFileToken));
        assert!(root.token_at_offset(99).is_none());
    }

    #[test]
    fn dump_indents_children_under_their_node() {
        let dump = sample().debug_dump();
        let lines: Vec<_> = dump.lines().collect();
        assert_eq!(lines.len(), 7);
        assert_eq!(lines.first(), Some(&"Document@0..15"));
        assert_eq!(lines.get(1), Some(&"  Feature@0..15"));
        assert!(lines.get(2).is_some_and(|line| line.starts_with("    FeatureKeyword@4..11 \"Feature\"")));
        assert_eq!(lines.get(4), Some(&"    LiteralText@13..15"));
        assert!(lines.get(5).is_some_and(|line| line.starts_with("      LiteralToken@13..14 \"x\"")));
        assert!(lines.last().is_some_and(|line| line.starts_with("  EndOfFileToken@15..15")));
        assert!(dump.ends_with('\n'));
    }

    #[test]
    fn covering_node_descends() {
        let root = sample();
        assert_eq!(root.covering_node(Span::new(13, 14)).kind(), SyntaxKind::LiteralText);
        assert_eq!(root.covering_node(Span::new(4, 14)).kind(), SyntaxKind::Feature);
    }
}
