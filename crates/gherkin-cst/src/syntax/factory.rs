//! Constructors that assemble well-formed green elements.
//!
//! Every node constructor takes its children by grammatical slot so only
//! shapes the grammar allows can be built. Slot kinds are checked with
//! `debug_assert!` in debug builds.

use std::collections::HashSet;

use super::green::{GreenElement, GreenNode, GreenToken};
use super::kind::SyntaxKind;
use super::trivia::Trivia;
use crate::escape::{DocStringDelimiter, escape_doc_string, escape_table_cell};

/// The slots shared by every section header.
///
/// `Tags` and a name are optional; the keyword and colon are always present,
/// possibly as missing tokens.
#[derive(Debug, Clone)]
pub struct SectionHeader {
    /// Tags above the keyword line.
    pub tags: Option<GreenNode>,
    /// Section keyword.
    pub keyword: GreenToken,
    /// `:` after the keyword.
    pub colon: GreenToken,
    /// Name after the colon, a `LiteralText` node.
    pub name: Option<GreenNode>,
    /// Description lines below the header.
    pub description: Option<GreenNode>,
}

impl SectionHeader {
    fn into_children(self, keywords: &[SyntaxKind]) -> Vec<GreenElement> {
        debug_assert_node(self.tags.as_ref(), SyntaxKind::Tags);
        debug_assert!(
            keywords.contains(&self.keyword.kind()),
            "unexpected section keyword {}",
            self.keyword.kind()
        );
        debug_assert_token(&self.colon, SyntaxKind::ColonToken);
        debug_assert_node(self.name.as_ref(), SyntaxKind::LiteralText);
        debug_assert_node(self.description.as_ref(), SyntaxKind::Description);
        let mut children = Vec::with_capacity(5);
        children.extend(self.tags.map(GreenElement::Node));
        children.push(self.keyword.into());
        children.push(self.colon.into());
        children.extend(self.name.map(GreenElement::Node));
        children.extend(self.description.map(GreenElement::Node));
        children
    }
}

fn debug_assert_token(token: &GreenToken, kind: SyntaxKind) {
    debug_assert!(
        token.kind() == kind,
        "expected {kind}, found {}",
        token.kind()
    );
}

fn debug_assert_node(node: Option<&GreenNode>, kind: SyntaxKind) {
    if let Some(node) = node {
        debug_assert!(node.kind() == kind, "expected {kind}, found {}", node.kind());
    }
}

fn debug_assert_text(node: &GreenNode) {
    debug_assert!(
        matches!(
            node.kind(),
            SyntaxKind::LiteralText | SyntaxKind::InterpolatedText
        ),
        "expected text, found {}",
        node.kind()
    );
}

/// Nodes with at most this many children, all tokens, are deduplicated.
const MAX_INTERNED_CHILDREN: usize = 3;

/// Builds green tokens and nodes.
///
/// Tokens and small token-only nodes are interned, so the repeated `|`,
/// `:` and missing tokens of a document share one allocation each.
///
/// # Examples
///
/// ```
/// use gherkin_cst::{SyntaxFactory, SyntaxKind, Trivia};
///
/// let mut factory = SyntaxFactory::new();
/// let keyword = factory.token(SyntaxKind::GivenKeyword, "Given", vec![], vec![Trivia::whitespace(" ")]);
/// let literal = factory.token(SyntaxKind::LiteralToken, "a cell", vec![], vec![]);
/// let text = factory.literal_text(vec![literal]);
/// let step = factory.step(keyword, text, None);
/// assert_eq!(step.to_string(), "Given a cell");
///
/// let first = factory.missing_token(SyntaxKind::ColonToken);
/// let second = factory.missing_token(SyntaxKind::ColonToken);
/// assert_eq!(first, second);
/// ```
#[derive(Debug, Default)]
pub struct SyntaxFactory {
    tokens: HashSet<GreenToken>,
    nodes: HashSet<GreenNode>,
}

impl SyntaxFactory {
    /// Create a factory with an empty interning table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn intern_token(&mut self, token: GreenToken) -> GreenToken {
        if let Some(existing) = self.tokens.get(&token) {
            return existing.clone();
        }
        self.tokens.insert(token.clone());
        token
    }

    fn node(&mut self, kind: SyntaxKind, children: Vec<GreenElement>) -> GreenNode {
        let internable = children.len() <= MAX_INTERNED_CHILDREN
            && children.iter().all(|child| child.as_token().is_some());
        let node = GreenNode::new(kind, children);
        if !internable {
            return node;
        }
        if let Some(existing) = self.nodes.get(&node) {
            return existing.clone();
        }
        self.nodes.insert(node.clone());
        node
    }

    /// A token whose value equals its text.
    pub fn token(
        &mut self,
        kind: SyntaxKind,
        text: &str,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> GreenToken {
        self.intern_token(GreenToken::new(kind, text, None, leading, trailing))
    }

    /// A literal token whose decoded `value` may differ from its `text`.
    pub fn literal(
        &mut self,
        kind: SyntaxKind,
        text: &str,
        value: &str,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> GreenToken {
        debug_assert!(kind.is_literal(), "{kind} does not carry a value");
        self.intern_token(GreenToken::new(kind, text, Some(value), leading, trailing))
    }

    /// A table cell token whose text escapes `value`.
    pub fn table_literal(&mut self, value: &str) -> GreenToken {
        let text = escape_table_cell(value);
        self.literal(SyntaxKind::TableLiteralToken, &text, value, Vec::new(), Vec::new())
    }

    /// A doc string content token whose text escapes `value` for `delimiter`.
    pub fn doc_string_literal(&mut self, value: &str, delimiter: DocStringDelimiter) -> GreenToken {
        let text = escape_doc_string(value, delimiter);
        self.literal(SyntaxKind::DocStringContentToken, &text, value, Vec::new(), Vec::new())
    }

    /// A missing token of `kind` without trivia, shared per kind.
    pub fn missing_token(&mut self, kind: SyntaxKind) -> GreenToken {
        self.intern_token(GreenToken::missing(kind, Vec::new(), Vec::new()))
    }

    /// A missing token of `kind` carrying trivia.
    pub fn missing_token_with_trivia(
        &mut self,
        kind: SyntaxKind,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> GreenToken {
        self.intern_token(GreenToken::missing(kind, leading, trailing))
    }

    /// The root node: an optional feature followed by end of file.
    #[must_use]
    pub fn document(&mut self, feature: Option<GreenNode>, eof: GreenToken) -> GreenNode {
        debug_assert_node(feature.as_ref(), SyntaxKind::Feature);
        debug_assert_token(&eof, SyntaxKind::EndOfFileToken);
        let mut children: Vec<GreenElement> = feature.into_iter().map(Into::into).collect();
        children.push(eof.into());
        self.node(SyntaxKind::Document, children)
    }

    /// A feature section.
    #[must_use]
    pub fn feature(
        &mut self,
        header: SectionHeader,
        background: Option<GreenNode>,
        scenarios: Vec<GreenNode>,
        rules: Vec<GreenNode>,
    ) -> GreenNode {
        debug_assert_node(background.as_ref(), SyntaxKind::Background);
        let mut children = header.into_children(&[SyntaxKind::FeatureKeyword]);
        children.extend(background.map(GreenElement::Node));
        children.extend(scenarios.into_iter().map(|scenario| {
            debug_assert_node(Some(&scenario), SyntaxKind::Scenario);
            GreenElement::Node(scenario)
        }));
        children.extend(rules.into_iter().map(|rule| {
            debug_assert_node(Some(&rule), SyntaxKind::Rule);
            GreenElement::Node(rule)
        }));
        self.node(SyntaxKind::Feature, children)
    }

    /// A rule section.
    #[must_use]
    pub fn rule(
        &mut self,
        header: SectionHeader,
        background: Option<GreenNode>,
        scenarios: Vec<GreenNode>,
    ) -> GreenNode {
        debug_assert_node(background.as_ref(), SyntaxKind::Background);
        let mut children = header.into_children(&[SyntaxKind::RuleKeyword]);
        children.extend(background.map(GreenElement::Node));
        children.extend(scenarios.into_iter().map(|scenario| {
            debug_assert_node(Some(&scenario), SyntaxKind::Scenario);
            GreenElement::Node(scenario)
        }));
        self.node(SyntaxKind::Rule, children)
    }

    /// A background section. Backgrounds never carry tags.
    #[must_use]
    pub fn background(&mut self, header: SectionHeader, steps: Vec<GreenNode>) -> GreenNode {
        debug_assert!(header.tags.is_none(), "backgrounds cannot be tagged");
        let mut children = header.into_children(&[SyntaxKind::BackgroundKeyword]);
        children.extend(steps.into_iter().map(|step| {
            debug_assert_node(Some(&step), SyntaxKind::Step);
            GreenElement::Node(step)
        }));
        self.node(SyntaxKind::Background, children)
    }

    /// A scenario or scenario outline.
    #[must_use]
    pub fn scenario(
        &mut self,
        header: SectionHeader,
        steps: Vec<GreenNode>,
        examples: Vec<GreenNode>,
    ) -> GreenNode {
        let mut children = header.into_children(&[
            SyntaxKind::ScenarioKeyword,
            SyntaxKind::ScenarioOutlineKeyword,
        ]);
        children.extend(steps.into_iter().map(|step| {
            debug_assert_node(Some(&step), SyntaxKind::Step);
            GreenElement::Node(step)
        }));
        children.extend(examples.into_iter().map(|examples| {
            debug_assert_node(Some(&examples), SyntaxKind::Examples);
            GreenElement::Node(examples)
        }));
        self.node(SyntaxKind::Scenario, children)
    }

    /// An examples section with an optional table.
    #[must_use]
    pub fn examples(&mut self, header: SectionHeader, table: Option<GreenNode>) -> GreenNode {
        debug_assert_node(table.as_ref(), SyntaxKind::Table);
        let mut children = header.into_children(&[SyntaxKind::ExamplesKeyword]);
        children.extend(table.map(GreenElement::Node));
        self.node(SyntaxKind::Examples, children)
    }

    /// Tag tokens collected from one or more tag lines.
    #[must_use]
    pub fn tags(&mut self, tags: Vec<GreenToken>) -> GreenNode {
        debug_assert!(!tags.is_empty(), "tags node needs at least one tag");
        let children = tags
            .into_iter()
            .map(|tag| {
                debug_assert_token(&tag, SyntaxKind::TagToken);
                GreenElement::Token(tag)
            })
            .collect();
        self.node(SyntaxKind::Tags, children)
    }

    /// One description line per literal token.
    #[must_use]
    pub fn description(&mut self, lines: Vec<GreenToken>) -> GreenNode {
        debug_assert!(!lines.is_empty(), "description needs at least one line");
        let children = lines
            .into_iter()
            .map(|line| {
                debug_assert_token(&line, SyntaxKind::LiteralToken);
                GreenElement::Token(line)
            })
            .collect();
        self.node(SyntaxKind::Description, children)
    }

    /// A step: keyword, text and an optional table or doc string argument.
    #[must_use]
    pub fn step(
        &mut self,
        keyword: GreenToken,
        text: GreenNode,
        argument: Option<GreenNode>,
    ) -> GreenNode {
        debug_assert!(keyword.kind().is_step_keyword(), "{} is not a step keyword", keyword.kind());
        debug_assert_text(&text);
        if let Some(argument) = &argument {
            debug_assert!(
                matches!(argument.kind(), SyntaxKind::Table | SyntaxKind::DocString),
                "{} is not a step argument",
                argument.kind()
            );
        }
        let mut children = vec![keyword.into(), text.into()];
        children.extend(argument.map(GreenElement::Node));
        self.node(SyntaxKind::Step, children)
    }

    /// A table of one or more rows.
    #[must_use]
    pub fn table(&mut self, rows: Vec<GreenNode>) -> GreenNode {
        debug_assert!(!rows.is_empty(), "table needs at least one row");
        let children = rows
            .into_iter()
            .map(|row| {
                debug_assert_node(Some(&row), SyntaxKind::TableRow);
                GreenElement::Node(row)
            })
            .collect();
        self.node(SyntaxKind::Table, children)
    }

    /// A table row: the opening bar, then each cell followed by its bar.
    #[must_use]
    pub fn table_row(&mut self, open: GreenToken, cells: Vec<(GreenNode, GreenToken)>) -> GreenNode {
        debug_assert_token(&open, SyntaxKind::VerticalBarToken);
        let mut children = Vec::with_capacity(1 + cells.len() * 2);
        children.push(open.into());
        for (cell, bar) in cells {
            debug_assert_node(Some(&cell), SyntaxKind::TableCell);
            debug_assert_token(&bar, SyntaxKind::VerticalBarToken);
            children.push(cell.into());
            children.push(bar.into());
        }
        self.node(SyntaxKind::TableRow, children)
    }

    /// A table cell holding a `TableLiteralToken` or `InterpolatedText`.
    #[must_use]
    pub fn table_cell(&mut self, content: GreenElement) -> GreenNode {
        debug_assert!(
            matches!(
                content.kind(),
                SyntaxKind::TableLiteralToken | SyntaxKind::InterpolatedText
            ),
            "{} cannot fill a table cell",
            content.kind()
        );
        self.node(SyntaxKind::TableCell, vec![content])
    }

    /// A doc string: delimiters around an optional content type and content.
    #[must_use]
    pub fn doc_string(
        &mut self,
        open: GreenToken,
        content_type: Option<GreenNode>,
        content: Option<GreenNode>,
        close: GreenToken,
    ) -> GreenNode {
        debug_assert_token(&open, SyntaxKind::DocStringDelimiterToken);
        debug_assert_node(content_type.as_ref(), SyntaxKind::DocStringContentType);
        if let Some(content) = &content {
            debug_assert_text(content);
        }
        debug_assert_token(&close, SyntaxKind::DocStringDelimiterToken);
        let mut children = vec![open.into()];
        children.extend(content_type.map(GreenElement::Node));
        children.extend(content.map(GreenElement::Node));
        children.push(close.into());
        self.node(SyntaxKind::DocString, children)
    }

    /// The content type after an opening doc string delimiter.
    #[must_use]
    pub fn doc_string_content_type(&mut self, token: GreenToken) -> GreenNode {
        debug_assert_token(&token, SyntaxKind::DocStringContentTypeToken);
        self.node(SyntaxKind::DocStringContentType, vec![token.into()])
    }

    /// Text made of literal tokens only.
    #[must_use]
    pub fn literal_text(&mut self, tokens: Vec<GreenToken>) -> GreenNode {
        debug_assert!(!tokens.is_empty(), "text needs at least one token");
        let children = tokens
            .into_iter()
            .map(|token| {
                debug_assert!(token.kind().is_literal(), "{} is not literal", token.kind());
                GreenElement::Token(token)
            })
            .collect();
        self.node(SyntaxKind::LiteralText, children)
    }

    /// Text mixing literal tokens and interpolations.
    #[must_use]
    pub fn interpolated_text(&mut self, parts: Vec<GreenElement>) -> GreenNode {
        debug_assert!(!parts.is_empty(), "text needs at least one part");
        for part in &parts {
            debug_assert!(
                part.kind().is_literal() || part.kind() == SyntaxKind::Interpolation,
                "{} cannot appear in text",
                part.kind()
            );
        }
        self.node(SyntaxKind::InterpolatedText, parts)
    }

    /// A `<name>` placeholder.
    #[must_use]
    pub fn interpolation(
        &mut self,
        less_than: GreenToken,
        identifier: GreenToken,
        greater_than: GreenToken,
    ) -> GreenNode {
        debug_assert_token(&less_than, SyntaxKind::LessThanToken);
        debug_assert_token(&identifier, SyntaxKind::IdentifierToken);
        debug_assert_token(&greater_than, SyntaxKind::GreaterThanToken);
        self.node(
            SyntaxKind::Interpolation,
            vec![less_than.into(), identifier.into(), greater_than.into()],
        )
    }
}
