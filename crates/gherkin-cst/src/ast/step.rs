use gherkin_cst_dialects::KeywordRole;

use super::{AstNode, Text, ast_node, child, children};
use crate::escape::DocStringDelimiter;
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

ast_node!(
    /// A step with its keyword, text and optional argument.
    Step,
    Step
);

impl Step {
    /// The step keyword.
    #[must_use]
    pub fn keyword(&self) -> Option<SyntaxToken> {
        self.0.first_token().filter(|token| token.kind().is_step_keyword())
    }

    /// Role of the keyword as written; `And`, `But` and `*` stay as they are.
    #[must_use]
    pub fn keyword_role(&self) -> Option<KeywordRole> {
        self.keyword().as_ref().and_then(SyntaxToken::keyword_role)
    }

    /// Role after resolving conjunctions against the previous primary step.
    ///
    /// `prev` carries the last `Given`, `When` or `Then` across the steps of
    /// one section.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst::SyntaxTree;
    /// use gherkin_cst::ast::Section;
    /// use gherkin_cst_dialects::KeywordRole;
    ///
    /// let tree = SyntaxTree::parse_text("Feature: f\n  Scenario: s\n    When a\n    And b\n");
    /// let scenario = tree.document().feature().unwrap().scenarios().next().unwrap();
    /// let mut prev = None;
    /// let roles: Vec<_> = scenario
    ///     .steps()
    ///     .filter_map(|step| step.resolved_role(&mut prev))
    ///     .collect();
    /// assert_eq!(roles, vec![KeywordRole::When, KeywordRole::When]);
    /// assert_eq!(scenario.name().as_deref(), Some("s"));
    /// ```
    pub fn resolved_role(&self, prev: &mut Option<KeywordRole>) -> Option<KeywordRole> {
        self.keyword_role().map(|role| role.resolve(prev))
    }

    /// The step text node.
    #[must_use]
    pub fn text_node(&self) -> Option<Text> {
        child(&self.0)
    }

    /// Decoded step text; empty when the text is missing.
    #[must_use]
    pub fn text(&self) -> String {
        self.text_node().as_ref().map(Text::value).unwrap_or_default()
    }

    /// Placeholder names in the text and argument, in source order.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        self.0
            .descendant_tokens()
            .filter(|token| token.kind() == SyntaxKind::IdentifierToken)
            .map(|token| token.text().to_owned())
            .collect()
    }

    /// The data table argument.
    #[must_use]
    pub fn table(&self) -> Option<Table> {
        child(&self.0)
    }

    /// The doc string argument.
    #[must_use]
    pub fn doc_string(&self) -> Option<DocString> {
        child(&self.0)
    }
}

ast_node!(
    /// A data table.
    Table,
    Table
);

impl Table {
    /// Rows in source order.
    pub fn rows(&self) -> impl Iterator<Item = TableRow> + '_ {
        children(&self.0)
    }

    /// Decoded cell values row by row.
    #[must_use]
    pub fn values(&self) -> Vec<Vec<String>> {
        self.rows().map(|row| row.values()).collect()
    }
}

ast_node!(
    /// One row of a data table.
    TableRow,
    TableRow
);

impl TableRow {
    /// Cells in source order.
    pub fn cells(&self) -> impl Iterator<Item = TableCell> + '_ {
        children(&self.0)
    }

    /// Decoded cell values.
    #[must_use]
    pub fn values(&self) -> Vec<String> {
        self.cells().map(|cell| cell.value()).collect()
    }

    /// Whether the row ends with a `|`.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0
            .last_token()
            .is_some_and(|bar| bar.kind() == SyntaxKind::VerticalBarToken && !bar.is_missing())
    }
}

ast_node!(
    /// One cell of a table row.
    TableCell,
    TableCell
);

impl TableCell {
    /// Decoded value; empty for an empty cell.
    #[must_use]
    pub fn value(&self) -> String {
        if let Some(text) = child::<Text>(&self.0) {
            return text.value();
        }
        self.0
            .first_token()
            .map(|token| token.value().to_owned())
            .unwrap_or_default()
    }

    /// Whether the cell holds no text.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.first_token().is_some_and(|token| token.is_missing())
    }

    /// Placeholder names in the cell.
    #[must_use]
    pub fn placeholders(&self) -> Vec<String> {
        child::<Text>(&self.0)
            .as_ref()
            .map(Text::placeholders)
            .unwrap_or_default()
    }
}

ast_node!(
    /// A doc string step argument.
    DocString,
    DocString
);

impl DocString {
    /// The fence that opened the doc string.
    #[must_use]
    pub fn delimiter(&self) -> Option<DocStringDelimiter> {
        let open = self.0.first_token()?;
        DocStringDelimiter::at_start(open.text())
    }

    /// Content type after the opening fence.
    #[must_use]
    pub fn content_type(&self) -> Option<String> {
        self.0
            .child_node(SyntaxKind::DocStringContentType)
            .and_then(|node| node.first_token())
            .map(|token| token.text().to_owned())
    }

    /// Decoded body, indentation and line breaks included.
    #[must_use]
    pub fn content(&self) -> String {
        child::<Text>(&self.0)
            .as_ref()
            .map(Text::value)
            .unwrap_or_default()
    }

    /// Whether the closing fence is present.
    #[must_use]
    pub fn is_closed(&self) -> bool {
        let mut delimiters = self
            .0
            .child_tokens()
            .filter(|token| token.kind() == SyntaxKind::DocStringDelimiterToken);
        delimiters.nth(1).is_some_and(|close| !close.is_missing())
    }
}
