use gherkin_cst_dialects::KeywordRole;

use super::{AstNode, Description, Step, Table, Tags, Text, ast_node, child, children};
use crate::syntax::{SyntaxKind, SyntaxNode, SyntaxToken};

/// Accessors shared by every section with a `Keyword: name` header.
pub trait Section: AstNode {
    /// The section keyword, possibly a missing token.
    fn keyword(&self) -> Option<SyntaxToken> {
        self.syntax()
            .child_tokens()
            .find(|token| token.kind().is_keyword())
    }

    /// Role of the keyword.
    fn keyword_role(&self) -> Option<KeywordRole> {
        self.keyword().as_ref().and_then(SyntaxToken::keyword_role)
    }

    /// Name after the colon.
    fn name(&self) -> Option<String> {
        child::<Text>(self.syntax()).as_ref().map(Text::value)
    }

    /// Description below the header.
    fn description(&self) -> Option<Description> {
        child(self.syntax())
    }

    /// Description lines, trimmed.
    fn description_lines(&self) -> Vec<String> {
        self.description()
            .as_ref()
            .map(Description::lines)
            .unwrap_or_default()
    }

    /// Tag names without `@`.
    fn tags(&self) -> Vec<String> {
        child::<Tags>(self.syntax())
            .as_ref()
            .map(Tags::names)
            .unwrap_or_default()
    }
}

ast_node!(
    /// The root of every tree.
    Document,
    Document
);

impl Document {
    pub(crate) fn new(root: SyntaxNode) -> Self {
        debug_assert_eq!(root.kind(), SyntaxKind::Document);
        Self(root)
    }

    /// The feature, absent for documents holding only trivia.
    #[must_use]
    pub fn feature(&self) -> Option<Feature> {
        child(&self.0)
    }

    /// The end-of-file token carrying trailing trivia.
    #[must_use]
    pub fn end_of_file(&self) -> Option<SyntaxToken> {
        self.0.child_token(SyntaxKind::EndOfFileToken)
    }
}

ast_node!(
    /// A `Feature:` section.
    Feature,
    Feature
);

impl Section for Feature {}

impl Feature {
    /// The feature background.
    #[must_use]
    pub fn background(&self) -> Option<Background> {
        child(&self.0)
    }

    /// Scenarios directly under the feature.
    pub fn scenarios(&self) -> impl Iterator<Item = Scenario> + '_ {
        children(&self.0)
    }

    /// Rules in source order.
    pub fn rules(&self) -> impl Iterator<Item = Rule> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A `Rule:` section.
    Rule,
    Rule
);

impl Section for Rule {}

impl Rule {
    /// The rule background.
    #[must_use]
    pub fn background(&self) -> Option<Background> {
        child(&self.0)
    }

    /// Scenarios of the rule.
    pub fn scenarios(&self) -> impl Iterator<Item = Scenario> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A `Background:` section.
    Background,
    Background
);

impl Section for Background {}

impl Background {
    /// Steps in source order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// A `Scenario:` or `Scenario Outline:` section.
    Scenario,
    Scenario
);

impl Section for Scenario {}

impl Scenario {
    /// Whether the scenario is an outline, by keyword or by having examples.
    #[must_use]
    pub fn is_outline(&self) -> bool {
        self.keyword_role() == Some(KeywordRole::ScenarioOutline) || self.examples().next().is_some()
    }

    /// Steps in source order.
    pub fn steps(&self) -> impl Iterator<Item = Step> + '_ {
        children(&self.0)
    }

    /// Examples sections in source order.
    pub fn examples(&self) -> impl Iterator<Item = Examples> + '_ {
        children(&self.0)
    }
}

ast_node!(
    /// An `Examples:` section.
    Examples,
    Examples
);

impl Section for Examples {}

impl Examples {
    /// The examples table; the first row names the placeholders.
    #[must_use]
    pub fn table(&self) -> Option<Table> {
        child(&self.0)
    }
}
