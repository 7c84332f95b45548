//! Kinds of tokens and nodes in a Gherkin syntax tree.

use std::fmt;

use gherkin_cst_dialects::KeywordRole;

/// Kind of a token or node.
///
/// Token kinds come first, node kinds after; [`is_token`](Self::is_token)
/// tells them apart. Keyword tokens have one kind per grammar role so the
/// tree records which role matched, independent of the dialect spelling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum SyntaxKind {
    /// `Feature` keyword.
    FeatureKeyword,
    /// `Background` keyword.
    BackgroundKeyword,
    /// `Rule` keyword.
    RuleKeyword,
    /// `Scenario` keyword.
    ScenarioKeyword,
    /// `Scenario Outline` keyword.
    ScenarioOutlineKeyword,
    /// `Examples` keyword.
    ExamplesKeyword,
    /// `Given` step keyword.
    GivenKeyword,
    /// `When` step keyword.
    WhenKeyword,
    /// `Then` step keyword.
    ThenKeyword,
    /// `And` step keyword.
    AndKeyword,
    /// `But` step keyword.
    ButKeyword,
    /// `*` step keyword.
    WildcardKeyword,
    /// `:` after a section keyword.
    ColonToken,
    /// A single `@name` tag.
    TagToken,
    /// Free text: names, description lines and step text.
    LiteralToken,
    /// Text of a table cell, with escapes decoded into its value.
    TableLiteralToken,
    /// `|` delimiting table cells.
    VerticalBarToken,
    /// `"""` or three backticks opening or closing a doc string.
    DocStringDelimiterToken,
    /// Content type after an opening doc string delimiter.
    DocStringContentTypeToken,
    /// Body of a doc string, spanning whole lines.
    DocStringContentToken,
    /// `<` opening an interpolation.
    LessThanToken,
    /// Placeholder name inside an interpolation.
    IdentifierToken,
    /// `>` closing an interpolation.
    GreaterThanToken,
    /// Zero-width token carrying the trivia at the end of the document.
    EndOfFileToken,

    /// Root of every tree.
    Document,
    /// A `Feature:` section.
    Feature,
    /// Tags preceding a feature, rule, scenario or examples section.
    Tags,
    /// A `Background:` section.
    Background,
    /// A `Rule:` section.
    Rule,
    /// A `Scenario:` or `Scenario Outline:` section.
    Scenario,
    /// An `Examples:` section.
    Examples,
    /// A step with its keyword, text and optional argument.
    Step,
    /// A data table.
    Table,
    /// One row of a data table.
    TableRow,
    /// One cell of a table row.
    TableCell,
    /// A doc string step argument.
    DocString,
    /// Content type of a doc string.
    DocStringContentType,
    /// Free-form description lines below a section header.
    Description,
    /// Text made only of literal tokens.
    LiteralText,
    /// Text mixing literal tokens and interpolations.
    InterpolatedText,
    /// A `<name>` placeholder.
    Interpolation,
}

impl SyntaxKind {
    /// Whether the kind is a token kind.
    #[must_use]
    pub const fn is_token(self) -> bool {
        (self as u8) <= (Self::EndOfFileToken as u8)
    }

    /// Whether the kind is a node kind.
    #[must_use]
    pub const fn is_node(self) -> bool {
        !self.is_token()
    }

    /// Whether the kind is any keyword token.
    #[must_use]
    pub const fn is_keyword(self) -> bool {
        self.keyword_role().is_some()
    }

    /// Whether the kind is a step keyword token.
    #[must_use]
    pub const fn is_step_keyword(self) -> bool {
        matches!(
            self,
            Self::GivenKeyword
                | Self::WhenKeyword
                | Self::ThenKeyword
                | Self::AndKeyword
                | Self::ButKeyword
                | Self::WildcardKeyword
        )
    }

    /// Whether the kind is a literal text token whose value may differ from
    /// its text.
    #[must_use]
    pub const fn is_literal(self) -> bool {
        matches!(
            self,
            Self::LiteralToken | Self::TableLiteralToken | Self::DocStringContentToken
        )
    }

    /// Keyword token kind for a grammar role.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst::SyntaxKind;
    /// use gherkin_cst_dialects::KeywordRole;
    ///
    /// let kind = SyntaxKind::from_keyword_role(KeywordRole::ScenarioOutline);
    /// assert_eq!(kind, SyntaxKind::ScenarioOutlineKeyword);
    /// assert_eq!(kind.keyword_role(), Some(KeywordRole::ScenarioOutline));
    /// ```
    #[must_use]
    pub const fn from_keyword_role(role: KeywordRole) -> Self {
        match role {
            KeywordRole::Feature => Self::FeatureKeyword,
            KeywordRole::Rule => Self::RuleKeyword,
            KeywordRole::Background => Self::BackgroundKeyword,
            KeywordRole::ScenarioOutline => Self::ScenarioOutlineKeyword,
            KeywordRole::Scenario => Self::ScenarioKeyword,
            KeywordRole::Examples => Self::ExamplesKeyword,
            KeywordRole::Given => Self::GivenKeyword,
            KeywordRole::When => Self::WhenKeyword,
            KeywordRole::Then => Self::ThenKeyword,
            KeywordRole::And => Self::AndKeyword,
            KeywordRole::But => Self::ButKeyword,
            KeywordRole::Wildcard => Self::WildcardKeyword,
        }
    }

    /// Grammar role of a keyword token kind.
    #[must_use]
    pub const fn keyword_role(self) -> Option<KeywordRole> {
        let role = match self {
            Self::FeatureKeyword => KeywordRole::Feature,
            Self::RuleKeyword => KeywordRole::Rule,
            Self::BackgroundKeyword => KeywordRole::Background,
            Self::ScenarioOutlineKeyword => KeywordRole::ScenarioOutline,
            Self::ScenarioKeyword => KeywordRole::Scenario,
            Self::ExamplesKeyword => KeywordRole::Examples,
            Self::GivenKeyword => KeywordRole::Given,
            Self::WhenKeyword => KeywordRole::When,
            Self::ThenKeyword => KeywordRole::Then,
            Self::AndKeyword => KeywordRole::And,
            Self::ButKeyword => KeywordRole::But,
            Self::WildcardKeyword => KeywordRole::Wildcard,
            _ => return None,
        };
        Some(role)
    }

    /// Human-readable description used in diagnostics.
    #[must_use]
    pub const fn describe(self) -> &'static str {
        match self {
            Self::FeatureKeyword => "`Feature` keyword",
            Self::BackgroundKeyword => "`Background` keyword",
            Self::RuleKeyword => "`Rule` keyword",
            Self::ScenarioKeyword => "`Scenario` keyword",
            Self::ScenarioOutlineKeyword => "`Scenario Outline` keyword",
            Self::ExamplesKeyword => "`Examples` keyword",
            Self::GivenKeyword
            | Self::WhenKeyword
            | Self::ThenKeyword
            | Self::AndKeyword
            | Self::ButKeyword
            | Self::WildcardKeyword => "step keyword",
            Self::ColonToken => "`:`",
            Self::TagToken => "tag",
            Self::LiteralToken | Self::LiteralText | Self::InterpolatedText => "text",
            Self::TableLiteralToken | Self::TableCell => "table cell",
            Self::VerticalBarToken => "`|`",
            Self::DocStringDelimiterToken => "doc string delimiter",
            Self::DocStringContentTypeToken | Self::DocStringContentType => {
                "doc string content type"
            }
            Self::DocStringContentToken => "doc string content",
            Self::LessThanToken => "`<`",
            Self::IdentifierToken => "placeholder name",
            Self::GreaterThanToken => "`>`",
            Self::EndOfFileToken => "end of file",
            Self::Document => "document",
            Self::Feature => "feature",
            Self::Tags => "tags",
            Self::Background => "background",
            Self::Rule => "rule",
            Self::Scenario => "scenario",
            Self::Examples => "examples",
            Self::Step => "step",
            Self::Table => "table",
            Self::TableRow => "table row",
            Self::DocString => "doc string",
            Self::Description => "description",
            Self::Interpolation => "placeholder",
        }
    }
}

impl fmt::Display for SyntaxKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Debug::fmt(self, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(SyntaxKind::FeatureKeyword, true)]
    #[case(SyntaxKind::EndOfFileToken, true)]
    #[case(SyntaxKind::Document, false)]
    #[case(SyntaxKind::Interpolation, false)]
    fn separates_tokens_from_nodes(#[case] kind: SyntaxKind, #[case] token: bool) {
        assert_eq!(kind.is_token(), token);
        assert_eq!(kind.is_node(), !token);
    }

    #[test]
    fn every_role_round_trips() {
        for role in KeywordRole::ALL {
            let kind = SyntaxKind::from_keyword_role(role);
            assert!(kind.is_keyword());
            assert_eq!(kind.keyword_role(), Some(role));
            assert_eq!(kind.is_step_keyword(), role.is_step());
        }
    }

    #[rstest]
    #[case(SyntaxKind::ColonToken)]
    #[case(SyntaxKind::LiteralToken)]
    #[case(SyntaxKind::Step)]
    fn non_keywords_have_no_role(#[case] kind: SyntaxKind) {
        assert_eq!(kind.keyword_role(), None);
    }

    #[test]
    fn displays_variant_name() {
        assert_eq!(SyntaxKind::TableRow.to_string(), "TableRow");
    }
}
