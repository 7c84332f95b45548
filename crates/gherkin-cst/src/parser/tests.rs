use gherkin_cst_dialects::default_dialect;
use rstest::rstest;

use super::*;
use crate::diagnostics::DiagnosticKind;
use crate::syntax::{SyntaxNode, TriviaKind};

fn parse_en(source: &str) -> (SyntaxNode, Vec<Diagnostic>) {
    let parsed = parse(source, default_dialect());
    assert_eq!(parsed.green.to_string(), source, "round trip");
    (SyntaxNode::new_root(parsed.green), parsed.diagnostics)
}

fn kinds(root: &SyntaxNode, kind: SyntaxKind) -> Vec<SyntaxNode> {
    root.descendants().filter(|node| node.kind() == kind).collect()
}

fn only(root: &SyntaxNode, kind: SyntaxKind) -> SyntaxNode {
    let mut found = kinds(root, kind);
    assert_eq!(found.len(), 1, "expected exactly one {kind}");
    let Some(node) = found.pop() else {
        panic!("expected a {kind}");
    };
    node
}

fn expected_missing(diagnostics: &[Diagnostic]) -> Vec<(SyntaxKind, usize)> {
    diagnostics
        .iter()
        .filter_map(|diagnostic| match diagnostic.kind() {
            DiagnosticKind::MissingToken { expected } => {
                Some((*expected, diagnostic.span().start()))
            }
            _ => None,
        })
        .collect()
}

#[rstest]
#[case("")]
#[case("\n\n")]
#[case("# only a comment\n")]
#[case("Feature: f")]
#[case("Feature: f\r\n  Scenario: s\r\n    Given x\r\n")]
#[case("Feature:   \n\n  Some description\n\n  # note\n  more   \n")]
#[case("@a @b\nFeature: f\n\n  @c\n  Scenario: s\n    Given x  \n")]
#[case("Feature: f\n  Scenario: s\n    Given x\n      | a\u{a0}| b |\n\n      # gap\n      | c | d |\n")]
#[case("Feature: f\n  Scenario: s\n    Given x\n      \"\"\"json\n      {\n      \"\"\"\n")]
#[case("Feature: f\n  Rule: r\n    Background:\n      Given b\n    Scenario: s\n      Then t\n")]
#[case("Given stray\n| row\nFeature: again\n")]
fn reproduces_source(#[case] source: &str) {
    parse_en(source);
}

#[test]
fn empty_document_has_only_end_of_file() {
    let (root, diagnostics) = parse_en("\n# c\n");
    assert_eq!(root.child_nodes().count(), 0);
    let Some(eof) = root.child_token(SyntaxKind::EndOfFileToken) else {
        panic!("expected end of file");
    };
    assert_eq!(eof.leading_trivia().len(), 3);
    assert!(diagnostics.is_empty());
}

#[test]
fn builds_feature_sections() {
    let source = "\
Feature: Guess the word

  Background:
    Given a game

  Scenario: Maker starts
    When the Maker starts
    Then the Maker waits

  Rule: Breakers
    Scenario: Breaker joins
      Given a Breaker
";
    let (root, diagnostics) = parse_en(source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let feature = only(&root, SyntaxKind::Feature);
    let children: Vec<_> = feature.child_nodes().map(|node| node.kind()).collect();
    assert_eq!(
        children,
        vec![
            SyntaxKind::LiteralText,
            SyntaxKind::Background,
            SyntaxKind::Scenario,
            SyntaxKind::Rule,
        ]
    );
    assert_eq!(kinds(&root, SyntaxKind::Step).len(), 4);
    let rule = only(&root, SyntaxKind::Rule);
    assert_eq!(rule.child_nodes().filter(|node| node.kind() == SyntaxKind::Scenario).count(), 1);
}

#[test]
fn description_keeps_blank_lines_as_trivia() {
    let source = "Feature: f\n  first line\n\n  # c\n  second line\n  Scenario: s\n";
    let (root, diagnostics) = parse_en(source);
    assert!(diagnostics.is_empty());
    let description = only(&root, SyntaxKind::Description);
    let lines: Vec<_> = description
        .child_tokens()
        .map(|token| token.text().to_owned())
        .collect();
    assert_eq!(lines, vec!["first line", "second line"]);
    let Some(second) = description.last_token() else {
        panic!("expected a line");
    };
    let leading: Vec<_> = second.leading_trivia().iter().map(|piece| piece.kind()).collect();
    assert_eq!(
        leading,
        vec![
            TriviaKind::Newline,
            TriviaKind::Whitespace,
            TriviaKind::Comment,
            TriviaKind::Newline,
            TriviaKind::Whitespace,
        ]
    );
}

#[test]
fn empty_cells_are_missing_without_diagnostics() {
    let source = "Feature: f\n  Scenario: s\n    Given x\n      |foo||boz|\n";
    let (root, diagnostics) = parse_en(source);
    assert!(diagnostics.is_empty());
    let row = only(&root, SyntaxKind::TableRow);
    let cells: Vec<_> = row
        .child_nodes()
        .filter_map(|cell| cell.first_token())
        .map(|token| (token.value().to_owned(), token.is_missing()))
        .collect();
    assert_eq!(
        cells,
        vec![
            ("foo".to_owned(), false),
            (String::new(), true),
            ("boz".to_owned(), false),
        ]
    );
}

#[test]
fn unclosed_row_misses_its_last_bar() {
    let source = "Feature: f\n  Scenario: s\n    Given x\n      | a | extra  \n";
    let (root, diagnostics) = parse_en(source);
    let end = source.len() - 1;
    assert_eq!(expected_missing(&diagnostics), vec![(SyntaxKind::VerticalBarToken, end)]);
    let row = only(&root, SyntaxKind::TableRow);
    let Some(bar) = row.last_token() else {
        panic!("expected a bar");
    };
    assert!(bar.is_missing());
    assert_eq!(bar.span().start(), end);
    let values: Vec<_> = row
        .child_nodes()
        .filter_map(|cell| cell.first_token())
        .map(|token| token.value().to_owned())
        .collect();
    assert_eq!(values, vec!["a", "extra"]);
}

#[test]
fn escaped_pipes_decode_into_values() {
    let source = "Feature: f\n  Scenario: s\n    Given x\n      | Doflamingo \\| pirate |\n";
    let (root, _) = parse_en(source);
    let cell = only(&root, SyntaxKind::TableCell);
    let Some(token) = cell.first_token() else {
        panic!("expected a cell token");
    };
    assert_eq!(token.text(), "Doflamingo \\| pirate");
    assert_eq!(token.value(), "Doflamingo | pirate");
}

#[test]
fn doc_string_keeps_indentation_and_content_type() {
    let source = "Feature: f\n  Scenario: s\n    Given x\n      ```markdown\n        indented\n      \\`\\`\\`\n      ```\n";
    let (root, diagnostics) = parse_en(source);
    assert!(diagnostics.is_empty());
    let doc = only(&root, SyntaxKind::DocString);
    let content_type = only(&doc, SyntaxKind::DocStringContentType);
    assert_eq!(content_type.text(), "markdown");
    let content = only(&doc, SyntaxKind::LiteralText);
    let Some(token) = content.first_token() else {
        panic!("expected content");
    };
    assert_eq!(token.text(), "        indented\n      \\`\\`\\`\n");
    assert_eq!(token.value(), "        indented\n      ```\n");
}

#[test]
fn unterminated_doc_string_misses_its_close() {
    let source = "Feature: f\n  Scenario: s\n    Given x\n      \"\"\"\n      body";
    let (root, diagnostics) = parse_en(source);
    assert_eq!(
        expected_missing(&diagnostics),
        vec![(SyntaxKind::DocStringDelimiterToken, source.len())]
    );
    let doc = only(&root, SyntaxKind::DocString);
    assert!(doc.last_token().is_some_and(|close| close.is_missing()));
}

#[test]
fn outline_steps_interpolate_placeholders() {
    let source = "\
Feature: f
  Scenario Outline: eating
    Given there are <start> cucumbers
      | <left> | fixed |
  Examples:
    | start | left |
    | 12    | <no> |
";
    let (root, diagnostics) = parse_en(source);
    assert!(diagnostics.is_empty(), "{diagnostics:?}");
    let identifiers: Vec<_> = kinds(&root, SyntaxKind::Interpolation)
        .iter()
        .filter_map(|node| node.child_token(SyntaxKind::IdentifierToken))
        .map(|token| token.text().to_owned())
        .collect();
    assert_eq!(identifiers, vec!["start", "left"]);
    let examples = only(&root, SyntaxKind::Examples);
    assert!(kinds(&examples, SyntaxKind::InterpolatedText).is_empty());
}

#[test]
fn examples_make_a_plain_scenario_an_outline() {
    let source = "Feature: f\n  Scenario: s\n    Given <x>\n  Examples:\n    | x |\n    | 1 |\n";
    let (root, _) = parse_en(source);
    let step = only(&root, SyntaxKind::Step);
    assert!(step.child_node(SyntaxKind::InterpolatedText).is_some());
}

#[test]
fn placeholders_outside_outlines_stay_literal() {
    let source = "Feature: f\n  Scenario: s\n    Given <x>\n";
    let (root, _) = parse_en(source);
    assert!(kinds(&root, SyntaxKind::Interpolation).is_empty());
    let step = only(&root, SyntaxKind::Step);
    assert!(step.child_node(SyntaxKind::LiteralText).is_some());
}

#[test]
fn outline_without_examples_table_is_complete() {
    let source = "Feature: f\nScenario Outline: x\n\n  Examples:\n";
    let (root, diagnostics) = parse_en(source);
    assert!(diagnostics.is_empty());
    let examples = only(&root, SyntaxKind::Examples);
    assert!(examples.child_node(SyntaxKind::Table).is_none());
    assert!(kinds(&root, SyntaxKind::Step).is_empty());
}

#[test]
fn missing_step_text_is_reported() {
    let source = "Feature: f\n  Scenario: s\n    Given\n";
    let (root, diagnostics) = parse_en(source);
    assert_eq!(
        expected_missing(&diagnostics),
        vec![(SyntaxKind::LiteralToken, source.len())]
    );
    let step = only(&root, SyntaxKind::Step);
    let text = step.child_node(SyntaxKind::LiteralText).and_then(|text| text.first_token());
    assert!(text.is_some_and(|token| token.is_missing()));
}

#[test]
fn content_before_feature_opens_an_implicit_feature() {
    let source = "# c\nScenario: s\n  Given x\n";
    let (root, diagnostics) = parse_en(source);
    assert_eq!(
        expected_missing(&diagnostics),
        vec![(SyntaxKind::FeatureKeyword, 4)]
    );
    let feature = only(&root, SyntaxKind::Feature);
    let Some(keyword) = feature.first_token() else {
        panic!("expected a keyword");
    };
    assert!(keyword.is_missing());
    assert_eq!(keyword.leading_trivia().len(), 2);
    assert_eq!(kinds(&root, SyntaxKind::Scenario).len(), 1);
}

#[test]
fn free_text_names_an_implicit_feature() {
    let (root, _) = parse_en("Just a title\n  and a description\n");
    let feature = only(&root, SyntaxKind::Feature);
    let name = feature.child_node(SyntaxKind::LiteralText).map(|name| name.text());
    assert_eq!(name.as_deref(), Some("Just a title"));
    assert!(feature.child_node(SyntaxKind::Description).is_some());
}

#[rstest]
#[case::step_after_examples(
    "Feature: f\n  Scenario Outline: s\n  Examples:\n    | a |\n  Given late\n",
    "step"
)]
#[case::second_feature("Feature: f\nFeature: g\n", "`Feature` line")]
#[case::stray_row("Feature: f\n| a |\n", "table row")]
#[case::late_background(
    "Feature: f\n  Scenario: s\n  Background:\n",
    "`Background` line"
)]
fn skips_unexpected_lines(#[case] source: &str, #[case] found: &str) {
    let (root, diagnostics) = parse_en(source);
    let unexpected: Vec<_> = diagnostics
        .iter()
        .filter_map(|diagnostic| match diagnostic.kind() {
            DiagnosticKind::UnexpectedContent { found } => Some(found.as_str()),
            _ => None,
        })
        .collect();
    assert_eq!(unexpected, vec![found]);
    let skipped = root
        .descendant_tokens()
        .flat_map(|token| token.leading_trivia().to_vec())
        .filter(|piece| piece.kind() == TriviaKind::SkippedText)
        .count();
    assert_eq!(skipped, 1);
}

#[test]
fn glued_tags_are_one_token() {
    let source = "@joined_tag3@joined_tag4 @comment_tag#2\nFeature: f\n";
    let (root, _) = parse_en(source);
    let tags = only(&root, SyntaxKind::Tags);
    let texts: Vec<_> = tags.child_tokens().map(|tag| tag.text().to_owned()).collect();
    assert_eq!(texts, vec!["@joined_tag3@joined_tag4", "@comment_tag#2"]);
}

#[test]
fn directive_selects_dialect() {
    let parsed = parse("# language: ht\nKarakteristik: X\n", default_dialect());
    assert_eq!(parsed.dialect.code(), "ht");
    assert!(parsed.diagnostics.is_empty());
    let root = SyntaxNode::new_root(parsed.green);
    let Some(keyword) = only(&root, SyntaxKind::Feature).first_token() else {
        panic!("expected a keyword");
    };
    assert_eq!(keyword.text(), "Karakteristik");
    assert_eq!(keyword.keyword_role(), Some(KeywordRole::Feature));
}

#[test]
fn longest_keyword_wins() {
    let parsed = parse(
        "# language: ht\nKarakteristik: X\n  Senaryo: s\n    Le sa a mwen manje\n",
        default_dialect(),
    );
    let root = SyntaxNode::new_root(parsed.green);
    let step = only(&root, SyntaxKind::Step);
    let Some(keyword) = step.first_token() else {
        panic!("expected a keyword");
    };
    assert_eq!(keyword.text(), "Le sa a");
    assert_eq!(keyword.keyword_role(), Some(KeywordRole::Then));
    assert_eq!(step.child_node(SyntaxKind::LiteralText).map(|text| text.text()).as_deref(), Some("mwen manje"));
}
