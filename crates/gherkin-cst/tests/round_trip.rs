//! Lossless round trips over well-formed feature files.

use gherkin_cst::{SyntaxKind, SyntaxTree};
use rstest::rstest;

fn assert_contiguous(tree: &SyntaxTree) {
    let mut offset = 0;
    for token in tree.root().descendant_tokens() {
        let span = token.full_span();
        assert_eq!(span.start(), offset, "gap before {token:?}");
        offset = span.end();
    }
    assert_eq!(offset, tree.source().len());
}

#[rstest]
#[case::descriptions(include_str!("features/descriptions.feature"))]
#[case::docstrings(include_str!("features/docstrings.feature"))]
#[case::escaped_pipes(include_str!("features/escaped_pipes.feature"))]
#[case::tags(include_str!("features/tags.feature"))]
#[case::i18n_ht(include_str!("features/i18n_ht.feature"))]
#[case::scenario_outline(include_str!("features/scenario_outline.feature"))]
#[case::incomplete_outline(include_str!("features/incomplete_scenario_outline.feature"))]
#[case::empty_cells(include_str!("features/empty_cells.feature"))]
#[case::nbsp(include_str!("features/nbsp.feature"))]
#[case::crlf(include_str!("features/crlf.feature"))]
#[case::rules(include_str!("features/rule.feature"))]
fn round_trips_without_diagnostics(#[case] source: &str) {
    let tree = SyntaxTree::parse_text(source);
    assert!(tree.diagnostics().is_empty(), "{:#?}", tree.diagnostics());
    assert_eq!(tree.to_string(), source);
    assert_eq!(tree.root().full_text(), source);
    assert_contiguous(&tree);
}

#[rstest]
#[case::descriptions(include_str!("features/descriptions.feature"))]
#[case::tags(include_str!("features/tags.feature"))]
#[case::rules(include_str!("features/rule.feature"))]
fn reparsing_rendered_text_is_stable(#[case] source: &str) {
    let first = SyntaxTree::parse_text(source);
    let second = SyntaxTree::parse_text(&first.to_string());
    assert_eq!(first.green(), second.green());
}

#[test]
fn crlf_terminators_stay_newline_trivia() {
    let tree = SyntaxTree::parse_text(include_str!("features/crlf.feature"));
    let Some(keyword) = tree
        .root()
        .descendant_tokens()
        .find(|token| token.kind() == SyntaxKind::FeatureKeyword)
    else {
        panic!("expected a feature keyword");
    };
    assert_eq!(keyword.text(), "Feature");
    assert!(
        tree.root()
            .descendant_tokens()
            .filter(|token| token.kind() != SyntaxKind::DocStringContentToken)
            .all(|token| !token.text().contains('\r'))
    );
}

#[test]
fn nbsp_indentation_is_trivia() {
    let tree = SyntaxTree::parse_text(include_str!("features/nbsp.feature"));
    let steps: Vec<_> = tree
        .root()
        .descendants()
        .filter(|node| node.kind() == SyntaxKind::Step)
        .collect();
    assert_eq!(steps.len(), 1);
    let Some(step) = steps.first() else {
        panic!("expected a step");
    };
    assert_eq!(step.text(), "Given\u{a0}a step");
}
