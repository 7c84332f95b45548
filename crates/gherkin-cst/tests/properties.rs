//! Property tests: every input, well formed or not, round trips.

use gherkin_cst::{SyntaxTree, TriviaKind};
use proptest::prelude::*;

/// Line fragments that combine into near-valid feature files.
const LINES: &[&str] = &[
    "Feature: Guess the word",
    "  Scenario: Maker starts a game",
    "  Scenario Outline: Breaker joins",
    "  Background:",
    "  Rule: Breakers",
    "  Examples: words",
    "    Given the Maker has started a game with the word \"<word>\"",
    "    When the Breaker joins",
    "    Then the Breaker must guess",
    "    And",
    "    * a bullet",
    "      | word | count |",
    "      | silky\\|smooth | 5",
    "      |a||b|",
    "      \"\"\"json",
    "      ```",
    "      \"\"\"",
    "  @wip @slow#1",
    "@a@b text",
    "# language: fr",
    "# language: xx",
    "# a comment",
    "  free text",
    "Fonctionnalité: f",
    "\u{a0}\tGiven\u{a0}spaced",
    "",
    "   ",
];

const BREAKS: &[&str] = &["\n", "\r\n", ""];

fn document() -> impl Strategy<Value = String> {
    prop::collection::vec(
        (prop::sample::select(LINES), prop::sample::select(BREAKS)),
        0..24,
    )
    .prop_map(|lines| {
        lines
            .into_iter()
            .map(|(line, end)| format!("{line}{end}"))
            .collect()
    })
}

proptest! {
    #[test]
    fn near_valid_documents_round_trip(source in document()) {
        let tree = SyntaxTree::parse_text(&source);
        prop_assert_eq!(tree.to_string(), source.as_str());
        for diagnostic in tree.diagnostics() {
            prop_assert!(diagnostic.span().end() <= source.len());
            prop_assert!(tree.source().slice(diagnostic.span()).is_some());
        }
    }

    #[test]
    fn arbitrary_text_round_trips(source in "\\PC*") {
        let tree = SyntaxTree::parse_text(&source);
        prop_assert_eq!(tree.to_string(), source.as_str());
    }

    #[test]
    fn tokens_tile_the_source(source in document()) {
        let tree = SyntaxTree::parse_text(&source);
        let mut offset = 0;
        for token in tree.root().descendant_tokens() {
            prop_assert_eq!(token.full_span().start(), offset);
            offset = token.full_span().end();
        }
        prop_assert_eq!(offset, source.len());
    }

    #[test]
    fn reparsing_is_idempotent(source in document()) {
        let first = SyntaxTree::parse_text(&source);
        let second = SyntaxTree::parse_text(&first.to_string());
        prop_assert_eq!(first.green(), second.green());
        prop_assert_eq!(first.diagnostics(), second.diagnostics());
    }

    #[test]
    fn skipped_text_is_always_reported(source in document()) {
        let tree = SyntaxTree::parse_text(&source);
        let skipped = tree
            .root()
            .descendant_tokens()
            .flat_map(|token| {
                let mut kinds: Vec<_> = token.leading_trivia().iter().map(|piece| piece.kind()).collect();
                kinds.extend(token.trailing_trivia().iter().map(|piece| piece.kind()));
                kinds
            })
            .any(|kind| kind == TriviaKind::SkippedText);
        if skipped {
            prop_assert!(tree.has_errors());
        }
    }
}
