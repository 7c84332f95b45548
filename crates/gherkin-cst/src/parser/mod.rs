//! Recursive-descent parser building green trees.
//!
//! One method per production. Each looks at the class of the next line,
//! enters the child production that line can start, and otherwise either
//! ends the construct or turns the line into skipped trivia. Absent required
//! tokens become missing tokens with a diagnostic, so parsing never fails.

mod section;
mod step;

use gherkin_cst_dialects::{Dialect, KeywordRole};
use log::{debug, trace};

use crate::diagnostics::{Diagnostic, sort_by_position};
use crate::lexer::{Lexeme, Lexer, LineKind};
use crate::syntax::{GreenNode, GreenToken, SectionHeader, SyntaxFactory, SyntaxKind, Trivia};

/// Everything a parse produces.
#[derive(Debug)]
pub(crate) struct Parsed {
    pub(crate) green: GreenNode,
    pub(crate) diagnostics: Vec<Diagnostic>,
    /// Dialect in effect once the header was read.
    pub(crate) dialect: &'static Dialect,
}

/// Parse `source` starting with `dialect`.
pub(crate) fn parse(source: &str, dialect: &'static Dialect) -> Parsed {
    debug!(
        "parsing {} bytes with dialect {}",
        source.len(),
        dialect.code()
    );
    let parsed = Parser::new(source, dialect).parse();
    debug!(
        "parsed document with {} diagnostics",
        parsed.diagnostics.len()
    );
    parsed
}

/// The line kind, looking through tag lines to the section they annotate.
///
/// Returns the role of the annotated keyword line and whether tags precede it.
fn section_role(lexer: &Lexer<'_>, found: LineKind) -> (Option<KeywordRole>, bool) {
    match found {
        LineKind::Tags => (lexer.peek_after_tags().role(), true),
        other => (other.role(), false),
    }
}

struct Parser<'src> {
    lexer: Lexer<'src>,
    factory: SyntaxFactory,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Parser<'src> {
    fn new(source: &'src str, dialect: &'static Dialect) -> Self {
        Self {
            lexer: Lexer::new(source, dialect),
            factory: SyntaxFactory::new(),
            diagnostics: Vec::new(),
        }
    }

    fn parse(mut self) -> Parsed {
        let green = self.document();
        let mut diagnostics = self.diagnostics;
        diagnostics.extend(self.lexer.take_diagnostics());
        sort_by_position(&mut diagnostics);
        Parsed {
            green,
            diagnostics,
            dialect: self.lexer.dialect(),
        }
    }

    fn token(&mut self, lexeme: Lexeme<'_>) -> GreenToken {
        debug_assert!(lexeme.start + lexeme.text.len() <= self.lexer.offset());
        self.factory
            .token(lexeme.kind, lexeme.text, lexeme.leading, lexeme.trailing)
    }

    /// The token for `lexeme`, or a reported missing `kind` at the current
    /// position.
    fn expect(&mut self, lexeme: Option<Lexeme<'_>>, kind: SyntaxKind) -> GreenToken {
        let offset = self.lexer.offset();
        self.expect_at(lexeme, offset, kind)
    }

    fn expect_at(&mut self, lexeme: Option<Lexeme<'_>>, offset: usize, kind: SyntaxKind) -> GreenToken {
        let Some(lexeme) = lexeme else {
            return self.missing_at(offset, kind, Vec::new(), Vec::new());
        };
        self.token(lexeme)
    }

    /// A missing `kind` at `offset` carrying trivia, reported.
    fn missing_at(
        &mut self,
        offset: usize,
        kind: SyntaxKind,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
    ) -> GreenToken {
        trace!("inserting missing {kind} at {offset}");
        self.diagnostics.push(Diagnostic::missing_token(offset, kind));
        self.factory
            .missing_token_with_trivia(kind, leading, trailing)
    }

    fn document(&mut self) -> GreenNode {
        let feature = match self.lexer.peek() {
            LineKind::Eof => None,
            _ => Some(self.feature()),
        };
        let eof = self.lexer.end_of_file();
        let eof = self.token(eof);
        self.factory.document(feature, eof)
    }

    fn feature(&mut self) -> GreenNode {
        let found = self.lexer.peek();
        let header = match section_role(&self.lexer, found) {
            (Some(KeywordRole::Feature), _) => self.header(KeywordRole::Feature),
            _ => self.implicit_feature_header(),
        };

        let mut background = None;
        let mut scenarios = Vec::new();
        let mut rules = Vec::new();
        loop {
            let found = self.lexer.peek();
            if found == LineKind::Eof {
                break;
            }
            match section_role(&self.lexer, found) {
                (Some(KeywordRole::Background), false)
                    if background.is_none() && scenarios.is_empty() && rules.is_empty() =>
                {
                    background = Some(self.background());
                }
                (Some(KeywordRole::Scenario | KeywordRole::ScenarioOutline), _)
                    if rules.is_empty() =>
                {
                    scenarios.push(self.scenario());
                }
                (Some(KeywordRole::Rule), _) => rules.push(self.rule()),
                _ => self.lexer.skip_line(found),
            }
        }
        self.factory.feature(header, background, scenarios, rules)
    }

    /// Header of a feature whose `Feature:` line is absent.
    ///
    /// Only the keyword is reported; the colon is implied by it.
    fn implicit_feature_header(&mut self) -> SectionHeader {
        let offset = self.lexer.offset();
        let leading = self.lexer.take_leading();
        let keyword = self.missing_at(offset, SyntaxKind::FeatureKeyword, leading, Vec::new());
        let colon = self.factory.missing_token(SyntaxKind::ColonToken);
        let name = if self.lexer.peek() == LineKind::Text {
            let line = self.lexer.text_line(SyntaxKind::LiteralToken);
            let line = self.token(line);
            Some(self.factory.literal_text(vec![line]))
        } else {
            None
        };
        let description = self.description();
        SectionHeader {
            tags: None,
            keyword,
            colon,
            name,
            description,
        }
    }

    fn rule(&mut self) -> GreenNode {
        let header = self.header(KeywordRole::Rule);
        let mut background = None;
        let mut scenarios = Vec::new();
        loop {
            let found = self.lexer.peek();
            if found == LineKind::Eof {
                break;
            }
            match section_role(&self.lexer, found) {
                (Some(KeywordRole::Rule), _) => break,
                (Some(KeywordRole::Background), false)
                    if background.is_none() && scenarios.is_empty() =>
                {
                    background = Some(self.background());
                }
                (Some(KeywordRole::Scenario | KeywordRole::ScenarioOutline), _) => {
                    scenarios.push(self.scenario());
                }
                _ => self.lexer.skip_line(found),
            }
        }
        self.factory.rule(header, background, scenarios)
    }
}

#[cfg(test)]
mod tests;
