//! Section headers and the bodies of backgrounds, scenarios and examples.

use gherkin_cst_dialects::KeywordRole;

use super::{Parser, section_role};
use crate::lexer::LineKind;
use crate::syntax::{GreenNode, SectionHeader, SyntaxKind};

/// Whether a keyword line of role `found` can open a section of `role`.
fn opens(role: KeywordRole, found: KeywordRole) -> bool {
    found == role || (role == KeywordRole::Scenario && found == KeywordRole::ScenarioOutline)
}

impl Parser<'_> {
    /// Tags, keyword, colon, name and description of a section.
    pub(super) fn header(&mut self, role: KeywordRole) -> SectionHeader {
        let tags = self.tags();
        let keyword = match self.lexer.peek() {
            LineKind::Keyword(found) if opens(role, found.role()) => Some(self.lexer.keyword(found)),
            _ => None,
        };
        let keyword = self.expect(keyword, SyntaxKind::from_keyword_role(role));
        let colon = self.lexer.colon();
        let colon = self.expect(colon, SyntaxKind::ColonToken);
        let name = self.lexer.rest_of_line(SyntaxKind::LiteralToken).map(|lexeme| {
            let token = self.token(lexeme);
            self.factory.literal_text(vec![token])
        });
        let description = self.description();
        SectionHeader {
            tags,
            keyword,
            colon,
            name,
            description,
        }
    }

    fn tags(&mut self) -> Option<GreenNode> {
        let mut tags = Vec::new();
        while self.lexer.peek() == LineKind::Tags {
            for lexeme in self.lexer.tags_line() {
                let tag = self.token(lexeme);
                tags.push(tag);
            }
        }
        (!tags.is_empty()).then(|| self.factory.tags(tags))
    }

    /// Free text lines below a header.
    ///
    /// Blank and comment lines between them stay trivia of the next line.
    pub(super) fn description(&mut self) -> Option<GreenNode> {
        let mut lines = Vec::new();
        while self.lexer.peek() == LineKind::Text {
            let line = self.lexer.text_line(SyntaxKind::LiteralToken);
            lines.push(self.token(line));
        }
        (!lines.is_empty()).then(|| self.factory.description(lines))
    }

    pub(super) fn background(&mut self) -> GreenNode {
        let header = self.header(KeywordRole::Background);
        let mut steps = Vec::new();
        loop {
            let found = self.lexer.peek();
            match found {
                LineKind::Eof => break,
                LineKind::Keyword(keyword) if found.is_step() => {
                    steps.push(self.step(keyword, false));
                }
                _ => match section_role(&self.lexer, found) {
                    (Some(role), _) if role.is_structural() => break,
                    _ => self.lexer.skip_line(found),
                },
            }
        }
        self.factory.background(header, steps)
    }

    /// A scenario or scenario outline.
    ///
    /// Steps take placeholders when the keyword is `Scenario Outline` or when
    /// an `Examples` section follows, whatever keyword opened the scenario.
    pub(super) fn scenario(&mut self) -> GreenNode {
        let header = self.header(KeywordRole::Scenario);
        let outline = header.keyword.kind() == SyntaxKind::ScenarioOutlineKeyword
            || self.lexer.section_has_examples();
        let mut steps = Vec::new();
        let mut examples = Vec::new();
        loop {
            let found = self.lexer.peek();
            match found {
                LineKind::Eof => break,
                LineKind::Keyword(keyword) if found.is_step() && examples.is_empty() => {
                    steps.push(self.step(keyword, outline));
                }
                _ => match section_role(&self.lexer, found) {
                    (Some(KeywordRole::Examples), _) => examples.push(self.examples()),
                    (Some(role), _) if role.is_structural() => break,
                    _ => self.lexer.skip_line(found),
                },
            }
        }
        self.factory.scenario(header, steps, examples)
    }

    fn examples(&mut self) -> GreenNode {
        let header = self.header(KeywordRole::Examples);
        let table = (self.lexer.peek() == LineKind::TableRow).then(|| self.table(false));
        self.factory.examples(header, table)
    }
}
