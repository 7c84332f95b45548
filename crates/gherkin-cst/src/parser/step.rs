//! Steps and their arguments.

use std::borrow::Cow;

use gherkin_cst_dialects::KeywordMatch;

use super::Parser;
use crate::escape::{DocStringDelimiter, unescape_doc_string, unescape_table_cell};
use crate::lexer::{CellLexeme, DocStringLexeme, Lexeme, LineKind, Piece, RowLexeme, split_placeholders};
use crate::syntax::{GreenElement, GreenNode, SyntaxKind, Trivia};

/// How literal runs of outline text decode to values.
#[derive(Debug, Clone, Copy)]
enum Escapes {
    Verbatim,
    TableCell,
    DocString(DocStringDelimiter),
}

impl Escapes {
    fn decode(self, raw: &str) -> Cow<'_, str> {
        match self {
            Self::Verbatim => Cow::Borrowed(raw),
            Self::TableCell => unescape_table_cell(raw),
            Self::DocString(delimiter) => unescape_doc_string(raw, delimiter),
        }
    }
}

impl Parser<'_> {
    /// A step whose keyword starts the current line.
    ///
    /// In an outline, placeholders in the text and argument become
    /// interpolations.
    pub(super) fn step(&mut self, keyword: KeywordMatch, outline: bool) -> GreenNode {
        let keyword = self.lexer.keyword(keyword);
        let keyword = self.token(keyword);
        let text = self.step_text(outline);
        let argument = match self.lexer.peek() {
            LineKind::TableRow => Some(self.table(outline)),
            LineKind::DocString(delimiter) => Some(self.doc_string(delimiter, outline)),
            _ => None,
        };
        self.factory.step(keyword, text, argument)
    }

    fn step_text(&mut self, outline: bool) -> GreenNode {
        let Some(lexeme) = self.lexer.rest_of_line(SyntaxKind::LiteralToken) else {
            let missing = self.expect(None, SyntaxKind::LiteralToken);
            return self.factory.literal_text(vec![missing]);
        };
        if outline {
            let Lexeme {
                kind,
                text,
                leading,
                trailing,
                ..
            } = lexeme;
            return self.interpolated(kind, text, leading, trailing, Escapes::Verbatim);
        }
        let token = self.token(lexeme);
        self.factory.literal_text(vec![token])
    }

    /// Consecutive table rows.
    pub(super) fn table(&mut self, outline: bool) -> GreenNode {
        let mut rows = Vec::new();
        while self.lexer.peek() == LineKind::TableRow {
            let row = self.lexer.table_row();
            rows.push(self.table_row(row, outline));
        }
        self.factory.table(rows)
    }

    fn table_row(&mut self, row: RowLexeme<'_>, outline: bool) -> GreenNode {
        let RowLexeme {
            leading,
            cells,
            end_trivia,
            closed,
            end,
        } = row;
        if cells.is_empty() {
            let open = self
                .factory
                .token(SyntaxKind::VerticalBarToken, "|", leading, end_trivia);
            return self.factory.table_row(open, Vec::new());
        }

        let open = self
            .factory
            .token(SyntaxKind::VerticalBarToken, "|", leading, Vec::new());
        let count = cells.len();
        let mut end_trivia = Some(end_trivia);
        let mut parts = Vec::with_capacity(count);
        for (index, cell) in cells.into_iter().enumerate() {
            let cell = self.table_cell(cell, outline);
            let trailing = if index + 1 == count {
                end_trivia.take().unwrap_or_default()
            } else {
                Vec::new()
            };
            let bar = if closed || index + 1 < count {
                self.factory
                    .token(SyntaxKind::VerticalBarToken, "|", Vec::new(), trailing)
            } else {
                self.missing_at(end, SyntaxKind::VerticalBarToken, Vec::new(), trailing)
            };
            parts.push((cell, bar));
        }
        self.factory.table_row(open, parts)
    }

    /// An empty cell holds a missing literal; that is valid Gherkin and not
    /// reported.
    fn table_cell(&mut self, cell: CellLexeme<'_>, outline: bool) -> GreenNode {
        let CellLexeme {
            raw,
            leading,
            trailing,
        } = cell;
        let content: GreenElement = if raw.is_empty() {
            self.factory
                .missing_token_with_trivia(SyntaxKind::TableLiteralToken, leading, trailing)
                .into()
        } else if outline {
            self.interpolated(
                SyntaxKind::TableLiteralToken,
                raw,
                leading,
                trailing,
                Escapes::TableCell,
            )
            .into()
        } else {
            let value = unescape_table_cell(raw);
            self.factory
                .literal(SyntaxKind::TableLiteralToken, raw, &value, leading, trailing)
                .into()
        };
        self.factory.table_cell(content)
    }

    pub(super) fn doc_string(&mut self, delimiter: DocStringDelimiter, outline: bool) -> GreenNode {
        let DocStringLexeme {
            delimiter,
            open,
            content_type,
            content,
            close,
            end,
        } = self.lexer.doc_string(delimiter);
        let open = self.token(open);
        let content_type = content_type.map(|lexeme| {
            let token = self.token(lexeme);
            self.factory.doc_string_content_type(token)
        });
        let content = content.map(|lexeme| {
            if outline {
                self.interpolated(
                    lexeme.kind,
                    lexeme.text,
                    lexeme.leading,
                    lexeme.trailing,
                    Escapes::DocString(delimiter),
                )
            } else {
                let value = unescape_doc_string(lexeme.text, delimiter);
                let token = self.factory.literal(
                    lexeme.kind,
                    lexeme.text,
                    &value,
                    lexeme.leading,
                    lexeme.trailing,
                );
                self.factory.literal_text(vec![token])
            }
        });
        let close = self.expect_at(close, end, SyntaxKind::DocStringDelimiterToken);
        self.factory.doc_string(open, content_type, content, close)
    }

    /// Outline text split into literal runs of `kind` and interpolations.
    ///
    /// The first part takes `leading` and the last takes `trailing`.
    fn interpolated(
        &mut self,
        kind: SyntaxKind,
        raw: &str,
        leading: Vec<Trivia>,
        trailing: Vec<Trivia>,
        escapes: Escapes,
    ) -> GreenNode {
        let pieces = split_placeholders(raw);
        let last = pieces.len().saturating_sub(1);
        let mut leading = Some(leading);
        let mut trailing = Some(trailing);
        let mut parts: Vec<GreenElement> = Vec::with_capacity(pieces.len());
        for (index, piece) in pieces.into_iter().enumerate() {
            let before = leading.take().unwrap_or_default();
            let after = if index == last {
                trailing.take().unwrap_or_default()
            } else {
                Vec::new()
            };
            let part = match piece {
                Piece::Literal(text) => {
                    let value = escapes.decode(text);
                    self.factory
                        .literal(kind, text, &value, before, after)
                        .into()
                }
                Piece::Placeholder(name) => {
                    let less_than = self
                        .factory
                        .token(SyntaxKind::LessThanToken, "<", before, Vec::new());
                    let identifier =
                        self.factory
                            .token(SyntaxKind::IdentifierToken, name, Vec::new(), Vec::new());
                    let greater_than = self
                        .factory
                        .token(SyntaxKind::GreaterThanToken, ">", Vec::new(), after);
                    self.factory
                        .interpolation(less_than, identifier, greater_than)
                        .into()
                }
            };
            parts.push(part);
        }
        self.factory.interpolated_text(parts)
    }
}
