//! Doc string lexing.
//!
//! Once a fence opens a doc string, every following line belongs to its
//! body until a line whose trimmed text equals the same fence. Comments,
//! keywords and blank lines inside the body are content, not trivia.

use super::line::{line_bounds, skip_whitespace, trim_end};
use super::{Lexeme, Lexer};
use crate::escape::DocStringDelimiter;
use crate::syntax::{SyntaxKind, Trivia, TriviaKind};

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct DocStringLexeme<'src> {
    pub(crate) delimiter: DocStringDelimiter,
    pub(crate) open: Lexeme<'src>,
    pub(crate) content_type: Option<Lexeme<'src>>,
    /// Body lines verbatim, terminators included. `None` when empty.
    pub(crate) content: Option<Lexeme<'src>>,
    /// `None` when the document ends before the closing fence.
    pub(crate) close: Option<Lexeme<'src>>,
    /// Where a missing closing fence would sit.
    pub(crate) end: usize,
}

impl<'src> Lexer<'src> {
    /// Lex a doc string whose opening fence starts at the current position.
    pub(crate) fn doc_string(&mut self, delimiter: DocStringDelimiter) -> DocStringLexeme<'src> {
        let leading = self.take_leading();
        let open_start = self.pos;
        let open_end = open_start + delimiter.as_str().len();
        let (content_end, end) = line_bounds(self.source, open_start);
        let type_start = skip_whitespace(self.source, open_end, content_end);

        let mut open_trailing = Vec::new();
        open_trailing.extend(self.piece(TriviaKind::Whitespace, open_end, type_start));
        let content_type = if type_start < content_end {
            let type_end = trim_end(self.source, type_start, content_end);
            let mut trailing = Vec::new();
            trailing.extend(self.piece(TriviaKind::Whitespace, type_end, content_end));
            trailing.extend(self.piece(TriviaKind::Newline, content_end, end));
            Some(Lexeme {
                kind: SyntaxKind::DocStringContentTypeToken,
                start: type_start,
                text: self.slice(type_start, type_end),
                leading: Vec::new(),
                trailing,
            })
        } else {
            open_trailing.extend(self.piece(TriviaKind::Newline, content_end, end));
            None
        };
        let open = Lexeme {
            kind: SyntaxKind::DocStringDelimiterToken,
            start: open_start,
            text: self.slice(open_start, open_end),
            leading,
            trailing: open_trailing,
        };

        let body_start = end;
        let mut offset = body_start;
        while offset < self.source.len() {
            let (line_content_end, line_end) = line_bounds(self.source, offset);
            let fence_start = skip_whitespace(self.source, offset, line_content_end);
            let fence_end = trim_end(self.source, fence_start, line_content_end);
            if self.slice(fence_start, fence_end) == delimiter.as_str() {
                let mut trailing = Vec::new();
                trailing.extend(self.piece(TriviaKind::Whitespace, fence_end, line_content_end));
                trailing.extend(self.piece(TriviaKind::Newline, line_content_end, line_end));
                let close = Lexeme {
                    kind: SyntaxKind::DocStringDelimiterToken,
                    start: fence_start,
                    text: self.slice(fence_start, fence_end),
                    leading: self
                        .piece(TriviaKind::Whitespace, offset, fence_start)
                        .into_iter()
                        .collect::<Vec<Trivia>>(),
                    trailing,
                };
                self.pos = line_end;
                return DocStringLexeme {
                    delimiter,
                    open,
                    content_type,
                    content: self.content(body_start, offset),
                    close: Some(close),
                    end: fence_start,
                };
            }
            offset = line_end;
        }

        let len = self.source.len();
        self.pos = len;
        DocStringLexeme {
            delimiter,
            open,
            content_type,
            content: self.content(body_start, len),
            close: None,
            end: len,
        }
    }

    fn content(&self, start: usize, end: usize) -> Option<Lexeme<'src>> {
        (end > start).then(|| Lexeme {
            kind: SyntaxKind::DocStringContentToken,
            start,
            text: self.slice(start, end),
            leading: Vec::new(),
            trailing: Vec::new(),
        })
    }
}
