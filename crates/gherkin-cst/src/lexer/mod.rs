//! Line-oriented lexer with trivia collection.
//!
//! The parser drives the lexer one line at a time: [`Lexer::peek`] gathers
//! blank lines, comments and indentation into pending leading trivia and
//! classifies the next significant line; the parser then asks for the tokens
//! that line kind holds. A token's trailing trivia is the inline whitespace
//! after it plus, when that reaches the end of the line, the line break.
//! Everything else is leading trivia of the next token.

mod doc_string;
mod interpolation;
mod line;
mod table;

use gherkin_cst_dialects::{Dialect, KeywordMatch, KeywordRole, try_dialect};
use log::{debug, warn};

use crate::diagnostics::Diagnostic;
use crate::escape::DocStringDelimiter;
use crate::syntax::{SyntaxKind, Trivia, TriviaKind, language_directive};
use crate::text::Span;

pub(crate) use doc_string::DocStringLexeme;
pub(crate) use interpolation::{Piece, split_placeholders};
pub(crate) use line::LineKind;
pub(crate) use table::{CellLexeme, RowLexeme};

use line::{classify, line_bounds, skip_whitespace, trim_end};

/// A token's kind, text and trivia, before it becomes a green token.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Lexeme<'src> {
    pub(crate) kind: SyntaxKind,
    pub(crate) start: usize,
    pub(crate) text: &'src str,
    pub(crate) leading: Vec<Trivia>,
    pub(crate) trailing: Vec<Trivia>,
}

pub(crate) struct Lexer<'src> {
    source: &'src str,
    pos: usize,
    dialect: &'static Dialect,
    pending: Vec<Trivia>,
    /// No token has been produced yet, so comments may still be directives.
    in_header: bool,
    diagnostics: Vec<Diagnostic>,
}

impl<'src> Lexer<'src> {
    pub(crate) fn new(source: &'src str, dialect: &'static Dialect) -> Self {
        Self {
            source,
            pos: 0,
            dialect,
            pending: Vec::new(),
            in_header: true,
            diagnostics: Vec::new(),
        }
    }

    pub(crate) fn offset(&self) -> usize {
        self.pos
    }

    pub(crate) fn dialect(&self) -> &'static Dialect {
        self.dialect
    }

    pub(crate) fn take_diagnostics(&mut self) -> Vec<Diagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    fn slice(&self, start: usize, end: usize) -> &'src str {
        self.source.get(start..end).unwrap_or_default()
    }

    fn piece(&self, kind: TriviaKind, start: usize, end: usize) -> Option<Trivia> {
        (end > start).then(|| Trivia::new(kind, self.slice(start, end)))
    }

    fn push_pending(&mut self, kind: TriviaKind, start: usize, end: usize) {
        if let Some(piece) = self.piece(kind, start, end) {
            self.pending.push(piece);
        }
    }

    pub(crate) fn take_leading(&mut self) -> Vec<Trivia> {
        self.in_header = false;
        std::mem::take(&mut self.pending)
    }

    fn at_line_start(&self) -> bool {
        self.pos == 0 || self.source.as_bytes().get(self.pos - 1) == Some(&b'\n')
    }

    /// Classify the next significant line, first moving blank lines, comment
    /// lines and indentation into pending trivia.
    pub(crate) fn peek(&mut self) -> LineKind {
        self.collect_trivia();
        if self.pos >= self.source.len() {
            return LineKind::Eof;
        }
        let (content_end, _) = line_bounds(self.source, self.pos);
        classify(self.slice(self.pos, content_end), self.dialect)
    }

    fn collect_trivia(&mut self) {
        while self.pos < self.source.len() {
            let (content_end, end) = line_bounds(self.source, self.pos);
            let indent_end = skip_whitespace(self.source, self.pos, content_end);
            let rest = self.slice(indent_end, content_end);
            self.push_pending(TriviaKind::Whitespace, self.pos, indent_end);
            if !rest.is_empty() && !rest.starts_with('#') {
                self.pos = indent_end;
                return;
            }
            if !rest.is_empty() {
                let comment_end = trim_end(self.source, indent_end, content_end);
                let kind = self.comment_kind(indent_end, comment_end);
                self.push_pending(kind, indent_end, comment_end);
                self.push_pending(TriviaKind::Whitespace, comment_end, content_end);
            }
            self.push_pending(TriviaKind::Newline, content_end, end);
            self.pos = end;
        }
    }

    /// Recognise a language directive and switch dialect.
    fn comment_kind(&mut self, start: usize, end: usize) -> TriviaKind {
        if !self.in_header {
            return TriviaKind::Comment;
        }
        let Some(code) = language_directive(self.slice(start, end)) else {
            return TriviaKind::Comment;
        };
        match try_dialect(code) {
            Ok(dialect) => {
                debug!("language directive selects dialect {}", dialect.code());
                self.dialect = dialect;
            }
            Err(err) => {
                warn!(
                    "{err}; keeping dialect {} for the rest of the document",
                    self.dialect.code()
                );
                self.diagnostics
                    .push(Diagnostic::unknown_language(Span::new(start, end), code));
            }
        }
        TriviaKind::LanguageDirective
    }

    /// Inline whitespace after a token, plus the line break if the line ends.
    fn trailing(&mut self) -> Vec<Trivia> {
        let (content_end, end) = line_bounds(self.source, self.pos);
        let whitespace_end = skip_whitespace(self.source, self.pos, content_end);
        let mut trivia = Vec::new();
        trivia.extend(self.piece(TriviaKind::Whitespace, self.pos, whitespace_end));
        self.pos = whitespace_end;
        if whitespace_end == content_end {
            trivia.extend(self.piece(TriviaKind::Newline, content_end, end));
            self.pos = end;
        }
        trivia
    }

    fn lexeme(&mut self, kind: SyntaxKind, len: usize) -> Lexeme<'src> {
        let leading = self.take_leading();
        let start = self.pos;
        self.pos += len;
        Lexeme {
            kind,
            start,
            text: self.slice(start, start + len),
            leading,
            trailing: self.trailing(),
        }
    }

    /// The keyword at the start of the current line.
    pub(crate) fn keyword(&mut self, found: KeywordMatch) -> Lexeme<'src> {
        self.lexeme(SyntaxKind::from_keyword_role(found.role()), found.len())
    }

    /// A `:` at the current position.
    pub(crate) fn colon(&mut self) -> Option<Lexeme<'src>> {
        let next = self.source.get(self.pos..)?;
        if self.at_line_start() || !next.starts_with(':') {
            return None;
        }
        Some(self.lexeme(SyntaxKind::ColonToken, 1))
    }

    /// Text from the current position to the end of the line, if the line
    /// still has any after the preceding token.
    pub(crate) fn rest_of_line(&mut self, kind: SyntaxKind) -> Option<Lexeme<'src>> {
        if self.at_line_start() || self.pos >= self.source.len() {
            return None;
        }
        Some(self.text_line(kind))
    }

    /// The remaining text of the current line as one token.
    pub(crate) fn text_line(&mut self, kind: SyntaxKind) -> Lexeme<'src> {
        let (content_end, _) = line_bounds(self.source, self.pos);
        let text_end = trim_end(self.source, self.pos, content_end);
        self.lexeme(kind, text_end - self.pos)
    }

    /// Every tag on the current line.
    ///
    /// A tag runs from `@` to the next whitespace. A `#` after whitespace
    /// starts a comment; other text after the tags is skipped.
    pub(crate) fn tags_line(&mut self) -> Vec<Lexeme<'src>> {
        let mut tags = Vec::new();
        let mut leading = self.take_leading();
        loop {
            let (content_end, end) = line_bounds(self.source, self.pos);
            let start = self.pos;
            let tag_end = self
                .slice(start, content_end)
                .find(char::is_whitespace)
                .map_or(content_end, |index| start + index);
            let rest_start = skip_whitespace(self.source, tag_end, content_end);
            let mut trailing = Vec::new();
            trailing.extend(self.piece(TriviaKind::Whitespace, tag_end, rest_start));
            let rest = self.slice(rest_start, content_end);
            let more = rest.starts_with('@');
            if !more {
                if !rest.is_empty() {
                    let rest_end = trim_end(self.source, rest_start, content_end);
                    let kind = if rest.starts_with('#') {
                        TriviaKind::Comment
                    } else {
                        let span = Span::new(rest_start, rest_end);
                        debug!("skipping text after tags at {span}");
                        self.diagnostics
                            .push(Diagnostic::unexpected_content(span, "text after tags"));
                        TriviaKind::SkippedText
                    };
                    trailing.extend(self.piece(kind, rest_start, rest_end));
                    trailing.extend(self.piece(TriviaKind::Whitespace, rest_end, content_end));
                }
                trailing.extend(self.piece(TriviaKind::Newline, content_end, end));
            }
            self.pos = if more { rest_start } else { end };
            tags.push(Lexeme {
                kind: SyntaxKind::TagToken,
                start,
                text: self.slice(start, tag_end),
                leading: std::mem::take(&mut leading),
                trailing,
            });
            if !more {
                return tags;
            }
        }
    }

    /// Turn the current line into skipped-text trivia and report it.
    pub(crate) fn skip_line(&mut self, found: LineKind) {
        self.in_header = false;
        let (content_end, end) = line_bounds(self.source, self.pos);
        let text_end = trim_end(self.source, self.pos, content_end);
        let span = Span::new(self.pos, text_end);
        debug!("skipping unexpected {} at {span}", found.describe());
        self.push_pending(TriviaKind::SkippedText, self.pos, text_end);
        self.push_pending(TriviaKind::Whitespace, text_end, content_end);
        self.push_pending(TriviaKind::Newline, content_end, end);
        self.pos = end;
        self.diagnostics
            .push(Diagnostic::unexpected_content(span, found.describe()));
    }

    /// The zero-width end-of-file token carrying the remaining trivia.
    pub(crate) fn end_of_file(&mut self) -> Lexeme<'src> {
        self.collect_trivia();
        let start = self.pos;
        Lexeme {
            kind: SyntaxKind::EndOfFileToken,
            start,
            text: "",
            leading: self.take_leading(),
            trailing: Vec::new(),
        }
    }

    /// Classify the first line after the current run of tag lines.
    pub(crate) fn peek_after_tags(&self) -> LineKind {
        let mut offset = self.pos;
        while offset < self.source.len() {
            let (content_end, end) = line_bounds(self.source, offset);
            let text = self.slice(offset, content_end).trim_start();
            offset = end;
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            let kind = classify(text, self.dialect);
            if kind != LineKind::Tags {
                return kind;
            }
        }
        LineKind::Eof
    }

    /// Whether an `Examples` line follows before the next section starts.
    ///
    /// Doc string bodies are skipped so their content cannot end the search.
    pub(crate) fn section_has_examples(&self) -> bool {
        let mut offset = self.pos;
        let mut fence: Option<DocStringDelimiter> = None;
        while offset < self.source.len() {
            let (content_end, end) = line_bounds(self.source, offset);
            let text = self.slice(offset, content_end).trim();
            offset = end;
            if let Some(open) = fence {
                if text == open.as_str() {
                    fence = None;
                }
                continue;
            }
            if text.is_empty() || text.starts_with('#') {
                continue;
            }
            match classify(text, self.dialect) {
                LineKind::DocString(delimiter) => fence = Some(delimiter),
                LineKind::Keyword(found) if found.role() == KeywordRole::Examples => return true,
                LineKind::Keyword(found) if found.role().is_structural() => return false,
                _ => {}
            }
        }
        false
    }
}
