//! Table row lexing.

use super::Lexer;
use super::line::{line_bounds, skip_whitespace, trim_end};
use crate::syntax::{Trivia, TriviaKind};

/// Raw text of one cell with the whitespace around it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct CellLexeme<'src> {
    /// Cell text as written, escapes included. Empty for an empty cell.
    pub(crate) raw: &'src str,
    pub(crate) leading: Vec<Trivia>,
    pub(crate) trailing: Vec<Trivia>,
}

/// One table row split into cells.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct RowLexeme<'src> {
    /// Leading trivia of the opening `|`.
    pub(crate) leading: Vec<Trivia>,
    pub(crate) cells: Vec<CellLexeme<'src>>,
    /// Trailing trivia of the final `|`, present or missing.
    pub(crate) end_trivia: Vec<Trivia>,
    /// Whether the last cell is followed by a `|`.
    pub(crate) closed: bool,
    /// Where a missing closing `|` would sit.
    pub(crate) end: usize,
}

/// Offset of the first unescaped `|` in `from..limit`, or `limit`.
fn cell_end(source: &str, from: usize, limit: usize) -> usize {
    let Some(slice) = source.get(from..limit) else {
        return limit;
    };
    let mut escaped = false;
    for (index, ch) in slice.char_indices() {
        if escaped {
            escaped = false;
        } else if ch == '\\' {
            escaped = true;
        } else if ch == '|' {
            return from + index;
        }
    }
    limit
}

impl<'src> Lexer<'src> {
    /// Split the current line, which starts with `|`, into cells.
    ///
    /// `#` has no special meaning inside a row. Text after the last `|`
    /// becomes a final cell without a closing bar.
    pub(crate) fn table_row(&mut self) -> RowLexeme<'src> {
        let leading = self.take_leading();
        let (content_end, end) = line_bounds(self.source, self.pos);
        let mut cursor = self.pos + 1;
        let mut cells = Vec::new();
        let closed = loop {
            let start = skip_whitespace(self.source, cursor, content_end);
            if start == content_end {
                break true;
            }
            let bar = cell_end(self.source, start, content_end);
            let raw_end = trim_end(self.source, start, bar);
            cells.push(CellLexeme {
                raw: self.slice(start, raw_end),
                leading: self.piece(TriviaKind::Whitespace, cursor, start).into_iter().collect(),
                trailing: self.piece(TriviaKind::Whitespace, raw_end, bar).into_iter().collect(),
            });
            if bar == content_end {
                cursor = content_end;
                break false;
            }
            cursor = bar + 1;
        };
        let mut end_trivia = Vec::new();
        end_trivia.extend(self.piece(TriviaKind::Whitespace, cursor, content_end));
        end_trivia.extend(self.piece(TriviaKind::Newline, content_end, end));
        self.pos = end;
        RowLexeme {
            leading,
            cells,
            end_trivia,
            closed,
            end: content_end,
        }
    }
}
