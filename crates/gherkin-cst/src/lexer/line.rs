//! Pure line scanning and classification.
//!
//! Gherkin is line oriented: the first significant characters of a line
//! decide what the line is. These helpers never mutate lexer state so the
//! parser can use them for lookahead.

use gherkin_cst_dialects::{Dialect, KeywordMatch, KeywordRole};

use crate::escape::DocStringDelimiter;

/// What a line holds, judged from its first significant characters.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum LineKind {
    /// No further lines.
    Eof,
    /// Starts with `@`.
    Tags,
    /// Starts with `|`.
    TableRow,
    /// Starts with a doc string fence.
    DocString(DocStringDelimiter),
    /// Starts with a keyword of the active dialect.
    Keyword(KeywordMatch),
    /// Anything else.
    Text,
}

impl LineKind {
    pub(crate) fn role(self) -> Option<KeywordRole> {
        match self {
            Self::Keyword(found) => Some(found.role()),
            _ => None,
        }
    }

    pub(crate) fn is_step(self) -> bool {
        self.role().is_some_and(KeywordRole::is_step)
    }

    /// Short description used in diagnostics.
    pub(crate) fn describe(self) -> &'static str {
        match self {
            Self::Eof => "end of file",
            Self::Tags => "tags",
            Self::TableRow => "table row",
            Self::DocString(_) => "doc string",
            Self::Keyword(found) => match found.role() {
                KeywordRole::Feature => "`Feature` line",
                KeywordRole::Rule => "`Rule` line",
                KeywordRole::Background => "`Background` line",
                KeywordRole::ScenarioOutline => "`Scenario Outline` line",
                KeywordRole::Scenario => "`Scenario` line",
                KeywordRole::Examples => "`Examples` line",
                _ => "step",
            },
            Self::Text => "text",
        }
    }
}

/// Classify significant line content: indentation removed, not blank and
/// not a comment.
pub(crate) fn classify(text: &str, dialect: &Dialect) -> LineKind {
    if text.starts_with('@') {
        LineKind::Tags
    } else if text.starts_with('|') {
        LineKind::TableRow
    } else if let Some(delimiter) = DocStringDelimiter::at_start(text) {
        LineKind::DocString(delimiter)
    } else {
        dialect
            .match_any(text)
            .map_or(LineKind::Text, LineKind::Keyword)
    }
}

/// End of the content of the line containing `from`, and the offset just
/// past its terminator. Both equal the source length on the last line.
pub(crate) fn line_bounds(source: &str, from: usize) -> (usize, usize) {
    let Some(relative) = source.get(from..).and_then(|rest| rest.find('\n')) else {
        return (source.len(), source.len());
    };
    let newline = from + relative;
    let content_end = if newline > from && source.as_bytes().get(newline - 1) == Some(&b'\r') {
        newline - 1
    } else {
        newline
    };
    (content_end, newline + 1)
}

/// Offset of the first non-whitespace character in `from..limit`, or `limit`.
pub(crate) fn skip_whitespace(source: &str, from: usize, limit: usize) -> usize {
    source
        .get(from..limit)
        .and_then(|slice| {
            slice
                .char_indices()
                .find(|(_, ch)| !ch.is_whitespace())
                .map(|(index, _)| from + index)
        })
        .unwrap_or(limit)
}

/// Offset just past the last non-whitespace character in `from..limit`, or
/// `from` when the range is all whitespace.
pub(crate) fn trim_end(source: &str, from: usize, limit: usize) -> usize {
    source
        .get(from..limit)
        .map_or(from, |slice| from + slice.trim_end().len())
}
