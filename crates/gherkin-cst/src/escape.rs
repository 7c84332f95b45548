//! Escaping rules for table cells and doc strings.
//!
//! Token text always keeps the escapes exactly as written; the decoded form
//! is stored as the token value.

use std::borrow::Cow;
use std::fmt;

/// Fence that opens and closes a doc string.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum DocStringDelimiter {
    /// `"""`
    Quotes,
    /// Three backticks.
    Backticks,
}

impl DocStringDelimiter {
    /// The fence as written in source.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Quotes => "\"\"\"",
            Self::Backticks => "```",
        }
    }

    /// The escaped form of the fence inside content.
    #[must_use]
    pub const fn escaped(self) -> &'static str {
        match self {
            Self::Quotes => "\\\"\\\"\\\"",
            Self::Backticks => "\\`\\`\\`",
        }
    }

    /// Fence at the start of `text`, if any.
    #[must_use]
    pub fn at_start(text: &str) -> Option<Self> {
        [Self::Quotes, Self::Backticks]
            .into_iter()
            .find(|delimiter| text.starts_with(delimiter.as_str()))
    }
}

impl fmt::Display for DocStringDelimiter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Decode the escapes of a table cell.
///
/// `\|` becomes `|`, `\\` becomes `\` and `\n` becomes a line feed. Any other
/// backslash is kept as written.
///
/// # Examples
///
/// ```
/// use gherkin_cst::unescape_table_cell;
///
/// assert_eq!(unescape_table_cell(r"Doflamingo \| pirate"), "Doflamingo | pirate");
/// assert_eq!(unescape_table_cell(r"C:\\path"), r"C:\path");
/// assert_eq!(unescape_table_cell(r"\t"), r"\t");
/// ```
#[must_use]
pub fn unescape_table_cell(raw: &str) -> Cow<'_, str> {
    if !raw.contains('\\') {
        return Cow::Borrowed(raw);
    }
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars();
    while let Some(ch) = chars.next() {
        if ch != '\\' {
            out.push(ch);
            continue;
        }
        match chars.next() {
            Some('|') => out.push('|'),
            Some('\\') => out.push('\\'),
            Some('n') => out.push('\n'),
            Some(other) => {
                out.push('\\');
                out.push(other);
            }
            None => out.push('\\'),
        }
    }
    Cow::Owned(out)
}

/// Escape a value for use as table cell text.
#[must_use]
pub fn escape_table_cell(value: &str) -> Cow<'_, str> {
    if !value.contains(['\\', '|', '\n']) {
        return Cow::Borrowed(value);
    }
    let mut out = String::with_capacity(value.len() + 4);
    for ch in value.chars() {
        match ch {
            '\\' => out.push_str("\\\\"),
            '|' => out.push_str("\\|"),
            '\n' => out.push_str("\\n"),
            other => out.push(other),
        }
    }
    Cow::Owned(out)
}

/// Decode escaped fences in doc string content.
///
/// Only the fence that opened the doc string is unescaped; indentation and
/// every other character are kept.
///
/// # Examples
///
/// ```
/// use gherkin_cst::{DocStringDelimiter, unescape_doc_string};
///
/// let raw = "  <p>\\\"\\\"\\\"</p>\n";
/// assert_eq!(unescape_doc_string(raw, DocStringDelimiter::Quotes), "  <p>\"\"\"</p>\n");
/// assert_eq!(unescape_doc_string(raw, DocStringDelimiter::Backticks), raw);
/// ```
#[must_use]
pub fn unescape_doc_string(raw: &str, delimiter: DocStringDelimiter) -> Cow<'_, str> {
    if raw.contains(delimiter.escaped()) {
        Cow::Owned(raw.replace(delimiter.escaped(), delimiter.as_str()))
    } else {
        Cow::Borrowed(raw)
    }
}

/// Escape fences in a doc string value so it cannot close the doc string.
#[must_use]
pub fn escape_doc_string(value: &str, delimiter: DocStringDelimiter) -> Cow<'_, str> {
    if value.contains(delimiter.as_str()) {
        Cow::Owned(value.replace(delimiter.as_str(), delimiter.escaped()))
    } else {
        Cow::Borrowed(value)
    }
}
