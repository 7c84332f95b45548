//! Source buffer with byte addressing and line/column lookup.
//!
//! Offsets throughout the crate are byte offsets into the original text.
//! [`SourceText`] converts them to zero-based line and code-point column
//! positions for diagnostics.

use std::fmt;
use std::ops::Range;
use std::sync::Arc;

/// A half-open byte range within a source text.
///
/// # Examples
///
/// ```
/// use gherkin_cst::Span;
///
/// let span = Span::new(4, 10);
/// assert_eq!(span.len(), 6);
/// assert!(span.contains(4));
/// assert!(!span.contains(10));
/// assert_eq!(span.cover(Span::new(12, 14)), Span::new(4, 14));
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Span {
    start: usize,
    end: usize,
}

impl Span {
    /// Create a span from `start` to `end`; the bounds are swapped if reversed.
    #[must_use]
    pub const fn new(start: usize, end: usize) -> Self {
        if start <= end {
            Self { start, end }
        } else {
            Self {
                start: end,
                end: start,
            }
        }
    }

    /// Create a zero-width span at `offset`.
    #[must_use]
    pub const fn empty(offset: usize) -> Self {
        Self {
            start: offset,
            end: offset,
        }
    }

    /// Start offset (inclusive).
    #[must_use]
    pub const fn start(self) -> usize {
        self.start
    }

    /// End offset (exclusive).
    #[must_use]
    pub const fn end(self) -> usize {
        self.end
    }

    /// Length in bytes.
    #[must_use]
    pub const fn len(self) -> usize {
        self.end - self.start
    }

    /// Whether the span covers no bytes.
    #[must_use]
    pub const fn is_empty(self) -> bool {
        self.start == self.end
    }

    /// Whether `offset` lies inside the span.
    #[must_use]
    pub const fn contains(self, offset: usize) -> bool {
        self.start <= offset && offset < self.end
    }

    /// Whether `other` lies entirely inside the span.
    #[must_use]
    pub const fn contains_span(self, other: Self) -> bool {
        self.start <= other.start && other.end <= self.end
    }

    /// Smallest span covering both `self` and `other`.
    #[must_use]
    pub const fn cover(self, other: Self) -> Self {
        let start = if self.start < other.start {
            self.start
        } else {
            other.start
        };
        let end = if self.end > other.end {
            self.end
        } else {
            other.end
        };
        Self { start, end }
    }

    /// The span as a `Range`, suitable for slicing with `str::get`.
    #[must_use]
    pub const fn range(self) -> Range<usize> {
        self.start..self.end
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

impl From<Range<usize>> for Span {
    fn from(range: Range<usize>) -> Self {
        Self::new(range.start, range.end)
    }
}

/// Zero-based line and column of a position in a source text.
///
/// Columns count Unicode scalar values (code points), not bytes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LinePosition {
    /// Zero-based line index.
    pub line: usize,
    /// Zero-based code-point column within the line.
    pub column: usize,
}

impl fmt::Display for LinePosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line + 1, self.column + 1)
    }
}

/// Start and end [`LinePosition`] of a span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LineSpan {
    /// Position of the first byte.
    pub start: LinePosition,
    /// Position just past the last byte.
    pub end: LinePosition,
}

/// Immutable view over the text of a feature file.
///
/// Lines end at `\n` or `\r\n`; the terminator belongs to the line it ends.
///
/// # Examples
///
/// ```
/// use gherkin_cst::{LinePosition, SourceText, Span};
///
/// let text = SourceText::new("Feature: é\r\n  Scenario: x\n");
/// assert_eq!(text.line_count(), 3);
/// assert_eq!(text.line(1).and_then(|span| text.slice(span)), Some("  Scenario: x"));
/// assert_eq!(text.line_position(15), LinePosition { line: 1, column: 2 });
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceText {
    text: Arc<str>,
    line_starts: Vec<usize>,
}

impl SourceText {
    /// Index the lines of `text`.
    #[must_use]
    pub fn new(text: impl Into<Arc<str>>) -> Self {
        let text = text.into();
        let line_starts = std::iter::once(0)
            .chain(text.match_indices('\n').map(|(index, _)| index + 1))
            .collect();
        Self { text, line_starts }
    }

    /// The full text.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.text
    }

    /// Length in bytes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// Whether the text is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// Number of lines. A trailing terminator starts a final empty line.
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.line_starts.len()
    }

    /// Span of line `index`, excluding its terminator.
    #[must_use]
    pub fn line(&self, index: usize) -> Option<Span> {
        let start = *self.line_starts.get(index)?;
        let end = self
            .line_starts
            .get(index + 1)
            .map_or(self.text.len(), |next| {
                let bytes = self.text.as_bytes();
                let without_lf = next - 1;
                if without_lf > start && bytes.get(without_lf - 1) == Some(&b'\r') {
                    without_lf - 1
                } else {
                    without_lf
                }
            });
        Some(Span::new(start, end))
    }

    /// Line and column of `offset`, clamped to the end of the text.
    #[must_use]
    pub fn line_position(&self, offset: usize) -> LinePosition {
        let offset = offset.min(self.text.len());
        let line = self
            .line_starts
            .partition_point(|start| *start <= offset)
            .saturating_sub(1);
        let start = self.line_starts.get(line).copied().unwrap_or_default();
        let column = self
            .text
            .get(start..offset)
            .map_or(0, |prefix| prefix.chars().count());
        LinePosition { line, column }
    }

    /// Line and column bounds of `span`.
    #[must_use]
    pub fn line_span(&self, span: Span) -> LineSpan {
        LineSpan {
            start: self.line_position(span.start()),
            end: self.line_position(span.end()),
        }
    }

    /// Text covered by `span`, if it lies on character boundaries.
    #[must_use]
    pub fn slice(&self, span: Span) -> Option<&str> {
        self.text.get(span.range())
    }
}

impl fmt::Display for SourceText {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn span_normalises_reversed_bounds() {
        assert_eq!(Span::new(9, 3), Span::new(3, 9));
    }

    #[test]
    fn empty_span_contains_nothing() {
        let span = Span::empty(5);
        assert!(span.is_empty());
        assert!(!span.contains(5));
        assert!(Span::new(0, 10).contains_span(span));
    }

    #[rstest]
    #[case("", 1)]
    #[case("a", 1)]
    #[case("a\n", 2)]
    #[case("a\r\nb\nc", 3)]
    fn counts_lines(#[case] text: &str, #[case] expected: usize) {
        assert_eq!(SourceText::new(text).line_count(), expected);
    }

    #[test]
    fn line_spans_exclude_terminators() {
        let text = SourceText::new("one\r\ntwo\n\nfour");
        let lines: Vec<_> = (0..text.line_count())
            .filter_map(|index| text.line(index).and_then(|span| text.slice(span)))
            .collect();
        assert_eq!(lines, vec!["one", "two", "", "four"]);
        assert_eq!(text.line(4), None);
    }

    #[rstest]
    #[case(0, 0, 0)]
    #[case(3, 0, 3)]
    #[case(4, 1, 0)]
    #[case(7, 1, 3)]
    #[case(8, 1, 4)]
    #[case(100, 1, 4)]
    fn resolves_positions(#[case] offset: usize, #[case] line: usize, #[case] column: usize) {
        let text = SourceText::new("abc\nxyzw");
        assert_eq!(text.line_position(offset), LinePosition { line, column });
    }

    #[test]
    fn columns_count_code_points() {
        let text = SourceText::new("Fonctionnalité: é");
        let offset = "Fonctionnalité: ".len();
        assert_eq!(text.line_position(offset).column, 16);
    }

    #[test]
    fn line_position_displays_one_based() {
        assert_eq!(LinePosition { line: 0, column: 4 }.to_string(), "1:5");
    }
}
