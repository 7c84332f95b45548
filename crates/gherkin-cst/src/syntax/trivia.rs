//! Trivia: text attached to tokens that carries no grammatical meaning.

use std::fmt;

/// Kind of a trivia piece.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TriviaKind {
    /// A run of inline whitespace, never containing a line break.
    Whitespace,
    /// `\n` or `\r\n`.
    Newline,
    /// A `#` comment line, excluding its terminator.
    Comment,
    /// A `# language: xx` comment recognised in the document header.
    LanguageDirective,
    /// Source text that the parser could not place in the grammar.
    SkippedText,
}

/// One piece of trivia.
///
/// # Examples
///
/// ```
/// use gherkin_cst::{Trivia, TriviaKind};
///
/// let comment = Trivia::comment("# language: fr");
/// assert_eq!(comment.kind(), TriviaKind::Comment);
/// assert_eq!(comment.text_len(), 14);
/// ```
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Trivia {
    kind: TriviaKind,
    text: Box<str>,
}

impl Trivia {
    /// Create a trivia piece of `kind`.
    #[must_use]
    pub fn new(kind: TriviaKind, text: &str) -> Self {
        Self {
            kind,
            text: text.into(),
        }
    }

    /// Whitespace trivia.
    #[must_use]
    pub fn whitespace(text: &str) -> Self {
        Self::new(TriviaKind::Whitespace, text)
    }

    /// Newline trivia.
    #[must_use]
    pub fn newline(text: &str) -> Self {
        Self::new(TriviaKind::Newline, text)
    }

    /// Comment trivia.
    #[must_use]
    pub fn comment(text: &str) -> Self {
        Self::new(TriviaKind::Comment, text)
    }

    /// Skipped-text trivia.
    #[must_use]
    pub fn skipped(text: &str) -> Self {
        Self::new(TriviaKind::SkippedText, text)
    }

    /// Kind of the piece.
    #[must_use]
    pub const fn kind(&self) -> TriviaKind {
        self.kind
    }

    /// Source text of the piece.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Byte length of the piece.
    #[must_use]
    pub fn text_len(&self) -> usize {
        self.text.len()
    }

    /// Whether the piece is a comment or a language directive.
    #[must_use]
    pub const fn is_comment(&self) -> bool {
        matches!(self.kind, TriviaKind::Comment | TriviaKind::LanguageDirective)
    }

    /// Language code named by a directive piece.
    #[must_use]
    pub fn language(&self) -> Option<&str> {
        match self.kind {
            TriviaKind::LanguageDirective => language_directive(&self.text),
            _ => None,
        }
    }
}

impl fmt::Debug for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:?}({:?})", self.kind, self.text)
    }
}

impl fmt::Display for Trivia {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.text)
    }
}

/// Total byte length of a trivia list.
pub(crate) fn trivia_len(trivia: &[Trivia]) -> usize {
    trivia.iter().map(Trivia::text_len).sum()
}

/// Parse `# language: code` from a comment line with indentation removed.
///
/// Whitespace is optional around `#` and `:`; the code runs to the next
/// whitespace.
pub(crate) fn language_directive(comment: &str) -> Option<&str> {
    let rest = comment.strip_prefix('#')?.trim_start();
    let rest = rest.strip_prefix("language")?.trim_start();
    let rest = rest.strip_prefix(':')?.trim_start();
    let code = rest.split(char::is_whitespace).next()?;
    (!code.is_empty()).then_some(code)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("# language: ht", Some("ht"))]
    #[case("#language:fr", Some("fr"))]
    #[case("#  language :  pt  ", Some("pt"))]
    #[case("# language: en-lol extra", Some("en-lol"))]
    #[case("# language:", None)]
    #[case("# languages: fr", None)]
    #[case("# just a comment", None)]
    fn parses_directives(#[case] comment: &str, #[case] expected: Option<&str>) {
        assert_eq!(language_directive(comment), expected);
    }

    #[test]
    fn directive_trivia_exposes_language() {
        let directive = Trivia::new(TriviaKind::LanguageDirective, "# language: ht");
        assert_eq!(directive.language(), Some("ht"));
        assert!(directive.is_comment());
        assert_eq!(Trivia::comment("# language: ht").language(), None);
    }

    #[test]
    fn sums_lengths() {
        let trivia = [Trivia::whitespace("  "), Trivia::newline("\r\n")];
        assert_eq!(trivia_len(&trivia), 4);
    }
}
