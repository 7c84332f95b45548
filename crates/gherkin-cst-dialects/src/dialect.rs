//! Keyword spelling tables and longest-match lookup.

use crate::role::KeywordRole;

/// One literal spelling of a keyword role.
#[derive(Debug, Clone, PartialEq, Eq)]
struct Spelling {
    role: KeywordRole,
    text: String,
    /// Step spellings stored with a trailing space must be followed by
    /// whitespace or the end of the line. Spellings such as the Japanese `前提`
    /// are glued directly to the step text.
    needs_separator: bool,
}

/// Result of a successful keyword lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct KeywordMatch {
    role: KeywordRole,
    len: usize,
}

impl KeywordMatch {
    /// Role of the matched keyword.
    #[must_use]
    pub const fn role(&self) -> KeywordRole {
        self.role
    }

    /// Byte length of the matched spelling, excluding any separator.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether the match is zero-length. Never true for a real match.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }
}

/// Keyword table for a single natural language.
///
/// Spellings are held longest first so the first acceptable candidate during
/// lookup is also the longest. Equal-length spellings keep the role priority
/// order of [`KeywordRole::ALL`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Dialect {
    code: String,
    name: String,
    native: String,
    spellings: Vec<Spelling>,
}

impl Dialect {
    /// Start building a dialect for `code`.
    pub(crate) fn new(code: &str, name: &str, native: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            native: native.to_string(),
            spellings: Vec::new(),
        }
    }

    /// Register the spellings of `role` as written in dialect data.
    ///
    /// Step spellings carry their separator as a trailing space (`"Given "`);
    /// the `*` bullet is registered once under [`KeywordRole::Wildcard`]
    /// whichever step role lists it.
    pub(crate) fn with_spellings<'a, I>(mut self, role: KeywordRole, spellings: I) -> Self
    where
        I: IntoIterator<Item = &'a str>,
    {
        for raw in spellings {
            let trimmed = raw.trim_end_matches(' ');
            if trimmed.is_empty() {
                continue;
            }
            let (role, needs_separator) = if !role.is_step() {
                (role, false)
            } else if trimmed == "*" {
                (KeywordRole::Wildcard, true)
            } else {
                (role, trimmed.len() != raw.len())
            };
            let duplicate = self
                .spellings
                .iter()
                .any(|s| s.role == role && s.text == trimmed);
            if !duplicate {
                self.spellings.push(Spelling {
                    role,
                    text: trimmed.to_string(),
                    needs_separator,
                });
            }
        }
        self.spellings
            .sort_by(|a, b| b.text.len().cmp(&a.text.len()).then(a.role.cmp(&b.role)));
        self
    }

    /// Language code, for example `en` or `ht`.
    #[must_use]
    pub fn code(&self) -> &str {
        &self.code
    }

    /// English name of the language.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Name of the language in the language itself.
    #[must_use]
    pub fn native(&self) -> &str {
        &self.native
    }

    /// Iterate over the spellings registered for `role`, longest first.
    pub fn spellings(&self, role: KeywordRole) -> impl Iterator<Item = &str> + '_ {
        self.spellings
            .iter()
            .filter(move |s| s.role == role)
            .map(|s| s.text.as_str())
    }

    /// Find the longest keyword among `roles` at the start of `text`.
    ///
    /// `text` is the remainder of a line with indentation already removed and
    /// without its line terminator. Structural keywords must be followed
    /// immediately by `:`; step keywords must be followed by whitespace or the
    /// end of the text unless the dialect glues them to the step text.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst_dialects::{KeywordRole, default_dialect};
    ///
    /// let en = default_dialect();
    /// let found = en.match_keyword("Scenario Outline: eating", &KeywordRole::STRUCTURAL);
    /// assert_eq!(found.map(|m| m.role()), Some(KeywordRole::ScenarioOutline));
    /// assert!(en.match_keyword("Given", &[KeywordRole::Given]).is_some());
    /// assert!(en.match_keyword("Givens", &[KeywordRole::Given]).is_none());
    /// ```
    #[must_use]
    pub fn match_keyword(&self, text: &str, roles: &[KeywordRole]) -> Option<KeywordMatch> {
        self.spellings
            .iter()
            .filter(|s| roles.contains(&s.role))
            .find(|s| {
                text.strip_prefix(s.text.as_str())
                    .is_some_and(|rest| s.accepts_follower(rest))
            })
            .map(|s| KeywordMatch {
                role: s.role,
                len: s.text.len(),
            })
    }

    /// Find the longest keyword of any role at the start of `text`.
    #[must_use]
    pub fn match_any(&self, text: &str) -> Option<KeywordMatch> {
        self.match_keyword(text, &KeywordRole::ALL)
    }
}

impl Spelling {
    fn accepts_follower(&self, rest: &str) -> bool {
        if self.role.is_structural() {
            rest.starts_with(':')
        } else if self.needs_separator {
            rest.is_empty() || rest.starts_with(char::is_whitespace)
        } else {
            true
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn creole() -> Dialect {
        Dialect::new("ht", "Creole", "kreyòl")
            .with_spellings(KeywordRole::Feature, ["Karakteristik", "Mak"])
            .with_spellings(KeywordRole::When, ["* ", "Lè ", "Le "])
            .with_spellings(KeywordRole::Then, ["* ", "Lè sa a ", "Le sa a "])
            .with_spellings(KeywordRole::Given, ["* ", "Sipoze ", "Sipoze ke "])
    }

    #[rstest]
    #[case("Le sa a there should be agent J", KeywordRole::Then, "Le sa a".len())]
    #[case("Le I erase agent K's memory", KeywordRole::When, "Le".len())]
    #[case("Sipoze ke there is agent J", KeywordRole::Given, "Sipoze ke".len())]
    #[case("* anything", KeywordRole::Wildcard, 1)]
    #[case("Karakteristik: X", KeywordRole::Feature, "Karakteristik".len())]
    fn prefers_longest_spelling(
        creole: Dialect,
        #[case] text: &str,
        #[case] role: KeywordRole,
        #[case] len: usize,
    ) {
        let found = creole.match_any(text);
        assert_eq!(found, Some(KeywordMatch { role, len }));
    }

    #[rstest]
    #[case("Karakteristik X")]
    #[case("Lesa a")]
    #[case("*bold")]
    #[case("Maki: no")]
    fn rejects_keywords_without_follower(creole: Dialect, #[case] text: &str) {
        assert_eq!(creole.match_any(text), None);
    }

    #[rstest]
    fn restricts_lookup_to_requested_roles(creole: Dialect) {
        let found = creole.match_keyword("Le sa a x", &[KeywordRole::When]);
        assert_eq!(found.map(|m| m.role()), Some(KeywordRole::When));
        assert_eq!(found.map(|m| m.len()), Some(2));
    }

    #[rstest]
    fn registers_wildcard_once(creole: Dialect) {
        assert_eq!(creole.spellings(KeywordRole::Wildcard).count(), 1);
        assert_eq!(creole.spellings(KeywordRole::Given).count(), 2);
    }

    #[test]
    fn glued_spellings_accept_any_follower() {
        let ja = Dialect::new("ja", "Japanese", "日本語")
            .with_spellings(KeywordRole::Given, ["* ", "前提"]);
        let found = ja.match_any("前提Xがある");
        assert_eq!(found.map(|m| m.role()), Some(KeywordRole::Given));
        assert_eq!(found.map(|m| m.len()), Some("前提".len()));
    }

    #[test]
    fn keywords_match_at_end_of_line() {
        let en = Dialect::new("en", "English", "English")
            .with_spellings(KeywordRole::Given, ["Given "]);
        assert!(en.match_any("Given").is_some());
        assert!(en.match_any("Given\u{a0}text").is_some());
    }
}
