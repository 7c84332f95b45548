//! Process-wide registry of bundled dialects.
//!
//! English is built in code and is always available. Every other language is
//! decoded once from the embedded `gherkin-languages.json`, which follows the
//! layout of the upstream Cucumber keyword catalogue.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use serde::Deserialize;

use crate::dialect::Dialect;
use crate::errors::DialectError;
use crate::role::KeywordRole;

/// Code of the dialect used when a document carries no language directive.
pub const DEFAULT_LANGUAGE: &str = "en";

const BUNDLED: &str = include_str!("gherkin-languages.json");

static ENGLISH: LazyLock<Dialect> = LazyLock::new(|| {
    Dialect::new(DEFAULT_LANGUAGE, "English", "English")
        .with_spellings(KeywordRole::Feature, ["Feature", "Business Need", "Ability"])
        .with_spellings(KeywordRole::Background, ["Background"])
        .with_spellings(KeywordRole::Rule, ["Rule"])
        .with_spellings(KeywordRole::Scenario, ["Example", "Scenario"])
        .with_spellings(
            KeywordRole::ScenarioOutline,
            ["Scenario Outline", "Scenario Template"],
        )
        .with_spellings(KeywordRole::Examples, ["Examples", "Scenarios"])
        .with_spellings(KeywordRole::Given, ["* ", "Given "])
        .with_spellings(KeywordRole::When, ["* ", "When "])
        .with_spellings(KeywordRole::Then, ["* ", "Then "])
        .with_spellings(KeywordRole::And, ["* ", "And "])
        .with_spellings(KeywordRole::But, ["* ", "But "])
});

static REGISTRY: LazyLock<Result<BTreeMap<String, Dialect>, DialectError>> =
    LazyLock::new(|| {
        decode(BUNDLED).inspect_err(|err| log::error!("bundled Gherkin dialects unusable: {err}"))
    });

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawDialect {
    name: String,
    native: String,
    feature: Vec<String>,
    background: Vec<String>,
    rule: Vec<String>,
    scenario: Vec<String>,
    scenario_outline: Vec<String>,
    examples: Vec<String>,
    given: Vec<String>,
    when: Vec<String>,
    then: Vec<String>,
    and: Vec<String>,
    but: Vec<String>,
}

impl RawDialect {
    fn into_dialect(self, code: &str) -> Dialect {
        let table = [
            (KeywordRole::Feature, &self.feature),
            (KeywordRole::Background, &self.background),
            (KeywordRole::Rule, &self.rule),
            (KeywordRole::Scenario, &self.scenario),
            (KeywordRole::ScenarioOutline, &self.scenario_outline),
            (KeywordRole::Examples, &self.examples),
            (KeywordRole::Given, &self.given),
            (KeywordRole::When, &self.when),
            (KeywordRole::Then, &self.then),
            (KeywordRole::And, &self.and),
            (KeywordRole::But, &self.but),
        ];
        table.into_iter().fold(
            Dialect::new(code, &self.name, &self.native),
            |dialect, (role, spellings)| {
                dialect.with_spellings(role, spellings.iter().map(String::as_str))
            },
        )
    }
}

fn decode(data: &str) -> Result<BTreeMap<String, Dialect>, DialectError> {
    let raw: BTreeMap<String, RawDialect> =
        serde_json::from_str(data).map_err(|err| DialectError::MalformedData(err.to_string()))?;
    Ok(raw
        .into_iter()
        .filter(|(code, _)| code != DEFAULT_LANGUAGE)
        .map(|(code, raw)| {
            let dialect = raw.into_dialect(&code);
            (code, dialect)
        })
        .collect())
}

/// The English dialect.
#[must_use]
pub fn default_dialect() -> &'static Dialect {
    &ENGLISH
}

/// Look up a bundled dialect by language code.
///
/// Codes are matched exactly (`pt`, not `PT`).
///
/// # Examples
///
/// ```
/// use gherkin_cst_dialects::{KeywordRole, dialect};
///
/// let ht = dialect("ht").expect("bundled dialect");
/// assert!(ht.spellings(KeywordRole::Feature).any(|s| s == "Karakteristik"));
/// assert!(dialect("xx").is_none());
/// ```
#[must_use]
pub fn dialect(code: &str) -> Option<&'static Dialect> {
    try_dialect(code).ok()
}

/// Look up a bundled dialect by language code, reporting why it is missing.
///
/// # Errors
///
/// Returns [`DialectError::UnknownLanguage`] when no dialect uses `code`, or
/// [`DialectError::MalformedData`] if the bundled data failed to decode.
pub fn try_dialect(code: &str) -> Result<&'static Dialect, DialectError> {
    if code == DEFAULT_LANGUAGE {
        return Ok(default_dialect());
    }
    let registry = REGISTRY.as_ref().map_err(Clone::clone)?;
    registry
        .get(code)
        .ok_or_else(|| DialectError::UnknownLanguage(code.to_string()))
}

/// Codes of every bundled dialect, sorted.
#[must_use]
pub fn languages() -> Vec<&'static str> {
    let mut codes = vec![DEFAULT_LANGUAGE];
    if let Ok(registry) = REGISTRY.as_ref() {
        codes.extend(registry.keys().map(String::as_str));
    }
    codes.sort_unstable();
    codes
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn bundled_data_decodes() {
        assert!(REGISTRY.is_ok(), "bundled dialect data should decode");
    }

    #[rstest]
    #[case("de", KeywordRole::Feature, "Funktionalität")]
    #[case("es", KeywordRole::Examples, "Ejemplos")]
    #[case("fr", KeywordRole::Given, "Etant donné que")]
    #[case("ht", KeywordRole::Then, "Le sa a")]
    #[case("ja", KeywordRole::Given, "前提")]
    #[case("nl", KeywordRole::ScenarioOutline, "Abstract Scenario")]
    #[case("pt", KeywordRole::Background, "Contexto")]
    #[case("it", KeywordRole::Feature, "Funzionalità")]
    #[case("ru", KeywordRole::Given, "Дано")]
    #[case("pl", KeywordRole::When, "Kiedy")]
    #[case("zh-CN", KeywordRole::Given, "假如")]
    #[case("sv", KeywordRole::ScenarioOutline, "Scenariomall")]
    #[case("tlh", KeywordRole::Then, "vaj")]
    fn bundles_expected_spellings(
        #[case] code: &str,
        #[case] role: KeywordRole,
        #[case] spelling: &str,
    ) {
        let Some(found) = dialect(code) else {
            panic!("dialect {code} should be bundled");
        };
        assert!(
            found.spellings(role).any(|s| s == spelling),
            "{code} should spell {role} as {spelling}"
        );
    }

    #[test]
    fn english_is_always_available() {
        assert_eq!(default_dialect().code(), "en");
        assert_eq!(dialect("en").map(Dialect::code), Some("en"));
    }

    #[test]
    fn lists_sorted_languages() {
        let codes = languages();
        assert!(codes.contains(&"en"));
        assert!(codes.contains(&"ht"));
        assert!(codes.contains(&"zh-TW"));
        assert_eq!(codes.iter().filter(|code| **code == "en").count(), 1);
        assert!(codes.windows(2).all(|pair| matches!(pair, [a, b] if a < b)));
    }

    #[test]
    fn reports_unknown_language() {
        assert_eq!(
            try_dialect("xx"),
            Err(DialectError::UnknownLanguage("xx".into()))
        );
    }

    #[test]
    fn rejects_malformed_data() {
        let Err(err) = decode("{ \"xx\": { \"name\": 1 } }") else {
            panic!("malformed data should not decode");
        };
        assert!(matches!(err, DialectError::MalformedData(_)));
    }
}
