//! Grammar roles a dialect keyword can play.
//!
//! [`KeywordRole`] is the language-independent identity of a keyword: the
//! Creole `Karakteristik` and the English `Feature` both have the
//! [`KeywordRole::Feature`] role. The parser dispatches on roles, never on
//! spellings.

use std::fmt;
use std::str::FromStr;

use crate::errors::DialectError;

/// Role of a keyword in the Gherkin grammar.
///
/// Step roles include `And`, `But` and the `*` wildcard for completeness;
/// consumers that need the semantic step type resolve them against the
/// preceding primary step using [`resolve`](Self::resolve).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum KeywordRole {
    /// Introduces a feature file.
    Feature,
    /// Introduces a business rule grouping scenarios.
    Rule,
    /// Steps shared by every scenario of the enclosing feature or rule.
    Background,
    /// A scenario template expanded from one or more `Examples` tables.
    ScenarioOutline,
    /// A concrete scenario.
    Scenario,
    /// A table of values for an outline.
    Examples,
    /// Setup preconditions for a scenario.
    Given,
    /// Perform an action when testing behaviour.
    When,
    /// Assert the expected outcome of a scenario.
    Then,
    /// Additional conditions that share context with the previous step.
    And,
    /// Negative or contrasting conditions.
    But,
    /// The `*` bullet, usable in place of any step keyword.
    Wildcard,
}

impl KeywordRole {
    /// Every role, in tie-breaking priority order.
    pub const ALL: [Self; 12] = [
        Self::Feature,
        Self::Rule,
        Self::Background,
        Self::ScenarioOutline,
        Self::Scenario,
        Self::Examples,
        Self::Given,
        Self::When,
        Self::Then,
        Self::And,
        Self::But,
        Self::Wildcard,
    ];

    /// Roles that introduce a section and require a trailing colon.
    pub const STRUCTURAL: [Self; 6] = [
        Self::Feature,
        Self::Rule,
        Self::Background,
        Self::ScenarioOutline,
        Self::Scenario,
        Self::Examples,
    ];

    /// Roles that introduce a step.
    pub const STEPS: [Self; 6] = [
        Self::Given,
        Self::When,
        Self::Then,
        Self::And,
        Self::But,
        Self::Wildcard,
    ];

    /// Return the canonical English name of the role.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst_dialects::KeywordRole;
    ///
    /// assert_eq!(KeywordRole::ScenarioOutline.as_str(), "Scenario Outline");
    /// assert_eq!(KeywordRole::Wildcard.as_str(), "*");
    /// ```
    #[must_use]
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Feature => "Feature",
            Self::Rule => "Rule",
            Self::Background => "Background",
            Self::ScenarioOutline => "Scenario Outline",
            Self::Scenario => "Scenario",
            Self::Examples => "Examples",
            Self::Given => "Given",
            Self::When => "When",
            Self::Then => "Then",
            Self::And => "And",
            Self::But => "But",
            Self::Wildcard => "*",
        }
    }

    /// Whether the role introduces a step.
    #[must_use]
    pub const fn is_step(self) -> bool {
        matches!(
            self,
            Self::Given | Self::When | Self::Then | Self::And | Self::But | Self::Wildcard
        )
    }

    /// Whether the role introduces a section header (`Feature:`, `Rule:`, ...).
    #[must_use]
    pub const fn is_structural(self) -> bool {
        !self.is_step()
    }

    /// Resolve conjunctions to the semantic role of the previous step.
    ///
    /// When the current role is `And`, `But` or `*`, returns the value stored
    /// in `prev`. For primary roles (`Given`/`When`/`Then`), updates `prev`
    /// and returns the role unchanged. Structural roles pass through without
    /// touching `prev`.
    ///
    /// # Examples
    ///
    /// ```
    /// use gherkin_cst_dialects::KeywordRole;
    ///
    /// let mut prev = Some(KeywordRole::Given);
    /// assert_eq!(KeywordRole::And.resolve(&mut prev), KeywordRole::Given);
    /// assert_eq!(KeywordRole::When.resolve(&mut prev), KeywordRole::When);
    /// assert_eq!(prev, Some(KeywordRole::When));
    /// ```
    #[must_use]
    pub fn resolve(self, prev: &mut Option<Self>) -> Self {
        match self {
            Self::And | Self::But | Self::Wildcard => prev.unwrap_or(Self::Given),
            Self::Given | Self::When | Self::Then => {
                *prev = Some(self);
                self
            }
            structural => structural,
        }
    }

    /// Key under which the role's spellings are stored in dialect data.
    pub(crate) const fn data_key(self) -> &'static str {
        match self {
            Self::Feature => "feature",
            Self::Rule => "rule",
            Self::Background => "background",
            Self::ScenarioOutline => "scenarioOutline",
            Self::Scenario => "scenario",
            Self::Examples => "examples",
            Self::Given => "given",
            Self::When => "when",
            Self::Then => "then",
            Self::And => "and",
            Self::But => "but",
            Self::Wildcard => "*",
        }
    }
}

impl fmt::Display for KeywordRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for KeywordRole {
    type Err = DialectError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let trimmed = value.trim();
        Self::ALL
            .into_iter()
            .find(|role| {
                role.as_str().eq_ignore_ascii_case(trimmed)
                    || role.data_key().eq_ignore_ascii_case(trimmed)
            })
            .ok_or_else(|| DialectError::UnknownRole(trimmed.to_string()))
    }
}

impl TryFrom<&str> for KeywordRole {
    type Error = DialectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        value.parse()
    }
}
