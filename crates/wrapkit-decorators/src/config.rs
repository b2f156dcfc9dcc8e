//! Decorator configuration
//!
//! Settings shared by the ready-made decorators: how enumeration identifiers
//! are normalized, and where version information is read from.

use crate::error::DecoratorError;
use serde::{Deserialize, Serialize};

/// Case applied to identifiers before enumeration lookup
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IdentifierCase {
    /// `"one"` → `"ONE"`
    #[default]
    Upper,

    /// `"ONE"` → `"one"`
    Lower,

    /// Leave as given
    Preserve,
}

impl IdentifierCase {
    /// Apply this case to `identifier`
    #[must_use]
    pub fn apply(&self, identifier: &str) -> String {
        match self {
            Self::Upper => identifier.to_uppercase(),
            Self::Lower => identifier.to_lowercase(),
            Self::Preserve => identifier.to_string(),
        }
    }
}

/// Configuration for the ready-made decorators
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DecoratorConfig {
    /// Case applied to enumeration identifiers
    pub identifier_case: IdentifierCase,
    /// Whether surrounding whitespace is stripped from identifiers
    pub trim_identifiers: bool,
    /// Changelog file name, relative to the project directory
    pub changelog_file: String,
    /// Version reported when the changelog has none
    pub fallback_version: String,
}

impl DecoratorConfig {
    /// Create default configuration
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse from TOML; absent keys keep their defaults
    ///
    /// # Errors
    /// [`DecoratorError::Config`] on malformed TOML or mistyped keys.
    pub fn from_toml_str(source: &str) -> Result<Self, DecoratorError> {
        Ok(toml::from_str(source)?)
    }

    /// With identifier case
    #[inline]
    #[must_use]
    pub fn with_identifier_case(mut self, case: IdentifierCase) -> Self {
        self.identifier_case = case;
        self
    }

    /// With identifier trimming
    #[inline]
    #[must_use]
    pub fn with_trim_identifiers(mut self, trim: bool) -> Self {
        self.trim_identifiers = trim;
        self
    }

    /// With changelog file name
    #[inline]
    #[must_use]
    pub fn with_changelog_file(mut self, file: impl Into<String>) -> Self {
        self.changelog_file = file.into();
        self
    }

    /// With fallback version
    #[inline]
    #[must_use]
    pub fn with_fallback_version(mut self, version: impl Into<String>) -> Self {
        self.fallback_version = version.into();
        self
    }

    /// Normalize an identifier as configured
    #[must_use]
    pub fn normalize_identifier(&self, identifier: &str) -> String {
        let identifier = if self.trim_identifiers {
            identifier.trim()
        } else {
            identifier
        };
        self.identifier_case.apply(identifier)
    }
}

impl Default for DecoratorConfig {
    fn default() -> Self {
        Self {
            identifier_case: IdentifierCase::Upper,
            trim_identifiers: true,
            changelog_file: "CHANGELOG.md".to_string(),
            fallback_version: "0.1.0".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_normalization_strips_and_uppercases() {
        let config = DecoratorConfig::new();
        assert_eq!(config.normalize_identifier("  two \n"), "TWO");
    }

    #[test]
    fn builder_overrides() {
        let config = DecoratorConfig::new()
            .with_identifier_case(IdentifierCase::Preserve)
            .with_trim_identifiers(false);
        assert_eq!(config.normalize_identifier(" Two"), " Two");
    }

    #[test]
    fn partial_toml_keeps_defaults() {
        let config = DecoratorConfig::from_toml_str(
            r#"
            identifier_case = "lower"
            fallback_version = "0.0.0"
            "#,
        )
        .unwrap();

        assert_eq!(config.identifier_case, IdentifierCase::Lower);
        assert_eq!(config.fallback_version, "0.0.0");
        assert_eq!(config.changelog_file, "CHANGELOG.md");
        assert!(config.trim_identifiers);
    }

    #[test]
    fn malformed_toml_is_config_error() {
        let err = DecoratorConfig::from_toml_str("identifier_case = 3").unwrap_err();
        assert!(matches!(err, DecoratorError::Config(_)));
    }
}
