//! Version extraction from a changelog
//!
//! The version is the first bracketed dotted number in the changelog, as in
//! `## [1.4.0] - 2024-02-01`.

use crate::config::DecoratorConfig;
use crate::error::DecoratorError;
use once_cell::sync::Lazy;
use regex::Regex;
use std::io::ErrorKind;
use std::path::Path;

static VERSION_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[([\d.]+)]").expect("version pattern is a valid regex"));

/// First version listed in `changelog`, if any
#[must_use]
pub fn version_from_changelog(changelog: &str) -> Option<String> {
    VERSION_PATTERN
        .captures(changelog)
        .and_then(|captures| captures.get(1))
        .map(|m| m.as_str().to_string())
}

/// Version of the project in `directory`, using default settings
///
/// # Errors
/// As [`get_version_with`].
pub fn get_version(directory: &Path) -> Result<String, DecoratorError> {
    get_version_with(directory, &DecoratorConfig::default())
}

/// Version of the project in `directory`
///
/// Reads `config.changelog_file`. A missing changelog, or one without any
/// version, yields `config.fallback_version`.
///
/// # Errors
/// [`DecoratorError::Io`] for read failures other than a missing file.
pub fn get_version_with(directory: &Path, config: &DecoratorConfig) -> Result<String, DecoratorError> {
    let path = directory.join(&config.changelog_file);
    let changelog = match std::fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(e) if e.kind() == ErrorKind::NotFound => {
            tracing::warn!(path = %path.display(), "no changelog, using fallback version");
            return Ok(config.fallback_version.clone());
        }
        Err(e) => return Err(e.into()),
    };

    match version_from_changelog(&changelog) {
        Some(version) => Ok(version),
        None => {
            tracing::warn!(path = %path.display(), "changelog lists no version, using fallback");
            Ok(config.fallback_version.clone())
        }
    }
}
