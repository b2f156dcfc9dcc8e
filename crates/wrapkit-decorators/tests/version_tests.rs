use std::fs;
use wrapkit_decorators::{get_version, get_version_with, DecoratorConfig};

#[test]
fn test_version_read_from_changelog() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(
        dir.path().join("CHANGELOG.md"),
        "# Changelog\n\n## [Unreleased]\n\n## [2.3.1] - 2024-05-01\n\n## [2.3.0]\n",
    )
    .unwrap();

    assert_eq!(get_version(dir.path()).unwrap(), "2.3.1");
}

#[test]
fn test_missing_changelog_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    assert_eq!(get_version(dir.path()).unwrap(), "0.1.0");
}

#[test]
fn test_changelog_without_version_uses_fallback() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("CHANGELOG.md"), "# Changelog\n\nNothing yet.\n").unwrap();

    let config = DecoratorConfig::new().with_fallback_version("0.0.1");
    assert_eq!(get_version_with(dir.path(), &config).unwrap(), "0.0.1");
}

#[test]
fn test_configured_changelog_file() {
    let dir = tempfile::tempdir().unwrap();
    fs::write(dir.path().join("HISTORY.md"), "## [9.0]\n").unwrap();

    let config = DecoratorConfig::from_toml_str(r#"changelog_file = "HISTORY.md""#).unwrap();
    assert_eq!(get_version_with(dir.path(), &config).unwrap(), "9.0");
}

#[test]
fn test_unreadable_changelog_is_an_error() {
    let dir = tempfile::tempdir().unwrap();
    // A directory where the file should be cannot be read as text.
    fs::create_dir(dir.path().join("CHANGELOG.md")).unwrap();

    assert!(get_version(dir.path()).is_err());
}
