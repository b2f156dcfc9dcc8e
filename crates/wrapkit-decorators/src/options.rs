//! Enumeration options
//!
//! Helpers for resolving user-supplied identifiers against a fixed set of
//! options, with error messages that list the valid choices.

use crate::config::DecoratorConfig;
use crate::error::DecoratorError;
use serde::Serialize;

/// A closed set of named options
///
/// # Example
/// ```
/// use wrapkit_decorators::EnumOptions;
///
/// #[derive(Debug, Clone, Copy, PartialEq, serde::Serialize)]
/// enum Cast { Input, Output }
///
/// impl EnumOptions for Cast {
///     fn options() -> &'static [Self] { &[Self::Input, Self::Output] }
///     fn name(&self) -> &'static str {
///         match self { Self::Input => "INPUT", Self::Output => "OUTPUT" }
///     }
/// }
///
/// assert_eq!(Cast::from_name("OUTPUT"), Some(Cast::Output));
/// ```
pub trait EnumOptions: Sized + Copy + Serialize + 'static {
    /// Every option, in declaration order
    fn options() -> &'static [Self];

    /// Canonical name used for lookup
    fn name(&self) -> &'static str;

    /// Option with canonical name `name`
    fn from_name(name: &str) -> Option<Self> {
        Self::options().iter().copied().find(|option| option.name() == name)
    }
}

/// `"Must be one of: A, B"` using `formatter` for each option
pub fn format_enum_options<E, F>(formatter: F) -> String
where
    E: EnumOptions,
    F: Fn(&E) -> String,
{
    let listed = E::options()
        .iter()
        .map(formatter)
        .collect::<Vec<_>>()
        .join(", ");
    format!("Must be one of: {listed}")
}

/// [`format_enum_options`] listing canonical names
#[must_use]
pub fn format_enum_names<E: EnumOptions>() -> String {
    format_enum_options::<E, _>(|option| option.name().to_string())
}

/// Resolve `identifier` into an option of `E` after applying `transform`
///
/// # Errors
/// [`DecoratorError::InvalidIdentifier`] listing the valid names.
pub fn enumerator_from_identifier<E, F>(identifier: &str, transform: F) -> Result<E, DecoratorError>
where
    E: EnumOptions,
    F: Fn(&str) -> String,
{
    let identifier = transform(identifier);
    E::from_name(&identifier).ok_or_else(|| DecoratorError::InvalidIdentifier {
        identifier,
        options: format_enum_names::<E>(),
    })
}

/// [`enumerator_from_identifier`] with the normalization from `config`
///
/// # Errors
/// [`DecoratorError::InvalidIdentifier`] listing the valid names.
pub fn enumerator_with_config<E: EnumOptions>(
    identifier: &str,
    config: &DecoratorConfig,
) -> Result<E, DecoratorError> {
    enumerator_from_identifier(identifier, |raw| config.normalize_identifier(raw))
}
