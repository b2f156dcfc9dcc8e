//! Error types for the ready-made decorators
//!
//! These are domain errors: decorators raise them on the call path and the
//! core carries them to the caller as [`WrapError::Domain`].

use wrapkit_core::WrapError;

/// Decorator domain error
#[derive(Debug, thiserror::Error)]
pub enum DecoratorError {
    /// Table argument lacks required columns
    #[error("missing columns for table `{argument}`: {}", quoted(.missing))]
    MissingColumns {
        /// Parameter holding the table
        argument: String,
        /// Absent columns, sorted
        missing: Vec<String>,
    },

    /// Argument is not a table
    #[error("argument `{argument}` is not a table (expected an object or an array of objects)")]
    NotATable {
        /// Offending parameter
        argument: String,
    },

    /// Identifier names no enumeration option
    #[error("{identifier:?} is not a valid identifier. {options}")]
    InvalidIdentifier {
        /// Identifier after normalization
        identifier: String,
        /// Formatted list of valid options
        options: String,
    },

    /// Function body intentionally left unimplemented
    #[error("{0} is not implemented.")]
    NotImplemented(String),

    /// Configuration file could not be parsed
    #[error("invalid configuration: {0}")]
    Config(#[from] toml::de::Error),

    /// Filesystem error
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

fn quoted(names: &[String]) -> String {
    names
        .iter()
        .map(|name| format!("{name:?}"))
        .collect::<Vec<_>>()
        .join(", ")
}

impl From<DecoratorError> for WrapError {
    fn from(error: DecoratorError) -> Self {
        WrapError::domain(error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_columns_message() {
        let err = DecoratorError::MissingColumns {
            argument: "df".to_string(),
            missing: vec!["id".to_string(), "value".to_string()],
        };
        assert_eq!(err.to_string(), r#"missing columns for table `df`: "id", "value""#);
    }

    #[test]
    fn converts_into_domain_error() {
        let err: WrapError = DecoratorError::NotImplemented("f".to_string()).into();
        assert!(err.is_domain());
        assert!(matches!(
            err.downcast_domain::<DecoratorError>(),
            Some(DecoratorError::NotImplemented(name)) if name == "f"
        ));
    }
}
