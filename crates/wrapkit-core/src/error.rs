//! Error types for wrapkit core
//!
//! Covers:
//! - Parameter lookups that fall outside a declared signature
//! - Location tags the rewriter does not know
//! - Configuration binding failures in the dispatcher
//! - Output selection mismatches
//! - Domain errors raised by client decorators (carried, never altered)

use crate::locate::ArgumentLocation;

/// Boxed error raised by a client decorator or a wrapped body
pub type DomainError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// Main wrapkit error type
#[derive(Debug, thiserror::Error)]
pub enum WrapError {
    /// Requested parameter position has no concrete parameter
    #[error("`{function}` has no concrete parameter at position {position} ({count} declared)")]
    Lookup {
        /// Function whose signature was searched
        function: String,
        /// Requested position, before normalization
        position: isize,
        /// Number of declared parameters
        count: usize,
    },

    /// Unknown argument location tag reached the rewriter
    #[error("{tag} is not a valid `ArgumentLocation` option. Must be one of: {}", ArgumentLocation::options())]
    InvalidLocation {
        /// The offending raw tag
        tag: u8,
    },

    /// A required value was neither supplied nor defaulted
    #[error("`{function}` is missing a value for required parameter `{parameter}`")]
    MissingArgument {
        /// Callable being bound
        function: String,
        /// Parameter without a value
        parameter: String,
    },

    /// More positional values than declared parameters
    #[error("`{function}` takes {expected} positional values but {given} were given")]
    TooManyArguments {
        /// Callable being bound
        function: String,
        /// Declared positional capacity
        expected: usize,
        /// Supplied positional count
        given: usize,
    },

    /// Keyword that matches no declared parameter
    #[error("`{function}` got an unexpected keyword `{keyword}`")]
    UnexpectedArgument {
        /// Callable being bound
        function: String,
        /// Unknown keyword
        keyword: String,
    },

    /// Parameter supplied both positionally and by keyword
    #[error("`{function}` got multiple values for `{parameter}`")]
    DuplicateArgument {
        /// Callable being bound
        function: String,
        /// Parameter bound twice
        parameter: String,
    },

    /// Operand classified as a target is not a function
    #[error("`{transform}` expected a function to wrap, got {found}")]
    NotInvocable {
        /// Transform being dispatched
        transform: String,
        /// Description of the operand
        found: String,
    },

    /// Configuration value could not be used
    #[error("invalid configuration for `{transform}`: {reason}")]
    InvalidConfiguration {
        /// Transform being configured
        transform: String,
        /// What went wrong
        reason: String,
    },

    /// Output selector of an unsupported kind
    #[error("unsupported output selector: {0}")]
    UnsupportedSelector(String),

    /// Output selector does not fit the output value
    #[error("output selection failed: {0}")]
    OutputSelection(String),

    /// Error raised by client code, carried unchanged
    #[error(transparent)]
    Domain(DomainError),
}

impl WrapError {
    /// Wrap a client error without altering it
    #[inline]
    #[must_use]
    pub fn domain<E>(error: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::Domain(Box::new(error))
    }

    /// Borrow the original client error, if this is one of type `E`
    #[must_use]
    pub fn downcast_domain<E>(&self) -> Option<&E>
    where
        E: std::error::Error + 'static,
    {
        match self {
            Self::Domain(inner) => inner.downcast_ref::<E>(),
            _ => None,
        }
    }

    /// Check if the error came from client code rather than the core
    #[inline]
    #[must_use]
    pub fn is_domain(&self) -> bool {
        matches!(self, Self::Domain(_))
    }
}
