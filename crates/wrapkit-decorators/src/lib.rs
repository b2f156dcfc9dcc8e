//! wrapkit decorators
//!
//! Ready-made decorators built on [`wrapkit_core`].
//!
//! # Decorators
//!
//! - [`add_docstring`]: extend a function's documentation
//! - [`required_columns`]: fail when a table argument lacks columns
//! - [`cast_to_enum`]: turn a string identifier argument into an option
//! - [`check_input_argument`]: validate one argument with a predicate
//! - [`cast_argument_to_type`] / [`cast_output_to_type`]: convert one argument
//!   or one part of the output
//! - [`not_implemented`]: keep an interface, fail every call
//!
//! All of them except [`not_implemented`] are dual-mode: apply them directly
//! or configure them first.
//!
//! # Example
//!
//! ```rust
//! use wrapkit_core::{CallState, Function, Signature};
//! use wrapkit_decorators::required_columns;
//! use serde_json::json;
//!
//! let describe = Function::new(
//!     "describe",
//!     Signature::builder().required("df").build(),
//!     |_| Ok(json!({"count": 1})),
//! );
//!
//! let describe = required_columns()
//!     .call(json!(["id", "name", "value"]), CallState::new())
//!     .unwrap()
//!     .into_pending()
//!     .unwrap()
//!     .apply(describe)
//!     .unwrap();
//!
//! let ok = json!([{"id": 1, "name": "a", "value": 2.0}]);
//! assert!(describe.call(CallState::new().with_arg(ok)).is_ok());
//!
//! let missing = json!([{"id": 1, "name": "a"}]);
//! assert!(describe.call(CallState::new().with_arg(missing)).is_err());
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod casting;
mod checks;
mod columns;
mod config;
mod docstring;
mod error;
mod options;
mod stub;
mod version;

// Re-exports
pub use casting::{
    cast_argument_to_type, cast_output_to_type, cast_to_enum, cast_to_enum_with, Condition,
    Conversion,
};
pub use checks::check_input_argument;
pub use columns::{required_columns, table_columns};
pub use config::{DecoratorConfig, IdentifierCase};
pub use docstring::add_docstring;
pub use error::DecoratorError;
pub use options::{
    enumerator_from_identifier, enumerator_with_config, format_enum_names, format_enum_options,
    EnumOptions,
};
pub use stub::not_implemented;
pub use version::{get_version, get_version_with, version_from_changelog};

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
