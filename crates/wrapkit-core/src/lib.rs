//! wrapkit core
//!
//! Building blocks for composable function-wrapping combinators.
//!
//! # Core Concepts
//!
//! - [`Signature`] / [`ParameterInfo`]: caller-declared parameter catalog
//! - [`locate`] / [`rewrite`]: find and replace one argument of a [`CallState`]
//!   whether it was passed positionally, by name, or left at its default
//! - [`select_output`] / [`replace_output`]: the same for return values
//! - [`normalize`]: wrappers that keep the target's name, doc and signature
//! - [`as_dual_mode`]: one [`Transform`] usable as a direct wrapper or as a
//!   wrapper factory
//!
//! # Example
//!
//! ```rust
//! use wrapkit_core::{as_dual_mode, locate, rewrite, CallState, Function, Signature, Transform};
//! use serde_json::json;
//!
//! // Clamp one argument of the target to `max`.
//! let clamp = as_dual_mode(Transform::new(
//!     "clamp",
//!     Signature::builder().required("max").optional("argnum", json!(0)).build(),
//!     |target, config| {
//!         let max: i64 = config.parse("max")?;
//!         let info = target.argument_info(config.parse("argnum")?)?;
//!         let inner = target.clone();
//!         Ok(Function::wraps(target, move |call| {
//!             let (value, location) = locate(&info, &call);
//!             let clamped = value.and_then(|v| v.as_i64()).map_or(max, |v| v.min(max));
//!             inner.call(rewrite(json!(clamped), &info, location, &call))
//!         }))
//!     },
//! ));
//!
//! let echo = Function::new("echo", Signature::builder().required("x").build(), |call| {
//!     Ok(call.positional(0).or_else(|| call.keyword("x")).cloned().unwrap_or_default())
//! });
//!
//! let pending = clamp.call(json!(10), CallState::new()).unwrap().into_pending().unwrap();
//! let clamped_echo = pending.apply(echo).unwrap();
//!
//! assert_eq!(clamped_echo.call(CallState::new().with_arg(50)).unwrap(), json!(10));
//! assert_eq!(clamped_echo.call(CallState::new().with_kwarg("x", 3)).unwrap(), json!(3));
//! ```

#![warn(missing_docs)]
#![warn(unreachable_pub)]

mod call;
mod dispatch;
mod error;
mod function;
mod locate;
mod normalize;
mod output;
mod signature;

// Re-exports
pub use call::CallState;
pub use dispatch::{
    as_dual_mode, classify, is_invocable, CallKind, Configuration, DecoratorFactory,
    Discriminator, Dispatch, DualMode, FactoryInput, FactoryOutput, Operand, PendingWrapper,
    Transform, TransformFn,
};
pub use error::{DomainError, WrapError};
pub use function::{catalog, Body, Function, Metadata};
pub use locate::{locate, rewrite, rewrite_tagged, ArgumentLocation};
pub use normalize::{normalize, Decorate, Decorator};
pub use output::{replace_output, select_output, OutputSelector};
pub use signature::{
    normalize_position, Parameter, ParameterInfo, ParameterKind, Signature, SignatureBuilder,
};

/// Prelude module for common imports
pub mod prelude {
    //! Common imports for writing decorators
    pub use crate::{
        as_dual_mode, locate, normalize, replace_output, rewrite, select_output, ArgumentLocation,
        CallState, Configuration, DualMode, Function, OutputSelector, ParameterInfo, Signature,
        Transform, WrapError,
    };
}

/// Version of this crate
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
