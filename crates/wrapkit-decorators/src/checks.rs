//! Input validation decorator

use serde_json::Value;
use std::sync::Arc;
use wrapkit_core::{as_dual_mode, locate, DualMode, Function, Signature, Transform, WrapError};

/// Fail with `raises(message)` when an argument does not pass `passes`
///
/// Configuration: `argnum` and `message` (both required). The error built by
/// `raises` reaches the caller unchanged, as [`WrapError::Domain`].
///
/// # Example
/// ```
/// use wrapkit_core::{CallState, Function, Signature};
/// use wrapkit_decorators::check_input_argument;
/// use serde_json::json;
///
/// #[derive(Debug, thiserror::Error)]
/// #[error("{0}")]
/// struct NoneNotAllowed(String);
///
/// let f = Function::new("f", Signature::builder().optional("a", json!(null)).build(), |_| Ok(json!(1)));
/// let f = check_input_argument(|v| !v.is_null(), NoneNotAllowed)
///     .configure(CallState::new().with_arg(0).with_arg("'a' cannot be None."))
///     .unwrap()
///     .apply(f)
///     .unwrap();
///
/// assert!(f.call(CallState::new()).is_err());
/// assert!(f.call(CallState::new().with_arg(json!(null))).is_err());
/// assert!(f.call(CallState::new().with_arg(1)).is_ok());
/// ```
#[must_use]
pub fn check_input_argument<P, R, E>(passes: P, raises: R) -> DualMode
where
    P: Fn(&Value) -> bool + Send + Sync + 'static,
    R: Fn(String) -> E + Send + Sync + 'static,
    E: std::error::Error + Send + Sync + 'static,
{
    let passes = Arc::new(passes);
    let raises = Arc::new(raises);

    as_dual_mode(Transform::new(
        "check_input_argument",
        Signature::builder().required("argnum").required("message").build(),
        move |target, config| {
            let info = target.argument_info(config.parse("argnum")?)?;
            let message: String = config.parse("message")?;
            let inner = target.clone();
            let passes = Arc::clone(&passes);
            let raises = Arc::clone(&raises);

            Ok(Function::wraps(target, move |call| {
                let (value, _) = locate(&info, &call);
                if !passes(&value.unwrap_or_default()) {
                    return Err(WrapError::domain(raises(message.clone())));
                }
                inner.call(call)
            }))
        },
    ))
}
