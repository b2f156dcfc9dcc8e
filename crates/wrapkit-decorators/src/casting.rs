//! Argument and output casting decorators
//!
//! Each decorator locates one value (an argument, or part of the output),
//! converts it when a condition holds, and writes it back in the same place.

use crate::config::DecoratorConfig;
use crate::error::DecoratorError;
use crate::options::{enumerator_with_config, format_enum_names, EnumOptions};
use serde_json::{json, Value};
use std::sync::Arc;
use wrapkit_core::{
    as_dual_mode, locate, replace_output, rewrite, select_output, DualMode, Function,
    OutputSelector, Signature, Transform, WrapError,
};

/// Predicate on a located value
pub type Condition = Arc<dyn Fn(&Value) -> bool + Send + Sync>;

/// Conversion applied to a located value
pub type Conversion = Arc<dyn Fn(Value) -> Result<Value, WrapError> + Send + Sync>;

/// Cast a string identifier argument to its `E` option
///
/// Uses [`DecoratorConfig::default`] for identifier normalization; see
/// [`cast_to_enum_with`].
#[must_use]
pub fn cast_to_enum<E: EnumOptions>() -> DualMode {
    cast_to_enum_with::<E>(&DecoratorConfig::default())
}

/// Cast a string identifier argument to its `E` option
///
/// Configuration: `argnum` (default `0`). The wrapped function receives the
/// option's serialized form in place of the identifier.
///
/// # Example
/// ```
/// use wrapkit_core::{CallState, Function, Signature};
/// use wrapkit_decorators::{cast_to_enum, EnumOptions};
/// use serde_json::json;
///
/// #[derive(Debug, Clone, Copy, serde::Serialize, serde::Deserialize)]
/// #[serde(rename_all = "SCREAMING_SNAKE_CASE")]
/// enum Cast { Input, Output }
///
/// impl EnumOptions for Cast {
///     fn options() -> &'static [Self] { &[Self::Input, Self::Output] }
///     fn name(&self) -> &'static str {
///         match self { Self::Input => "INPUT", Self::Output => "OUTPUT" }
///     }
/// }
///
/// let echo = Function::new("echo", Signature::builder().required("when").build(), |call| {
///     Ok(call.positional(0).cloned().unwrap_or_default())
/// });
/// let echo = cast_to_enum::<Cast>().apply(echo).unwrap();
///
/// assert_eq!(echo.call(CallState::new().with_arg(" output ")).unwrap(), json!("OUTPUT"));
/// ```
#[must_use]
pub fn cast_to_enum_with<E: EnumOptions>(config: &DecoratorConfig) -> DualMode {
    let settings = config.clone();
    as_dual_mode(
        Transform::new(
            "cast_to_enum",
            Signature::builder().optional("argnum", json!(0)).build(),
            move |target, config| {
                let info = target.argument_info(config.parse("argnum")?)?;
                let inner = target.clone();
                let settings = settings.clone();

                Ok(Function::wraps(target, move |call| {
                    let (value, location) = locate(&info, &call);
                    let identifier = match value {
                        Some(Value::String(identifier)) => identifier,
                        other => {
                            return Err(DecoratorError::InvalidIdentifier {
                                identifier: other.map_or_else(|| "<missing>".to_string(), |v| v.to_string()),
                                options: format_enum_names::<E>(),
                            }
                            .into());
                        }
                    };
                    let option: E = enumerator_with_config(&identifier, &settings)?;
                    let option = serde_json::to_value(option).map_err(|e| {
                        WrapError::InvalidConfiguration {
                            transform: "cast_to_enum".to_string(),
                            reason: e.to_string(),
                        }
                    })?;
                    inner.call(rewrite(option, &info, location, &call))
                }))
            },
        )
        .with_doc("Cast a string identifier argument to its enumeration option."),
    )
}

/// Convert one argument when `condition` holds
///
/// Configuration: `argnum` (default `0`).
#[must_use]
pub fn cast_argument_to_type<C, V>(condition: C, conversion: V) -> DualMode
where
    C: Fn(&Value) -> bool + Send + Sync + 'static,
    V: Fn(Value) -> Result<Value, WrapError> + Send + Sync + 'static,
{
    let condition: Condition = Arc::new(condition);
    let conversion: Conversion = Arc::new(conversion);

    as_dual_mode(Transform::new(
        "cast_argument_to_type",
        Signature::builder().optional("argnum", json!(0)).build(),
        move |target, config| {
            let info = target.argument_info(config.parse("argnum")?)?;
            let inner = target.clone();
            let condition = Arc::clone(&condition);
            let conversion = Arc::clone(&conversion);

            Ok(Function::wraps(target, move |call| {
                let (value, location) = locate(&info, &call);
                let Some(value) = value else {
                    return inner.call(call);
                };
                if !condition(&value) {
                    return inner.call(call);
                }
                let converted = conversion(value)?;
                inner.call(rewrite(converted, &info, location, &call))
            }))
        },
    ))
}

/// Convert part of the output when `condition` holds
///
/// Configuration: `output_index` (required): `null` for the whole output, an
/// integer for an array element, a string for an object entry.
#[must_use]
pub fn cast_output_to_type<C, V>(condition: C, conversion: V) -> DualMode
where
    C: Fn(&Value) -> bool + Send + Sync + 'static,
    V: Fn(Value) -> Result<Value, WrapError> + Send + Sync + 'static,
{
    let condition: Condition = Arc::new(condition);
    let conversion: Conversion = Arc::new(conversion);

    as_dual_mode(Transform::new(
        "cast_output_to_type",
        Signature::builder().required("output_index").build(),
        move |target, config| {
            let selector = OutputSelector::try_from(&config.argument("output_index")?)?;
            let inner = target.clone();
            let condition = Arc::clone(&condition);
            let conversion = Arc::clone(&conversion);

            Ok(Function::wraps(target, move |call| {
                let out = inner.call(call)?;
                let part = select_output(&out, &selector)?;
                if condition(&part) {
                    let converted = conversion(part)?;
                    return replace_output(out, converted, &selector);
                }
                Ok(out)
            }))
        },
    ))
}
