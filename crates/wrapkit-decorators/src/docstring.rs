//! Documentation decorator

use serde_json::{json, Value};
use wrapkit_core::{DecoratorFactory, DualMode, Operand, Signature, Transform};

/// Extend the target's documentation with `docstring`
///
/// Anything that is not a string counts as the target, so the decorator can
/// be applied bare or with the extra text first.
///
/// # Example
/// ```
/// use wrapkit_core::{CallState, Function, Signature};
/// use wrapkit_decorators::add_docstring;
/// use serde_json::json;
///
/// let f = Function::new("f", Signature::empty(), |_| Ok(json!(null))).with_doc("Base.");
/// let f = add_docstring()
///     .call(json!(" Some more docs!!"), CallState::new())
///     .unwrap()
///     .into_pending()
///     .unwrap()
///     .apply(f)
///     .unwrap();
///
/// assert_eq!(f.doc(), Some("Base. Some more docs!!"));
/// ```
#[must_use]
pub fn add_docstring() -> DualMode {
    let transform = Transform::new(
        "add_docstring",
        Signature::builder().optional("docstring", json!("")).build(),
        |target, config| {
            let docstring: String = config.parse("docstring")?;
            target.append_doc(&docstring);
            Ok(target.clone())
        },
    )
    .with_doc("Extend the documentation of the target.");

    DecoratorFactory::with_discriminator(|operand: &Operand| {
        !matches!(operand, Operand::Value(Value::String(_)))
    })
    .wrap(transform)
}

#[cfg(test)]
mod tests {
    use super::*;
    use wrapkit_core::{CallState, Function, WrapError};

    fn undocumented() -> Function {
        Function::new("f", Signature::empty(), |_| Ok(json!(1)))
    }

    #[test]
    fn bare_application_adds_nothing_but_creates_doc() {
        let f = add_docstring().apply(undocumented()).unwrap();
        assert_eq!(f.doc(), Some(""));
        assert_eq!(f.call(CallState::new()).unwrap(), json!(1));
    }

    #[test]
    fn keyword_docstring() {
        let f = add_docstring()
            .call(undocumented(), CallState::new().with_kwarg("docstring", json!("Docs.")))
            .unwrap()
            .into_applied()
            .unwrap();
        assert_eq!(f.doc(), Some("Docs."));
        assert_eq!(f.name(), "f");
    }

    #[test]
    fn non_string_value_is_treated_as_target() {
        let err = add_docstring().call(json!(3), CallState::new()).unwrap_err();
        assert!(matches!(err, WrapError::NotInvocable { .. }));
    }
}
