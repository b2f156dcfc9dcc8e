use serde_json::json;
use std::sync::Arc;
use wrapkit_core::{
    as_dual_mode, catalog, locate, normalize, CallState, DecoratorFactory, Discriminator,
    FactoryInput, FactoryOutput, Function, Operand, Signature, Transform, WrapError,
};
use wrapkit_test_utils::{init_tracing, power_fn};

#[derive(Debug, thiserror::Error)]
#[error("value {0} rejected")]
struct Rejected(i64);

/// `scale(target, k)`: multiplies the target's output by `k`
fn scale() -> Transform {
    Transform::new(
        "scale",
        Signature::builder().required("k").build(),
        |target, config| {
            let k: i64 = config.parse("k")?;
            let inner = target.clone();
            Ok(Function::wraps(target, move |call| {
                let out = inner.call(call)?;
                Ok(json!(out.as_i64().unwrap_or(0) * k))
            }))
        },
    )
    .with_doc("Multiply the output by `k`.")
}

/// `reject_above(target, limit, argnum=0)`: fails with a domain error
fn reject_above() -> Transform {
    Transform::new(
        "reject_above",
        Signature::builder()
            .required("limit")
            .optional("argnum", json!(0))
            .build(),
        |target, config| {
            let limit: i64 = config.parse("limit")?;
            let info = target.argument_info(config.parse("argnum")?)?;
            let inner = target.clone();
            Ok(Function::wraps(target, move |call| {
                let (value, _) = locate(&info, &call);
                if let Some(v) = value.and_then(|v| v.as_i64()) {
                    if v > limit {
                        return Err(WrapError::domain(Rejected(v)));
                    }
                }
                inner.call(call)
            }))
        },
    )
}

#[test]
fn test_direct_and_factory_paths_agree() {
    init_tracing();
    let dual = as_dual_mode(scale());

    let via_factory = dual
        .call(json!(5), CallState::new())
        .unwrap()
        .into_pending()
        .unwrap()
        .apply(power_fn())
        .unwrap();
    let direct = scale()
        .apply(power_fn(), CallState::new().with_arg(json!(5)))
        .unwrap();

    let call = CallState::new().with_arg(json!(3));
    assert_eq!(via_factory.call(call.clone()).unwrap(), json!(45));
    assert_eq!(direct.call(call).unwrap(), json!(45));
}

#[test]
fn test_direct_path_with_function_first() {
    let dual = as_dual_mode(scale());
    let wrapped = dual
        .call(power_fn(), CallState::new().with_kwarg("k", json!(2)))
        .unwrap()
        .into_applied()
        .unwrap();
    assert_eq!(wrapped.call(CallState::new().with_arg(json!(4))).unwrap(), json!(32));
}

#[test]
fn test_wrappers_keep_target_interface() {
    let wrapped = as_dual_mode(scale())
        .configure(CallState::new().with_arg(json!(3)))
        .unwrap()
        .apply(power_fn())
        .unwrap();

    assert_eq!(wrapped.name(), "power");
    assert_eq!(wrapped.doc(), Some("Raise `a` to the power `b`."));
    let names: Vec<_> = catalog(&wrapped).unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, ["a", "b"]);
}

#[test]
fn test_stacked_transforms_resolve_original_parameters() {
    let limited = as_dual_mode(reject_above())
        .configure(CallState::new().with_arg(json!(10)).with_kwarg("argnum", json!(-1)))
        .unwrap()
        .apply(power_fn())
        .unwrap();
    let scaled = as_dual_mode(scale())
        .configure(CallState::new().with_arg(json!(2)))
        .unwrap()
        .apply(limited)
        .unwrap();

    // `b` passed by keyword, by position and left at its default.
    assert_eq!(
        scaled.call(CallState::new().with_arg(json!(2)).with_kwarg("b", json!(3))).unwrap(),
        json!(16)
    );
    assert_eq!(scaled.call(CallState::new().with_arg(json!(2)).with_arg(json!(4))).unwrap(), json!(32));
    assert_eq!(scaled.call(CallState::new().with_arg(json!(2))).unwrap(), json!(8));
}

#[test]
fn test_domain_errors_pass_through_unchanged() {
    let limited = as_dual_mode(reject_above())
        .configure(CallState::new().with_arg(json!(10)))
        .unwrap()
        .apply(power_fn())
        .unwrap();
    let outer = normalize("passthrough", |target: &mut Function| {
        let inner = target.clone();
        Ok(Function::wraps(target, move |call| inner.call(call)))
    })
    .apply(limited)
    .unwrap();

    let err = outer.call(CallState::new().with_arg(json!(11))).unwrap_err();
    assert!(err.is_domain());
    assert_eq!(err.downcast_domain::<Rejected>().map(|r| r.0), Some(11));
    assert_eq!(err.to_string(), "value 11 rejected");
}

#[test]
fn test_lookup_error_at_decoration_time() {
    let err = as_dual_mode(reject_above())
        .configure(CallState::new().with_arg(json!(1)).with_kwarg("argnum", json!(5)))
        .unwrap()
        .apply(power_fn())
        .unwrap_err();
    assert!(matches!(err, WrapError::Lookup { position: 5, count: 2, .. }));
}

#[test]
fn test_reparameterized_factory_uses_new_discriminator() {
    // Treat every non-string operand as the target.
    let not_string: Discriminator = Arc::new(|op: &Operand| !matches!(op, Operand::Value(serde_json::Value::String(_))));
    let FactoryOutput::Factory(factory) =
        DecoratorFactory::new().call(FactoryInput::Discriminator(not_string))
    else {
        panic!("expected a re-parameterized factory");
    };

    let label = Transform::new(
        "label",
        Signature::builder().optional("text", json!("")).build(),
        |target, config| {
            let text: String = config.parse("text")?;
            target.append_doc(&text);
            Ok(target.clone())
        },
    );
    let dual = factory.wrap(label);

    let pending = dual.call(json!(" Labelled."), CallState::new()).unwrap().into_pending().unwrap();
    let labelled = pending.apply(power_fn()).unwrap();
    assert_eq!(labelled.doc(), Some("Raise `a` to the power `b`. Labelled."));

    let err = dual.call(json!(7), CallState::new()).unwrap_err();
    assert!(matches!(err, WrapError::NotInvocable { .. }));
}
