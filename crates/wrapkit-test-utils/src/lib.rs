//! Testing utilities for wrapkit workspace
//!
//! Shared fixtures, tracing setup, and call helpers.

#![allow(missing_docs)]

use serde_json::{json, Value};
use wrapkit_core::{CallState, Function, Signature, WrapError};

/// Install a fmt subscriber honouring `RUST_LOG`; repeated calls are no-ops.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// Value of `name` at `position`, by keyword first, then positionally
pub fn bound(call: &CallState, name: &str, position: usize) -> Option<Value> {
    call.keyword(name)
        .or_else(|| call.positional(position))
        .cloned()
}

/// `power(a, b=2)`: returns `a ** b`
pub fn power_fn() -> Function {
    Function::new(
        "power",
        Signature::builder().required("a").optional("b", json!(2)).build(),
        |call| {
            let a = bound(&call, "a", 0)
                .and_then(|v| v.as_i64())
                .ok_or_else(|| WrapError::MissingArgument {
                    function: "power".to_string(),
                    parameter: "a".to_string(),
                })?;
            let b = bound(&call, "b", 1).and_then(|v| v.as_u64()).unwrap_or(2);
            let exponent = u32::try_from(b).unwrap_or(u32::MAX);
            Ok(json!(a.pow(exponent)))
        },
    )
    .with_doc("Raise `a` to the power `b`.")
}

/// `echo(value, label="x")`: returns `[value, label]`
pub fn echo_fn() -> Function {
    Function::new(
        "echo",
        Signature::builder()
            .required("value")
            .optional("label", json!("x"))
            .build(),
        |call| {
            let value = bound(&call, "value", 0).unwrap_or_default();
            let label = bound(&call, "label", 1).unwrap_or_else(|| json!("x"));
            Ok(json!([value, label]))
        },
    )
}

/// `describe(table)`: returns `{"rows": n, "table": table}`
pub fn describe_fn() -> Function {
    Function::new(
        "describe",
        Signature::builder().required("table").build(),
        |call| {
            let table = bound(&call, "table", 0).unwrap_or_default();
            let rows = table.as_array().map_or(0, Vec::len);
            Ok(json!({ "rows": rows, "table": table }))
        },
    )
    .with_doc("Summarize a table.")
}

/// Call state from positional values
pub fn args(values: &[Value]) -> CallState {
    values
        .iter()
        .cloned()
        .fold(CallState::new(), CallState::with_arg)
}
