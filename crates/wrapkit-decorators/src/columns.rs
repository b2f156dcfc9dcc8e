//! Table column checks

use crate::error::DecoratorError;
use serde_json::{json, Value};
use std::collections::BTreeSet;
use wrapkit_core::{as_dual_mode, locate, DualMode, Function, Signature, Transform};

/// Column names of a table value
///
/// An object is a columnar table (keys are columns); an array of objects is a
/// row table whose columns are those of the first row. An empty array has no
/// columns.
///
/// # Errors
/// [`DecoratorError::NotATable`] for any other shape.
pub fn table_columns(argument: &str, table: &Value) -> Result<BTreeSet<String>, DecoratorError> {
    let not_a_table = || DecoratorError::NotATable {
        argument: argument.to_string(),
    };

    match table {
        Value::Object(columns) => Ok(columns.keys().cloned().collect()),
        Value::Array(rows) => match rows.first() {
            None => Ok(BTreeSet::new()),
            Some(Value::Object(row)) => Ok(row.keys().cloned().collect()),
            Some(_) => Err(not_a_table()),
        },
        _ => Err(not_a_table()),
    }
}

/// Fail when a table argument lacks any of `columns`
///
/// Configuration: `columns` (list of names, required), `argnum` (position of
/// the table argument, default `0`).
///
/// # Example
/// ```
/// use wrapkit_core::{CallState, Function, Signature};
/// use wrapkit_decorators::required_columns;
/// use serde_json::json;
///
/// let f = Function::new("f", Signature::builder().required("df").build(), |_| Ok(json!("ok")));
/// let f = required_columns()
///     .call(json!(["name", "value"]), CallState::new())
///     .unwrap()
///     .into_pending()
///     .unwrap()
///     .apply(f)
///     .unwrap();
///
/// let table = json!({"name": ["a"], "value": [1], "extra": [true]});
/// assert!(f.call(CallState::new().with_arg(table)).is_ok());
/// assert!(f.call(CallState::new().with_arg(json!({"name": []}))).is_err());
/// ```
#[must_use]
pub fn required_columns() -> DualMode {
    as_dual_mode(
        Transform::new(
            "required_columns",
            Signature::builder()
                .required("columns")
                .optional("argnum", json!(0))
                .build(),
            |target, config| {
                let columns: BTreeSet<String> = config.parse("columns")?;
                let info = target.argument_info(config.parse("argnum")?)?;
                let inner = target.clone();

                Ok(Function::wraps(target, move |call| {
                    let (table, _) = locate(&info, &call);
                    let present = table_columns(&info.name, &table.unwrap_or_default())?;
                    let missing: Vec<String> = columns.difference(&present).cloned().collect();
                    if !missing.is_empty() {
                        return Err(DecoratorError::MissingColumns {
                            argument: info.name.clone(),
                            missing,
                        }
                        .into());
                    }
                    inner.call(call)
                }))
            },
        )
        .with_doc("Raise an error when a table argument lacks required columns."),
    )
}
