use pretty_assertions::assert_eq;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use wrapkit_core::{catalog, CallState, Function, Signature, WrapError};
use wrapkit_decorators::{
    add_docstring, cast_output_to_type, cast_to_enum, cast_to_enum_with, not_implemented,
    required_columns, DecoratorConfig, DecoratorError, EnumOptions, IdentifierCase,
};
use wrapkit_test_utils::{bound, describe_fn, init_tracing};

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
enum Cast {
    Input,
    Output,
    Both,
}

impl EnumOptions for Cast {
    fn options() -> &'static [Self] {
        &[Self::Input, Self::Output, Self::Both]
    }

    fn name(&self) -> &'static str {
        match self {
            Self::Input => "INPUT",
            Self::Output => "OUTPUT",
            Self::Both => "BOTH",
        }
    }
}

/// `convert(table, when, strict=false)`: reports what it received
fn convert_fn() -> Function {
    Function::new(
        "convert",
        Signature::builder()
            .required("table")
            .required("when")
            .optional("strict", json!(false))
            .build(),
        |call| {
            let when: Cast = serde_json::from_value(bound(&call, "when", 1).unwrap_or_default())
                .map_err(|e| WrapError::InvalidConfiguration {
                    transform: "convert".to_string(),
                    reason: e.to_string(),
                })?;
            Ok(json!({ "when": when, "strict": bound(&call, "strict", 2).unwrap_or(json!(false)) }))
        },
    )
    .with_doc("Convert a table.")
}

fn enum_at(argnum: i64) -> CallState {
    CallState::new().with_kwarg("argnum", json!(argnum))
}

#[test]
fn test_enum_cast_positional_and_keyword() {
    init_tracing();
    let convert = cast_to_enum::<Cast>()
        .configure(enum_at(1))
        .unwrap()
        .apply(convert_fn())
        .unwrap();

    let table = json!({"a": [1]});
    let out = convert
        .call(CallState::new().with_arg(table.clone()).with_arg(" both "))
        .unwrap();
    assert_eq!(out["when"], json!("BOTH"));

    let out = convert
        .call(CallState::new().with_arg(table).with_kwarg("when", "input"))
        .unwrap();
    assert_eq!(out["when"], json!("INPUT"));
}

#[test]
fn test_enum_cast_invalid_identifier() {
    let convert = cast_to_enum::<Cast>()
        .configure(enum_at(-2))
        .unwrap()
        .apply(convert_fn())
        .unwrap();

    let err = convert
        .call(CallState::new().with_arg(json!({})).with_arg("sideways"))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#""SIDEWAYS" is not a valid identifier. Must be one of: INPUT, OUTPUT, BOTH"#
    );
}

#[test]
fn test_enum_cast_respects_configured_case() {
    let strict = DecoratorConfig::new().with_identifier_case(IdentifierCase::Preserve);
    let convert = cast_to_enum_with::<Cast>(&strict)
        .configure(enum_at(1))
        .unwrap()
        .apply(convert_fn())
        .unwrap();

    assert!(convert.call(CallState::new().with_arg(json!({})).with_arg("OUTPUT")).is_ok());
    let err = convert
        .call(CallState::new().with_arg(json!({})).with_arg("output"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_domain::<DecoratorError>(),
        Some(DecoratorError::InvalidIdentifier { .. })
    ));
}

#[test]
fn test_missing_columns_error_lists_columns() {
    let describe = required_columns()
        .call(json!(["id", "name", "value"]), CallState::new())
        .unwrap()
        .into_pending()
        .unwrap()
        .apply(describe_fn())
        .unwrap();

    let ok = describe
        .call(CallState::new().with_kwarg("table", json!([{"id": 1, "name": "a", "value": 3}])))
        .unwrap();
    assert_eq!(ok["rows"], json!(1));

    let err = describe
        .call(CallState::new().with_arg(json!({"name": []})))
        .unwrap_err();
    assert_eq!(
        err.to_string(),
        r#"missing columns for table `table`: "id", "value""#
    );
}

#[test]
fn test_stacked_decorators_keep_interface() {
    let checked = required_columns()
        .configure(CallState::new().with_arg(json!(["a"])))
        .unwrap()
        .apply(convert_fn())
        .unwrap();
    let cast = cast_to_enum::<Cast>()
        .configure(enum_at(1))
        .unwrap()
        .apply(checked)
        .unwrap();
    let documented = add_docstring()
        .call(json!(" Columns are checked."), CallState::new())
        .unwrap()
        .into_pending()
        .unwrap()
        .apply(cast)
        .unwrap();

    assert_eq!(documented.name(), "convert");
    assert_eq!(documented.doc(), Some("Convert a table. Columns are checked."));
    let names: Vec<String> = catalog(&documented).unwrap().into_iter().map(|i| i.name).collect();
    assert_eq!(names, ["table", "when", "strict"]);

    let out = documented
        .call(CallState::new().with_arg(json!({"a": []})).with_arg("output").with_arg(true))
        .unwrap();
    assert_eq!(out, json!({"when": "OUTPUT", "strict": true}));

    let err = documented
        .call(CallState::new().with_arg(json!({"b": []})).with_arg("output"))
        .unwrap_err();
    assert!(matches!(
        err.downcast_domain::<DecoratorError>(),
        Some(DecoratorError::MissingColumns { .. })
    ));
}

#[test]
fn test_stub_over_enum_cast() {
    let cast = cast_to_enum::<Cast>()
        .configure(enum_at(1))
        .unwrap()
        .apply(convert_fn())
        .unwrap();
    let stub = not_implemented().apply(cast).unwrap();

    assert_eq!(stub.argument_info(1).unwrap().name, "when");
    let err = stub
        .call(CallState::new().with_arg(json!({})).with_arg("input"))
        .unwrap_err();
    assert_eq!(err.to_string(), "convert is not implemented.");
}

#[test]
fn test_output_cast_on_key() {
    let described = cast_output_to_type(Value::is_u64, |v| Ok(json!(format!("{v} rows"))))
        .call(json!("rows"), CallState::new())
        .unwrap()
        .into_pending()
        .unwrap()
        .apply(describe_fn())
        .unwrap();

    let out = described.call(CallState::new().with_arg(json!([{}, {}]))).unwrap();
    assert_eq!(out["rows"], json!("2 rows"));
    assert_eq!(out["table"], json!([{}, {}]));
}
