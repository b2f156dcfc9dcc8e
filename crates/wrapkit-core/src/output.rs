//! Output locator and rewriter
//!
//! The return-value counterpart of [`crate::locate`]: an [`OutputSelector`]
//! picks the whole value, one array element, or one object entry.

use crate::error::WrapError;
use crate::signature::normalize_position;
use serde_json::Value;
use std::fmt;

/// Which part of a return value to read or replace
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum OutputSelector {
    /// The whole value
    #[default]
    Whole,

    /// Array element; negative indices count from the end
    Index(isize),

    /// Object entry
    Key(String),
}

impl fmt::Display for OutputSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Whole => f.write_str("<whole>"),
            Self::Index(index) => write!(f, "[{index}]"),
            Self::Key(key) => write!(f, "[{key:?}]"),
        }
    }
}

impl From<isize> for OutputSelector {
    fn from(index: isize) -> Self {
        Self::Index(index)
    }
}

impl From<&str> for OutputSelector {
    fn from(key: &str) -> Self {
        Self::Key(key.to_string())
    }
}

impl From<String> for OutputSelector {
    fn from(key: String) -> Self {
        Self::Key(key)
    }
}

impl TryFrom<&Value> for OutputSelector {
    type Error = WrapError;

    /// `null` selects the whole value, an integer an index, a string a key.
    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Null => Ok(Self::Whole),
            Value::String(key) => Ok(Self::Key(key.clone())),
            Value::Number(number) => number
                .as_i64()
                .and_then(|index| isize::try_from(index).ok())
                .map(Self::Index)
                .ok_or_else(|| WrapError::UnsupportedSelector(format!("non-integer index {number}"))),
            other => Err(WrapError::UnsupportedSelector(other.to_string())),
        }
    }
}

fn resolve_index(items: &[Value], index: isize) -> Result<usize, WrapError> {
    normalize_position(index, items.len()).ok_or_else(|| {
        WrapError::OutputSelection(format!(
            "index {index} out of range for {} elements",
            items.len()
        ))
    })
}

fn shape_mismatch(selector: &OutputSelector, output: &Value) -> WrapError {
    let shape = match output {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    };
    WrapError::OutputSelection(format!("selector {selector} does not apply to {shape} output"))
}

/// Read the selected part of `output`
///
/// # Errors
/// [`WrapError::OutputSelection`] if the selector does not fit the value.
pub fn select_output(output: &Value, selector: &OutputSelector) -> Result<Value, WrapError> {
    match (selector, output) {
        (OutputSelector::Whole, _) => Ok(output.clone()),
        (OutputSelector::Index(index), Value::Array(items)) => {
            let index = resolve_index(items, *index)?;
            Ok(items[index].clone())
        }
        (OutputSelector::Key(key), Value::Object(entries)) => entries
            .get(key)
            .cloned()
            .ok_or_else(|| WrapError::OutputSelection(format!("missing key {key:?}"))),
        _ => Err(shape_mismatch(selector, output)),
    }
}

/// Replace the selected part of `output` with `part`
///
/// Index selection rebuilds the array; key selection writes the entry into
/// the existing object, adding it when absent.
///
/// # Errors
/// [`WrapError::OutputSelection`] if the selector does not fit the value.
pub fn replace_output(output: Value, part: Value, selector: &OutputSelector) -> Result<Value, WrapError> {
    match (selector, output) {
        (OutputSelector::Whole, _) => Ok(part),
        (OutputSelector::Index(index), Value::Array(items)) => {
            let index = resolve_index(&items, *index)?;
            let items = items
                .into_iter()
                .enumerate()
                .map(|(i, item)| if i == index { part.clone() } else { item })
                .collect();
            Ok(Value::Array(items))
        }
        (OutputSelector::Key(key), Value::Object(mut entries)) => {
            entries.insert(key.clone(), part);
            Ok(Value::Object(entries))
        }
        (selector, output) => Err(shape_mismatch(selector, &output)),
    }
}
