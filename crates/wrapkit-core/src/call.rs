//! Call state: the actual arguments of one invocation
//!
//! Provides [`CallState`], the positional/named argument pair handed to a
//! wrapped function body. Rewriting produces a new state; nothing in this
//! crate edits a caller's state in place.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Positional and named values of a single call
///
/// # Example
/// ```
/// use wrapkit_core::CallState;
/// use serde_json::json;
///
/// let state = CallState::new().with_arg(json!(5)).with_kwarg("b", json!(9));
/// assert_eq!(state.positional(0), Some(&json!(5)));
/// assert_eq!(state.keyword("b"), Some(&json!(9)));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CallState {
    /// Positional values, in order
    #[serde(default)]
    args: Vec<Value>,

    /// Named values, in insertion order
    #[serde(default)]
    kwargs: IndexMap<String, Value>,
}

impl CallState {
    /// Create an empty call state
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create from explicit parts
    #[inline]
    #[must_use]
    pub fn from_parts(args: Vec<Value>, kwargs: IndexMap<String, Value>) -> Self {
        Self { args, kwargs }
    }

    /// Append a positional value
    #[inline]
    #[must_use]
    pub fn with_arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Set a named value
    #[inline]
    #[must_use]
    pub fn with_kwarg(mut self, name: impl Into<String>, value: impl Into<Value>) -> Self {
        self.kwargs.insert(name.into(), value.into());
        self
    }

    /// Positional values
    #[inline]
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Named values
    #[inline]
    #[must_use]
    pub fn kwargs(&self) -> &IndexMap<String, Value> {
        &self.kwargs
    }

    /// Positional value at `index`
    #[inline]
    #[must_use]
    pub fn positional(&self, index: usize) -> Option<&Value> {
        self.args.get(index)
    }

    /// Named value for `name`
    #[inline]
    #[must_use]
    pub fn keyword(&self, name: &str) -> Option<&Value> {
        self.kwargs.get(name)
    }

    /// Total number of supplied values
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.args.len() + self.kwargs.len()
    }

    /// Check if nothing was supplied
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.args.is_empty() && self.kwargs.is_empty()
    }

    /// Same state with `value` inserted before all positional values
    #[must_use]
    pub fn prepend_arg(&self, value: Value) -> Self {
        let mut args = Vec::with_capacity(self.args.len() + 1);
        args.push(value);
        args.extend(self.args.iter().cloned());
        Self {
            args,
            kwargs: self.kwargs.clone(),
        }
    }

    /// Split into positional and named parts
    #[inline]
    #[must_use]
    pub fn into_parts(self) -> (Vec<Value>, IndexMap<String, Value>) {
        (self.args, self.kwargs)
    }
}
