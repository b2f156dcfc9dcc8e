//! Wrapped functions and their metadata
//!
//! A [`Function`] is the explicit `(callable, metadata)` pair: a body over a
//! dynamic [`CallState`] plus the [`Metadata`] (name, doc, signature) declared
//! when it was built. Wrappers produced by the normalizer reuse the target's
//! metadata so that stacked decorators still see the original signature.

use crate::call::CallState;
use crate::error::WrapError;
use crate::signature::{ParameterInfo, Signature};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Function body over a dynamic call
pub type Body = Arc<dyn Fn(CallState) -> Result<Value, WrapError> + Send + Sync>;

/// Declared interface of a function
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Declared name
    pub name: String,

    /// Documentation, if any
    #[serde(default)]
    pub doc: Option<String>,

    /// Declared parameters
    pub signature: Signature,
}

impl Metadata {
    /// Create metadata without documentation
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, signature: Signature) -> Self {
        Self {
            name: name.into(),
            doc: None,
            signature,
        }
    }
}

/// Invocable function with its declared metadata
///
/// # Example
/// ```
/// use wrapkit_core::{CallState, Function, Signature};
/// use serde_json::json;
///
/// let double = Function::new(
///     "double",
///     Signature::builder().required("x").build(),
///     |call| {
///         let x = call.positional(0).and_then(|v| v.as_i64()).unwrap_or(0);
///         Ok(json!(x * 2))
///     },
/// );
///
/// let out = double.call(CallState::new().with_arg(json!(21))).unwrap();
/// assert_eq!(out, json!(42));
/// ```
#[derive(Clone)]
pub struct Function {
    metadata: Arc<Metadata>,
    body: Body,
}

impl Function {
    /// Create a function from a name, a declared signature and a body
    pub fn new<F>(name: impl Into<String>, signature: Signature, body: F) -> Self
    where
        F: Fn(CallState) -> Result<Value, WrapError> + Send + Sync + 'static,
    {
        Self {
            metadata: Arc::new(Metadata::new(name, signature)),
            body: Arc::new(body),
        }
    }

    /// Create a function from prepared parts
    #[inline]
    #[must_use]
    pub fn from_parts(metadata: Metadata, body: Body) -> Self {
        Self {
            metadata: Arc::new(metadata),
            body,
        }
    }

    /// New function running `body` under `target`'s metadata
    ///
    /// The building block of every wrapper: callers of the result see the
    /// target's name, doc and signature.
    pub fn wraps<F>(target: &Function, body: F) -> Self
    where
        F: Fn(CallState) -> Result<Value, WrapError> + Send + Sync + 'static,
    {
        Self {
            metadata: Arc::clone(&target.metadata),
            body: Arc::new(body),
        }
    }

    /// Set documentation
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        Arc::make_mut(&mut self.metadata).doc = Some(doc.into());
        self
    }

    /// Append to the documentation, starting from empty when there is none
    pub fn append_doc(&mut self, extra: &str) {
        let metadata = Arc::make_mut(&mut self.metadata);
        metadata.doc.get_or_insert_with(String::new).push_str(extra);
    }

    /// Replace this function's metadata with `source`'s
    #[must_use]
    pub fn adopt_metadata(mut self, source: &Function) -> Self {
        self.metadata = Arc::clone(&source.metadata);
        self
    }

    /// Declared name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.metadata.name
    }

    /// Documentation
    #[inline]
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.metadata.doc.as_deref()
    }

    /// Declared signature
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.metadata.signature
    }

    /// Full metadata
    #[inline]
    #[must_use]
    pub fn metadata(&self) -> &Metadata {
        &self.metadata
    }

    /// Resolve the parameter at `position` of this function's signature
    ///
    /// # Errors
    /// [`WrapError::Lookup`] as for [`Signature::argument_info`].
    pub fn argument_info(&self, position: isize) -> Result<ParameterInfo, WrapError> {
        self.metadata.signature.argument_info(&self.metadata.name, position)
    }

    /// Invoke the body
    ///
    /// # Errors
    /// Whatever the body returns; wrappers pass inner errors through as-is.
    #[inline]
    pub fn call(&self, state: CallState) -> Result<Value, WrapError> {
        (self.body)(state)
    }
}

impl fmt::Debug for Function {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Function")
            .field("metadata", &self.metadata)
            .finish_non_exhaustive()
    }
}

/// Every concrete parameter of `function`, in declaration order
///
/// # Errors
/// [`WrapError::Lookup`] when the function only declares variadic slots and
/// so has no concrete interface to report.
pub fn catalog(function: &Function) -> Result<Vec<ParameterInfo>, WrapError> {
    let signature = function.signature();
    if signature.is_opaque() {
        return Err(WrapError::Lookup {
            function: function.name().to_string(),
            position: 0,
            count: signature.len(),
        });
    }
    Ok(signature.infos())
}
