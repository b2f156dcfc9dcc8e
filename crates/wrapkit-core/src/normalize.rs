//! Decorator normalizer
//!
//! [`normalize`] turns a plain transform into a [`Decorator`] whose wrappers
//! carry the target's name, doc and signature. The transform receives the
//! target mutably and may amend its metadata first; the wrapper then adopts
//! the amended metadata.

use crate::error::WrapError;
use crate::function::Function;
use std::fmt;
use std::sync::Arc;

/// Transform from a target to its wrapper
pub type Decorate = Arc<dyn Fn(&mut Function) -> Result<Function, WrapError> + Send + Sync>;

/// Give `wrapper` the metadata of `target`
///
/// Shared by [`Decorator::apply`] and the dispatcher so that every wrapper
/// path ends the same way.
pub(crate) fn finish(target: &Function, wrapper: Function) -> Function {
    tracing::debug!(function = %target.name(), "normalizing wrapper metadata");
    wrapper.adopt_metadata(target)
}

/// A transform whose wrappers preserve the target's interface
#[derive(Clone)]
pub struct Decorator {
    name: String,
    doc: Option<String>,
    decorate: Decorate,
}

impl Decorator {
    /// Decorator name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Decorator documentation
    #[inline]
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Set documentation
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Wrap `target`
    ///
    /// # Errors
    /// Whatever the transform returns.
    pub fn apply(&self, target: Function) -> Result<Function, WrapError> {
        tracing::debug!(decorator = %self.name, function = %target.name(), "applying decorator");
        let mut target = target;
        let wrapper = (self.decorate)(&mut target)?;
        Ok(finish(&target, wrapper))
    }
}

impl fmt::Debug for Decorator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Decorator")
            .field("name", &self.name)
            .field("doc", &self.doc)
            .finish_non_exhaustive()
    }
}

/// Make `transform` interface-preserving
///
/// # Example
/// ```
/// use wrapkit_core::{normalize, CallState, Function, Signature};
/// use serde_json::json;
///
/// let negate = normalize("negate", |target: &mut Function| {
///     let inner = target.clone();
///     Ok(Function::new("wrapper", Signature::opaque(), move |call| {
///         let out = inner.call(call)?;
///         Ok(json!(-out.as_i64().unwrap_or(0)))
///     }))
/// });
///
/// let three = Function::new("three", Signature::builder().required("x").build(), |_| Ok(json!(3)));
/// let wrapped = negate.apply(three).unwrap();
///
/// assert_eq!(wrapped.name(), "three");
/// assert_eq!(wrapped.argument_info(0).unwrap().name, "x");
/// assert_eq!(wrapped.call(CallState::new()).unwrap(), json!(-3));
/// ```
pub fn normalize<F>(name: impl Into<String>, transform: F) -> Decorator
where
    F: Fn(&mut Function) -> Result<Function, WrapError> + Send + Sync + 'static,
{
    Decorator {
        name: name.into(),
        doc: None,
        decorate: Arc::new(transform),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::call::CallState;
    use crate::signature::Signature;
    use serde_json::json;

    fn identity() -> Function {
        Function::new(
            "identity",
            Signature::builder().required("value").build(),
            |call| Ok(call.positional(0).cloned().unwrap_or_default()),
        )
        .with_doc("Return the value.")
    }

    fn opaque_passthrough() -> Decorator {
        normalize("passthrough", |target: &mut Function| {
            let inner = target.clone();
            Ok(Function::new("wrapper", Signature::opaque(), move |call| inner.call(call)))
        })
    }

    #[test]
    fn wrapper_adopts_target_metadata() {
        let wrapped = opaque_passthrough().apply(identity()).unwrap();
        assert_eq!(wrapped.name(), "identity");
        assert_eq!(wrapped.doc(), Some("Return the value."));
        assert!(!wrapped.signature().is_opaque());
    }

    #[test]
    fn stacked_decorators_see_original_signature() {
        let once = opaque_passthrough().apply(identity()).unwrap();
        let twice = opaque_passthrough().apply(once).unwrap();

        assert_eq!(twice.argument_info(0).unwrap().name, "value");
        assert_eq!(twice.call(CallState::new().with_arg("v")).unwrap(), json!("v"));
    }

    #[test]
    fn metadata_edits_survive_normalization() {
        let tagged = normalize("tag", |target: &mut Function| {
            target.append_doc(" Tagged.");
            Ok(target.clone())
        });

        let wrapped = tagged.apply(identity()).unwrap();
        assert_eq!(wrapped.doc(), Some("Return the value. Tagged."));
    }

    #[test]
    fn transform_errors_propagate() {
        let failing = normalize("failing", |_: &mut Function| {
            Err(WrapError::OutputSelection("refused".to_string()))
        });
        assert!(matches!(
            failing.apply(identity()),
            Err(WrapError::OutputSelection(_))
        ));
    }

    #[test]
    fn decorator_keeps_its_own_identity() {
        let deco = opaque_passthrough().with_doc("Pass through.");
        assert_eq!(deco.name(), "passthrough");
        assert_eq!(deco.doc(), Some("Pass through."));
    }
}
