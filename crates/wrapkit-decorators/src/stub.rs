//! Placeholder decorator for functions that exist only as an interface

use crate::error::DecoratorError;
use wrapkit_core::{normalize, Decorator, Function};

/// Replace the target's body with one that always fails
///
/// The wrapper keeps the target's name, doc and signature, so it can still be
/// decorated and introspected; calling it yields
/// [`DecoratorError::NotImplemented`].
#[must_use]
pub fn not_implemented() -> Decorator {
    normalize("not_implemented", |target: &mut Function| {
        let name = target.name().to_string();
        Ok(Function::wraps(target, move |_| {
            Err(DecoratorError::NotImplemented(name.clone()).into())
        }))
    })
    .with_doc("Mark a function as not implemented.")
}
