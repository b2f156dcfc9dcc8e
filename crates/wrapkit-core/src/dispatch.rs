//! Factory dispatcher
//!
//! Lets one [`Transform`] serve both as a direct wrapper and as a factory of
//! wrappers. Which path a call takes is decided by a [`Discriminator`] applied
//! to the first operand:
//!
//! ```text
//! Unbound ──(target)──────────────────────────────► Applied
//!    │                                                 ▲
//!    └──(configuration)──► PendingTarget ──(apply)─────┘
//! ```
//!
//! Both paths end in a normalized wrapper around the target.

use crate::call::CallState;
use crate::error::WrapError;
use crate::function::Function;
use crate::locate::locate;
use crate::normalize::finish;
use crate::signature::{ParameterInfo, Signature};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::fmt;
use std::sync::Arc;

/// Anything a dual-mode callable can receive first
#[derive(Debug, Clone)]
pub enum Operand {
    /// A function, the usual wrapping target
    Function(Function),

    /// A plain value, the usual configuration
    Value(Value),
}

impl Operand {
    fn describe(&self) -> String {
        match self {
            Self::Function(function) => format!("function `{}`", function.name()),
            Self::Value(value) => format!("value {value}"),
        }
    }
}

impl From<Function> for Operand {
    fn from(function: Function) -> Self {
        Self::Function(function)
    }
}

impl From<Value> for Operand {
    fn from(value: Value) -> Self {
        Self::Value(value)
    }
}

/// Predicate separating wrapping targets from configuration values
pub type Discriminator = Arc<dyn Fn(&Operand) -> bool + Send + Sync>;

/// Default discriminator: only functions are targets
#[inline]
#[must_use]
pub fn is_invocable(operand: &Operand) -> bool {
    matches!(operand, Operand::Function(_))
}

/// Which role the first operand of a dual-mode call plays
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CallKind {
    /// The operand is the object to wrap
    Target,

    /// The operand is the first configuration value
    Configuration,
}

/// Classify `operand` with `discriminator`
#[inline]
#[must_use]
pub fn classify(discriminator: &Discriminator, operand: &Operand) -> CallKind {
    if discriminator(operand) {
        CallKind::Target
    } else {
        CallKind::Configuration
    }
}

/// Configuration values bound to a transform's declared parameters
#[derive(Debug, Clone)]
pub struct Configuration {
    transform: String,
    signature: Arc<Signature>,
    state: CallState,
}

impl Configuration {
    /// Bind `state` against `signature`
    ///
    /// # Errors
    /// - [`WrapError::TooManyArguments`] for surplus positional values
    /// - [`WrapError::UnexpectedArgument`] for unknown keywords
    /// - [`WrapError::DuplicateArgument`] for a value given twice
    /// - [`WrapError::MissingArgument`] for a required value given nowhere
    pub fn bind(transform: &str, signature: Arc<Signature>, state: CallState) -> Result<Self, WrapError> {
        let capacity = signature.positional_capacity();
        if state.args().len() > capacity && !signature.accepts_var_positional() {
            return Err(WrapError::TooManyArguments {
                function: transform.to_string(),
                expected: capacity,
                given: state.args().len(),
            });
        }

        for keyword in state.kwargs().keys() {
            match signature.position_of(keyword) {
                Some(position) if position < capacity && position < state.args().len() => {
                    return Err(WrapError::DuplicateArgument {
                        function: transform.to_string(),
                        parameter: keyword.clone(),
                    });
                }
                Some(_) => {}
                None if signature.accepts_var_keyword() => {}
                None => {
                    return Err(WrapError::UnexpectedArgument {
                        function: transform.to_string(),
                        keyword: keyword.clone(),
                    });
                }
            }
        }

        for info in signature.infos() {
            if bound_value(&info, capacity, &state).is_none() {
                return Err(WrapError::MissingArgument {
                    function: transform.to_string(),
                    parameter: info.name,
                });
            }
        }

        tracing::debug!(transform, values = state.len(), "bound configuration");
        Ok(Self {
            transform: transform.to_string(),
            signature,
            state,
        })
    }

    /// Value of the parameter called `name`
    ///
    /// # Errors
    /// [`WrapError::UnexpectedArgument`] if `name` is not declared.
    pub fn argument(&self, name: &str) -> Result<Value, WrapError> {
        let info = self.signature.info_by_name(&self.transform, name)?;
        let capacity = self.signature.positional_capacity();
        bound_value(&info, capacity, &self.state).ok_or_else(|| WrapError::MissingArgument {
            function: self.transform.clone(),
            parameter: info.name,
        })
    }

    /// Value of the parameter called `name`, deserialized into `T`
    ///
    /// # Errors
    /// As [`Configuration::argument`], plus
    /// [`WrapError::InvalidConfiguration`] when the value does not fit `T`.
    pub fn parse<T: DeserializeOwned>(&self, name: &str) -> Result<T, WrapError> {
        let value = self.argument(name)?;
        serde_json::from_value(value).map_err(|e| WrapError::InvalidConfiguration {
            transform: self.transform.clone(),
            reason: format!("`{name}`: {e}"),
        })
    }

    /// Raw bound values
    #[inline]
    #[must_use]
    pub fn state(&self) -> &CallState {
        &self.state
    }
}

/// Value bound to `info`, where only the first `capacity` parameters take
/// positional values; later ones are keyword-only
fn bound_value(info: &ParameterInfo, capacity: usize, state: &CallState) -> Option<Value> {
    if info.position < capacity {
        return locate(info, state).0;
    }
    state
        .keyword(&info.name)
        .cloned()
        .or_else(|| info.default.clone())
}

/// Transform body: receives the target and its bound configuration
pub type TransformFn =
    Arc<dyn Fn(&mut Function, &Configuration) -> Result<Function, WrapError> + Send + Sync>;

/// A `transform(target, *configuration)` with declared configuration parameters
#[derive(Clone)]
pub struct Transform {
    name: String,
    doc: Option<String>,
    signature: Arc<Signature>,
    apply: TransformFn,
}

impl Transform {
    /// Create a transform
    ///
    /// `signature` declares the configuration parameters; the target is
    /// implicit and not part of it.
    pub fn new<F>(name: impl Into<String>, signature: Signature, apply: F) -> Self
    where
        F: Fn(&mut Function, &Configuration) -> Result<Function, WrapError> + Send + Sync + 'static,
    {
        Self {
            name: name.into(),
            doc: None,
            signature: Arc::new(signature),
            apply: Arc::new(apply),
        }
    }

    /// Set documentation
    #[must_use]
    pub fn with_doc(mut self, doc: impl Into<String>) -> Self {
        self.doc = Some(doc.into());
        self
    }

    /// Transform name
    #[inline]
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Transform documentation
    #[inline]
    #[must_use]
    pub fn doc(&self) -> Option<&str> {
        self.doc.as_deref()
    }

    /// Declared configuration parameters
    #[inline]
    #[must_use]
    pub fn signature(&self) -> &Signature {
        &self.signature
    }

    /// Bind configuration values to this transform
    ///
    /// # Errors
    /// As [`Configuration::bind`].
    pub fn bind(&self, config: CallState) -> Result<Configuration, WrapError> {
        Configuration::bind(&self.name, Arc::clone(&self.signature), config)
    }

    /// Apply to `target` with already bound configuration
    ///
    /// # Errors
    /// Whatever the transform body returns.
    pub fn apply_bound(&self, target: Function, config: &Configuration) -> Result<Function, WrapError> {
        tracing::debug!(transform = %self.name, function = %target.name(), "applying transform");
        let mut target = target;
        let wrapper = (self.apply)(&mut target, config)?;
        Ok(finish(&target, wrapper))
    }

    /// Apply to `target` with `config`
    ///
    /// # Errors
    /// Binding errors, then whatever the transform body returns.
    pub fn apply(&self, target: Function, config: CallState) -> Result<Function, WrapError> {
        let config = self.bind(config)?;
        self.apply_bound(target, &config)
    }
}

impl fmt::Debug for Transform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Transform")
            .field("name", &self.name)
            .field("signature", &self.signature)
            .finish_non_exhaustive()
    }
}

/// Outcome of a dual-mode call
#[derive(Debug, Clone)]
pub enum Dispatch {
    /// The target was wrapped directly
    Applied(Function),

    /// Configuration was captured; a target is still needed
    Pending(PendingWrapper),
}

impl Dispatch {
    /// The wrapper, if the call took the direct path
    #[must_use]
    pub fn into_applied(self) -> Option<Function> {
        match self {
            Self::Applied(function) => Some(function),
            Self::Pending(_) => None,
        }
    }

    /// The pending wrapper, if the call took the factory path
    #[must_use]
    pub fn into_pending(self) -> Option<PendingWrapper> {
        match self {
            Self::Applied(_) => None,
            Self::Pending(pending) => Some(pending),
        }
    }
}

/// A configured transform awaiting its target
#[derive(Debug, Clone)]
pub struct PendingWrapper {
    transform: Transform,
    config: Configuration,
}

impl PendingWrapper {
    /// Transform that will be applied
    #[inline]
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Captured configuration
    #[inline]
    #[must_use]
    pub fn configuration(&self) -> &Configuration {
        &self.config
    }

    /// Wrap `target` with the captured configuration
    ///
    /// # Errors
    /// Whatever the transform body returns.
    pub fn apply(&self, target: Function) -> Result<Function, WrapError> {
        self.transform.apply_bound(target, &self.config)
    }
}

/// A transform usable both directly and as a factory
#[derive(Clone)]
pub struct DualMode {
    transform: Transform,
    discriminator: Discriminator,
}

impl DualMode {
    /// Underlying transform
    #[inline]
    #[must_use]
    pub fn transform(&self) -> &Transform {
        &self.transform
    }

    /// Dispatch on the role of `first`
    ///
    /// A target is wrapped at once with `rest` as configuration. Otherwise
    /// `first` becomes the leading configuration value and a
    /// [`PendingWrapper`] is returned.
    ///
    /// # Errors
    /// - [`WrapError::NotInvocable`] when a value is classified as a target
    /// - [`WrapError::InvalidConfiguration`] when a function is classified as
    ///   configuration
    /// - binding and transform errors
    pub fn call(&self, first: impl Into<Operand>, rest: CallState) -> Result<Dispatch, WrapError> {
        let first = first.into();
        let kind = classify(&self.discriminator, &first);
        tracing::debug!(transform = %self.transform.name(), ?kind, "dispatching");

        match (kind, first) {
            (CallKind::Target, Operand::Function(target)) => {
                self.transform.apply(target, rest).map(Dispatch::Applied)
            }
            (CallKind::Configuration, Operand::Value(value)) => {
                self.configure(rest.prepend_arg(value)).map(Dispatch::Pending)
            }
            (CallKind::Target, operand @ Operand::Value(_)) => Err(WrapError::NotInvocable {
                transform: self.transform.name().to_string(),
                found: operand.describe(),
            }),
            (CallKind::Configuration, operand @ Operand::Function(_)) => {
                Err(WrapError::InvalidConfiguration {
                    transform: self.transform.name().to_string(),
                    reason: format!("{} cannot be used as configuration", operand.describe()),
                })
            }
        }
    }

    /// Wrap `target` directly with default configuration
    ///
    /// # Errors
    /// Binding and transform errors.
    pub fn apply(&self, target: Function) -> Result<Function, WrapError> {
        self.transform.apply(target, CallState::new())
    }

    /// Capture configuration and wait for a target
    ///
    /// # Errors
    /// Binding errors, reported before any target is seen.
    pub fn configure(&self, config: CallState) -> Result<PendingWrapper, WrapError> {
        let config = self.transform.bind(config)?;
        Ok(PendingWrapper {
            transform: self.transform.clone(),
            config,
        })
    }
}

impl fmt::Debug for DualMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DualMode")
            .field("transform", &self.transform)
            .finish_non_exhaustive()
    }
}

/// Turn `transform` into a dual-mode callable using [`is_invocable`]
#[must_use]
pub fn as_dual_mode(transform: Transform) -> DualMode {
    DecoratorFactory::new().wrap(transform)
}

/// Input to a [`DecoratorFactory`] call
#[derive(Clone)]
pub enum FactoryInput {
    /// A transform to make dual-mode
    Transform(Transform),

    /// A replacement discriminator
    Discriminator(Discriminator),
}

/// Outcome of a [`DecoratorFactory`] call
#[derive(Debug, Clone)]
pub enum FactoryOutput {
    /// The transform made dual-mode
    DualMode(DualMode),

    /// A factory carrying the new discriminator
    Factory(DecoratorFactory),
}

/// The dispatcher constructor, itself dispatch-aware
///
/// Called with a transform it produces a [`DualMode`]; called with a
/// discriminator it produces a re-parameterized factory.
#[derive(Clone, Default)]
pub struct DecoratorFactory {
    discriminator: Option<Discriminator>,
}

impl DecoratorFactory {
    /// Factory using [`is_invocable`]
    #[inline]
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Factory using `discriminator`
    #[must_use]
    pub fn with_discriminator<F>(discriminator: F) -> Self
    where
        F: Fn(&Operand) -> bool + Send + Sync + 'static,
    {
        Self {
            discriminator: Some(Arc::new(discriminator)),
        }
    }

    /// Check if the default discriminator is in use
    #[inline]
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.discriminator.is_none()
    }

    /// Dispatch on the kind of input
    #[must_use]
    pub fn call(&self, input: FactoryInput) -> FactoryOutput {
        match input {
            FactoryInput::Transform(transform) => FactoryOutput::DualMode(self.wrap(transform)),
            FactoryInput::Discriminator(discriminator) => FactoryOutput::Factory(Self {
                discriminator: Some(discriminator),
            }),
        }
    }

    /// Make `transform` dual-mode under this factory's discriminator
    #[must_use]
    pub fn wrap(&self, transform: Transform) -> DualMode {
        let discriminator: Discriminator = match &self.discriminator {
            Some(discriminator) => Arc::clone(discriminator),
            None => Arc::new(is_invocable),
        };
        DualMode {
            transform,
            discriminator,
        }
    }
}

impl fmt::Debug for DecoratorFactory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratorFactory")
            .field("default_discriminator", &self.is_default())
            .finish()
    }
}
