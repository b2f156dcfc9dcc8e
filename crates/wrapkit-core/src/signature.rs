//! Parameter catalog
//!
//! Provides [`Signature`], the caller-declared parameter list of a wrapped
//! function, and [`ParameterInfo`], the resolved description of one parameter
//! used by the locator and rewriter.
//!
//! Signatures are declared once, next to the function they describe:
//!
//! ```
//! use wrapkit_core::Signature;
//! use serde_json::json;
//!
//! let signature = Signature::builder()
//!     .required("a")
//!     .optional("b", json!(2))
//!     .build();
//!
//! let info = signature.argument_info("power", -1).unwrap();
//! assert_eq!(info.name, "b");
//! assert_eq!(info.position, 1);
//! assert_eq!(info.default, Some(json!(2)));
//! ```

use crate::error::WrapError;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How a declared parameter receives values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterKind {
    /// Ordinary parameter, bindable by position or by name
    Named,

    /// Collects surplus positional values
    VarPositional,

    /// Collects surplus named values
    VarKeyword,
}

impl ParameterKind {
    /// Check if the parameter is variadic
    #[inline]
    #[must_use]
    pub fn is_variadic(&self) -> bool {
        matches!(self, Self::VarPositional | Self::VarKeyword)
    }
}

/// One declared parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Parameter {
    /// Declared name
    pub name: String,

    /// Binding kind
    pub kind: ParameterKind,

    /// Default value, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub default: Option<Value>,
}

/// Resolved description of one concrete parameter
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParameterInfo {
    /// Declared name
    pub name: String,

    /// Non-negative position in the signature
    pub position: usize,

    /// Default value, if any
    pub default: Option<Value>,
}

impl ParameterInfo {
    /// Create parameter info
    #[inline]
    #[must_use]
    pub fn new(name: impl Into<String>, position: usize, default: Option<Value>) -> Self {
        Self {
            name: name.into(),
            position,
            default,
        }
    }

    /// Check if a default is on record
    #[inline]
    #[must_use]
    pub fn has_default(&self) -> bool {
        self.default.is_some()
    }
}

/// Map a possibly negative position onto `[0, count)`
///
/// Negative positions count from the end. Returns `None` when the result
/// falls outside the range.
#[must_use]
pub fn normalize_position(position: isize, count: usize) -> Option<usize> {
    let count = isize::try_from(count).ok()?;
    let normalized = if position < 0 { position + count } else { position };
    if (0..count).contains(&normalized) {
        usize::try_from(normalized).ok()
    } else {
        None
    }
}

/// Ordered, caller-declared parameter list
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Signature {
    parameters: Vec<Parameter>,
}

impl Signature {
    /// Start declaring a signature
    #[inline]
    #[must_use]
    pub fn builder() -> SignatureBuilder {
        SignatureBuilder::default()
    }

    /// Signature with no parameters
    #[inline]
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// The generic pass-through shape `(*args, **kwargs)`
    #[must_use]
    pub fn opaque() -> Self {
        Self::builder()
            .var_positional("args")
            .var_keyword("kwargs")
            .build()
    }

    /// Declared parameters, in order
    #[inline]
    #[must_use]
    pub fn parameters(&self) -> &[Parameter] {
        &self.parameters
    }

    /// Number of declared parameters, variadic slots included
    #[inline]
    #[must_use]
    pub fn len(&self) -> usize {
        self.parameters.len()
    }

    /// Check if nothing is declared
    #[inline]
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.parameters.is_empty()
    }

    /// Check if only variadic slots are declared
    #[must_use]
    pub fn is_opaque(&self) -> bool {
        !self.parameters.is_empty() && self.parameters.iter().all(|p| p.kind.is_variadic())
    }

    /// Check if surplus positional values are accepted
    #[must_use]
    pub fn accepts_var_positional(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.kind == ParameterKind::VarPositional)
    }

    /// Check if unknown keywords are accepted
    #[must_use]
    pub fn accepts_var_keyword(&self) -> bool {
        self.parameters
            .iter()
            .any(|p| p.kind == ParameterKind::VarKeyword)
    }

    /// Position of the concrete parameter called `name`
    #[must_use]
    pub fn position_of(&self, name: &str) -> Option<usize> {
        self.parameters
            .iter()
            .position(|p| p.kind == ParameterKind::Named && p.name == name)
    }

    /// Number of parameters that can be bound positionally
    #[must_use]
    pub fn positional_capacity(&self) -> usize {
        self.parameters
            .iter()
            .take_while(|p| p.kind == ParameterKind::Named)
            .count()
    }

    /// Resolve the concrete parameter at `position`
    ///
    /// `function` names the owner and only feeds the error message.
    ///
    /// # Errors
    /// [`WrapError::Lookup`] if the normalized position is out of range or
    /// lands on a variadic slot.
    pub fn argument_info(&self, function: &str, position: isize) -> Result<ParameterInfo, WrapError> {
        let lookup_error = || WrapError::Lookup {
            function: function.to_string(),
            position,
            count: self.parameters.len(),
        };

        let index = normalize_position(position, self.parameters.len()).ok_or_else(lookup_error)?;
        let parameter = &self.parameters[index];
        if parameter.kind.is_variadic() {
            return Err(lookup_error());
        }

        Ok(ParameterInfo::new(
            parameter.name.clone(),
            index,
            parameter.default.clone(),
        ))
    }

    /// Resolve the concrete parameter called `name`
    ///
    /// # Errors
    /// [`WrapError::UnexpectedArgument`] if no such parameter is declared.
    pub fn info_by_name(&self, function: &str, name: &str) -> Result<ParameterInfo, WrapError> {
        let index = self
            .position_of(name)
            .ok_or_else(|| WrapError::UnexpectedArgument {
                function: function.to_string(),
                keyword: name.to_string(),
            })?;
        let parameter = &self.parameters[index];
        Ok(ParameterInfo::new(
            parameter.name.clone(),
            index,
            parameter.default.clone(),
        ))
    }

    /// Every concrete parameter, in order
    #[must_use]
    pub fn infos(&self) -> Vec<ParameterInfo> {
        self.parameters
            .iter()
            .enumerate()
            .filter(|(_, p)| p.kind == ParameterKind::Named)
            .map(|(index, p)| ParameterInfo::new(p.name.clone(), index, p.default.clone()))
            .collect()
    }
}

/// Builder for [`Signature`]
#[derive(Debug, Default)]
pub struct SignatureBuilder {
    parameters: Vec<Parameter>,
}

impl SignatureBuilder {
    /// Declare a parameter without a default
    #[must_use]
    pub fn required(self, name: impl Into<String>) -> Self {
        self.push(name.into(), ParameterKind::Named, None)
    }

    /// Declare a parameter with a default
    #[must_use]
    pub fn optional(self, name: impl Into<String>, default: impl Into<Value>) -> Self {
        self.push(name.into(), ParameterKind::Named, Some(default.into()))
    }

    /// Declare the surplus positional slot
    #[must_use]
    pub fn var_positional(self, name: impl Into<String>) -> Self {
        self.push(name.into(), ParameterKind::VarPositional, None)
    }

    /// Declare the surplus keyword slot
    #[must_use]
    pub fn var_keyword(self, name: impl Into<String>) -> Self {
        self.push(name.into(), ParameterKind::VarKeyword, None)
    }

    /// Finish the declaration
    #[inline]
    #[must_use]
    pub fn build(self) -> Signature {
        Signature {
            parameters: self.parameters,
        }
    }

    fn push(mut self, name: String, kind: ParameterKind, default: Option<Value>) -> Self {
        if self.parameters.iter().any(|p| p.name == name) {
            tracing::warn!(parameter = %name, "ignoring repeated parameter declaration");
            return self;
        }
        self.parameters.push(Parameter {
            name,
            kind,
            default,
        });
        self
    }
}
