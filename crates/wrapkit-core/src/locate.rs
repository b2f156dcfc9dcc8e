//! Argument locator and rewriter
//!
//! [`locate`] classifies how one parameter's value reached a call and
//! retrieves it; [`rewrite`] writes a new value back to the same place.
//!
//! ```
//! use wrapkit_core::{locate, rewrite, ArgumentLocation, CallState, ParameterInfo};
//! use serde_json::json;
//!
//! let b = ParameterInfo::new("b", 1, Some(json!(2)));
//! let state = CallState::new().with_arg(json!(5)).with_arg(json!(7));
//!
//! let (value, location) = locate(&b, &state);
//! assert_eq!(value, Some(json!(7)));
//! assert_eq!(location, ArgumentLocation::Positional);
//!
//! let rewritten = rewrite(json!(8), &b, location, &state);
//! assert_eq!(rewritten.args(), &[json!(5), json!(8)]);
//! ```

use crate::call::CallState;
use crate::error::WrapError;
use crate::signature::ParameterInfo;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::fmt;

/// How a parameter's value was supplied to one call
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[repr(u8)]
pub enum ArgumentLocation {
    /// Supplied in the positional sequence
    Positional = 0,

    /// Supplied by name
    Keyword = 1,

    /// Not supplied; the declared default applies
    Default = 2,
}

impl ArgumentLocation {
    /// Every location, in tag order
    pub const ALL: [Self; 3] = [Self::Positional, Self::Keyword, Self::Default];

    /// Display name
    #[inline]
    #[must_use]
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Positional => "POSITIONAL",
            Self::Keyword => "KEYWORD",
            Self::Default => "DEFAULT",
        }
    }

    /// Raw tag
    #[inline]
    #[must_use]
    pub fn tag(self) -> u8 {
        self as u8
    }

    /// Decode a raw tag
    ///
    /// # Errors
    /// [`WrapError::InvalidLocation`] for any tag outside `0..=2`.
    pub fn from_tag(tag: u8) -> Result<Self, WrapError> {
        Self::ALL
            .into_iter()
            .find(|location| location.tag() == tag)
            .ok_or(WrapError::InvalidLocation { tag })
    }

    /// Comma-separated list of valid options
    #[must_use]
    pub fn options() -> String {
        Self::ALL
            .iter()
            .map(Self::as_str)
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for ArgumentLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl TryFrom<u8> for ArgumentLocation {
    type Error = WrapError;

    fn try_from(tag: u8) -> Result<Self, Self::Error> {
        Self::from_tag(tag)
    }
}

/// Find the value a call supplied for `parameter`
///
/// Named values win over positional ones; a parameter supplied nowhere is
/// reported as [`ArgumentLocation::Default`] with whatever default is on
/// record, which may be `None`.
#[must_use]
pub fn locate(parameter: &ParameterInfo, state: &CallState) -> (Option<Value>, ArgumentLocation) {
    if let Some(value) = state.keyword(&parameter.name) {
        return (Some(value.clone()), ArgumentLocation::Keyword);
    }
    if let Some(value) = state.positional(parameter.position) {
        return (Some(value.clone()), ArgumentLocation::Positional);
    }
    (parameter.default.clone(), ArgumentLocation::Default)
}

/// Write `value` back where `location` says it came from
///
/// A value that came from the default is written as a named value, so the
/// result of rewriting an untouched default differs from the input state by
/// one keyword entry.
///
/// `Positional` requires `parameter.position` to index an existing positional
/// value, as [`locate`] guarantees when it reports that location.
#[must_use]
pub fn rewrite(
    value: Value,
    parameter: &ParameterInfo,
    location: ArgumentLocation,
    state: &CallState,
) -> CallState {
    tracing::trace!(parameter = %parameter.name, %location, "rewriting argument");

    match location {
        ArgumentLocation::Default | ArgumentLocation::Keyword => {
            state.clone().with_kwarg(parameter.name.clone(), value)
        }
        ArgumentLocation::Positional => {
            debug_assert!(
                parameter.position < state.args().len(),
                "positional rewrite of `{}` past the supplied values",
                parameter.name
            );
            let (args, kwargs) = state.clone().into_parts();
            let args = args
                .into_iter()
                .enumerate()
                .map(|(index, arg)| {
                    if index == parameter.position {
                        value.clone()
                    } else {
                        arg
                    }
                })
                .collect();
            CallState::from_parts(args, kwargs)
        }
    }
}

/// [`rewrite`] for a location held as a raw tag
///
/// # Errors
/// [`WrapError::InvalidLocation`] if `tag` names no location.
pub fn rewrite_tagged(
    value: Value,
    parameter: &ParameterInfo,
    tag: u8,
    state: &CallState,
) -> Result<CallState, WrapError> {
    let location = ArgumentLocation::from_tag(tag)?;
    Ok(rewrite(value, parameter, location, state))
}
