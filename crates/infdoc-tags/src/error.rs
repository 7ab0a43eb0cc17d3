//! Error and diagnostic types for tag resolution.

use std::fmt;

use crate::context::Location;
use crate::value::{AttrValue, ValueType, format_allowed};

/// Error from registering or resolving a tag.
///
/// Attribute variants double as the payload of recoverable [`Diagnostic`]s
/// when the attribute's severity is `warn`.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
#[non_exhaustive]
pub enum TagError {
    /// A tag with this name is already registered.
    #[error("tag `{name}` is already registered")]
    DuplicateTag { name: String },

    /// No tag with this name is registered.
    #[error("unknown tag `{name}` at {location}")]
    UnknownTag { name: String, location: Location },

    /// Content was supplied to a self-closing tag.
    #[error("tag `{name}` is self-closing but received {count} child node(s) at {location}")]
    UnexpectedChildren {
        name: String,
        count: usize,
        location: Location,
    },

    /// Attribute value does not coerce to the declared type.
    #[error(
        "attribute `{attribute}` of tag `{tag}` expects a {expected}, got {found} {} at {location}",
        .value.quoted()
    )]
    TypeMismatch {
        tag: String,
        attribute: String,
        expected: ValueType,
        found: ValueType,
        value: AttrValue,
        location: Location,
    },

    /// Attribute value is outside the declared enumeration.
    #[error(
        "invalid value {} for attribute `{attribute}` of tag `{tag}` at {location}, allowed: {}",
        .value.quoted(),
        format_allowed(.allowed)
    )]
    InvalidEnumValue {
        tag: String,
        attribute: String,
        value: AttrValue,
        allowed: Vec<AttrValue>,
        location: Location,
    },

    /// Attribute is not declared in the tag's schema.
    #[error("tag `{tag}` has no attribute `{attribute}` at {location}")]
    UnknownAttribute {
        tag: String,
        attribute: String,
        location: Location,
    },

    /// Tag definition is internally inconsistent.
    #[error("invalid schema for tag `{tag}`: {message}")]
    InvalidSchema { tag: String, message: String },
}

impl TagError {
    /// Name of the tag the error refers to.
    #[must_use]
    pub fn tag(&self) -> &str {
        match self {
            Self::DuplicateTag { name }
            | Self::UnknownTag { name, .. }
            | Self::UnexpectedChildren { name, .. } => name,
            Self::TypeMismatch { tag, .. }
            | Self::InvalidEnumValue { tag, .. }
            | Self::UnknownAttribute { tag, .. }
            | Self::InvalidSchema { tag, .. } => tag,
        }
    }

    /// Name of the attribute the error refers to, if any.
    #[must_use]
    pub fn attribute(&self) -> Option<&str> {
        match self {
            Self::TypeMismatch { attribute, .. }
            | Self::InvalidEnumValue { attribute, .. }
            | Self::UnknownAttribute { attribute, .. } => Some(attribute),
            _ => None,
        }
    }
}

/// A recoverable attribute violation.
///
/// Produced for `warn`-severity attributes and for undeclared attributes.
/// The offending value has been replaced by `fallback` (or dropped when
/// `fallback` is `None`).
#[derive(Clone, Debug, PartialEq)]
pub struct Diagnostic {
    pub error: TagError,
    pub fallback: Option<AttrValue>,
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.error, &self.fallback) {
            (TagError::UnknownAttribute { .. }, _) => write!(f, "{}; ignored", self.error),
            (_, Some(value)) => write!(f, "{}; using default {}", self.error, value.quoted()),
            (_, None) => write!(f, "{}; left unset", self.error),
        }
    }
}
