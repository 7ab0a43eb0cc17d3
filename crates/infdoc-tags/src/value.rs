//! Attribute value types and coercion.

use std::fmt;

/// Semantic primitive type of an attribute.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ValueType {
    String,
    Number,
    Boolean,
}

impl ValueType {
    /// Lowercase name used in diagnostics and schema docs.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::String => "string",
            Self::Number => "number",
            Self::Boolean => "boolean",
        }
    }
}

impl fmt::Display for ValueType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A typed attribute value.
///
/// Raw values handed over by the markup parser and resolved values passed to
/// renderers share this representation.
///
/// # Example
///
/// ```
/// use infdoc_tags::{AttrValue, ValueType};
///
/// let raw = AttrValue::from("42");
/// assert_eq!(raw.coerce(ValueType::Number), Some(AttrValue::Number(42.0)));
/// assert_eq!(AttrValue::from(true).coerce(ValueType::String), None);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(untagged))]
pub enum AttrValue {
    String(String),
    Number(f64),
    Boolean(bool),
}

impl AttrValue {
    /// The type this value currently holds.
    #[must_use]
    pub fn value_type(&self) -> ValueType {
        match self {
            Self::String(_) => ValueType::String,
            Self::Number(_) => ValueType::Number,
            Self::Boolean(_) => ValueType::Boolean,
        }
    }

    #[must_use]
    pub fn as_str(&self) -> Option<&str> {
        match self {
            Self::String(s) => Some(s),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    #[must_use]
    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Self::Boolean(b) => Some(*b),
            _ => None,
        }
    }

    /// Coerce this value to `target`.
    ///
    /// Values already of the target type pass through. Strings coerce to
    /// numbers when they parse as a finite float, and to booleans when they
    /// are exactly `true` or `false`. Every other combination fails.
    #[must_use]
    pub fn coerce(&self, target: ValueType) -> Option<Self> {
        match (self, target) {
            (Self::String(_), ValueType::String)
            | (Self::Number(_), ValueType::Number)
            | (Self::Boolean(_), ValueType::Boolean) => Some(self.clone()),
            (Self::String(s), ValueType::Number) => s
                .trim()
                .parse::<f64>()
                .ok()
                .filter(|n| n.is_finite())
                .map(Self::Number),
            (Self::String(s), ValueType::Boolean) => match s.as_str() {
                "true" => Some(Self::Boolean(true)),
                "false" => Some(Self::Boolean(false)),
                _ => None,
            },
            _ => None,
        }
    }

    /// Render the value the way it appears inside error messages.
    ///
    /// Strings are single-quoted, numbers and booleans are bare.
    #[must_use]
    pub fn quoted(&self) -> String {
        match self {
            Self::String(s) => format!("'{s}'"),
            other => other.to_string(),
        }
    }
}

impl fmt::Display for AttrValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::String(s) => f.write_str(s),
            Self::Number(n) => write!(f, "{n}"),
            Self::Boolean(b) => write!(f, "{b}"),
        }
    }
}

impl From<&str> for AttrValue {
    fn from(value: &str) -> Self {
        Self::String(value.to_owned())
    }
}

impl From<String> for AttrValue {
    fn from(value: String) -> Self {
        Self::String(value)
    }
}

impl From<f64> for AttrValue {
    fn from(value: f64) -> Self {
        Self::Number(value)
    }
}

impl From<bool> for AttrValue {
    fn from(value: bool) -> Self {
        Self::Boolean(value)
    }
}

/// Format a set of allowed values as `['a', 'b']`.
pub(crate) fn format_allowed(values: &[AttrValue]) -> String {
    let items: Vec<String> = values.iter().map(AttrValue::quoted).collect();
    format!("[{}]", items.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_same_type_passes_through() {
        let value = AttrValue::from("note");
        assert_eq!(value.coerce(ValueType::String), Some(value.clone()));
        assert_eq!(
            AttrValue::Number(1.5).coerce(ValueType::Number),
            Some(AttrValue::Number(1.5))
        );
    }

    #[test]
    fn test_string_to_number() {
        assert_eq!(
            AttrValue::from(" 560 ").coerce(ValueType::Number),
            Some(AttrValue::Number(560.0))
        );
        assert_eq!(AttrValue::from("wide").coerce(ValueType::Number), None);
        assert_eq!(AttrValue::from("NaN").coerce(ValueType::Number), None);
        assert_eq!(AttrValue::from("inf").coerce(ValueType::Number), None);
    }

    #[test]
    fn test_string_to_boolean() {
        assert_eq!(
            AttrValue::from("true").coerce(ValueType::Boolean),
            Some(AttrValue::Boolean(true))
        );
        assert_eq!(
            AttrValue::from("false").coerce(ValueType::Boolean),
            Some(AttrValue::Boolean(false))
        );
        assert_eq!(AttrValue::from("yes").coerce(ValueType::Boolean), None);
    }

    #[test]
    fn test_non_string_never_becomes_string() {
        assert_eq!(AttrValue::Number(3.0).coerce(ValueType::String), None);
        assert_eq!(AttrValue::Boolean(false).coerce(ValueType::String), None);
        assert_eq!(AttrValue::Boolean(true).coerce(ValueType::Number), None);
    }

    #[test]
    fn test_display_and_quoted() {
        assert_eq!(AttrValue::from("urgent").to_string(), "urgent");
        assert_eq!(AttrValue::from("urgent").quoted(), "'urgent'");
        assert_eq!(AttrValue::Number(3.0).quoted(), "3");
        assert_eq!(AttrValue::Boolean(true).quoted(), "true");
    }

    #[test]
    fn test_format_allowed() {
        let allowed = vec![AttrValue::from("note"), AttrValue::from("warning")];
        assert_eq!(format_allowed(&allowed), "['note', 'warning']");
        assert_eq!(format_allowed(&[]), "[]");
    }
}
