//! Raw and resolved attribute maps.

use std::collections::BTreeMap;

use crate::value::AttrValue;

/// Attributes as supplied by the markup parser, before validation.
///
/// # Example
///
/// ```
/// use infdoc_tags::{AttrValue, RawAttributes};
///
/// let raw = RawAttributes::new()
///     .with("type", "warning")
///     .with("title", "Heads up");
/// assert_eq!(raw.get("type"), Some(&AttrValue::from("warning")));
/// assert_eq!(raw.len(), 2);
/// ```
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RawAttributes {
    attrs: BTreeMap<String, AttrValue>,
}

impl RawAttributes {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<AttrValue>) {
        self.attrs.insert(key.into(), value.into());
    }

    #[must_use]
    pub fn get(&self, key: &str) -> Option<&AttrValue> {
        self.attrs.get(key)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.attrs.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.attrs.is_empty()
    }

    /// Iterate attributes in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &AttrValue)> {
        self.attrs.iter().map(|(k, v)| (k.as_str(), v))
    }
}

impl<K, V> FromIterator<(K, V)> for RawAttributes
where
    K: Into<String>,
    V: Into<AttrValue>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Self {
            attrs: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

/// A validated attribute slot.
///
/// `Absent` marks an attribute that was omitted and has no default. It is
/// distinct from an empty string.
#[derive(Clone, Debug, PartialEq)]
pub enum Resolved {
    Value(AttrValue),
    Absent,
}

impl Resolved {
    #[must_use]
    pub fn value(&self) -> Option<&AttrValue> {
        match self {
            Self::Value(v) => Some(v),
            Self::Absent => None,
        }
    }

    #[must_use]
    pub fn is_absent(&self) -> bool {
        matches!(self, Self::Absent)
    }
}

/// Attributes after validation, handed to renderers.
///
/// Holds exactly one slot per attribute declared in the tag's schema. Values
/// are already coerced to the declared type and default-filled.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct ResolvedAttributes {
    values: BTreeMap<String, Resolved>,
}

impl ResolvedAttributes {
    /// Get the slot for `name`, or `None` if the schema does not declare it.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Resolved> {
        self.values.get(name)
    }

    /// Get the value for `name` if it is present.
    #[must_use]
    pub fn value(&self, name: &str) -> Option<&AttrValue> {
        self.get(name).and_then(Resolved::value)
    }

    #[must_use]
    pub fn str(&self, name: &str) -> Option<&str> {
        self.value(name).and_then(AttrValue::as_str)
    }

    #[must_use]
    pub fn number(&self, name: &str) -> Option<f64> {
        self.value(name).and_then(AttrValue::as_number)
    }

    #[must_use]
    pub fn boolean(&self, name: &str) -> Option<bool> {
        self.value(name).and_then(AttrValue::as_bool)
    }

    /// Whether `name` is declared and resolved to [`Resolved::Absent`].
    #[must_use]
    pub fn is_absent(&self, name: &str) -> bool {
        self.get(name).is_some_and(Resolved::is_absent)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.values.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Resolved)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub(crate) fn insert(&mut self, name: String, resolved: Resolved) {
        self.values.insert(name, resolved);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_raw_from_iter() {
        let raw: RawAttributes = [("src", "/img/a.png"), ("alt", "diagram")]
            .into_iter()
            .collect();
        assert_eq!(raw.len(), 2);
        assert_eq!(raw.get("alt"), Some(&AttrValue::from("diagram")));
        assert_eq!(raw.get("caption"), None);
    }

    #[test]
    fn test_raw_iter_is_sorted() {
        let raw = RawAttributes::new().with("z", "1").with("a", "2");
        let keys: Vec<&str> = raw.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["a", "z"]);
    }

    #[test]
    fn test_absent_is_not_empty_string() {
        let mut attrs = ResolvedAttributes::default();
        attrs.insert("alt".to_owned(), Resolved::Absent);
        attrs.insert("title".to_owned(), Resolved::Value(AttrValue::from("")));

        assert!(attrs.is_absent("alt"));
        assert_eq!(attrs.str("alt"), None);
        assert!(!attrs.is_absent("title"));
        assert_eq!(attrs.str("title"), Some(""));
    }

    #[test]
    fn test_undeclared_is_not_absent() {
        let attrs = ResolvedAttributes::default();
        assert!(!attrs.is_absent("missing"));
        assert_eq!(attrs.get("missing"), None);
    }

    #[test]
    fn test_typed_accessors() {
        let mut attrs = ResolvedAttributes::default();
        attrs.insert("width".to_owned(), Resolved::Value(AttrValue::Number(560.0)));
        attrs.insert("open".to_owned(), Resolved::Value(AttrValue::Boolean(true)));

        assert_eq!(attrs.number("width"), Some(560.0));
        assert_eq!(attrs.boolean("open"), Some(true));
        assert_eq!(attrs.str("width"), None);
    }
}
