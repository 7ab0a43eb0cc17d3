//! Tag and attribute schema definitions.

use std::collections::HashSet;
use std::fmt;

use crate::attrs::ResolvedAttributes;
use crate::error::TagError;
use crate::node::ContentNode;
use crate::value::{AttrValue, ValueType};

/// What happens when an attribute fails validation.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Severity {
    /// Emit a diagnostic and continue with the default value.
    #[default]
    Warn,
    /// Fail the document build.
    Block,
}

impl Severity {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Warn => "warn",
            Self::Block => "block",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Schema for one attribute of a tag.
///
/// # Example
///
/// ```
/// use infdoc_tags::{AttributeSpec, Severity};
///
/// let spec = AttributeSpec::string("type")
///     .with_default("note")
///     .with_allowed(["note", "warning"])
///     .critical();
///
/// assert_eq!(spec.severity, Severity::Block);
/// ```
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct AttributeSpec {
    pub name: String,
    pub value_type: ValueType,
    /// Value used when the attribute is omitted or invalid under `warn`.
    pub default: Option<AttrValue>,
    /// Permitted values. `None` means unconstrained.
    pub allowed: Option<Vec<AttrValue>>,
    pub severity: Severity,
}

impl AttributeSpec {
    #[must_use]
    pub fn new(name: impl Into<String>, value_type: ValueType) -> Self {
        Self {
            name: name.into(),
            value_type,
            default: None,
            allowed: None,
            severity: Severity::default(),
        }
    }

    #[must_use]
    pub fn string(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::String)
    }

    #[must_use]
    pub fn number(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Number)
    }

    #[must_use]
    pub fn boolean(name: impl Into<String>) -> Self {
        Self::new(name, ValueType::Boolean)
    }

    #[must_use]
    pub fn with_default(mut self, value: impl Into<AttrValue>) -> Self {
        self.default = Some(value.into());
        self
    }

    #[must_use]
    pub fn with_allowed<I, V>(mut self, values: I) -> Self
    where
        I: IntoIterator<Item = V>,
        V: Into<AttrValue>,
    {
        self.allowed = Some(values.into_iter().map(Into::into).collect());
        self
    }

    #[must_use]
    pub fn with_severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    /// Shorthand for `with_severity(Severity::Block)`.
    #[must_use]
    pub fn critical(self) -> Self {
        self.with_severity(Severity::Block)
    }

    /// Whether `value` satisfies the enumeration constraint.
    #[must_use]
    pub fn permits(&self, value: &AttrValue) -> bool {
        self.allowed
            .as_ref()
            .is_none_or(|allowed| allowed.contains(value))
    }

    fn check(&self, tag: &str) -> Result<(), TagError> {
        let invalid = |message: String| TagError::InvalidSchema {
            tag: tag.to_owned(),
            message,
        };

        if let Some(allowed) = &self.allowed {
            if allowed.is_empty() {
                return Err(invalid(format!(
                    "attribute `{}` has an empty allowed set",
                    self.name
                )));
            }
            if let Some(bad) = allowed.iter().find(|v| v.value_type() != self.value_type) {
                return Err(invalid(format!(
                    "allowed value {} of attribute `{}` is not a {}",
                    bad.quoted(),
                    self.name,
                    self.value_type
                )));
            }
        }

        if let Some(default) = &self.default {
            if default.value_type() != self.value_type {
                return Err(invalid(format!(
                    "default {} of attribute `{}` is not a {}",
                    default.quoted(),
                    self.name,
                    self.value_type
                )));
            }
            if !self.permits(default) {
                return Err(invalid(format!(
                    "default {} of attribute `{}` is not in its allowed set",
                    default.quoted(),
                    self.name
                )));
            }
        }

        Ok(())
    }
}

/// Renders a tag from validated attributes and child content.
///
/// Implemented for any `Fn(&ResolvedAttributes, Vec<ContentNode>) -> ContentNode`,
/// so plain functions and closures can be registered directly.
///
/// Renderers are stateless and shared across documents, hence `Send + Sync`.
pub trait TagRenderer: Send + Sync {
    fn render(&self, attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode;
}

impl<F> TagRenderer for F
where
    F: Fn(&ResolvedAttributes, Vec<ContentNode>) -> ContentNode + Send + Sync,
{
    fn render(&self, attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
        self(attrs, children)
    }
}

/// One entry in the tag registry.
///
/// # Example
///
/// ```
/// use infdoc_tags::{AttributeSpec, ContentNode, Element, ResolvedAttributes, TagDefinition};
///
/// let figure = TagDefinition::new(
///     "figure",
///     |attrs: &ResolvedAttributes, _children: Vec<ContentNode>| -> ContentNode {
///         Element::new("img")
///             .with_optional_attr("src", attrs.str("src"))
///             .into()
///     },
/// )
/// .with_self_closing()
/// .with_attribute(AttributeSpec::string("src"));
///
/// assert!(figure.self_closing);
/// assert!(figure.attribute("src").is_some());
/// ```
pub struct TagDefinition {
    /// Tag identifier, case-sensitive.
    pub name: String,
    /// Self-closing tags accept no children.
    pub self_closing: bool,
    /// One-line description for schema documentation.
    pub description: Option<String>,
    attributes: Vec<AttributeSpec>,
    renderer: Box<dyn TagRenderer>,
}

impl TagDefinition {
    #[must_use]
    pub fn new(name: impl Into<String>, renderer: impl TagRenderer + 'static) -> Self {
        Self {
            name: name.into(),
            self_closing: false,
            description: None,
            attributes: Vec::new(),
            renderer: Box::new(renderer),
        }
    }

    #[must_use]
    pub fn with_self_closing(mut self) -> Self {
        self.self_closing = true;
        self
    }

    #[must_use]
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    #[must_use]
    pub fn with_attribute(mut self, spec: AttributeSpec) -> Self {
        self.attributes.push(spec);
        self
    }

    /// Declared attributes in declaration order.
    #[must_use]
    pub fn attributes(&self) -> &[AttributeSpec] {
        &self.attributes
    }

    #[must_use]
    pub fn attribute(&self, name: &str) -> Option<&AttributeSpec> {
        self.attributes.iter().find(|spec| spec.name == name)
    }

    /// Invoke the renderer.
    #[must_use]
    pub fn render(&self, attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
        self.renderer.render(attrs, children)
    }

    /// Check name rules, attribute uniqueness and every attribute invariant.
    pub(crate) fn check(&self) -> Result<(), TagError> {
        if !is_valid_name(&self.name) {
            return Err(TagError::InvalidSchema {
                tag: self.name.clone(),
                message: "tag names must be non-empty and use only ASCII letters, digits, '-' or '_'"
                    .to_owned(),
            });
        }

        let mut seen = HashSet::new();
        for spec in &self.attributes {
            if !seen.insert(spec.name.as_str()) {
                return Err(TagError::InvalidSchema {
                    tag: self.name.clone(),
                    message: format!("attribute `{}` is declared twice", spec.name),
                });
            }
            spec.check(&self.name)?;
        }

        Ok(())
    }
}

impl fmt::Debug for TagDefinition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TagDefinition")
            .field("name", &self.name)
            .field("self_closing", &self.self_closing)
            .field("description", &self.description)
            .field("attributes", &self.attributes)
            .finish_non_exhaustive()
    }
}

fn is_valid_name(name: &str) -> bool {
    !name.is_empty()
        && name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::node::Element;

    fn noop(_: &ResolvedAttributes, _: Vec<ContentNode>) -> ContentNode {
        ContentNode::Fragment(Vec::new())
    }

    #[test]
    fn test_default_severity_is_warn() {
        assert_eq!(AttributeSpec::string("title").severity, Severity::Warn);
    }

    #[test]
    fn test_permits_without_allowed_set() {
        let spec = AttributeSpec::string("title");
        assert!(spec.permits(&AttrValue::from("anything")));
    }

    #[test]
    fn test_permits_with_allowed_set() {
        let spec = AttributeSpec::string("type").with_allowed(["note", "warning"]);
        assert!(spec.permits(&AttrValue::from("note")));
        assert!(!spec.permits(&AttrValue::from("urgent")));
    }

    #[test]
    fn test_check_accepts_consistent_schema() {
        let def = TagDefinition::new("callout", noop).with_attribute(
            AttributeSpec::string("type")
                .with_default("note")
                .with_allowed(["note", "warning"])
                .critical(),
        );
        assert!(def.check().is_ok());
    }

    #[test]
    fn test_check_rejects_default_outside_allowed() {
        let def = TagDefinition::new("callout", noop).with_attribute(
            AttributeSpec::string("type")
                .with_default("tip")
                .with_allowed(["note", "warning"]),
        );
        let err = def.check().unwrap_err();
        assert!(matches!(err, TagError::InvalidSchema { .. }));
        assert!(err.to_string().contains("'tip'"));
    }

    #[test]
    fn test_check_rejects_mistyped_default() {
        let def = TagDefinition::new("video", noop)
            .with_attribute(AttributeSpec::number("width").with_default("wide"));
        assert!(matches!(
            def.check(),
            Err(TagError::InvalidSchema { .. })
        ));
    }

    #[test]
    fn test_check_rejects_mistyped_allowed_value() {
        let def = TagDefinition::new("video", noop)
            .with_attribute(AttributeSpec::number("width").with_allowed([AttrValue::from("x")]));
        assert!(def.check().is_err());
    }

    #[test]
    fn test_check_rejects_empty_allowed_set() {
        let def = TagDefinition::new("video", noop)
            .with_attribute(AttributeSpec::string("kind").with_allowed(Vec::<AttrValue>::new()));
        assert!(def.check().is_err());
    }

    #[test]
    fn test_check_rejects_duplicate_attribute() {
        let def = TagDefinition::new("figure", noop)
            .with_attribute(AttributeSpec::string("src"))
            .with_attribute(AttributeSpec::string("src"));
        let err = def.check().unwrap_err();
        assert!(err.to_string().contains("declared twice"));
    }

    #[test]
    fn test_tag_names() {
        assert!(is_valid_name("quick-link"));
        assert!(is_valid_name("code_java2"));
        assert!(!is_valid_name(""));
        assert!(!is_valid_name("quick link"));
        assert!(!is_valid_name("a/b"));
    }

    #[test]
    fn test_closure_renderer() {
        let def = TagDefinition::new(
            "badge",
            |attrs: &ResolvedAttributes, _: Vec<ContentNode>| -> ContentNode {
                Element::new("span")
                    .with_optional_attr("class", attrs.str("kind"))
                    .into()
            },
        );
        let node = def.render(&ResolvedAttributes::default(), Vec::new());
        assert_eq!(node.to_html(), "<span></span>");
    }
}
