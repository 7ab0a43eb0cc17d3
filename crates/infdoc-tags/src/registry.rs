//! Tag registry: construct, freeze, resolve.
//!
//! Tags are registered on a [`TagRegistryBuilder`] during startup. Calling
//! [`build`](TagRegistryBuilder::build) freezes the set into a [`TagRegistry`]
//! that only offers read access, so sharing it across render passes needs no
//! locking.

use std::collections::HashMap;

use crate::attrs::{RawAttributes, Resolved, ResolvedAttributes};
use crate::context::{Location, ResolveContext};
use crate::error::{Diagnostic, TagError};
use crate::node::ContentNode;
use crate::schema::{AttributeSpec, Severity, TagDefinition};
use crate::value::AttrValue;

/// Collects tag definitions before the registry is frozen.
#[derive(Debug, Default)]
pub struct TagRegistryBuilder {
    tags: HashMap<String, TagDefinition>,
}

impl TagRegistryBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a tag definition.
    ///
    /// # Errors
    ///
    /// Returns [`TagError::DuplicateTag`] if the name is taken and
    /// [`TagError::InvalidSchema`] if the definition is inconsistent (bad
    /// name, repeated attribute, default outside its allowed set).
    pub fn register(&mut self, definition: TagDefinition) -> Result<(), TagError> {
        if self.tags.contains_key(&definition.name) {
            return Err(TagError::DuplicateTag {
                name: definition.name,
            });
        }
        definition.check()?;

        tracing::debug!(
            tag = %definition.name,
            self_closing = definition.self_closing,
            attributes = definition.attributes().len(),
            "Registered tag"
        );
        self.tags.insert(definition.name.clone(), definition);
        Ok(())
    }

    /// Builder-style [`register`](Self::register).
    pub fn with_tag(mut self, definition: TagDefinition) -> Result<Self, TagError> {
        self.register(definition)?;
        Ok(self)
    }

    /// Freeze the registry.
    #[must_use]
    pub fn build(self) -> TagRegistry {
        TagRegistry { tags: self.tags }
    }
}

/// Result of resolving a tag.
#[derive(Debug, PartialEq)]
pub struct Resolution {
    /// Node produced by the tag's renderer.
    pub node: ContentNode,
    /// Recoverable violations; the node was rendered with fallbacks.
    pub diagnostics: Vec<Diagnostic>,
}

impl Resolution {
    /// `true` if resolution produced no diagnostics.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.diagnostics.is_empty()
    }
}

/// Frozen mapping from tag name to definition.
///
/// # Example
///
/// ```
/// use infdoc_tags::{
///     AttributeSpec, ContentNode, Element, RawAttributes, ResolveContext,
///     ResolvedAttributes, TagDefinition, TagRegistry,
/// };
///
/// fn callout(attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
///     let kind = attrs.str("type").unwrap_or_default();
///     Element::new("div")
///         .with_attr("class", format!("callout callout-{kind}"))
///         .with_children(children)
///         .into()
/// }
///
/// let registry = TagRegistry::builder()
///     .with_tag(
///         TagDefinition::new("callout", callout).with_attribute(
///             AttributeSpec::string("type")
///                 .with_default("note")
///                 .with_allowed(["note", "warning"])
///                 .critical(),
///         ),
///     )
///     .unwrap()
///     .build();
///
/// let resolution = registry
///     .resolve("callout", &RawAttributes::new(), vec![ContentNode::text("Hi")], &ResolveContext::default())
///     .unwrap();
/// assert_eq!(resolution.node.to_html(), r#"<div class="callout callout-note">Hi</div>"#);
/// ```
#[derive(Debug)]
pub struct TagRegistry {
    tags: HashMap<String, TagDefinition>,
}

impl TagRegistry {
    #[must_use]
    pub fn builder() -> TagRegistryBuilder {
        TagRegistryBuilder::new()
    }

    #[must_use]
    pub fn get(&self, name: &str) -> Option<&TagDefinition> {
        self.tags.get(name)
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.tags.contains_key(name)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.tags.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// All definitions sorted by tag name.
    #[must_use]
    pub fn tags(&self) -> Vec<&TagDefinition> {
        let mut tags: Vec<_> = self.tags.values().collect();
        tags.sort_by(|a, b| a.name.cmp(&b.name));
        tags
    }

    /// Validate attributes and render a tag.
    ///
    /// Validation always completes before the renderer runs; renderers only
    /// see coerced, default-filled values.
    ///
    /// # Errors
    ///
    /// - [`TagError::UnknownTag`] if `name` is not registered
    /// - [`TagError::UnexpectedChildren`] if a self-closing tag receives children
    /// - [`TagError::TypeMismatch`] / [`TagError::InvalidEnumValue`] for a
    ///   `block`-severity attribute violation
    pub fn resolve(
        &self,
        name: &str,
        raw: &RawAttributes,
        children: Vec<ContentNode>,
        ctx: &ResolveContext<'_>,
    ) -> Result<Resolution, TagError> {
        let Some(definition) = self.tags.get(name) else {
            return Err(TagError::UnknownTag {
                name: name.to_owned(),
                location: ctx.location(),
            });
        };

        if definition.self_closing && !children.is_empty() {
            return Err(TagError::UnexpectedChildren {
                name: name.to_owned(),
                count: children.len(),
                location: ctx.location(),
            });
        }

        let (attrs, diagnostics) = resolve_attributes(definition, raw, &ctx.location())?;
        let node = definition.render(&attrs, children);

        Ok(Resolution { node, diagnostics })
    }
}

/// Validate every declared attribute, then flag undeclared ones.
fn resolve_attributes(
    definition: &TagDefinition,
    raw: &RawAttributes,
    location: &Location,
) -> Result<(ResolvedAttributes, Vec<Diagnostic>), TagError> {
    let mut attrs = ResolvedAttributes::default();
    let mut diagnostics = Vec::new();

    for spec in definition.attributes() {
        let resolved = match raw.get(&spec.name) {
            None => fallback(spec),
            Some(value) => match check_value(&definition.name, spec, value, location) {
                Ok(coerced) => Resolved::Value(coerced),
                Err(error) if spec.severity == Severity::Block => return Err(error),
                Err(error) => {
                    let resolved = fallback(spec);
                    let diagnostic = Diagnostic {
                        error,
                        fallback: resolved.value().cloned(),
                    };
                    tracing::warn!(
                        tag = %definition.name,
                        attribute = %spec.name,
                        %location,
                        "{diagnostic}"
                    );
                    diagnostics.push(diagnostic);
                    resolved
                }
            },
        };
        attrs.insert(spec.name.clone(), resolved);
    }

    for (key, _) in raw.iter() {
        if definition.attribute(key).is_none() {
            let diagnostic = Diagnostic {
                error: TagError::UnknownAttribute {
                    tag: definition.name.clone(),
                    attribute: key.to_owned(),
                    location: location.clone(),
                },
                fallback: None,
            };
            tracing::warn!(
                tag = %definition.name,
                attribute = %key,
                %location,
                "{diagnostic}"
            );
            diagnostics.push(diagnostic);
        }
    }

    Ok((attrs, diagnostics))
}

fn check_value(
    tag: &str,
    spec: &AttributeSpec,
    value: &AttrValue,
    location: &Location,
) -> Result<AttrValue, TagError> {
    let Some(coerced) = value.coerce(spec.value_type) else {
        return Err(TagError::TypeMismatch {
            tag: tag.to_owned(),
            attribute: spec.name.clone(),
            expected: spec.value_type,
            found: value.value_type(),
            value: value.clone(),
            location: location.clone(),
        });
    };

    if !spec.permits(&coerced) {
        return Err(TagError::InvalidEnumValue {
            tag: tag.to_owned(),
            attribute: spec.name.clone(),
            value: coerced,
            allowed: spec.allowed.clone().unwrap_or_default(),
            location: location.clone(),
        });
    }

    Ok(coerced)
}

fn fallback(spec: &AttributeSpec) -> Resolved {
    spec.default
        .clone()
        .map_or(Resolved::Absent, Resolved::Value)
}
