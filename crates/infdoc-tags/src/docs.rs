//! Schema documentation for registered tags.
//!
//! Authors need to know, for every tag, whether it is self-closing and what
//! each attribute accepts. [`TagRegistry::schema`] exposes that as data (and
//! as JSON with the `serde` feature), [`TagRegistry::schema_markdown`] as a
//! Markdown reference page.

use std::fmt::Write;

use crate::registry::TagRegistry;
use crate::schema::AttributeSpec;
use crate::value::format_allowed;

/// Public schema of one tag.
#[derive(Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct TagSchema<'a> {
    pub name: &'a str,
    pub self_closing: bool,
    #[cfg_attr(feature = "serde", serde(skip_serializing_if = "Option::is_none"))]
    pub description: Option<&'a str>,
    pub attributes: &'a [AttributeSpec],
}

impl TagRegistry {
    /// Schema of every registered tag, sorted by name.
    #[must_use]
    pub fn schema(&self) -> Vec<TagSchema<'_>> {
        self.tags()
            .into_iter()
            .map(|tag| TagSchema {
                name: &tag.name,
                self_closing: tag.self_closing,
                description: tag.description.as_deref(),
                attributes: tag.attributes(),
            })
            .collect()
    }

    /// Render the tag reference as Markdown.
    ///
    /// # Example
    ///
    /// ```
    /// use infdoc_tags::{AttributeSpec, ContentNode, ResolvedAttributes, TagDefinition, TagRegistry};
    ///
    /// fn empty(_: &ResolvedAttributes, _: Vec<ContentNode>) -> ContentNode {
    ///     ContentNode::Fragment(Vec::new())
    /// }
    ///
    /// let registry = TagRegistry::builder()
    ///     .with_tag(TagDefinition::new("figure", empty)
    ///         .with_self_closing()
    ///         .with_attribute(AttributeSpec::string("src")))
    ///     .unwrap()
    ///     .build();
    ///
    /// let docs = registry.schema_markdown();
    /// assert!(docs.contains("## `figure`"));
    /// assert!(docs.contains("| `src` | string |"));
    /// ```
    #[must_use]
    pub fn schema_markdown(&self) -> String {
        let mut out = String::from("# Tag reference\n");

        for tag in self.schema() {
            let _ = write!(out, "\n## `{}`\n\n", tag.name);
            if let Some(description) = tag.description {
                let _ = writeln!(out, "{description}\n");
            }
            out.push_str(if tag.self_closing {
                "Self-closing: yes\n"
            } else {
                "Self-closing: no\n"
            });

            if tag.attributes.is_empty() {
                out.push_str("\nNo attributes.\n");
                continue;
            }

            out.push_str("\n| Attribute | Type | Default | Allowed | Severity |\n");
            out.push_str("|-----------|------|---------|---------|----------|\n");
            for spec in tag.attributes {
                let default = spec
                    .default
                    .as_ref()
                    .map_or_else(|| "-".to_owned(), |v| format!("`{}`", v.quoted()));
                let allowed = spec
                    .allowed
                    .as_deref()
                    .map_or_else(|| "-".to_owned(), |values| format!("`{}`", format_allowed(values)));
                let _ = writeln!(
                    out,
                    "| `{}` | {} | {} | {} | {} |",
                    spec.name, spec.value_type, default, allowed, spec.severity
                );
            }
        }

        out
    }
}
