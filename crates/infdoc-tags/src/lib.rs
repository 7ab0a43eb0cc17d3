//! Markup tag registry with attribute schema validation.
//!
//! A documentation renderer hands each custom tag it encounters to a frozen
//! [`TagRegistry`]. The registry validates the raw attributes against the
//! tag's schema, fills defaults, and only then calls the tag's renderer.
//!
//! # Architecture
//!
//! - [`AttributeSpec`] describes one attribute: type, default, allowed values
//!   and [`Severity`]. A `block` violation fails the build; a `warn`
//!   violation produces a [`Diagnostic`] and falls back to the default.
//! - [`TagDefinition`] binds a name and schema to a [`TagRenderer`].
//! - [`TagRegistryBuilder`] collects definitions at startup and freezes them
//!   into a read-only [`TagRegistry`].
//! - Renderers produce [`ContentNode`] trees that serialize to HTML.
//!
//! # Example
//!
//! ```
//! use infdoc_tags::{
//!     AttributeSpec, ContentNode, Element, RawAttributes, ResolveContext,
//!     ResolvedAttributes, TagDefinition, TagError, TagRegistry,
//! };
//!
//! fn callout(attrs: &ResolvedAttributes, children: Vec<ContentNode>) -> ContentNode {
//!     Element::new("div")
//!         .with_attr("class", attrs.str("type").unwrap_or_default())
//!         .with_children(children)
//!         .into()
//! }
//!
//! let registry = TagRegistry::builder()
//!     .with_tag(TagDefinition::new("callout", callout).with_attribute(
//!         AttributeSpec::string("type")
//!             .with_default("note")
//!             .with_allowed(["note", "warning"])
//!             .critical(),
//!     ))
//!     .unwrap()
//!     .build();
//!
//! let raw = RawAttributes::new().with("type", "urgent");
//! let err = registry
//!     .resolve("callout", &raw, Vec::new(), &ResolveContext::at_line(3))
//!     .unwrap_err();
//! assert!(matches!(err, TagError::InvalidEnumValue { .. }));
//! ```

mod attrs;
mod context;
mod docs;
mod error;
mod node;
mod registry;
mod schema;
mod value;

pub use attrs::{RawAttributes, Resolved, ResolvedAttributes};
pub use context::{Location, ResolveContext};
pub use docs::TagSchema;
pub use error::{Diagnostic, TagError};
pub use node::{ContentNode, Element, escape_html};
pub use registry::{Resolution, TagRegistry, TagRegistryBuilder};
pub use schema::{AttributeSpec, Severity, TagDefinition, TagRenderer};
pub use value::{AttrValue, ValueType};
