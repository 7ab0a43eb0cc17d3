//! Documentation site glue for infdoc.
//!
//! Composes the tag registry, the language toggle and the configuration
//! into the pieces a documentation host drives:
//!
//! - [`builtin_registry`] registers the site's tag set (callouts, figures,
//!   quick links and multi-language code samples).
//! - [`DocumentBuilder`] resolves a parsed tag tree against a registry.
//! - [`Page`] binds the language blocks of a built document to a
//!   [`LanguageToggle`](infdoc_toggle::LanguageToggle) and renders HTML with
//!   the current visibility applied.
//!
//! # Example
//!
//! ```
//! use infdoc_site::{DocumentBuilder, Page, SourceNode, TagInvocation, builtin_registry};
//! use infdoc_toggle::Language;
//!
//! let registry = builtin_registry().unwrap();
//! let nodes = vec![SourceNode::from(
//!     TagInvocation::new("codes")
//!         .with_child(TagInvocation::new("code-java").with_child(SourceNode::text("int x;")))
//!         .with_child(TagInvocation::new("code-kotlin").with_child(SourceNode::text("val x"))),
//! )];
//!
//! let document = DocumentBuilder::new(&registry).build(nodes).unwrap();
//! let mut page = Page::from_document(document, Language::Java);
//! page.initialize(None);
//! page.select("kotlin").unwrap();
//!
//! assert!(page.render_html().contains(r#"<span data-language-code="java" hidden="">"#));
//! ```

mod document;
mod page;
mod tags;

pub use document::{BuildError, BuiltDocument, DocumentBuilder, SourceNode, TagInvocation};
pub use page::Page;
pub use tags::{SELECT_LANGUAGE_ATTR, builtin_registry, register_builtin_tags};
