//! Document building.
//!
//! The external markup parser hands over a tree of [`SourceNode`]s. The
//! [`DocumentBuilder`] resolves every tag bottom-up against a frozen
//! [`TagRegistry`] and collects recoverable diagnostics along the way.

use std::path::Path;

use infdoc_config::Config;
use infdoc_tags::{
    AttrValue, ContentNode, Diagnostic, RawAttributes, ResolveContext, TagError, TagRegistry,
};

/// A node of the parsed document.
#[derive(Clone, Debug, PartialEq)]
pub enum SourceNode {
    /// A custom tag to resolve.
    Tag(TagInvocation),
    /// Plain text.
    Text(String),
    /// Content the parser already rendered (standard Markdown elements).
    Rendered(ContentNode),
}

impl SourceNode {
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }
}

impl From<TagInvocation> for SourceNode {
    fn from(invocation: TagInvocation) -> Self {
        Self::Tag(invocation)
    }
}

impl From<ContentNode> for SourceNode {
    fn from(node: ContentNode) -> Self {
        Self::Rendered(node)
    }
}

/// One use of a custom tag in a document.
///
/// # Example
///
/// ```
/// use infdoc_site::{SourceNode, TagInvocation};
///
/// let callout = TagInvocation::new("callout")
///     .with_attr("type", "warning")
///     .with_child(SourceNode::text("Mind the gap."))
///     .at_line(4);
///
/// assert_eq!(callout.children.len(), 1);
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TagInvocation {
    pub name: String,
    pub attributes: RawAttributes,
    pub children: Vec<SourceNode>,
    /// Line where the tag opens (1-indexed, 0 if unknown).
    pub line: usize,
}

impl TagInvocation {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            attributes: RawAttributes::new(),
            children: Vec::new(),
            line: 0,
        }
    }

    #[must_use]
    pub fn with_attr(mut self, key: impl Into<String>, value: impl Into<AttrValue>) -> Self {
        self.attributes.insert(key, value);
        self
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<SourceNode>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn at_line(mut self, line: usize) -> Self {
        self.line = line;
        self
    }
}

/// A fully resolved document.
#[derive(Debug, PartialEq)]
pub struct BuiltDocument {
    pub root: ContentNode,
    /// Recoverable violations, in document order.
    pub diagnostics: Vec<Diagnostic>,
}

/// Error that stops a document build.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    /// A tag could not be resolved.
    #[error(transparent)]
    Tag(#[from] TagError),
    /// Diagnostics were emitted while warnings are treated as errors.
    #[error("{} tag diagnostic(s) with fail_on_warnings enabled", .diagnostics.len())]
    Warnings { diagnostics: Vec<Diagnostic> },
}

/// Resolves parsed documents against a tag registry.
pub struct DocumentBuilder<'a> {
    registry: &'a TagRegistry,
    source_path: Option<&'a Path>,
    fail_on_warnings: bool,
}

impl<'a> DocumentBuilder<'a> {
    #[must_use]
    pub fn new(registry: &'a TagRegistry) -> Self {
        Self {
            registry,
            source_path: None,
            fail_on_warnings: false,
        }
    }

    /// Builder using the validation policy from `config`.
    #[must_use]
    pub fn from_config(registry: &'a TagRegistry, config: &Config) -> Self {
        Self::new(registry).with_fail_on_warnings(config.validation.fail_on_warnings)
    }

    /// Set the source file path reported in errors.
    #[must_use]
    pub fn with_source_path(mut self, path: &'a Path) -> Self {
        self.source_path = Some(path);
        self
    }

    /// Treat recoverable diagnostics as build failures.
    #[must_use]
    pub fn with_fail_on_warnings(mut self, enabled: bool) -> Self {
        self.fail_on_warnings = enabled;
        self
    }

    /// Resolve every tag in `nodes`.
    ///
    /// Children are resolved before their parent, so a renderer always
    /// receives finished content. A `block`-severity violation anywhere
    /// aborts the build without output.
    ///
    /// # Errors
    ///
    /// Returns [`BuildError::Tag`] on the first fatal tag error, or
    /// [`BuildError::Warnings`] if `fail_on_warnings` is set and any
    /// diagnostic was produced.
    pub fn build(&self, nodes: Vec<SourceNode>) -> Result<BuiltDocument, BuildError> {
        let mut diagnostics = Vec::new();
        let root = nodes
            .into_iter()
            .map(|node| self.build_node(node, &mut diagnostics))
            .collect::<Result<Vec<_>, _>>()
            .inspect_err(|e| {
                tracing::error!(
                    path = ?self.source_path,
                    error = %e,
                    "Document build failed"
                );
            })?;

        tracing::debug!(
            path = ?self.source_path,
            diagnostics = diagnostics.len(),
            "Document built"
        );

        if self.fail_on_warnings && !diagnostics.is_empty() {
            return Err(BuildError::Warnings { diagnostics });
        }

        Ok(BuiltDocument {
            root: ContentNode::Fragment(root),
            diagnostics,
        })
    }

    fn build_node(
        &self,
        node: SourceNode,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<ContentNode, TagError> {
        match node {
            SourceNode::Text(text) => Ok(ContentNode::Text(text)),
            SourceNode::Rendered(node) => Ok(node),
            SourceNode::Tag(invocation) => {
                let children = invocation
                    .children
                    .into_iter()
                    .map(|child| self.build_node(child, diagnostics))
                    .collect::<Result<Vec<_>, _>>()?;

                let ctx = ResolveContext {
                    source_path: self.source_path,
                    line: invocation.line,
                };
                let resolution =
                    self.registry
                        .resolve(&invocation.name, &invocation.attributes, children, &ctx)?;
                diagnostics.extend(resolution.diagnostics);
                Ok(resolution.node)
            }
        }
    }
}
