//! Rendered content nodes.
//!
//! Renderers produce a small element tree that the host page serializes to
//! HTML. Attributes keep insertion order so output is deterministic.

/// Elements serialized without a closing tag.
const VOID_ELEMENTS: &[&str] = &["br", "hr", "img", "input", "link", "meta"];

/// A node produced by a tag renderer.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ContentNode {
    /// An element with attributes and children.
    Element(Element),
    /// Text content, escaped on output.
    Text(String),
    /// A sequence of sibling nodes without a wrapping element.
    Fragment(Vec<ContentNode>),
}

impl ContentNode {
    /// Create a text node.
    #[must_use]
    pub fn text(s: impl Into<String>) -> Self {
        Self::Text(s.into())
    }

    /// Borrow the element, if this node is one.
    #[must_use]
    pub fn as_element(&self) -> Option<&Element> {
        match self {
            Self::Element(el) => Some(el),
            _ => None,
        }
    }

    /// Visit every element in document order (pre-order).
    pub fn visit_elements<F: FnMut(&Element)>(&self, f: &mut F) {
        match self {
            Self::Element(el) => {
                f(el);
                for child in &el.children {
                    child.visit_elements(f);
                }
            }
            Self::Fragment(nodes) => {
                for node in nodes {
                    node.visit_elements(f);
                }
            }
            Self::Text(_) => {}
        }
    }

    /// Mutable counterpart of [`visit_elements`](Self::visit_elements).
    ///
    /// Visits in the same order, so indices collected by one pass line up
    /// with the other.
    pub fn visit_elements_mut<F: FnMut(&mut Element)>(&mut self, f: &mut F) {
        match self {
            Self::Element(el) => {
                f(el);
                for child in &mut el.children {
                    child.visit_elements_mut(f);
                }
            }
            Self::Fragment(nodes) => {
                for node in nodes {
                    node.visit_elements_mut(f);
                }
            }
            Self::Text(_) => {}
        }
    }

    /// Serialize the node tree to HTML.
    ///
    /// # Example
    ///
    /// ```
    /// use infdoc_tags::{ContentNode, Element};
    ///
    /// let node: ContentNode = Element::new("p")
    ///     .with_attr("class", "lead")
    ///     .with_child(ContentNode::text("a < b"))
    ///     .into();
    ///
    /// assert_eq!(node.to_html(), r#"<p class="lead">a &lt; b</p>"#);
    /// ```
    #[must_use]
    pub fn to_html(&self) -> String {
        let mut out = String::new();
        self.write_html(&mut out);
        out
    }

    /// Append the HTML serialization to `out`.
    pub fn write_html(&self, out: &mut String) {
        match self {
            Self::Text(text) => out.push_str(&escape_html(text)),
            Self::Fragment(nodes) => {
                for node in nodes {
                    node.write_html(out);
                }
            }
            Self::Element(el) => el.write_html(out),
        }
    }
}

impl From<Element> for ContentNode {
    fn from(el: Element) -> Self {
        Self::Element(el)
    }
}

/// An element node.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Element {
    /// Element name, e.g. `div`.
    pub tag: String,
    /// Attributes in output order.
    pub attrs: Vec<(String, String)>,
    /// Child nodes.
    pub children: Vec<ContentNode>,
}

impl Element {
    #[must_use]
    pub fn new(tag: impl Into<String>) -> Self {
        Self {
            tag: tag.into(),
            ..Default::default()
        }
    }

    /// Add an attribute, replacing any existing value.
    #[must_use]
    pub fn with_attr(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set_attr(name, value);
        self
    }

    /// Add an attribute only when `value` is present.
    #[must_use]
    pub fn with_optional_attr(self, name: impl Into<String>, value: Option<&str>) -> Self {
        match value {
            Some(v) => self.with_attr(name, v),
            None => self,
        }
    }

    #[must_use]
    pub fn with_child(mut self, child: impl Into<ContentNode>) -> Self {
        self.children.push(child.into());
        self
    }

    #[must_use]
    pub fn with_children(mut self, children: impl IntoIterator<Item = ContentNode>) -> Self {
        self.children.extend(children);
        self
    }

    /// Get an attribute value.
    #[must_use]
    pub fn attr(&self, name: &str) -> Option<&str> {
        self.attrs
            .iter()
            .find(|(k, _)| k == name)
            .map(|(_, v)| v.as_str())
    }

    /// Set an attribute, replacing any existing value in place.
    pub fn set_attr(&mut self, name: impl Into<String>, value: impl Into<String>) {
        let name = name.into();
        let value = value.into();
        if let Some(slot) = self.attrs.iter_mut().find(|(k, _)| *k == name) {
            slot.1 = value;
        } else {
            self.attrs.push((name, value));
        }
    }

    /// Remove an attribute. Returns `true` if it was present.
    pub fn remove_attr(&mut self, name: &str) -> bool {
        let before = self.attrs.len();
        self.attrs.retain(|(k, _)| k != name);
        self.attrs.len() != before
    }

    fn write_html(&self, out: &mut String) {
        out.push('<');
        out.push_str(&self.tag);
        for (name, value) in &self.attrs {
            out.push(' ');
            out.push_str(name);
            out.push_str("=\"");
            out.push_str(&escape_html(value));
            out.push('"');
        }
        out.push('>');

        if VOID_ELEMENTS.contains(&self.tag.as_str()) {
            return;
        }

        for child in &self.children {
            child.write_html(out);
        }
        out.push_str("</");
        out.push_str(&self.tag);
        out.push('>');
    }
}

/// Escape special HTML characters.
#[must_use]
pub fn escape_html(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}
