//! Language-aware pages.
//!
//! A [`Page`] owns a built document and the [`LanguageToggle`] for it.
//! Every element carrying the language marker is subscribed to the toggle
//! when the page is mounted; rendering reflects the current visibility of
//! each block through the `hidden` attribute.

use infdoc_tags::ContentNode;
use infdoc_toggle::{
    BlockId, LANGUAGE_MARKER_ATTR, Language, LanguageToggle, UnsupportedLanguageError,
    VisibilityChange,
};

use crate::document::BuiltDocument;

/// Attribute toggled on blocks whose language is not selected.
const HIDDEN_ATTR: &str = "hidden";

/// A rendered document bound to a page-wide language selection.
#[derive(Debug)]
pub struct Page {
    root: ContentNode,
    toggle: LanguageToggle,
    /// One slot per marked element in document order. `None` for markers
    /// that name an unsupported language.
    slots: Vec<Option<BlockId>>,
}

impl Page {
    /// Mount `root`, subscribing each language block to a fresh toggle.
    ///
    /// Blocks whose marker is not a supported language are logged and
    /// left untouched by every later visibility pass.
    #[must_use]
    pub fn mount(root: ContentNode, default: Language) -> Self {
        let mut toggle = LanguageToggle::with_default(default);
        let mut slots = Vec::new();

        root.visit_elements(&mut |el| {
            let Some(code) = el.attr(LANGUAGE_MARKER_ATTR) else {
                return;
            };
            match code.parse::<Language>() {
                Ok(lang) => slots.push(Some(toggle.subscribe(lang))),
                Err(e) => {
                    tracing::warn!(tag = %el.tag, error = %e, "Skipping language block");
                    slots.push(None);
                }
            }
        });

        tracing::debug!(blocks = toggle.block_count(), "Page mounted");
        Self {
            root,
            toggle,
            slots,
        }
    }

    /// Mount a built document.
    #[must_use]
    pub fn from_document(document: BuiltDocument, default: Language) -> Self {
        Self::mount(document.root, default)
    }

    /// Run the initial visibility pass from the persisted selection.
    pub fn initialize(&mut self, persisted: Option<&str>) -> Language {
        self.toggle.initialize(persisted)
    }

    /// Select a language by code.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedLanguageError`] for unknown codes; the page is
    /// left unchanged.
    pub fn select(&mut self, code: &str) -> Result<Language, UnsupportedLanguageError> {
        self.toggle.select(code)
    }

    pub fn select_language(&mut self, lang: Language) {
        self.toggle.select_language(lang);
    }

    /// Register a listener for block visibility changes.
    pub fn on_change(&mut self, listener: impl FnMut(VisibilityChange) + 'static) {
        self.toggle.on_change(listener);
    }

    #[must_use]
    pub fn selected(&self) -> Language {
        self.toggle.selected()
    }

    #[must_use]
    pub fn toggle(&self) -> &LanguageToggle {
        &self.toggle
    }

    /// Subscribed blocks in document order.
    #[must_use]
    pub fn blocks(&self) -> Vec<BlockId> {
        self.slots.iter().flatten().copied().collect()
    }

    #[must_use]
    pub fn root(&self) -> &ContentNode {
        &self.root
    }

    /// Serialize the page with the current visibility applied.
    ///
    /// Hidden blocks get `hidden=""`; visible ones lose any `hidden`
    /// attribute. Before initialization, blocks render as authored.
    #[must_use]
    pub fn render_html(&self) -> String {
        let mut root = self.root.clone();
        let mut slots = self.slots.iter();

        root.visit_elements_mut(&mut |el| {
            if el.attr(LANGUAGE_MARKER_ATTR).is_none() {
                return;
            }
            let Some(Some(id)) = slots.next() else {
                return;
            };
            match self.toggle.is_visible(*id) {
                Some(true) => {
                    el.remove_attr(HIDDEN_ATTR);
                }
                Some(false) => el.set_attr(HIDDEN_ATTR, ""),
                None => {}
            }
        });

        root.to_html()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use infdoc_tags::Element;
    use pretty_assertions::assert_eq;

    use super::*;

    fn block(code: &str, text: &str) -> ContentNode {
        Element::new("span")
            .with_attr(LANGUAGE_MARKER_ATTR, code)
            .with_child(ContentNode::text(text))
            .into()
    }

    fn sample() -> ContentNode {
        ContentNode::Fragment(vec![
            block("java", "J"),
            ContentNode::text(" "),
            block("kotlin", "K"),
        ])
    }

    #[test]
    fn test_mount_subscribes_marked_elements() {
        let page = Page::mount(sample(), Language::Java);
        assert_eq!(page.blocks().len(), 2);
        assert_eq!(page.toggle().marker(page.blocks()[1]), Some(Language::Kotlin));
    }

    #[test]
    fn test_render_before_initialize_is_unchanged() {
        let page = Page::mount(sample(), Language::Java);
        assert_eq!(page.render_html(), sample().to_html());
    }

    #[test]
    fn test_initialize_hides_other_language() {
        let mut page = Page::mount(sample(), Language::Java);
        page.initialize(None);
        assert_eq!(
            page.render_html(),
            r#"<span data-language-code="java">J</span> <span data-language-code="kotlin" hidden="">K</span>"#
        );
    }

    #[test]
    fn test_select_switches_visibility() {
        let mut page = Page::mount(sample(), Language::Java);
        page.initialize(Some("java"));
        page.select("kotlin").unwrap();
        assert_eq!(
            page.render_html(),
            r#"<span data-language-code="java" hidden="">J</span> <span data-language-code="kotlin">K</span>"#
        );
    }

    #[test]
    fn test_authored_hidden_is_cleared_when_visible() {
        let root: ContentNode = Element::new("span")
            .with_attr(LANGUAGE_MARKER_ATTR, "kotlin")
            .with_attr(HIDDEN_ATTR, "")
            .into();
        let mut page = Page::mount(root, Language::Kotlin);
        page.initialize(None);
        assert_eq!(page.render_html(), r#"<span data-language-code="kotlin"></span>"#);
    }

    #[test]
    fn test_unsupported_marker_is_skipped() {
        let root = ContentNode::Fragment(vec![block("scala", "S"), block("kotlin", "K")]);
        let mut page = Page::mount(root, Language::Java);
        page.initialize(None);

        assert_eq!(page.blocks().len(), 1);
        assert_eq!(
            page.render_html(),
            r#"<span data-language-code="scala">S</span><span data-language-code="kotlin" hidden="">K</span>"#
        );
    }

    #[test]
    fn test_invalid_select_leaves_page_unchanged() {
        let mut page = Page::mount(sample(), Language::Java);
        page.initialize(None);
        let before = page.render_html();

        assert!(page.select("scala").is_err());
        assert_eq!(page.selected(), Language::Java);
        assert_eq!(page.render_html(), before);
    }

    #[test]
    fn test_on_change_forwards_toggle_events() {
        let events = Rc::new(RefCell::new(Vec::new()));
        let mut page = Page::mount(sample(), Language::Java);
        let sink = Rc::clone(&events);
        page.on_change(move |change| sink.borrow_mut().push((change.marker, change.visible)));

        page.initialize(None);
        page.select_language(Language::Kotlin);

        assert_eq!(
            *events.borrow(),
            vec![
                (Language::Java, true),
                (Language::Kotlin, false),
                (Language::Java, false),
                (Language::Kotlin, true),
            ]
        );
    }
}
