//! Selection context and visibility propagation.
//!
//! A [`LanguageToggle`] owns the page's selected language. Code blocks
//! subscribe with their language marker; every selection change re-applies
//! visibility to all subscribed blocks and notifies listeners of the blocks
//! whose state actually flipped.

use std::collections::BTreeMap;
use std::fmt;

use crate::language::{Language, UnsupportedLanguageError};

/// Handle for a subscribed block.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct BlockId(usize);

impl BlockId {
    /// Position of the block in subscription order.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Emitted when a block becomes visible or hidden.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct VisibilityChange {
    pub block: BlockId,
    pub marker: Language,
    pub visible: bool,
}

type Listener = Box<dyn FnMut(VisibilityChange)>;

#[derive(Debug)]
struct Block {
    marker: Language,
    /// `None` until the first visibility pass reaches this block.
    visible: Option<bool>,
}

/// Page-wide language selection.
///
/// One toggle exists per page; independent pages (and tests) each create
/// their own. Single-threaded by construction: listeners are `FnMut` and
/// the toggle is mutated only through `&mut self`.
///
/// # Example
///
/// ```
/// use infdoc_toggle::{Language, LanguageToggle};
///
/// let mut toggle = LanguageToggle::new();
/// let java = toggle.subscribe(Language::Java);
/// let kotlin = toggle.subscribe(Language::Kotlin);
///
/// toggle.initialize(None);
/// assert_eq!(toggle.is_visible(java), Some(true));
/// assert_eq!(toggle.is_visible(kotlin), Some(false));
///
/// toggle.select("kotlin").unwrap();
/// assert_eq!(toggle.is_visible(java), Some(false));
/// assert_eq!(toggle.is_visible(kotlin), Some(true));
/// ```
pub struct LanguageToggle {
    default: Language,
    selected: Language,
    initialized: bool,
    blocks: BTreeMap<BlockId, Block>,
    next_id: usize,
    listeners: Vec<Listener>,
}

impl LanguageToggle {
    /// Create a toggle whose default selection is [`Language::default`].
    #[must_use]
    pub fn new() -> Self {
        Self::with_default(Language::default())
    }

    /// Create a toggle with a site-specific default selection.
    #[must_use]
    pub fn with_default(default: Language) -> Self {
        Self {
            default,
            selected: default,
            initialized: false,
            blocks: BTreeMap::new(),
            next_id: 0,
            listeners: Vec::new(),
        }
    }

    /// Register a listener for visibility changes.
    pub fn on_change(&mut self, listener: impl FnMut(VisibilityChange) + 'static) {
        self.listeners.push(Box::new(listener));
    }

    /// Subscribe a block carrying `marker`.
    ///
    /// Blocks subscribed after [`initialize`](Self::initialize) receive
    /// their visibility immediately.
    pub fn subscribe(&mut self, marker: Language) -> BlockId {
        let id = BlockId(self.next_id);
        self.next_id += 1;
        self.blocks.insert(
            id,
            Block {
                marker,
                visible: None,
            },
        );

        if self.initialized {
            self.apply_to(id);
        }
        id
    }

    /// Remove a block. Returns `false` if it was not subscribed.
    pub fn unsubscribe(&mut self, id: BlockId) -> bool {
        self.blocks.remove(&id).is_some()
    }

    /// Set the initial selection and run the first visibility pass.
    ///
    /// `persisted` is the page-level stored selection, if any. An
    /// unsupported value is logged and replaced by the default.
    pub fn initialize(&mut self, persisted: Option<&str>) -> Language {
        self.selected = match persisted.map(str::parse::<Language>) {
            Some(Ok(lang)) => lang,
            Some(Err(e)) => {
                tracing::warn!(error = %e, default = %self.default, "Ignoring persisted language");
                self.default
            }
            None => self.default,
        };
        self.initialized = true;

        tracing::debug!(
            selected = %self.selected,
            blocks = self.blocks.len(),
            "Language toggle initialized"
        );
        self.apply_visibility();
        self.selected
    }

    /// Select a language by code and update every block on the page.
    ///
    /// # Errors
    ///
    /// Returns [`UnsupportedLanguageError`] for codes outside the supported
    /// set. The selection is left unchanged.
    pub fn select(&mut self, code: &str) -> Result<Language, UnsupportedLanguageError> {
        let lang = code.parse::<Language>()?;
        self.select_language(lang);
        Ok(lang)
    }

    /// Select a language and update every block on the page.
    pub fn select_language(&mut self, lang: Language) {
        self.selected = lang;
        self.initialized = true;
        tracing::debug!(selected = %lang, "Language selected");
        self.apply_visibility();
    }

    /// Make exactly the blocks marked with the selected language visible.
    ///
    /// Computes every block's state from the selection alone, so repeated
    /// calls are harmless. Returns the number of blocks whose visibility
    /// changed.
    pub fn apply_visibility(&mut self) -> usize {
        let ids: Vec<BlockId> = self.blocks.keys().copied().collect();
        ids.into_iter().filter(|&id| self.apply_to(id)).count()
    }

    /// Apply the selection to one block. Returns `true` if it flipped.
    fn apply_to(&mut self, id: BlockId) -> bool {
        let Some(block) = self.blocks.get_mut(&id) else {
            return false;
        };

        let visible = block.marker == self.selected;
        if block.visible == Some(visible) {
            return false;
        }
        block.visible = Some(visible);

        let change = VisibilityChange {
            block: id,
            marker: block.marker,
            visible,
        };
        for listener in &mut self.listeners {
            listener(change);
        }
        true
    }

    /// Currently selected language.
    #[must_use]
    pub fn selected(&self) -> Language {
        self.selected
    }

    /// Value a host writes back to its page-level selection attribute.
    #[must_use]
    pub fn persisted_value(&self) -> &'static str {
        self.selected.code()
    }

    /// Visibility of a block; `None` if unknown or not yet initialized.
    #[must_use]
    pub fn is_visible(&self, id: BlockId) -> Option<bool> {
        self.blocks.get(&id).and_then(|b| b.visible)
    }

    /// Marker of a subscribed block.
    #[must_use]
    pub fn marker(&self, id: BlockId) -> Option<Language> {
        self.blocks.get(&id).map(|b| b.marker)
    }

    /// Blocks currently visible, in subscription order.
    #[must_use]
    pub fn visible_blocks(&self) -> Vec<BlockId> {
        self.blocks
            .iter()
            .filter(|(_, b)| b.visible == Some(true))
            .map(|(&id, _)| id)
            .collect()
    }

    #[must_use]
    pub fn block_count(&self) -> usize {
        self.blocks.len()
    }
}

impl Default for LanguageToggle {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Debug for LanguageToggle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LanguageToggle")
            .field("default", &self.default)
            .field("selected", &self.selected)
            .field("initialized", &self.initialized)
            .field("blocks", &self.blocks)
            .field("listeners", &self.listeners.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use std::cell::RefCell;
    use std::rc::Rc;

    use pretty_assertions::assert_eq;

    use super::*;

    fn page() -> (LanguageToggle, BlockId, BlockId) {
        let mut toggle = LanguageToggle::new();
        let java = toggle.subscribe(Language::Java);
        let kotlin = toggle.subscribe(Language::Kotlin);
        (toggle, java, kotlin)
    }

    #[test]
    fn test_uninitialized_visibility_is_unknown() {
        let (toggle, java, _) = page();
        assert_eq!(toggle.is_visible(java), None);
    }

    #[test]
    fn test_initialize_without_persisted_selects_default() {
        let (mut toggle, java, kotlin) = page();
        assert_eq!(toggle.initialize(None), Language::Java);
        assert_eq!(toggle.is_visible(java), Some(true));
        assert_eq!(toggle.is_visible(kotlin), Some(false));
    }

    #[test]
    fn test_initialize_with_persisted() {
        let (mut toggle, java, kotlin) = page();
        assert_eq!(toggle.initialize(Some("kotlin")), Language::Kotlin);
        assert_eq!(toggle.visible_blocks(), vec![kotlin]);
        assert_eq!(toggle.is_visible(java), Some(false));
    }

    #[test]
    fn test_initialize_with_invalid_persisted_falls_back() {
        let (mut toggle, java, _) = page();
        assert_eq!(toggle.initialize(Some("cobol")), Language::Java);
        assert_eq!(toggle.visible_blocks(), vec![java]);
    }

    #[test]
    fn test_custom_default() {
        let mut toggle = LanguageToggle::with_default(Language::Kotlin);
        let kotlin = toggle.subscribe(Language::Kotlin);
        toggle.initialize(None);
        assert_eq!(toggle.visible_blocks(), vec![kotlin]);
    }

    #[test]
    fn test_select_updates_every_block() {
        let mut toggle = LanguageToggle::new();
        let blocks: Vec<BlockId> = [Language::Java, Language::Kotlin, Language::Java]
            .into_iter()
            .map(|lang| toggle.subscribe(lang))
            .collect();
        toggle.initialize(None);
        assert_eq!(toggle.visible_blocks(), vec![blocks[0], blocks[2]]);

        toggle.select("kotlin").unwrap();
        assert_eq!(toggle.visible_blocks(), vec![blocks[1]]);
        assert_eq!(toggle.persisted_value(), "kotlin");
    }

    #[test]
    fn test_select_unsupported_changes_nothing() {
        let (mut toggle, java, _) = page();
        toggle.initialize(None);

        let err = toggle.select("scala").unwrap_err();
        assert_eq!(err.code, "scala");
        assert_eq!(toggle.selected(), Language::Java);
        assert_eq!(toggle.visible_blocks(), vec![java]);
    }

    #[test]
    fn test_apply_visibility_is_idempotent() {
        let (mut toggle, _, _) = page();
        toggle.initialize(None);
        let before = toggle.visible_blocks();

        assert_eq!(toggle.apply_visibility(), 0);
        assert_eq!(toggle.apply_visibility(), 0);
        assert_eq!(toggle.visible_blocks(), before);
    }

    #[test]
    fn test_selection_round_trip() {
        let (mut fresh, _, _) = page();
        fresh.initialize(None);

        let (mut toggled, _, _) = page();
        toggled.initialize(None);
        toggled.select("kotlin").unwrap();
        toggled.select("java").unwrap();

        assert_eq!(toggled.visible_blocks(), fresh.visible_blocks());
    }

    #[test]
    fn test_listeners_receive_only_flips() {
        let (mut toggle, java, kotlin) = page();
        let events = Rc::new(RefCell::new(Vec::new()));
        let sink = Rc::clone(&events);
        toggle.on_change(move |change| sink.borrow_mut().push(change));

        toggle.initialize(None);
        assert_eq!(events.borrow().len(), 2);

        events.borrow_mut().clear();
        toggle.select_language(Language::Java);
        assert!(events.borrow().is_empty());

        toggle.select_language(Language::Kotlin);
        assert_eq!(
            *events.borrow(),
            vec![
                VisibilityChange {
                    block: java,
                    marker: Language::Java,
                    visible: false,
                },
                VisibilityChange {
                    block: kotlin,
                    marker: Language::Kotlin,
                    visible: true,
                },
            ]
        );
    }

    #[test]
    fn test_late_subscriber_gets_current_state() {
        let mut toggle = LanguageToggle::new();
        toggle.initialize(Some("kotlin"));

        let late = toggle.subscribe(Language::Kotlin);
        assert_eq!(toggle.is_visible(late), Some(true));
    }

    #[test]
    fn test_unsubscribe() {
        let (mut toggle, java, _) = page();
        assert!(toggle.unsubscribe(java));
        assert!(!toggle.unsubscribe(java));
        assert_eq!(toggle.block_count(), 1);
        assert_eq!(toggle.marker(java), None);
    }

    #[test]
    fn test_independent_toggles_do_not_share_state() {
        let (mut first, _, _) = page();
        let (mut second, _, _) = page();
        first.initialize(None);
        second.initialize(None);

        first.select("kotlin").unwrap();
        assert_eq!(first.selected(), Language::Kotlin);
        assert_eq!(second.selected(), Language::Java);
    }
}
