//! Page-wide code language selection.
//!
//! Documentation pages show some code samples in several languages. Each
//! variant is rendered as a separate block carrying a language marker, and
//! exactly one variant per sample is visible at a time. The selection is
//! page-wide: choosing Kotlin in one sample switches every sample on the page.
//!
//! # Architecture
//!
//! - [`Language`] is the closed set of supported languages.
//! - [`LanguageToggle`] is an explicit selection context. Blocks subscribe
//!   with their marker and are updated on every selection change; hosts
//!   observe updates through [`LanguageToggle::on_change`].
//!
//! The host page reads its persisted selection once and passes it to
//! [`LanguageToggle::initialize`]; nothing else reads page state.

mod language;
mod toggle;

pub use language::{LANGUAGE_MARKER_ATTR, Language, UnsupportedLanguageError};
pub use toggle::{BlockId, LanguageToggle, VisibilityChange};
