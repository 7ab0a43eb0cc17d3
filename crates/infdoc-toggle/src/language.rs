//! The closed set of code sample languages.

use std::fmt;
use std::str::FromStr;

/// Attribute carrying a block's language marker in rendered output.
pub const LANGUAGE_MARKER_ATTR: &str = "data-language-code";

/// A source language a code sample can be shown in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Language {
    #[default]
    Java,
    Kotlin,
}

impl Language {
    /// Every supported language, in display order.
    pub const ALL: [Self; 2] = [Self::Java, Self::Kotlin];

    /// Code used in markup and page attributes.
    #[must_use]
    pub fn code(self) -> &'static str {
        match self {
            Self::Java => "java",
            Self::Kotlin => "kotlin",
        }
    }

    /// Human-readable label.
    #[must_use]
    pub fn label(self) -> &'static str {
        match self {
            Self::Java => "Java",
            Self::Kotlin => "Kotlin",
        }
    }

    /// All supported codes, e.g. for an attribute's allowed set.
    #[must_use]
    pub fn codes() -> [&'static str; 2] {
        Self::ALL.map(Self::code)
    }
}

impl fmt::Display for Language {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

/// A language code outside the supported set.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
#[error("unsupported language `{code}`, expected one of: {}", Language::codes().join(", "))]
pub struct UnsupportedLanguageError {
    pub code: String,
}

impl FromStr for Language {
    type Err = UnsupportedLanguageError;

    /// Parse a language code. Codes are case-sensitive.
    ///
    /// # Example
    ///
    /// ```
    /// use infdoc_toggle::Language;
    ///
    /// assert_eq!("kotlin".parse::<Language>().unwrap(), Language::Kotlin);
    /// assert!("scala".parse::<Language>().is_err());
    /// ```
    fn from_str(code: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|lang| lang.code() == code)
            .ok_or_else(|| UnsupportedLanguageError {
                code: code.to_owned(),
            })
    }
}
