//! Configuration management for infdoc.
//!
//! Parses `infdoc.toml` configuration files with serde and provides
//! auto-discovery of config files in parent directories.
//!
//! Host settings can be applied during load via [`Overrides`].
//!
//! ```toml
//! [languages]
//! default = "kotlin"
//!
//! [validation]
//! fail_on_warnings = true
//! ```

use std::path::{Path, PathBuf};

use infdoc_toggle::Language;
use serde::Deserialize;

/// Configuration filename to search for.
const CONFIG_FILENAME: &str = "infdoc.toml";

/// Settings that override configuration file values.
///
/// All fields are optional. Only non-None values override the loaded config.
#[derive(Debug, Default)]
pub struct Overrides {
    /// Override the default code language.
    pub default_language: Option<String>,
    /// Override the warnings-as-errors flag.
    pub fail_on_warnings: Option<bool>,
}

/// Application configuration.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Code language configuration (codes as strings from TOML).
    languages: LanguagesConfigRaw,
    /// Tag validation policy.
    pub validation: ValidationConfig,

    /// Resolved language configuration (set after loading).
    #[serde(skip)]
    pub languages_resolved: LanguagesConfig,
    /// Path to the config file (set after loading).
    #[serde(skip)]
    pub config_path: Option<PathBuf>,
}

/// Raw language configuration as parsed from TOML.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
struct LanguagesConfigRaw {
    default: Option<String>,
}

/// Resolved language configuration.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct LanguagesConfig {
    /// Language selected when the page has no persisted choice.
    pub default: Language,
}

/// Tag validation policy.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Fail the build when any recoverable diagnostic is emitted.
    pub fail_on_warnings: bool,
}

/// Configuration error.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// File not found.
    #[error("Configuration file not found: {}", .0.display())]
    NotFound(PathBuf),
    /// I/O error.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    /// TOML parsing error.
    #[error("TOML parse error: {0}")]
    Parse(#[from] toml::de::Error),
    /// Validation error.
    #[error("Configuration error: {0}")]
    Validation(String),
}

impl Config {
    /// Load configuration from file with optional overrides.
    ///
    /// If `config_path` is provided, loads from that file.
    /// Otherwise, searches for `infdoc.toml` in current directory and parents,
    /// falling back to defaults when none is found.
    ///
    /// Overrides are applied before validation, so an overridden language
    /// code is checked like one from the file.
    ///
    /// # Errors
    ///
    /// Returns error if explicit `config_path` doesn't exist, parsing fails,
    /// or a value is invalid.
    pub fn load(
        config_path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let discovered = match config_path {
            Some(path) => {
                if !path.exists() {
                    return Err(ConfigError::NotFound(path.to_path_buf()));
                }
                Some(path.to_path_buf())
            }
            None => std::env::current_dir()
                .ok()
                .and_then(|cwd| Self::discover_config(&cwd)),
        };

        Self::load_resolved(discovered.as_deref(), overrides)
    }

    /// Like [`load`](Self::load) without an explicit path, but searching
    /// upwards from `start` instead of the current directory.
    ///
    /// # Errors
    ///
    /// Returns error if parsing fails or a value is invalid.
    pub fn load_from_dir(start: &Path, overrides: Option<&Overrides>) -> Result<Self, ConfigError> {
        let discovered = Self::discover_config(start);
        Self::load_resolved(discovered.as_deref(), overrides)
    }

    fn load_resolved(
        path: Option<&Path>,
        overrides: Option<&Overrides>,
    ) -> Result<Self, ConfigError> {
        let mut config = match path {
            Some(path) => Self::load_from_file(path)?,
            None => Self::default(),
        };

        if let Some(overrides) = overrides {
            config.apply_overrides(overrides);
        }

        config.resolve()?;
        Ok(config)
    }

    /// Apply overrides to the raw configuration.
    fn apply_overrides(&mut self, overrides: &Overrides) {
        if let Some(language) = &overrides.default_language {
            self.languages.default = Some(language.clone());
        }
        if let Some(fail_on_warnings) = overrides.fail_on_warnings {
            self.validation.fail_on_warnings = fail_on_warnings;
        }
    }

    /// Search for config file in `start` and its parents.
    fn discover_config(start: &Path) -> Option<PathBuf> {
        let mut current = start.to_path_buf();
        loop {
            let candidate = current.join(CONFIG_FILENAME);
            if candidate.exists() {
                return Some(candidate);
            }
            if !current.pop() {
                return None;
            }
        }
    }

    /// Load configuration from a specific file.
    fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        let mut config: Self = toml::from_str(&content)?;
        config.config_path = Some(path.to_path_buf());
        Ok(config)
    }

    /// Validate raw values and fill the resolved sections.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Validation` if the default language is not
    /// supported.
    fn resolve(&mut self) -> Result<(), ConfigError> {
        let default = match self.languages.default.as_deref() {
            Some(code) => code.parse::<Language>().map_err(|e| {
                ConfigError::Validation(format!("languages.default: {e}"))
            })?,
            None => Language::default(),
        };
        self.languages_resolved = LanguagesConfig { default };
        Ok(())
    }

    /// Default code language for pages.
    #[must_use]
    pub fn default_language(&self) -> Language {
        self.languages_resolved.default
    }
}
