//! Construction input for a select control.

use crate::error::ConfigError;
use serde::Deserialize;
use std::path::Path;

/// Placeholder shown on the trigger until something is selected.
pub const DEFAULT_PLACEHOLDER: &str = "Options...";

/// Options and placeholder for one select control.
///
/// Build it from a bare list of labels or spell out both fields. A missing or
/// empty placeholder means [`DEFAULT_PLACEHOLDER`].
///
/// # Example
///
/// ```
/// use picklist_widgets::config::SelectConfig;
///
/// let bare = SelectConfig::from(vec!["A", "B", "C"]);
/// assert_eq!(bare.placeholder(), "Options...");
///
/// let full = SelectConfig::new(["Red", "Green"]).with_placeholder("Colour");
/// assert_eq!(full.placeholder(), "Colour");
///
/// let parsed = SelectConfig::from_toml_str(r#"
///     options = ["x", "y"]
///     placeholder = "Pick one"
/// "#).unwrap();
/// assert_eq!(parsed.options(), ["x", "y"]);
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct SelectConfig {
    options: Vec<String>,
    #[serde(default)]
    placeholder: Option<String>,
}

impl SelectConfig {
    /// Create a configuration with the default placeholder.
    pub fn new(options: impl IntoIterator<Item = impl Into<String>>) -> Self {
        Self {
            options: options.into_iter().map(Into::into).collect(),
            placeholder: None,
        }
    }

    /// Set the placeholder text.
    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = Some(placeholder.into());
        self
    }

    /// Parse a TOML document with an `options` array and an optional
    /// `placeholder` string.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        Ok(toml::from_str(source)?)
    }

    /// Read and parse a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let source = std::fs::read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    /// The option labels, in order.
    pub fn options(&self) -> &[String] {
        &self.options
    }

    /// The effective placeholder.
    pub fn placeholder(&self) -> &str {
        match self.placeholder.as_deref() {
            Some(p) if !p.is_empty() => p,
            _ => DEFAULT_PLACEHOLDER,
        }
    }

    pub(crate) fn into_parts(self) -> (Vec<String>, String) {
        let placeholder = self.placeholder().to_string();
        (self.options, placeholder)
    }
}

impl From<Vec<String>> for SelectConfig {
    fn from(options: Vec<String>) -> Self {
        Self::new(options)
    }
}

impl From<Vec<&str>> for SelectConfig {
    fn from(options: Vec<&str>) -> Self {
        Self::new(options)
    }
}

impl From<&[&str]> for SelectConfig {
    fn from(options: &[&str]) -> Self {
        Self::new(options.iter().copied())
    }
}

impl<const N: usize> From<[&str; N]> for SelectConfig {
    fn from(options: [&str; N]) -> Self {
        Self::new(options)
    }
}
