//! Configuration for Svelte template output

use std::path::Path;

use serde::Deserialize;
use thiserror::Error;

use crate::colors::DEFAULT_VAR_PREFIX;

/// Errors that can occur when loading a template configuration file
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file: {0}")]
    IoError(#[from] std::io::Error),
    #[error("Failed to parse config TOML: {0}")]
    ParseError(#[from] toml::de::Error),
    #[error("invalid var_prefix '{prefix}': must start with a letter, '_' or '$' and contain only letters, digits, '_' or '$'")]
    InvalidPrefix { prefix: String },
}

/// Syntax options for the generated component
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateConfig {
    /// Prefix for generated color variables (`color` gives `color0`, `color1`, ...)
    pub var_prefix: String,

    /// One level of indentation
    pub indent: String,

    /// Value for `<script lang="...">`, if any
    pub script_lang: Option<String>,
}

/// TOML structure for deserializing configs
#[derive(Deserialize)]
struct TomlConfig {
    template: Option<TomlTemplate>,
}

#[derive(Deserialize)]
#[serde(deny_unknown_fields)]
struct TomlTemplate {
    var_prefix: Option<String>,
    indent: Option<usize>,
    script_lang: Option<String>,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            var_prefix: DEFAULT_VAR_PREFIX.to_string(),
            indent: "  ".to_string(),
            script_lang: None,
        }
    }
}

impl TemplateConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from a TOML file
    pub fn from_file(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_str(&content)
    }

    /// Load configuration from a TOML string
    ///
    /// Keys missing from the `[template]` table keep their defaults.
    pub fn from_str(content: &str) -> Result<Self, ConfigError> {
        let parsed: TomlConfig = toml::from_str(content)?;
        let mut config = Self::default();

        if let Some(template) = parsed.template {
            if let Some(prefix) = template.var_prefix {
                config.var_prefix = prefix;
            }
            if let Some(width) = template.indent {
                config.indent = " ".repeat(width);
            }
            config.script_lang = template.script_lang;
        }

        config.validate()?;
        Ok(config)
    }

    /// Check that generated identifiers will be valid JavaScript
    ///
    /// The prefix is followed by digits, so it only needs to be a valid
    /// identifier on its own.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if is_js_identifier(&self.var_prefix) {
            Ok(())
        } else {
            Err(ConfigError::InvalidPrefix {
                prefix: self.var_prefix.clone(),
            })
        }
    }

    /// Set the variable prefix
    ///
    /// Not checked here; call `validate` when the prefix comes from user input.
    pub fn with_var_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.var_prefix = prefix.into();
        self
    }

    /// Set the indentation width in spaces
    pub fn with_indent(mut self, width: usize) -> Self {
        self.indent = " ".repeat(width);
        self
    }

    /// Set the script language attribute
    pub fn with_script_lang(mut self, lang: impl Into<String>) -> Self {
        self.script_lang = Some(lang.into());
        self
    }
}

/// ASCII subset of a JavaScript identifier
fn is_js_identifier(s: &str) -> bool {
    let mut chars = s.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' || c == '$' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '$')
}
