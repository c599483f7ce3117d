//! svg2svelte - Turn SVG icons into Svelte components with overridable colors
//!
//! Every distinct fill in the source becomes an exported component variable
//! (`export let color0 = "#ff0000";`) and each shape references its variable
//! (`fill="{color0}"`).
//!
//! # Example
//!
//! ```rust
//! use svg2svelte::convert;
//!
//! let svelte = convert(r##"<svg viewBox="0 0 2 2"><path d="M0 0h2" fill="#f00"/></svg>"##).unwrap();
//! assert!(svelte.contains(r##"export let color0 = "#f00";"##));
//! assert!(svelte.contains(r#"fill="{color0}""#));
//! ```

pub mod colors;
pub mod error;
pub mod model;
pub mod parser;
pub mod template;

pub use colors::{document_colors, extract_colors, merge_distinct_colors, ColorEntry, ColorTable};
pub use error::ParseError;
pub use model::{Circle, Document, Group, Path, Rect, Shape};
pub use parser::parse;
pub use template::{render, ConfigError, LintCategory, LintWarning, TemplateConfig};

use thiserror::Error;

/// Errors that can occur during conversion
#[derive(Debug, Error)]
pub enum ConvertError {
    /// Error while parsing the SVG source
    #[error("{0}")]
    Parse(#[from] ParseError),
}

/// Configuration for the complete conversion pipeline
#[derive(Debug, Clone, Default)]
pub struct ConvertConfig {
    /// Template output configuration
    pub template: TemplateConfig,
    /// Lint mode: collect warnings about questionable fills
    pub lint: bool,
}

impl ConvertConfig {
    /// Create a new configuration with defaults
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the template configuration
    pub fn with_template(mut self, config: TemplateConfig) -> Self {
        self.template = config;
        self
    }

    /// Enable or disable lint mode
    pub fn with_lint(mut self, lint: bool) -> Self {
        self.lint = lint;
        self
    }
}

/// Build the color table for a document
///
/// Colors are numbered in discovery order: path fills, then rect fills, then
/// circle fills, skipping any already seen.
pub fn build_color_table(document: &Document, config: &TemplateConfig) -> ColorTable {
    let colors = document_colors(document);
    tracing::debug!(?colors, "extracted colors");
    ColorTable::build_with_prefix(&colors, &config.var_prefix)
}

/// Convert SVG source to a Svelte component with default configuration
pub fn convert(source: &str) -> Result<String, ConvertError> {
    convert_with_config(source, ConvertConfig::default())
}

/// Convert SVG source to a Svelte component with custom configuration
///
/// # Example
///
/// ```rust
/// use svg2svelte::{convert_with_config, ConvertConfig, TemplateConfig};
///
/// let config = ConvertConfig::new()
///     .with_template(TemplateConfig::new().with_var_prefix("tint"));
///
/// let svelte = convert_with_config(r#"<svg><circle r="1" fill="red"/></svg>"#, config).unwrap();
/// assert!(svelte.contains(r#"export let tint0 = "red";"#));
/// ```
pub fn convert_with_config(source: &str, config: ConvertConfig) -> Result<String, ConvertError> {
    let (svelte, _) = convert_with_lint(source, config)?;
    Ok(svelte)
}

/// Convert SVG source and return lint warnings alongside the component
///
/// Warnings are only computed when `config.lint` is set.
pub fn convert_with_lint(
    source: &str,
    config: ConvertConfig,
) -> Result<(String, Vec<LintWarning>), ConvertError> {
    let document = parse(source)?;
    let table = build_color_table(&document, &config.template);

    let warnings = if config.lint {
        template::lint::check(&document, &table)
    } else {
        vec![]
    };

    let svelte = render(&document, &table, &config.template);
    Ok((svelte, warnings))
}
