//! Mapping from literal colors to template variables

/// Identifier prefix used when none is configured
pub const DEFAULT_VAR_PREFIX: &str = "color";

/// One color bound to a template variable
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColorEntry {
    /// Literal fill value, matched by exact string equality
    pub hex: String,
    /// Identifier declared in the script block, e.g. `color0`
    pub var_name: String,
    /// Markup form of the identifier, e.g. `{color0}`
    pub ref_token: String,
}

/// Immutable color table for one conversion
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColorTable {
    entries: Vec<ColorEntry>,
}

impl ColorTable {
    /// Build a table with the default `color` prefix
    ///
    /// Entry `i` is named `color{i}`. Repeated colors after the first are
    /// skipped, so every `hex` in the table is unique.
    pub fn build(colors: &[String]) -> Self {
        Self::build_with_prefix(colors, DEFAULT_VAR_PREFIX)
    }

    /// Build a table whose identifiers start with `prefix`
    pub fn build_with_prefix(colors: &[String], prefix: &str) -> Self {
        let mut entries: Vec<ColorEntry> = Vec::with_capacity(colors.len());
        for hex in colors {
            if entries.iter().any(|e| &e.hex == hex) {
                continue;
            }
            let var_name = format!("{}{}", prefix, entries.len());
            let ref_token = format!("{{{}}}", var_name);
            entries.push(ColorEntry {
                hex: hex.clone(),
                var_name,
                ref_token,
            });
        }
        Self { entries }
    }

    /// Entries in index order
    pub fn entries(&self) -> &[ColorEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn get(&self, hex: &str) -> Option<&ColorEntry> {
        self.entries.iter().find(|e| e.hex == hex)
    }

    pub fn contains(&self, hex: &str) -> bool {
        self.get(hex).is_some()
    }

    /// Markup reference for `hex`, or `""` when the color is unknown
    pub fn ref_token(&self, hex: &str) -> &str {
        self.get(hex).map(|e| e.ref_token.as_str()).unwrap_or("")
    }

    /// Variable name for `hex`, or `""` when the color is unknown
    pub fn var_name(&self, hex: &str) -> &str {
        self.get(hex).map(|e| e.var_name.as_str()).unwrap_or("")
    }
}
