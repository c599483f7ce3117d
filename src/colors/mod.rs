//! Color extraction and variable mapping
//!
//! Colors are discovered in a fixed order (paths, then rects, then circles)
//! and each distinct fill string becomes one numbered variable.

mod extract;
mod table;

pub use extract::{document_colors, extract_colors, merge_distinct_colors};
pub use table::{ColorEntry, ColorTable, DEFAULT_VAR_PREFIX};
