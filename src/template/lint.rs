//! Lint checks for fills that convert poorly.
//!
//! Runs after the color table is built. None of these stop a conversion;
//! they point at output that is probably not what the author wanted.

use std::fmt;

use crate::colors::ColorTable;
use crate::model::{Document, Filled, Shape};

/// A lint warning about a converted shape
#[derive(Debug)]
pub struct LintWarning {
    pub category: LintCategory,
    pub message: String,
}

/// Category of lint finding
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintCategory {
    /// Fill has no variable and renders as an empty reference
    Unmapped,
    /// Shape had no `fill` attribute, so its variable defaults to `""`
    EmptyFill,
}

impl fmt::Display for LintCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LintCategory::Unmapped => write!(f, "unmapped"),
            LintCategory::EmptyFill => write!(f, "empty-fill"),
        }
    }
}

/// Run all lint checks on a document and its color table.
pub fn check(document: &Document, table: &ColorTable) -> Vec<LintWarning> {
    let mut warnings = Vec::new();
    check_unmapped(document, table, &mut warnings);
    check_empty_fills(document, table, &mut warnings);
    warnings
}

/// Display name for a shape: its kind and position within its group.
fn shape_display_name(shape: &Shape, group_index: usize, shape_index: usize) -> String {
    format!(
        "<{} #{} in group #{}>",
        shape.kind(),
        shape_index + 1,
        group_index + 1
    )
}

fn check_unmapped(document: &Document, table: &ColorTable, warnings: &mut Vec<LintWarning>) {
    for (gi, group) in document.groups.iter().enumerate() {
        for (si, shape) in group.shapes.iter().enumerate() {
            if !table.contains(shape.fill()) {
                warnings.push(LintWarning {
                    category: LintCategory::Unmapped,
                    message: format!(
                        "{} has fill \"{}\" with no color variable; it renders with an empty fill",
                        shape_display_name(shape, gi, si),
                        shape.fill()
                    ),
                });
            }
        }
    }
}

// One warning per variable, naming the first shape that introduced it.
fn check_empty_fills(document: &Document, table: &ColorTable, warnings: &mut Vec<LintWarning>) {
    let Some(entry) = table.get("") else {
        return;
    };

    let first = document.groups.iter().enumerate().find_map(|(gi, group)| {
        group
            .shapes
            .iter()
            .enumerate()
            .find(|(_, s)| s.fill().is_empty())
            .map(|(si, s)| shape_display_name(s, gi, si))
    });
    let count = document.shapes().filter(|s| s.fill().is_empty()).count();

    if let Some(first) = first {
        warnings.push(LintWarning {
            category: LintCategory::EmptyFill,
            message: format!(
                "{} shape(s) without a fill share variable '{}' (first: {}); its default is an empty string",
                count, entry.var_name, first
            ),
        });
    }
}
