//! Ordered, deduplicated fill extraction

use crate::model::{Document, Filled};

/// Collect the distinct fills of `shapes`, keeping first-seen order
///
/// An empty fill is a color like any other.
pub fn extract_colors<'a, S>(shapes: impl IntoIterator<Item = &'a S>) -> Vec<String>
where
    S: Filled + 'a,
{
    let mut colors: Vec<String> = Vec::new();
    for shape in shapes {
        push_distinct(&mut colors, shape.fill());
    }
    colors
}

/// Merge per-kind color lists into the global discovery order
///
/// Path colors come first as given, followed by any rect colors not seen yet,
/// then any circle colors not seen yet.
pub fn merge_distinct_colors(
    path_colors: &[String],
    rect_colors: &[String],
    circle_colors: &[String],
) -> Vec<String> {
    let mut colors = path_colors.to_vec();
    for color in rect_colors.iter().chain(circle_colors) {
        push_distinct(&mut colors, color);
    }
    colors
}

/// Global color order for a whole document
pub fn document_colors(document: &Document) -> Vec<String> {
    let path_colors = extract_colors(document.paths());
    let rect_colors = extract_colors(document.rects());
    let circle_colors = extract_colors(document.circles());
    merge_distinct_colors(&path_colors, &rect_colors, &circle_colors)
}

fn push_distinct(colors: &mut Vec<String>, color: &str) {
    if !colors.iter().any(|c| c == color) {
        colors.push(color.to_string());
    }
}
