//! Svelte component generation from a document and its color table

use crate::colors::ColorTable;
use crate::model::{Circle, Document, Path, Rect, ShapeKind};

use super::TemplateConfig;

/// Build a Svelte component incrementally
pub struct SvelteBuilder {
    config: TemplateConfig,
    declarations: Vec<String>,
    elements: Vec<String>,
    indent: usize,
}

impl SvelteBuilder {
    /// Create a new builder
    pub fn new(config: TemplateConfig) -> Self {
        Self {
            config,
            declarations: vec![],
            elements: vec![],
            indent: 1,
        }
    }

    fn indent_str(&self) -> String {
        self.config.indent.repeat(self.indent)
    }

    /// Declare an exported variable with a string default
    pub fn add_declaration(&mut self, var_name: &str, value: &str) {
        self.declarations.push(format!(
            r#"{}export let {} = "{}";"#,
            self.config.indent,
            var_name,
            escape_js_string(value)
        ));
    }

    /// Open a `<g>` element
    pub fn start_group(&mut self, transform: &str) {
        self.elements
            .push(format!(r#"{}<g transform="{}">"#, self.indent_str(), escape_attr(transform)));
        self.indent += 1;
    }

    /// Close a `<g>` element
    pub fn end_group(&mut self) {
        self.indent = self.indent.saturating_sub(1);
        self.elements.push(format!("{}</g>", self.indent_str()));
    }

    /// Add a path element with `fill` already substituted
    pub fn add_path(&mut self, path: &Path, fill: &str) {
        let transform = path
            .transform
            .as_ref()
            .map(|t| format!(r#" transform="{}""#, escape_attr(t)))
            .unwrap_or_default();
        let style = path
            .style
            .as_ref()
            .map(|s| format!(r#" style="{}""#, escape_attr(s)))
            .unwrap_or_default();

        self.elements.push(format!(
            r#"{}<path d="{}"{}{} fill="{}" />"#,
            self.indent_str(),
            escape_attr(&path.d),
            transform,
            style,
            fill
        ));
    }

    /// Add a rect element with `fill` already substituted
    pub fn add_rect(&mut self, rect: &Rect, fill: &str) {
        self.elements.push(format!(
            r#"{}<rect width="{}" height="{}" transform="{}" style="{}" rx="{}" ry="{}" fill="{}" />"#,
            self.indent_str(),
            escape_attr(&rect.width),
            escape_attr(&rect.height),
            escape_attr(rect.transform.as_deref().unwrap_or_default()),
            escape_attr(rect.style.as_deref().unwrap_or_default()),
            escape_attr(&rect.rx),
            escape_attr(&rect.ry),
            fill
        ));
    }

    /// Add a circle element with `fill` already substituted
    pub fn add_circle(&mut self, circle: &Circle, fill: &str) {
        self.elements.push(format!(
            r#"{}<circle cx="{}" cy="{}" r="{}" transform="{}" style="{}" fill="{}" />"#,
            self.indent_str(),
            escape_attr(&circle.cx),
            escape_attr(&circle.cy),
            escape_attr(&circle.r),
            escape_attr(circle.transform.as_deref().unwrap_or_default()),
            escape_attr(circle.style.as_deref().unwrap_or_default()),
            fill
        ));
    }

    /// Build the final component text
    pub fn build(self, view_box: &str, height: &str, width: &str) -> String {
        let mut out = String::new();

        match &self.config.script_lang {
            Some(lang) => out.push_str(&format!("<script lang=\"{}\">\n", lang)),
            None => out.push_str("<script>\n"),
        }
        for decl in &self.declarations {
            out.push_str(decl);
            out.push('\n');
        }
        out.push_str("</script>\n");

        out.push_str(&format!(
            r#"<svg viewBox="{}" height="{}" width="{}">"#,
            escape_attr(view_box),
            escape_attr(height),
            escape_attr(width)
        ));
        out.push('\n');
        for elem in &self.elements {
            out.push_str(elem);
            out.push('\n');
        }
        out.push_str("</svg>\n");

        out
    }
}

/// Render a document as a Svelte component
///
/// Within each group, paths come first, then rects, then circles. Fills are
/// replaced by the table's reference tokens; a fill missing from the table
/// renders as `fill=""`.
pub fn render(document: &Document, table: &ColorTable, config: &TemplateConfig) -> String {
    let mut builder = SvelteBuilder::new(config.clone());

    for entry in table.entries() {
        builder.add_declaration(&entry.var_name, &entry.hex);
    }

    for group in &document.groups {
        builder.start_group(&group.transform);
        for path in group.paths() {
            builder.add_path(path, fill_ref(table, ShapeKind::Path, &path.fill));
        }
        for rect in group.rects() {
            builder.add_rect(rect, fill_ref(table, ShapeKind::Rect, &rect.fill));
        }
        for circle in group.circles() {
            builder.add_circle(circle, fill_ref(table, ShapeKind::Circle, &circle.fill));
        }
        builder.end_group();
    }

    builder.build(&document.view_box, &document.height, &document.width)
}

fn fill_ref<'t>(table: &'t ColorTable, kind: ShapeKind, fill: &str) -> &'t str {
    match table.get(fill) {
        Some(entry) => &entry.ref_token,
        None => {
            tracing::warn!(%kind, fill, "fill has no color variable, rendering blank");
            ""
        }
    }
}

/// Escape a value for a double-quoted JavaScript string literal
fn escape_js_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\u{2028}' => out.push_str("\\u2028"),
            '\u{2029}' => out.push_str("\\u2029"),
            _ => out.push(c),
        }
    }
    out
}

/// Make a raw attribute value safe inside double quotes
///
/// Values are otherwise re-emitted as written; only a `"` that came from a
/// single-quoted source attribute needs rewriting.
fn escape_attr(s: &str) -> String {
    s.replace('"', "&quot;")
}
