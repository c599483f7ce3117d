//! Event-driven SVG reader built on quick-xml
//!
//! Groups are flattened into runs: a nested `<g>` closes the run of its parent
//! and the parent continues in a new run after it, so paint order survives.

use quick_xml::escape::unescape;
use quick_xml::events::{BytesStart, Event};
use quick_xml::Reader;

use crate::error::ParseError;
use crate::model::{Circle, Document, Group, Path, Rect, Shape};

/// Containers whose children are never painted directly
const NON_RENDERED: &[&[u8]] = &[
    b"defs",
    b"clipPath",
    b"mask",
    b"symbol",
    b"pattern",
    b"marker",
];

/// Parse SVG source into a Document
pub fn parse(source: &str) -> Result<Document, ParseError> {
    let mut reader = Reader::from_str(source);
    let mut state = ReaderState::default();

    loop {
        let event = reader.read_event().map_err(|e| {
            ParseError::syntax(reader.error_position() as usize, source.len(), e.to_string())
        })?;
        let position = reader.buffer_position() as usize;

        match event {
            Event::Start(e) => state.open(&e, false, position, source.len())?,
            Event::Empty(e) => state.open(&e, true, position, source.len())?,
            Event::End(e) => {
                if state.close(e.local_name().as_ref()) {
                    break;
                }
            }
            Event::Eof => break,
            _ => {}
        }
    }

    let document = state.finish()?;
    tracing::debug!(
        view_box = %document.view_box,
        groups = document.groups.len(),
        paths = document.paths().count(),
        rects = document.rects().count(),
        circles = document.circles().count(),
        "parsed svg"
    );
    Ok(document)
}

/// An open `<g>` element
struct GroupFrame {
    transform: String,
    /// A nested group already flushed part of this group's shapes
    split: bool,
}

#[derive(Default)]
struct ReaderState {
    document: Option<Document>,
    frames: Vec<GroupFrame>,
    current: Group,
    /// Depth inside a non-rendered subtree
    skip: usize,
}

impl ReaderState {
    fn open(
        &mut self,
        e: &BytesStart<'_>,
        empty: bool,
        position: usize,
        source_len: usize,
    ) -> Result<(), ParseError> {
        let name = e.local_name();
        let name = name.as_ref();

        if self.skip > 0 {
            if !empty {
                self.skip += 1;
            }
            return Ok(());
        }

        let rooted = self.document.is_some();
        let nested_svg = rooted && name == b"svg";
        if NON_RENDERED.contains(&name) || nested_svg {
            if !empty {
                self.skip = 1;
            }
            return Ok(());
        }

        let attrs = Attributes::read(e, position, source_len)?;

        if !rooted {
            if name == b"svg" {
                self.document = Some(Document::new(
                    attrs.get_or_empty("viewBox"),
                    attrs.get_or_empty("height"),
                    attrs.get_or_empty("width"),
                ));
            }
            return Ok(());
        }

        match name {
            b"g" => {
                let transform = compose_transform(&self.current.transform, attrs.get("transform"));
                self.flush(true);
                if empty {
                    self.push_group(Group::new(transform));
                } else {
                    self.frames.push(GroupFrame {
                        transform: transform.clone(),
                        split: false,
                    });
                    self.current = Group::new(transform);
                }
            }
            b"path" => self.current.shapes.push(Shape::Path(Path {
                d: attrs.get_or_empty("d"),
                fill: attrs.get_or_empty("fill"),
                transform: attrs.get("transform").map(str::to_string),
                style: attrs.get("style").map(str::to_string),
            })),
            b"rect" => self.current.shapes.push(Shape::Rect(Rect {
                width: attrs.get_or_empty("width"),
                height: attrs.get_or_empty("height"),
                rx: attrs.get_or_empty("rx"),
                ry: attrs.get_or_empty("ry"),
                fill: attrs.get_or_empty("fill"),
                transform: attrs.get("transform").map(str::to_string),
                style: attrs.get("style").map(str::to_string),
            })),
            b"circle" => self.current.shapes.push(Shape::Circle(Circle {
                cx: attrs.get_or_empty("cx"),
                cy: attrs.get_or_empty("cy"),
                r: attrs.get_or_empty("r"),
                fill: attrs.get_or_empty("fill"),
                transform: attrs.get("transform").map(str::to_string),
                style: attrs.get("style").map(str::to_string),
            })),
            _ => {}
        }

        Ok(())
    }

    /// Handle an end tag; returns true once the root `</svg>` is reached
    fn close(&mut self, name: &[u8]) -> bool {
        if self.skip > 0 {
            self.skip -= 1;
            return false;
        }
        if self.document.is_none() {
            return false;
        }

        match name {
            b"g" => {
                if let Some(frame) = self.frames.pop() {
                    if !self.current.is_empty() || !frame.split {
                        let group = std::mem::take(&mut self.current);
                        self.push_group(group);
                    }
                    let parent = self
                        .frames
                        .last()
                        .map(|f| f.transform.clone())
                        .unwrap_or_default();
                    self.current = Group::new(parent);
                }
                false
            }
            b"svg" => true,
            _ => false,
        }
    }

    /// End the current run, keeping it only if it holds shapes
    fn flush(&mut self, mark_split: bool) {
        if !self.current.is_empty() {
            let transform = self.current.transform.clone();
            let group = std::mem::replace(&mut self.current, Group::new(transform));
            self.push_group(group);
        }
        if mark_split {
            if let Some(frame) = self.frames.last_mut() {
                frame.split = true;
            }
        }
    }

    fn push_group(&mut self, group: Group) {
        if let Some(document) = self.document.as_mut() {
            document.groups.push(group);
        }
    }

    fn finish(mut self) -> Result<Document, ParseError> {
        // Shapes of unclosed groups or directly under the root
        self.flush(false);
        self.document.ok_or(ParseError::MissingRoot)
    }
}

/// Attribute values of one element
///
/// Values are kept as written, entities included, so markup can be re-emitted
/// verbatim. `fill` is the exception: it becomes a script string, so its
/// entities are decoded.
struct Attributes(Vec<(String, String)>);

impl Attributes {
    fn read(e: &BytesStart<'_>, position: usize, source_len: usize) -> Result<Self, ParseError> {
        let mut values = Vec::new();
        for attr in e.attributes() {
            let attr = attr.map_err(|err| ParseError::syntax(position, source_len, err.to_string()))?;
            let key = String::from_utf8_lossy(attr.key.local_name().as_ref()).into_owned();
            let raw = String::from_utf8_lossy(&attr.value).into_owned();
            let value = if key == "fill" {
                unescape(&raw)
                    .map_err(|err| ParseError::syntax(position, source_len, err.to_string()))?
                    .into_owned()
            } else {
                raw
            };
            values.push((key, value));
        }
        Ok(Self(values))
    }

    fn get(&self, key: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    fn get_or_empty(&self, key: &str) -> String {
        self.get(key).unwrap_or_default().to_string()
    }
}

/// Join an inherited transform with an element's own
fn compose_transform(parent: &str, own: Option<&str>) -> String {
    match own.map(str::trim).filter(|t| !t.is_empty()) {
        Some(own) if parent.is_empty() => own.to_string(),
        Some(own) => format!("{} {}", parent, own),
        None => parent.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Filled;

    fn transforms(doc: &Document) -> Vec<&str> {
        doc.groups.iter().map(|g| g.transform.as_str()).collect()
    }

    #[test]
    fn test_compose_transform() {
        assert_eq!(compose_transform("", Some("scale(2)")), "scale(2)");
        assert_eq!(compose_transform("a", Some("b")), "a b");
        assert_eq!(compose_transform("a", None), "a");
        assert_eq!(compose_transform("a", Some("  ")), "a");
    }

    #[test]
    fn test_root_attributes() {
        let doc = parse(r#"<svg viewBox="0 0 24 24" height="24px" width="2em"></svg>"#)
            .expect("Should parse");
        assert_eq!(doc.view_box, "0 0 24 24");
        assert_eq!(doc.height, "24px");
        assert_eq!(doc.width, "2em");
        assert!(doc.groups.is_empty());
    }

    #[test]
    fn test_missing_root_attributes_are_empty() {
        let doc = parse("<svg/>").expect("Should parse");
        assert_eq!(doc.view_box, "");
        assert_eq!(doc.width, "");
    }

    #[test]
    fn test_shapes_and_fields() {
        let doc = parse(
            r##"<svg xmlns="http://www.w3.org/2000/svg">
                <g transform="translate(1 1)">
                    <path d="M0 0L1 1" fill="#FF0000"/>
                    <rect width="4" height="3" rx="1" style="opacity:.5" fill="#00F"/>
                    <circle cx="2" cy="3" r="1.5" transform="scale(2)"/>
                </g>
            </svg>"##,
        )
        .expect("Should parse");

        assert_eq!(doc.groups.len(), 1);
        let group = &doc.groups[0];
        assert_eq!(group.transform, "translate(1 1)");

        let path = group.paths().next().expect("path");
        assert_eq!(path.d, "M0 0L1 1");
        assert_eq!(path.fill, "#FF0000");
        assert_eq!(path.transform, None);

        let rect = group.rects().next().expect("rect");
        assert_eq!(rect.rx, "1");
        assert_eq!(rect.ry, "");
        assert_eq!(rect.style.as_deref(), Some("opacity:.5"));

        let circle = group.circles().next().expect("circle");
        assert_eq!(circle.r, "1.5");
        assert_eq!(circle.fill(), "");
        assert_eq!(circle.transform.as_deref(), Some("scale(2)"));
    }

    #[test]
    fn test_top_level_shapes_form_implicit_group() {
        let doc = parse(r#"<svg><path d="M0 0" fill="red"/><g><rect fill="blue"/></g></svg>"#)
            .expect("Should parse");
        assert_eq!(transforms(&doc), vec!["", ""]);
        assert_eq!(doc.groups[0].paths().count(), 1);
        assert_eq!(doc.groups[1].rects().count(), 1);
    }

    #[test]
    fn test_nested_groups_split_into_runs() {
        let doc = parse(
            r#"<svg>
                <g transform="a">
                    <path d="1"/>
                    <g transform="b"><path d="2"/></g>
                    <path d="3"/>
                </g>
            </svg>"#,
        )
        .expect("Should parse");

        assert_eq!(transforms(&doc), vec!["a", "a b", "a"]);
        let ds: Vec<_> = doc.paths().map(|p| p.d.as_str()).collect();
        assert_eq!(ds, vec!["1", "2", "3"]);
    }

    #[test]
    fn test_group_emptied_by_split_is_dropped() {
        let doc = parse(r#"<svg><g transform="outer"><g transform="inner"><path d="x"/></g></g></svg>"#)
            .expect("Should parse");
        assert_eq!(transforms(&doc), vec!["outer inner"]);
    }

    #[test]
    fn test_empty_leaf_groups_are_kept() {
        let doc = parse(r#"<svg><g transform="t1"></g><g transform="t2"/></svg>"#)
            .expect("Should parse");
        assert_eq!(transforms(&doc), vec!["t1", "t2"]);
        assert!(doc.groups.iter().all(Group::is_empty));
    }

    #[test]
    fn test_non_rendered_subtrees_are_skipped() {
        let doc = parse(
            r#"<svg>
                <defs><clipPath id="c"><rect width="1" height="1" fill="black"/></clipPath></defs>
                <g><circle r="1" fill="green"/></g>
                <svg><path d="nested" fill="pink"/></svg>
            </svg>"#,
        )
        .expect("Should parse");

        let fills: Vec<_> = doc.shapes().map(|s| s.fill()).collect();
        assert_eq!(fills, vec!["green"]);
    }

    #[test]
    fn test_entities_are_kept_raw() {
        let doc = parse(r#"<svg><path d="M0 0" style="font-family:&quot;A&quot;"/></svg>"#)
            .expect("Should parse");
        let path = doc.paths().next().expect("path");
        assert_eq!(path.style.as_deref(), Some("font-family:&quot;A&quot;"));
    }

    #[test]
    fn test_fill_entities_are_decoded() {
        let doc = parse(r#"<svg><path d="M0&#x20;0" fill="&#x23;ff0000"/><rect fill="a&amp;b"/></svg>"#)
            .expect("Should parse");
        let path = doc.paths().next().expect("path");
        assert_eq!(path.fill, "#ff0000");
        assert_eq!(path.d, "M0&#x20;0");
        assert_eq!(doc.rects().next().expect("rect").fill, "a&b");
    }

    #[test]
    fn test_bad_fill_entity_error() {
        let result = parse(r#"<svg><path fill="&nope;"/></svg>"#);
        assert!(matches!(result, Err(ParseError::Syntax { .. })));
    }

    #[test]
    fn test_unknown_elements_are_ignored() {
        let doc = parse(r#"<svg><title>Icon</title><ellipse rx="1"/><g><polygon/></g></svg>"#)
            .expect("Should parse");
        assert_eq!(doc.shapes().count(), 0);
        assert_eq!(doc.groups.len(), 1);
    }

    #[test]
    fn test_missing_root_error() {
        let result = parse(r#"<html><path d="M0 0"/></html>"#);
        assert!(matches!(result, Err(ParseError::MissingRoot)));
    }

    #[test]
    fn test_mismatched_tag_error() {
        let result = parse("<svg><g></svg>");
        assert!(matches!(result, Err(ParseError::Syntax { .. })));
    }
}
