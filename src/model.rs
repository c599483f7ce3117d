//! Shape model for a parsed SVG document
//!
//! Every geometry and style value is kept as the opaque string found in the
//! source. Nothing here parses numbers.

/// A shape that carries a fill color
pub trait Filled {
    /// The literal fill value, empty when the source had no `fill` attribute
    fn fill(&self) -> &str;
}

/// Which of the three supported shapes a record is
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ShapeKind {
    Path,
    Rect,
    Circle,
}

impl std::fmt::Display for ShapeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ShapeKind::Path => write!(f, "path"),
            ShapeKind::Rect => write!(f, "rect"),
            ShapeKind::Circle => write!(f, "circle"),
        }
    }
}

/// A `<path>` outline
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Path {
    pub d: String,
    pub fill: String,
    pub transform: Option<String>,
    pub style: Option<String>,
}

/// A `<rect>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Rect {
    pub width: String,
    pub height: String,
    pub rx: String,
    pub ry: String,
    pub fill: String,
    pub transform: Option<String>,
    pub style: Option<String>,
}

/// A `<circle>`
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Circle {
    pub cx: String,
    pub cy: String,
    pub r: String,
    pub fill: String,
    pub transform: Option<String>,
    pub style: Option<String>,
}

impl Path {
    pub fn new(d: impl Into<String>, fill: impl Into<String>) -> Self {
        Self {
            d: d.into(),
            fill: fill.into(),
            ..Self::default()
        }
    }
}

impl Rect {
    pub fn new(width: impl Into<String>, height: impl Into<String>, fill: impl Into<String>) -> Self {
        Self {
            width: width.into(),
            height: height.into(),
            fill: fill.into(),
            ..Self::default()
        }
    }
}

impl Circle {
    pub fn new(
        cx: impl Into<String>,
        cy: impl Into<String>,
        r: impl Into<String>,
        fill: impl Into<String>,
    ) -> Self {
        Self {
            cx: cx.into(),
            cy: cy.into(),
            r: r.into(),
            fill: fill.into(),
            ..Self::default()
        }
    }
}

impl Filled for Path {
    fn fill(&self) -> &str {
        &self.fill
    }
}

impl Filled for Rect {
    fn fill(&self) -> &str {
        &self.fill
    }
}

impl Filled for Circle {
    fn fill(&self) -> &str {
        &self.fill
    }
}

/// Any supported shape
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Path(Path),
    Rect(Rect),
    Circle(Circle),
}

impl Shape {
    pub fn kind(&self) -> ShapeKind {
        match self {
            Shape::Path(_) => ShapeKind::Path,
            Shape::Rect(_) => ShapeKind::Rect,
            Shape::Circle(_) => ShapeKind::Circle,
        }
    }
}

impl Filled for Shape {
    fn fill(&self) -> &str {
        match self {
            Shape::Path(p) => &p.fill,
            Shape::Rect(r) => &r.fill,
            Shape::Circle(c) => &c.fill,
        }
    }
}

impl From<Path> for Shape {
    fn from(p: Path) -> Self {
        Shape::Path(p)
    }
}

impl From<Rect> for Shape {
    fn from(r: Rect) -> Self {
        Shape::Rect(r)
    }
}

impl From<Circle> for Shape {
    fn from(c: Circle) -> Self {
        Shape::Circle(c)
    }
}

/// A `<g>` with its shapes in source order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Group {
    pub transform: String,
    pub shapes: Vec<Shape>,
}

impl Group {
    pub fn new(transform: impl Into<String>) -> Self {
        Self {
            transform: transform.into(),
            shapes: vec![],
        }
    }

    /// Append a shape, builder style
    pub fn with_shape(mut self, shape: impl Into<Shape>) -> Self {
        self.shapes.push(shape.into());
        self
    }

    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Path(p) => Some(p),
            _ => None,
        })
    }

    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Rect(r) => Some(r),
            _ => None,
        })
    }

    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.shapes.iter().filter_map(|s| match s {
            Shape::Circle(c) => Some(c),
            _ => None,
        })
    }

    pub fn is_empty(&self) -> bool {
        self.shapes.is_empty()
    }
}

/// Root of a parsed SVG document
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub view_box: String,
    pub height: String,
    pub width: String,
    pub groups: Vec<Group>,
}

impl Document {
    pub fn new(
        view_box: impl Into<String>,
        height: impl Into<String>,
        width: impl Into<String>,
    ) -> Self {
        Self {
            view_box: view_box.into(),
            height: height.into(),
            width: width.into(),
            groups: vec![],
        }
    }

    pub fn with_group(mut self, group: Group) -> Self {
        self.groups.push(group);
        self
    }

    /// All paths across every group, in traversal order
    pub fn paths(&self) -> impl Iterator<Item = &Path> {
        self.groups.iter().flat_map(Group::paths)
    }

    /// All rects across every group, in traversal order
    pub fn rects(&self) -> impl Iterator<Item = &Rect> {
        self.groups.iter().flat_map(Group::rects)
    }

    /// All circles across every group, in traversal order
    pub fn circles(&self) -> impl Iterator<Item = &Circle> {
        self.groups.iter().flat_map(Group::circles)
    }

    /// Every shape in traversal order
    pub fn shapes(&self) -> impl Iterator<Item = &Shape> {
        self.groups.iter().flat_map(|g| g.shapes.iter())
    }
}
