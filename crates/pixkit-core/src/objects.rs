//! Vector objects layered above the raster image.

use crate::color::Color;
use crate::geo::{Point, Scale, Size};
use crate::ids::ObjectId;
use serde::{Deserialize, Serialize};

/// Kind of vector object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectKind {
    Rectangle,
    Ellipse,
    Line,
    Polygon,
    Path,
    Group,
}

impl std::fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Rectangle => write!(f, "Rectangle"),
            Self::Ellipse => write!(f, "Ellipse"),
            Self::Line => write!(f, "Line"),
            Self::Polygon => write!(f, "Polygon"),
            Self::Path => write!(f, "Path"),
            Self::Group => write!(f, "Group"),
        }
    }
}

/// A vector object described by its control points. Groups have no points
/// of their own and hold their members in z-order instead.
#[derive(Debug, Clone, PartialEq)]
pub struct VectorObject {
    id: ObjectId,
    pub kind: ObjectKind,
    pub points: Vec<Point>,
    pub color: Color,
    pub children: Vec<VectorObject>,
}

impl VectorObject {
    pub fn new(kind: ObjectKind, points: Vec<Point>, color: Color) -> Self {
        Self {
            id: ObjectId::next(),
            kind,
            points,
            color,
            children: Vec::new(),
        }
    }

    /// An axis-aligned rectangle object.
    pub fn rectangle(top_left: Point, size: Size, color: Color) -> Self {
        let Point { x, y } = top_left;
        Self::new(
            ObjectKind::Rectangle,
            vec![
                Point::new(x, y),
                Point::new(x + size.w, y),
                Point::new(x + size.w, y + size.h),
                Point::new(x, y + size.h),
            ],
            color,
        )
    }

    pub fn polygon(points: Vec<Point>, color: Color) -> Self {
        Self::new(ObjectKind::Polygon, points, color)
    }

    /// A group holding `children`, bottom first.
    pub fn group(children: Vec<VectorObject>) -> Self {
        let mut group = Self::new(ObjectKind::Group, Vec::new(), Color::TRANSPARENT);
        group.children = children;
        group
    }

    pub fn is_group(&self) -> bool {
        self.kind == ObjectKind::Group
    }

    pub fn id(&self) -> ObjectId {
        self.id
    }

    pub fn offset(&mut self, delta: Point) {
        self.map_points(|p| p + delta);
    }

    pub fn scale(&mut self, scale: Scale, origin: Point) {
        self.map_points(|p| p.scaled(scale, origin));
    }

    /// Applies `f` to every control point, group members included.
    pub fn map_points(&mut self, f: impl Fn(Point) -> Point) {
        self.map_points_with(&f);
    }

    fn map_points_with(&mut self, f: &dyn Fn(Point) -> Point) {
        for p in &mut self.points {
            *p = f(*p);
        }
        for child in &mut self.children {
            child.map_points_with(f);
        }
    }

    /// Whether further points can be inserted. Closed primitives have a
    /// fixed number of control points.
    pub fn accepts_points(&self) -> bool {
        matches!(self.kind, ObjectKind::Polygon | ObjectKind::Path | ObjectKind::Line)
    }

    /// Inserts a point before `index`; `index == len` appends.
    pub fn insert_point(&mut self, index: usize, p: Point) -> bool {
        if index > self.points.len() {
            return false;
        }
        self.points.insert(index, p);
        true
    }

    pub fn remove_point(&mut self, index: usize) -> Option<Point> {
        if index < self.points.len() {
            Some(self.points.remove(index))
        } else {
            None
        }
    }

    pub fn set_point(&mut self, index: usize, p: Point) -> bool {
        match self.points.get_mut(index) {
            Some(slot) => {
                *slot = p;
                true
            }
            None => false,
        }
    }

    /// Bounding box as `(min, max)`, `None` for objects without points.
    pub fn bounds(&self) -> Option<(Point, Point)> {
        let own = self.points.iter().map(|p| (*p, *p));
        let members = self.children.iter().filter_map(VectorObject::bounds);
        own.chain(members).reduce(|(lo, hi), (a, b)| {
            (
                Point::new(lo.x.min(a.x), lo.y.min(a.y)),
                Point::new(hi.x.max(b.x), hi.y.max(b.y)),
            )
        })
    }
}

/// A readable collective name for a set of objects, e.g. "Rectangle" for
/// one rectangle or "3 Objects" for mixed kinds.
pub fn collective_name(objects: &[&VectorObject]) -> String {
    match objects {
        [] => "Objects".to_string(),
        [one] => one.kind.to_string(),
        [first, rest @ ..] if rest.iter().all(|o| o.kind == first.kind) => {
            format!("{} {}s", objects.len(), first.kind)
        }
        _ => format!("{} Objects", objects.len()),
    }
}
