//! Geometry primitives shared by bitmaps, selections and vector objects.
//!
//! Integer types address pixels, floating point types address object
//! coordinates. Rectangles are half-open: a rectangle at `(x, y)` with size
//! `(w, h)` covers the pixels `x..x + w` and `y..y + h`.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Mul, Neg, Sub};

/// A pixel position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntPoint {
    pub x: i32,
    pub y: i32,
}

impl IntPoint {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn floated(self) -> Point {
        Point::new(f64::from(self.x), f64::from(self.y))
    }
}

impl Add for IntPoint {
    type Output = IntPoint;

    fn add(self, rhs: IntPoint) -> IntPoint {
        IntPoint::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for IntPoint {
    type Output = IntPoint;

    fn sub(self, rhs: IntPoint) -> IntPoint {
        IntPoint::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Neg for IntPoint {
    type Output = IntPoint;

    fn neg(self) -> IntPoint {
        IntPoint::new(-self.x, -self.y)
    }
}

/// A size in pixels. Negative extents are treated as empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntSize {
    pub w: i32,
    pub h: i32,
}

impl IntSize {
    pub const fn new(w: i32, h: i32) -> Self {
        Self { w, h }
    }

    pub fn is_empty(&self) -> bool {
        self.w <= 0 || self.h <= 0
    }

    /// Number of pixels covered, zero for empty sizes.
    pub fn area(&self) -> u64 {
        if self.is_empty() {
            0
        } else {
            self.w as u64 * self.h as u64
        }
    }

    pub fn floated(self) -> Size {
        Size::new(f64::from(self.w), f64::from(self.h))
    }
}

/// A floating point size, used when scaling object coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    pub w: f64,
    pub h: f64,
}

impl Size {
    pub const fn new(w: f64, h: f64) -> Self {
        Self { w, h }
    }

    pub fn center(&self) -> Point {
        Point::new(self.w / 2.0, self.h / 2.0)
    }
}

/// An axis-aligned pixel rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct IntRect {
    pub x: i32,
    pub y: i32,
    pub w: i32,
    pub h: i32,
}

impl IntRect {
    pub const fn new(x: i32, y: i32, w: i32, h: i32) -> Self {
        Self { x, y, w, h }
    }

    pub fn from_parts(top_left: IntPoint, size: IntSize) -> Self {
        Self::new(top_left.x, top_left.y, size.w, size.h)
    }

    /// The rectangle covering a whole image of the given size.
    pub fn from_size(size: IntSize) -> Self {
        Self::new(0, 0, size.w, size.h)
    }

    pub fn top_left(&self) -> IntPoint {
        IntPoint::new(self.x, self.y)
    }

    pub fn size(&self) -> IntSize {
        IntSize::new(self.w, self.h)
    }

    /// Exclusive right edge.
    pub fn right(&self) -> i32 {
        self.x + self.w
    }

    /// Exclusive bottom edge.
    pub fn bottom(&self) -> i32 {
        self.y + self.h
    }

    pub fn is_empty(&self) -> bool {
        self.size().is_empty()
    }

    pub fn contains(&self, p: IntPoint) -> bool {
        p.x >= self.x && p.y >= self.y && p.x < self.right() && p.y < self.bottom()
    }

    /// The overlapping part of two rectangles, empty (zero sized) if they
    /// do not overlap.
    pub fn intersection(&self, other: &IntRect) -> IntRect {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        if right <= x || bottom <= y {
            IntRect::new(x, y, 0, 0)
        } else {
            IntRect::new(x, y, right - x, bottom - y)
        }
    }

    pub fn translated(&self, delta: IntPoint) -> IntRect {
        IntRect::new(self.x + delta.x, self.y + delta.y, self.w, self.h)
    }
}

/// An object-space coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Scales this point relative to `origin`.
    pub fn scaled(self, scale: Scale, origin: Point) -> Point {
        Point::new(
            origin.x + (self.x - origin.x) * scale.x,
            origin.y + (self.y - origin.y) * scale.y,
        )
    }

    pub fn floored(self) -> IntPoint {
        IntPoint::new(self.x.floor() as i32, self.y.floor() as i32)
    }

    pub fn distance_to(&self, other: &Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        (dx * dx + dy * dy).sqrt()
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

impl Mul<f64> for Point {
    type Output = Point;

    fn mul(self, rhs: f64) -> Point {
        Point::new(self.x * rhs, self.y * rhs)
    }
}

/// Per-axis scale factors.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Scale {
    pub x: f64,
    pub y: f64,
}

impl Scale {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// The scale which maps `old` onto `new`. Zero-sized `old` extents
    /// give a factor of 1 on that axis.
    pub fn between(new: Size, old: Size) -> Self {
        let ratio = |n: f64, o: f64| if o == 0.0 { 1.0 } else { n / o };
        Self::new(ratio(new.w, old.w), ratio(new.h, old.h))
    }

    pub fn inverse(&self) -> Scale {
        let inv = |v: f64| if v == 0.0 { 1.0 } else { 1.0 / v };
        Scale::new(inv(self.x), inv(self.y))
    }
}

impl Default for Scale {
    fn default() -> Self {
        Self::new(1.0, 1.0)
    }
}

/// Flip axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Axis {
    Horizontal,
    Vertical,
}

impl std::fmt::Display for Axis {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Horizontal => write!(f, "horizontal"),
            Self::Vertical => write!(f, "vertical"),
        }
    }
}
