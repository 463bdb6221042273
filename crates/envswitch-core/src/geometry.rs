#![forbid(unsafe_code)]

//! Geometric primitives.
//!
//! Coordinates are host units (points on a GUI host, cells on a terminal
//! host) stored as `f32` so the trigger can sit at fractional or negative
//! positions after a drag.

use std::ops::{Add, AddAssign, Sub};

/// A position or translation in host units.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f32,
    pub y: f32,
}

impl Point {
    /// The origin, also used as the "no translation" value.
    pub const ZERO: Point = Point { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[inline]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Squared distance to another point.
    #[inline]
    pub fn distance_squared(self, other: Point) -> f32 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        Point::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl AddAssign for Point {
    fn add_assign(&mut self, rhs: Point) {
        self.x += rhs.x;
        self.y += rhs.y;
    }
}

impl Sub for Point {
    type Output = Point;

    fn sub(self, rhs: Point) -> Point {
        Point::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Size {
    pub width: f32,
    pub height: f32,
}

impl Size {
    /// Create a new size.
    #[inline]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }
}

/// Per-edge insets, used for the trigger's content padding.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Insets {
    pub top: f32,
    pub left: f32,
    pub bottom: f32,
    pub right: f32,
}

impl Insets {
    /// Create insets with explicit edges.
    #[inline]
    pub const fn new(top: f32, left: f32, bottom: f32, right: f32) -> Self {
        Self {
            top,
            left,
            bottom,
            right,
        }
    }

    /// The same inset on all four edges.
    #[inline]
    pub const fn uniform(value: f32) -> Self {
        Self::new(value, value, value, value)
    }

    /// Returns the inset if all four edges are equal.
    #[must_use]
    pub fn as_uniform(&self) -> Option<f32> {
        (self.top == self.left && self.left == self.bottom && self.bottom == self.right)
            .then_some(self.top)
    }
}

/// An axis-aligned rectangle for frames and hit testing.
///
/// Edges follow the half-open convention: `x..x + width`, `y..y + height`.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Rect {
    /// Left edge (inclusive).
    pub x: f32,
    /// Top edge (inclusive).
    pub y: f32,
    /// Width in host units.
    pub width: f32,
    /// Height in host units.
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[inline]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Create a rectangle from an origin and a size.
    #[inline]
    pub const fn from_origin_size(origin: Point, size: Size) -> Self {
        Self::new(origin.x, origin.y, size.width, size.height)
    }

    /// Top-left corner.
    #[inline]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Width and height.
    #[inline]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge (exclusive).
    #[inline]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge (exclusive).
    #[inline]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[inline]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Same size, moved so its center lands on `center`.
    #[must_use]
    pub fn with_center(&self, center: Point) -> Rect {
        Rect::new(
            center.x - self.width / 2.0,
            center.y - self.height / 2.0,
            self.width,
            self.height,
        )
    }

    /// Same origin, new size.
    #[must_use]
    pub fn with_size(&self, size: Size) -> Rect {
        Rect::from_origin_size(self.origin(), size)
    }

    /// Check if the rectangle has zero area.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }

    /// Check if a point is inside the rectangle.
    ///
    /// Empty rectangles contain nothing.
    #[inline]
    pub fn contains(&self, point: Point) -> bool {
        !self.is_empty()
            && point.x >= self.x
            && point.x < self.right()
            && point.y >= self.y
            && point.y < self.bottom()
    }

    /// Shrink the rectangle by the given insets, saturating at zero size.
    #[must_use]
    pub fn inset(&self, insets: Insets) -> Rect {
        Rect::new(
            self.x + insets.left,
            self.y + insets.top,
            (self.width - insets.left - insets.right).max(0.0),
            (self.height - insets.top - insets.bottom).max(0.0),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn contains_is_half_open() {
        let r = Rect::new(2.0, 3.0, 4.0, 2.0);
        assert!(r.contains(Point::new(2.0, 3.0)));
        assert!(r.contains(Point::new(5.9, 4.9)));
        assert!(!r.contains(Point::new(6.0, 3.0)));
        assert!(!r.contains(Point::new(2.0, 5.0)));
        assert!(!r.contains(Point::new(1.9, 3.0)));
    }

    #[test]
    fn empty_rect_contains_nothing() {
        let r = Rect::new(0.0, 0.0, 0.0, 10.0);
        assert!(r.is_empty());
        assert!(!r.contains(Point::ZERO));
    }

    #[test]
    fn with_center_keeps_size() {
        let r = Rect::new(0.0, 0.0, 4.0, 2.0);
        let moved = r.with_center(Point::new(10.0, 10.0));
        assert_eq!(moved, Rect::new(8.0, 9.0, 4.0, 2.0));
        assert_eq!(moved.center(), Point::new(10.0, 10.0));
    }

    #[test]
    fn negative_origin_is_allowed() {
        let r = Rect::new(-3.0, -1.0, 4.0, 2.0);
        assert!(r.contains(Point::new(0.5, 0.5)));
        assert!(!r.contains(Point::new(1.0, 0.5)));
    }

    #[test]
    fn inset_saturates() {
        let r = Rect::new(0.0, 0.0, 10.0, 4.0);
        let inner = r.inset(Insets::uniform(3.0));
        assert_eq!(inner, Rect::new(3.0, 3.0, 4.0, 0.0));
        assert!(inner.is_empty());
    }

    #[test]
    fn uniform_insets_roundtrip() {
        assert_eq!(Insets::uniform(30.0).as_uniform(), Some(30.0));
        assert_eq!(Insets::new(1.0, 2.0, 1.0, 2.0).as_uniform(), None);
    }

    #[test]
    fn point_arithmetic() {
        let mut p = Point::new(1.0, 2.0);
        p += Point::new(5.0, 0.0);
        assert_eq!(p, Point::new(6.0, 2.0));
        assert_eq!(p - Point::new(6.0, 2.0), Point::ZERO);
        assert_eq!(Point::ZERO.distance_squared(Point::new(3.0, 4.0)), 25.0);
    }
}
