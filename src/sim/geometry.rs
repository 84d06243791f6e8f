//! Axis-aligned rectangle geometry
//!
//! Screen convention: x grows right, y grows down. A rectangle covers the
//! half-open area `[left, right) x [top, bottom)`, so rectangles that only
//! share an edge do not overlap.

use glam::Vec2;
use serde::{Deserialize, Serialize};

/// Integer entity size in world units
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub const fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// True if either dimension is zero
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.width == 0 || self.height == 0
    }
}

/// An axis-aligned bounding box
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f32,
    pub top: f32,
    pub right: f32,
    pub bottom: f32,
}

impl Rect {
    pub fn new(left: f32, top: f32, right: f32, bottom: f32) -> Self {
        Self {
            left,
            top,
            right,
            bottom,
        }
    }

    /// Rectangle anchored at its top-left corner
    pub fn from_position_size(position: Vec2, size: Size) -> Self {
        Self {
            left: position.x,
            top: position.y,
            right: position.x + size.width as f32,
            bottom: position.y + size.height as f32,
        }
    }

    #[inline]
    pub fn width(&self) -> f32 {
        self.right - self.left
    }

    #[inline]
    pub fn height(&self) -> f32 {
        self.bottom - self.top
    }

    /// Strict AABB overlap test
    #[inline]
    pub fn intersects(&self, other: &Rect) -> bool {
        self.left < other.right
            && self.right > other.left
            && self.top < other.bottom
            && self.bottom > other.top
    }
}

/// Free-function form of [`Rect::intersects`]
#[inline]
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    a.intersects(b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rect_from_position_size() {
        let rect = Rect::from_position_size(Vec2::new(10.0, 20.0), Size::new(30, 40));
        assert_eq!(rect, Rect::new(10.0, 20.0, 40.0, 60.0));
        assert_eq!(rect.width(), 30.0);
        assert_eq!(rect.height(), 40.0);
    }

    #[test]
    fn test_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        let b = Rect::new(5.0, 5.0, 15.0, 15.0);
        assert!(overlaps(&a, &b));
        assert!(overlaps(&b, &a));
    }

    #[test]
    fn test_touching_edges_do_not_overlap() {
        let a = Rect::new(0.0, 0.0, 10.0, 10.0);
        // Shares the right edge of `a`
        let right = Rect::new(10.0, 0.0, 20.0, 10.0);
        // Shares the bottom edge of `a`
        let below = Rect::new(0.0, 10.0, 10.0, 20.0);
        assert!(!overlaps(&a, &right));
        assert!(!overlaps(&right, &a));
        assert!(!overlaps(&a, &below));
        assert!(!overlaps(&below, &a));
    }

    #[test]
    fn test_contained_rect_overlaps() {
        let outer = Rect::new(0.0, 0.0, 100.0, 100.0);
        let inner = Rect::new(40.0, 40.0, 60.0, 60.0);
        assert!(overlaps(&outer, &inner));
        assert!(overlaps(&inner, &outer));
    }

    #[test]
    fn test_size_is_empty() {
        assert!(Size::new(0, 10).is_empty());
        assert!(Size::new(10, 0).is_empty());
        assert!(!Size::new(1, 1).is_empty());
    }
}
