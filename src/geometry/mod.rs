//! Geometric primitives for span positions.
//!
//! Coordinates are page coordinates with a top-left origin: `y` grows
//! downward, so a smaller `y` is higher on the page.

use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

use crate::utils::safe_float_cmp;

/// A 2D point in page space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate (top-left origin, increasing downward)
    pub y: f32,
}

impl Point {
    /// Create a new point.
    ///
    /// # Examples
    ///
    /// ```
    /// use pdf_outline::geometry::Point;
    ///
    /// let point = Point::new(10.0, 20.0);
    /// assert_eq!(point.x, 10.0);
    /// assert_eq!(point.y, 20.0);
    /// ```
    pub fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Check that both coordinates are finite numbers.
    pub fn is_finite(&self) -> bool {
        self.x.is_finite() && self.y.is_finite()
    }

    /// Compare two points top-to-bottom, then left-to-right.
    ///
    /// # Examples
    ///
    /// ```
    /// use std::cmp::Ordering;
    /// use pdf_outline::geometry::Point;
    ///
    /// let top = Point::new(300.0, 40.0);
    /// let below = Point::new(10.0, 90.0);
    /// assert_eq!(top.reading_cmp(&below), Ordering::Less);
    /// ```
    pub fn reading_cmp(&self, other: &Point) -> Ordering {
        safe_float_cmp(self.y, other.y).then_with(|| safe_float_cmp(self.x, other.x))
    }

    /// Vertical distance to another point.
    pub fn vertical_distance(&self, other: &Point) -> f32 {
        (self.y - other.y).abs()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reading_cmp_prefers_topmost() {
        let a = Point::new(500.0, 10.0);
        let b = Point::new(0.0, 11.0);
        assert_eq!(a.reading_cmp(&b), Ordering::Less);
        assert_eq!(b.reading_cmp(&a), Ordering::Greater);
    }

    #[test]
    fn test_reading_cmp_same_line_prefers_leftmost() {
        let left = Point::new(10.0, 50.0);
        let right = Point::new(90.0, 50.0);
        assert_eq!(left.reading_cmp(&right), Ordering::Less);
        assert_eq!(left.reading_cmp(&left), Ordering::Equal);
    }

    #[test]
    fn test_vertical_distance() {
        let a = Point::new(0.0, 100.0);
        let b = Point::new(40.0, 85.5);
        assert_eq!(a.vertical_distance(&b), 14.5);
    }

    #[test]
    fn test_is_finite() {
        assert!(Point::new(1.0, 2.0).is_finite());
        assert!(!Point::new(f32::NAN, 2.0).is_finite());
        assert!(!Point::new(1.0, f32::INFINITY).is_finite());
    }
}
