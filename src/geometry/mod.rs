//! Plane geometry used by the map pipeline.
//!
//! Points and axis-aligned boxes are plain value types. Polygon containment is
//! delegated to `geo`, vertex proximity to a `kiddo` KD-tree.

pub mod polygon;
pub mod spatial;

use std::ops::{Add, AddAssign};

use serde::{Deserialize, Serialize};

pub use polygon::Boundary;
pub use spatial::VertexIndex;

/// A point in document coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const ORIGIN: Point = Point { x: 0.0, y: 0.0 };

    pub const fn new(x: f64, y: f64) -> Self {
        Point { x, y }
    }

    /// Squared Euclidean distance to `other`.
    pub fn distance_sq(self, other: Point) -> f64 {
        let dx = self.x - other.x;
        let dy = self.y - other.y;
        dx * dx + dy * dy
    }

    /// Exact-equality hash key. `-0.0` and `0.0` map to the same key.
    pub fn bits(self) -> (u64, u64) {
        ((self.x + 0.0).to_bits(), (self.y + 0.0).to_bits())
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

impl From<(f64, f64)> for Point {
    fn from((x, y): (f64, f64)) -> Self {
        Point::new(x, y)
    }
}

impl From<[f64; 2]> for Point {
    fn from([x, y]: [f64; 2]) -> Self {
        Point::new(x, y)
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    pub min: Point,
    pub max: Point,
}

impl BoundingBox {
    /// Computes the box enclosing `points`. Returns None for an empty slice.
    pub fn of(points: &[Point]) -> Option<BoundingBox> {
        let first = *points.first()?;
        let mut bbox = BoundingBox {
            min: first,
            max: first,
        };
        for p in &points[1..] {
            bbox.min.x = bbox.min.x.min(p.x);
            bbox.min.y = bbox.min.y.min(p.y);
            bbox.max.x = bbox.max.x.max(p.x);
            bbox.max.y = bbox.max.y.max(p.y);
        }
        Some(bbox)
    }

    /// Grows the box by `margin` on every side.
    pub fn inflate(self, margin: f64) -> BoundingBox {
        BoundingBox {
            min: Point::new(self.min.x - margin, self.min.y - margin),
            max: Point::new(self.max.x + margin, self.max.y + margin),
        }
    }

    /// True if the boxes share at least one point on both axes.
    pub fn overlaps(&self, other: &BoundingBox) -> bool {
        if self.min.x > other.max.x || self.max.x < other.min.x {
            return false;
        }
        if self.min.y > other.max.y || self.max.y < other.min.y {
            return false;
        }
        true
    }
}

/// Arithmetic mean of `points`, or None if empty.
pub fn centroid(points: &[Point]) -> Option<Point> {
    if points.is_empty() {
        return None;
    }
    let n = points.len() as f64;
    let sum = points.iter().fold(Point::ORIGIN, |acc, p| acc + *p);
    Some(Point::new(sum.x / n, sum.y / n))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bits_identify_equal_points() {
        assert_eq!(Point::new(0.0, 1.5).bits(), Point::new(-0.0, 1.5).bits());
        assert_ne!(Point::new(0.0, 1.5).bits(), Point::new(1.5, 0.0).bits());
    }

    #[test]
    fn bounding_box_of_points() {
        let pts = [
            Point::new(3.0, -1.0),
            Point::new(-2.0, 4.0),
            Point::new(1.0, 1.0),
        ];
        let bbox = BoundingBox::of(&pts).unwrap();
        assert_eq!(bbox.min, Point::new(-2.0, -1.0));
        assert_eq!(bbox.max, Point::new(3.0, 4.0));
        assert!(BoundingBox::of(&[]).is_none());
    }

    #[test]
    fn boxes_touching_on_an_edge_overlap() {
        let a = BoundingBox::of(&[Point::new(0.0, 0.0), Point::new(10.0, 10.0)]).unwrap();
        let b = BoundingBox::of(&[Point::new(10.0, 5.0), Point::new(20.0, 15.0)]).unwrap();
        let c = BoundingBox::of(&[Point::new(11.0, 0.0), Point::new(20.0, 10.0)]).unwrap();
        assert!(a.overlaps(&b));
        assert!(!a.overlaps(&c));
        assert!(a.inflate(1.0).overlaps(&c));
    }

    #[test]
    fn centroid_of_square() {
        let sq = [
            Point::new(0.0, 0.0),
            Point::new(4.0, 0.0),
            Point::new(4.0, 4.0),
            Point::new(0.0, 4.0),
        ];
        assert_eq!(centroid(&sq), Some(Point::new(2.0, 2.0)));
        assert_eq!(centroid(&[]), None);
    }
}
