//! Province boundary polygons and point containment.

use std::collections::HashSet;

use geo::{Contains, LineString, Polygon};

use super::{BoundingBox, Point};

/// A closed province boundary prepared for containment queries.
#[derive(Debug, Clone)]
pub struct Boundary {
    polygon: Polygon<f64>,
    bbox: BoundingBox,
}

impl Boundary {
    /// Builds a boundary from an ordered vertex list. The ring is closed
    /// automatically if the last vertex differs from the first.
    pub fn new(vertices: &[Point]) -> Option<Boundary> {
        let bbox = BoundingBox::of(vertices)?;
        let ring: LineString<f64> = vertices.iter().map(|p| (p.x, p.y)).collect();
        Some(Boundary {
            polygon: Polygon::new(ring, vec![]),
            bbox,
        })
    }

    /// True if `point` lies strictly inside the boundary. Points on an edge
    /// are not contained.
    pub fn contains(&self, point: Point) -> bool {
        if point.x < self.bbox.min.x
            || point.x > self.bbox.max.x
            || point.y < self.bbox.min.y
            || point.y > self.bbox.max.y
        {
            return false;
        }
        self.polygon.contains(&geo::Point::new(point.x, point.y))
    }

    pub fn bbox(&self) -> BoundingBox {
        self.bbox
    }
}

/// Number of distinct vertices, ignoring exact repeats such as the closing point.
pub fn distinct_vertex_count(vertices: &[Point]) -> usize {
    vertices
        .iter()
        .map(|v| v.bits())
        .collect::<HashSet<_>>()
        .len()
}
