//! KD-tree over a province's boundary vertices.

use std::collections::HashSet;

use kiddo::{KdTree, SquaredEuclidean};

use super::Point;

/// Read-only spatial index over one boundary's vertices.
#[derive(Debug, Clone)]
pub struct VertexIndex {
    tree: KdTree<f64, 2>,
    len: usize,
}

impl VertexIndex {
    /// Builds an index over `vertices`. Exact duplicates (for example the
    /// closing vertex of a ring) are indexed once.
    pub fn new(vertices: &[Point]) -> Self {
        let mut seen = HashSet::with_capacity(vertices.len());
        let entries: Vec<[f64; 2]> = vertices
            .iter()
            .filter(|v| seen.insert(v.bits()))
            .map(|v| [v.x, v.y])
            .collect();
        let tree: KdTree<f64, 2> = (&entries).into();
        VertexIndex {
            tree,
            len: entries.len(),
        }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Squared distance from `query` to the nearest indexed vertex.
    pub fn nearest_distance_sq(&self, query: Point) -> Option<f64> {
        if self.is_empty() {
            return None;
        }
        let nearest = self.tree.nearest_one::<SquaredEuclidean>(&[query.x, query.y]);
        Some(nearest.distance)
    }

    /// True if any indexed vertex lies within `radius` of `query`
    /// (inclusive: a vertex exactly `radius` away counts).
    pub fn any_within(&self, query: Point, radius: f64) -> bool {
        match self.nearest_distance_sq(query) {
            Some(d) => d <= radius * radius,
            None => false,
        }
    }
}
