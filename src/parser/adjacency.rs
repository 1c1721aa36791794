//! Geometric adjacency detection.
//!
//! Two provinces are adjacent when some vertex of one lies within the margin
//! of some vertex of the other. Pairs whose margin-inflated bounding boxes
//! do not overlap cannot qualify and are skipped; the remaining pairs are
//! checked with a KD-tree, in parallel when enabled.

use rayon::prelude::*;

use crate::board::{MapGraph, ProvinceId};
use crate::config::MapConfig;
use crate::geometry::{BoundingBox, Point, VertexIndex};

/// One province prepared for proximity queries.
struct Footprint<'m> {
    id: ProvinceId,
    vertices: &'m [Point],
    bbox: BoundingBox,
    index: VertexIndex,
}

/// Finds adjacent province pairs by boundary proximity.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AdjacencyDetector {
    pub margin: f64,
    pub parallel: bool,
}

impl AdjacencyDetector {
    pub fn new(margin: f64) -> Self {
        AdjacencyDetector {
            margin,
            parallel: true,
        }
    }

    pub fn from_config(config: &MapConfig) -> Self {
        AdjacencyDetector {
            margin: config.adjacency_margin,
            parallel: config.parallel_adjacency,
        }
    }

    /// Returns every adjacent pair, each ordered `(a, b)` with `a`'s name
    /// sorting before `b`'s, sorted by id.
    pub fn detect(&self, map: &MapGraph) -> Vec<(ProvinceId, ProvinceId)> {
        let mut footprints: Vec<Footprint> = map
            .provinces()
            .filter_map(|(id, p)| {
                let bbox = BoundingBox::of(&p.boundary)?;
                Some(Footprint {
                    id,
                    vertices: &p.boundary,
                    bbox,
                    index: VertexIndex::new(&p.boundary),
                })
            })
            .collect();
        footprints.sort_by(|a, b| map.province(a.id).name.cmp(&map.province(b.id).name));

        let mut candidates = Vec::new();
        for i in 0..footprints.len() {
            let reach = footprints[i].bbox.inflate(self.margin);
            for j in i + 1..footprints.len() {
                if reach.overlaps(&footprints[j].bbox) {
                    candidates.push((i, j));
                }
            }
        }
        let total = footprints.len() * footprints.len().saturating_sub(1) / 2;
        log::debug!(
            "adjacency: {} of {} pairs survive bounding-box pruning",
            candidates.len(),
            total
        );

        let touching = |&(i, j): &(usize, usize)| {
            touches(&footprints[i], &footprints[j], self.margin)
        };
        let hits: Vec<(usize, usize)> = if self.parallel {
            candidates.into_par_iter().filter(touching).collect()
        } else {
            candidates.into_iter().filter(touching).collect()
        };

        let mut pairs: Vec<(ProvinceId, ProvinceId)> = hits
            .into_iter()
            .map(|(i, j)| (footprints[i].id, footprints[j].id))
            .collect();
        pairs.sort();
        pairs
    }

    /// Detects adjacencies and records them on `map`. Returns the number of
    /// new edges.
    pub fn apply(&self, map: &mut MapGraph) -> usize {
        let pairs = self.detect(map);
        let added = pairs
            .into_iter()
            .filter(|&(a, b)| map.add_adjacency(a, b))
            .count();
        log::info!(
            "detected {} adjacencies (margin {})",
            added,
            self.margin
        );
        added
    }
}

/// True if some vertex of `b` lies within `margin` of a vertex of `a`.
fn touches(a: &Footprint, b: &Footprint, margin: f64) -> bool {
    b.vertices.iter().any(|v| a.index.any_within(*v, margin))
}
