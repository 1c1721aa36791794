//! Containment-based assignment of point items to provinces.
//!
//! Names, supply centers, units, island fills and placement hints all follow
//! the same rule when they carry no label: compute an anchor point, find the
//! province whose boundary strictly contains it, and hand the item to that
//! province. Items outside every province are dropped with a warning.

use crate::board::{MapGraph, ProvinceId};
use crate::error::MapError;
use crate::geometry::{Boundary, Point};

use super::context::ParseContext;

/// Outcome counts of one assignment pass.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AssignmentReport {
    pub assigned: usize,
    /// Anchor resolved but no province contains it.
    pub unmatched: usize,
    /// Anchor could not be resolved.
    pub discarded: usize,
}

impl AssignmentReport {
    pub fn merge(&mut self, other: AssignmentReport) {
        self.assigned += other.assigned;
        self.unmatched += other.unmatched;
        self.discarded += other.discarded;
    }
}

/// Containment polygons of every province, built once per pass.
#[derive(Debug)]
pub struct ProvinceLocator {
    boundaries: Vec<(ProvinceId, Boundary)>,
}

impl ProvinceLocator {
    pub fn new(map: &MapGraph) -> Self {
        let boundaries = map
            .provinces()
            .filter_map(|(id, p)| Boundary::new(&p.boundary).map(|b| (id, b)))
            .collect();
        ProvinceLocator { boundaries }
    }

    /// First province (in id order) whose interior contains `point`.
    pub fn locate(&self, point: Point) -> Option<ProvinceId> {
        self.boundaries
            .iter()
            .find(|(_, b)| b.contains(point))
            .map(|(id, _)| *id)
    }
}

/// Assigns each item to the province containing its anchor.
///
/// `anchor` returns `Ok(None)` for an item whose position cannot be
/// resolved; such items are discarded silently. `assign` is called once per
/// matched item and may fail the whole parse.
pub fn assign_residents<T, A, S>(
    ctx: &mut ParseContext,
    what: &str,
    items: impl IntoIterator<Item = T>,
    mut anchor: A,
    mut assign: S,
) -> Result<AssignmentReport, MapError>
where
    A: FnMut(&T) -> Result<Option<Point>, MapError>,
    S: FnMut(&mut ParseContext, ProvinceId, T) -> Result<(), MapError>,
{
    let locator = ProvinceLocator::new(&ctx.map);
    let mut report = AssignmentReport::default();
    for item in items {
        let Some(point) = anchor(&item)? else {
            report.discarded += 1;
            continue;
        };
        match locator.locate(point) {
            Some(id) => {
                assign(ctx, id, item)?;
                report.assigned += 1;
            }
            None => {
                log::warn!(
                    "{} at ({:.1}, {:.1}) is not inside any province, dropped",
                    what,
                    point.x,
                    point.y
                );
                report.unmatched += 1;
            }
        }
    }
    log::debug!(
        "{}: {} assigned, {} unmatched, {} discarded",
        what,
        report.assigned,
        report.unmatched,
        report.discarded
    );
    Ok(report)
}
