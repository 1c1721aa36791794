//! Province ownership from fill colors.
//!
//! Land provinces carry their owner's color directly. Islands are drawn
//! twice: the outline on the island layer, and a colored fill on a separate
//! layer that is matched back to its island by label or by position.

use crate::error::MapError;
use crate::geometry::{centroid, Point};
use crate::svg::{interpret_path, Element, Layer};

use super::context::ParseContext;
use super::resident::{assign_residents, AssignmentReport};

/// Sets the owner of every land province from its recorded fill, then of
/// every island from the island fill layer.
pub fn assign_owners(ctx: &mut ParseContext, island_fill: &Layer) -> Result<(), MapError> {
    let fills = std::mem::take(&mut ctx.land_fills);
    let mut owned = 0;
    for (id, fill) in &fills {
        let owner = ctx.player_for_color(fill.as_deref())?;
        if owner.is_some() {
            owned += 1;
        }
        ctx.map.province_mut(*id).owner = owner;
    }
    ctx.land_fills = fills;

    let report = assign_island_owners(ctx, island_fill)?;
    log::info!(
        "owners: {} land provinces and {} islands owned",
        owned,
        report.assigned
    );
    Ok(())
}

fn assign_island_owners(ctx: &mut ParseContext, layer: &Layer) -> Result<AssignmentReport, MapError> {
    let children = layer.children().collect::<Result<Vec<_>, _>>()?;
    let (labeled, unlabeled): (Vec<_>, Vec<_>) =
        children.into_iter().partition(|(e, _)| e.label().is_some());

    let mut report = AssignmentReport::default();
    for (element, _) in labeled {
        let name = element.label().unwrap_or_default();
        let id = ctx.map.id_of(name)?;
        let owner = ctx.player_of(element)?;
        ctx.map.province_mut(id).owner = owner;
        report.assigned += 1;
    }

    report.merge(assign_residents(
        ctx,
        "island fill",
        unlabeled,
        |(element, offset)| fill_anchor(element, *offset),
        |ctx, id, (element, _)| {
            let owner = ctx.player_of(element)?;
            ctx.map.province_mut(id).owner = owner;
            Ok(())
        },
    )?);
    Ok(report)
}

/// Centroid of a fill shape's path vertices. Shapes without usable path
/// data have no anchor.
fn fill_anchor(element: &Element, offset: Point) -> Result<Option<Point>, MapError> {
    let Some(d) = element.attr("d") else {
        return Ok(None);
    };
    match interpret_path(d, offset) {
        Ok(points) => Ok(centroid(&points)),
        Err(e) => {
            log::debug!("island fill path ignored: {}", e);
            Ok(None)
        }
    }
}
