//! Placement hints from the four phantom unit layers.
//!
//! Phantom glyphs are invisible units drawn where a unit in each province
//! (or on each coast) should be rendered, once for its normal position and
//! once for its retreat position.

use crate::board::ProvinceId;
use crate::error::MapError;
use crate::geometry::Point;
use crate::svg::{interpret_path, Element, Layer};

use super::context::ParseContext;
use super::layers::MapLayers;
use super::resident::{assign_residents, AssignmentReport};
use super::units::glyph_path;

/// Which placement point a hint sets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlacementSlot {
    Primary,
    Retreat,
}

impl PlacementSlot {
    pub const fn name(self) -> &'static str {
        match self {
            PlacementSlot::Primary => "primary",
            PlacementSlot::Retreat => "retreat",
        }
    }
}

/// Reads all four phantom layers.
pub fn assign_placements(ctx: &mut ParseContext, layers: &MapLayers) -> Result<AssignmentReport, MapError> {
    let mut report = AssignmentReport::default();
    for (layer, slot) in [
        (&layers.phantom_primary_army, PlacementSlot::Primary),
        (&layers.phantom_retreat_army, PlacementSlot::Retreat),
        (&layers.phantom_primary_fleet, PlacementSlot::Primary),
        (&layers.phantom_retreat_fleet, PlacementSlot::Retreat),
    ] {
        report.merge(assign_layer(ctx, layer, slot)?);
    }
    log::info!("set {} placement points", report.assigned);
    Ok(report)
}

/// Sets one placement slot from every hint on `layer`.
///
/// A labeled hint targets the province or coast its label names, so fleet
/// hints can address a single coast. An unlabeled hint is matched by
/// containment and always sets the province's point.
pub fn assign_layer(ctx: &mut ParseContext, layer: &Layer, slot: PlacementSlot) -> Result<AssignmentReport, MapError> {
    let hints = layer.children().collect::<Result<Vec<_>, _>>()?;
    let (labeled, unlabeled): (Vec<_>, Vec<_>) = hints.into_iter().partition(|(e, _)| e.label().is_some());

    let mut report = AssignmentReport::default();
    for (element, offset) in labeled {
        let Some(point) = hint_anchor(element, offset)? else {
            report.discarded += 1;
            continue;
        };
        let label = element.label().unwrap_or_default();
        let (id, coast) = ctx.map.resolve_location(label)?;
        set_point(ctx, id, coast.as_deref(), slot, point);
        report.assigned += 1;
    }

    let what = format!("{} placement hint", slot.name());
    report.merge(assign_residents(
        ctx,
        &what,
        unlabeled,
        |(element, offset)| hint_anchor(element, *offset),
        |ctx, id, (element, offset)| {
            if let Some(point) = hint_anchor(element, offset)? {
                set_point(ctx, id, None, slot, point);
            }
            Ok(())
        },
    )?);
    Ok(report)
}

/// Position of a hint glyph: the first point of its shape, or the centre of
/// a circle hint.
fn hint_anchor(element: &Element, offset: Point) -> Result<Option<Point>, MapError> {
    if let Some((path, inner)) = glyph_path(element)? {
        if let Some(d) = path.attr("d") {
            return Ok(interpret_path(d, offset + inner)
                .ok()
                .and_then(|points| points.first().copied()));
        }
    }
    let circle = if element.name == "circle" {
        Some((element, Point::ORIGIN))
    } else {
        element.find_descendant("circle")?
    };
    Ok(circle.and_then(|(c, inner)| match (c.number_attr("cx"), c.number_attr("cy")) {
        (Some(cx), Some(cy)) => Some(offset + inner + Point::new(cx, cy)),
        _ => None,
    }))
}

fn set_point(ctx: &mut ParseContext, id: ProvinceId, coast: Option<&str>, slot: PlacementSlot, point: Point) {
    let province = ctx.map.province_mut(id);
    if let Some(coast) = coast.and_then(|suffix| province.coast_mut(suffix)) {
        match slot {
            PlacementSlot::Primary => coast.primary_point = Some(point),
            PlacementSlot::Retreat => coast.retreat_point = Some(point),
        }
        return;
    }
    match slot {
        PlacementSlot::Primary => province.primary_point = Some(point),
        PlacementSlot::Retreat => province.retreat_point = Some(point),
    }
}
