//! Supply center markers.
//!
//! A marker is a group of circles: the first locates the center, the second
//! (when present) is colored with the core owner's color.

use crate::board::ProvinceId;
use crate::error::MapError;
use crate::geometry::Point;
use crate::svg::{Element, Layer};

use super::context::ParseContext;
use super::resident::{assign_residents, AssignmentReport};

/// Marks every province that has a supply center marker.
///
/// With `labeling.centers` each marker names its province by label;
/// otherwise markers are matched by the position of their first circle.
pub fn assign_supply_centers(ctx: &mut ParseContext, layer: &Layer) -> Result<AssignmentReport, MapError> {
    let markers = layer.children().collect::<Result<Vec<_>, _>>()?;
    let report = if ctx.config.labeling.centers {
        let mut report = AssignmentReport::default();
        for (element, _) in markers {
            let label = element
                .label()
                .ok_or_else(|| MapError::MissingLabel(layer.id.to_string()))?;
            let (id, _) = ctx.map.resolve_location(label)?;
            mark_supply_center(ctx, id, element)?;
            report.assigned += 1;
        }
        report
    } else {
        assign_residents(
            ctx,
            "supply center",
            markers,
            |(element, offset)| marker_anchor(element, *offset),
            |ctx, id, (element, _)| mark_supply_center(ctx, id, element),
        )?
    };
    log::info!("placed {} supply centers", report.assigned);
    Ok(report)
}

/// Center of the marker's first circle, with all translations applied.
fn marker_anchor(element: &Element, offset: Point) -> Result<Option<Point>, MapError> {
    let circle = if element.name == "circle" {
        Some((element, Point::ORIGIN))
    } else {
        element.find_descendant("circle")?
    };
    let Some((circle, inner)) = circle else {
        return Ok(None);
    };
    match (circle.number_attr("cx"), circle.number_attr("cy")) {
        (Some(cx), Some(cy)) => Ok(Some(offset + inner + Point::new(cx, cy))),
        _ => Ok(None),
    }
}

fn mark_supply_center(ctx: &mut ParseContext, id: ProvinceId, marker: &Element) -> Result<(), MapError> {
    let province = ctx.map.province(id);
    if province.has_supply_center {
        return Err(MapError::DuplicateSupplyCenter(province.name.clone()));
    }
    let owner = province.owner;

    // Home centers of owned provinces belong to the owner; otherwise the
    // core color is on the marker's second circle.
    let core = match owner {
        Some(owner) => Some(owner),
        None => {
            let mut circles = Vec::new();
            marker.descendants_named("circle", &mut circles);
            match circles.get(1) {
                Some(circle) => ctx.player_of(circle)?,
                None => None,
            }
        }
    };

    let province = ctx.map.province_mut(id);
    province.has_supply_center = true;
    province.core_owner = core;
    if let Some(owner) = owner {
        ctx.players[owner.index()].centers.insert(id);
    }
    Ok(())
}
