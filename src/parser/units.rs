//! Starting units from the unit glyph layer.
//!
//! Each glyph is a group whose first path is the unit shape. The shape's
//! token count tells armies from fleets, its fill color names the owner, and
//! its first point is the glyph's anchor.

use crate::board::{ProvinceId, Unit, UnitType};
use crate::config::UnitGlyphs;
use crate::error::MapError;
use crate::geometry::Point;
use crate::svg::{interpret_path, Element, Layer};

use super::context::ParseContext;
use super::resident::{assign_residents, AssignmentReport};

/// First `path` of a glyph (the glyph itself if it is a path) with its
/// translation relative to the glyph.
pub fn glyph_path(element: &Element) -> Result<Option<(&Element, Point)>, MapError> {
    if element.name == "path" {
        return Ok(Some((element, Point::ORIGIN)));
    }
    element.find_descendant("path")
}

/// Classifies a glyph path by its whitespace-separated token count.
pub fn unit_type_of(d: &str, glyphs: &UnitGlyphs) -> Result<UnitType, MapError> {
    let tokens = d.split_whitespace().count();
    if glyphs.army_path_tokens.contains(&tokens) {
        Ok(UnitType::Army)
    } else if glyphs.fleet_path_tokens.contains(&tokens) {
        Ok(UnitType::Fleet)
    } else {
        Err(MapError::UnknownUnitGlyph(tokens))
    }
}

/// Places every unit on the glyph layer.
///
/// With `labeling.units` each glyph names its province (and optionally the
/// coast, `"Spain (nc)"`) by label; otherwise glyphs are matched by the
/// position of the first point of their shape.
pub fn assign_units(ctx: &mut ParseContext, layer: &Layer) -> Result<AssignmentReport, MapError> {
    let glyphs = layer.children().collect::<Result<Vec<_>, _>>()?;
    let report = if ctx.config.labeling.units {
        let mut report = AssignmentReport::default();
        for (element, _) in glyphs {
            let label = element
                .label()
                .ok_or_else(|| MapError::MissingLabel(layer.id.to_string()))?;
            let (id, coast) = ctx.map.resolve_location(label)?;
            place_glyph(ctx, id, coast, element)?;
            report.assigned += 1;
        }
        report
    } else {
        assign_residents(
            ctx,
            "unit",
            glyphs,
            |(element, offset)| glyph_anchor(element, *offset),
            |ctx, id, (element, _)| place_glyph(ctx, id, None, element),
        )?
    };
    log::info!("placed {} units", report.assigned);
    Ok(report)
}

fn glyph_anchor(element: &Element, offset: Point) -> Result<Option<Point>, MapError> {
    let Some((path, inner)) = glyph_path(element)? else {
        return Ok(None);
    };
    let Some(d) = path.attr("d") else {
        return Ok(None);
    };
    match interpret_path(d, offset + inner) {
        Ok(points) => Ok(points.first().copied()),
        Err(e) => {
            log::debug!("unit glyph path ignored: {}", e);
            Ok(None)
        }
    }
}

fn place_glyph(
    ctx: &mut ParseContext,
    id: ProvinceId,
    coast: Option<String>,
    glyph: &Element,
) -> Result<(), MapError> {
    let province_name = || ctx.map.province(id).name.clone();
    let (path, _) = glyph_path(glyph)?.ok_or_else(|| MapError::MissingPathData(province_name()))?;
    let d = path
        .attr("d")
        .ok_or_else(|| MapError::MissingPathData(province_name()))?;
    let unit_type = unit_type_of(d, &ctx.config.unit_glyphs)?;
    let owner = ctx
        .player_of(path)?
        .ok_or_else(|| MapError::UnownedUnit(province_name()))?;

    let unit_id = ctx.map.place_unit(Unit {
        unit_type,
        owner,
        province: id,
        coast,
    })?;
    ctx.players[owner.index()].units.push(unit_id);
    log::debug!(
        "{} {} in {}",
        ctx.player_name(Some(owner)),
        unit_type.name(),
        ctx.map.province(id).name
    );
    Ok(())
}
