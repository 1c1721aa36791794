//! Builds provinces from the land, island and sea layers.

use crate::board::{Province, ProvinceId, ProvinceType};
use crate::error::MapError;
use crate::geometry::polygon::distinct_vertex_count;
use crate::svg::{interpret_path, Layer};

use super::context::ParseContext;

/// Creates one province per child element of `layer`.
///
/// The boundary is the element's path translated by the layer's and the
/// element's own transforms. With labeled provinces the name comes from
/// `inkscape:label`; otherwise it is left empty for the names phase.
pub fn assemble_layer(
    ctx: &mut ParseContext,
    layer: &Layer,
    province_type: ProvinceType,
) -> Result<Vec<ProvinceId>, MapError> {
    let mut ids = Vec::new();
    for child in layer.children() {
        let (element, offset) = child?;
        let d = element
            .attr("d")
            .filter(|d| !d.trim().is_empty())
            .ok_or_else(|| MapError::MissingPathData(layer.id.to_string()))?;

        let boundary = interpret_path(d, offset).map_err(|e| MapError::path(d, e))?;
        let distinct = distinct_vertex_count(&boundary);
        if distinct < 3 {
            return Err(MapError::DegenerateBoundary {
                layer: layer.id.to_string(),
                distinct,
            });
        }

        let name = if ctx.config.labeling.provinces {
            element
                .label()
                .ok_or_else(|| MapError::MissingLabel(layer.id.to_string()))?
                .to_string()
        } else {
            String::new()
        };

        let id = ctx.map.add_province(Province::new(name, province_type, boundary));
        if province_type == ProvinceType::Land {
            ctx.land_fills.push((id, element.fill_color()));
        }
        ids.push(id);
    }
    log::info!(
        "assembled {} {} provinces from layer '{}'",
        ids.len(),
        province_type.name(),
        layer.id
    );
    Ok(ids)
}
