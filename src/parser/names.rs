//! Assigns province names from the text labels of the names layer.

use crate::error::MapError;
use crate::geometry::Point;
use crate::svg::{Element, Layer};

use super::context::ParseContext;
use super::resident::{assign_residents, AssignmentReport};

/// Text shown by a name label: its first `tspan` if it has one, otherwise
/// its own text. Whitespace is trimmed.
pub fn label_text(element: &Element) -> String {
    let mut spans = Vec::new();
    element.descendants_named("tspan", &mut spans);
    let text = match spans.first() {
        Some(span) => span.text_content(),
        None => element.text_content(),
    };
    text.trim().to_string()
}

/// Anchor of a text label: its `x`/`y` attributes, or those of its first
/// `tspan` when the text element has none.
fn label_anchor(element: &Element, offset: Point) -> Result<Option<Point>, MapError> {
    if let (Some(x), Some(y)) = (element.number_attr("x"), element.number_attr("y")) {
        return Ok(Some(offset + Point::new(x, y)));
    }
    let Some((span, inner)) = element.find_descendant("tspan")? else {
        return Ok(None);
    };
    match (span.number_attr("x"), span.number_attr("y")) {
        (Some(x), Some(y)) => Ok(Some(offset + inner + Point::new(x, y))),
        _ => Ok(None),
    }
}

/// Names every province containing a label. A province that receives two
/// labels is an error.
pub fn assign_names(ctx: &mut ParseContext, layer: &Layer) -> Result<AssignmentReport, MapError> {
    let labels = layer.children().collect::<Result<Vec<_>, _>>()?;
    let report = assign_residents(
        ctx,
        "province name",
        labels,
        |(element, offset)| {
            if label_text(element).is_empty() {
                return Ok(None);
            }
            label_anchor(element, *offset)
        },
        |ctx, id, (element, _)| {
            let name = label_text(element);
            let province = ctx.map.province_mut(id);
            if province.is_named() {
                return Err(MapError::DuplicateName {
                    existing: province.name.clone(),
                    new: name,
                });
            }
            province.name = name;
            Ok(())
        },
    )?;
    log::info!("named {} provinces", report.assigned);
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Province, ProvinceType};
    use crate::config::MapConfig;
    use crate::svg::Document;

    fn square(x: f64, size: f64) -> Vec<Point> {
        vec![
            Point::new(x, 0.0),
            Point::new(x + size, 0.0),
            Point::new(x + size, size),
            Point::new(x, size),
            Point::new(x, 0.0),
        ]
    }

    #[test]
    fn text_prefers_first_tspan() {
        let doc = Document::parse(
            r#"<svg><text><tspan>  Paris </tspan><tspan>ignored</tspan></text></svg>"#,
        )
        .unwrap();
        assert_eq!(label_text(&doc.root.children[0]), "Paris");
    }

    #[test]
    fn text_keeps_escaped_characters_and_inner_spaces() {
        let doc = Document::parse(
            r#"<svg><text>
                 <tspan> Bosnia &amp; Herzegovina </tspan>
               </text></svg>"#,
        )
        .unwrap();
        assert_eq!(label_text(&doc.root.children[0]), "Bosnia & Herzegovina");
    }

    #[test]
    fn names_by_containment_with_translation() {
        let doc = Document::parse(
            r#"<svg><g id="names" transform="translate(10,0)">
                 <text x="-5" y="5"><tspan>West</tspan></text>
                 <text><tspan x="5" y="5">East</tspan></text>
                 <text x="500" y="500">Lost</text>
                 <text x="1" y="1">   </text>
               </g></svg>"#,
        )
        .unwrap();
        let config = MapConfig::default();
        let mut ctx = ParseContext::new(&config);
        let west = ctx.map.add_province(Province::new("", ProvinceType::Land, square(0.0, 10.0)));
        let east = ctx.map.add_province(Province::new("", ProvinceType::Sea, square(10.0, 10.0)));

        let report = assign_names(&mut ctx, &doc.layer("names").unwrap()).unwrap();
        assert_eq!(ctx.map.province(west).name, "West");
        assert_eq!(ctx.map.province(east).name, "East");
        assert_eq!(report.assigned, 2);
        assert_eq!(report.unmatched, 1);
        assert_eq!(report.discarded, 1);
    }

    #[test]
    fn second_name_for_a_province_is_fatal() {
        let doc = Document::parse(
            r#"<svg><g id="names"><text x="2" y="2">One</text><text x="8" y="8">Two</text></g></svg>"#,
        )
        .unwrap();
        let config = MapConfig::default();
        let mut ctx = ParseContext::new(&config);
        ctx.map.add_province(Province::new("", ProvinceType::Land, square(0.0, 10.0)));
        let err = assign_names(&mut ctx, &doc.layer("names").unwrap()).unwrap_err();
        assert!(matches!(
            err,
            MapError::DuplicateName { existing, new } if existing == "One" && new == "Two"
        ));
    }
}
