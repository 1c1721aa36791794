//! Shared map fixture for the integration tests.
//!
//! Six 50x50 provinces on a 3x2 grid:
//!
//! ```text
//!   Spain  | Paris | Bay
//!   -------+-------+--------
//!   Rome   | Gulf  | Corsica
//! ```
//!
//! Spain, Paris and Rome are land, Corsica an island, Bay and Gulf seas.
//! Paris has a north coast on Bay and a south coast on Gulf. Spain and Paris
//! belong to France, Corsica to Italy; Rome is neutral with an Italian core.
//! France has an army in Spain and a fleet in Paris, Italy a fleet in Gulf.
//!
//! The sea layer is translated by (50, 0), one unit glyph by (10, 10).
//! Rome is drawn as `m x,y dx,dy ... z`, the rest with absolute `H`/`V`.
//! `<!--land-->`, `<!--centers-->` and `<!--units-->` mark where tests may
//! splice in extra elements.

#![allow(dead_code)]

use cartographer::config::{Labeling, PlayerColor};
use cartographer::MapConfig;

pub const FRANCE: &str = "#0000ff";
pub const ITALY: &str = "#00ff00";

pub const ARMY_GLYPH: &str = "2,0 0,2 -2,0 z";
pub const FLEET_GLYPH: &str = "2,0 0,2 -2,0 0,-1 z";

pub fn rect(x: f64, y: f64, w: f64, h: f64) -> String {
    format!("M{},{} H{} V{} H{} Z", x, y, x + w, y + h, x)
}

fn label_attr(label: &str, labeled: bool) -> String {
    if labeled {
        format!(r#" inkscape:label="{}""#, label)
    } else {
        String::new()
    }
}

fn province(name: &str, d: &str, fill: &str, labeled: bool) -> String {
    format!(
        r#"<path d="{}" style="fill:{};stroke:#000000"{}/>"#,
        d,
        fill,
        label_attr(name, labeled)
    )
}

fn name_text(name: &str, x: f64, y: f64) -> String {
    format!(r#"<text x="{}" y="{}"><tspan>{}</tspan></text>"#, x, y, name)
}

pub fn center(label: &str, cx: f64, cy: f64, core: &str, labeled: bool) -> String {
    format!(
        r##"<g{}><circle cx="{cx}" cy="{cy}" r="4" fill="#000000"/><circle cx="{cx}" cy="{cy}" r="2" fill="{}"/></g>"##,
        label_attr(label, labeled),
        core,
        cx = cx,
        cy = cy
    )
}

pub fn unit(label: &str, x: f64, y: f64, glyph: &str, owner: &str, labeled: bool) -> String {
    format!(
        r#"<g{}><path d="m {},{} {}" fill="{}"/></g>"#,
        label_attr(label, labeled),
        x,
        y,
        glyph,
        owner
    )
}

/// The fixture document. With `labeled`, every province, supply center and
/// unit carries an `inkscape:label` naming its location.
pub fn map_svg(labeled: bool) -> String {
    let land = [
        province("Spain", &rect(0.0, 0.0, 50.0, 50.0), FRANCE, labeled),
        province("Paris", &rect(50.0, 0.0, 50.0, 50.0), FRANCE, labeled),
        // Inkscape's default form: relative move followed by bare pairs.
        province("Rome", "m 0,50 50,0 0,50 -50,0 z", "none", labeled),
    ]
    .concat();
    let island = province("Corsica", &rect(100.0, 50.0, 50.0, 50.0), "#ffffff", labeled);
    let island_fill = province("Corsica", &rect(102.0, 52.0, 46.0, 46.0), ITALY, labeled);
    let sea = [
        province("Bay", &rect(50.0, 0.0, 50.0, 50.0), "none", labeled),
        province("Gulf", &rect(0.0, 50.0, 50.0, 50.0), "none", labeled),
    ]
    .concat();
    let names = [
        name_text("Spain", 10.0, 40.0),
        name_text("Paris", 60.0, 40.0),
        name_text("Rome", 10.0, 90.0),
        name_text("Gulf", 60.0, 90.0),
        name_text("Bay", 110.0, 40.0),
        name_text("Corsica", 110.0, 90.0),
        name_text("Nowhere", 500.0, 500.0),
    ]
    .concat();
    let centers = [
        center("Paris", 75.0, 25.0, "none", labeled),
        center("Rome", 25.0, 75.0, ITALY, labeled),
        center("Corsica", 125.0, 75.0, ITALY, labeled),
    ]
    .concat();
    let units = [
        unit("Spain", 20.0, 20.0, ARMY_GLYPH, FRANCE, labeled),
        unit("Paris (sc)", 80.0, 20.0, FLEET_GLYPH, FRANCE, labeled),
        format!(
            r#"<g transform="translate(10,10)"{}><path d="m 65,65 {}" fill="{}"/></g>"#,
            label_attr("Gulf", labeled),
            FLEET_GLYPH,
            ITALY
        ),
    ]
    .concat();
    let primary_fleets = r#"<g><path d="m 125,25 1,1 z"/></g>"#;
    let retreat_fleets = r#"<g inkscape:label="Paris (sc)"><path d="m 90,45 1,1 z"/></g>"#;

    format!(
        r##"<?xml version="1.0" encoding="UTF-8"?>
<svg xmlns="http://www.w3.org/2000/svg"
     xmlns:inkscape="http://www.inkscape.org/namespaces/inkscape"
     width="150" height="100">
  <g id="map">
    <g id="land_provinces" inkscape:label="Land">{land}<!--land--></g>
    <g id="island_provinces">{island}</g>
    <g id="island_fill">{island_fill}</g>
    <g id="sea_provinces" transform="translate(50,0)">{sea}</g>
    <g id="province_names">{names}</g>
    <g id="supply_centers">{centers}<!--centers--></g>
    <g id="units">{units}<!--units--></g>
    <g id="phantom_primary_armies"><g><path d="m 30,30 1,1 z"/></g></g>
    <g id="phantom_retreat_armies"/>
    <g id="phantom_primary_fleets">{primary_fleets}</g>
    <g id="phantom_retreat_fleets">{retreat_fleets}</g>
  </g>
</svg>
"##,
        land = land,
        island = island,
        island_fill = island_fill,
        sea = sea,
        names = names,
        centers = centers,
        units = units,
        primary_fleets = primary_fleets,
        retreat_fleets = retreat_fleets,
    )
}

pub fn config(labeled: bool) -> MapConfig {
    let mut config = MapConfig {
        players: vec![
            PlayerColor { name: "France".into(), color: FRANCE.into() },
            PlayerColor { name: "Italy".into(), color: ITALY.into() },
        ],
        neutral_colors: vec!["none".into(), "#ffffff".into()],
        labeling: Labeling {
            provinces: labeled,
            centers: labeled,
            units: labeled,
        },
        ..MapConfig::default()
    };
    config.coasts.insert(
        "Paris".into(),
        [
            ("nc".to_string(), vec!["Bay".to_string()]),
            ("sc".to_string(), vec!["Gulf".to_string()]),
        ]
        .into_iter()
        .collect(),
    );
    config
}
