//! Hand-authored corrections applied after the generic pipeline.
//!
//! Geometry inference misses a few things on real maps: coasts that are
//! split by a strait too narrow to draw, canal provinces whose banks must
//! not be coast-adjacent, and placement points for provinces whose phantom
//! glyphs are missing. These corrections are data, kept in a versioned JSON
//! table per map and applied through the named hook operations of
//! `MapGraph`.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::{CoastTable, MapGraph};
use crate::error::MapError;
use crate::geometry::Point;

/// Newest override table format this crate understands.
pub const OVERRIDE_TABLE_VERSION: u32 = 1;

/// A correction step run after parsing, before validation.
///
/// Hooks must be idempotent: applying one twice leaves the same map as
/// applying it once.
pub trait OverrideHook {
    fn name(&self) -> &str;
    fn apply(&self, map: &mut MapGraph) -> Result<(), MapError>;
}

/// Forced placement points for a province or coast.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlacementOverride {
    /// Province name, coast label (`"Spain (nc)"`) or coast name (`"Spain nc"`).
    pub target: String,
    #[serde(default)]
    pub primary: Option<Point>,
    #[serde(default)]
    pub retreat: Option<Point>,
    /// Also copy the points onto every coast of the target province.
    #[serde(default)]
    pub include_coasts: bool,
}

/// An additional stacked unit slot.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExtraPlacement {
    pub province: String,
    pub primary: Point,
    pub retreat: Point,
}

/// A map's correction table, loaded from JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct OverrideTable {
    #[serde(default)]
    pub name: String,
    #[serde(default = "default_version")]
    pub version: u32,
    /// Provinces whose coasts are replaced outright.
    #[serde(default)]
    pub coasts: BTreeMap<String, CoastTable>,
    /// Canal provinces: a single forced coast that excludes the canal banks.
    #[serde(default)]
    pub canals: BTreeMap<String, CoastTable>,
    #[serde(default)]
    pub placements: Vec<PlacementOverride>,
    #[serde(default)]
    pub extra_placements: Vec<ExtraPlacement>,
}

fn default_version() -> u32 {
    OVERRIDE_TABLE_VERSION
}

impl OverrideTable {
    /// Loads a table from a JSON file.
    pub fn load(path: &Path) -> Result<OverrideTable, MapError> {
        let data = fs::read_to_string(path)?;
        OverrideTable::from_json_str(&data)
    }

    /// Parses a table from a JSON string, rejecting newer formats.
    pub fn from_json_str(json: &str) -> Result<OverrideTable, MapError> {
        let table: OverrideTable = serde_json::from_str(json)
            .map_err(|e| MapError::Config(format!("failed to parse override table JSON: {}", e)))?;
        if table.version > OVERRIDE_TABLE_VERSION {
            return Err(MapError::Config(format!(
                "override table version {} is newer than supported version {}",
                table.version, OVERRIDE_TABLE_VERSION
            )));
        }
        Ok(table)
    }

    /// Total number of corrections in the table.
    pub fn len(&self) -> usize {
        self.coasts.len() + self.canals.len() + self.placements.len() + self.extra_placements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl OverrideHook for OverrideTable {
    fn name(&self) -> &str {
        if self.name.is_empty() {
            "override table"
        } else {
            self.name.as_str()
        }
    }

    fn apply(&self, map: &mut MapGraph) -> Result<(), MapError> {
        for (province, table) in self.coasts.iter().chain(&self.canals) {
            map.force_coasts(province, table)?;
        }
        for p in &self.placements {
            map.force_placement(&p.target, p.primary, p.retreat)?;
            if p.include_coasts {
                let (id, _) = map.resolve_location(&p.target)?;
                let coasts: Vec<String> = map.province(id).coasts.iter().map(|c| c.name.clone()).collect();
                for coast in coasts {
                    map.force_placement(&coast, p.primary, p.retreat)?;
                }
            }
        }
        for extra in &self.extra_placements {
            map.add_extra_placement(&extra.province, extra.primary, extra.retreat)?;
        }
        log::debug!("{}: applied {} corrections", self.name(), self.len());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::board::{Province, ProvinceType};

    fn tri(name: &str, x: f64) -> Province {
        Province::new(
            name,
            ProvinceType::Land,
            vec![Point::new(x, 0.0), Point::new(x + 1.0, 0.0), Point::new(x, 1.0)],
        )
    }

    fn map() -> MapGraph {
        let mut map = MapGraph::new();
        let kiel = map.add_province(tri("Kiel", 0.0));
        for (i, name) in ["Wadden Sea", "Copenhagen", "Berlin"].iter().enumerate() {
            let id = map.add_province(tri(name, i as f64 + 1.0));
            map.add_adjacency(kiel, id);
        }
        map
    }

    const TABLE: &str = r#"{
        "name": "test",
        "version": 1,
        "canals": { "Kiel": { "coast #1": ["Wadden Sea", "Copenhagen"] } },
        "placements": [
            { "target": "Kiel", "primary": { "x": 1, "y": 2 } },
            { "target": "Kiel coast #1", "retreat": { "x": 3, "y": 4 } }
        ],
        "extra_placements": [
            { "province": "Berlin", "primary": { "x": 5, "y": 6 }, "retreat": { "x": 7, "y": 8 } }
        ]
    }"#;

    #[test]
    fn parses_table() {
        let table = OverrideTable::from_json_str(TABLE).unwrap();
        assert_eq!(table.name(), "test");
        assert_eq!(table.len(), 4);
        assert!(table.coasts.is_empty());
        assert_eq!(table.placements[0].retreat, None);
    }

    #[test]
    fn missing_fields_default() {
        let table = OverrideTable::from_json_str("{}").unwrap();
        assert!(table.is_empty());
        assert_eq!(table.version, OVERRIDE_TABLE_VERSION);
        assert_eq!(table.name(), "override table");
    }

    #[test]
    fn rejects_newer_version() {
        assert!(matches!(
            OverrideTable::from_json_str(r#"{ "version": 99 }"#),
            Err(MapError::Config(_))
        ));
    }

    #[test]
    fn applies_canal_and_placements() {
        let table = OverrideTable::from_json_str(TABLE).unwrap();
        let mut map = map();
        table.apply(&mut map).unwrap();

        let kiel = map.get("Kiel").unwrap();
        assert_eq!(kiel.coasts.len(), 1);
        let coast = kiel.coast("coast #1").unwrap();
        assert_eq!(coast.name, "Kiel coast #1");
        assert_eq!(coast.adjacent.len(), 2);
        assert_eq!(coast.retreat_point, Some(Point::new(3.0, 4.0)));
        assert_eq!(kiel.primary_point, Some(Point::new(1.0, 2.0)));
        // Province adjacency itself is untouched.
        assert_eq!(kiel.adjacent.len(), 3);

        let berlin = map.get("Berlin").unwrap();
        assert_eq!(berlin.extra_primary_points, vec![Point::new(5.0, 6.0)]);
    }

    #[test]
    fn placement_can_include_coasts() {
        let table = OverrideTable::from_json_str(
            r#"{
                "coasts": { "Kiel": { "ec": ["Berlin"] } },
                "placements": [
                    { "target": "Kiel", "primary": { "x": 1, "y": 2 }, "retreat": { "x": 3, "y": 4 }, "include_coasts": true },
                    { "target": "Berlin", "primary": { "x": 9, "y": 9 } }
                ]
            }"#,
        )
        .unwrap();
        let mut map = map();
        table.apply(&mut map).unwrap();

        let coast = map.get("Kiel").unwrap().coast("ec").unwrap();
        assert_eq!(coast.primary_point, Some(Point::new(1.0, 2.0)));
        assert_eq!(coast.retreat_point, Some(Point::new(3.0, 4.0)));
        // Without coasts the flag only touches the province.
        assert_eq!(map.get("Berlin").unwrap().primary_point, Some(Point::new(9.0, 9.0)));
    }

    #[test]
    fn applying_twice_is_a_no_op() {
        let table = OverrideTable::from_json_str(TABLE).unwrap();
        let mut once = map();
        table.apply(&mut once).unwrap();
        let mut twice = once.clone();
        table.apply(&mut twice).unwrap();
        assert_eq!(once, twice);
    }

    #[test]
    fn bundled_table_deserializes() {
        let table = OverrideTable::from_json_str(include_str!("../data/helladip_overrides.json")).unwrap();
        assert_eq!(table.name(), "helladip");
        assert_eq!(table.coasts["CRIM"].len(), 3);
        assert!(table.coasts["DELP"]["sc"].is_empty());
        assert_eq!(table.canals.len(), 3);
        assert_eq!(table.extra_placements.len(), 11);
        let npo1 = &table.extra_placements[0];
        assert_eq!(npo1.province, "NPO1");
        assert!((npo1.primary.x - 3990.4915).abs() < 1e-9);
        let imerina = table.placements.iter().find(|p| p.target == "Imerina").unwrap();
        assert!(imerina.include_coasts);
        assert!(table.placements.iter().filter(|p| p.target != "Imerina").all(|p| !p.include_coasts));
    }
}
