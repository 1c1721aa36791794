//! Map configuration.
//!
//! Everything map-specific that is not drawn in the SVG: layer ids, which
//! layers carry Inkscape labels, player colors, unit glyph shapes, declared
//! multi-coast provinces and the adjacency margin. Loaded from JSON; every
//! field has a default so a config file only lists what differs.

use std::collections::{BTreeMap, HashSet};
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::board::CoastTable;
use crate::error::MapError;

/// Default adjacency margin in document units.
pub const DEFAULT_ADJACENCY_MARGIN: f64 = 5.0;

/// Ids of the SVG layer groups the parser reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayerIds {
    pub land: String,
    pub island: String,
    pub island_fill: String,
    pub sea: String,
    pub names: String,
    pub centers: String,
    pub units: String,
    pub phantom_primary_army: String,
    pub phantom_retreat_army: String,
    pub phantom_primary_fleet: String,
    pub phantom_retreat_fleet: String,
}

impl Default for LayerIds {
    fn default() -> Self {
        LayerIds {
            land: "land_provinces".into(),
            island: "island_provinces".into(),
            island_fill: "island_fill".into(),
            sea: "sea_provinces".into(),
            names: "province_names".into(),
            centers: "supply_centers".into(),
            units: "units".into(),
            phantom_primary_army: "phantom_primary_armies".into(),
            phantom_retreat_army: "phantom_retreat_armies".into(),
            phantom_primary_fleet: "phantom_primary_fleets".into(),
            phantom_retreat_fleet: "phantom_retreat_fleets".into(),
        }
    }
}

impl LayerIds {
    /// All ids with a short description, in pipeline order.
    pub fn all(&self) -> [(&'static str, &str); 11] {
        [
            ("land", self.land.as_str()),
            ("island", self.island.as_str()),
            ("island fill", self.island_fill.as_str()),
            ("sea", self.sea.as_str()),
            ("names", self.names.as_str()),
            ("centers", self.centers.as_str()),
            ("units", self.units.as_str()),
            ("phantom primary army", self.phantom_primary_army.as_str()),
            ("phantom retreat army", self.phantom_retreat_army.as_str()),
            ("phantom primary fleet", self.phantom_primary_fleet.as_str()),
            ("phantom retreat fleet", self.phantom_retreat_fleet.as_str()),
        ]
    }
}

/// Which layers identify their province by `inkscape:label` instead of by
/// polygon containment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Labeling {
    pub provinces: bool,
    pub centers: bool,
    pub units: bool,
}

/// A player and the fill color of their territory and units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerColor {
    pub name: String,
    pub color: String,
}

/// Token counts of unit glyph paths, used to tell armies from fleets.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct UnitGlyphs {
    pub army_path_tokens: Vec<usize>,
    pub fleet_path_tokens: Vec<usize>,
}

impl Default for UnitGlyphs {
    fn default() -> Self {
        UnitGlyphs {
            army_path_tokens: vec![6],
            fleet_path_tokens: vec![7],
        }
    }
}

/// Complete parser configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MapConfig {
    pub layers: LayerIds,
    pub labeling: Labeling,
    /// Maximum vertex distance at which two provinces count as adjacent.
    pub adjacency_margin: f64,
    pub parallel_adjacency: bool,
    pub players: Vec<PlayerColor>,
    /// Fill colors that mean "no owner" (neutral territory, blank centers).
    pub neutral_colors: Vec<String>,
    pub unit_glyphs: UnitGlyphs,
    /// Province name → declared coasts, for provinces with several coastlines.
    pub coasts: BTreeMap<String, CoastTable>,
    pub starting_year: u16,
}

impl Default for MapConfig {
    fn default() -> Self {
        MapConfig {
            layers: LayerIds::default(),
            labeling: Labeling::default(),
            adjacency_margin: DEFAULT_ADJACENCY_MARGIN,
            parallel_adjacency: true,
            players: Vec::new(),
            neutral_colors: vec!["none".into()],
            unit_glyphs: UnitGlyphs::default(),
            coasts: BTreeMap::new(),
            starting_year: 1901,
        }
    }
}

impl MapConfig {
    /// Loads and validates a config from a JSON file.
    pub fn load(path: &Path) -> Result<MapConfig, MapError> {
        let data = fs::read_to_string(path)?;
        MapConfig::from_json_str(&data)
    }

    /// Parses and validates a config from a JSON string.
    pub fn from_json_str(json: &str) -> Result<MapConfig, MapError> {
        let config: MapConfig = serde_json::from_str(json)
            .map_err(|e| MapError::Config(format!("failed to parse config JSON: {}", e)))?;
        config.validate()?;
        Ok(config)
    }

    /// Rejects configurations the pipeline cannot run with.
    pub fn validate(&self) -> Result<(), MapError> {
        if !self.adjacency_margin.is_finite() || self.adjacency_margin < 0.0 {
            return Err(MapError::Config(format!(
                "adjacency margin must be a non-negative number, got {}",
                self.adjacency_margin
            )));
        }
        for (what, id) in self.layers.all() {
            if id.trim().is_empty() {
                return Err(MapError::Config(format!("{} layer id is empty", what)));
            }
        }

        let mut colors = HashSet::new();
        let mut names = HashSet::new();
        for p in &self.players {
            if !names.insert(p.name.as_str()) {
                return Err(MapError::Config(format!("duplicate player '{}'", p.name)));
            }
            if !colors.insert(p.color.trim().to_ascii_lowercase()) {
                return Err(MapError::Config(format!("duplicate player color '{}'", p.color)));
            }
        }
        if self.players.len() > u8::MAX as usize {
            return Err(MapError::Config("too many players".into()));
        }
        for c in &self.neutral_colors {
            if colors.contains(&c.trim().to_ascii_lowercase()) {
                return Err(MapError::Config(format!("color '{}' is both neutral and a player", c)));
            }
        }

        let glyphs = &self.unit_glyphs;
        if let Some(n) = glyphs
            .army_path_tokens
            .iter()
            .find(|n| glyphs.fleet_path_tokens.contains(*n))
        {
            return Err(MapError::Config(format!(
                "glyph token count {} is both army and fleet",
                n
            )));
        }
        Ok(())
    }
}
