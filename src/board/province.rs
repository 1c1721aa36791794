//! Provinces and their coasts.
//!
//! Provinces live in the `MapGraph` arena and refer to each other by
//! `ProvinceId`, so mutually adjacent provinces never own each other.

use std::collections::BTreeSet;
use std::fmt;

use crate::geometry::Point;

use super::player::PlayerId;
use super::unit::UnitId;

/// Index of a province in the `MapGraph` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ProvinceId(pub u32);

impl ProvinceId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Classifies a province by the layer it was drawn on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ProvinceType {
    Land,
    Island,
    Sea,
}

impl ProvinceType {
    pub const fn name(self) -> &'static str {
        match self {
            ProvinceType::Land => "land",
            ProvinceType::Island => "island",
            ProvinceType::Sea => "sea",
        }
    }

    pub const fn is_sea(self) -> bool {
        matches!(self, ProvinceType::Sea)
    }
}

/// A named coast of a multi-coast province.
///
/// Its adjacency is always a subset of the parent's adjacency.
#[derive(Debug, Clone, PartialEq)]
pub struct Coast {
    /// `"<province name> <suffix>"`.
    pub name: String,
    pub suffix: String,
    pub parent: ProvinceId,
    pub adjacent: BTreeSet<ProvinceId>,
    pub primary_point: Option<Point>,
    pub retreat_point: Option<Point>,
}

impl Coast {
    pub fn new(parent_name: &str, suffix: &str, parent: ProvinceId, adjacent: BTreeSet<ProvinceId>) -> Self {
        Coast {
            name: coast_name(parent_name, suffix),
            suffix: suffix.to_string(),
            parent,
            adjacent,
            primary_point: None,
            retreat_point: None,
        }
    }
}

/// Builds the full name of a coast.
pub fn coast_name(province: &str, suffix: &str) -> String {
    format!("{} {}", province, suffix)
}

/// Splits a location label such as `"Spain (nc)"` into the province name
/// and the coast suffix. Labels without a trailing parenthesized suffix are
/// returned unchanged.
pub fn split_coast_label(label: &str) -> (&str, Option<&str>) {
    let trimmed = label.trim();
    if let Some(inner) = trimmed.strip_suffix(')') {
        if let Some(open) = inner.rfind(" (") {
            let suffix = inner[open + 2..].trim();
            if !suffix.is_empty() {
                return (inner[..open].trim_end(), Some(suffix));
            }
        }
    }
    (trimmed, None)
}

/// A named land, island or sea area.
#[derive(Debug, Clone, PartialEq)]
pub struct Province {
    /// Empty until assigned by label or by the names layer.
    pub name: String,
    pub province_type: ProvinceType,
    /// Closed polygon in document coordinates.
    pub boundary: Vec<Point>,
    pub adjacent: BTreeSet<ProvinceId>,
    /// Present only for provinces with declared or forced coasts.
    pub coasts: Vec<Coast>,
    pub has_supply_center: bool,
    pub owner: Option<PlayerId>,
    pub core_owner: Option<PlayerId>,
    pub occupant: Option<UnitId>,
    pub primary_point: Option<Point>,
    pub retreat_point: Option<Point>,
    /// Additional stacked unit slots for provinces that render several units.
    pub extra_primary_points: Vec<Point>,
    pub extra_retreat_points: Vec<Point>,
}

impl Province {
    /// Creates an unowned, unoccupied province.
    pub fn new(name: impl Into<String>, province_type: ProvinceType, boundary: Vec<Point>) -> Self {
        Province {
            name: name.into(),
            province_type,
            boundary,
            adjacent: BTreeSet::new(),
            coasts: Vec::new(),
            has_supply_center: false,
            owner: None,
            core_owner: None,
            occupant: None,
            primary_point: None,
            retreat_point: None,
            extra_primary_points: Vec::new(),
            extra_retreat_points: Vec::new(),
        }
    }

    pub fn is_named(&self) -> bool {
        !self.name.is_empty()
    }

    pub fn has_coasts(&self) -> bool {
        !self.coasts.is_empty()
    }

    /// Looks up a coast by suffix (`"nc"`) or by full name (`"Spain nc"`).
    pub fn coast(&self, key: &str) -> Option<&Coast> {
        self.coasts.iter().find(|c| c.suffix == key || c.name == key)
    }

    pub fn coast_mut(&mut self, key: &str) -> Option<&mut Coast> {
        self.coasts.iter_mut().find(|c| c.suffix == key || c.name == key)
    }

    /// Coast a fleet is placed on when none was given: the only coast, or
    /// the first by suffix order when there are several.
    pub fn default_fleet_coast(&self) -> Option<&Coast> {
        self.coasts.iter().min_by(|a, b| a.suffix.cmp(&b.suffix))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_labels() {
        assert_eq!(split_coast_label("Spain (nc)"), ("Spain", Some("nc")));
        assert_eq!(split_coast_label("  St. Petersburg (sc) "), ("St. Petersburg", Some("sc")));
        assert_eq!(split_coast_label("Spain"), ("Spain", None));
        assert_eq!(split_coast_label("Weird ()"), ("Weird ()", None));
        assert_eq!(split_coast_label("Cairo (coast #1)"), ("Cairo", Some("coast #1")));
    }

    #[test]
    fn coast_lookup_by_suffix_or_name() {
        let mut p = Province::new("Spain", ProvinceType::Land, Vec::new());
        p.coasts.push(Coast::new("Spain", "sc", ProvinceId(0), BTreeSet::new()));
        p.coasts.push(Coast::new("Spain", "nc", ProvinceId(0), BTreeSet::new()));
        assert_eq!(p.coast("nc").map(|c| c.name.as_str()), Some("Spain nc"));
        assert_eq!(p.coast("Spain sc").map(|c| c.suffix.as_str()), Some("sc"));
        assert!(p.coast("ec").is_none());
        assert_eq!(p.default_fleet_coast().map(|c| c.suffix.as_str()), Some("nc"));
    }

    #[test]
    fn new_province_is_empty() {
        let p = Province::new("", ProvinceType::Sea, Vec::new());
        assert!(!p.is_named());
        assert!(!p.has_coasts());
        assert!(p.province_type.is_sea());
        assert!(p.occupant.is_none());
    }
}
