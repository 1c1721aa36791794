//! The province graph arena.
//!
//! `MapGraph` owns every province (and through them every coast) and every
//! unit. Everything else refers to them by id. Name lookups go through an
//! index that is built once all provinces have been named.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use crate::error::MapError;
use crate::geometry::polygon::distinct_vertex_count;
use crate::geometry::Point;

use super::province::{split_coast_label, Coast, Province, ProvinceId};
use super::unit::{Unit, UnitId, UnitType};

/// Coast suffix → names of the provinces reachable from that coast.
pub type CoastTable = BTreeMap<String, Vec<String>>;

/// Arena of provinces and units with a name index.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MapGraph {
    provinces: Vec<Province>,
    units: Vec<Unit>,
    name_index: HashMap<String, ProvinceId>,
}

impl MapGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a province and returns its id. Named provinces are indexed
    /// immediately; unnamed ones once `index_names` runs.
    pub fn add_province(&mut self, province: Province) -> ProvinceId {
        let id = ProvinceId(self.provinces.len() as u32);
        if province.is_named() {
            self.name_index.entry(province.name.clone()).or_insert(id);
        }
        self.provinces.push(province);
        id
    }

    pub fn len(&self) -> usize {
        self.provinces.len()
    }

    pub fn is_empty(&self) -> bool {
        self.provinces.is_empty()
    }

    pub fn province(&self, id: ProvinceId) -> &Province {
        &self.provinces[id.index()]
    }

    pub fn province_mut(&mut self, id: ProvinceId) -> &mut Province {
        &mut self.provinces[id.index()]
    }

    /// Iterates provinces in id order.
    pub fn provinces(&self) -> impl Iterator<Item = (ProvinceId, &Province)> {
        self.provinces
            .iter()
            .enumerate()
            .map(|(i, p)| (ProvinceId(i as u32), p))
    }

    /// Rebuilds the name index, failing on unnamed or duplicate provinces.
    pub fn index_names(&mut self) -> Result<(), MapError> {
        let mut index = HashMap::with_capacity(self.provinces.len());
        for (id, province) in self.provinces() {
            if !province.is_named() {
                return Err(MapError::UnnamedProvince(id.0));
            }
            if index.insert(province.name.clone(), id).is_some() {
                return Err(MapError::DuplicateProvince(province.name.clone()));
            }
        }
        self.name_index = index;
        Ok(())
    }

    /// Looks up a province id by exact name.
    pub fn id_of(&self, name: &str) -> Result<ProvinceId, MapError> {
        self.name_index
            .get(name)
            .copied()
            .ok_or_else(|| MapError::UnknownProvince(name.to_string()))
    }

    pub fn get(&self, name: &str) -> Option<&Province> {
        self.name_index.get(name).map(|id| self.province(*id))
    }

    /// Resolves a location label to a province and optional coast suffix.
    ///
    /// Accepts a province name (`"Spain"`), a coast label (`"Spain (nc)"`)
    /// or a full coast name (`"Spain nc"`).
    pub fn resolve_location(&self, label: &str) -> Result<(ProvinceId, Option<String>), MapError> {
        let label = label.trim();
        if let Some(&id) = self.name_index.get(label) {
            return Ok((id, None));
        }

        let (name, suffix) = split_coast_label(label);
        if let Some(suffix) = suffix {
            let id = self.id_of(name)?;
            if self.province(id).coast(suffix).is_none() {
                return Err(MapError::UnknownCoast {
                    province: name.to_string(),
                    suffix: suffix.to_string(),
                });
            }
            return Ok((id, Some(suffix.to_string())));
        }

        for (id, province) in self.provinces() {
            if let Some(coast) = province.coasts.iter().find(|c| c.name == label) {
                return Ok((id, Some(coast.suffix.clone())));
            }
        }
        Err(MapError::UnknownProvince(label.to_string()))
    }

    /// Records a symmetric adjacency. Self-adjacency is ignored.
    /// Returns true if the edge is new.
    pub fn add_adjacency(&mut self, a: ProvinceId, b: ProvinceId) -> bool {
        if a == b {
            return false;
        }
        let added = self.provinces[a.index()].adjacent.insert(b);
        self.provinces[b.index()].adjacent.insert(a);
        added
    }

    pub fn are_adjacent(&self, a: ProvinceId, b: ProvinceId) -> bool {
        self.province(a).adjacent.contains(&b)
    }

    /// Number of undirected adjacency edges.
    pub fn edge_count(&self) -> usize {
        self.provinces.iter().map(|p| p.adjacent.len()).sum::<usize>() / 2
    }

    /// Replaces a province's coasts with one coast per table entry.
    ///
    /// Every listed province must already be adjacent to `id`. Placement
    /// points of a coast whose suffix survives the replacement are kept,
    /// and fleets on the province are moved onto a valid coast.
    pub fn set_coasts(&mut self, id: ProvinceId, table: &CoastTable) -> Result<(), MapError> {
        let parent_name = self.province(id).name.clone();
        let mut coasts = Vec::with_capacity(table.len());
        for (suffix, names) in table {
            let mut adjacent = BTreeSet::new();
            for name in names {
                let other = self.id_of(name)?;
                if !self.are_adjacent(id, other) {
                    return Err(MapError::CoastNotAdjacent {
                        coast: super::province::coast_name(&parent_name, suffix),
                        adjacent: name.clone(),
                    });
                }
                adjacent.insert(other);
            }
            let mut coast = Coast::new(&parent_name, suffix, id, adjacent);
            if let Some(previous) = self.province(id).coast(suffix) {
                coast.primary_point = previous.primary_point;
                coast.retreat_point = previous.retreat_point;
            }
            coasts.push(coast);
        }
        self.province_mut(id).coasts = coasts;
        self.reconcile_fleet_coast(id);
        Ok(())
    }

    /// Keeps a fleet's coast valid after the province's coasts changed.
    fn reconcile_fleet_coast(&mut self, id: ProvinceId) {
        let Some(unit_id) = self.province(id).occupant else {
            return;
        };
        let province = self.province(id);
        let unit = &self.units[unit_id.index()];
        if unit.unit_type != UnitType::Fleet {
            return;
        }
        let keep = unit
            .coast
            .as_deref()
            .is_some_and(|suffix| province.coast(suffix).is_some());
        if keep {
            return;
        }
        let fallback = province.default_fleet_coast().map(|c| c.suffix.clone());
        if let Some(suffix) = &fallback {
            log::warn!("fleet in {} moved to coast '{}'", province.name, suffix);
        }
        self.units[unit_id.index()].coast = fallback;
    }

    /// Places a unit, normalizing its coast. Fails if the province is
    /// already occupied or the coast does not exist.
    pub fn place_unit(&mut self, mut unit: Unit) -> Result<UnitId, MapError> {
        let province = self.province(unit.province);
        if province.occupant.is_some() {
            return Err(MapError::DuplicateOccupant(province.name.clone()));
        }

        unit.coast = match (unit.unit_type, unit.coast.take()) {
            (UnitType::Army, _) => None,
            (UnitType::Fleet, Some(suffix)) => match province.coast(&suffix) {
                Some(coast) => Some(coast.suffix.clone()),
                None => {
                    return Err(MapError::UnknownCoast {
                        province: province.name.clone(),
                        suffix,
                    })
                }
            },
            (UnitType::Fleet, None) => {
                let fallback = province.default_fleet_coast().map(|c| c.suffix.clone());
                if province.coasts.len() > 1 {
                    if let Some(suffix) = &fallback {
                        log::warn!(
                            "fleet in {} has no coast, defaulting to '{}'",
                            province.name,
                            suffix
                        );
                    }
                }
                fallback
            }
        };

        let id = UnitId(self.units.len() as u32);
        self.province_mut(unit.province).occupant = Some(id);
        self.units.push(unit);
        Ok(id)
    }

    pub fn units(&self) -> &[Unit] {
        &self.units
    }

    pub fn unit(&self, id: UnitId) -> &Unit {
        &self.units[id.index()]
    }

    // ------------------------------------------------------------------
    // Override hooks. All operate by name and are idempotent.
    // ------------------------------------------------------------------

    /// Forces the coasts of province `name` to exactly `table`.
    pub fn force_coasts(&mut self, name: &str, table: &CoastTable) -> Result<(), MapError> {
        let id = self.id_of(name)?;
        self.set_coasts(id, table)
    }

    /// Forces the placement points of a province or coast. `target` is
    /// anything `resolve_location` accepts. `None` leaves a point unchanged.
    pub fn force_placement(
        &mut self,
        target: &str,
        primary: Option<Point>,
        retreat: Option<Point>,
    ) -> Result<(), MapError> {
        let (id, suffix) = self.resolve_location(target)?;
        let province = self.province_mut(id);
        match suffix {
            Some(suffix) => {
                let name = province.name.clone();
                let coast = province.coast_mut(&suffix).ok_or(MapError::UnknownCoast {
                    province: name,
                    suffix,
                })?;
                if primary.is_some() {
                    coast.primary_point = primary;
                }
                if retreat.is_some() {
                    coast.retreat_point = retreat;
                }
            }
            None => {
                if primary.is_some() {
                    province.primary_point = primary;
                }
                if retreat.is_some() {
                    province.retreat_point = retreat;
                }
            }
        }
        Ok(())
    }

    /// Adds a stacked placement slot to province `name` unless an identical
    /// slot is already present.
    pub fn add_extra_placement(&mut self, name: &str, primary: Point, retreat: Point) -> Result<(), MapError> {
        let id = self.id_of(name)?;
        let province = self.province_mut(id);
        let exists = province
            .extra_primary_points
            .iter()
            .zip(&province.extra_retreat_points)
            .any(|(p, r)| *p == primary && *r == retreat);
        if !exists {
            province.extra_primary_points.push(primary);
            province.extra_retreat_points.push(retreat);
        }
        Ok(())
    }

    /// Checks every structural invariant of the graph.
    pub fn validate(&self) -> Result<(), MapError> {
        let violation = |msg: String| Err(MapError::InvariantViolation(msg));
        let mut names = BTreeSet::new();

        for (id, p) in self.provinces() {
            if !p.is_named() {
                return Err(MapError::UnnamedProvince(id.0));
            }
            if !names.insert(p.name.as_str()) {
                return Err(MapError::DuplicateProvince(p.name.clone()));
            }
            if distinct_vertex_count(&p.boundary) < 3 {
                return violation(format!("{} has a degenerate boundary", p.name));
            }
            if p.adjacent.contains(&id) {
                return violation(format!("{} is adjacent to itself", p.name));
            }
            for other in &p.adjacent {
                if other.index() >= self.provinces.len() {
                    return violation(format!("{} is adjacent to unknown {}", p.name, other));
                }
                if !self.province(*other).adjacent.contains(&id) {
                    return violation(format!(
                        "adjacency {} -> {} is not symmetric",
                        p.name,
                        self.province(*other).name
                    ));
                }
            }

            let mut coast_names = BTreeSet::new();
            for coast in &p.coasts {
                if coast.parent != id {
                    return violation(format!("coast {} has the wrong parent", coast.name));
                }
                if !coast_names.insert(coast.name.as_str()) {
                    return violation(format!("duplicate coast {}", coast.name));
                }
                if !coast.adjacent.is_subset(&p.adjacent) {
                    return violation(format!(
                        "coast {} is adjacent beyond its province",
                        coast.name
                    ));
                }
            }

            if let Some(unit_id) = p.occupant {
                let unit = self
                    .units
                    .get(unit_id.index())
                    .ok_or_else(|| MapError::InvariantViolation(format!("{} holds a missing unit", p.name)))?;
                if unit.province != id {
                    return violation(format!("unit in {} points elsewhere", p.name));
                }
            }
        }

        for (i, unit) in self.units.iter().enumerate() {
            let province = self.province(unit.province);
            if province.occupant != Some(UnitId(i as u32)) {
                return violation(format!("unit {} is not the occupant of {}", i, province.name));
            }
            if unit.unit_type == UnitType::Fleet && province.has_coasts() {
                let valid = unit
                    .coast
                    .as_deref()
                    .is_some_and(|s| province.coast(s).is_some());
                if !valid {
                    return violation(format!("fleet in {} has no valid coast", province.name));
                }
            }
        }
        Ok(())
    }
}
