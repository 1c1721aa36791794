//! Locates every required layer before any phase runs.

use crate::config::LayerIds;
use crate::error::MapError;
use crate::svg::{Document, Layer};

/// The eleven layers of a map document.
#[derive(Debug, Clone, Copy)]
pub struct MapLayers<'d> {
    pub land: Layer<'d>,
    pub island: Layer<'d>,
    pub island_fill: Layer<'d>,
    pub sea: Layer<'d>,
    pub names: Layer<'d>,
    pub centers: Layer<'d>,
    pub units: Layer<'d>,
    pub phantom_primary_army: Layer<'d>,
    pub phantom_retreat_army: Layer<'d>,
    pub phantom_primary_fleet: Layer<'d>,
    pub phantom_retreat_fleet: Layer<'d>,
}

impl<'d> MapLayers<'d> {
    /// Finds every layer; a missing one aborts the load.
    pub fn locate(document: &'d Document, ids: &'d LayerIds) -> Result<Self, MapError> {
        Ok(MapLayers {
            land: document.layer(&ids.land)?,
            island: document.layer(&ids.island)?,
            island_fill: document.layer(&ids.island_fill)?,
            sea: document.layer(&ids.sea)?,
            names: document.layer(&ids.names)?,
            centers: document.layer(&ids.centers)?,
            units: document.layer(&ids.units)?,
            phantom_primary_army: document.layer(&ids.phantom_primary_army)?,
            phantom_retreat_army: document.layer(&ids.phantom_retreat_army)?,
            phantom_primary_fleet: document.layer(&ids.phantom_primary_fleet)?,
            phantom_retreat_fleet: document.layer(&ids.phantom_retreat_fleet)?,
        })
    }
}
