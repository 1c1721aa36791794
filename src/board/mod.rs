//! Board representation produced by the map parser.
//!
//! Contains the province/coast/unit arena, players, and the turn ordering
//! the simulation starts from.

pub mod map;
pub mod player;
pub mod province;
pub mod state;
pub mod unit;

pub use map::{CoastTable, MapGraph};
pub use player::{Player, PlayerId};
pub use province::{coast_name, split_coast_label, Coast, Province, ProvinceId, ProvinceType};
pub use state::{Phase, Season, Turn};
pub use unit::{Unit, UnitId, UnitType};

/// Everything the simulation's board constructor needs.
#[derive(Debug, Clone, PartialEq)]
pub struct Board {
    pub players: Vec<Player>,
    pub map: MapGraph,
    pub turn: Turn,
}

impl Board {
    pub fn units(&self) -> &[Unit] {
        self.map.units()
    }

    pub fn player(&self, id: PlayerId) -> &Player {
        &self.players[id.index()]
    }

    pub fn player_by_name(&self, name: &str) -> Option<&Player> {
        self.players.iter().find(|p| p.name == name)
    }

    /// Number of supply centers on the map.
    pub fn supply_center_count(&self) -> usize {
        self.map
            .provinces()
            .filter(|(_, p)| p.has_supply_center)
            .count()
    }
}
