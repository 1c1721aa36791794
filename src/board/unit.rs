//! Unit types and ownership.
//!
//! Represents armies and fleets, their owning player, and the province (and
//! coast, for fleets on multi-coast provinces) they occupy.

use super::player::PlayerId;
use super::province::ProvinceId;

/// The type of a military unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum UnitType {
    Army,
    Fleet,
}

impl UnitType {
    /// Returns the uppercase abbreviation used in order notation.
    pub const fn abbr(self) -> char {
        match self {
            UnitType::Army => 'A',
            UnitType::Fleet => 'F',
        }
    }

    pub const fn name(self) -> &'static str {
        match self {
            UnitType::Army => "army",
            UnitType::Fleet => "fleet",
        }
    }
}

/// Index of a unit in the `MapGraph` arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct UnitId(pub u32);

impl UnitId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A military unit on the board.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Unit {
    pub unit_type: UnitType,
    pub owner: PlayerId,
    pub province: ProvinceId,
    /// Coast suffix, set for fleets on provinces with coasts.
    pub coast: Option<String>,
}
