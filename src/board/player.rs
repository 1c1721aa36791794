//! Players and their map colors.

use std::collections::BTreeSet;

use super::province::ProvinceId;
use super::unit::UnitId;

/// Index into `Board::players`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct PlayerId(pub u8);

impl PlayerId {
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

/// A player as identified by the fill color of their territory and units.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Player {
    pub name: String,
    /// Lower-cased fill color, e.g. `#c48f85`.
    pub color: String,
    /// Supply centers owned at the start of the game.
    pub centers: BTreeSet<ProvinceId>,
    pub units: Vec<UnitId>,
}

impl Player {
    pub fn new(name: impl Into<String>, color: impl Into<String>) -> Self {
        Player {
            name: name.into(),
            color: color.into().trim().to_ascii_lowercase(),
            centers: BTreeSet::new(),
            units: Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn color_is_normalized() {
        let p = Player::new("France", " #3E7AB8 ");
        assert_eq!(p.color, "#3e7ab8");
        assert!(p.centers.is_empty());
    }
}
