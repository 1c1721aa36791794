//! State threaded through every pipeline phase.

use std::collections::HashMap;

use crate::board::{Board, MapGraph, Player, PlayerId, ProvinceId, Turn};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::svg::Element;

/// Lookup tables and the graph under construction.
///
/// Replaces process-wide name/color tables: each parse owns its context,
/// so several maps can be parsed side by side.
#[derive(Debug)]
pub struct ParseContext<'c> {
    pub config: &'c MapConfig,
    pub map: MapGraph,
    pub players: Vec<Player>,
    /// Lower-cased fill color → player, `None` for neutral colors.
    colors: HashMap<String, Option<PlayerId>>,
    /// Fill color of every province drawn on the land layer.
    pub land_fills: Vec<(ProvinceId, Option<String>)>,
}

impl<'c> ParseContext<'c> {
    pub fn new(config: &'c MapConfig) -> Self {
        let mut players = Vec::with_capacity(config.players.len());
        let mut colors = HashMap::new();
        for (i, pc) in config.players.iter().enumerate() {
            let player = Player::new(pc.name.clone(), pc.color.clone());
            colors.insert(player.color.clone(), Some(PlayerId(i as u8)));
            players.push(player);
        }
        for neutral in &config.neutral_colors {
            colors.insert(neutral.trim().to_ascii_lowercase(), None);
        }
        ParseContext {
            config,
            map: MapGraph::new(),
            players,
            colors,
            land_fills: Vec::new(),
        }
    }

    /// Maps a fill color to its player. A missing color is neutral; a color
    /// that is neither a player's nor neutral is an error.
    pub fn player_for_color(&self, color: Option<&str>) -> Result<Option<PlayerId>, MapError> {
        let Some(color) = color else {
            return Ok(None);
        };
        let key = color.trim().to_ascii_lowercase();
        self.colors
            .get(&key)
            .copied()
            .ok_or(MapError::UnknownColor(key))
    }

    /// Player owning `element`, judged by its fill color.
    pub fn player_of(&self, element: &Element) -> Result<Option<PlayerId>, MapError> {
        self.player_for_color(element.fill_color().as_deref())
    }

    pub fn player_name(&self, id: Option<PlayerId>) -> &str {
        id.map(|p| self.players[p.index()].name.as_str())
            .unwrap_or("nobody")
    }

    pub fn into_board(self) -> Board {
        Board {
            players: self.players,
            map: self.map,
            turn: Turn::spring_moves(self.config.starting_year),
        }
    }
}
