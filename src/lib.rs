//! Cartographer: vector Diplomacy map parser.
//!
//! Turns a layered Inkscape SVG map into a province graph with adjacency,
//! coasts, ownership, supply centers, starting units and unit placement
//! points, ready to hand to a game engine.

pub mod board;
pub mod config;
pub mod error;
pub mod geometry;
pub mod overrides;
pub mod parser;
pub mod svg;

pub use board::Board;
pub use config::MapConfig;
pub use error::{MapError, PathError};
pub use overrides::{OverrideHook, OverrideTable};
pub use parser::{parse_document, parse_map_file, parse_map_str};
