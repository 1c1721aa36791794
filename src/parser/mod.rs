//! The map parsing pipeline.
//!
//! Phases run strictly in order, each over the whole document:
//! geometry, names, adjacency, coasts, owners, supply centers, units,
//! placement hints, override hooks and a final validation. Any fatal error
//! aborts the load; no partial board is returned.

pub mod adjacency;
pub mod assemble;
pub mod centers;
pub mod coasts;
pub mod context;
pub mod layers;
pub mod names;
pub mod owners;
pub mod phantom;
pub mod resident;
pub mod units;

use std::path::Path;
use std::time::Instant;

use crate::board::{Board, ProvinceType};
use crate::config::MapConfig;
use crate::error::MapError;
use crate::overrides::OverrideHook;
use crate::svg::Document;

pub use adjacency::AdjacencyDetector;
pub use context::ParseContext;
pub use layers::MapLayers;
pub use resident::{assign_residents, AssignmentReport};

/// Parses SVG text into a board.
pub fn parse_map_str(svg: &str, config: &MapConfig, hooks: &[&dyn OverrideHook]) -> Result<Board, MapError> {
    let document = Document::parse(svg)?;
    parse_document(&document, config, hooks)
}

/// Reads and parses the SVG file at `path`.
pub fn parse_map_file(path: &Path, config: &MapConfig, hooks: &[&dyn OverrideHook]) -> Result<Board, MapError> {
    let document = Document::load(path)?;
    parse_document(&document, config, hooks)
}

/// Runs every pipeline phase over an already parsed document.
pub fn parse_document(
    document: &Document,
    config: &MapConfig,
    hooks: &[&dyn OverrideHook],
) -> Result<Board, MapError> {
    let start = Instant::now();
    config.validate()?;
    let layers = MapLayers::locate(document, &config.layers)?;
    let mut ctx = ParseContext::new(config);

    assemble::assemble_layer(&mut ctx, &layers.land, ProvinceType::Land)?;
    assemble::assemble_layer(&mut ctx, &layers.island, ProvinceType::Island)?;
    assemble::assemble_layer(&mut ctx, &layers.sea, ProvinceType::Sea)?;
    if !config.labeling.provinces {
        names::assign_names(&mut ctx, &layers.names)?;
    }
    ctx.map.index_names()?;

    AdjacencyDetector::from_config(config).apply(&mut ctx.map);
    coasts::materialize_coasts(&mut ctx)?;

    owners::assign_owners(&mut ctx, &layers.island_fill)?;
    centers::assign_supply_centers(&mut ctx, &layers.centers)?;
    units::assign_units(&mut ctx, &layers.units)?;
    phantom::assign_placements(&mut ctx, &layers)?;

    for hook in hooks {
        log::info!("applying override hook '{}'", hook.name());
        hook.apply(&mut ctx.map)?;
    }

    ctx.map.validate()?;
    log::info!(
        "parsed {} provinces, {} adjacencies, {} units in {:.1}ms",
        ctx.map.len(),
        ctx.map.edge_count(),
        ctx.map.units().len(),
        start.elapsed().as_secs_f64() * 1000.0
    );
    Ok(ctx.into_board())
}
