//! Materializes the multi-coast provinces declared in the config.

use crate::error::MapError;

use super::context::ParseContext;

/// Creates the coasts of every province listed in `config.coasts`.
/// Returns the number of coasts created.
pub fn materialize_coasts(ctx: &mut ParseContext) -> Result<usize, MapError> {
    let mut created = 0;
    for (name, table) in &ctx.config.coasts {
        let id = ctx.map.id_of(name)?;
        ctx.map.set_coasts(id, table)?;
        created += table.len();
        log::debug!("{}: {} coasts", name, table.len());
    }
    if created > 0 {
        log::info!("created {} coasts", created);
    }
    Ok(created)
}
