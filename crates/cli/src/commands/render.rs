//! `render` command implementation.

use anyhow::Result;
use contracts::Dimension;
use tracing::info;

use crate::cli::RenderArgs;
use crate::pipeline::Pipeline;

use super::resolve_blueprint;

/// Execute the `render` command
pub fn run_render(args: &RenderArgs) -> Result<()> {
    let blueprint = resolve_blueprint(&args.source)?;
    let mut pipeline = Pipeline::load(&blueprint)?;

    let mut selection = pipeline.session().selection().clone();
    if !args.regions.is_empty() {
        selection = selection.with_values(Dimension::Region, args.regions.iter().cloned());
    }
    if !args.categories.is_empty() {
        selection = selection.with_values(Dimension::Category, args.categories.iter().cloned());
    }

    pipeline.on_selection_changed(selection)?;

    info!(
        records = pipeline.stats().records_loaded,
        sinks = pipeline.stats().active_sinks,
        "Report rendered"
    );
    Ok(())
}
