//! Dashboard Demo
//!
//! Loads the bundled sample orders, renders the full dashboard, then walks
//! through a few selection changes the way an interactive user would.
//!
//! Run with: cargo run -p demos --bin dashboard_demo [-- path/to/config.toml]

use std::path::{Path, PathBuf};

use config_loader::ConfigLoader;
use contracts::{Dimension, FilterSelection};
use ingestion::OrderLoader;
use presenter::Presenter;
use report_engine::ReportSession;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    observability::init()?;

    // ==== Stage 1: Blueprint ====
    let config = std::env::args()
        .nth(1)
        .map(PathBuf::from)
        .unwrap_or_else(|| Path::new(env!("CARGO_MANIFEST_DIR")).join("config.toml"));
    tracing::info!(path = %config.display(), "Loading blueprint config");
    let blueprint = ConfigLoader::load_from_path(&config)?;

    // ==== Stage 2: Load once ====
    let records = OrderLoader::new(blueprint.source.clone())?.load()?;
    tracing::info!(records = records.len(), "Orders loaded");

    let mut session = ReportSession::new(records, &blueprint.report);
    let mut presenter = Presenter::from_configs(&blueprint.sinks)?;

    // ==== Stage 3: Initial render (everything selected) ====
    presenter.render(&session.refresh())?;

    // ==== Stage 4: Selection changes ====
    let east = session
        .selection()
        .clone()
        .with_values(Dimension::Region, ["East"]);
    presenter.render(&session.on_selection_changed(east)?)?;

    let tech_only = FilterSelection::new(
        session.observed().regions.iter().cloned(),
        ["Technology"],
    );
    presenter.render(&session.on_selection_changed(tech_only)?)?;

    // Unknown values are rejected, the previous selection stays
    let bogus = FilterSelection::new(["Atlantis"], ["Technology"]);
    if let Err(e) = session.on_selection_changed(bogus) {
        tracing::warn!(error = %e, "Selection rejected");
    }

    // Nothing selected: zero metrics and empty charts
    let nothing = session
        .selection()
        .clone()
        .with_values(Dimension::Category, Vec::<String>::new());
    presenter.render(&session.on_selection_changed(nothing)?)?;

    tracing::info!(renders = session.render_count(), "Demo finished");
    Ok(())
}
