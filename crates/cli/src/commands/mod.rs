//! Command implementations.

mod info;
mod render;
mod session;
mod validate;

pub use info::run_info;
pub use render::run_render;
pub use session::run_session;
pub use validate::run_validate;

use config_loader::ConfigLoader;
use contracts::ReportBlueprint;
use tracing::info;

use crate::cli::SourceArgs;
use crate::error::{CliError, Result};

/// Load the blueprint (or build one from `--data`) and apply CLI overrides
pub(crate) fn resolve_blueprint(source: &SourceArgs) -> Result<ReportBlueprint> {
    let mut blueprint = match (&source.config, &source.data) {
        (Some(config), _) => {
            info!(config = %config.display(), "Loading configuration");
            ConfigLoader::load_from_path(config).map_err(CliError::Config)?
        }
        (None, Some(data)) => ReportBlueprint::with_source_path(data),
        (None, None) => return Err(CliError::NoSource),
    };

    if let Some(data) = &source.data {
        info!(path = %data.display(), "Overriding data path from CLI");
        blueprint.source.path = data.clone();
    }
    if let Some(encoding) = &source.encoding {
        info!(encoding = %encoding, "Overriding source encoding from CLI");
        blueprint.source.encoding = encoding.clone();
    }
    if source.state_map {
        blueprint.report.show_state_map = true;
    }

    ConfigLoader::validate(&blueprint).map_err(CliError::Config)?;
    Ok(blueprint)
}
