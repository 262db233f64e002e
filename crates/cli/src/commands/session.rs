//! `session` command implementation.

use std::fs::File;
use std::io::{self, BufReader};

use anyhow::{Context, Result};
use tracing::info;

use crate::cli::SessionArgs;
use crate::pipeline::Pipeline;

use super::resolve_blueprint;

/// Execute the `session` command
///
/// Reports go to the configured sinks; command feedback goes to stderr.
pub fn run_session(args: &SessionArgs) -> Result<()> {
    let blueprint = resolve_blueprint(&args.source)?;
    let mut pipeline = Pipeline::load(&blueprint)?;
    let mut feedback = io::stderr();

    match &args.script {
        Some(path) => {
            info!(script = %path.display(), "Reading session commands from file");
            let file = File::open(path)
                .with_context(|| format!("Failed to open script {}", path.display()))?;
            pipeline.run_session(BufReader::new(file), &mut feedback)?;
        }
        None => {
            let stdin = io::stdin();
            pipeline.run_session(stdin.lock(), &mut feedback)?;
        }
    }

    if !args.no_summary {
        pipeline
            .stats()
            .write_summary(&mut feedback)
            .context("Failed to write session summary")?;
    }
    Ok(())
}
