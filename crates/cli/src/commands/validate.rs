//! `validate` command implementation.

use anyhow::{Context, Result};
use contracts::ReportBlueprint;
use ingestion::OrderLoader;
use serde::Serialize;
use tracing::info;

use crate::cli::ValidateArgs;

/// Validation result for JSON output
#[derive(Serialize)]
struct ValidationResult {
    valid: bool,
    config_path: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    warnings: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    summary: Option<ConfigSummary>,
}

#[derive(Serialize)]
struct ConfigSummary {
    version: String,
    source_path: String,
    encoding: String,
    date_formats: Vec<String>,
    top_n: usize,
    show_state_map: bool,
    sink_count: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    rows: Option<usize>,
}

/// Execute the `validate` command
pub fn run_validate(args: &ValidateArgs) -> Result<()> {
    info!(config = %args.config.display(), "Validating configuration");

    let result = validate_config(args);

    if args.json {
        let json = serde_json::to_string_pretty(&result)
            .context("Failed to serialize validation result")?;
        println!("{}", json);
    } else {
        print_validation_result(&result);
    }

    if result.valid {
        Ok(())
    } else {
        anyhow::bail!("Configuration validation failed")
    }
}

fn validate_config(args: &ValidateArgs) -> ValidationResult {
    let config_path = args.config.display().to_string();
    let invalid = |error: String| ValidationResult {
        valid: false,
        config_path: config_path.clone(),
        error: Some(error),
        warnings: None,
        summary: None,
    };

    if !args.config.exists() {
        return invalid(format!("File not found: {}", args.config.display()));
    }

    let blueprint = match config_loader::ConfigLoader::load_from_path(&args.config) {
        Ok(blueprint) => blueprint,
        Err(e) => return invalid(e.to_string()),
    };

    let rows = if args.check_data {
        let loaded = OrderLoader::new(blueprint.source.clone()).and_then(|loader| loader.load());
        match loaded {
            Ok(records) => Some(records.len()),
            Err(e) => return invalid(format!("[{}] {}", e.stage(), e)),
        }
    } else {
        None
    };

    let warnings = collect_warnings(&blueprint, args.check_data);
    ValidationResult {
        valid: true,
        config_path: config_path.clone(),
        error: None,
        warnings: if warnings.is_empty() {
            None
        } else {
            Some(warnings)
        },
        summary: Some(ConfigSummary {
            version: format!("{:?}", blueprint.version),
            source_path: blueprint.source.path.display().to_string(),
            encoding: blueprint.source.encoding.clone(),
            date_formats: blueprint.source.date_formats.clone(),
            top_n: blueprint.report.top_n,
            show_state_map: blueprint.report.show_state_map,
            sink_count: blueprint.sinks.len(),
            rows,
        }),
    }
}

/// Collect configuration warnings (non-fatal issues)
fn collect_warnings(blueprint: &ReportBlueprint, checked_data: bool) -> Vec<String> {
    let mut warnings = Vec::new();

    if !checked_data && !blueprint.source.path.exists() {
        warnings.push(format!(
            "Data file {} does not exist yet",
            blueprint.source.path.display()
        ));
    }

    if blueprint.report.top_n > 50 {
        warnings.push(format!(
            "report.top_n = {} makes the ranked chart very long",
            blueprint.report.top_n
        ));
    }

    if blueprint
        .sinks
        .iter()
        .all(|s| s.sink_type != contracts::SinkType::Terminal)
    {
        warnings.push("No terminal sink configured - nothing is drawn on screen".to_string());
    }

    warnings
}

fn print_validation_result(result: &ValidationResult) {
    if result.valid {
        println!("✓ Configuration is valid: {}", result.config_path);

        if let Some(ref summary) = result.summary {
            println!("\n  Version: {}", summary.version);
            println!("  Source: {} ({})", summary.source_path, summary.encoding);
            println!("  Date formats: {}", summary.date_formats.join(", "));
            println!("  Top N: {}", summary.top_n);
            println!("  State map: {}", summary.show_state_map);
            println!("  Sinks: {}", summary.sink_count);
            if let Some(rows) = summary.rows {
                println!("  Rows: {}", rows);
            }
        }

        if let Some(ref warnings) = result.warnings {
            println!("\n⚠ Warnings:");
            for warning in warnings {
                println!("  - {}", warning);
            }
        }
    } else {
        println!("✗ Configuration is invalid: {}", result.config_path);
        if let Some(ref error) = result.error {
            println!("\n  Error: {}", error);
        }
    }
}
