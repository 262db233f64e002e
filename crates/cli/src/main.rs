//! # Superstore Report CLI
//!
//! 命令行接口入口点。
//!
//! 提供：
//! - 配置加载与验证
//! - 一次性渲染与交互式会话
//! - 数据集概览

mod cli;
mod commands;
mod error;
mod pipeline;

use std::process::ExitCode;

use anyhow::Result;
use clap::Parser;
use tracing::info;

use cli::{Cli, Commands};
use commands::{run_info, run_render, run_session, run_validate};
use error::CliError;

fn main() -> ExitCode {
    // Load .env file if present
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    if let Err(e) = init_logging(&cli) {
        eprintln!("superstore-report: {e:#}");
        return ExitCode::FAILURE;
    }

    info!(
        version = env!("CARGO_PKG_VERSION"),
        "Superstore Report CLI starting"
    );

    let result = match &cli.command {
        Commands::Render(args) => run_render(args),
        Commands::Session(args) => run_session(args),
        Commands::Validate(args) => run_validate(args),
        Commands::Info(args) => run_info(args),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            report_failure(&e);
            ExitCode::FAILURE
        }
    }
}

/// Print the failure naming the stage that failed
fn report_failure(err: &anyhow::Error) {
    let stage = err
        .chain()
        .find_map(|cause| cause.downcast_ref::<CliError>())
        .map(CliError::stage);

    match stage {
        Some(stage) => {
            tracing::error!(%stage, error = %err, "Command failed");
            eprintln!("superstore-report: {stage} stage failed: {err:#}");
        }
        None => {
            tracing::error!(error = %err, "Command failed");
            eprintln!("superstore-report: {err:#}");
        }
    }
}

/// Initialize logging based on CLI options
fn init_logging(cli: &Cli) -> Result<()> {
    let default_log_level = if cli.quiet {
        "error"
    } else {
        match cli.verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    };

    observability::init_with_config(observability::ObservabilityConfig {
        log_format: cli.log_format.into(),
        default_log_level: default_log_level.to_string(),
    })
}
