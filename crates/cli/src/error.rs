//! Error types for CLI operations.

use contracts::{ContractError, PipelineStage};
use ingestion::IngestionError;
use presenter::PresenterError;
use thiserror::Error;

/// CLI-specific error types
#[derive(Error, Debug)]
pub enum CliError {
    /// Neither a config file nor a data path was given
    #[error("no data source: pass --config <file> or --data <csv>")]
    NoSource,

    /// Configuration load/validation error
    #[error(transparent)]
    Config(ContractError),

    /// Loading or parsing the order data failed
    #[error(transparent)]
    Ingestion(#[from] IngestionError),

    /// Rejected selection change
    #[error(transparent)]
    Selection(ContractError),

    /// Sink creation or rendering failed
    #[error(transparent)]
    Presenter(#[from] PresenterError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl CliError {
    /// Stage reported to the user when the command aborts
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::NoSource | Self::Config(_) => PipelineStage::Config,
            Self::Ingestion(e) => e.stage(),
            Self::Selection(_) => PipelineStage::Filter,
            Self::Presenter(_) | Self::Io(_) => PipelineStage::Render,
        }
    }
}

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;
