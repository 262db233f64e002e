//! Layered error definitions
//!
//! Categorized by source: config / selection / render. Load and parse
//! failures live in `ingestion::IngestionError`; only `PipelineStage` is shared.

use std::fmt;

use serde::Serialize;
use thiserror::Error;

use crate::Dimension;

/// Pipeline stage an error originated from
///
/// Fatal errors are reported to the user together with the stage name.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PipelineStage {
    Config,
    Load,
    Parse,
    Filter,
    Render,
}

impl PipelineStage {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Config => "config",
            Self::Load => "load",
            Self::Parse => "parse",
            Self::Filter => "filter",
            Self::Render => "render",
        }
    }
}

impl fmt::Display for PipelineStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Unified error type
#[derive(Debug, Error)]
pub enum ContractError {
    // ===== Configuration Errors =====
    /// Configuration parse error
    #[error("config parse error: {message}")]
    ConfigParse {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Configuration validation error
    #[error("config validation error at '{field}': {message}")]
    ConfigValidation { field: String, message: String },

    // ===== Selection Errors =====
    /// Selected value was never observed in the loaded records
    #[error("unknown {dimension} '{value}' in selection")]
    UnknownSelection { dimension: Dimension, value: String },

    // ===== Render Errors =====
    /// Sink render error
    #[error("sink '{sink_name}' render error: {message}")]
    Render { sink_name: String, message: String },
}

impl ContractError {
    /// Create configuration parse error
    pub fn config_parse(message: impl Into<String>) -> Self {
        Self::ConfigParse {
            message: message.into(),
            source: None,
        }
    }

    /// Create configuration validation error
    pub fn config_validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::ConfigValidation {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Create sink render error
    pub fn render(sink_name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Render {
            sink_name: sink_name.into(),
            message: message.into(),
        }
    }

    /// Stage this error aborts
    pub fn stage(&self) -> PipelineStage {
        match self {
            Self::ConfigParse { .. } | Self::ConfigValidation { .. } => PipelineStage::Config,
            Self::UnknownSelection { .. } => PipelineStage::Filter,
            Self::Render { .. } => PipelineStage::Render,
        }
    }
}
