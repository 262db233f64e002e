//! JsonSink - writes the frame (selection + aggregates) as JSON

use std::collections::HashMap;
use std::fs::{self, File};
use std::io::{self, BufWriter, Write};
use std::path::{Path, PathBuf};

use contracts::{ContractError, ReportFrame, ReportSink};
use tracing::{debug, instrument};

/// Configuration for JsonSink
#[derive(Debug, Clone, Default)]
pub struct JsonSinkConfig {
    /// Output file, overwritten on every render. `None` writes to stdout.
    pub path: Option<PathBuf>,
    /// Pretty-print (default true)
    pub pretty: bool,
}

impl JsonSinkConfig {
    /// Create config from params map
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let pretty = match params.get("pretty") {
            Some(v) => v
                .parse::<bool>()
                .map_err(|_| format!("invalid pretty flag '{v}'"))?,
            None => true,
        };
        Ok(Self {
            path: params.get("path").map(PathBuf::from),
            pretty,
        })
    }
}

/// Sink that serializes every frame
pub struct JsonSink {
    name: String,
    config: JsonSinkConfig,
}

impl JsonSink {
    /// Create a new JsonSink; the parent directory of `path` is created
    pub fn new(name: impl Into<String>, config: JsonSinkConfig) -> io::Result<Self> {
        if let Some(parent) = config.path.as_deref().and_then(Path::parent) {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)?;
            }
        }
        Ok(Self {
            name: name.into(),
            config,
        })
    }

    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, String> {
        let config = JsonSinkConfig::from_params(params)?;
        Self::new(name, config).map_err(|e| e.to_string())
    }

    fn write_to<W: Write>(&self, writer: W, frame: &ReportFrame) -> serde_json::Result<()> {
        if self.config.pretty {
            serde_json::to_writer_pretty(writer, frame)
        } else {
            serde_json::to_writer(writer, frame)
        }
    }

    fn render_error(&self, e: impl std::fmt::Display) -> ContractError {
        ContractError::render(&self.name, e.to_string())
    }
}

impl ReportSink for JsonSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "json_sink_render",
        skip(self, frame),
        fields(sink = %self.name, render_id = frame.render_id)
    )]
    fn render(&mut self, frame: &ReportFrame) -> Result<(), ContractError> {
        match &self.config.path {
            Some(path) => {
                let file = File::create(path).map_err(|e| self.render_error(e))?;
                let mut writer = BufWriter::new(file);
                self.write_to(&mut writer, frame)
                    .map_err(|e| self.render_error(e))?;
                writer.flush().map_err(|e| self.render_error(e))?;
                debug!(path = %path.display(), "Frame written");
            }
            None => {
                let stdout = io::stdout();
                let mut lock = stdout.lock();
                self.write_to(&mut lock, frame)
                    .map_err(|e| self.render_error(e))?;
                lock.write_all(b"\n").map_err(|e| self.render_error(e))?;
            }
        }
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        if self.config.path.is_none() {
            io::stdout()
                .flush()
                .map_err(|e| ContractError::render(&self.name, e.to_string()))?;
        }
        Ok(())
    }
}
