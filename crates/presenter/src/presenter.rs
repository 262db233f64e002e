//! Presenter - fans one frame out to every configured sink

use std::time::Instant;

use contracts::{PipelineStage, ReportFrame, ReportSink, SinkConfig, SinkType};
use tracing::{debug, info, instrument, warn};

use crate::error::PresenterError;
use crate::sinks::{JsonSink, LogSink, TerminalSink};

/// Per-sink render counters
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SinkStats {
    pub render_count: u64,
    pub failure_count: u64,
}

struct SinkSlot {
    sink: Box<dyn ReportSink>,
    stats: SinkStats,
}

/// Create a sink from configuration
#[instrument(
    name = "presenter_create_sink",
    skip(config),
    fields(sink = %config.name, sink_type = ?config.sink_type)
)]
pub fn create_sink(config: &SinkConfig) -> Result<Box<dyn ReportSink>, PresenterError> {
    match config.sink_type {
        SinkType::Terminal => {
            let sink = TerminalSink::from_params(&config.name, &config.params)
                .map_err(|e| PresenterError::sink_creation(&config.name, e))?;
            Ok(Box::new(sink))
        }
        SinkType::Json => {
            let sink = JsonSink::from_params(&config.name, &config.params)
                .map_err(|e| PresenterError::sink_creation(&config.name, e))?;
            Ok(Box::new(sink))
        }
        SinkType::Log => Ok(Box::new(LogSink::new(&config.name))),
    }
}

/// Renders report frames into all sinks
pub struct Presenter {
    slots: Vec<SinkSlot>,
}

impl Presenter {
    /// Build sinks from configuration
    #[instrument(name = "presenter_from_configs", skip(configs), fields(sink_count = configs.len()))]
    pub fn from_configs(configs: &[SinkConfig]) -> Result<Self, PresenterError> {
        let sinks = configs
            .iter()
            .map(create_sink)
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::with_sinks(sinks))
    }

    /// Create a presenter with custom sinks (for testing)
    pub fn with_sinks(sinks: Vec<Box<dyn ReportSink>>) -> Self {
        Self {
            slots: sinks
                .into_iter()
                .map(|sink| SinkSlot {
                    sink,
                    stats: SinkStats::default(),
                })
                .collect(),
        }
    }

    pub fn sink_count(&self) -> usize {
        self.slots.len()
    }

    /// Per-sink counters
    pub fn stats(&self) -> Vec<(String, SinkStats)> {
        self.slots
            .iter()
            .map(|slot| (slot.sink.name().to_string(), slot.stats))
            .collect()
    }

    /// Render a frame into every sink
    ///
    /// A failing sink does not stop the others; the first failure is
    /// returned after all sinks were tried.
    #[instrument(name = "presenter_render", skip(self, frame), fields(render_id = frame.render_id))]
    pub fn render(&mut self, frame: &ReportFrame) -> Result<(), PresenterError> {
        let start = Instant::now();
        let mut first_error = None;

        for slot in &mut self.slots {
            let result = slot
                .sink
                .render(frame)
                .and_then(|()| slot.sink.flush());
            let success = result.is_ok();
            observability::record_render(slot.sink.name(), success);

            slot.stats.render_count += 1;
            if let Err(e) = result {
                slot.stats.failure_count += 1;
                warn!(sink = slot.sink.name(), error = %e, "Sink render failed");
                if first_error.is_none() {
                    first_error = Some(e);
                }
            }
        }

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        observability::record_stage_duration(PipelineStage::Render, elapsed_ms);
        debug!(sinks = self.slots.len(), elapsed_ms, "Frame presented");

        match first_error {
            Some(e) => Err(e.into()),
            None => Ok(()),
        }
    }

    /// Names of all sinks, in render order
    pub fn sink_names(&self) -> Vec<&str> {
        self.slots.iter().map(|slot| slot.sink.name()).collect()
    }
}

impl Drop for Presenter {
    fn drop(&mut self) {
        for slot in &mut self.slots {
            if let Err(e) = slot.sink.flush() {
                warn!(sink = slot.sink.name(), error = %e, "Final flush failed");
            }
        }
        info!(sinks = self.slots.len(), "Presenter closed");
    }
}
