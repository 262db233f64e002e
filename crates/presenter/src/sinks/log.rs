//! LogSink - logs a frame summary via tracing

use contracts::{ContractError, ReportFrame, ReportSink};
use tracing::{info, instrument};

use crate::format::format_currency;

/// Sink that logs frame summaries for debugging
pub struct LogSink {
    name: String,
}

impl LogSink {
    /// Create a new LogSink with the given name
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }

    fn log_frame_summary(&self, frame: &ReportFrame) {
        let results = &frame.results;
        info!(
            sink = %self.name,
            render_id = frame.render_id,
            regions = frame.selection.regions.len(),
            categories = frame.selection.categories.len(),
            rows = results.record_count,
            orders = results.order_count,
            total_sales = %format_currency(results.total_sales),
            total_profit = %format_currency(results.total_profit),
            top_product = results.top_products.first().map(|g| g.key.as_str()).unwrap_or("-"),
            "Report rendered"
        );
    }
}

impl ReportSink for LogSink {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "log_sink_render",
        skip(self, frame),
        fields(sink = %self.name, render_id = frame.render_id)
    )]
    fn render(&mut self, frame: &ReportFrame) -> Result<(), ContractError> {
        self.log_frame_summary(frame);
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        // Nothing to flush for log sink
        Ok(())
    }
}
