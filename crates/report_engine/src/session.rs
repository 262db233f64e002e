//! Report session: owns the loaded records for one user.
//!
//! Records are loaded once and reused for every selection change. Each
//! change rebuilds the filtered view and aggregates from the full set.

use std::time::Instant;

use contracts::{
    AggregateResults, ContractError, FilterSelection, OrderRecord, ReportConfig, ReportFrame,
};
use metrics::{counter, gauge, histogram};
use tracing::{debug, info, instrument};

use crate::aggregate::Aggregator;
use crate::filter;
use crate::observed::ObservedValues;

/// Per-user pipeline state
#[derive(Debug)]
pub struct ReportSession {
    records: Vec<OrderRecord>,
    observed: ObservedValues,
    aggregator: Aggregator,
    title: String,
    selection: FilterSelection,
    render_count: u64,
}

impl ReportSession {
    /// Take ownership of a loaded record set; the selection starts at "all"
    pub fn new(records: Vec<OrderRecord>, report: &ReportConfig) -> Self {
        let observed = ObservedValues::from_records(&records);
        let selection = observed.default_selection();

        info!(
            records = records.len(),
            regions = observed.regions.len(),
            categories = observed.categories.len(),
            "Report session created"
        );

        Self {
            records,
            observed,
            aggregator: Aggregator::from_report(report),
            title: report.title.clone(),
            selection,
            render_count: 0,
        }
    }

    pub fn records(&self) -> &[OrderRecord] {
        &self.records
    }

    pub fn observed(&self) -> &ObservedValues {
        &self.observed
    }

    pub fn selection(&self) -> &FilterSelection {
        &self.selection
    }

    pub fn render_count(&self) -> u64 {
        self.render_count
    }

    /// Filter + aggregate without touching session state
    pub fn evaluate(&self, selection: &FilterSelection) -> AggregateResults {
        let view = filter::apply(&self.records, selection);
        self.aggregator.aggregate(&view)
    }

    /// Selection-changed handler
    ///
    /// Validates the selection against observed values, stores it, and
    /// produces a fresh frame for rendering. On error the previous selection
    /// is kept.
    #[instrument(name = "session_selection_changed", skip_all)]
    pub fn on_selection_changed(
        &mut self,
        selection: FilterSelection,
    ) -> Result<ReportFrame, ContractError> {
        self.observed.validate(&selection)?;
        self.selection = selection;
        Ok(self.refresh())
    }

    /// Back to the default ("all observed values") selection
    pub fn reset(&mut self) -> ReportFrame {
        self.selection = self.observed.default_selection();
        self.refresh()
    }

    /// Recompute the frame for the current selection
    pub fn refresh(&mut self) -> ReportFrame {
        let start = Instant::now();
        let results = self.evaluate(&self.selection);
        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;

        self.render_count += 1;
        counter!("superstore_report_selection_changes_total").increment(1);
        gauge!("superstore_report_filtered_rows").set(results.record_count as f64);
        histogram!("superstore_report_aggregate_duration_ms").record(elapsed_ms);

        debug!(
            render_id = self.render_count,
            rows = results.record_count,
            orders = results.order_count,
            elapsed_ms = format!("{:.3}", elapsed_ms),
            "Aggregates recomputed"
        );

        ReportFrame::new(
            self.render_count,
            self.title.clone(),
            self.selection.clone(),
            results,
        )
    }
}
