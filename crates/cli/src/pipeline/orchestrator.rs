//! Pipeline orchestrator - coordinates load, session and presenter.

use std::io::{BufRead, Write};
use std::time::Instant;

use contracts::{ContractError, FilterSelection, PipelineStage, ReportBlueprint};
use ingestion::OrderLoader;
use presenter::Presenter;
use report_engine::ReportSession;
use tracing::{info, instrument, warn};

use super::events::{next_selection, SelectionCommand, HELP};
use super::PipelineStats;
use crate::error::{CliError, Result};

/// What the session loop does after a command
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SessionControl {
    Continue,
    Quit,
}

/// One user's pipeline: owned records, presenter and run statistics
pub struct Pipeline {
    session: ReportSession,
    presenter: Presenter,
    stats: PipelineStats,
}

impl Pipeline {
    /// Load the data source once and build the sinks
    #[instrument(name = "pipeline_load", skip(blueprint), fields(path = %blueprint.source.path.display()))]
    pub fn load(blueprint: &ReportBlueprint) -> Result<Self> {
        let start = Instant::now();

        let loader = OrderLoader::new(blueprint.source.clone())?;
        let records = loader.load()?;
        let load_duration = start.elapsed();
        observability::record_stage_duration(
            PipelineStage::Load,
            load_duration.as_secs_f64() * 1000.0,
        );

        let presenter = Presenter::from_configs(&blueprint.sinks)?;
        let session = ReportSession::new(records, &blueprint.report);

        let mut pipeline = Self::new(session, presenter);
        pipeline.stats.load_duration = load_duration;
        Ok(pipeline)
    }

    /// Assemble from parts
    pub fn new(session: ReportSession, presenter: Presenter) -> Self {
        let stats = PipelineStats {
            records_loaded: session.records().len(),
            active_sinks: presenter.sink_count(),
            ..Default::default()
        };
        Self {
            session,
            presenter,
            stats,
        }
    }

    pub fn session(&self) -> &ReportSession {
        &self.session
    }

    pub fn stats(&self) -> &PipelineStats {
        &self.stats
    }

    /// Render the current selection
    pub fn render_current(&mut self) -> Result<()> {
        let start = Instant::now();
        let frame = self.session.refresh();
        self.present(frame, start)
    }

    /// Selection-changed handler: validate, filter, aggregate, render
    ///
    /// A rejected selection leaves the previous one in place.
    pub fn on_selection_changed(&mut self, selection: FilterSelection) -> Result<()> {
        let start = Instant::now();
        match self.session.on_selection_changed(selection) {
            Ok(frame) => self.present(frame, start),
            Err(e) => {
                self.stats.session_metrics.record_rejected();
                Err(CliError::Selection(e))
            }
        }
    }

    /// Back to the default selection and render
    pub fn reset(&mut self) -> Result<()> {
        let start = Instant::now();
        let frame = self.session.reset();
        self.present(frame, start)
    }

    fn present(&mut self, frame: contracts::ReportFrame, start: Instant) -> Result<()> {
        let before = self.presenter.stats();
        let result = self.presenter.render(&frame);
        self.stats
            .session_metrics
            .update(&frame, start.elapsed().as_secs_f64() * 1000.0);
        if result.is_err() {
            for ((name, after), (_, prev)) in self.presenter.stats().into_iter().zip(before) {
                if after.failure_count > prev.failure_count {
                    self.stats.session_metrics.record_sink_failure(&name);
                }
            }
        }
        result.map_err(CliError::from)
    }

    /// Apply one session command
    ///
    /// Unknown selection values are reported on `out` and the session goes
    /// on; load, parse and render failures abort.
    pub fn handle<W: Write>(
        &mut self,
        command: SelectionCommand,
        out: &mut W,
    ) -> Result<SessionControl> {
        match command {
            SelectionCommand::Select { dimension, values } => {
                let selection = next_selection(
                    self.session.selection(),
                    self.session.observed(),
                    dimension,
                    &values,
                );
                match self.on_selection_changed(selection) {
                    Err(CliError::Selection(ContractError::UnknownSelection {
                        dimension,
                        value,
                    })) => {
                        let known = self.session.observed().values(dimension).join(", ");
                        warn!(%dimension, %value, "Selection rejected");
                        writeln!(out, "unknown {dimension} '{value}' (known: {known})")?;
                    }
                    other => other?,
                }
            }
            SelectionCommand::Show => self.render_current()?,
            SelectionCommand::Reset => self.reset()?,
            SelectionCommand::Help => writeln!(out, "{HELP}")?,
            SelectionCommand::Quit => return Ok(SessionControl::Quit),
        }
        Ok(SessionControl::Continue)
    }

    /// Event loop: render once, then one command per input line until EOF or `quit`
    #[instrument(name = "pipeline_run_session", skip_all)]
    pub fn run_session<R: BufRead, W: Write>(&mut self, input: R, out: &mut W) -> Result<()> {
        let start = Instant::now();
        self.render_current()?;

        for line in input.lines() {
            let line = line?;
            let command = match SelectionCommand::parse(&line) {
                Ok(Some(command)) => command,
                Ok(None) => continue,
                Err(message) => {
                    writeln!(out, "{message}")?;
                    continue;
                }
            };
            self.stats.commands += 1;
            if self.handle(command, out)? == SessionControl::Quit {
                break;
            }
        }

        self.stats.duration = start.elapsed();
        info!(
            commands = self.stats.commands,
            renders = self.stats.session_metrics.renders,
            "Session finished"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use contracts::{Amount, CalendarFields, OrderRecord, ReportConfig};

    fn record(id: &str, region: &str, category: &str, units: i64) -> OrderRecord {
        let date = NaiveDate::from_ymd_opt(2017, 3, 1).unwrap();
        OrderRecord {
            order_id: id.into(),
            order_date: date,
            region: region.into(),
            category: category.into(),
            state: "Ohio".into(),
            product_name: format!("{category} item"),
            sales: Amount::from_units(units),
            profit: Amount::ZERO,
            calendar: CalendarFields::from_date(date),
        }
    }

    fn pipeline() -> Pipeline {
        let records = vec![
            record("O-1", "East", "Technology", 100),
            record("O-2", "West", "Technology", 50),
            record("O-3", "East", "Furniture", 30),
        ];
        let session = ReportSession::new(records, &ReportConfig::default());
        Pipeline::new(session, Presenter::with_sinks(Vec::new()))
    }

    #[test]
    fn test_session_script() {
        let mut pipeline = pipeline();
        let script = "region East\n\ncategory Furniture\nregion Mars\nbogus\nquit\nshow\n";
        let mut out = Vec::new();

        pipeline.run_session(script.as_bytes(), &mut out).unwrap();

        let out = String::from_utf8(out).unwrap();
        assert!(out.contains("unknown region 'Mars' (known: East, West)"));
        assert!(out.contains("unknown command 'bogus'"));

        let selection = pipeline.session().selection();
        assert_eq!(selection.regions.iter().collect::<Vec<_>>(), vec!["East"]);
        assert_eq!(selection.categories.iter().collect::<Vec<_>>(), vec!["Furniture"]);

        // initial render + two accepted changes; nothing after quit
        assert_eq!(pipeline.stats().session_metrics.renders, 3);
        assert_eq!(pipeline.stats().session_metrics.rejected_selections, 1);
        assert_eq!(pipeline.stats().commands, 4);
    }

    #[test]
    fn test_selection_change_results() {
        let mut pipeline = pipeline();
        pipeline
            .on_selection_changed(FilterSelection::new(["East"], ["Technology", "Furniture"]))
            .unwrap();
        let results = pipeline.session().evaluate(pipeline.session().selection());
        assert_eq!(results.total_sales, Amount::from_units(130));
    }

    #[test]
    fn test_unknown_selection_is_filter_stage() {
        let mut pipeline = pipeline();
        let err = pipeline
            .on_selection_changed(FilterSelection::new(["North"], ["Technology"]))
            .unwrap_err();
        assert_eq!(err.stage(), PipelineStage::Filter);
    }
}
