//! TerminalSink - full text dashboard

use std::collections::{BTreeSet, HashMap};
use std::io::{self, Stdout, Write};

use contracts::{ContractError, ReportFrame, ReportSink};
use tracing::{debug, instrument};

use crate::chart::{bar_chart, line_chart, ranked_bar_chart};
use crate::format::{format_count, format_currency};
use crate::state_map::state_map;

const CLEAR_SCREEN: &str = "\x1b[2J\x1b[H";
const MIN_WIDTH: usize = 60;

/// Layout of the text dashboard
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Total line width in columns
    pub width: usize,
    /// Clear the screen before every render
    pub clear: bool,
    /// Plot rows of the time series chart
    pub chart_height: usize,
}

impl Default for Layout {
    fn default() -> Self {
        Self {
            width: 100,
            clear: false,
            chart_height: 8,
        }
    }
}

impl Layout {
    /// Create layout from params map (`width`, `clear`, `chart_height`)
    pub fn from_params(params: &HashMap<String, String>) -> Result<Self, String> {
        let mut layout = Self::default();
        if let Some(width) = params.get("width") {
            layout.width = width
                .parse::<usize>()
                .map_err(|_| format!("invalid width '{width}'"))?
                .max(MIN_WIDTH);
        }
        if let Some(clear) = params.get("clear") {
            layout.clear = clear
                .parse::<bool>()
                .map_err(|_| format!("invalid clear flag '{clear}'"))?;
        }
        if let Some(height) = params.get("chart_height") {
            layout.chart_height = height
                .parse::<usize>()
                .map_err(|_| format!("invalid chart_height '{height}'"))?
                .max(2);
        }
        Ok(layout)
    }

    fn label_width(&self) -> usize {
        (self.width / 3).clamp(12, 40)
    }

    fn bar_width(&self) -> usize {
        self.width.saturating_sub(self.label_width() + 22).max(10)
    }
}

/// Render the whole dashboard as text
///
/// Sections follow a fixed order: title, metric cards, sales by category,
/// sales over time, top products, state map (when present), insights.
pub fn render_report(frame: &ReportFrame, layout: &Layout) -> String {
    let results = &frame.results;
    let label_width = layout.label_width();
    let bar_width = layout.bar_width();
    let mut lines: Vec<String> = Vec::new();

    let rule = "═".repeat(layout.width);
    lines.push(rule.clone());
    lines.push(format!("  {}", frame.title));
    lines.push(format!(
        "  Region: {}   Category: {}",
        describe(&frame.selection.regions),
        describe(&frame.selection.categories)
    ));
    lines.push(rule);

    let cards = [
        ("Total Sales", format_currency(results.total_sales)),
        ("Total Profit", format_currency(results.total_profit)),
        ("Total Orders", format_count(results.order_count)),
    ];
    let card_width = (layout.width / 3).saturating_sub(2).max(16);
    lines.push(
        cards
            .iter()
            .map(|(label, _)| format!("  {label:<card_width$}"))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );
    lines.push(
        cards
            .iter()
            .map(|(_, value)| format!("  {value:<card_width$}"))
            .collect::<String>()
            .trim_end()
            .to_string(),
    );

    section(&mut lines, "Sales by Category");
    lines.extend(bar_chart(&results.sales_by_category, label_width, bar_width));

    section(&mut lines, "Sales Over Time");
    let plot_width = layout.width.saturating_sub(16).max(10);
    lines.extend(line_chart(
        &results.sales_over_time,
        plot_width,
        layout.chart_height,
    ));

    section(&mut lines, "Top Products by Sales");
    lines.extend(ranked_bar_chart(
        &results.top_products,
        label_width,
        bar_width.saturating_sub(4).max(10),
    ));

    if let Some(states) = &results.sales_by_state {
        section(&mut lines, "Sales by State");
        lines.extend(state_map(states, label_width));
    }

    section(&mut lines, "Insights");
    lines.extend(frame.insights.iter().map(|s| format!("  - {s}")));

    let mut out = lines.join("\n");
    out.push('\n');
    out
}

fn section(lines: &mut Vec<String>, heading: &str) {
    lines.push(String::new());
    lines.push(format!("▌{heading}"));
}

fn describe(values: &BTreeSet<String>) -> String {
    if values.is_empty() {
        "(none)".to_string()
    } else {
        values.iter().cloned().collect::<Vec<_>>().join(", ")
    }
}

/// Sink that draws the dashboard into a writer (stdout by default)
pub struct TerminalSink<W: Write = Stdout> {
    name: String,
    layout: Layout,
    writer: W,
}

impl TerminalSink<Stdout> {
    /// Create from params map (for factory)
    pub fn from_params(
        name: impl Into<String>,
        params: &HashMap<String, String>,
    ) -> Result<Self, String> {
        let layout = Layout::from_params(params)?;
        Ok(Self::with_writer(name, layout, io::stdout()))
    }
}

impl<W: Write> TerminalSink<W> {
    pub fn with_writer(name: impl Into<String>, layout: Layout, writer: W) -> Self {
        Self {
            name: name.into(),
            layout,
            writer,
        }
    }

    pub fn into_inner(self) -> W {
        self.writer
    }
}

impl<W: Write> ReportSink for TerminalSink<W> {
    fn name(&self) -> &str {
        &self.name
    }

    #[instrument(
        name = "terminal_sink_render",
        skip(self, frame),
        fields(sink = %self.name, render_id = frame.render_id)
    )]
    fn render(&mut self, frame: &ReportFrame) -> Result<(), ContractError> {
        let text = render_report(frame, &self.layout);
        if self.layout.clear {
            self.writer
                .write_all(CLEAR_SCREEN.as_bytes())
                .map_err(|e| ContractError::render(&self.name, e.to_string()))?;
        }
        self.writer
            .write_all(text.as_bytes())
            .map_err(|e| ContractError::render(&self.name, e.to_string()))?;
        debug!(bytes = text.len(), "Dashboard drawn");
        Ok(())
    }

    fn flush(&mut self) -> Result<(), ContractError> {
        self.writer
            .flush()
            .map_err(|e| ContractError::render(&self.name, e.to_string()))
    }
}
