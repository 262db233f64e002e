//! # Presenter
//!
//! Turns a `ReportFrame` into output.
//!
//! Responsibilities:
//! - Build sinks (`terminal`, `json`, `log`) from the blueprint
//! - Fan every frame out to all sinks, full redraw each time
//! - Text formatting and charts for the terminal dashboard
//!
//! ## Usage Example
//!
//! ```ignore
//! use presenter::Presenter;
//!
//! let mut presenter = Presenter::from_configs(&blueprint.sinks)?;
//! let frame = session.on_selection_changed(selection)?;
//! presenter.render(&frame)?;
//! ```

pub mod chart;
pub mod error;
pub mod format;
pub mod presenter;
pub mod sinks;
pub mod state_map;

pub use contracts::{ReportFrame, ReportSink};
pub use error::PresenterError;
pub use presenter::{create_sink, Presenter, SinkStats};
pub use sinks::{render_report, JsonSink, JsonSinkConfig, Layout, LogSink, TerminalSink};
