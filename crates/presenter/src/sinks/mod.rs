//! Sink implementations
//!
//! Contains TerminalSink, JsonSink, and LogSink.

mod json;
mod log;
mod terminal;

pub use self::json::{JsonSink, JsonSinkConfig};
pub use self::log::LogSink;
pub use self::terminal::{render_report, Layout, TerminalSink};
