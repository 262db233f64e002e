//! ReportSink trait - Presenter output interface
//!
//! Defines the abstract interface for Sinks.

use crate::{ContractError, ReportFrame};

/// Render target
///
/// All sink implementations must implement this trait. Every render is a full
/// redraw: sinks never patch previous output.
pub trait ReportSink {
    /// Sink name (used for logging/metrics)
    fn name(&self) -> &str;

    /// Render one report frame
    ///
    /// # Errors
    /// Returns render error (should include context)
    fn render(&mut self, frame: &ReportFrame) -> Result<(), ContractError>;

    /// Flush buffered output (if any)
    fn flush(&mut self) -> Result<(), ContractError>;
}
