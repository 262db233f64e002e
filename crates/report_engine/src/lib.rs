//! # Report Engine
//!
//! Filtering and aggregation over the loaded order records.
//!
//! Responsibilities:
//! - Own the record set for one session (load once, reuse many)
//! - Rebuild the filtered view on every selection change
//! - Compute totals, per-category / per-date / per-state sums and the top-N products
//!
//! ## Usage Example
//!
//! ```ignore
//! use report_engine::ReportSession;
//!
//! let mut session = ReportSession::new(records, &blueprint.report);
//! let frame = session.refresh();
//!
//! let selection = session.selection().clone().with_values(Dimension::Region, ["East"]);
//! let frame = session.on_selection_changed(selection)?;
//! ```

mod aggregate;
mod filter;
mod observed;
mod session;

#[cfg(test)]
mod test_support;

// Re-exports
pub use aggregate::Aggregator;
pub use filter::{apply as apply_filter, FilteredView};
pub use observed::ObservedValues;
pub use session::ReportSession;

// Re-export contracts types
pub use contracts::{AggregateResults, FilterSelection, ReportFrame};
