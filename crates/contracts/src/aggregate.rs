//! Aggregate results - Report Engine output

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{Amount, FilterSelection};

/// Summed sales for one group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GroupTotal {
    pub key: String,
    pub sales: Amount,
}

impl GroupTotal {
    pub fn new(key: impl Into<String>, sales: Amount) -> Self {
        Self {
            key: key.into(),
            sales,
        }
    }
}

/// Summed sales for one calendar date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DatePoint {
    pub date: NaiveDate,
    pub sales: Amount,
}

/// Aggregates computed from one filtered view
///
/// Every field is a pure function of the view; nothing is cached across
/// selection changes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AggregateResults {
    /// Records in the filtered view
    pub record_count: usize,
    pub total_sales: Amount,
    pub total_profit: Amount,
    /// Distinct order IDs
    pub order_count: usize,
    /// Ordered by category name
    pub sales_by_category: Vec<GroupTotal>,
    /// Ordered by date ascending
    pub sales_over_time: Vec<DatePoint>,
    /// Ordered by sales descending, ties by first appearance
    pub top_products: Vec<GroupTotal>,
    /// Present only when the state map is enabled; ordered by sales descending
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sales_by_state: Option<Vec<GroupTotal>>,
}

impl AggregateResults {
    pub fn is_empty(&self) -> bool {
        self.record_count == 0
    }
}

/// Fixed insight statements shown below the charts
pub const INSIGHTS: [&str; 3] = [
    "High discount correlates with lower profits in some categories.",
    "Technology outperforms in total profit despite fewer orders.",
    "Furniture has high returns but also higher losses in some regions.",
];

/// Everything one render pass needs
#[derive(Debug, Clone, Serialize)]
pub struct ReportFrame {
    /// Monotonic render counter within a session
    pub render_id: u64,
    pub title: String,
    pub selection: FilterSelection,
    pub results: AggregateResults,
    pub insights: Vec<String>,
}

impl ReportFrame {
    pub fn new(
        render_id: u64,
        title: impl Into<String>,
        selection: FilterSelection,
        results: AggregateResults,
    ) -> Self {
        Self {
            render_id,
            title: title.into(),
            selection,
            results,
            insights: INSIGHTS.iter().map(|s| s.to_string()).collect(),
        }
    }
}
