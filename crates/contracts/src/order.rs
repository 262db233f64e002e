//! Order records - Ingestion output
//!
//! One record per input row, validated and enriched with calendar fields.

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::Amount;

/// Row as read from the source, before date derivation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RawOrder {
    /// 1-based data row (header excluded)
    pub row: u64,
    pub order_id: String,
    /// Unparsed order date
    pub order_date: String,
    pub region: String,
    pub category: String,
    pub state: String,
    pub product_name: String,
    pub sales: Amount,
    pub profit: Amount,
}

/// Calendar attributes derived from the order date
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalendarFields {
    pub year: i32,
    /// Abbreviated month name ("Jan" .. "Dec")
    pub month: String,
}

impl CalendarFields {
    pub fn from_date(date: NaiveDate) -> Self {
        Self {
            year: date.year(),
            month: date.format("%b").to_string(),
        }
    }
}

/// Validated order record
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderRecord {
    pub order_id: String,
    pub order_date: NaiveDate,
    pub region: String,
    pub category: String,
    pub state: String,
    pub product_name: String,
    pub sales: Amount,
    pub profit: Amount,
    pub calendar: CalendarFields,
}

impl OrderRecord {
    /// Attach a parsed date (and its calendar fields) to a raw row
    pub fn from_raw(raw: RawOrder, order_date: NaiveDate) -> Self {
        Self {
            order_id: raw.order_id,
            order_date,
            region: raw.region,
            category: raw.category,
            state: raw.state,
            product_name: raw.product_name,
            sales: raw.sales,
            profit: raw.profit,
            calendar: CalendarFields::from_date(order_date),
        }
    }
}
