//! Order loader - reads the CSV source into typed records.

use std::path::Path;
use std::time::Instant;

use contracts::{Amount, ColumnMapping, OrderRecord, RawOrder, SourceConfig};
use encoding_rs::Encoding;
use metrics::{counter, histogram};
use tracing::{info, instrument};

use crate::derive::{derive_calendar, DateParser};
use crate::encoding::{decode_source, resolve_encoding};
use crate::error::{IngestionError, Result};

/// Header positions of the required columns
#[derive(Debug, Clone, Copy)]
struct ColumnIndex {
    order_id: usize,
    order_date: usize,
    region: usize,
    category: usize,
    state: usize,
    product_name: usize,
    sales: usize,
    profit: usize,
}

impl ColumnIndex {
    fn resolve(headers: &csv::StringRecord, columns: &ColumnMapping) -> Result<Self> {
        let find = |field: &'static str, column: &str| -> Result<usize> {
            headers
                .iter()
                .position(|h| h.trim() == column.trim())
                .ok_or_else(|| IngestionError::MissingColumn {
                    column: column.to_string(),
                    field,
                })
        };

        Ok(Self {
            order_id: find("order_id", &columns.order_id)?,
            order_date: find("order_date", &columns.order_date)?,
            region: find("region", &columns.region)?,
            category: find("category", &columns.category)?,
            state: find("state", &columns.state)?,
            product_name: find("product_name", &columns.product_name)?,
            sales: find("sales", &columns.sales)?,
            profit: find("profit", &columns.profit)?,
        })
    }
}

/// Running sum of absolute amounts in one column
///
/// Every filtered subtotal is bounded by this sum, so keeping it inside `i64`
/// keeps every aggregate of the loaded rows exact.
#[derive(Debug, Default)]
struct MagnitudeBound(u64);

impl MagnitudeBound {
    fn track(&mut self, amount: Amount, row: u64, column: &str) -> Result<()> {
        self.0 = self
            .0
            .checked_add(amount.raw().unsigned_abs())
            .filter(|total| *total <= i64::MAX as u64)
            .ok_or_else(|| IngestionError::AmountOverflow {
                row,
                column: column.to_string(),
            })?;
        Ok(())
    }
}

/// Loads the full order record set from one CSV source
///
/// Loading is expected once per session; the result is owned by the caller.
#[derive(Debug, Clone)]
pub struct OrderLoader {
    source: SourceConfig,
    encoding: &'static Encoding,
    dates: DateParser,
}

impl OrderLoader {
    /// Create a loader, resolving the declared encoding up front
    pub fn new(source: SourceConfig) -> Result<Self> {
        let encoding = resolve_encoding(&source.encoding)?;
        let dates = DateParser::new(source.date_formats.clone());
        Ok(Self {
            source,
            encoding,
            dates,
        })
    }

    pub fn path(&self) -> &Path {
        &self.source.path
    }

    pub fn encoding(&self) -> &'static Encoding {
        self.encoding
    }

    /// Read, decode, parse and derive calendar fields
    #[instrument(
        name = "order_loader_load",
        skip(self),
        fields(path = %self.source.path.display(), encoding = self.encoding.name())
    )]
    pub fn load(&self) -> Result<Vec<OrderRecord>> {
        let start = Instant::now();

        let raw = self.load_raw()?;
        let records = derive_calendar(raw, &self.dates)?;

        let elapsed_ms = start.elapsed().as_secs_f64() * 1000.0;
        counter!("superstore_report_records_loaded_total").increment(records.len() as u64);
        histogram!("superstore_report_load_duration_ms").record(elapsed_ms);

        info!(
            records = records.len(),
            elapsed_ms = format!("{:.1}", elapsed_ms),
            "Order records loaded"
        );
        Ok(records)
    }

    /// Read and parse rows without date derivation
    pub fn load_raw(&self) -> Result<Vec<RawOrder>> {
        let path = &self.source.path;
        let display = path.display().to_string();

        if !path.exists() {
            return Err(IngestionError::SourceMissing { path: display });
        }
        let bytes = std::fs::read(path).map_err(|source| IngestionError::Read {
            path: display.clone(),
            source,
        })?;

        self.parse_bytes(&bytes, &display)
    }

    /// Decode and parse an in-memory source
    pub fn parse_bytes(&self, bytes: &[u8], origin: &str) -> Result<Vec<RawOrder>> {
        let text = decode_source(bytes, self.encoding).ok_or_else(|| IngestionError::Decode {
            path: origin.to_string(),
            encoding: self.encoding.name(),
        })?;
        parse_orders(&text, &self.source.columns, origin)
    }

    /// Full pipeline for an in-memory source (decode, parse, derive)
    pub fn load_bytes(&self, bytes: &[u8], origin: &str) -> Result<Vec<OrderRecord>> {
        let raw = self.parse_bytes(bytes, origin)?;
        derive_calendar(raw, &self.dates)
    }
}

/// Parse decoded CSV text into raw rows
pub fn parse_orders(text: &str, columns: &ColumnMapping, origin: &str) -> Result<Vec<RawOrder>> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .from_reader(text.as_bytes());

    let headers = reader.headers().map_err(map_csv_error)?.clone();
    if headers.is_empty() || headers.iter().all(|h| h.is_empty()) {
        return Err(IngestionError::EmptySource {
            path: origin.to_string(),
        });
    }
    let index = ColumnIndex::resolve(&headers, columns)?;

    let mut rows = Vec::new();
    let mut sales_bound = MagnitudeBound::default();
    let mut profit_bound = MagnitudeBound::default();
    for (idx, result) in reader.records().enumerate() {
        let record = result.map_err(map_csv_error)?;
        let row = idx as u64 + 1;

        let field = |i: usize| record.get(i).unwrap_or_default().to_string();
        let amount = |i: usize, column: &str| -> Result<Amount> {
            let value = record.get(i).unwrap_or_default();
            value
                .parse::<f64>()
                .ok()
                .and_then(Amount::from_f64)
                .ok_or_else(|| IngestionError::InvalidNumber {
                    row,
                    column: column.to_string(),
                    value: value.to_string(),
                })
        };

        let sales = amount(index.sales, &columns.sales)?;
        let profit = amount(index.profit, &columns.profit)?;
        sales_bound.track(sales, row, &columns.sales)?;
        profit_bound.track(profit, row, &columns.profit)?;

        rows.push(RawOrder {
            row,
            order_id: field(index.order_id),
            order_date: field(index.order_date),
            region: field(index.region),
            category: field(index.category),
            state: field(index.state),
            product_name: field(index.product_name),
            sales,
            profit,
        });
    }

    Ok(rows)
}

fn map_csv_error(err: csv::Error) -> IngestionError {
    let line = err.position().map(|p| p.line()).unwrap_or(0);
    IngestionError::MalformedRow {
        line,
        message: err.to_string(),
    }
}
