//! Date derivation: raw rows -> order records with calendar fields.
//!
//! The batch aborts on the first unparseable date; no partial record set is
//! ever returned.

use chrono::NaiveDate;
use contracts::{OrderRecord, RawOrder};
use tracing::{debug, instrument};

use crate::error::{IngestionError, Result};

/// Tries each configured format in order
#[derive(Debug, Clone)]
pub struct DateParser {
    formats: Vec<String>,
}

impl DateParser {
    pub fn new(formats: Vec<String>) -> Self {
        Self { formats }
    }

    pub fn formats(&self) -> &[String] {
        &self.formats
    }

    pub fn parse(&self, value: &str) -> Option<NaiveDate> {
        let value = value.trim();
        self.formats
            .iter()
            .find_map(|format| NaiveDate::parse_from_str(value, format).ok())
    }
}

/// Parse every row's date and attach year / abbreviated month
#[instrument(name = "derive_calendar", skip_all, fields(rows = raw.len()))]
pub fn derive_calendar(raw: Vec<RawOrder>, parser: &DateParser) -> Result<Vec<OrderRecord>> {
    let mut records = Vec::with_capacity(raw.len());

    for row in raw {
        let Some(date) = parser.parse(&row.order_date) else {
            return Err(IngestionError::DateParse {
                row: row.row,
                value: row.order_date,
                formats: parser.formats().to_vec(),
            });
        };
        records.push(OrderRecord::from_raw(row, date));
    }

    debug!(records = records.len(), "Calendar fields derived");
    Ok(records)
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::Amount;

    fn raw(row: u64, date: &str) -> RawOrder {
        RawOrder {
            row,
            order_id: format!("CA-2016-{row}"),
            order_date: date.to_string(),
            region: "South".into(),
            category: "Furniture".into(),
            state: "Kentucky".into(),
            product_name: "Bush Somerset Collection Bookcase".into(),
            sales: Amount::from_f64(261.96).unwrap(),
            profit: Amount::from_f64(41.9136).unwrap(),
        }
    }

    fn superstore_parser() -> DateParser {
        DateParser::new(vec!["%m/%d/%Y".into(), "%Y-%m-%d".into()])
    }

    #[test]
    fn test_parse_unpadded_us_date() {
        let date = superstore_parser().parse("11/8/2016").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2016, 11, 8).unwrap());
    }

    #[test]
    fn test_falls_back_to_second_format() {
        let date = superstore_parser().parse(" 2017-01-05 ").unwrap();
        assert_eq!(date, NaiveDate::from_ymd_opt(2017, 1, 5).unwrap());
    }

    #[test]
    fn test_derive_attaches_calendar_fields() {
        let records =
            derive_calendar(vec![raw(1, "11/8/2016"), raw(2, "6/12/2015")], &superstore_parser())
                .unwrap();
        assert_eq!(records.len(), 2);
        assert_eq!(records[0].calendar.year, 2016);
        assert_eq!(records[0].calendar.month, "Nov");
        assert_eq!(records[1].calendar.year, 2015);
        assert_eq!(records[1].calendar.month, "Jun");
    }

    #[test]
    fn test_batch_aborts_on_first_bad_date() {
        let err = derive_calendar(
            vec![raw(1, "11/8/2016"), raw(2, "not a date"), raw(3, "13/45/2016")],
            &superstore_parser(),
        )
        .unwrap_err();
        match err {
            IngestionError::DateParse { row, value, formats } => {
                assert_eq!(row, 2);
                assert_eq!(value, "not a date");
                assert_eq!(formats.len(), 2);
            }
            other => panic!("unexpected: {other:?}"),
        }
    }
}
