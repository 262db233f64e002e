//! `info` command implementation.

use std::collections::HashSet;

use anyhow::{Context, Result};
use chrono::NaiveDate;
use contracts::{Amount, OrderRecord};
use ingestion::OrderLoader;
use serde::Serialize;
use tracing::info;

use crate::cli::InfoArgs;
use crate::error::CliError;

use super::resolve_blueprint;

/// Dataset summary for JSON output
#[derive(Debug, Serialize)]
struct DatasetInfo {
    source: String,
    encoding: String,
    rows: usize,
    orders: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    first_date: Option<NaiveDate>,
    #[serde(skip_serializing_if = "Option::is_none")]
    last_date: Option<NaiveDate>,
    regions: Vec<String>,
    categories: Vec<String>,
    states: usize,
    products: usize,
    total_sales: Amount,
    total_profit: Amount,
}

/// Execute the `info` command
pub fn run_info(args: &InfoArgs) -> Result<()> {
    let blueprint = resolve_blueprint(&args.source)?;
    info!(path = %blueprint.source.path.display(), "Loading dataset info");

    let records = OrderLoader::new(blueprint.source.clone())
        .and_then(|loader| loader.load())
        .map_err(CliError::from)?;

    let info = build_dataset_info(
        &records,
        blueprint.source.path.display().to_string(),
        blueprint.source.encoding.clone(),
    );

    if args.json {
        let json =
            serde_json::to_string_pretty(&info).context("Failed to serialize dataset info")?;
        println!("{}", json);
    } else {
        print_dataset_info(&info);
    }

    Ok(())
}

fn build_dataset_info(records: &[OrderRecord], source: String, encoding: String) -> DatasetInfo {
    let observed = report_engine::ObservedValues::from_records(records);
    let orders: HashSet<&str> = records.iter().map(|r| r.order_id.as_str()).collect();
    let states: HashSet<&str> = records.iter().map(|r| r.state.as_str()).collect();
    let products: HashSet<&str> = records.iter().map(|r| r.product_name.as_str()).collect();

    let mut regions = observed.regions;
    let mut categories = observed.categories;
    regions.sort();
    categories.sort();

    DatasetInfo {
        source,
        encoding,
        rows: records.len(),
        orders: orders.len(),
        first_date: records.iter().map(|r| r.order_date).min(),
        last_date: records.iter().map(|r| r.order_date).max(),
        regions,
        categories,
        states: states.len(),
        products: products.len(),
        total_sales: records.iter().map(|r| r.sales).sum(),
        total_profit: records.iter().map(|r| r.profit).sum(),
    }
}

fn print_dataset_info(info: &DatasetInfo) {
    println!("Dataset: {} ({})", info.source, info.encoding);
    println!("   ├─ Rows: {}", info.rows);
    println!("   ├─ Orders: {}", info.orders);
    match (info.first_date, info.last_date) {
        (Some(first), Some(last)) => println!("   ├─ Dates: {} → {}", first, last),
        _ => println!("   ├─ Dates: (none)"),
    }
    println!("   ├─ Regions ({}): {}", info.regions.len(), info.regions.join(", "));
    println!(
        "   ├─ Categories ({}): {}",
        info.categories.len(),
        info.categories.join(", ")
    );
    println!("   ├─ States: {}", info.states);
    println!("   ├─ Products: {}", info.products);
    println!(
        "   └─ Sales / Profit: {} / {}",
        presenter::format::format_currency(info.total_sales),
        presenter::format::format_currency(info.total_profit)
    );
}

#[cfg(test)]
mod tests {
    use super::*;
    use contracts::CalendarFields;

    fn record(id: &str, date: &str, region: &str, state: &str, product: &str) -> OrderRecord {
        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
        OrderRecord {
            order_id: id.into(),
            order_date: date,
            region: region.into(),
            category: "Office Supplies".into(),
            state: state.into(),
            product_name: product.into(),
            sales: Amount::from_units(10),
            profit: Amount::from_units(2),
            calendar: CalendarFields::from_date(date),
        }
    }

    #[test]
    fn test_dataset_info() {
        let records = vec![
            record("O-1", "2017-05-01", "West", "California", "Pen"),
            record("O-1", "2014-01-03", "West", "California", "Paper"),
            record("O-2", "2016-02-10", "East", "New York", "Pen"),
        ];
        let info = build_dataset_info(&records, "orders.csv".into(), "utf-8".into());

        assert_eq!(info.rows, 3);
        assert_eq!(info.orders, 2);
        assert_eq!(info.first_date, NaiveDate::from_ymd_opt(2014, 1, 3));
        assert_eq!(info.last_date, NaiveDate::from_ymd_opt(2017, 5, 1));
        assert_eq!(info.regions, vec!["East", "West"]);
        assert_eq!(info.states, 2);
        assert_eq!(info.products, 2);
        assert_eq!(info.total_sales, Amount::from_units(30));
    }

    #[test]
    fn test_empty_dataset_info() {
        let info = build_dataset_info(&[], "orders.csv".into(), "utf-8".into());
        assert_eq!(info.rows, 0);
        assert!(info.first_date.is_none());
        assert_eq!(info.total_sales, Amount::ZERO);
    }
}
