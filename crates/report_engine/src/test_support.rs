//! Record builders and proptest strategies shared by the unit tests.

use chrono::NaiveDate;
use contracts::{Amount, CalendarFields, OrderRecord};
use proptest::prelude::*;

pub fn order(order_id: &str, region: &str, category: &str, sales_units: i64) -> OrderRecord {
    let date = NaiveDate::from_ymd_opt(2016, 11, 8).unwrap();
    OrderRecord {
        order_id: order_id.to_string(),
        order_date: date,
        region: region.to_string(),
        category: category.to_string(),
        state: "Kentucky".to_string(),
        product_name: format!("{category} item"),
        sales: Amount::from_units(sales_units),
        profit: Amount::from_units(sales_units / 10),
        calendar: CalendarFields::from_date(date),
    }
}

pub fn order_on(order_id: &str, date: &str, sales_units: i64) -> OrderRecord {
    let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").unwrap();
    let mut record = order(order_id, "East", "Tech", sales_units);
    record.order_date = date;
    record.calendar = CalendarFields::from_date(date);
    record
}

fn arb_order() -> impl Strategy<Value = OrderRecord> {
    (
        0u32..40,
        "(East|West|Central|South)",
        "(Tech|Furniture|Office)",
        "(Pen|Desk|Lamp|Chair|Phone|Binder|Stapler|Table|Bookcase|Paper|Envelope|Tape)",
        0i64..5_000_000,
        -2_000_000i64..2_000_000,
        0u32..900,
    )
        .prop_map(|(order_no, region, category, product, sales, profit, day)| {
            let date = NaiveDate::from_ymd_opt(2014, 1, 1).unwrap()
                + chrono::Duration::days(day as i64);
            OrderRecord {
                order_id: format!("O-{order_no}"),
                order_date: date,
                region,
                category,
                state: "Ohio".to_string(),
                product_name: product,
                sales: Amount::from_raw(sales),
                profit: Amount::from_raw(profit),
                calendar: CalendarFields::from_date(date),
            }
        })
}

pub fn orders() -> impl Strategy<Value = Vec<OrderRecord>> {
    proptest::collection::vec(arb_order(), 0..60)
}
