//! Aggregator: filtered view -> aggregate results.
//!
//! Grouping uses exact key equality. Every aggregate is a pure function of the
//! view, so an empty view yields zeros and empty series without special casing.

use std::collections::{BTreeMap, HashMap, HashSet};

use chrono::NaiveDate;
use contracts::{AggregateResults, Amount, DatePoint, GroupTotal, ReportConfig};
use tracing::instrument;

use crate::filter::FilteredView;

/// Aggregation options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Aggregator {
    /// Length of the product ranking
    top_n: usize,
    /// Also compute sales per state (for the state map)
    include_states: bool,
}

impl Default for Aggregator {
    fn default() -> Self {
        Self {
            top_n: 10,
            include_states: false,
        }
    }
}

impl Aggregator {
    pub fn new(top_n: usize, include_states: bool) -> Self {
        Self {
            top_n,
            include_states,
        }
    }

    pub fn from_report(report: &ReportConfig) -> Self {
        Self::new(report.top_n, report.show_state_map)
    }

    pub fn top_n(&self) -> usize {
        self.top_n
    }

    #[instrument(name = "aggregate", skip_all, fields(rows = view.len()))]
    pub fn aggregate(&self, view: &FilteredView<'_>) -> AggregateResults {
        let mut total_sales = Amount::ZERO;
        let mut total_profit = Amount::ZERO;
        let mut orders: HashSet<&str> = HashSet::new();
        let mut by_category: BTreeMap<&str, Amount> = BTreeMap::new();
        let mut by_date: BTreeMap<NaiveDate, Amount> = BTreeMap::new();
        let mut by_product = FirstSeenTotals::default();
        let mut by_state = FirstSeenTotals::default();

        for record in view.iter() {
            total_sales += record.sales;
            total_profit += record.profit;
            orders.insert(&record.order_id);
            *by_category.entry(&record.category).or_default() += record.sales;
            *by_date.entry(record.order_date).or_default() += record.sales;
            by_product.add(&record.product_name, record.sales);
            if self.include_states {
                by_state.add(&record.state, record.sales);
            }
        }

        AggregateResults {
            record_count: view.len(),
            total_sales,
            total_profit,
            order_count: orders.len(),
            sales_by_category: by_category
                .into_iter()
                .map(|(key, sales)| GroupTotal::new(key, sales))
                .collect(),
            sales_over_time: by_date
                .into_iter()
                .map(|(date, sales)| DatePoint { date, sales })
                .collect(),
            top_products: by_product.ranked(Some(self.top_n)),
            sales_by_state: self.include_states.then(|| by_state.ranked(None)),
        }
    }
}

/// Group sums that remember first appearance, for deterministic tie-breaks
#[derive(Default)]
struct FirstSeenTotals<'a> {
    index: HashMap<&'a str, usize>,
    totals: Vec<(&'a str, Amount)>,
}

impl<'a> FirstSeenTotals<'a> {
    fn add(&mut self, key: &'a str, amount: Amount) {
        match self.index.get(key) {
            Some(&slot) => self.totals[slot].1 += amount,
            None => {
                self.index.insert(key, self.totals.len());
                self.totals.push((key, amount));
            }
        }
    }

    /// Sorted by sales descending; the stable sort keeps first-seen order on ties
    fn ranked(mut self, limit: Option<usize>) -> Vec<GroupTotal> {
        self.totals.sort_by(|a, b| b.1.cmp(&a.1));
        if let Some(limit) = limit {
            self.totals.truncate(limit);
        }
        self.totals
            .into_iter()
            .map(|(key, sales)| GroupTotal::new(key, sales))
            .collect()
    }
}
