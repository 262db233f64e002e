//! Filter engine: full record set + selection -> filtered view.

use contracts::{FilterSelection, OrderRecord};
use tracing::instrument;

/// Records matching the current selection
///
/// Borrows from the immutable full record set; rebuilt from scratch on every
/// selection change.
#[derive(Debug, Clone, Default)]
pub struct FilteredView<'a> {
    records: Vec<&'a OrderRecord>,
}

impl<'a> FilteredView<'a> {
    pub fn from_records(records: Vec<&'a OrderRecord>) -> Self {
        Self { records }
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    pub fn records(&self) -> &[&'a OrderRecord] {
        &self.records
    }

    pub fn iter(&self) -> impl Iterator<Item = &'a OrderRecord> + '_ {
        self.records.iter().copied()
    }
}

/// Keep exactly the records whose region and category are both selected
#[instrument(name = "filter_apply", skip_all, fields(total = records.len()))]
pub fn apply<'a>(records: &'a [OrderRecord], selection: &FilterSelection) -> FilteredView<'a> {
    if selection.is_degenerate() {
        return FilteredView::default();
    }
    FilteredView::from_records(records.iter().filter(|r| selection.matches(r)).collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{order, orders};
    use crate::ObservedValues;
    use proptest::prelude::*;

    #[test]
    fn test_region_filter_example() {
        let records = vec![
            order("O-1", "East", "Tech", 100),
            order("O-2", "West", "Tech", 50),
            order("O-3", "East", "Furniture", 30),
        ];
        let selection = FilterSelection::new(["East"], ["Tech", "Furniture"]);
        let view = apply(&records, &selection);
        assert_eq!(view.len(), 2);
        assert!(view.iter().all(|r| r.region == "East"));
    }

    #[test]
    fn test_default_selection_is_identity() {
        let records = vec![
            order("O-1", "East", "Tech", 100),
            order("O-2", "West", "Office Supplies", 50),
        ];
        let selection = ObservedValues::from_records(&records).default_selection();
        let view = apply(&records, &selection);
        assert_eq!(view.len(), records.len());
        for (kept, original) in view.iter().zip(records.iter()) {
            assert!(std::ptr::eq(kept, original));
        }
    }

    #[test]
    fn test_empty_regions_yields_empty_view() {
        let records = vec![order("O-1", "East", "Tech", 100)];
        let selection = FilterSelection::new(Vec::<String>::new(), ["Tech"]);
        assert!(apply(&records, &selection).is_empty());
    }

    #[test]
    fn test_empty_record_set() {
        let selection = FilterSelection::new(["East"], ["Tech"]);
        assert!(apply(&[], &selection).is_empty());
    }

    proptest! {
        #[test]
        fn prop_filter_sound_and_complete(
            records in orders(),
            regions in proptest::collection::btree_set("(East|West|Central|South)", 0..4),
            categories in proptest::collection::btree_set("(Tech|Furniture|Office)", 0..3),
        ) {
            let selection = FilterSelection { regions, categories };
            let view = apply(&records, &selection);

            // soundness
            for r in view.iter() {
                prop_assert!(selection.regions.contains(&r.region));
                prop_assert!(selection.categories.contains(&r.category));
            }
            // completeness: the same records, in source order
            let expected: Vec<*const OrderRecord> = records
                .iter()
                .filter(|r| {
                    selection.regions.contains(&r.region)
                        && selection.categories.contains(&r.category)
                })
                .map(|r| r as *const OrderRecord)
                .collect();
            let actual: Vec<*const OrderRecord> =
                view.iter().map(|r| r as *const OrderRecord).collect();
            prop_assert_eq!(actual, expected);
        }

        #[test]
        fn prop_empty_regions_always_empty(
            records in orders(),
            categories in proptest::collection::btree_set("(Tech|Furniture|Office)", 0..3),
        ) {
            let selection = FilterSelection { regions: Default::default(), categories };
            prop_assert!(apply(&records, &selection).is_empty());
        }
    }
}
