//! Distinct dimension values observed in the full record set.

use std::collections::HashSet;

use contracts::{ContractError, Dimension, FilterSelection, OrderRecord};

/// Selectable values per dimension, in order of first appearance
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ObservedValues {
    pub regions: Vec<String>,
    pub categories: Vec<String>,
}

impl ObservedValues {
    pub fn from_records(records: &[OrderRecord]) -> Self {
        Self {
            regions: distinct(records, Dimension::Region),
            categories: distinct(records, Dimension::Category),
        }
    }

    pub fn values(&self, dimension: Dimension) -> &[String] {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Category => &self.categories,
        }
    }

    /// Everything selected
    pub fn default_selection(&self) -> FilterSelection {
        FilterSelection::new(self.regions.iter().cloned(), self.categories.iter().cloned())
    }

    /// Reject values that never appear in the loaded records
    pub fn validate(&self, selection: &FilterSelection) -> Result<(), ContractError> {
        for dimension in [Dimension::Region, Dimension::Category] {
            let known = self.values(dimension);
            if let Some(value) = selection
                .values(dimension)
                .iter()
                .find(|v| !known.contains(v))
            {
                return Err(ContractError::UnknownSelection {
                    dimension,
                    value: value.clone(),
                });
            }
        }
        Ok(())
    }
}

fn distinct(records: &[OrderRecord], dimension: Dimension) -> Vec<String> {
    let mut seen = HashSet::new();
    records
        .iter()
        .map(|r| dimension.value_of(r))
        .filter(|v| seen.insert(*v))
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::order;

    #[test]
    fn test_first_seen_order() {
        let records = vec![
            order("O-1", "South", "Furniture", 1),
            order("O-2", "West", "Office Supplies", 1),
            order("O-3", "South", "Technology", 1),
            order("O-4", "Central", "Furniture", 1),
        ];
        let observed = ObservedValues::from_records(&records);
        assert_eq!(observed.regions, vec!["South", "West", "Central"]);
        assert_eq!(
            observed.categories,
            vec!["Furniture", "Office Supplies", "Technology"]
        );
    }

    #[test]
    fn test_validate_rejects_unknown_value() {
        let records = vec![order("O-1", "East", "Tech", 1)];
        let observed = ObservedValues::from_records(&records);

        assert!(observed.validate(&observed.default_selection()).is_ok());
        assert!(observed
            .validate(&FilterSelection::new(Vec::<String>::new(), Vec::<String>::new()))
            .is_ok());

        let err = observed
            .validate(&FilterSelection::new(["East"], ["Toys"]))
            .unwrap_err();
        assert!(matches!(
            err,
            ContractError::UnknownSelection {
                dimension: Dimension::Category,
                ..
            }
        ));
    }
}
