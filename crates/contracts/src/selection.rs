//! Filter selection - user-controlled region/category sets

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::OrderRecord;

/// Categorical dimension that can be filtered on
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    Region,
    Category,
}

impl Dimension {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Region => "region",
            Self::Category => "category",
        }
    }

    /// Value of this dimension on a record
    pub fn value_of<'a>(&self, record: &'a OrderRecord) -> &'a str {
        match self {
            Self::Region => &record.region,
            Self::Category => &record.category,
        }
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Pair of allowed value sets
///
/// A record passes when its region AND its category are both allowed.
/// An empty set allows nothing.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FilterSelection {
    pub regions: BTreeSet<String>,
    pub categories: BTreeSet<String>,
}

impl FilterSelection {
    pub fn new<R, C>(regions: R, categories: C) -> Self
    where
        R: IntoIterator,
        R::Item: Into<String>,
        C: IntoIterator,
        C::Item: Into<String>,
    {
        Self {
            regions: regions.into_iter().map(Into::into).collect(),
            categories: categories.into_iter().map(Into::into).collect(),
        }
    }

    /// Allowed set for a dimension
    pub fn values(&self, dimension: Dimension) -> &BTreeSet<String> {
        match dimension {
            Dimension::Region => &self.regions,
            Dimension::Category => &self.categories,
        }
    }

    /// Replace the allowed set for one dimension
    pub fn with_values<I>(mut self, dimension: Dimension, values: I) -> Self
    where
        I: IntoIterator,
        I::Item: Into<String>,
    {
        let set = values.into_iter().map(Into::into).collect();
        match dimension {
            Dimension::Region => self.regions = set,
            Dimension::Category => self.categories = set,
        }
        self
    }

    pub fn matches(&self, record: &OrderRecord) -> bool {
        self.regions.contains(&record.region) && self.categories.contains(&record.category)
    }

    /// True when at least one dimension allows nothing
    pub fn is_degenerate(&self) -> bool {
        self.regions.is_empty() || self.categories.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_values_replaces_one_dimension() {
        let selection = FilterSelection::new(["East", "West"], ["Technology"])
            .with_values(Dimension::Region, ["Central"]);
        assert_eq!(selection.regions.len(), 1);
        assert!(selection.regions.contains("Central"));
        assert!(selection.categories.contains("Technology"));
    }

    #[test]
    fn test_degenerate_selection() {
        let selection = FilterSelection::new(["East"], Vec::<String>::new());
        assert!(selection.is_degenerate());
        assert!(!FilterSelection::new(["East"], ["Furniture"]).is_degenerate());
    }
}
