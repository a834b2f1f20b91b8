//! Request normalization and response shaping for the Apollo search API.
//!
//! Raw form input goes through [`normalize::normalize`] into a
//! [`NormalizedSearch`], which [`query`] turns into either a company or a
//! person query. Upstream JSON comes back through [`shape`].

pub mod normalize;
pub mod query;
pub mod shape;

use std::collections::BTreeMap;

use serde::Serialize;

use crate::models::PageSpec;

/// Every filter the combined search form can produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FilterField {
    CompanyName,
    Domains,
    LocationsIncluded,
    LocationsExcluded,
    EmployeeCount,
    Industries,
    IndustriesExclude,
    OrganizationJobTitles,
    OrganizationJobLocations,
    LookalikeOrganizationIds,
    Revenue,
    OrganizationKeyword,
    OrganizationIds,
    JobTitles,
    Seniorities,
}

/// Inclusive integer bounds; a missing side is unbounded.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct IntRange {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub min: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max: Option<i64>,
}

impl IntRange {
    pub fn is_unbounded(&self) -> bool {
        self.min.is_none() && self.max.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum FilterValue {
    Text(String),
    List(Vec<String>),
    Range(IntRange),
}

impl FilterValue {
    fn is_empty(&self) -> bool {
        match self {
            Self::Text(s) => s.is_empty(),
            Self::List(items) => items.is_empty(),
            Self::Range(range) => range.is_unbounded(),
        }
    }
}

/// Normalized filters for one request. Only non-empty values are ever stored.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchFilter(BTreeMap<FilterField, FilterValue>);

impl SearchFilter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts `value` unless it is empty; returns whether it was stored.
    pub fn insert(&mut self, field: FilterField, value: FilterValue) -> bool {
        if value.is_empty() {
            return false;
        }
        self.0.insert(field, value);
        true
    }

    pub fn get(&self, field: FilterField) -> Option<&FilterValue> {
        self.0.get(&field)
    }

    pub fn contains(&self, field: FilterField) -> bool {
        self.0.contains_key(&field)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (FilterField, &FilterValue)> {
        self.0.iter().map(|(field, value)| (*field, value))
    }
}

/// Output of the shared normalization step, consumed by both query shapes.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct NormalizedSearch {
    pub filter: SearchFilter,
    pub page: PageSpec,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_values_are_never_stored() {
        let mut filter = SearchFilter::new();

        assert!(!filter.insert(FilterField::CompanyName, FilterValue::Text(String::new())));
        assert!(!filter.insert(FilterField::Domains, FilterValue::List(vec![])));
        assert!(!filter.insert(FilterField::Revenue, FilterValue::Range(IntRange::default())));
        assert!(filter.is_empty());

        assert!(filter.insert(
            FilterField::EmployeeCount,
            FilterValue::Range(IntRange { min: Some(1), max: None }),
        ));
        assert_eq!(filter.len(), 1);
    }
}
