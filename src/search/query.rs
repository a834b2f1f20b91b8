use serde::Serialize;
use serde_json::{Map, Value, json};

use crate::search::{FilterField, FilterValue, IntRange, NormalizedSearch};

/// Revenue is entered in millions of USD; Apollo expects whole dollars.
pub const REVENUE_UNIT: i64 = 1_000_000;

/// Which search a query is sent to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchKind {
    Companies,
    People,
}

/// How a list filter is expressed upstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Group {
    AnyOf,
    NoneOf,
}

/// Upstream parameter for a filter in one search kind, or `None` when that
/// search does not use the filter.
fn upstream_param(field: FilterField, kind: SearchKind) -> Option<(&'static str, Group)> {
    use FilterField::*;
    use Group::*;

    match (kind, field) {
        (SearchKind::Companies, CompanyName) => Some(("q_organization_name", AnyOf)),
        (_, Domains) => Some(("q_organization_domains_list", AnyOf)),
        (SearchKind::Companies, LocationsIncluded) => Some(("organization_locations", AnyOf)),
        (SearchKind::Companies, LocationsExcluded) => Some(("organization_not_locations", NoneOf)),
        (SearchKind::Companies, EmployeeCount) => {
            Some(("organization_num_employees_range", AnyOf))
        }
        (SearchKind::Companies, Industries) => Some(("organization_industry_tag_ids", AnyOf)),
        (SearchKind::Companies, IndustriesExclude) => {
            Some(("organization_not_industry_tag_ids", NoneOf))
        }
        (SearchKind::Companies, OrganizationJobTitles) => {
            Some(("q_organization_job_titles", AnyOf))
        }
        (SearchKind::Companies, OrganizationJobLocations) => {
            Some(("organization_job_locations", AnyOf))
        }
        (SearchKind::Companies, LookalikeOrganizationIds) => {
            Some(("lookalike_organization_ids", AnyOf))
        }
        (SearchKind::Companies, Revenue) => Some(("revenue_range", AnyOf)),
        (SearchKind::Companies, OrganizationKeyword) => {
            Some(("q_organization_keyword_tags", AnyOf))
        }
        (SearchKind::People, OrganizationIds) => Some(("organization_ids", AnyOf)),
        (SearchKind::People, JobTitles) => Some(("person_titles", AnyOf)),
        (SearchKind::People, Seniorities) => Some(("person_seniorities", AnyOf)),
        _ => None,
    }
}

/// Request body for an Apollo search.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SearchQuery {
    pub page: u32,
    pub per_page: u32,
    #[serde(flatten)]
    pub filters: Map<String, Value>,
}

impl SearchQuery {
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.filters.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.filters.contains_key(key)
    }
}

fn range_value(field: FilterField, range: &IntRange) -> Value {
    let scale = |n: i64| match field {
        FilterField::Revenue => n.saturating_mul(REVENUE_UNIT),
        _ => n,
    };

    let mut obj = Map::new();
    if let Some(min) = range.min {
        obj.insert("min".to_string(), json!(scale(min)));
    }
    if let Some(max) = range.max {
        obj.insert("max".to_string(), json!(scale(max)));
    }
    Value::Object(obj)
}

fn filter_value(field: FilterField, value: &FilterValue, group: Group) -> Value {
    match value {
        FilterValue::Text(text) => json!(text),
        FilterValue::List(items) => match group {
            Group::AnyOf => json!({ "is_any_of": items }),
            Group::NoneOf => json!({ "is_none_of": items }),
        },
        FilterValue::Range(range) => range_value(field, range),
    }
}

/// Builds the query for `kind`, emitting only the filters that search uses.
pub fn build(search: &NormalizedSearch, kind: SearchKind) -> SearchQuery {
    let filters = search
        .filter
        .iter()
        .filter_map(|(field, value)| {
            let (key, group) = upstream_param(field, kind)?;
            Some((key.to_string(), filter_value(field, value, group)))
        })
        .collect();

    SearchQuery {
        page: search.page.page,
        per_page: search.page.per_page,
        filters,
    }
}

pub fn build_company_query(search: &NormalizedSearch) -> SearchQuery {
    build(search, SearchKind::Companies)
}

pub fn build_person_query(search: &NormalizedSearch) -> SearchQuery {
    build(search, SearchKind::People)
}
