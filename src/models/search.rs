use serde::{Deserialize, Serialize};

use crate::models::PageSpec;
use crate::models::records::{CompanyRecord, PersonRecord};

/// A scalar form value as it arrives over JSON or a urlencoded body.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawScalar {
    Int(i64),
    Float(f64),
    Text(String),
    Other(serde_json::Value),
}

/// A free-text form value. Anything that is not a string or number is kept
/// so it can be reported against its field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Text(String),
    Number(serde_json::Number),
    Other(serde_json::Value),
}

/// One entry of a list field.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawItem {
    Text(String),
    Other(serde_json::Value),
}

/// List values: a JSON array, a single value, or repeated form keys.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawList {
    Many(Vec<RawItem>),
    One(RawItem),
}

impl RawList {
    pub fn into_items(self) -> Vec<RawItem> {
        match self {
            Self::Many(items) => items,
            Self::One(item) => vec![item],
        }
    }
}

/// Combined search form accepted by both company and people search.
///
/// Every field is optional. Fields that only one search uses are accepted by
/// both endpoints and routed by the query builder.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct SearchForm {
    pub company_name: Option<RawText>,
    /// Comma-separated company domains.
    pub domains: Option<RawText>,
    pub locations_included: Option<RawText>,
    pub locations_excluded: Option<RawText>,
    pub employees_min: Option<RawScalar>,
    pub employees_max: Option<RawScalar>,
    /// Apollo industry tag ids to include.
    pub industries: Option<RawList>,
    pub industries_exclude: Option<RawList>,
    pub organization_job_titles: Option<RawText>,
    pub organization_job_locations: Option<RawText>,
    pub lookalike_organization_ids: Option<RawText>,
    /// Revenue bounds in millions of USD.
    pub revenue_min: Option<RawScalar>,
    pub revenue_max: Option<RawScalar>,
    pub organization_keyword: Option<RawText>,
    pub organization_id: Option<RawText>,
    pub organization_ids: Option<RawList>,
    /// People search only.
    pub job_titles: Option<RawList>,
    /// People search only.
    pub seniorities: Option<RawList>,
    pub page: Option<RawScalar>,
    pub per_page: Option<RawScalar>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CompanySearchResponse {
    pub companies: Vec<CompanyRecord>,
    pub total_count: u64,
    pub page: u32,
    pub per_page: u32,
    pub error: Option<String>,
}

impl CompanySearchResponse {
    /// Empty result carrying an upstream failure message.
    pub fn failed(page: PageSpec, error: String) -> Self {
        Self {
            companies: Vec::new(),
            total_count: 0,
            page: page.page,
            per_page: page.per_page,
            error: Some(error),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PeopleSearchResponse {
    pub people: Vec<PersonRecord>,
    pub total_count: u64,
    pub page: u32,
    pub per_page: u32,
    pub error: Option<String>,
}

impl PeopleSearchResponse {
    pub fn failed(page: PageSpec, error: String) -> Self {
        Self {
            people: Vec::new(),
            total_count: 0,
            page: page.page,
            per_page: page.per_page,
            error: Some(error),
        }
    }
}
