use serde::Deserialize;
use serde_json::Value;

use crate::models::PageSpec;
use crate::models::records::{CompanyRecord, PersonRecord};
use crate::models::search::{CompanySearchResponse, PeopleSearchResponse};

/// Shapes one upstream company object. Never fails: anything that is not a
/// JSON object yields an all-null record.
pub fn shape_company(raw: &Value) -> CompanyRecord {
    if !raw.is_object() {
        return CompanyRecord::default();
    }
    CompanyRecord::deserialize(raw).unwrap_or_default()
}

/// Shapes one upstream person object. `organization_name` falls back to the
/// nested `organization.name`.
pub fn shape_person(raw: &Value) -> PersonRecord {
    if !raw.is_object() {
        return PersonRecord::default();
    }
    let mut person = PersonRecord::deserialize(raw).unwrap_or_default();

    if person.organization_name.is_none() {
        person.organization_name = raw
            .pointer("/organization/name")
            .and_then(Value::as_str)
            .map(str::to_string);
    }
    person
}

/// Items from the first of `keys` that holds an array, followed by the rest.
fn collect_items<'a>(body: &'a Value, keys: &[&str]) -> Vec<&'a Value> {
    keys.iter()
        .filter_map(|key| body.get(*key).and_then(Value::as_array))
        .flatten()
        .collect()
}

/// Total result count: `pagination.total_entries`, then `total_entries`, then
/// the number of records on this page.
fn total_count(body: &Value, fallback: usize) -> u64 {
    let read = |v: Option<&Value>| {
        v.and_then(|v| {
            v.as_u64()
                .or_else(|| v.as_str().and_then(|s| s.trim().parse().ok()))
        })
    };

    read(body.pointer("/pagination/total_entries"))
        .or_else(|| read(body.get("total_entries")))
        .unwrap_or(fallback as u64)
}

/// Shapes a company search response (`organizations` plus `accounts`).
pub fn shape_companies_page(body: &Value, page: PageSpec) -> CompanySearchResponse {
    let companies: Vec<CompanyRecord> = collect_items(body, &["organizations", "accounts"])
        .into_iter()
        .map(shape_company)
        .collect();

    CompanySearchResponse {
        total_count: total_count(body, companies.len()),
        companies,
        page: page.page,
        per_page: page.per_page,
        error: None,
    }
}

/// Shapes a people search response (`people` plus `contacts`).
pub fn shape_people_page(body: &Value, page: PageSpec) -> PeopleSearchResponse {
    let people: Vec<PersonRecord> = collect_items(body, &["people", "contacts"])
        .into_iter()
        .map(shape_person)
        .collect();

    PeopleSearchResponse {
        total_count: total_count(body, people.len()),
        people,
        page: page.page,
        per_page: page.per_page,
        error: None,
    }
}
