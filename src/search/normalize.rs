use std::borrow::Cow;

use validator::{Validate, ValidationError, ValidationErrors};

use crate::error::FormErrors;
use crate::models::PageSpec;
use crate::models::choices::{self, INDUSTRIES, JOB_TITLES, SENIORITIES};
use crate::models::search::{RawItem, RawList, RawScalar, RawText, SearchForm};
use crate::search::{FilterField, FilterValue, IntRange, NormalizedSearch, SearchFilter};

const NOT_A_STRING: &str = "Not a valid string.";
const NOT_AN_INTEGER: &str = "Enter a whole number.";

fn invalid(message: &'static str) -> ValidationError {
    ValidationError::new("invalid").with_message(Cow::Borrowed(message))
}

fn invalid_choice(value: &str) -> ValidationError {
    ValidationError::new("invalid_choice").with_message(Cow::Owned(format!(
        "Select a valid choice. {value} is not one of the available choices."
    )))
}

/// Splits on commas, trims each segment and drops the empty ones.
/// Order is preserved and duplicates are kept.
pub fn split_comma(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

/// Trimmed free text; blank is `None`. Numbers are read as their decimal text.
pub fn parse_text(raw: Option<&RawText>) -> Result<Option<String>, ValidationError> {
    let text = match raw {
        None => return Ok(None),
        Some(RawText::Text(s)) => s.trim().to_string(),
        Some(RawText::Number(n)) => n.to_string(),
        Some(RawText::Other(_)) => return Err(invalid(NOT_A_STRING)),
    };
    Ok(Some(text).filter(|s| !s.is_empty()))
}

fn comma_field(raw: Option<&RawText>) -> Result<Vec<String>, ValidationError> {
    Ok(parse_text(raw)?.map(|s| split_comma(&s)).unwrap_or_default())
}

/// Trimmed, non-blank entries of a list field. The first entry that is not a
/// string comes back as the error.
fn list_items(raw: Option<&RawList>) -> Result<Vec<String>, serde_json::Value> {
    let mut values = Vec::new();
    for item in raw.cloned().map(RawList::into_items).unwrap_or_default() {
        match item {
            RawItem::Text(s) => {
                let s = s.trim();
                if !s.is_empty() {
                    values.push(s.to_string());
                }
            }
            RawItem::Other(value) => return Err(value),
        }
    }
    Ok(values)
}

fn selected(raw: Option<&RawList>) -> Result<Vec<String>, ValidationError> {
    list_items(raw).map_err(|value| invalid_choice(&value.to_string()))
}

/// Parses an integer form value. Blank input is `None`; `"10.0"` and `10.0`
/// are accepted as 10.
pub fn parse_integer(raw: Option<&RawScalar>) -> Result<Option<i64>, ValidationError> {
    match raw {
        None => Ok(None),
        Some(RawScalar::Int(n)) => Ok(Some(*n)),
        Some(RawScalar::Float(f)) => {
            if f.is_finite() && f.fract() == 0.0 && f.abs() < i64::MAX as f64 {
                Ok(Some(*f as i64))
            } else {
                Err(invalid(NOT_AN_INTEGER))
            }
        }
        Some(RawScalar::Text(s)) => {
            let s = s.trim();
            if s.is_empty() {
                return Ok(None);
            }
            strip_zero_fraction(s)
                .parse()
                .map(Some)
                .map_err(|_| invalid(NOT_AN_INTEGER))
        }
        Some(RawScalar::Other(serde_json::Value::Null)) => Ok(None),
        Some(RawScalar::Other(_)) => Err(invalid(NOT_AN_INTEGER)),
    }
}

fn strip_zero_fraction(s: &str) -> &str {
    match s.split_once('.') {
        Some((whole, frac)) if frac.chars().all(|c| c == '0') => whole,
        _ => s,
    }
}

/// The search form once every value has its proper type. Field rules are
/// checked by [`Validate`].
#[derive(Debug, Default, Validate)]
#[validate(schema(function = "employees_in_order", skip_on_field_errors = false))]
#[validate(schema(function = "revenue_in_order", skip_on_field_errors = false))]
pub struct SearchInput {
    pub company_name: Option<String>,
    pub domains: Vec<String>,
    pub locations_included: Vec<String>,
    pub locations_excluded: Vec<String>,
    #[validate(range(min = 1, message = "Ensure this value is greater than or equal to 1."))]
    pub employees_min: Option<i64>,
    pub employees_max: Option<i64>,
    #[validate(custom(function = "industry_choices"))]
    pub industries: Vec<String>,
    #[validate(custom(function = "industry_choices"))]
    pub industries_exclude: Vec<String>,
    pub organization_job_titles: Vec<String>,
    pub organization_job_locations: Vec<String>,
    pub lookalike_organization_ids: Vec<String>,
    #[validate(range(min = 0, message = "Ensure this value is greater than or equal to 0."))]
    pub revenue_min: Option<i64>,
    pub revenue_max: Option<i64>,
    pub organization_keyword: Vec<String>,
    pub organization_ids: Vec<String>,
    #[validate(custom(function = "job_title_choices"))]
    pub job_titles: Vec<String>,
    #[validate(custom(function = "seniority_choices"))]
    pub seniorities: Vec<String>,
    pub page: PageSpec,
}

fn choice_of(options: &[(&str, &str)], values: &[String]) -> Result<(), ValidationError> {
    match values.iter().find(|v| !choices::is_valid(options, v.as_str())) {
        Some(value) => Err(invalid_choice(value)),
        None => Ok(()),
    }
}

fn industry_choices(values: &[String]) -> Result<(), ValidationError> {
    choice_of(INDUSTRIES, values)
}

fn job_title_choices(values: &[String]) -> Result<(), ValidationError> {
    choice_of(JOB_TITLES, values)
}

fn seniority_choices(values: &[String]) -> Result<(), ValidationError> {
    choice_of(SENIORITIES, values)
}

/// A maximum below its minimum is reported on the maximum's field.
fn in_order(
    (min_field, min): (&'static str, Option<i64>),
    (max_field, max): (&'static str, Option<i64>),
) -> Result<(), ValidationError> {
    match (min, max) {
        (Some(lo), Some(hi)) if hi < lo => {
            let mut error = ValidationError::new("min_value").with_message(Cow::Owned(format!(
                "Ensure this value is greater than or equal to {min_field}."
            )));
            error.add_param(Cow::Borrowed("field"), &max_field);
            Err(error)
        }
        _ => Ok(()),
    }
}

fn employees_in_order(input: &SearchInput) -> Result<(), ValidationError> {
    in_order(
        ("employees_min", input.employees_min),
        ("employees_max", input.employees_max),
    )
}

fn revenue_in_order(input: &SearchInput) -> Result<(), ValidationError> {
    in_order(
        ("revenue_min", input.revenue_min),
        ("revenue_max", input.revenue_max),
    )
}

/// Collects type errors while reading the raw form. A field that fails
/// falls back to its empty value.
struct Coercion {
    errors: ValidationErrors,
}

impl Coercion {
    fn take<T: Default>(&mut self, field: &'static str, result: Result<T, ValidationError>) -> T {
        result.unwrap_or_else(|e| {
            self.errors.add(field, e);
            T::default()
        })
    }

    fn read(&mut self, form: &SearchForm) -> SearchInput {
        let organization_id = self.take("organization_id", parse_text(form.organization_id.as_ref()));
        let organization_ids = self.take(
            "organization_ids",
            list_items(form.organization_ids.as_ref()).map_err(|_| invalid(NOT_A_STRING)),
        );

        let page = self.take("page", parse_integer(form.page.as_ref()));
        let per_page = self.take("per_page", parse_integer(form.per_page.as_ref()));

        SearchInput {
            company_name: self.take("company_name", parse_text(form.company_name.as_ref())),
            domains: self.take("domains", comma_field(form.domains.as_ref())),
            locations_included: self
                .take("locations_included", comma_field(form.locations_included.as_ref())),
            locations_excluded: self
                .take("locations_excluded", comma_field(form.locations_excluded.as_ref())),
            employees_min: self.take("employees_min", parse_integer(form.employees_min.as_ref())),
            employees_max: self.take("employees_max", parse_integer(form.employees_max.as_ref())),
            industries: self.take("industries", selected(form.industries.as_ref())),
            industries_exclude: self
                .take("industries_exclude", selected(form.industries_exclude.as_ref())),
            organization_job_titles: self.take(
                "organization_job_titles",
                comma_field(form.organization_job_titles.as_ref()),
            ),
            organization_job_locations: self.take(
                "organization_job_locations",
                comma_field(form.organization_job_locations.as_ref()),
            ),
            lookalike_organization_ids: self.take(
                "lookalike_organization_ids",
                comma_field(form.lookalike_organization_ids.as_ref()),
            ),
            revenue_min: self.take("revenue_min", parse_integer(form.revenue_min.as_ref())),
            revenue_max: self.take("revenue_max", parse_integer(form.revenue_max.as_ref())),
            organization_keyword: self
                .take("organization_keyword", comma_field(form.organization_keyword.as_ref())),
            organization_ids: organization_id.into_iter().chain(organization_ids).collect(),
            job_titles: self.take("job_titles", selected(form.job_titles.as_ref())),
            seniorities: self.take("seniorities", selected(form.seniorities.as_ref())),
            page: PageSpec::new(page, per_page),
        }
    }
}

impl SearchInput {
    fn into_search(self) -> NormalizedSearch {
        let mut filter = SearchFilter::new();

        if let Some(name) = self.company_name {
            filter.insert(FilterField::CompanyName, FilterValue::Text(name));
        }

        let lists = [
            (FilterField::Domains, self.domains),
            (FilterField::LocationsIncluded, self.locations_included),
            (FilterField::LocationsExcluded, self.locations_excluded),
            (FilterField::Industries, self.industries),
            (FilterField::IndustriesExclude, self.industries_exclude),
            (FilterField::OrganizationJobTitles, self.organization_job_titles),
            (FilterField::OrganizationJobLocations, self.organization_job_locations),
            (FilterField::LookalikeOrganizationIds, self.lookalike_organization_ids),
            (FilterField::OrganizationKeyword, self.organization_keyword),
            (FilterField::OrganizationIds, self.organization_ids),
            (FilterField::JobTitles, self.job_titles),
            (FilterField::Seniorities, self.seniorities),
        ];
        for (field, values) in lists {
            filter.insert(field, FilterValue::List(values));
        }

        let ranges = [
            (FilterField::EmployeeCount, self.employees_min, self.employees_max),
            (FilterField::Revenue, self.revenue_min, self.revenue_max),
        ];
        for (field, min, max) in ranges {
            filter.insert(field, FilterValue::Range(IntRange { min, max }));
        }

        NormalizedSearch {
            filter,
            page: self.page,
        }
    }
}

/// Turns the raw combined form into typed filters plus pagination.
///
/// Type errors are collected first, then the field rules run; every failing
/// field is reported together.
pub fn normalize(form: &SearchForm) -> Result<NormalizedSearch, FormErrors> {
    let mut coercion = Coercion {
        errors: ValidationErrors::new(),
    };
    let input = coercion.read(form);

    let mut errors = FormErrors::default();
    errors.extend(&coercion.errors);
    if let Err(e) = input.validate() {
        errors.extend(&e);
    }

    if errors.is_empty() {
        Ok(input.into_search())
    } else {
        Err(errors)
    }
}
