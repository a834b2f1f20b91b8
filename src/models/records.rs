use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// Client-facing company. Every field is nullable because Apollo does not
/// guarantee any of them.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CompanyRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub primary_domain: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub logo_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub industry: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub estimated_num_employees: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub founded_year: Option<i64>,
    #[serde(default, deserialize_with = "lenient::int")]
    pub annual_revenue: Option<i64>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub annual_revenue_printed: Option<String>,
}

/// Client-facing person/contact.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PersonRecord {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub first_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub email: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub seniority: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub city: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub state: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub country: Option<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub linkedin_url: Option<String>,
    #[serde(default, deserialize_with = "lenient::phone_numbers")]
    pub phone_numbers: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub organization_name: Option<String>,
}

/// Field decoders that never fail: a value of the wrong type reads as absent.
pub(crate) mod lenient {
    use super::*;

    pub fn string<'de, D: Deserializer<'de>>(d: D) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::String(s) => Some(s),
            Value::Number(n) => Some(n.to_string()),
            _ => None,
        })
    }

    pub fn int<'de, D: Deserializer<'de>>(d: D) -> Result<Option<i64>, D::Error> {
        Ok(match Value::deserialize(d)? {
            Value::Number(n) => n.as_i64().or_else(|| n.as_f64().and_then(float_to_int)),
            Value::String(s) => {
                let s = s.trim();
                s.parse::<i64>()
                    .ok()
                    .or_else(|| s.parse::<f64>().ok().and_then(float_to_int))
            }
            _ => None,
        })
    }

    /// Accepts plain strings or Apollo phone objects (`sanitized_number`, `raw_number`).
    pub fn phone_numbers<'de, D: Deserializer<'de>>(d: D) -> Result<Vec<String>, D::Error> {
        let Value::Array(items) = Value::deserialize(d)? else {
            return Ok(Vec::new());
        };

        Ok(items
            .iter()
            .filter_map(|item| match item {
                Value::String(s) => Some(s.clone()),
                Value::Object(obj) => ["sanitized_number", "raw_number", "number"]
                    .iter()
                    .find_map(|key| obj.get(*key).and_then(Value::as_str))
                    .map(str::to_string),
                _ => None,
            })
            .filter(|s| !s.trim().is_empty())
            .collect())
    }

    fn float_to_int(f: f64) -> Option<i64> {
        (f.is_finite() && f.abs() < i64::MAX as f64).then(|| f.trunc() as i64)
    }
}
