use std::collections::BTreeMap;

use serde::Serialize;
use thiserror::Error;
use validator::ValidationErrors;

use crate::models::thinking::{Citation, TokenUsage};

/// Startup problems that disable an upstream integration.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing {0} in environment (.env)")]
    MissingCredential(&'static str),

    #[error("{var} must be an http(s) URL, got {value:?}")]
    InvalidUrl { var: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    HttpClient(String),
}

/// Field name to message, returned to clients as `{"errors": {...}}`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Error)]
#[serde(transparent)]
#[error("validation failed for {} field(s)", .0.len())]
pub struct FormErrors(BTreeMap<String, String>);

impl FormErrors {
    /// Keeps the first message of each failing field; fields that already
    /// have one are left alone. Struct-level errors are filed under the field
    /// named by their `field` param.
    pub fn extend(&mut self, errors: &ValidationErrors) {
        for (field, list) in errors.field_errors() {
            let field: &str = &field;
            for error in list.iter() {
                let target = error
                    .params
                    .get("field")
                    .and_then(|v| v.as_str())
                    .unwrap_or(field);
                let message = match error.message.as_deref() {
                    Some(message) => message.to_string(),
                    None => error.code.to_string(),
                };
                self.0.entry(target.to_string()).or_insert(message);
            }
        }
    }

    pub fn get(&self, field: &str) -> Option<&str> {
        self.0.get(field).map(String::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }
}

/// Failures talking to Apollo or OpenAI, rendered to the client as one string.
#[derive(Debug, Error)]
pub enum UpstreamError {
    #[error("Request failed: {0}")]
    Transport(#[from] reqwest::Error),

    #[error("Upstream returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("Failed to parse upstream response: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Upstream returned an empty body")]
    EmptyBody,

    /// The model answered without any text. Whatever else it returned is kept.
    #[error("Empty response from model")]
    EmptyResponse {
        usage: Option<TokenUsage>,
        citations: Vec<Citation>,
    },
}

/// Longest slice of an upstream error body echoed back to clients.
const BODY_EXCERPT_LEN: usize = 300;

impl UpstreamError {
    pub fn status(status: u16, body: &str) -> Self {
        let body = body.trim();
        let excerpt = match body.char_indices().nth(BODY_EXCERPT_LEN) {
            Some((idx, _)) => format!("{}…", &body[..idx]),
            None => body.to_string(),
        };
        Self::Status { status, body: excerpt }
    }
}
