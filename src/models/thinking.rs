use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// How much internal reasoning the model spends before answering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReasoningEffort {
    None,
    Low,
    Medium,
    #[default]
    High,
    Xhigh,
}

impl ReasoningEffort {
    /// Trims and lowercases the input; anything unrecognised becomes `High`.
    pub fn parse_lenient(raw: &str) -> Self {
        match raw.trim().to_ascii_lowercase().as_str() {
            "none" => Self::None,
            "low" => Self::Low,
            "medium" => Self::Medium,
            "high" => Self::High,
            "xhigh" => Self::Xhigh,
            _ => Self::default(),
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::None => "none",
            Self::Low => "low",
            Self::Medium => "medium",
            Self::High => "high",
            Self::Xhigh => "xhigh",
        }
    }

    /// `None` means the effort parameter is left off the request entirely.
    pub fn as_request_param(self) -> Option<&'static str> {
        match self {
            Self::None => None,
            other => Some(other.as_str()),
        }
    }
}

impl fmt::Display for ReasoningEffort {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Body of `POST /api/thinking`.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ThinkingForm {
    pub prompt: Option<String>,
    pub reasoning_effort: Option<String>,
    #[serde(deserialize_with = "checkbox")]
    pub use_web_search: bool,
}

/// Accepts JSON booleans as well as the HTML checkbox value `"on"`.
fn checkbox<'de, D: Deserializer<'de>>(d: D) -> Result<bool, D::Error> {
    Ok(match serde_json::Value::deserialize(d)? {
        serde_json::Value::Bool(b) => b,
        serde_json::Value::String(s) => matches!(s.trim(), "on" | "true" | "1"),
        _ => false,
    })
}

/// A web page the model cited in a web-search answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Citation {
    pub url: String,
    pub title: String,
    pub start_index: u64,
    pub end_index: u64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TokenUsage {
    pub prompt_tokens: u64,
    pub completion_tokens: u64,
    pub total_tokens: u64,
}

/// Successful model answer.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ThinkingReply {
    pub reply: String,
    pub reasoning: String,
    pub citations: Vec<Citation>,
    pub usage: Option<TokenUsage>,
}

/// Payload returned by `POST /api/thinking`.
#[derive(Debug, Clone, Serialize)]
pub struct ThinkingResponse {
    pub prompt: String,
    pub reasoning_effort: ReasoningEffort,
    pub use_web_search: bool,
    pub reply: Option<String>,
    pub reasoning: Option<String>,
    pub citations: Vec<Citation>,
    pub usage: Option<TokenUsage>,
    pub error: Option<String>,
}

impl ThinkingResponse {
    pub fn new(prompt: String, reasoning_effort: ReasoningEffort, use_web_search: bool) -> Self {
        Self {
            prompt,
            reasoning_effort,
            use_web_search,
            reply: None,
            reasoning: None,
            citations: Vec::new(),
            usage: None,
            error: None,
        }
    }
}
