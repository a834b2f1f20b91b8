use std::time::Duration;

use crate::error::ConfigError;

pub const DEFAULT_APOLLO_BASE_URL: &str = "https://api.apollo.io/api/v1";
pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-5.2";
pub const DEFAULT_MAX_TOKENS: u32 = 4096;
pub const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// Credentials and endpoint for the Apollo search API.
#[derive(Debug, Clone)]
pub struct ApolloConfig {
    pub api_key: String,
    pub base_url: String,
    pub timeout: Duration,
}

impl ApolloConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    /// Build from an arbitrary variable source so tests never touch the process env.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required_key(&lookup, "APOLLO_API_KEY")?;
        let base_url = base_url(&lookup, "APOLLO_BASE_URL", DEFAULT_APOLLO_BASE_URL)?;

        Ok(Self {
            api_key,
            base_url,
            timeout: parse_duration_secs(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        })
    }
}

/// Credentials, endpoint and model settings for the OpenAI API.
#[derive(Debug, Clone)]
pub struct OpenAiConfig {
    pub api_key: String,
    pub base_url: String,
    pub model: String,
    pub max_tokens: u32,
    pub timeout: Duration,
}

impl OpenAiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(env_lookup)
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let api_key = required_key(&lookup, "OPEN_AI_API_KEY")?;
        let base_url = base_url(&lookup, "OPENAI_BASE_URL", DEFAULT_OPENAI_BASE_URL)?;
        let model = lookup("OPENAI_MODEL")
            .map(|m| m.trim().to_string())
            .filter(|m| !m.is_empty())
            .unwrap_or_else(|| DEFAULT_OPENAI_MODEL.to_string());
        let max_tokens = lookup("OPENAI_MAX_TOKENS")
            .and_then(|v| v.trim().parse().ok())
            .filter(|&n: &u32| n > 0)
            .unwrap_or(DEFAULT_MAX_TOKENS);

        Ok(Self {
            api_key,
            base_url,
            model,
            max_tokens,
            timeout: parse_duration_secs(&lookup, "HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS),
        })
    }
}

fn env_lookup(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

fn required_key<F>(lookup: &F, var: &'static str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .ok_or(ConfigError::MissingCredential(var))
}

fn base_url<F>(lookup: &F, var: &'static str, default: &str) -> Result<String, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let url = lookup(var)
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| default.to_string());

    if !(url.starts_with("http://") || url.starts_with("https://")) {
        return Err(ConfigError::InvalidUrl { var, value: url });
    }

    Ok(url.trim_end_matches('/').to_string())
}

fn parse_duration_secs<F>(lookup: &F, var: &str, default: u64) -> Duration
where
    F: Fn(&str) -> Option<String>,
{
    lookup(var)
        .and_then(|v| v.trim().parse().ok())
        .map(Duration::from_secs)
        .unwrap_or_else(|| Duration::from_secs(default))
}
