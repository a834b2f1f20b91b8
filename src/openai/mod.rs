//! OpenAI client with configurable reasoning effort and optional web search.

pub mod parse;

use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::config::OpenAiConfig;
use crate::error::{ConfigError, UpstreamError};
use crate::models::thinking::{ReasoningEffort, ThinkingReply};
use parse::{ChatCompletion, ResponsesBody};

#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    max_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning_effort: Option<&'static str>,
}

#[derive(Debug, Serialize)]
struct Tool {
    #[serde(rename = "type")]
    kind: &'static str,
}

#[derive(Debug, Serialize)]
struct Reasoning {
    effort: &'static str,
}

#[derive(Debug, Serialize)]
pub(crate) struct ResponsesRequest<'a> {
    model: &'a str,
    input: &'a str,
    tools: Vec<Tool>,
    tool_choice: &'static str,
    max_output_tokens: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    reasoning: Option<Reasoning>,
}

#[derive(Clone)]
pub struct OpenAiClient {
    client: reqwest::Client,
    base_url: String,
    api_key: String,
    model: String,
    max_tokens: u32,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig) -> Result<Self, ConfigError> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| ConfigError::HttpClient(e.to_string()))?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            api_key: config.api_key.clone(),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub(crate) fn chat_request<'a>(
        &'a self,
        prompt: &'a str,
        effort: ReasoningEffort,
    ) -> ChatRequest<'a> {
        ChatRequest {
            model: &self.model,
            messages: vec![ChatMessage {
                role: "user",
                content: prompt,
            }],
            max_tokens: self.max_tokens,
            reasoning_effort: effort.as_request_param(),
        }
    }

    pub(crate) fn responses_request<'a>(
        &'a self,
        prompt: &'a str,
        effort: ReasoningEffort,
    ) -> ResponsesRequest<'a> {
        ResponsesRequest {
            model: &self.model,
            input: prompt,
            tools: vec![Tool { kind: "web_search" }],
            tool_choice: "auto",
            max_output_tokens: self.max_tokens,
            reasoning: effort
                .as_request_param()
                .map(|effort| Reasoning { effort }),
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, UpstreamError>
    where
        B: Serialize,
        R: DeserializeOwned,
    {
        let url = format!("{}{}", self.base_url, path);
        debug!(%url, model = %self.model, "OpenAI request");

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(body)
            .send()
            .await?;

        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(UpstreamError::status(status.as_u16(), &text));
        }
        if text.trim().is_empty() {
            return Err(UpstreamError::EmptyBody);
        }

        Ok(serde_json::from_str(&text)?)
    }

    /// Chat completion with extended thinking.
    pub async fn chat_with_thinking(
        &self,
        prompt: &str,
        effort: ReasoningEffort,
    ) -> Result<ThinkingReply, UpstreamError> {
        let request = self.chat_request(prompt, effort);
        let completion: ChatCompletion = self.post("/chat/completions", &request).await?;
        completion.into_reply()
    }

    /// Responses API call with the `web_search` tool enabled.
    pub async fn chat_with_web_search(
        &self,
        prompt: &str,
        effort: ReasoningEffort,
    ) -> Result<ThinkingReply, UpstreamError> {
        let request = self.responses_request(prompt, effort);
        let body: ResponsesBody = self.post("/responses", &request).await?;
        body.into_reply()
    }

    pub async fn ask(
        &self,
        prompt: &str,
        effort: ReasoningEffort,
        use_web_search: bool,
    ) -> Result<ThinkingReply, UpstreamError> {
        let result = if use_web_search {
            self.chat_with_web_search(prompt, effort).await
        } else {
            self.chat_with_thinking(prompt, effort).await
        };

        if let Err(e) = &result {
            warn!(effort = %effort, use_web_search, "OpenAI call failed: {e}");
        }
        result
    }
}
