//! Decoding of chat-completions and responses API bodies into [`ThinkingReply`].

use serde::Deserialize;

use crate::error::UpstreamError;
use crate::models::thinking::{Citation, ThinkingReply, TokenUsage};

// ── chat/completions ──

#[derive(Debug, Deserialize)]
pub struct ChatCompletion {
    #[serde(default)]
    choices: Option<Vec<Choice>>,
    #[serde(default)]
    usage: Option<UsageCounts>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    #[serde(default)]
    message: Option<ChoiceMessage>,
}

#[derive(Debug, Deserialize)]
struct ChoiceMessage {
    #[serde(default)]
    content: Option<String>,
    /// Some deployments expose the chain of thought here.
    #[serde(default)]
    reasoning_content: Option<String>,
}

/// Token counts from either API; the responses API names them input/output.
#[derive(Debug, Default, Deserialize)]
struct UsageCounts {
    #[serde(default)]
    input_tokens: Option<u64>,
    #[serde(default)]
    output_tokens: Option<u64>,
    #[serde(default)]
    prompt_tokens: Option<u64>,
    #[serde(default)]
    completion_tokens: Option<u64>,
    #[serde(default)]
    total_tokens: Option<u64>,
}

impl From<UsageCounts> for TokenUsage {
    fn from(u: UsageCounts) -> Self {
        let nonzero = |v: Option<u64>| v.filter(|&n| n > 0);
        Self {
            prompt_tokens: nonzero(u.input_tokens).or(u.prompt_tokens).unwrap_or(0),
            completion_tokens: nonzero(u.output_tokens)
                .or(u.completion_tokens)
                .unwrap_or(0),
            total_tokens: u.total_tokens.unwrap_or(0),
        }
    }
}

impl ChatCompletion {
    /// The first choice becomes the reply; no choices at all is an error.
    pub fn into_reply(self) -> Result<ThinkingReply, UpstreamError> {
        let usage = self.usage.map(TokenUsage::from);
        let Some(choice) = self.choices.and_then(|choices| choices.into_iter().next()) else {
            return Err(UpstreamError::EmptyResponse {
                usage,
                citations: Vec::new(),
            });
        };
        let message = choice.message.unwrap_or(ChoiceMessage {
            content: None,
            reasoning_content: None,
        });

        Ok(ThinkingReply {
            reply: message.content.unwrap_or_default().trim().to_string(),
            reasoning: message.reasoning_content.unwrap_or_default().trim().to_string(),
            citations: Vec::new(),
            usage,
        })
    }
}

// ── responses ──

#[derive(Debug, Deserialize)]
pub struct ResponsesBody {
    #[serde(default)]
    output: Option<Vec<OutputItem>>,
    #[serde(default)]
    output_text: Option<String>,
    #[serde(default)]
    usage: Option<UsageCounts>,
}

#[derive(Debug, Deserialize)]
struct OutputItem {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    content: Option<Vec<ContentBlock>>,
    #[serde(default)]
    summary: Option<Vec<ContentBlock>>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    text: Option<String>,
    #[serde(default)]
    annotations: Option<Vec<Annotation>>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(rename = "type", default)]
    kind: Option<String>,
    #[serde(default)]
    url: Option<String>,
    #[serde(default)]
    title: Option<String>,
    #[serde(default)]
    start_index: Option<u64>,
    #[serde(default)]
    end_index: Option<u64>,
}

fn is(kind: &Option<String>, expected: &str) -> bool {
    kind.as_deref() == Some(expected)
}

impl ResponsesBody {
    /// Joins the `output_text` blocks of message items and collects their URL
    /// citations. An empty reply is an error.
    pub fn into_reply(self) -> Result<ThinkingReply, UpstreamError> {
        let mut text_parts = Vec::new();
        let mut reasoning_parts = Vec::new();
        let mut citations = Vec::new();

        for item in self.output.unwrap_or_default() {
            if is(&item.kind, "reasoning") {
                reasoning_parts.extend(
                    item.summary
                        .unwrap_or_default()
                        .into_iter()
                        .filter(|block| is(&block.kind, "summary_text"))
                        .filter_map(|block| block.text),
                );
                continue;
            }
            if !is(&item.kind, "message") {
                continue;
            }

            for block in item.content.unwrap_or_default() {
                if is(&block.kind, "output_text") {
                    text_parts.push(block.text.unwrap_or_default());
                }
                citations.extend(
                    block
                        .annotations
                        .unwrap_or_default()
                        .into_iter()
                        .filter(|ann| is(&ann.kind, "url_citation"))
                        .map(|ann| Citation {
                            url: ann.url.unwrap_or_default(),
                            title: ann.title.unwrap_or_default(),
                            start_index: ann.start_index.unwrap_or(0),
                            end_index: ann.end_index.unwrap_or(0),
                        }),
                );
            }
        }

        if text_parts.is_empty() {
            if let Some(text) = self.output_text {
                text_parts.push(text);
            }
        }

        let usage = self.usage.map(TokenUsage::from);
        let reply = text_parts.join("\n").trim().to_string();
        if reply.is_empty() {
            return Err(UpstreamError::EmptyResponse { usage, citations });
        }

        Ok(ThinkingReply {
            reply,
            reasoning: reasoning_parts.join("\n").trim().to_string(),
            citations,
            usage,
        })
    }
}
