//! Chat-completion client for the enrichment model.
//!
//! One blocking POST per merchant: a fixed system instruction plus the
//! composed user prompt, at a low sampling temperature. No retries — a
//! transport or API failure surfaces as an error and the driver decides the
//! failure scope.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::error::{EnrichError, EnrichResult};

const OPENAI_API_BASE: &str = "https://api.openai.com/v1";
pub const DEFAULT_MODEL: &str = "gpt-4.1";

/// The reply must follow a four-line format, so sampling leans deterministic.
const COMPLETION_TEMPERATURE: f32 = 0.3;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// Token counters reported by the provider for one exchange.
#[derive(Debug, Clone, Copy, Default, Deserialize)]
pub struct TokenUsage {
    #[serde(default)]
    pub prompt_tokens: u64,
    #[serde(default)]
    pub completion_tokens: u64,
    #[serde(default)]
    pub total_tokens: u64,
}

/// One completed exchange: the model's trimmed text plus usage counters.
#[derive(Debug, Clone)]
pub struct Completion {
    pub text: String,
    pub usage: TokenUsage,
}

/// Seam between the pipeline and the completion provider. The production
/// implementation is [`ChatClient`]; tests script their own.
pub trait CompletionBackend {
    fn complete(&self, system: &str, user: &str) -> EnrichResult<Completion>;
}

// OpenAI-compatible wire structs.

#[derive(Serialize)]
struct ChatRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    temperature: f32,
}

#[derive(Serialize)]
struct ChatMessage<'a> {
    role: &'a str,
    content: &'a str,
}

#[derive(Deserialize)]
struct ChatResponse {
    #[serde(default)]
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<TokenUsage>,
}

#[derive(Deserialize)]
struct ChatChoice {
    message: ResponseMessage,
}

#[derive(Deserialize)]
struct ResponseMessage {
    content: String,
}

pub struct ChatClient {
    api_key: String,
    model: String,
    base_url: String,
    client: reqwest::blocking::Client,
}

impl ChatClient {
    pub fn new(api_key: &str, model: &str) -> Self {
        let client = reqwest::blocking::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .unwrap_or_else(|_| reqwest::blocking::Client::new());
        Self {
            api_key: api_key.trim().to_string(),
            model: model.to_string(),
            base_url: OPENAI_API_BASE.to_string(),
            client,
        }
    }

    /// Point the client at a compatible non-default endpoint.
    pub fn with_base_url(mut self, base_url: &str) -> Self {
        self.base_url = base_url.trim_end_matches('/').to_string();
        self
    }
}

impl CompletionBackend for ChatClient {
    fn complete(&self, system: &str, user: &str) -> EnrichResult<Completion> {
        let body = ChatRequest {
            model: &self.model,
            messages: vec![
                ChatMessage {
                    role: "system",
                    content: system,
                },
                ChatMessage {
                    role: "user",
                    content: user,
                },
            ],
            temperature: COMPLETION_TEMPERATURE,
        };
        let payload = serde_json::to_string(&body)?;
        log::debug!("chat request: {payload}");

        let url = format!("{}/chat/completions", self.base_url);
        let res = self
            .client
            .post(&url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()?;

        let status = res.status();
        if !status.is_success() {
            return Err(EnrichError::ModelApi {
                status: status.as_u16(),
                body: res.text().unwrap_or_default(),
            });
        }

        let parsed: ChatResponse = res.json()?;
        let usage = parsed.usage.unwrap_or_default();
        let text = parsed
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content.trim().to_string())
            .ok_or(EnrichError::EmptyCompletion)?;

        Ok(Completion { text, usage })
    }
}
