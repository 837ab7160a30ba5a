use super::{client::LlmClient, types::*};
use crate::{Error, Result, config::AnthropicConfig};
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::debug;

pub const API_VERSION: &str = "2023-06-01";

/// Client for the Anthropic messages API.
pub struct AnthropicClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
    max_tokens: u32,
}

#[derive(Debug, Serialize)]
struct MessagesRequest<'a> {
    model: &'a str,
    max_tokens: u32,
    temperature: f32,
    #[serde(skip_serializing_if = "Option::is_none")]
    system: Option<&'a str>,
    messages: Vec<Message<'a>>,
}

#[derive(Debug, Serialize)]
struct Message<'a> {
    role: &'static str,
    content: &'a str,
}

#[derive(Debug, Deserialize)]
struct MessagesResponse {
    #[serde(default)]
    content: Vec<ContentBlock>,
}

#[derive(Debug, Deserialize)]
struct ContentBlock {
    #[serde(rename = "type")]
    block_type: String,
    #[serde(default)]
    text: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ErrorResponse {
    error: ErrorDetail,
}

#[derive(Debug, Deserialize)]
struct ErrorDetail {
    #[serde(rename = "type", default)]
    error_type: String,
    message: String,
}

impl AnthropicClient {
    pub fn new(config: &AnthropicConfig, api_key: &str, timeout: Duration) -> Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(Self {
            http,
            base_url: config.base_url.trim_end_matches('/').to_string(),
            api_key: api_key.to_string(),
            max_tokens: config.max_tokens,
        })
    }

    fn build_body<'a>(&self, request: &'a InferenceRequest) -> MessagesRequest<'a> {
        MessagesRequest {
            model: &request.model,
            max_tokens: self.max_tokens,
            temperature: request.temperature,
            system: request.system_instructions(),
            messages: vec![Message {
                role: "user",
                content: &request.prompt,
            }],
        }
    }
}

#[async_trait]
impl LlmClient for AnthropicClient {
    fn backend_name(&self) -> &str {
        "anthropic"
    }

    async fn try_generate(&self, request: &InferenceRequest) -> Result<String> {
        let response = self
            .http
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", API_VERSION)
            .json(&self.build_body(request))
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            let detail = match serde_json::from_str::<ErrorResponse>(&body) {
                Ok(parsed) => format!("{}: {}", parsed.error.error_type, parsed.error.message),
                Err(_) => body,
            };
            return Err(Error::llm(format!(
                "Anthropic API returned {}: {}",
                status, detail
            )));
        }

        let parsed: MessagesResponse = response.json().await?;
        debug!("Received {} content blocks", parsed.content.len());

        parsed
            .content
            .into_iter()
            .find(|block| block.block_type == "text")
            .and_then(|block| block.text)
            .map(|text| text.trim().to_string())
            .ok_or_else(|| Error::llm("Anthropic response contained no text block"))
    }
}
