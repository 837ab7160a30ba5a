use super::{client::LlmClient, types::*};
use crate::{Error, Result, config::OpenAiConfig};
use async_openai::{
    Client,
    config::OpenAIConfig,
    types::{
        ChatCompletionRequestMessage, ChatCompletionRequestSystemMessageArgs,
        ChatCompletionRequestSystemMessageContent, ChatCompletionRequestUserMessageArgs,
        ChatCompletionRequestUserMessageContent, CreateChatCompletionRequestArgs,
    },
};
use async_trait::async_trait;
use std::time::Duration;
use tracing::debug;

/// Chat-completions client for the OpenAI API.
pub struct OpenAiClient {
    client: Client<OpenAIConfig>,
}

impl OpenAiClient {
    pub fn new(config: &OpenAiConfig, api_key: &str, timeout: Duration) -> Result<Self> {
        let mut openai_config = OpenAIConfig::new().with_api_key(api_key);

        if !config.base_url.is_empty() {
            openai_config = openai_config.with_api_base(config.base_url.clone());
        }

        let http = reqwest::Client::builder().timeout(timeout).build()?;
        let client = Client::with_config(openai_config).with_http_client(http);

        Ok(Self { client })
    }

    /// Role-based messages: system instructions first, then the user prompt.
    pub fn build_messages(request: &InferenceRequest) -> Result<Vec<ChatCompletionRequestMessage>> {
        let mut messages = Vec::with_capacity(2);

        if let Some(system) = request.system_instructions() {
            let msg = ChatCompletionRequestSystemMessageArgs::default()
                .content(ChatCompletionRequestSystemMessageContent::Text(
                    system.to_string(),
                ))
                .build()
                .map_err(|e| Error::llm(format!("Failed to build system message: {}", e)))?;
            messages.push(msg.into());
        }

        let msg = ChatCompletionRequestUserMessageArgs::default()
            .content(ChatCompletionRequestUserMessageContent::Text(
                request.prompt.clone(),
            ))
            .build()
            .map_err(|e| Error::llm(format!("Failed to build user message: {}", e)))?;
        messages.push(msg.into());

        Ok(messages)
    }
}

#[async_trait]
impl LlmClient for OpenAiClient {
    fn backend_name(&self) -> &str {
        "openai"
    }

    async fn try_generate(&self, request: &InferenceRequest) -> Result<String> {
        let messages = Self::build_messages(request)?;

        let openai_request = CreateChatCompletionRequestArgs::default()
            .model(&request.model)
            .messages(messages)
            .temperature(request.temperature)
            .build()?;

        let response = self.client.chat().create(openai_request).await?;

        debug!(
            "Received chat completion response with {} choices",
            response.choices.len()
        );

        let content = response
            .choices
            .into_iter()
            .next()
            .and_then(|choice| choice.message.content)
            .map(|content| content.trim().to_string())
            .unwrap_or_default();

        if content.is_empty() {
            return Err(Error::llm("OpenAI returned no message content"));
        }

        Ok(content)
    }
}
