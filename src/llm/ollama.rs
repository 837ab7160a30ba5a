use super::{client::LlmClient, types::*};
use crate::{Error, Result, config::Config};
use async_trait::async_trait;
use reqwest::StatusCode;
use serde::{Deserialize, Serialize};
use std::time::Duration;
use tracing::{debug, warn};

pub const DEFAULT_BASE_URL: &str = "http://localhost:11434";

/// Client for a locally hosted Ollama model server.
pub struct OllamaClient {
    http: reqwest::Client,
    base_url: String,
    generate_timeout: Duration,
    health_timeout: Duration,
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: String,
    stream: bool,
    options: GenerateOptions,
}

#[derive(Debug, Serialize)]
struct GenerateOptions {
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

#[derive(Debug, Deserialize)]
struct TagsResponse {
    #[serde(default)]
    models: Vec<ModelInfo>,
}

impl OllamaClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
            generate_timeout: Duration::from_secs(120),
            health_timeout: Duration::from_secs(5),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(config.local.base_url.clone())
            .with_timeouts(config.timeouts.generate(), config.timeouts.health())
    }

    pub fn with_timeouts(mut self, generate: Duration, health: Duration) -> Self {
        self.generate_timeout = generate;
        self.health_timeout = health;
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// The server has no system role, so instructions are folded into the prompt.
    pub fn compose_prompt(request: &InferenceRequest) -> String {
        match request.system_instructions() {
            Some(system) => format!("System: {}\n\nUser: {}", system, request.prompt),
            None => request.prompt.clone(),
        }
    }

    /// True iff the tags endpoint answers 200 within the health timeout.
    pub async fn check_connection(&self) -> bool {
        match self.get_tags().await {
            Ok(response) => response.status() == StatusCode::OK,
            Err(e) => {
                debug!("Health check against {} failed: {}", self.base_url, e);
                false
            }
        }
    }

    /// Names of the installed models in listing order; empty on any failure.
    pub async fn list_models(&self) -> Vec<String> {
        match self.fetch_models().await {
            Ok(models) => models.into_iter().map(|m| m.name).collect(),
            Err(e) => {
                warn!("Failed to list models from {}: {}", self.base_url, e);
                Vec::new()
            }
        }
    }

    async fn fetch_models(&self) -> Result<Vec<ModelInfo>> {
        let response = self.get_tags().await?;
        if response.status() != StatusCode::OK {
            return Err(Error::llm(format!(
                "model listing returned status {}",
                response.status()
            )));
        }
        let tags: TagsResponse = response.json().await?;
        Ok(tags.models)
    }

    async fn get_tags(&self) -> Result<reqwest::Response> {
        let response = self
            .http
            .get(format!("{}/api/tags", self.base_url))
            .timeout(self.health_timeout)
            .send()
            .await?;
        Ok(response)
    }
}

#[async_trait]
impl LlmClient for OllamaClient {
    fn backend_name(&self) -> &str {
        "ollama"
    }

    async fn try_generate(&self, request: &InferenceRequest) -> Result<String> {
        let body = GenerateRequest {
            model: &request.model,
            prompt: Self::compose_prompt(request),
            stream: false,
            options: GenerateOptions {
                temperature: request.temperature,
            },
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.base_url))
            .json(&body)
            .timeout(self.generate_timeout)
            .send()
            .await?
            .error_for_status()?;

        let parsed: GenerateResponse = response.json().await?;
        debug!(
            "Received {} chars from ollama model {}",
            parsed.response.len(),
            request.model
        );
        Ok(parsed.response)
    }
}
