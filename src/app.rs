//! Wiring between configuration, backends and the prompt chain.

use crate::{
    Error, Result,
    chain::{ChainOptions, PromptChain, Stage, StageBackend},
    config::{BackendKind, Config, Credentials},
    llm::{AnthropicClient, Completion, LlmClient, OllamaClient, OpenAiClient},
};
use std::sync::Arc;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tracing::{info, warn};

/// A ready-to-run chain plus what the pre-flight checks discovered.
pub struct ChainSetup {
    pub chain: PromptChain,
    pub available_models: Vec<String>,
}

pub async fn prepare(config: &Config) -> Result<ChainSetup> {
    match config.backend {
        BackendKind::Local => prepare_local(config).await,
        BackendKind::Hosted => {
            let credentials = Credentials::from_env()?;
            info!("API keys loaded successfully");
            prepare_hosted(config, &credentials)
        }
    }
}

/// Checks the model server, picks models and builds a chain that uses it for
/// both stages.
pub async fn prepare_local(config: &Config) -> Result<ChainSetup> {
    let client = OllamaClient::from_config(config);

    if !client.check_connection().await {
        return Err(Error::BackendUnavailable {
            url: client.base_url().to_string(),
        });
    }
    info!("Connected to model server at {}", client.base_url());

    let available_models = client.list_models().await;
    if available_models.is_empty() {
        return Err(Error::NoModelsAvailable);
    }
    info!("Available models: {}", available_models.join(", "));

    let recommendation_model =
        select_model(config.local.recommendation_model.as_deref(), &available_models)?;
    let risk_model = select_model(config.local.risk_model.as_deref(), &available_models)?;

    let client: Arc<dyn LlmClient> = Arc::new(client);
    let chain = PromptChain::new(
        StageBackend::new(client.clone(), recommendation_model),
        StageBackend::new(client, risk_model),
        ChainOptions::from(&config.chain),
    )?;

    Ok(ChainSetup {
        chain,
        available_models,
    })
}

/// OpenAI recommends, Anthropic critiques. Performs no network calls.
pub fn prepare_hosted(config: &Config, credentials: &Credentials) -> Result<ChainSetup> {
    let timeout = config.timeouts.generate();
    let openai = OpenAiClient::new(&config.hosted.openai, &credentials.openai_api_key, timeout)?;
    let anthropic = AnthropicClient::new(
        &config.hosted.anthropic,
        &credentials.anthropic_api_key,
        timeout,
    )?;

    let chain = PromptChain::new(
        StageBackend::new(Arc::new(openai), config.hosted.openai.model.clone()),
        StageBackend::new(Arc::new(anthropic), config.hosted.anthropic.model.clone()),
        ChainOptions::from(&config.chain),
    )?;

    Ok(ChainSetup {
        chain,
        available_models: Vec::new(),
    })
}

/// The configured model if any, otherwise the first one the server lists.
pub fn select_model(configured: Option<&str>, available: &[String]) -> Result<String> {
    match configured.map(str::trim).filter(|m| !m.is_empty()) {
        Some(model) => {
            if !available.iter().any(|m| m == model) {
                warn!("Configured model '{}' is not listed by the server", model);
            }
            Ok(model.to_string())
        }
        None => available.first().cloned().ok_or(Error::NoModelsAvailable),
    }
}

/// Reads one line of customer input. EOF yields an empty string.
pub async fn read_customer_input<R>(reader: &mut R) -> Result<String>
where
    R: AsyncBufRead + Unpin,
{
    let mut line = String::new();
    reader.read_line(&mut line).await?;
    Ok(line.trim().to_string())
}

/// Hints shown to the user for pre-flight failures.
pub fn remediation(err: &Error) -> Option<&'static str> {
    match err {
        Error::BackendUnavailable { .. } => Some("Start the model server with: ollama serve"),
        Error::NoModelsAvailable => Some("Install a model first, for example: ollama pull llama2"),
        Error::MissingApiKey { .. } => Some(
            "Export OPENAI_API_KEY and ANTHROPIC_API_KEY before running the hosted backend",
        ),
        _ => None,
    }
}

pub fn format_stage_output(stage: Stage, model: &str, completion: &Completion) -> String {
    format!("\n{} {}:\n{}", model, stage.heading(), completion.text())
}
