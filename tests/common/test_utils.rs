use retail_banking_chain::{
    Result,
    chain::{ChainOptions, PromptChain, StageBackend},
    config::{BackendKind, Config, Credentials},
};
use std::sync::Arc;
use tempfile::TempDir;
use tokio::fs;

use super::mocks::MockLlmClient;

pub const HOUSE_BUYER_INPUT: &str =
    "Customer has $5000 savings, stable income, wants to buy a house";

/// Configuration pointing the local backend at `base_url`.
pub fn create_local_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.backend = BackendKind::Local;
    config.local.base_url = base_url.to_string();
    config.logs.level = "debug".to_string();
    config
}

/// Configuration pointing both hosted backends at `base_url`.
pub fn create_hosted_config(base_url: &str) -> Config {
    let mut config = Config::default();
    config.backend = BackendKind::Hosted;
    config.hosted.openai.base_url = format!("{}/v1", base_url);
    config.hosted.anthropic.base_url = base_url.to_string();
    config
}

pub fn create_test_credentials() -> Credentials {
    Credentials {
        openai_api_key: "test-openai-key".to_string(),
        anthropic_api_key: "test-anthropic-key".to_string(),
    }
}

/// A chain whose two stages are served by separate mocks.
pub fn create_mock_chain(
    recommender: &MockLlmClient,
    risk_analyst: &MockLlmClient,
    options: ChainOptions,
) -> PromptChain {
    PromptChain::new(
        StageBackend::new(Arc::new(recommender.clone()), "advisor-model"),
        StageBackend::new(Arc::new(risk_analyst.clone()), "analyst-model"),
        options,
    )
    .expect("mock chain should build")
}

/// Create a temporary directory for test files
pub fn create_temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp directory")
}

/// Create a test config YAML file
pub async fn create_test_config_file(dir: &TempDir, content: &str) -> Result<String> {
    let config_path = dir.path().join("config.yaml");
    fs::write(&config_path, content).await?;
    Ok(config_path.to_string_lossy().to_string())
}

/// Sample configuration YAML for testing
pub const SAMPLE_CONFIG_YAML: &str = r#"
backend: local
chain:
  temperature: 0.3
  skip_risk_on_fallback: true
local:
  base_url: "http://127.0.0.1:11434/"
  recommendation_model: "llama2:latest"
  risk_model: "mistral:latest"
timeouts:
  generate_secs: 60
  health_secs: 2
logs:
  level: "debug"
  json: true
"#;
