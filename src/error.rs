use thiserror::Error;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Error, Debug)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("LLM error: {0}")]
    Llm(String),

    #[error("Invalid inference request: {0}")]
    InvalidRequest(String),

    #[error("{var} not found in environment variables")]
    MissingApiKey { var: String },

    #[error("Cannot connect to model server at {url}")]
    BackendUnavailable { url: String },

    #[error("No models found on the model server")]
    NoModelsAvailable,

    #[error("Customer input is empty")]
    EmptyInput,

    #[error("Invalid state transition: {current} -> {requested}")]
    InvalidTransition { current: String, requested: String },

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("OpenAI error: {0}")]
    OpenAi(#[from] async_openai::error::OpenAIError),
}

impl Error {
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    pub fn llm(msg: impl Into<String>) -> Self {
        Self::Llm(msg.into())
    }

    pub fn invalid_request(msg: impl Into<String>) -> Self {
        Self::InvalidRequest(msg.into())
    }

    pub fn missing_api_key(var: impl Into<String>) -> Self {
        Self::MissingApiKey { var: var.into() }
    }

    /// Whether this error should stop the run before any stage executes.
    pub fn is_preflight(&self) -> bool {
        matches!(
            self,
            Self::MissingApiKey { .. } | Self::BackendUnavailable { .. } | Self::NoModelsAvailable
        )
    }
}
