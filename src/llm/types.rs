use crate::{Error, Result};
use serde::{Deserialize, Serialize};

/// Placeholder returned in place of text when a backend call fails.
pub const FALLBACK_TEXT: &str = "Unable to generate response at this time.";

pub const DEFAULT_TEMPERATURE: f32 = 0.7;

#[derive(Debug, Clone, PartialEq)]
pub struct InferenceRequest {
    pub model: String,
    pub prompt: String,
    pub system: Option<String>,
    pub temperature: f32,
}

impl InferenceRequest {
    pub fn new(model: impl Into<String>, prompt: impl Into<String>) -> Self {
        Self {
            model: model.into(),
            prompt: prompt.into(),
            system: None,
            temperature: DEFAULT_TEMPERATURE,
        }
    }

    pub fn with_system(mut self, system: impl Into<String>) -> Self {
        self.system = Some(system.into());
        self
    }

    pub fn with_temperature(mut self, temperature: f32) -> Self {
        self.temperature = temperature;
        self
    }

    /// System instructions, treating an empty string as absent.
    pub fn system_instructions(&self) -> Option<&str> {
        self.system.as_deref().filter(|s| !s.is_empty())
    }

    pub fn validate(&self) -> Result<()> {
        if self.model.trim().is_empty() {
            return Err(Error::invalid_request("model identifier is empty"));
        }
        if self.prompt.trim().is_empty() {
            return Err(Error::invalid_request("prompt is empty"));
        }
        if !(0.0..=1.0).contains(&self.temperature) {
            return Err(Error::invalid_request(format!(
                "temperature {} is outside 0..=1",
                self.temperature
            )));
        }
        Ok(())
    }
}

/// Outcome of a single generation call.
///
/// Failures never surface as errors to the chain; they become `Fallback`,
/// which still renders as [`FALLBACK_TEXT`] but stays distinguishable from
/// real model output.
#[derive(Debug, Clone, PartialEq)]
pub enum Completion {
    Generated(String),
    Fallback { reason: String },
}

impl Completion {
    pub fn fallback(reason: impl Into<String>) -> Self {
        Self::Fallback {
            reason: reason.into(),
        }
    }

    pub fn text(&self) -> &str {
        match self {
            Self::Generated(text) => text,
            Self::Fallback { .. } => FALLBACK_TEXT,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Self::Fallback { .. })
    }

    pub fn failure_reason(&self) -> Option<&str> {
        match self {
            Self::Generated(_) => None,
            Self::Fallback { reason } => Some(reason),
        }
    }
}

/// One entry of the model server's `/api/tags` listing.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelInfo {
    pub name: String,
    #[serde(default)]
    pub size: Option<u64>,
    #[serde(default)]
    pub modified_at: Option<String>,
}
