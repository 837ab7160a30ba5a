use crate::{Error, Result};
use std::fmt;

pub const OPENAI_API_KEY: &str = "OPENAI_API_KEY";
pub const ANTHROPIC_API_KEY: &str = "ANTHROPIC_API_KEY";

/// API keys for the hosted backends.
#[derive(Clone)]
pub struct Credentials {
    pub openai_api_key: String,
    pub anthropic_api_key: String,
}

impl Credentials {
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves both keys through `lookup`. The first missing or blank key
    /// is reported, OpenAI before Anthropic.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let fetch = |name: &str| {
            lookup(name)
                .filter(|value| !value.trim().is_empty())
                .ok_or_else(|| Error::missing_api_key(name))
        };

        Ok(Self {
            openai_api_key: fetch(OPENAI_API_KEY)?,
            anthropic_api_key: fetch(ANTHROPIC_API_KEY)?,
        })
    }
}

impl fmt::Debug for Credentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Credentials")
            .field("openai_api_key", &"<redacted>")
            .field("anthropic_api_key", &"<redacted>")
            .finish()
    }
}
