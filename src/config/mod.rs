mod credentials;
mod types;

pub use credentials::{ANTHROPIC_API_KEY, Credentials, OPENAI_API_KEY};
pub use types::*;

use crate::{Error, Result};
use std::env;
use std::path::Path;
use tracing::debug;

const DEFAULT_CONFIG_PATH: &str = "config.yaml";

/// Loads the configuration from `CONFIG_PATH`, or `config.yaml` when unset.
///
/// A missing default file yields the built-in defaults; an explicit
/// `CONFIG_PATH` must point at a readable file. `CHAIN_BACKEND` overrides the
/// configured backend.
pub async fn load() -> Result<Config> {
    load_with(|name| env::var(name).ok(), DEFAULT_CONFIG_PATH).await
}

/// Same as [`load`], resolving environment variables through `lookup` and
/// falling back to `default_path` when `CONFIG_PATH` is unset.
pub async fn load_with<F>(lookup: F, default_path: impl AsRef<Path>) -> Result<Config>
where
    F: Fn(&str) -> Option<String>,
{
    let mut config = match lookup("CONFIG_PATH") {
        Some(explicit) => load_from_path(&explicit).await?,
        None => {
            let default_path = default_path.as_ref();
            if default_path.exists() {
                load_from_path(default_path).await?
            } else {
                debug!(
                    "No {} found, using built-in defaults",
                    default_path.display()
                );
                Config::default()
            }
        }
    };

    if let Some(backend) = lookup("CHAIN_BACKEND") {
        config.backend = parse_backend(&backend)?;
    }

    config.validate()?;
    Ok(config)
}

pub async fn load_from_path(path: impl AsRef<Path>) -> Result<Config> {
    let path = path.as_ref();
    debug!("Loading configuration from: {}", path.display());

    let config_str = tokio::fs::read_to_string(path).await?;
    from_yaml(&config_str)
}

pub fn from_yaml(config_str: &str) -> Result<Config> {
    // An empty document is valid and means "all defaults".
    if config_str.trim().is_empty() {
        return Ok(Config::default());
    }
    let config: Config = serde_yaml::from_str(config_str)?;
    Ok(config)
}

pub fn parse_backend(value: &str) -> Result<BackendKind> {
    match value.trim().to_ascii_lowercase().as_str() {
        "local" | "ollama" => Ok(BackendKind::Local),
        "hosted" => Ok(BackendKind::Hosted),
        other => Err(Error::config(format!(
            "Unknown backend '{}'. Valid backends: local, hosted",
            other
        ))),
    }
}

impl Config {
    pub fn validate(&self) -> Result<()> {
        if !(0.0..=1.0).contains(&self.chain.temperature) {
            return Err(Error::config(format!(
                "chain.temperature must be between 0 and 1, got {}",
                self.chain.temperature
            )));
        }
        if self.timeouts.generate_secs == 0 || self.timeouts.health_secs == 0 {
            return Err(Error::config("timeouts must be greater than zero"));
        }
        self.logs
            .level
            .parse::<tracing_subscriber::filter::LevelFilter>()
            .map_err(|_| {
                Error::config(format!(
                    "Invalid log level: '{}'. Valid levels: error, warn, info, debug, trace",
                    self.logs.level
                ))
            })?;
        if self.backend == BackendKind::Local && self.local.base_url.trim().is_empty() {
            return Err(Error::config("local.base_url must not be empty"));
        }
        Ok(())
    }
}
