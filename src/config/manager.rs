use anyhow::{Context, Result};
use serde::Deserialize;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;
use tracing::warn;

use crate::paths;
use crate::translation::{ClientSettings, DEFAULT_MAX_REPAIR_ATTEMPTS};

/// Provider used when none is named anywhere.
pub const DEFAULT_PROVIDER: &str = "openai";
/// Endpoint of the built-in `openai` provider.
pub const DEFAULT_OPENAI_ENDPOINT: &str = "https://api.openai.com";

pub const ENV_API_KEY: &str = "OPENAI_API_KEY";
pub const ENV_ENDPOINT: &str = "OPENAI_ENDPOINT";
pub const ENV_MODEL: &str = "OPENAI_MODEL";

const DEFAULT_MAX_RETRIES: u32 = 3;
const DEFAULT_RETRY_PAUSE_MS: u64 = 1000;

/// Looks up an environment variable; empty values count as unset.
pub type EnvLookup<'a> = &'a dyn Fn(&str) -> Option<String>;

/// Reads the real process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Default settings in the `[sentiment]` section of config.toml.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct Defaults {
    /// Default provider name.
    pub provider: Option<String>,
    /// Default model name.
    pub model: Option<String>,
    /// Retries for rate-limited or failed requests.
    pub max_retries: Option<u32>,
    /// Pause between retries, in milliseconds.
    pub retry_pause_ms: Option<u64>,
    /// Repair prompts sent after a reply fails validation.
    pub max_repair_attempts: Option<usize>,
}

/// Configuration for a completion provider.
#[derive(Debug, Clone, Deserialize)]
pub struct ProviderConfig {
    /// The OpenAI-compatible API endpoint URL.
    pub endpoint: String,
    /// API key stored directly in config (not recommended).
    #[serde(default)]
    pub api_key: Option<String>,
    /// Environment variable name containing the API key.
    #[serde(default)]
    pub api_key_env: Option<String>,
    /// Models known to work with this provider.
    #[serde(default)]
    pub models: Vec<String>,
}

impl ProviderConfig {
    /// The provider used when the config file does not define `openai`.
    pub fn builtin_openai(env: EnvLookup<'_>) -> Self {
        Self {
            endpoint: env(ENV_ENDPOINT).unwrap_or_else(|| DEFAULT_OPENAI_ENDPOINT.to_string()),
            api_key: None,
            api_key_env: Some(ENV_API_KEY.to_string()),
            models: Vec::new(),
        }
    }

    /// Gets the API key, preferring environment variable over config file.
    pub fn get_api_key(&self, env: EnvLookup<'_>) -> Option<String> {
        self.api_key_env
            .as_deref()
            .and_then(env)
            .or_else(|| self.api_key.clone())
    }

    /// Returns `true` if this provider requires an API key.
    pub const fn requires_api_key(&self) -> bool {
        self.api_key.is_some() || self.api_key_env.is_some()
    }
}

/// The complete configuration file structure.
///
/// Corresponds to `~/.config/sentiment/config.toml`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ConfigFile {
    /// Default settings.
    #[serde(default)]
    pub sentiment: Defaults,
    /// Provider configurations keyed by name.
    #[serde(default)]
    pub providers: HashMap<String, ProviderConfig>,
}

/// Configuration problems that keep the session from starting.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "Missing required configuration: 'model'\n\n\
         Please provide it via:\n  \
         - CLI option: sentiment --model <name>\n  \
         - Environment: OPENAI_MODEL\n  \
         - Config file: ~/.config/sentiment/config.toml"
    )]
    MissingModel,

    #[error("Provider '{name}' not found\n\n{}", available_hint(.available))]
    ProviderNotFound { name: String, available: Vec<String> },

    #[error(
        "Provider '{provider}' requires an API key\n\n\
         Set the {env_var} environment variable:\n  \
         export {env_var}=\"your-api-key\"\n\n\
         Or set api_key in ~/.config/sentiment/config.toml"
    )]
    MissingApiKey { provider: String, env_var: String },
}

fn available_hint(available: &[String]) -> String {
    if available.is_empty() {
        "No providers configured. Add providers to ~/.config/sentiment/config.toml".to_string()
    } else {
        format!(
            "Available providers:\n  - {}\n\nAdd providers to ~/.config/sentiment/config.toml",
            available.join("\n  - ")
        )
    }
}

/// Resolved configuration after merging CLI arguments, environment and config file.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    /// The selected provider name.
    pub provider_name: String,
    /// The API endpoint URL.
    pub endpoint: String,
    /// The model to use.
    pub model: String,
    /// The API key (if required).
    pub api_key: Option<String>,
    /// Retries for transient failures.
    pub max_retries: u32,
    /// Pause between retries.
    pub retry_pause: Duration,
    /// Repair prompts after a failed validation.
    pub max_repair_attempts: usize,
}

impl ResolvedConfig {
    pub fn client_settings(&self) -> ClientSettings {
        ClientSettings {
            endpoint: self.endpoint.clone(),
            model: self.model.clone(),
            api_key: self.api_key.clone(),
            max_retries: self.max_retries,
            retry_pause: self.retry_pause,
        }
    }
}

/// CLI overrides that take precedence over environment and config file.
#[derive(Debug, Clone, Default)]
pub struct ResolveOptions {
    /// Provider name override.
    pub provider: Option<String>,
    /// Model name override.
    pub model: Option<String>,
}

/// Resolves configuration.
///
/// Precedence is CLI options, then environment, then config file, then
/// built-in defaults. The `openai` provider exists even without a config
/// file entry and reads `OPENAI_ENDPOINT` and `OPENAI_API_KEY`.
pub fn resolve_config(
    options: &ResolveOptions,
    config_file: &ConfigFile,
    env: EnvLookup<'_>,
) -> Result<ResolvedConfig, ConfigError> {
    let provider_name = options
        .provider
        .clone()
        .or_else(|| config_file.sentiment.provider.clone())
        .unwrap_or_else(|| DEFAULT_PROVIDER.to_string());

    let mut provider_config = match config_file.providers.get(&provider_name) {
        Some(provider) => provider.clone(),
        None if provider_name == DEFAULT_PROVIDER => ProviderConfig::builtin_openai(env),
        None => {
            let mut available: Vec<String> = config_file.providers.keys().cloned().collect();
            available.sort();
            return Err(ConfigError::ProviderNotFound {
                name: provider_name,
                available,
            });
        }
    };

    if provider_name == DEFAULT_PROVIDER
        && let Some(endpoint) = env(ENV_ENDPOINT)
    {
        provider_config.endpoint = endpoint;
    }

    let model = options
        .model
        .clone()
        .or_else(|| env(ENV_MODEL))
        .or_else(|| config_file.sentiment.model.clone())
        .ok_or(ConfigError::MissingModel)?;

    if !provider_config.models.is_empty() && !provider_config.models.contains(&model) {
        warn!(
            "model '{model}' is not in the configured models list for '{provider_name}' ({}), proceeding anyway",
            provider_config.models.join(", ")
        );
    }

    let api_key = provider_config.get_api_key(env);
    if provider_config.requires_api_key() && api_key.is_none() {
        return Err(ConfigError::MissingApiKey {
            provider: provider_name,
            env_var: provider_config
                .api_key_env
                .clone()
                .unwrap_or_else(|| "API_KEY".to_string()),
        });
    }

    let defaults = &config_file.sentiment;
    Ok(ResolvedConfig {
        provider_name,
        endpoint: provider_config.endpoint,
        model,
        api_key,
        max_retries: defaults.max_retries.unwrap_or(DEFAULT_MAX_RETRIES),
        retry_pause: Duration::from_millis(
            defaults.retry_pause_ms.unwrap_or(DEFAULT_RETRY_PAUSE_MS),
        ),
        max_repair_attempts: defaults
            .max_repair_attempts
            .unwrap_or(DEFAULT_MAX_REPAIR_ATTEMPTS),
    })
}

/// Loads the configuration file.
pub struct ConfigManager {
    config_path: PathBuf,
}

impl ConfigManager {
    /// Creates a new config manager.
    ///
    /// Configuration is read from `$XDG_CONFIG_HOME/sentiment/config.toml`
    /// or `~/.config/sentiment/config.toml` if `XDG_CONFIG_HOME` is not set.
    pub fn new() -> Result<Self> {
        Ok(Self {
            config_path: paths::config_dir()?.join("config.toml"),
        })
    }

    pub const fn with_path(config_path: PathBuf) -> Self {
        Self { config_path }
    }

    /// Loads the config file; a missing file yields the defaults.
    ///
    /// An unreadable or malformed file is an error rather than silently ignored.
    pub fn load(&self) -> Result<ConfigFile> {
        if !self.config_path.exists() {
            return Ok(ConfigFile::default());
        }

        let contents = fs::read_to_string(&self.config_path).with_context(|| {
            format!("Failed to read config file: {}", self.config_path.display())
        })?;

        toml::from_str(&contents).with_context(|| {
            format!(
                "Failed to parse config file: {}",
                self.config_path.display()
            )
        })
    }
}
