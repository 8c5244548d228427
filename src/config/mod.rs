//! Configuration file loading and resolution.

mod manager;

pub use manager::{
    ConfigError, ConfigFile, ConfigManager, DEFAULT_OPENAI_ENDPOINT, DEFAULT_PROVIDER, Defaults,
    ENV_API_KEY, ENV_ENDPOINT, ENV_MODEL, EnvLookup, ProviderConfig, ResolveOptions,
    ResolvedConfig, process_env, resolve_config,
};
