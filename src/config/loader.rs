//! Configuration loading from disk and the environment.

use std::fs;
use std::path::Path;
use thiserror::Error;

use crate::config::schema::WrapConfig;
use crate::config::validation::{validate_config, ValidationError};

/// Environment variable holding the JSON-RPC endpoint.
pub const RPC_URL_ENV_VAR: &str = "FLARE_RPC_URL";

/// Environment variable holding the hex-encoded signing key.
pub const PRIVATE_KEY_ENV_VAR: &str = "PRIVATE_KEY";

/// Environment variable pinning the expected chain ID.
pub const CHAIN_ID_ENV_VAR: &str = "WRAP_CHAIN_ID";

/// Error type for configuration loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Parse error: {0}")]
    Parse(#[from] toml::de::Error),

    #[error("{var} is not a valid chain ID: {value}")]
    InvalidEnv { var: &'static str, value: String },

    #[error("Validation failed: {}", join_errors(.0))]
    Validation(Vec<ValidationError>),
}

fn join_errors(errors: &[ValidationError]) -> String {
    errors
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Load configuration from an optional TOML file plus process environment, then validate.
pub fn load_config(path: Option<&Path>) -> Result<WrapConfig, ConfigError> {
    let config = match path {
        Some(path) => {
            let content = fs::read_to_string(path)?;
            toml::from_str(&content)?
        }
        None => WrapConfig::default(),
    };

    let config = apply_env_overrides(config, |var| std::env::var(var).ok())?;
    validate_config(&config).map_err(ConfigError::Validation)?;

    Ok(config)
}

/// Overlay environment values on top of file configuration.
///
/// Empty values are treated as unset.
pub fn apply_env_overrides<F>(mut config: WrapConfig, lookup: F) -> Result<WrapConfig, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let get = |var: &str| lookup(var).filter(|v| !v.trim().is_empty());

    if let Some(url) = get(RPC_URL_ENV_VAR) {
        config.network.rpc_url = Some(url.trim().to_string());
    }

    if let Some(key) = get(PRIVATE_KEY_ENV_VAR) {
        config.credentials.private_key = Some(key.trim().to_string());
    }

    if let Some(raw) = get(CHAIN_ID_ENV_VAR) {
        let chain_id = raw.trim().parse().map_err(|_| ConfigError::InvalidEnv {
            var: CHAIN_ID_ENV_VAR,
            value: raw.clone(),
        })?;
        config.network.chain_id = Some(chain_id);
    }

    Ok(config)
}
