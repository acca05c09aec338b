//! Configuration validation.
//!
//! # Responsibilities
//! - Semantic validation (serde handles syntactic)
//! - Validate value ranges (timeouts > 0, gas limit covers a call)
//! - Check that the endpoint and contract address are well-formed
//! - The client only speaks HTTP, so ws(s) endpoints are rejected
//!
//! # Design Decisions
//! - Returns all validation errors, not just first
//! - Validation is pure function: WrapConfig → Result<(), Vec<ValidationError>>
//! - Missing credentials are not checked here; the workflow reports them

use alloy::primitives::Address;
use thiserror::Error;

use crate::config::schema::WrapConfig;

/// Intrinsic gas of any transaction; a lower limit can never be mined.
const MIN_GAS_LIMIT: u64 = 21_000;

/// Largest accepted gas price markup, in percent.
const MAX_MARKUP_PERCENT: u32 = 100;

/// A single semantic problem with the configuration.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("network.rpc_url is required (set FLARE_RPC_URL)")]
    MissingRpcUrl,

    #[error("network.rpc_url '{url}' is invalid: {reason}")]
    InvalidRpcUrl { url: String, reason: String },

    #[error("contract.address '{0}' is not a valid 20-byte address")]
    InvalidContractAddress(String),

    #[error("{field} must be greater than zero")]
    ZeroDuration { field: &'static str },

    #[error("fees.gas_limit {0} is below the intrinsic minimum of 21000")]
    GasLimitTooLow(u64),

    #[error("fees.gas_price_markup_percent {0} exceeds 100")]
    MarkupTooHigh(u32),
}

/// Validate a loaded configuration, collecting every problem found.
pub fn validate_config(config: &WrapConfig) -> Result<(), Vec<ValidationError>> {
    let mut errors = Vec::new();

    match config.network.rpc_url.as_deref() {
        None | Some("") => errors.push(ValidationError::MissingRpcUrl),
        Some(raw) => {
            if let Err(reason) = check_rpc_url(raw) {
                errors.push(ValidationError::InvalidRpcUrl {
                    url: raw.to_string(),
                    reason,
                });
            }
        }
    }

    if config.contract.address.parse::<Address>().is_err() {
        errors.push(ValidationError::InvalidContractAddress(
            config.contract.address.clone(),
        ));
    }

    if config.network.rpc_timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "network.rpc_timeout_secs",
        });
    }
    if config.receipt.timeout_secs == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "receipt.timeout_secs",
        });
    }
    if config.receipt.poll_interval_ms == 0 {
        errors.push(ValidationError::ZeroDuration {
            field: "receipt.poll_interval_ms",
        });
    }

    if config.fees.gas_limit < MIN_GAS_LIMIT {
        errors.push(ValidationError::GasLimitTooLow(config.fees.gas_limit));
    }
    if config.fees.gas_price_markup_percent > MAX_MARKUP_PERCENT {
        errors.push(ValidationError::MarkupTooHigh(
            config.fees.gas_price_markup_percent,
        ));
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

fn check_rpc_url(raw: &str) -> Result<(), String> {
    let url = url::Url::parse(raw).map_err(|e| e.to_string())?;
    match url.scheme() {
        "http" | "https" => Ok(()),
        other => Err(format!("unsupported scheme '{}'", other)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> WrapConfig {
        let mut config = WrapConfig::default();
        config.network.rpc_url = Some("http://localhost:8545".to_string());
        config
    }

    #[test]
    fn test_valid_config_passes() {
        assert!(validate_config(&valid_config()).is_ok());
    }

    #[test]
    fn test_missing_rpc_url() {
        let config = WrapConfig::default();
        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors, vec![ValidationError::MissingRpcUrl]);
    }

    #[test]
    fn test_websocket_url_rejected() {
        for url in ["ws://localhost:8546", "wss://flare-api.flare.network/ext/C/ws"] {
            let mut config = valid_config();
            config.network.rpc_url = Some(url.to_string());
            let errors = validate_config(&config).unwrap_err();
            assert!(matches!(errors[0], ValidationError::InvalidRpcUrl { .. }), "{}", url);
        }
    }

    #[test]
    fn test_https_url_accepted() {
        let mut config = valid_config();
        config.network.rpc_url = Some("https://flare-api.flare.network/ext/C/rpc".to_string());
        assert!(validate_config(&config).is_ok());
    }

    #[test]
    fn test_collects_all_errors() {
        let mut config = valid_config();
        config.contract.address = "0x1234".to_string();
        config.receipt.timeout_secs = 0;
        config.fees.gas_limit = 1_000;
        config.fees.gas_price_markup_percent = 500;

        let errors = validate_config(&config).unwrap_err();
        assert_eq!(errors.len(), 4);
        assert!(errors.contains(&ValidationError::GasLimitTooLow(1_000)));
        assert!(errors.contains(&ValidationError::MarkupTooHigh(500)));
    }
}
