//! Configuration schema definitions.
//!
//! This module defines the complete configuration structure for the wrapper.
//! All types derive Serde traits for deserialization from config files.

use serde::{Deserialize, Serialize};

/// Address of the WFLR (wrapped FLR) contract on Flare mainnet.
pub const DEFAULT_WRAPPED_TOKEN_ADDRESS: &str = "0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d";

/// Root configuration for a wrap invocation.
#[derive(Debug, Clone, Deserialize, Serialize, Default)]
#[serde(default)]
pub struct WrapConfig {
    /// Ledger node connection settings.
    pub network: NetworkConfig,

    /// Wrapped-token contract settings.
    pub contract: ContractConfig,

    /// Gas limit and gas price markup.
    pub fees: FeeConfig,

    /// Receipt polling settings.
    pub receipt: ReceiptConfig,

    /// Log output settings.
    pub logging: LoggingConfig,

    /// Signing key material. Environment only, never read from or written to files.
    #[serde(skip)]
    pub credentials: Credentials,
}

/// Ledger node connection configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct NetworkConfig {
    /// JSON-RPC endpoint URL.
    pub rpc_url: Option<String>,

    /// Expected chain ID. When unset the node's chain ID is used as-is.
    pub chain_id: Option<u64>,

    /// RPC request timeout in seconds.
    pub rpc_timeout_secs: u64,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            rpc_url: None,
            chain_id: None,
            rpc_timeout_secs: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ContractConfig {
    /// Address of the wrapped-token contract.
    pub address: String,

    /// Display symbol of the native token.
    pub native_symbol: String,
}

impl Default for ContractConfig {
    fn default() -> Self {
        Self {
            address: DEFAULT_WRAPPED_TOKEN_ADDRESS.to_string(),
            native_symbol: "FLR".to_string(),
        }
    }
}

/// Fee policy configuration.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct FeeConfig {
    /// Fixed gas limit for the deposit call.
    pub gas_limit: u64,

    /// Markup applied to the node's gas price, in percent (10 = +10%).
    pub gas_price_markup_percent: u32,
}

impl Default for FeeConfig {
    fn default() -> Self {
        Self {
            gas_limit: 200_000,
            gas_price_markup_percent: 10,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct ReceiptConfig {
    /// Maximum time to wait for the receipt after broadcast.
    pub timeout_secs: u64,

    /// Delay between receipt polls in milliseconds.
    pub poll_interval_ms: u64,
}

impl Default for ReceiptConfig {
    fn default() -> Self {
        Self {
            timeout_secs: 120,
            poll_interval_ms: 1000,
        }
    }
}

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct LoggingConfig {
    /// Output format.
    pub format: LogFormat,

    /// Default filter directive, overridden by `RUST_LOG`.
    pub filter: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::Pretty,
            filter: "wrap_native=info".to_string(),
        }
    }
}

/// Secret key material.
#[derive(Clone, Default)]
pub struct Credentials {
    /// Hex-encoded private key, with or without `0x`.
    pub private_key: Option<String>,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let redacted = self.private_key.as_ref().map(|_| "<redacted>");
        f.debug_struct("Credentials")
            .field("private_key", &redacted)
            .finish()
    }
}
