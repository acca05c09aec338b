//! Configuration management subsystem.
//!
//! # Data Flow
//! ```text
//! config file (TOML, optional)
//!     → loader.rs (parse & deserialize)
//!     → environment overrides (FLARE_RPC_URL, PRIVATE_KEY, WRAP_CHAIN_ID)
//!     → validation.rs (semantic checks)
//!     → WrapConfig (validated, immutable)
//!     → passed by value into the workflow constructor
//! ```
//!
//! # Design Decisions
//! - Config is immutable once loaded
//! - All fields have defaults to allow minimal configs
//! - Validation separates syntactic (serde) from semantic checks
//! - Key material only ever comes from the environment

pub mod loader;
pub mod schema;
pub mod validation;

pub use loader::{load_config, ConfigError};
pub use schema::{
    ContractConfig, Credentials, FeeConfig, LogFormat, LoggingConfig, NetworkConfig,
    ReceiptConfig, WrapConfig,
};
