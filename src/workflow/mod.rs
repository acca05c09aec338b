//! Wrap submission workflow.
//!
//! # Data Flow
//! ```text
//! amount text
//!     → amount::validate
//!     → TransactionSigner::from_private_key (sender address)
//!     → LedgerClient reads (chain id, balance, gas price, nonce)
//!     → TxBuilder::build → TransactionSigner::sign
//!     → LedgerClient::broadcast → LedgerClient::wait_for_receipt
//!     → WrapOutcome | WrapFailure
//! ```
//!
//! # Design Decisions
//! - One invocation, one transaction; no queue and no automatic retry
//! - Every stage yields a value or a classified error, never a partial state
//! - Metadata and wrapped-balance probes are best-effort and never abort

pub mod error;
pub mod probe;
pub mod runner;
pub mod state;

pub use error::{WrapError, WrapFailure};
pub use probe::TokenMetadata;
pub use runner::{WrapOutcome, WrapSettings, WrapWorkflow};
pub use state::WorkflowState;
