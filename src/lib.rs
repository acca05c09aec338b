//! Native-to-wrapped token conversion via a payable `deposit` call.

pub mod amount;
pub mod blockchain;
pub mod config;
pub mod observability;
pub mod workflow;

pub use amount::{AmountError, ValidatedAmount};
pub use blockchain::{BlockchainClient, LedgerClient, TransactionSigner, Wallet};
pub use config::WrapConfig;
pub use workflow::{WorkflowState, WrapError, WrapFailure, WrapOutcome, WrapSettings, WrapWorkflow};
