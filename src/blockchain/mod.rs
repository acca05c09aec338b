//! Ledger integration subsystem.
//!
//! # Data Flow
//! ```text
//! Environment Variables (private key, RPC URL)
//!     → wallet.rs (key loading, signing)
//!     → client.rs (RPC connection with timeouts)
//!     → transaction.rs (deposit call assembly)
//!     → contract.rs (wrapped-token interface)
//! ```
//!
//! # Security Constraints
//! - Private keys ONLY from environment variables
//! - Never log private keys or signed payloads
//! - All RPC calls have configurable timeouts

pub mod client;
pub mod contract;
pub mod transaction;
pub mod types;
pub mod wallet;

pub use client::{BlockchainClient, LedgerClient};
pub use transaction::{BuildError, FeePolicy, TxBuilder};
pub use types::{
    AccountSnapshot, BlockchainError, ChainId, Receipt, ReceiptStatus, SignedTransaction,
    UnsignedTransaction, WrapRequest,
};
pub use wallet::{SignError, TransactionSigner, Wallet};
