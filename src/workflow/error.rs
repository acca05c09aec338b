//! Classified workflow failures.

use alloy::primitives::{Address, TxHash, U256};
use thiserror::Error;

use crate::amount::AmountError;
use crate::blockchain::{BlockchainError, BuildError, SignError};
use crate::workflow::state::WorkflowState;

/// Why a wrap did not succeed.
#[derive(Debug, Error)]
pub enum WrapError {
    #[error("private key is missing")]
    MissingCredentials,

    #[error(transparent)]
    InvalidAmount(#[from] AmountError),

    #[error("connection failure: {0}")]
    ConnectionFailure(String),

    #[error("chain ID mismatch: expected {expected}, node reports {actual}")]
    ChainMismatch { expected: u64, actual: u64 },

    #[error("insufficient balance: have {balance} wei, need {required} wei")]
    InsufficientBalance { balance: U256, required: U256 },

    #[error("invalid private key: {0}")]
    InvalidKey(String),

    #[error("signing failed: {0}")]
    SigningFailure(String),

    #[error("broadcast failed: {0}")]
    BroadcastFailure(String),

    #[error("no receipt for {tx_hash} within {timeout_secs}s")]
    ReceiptTimeout { tx_hash: TxHash, timeout_secs: u64 },

    #[error("transaction {tx_hash} reverted (gas used {gas_used})")]
    TransactionReverted {
        tx_hash: TxHash,
        block_number: Option<u64>,
        gas_used: u64,
    },

    #[error("unexpected failure: {0}")]
    UnexpectedFailure(String),
}

impl WrapError {
    /// A chain read failed after the node was reachable.
    pub(crate) fn read(method: &str, err: BlockchainError) -> Self {
        Self::ConnectionFailure(format!("{} failed: {}", method, err))
    }
}

impl From<SignError> for WrapError {
    fn from(err: SignError) -> Self {
        match err {
            SignError::InvalidKey(reason) => Self::InvalidKey(reason),
            SignError::SigningFailure(reason) => Self::SigningFailure(reason),
        }
    }
}

impl From<BuildError> for WrapError {
    fn from(err: BuildError) -> Self {
        match err {
            BuildError::InsufficientBalance { balance, required } => {
                Self::InsufficientBalance { balance, required }
            }
        }
    }
}

/// A [`WrapError`] with the context needed to diagnose it.
#[derive(Debug, Error)]
#[error("wrap failed while {stage}: {error}")]
pub struct WrapFailure {
    /// Stage that was active when the failure happened.
    pub stage: WorkflowState,
    /// Validated amount, once known.
    pub amount: Option<String>,
    /// Sender address, once derived.
    pub sender: Option<Address>,
    #[source]
    pub error: WrapError,
}
