//! Chain-specific types and error definitions.

use alloy::primitives::{Address, Bytes, TxHash, U256};
use thiserror::Error;

use crate::amount::ValidatedAmount;

/// Chain ID type for strong typing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ChainId(pub u64);

impl From<u64> for ChainId {
    fn from(id: u64) -> Self {
        Self(id)
    }
}

impl From<ChainId> for u64 {
    fn from(id: ChainId) -> Self {
        id.0
    }
}

/// Errors that can occur during ledger node operations.
#[derive(Debug, Error)]
pub enum BlockchainError {
    /// RPC connection or request failed.
    #[error("RPC error: {0}")]
    Rpc(String),

    /// RPC request timed out.
    #[error("RPC timeout after {0} seconds")]
    Timeout(u64),

    /// Node rejected a raw transaction.
    #[error("Broadcast rejected: {0}")]
    Broadcast(String),

    /// No receipt appeared within the wait window.
    #[error("No receipt for {tx_hash} after {timeout_secs} seconds")]
    ReceiptTimeout { tx_hash: TxHash, timeout_secs: u64 },

    /// A view call returned data that does not match the interface.
    #[error("Failed to decode {method} result: {reason}")]
    Decode { method: &'static str, reason: String },
}

/// Result type for ledger node operations.
pub type BlockchainResult<T> = Result<T, BlockchainError>;

/// What to wrap and on whose behalf.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WrapRequest {
    pub amount: ValidatedAmount,
    pub sender: Address,
}

/// Sender state read immediately before building.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AccountSnapshot {
    /// Native balance in smallest units.
    pub balance: U256,
    /// Next transaction count, including pending transactions.
    pub nonce: u64,
}

/// A fully specified `deposit` call awaiting a signature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnsignedTransaction {
    pub to: Address,
    pub value: U256,
    pub data: Bytes,
    pub gas_limit: u64,
    pub gas_price: u128,
    pub nonce: u64,
    pub chain_id: ChainId,
}

/// EIP-2718 encoded transaction ready for broadcast.
///
/// Deliberately not `Debug`: the raw bytes are not meant for logs.
#[derive(Clone)]
pub struct SignedTransaction {
    pub raw: Bytes,
    pub hash: TxHash,
}

/// Execution status reported by a receipt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReceiptStatus {
    Success,
    Failure,
}

/// Terminal record of a mined transaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Receipt {
    pub transaction_hash: TxHash,
    pub status: ReceiptStatus,
    pub gas_used: u64,
    pub block_number: Option<u64>,
}

impl Receipt {
    pub fn succeeded(&self) -> bool {
        self.status == ReceiptStatus::Success
    }
}

impl From<alloy::rpc::types::TransactionReceipt> for Receipt {
    fn from(receipt: alloy::rpc::types::TransactionReceipt) -> Self {
        Self {
            transaction_hash: receipt.transaction_hash,
            status: if receipt.status() {
                ReceiptStatus::Success
            } else {
                ReceiptStatus::Failure
            },
            gas_used: receipt.gas_used,
            block_number: receipt.block_number,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_chain_id_conversion() {
        let chain_id = ChainId::from(14u64);
        assert_eq!(chain_id.0, 14);
        assert_eq!(u64::from(chain_id), 14);
    }

    #[test]
    fn test_error_display() {
        let err = BlockchainError::Timeout(10);
        assert_eq!(err.to_string(), "RPC timeout after 10 seconds");

        let err = BlockchainError::ReceiptTimeout {
            tx_hash: TxHash::ZERO,
            timeout_secs: 120,
        };
        assert!(err.to_string().contains("120 seconds"));
    }

    #[test]
    fn test_receipt_status() {
        let receipt = Receipt {
            transaction_hash: TxHash::ZERO,
            status: ReceiptStatus::Failure,
            gas_used: 21_000,
            block_number: Some(7),
        };
        assert!(!receipt.succeeded());
    }
}
