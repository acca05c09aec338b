//! Key loading and transaction signing.
//!
//! # Security
//! - Keys are never logged or serialized
//! - Signed bytes leave this module only inside a [`SignedTransaction`]

use alloy::consensus::{SignableTransaction, TxEnvelope, TxLegacy};
use alloy::eips::eip2718::Encodable2718;
use alloy::network::TxSignerSync;
use alloy::primitives::{Address, TxKind};
use alloy::signers::local::PrivateKeySigner;
use async_trait::async_trait;
use thiserror::Error;

use crate::blockchain::types::{SignedTransaction, UnsignedTransaction};

/// Signing failures. Both abort before anything is broadcast.
#[derive(Debug, Error)]
pub enum SignError {
    /// Key material malformed or of the wrong length.
    #[error("Invalid private key: {0}")]
    InvalidKey(String),

    /// Underlying cryptographic failure.
    #[error("Signing failed: {0}")]
    SigningFailure(String),
}

/// Produces signed envelopes from unsigned transactions.
#[async_trait]
pub trait TransactionSigner: Send + Sync + Sized {
    /// Derive a signer from hex key material, with or without `0x`.
    fn from_private_key(private_key_hex: &str) -> Result<Self, SignError>;

    /// Sender address derived from the key.
    fn address(&self) -> Address;

    async fn sign(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction, SignError>;
}

/// Local private-key wallet.
#[derive(Clone)]
pub struct Wallet {
    signer: PrivateKeySigner,
}

impl Wallet {
    fn legacy_transaction(tx: &UnsignedTransaction) -> TxLegacy {
        TxLegacy {
            chain_id: Some(tx.chain_id.0),
            nonce: tx.nonce,
            gas_price: tx.gas_price,
            gas_limit: tx.gas_limit,
            to: TxKind::Call(tx.to),
            value: tx.value,
            input: tx.data.clone(),
        }
    }
}

#[async_trait]
impl TransactionSigner for Wallet {
    fn from_private_key(private_key_hex: &str) -> Result<Self, SignError> {
        let key_hex = private_key_hex.trim();
        let key_hex = key_hex.strip_prefix("0x").unwrap_or(key_hex);

        let signer: PrivateKeySigner = key_hex
            .parse()
            .map_err(|e| SignError::InvalidKey(format!("{}", e)))?;

        tracing::debug!(address = %signer.address(), "Wallet initialized");

        Ok(Self { signer })
    }

    fn address(&self) -> Address {
        self.signer.address()
    }

    /// Sign as an EIP-155 legacy transaction.
    ///
    /// RFC 6979 nonces make the signature deterministic for a given key and payload.
    async fn sign(&self, tx: &UnsignedTransaction) -> Result<SignedTransaction, SignError> {
        let mut legacy = Self::legacy_transaction(tx);
        let signature = self
            .signer
            .sign_transaction_sync(&mut legacy)
            .map_err(|e| SignError::SigningFailure(e.to_string()))?;

        let envelope = TxEnvelope::from(legacy.into_signed(signature));

        Ok(SignedTransaction {
            hash: *envelope.tx_hash(),
            raw: envelope.encoded_2718().into(),
        })
    }
}

impl std::fmt::Debug for Wallet {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Wallet")
            .field("address", &self.signer.address())
            .finish()
    }
}
