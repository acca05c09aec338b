//! The wrap state machine.
//!
//! # Sequence
//! ```text
//! Validating → DerivingAddress → Connecting → CheckingBalance → FetchingFees
//!     → Building → Signing → Broadcasting → AwaitingReceipt → Succeeded
//!                       (any failure) ─────────────────────→ Failed
//! ```
//!
//! Balance, gas price and nonce are each read once, in that order, with the
//! nonce read last so it is as fresh as possible at build time. Nothing is
//! re-read before broadcast; a concurrent sender on the same address can
//! still invalidate the nonce.
//!
//! `Connecting` covers the liveness check and the chain ID check, so a
//! `ChainMismatch` is reported at that stage. The best-effort token probes
//! run at the start of `CheckingBalance` and never fail it.

use alloy::primitives::{Address, TxHash, U256};
use std::marker::PhantomData;
use std::time::Duration;

use crate::amount::{self, ValidatedAmount};
use crate::blockchain::contract;
use crate::blockchain::transaction::ensure_sufficient_balance;
use crate::blockchain::{
    AccountSnapshot, BlockchainError, ChainId, FeePolicy, LedgerClient, Receipt,
    TransactionSigner, TxBuilder, UnsignedTransaction, WrapRequest,
};
use crate::config::{Credentials, WrapConfig};
use crate::workflow::error::{WrapError, WrapFailure};
use crate::workflow::probe::{self, TokenMetadata};
use crate::workflow::state::WorkflowState;

/// Everything the workflow needs from configuration, already parsed.
#[derive(Debug, Clone)]
pub struct WrapSettings {
    pub contract: Address,
    pub expected_chain_id: Option<u64>,
    pub fee_policy: FeePolicy,
    pub receipt_timeout: Duration,
    pub poll_interval: Duration,
    pub credentials: Credentials,
}

impl WrapSettings {
    pub fn from_config(config: &WrapConfig) -> Result<Self, WrapError> {
        let contract = config.contract.address.parse().map_err(|e| {
            WrapError::UnexpectedFailure(format!(
                "contract address '{}': {}",
                config.contract.address, e
            ))
        })?;

        Ok(Self {
            contract,
            expected_chain_id: config.network.chain_id,
            fee_policy: FeePolicy::from(&config.fees),
            receipt_timeout: Duration::from_secs(config.receipt.timeout_secs),
            poll_interval: Duration::from_millis(config.receipt.poll_interval_ms),
            credentials: config.credentials.clone(),
        })
    }
}

/// Result of a successful wrap.
#[derive(Debug, Clone)]
pub struct WrapOutcome {
    pub amount: ValidatedAmount,
    pub sender: Address,
    pub transaction: UnsignedTransaction,
    pub receipt: Receipt,
    pub metadata: TokenMetadata,
    pub wrapped_before: Option<U256>,
    pub wrapped_after: Option<U256>,
}

impl WrapOutcome {
    pub fn transaction_hash(&self) -> TxHash {
        self.receipt.transaction_hash
    }

    /// Change in wrapped balance, when both reads succeeded and it did not shrink.
    pub fn wrapped_delta(&self) -> Option<U256> {
        self.wrapped_after?.checked_sub(self.wrapped_before?)
    }
}

/// Tracks the current stage and the context attached to failures.
struct Progress {
    state: WorkflowState,
    amount: Option<String>,
    sender: Option<Address>,
}

impl Progress {
    fn new() -> Self {
        let progress = Self {
            state: WorkflowState::Validating,
            amount: None,
            sender: None,
        };
        tracing::info!(state = %progress.state, "Wrap started");
        progress
    }

    fn advance(&mut self) {
        if let Some(next) = self.state.next() {
            self.state = next;
            tracing::info!(state = %self.state, "Workflow state changed");
        }
    }

    fn fail(&mut self, error: WrapError) -> WrapFailure {
        let stage = self.state;
        self.state = WorkflowState::Failed;
        tracing::error!(
            stage = %stage,
            amount = self.amount.as_deref().unwrap_or("-"),
            sender = ?self.sender,
            error = %error,
            "Wrap failed"
        );
        WrapFailure {
            stage,
            amount: self.amount.clone(),
            sender: self.sender,
            error,
        }
    }
}

/// Submits one `deposit` per [`WrapWorkflow::run`] call.
pub struct WrapWorkflow<L, S> {
    settings: WrapSettings,
    ledger: L,
    _signer: PhantomData<S>,
}

impl<L, S> WrapWorkflow<L, S>
where
    L: LedgerClient,
    S: TransactionSigner,
{
    pub fn new(settings: WrapSettings, ledger: L) -> Self {
        Self {
            settings,
            ledger,
            _signer: PhantomData,
        }
    }

    pub fn ledger(&self) -> &L {
        &self.ledger
    }

    /// Read the wrapped token's name, symbol and decimals. Never fails.
    pub async fn probe_metadata(&self) -> TokenMetadata {
        probe::token_metadata(&self.ledger, self.settings.contract).await
    }

    /// Run the whole wrap for `amount` (native token units, decimal text).
    pub async fn run(&self, amount: Option<&str>) -> Result<WrapOutcome, WrapFailure> {
        let mut progress = Progress::new();

        let amount = amount::validate(amount).map_err(|e| progress.fail(e.into()))?;
        progress.amount = Some(amount.to_string());
        progress.advance();

        let key = self
            .settings
            .credentials
            .private_key
            .as_deref()
            .ok_or_else(|| progress.fail(WrapError::MissingCredentials))?;
        let signer = S::from_private_key(key).map_err(|e| progress.fail(e.into()))?;
        let sender = signer.address();
        progress.sender = Some(sender);
        tracing::info!(sender = %sender, "Using wallet address derived from private key");
        let request = WrapRequest { amount, sender };
        progress.advance();

        if !self.ledger.is_connected().await {
            return Err(progress.fail(WrapError::ConnectionFailure(
                "ledger node did not respond".to_string(),
            )));
        }
        let chain_id = self.resolve_chain_id().await.map_err(|e| progress.fail(e))?;
        progress.advance();

        let metadata = self.probe_metadata().await;
        tracing::info!(
            name = metadata.name.as_deref().unwrap_or("?"),
            symbol = metadata.symbol.as_deref().unwrap_or("?"),
            interface_version = contract::INTERFACE_VERSION,
            "Wrapped token contract"
        );
        let wrapped_before =
            probe::wrapped_balance(&self.ledger, self.settings.contract, sender).await;

        let value = request.amount.smallest_units();
        let balance = self
            .ledger
            .get_balance(sender)
            .await
            .map_err(|e| progress.fail(WrapError::read("eth_getBalance", e)))?;
        tracing::info!(balance = %balance, required = %value, "Native balance read");
        ensure_sufficient_balance(balance, value).map_err(|e| progress.fail(e.into()))?;
        progress.advance();

        let current_gas_price = self
            .ledger
            .get_gas_price()
            .await
            .map_err(|e| progress.fail(WrapError::read("eth_gasPrice", e)))?;
        progress.advance();

        let nonce = self
            .ledger
            .get_nonce(sender)
            .await
            .map_err(|e| progress.fail(WrapError::read("eth_getTransactionCount", e)))?;
        let snapshot = AccountSnapshot { balance, nonce };
        let builder = TxBuilder::new(self.settings.contract, chain_id, self.settings.fee_policy);
        let transaction = builder
            .build(&request, &snapshot, current_gas_price)
            .map_err(|e| progress.fail(e.into()))?;
        tracing::info!(
            to = %transaction.to,
            value = %transaction.value,
            gas_limit = transaction.gas_limit,
            current_gas_price,
            gas_price = transaction.gas_price,
            nonce = transaction.nonce,
            chain_id = transaction.chain_id.0,
            "Deposit transaction built"
        );
        progress.advance();

        let signed = signer
            .sign(&transaction)
            .await
            .map_err(|e| progress.fail(e.into()))?;
        progress.advance();

        let tx_hash = self
            .ledger
            .broadcast(&signed)
            .await
            .map_err(|e| progress.fail(WrapError::BroadcastFailure(e.to_string())))?;
        if tx_hash != signed.hash {
            tracing::warn!(local = %signed.hash, node = %tx_hash, "Node reported a different transaction hash");
        }
        drop(signed);
        tracing::info!(tx_hash = %tx_hash, "Transaction sent");
        progress.advance();

        let receipt = self
            .ledger
            .wait_for_receipt(tx_hash, self.settings.receipt_timeout, self.settings.poll_interval)
            .await
            .map_err(|e| progress.fail(classify_wait_error(e)))?;

        if !receipt.succeeded() {
            self.log_transaction_details(tx_hash).await;
            return Err(progress.fail(WrapError::TransactionReverted {
                tx_hash,
                block_number: receipt.block_number,
                gas_used: receipt.gas_used,
            }));
        }
        progress.advance();
        tracing::info!(
            tx_hash = %receipt.transaction_hash,
            gas_used = receipt.gas_used,
            block_number = ?receipt.block_number,
            "Transaction successful"
        );

        let wrapped_after =
            probe::wrapped_balance(&self.ledger, self.settings.contract, sender).await;

        Ok(WrapOutcome {
            amount: request.amount,
            sender,
            transaction,
            receipt,
            metadata,
            wrapped_before,
            wrapped_after,
        })
    }

    /// Use the node's chain ID, rejecting it if it disagrees with configuration.
    async fn resolve_chain_id(&self) -> Result<ChainId, WrapError> {
        let actual = self
            .ledger
            .get_chain_id()
            .await
            .map_err(|e| WrapError::read("eth_chainId", e))?;

        match self.settings.expected_chain_id {
            Some(expected) if expected != actual.0 => Err(WrapError::ChainMismatch {
                expected,
                actual: actual.0,
            }),
            _ => Ok(actual),
        }
    }

    async fn log_transaction_details(&self, tx_hash: TxHash) {
        match self.ledger.transaction_details(tx_hash).await {
            Ok(Some(details)) => {
                tracing::warn!(tx_hash = %tx_hash, details = %details, "Reverted transaction details")
            }
            Ok(None) => tracing::warn!(tx_hash = %tx_hash, "Reverted transaction not found"),
            Err(e) => {
                tracing::warn!(tx_hash = %tx_hash, error = %e, "Could not fetch transaction details")
            }
        }
    }
}

fn classify_wait_error(err: BlockchainError) -> WrapError {
    match err {
        BlockchainError::ReceiptTimeout {
            tx_hash,
            timeout_secs,
        } => WrapError::ReceiptTimeout {
            tx_hash,
            timeout_secs,
        },
        other => WrapError::UnexpectedFailure(other.to_string()),
    }
}
