//! Ledger node client with timeout and error handling.
//!
//! # Responsibilities
//! - Connect to JSON-RPC endpoint
//! - Query chain state (block number, balances, nonce, gas price, receipts)
//! - Run read-only contract calls
//! - Broadcast signed transactions and poll for their receipts
//! - Handle timeouts and network errors gracefully

use alloy::network::TransactionBuilder;
use alloy::primitives::{Address, Bytes, TxHash, U256};
use alloy::providers::{Provider, ProviderBuilder};
use alloy::rpc::types::TransactionRequest;
use async_trait::async_trait;
use std::future::{Future, IntoFuture};
use std::sync::Arc;
use std::time::Duration;
use tokio::time::{interval, timeout, Instant, MissedTickBehavior};

use crate::blockchain::types::{
    BlockchainError, BlockchainResult, ChainId, Receipt, SignedTransaction,
};

/// Narrow view of a ledger node used by the wrap workflow.
///
/// Every read reflects chain state at call time; nothing is cached.
#[async_trait]
pub trait LedgerClient: Send + Sync {
    /// Whether the node answers at all.
    async fn is_connected(&self) -> bool;

    async fn get_chain_id(&self) -> BlockchainResult<ChainId>;

    async fn get_block_number(&self) -> BlockchainResult<u64>;

    /// Native balance in smallest units.
    async fn get_balance(&self, address: Address) -> BlockchainResult<U256>;

    /// Current gas price in smallest units.
    async fn get_gas_price(&self) -> BlockchainResult<u128>;

    /// Transaction count including the pending pool.
    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64>;

    /// Execute a read-only call against `contract` and return the raw result.
    async fn call_view(&self, contract: Address, data: Bytes) -> BlockchainResult<Bytes>;

    /// Submit a signed transaction, returning the hash the node reports.
    async fn broadcast(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash>;

    /// Receipt if the transaction has been mined, `None` while pending.
    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<Receipt>>;

    /// Transaction as the node reports it, for failure diagnostics.
    async fn transaction_details(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<serde_json::Value>>;

    /// Poll for a receipt until one exists or `wait` elapses.
    ///
    /// Transient RPC errors while polling are logged and polling continues.
    async fn wait_for_receipt(
        &self,
        tx_hash: TxHash,
        wait: Duration,
        poll_interval: Duration,
    ) -> BlockchainResult<Receipt> {
        let deadline = Instant::now() + wait;
        let mut ticker = interval(poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;

            match self.get_receipt(tx_hash).await {
                Ok(Some(receipt)) => return Ok(receipt),
                Ok(None) => tracing::debug!(tx_hash = %tx_hash, "Transaction pending"),
                Err(e) => tracing::warn!(tx_hash = %tx_hash, error = %e, "Receipt poll failed"),
            }

            if Instant::now() >= deadline {
                return Err(BlockchainError::ReceiptTimeout {
                    tx_hash,
                    timeout_secs: wait.as_secs(),
                });
            }
        }
    }
}

/// Ledger client over an alloy JSON-RPC provider.
#[derive(Clone)]
pub struct BlockchainClient {
    provider: Arc<dyn Provider + Send + Sync>,
    rpc_url: String,
    timeout_duration: Duration,
}

impl BlockchainClient {
    /// Create a client for an HTTP JSON-RPC endpoint.
    ///
    /// No request is made here; use [`LedgerClient::is_connected`] to probe.
    pub fn new(rpc_url: &str, rpc_timeout_secs: u64) -> BlockchainResult<Self> {
        let url: url::Url = rpc_url
            .parse()
            .map_err(|e| BlockchainError::Rpc(format!("Invalid RPC URL '{}': {}", rpc_url, e)))?;
        let provider = ProviderBuilder::new().connect_http(url);

        Ok(Self::with_provider(
            Arc::new(provider),
            rpc_url,
            rpc_timeout_secs,
        ))
    }

    /// Wrap an existing provider (mocked transports in tests).
    pub fn with_provider(
        provider: Arc<dyn Provider + Send + Sync>,
        rpc_url: &str,
        rpc_timeout_secs: u64,
    ) -> Self {
        Self {
            provider,
            rpc_url: rpc_url.to_string(),
            timeout_duration: Duration::from_secs(rpc_timeout_secs),
        }
    }

    /// Run an RPC future under the configured timeout.
    async fn timed<T, E, F>(&self, method: &'static str, fut: F) -> BlockchainResult<T>
    where
        F: Future<Output = Result<T, E>>,
        E: std::fmt::Display,
    {
        match timeout(self.timeout_duration, fut).await {
            Ok(Ok(value)) => Ok(value),
            Ok(Err(e)) => {
                tracing::warn!(method, error = %e, "RPC error");
                Err(BlockchainError::Rpc(format!("{} failed: {}", method, e)))
            }
            Err(_) => {
                tracing::warn!(method, "RPC timeout");
                Err(BlockchainError::Timeout(self.timeout_duration.as_secs()))
            }
        }
    }
}

#[async_trait]
impl LedgerClient for BlockchainClient {
    async fn is_connected(&self) -> bool {
        match self.get_block_number().await {
            Ok(block) => {
                tracing::info!(rpc_url = %self.rpc_url, block_number = block, "Connected to ledger node");
                true
            }
            Err(e) => {
                tracing::error!(rpc_url = %self.rpc_url, error = %e, "Ledger node unreachable");
                false
            }
        }
    }

    async fn get_chain_id(&self) -> BlockchainResult<ChainId> {
        self.timed("eth_chainId", self.provider.get_chain_id())
            .await
            .map(ChainId)
    }

    async fn get_block_number(&self) -> BlockchainResult<u64> {
        self.timed("eth_blockNumber", self.provider.get_block_number())
            .await
    }

    async fn get_balance(&self, address: Address) -> BlockchainResult<U256> {
        self.timed("eth_getBalance", self.provider.get_balance(address).into_future())
            .await
    }

    async fn get_gas_price(&self) -> BlockchainResult<u128> {
        self.timed("eth_gasPrice", self.provider.get_gas_price())
            .await
    }

    async fn get_nonce(&self, address: Address) -> BlockchainResult<u64> {
        self.timed(
            "eth_getTransactionCount",
            self.provider.get_transaction_count(address).pending().into_future(),
        )
        .await
    }

    async fn call_view(&self, contract: Address, data: Bytes) -> BlockchainResult<Bytes> {
        let request = TransactionRequest::default()
            .with_to(contract)
            .with_input(data);
        self.timed("eth_call", self.provider.call(request).into_future())
            .await
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> BlockchainResult<TxHash> {
        let pending = match timeout(
            self.timeout_duration,
            self.provider.send_raw_transaction(&tx.raw),
        )
        .await
        {
            Ok(Ok(pending)) => pending,
            Ok(Err(e)) => return Err(BlockchainError::Broadcast(e.to_string())),
            Err(_) => return Err(BlockchainError::Timeout(self.timeout_duration.as_secs())),
        };
        Ok(*pending.tx_hash())
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> BlockchainResult<Option<Receipt>> {
        let receipt = self
            .timed(
                "eth_getTransactionReceipt",
                self.provider.get_transaction_receipt(tx_hash),
            )
            .await?;
        Ok(receipt.map(Receipt::from))
    }

    async fn transaction_details(
        &self,
        tx_hash: TxHash,
    ) -> BlockchainResult<Option<serde_json::Value>> {
        let tx = self
            .timed(
                "eth_getTransactionByHash",
                self.provider.get_transaction_by_hash(tx_hash),
            )
            .await?;
        tx.map(|tx| {
            serde_json::to_value(tx).map_err(|e| BlockchainError::Decode {
                method: "eth_getTransactionByHash",
                reason: e.to_string(),
            })
        })
        .transpose()
    }
}

impl std::fmt::Debug for BlockchainClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BlockchainClient")
            .field("rpc_url", &self.rpc_url)
            .field("timeout_secs", &self.timeout_duration.as_secs())
            .finish()
    }
}
