//! Shared fakes for workflow tests.

use alloy::primitives::{address, Address, Bytes, TxHash, U256};
use alloy::sol_types::SolCall;
use async_trait::async_trait;
use std::sync::Mutex;
use std::time::Duration;

use wrap_native::blockchain::contract::IWrappedNative;
use wrap_native::blockchain::{
    BlockchainError, ChainId, FeePolicy, LedgerClient, Receipt, ReceiptStatus, SignedTransaction,
};
use wrap_native::config::Credentials;
use wrap_native::WrapSettings;

/// Anvil's first development key and its address.
pub const TEST_PRIVATE_KEY: &str = "0xac0974bec39a17e36ba4a6b4d238ff944bacb478cbed5efcae784d7bf4f2ff80";
pub const TEST_ADDRESS: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

pub const WFLR: Address = address!("0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d");

pub fn units(whole: u64) -> U256 {
    U256::from(whole) * U256::from(10u64).pow(U256::from(18u64))
}

pub fn settings() -> WrapSettings {
    WrapSettings {
        contract: WFLR,
        expected_chain_id: None,
        fee_policy: FeePolicy::default(),
        receipt_timeout: Duration::from_millis(200),
        poll_interval: Duration::from_millis(10),
        credentials: Credentials {
            private_key: Some(TEST_PRIVATE_KEY.to_string()),
        },
    }
}

/// Scripted ledger node that records every call it receives.
pub struct FakeLedger {
    pub connected: bool,
    pub chain_id: u64,
    pub balance: U256,
    pub gas_price: u128,
    pub nonce: u64,
    pub metadata_available: bool,
    /// Wrapped balances returned by successive `balanceOf` calls.
    pub wrapped_balances: Mutex<Vec<U256>>,
    pub reject_broadcast: Option<String>,
    /// Receipt status to report once mined; `None` never mines.
    pub receipt_status: Option<ReceiptStatus>,
    /// Polls answered with "pending" before the receipt appears.
    pub pending_polls: usize,
    /// Ledger read (by call name) that fails with an RPC error.
    pub fail_read: Option<&'static str>,
    pub calls: Mutex<Vec<&'static str>>,
    pub polls: Mutex<usize>,
}

impl Default for FakeLedger {
    fn default() -> Self {
        Self {
            connected: true,
            chain_id: 14,
            balance: units(100),
            gas_price: 25_000_000_000,
            nonce: 4,
            metadata_available: true,
            wrapped_balances: Mutex::new(vec![units(10), units(60)]),
            reject_broadcast: None,
            receipt_status: Some(ReceiptStatus::Success),
            pending_polls: 1,
            fail_read: None,
            calls: Mutex::new(Vec::new()),
            polls: Mutex::new(0),
        }
    }
}

impl FakeLedger {
    fn record(&self, call: &'static str) {
        self.calls.lock().unwrap().push(call);
    }

    fn read<T>(&self, call: &'static str, value: T) -> Result<T, BlockchainError> {
        self.record(call);
        if self.fail_read == Some(call) {
            return Err(BlockchainError::Rpc("connection reset by peer".into()));
        }
        Ok(value)
    }

    pub fn calls(&self) -> Vec<&'static str> {
        self.calls.lock().unwrap().clone()
    }

    pub fn called(&self, call: &str) -> bool {
        self.calls().iter().any(|c| *c == call)
    }

    pub fn position(&self, call: &str) -> Option<usize> {
        self.calls().iter().position(|c| *c == call)
    }
}

#[async_trait]
impl LedgerClient for FakeLedger {
    async fn is_connected(&self) -> bool {
        self.record("is_connected");
        self.connected
    }

    async fn get_chain_id(&self) -> Result<ChainId, BlockchainError> {
        self.read("get_chain_id", ChainId(self.chain_id))
    }

    async fn get_block_number(&self) -> Result<u64, BlockchainError> {
        self.record("get_block_number");
        Ok(1_000)
    }

    async fn get_balance(&self, _address: Address) -> Result<U256, BlockchainError> {
        self.read("get_balance", self.balance)
    }

    async fn get_gas_price(&self) -> Result<u128, BlockchainError> {
        self.read("get_gas_price", self.gas_price)
    }

    async fn get_nonce(&self, _address: Address) -> Result<u64, BlockchainError> {
        self.read("get_nonce", self.nonce)
    }

    async fn call_view(&self, _contract: Address, data: Bytes) -> Result<Bytes, BlockchainError> {
        let selector: [u8; 4] = data[..4].try_into().unwrap();

        if selector == IWrappedNative::balanceOfCall::SELECTOR {
            self.record("balanceOf");
            let mut balances = self.wrapped_balances.lock().unwrap();
            if balances.is_empty() {
                return Err(BlockchainError::Rpc("execution reverted".into()));
            }
            let balance = balances.remove(0);
            return Ok(IWrappedNative::balanceOfCall::abi_encode_returns(&balance).into());
        }

        self.record("metadata");
        if !self.metadata_available {
            return Err(BlockchainError::Rpc("execution reverted".into()));
        }
        let encoded = if selector == IWrappedNative::nameCall::SELECTOR {
            IWrappedNative::nameCall::abi_encode_returns(&"Wrapped Flare".to_string())
        } else if selector == IWrappedNative::symbolCall::SELECTOR {
            IWrappedNative::symbolCall::abi_encode_returns(&"WFLR".to_string())
        } else if selector == IWrappedNative::decimalsCall::SELECTOR {
            IWrappedNative::decimalsCall::abi_encode_returns(&18u8)
        } else {
            return Err(BlockchainError::Rpc("unknown selector".into()));
        };
        Ok(encoded.into())
    }

    async fn broadcast(&self, tx: &SignedTransaction) -> Result<TxHash, BlockchainError> {
        self.record("broadcast");
        match &self.reject_broadcast {
            Some(reason) => Err(BlockchainError::Broadcast(reason.clone())),
            None => Ok(tx.hash),
        }
    }

    async fn get_receipt(&self, tx_hash: TxHash) -> Result<Option<Receipt>, BlockchainError> {
        self.record("get_receipt");
        let mut polls = self.polls.lock().unwrap();
        *polls += 1;

        match self.receipt_status {
            Some(status) if *polls > self.pending_polls => Ok(Some(Receipt {
                transaction_hash: tx_hash,
                status,
                gas_used: 45_038,
                block_number: Some(1_001),
            })),
            _ => Ok(None),
        }
    }

    async fn transaction_details(
        &self,
        tx_hash: TxHash,
    ) -> Result<Option<serde_json::Value>, BlockchainError> {
        self.record("transaction_details");
        Ok(Some(serde_json::json!({ "hash": tx_hash.to_string() })))
    }
}
