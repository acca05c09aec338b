//! Transaction building for the `deposit` call.
//!
//! # Responsibilities
//! - Convert the requested amount into the transaction value
//! - Apply the fee policy (fixed gas limit, marked-up gas price)
//! - Refuse to build when the balance cannot cover the value
//!
//! Building is pure; every chain read happens before it.

use alloy::primitives::{Address, U256};
use thiserror::Error;

use crate::blockchain::contract::deposit_calldata;
use crate::blockchain::types::{AccountSnapshot, ChainId, UnsignedTransaction, WrapRequest};
use crate::config::FeeConfig;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum BuildError {
    #[error("Insufficient balance: have {balance} wei, need {required} wei")]
    InsufficientBalance { balance: U256, required: U256 },
}

/// Gas limit and gas price markup applied to every wrap.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FeePolicy {
    pub gas_limit: u64,
    pub markup_percent: u32,
}

impl FeePolicy {
    /// Marked-up gas price, rounded down.
    pub fn gas_price(&self, current_gas_price: u128) -> u128 {
        current_gas_price.saturating_mul(100 + u128::from(self.markup_percent)) / 100
    }
}

impl Default for FeePolicy {
    fn default() -> Self {
        Self::from(&FeeConfig::default())
    }
}

impl From<&FeeConfig> for FeePolicy {
    fn from(config: &FeeConfig) -> Self {
        Self {
            gas_limit: config.gas_limit,
            markup_percent: config.gas_price_markup_percent,
        }
    }
}

/// Balance guard shared by the workflow's balance check and the builder.
pub fn ensure_sufficient_balance(balance: U256, required: U256) -> Result<(), BuildError> {
    if balance < required {
        return Err(BuildError::InsufficientBalance { balance, required });
    }
    Ok(())
}

/// Builds unsigned `deposit` transactions against one contract on one chain.
#[derive(Debug, Clone)]
pub struct TxBuilder {
    contract: Address,
    chain_id: ChainId,
    fee_policy: FeePolicy,
}

impl TxBuilder {
    pub fn new(contract: Address, chain_id: ChainId, fee_policy: FeePolicy) -> Self {
        Self {
            contract,
            chain_id,
            fee_policy,
        }
    }

    /// Build the deposit transaction.
    ///
    /// # Arguments
    /// * `request` - Amount and sender
    /// * `snapshot` - Balance and nonce read just before this call
    /// * `current_gas_price` - Node gas price before markup
    pub fn build(
        &self,
        request: &WrapRequest,
        snapshot: &AccountSnapshot,
        current_gas_price: u128,
    ) -> Result<UnsignedTransaction, BuildError> {
        let value = request.amount.smallest_units();
        ensure_sufficient_balance(snapshot.balance, value)?;

        Ok(UnsignedTransaction {
            to: self.contract,
            value,
            data: deposit_calldata(),
            gas_limit: self.fee_policy.gas_limit,
            gas_price: self.fee_policy.gas_price(current_gas_price),
            nonce: snapshot.nonce,
            chain_id: self.chain_id,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloy::primitives::address;

    use crate::amount;

    const WFLR: Address = address!("0x1D80c49BbBCd1C0911346656B529DF9E5c2F783d");
    const SENDER: Address = address!("0xf39Fd6e51aad88F6F4ce6aB8827279cffFb92266");

    fn one_unit() -> U256 {
        U256::from(10u64).pow(U256::from(18u64))
    }

    fn request(amount: &str) -> WrapRequest {
        WrapRequest {
            amount: amount::validate(Some(amount)).unwrap(),
            sender: SENDER,
        }
    }

    fn builder() -> TxBuilder {
        TxBuilder::new(WFLR, ChainId(14), FeePolicy::default())
    }

    #[test]
    fn test_gas_price_markup() {
        let policy = FeePolicy::default();
        assert_eq!(policy.gas_price(100), 110);
        assert_eq!(policy.gas_price(25_000_000_000), 27_500_000_000);
        // 10% of 15 is 1.5; the fraction is dropped.
        assert_eq!(policy.gas_price(15), 16);
        assert_eq!(policy.gas_price(0), 0);
    }

    #[test]
    fn test_build_deposit() {
        let snapshot = AccountSnapshot {
            balance: U256::from(100u64) * one_unit(),
            nonce: 9,
        };
        let tx = builder().build(&request("50"), &snapshot, 100).unwrap();

        assert_eq!(tx.to, WFLR);
        assert_eq!(tx.value, U256::from(50u64) * one_unit());
        assert_eq!(tx.gas_limit, 200_000);
        assert_eq!(tx.gas_price, 110);
        assert_eq!(tx.nonce, 9);
        assert_eq!(tx.chain_id, ChainId(14));
        assert_eq!(tx.data, deposit_calldata());
    }

    #[test]
    fn test_insufficient_balance() {
        let snapshot = AccountSnapshot {
            balance: one_unit(),
            nonce: 0,
        };
        let err = builder().build(&request("2"), &snapshot, 100).unwrap_err();
        assert_eq!(
            err,
            BuildError::InsufficientBalance {
                balance: one_unit(),
                required: U256::from(2u64) * one_unit(),
            }
        );
    }

    #[test]
    fn test_exact_balance_is_enough() {
        let snapshot = AccountSnapshot {
            balance: one_unit(),
            nonce: 0,
        };
        assert!(builder().build(&request("1"), &snapshot, 100).is_ok());
    }
}
