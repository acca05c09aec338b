//! Best-effort read-only probes against the wrapped-token contract.
//!
//! Failures here are logged and reported as `None`; they never abort a wrap.

use alloy::primitives::{Address, U256};
use alloy::sol_types::SolCall;

use crate::blockchain::contract::IWrappedNative;
use crate::blockchain::{BlockchainError, LedgerClient};

/// Token metadata as far as it could be read.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TokenMetadata {
    pub name: Option<String>,
    pub symbol: Option<String>,
    pub decimals: Option<u8>,
}

async fn view<L, C>(ledger: &L, contract: Address, call: C) -> Result<C::Return, BlockchainError>
where
    L: LedgerClient + ?Sized,
    C: SolCall,
{
    let output = ledger
        .call_view(contract, call.abi_encode().into())
        .await?;
    C::abi_decode_returns(&output).map_err(|e| BlockchainError::Decode {
        method: C::SIGNATURE,
        reason: e.to_string(),
    })
}

fn best_effort<T>(what: &'static str, result: Result<T, BlockchainError>) -> Option<T> {
    match result {
        Ok(value) => Some(value),
        Err(e) => {
            tracing::warn!(probe = what, error = %e, "Contract probe failed");
            None
        }
    }
}

/// Read name, symbol and decimals.
pub async fn token_metadata<L>(ledger: &L, contract: Address) -> TokenMetadata
where
    L: LedgerClient + ?Sized,
{
    let name = best_effort("name", view(ledger, contract, IWrappedNative::nameCall {}).await);
    let symbol = best_effort("symbol", view(ledger, contract, IWrappedNative::symbolCall {}).await);
    let decimals = best_effort(
        "decimals",
        view(ledger, contract, IWrappedNative::decimalsCall {}).await,
    );

    TokenMetadata {
        name,
        symbol,
        decimals,
    }
}

/// Read `owner`'s wrapped-token balance.
pub async fn wrapped_balance<L>(ledger: &L, contract: Address, owner: Address) -> Option<U256>
where
    L: LedgerClient + ?Sized,
{
    best_effort(
        "balanceOf",
        view(ledger, contract, IWrappedNative::balanceOfCall { owner }).await,
    )
}
