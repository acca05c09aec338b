//! wrap-native
//!
//! Wraps native FLR into WFLR by calling the wrapped-token contract's
//! payable `deposit()`.
//!
//! # Architecture Overview
//!
//! ```text
//!   .env / environment ──▶ config ──▶ WrapSettings
//!                                          │
//!   AMOUNT ──▶ workflow::WrapWorkflow ◀────┘
//!                 │        │
//!                 │        ├──▶ blockchain::Wallet          (key → address, signing)
//!                 │        └──▶ blockchain::BlockchainClient (JSON-RPC node)
//!                 ▼
//!            WrapOutcome ──▶ stdout summary, exit 0
//!            WrapFailure ──▶ stderr, exit 1
//! ```

use std::path::PathBuf;
use std::process::ExitCode;

use alloy::primitives::utils::{format_ether, format_units};
use alloy::primitives::U256;
use anyhow::Context;
use clap::Parser;

use wrap_native::config::load_config;
use wrap_native::observability::logging;
use wrap_native::{BlockchainClient, Wallet, WrapOutcome, WrapSettings, WrapWorkflow};

#[derive(Parser)]
#[command(name = "wrap-native")]
#[command(about = "Wrap native FLR into WFLR", long_about = None)]
struct Cli {
    /// Optional TOML configuration file.
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Amount of native token to wrap.
    #[arg(default_value = "50", allow_hyphen_values = true)]
    amount: String,
}

#[tokio::main]
async fn main() -> anyhow::Result<ExitCode> {
    dotenv::dotenv().ok();
    let cli = Cli::parse();

    let config = load_config(cli.config.as_deref()).context("Failed to load configuration")?;
    logging::init(&config.logging).context("Failed to initialize logging")?;

    tracing::info!(
        rpc_url = config.network.rpc_url.as_deref().unwrap_or_default(),
        contract = %config.contract.address,
        private_key_present = config.credentials.private_key.is_some(),
        "Configuration loaded"
    );

    let rpc_url = config.network.rpc_url.as_deref().unwrap_or_default();
    let client = BlockchainClient::new(rpc_url, config.network.rpc_timeout_secs)?;
    let settings = WrapSettings::from_config(&config)?;
    let workflow: WrapWorkflow<_, Wallet> = WrapWorkflow::new(settings, client);

    match workflow.run(Some(&cli.amount)).await {
        Ok(outcome) => {
            print_outcome(&outcome, &config.contract.native_symbol);
            Ok(ExitCode::SUCCESS)
        }
        Err(failure) => {
            eprintln!("ERROR: {}", failure);
            Ok(ExitCode::FAILURE)
        }
    }
}

fn print_outcome(outcome: &WrapOutcome, native_symbol: &str) {
    let wrapped_symbol = outcome.metadata.symbol.as_deref().unwrap_or("wrapped");
    let gas_price = format_units(U256::from(outcome.transaction.gas_price), "gwei")
        .unwrap_or_else(|_| outcome.transaction.gas_price.to_string());

    println!("Wrapped {} {} to {}", outcome.amount, native_symbol, wrapped_symbol);
    println!("Sender:           {}", outcome.sender);
    println!("Transaction hash: {}", outcome.transaction_hash());
    println!("Block:            {}", outcome.receipt.block_number.map_or("-".to_string(), |b| b.to_string()));
    println!("Gas used:         {}", outcome.receipt.gas_used);
    println!("Gas price:        {} gwei", gas_price);

    if let Some(after) = outcome.wrapped_after {
        println!("New {} balance: {}", wrapped_symbol, format_ether(after));
    }
    if let Some(delta) = outcome.wrapped_delta() {
        println!("Change:           {} {}", format_ether(delta), wrapped_symbol);
    }
}
