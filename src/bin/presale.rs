// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Command-line front-end for the Solium presale.
//!
//! ```bash
//! export PRESALE_KEY_FILE=./buyer.pem
//! presale status
//! presale buy 0.5
//! presale sign --message "Verify Solium Presale"
//! ```

use std::{path::PathBuf, process::ExitCode, sync::Arc};

use alloy::{primitives::U256, signers::local::PrivateKeySigner};
use clap::{Parser, Subcommand};
use tokio_util::sync::CancellationToken;
use solium_presale::{
    blockchain::{
        format_amount, signer_from_hex, signer_from_pem_file, ContractGateway, PresaleClient,
        BSC_FALLBACK_RPC_URL, BSC_MAINNET, DISPLAY_RATE, NATIVE_DECIMALS, PRESALE_CONTRACT,
        TOKEN_SYMBOL,
    },
    config::{ChainConfig, ConfigError, GAS_LIMIT_ENV, GAS_PRICE_GWEI_ENV, RPC_URL_ENV},
    logging::{init_tracing, LogFormat},
    purchase::{AmountInput, PurchaseError, PurchaseErrorKind, PurchaseWorkflow},
    wallet::{
        ConnectionController, LocalSessionBroker, LocalWallet, ProviderResolver, StaticProbe,
        VERIFY_MESSAGE,
    },
};

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

#[derive(Parser, Debug)]
#[command(name = "presale")]
#[command(about = "Buy Solium (SLM) in the BNB Smart Chain presale")]
#[command(version)]
struct Cli {
    /// PEM file holding the buyer's secp256k1 key (PKCS#8 or SEC1)
    #[arg(long, env = "PRESALE_KEY_FILE", global = true, conflicts_with = "private_key")]
    key_file: Option<PathBuf>,

    /// Buyer's private key as hex
    #[arg(long, env = "PRESALE_PRIVATE_KEY", hide_env_values = true, global = true)]
    private_key: Option<String>,

    /// BNB Smart Chain RPC endpoint [env: RPC_URL]
    #[arg(long, global = true)]
    rpc_url: Option<String>,

    /// Gas limit for buyTokens [env: PRESALE_GAS_LIMIT]
    #[arg(long, global = true)]
    gas_limit: Option<String>,

    /// Gas price in gwei [env: PRESALE_GAS_PRICE_GWEI]
    #[arg(long, global = true)]
    gas_price_gwei: Option<String>,

    /// User agent reported to wallet detection
    #[arg(long, default_value = concat!("presale-cli/", env!("CARGO_PKG_VERSION")), global = true)]
    user_agent: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Show the live sale state
    Status,

    /// Buy tokens for an amount of BNB
    Buy {
        /// Amount in BNB, e.g. 0.5
        amount: String,
    },

    /// Sign an identity message with the connected wallet
    Sign {
        #[arg(long, default_value = VERIFY_MESSAGE)]
        message: String,
    },
}

#[tokio::main]
async fn main() -> ExitCode {
    let _ = dotenvy::dotenv();
    init_tracing(LogFormat::from_env(), Some("solium_presale=info,warn"));

    let cli = Cli::parse();
    let chain = match chain_config(&cli) {
        Ok(chain) => chain,
        Err(e) => {
            eprintln!("{e}");
            return ExitCode::FAILURE;
        }
    };
    let result = match &cli.command {
        Command::Status => status(&chain).await,
        Command::Buy { amount } => buy(&cli, &chain, amount).await,
        Command::Sign { message } => sign(&cli, &chain, message).await,
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("{e}");
            ExitCode::FAILURE
        }
    }
}

/// Chain settings from the flags, then the environment.
fn chain_config(cli: &Cli) -> Result<ChainConfig, ConfigError> {
    ChainConfig::from_env_with(|name| match name {
        RPC_URL_ENV => cli.rpc_url.clone(),
        GAS_LIMIT_ENV => cli.gas_limit.clone(),
        GAS_PRICE_GWEI_ENV => cli.gas_price_gwei.clone(),
        _ => None,
    })
}

async fn status(chain: &ChainConfig) -> CliResult<()> {
    let client = PresaleClient::read_only(BSC_MAINNET, &chain.rpc_url)?;
    let state = client.sale_state().await.map_err(|e| {
        tracing::debug!(error = %e, "Sale state read failed");
        format!("{e}\nIf the RPC is unreachable, retry with --rpc-url {BSC_FALLBACK_RPC_URL}")
    })?;

    let bnb = |wei| format_amount(wei, NATIVE_DECIMALS);
    let phase = if state.ended {
        "ended"
    } else if state.paused {
        "paused"
    } else {
        "open"
    };

    println!("Contract:        {PRESALE_CONTRACT}");
    println!("Sale:            {phase}");
    println!("Raised:          {} / {} BNB", bnb(state.total_raised), bnb(state.hard_cap));
    println!("Cap headroom:    {} BNB", bnb(state.cap_headroom()));
    println!("Token price:     {} BNB per unit", bnb(state.token_price));
    println!("Tokens per unit: {}", state.tokens_per_unit);
    match state.tokens_for(U256::from(10u64).pow(U256::from(NATIVE_DECIMALS))) {
        Some(per_bnb) => println!("Live rate:       1 BNB = {per_bnb} {TOKEN_SYMBOL}"),
        None => println!("Live rate:       unavailable"),
    }
    println!("Listed rate:     {DISPLAY_RATE}");
    println!("Remaining:       {} {TOKEN_SYMBOL}", state.remaining_tokens);
    Ok(())
}

async fn buy(cli: &Cli, chain: &ChainConfig, amount: &str) -> CliResult<()> {
    let mut input = AmountInput::new();
    if !input.on_change(amount) {
        return Err(PurchaseError::of(PurchaseErrorKind::InvalidAmount).into());
    }

    let controller = connect(cli, chain).await?;
    let sessions = controller.sessions();
    let shutdown = CancellationToken::new();
    // Keep following account and network changes while the purchase runs.
    let watcher = tokio::spawn(controller.run(shutdown.clone()));

    let session = sessions.borrow().clone();
    let workflow = PurchaseWorkflow::new(BSC_MAINNET, chain.gas);
    let result = workflow.submit(session.as_ref(), &mut input).await;

    shutdown.cancel();
    let mut controller = watcher.await?;
    let outcome = result.map_err(|e| e.failure_message())?;

    println!("{}", outcome.message());
    println!("Tokens:      {} {TOKEN_SYMBOL}", outcome.total_tokens);
    println!("Transaction: {}", outcome.explorer_url);

    controller.disconnect().await?;
    Ok(())
}

async fn sign(cli: &Cli, chain: &ChainConfig, message: &str) -> CliResult<()> {
    let mut controller = connect(cli, chain).await?;
    let signature = controller.sign(message).await?;
    println!("{signature}");
    controller.disconnect().await?;
    Ok(())
}

/// Pair the local key and resolve a session on BNB Smart Chain.
async fn connect(
    cli: &Cli,
    chain: &ChainConfig,
) -> CliResult<ConnectionController<LocalSessionBroker>> {
    let signer = load_signer(cli)?;
    let wallet = LocalWallet::new(signer.clone(), BSC_MAINNET, &chain.rpc_url)?;
    let probe = StaticProbe::new(cli.user_agent.clone()).with_remote_session(Arc::new(wallet));
    let broker = LocalSessionBroker::new(signer, BSC_MAINNET.chain_id);

    let mut controller = ConnectionController::new(
        broker,
        Arc::new(probe),
        ProviderResolver::new(BSC_MAINNET.chain_id),
    );
    let session = controller.connect().await?;
    println!("Connected {} ({})", session.short_account(), session.label);
    if let Some(notice) = session.label.notice() {
        println!("{notice}");
    }
    Ok(controller)
}

fn load_signer(cli: &Cli) -> CliResult<PrivateKeySigner> {
    match (&cli.key_file, &cli.private_key) {
        (Some(path), _) => Ok(signer_from_pem_file(path)?),
        (None, Some(hex)) => Ok(signer_from_hex(hex)?),
        (None, None) => Err("Provide a key with --key-file or --private-key".into()),
    }
}
