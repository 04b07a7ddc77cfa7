// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet handles and the resolved session.

use std::{fmt, sync::Arc};

use async_trait::async_trait;
use serde::Serialize;

use crate::blockchain::{ContractGateway, GatewayError};

/// Errors raised by a wallet handle.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ProviderError {
    #[error("RPC error: {0}")]
    Rpc(#[from] GatewayError),

    #[error("Signing failed: {0}")]
    Signing(String),
}

/// An RPC-capable wallet handle.
///
/// This is the provider abstraction every wallet source is wrapped in:
/// injected extensions, the alternate-namespace global, remote sessions and
/// the local key wallet all implement it.
#[async_trait]
pub trait WalletProvider: Send + Sync {
    /// Chain id the wallet is currently attached to.
    async fn chain_id(&self) -> Result<u64, ProviderError>;

    /// Presale contract bound to this wallet's signer.
    fn gateway(&self) -> Arc<dyn ContractGateway>;

    /// Sign a personal message, returning the 0x-prefixed signature.
    async fn sign_message(&self, message: &str) -> Result<String, ProviderError>;
}

/// Wallet family, used for labels and user-facing copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum WalletKind {
    MetaMask,
    TrustWallet,
    WalletConnect,
    Unknown,
}

impl WalletKind {
    pub fn label(&self) -> &'static str {
        match self {
            WalletKind::MetaMask => "MetaMask",
            WalletKind::TrustWallet => "TrustWallet",
            WalletKind::WalletConnect => "WalletConnect",
            WalletKind::Unknown => "Unknown",
        }
    }

    /// Message shown after a successful purchase.
    pub fn success_message(&self) -> &'static str {
        match self {
            WalletKind::MetaMask | WalletKind::WalletConnect => {
                "Purchase successful! Tokens will arrive shortly. Check your wallet."
            }
            WalletKind::TrustWallet | WalletKind::Unknown => {
                "Purchase successful! Tokens will be sent to your wallet."
            }
        }
    }

    /// Extra notice shown next to the purchase form, if any.
    pub fn notice(&self) -> Option<&'static str> {
        match self {
            WalletKind::WalletConnect => {
                Some("Using WalletConnect? Make sure you're on Binance Smart Chain network")
            }
            _ => None,
        }
    }
}

impl fmt::Display for WalletKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A resolved wallet connection on the required network.
///
/// Owned by the connection controller and replaced wholesale on every
/// transition; the purchase workflow only borrows it.
#[derive(Clone)]
pub struct WalletSession {
    pub provider: Arc<dyn WalletProvider>,
    pub account: String,
    pub network_id: u64,
    /// Handle the resolver selected.
    pub kind: WalletKind,
    /// Wallet family detected in the environment; drives user-facing copy.
    pub label: WalletKind,
}

impl WalletSession {
    /// Account shortened for display, e.g. `0x1234...abcd`.
    pub fn short_account(&self) -> String {
        short_address(&self.account)
    }
}

impl fmt::Debug for WalletSession {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WalletSession")
            .field("account", &self.account)
            .field("network_id", &self.network_id)
            .field("kind", &self.kind)
            .field("label", &self.label)
            .finish_non_exhaustive()
    }
}

/// Shorten an address to its first six and last four characters.
pub fn short_address(address: &str) -> String {
    if address.len() <= 10 || !address.is_ascii() {
        return address.to_string();
    }
    format!("{}...{}", &address[..6], &address[address.len() - 4..])
}
