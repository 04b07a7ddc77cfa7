// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Selection of the active wallet and network verification.

use std::sync::Arc;

use super::probe::{detect_wallet_kind, EnvironmentProbe};
use super::session::{ProviderError, WalletKind, WalletProvider, WalletSession};

/// Why no session could be resolved.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ResolveError {
    #[error("{}", no_wallet_message(.mobile))]
    NoWalletAvailable { mobile: bool },

    #[error("Please switch to Binance Smart Chain (expected chain {expected}, got {actual})")]
    WrongNetwork { expected: u64, actual: u64 },

    #[error("Provider setup error: {0}")]
    Provider(#[from] ProviderError),
}

fn no_wallet_message(mobile: &bool) -> &'static str {
    if *mobile {
        "Please open in Trust Wallet or MetaMask in-app browser"
    } else {
        "Please install MetaMask, Trust Wallet, or use WalletConnect"
    }
}

/// Picks one wallet handle from the environment and checks its network.
#[derive(Debug, Clone, Copy)]
pub struct ProviderResolver {
    required_chain_id: u64,
}

impl ProviderResolver {
    pub fn new(required_chain_id: u64) -> Self {
        Self { required_chain_id }
    }

    pub fn required_chain_id(&self) -> u64 {
        self.required_chain_id
    }

    /// Select the active handle, in order of precedence:
    ///
    /// 1. injected MetaMask
    /// 2. injected Trust Wallet
    /// 3. Trust Wallet's own namespace
    /// 4. the remote session
    pub fn select(&self, probe: &dyn EnvironmentProbe) -> Option<(Arc<dyn WalletProvider>, WalletKind)> {
        let injected = probe.injected();

        if let Some(wallet) = injected.iter().find(|w| w.is_metamask) {
            return Some((wallet.handle.clone(), WalletKind::MetaMask));
        }
        if let Some(wallet) = injected.iter().find(|w| w.is_trust) {
            return Some((wallet.handle.clone(), WalletKind::TrustWallet));
        }
        if let Some(handle) = probe.trust_namespace() {
            return Some((handle, WalletKind::TrustWallet));
        }
        probe
            .remote_session()
            .map(|handle| (handle, WalletKind::WalletConnect))
    }

    /// Resolve a session for `account`.
    ///
    /// The only side effect is the chain id query against the selected handle.
    pub async fn resolve(
        &self,
        probe: &dyn EnvironmentProbe,
        account: &str,
    ) -> Result<WalletSession, ResolveError> {
        let Some((provider, kind)) = self.select(probe) else {
            let mobile = probe.is_mobile();
            tracing::warn!(mobile, "No wallet provider available");
            return Err(ResolveError::NoWalletAvailable { mobile });
        };
        tracing::debug!(wallet = %kind, "Selected wallet provider");

        let chain_id = provider.chain_id().await?;
        if chain_id != self.required_chain_id {
            tracing::warn!(
                expected = self.required_chain_id,
                actual = chain_id,
                "Wallet is on the wrong network"
            );
            return Err(ResolveError::WrongNetwork {
                expected: self.required_chain_id,
                actual: chain_id,
            });
        }

        tracing::info!(account = %account, wallet = %kind, chain_id, "Wallet session resolved");
        Ok(WalletSession {
            provider,
            account: account.to_string(),
            network_id: chain_id,
            kind,
            label: detect_wallet_kind(probe),
        })
    }
}
