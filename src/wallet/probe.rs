// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet discovery in the host environment.

use std::sync::{Arc, LazyLock};

use regex::Regex;

use super::session::{WalletKind, WalletProvider};

static MOBILE_AGENT: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(?i)Mobi|Android|iPhone|iPad|iPod").expect("valid regex"));

/// A wallet injected into the host, with the flags it advertises.
#[derive(Clone)]
pub struct InjectedWallet {
    pub handle: Arc<dyn WalletProvider>,
    /// Advertises itself as the MetaMask extension.
    pub is_metamask: bool,
    /// Advertises itself as Trust Wallet.
    pub is_trust: bool,
}

impl InjectedWallet {
    pub fn metamask(handle: Arc<dyn WalletProvider>) -> Self {
        Self {
            handle,
            is_metamask: true,
            is_trust: false,
        }
    }

    pub fn trust(handle: Arc<dyn WalletProvider>) -> Self {
        Self {
            handle,
            is_metamask: false,
            is_trust: true,
        }
    }

    /// An injected wallet with no recognised flag.
    pub fn generic(handle: Arc<dyn WalletProvider>) -> Self {
        Self {
            handle,
            is_metamask: false,
            is_trust: false,
        }
    }
}

/// Read-only view of the wallets the host makes available.
pub trait EnvironmentProbe: Send + Sync {
    /// Injected wallet handles, in host order.
    fn injected(&self) -> Vec<InjectedWallet>;

    /// Trust Wallet's handle under its own `trustwallet` namespace.
    fn trust_namespace(&self) -> Option<Arc<dyn WalletProvider>>;

    /// Handle of the remote-session (WalletConnect) provider, once paired.
    fn remote_session(&self) -> Option<Arc<dyn WalletProvider>>;

    fn user_agent(&self) -> &str;

    fn is_mobile(&self) -> bool {
        is_mobile_agent(self.user_agent())
    }
}

/// Whether a user agent string belongs to a phone or tablet.
pub fn is_mobile_agent(user_agent: &str) -> bool {
    MOBILE_AGENT.is_match(user_agent)
}

/// Label the wallet family present in the environment.
pub fn detect_wallet_kind(probe: &dyn EnvironmentProbe) -> WalletKind {
    let injected = probe.injected();
    if probe.trust_namespace().is_some() || injected.iter().any(|w| w.is_trust) {
        WalletKind::TrustWallet
    } else if injected.iter().any(|w| w.is_metamask) {
        WalletKind::MetaMask
    } else if !injected.is_empty() || probe.remote_session().is_some() {
        WalletKind::WalletConnect
    } else {
        WalletKind::Unknown
    }
}

/// Fixed environment assembled by the caller.
#[derive(Clone, Default)]
pub struct StaticProbe {
    injected: Vec<InjectedWallet>,
    trust_namespace: Option<Arc<dyn WalletProvider>>,
    remote_session: Option<Arc<dyn WalletProvider>>,
    user_agent: String,
}

impl StaticProbe {
    pub fn new(user_agent: impl Into<String>) -> Self {
        Self {
            user_agent: user_agent.into(),
            ..Default::default()
        }
    }

    pub fn with_injected(mut self, wallet: InjectedWallet) -> Self {
        self.injected.push(wallet);
        self
    }

    pub fn with_trust_namespace(mut self, handle: Arc<dyn WalletProvider>) -> Self {
        self.trust_namespace = Some(handle);
        self
    }

    pub fn with_remote_session(mut self, handle: Arc<dyn WalletProvider>) -> Self {
        self.remote_session = Some(handle);
        self
    }
}

impl EnvironmentProbe for StaticProbe {
    fn injected(&self) -> Vec<InjectedWallet> {
        self.injected.clone()
    }

    fn trust_namespace(&self) -> Option<Arc<dyn WalletProvider>> {
        self.trust_namespace.clone()
    }

    fn remote_session(&self) -> Option<Arc<dyn WalletProvider>> {
        self.remote_session.clone()
    }

    fn user_agent(&self) -> &str {
        &self.user_agent
    }
}
