// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Wallet Module
//!
//! Discovers the wallets available to the front-end, resolves one of them
//! into a [`WalletSession`] on BNB Smart Chain, and manages the
//! connect/disconnect/sign lifecycle.
//!
//! - `probe` - what the host environment offers
//! - `resolver` - which handle wins, and is it on the right chain
//! - `controller` - session ownership and re-resolution on change
//! - `local` - private-key wallet and broker for the CLI

pub mod controller;
pub mod local;
pub mod probe;
pub mod resolver;
pub mod session;

pub use controller::{
    BrokerError, ConnectError, ConnectionController, ConnectionSnapshot, ConnectionState,
    SessionBroker, SignError, VERIFY_MESSAGE,
};
pub use local::{LocalSessionBroker, LocalWallet};
pub use probe::{detect_wallet_kind, is_mobile_agent, EnvironmentProbe, InjectedWallet, StaticProbe};
pub use resolver::{ProviderResolver, ResolveError};
pub use session::{short_address, ProviderError, WalletKind, WalletProvider, WalletSession};
