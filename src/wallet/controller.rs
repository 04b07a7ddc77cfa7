// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! # Connection Lifecycle
//!
//! [`ConnectionController`] owns the current [`WalletSession`] and drives it
//! through connect, disconnect and sign:
//!
//! ```text
//! Disconnected --connect--> Connecting --resolved--> Connected
//!      ^                        |                      |   ^
//!      +------failure-----------+                    sign  |
//!      +---------------disconnect--------------------+  v  |
//!                                                    Signing
//! ```
//!
//! The remote-session library is abstracted as a [`SessionBroker`]. It
//! publishes connection snapshots on a `watch` channel; every change re-runs
//! the resolver so the session always matches the current account and
//! network. The controller republishes its own session on a second `watch`
//! channel, so readers keep working while [`ConnectionController::run`]
//! owns the controller.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use super::probe::EnvironmentProbe;
use super::resolver::{ProviderResolver, ResolveError};
use super::session::WalletSession;

/// Identity proof message signed on request.
pub const VERIFY_MESSAGE: &str = "Verify Solium Presale";

/// Connection status as reported by the session broker.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConnectionSnapshot {
    pub connected: bool,
    pub account: Option<String>,
    pub chain_id: Option<u64>,
}

/// Errors raised by the session broker.
#[derive(Debug, Clone, thiserror::Error)]
pub enum BrokerError {
    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Session broker unavailable: {0}")]
    Unavailable(String),
}

/// Connect, disconnect and sign surface of the remote-session library.
#[async_trait]
pub trait SessionBroker: Send + Sync {
    /// Open the wallet-selection flow and pair with a wallet.
    async fn open(&self) -> Result<(), BrokerError>;

    async fn disconnect(&self) -> Result<(), BrokerError>;

    /// Sign through the broker's own session, without a provider handle.
    async fn sign_message(&self, message: &str) -> Result<String, BrokerError>;

    /// Current connection status.
    fn snapshot(&self) -> ConnectionSnapshot;

    /// Change feed of connection status, account and network.
    fn subscribe(&self) -> watch::Receiver<ConnectionSnapshot>;
}

#[async_trait]
impl<T: SessionBroker + ?Sized> SessionBroker for Arc<T> {
    async fn open(&self) -> Result<(), BrokerError> {
        (**self).open().await
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        (**self).disconnect().await
    }

    async fn sign_message(&self, message: &str) -> Result<String, BrokerError> {
        (**self).sign_message(message).await
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        (**self).snapshot()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectionSnapshot> {
        (**self).subscribe()
    }
}

/// Lifecycle state of the controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConnectionState {
    Disconnected,
    Connecting,
    Connected,
    Signing,
}

/// Errors surfaced by `connect` and re-resolution.
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConnectError {
    #[error("{message}")]
    Broker {
        message: &'static str,
        #[source]
        source: BrokerError,
    },

    #[error(transparent)]
    Resolve(#[from] ResolveError),

    #[error("Wallet did not report a connected account")]
    NoAccount,
}

/// Errors surfaced by `sign`.
#[derive(Debug, Clone, thiserror::Error)]
pub enum SignError {
    #[error("Wallet is not connected")]
    NotConnected,

    #[error("{message}")]
    Failed { message: &'static str, detail: String },
}

/// Owns the wallet session and its lifecycle.
pub struct ConnectionController<B> {
    broker: B,
    probe: Arc<dyn EnvironmentProbe>,
    resolver: ProviderResolver,
    state: ConnectionState,
    session: Option<WalletSession>,
    sessions: watch::Sender<Option<WalletSession>>,
}

impl<B: SessionBroker> ConnectionController<B> {
    pub fn new(broker: B, probe: Arc<dyn EnvironmentProbe>, resolver: ProviderResolver) -> Self {
        Self {
            broker,
            probe,
            resolver,
            state: ConnectionState::Disconnected,
            session: None,
            sessions: watch::channel(None).0,
        }
    }

    pub fn state(&self) -> ConnectionState {
        self.state
    }

    /// The resolved session, if connected.
    pub fn session(&self) -> Option<&WalletSession> {
        self.session.as_ref()
    }

    /// Feed of the current session, updated on every transition.
    pub fn sessions(&self) -> watch::Receiver<Option<WalletSession>> {
        self.sessions.subscribe()
    }

    pub fn broker(&self) -> &B {
        &self.broker
    }

    /// Open the wallet-selection flow and resolve a session.
    pub async fn connect(&mut self) -> Result<&WalletSession, ConnectError> {
        self.state = ConnectionState::Connecting;
        tracing::info!("Initiating wallet connection");

        if let Err(source) = self.broker.open().await {
            tracing::error!(error = %source, "Connection error");
            self.clear();
            let message = if self.probe.is_mobile() {
                "Please confirm the connection in your wallet app"
            } else {
                "Wallet connection failed!"
            };
            return Err(ConnectError::Broker { message, source });
        }

        let snapshot = self.broker.snapshot();
        self.refresh(&snapshot).await?;
        self.session.as_ref().ok_or(ConnectError::NoAccount)
    }

    /// Re-run resolution for a broker snapshot.
    ///
    /// A disconnected snapshot, or one without an account, clears the
    /// session. On resolver failure the session is cleared and the error is
    /// returned for display.
    pub async fn refresh(&mut self, snapshot: &ConnectionSnapshot) -> Result<(), ConnectError> {
        let account = match (snapshot.connected, snapshot.account.as_deref()) {
            (true, Some(account)) => account.to_string(),
            _ => {
                tracing::debug!(?snapshot, "Not connected or no address");
                self.clear();
                return Ok(());
            }
        };

        self.state = ConnectionState::Connecting;
        match self.resolver.resolve(self.probe.as_ref(), &account).await {
            Ok(session) => {
                self.set_session(Some(session));
                self.state = ConnectionState::Connected;
                Ok(())
            }
            Err(e) => {
                tracing::error!(error = %e, "Provider setup error");
                self.clear();
                Err(e.into())
            }
        }
    }

    /// Disconnect the broker and drop the session.
    pub async fn disconnect(&mut self) -> Result<(), BrokerError> {
        let result = self.broker.disconnect().await;
        match &result {
            Ok(()) => tracing::info!("Wallet disconnected"),
            Err(e) => tracing::error!(error = %e, "Disconnection error"),
        }
        self.clear();
        result
    }

    /// Sign `message` as an identity proof.
    ///
    /// The session's provider signs when one is resolved; otherwise the
    /// broker's own session is used. Both paths report through [`SignError`].
    pub async fn sign(&mut self, message: &str) -> Result<String, SignError> {
        if !self.broker.snapshot().connected && self.session.is_none() {
            return Err(SignError::NotConnected);
        }

        let previous = self.state;
        self.state = ConnectionState::Signing;

        let result = match &self.session {
            Some(session) => session
                .provider
                .sign_message(message)
                .await
                .map_err(|e| e.to_string()),
            None => self
                .broker
                .sign_message(message)
                .await
                .map_err(|e| e.to_string()),
        };

        self.state = previous;
        match result {
            Ok(signature) => {
                tracing::info!(signature = %signature, "Sign success");
                Ok(signature)
            }
            Err(detail) => {
                tracing::error!(error = %detail, "Sign error");
                let message = if self.probe.is_mobile() {
                    "Approve the signature in your wallet"
                } else {
                    "Sign failed!"
                };
                Err(SignError::Failed { message, detail })
            }
        }
    }

    /// Re-resolve on every broker change until `shutdown` fires, then hand
    /// the controller back.
    ///
    /// Takes ownership so it can be spawned; read the session through
    /// [`ConnectionController::sessions`] meanwhile. Resolution failures are
    /// logged and leave the controller disconnected; the loop keeps running.
    pub async fn run(mut self, shutdown: CancellationToken) -> Self {
        let mut changes = self.broker.subscribe();
        loop {
            tokio::select! {
                changed = changes.changed() => {
                    if changed.is_err() {
                        tracing::debug!("Session broker closed its change feed");
                        return self;
                    }
                    let snapshot = changes.borrow_and_update().clone();
                    if let Err(e) = self.refresh(&snapshot).await {
                        tracing::warn!(error = %e, "Re-resolution failed");
                    }
                }
                _ = shutdown.cancelled() => return self,
            }
        }
    }

    fn set_session(&mut self, session: Option<WalletSession>) {
        self.session = session.clone();
        self.sessions.send_replace(session);
    }

    fn clear(&mut self) {
        self.set_session(None);
        self.state = ConnectionState::Disconnected;
    }
}
