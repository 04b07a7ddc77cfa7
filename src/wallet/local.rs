// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Wallet backed by a local private key, for the command-line front-end.

use std::sync::Arc;

use alloy::{
    network::EthereumWallet,
    primitives::Address,
    signers::{local::PrivateKeySigner, Signer},
};
use async_trait::async_trait;
use tokio::sync::watch;

use super::controller::{BrokerError, ConnectionSnapshot, SessionBroker};
use super::session::{ProviderError, WalletProvider};
use crate::blockchain::{ClientError, ContractGateway, NetworkConfig, PresaleClient};

/// A private key signing over an HTTP RPC endpoint.
pub struct LocalWallet {
    signer: PrivateKeySigner,
    client: PresaleClient,
}

impl LocalWallet {
    pub fn new(
        signer: PrivateKeySigner,
        network: NetworkConfig,
        rpc_url: &str,
    ) -> Result<Self, ClientError> {
        let signer = signer.with_chain_id(Some(network.chain_id));
        let wallet = EthereumWallet::from(signer.clone());
        let client = PresaleClient::with_wallet(network, rpc_url, wallet)?;
        Ok(Self { signer, client })
    }

    pub fn address(&self) -> Address {
        self.signer.address()
    }
}

#[async_trait]
impl WalletProvider for LocalWallet {
    async fn chain_id(&self) -> Result<u64, ProviderError> {
        Ok(self.client.chain_id().await?)
    }

    fn gateway(&self) -> Arc<dyn ContractGateway> {
        Arc::new(self.client.clone())
    }

    async fn sign_message(&self, message: &str) -> Result<String, ProviderError> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| ProviderError::Signing(e.to_string()))?;
        Ok(alloy::hex::encode_prefixed(signature.as_bytes()))
    }
}

/// Session broker for a single local account.
///
/// `open` pairs immediately with the configured account; there is no
/// wallet-selection dialog to wait on.
pub struct LocalSessionBroker {
    account: String,
    chain_id: u64,
    signer: PrivateKeySigner,
    tx: watch::Sender<ConnectionSnapshot>,
}

impl LocalSessionBroker {
    pub fn new(signer: PrivateKeySigner, chain_id: u64) -> Self {
        let (tx, _rx) = watch::channel(ConnectionSnapshot::default());
        Self {
            account: signer.address().to_checksum(None),
            chain_id,
            signer,
            tx,
        }
    }
}

#[async_trait]
impl SessionBroker for LocalSessionBroker {
    async fn open(&self) -> Result<(), BrokerError> {
        self.tx.send_replace(ConnectionSnapshot {
            connected: true,
            account: Some(self.account.clone()),
            chain_id: Some(self.chain_id),
        });
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.tx.send_replace(ConnectionSnapshot::default());
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> Result<String, BrokerError> {
        let signature = self
            .signer
            .sign_message(message.as_bytes())
            .await
            .map_err(|e| BrokerError::Rejected(e.to_string()))?;
        Ok(alloy::hex::encode_prefixed(signature.as_bytes()))
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectionSnapshot> {
        self.tx.subscribe()
    }
}
