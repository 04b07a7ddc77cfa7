// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! In-memory doubles for the contract, wallet, broker and clock seams.

use std::sync::{
    atomic::{AtomicBool, AtomicUsize, Ordering},
    Arc, Mutex,
};

use alloy::primitives::U256;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tokio::sync::watch;

use crate::blockchain::{ContractGateway, GasSettings, GatewayError, PurchaseReceipt, SaleState};
use crate::db::TimeSource;
use crate::wallet::{
    BrokerError, ConnectionSnapshot, ProviderError, SessionBroker, WalletProvider,
};

pub const TEST_TX_HASH: &str =
    "0x8f3e2b1a6c5d4e3f2a1b0c9d8e7f6a5b4c3d2e1f0a9b8c7d6e5f4a3b2c1d0e9f";

/// Sale state that accepts a 1 BNB purchase.
pub fn open_sale() -> SaleState {
    SaleState {
        ended: false,
        paused: false,
        total_raised: U256::ZERO,
        hard_cap: U256::from(1000u64) * U256::from(10u64).pow(U256::from(18u64)),
        token_price: U256::from(10u64).pow(U256::from(16u64)),
        tokens_per_unit: U256::from(100u64),
        remaining_tokens: U256::from(1_000_000u64),
    }
}

/// Contract double that serves a fixed sale state and records calls.
pub struct MockGateway {
    state: Mutex<SaleState>,
    purchase_result: Mutex<Result<PurchaseReceipt, GatewayError>>,
    read_error: Mutex<Option<GatewayError>>,
    reads: AtomicUsize,
    purchases: Mutex<Vec<(U256, GasSettings)>>,
}

impl Default for MockGateway {
    fn default() -> Self {
        Self::new(open_sale())
    }
}

impl MockGateway {
    pub fn new(state: SaleState) -> Self {
        Self {
            state: Mutex::new(state),
            purchase_result: Mutex::new(Ok(PurchaseReceipt {
                tx_hash: TEST_TX_HASH.to_string(),
                block_number: 42,
                gas_used: 120_000,
            })),
            read_error: Mutex::new(None),
            reads: AtomicUsize::new(0),
            purchases: Mutex::new(Vec::new()),
        }
    }

    pub fn set_state(&self, state: SaleState) {
        *self.state.lock().unwrap() = state;
    }

    pub fn fail_purchase(&self, error: GatewayError) {
        *self.purchase_result.lock().unwrap() = Err(error);
    }

    pub fn fail_reads(&self, error: GatewayError) {
        *self.read_error.lock().unwrap() = Some(error);
    }

    /// Number of read calls served.
    pub fn reads(&self) -> usize {
        self.reads.load(Ordering::SeqCst)
    }

    pub fn purchases(&self) -> Vec<(U256, GasSettings)> {
        self.purchases.lock().unwrap().clone()
    }

    /// Total calls of any kind.
    pub fn calls(&self) -> usize {
        self.reads() + self.purchases.lock().unwrap().len()
    }

    fn read<T>(&self, field: impl FnOnce(&SaleState) -> T) -> Result<T, GatewayError> {
        self.reads.fetch_add(1, Ordering::SeqCst);
        if let Some(err) = self.read_error.lock().unwrap().clone() {
            return Err(err);
        }
        let state = self.state.lock().unwrap();
        Ok(field(&*state))
    }
}

#[async_trait]
impl ContractGateway for MockGateway {
    async fn sale_ended(&self) -> Result<bool, GatewayError> {
        self.read(|s| s.ended)
    }

    async fn sale_paused(&self) -> Result<bool, GatewayError> {
        self.read(|s| s.paused)
    }

    async fn total_raised(&self) -> Result<U256, GatewayError> {
        self.read(|s| s.total_raised)
    }

    async fn hard_cap(&self) -> Result<U256, GatewayError> {
        self.read(|s| s.hard_cap)
    }

    async fn token_price(&self) -> Result<U256, GatewayError> {
        self.read(|s| s.token_price)
    }

    async fn tokens_per_unit(&self) -> Result<U256, GatewayError> {
        self.read(|s| s.tokens_per_unit)
    }

    async fn remaining_tokens(&self) -> Result<U256, GatewayError> {
        self.read(|s| s.remaining_tokens)
    }

    async fn purchase(
        &self,
        amount: U256,
        gas: GasSettings,
    ) -> Result<PurchaseReceipt, GatewayError> {
        self.purchases.lock().unwrap().push((amount, gas));
        self.purchase_result.lock().unwrap().clone()
    }
}

/// Wallet double on a fixed chain, bound to a [`MockGateway`].
pub struct MockWallet {
    chain_id: u64,
    gateway: Arc<MockGateway>,
    chain_id_calls: AtomicUsize,
    fail_chain_id: AtomicBool,
    fail_sign: AtomicBool,
}

impl MockWallet {
    pub fn new(chain_id: u64, gateway: Arc<MockGateway>) -> Self {
        Self {
            chain_id,
            gateway,
            chain_id_calls: AtomicUsize::new(0),
            fail_chain_id: AtomicBool::new(false),
            fail_sign: AtomicBool::new(false),
        }
    }

    pub fn chain_id_calls(&self) -> usize {
        self.chain_id_calls.load(Ordering::SeqCst)
    }

    pub fn fail_chain_id(&self) {
        self.fail_chain_id.store(true, Ordering::SeqCst);
    }

    pub fn fail_sign(&self) {
        self.fail_sign.store(true, Ordering::SeqCst);
    }
}

#[async_trait]
impl WalletProvider for MockWallet {
    async fn chain_id(&self) -> Result<u64, ProviderError> {
        self.chain_id_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail_chain_id.load(Ordering::SeqCst) {
            return Err(GatewayError::Network("connection refused".to_string()).into());
        }
        Ok(self.chain_id)
    }

    fn gateway(&self) -> Arc<dyn ContractGateway> {
        self.gateway.clone()
    }

    async fn sign_message(&self, message: &str) -> Result<String, ProviderError> {
        if self.fail_sign.load(Ordering::SeqCst) {
            return Err(ProviderError::Signing("User rejected the request.".to_string()));
        }
        Ok(format!("0xprovider:{message}"))
    }
}

/// Broker double whose connection feed is driven by the test.
pub struct MockBroker {
    account: String,
    chain_id: u64,
    tx: watch::Sender<ConnectionSnapshot>,
    fail_open: AtomicBool,
    broker_signs: AtomicUsize,
}

impl MockBroker {
    pub fn new(account: &str, chain_id: u64) -> Self {
        let (tx, _rx) = watch::channel(ConnectionSnapshot::default());
        Self {
            account: account.to_string(),
            chain_id,
            tx,
            fail_open: AtomicBool::new(false),
            broker_signs: AtomicUsize::new(0),
        }
    }

    pub fn fail_open(&self) {
        self.fail_open.store(true, Ordering::SeqCst);
    }

    /// Publish a snapshot as if the wallet changed account or network.
    pub fn publish(&self, snapshot: ConnectionSnapshot) {
        self.tx.send_replace(snapshot);
    }

    pub fn broker_signs(&self) -> usize {
        self.broker_signs.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl SessionBroker for MockBroker {
    async fn open(&self) -> Result<(), BrokerError> {
        if self.fail_open.load(Ordering::SeqCst) {
            return Err(BrokerError::Rejected("modal closed".to_string()));
        }
        self.publish(ConnectionSnapshot {
            connected: true,
            account: Some(self.account.clone()),
            chain_id: Some(self.chain_id),
        });
        Ok(())
    }

    async fn disconnect(&self) -> Result<(), BrokerError> {
        self.publish(ConnectionSnapshot::default());
        Ok(())
    }

    async fn sign_message(&self, message: &str) -> Result<String, BrokerError> {
        self.broker_signs.fetch_add(1, Ordering::SeqCst);
        Ok(format!("0xbroker:{message}"))
    }

    fn snapshot(&self) -> ConnectionSnapshot {
        self.tx.borrow().clone()
    }

    fn subscribe(&self) -> watch::Receiver<ConnectionSnapshot> {
        self.tx.subscribe()
    }
}

/// Clock double for the time endpoint.
pub struct MockClock {
    now: Option<DateTime<Utc>>,
}

impl MockClock {
    pub fn at(now: DateTime<Utc>) -> Self {
        Self { now: Some(now) }
    }

    pub fn failing() -> Self {
        Self { now: None }
    }
}

#[async_trait]
impl TimeSource for MockClock {
    async fn now(&self) -> Result<DateTime<Utc>, sqlx::Error> {
        self.now.ok_or(sqlx::Error::PoolTimedOut)
    }
}
