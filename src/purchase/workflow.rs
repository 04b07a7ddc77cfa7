// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! The buy-tokens flow: validate, pre-check against live sale state, submit.

use std::sync::atomic::{AtomicBool, Ordering};

use alloy::primitives::U256;
use serde::Serialize;

use super::amount::{parse_purchase_amount, AmountInput};
use super::error::{classify, PurchaseError, PurchaseErrorKind, INVALID_DATA_MESSAGE};
use crate::blockchain::{
    format_amount, tokens_for, GasSettings, NetworkConfig, PurchaseReceipt, NATIVE_DECIMALS,
};
use crate::wallet::{WalletKind, WalletSession};

/// A confirmed purchase.
#[derive(Debug, Clone, Serialize)]
pub struct PurchaseOutcome {
    pub receipt: PurchaseReceipt,
    /// Amount paid, in wei
    pub amount: U256,
    /// Tokens the contract will deliver
    pub total_tokens: U256,
    pub explorer_url: String,
    pub wallet: WalletKind,
}

impl PurchaseOutcome {
    /// Success copy for the wallet that paid.
    pub fn message(&self) -> &'static str {
        self.wallet.success_message()
    }
}

/// Holds the busy flag for the duration of one purchase.
struct BusyGuard<'a>(&'a AtomicBool);

impl<'a> BusyGuard<'a> {
    fn acquire(flag: &'a AtomicBool) -> Option<Self> {
        flag.compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .ok()
            .map(|_| Self(flag))
    }
}

impl Drop for BusyGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Runs token purchases against the presale contract.
///
/// Pre-checks mirror the contract's own rules so the user gets a readable
/// message early; they never replace the contract's enforcement.
pub struct PurchaseWorkflow {
    network: NetworkConfig,
    gas: GasSettings,
    busy: AtomicBool,
}

impl PurchaseWorkflow {
    pub fn new(network: NetworkConfig, gas: GasSettings) -> Self {
        Self {
            network,
            gas,
            busy: AtomicBool::new(false),
        }
    }

    pub fn gas(&self) -> GasSettings {
        self.gas
    }

    /// Whether a purchase is in flight.
    pub fn is_busy(&self) -> bool {
        self.busy.load(Ordering::Acquire)
    }

    /// Buy tokens for `amount` BNB with the session's wallet.
    ///
    /// Exactly one transaction is submitted on the success path; nothing is
    /// retried.
    pub async fn purchase(
        &self,
        session: Option<&WalletSession>,
        amount: &str,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let Some(session) = session else {
            tracing::warn!("Submit blocked: missing provider or account");
            return Err(PurchaseError::of(PurchaseErrorKind::NotConnected));
        };
        let value = parse_purchase_amount(amount)?;

        let Some(_guard) = BusyGuard::acquire(&self.busy) else {
            tracing::warn!(account = %session.account, "Purchase already in progress");
            return Err(PurchaseError::of(PurchaseErrorKind::Busy));
        };

        tracing::info!(
            account = %session.account,
            wallet = %session.label,
            amount = %format_amount(value, NATIVE_DECIMALS),
            "Submitting buyTokens"
        );

        let result = self.execute(session, value).await;
        if let Err(e) = &result {
            tracing::error!(kind = ?e.kind, error = %e.message, "Transaction failed");
        }
        result
    }

    /// Purchase the amount currently entered, clearing the field on success.
    pub async fn submit(
        &self,
        session: Option<&WalletSession>,
        input: &mut AmountInput,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let outcome = self.purchase(session, input.value()).await?;
        input.clear();
        Ok(outcome)
    }

    async fn execute(
        &self,
        session: &WalletSession,
        value: U256,
    ) -> Result<PurchaseOutcome, PurchaseError> {
        let gateway = session.provider.gateway();
        if gateway.sale_ended().await.map_err(|e| classify(&e))? {
            return Err(PurchaseError::of(PurchaseErrorKind::SaleEnded));
        }
        if gateway.sale_paused().await.map_err(|e| classify(&e))? {
            return Err(PurchaseError::of(PurchaseErrorKind::SalePaused));
        }

        let total_raised = gateway.total_raised().await.map_err(|e| classify(&e))?;
        let hard_cap = gateway.hard_cap().await.map_err(|e| classify(&e))?;
        match total_raised.checked_add(value) {
            Some(raised) if raised <= hard_cap => {}
            _ => return Err(PurchaseError::of(PurchaseErrorKind::HardCapReached)),
        }

        let token_price = gateway.token_price().await.map_err(|e| classify(&e))?;
        if value < token_price {
            return Err(PurchaseError::new(
                PurchaseErrorKind::BelowTokenPrice,
                format!(
                    "Minimum {} BNB required.",
                    format_amount(token_price, NATIVE_DECIMALS)
                ),
            ));
        }

        let tokens_per_unit = gateway.tokens_per_unit().await.map_err(|e| classify(&e))?;
        let Some(total_tokens) = tokens_for(value, token_price, tokens_per_unit) else {
            tracing::error!(%token_price, %tokens_per_unit, "Unusable pricing from contract");
            return Err(PurchaseError::new(
                PurchaseErrorKind::Unknown,
                INVALID_DATA_MESSAGE,
            ));
        };

        let remaining = gateway.remaining_tokens().await.map_err(|e| classify(&e))?;
        if remaining < total_tokens {
            return Err(PurchaseError::of(PurchaseErrorKind::InsufficientSupply));
        }

        let receipt = gateway
            .purchase(value, self.gas)
            .await
            .map_err(|e| classify(&e))?;
        tracing::info!(
            tx_hash = %receipt.tx_hash,
            block = receipt.block_number,
            %total_tokens,
            "Transaction successful"
        );

        Ok(PurchaseOutcome {
            explorer_url: self.network.tx_url(&receipt.tx_hash),
            receipt,
            amount: value,
            total_tokens,
            wallet: session.label,
        })
    }
}
