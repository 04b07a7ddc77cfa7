// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Purchase failure taxonomy and classification of contract errors.

use serde::Serialize;

use crate::blockchain::GatewayError;

/// Guidance shown for transport failures.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. In Trust Wallet, go to Settings > Networks > \
Binance Smart Chain and set RPC URL to https://bsc-dataseed1.binance.org/ or \
https://bsc-dataseed2.ninicoin.io/. If issue persists, try a VPN or switch networks.";

/// Shown when the contract returns data the workflow cannot use.
pub const INVALID_DATA_MESSAGE: &str =
    "Internal error: Invalid data format from contract. Contact support.";

/// Lead-in for failures reported after submission.
const FAILURE_PREFIX: &str = "Transaction failed";

/// JSON-RPC code for a request the user declined in their wallet.
const USER_REJECTED_CODE: i64 = 4001;

/// Kind of purchase failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum PurchaseErrorKind {
    NotConnected,
    InvalidAmount,
    BelowMinimum,
    SaleEnded,
    SalePaused,
    HardCapReached,
    BelowTokenPrice,
    InsufficientSupply,
    UserRejected,
    NetworkError,
    InsufficientFunds,
    GasError,
    ContractExecutionFailure,
    Unknown,
    Busy,
}

/// A purchase failure: its kind plus the one message shown to the user.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{message}")]
pub struct PurchaseError {
    pub kind: PurchaseErrorKind,
    pub message: String,
}

impl PurchaseError {
    pub fn new(kind: PurchaseErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    /// Failure with the standard message for `kind`.
    ///
    /// `BelowTokenPrice` and `Unknown` carry a computed message and should be
    /// built with [`PurchaseError::new`].
    pub fn of(kind: PurchaseErrorKind) -> Self {
        let message = match kind {
            PurchaseErrorKind::NotConnected => "Please connect your wallet first!",
            PurchaseErrorKind::InvalidAmount => "Please enter a valid BNB amount",
            PurchaseErrorKind::BelowMinimum => "Minimum purchase amount is 0.01 BNB",
            PurchaseErrorKind::SaleEnded => "Presale has ended.",
            PurchaseErrorKind::SalePaused => "Presale is paused.",
            PurchaseErrorKind::HardCapReached => "Presale hardcap reached.",
            PurchaseErrorKind::BelowTokenPrice => "Amount is below the token price.",
            PurchaseErrorKind::InsufficientSupply => "Not enough tokens available in presale.",
            PurchaseErrorKind::UserRejected => "Transaction rejected by user",
            PurchaseErrorKind::NetworkError => NETWORK_ERROR_MESSAGE,
            PurchaseErrorKind::InsufficientFunds => "Insufficient BNB: Add more BNB to your wallet.",
            PurchaseErrorKind::GasError => {
                "Gas error. Transaction may require higher gas limit or price."
            }
            PurchaseErrorKind::ContractExecutionFailure => {
                "Presale contract failed to process token transfer. Contact support."
            }
            PurchaseErrorKind::Unknown => "Transaction failed",
            PurchaseErrorKind::Busy => "A purchase is already in progress",
        };
        Self::new(kind, message)
    }

    /// Message for a failed submission, led by "Transaction failed" exactly once.
    pub fn failure_message(&self) -> String {
        if self.message.starts_with(FAILURE_PREFIX) {
            self.message.clone()
        } else {
            format!("{FAILURE_PREFIX}: {}", self.message)
        }
    }
}

/// Map a contract or wallet failure onto the purchase taxonomy.
///
/// Rules are checked in order and the first match wins.
pub fn classify(err: &GatewayError) -> PurchaseError {
    let raw = err.raw_message();
    let lower = raw.to_lowercase();

    let kind = if matches!(err, GatewayError::Network(_))
        || raw.contains("Failed to fetch")
        || raw.contains("UNKNOWN_ERROR")
        || raw.contains("NETWORK_ERROR")
    {
        PurchaseErrorKind::NetworkError
    } else if err.code() == Some(USER_REJECTED_CODE)
        || lower.contains("user denied")
        || lower.contains("user rejected")
    {
        PurchaseErrorKind::UserRejected
    } else if lower.contains("insufficient funds") {
        PurchaseErrorKind::InsufficientFunds
    } else if lower.contains("gas") || lower.contains("underpriced") {
        PurchaseErrorKind::GasError
    } else if matches!(err, GatewayError::Reverted(_))
        || raw.contains("balanceOf failed")
        || raw.contains("Token transfer failed")
    {
        PurchaseErrorKind::ContractExecutionFailure
    } else {
        return PurchaseError::new(PurchaseErrorKind::Unknown, format!("{FAILURE_PREFIX}: {raw}"));
    };

    PurchaseError::of(kind)
}

impl From<GatewayError> for PurchaseError {
    fn from(err: GatewayError) -> Self {
        classify(&err)
    }
}
