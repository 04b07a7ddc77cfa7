// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Presale contract interface.

use alloy::{
    primitives::U256,
    providers::PendingTransactionError,
    sol,
    transports::{RpcError, TransportError},
};
use async_trait::async_trait;

use super::types::{GasSettings, PurchaseReceipt, SaleState};

// Define the presale interface using alloy's sol! macro
sol! {
    #[sol(rpc)]
    interface IPresale {
        function buyTokens() external payable;
        function saleEnded() external view returns (bool);
        function salePaused() external view returns (bool);
        function totalRaised() external view returns (uint256);
        function hardCap() external view returns (uint256);
        function getRemainingTokens() external view returns (uint256);
        function tokenPrice() external view returns (uint256);
        function tokensPerUnit() external view returns (uint256);
    }
}

/// Errors raised by contract calls.
///
/// Variants keep the JSON-RPC code and the raw message so the purchase
/// workflow can classify them.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GatewayError {
    /// The RPC endpoint could not be reached or the connection dropped.
    #[error("Network error: {0}")]
    Network(String),

    /// The node or wallet answered with a JSON-RPC error object.
    #[error("RPC error {code}: {message}")]
    Rpc { code: i64, message: String },

    /// The transaction was mined but the contract reverted it.
    #[error("Transaction {0} reverted")]
    Reverted(String),

    #[error("Contract error: {0}")]
    Contract(String),
}

impl GatewayError {
    /// JSON-RPC error code, when the failure carried one.
    pub fn code(&self) -> Option<i64> {
        match self {
            GatewayError::Rpc { code, .. } => Some(*code),
            _ => None,
        }
    }

    /// Raw underlying message without the variant prefix.
    pub fn raw_message(&self) -> &str {
        match self {
            GatewayError::Network(message) | GatewayError::Contract(message) => message,
            GatewayError::Rpc { message, .. } => message,
            GatewayError::Reverted(hash) => hash,
        }
    }
}

impl From<TransportError> for GatewayError {
    fn from(err: TransportError) -> Self {
        match err {
            RpcError::ErrorResp(payload) => GatewayError::Rpc {
                code: payload.code,
                message: payload.message.to_string(),
            },
            RpcError::Transport(kind) => GatewayError::Network(kind.to_string()),
            other => GatewayError::Contract(other.to_string()),
        }
    }
}

impl From<alloy::contract::Error> for GatewayError {
    fn from(err: alloy::contract::Error) -> Self {
        match err {
            alloy::contract::Error::TransportError(e) => e.into(),
            other => GatewayError::Contract(other.to_string()),
        }
    }
}

impl From<PendingTransactionError> for GatewayError {
    fn from(err: PendingTransactionError) -> Self {
        match err {
            PendingTransactionError::TransportError(e) => e.into(),
            other => GatewayError::Network(other.to_string()),
        }
    }
}

/// Typed access to the presale contract.
///
/// Every read is a fresh RPC round trip; implementations must not cache.
#[async_trait]
pub trait ContractGateway: Send + Sync {
    async fn sale_ended(&self) -> Result<bool, GatewayError>;

    async fn sale_paused(&self) -> Result<bool, GatewayError>;

    async fn total_raised(&self) -> Result<U256, GatewayError>;

    async fn hard_cap(&self) -> Result<U256, GatewayError>;

    async fn token_price(&self) -> Result<U256, GatewayError>;

    async fn tokens_per_unit(&self) -> Result<U256, GatewayError>;

    async fn remaining_tokens(&self) -> Result<U256, GatewayError>;

    /// Submit `buyTokens` with `amount` wei attached and wait for the receipt.
    async fn purchase(
        &self,
        amount: U256,
        gas: GasSettings,
    ) -> Result<PurchaseReceipt, GatewayError>;

    /// Read every sale field, in contract order.
    async fn sale_state(&self) -> Result<SaleState, GatewayError> {
        Ok(SaleState {
            ended: self.sale_ended().await?,
            paused: self.sale_paused().await?,
            total_raised: self.total_raised().await?,
            hard_cap: self.hard_cap().await?,
            token_price: self.token_price().await?,
            tokens_per_unit: self.tokens_per_unit().await?,
            remaining_tokens: self.remaining_tokens().await?,
        })
    }
}
