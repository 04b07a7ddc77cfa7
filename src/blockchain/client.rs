// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! BNB Smart Chain client for the presale contract.

use alloy::{
    network::EthereumWallet,
    primitives::{Address, U256},
    providers::{DynProvider, Provider, ProviderBuilder},
};
use async_trait::async_trait;

use super::contract::{ContractGateway, GatewayError, IPresale};
use super::types::{GasSettings, NetworkConfig, PurchaseReceipt, PRESALE_CONTRACT};

/// Errors raised while building a client.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    #[error("Invalid RPC URL: {0}")]
    InvalidRpcUrl(String),
}

/// Presale contract client over an HTTP provider.
///
/// Built read-only for status queries, or with a wallet so `purchase` can
/// sign and submit.
#[derive(Clone)]
pub struct PresaleClient {
    network: NetworkConfig,
    contract: IPresale::IPresaleInstance<DynProvider>,
}

impl PresaleClient {
    /// Create a read-only client.
    pub fn read_only(network: NetworkConfig, rpc_url: &str) -> Result<Self, ClientError> {
        let url = parse_rpc_url(rpc_url)?;
        let provider = ProviderBuilder::new().connect_http(url).erased();
        Ok(Self::from_provider(network, provider, PRESALE_CONTRACT))
    }

    /// Create a client that signs with `wallet`.
    pub fn with_wallet(
        network: NetworkConfig,
        rpc_url: &str,
        wallet: EthereumWallet,
    ) -> Result<Self, ClientError> {
        let url = parse_rpc_url(rpc_url)?;
        let provider = ProviderBuilder::new()
            .wallet(wallet)
            .connect_http(url)
            .erased();
        Ok(Self::from_provider(network, provider, PRESALE_CONTRACT))
    }

    /// Bind an existing provider to a contract address.
    pub fn from_provider(network: NetworkConfig, provider: DynProvider, address: Address) -> Self {
        Self {
            network,
            contract: IPresale::new(address, provider),
        }
    }

    /// Chain id reported by the connected node.
    pub async fn chain_id(&self) -> Result<u64, GatewayError> {
        Ok(self.contract.provider().get_chain_id().await?)
    }

    /// Get the network configuration.
    pub fn network(&self) -> &NetworkConfig {
        &self.network
    }

    /// Address of the bound contract.
    pub fn address(&self) -> Address {
        *self.contract.address()
    }
}

#[async_trait]
impl ContractGateway for PresaleClient {
    async fn sale_ended(&self) -> Result<bool, GatewayError> {
        Ok(self.contract.saleEnded().call().await?)
    }

    async fn sale_paused(&self) -> Result<bool, GatewayError> {
        Ok(self.contract.salePaused().call().await?)
    }

    async fn total_raised(&self) -> Result<U256, GatewayError> {
        Ok(self.contract.totalRaised().call().await?)
    }

    async fn hard_cap(&self) -> Result<U256, GatewayError> {
        Ok(self.contract.hardCap().call().await?)
    }

    async fn token_price(&self) -> Result<U256, GatewayError> {
        Ok(self.contract.tokenPrice().call().await?)
    }

    async fn tokens_per_unit(&self) -> Result<U256, GatewayError> {
        Ok(self.contract.tokensPerUnit().call().await?)
    }

    async fn remaining_tokens(&self) -> Result<U256, GatewayError> {
        Ok(self.contract.getRemainingTokens().call().await?)
    }

    async fn purchase(
        &self,
        amount: U256,
        gas: GasSettings,
    ) -> Result<PurchaseReceipt, GatewayError> {
        tracing::debug!(
            contract = %self.address(),
            value = %amount,
            gas_limit = gas.gas_limit,
            gas_price = gas.gas_price_wei,
            "Sending buyTokens transaction"
        );

        let pending = self
            .contract
            .buyTokens()
            .value(amount)
            .gas(gas.gas_limit)
            .gas_price(gas.gas_price_wei)
            .send()
            .await?;

        let tx_hash = format!("{:?}", pending.tx_hash());
        tracing::info!(tx_hash = %tx_hash, "buyTokens submitted, waiting for receipt");

        let receipt = pending.get_receipt().await?;
        if !receipt.status() {
            return Err(GatewayError::Reverted(tx_hash));
        }

        Ok(PurchaseReceipt {
            tx_hash,
            block_number: receipt.block_number.unwrap_or(0),
            gas_used: receipt.gas_used as u64,
        })
    }
}

fn parse_rpc_url(rpc_url: &str) -> Result<url::Url, ClientError> {
    rpc_url
        .parse()
        .map_err(|e: url::ParseError| ClientError::InvalidRpcUrl(e.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::blockchain::BSC_MAINNET;

    #[test]
    fn read_only_binds_presale_contract() {
        let client = PresaleClient::read_only(BSC_MAINNET, BSC_MAINNET.rpc_url).unwrap();
        assert_eq!(client.address(), PRESALE_CONTRACT);
        assert_eq!(client.network().chain_id, 56);
    }

    #[test]
    fn rejects_invalid_rpc_url() {
        let result = PresaleClient::read_only(BSC_MAINNET, "not a url");
        assert!(matches!(result, Err(ClientError::InvalidRpcUrl(_))));
    }
}
