// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain types and constants.

use alloy::primitives::{address, Address, U256};
use serde::Serialize;

/// EVM network configuration.
#[derive(Debug, Clone)]
pub struct NetworkConfig {
    /// Network name for display
    pub name: &'static str,
    /// Chain ID
    pub chain_id: u64,
    /// Native currency symbol
    pub native_symbol: &'static str,
    /// Default RPC endpoint URL
    pub rpc_url: &'static str,
    /// Block explorer URL
    pub explorer_url: &'static str,
}

impl NetworkConfig {
    /// Explorer link for a transaction hash.
    pub fn tx_url(&self, tx_hash: &str) -> String {
        format!("{}/tx/{}", self.explorer_url, tx_hash)
    }
}

/// BNB Smart Chain Mainnet configuration.
pub const BSC_MAINNET: NetworkConfig = NetworkConfig {
    name: "BNB Smart Chain",
    chain_id: 56,
    native_symbol: "BNB",
    rpc_url: "https://bsc-dataseed1.binance.org/",
    explorer_url: "https://bscscan.com",
};

/// Alternate public RPC suggested to users whose wallet RPC is failing.
pub const BSC_FALLBACK_RPC_URL: &str = "https://bsc-dataseed2.ninicoin.io/";

/// Deployed presale contract.
pub const PRESALE_CONTRACT: Address = address!("42395Db998595DC7256aF2a6f10DC7b2E6006993");

/// Token sold by the presale contract.
pub const TOKEN_SYMBOL: &str = "SLM";

/// Rate shown to users. The live rate is `tokens_per_unit / token_price`.
pub const DISPLAY_RATE: &str = "1 BNB = 10,000 SLM";

/// Decimals of the native currency.
pub const NATIVE_DECIMALS: u8 = 18;

/// Default gas limit for `buyTokens`.
pub const DEFAULT_GAS_LIMIT: u64 = 750_000;

/// Default gas price in gwei.
pub const DEFAULT_GAS_PRICE_GWEI: u64 = 15;

const WEI_PER_GWEI: u128 = 1_000_000_000;

/// Gas parameters attached to a purchase transaction.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GasSettings {
    /// Gas limit in units
    pub gas_limit: u64,
    /// Legacy gas price in wei
    pub gas_price_wei: u128,
}

impl GasSettings {
    pub fn new(gas_limit: u64, gas_price_gwei: u64) -> Self {
        Self {
            gas_limit,
            gas_price_wei: u128::from(gas_price_gwei) * WEI_PER_GWEI,
        }
    }
}

impl Default for GasSettings {
    fn default() -> Self {
        Self::new(DEFAULT_GAS_LIMIT, DEFAULT_GAS_PRICE_GWEI)
    }
}

/// Snapshot of the presale contract's state.
///
/// Read fresh before every purchase; the contract is the only source of truth.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SaleState {
    pub ended: bool,
    pub paused: bool,
    /// Total native currency raised, in wei
    pub total_raised: U256,
    /// Maximum native currency the sale accepts, in wei
    pub hard_cap: U256,
    /// Price of one purchase unit, in wei
    pub token_price: U256,
    /// Tokens delivered per purchase unit
    pub tokens_per_unit: U256,
    /// Tokens still available in the sale
    pub remaining_tokens: U256,
}

impl SaleState {
    /// Tokens delivered for `amount` wei: `floor(amount / token_price) * tokens_per_unit`.
    ///
    /// Returns `None` when the price is zero or the product overflows.
    pub fn tokens_for(&self, amount: U256) -> Option<U256> {
        tokens_for(amount, self.token_price, self.tokens_per_unit)
    }

    /// Wei still accepted before the hard cap is hit.
    pub fn cap_headroom(&self) -> U256 {
        self.hard_cap.saturating_sub(self.total_raised)
    }
}

/// `floor(amount / token_price) * tokens_per_unit`, or `None` on a zero
/// price or overflow.
pub fn tokens_for(amount: U256, token_price: U256, tokens_per_unit: U256) -> Option<U256> {
    amount
        .checked_div(token_price)?
        .checked_mul(tokens_per_unit)
}

/// Confirmation of a mined purchase transaction.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PurchaseReceipt {
    /// Transaction hash (0x-prefixed)
    pub tx_hash: String,
    /// Block number where transaction was included
    pub block_number: u64,
    /// Gas actually used
    pub gas_used: u64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_gas_settings() {
        let gas = GasSettings::default();
        assert_eq!(gas.gas_limit, 750_000);
        assert_eq!(gas.gas_price_wei, 15_000_000_000);
    }

    #[test]
    fn tokens_for_truncates_partial_units() {
        let state = SaleState {
            ended: false,
            paused: false,
            total_raised: U256::ZERO,
            hard_cap: U256::from(1000u64),
            token_price: U256::from(3u64),
            tokens_per_unit: U256::from(10u64),
            remaining_tokens: U256::from(1000u64),
        };
        assert_eq!(state.tokens_for(U256::from(10u64)), Some(U256::from(30u64)));
        assert_eq!(state.tokens_for(U256::from(2u64)), Some(U256::ZERO));
        assert_eq!(state.cap_headroom(), U256::from(1000u64));
    }

    #[test]
    fn tokens_for_zero_price_is_none() {
        let state = SaleState {
            ended: false,
            paused: false,
            total_raised: U256::ZERO,
            hard_cap: U256::ZERO,
            token_price: U256::ZERO,
            tokens_per_unit: U256::from(1u64),
            remaining_tokens: U256::ZERO,
        };
        assert_eq!(state.tokens_for(U256::from(1u64)), None);
    }

    #[test]
    fn tokens_for_overflow_is_none() {
        assert_eq!(tokens_for(U256::MAX, U256::from(1u64), U256::from(2u64)), None);
        assert_eq!(
            tokens_for(U256::from(25u64), U256::from(10u64), U256::from(7u64)),
            Some(U256::from(14u64))
        );
    }

    #[test]
    fn explorer_link() {
        assert_eq!(
            BSC_MAINNET.tx_url("0xabc"),
            "https://bscscan.com/tx/0xabc"
        );
    }
}
