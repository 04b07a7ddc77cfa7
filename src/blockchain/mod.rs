// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Blockchain integration module for BNB Smart Chain.
//!
//! This module provides functionality for:
//! - Reading presale contract state
//! - Submitting `buyTokens` purchases
//! - Amount conversion and local key loading

pub mod client;
pub mod contract;
pub mod signing;
pub mod types;
pub mod units;

pub use client::{ClientError, PresaleClient};
pub use contract::{ContractGateway, GatewayError, IPresale};
pub use signing::{signer_from_hex, signer_from_pem_file, KeyError};
pub use types::*;
pub use units::{format_amount, parse_amount, AmountError};
