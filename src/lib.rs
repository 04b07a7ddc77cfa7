// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Solium Presale - SLM token sale client for BNB Smart Chain
//!
//! This crate resolves a wallet session on BNB Smart Chain, reads the presale
//! contract, and submits `buyTokens` purchases with client-side pre-checks.
//! It also serves the HTTPS time API used by the front-end.
//!
//! ## Modules
//!
//! - `wallet` - Wallet discovery, resolution and connection lifecycle
//! - `purchase` - Amount entry, the buy flow and failure classification
//! - `blockchain` - Presale contract gateway (alloy)
//! - `api` - HTTP API handlers (Axum)
//! - `db` - Postgres clock for the time endpoint

pub mod api;
pub mod blockchain;
pub mod config;
pub mod db;
pub mod error;
pub mod logging;
pub mod purchase;
pub mod state;
pub mod tls;
pub mod wallet;

#[cfg(test)]
pub(crate) mod testing;
