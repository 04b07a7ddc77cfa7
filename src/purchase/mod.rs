// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Token purchase: amount entry, the buy flow and its failure taxonomy.

pub mod amount;
pub mod error;
pub mod workflow;

pub use amount::{parse_purchase_amount, AmountInput, MIN_PURCHASE_WEI};
pub use error::{classify, PurchaseError, PurchaseErrorKind};
pub use workflow::{PurchaseOutcome, PurchaseWorkflow};
