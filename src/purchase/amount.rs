// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Purchase amount entry and validation.

use std::sync::LazyLock;

use alloy::primitives::U256;
use regex::Regex;

use super::error::{PurchaseError, PurchaseErrorKind};
use crate::blockchain::{parse_amount, NATIVE_DECIMALS};

/// Smallest purchase accepted client-side: 0.01 BNB.
pub const MIN_PURCHASE_WEI: U256 = U256::from_limbs([10_000_000_000_000_000, 0, 0, 0]);

static AMOUNT_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^\d*\.?\d*$").expect("Invalid regex"));

/// The amount field as the user types into it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmountInput {
    value: String,
}

impl AmountInput {
    pub fn new() -> Self {
        Self::default()
    }

    /// Apply an edit. Anything other than a partial decimal is ignored.
    ///
    /// Returns whether the stored value changed.
    pub fn on_change(&mut self, value: &str) -> bool {
        if !value.is_empty() && !AMOUNT_PATTERN.is_match(value) {
            return false;
        }
        self.value = value.to_string();
        true
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn clear(&mut self) {
        self.value.clear();
    }
}

/// Convert an entered amount to wei, enforcing the purchase minimum.
pub fn parse_purchase_amount(amount: &str) -> Result<U256, PurchaseError> {
    let value = parse_amount(amount.trim(), NATIVE_DECIMALS).map_err(|e| {
        tracing::debug!(amount, error = %e, "Rejected purchase amount");
        PurchaseError::of(PurchaseErrorKind::InvalidAmount)
    })?;
    if value < MIN_PURCHASE_WEI {
        return Err(PurchaseError::of(PurchaseErrorKind::BelowMinimum));
    }
    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimum_is_one_hundredth() {
        assert_eq!(MIN_PURCHASE_WEI, U256::from(10u64).pow(U256::from(16u64)));
    }

    #[test]
    fn rejected_edits_leave_value_unchanged() {
        let mut input = AmountInput::new();
        assert!(input.on_change("1.5"));
        assert_eq!(input.value(), "1.5");

        for edit in ["abc", "1.5.", "-1", "1e5", "1,5", " 2"] {
            assert!(!input.on_change(edit), "{edit} should be rejected");
            assert_eq!(input.value(), "1.5");
        }

        assert!(input.on_change("."));
        assert!(input.on_change(""));
        assert_eq!(input.value(), "");
    }

    #[test]
    fn parses_and_enforces_minimum() {
        assert_eq!(parse_purchase_amount("0.01").unwrap(), MIN_PURCHASE_WEI);
        assert_eq!(
            parse_purchase_amount("2").unwrap(),
            U256::from(2_000_000_000_000_000_000u128)
        );

        let err = parse_purchase_amount("0.005").unwrap_err();
        assert_eq!(err.kind, PurchaseErrorKind::BelowMinimum);
        assert_eq!(err.message, "Minimum purchase amount is 0.01 BNB");

        for bad in ["", "abc", "-1", ".", "0.0000000000000000001"] {
            assert_eq!(
                parse_purchase_amount(bad).unwrap_err().kind,
                PurchaseErrorKind::InvalidAmount,
                "{bad:?}"
            );
        }
    }
}
