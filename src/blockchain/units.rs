// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Conversion between human-readable amounts and integer minor units.

use alloy::primitives::U256;

/// Errors produced while parsing a decimal amount.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AmountError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount format: {0}")]
    InvalidFormat(String),

    #[error("Too many decimal places (max {0})")]
    TooManyDecimals(u8),

    #[error("Amount overflow")]
    Overflow,
}

/// Parse a human-readable amount to minor units.
///
/// Accepts plain non-negative decimals such as `"1"`, `"0.5"`, `".5"` or `"2."`.
/// Signs, exponents, separators and whitespace are rejected.
///
/// # Arguments
/// * `amount` - Amount as a string (e.g., "1.5")
/// * `decimals` - Number of decimals (18 for BNB)
pub fn parse_amount(amount: &str, decimals: u8) -> Result<U256, AmountError> {
    if amount.is_empty() {
        return Err(AmountError::Empty);
    }

    let (whole, fraction) = match amount.split_once('.') {
        Some((whole, fraction)) => (whole, fraction),
        None => (amount, ""),
    };

    if whole.is_empty() && fraction.is_empty() {
        return Err(AmountError::InvalidFormat(amount.to_string()));
    }
    if !whole.bytes().all(|b| b.is_ascii_digit()) || !fraction.bytes().all(|b| b.is_ascii_digit())
    {
        return Err(AmountError::InvalidFormat(amount.to_string()));
    }
    if fraction.len() > decimals as usize {
        return Err(AmountError::TooManyDecimals(decimals));
    }

    let whole = if whole.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(whole, 10).map_err(|_| AmountError::Overflow)?
    };

    // Pad with zeros to match decimals
    let padded = format!("{:0<width$}", fraction, width = decimals as usize);
    let fraction = if padded.is_empty() {
        U256::ZERO
    } else {
        U256::from_str_radix(&padded, 10).map_err(|_| AmountError::Overflow)?
    };

    let multiplier = U256::from(10u64).pow(U256::from(decimals));
    whole
        .checked_mul(multiplier)
        .and_then(|w| w.checked_add(fraction))
        .ok_or(AmountError::Overflow)
}

/// Format minor units to a human-readable amount, trimming trailing zeros.
pub fn format_amount(amount: U256, decimals: u8) -> String {
    if amount.is_zero() {
        return "0".to_string();
    }

    let divisor = U256::from(10u64).pow(U256::from(decimals));
    let whole = amount / divisor;
    let remainder = amount % divisor;

    if remainder.is_zero() {
        whole.to_string()
    } else {
        let decimal_str = format!("{:0>width$}", remainder, width = decimals as usize);
        let trimmed = decimal_str.trim_end_matches('0');
        format!("{}.{}", whole, trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const ONE_BNB: u128 = 1_000_000_000_000_000_000;

    #[test]
    fn test_parse_amount_whole() {
        assert_eq!(parse_amount("1", 18).unwrap(), U256::from(ONE_BNB));
    }

    #[test]
    fn test_parse_amount_decimal() {
        assert_eq!(parse_amount("1.5", 18).unwrap(), U256::from(ONE_BNB * 3 / 2));
    }

    #[test]
    fn test_parse_amount_leading_and_trailing_dot() {
        assert_eq!(parse_amount(".5", 18).unwrap(), U256::from(ONE_BNB / 2));
        assert_eq!(parse_amount("2.", 18).unwrap(), U256::from(ONE_BNB * 2));
    }

    #[test]
    fn test_parse_amount_small() {
        assert_eq!(
            parse_amount("0.01", 18).unwrap(),
            U256::from(10_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_parse_amount_rejects_garbage() {
        assert_eq!(parse_amount("", 18), Err(AmountError::Empty));
        assert!(matches!(parse_amount(".", 18), Err(AmountError::InvalidFormat(_))));
        assert!(matches!(parse_amount("abc", 18), Err(AmountError::InvalidFormat(_))));
        assert!(matches!(parse_amount("-1", 18), Err(AmountError::InvalidFormat(_))));
        assert!(matches!(parse_amount("1.2.3", 18), Err(AmountError::InvalidFormat(_))));
        assert!(matches!(parse_amount("1e5", 18), Err(AmountError::InvalidFormat(_))));
        assert!(matches!(parse_amount(" 1", 18), Err(AmountError::InvalidFormat(_))));
    }

    #[test]
    fn test_parse_amount_too_many_decimals() {
        assert_eq!(
            parse_amount("0.0000000000000000001", 18),
            Err(AmountError::TooManyDecimals(18))
        );
    }

    #[test]
    fn test_parse_amount_overflow() {
        let huge = "9".repeat(80);
        assert_eq!(parse_amount(&huge, 18), Err(AmountError::Overflow));
    }

    #[test]
    fn test_format_amount() {
        assert_eq!(format_amount(U256::from(ONE_BNB), 18), "1");
        assert_eq!(format_amount(U256::from(ONE_BNB * 3 / 2), 18), "1.5");
        assert_eq!(format_amount(U256::from(10_000_000_000_000_000u64), 18), "0.01");
        assert_eq!(format_amount(U256::ZERO, 18), "0");
    }
}
