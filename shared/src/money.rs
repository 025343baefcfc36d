//! Money handling
//!
//! All prices and totals are stored and computed as integer cents
//! (`i64`). Decimal strings only appear at the API boundary, where
//! [`cents_from_str`] parses operator input ("9.50") and
//! [`format_cents`] renders totals for display.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use std::str::FromStr;

#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum MoneyError {
    #[error("Invalid amount: {0}")]
    Invalid(String),

    #[error("Amount has more than 2 fraction digits: {0}")]
    TooPrecise(String),

    #[error("Amount must not be negative: {0}")]
    Negative(String),
}

/// Parse a decimal string ("9.50", "12") into integer cents.
pub fn cents_from_str(input: &str) -> Result<i64, MoneyError> {
    let trimmed = input.trim();
    let amount =
        Decimal::from_str(trimmed).map_err(|_| MoneyError::Invalid(trimmed.to_string()))?;
    if amount.is_sign_negative() {
        return Err(MoneyError::Negative(trimmed.to_string()));
    }
    // normalize() drops trailing zeros so "9.50" counts as 2 digits, not more
    if amount.normalize().scale() > 2 {
        return Err(MoneyError::TooPrecise(trimmed.to_string()));
    }
    (amount * Decimal::ONE_HUNDRED)
        .normalize()
        .to_i64()
        .ok_or_else(|| MoneyError::Invalid(trimmed.to_string()))
}

/// Render integer cents as a 2-fraction-digit decimal string.
pub fn format_cents(cents: i64) -> String {
    let sign = if cents < 0 { "-" } else { "" };
    let abs = cents.abs();
    format!("{}{}.{:02}", sign, abs / 100, abs % 100)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_common_inputs() {
        assert_eq!(cents_from_str("9.50"), Ok(950));
        assert_eq!(cents_from_str("12"), Ok(1200));
        assert_eq!(cents_from_str(" 0.05 "), Ok(5));
        assert_eq!(cents_from_str("3.10"), Ok(310));
    }

    #[test]
    fn rejects_bad_inputs() {
        assert!(matches!(cents_from_str("9.505"), Err(MoneyError::TooPrecise(_))));
        assert!(matches!(cents_from_str("-1.00"), Err(MoneyError::Negative(_))));
        assert!(matches!(cents_from_str("abc"), Err(MoneyError::Invalid(_))));
    }

    #[test]
    fn formats_cents() {
        assert_eq!(format_cents(950), "9.50");
        assert_eq!(format_cents(5), "0.05");
        assert_eq!(format_cents(0), "0.00");
        assert_eq!(format_cents(-1900), "-19.00");
    }
}
