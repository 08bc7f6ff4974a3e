//! Fixed-point account balances.
//!
//! A [`Balance`] is a non-negative [`Decimal`] amount with at most two
//! fraction digits. It parses from human-entered text and always displays
//! in canonical form: no grouping separators and exactly two fraction digits.
//!
//! # Grammar
//!
//! ```text
//! balance  := "-"? integer ("." digit+)?
//! integer  := digit+ | digit{1,3} ("," digit{3})+
//! ```
//!
//! Checks run in this order: grammar, sign, precision.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::BalanceError;

/// Maximum digits allowed after the decimal point.
pub const MAX_FRACTION_DIGITS: u32 = 2;

/// A non-negative monetary amount.
#[derive(Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Balance(Decimal);

impl Balance {
    /// A zero balance.
    pub const ZERO: Self = Self(Decimal::ZERO);

    /// Create a balance from a number of cents.
    #[must_use]
    pub fn from_cents(cents: u64) -> Self {
        Self(Decimal::from_i128_with_scale(i128::from(cents), MAX_FRACTION_DIGITS))
    }

    /// The amount as a decimal.
    #[must_use]
    pub const fn amount(self) -> Decimal {
        self.0
    }
}

/// Validate a raw balance and return its canonical two-decimal form.
///
/// ```
/// use accounts_core::validate_balance;
///
/// assert_eq!(validate_balance("123,000").unwrap(), "123000.00");
/// assert_eq!(validate_balance("100.0").unwrap(), "100.00");
/// ```
///
/// # Errors
///
/// Returns the first [`BalanceError`] encountered.
pub fn validate_balance(raw: &str) -> Result<String, BalanceError> {
    raw.parse::<Balance>().map(|b| b.to_string())
}

impl FromStr for Balance {
    type Err = BalanceError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let (negative, body) = match raw.strip_prefix('-') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };

        let (integer, fraction) = match body.split_once('.') {
            Some((integer, fraction)) => (integer, Some(fraction)),
            None => (body, None),
        };

        if !is_integer_part(integer) {
            return Err(BalanceError::NotANumber);
        }
        if let Some(fraction) = fraction {
            if fraction.is_empty() || !fraction.bytes().all(|b| b.is_ascii_digit()) {
                return Err(BalanceError::NotANumber);
            }
        }

        if negative {
            return Err(BalanceError::NegativeBalance);
        }

        let digits: String = body.chars().filter(|&c| c != ',').collect();
        let amount = Decimal::from_str(&digits).map_err(|_| BalanceError::OutOfRange)?;

        // Decimal rounds away fraction digits it cannot hold.
        let written_scale = fraction.map_or(0, str::len);
        if u32::try_from(written_scale).map_or(true, |scale| scale != amount.scale()) {
            return Err(BalanceError::OutOfRange);
        }
        if amount.scale() > MAX_FRACTION_DIGITS {
            return Err(BalanceError::TooManyDecimals);
        }

        Ok(Self(amount))
    }
}

/// Plain digits, or 1-3 leading digits followed by comma-separated triples.
fn is_integer_part(s: &str) -> bool {
    let all_digits = |g: &str| !g.is_empty() && g.bytes().all(|b| b.is_ascii_digit());

    if !s.contains(',') {
        return all_digits(s);
    }

    let mut groups = s.split(',');
    let head_ok = groups
        .next()
        .is_some_and(|head| head.len() <= 3 && all_digits(head));
    head_ok && groups.all(|g| g.len() == 3 && all_digits(g))
}

impl fmt::Display for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.2}", self.0)
    }
}

impl fmt::Debug for Balance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Balance({self})")
    }
}

impl TryFrom<String> for Balance {
    type Error = BalanceError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<Balance> for String {
    fn from(balance: Balance) -> Self {
        balance.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn strips_grouping_separators() {
        assert_eq!(validate_balance("123,000").unwrap(), "123000.00");
        assert_eq!(validate_balance("1,234,567.8").unwrap(), "1234567.80");
    }

    #[test]
    fn pads_fraction_to_two_digits() {
        assert_eq!(validate_balance("100").unwrap(), "100.00");
        assert_eq!(validate_balance("100.0").unwrap(), "100.00");
        assert_eq!(validate_balance("100.5").unwrap(), "100.50");
        assert_eq!(validate_balance("0.05").unwrap(), "0.05");
    }

    #[test]
    fn rejects_negative_amounts() {
        assert_eq!(validate_balance("-1"), Err(BalanceError::NegativeBalance));
        assert_eq!(validate_balance("-0"), Err(BalanceError::NegativeBalance));
        // Sign wins over precision.
        assert_eq!(validate_balance("-1.000"), Err(BalanceError::NegativeBalance));
    }

    #[test]
    fn rejects_excess_precision() {
        assert_eq!(validate_balance("1.000"), Err(BalanceError::TooManyDecimals));
        assert_eq!(validate_balance("512.1234"), Err(BalanceError::TooManyDecimals));
    }

    #[test]
    fn rejects_malformed_input() {
        for raw in [
            "abc", "", "-", ".5", "1.", "1,00", "1234,000", ",100", "100,", "1.2.3", " 100",
            "1e5", "--1", "1,000.0,0",
        ] {
            assert_eq!(
                validate_balance(raw),
                Err(BalanceError::NotANumber),
                "{raw:?} should be rejected"
            );
        }
    }

    #[test]
    fn rejects_overflow() {
        let too_large = "9".repeat(40);
        assert_eq!(validate_balance(&too_large), Err(BalanceError::OutOfRange));
    }

    #[test]
    fn large_amounts_keep_their_cents() {
        assert_eq!(
            validate_balance("999,999,999,999,999,999,999.99").unwrap(),
            "999999999999999999999.99"
        );
    }

    #[test]
    fn precision_check_ignores_value() {
        // Trailing zeros still count as written digits.
        assert_eq!(validate_balance("5.000"), Err(BalanceError::TooManyDecimals));
        assert_eq!(validate_balance("5.10").unwrap(), "5.10");
    }

    #[test]
    fn serde_uses_canonical_string() {
        let balance: Balance = serde_json::from_str("\"1,000.5\"").unwrap();
        assert_eq!(balance, Balance::from_cents(100_050));
        assert_eq!(balance.amount(), Decimal::from_str("1000.5").unwrap());
        assert_eq!(serde_json::to_string(&balance).unwrap(), "\"1000.50\"");
    }

    proptest! {
        #[test]
        fn canonical_form_is_a_fixed_point(units in 0u64..10_000_000_000, cents in 0u64..100) {
            let canonical = Balance::from_cents(units * 100 + cents).to_string();
            prop_assert_eq!(validate_balance(&canonical).unwrap(), canonical.clone());
        }

        #[test]
        fn validation_is_idempotent(raw in "[0-9]{1,9}(\\.[0-9]{1,2})?") {
            let once = validate_balance(&raw).unwrap();
            let twice = validate_balance(&once).unwrap();
            prop_assert_eq!(once, twice);
        }
    }
}
