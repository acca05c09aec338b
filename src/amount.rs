//! Wrap amount validation.
//!
//! Turns caller input (text or a float) into an exact smallest-unit
//! quantity. Pure: no I/O, no logging.

use alloy::primitives::utils::{format_ether, parse_units, ParseUnits};
use alloy::primitives::U256;
use std::fmt;
use thiserror::Error;

/// Decimal places of the native token (wei-style scaling).
pub const NATIVE_DECIMALS: u8 = 18;

/// Reasons an amount is rejected before any network activity.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AmountError {
    #[error("amount is missing")]
    MissingAmount,

    #[error("amount '{0}' is not a number")]
    NotANumber(String),

    #[error("amount '{0}' must be greater than zero")]
    NonPositiveAmount(String),

    #[error("amount '{0}' has more than 18 decimal places")]
    ExcessPrecision(String),
}

/// A positive amount of native token, exact to the smallest unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidatedAmount {
    smallest_units: U256,
}

impl ValidatedAmount {
    /// Amount in smallest units (amount × 10^18).
    pub fn smallest_units(&self) -> U256 {
        self.smallest_units
    }
}

impl fmt::Display for ValidatedAmount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = format_ether(self.smallest_units);
        f.write_str(text.trim_end_matches('0').trim_end_matches('.'))
    }
}

impl TryFrom<f64> for ValidatedAmount {
    type Error = AmountError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        // f64's Display never uses exponent notation, so this is plain decimal text.
        validate(Some(&value.to_string()))
    }
}

/// Validate a requested wrap amount.
///
/// Accepts plain decimals (`"50"`, `"0.25"`, `".5"`) and anything else Rust
/// parses as a finite `f64` (`"1e3"`).
pub fn validate(input: Option<&str>) -> Result<ValidatedAmount, AmountError> {
    let raw = input.map(str::trim).unwrap_or_default();
    if raw.is_empty() {
        return Err(AmountError::MissingAmount);
    }

    let (text, parsed) = match parse_units(raw, NATIVE_DECIMALS) {
        Ok(parsed) => (raw.to_string(), parsed),
        Err(_) => {
            let float: f64 = raw
                .parse()
                .map_err(|_| AmountError::NotANumber(raw.to_string()))?;
            if !float.is_finite() {
                return Err(AmountError::NotANumber(raw.to_string()));
            }
            let text = float.to_string();
            let parsed = parse_units(&text, NATIVE_DECIMALS)
                .map_err(|_| AmountError::NotANumber(raw.to_string()))?;
            (text, parsed)
        }
    };

    // Signed results only come from a leading '-'.
    let smallest_units = match parsed {
        ParseUnits::U256(value) => value,
        ParseUnits::I256(_) => return Err(AmountError::NonPositiveAmount(raw.to_string())),
    };
    // parse_units truncates digits past the unit; refuse to drop value silently.
    if has_excess_precision(&text) {
        return Err(AmountError::ExcessPrecision(raw.to_string()));
    }
    if smallest_units.is_zero() {
        return Err(AmountError::NonPositiveAmount(raw.to_string()));
    }

    Ok(ValidatedAmount { smallest_units })
}

fn has_excess_precision(text: &str) -> bool {
    text.split_once('.')
        .and_then(|(_, frac)| frac.get(usize::from(NATIVE_DECIMALS)..))
        .is_some_and(|dropped| dropped.bytes().any(|b| b != b'0'))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn units(whole: u64) -> U256 {
        U256::from(whole) * U256::from(10u64).pow(U256::from(NATIVE_DECIMALS))
    }

    #[test]
    fn test_whole_amount() {
        let amount = validate(Some("50")).unwrap();
        assert_eq!(amount.smallest_units(), units(50));
        assert_eq!(amount.to_string(), "50");
    }

    #[test]
    fn test_fractional_amounts() {
        assert_eq!(
            validate(Some("0.25")).unwrap().smallest_units(),
            U256::from(250_000_000_000_000_000u64)
        );
        assert_eq!(
            validate(Some(".5")).unwrap().smallest_units(),
            U256::from(500_000_000_000_000_000u64)
        );
        assert_eq!(validate(Some("1.")).unwrap().smallest_units(), units(1));
        assert_eq!(validate(Some(" 2.50 ")).unwrap().to_string(), "2.5");
    }

    #[test]
    fn test_smallest_unit() {
        let amount = validate(Some("0.000000000000000001")).unwrap();
        assert_eq!(amount.smallest_units(), U256::from(1u64));
        assert_eq!(amount.to_string(), "0.000000000000000001");
    }

    #[test]
    fn test_exponent_notation() {
        assert_eq!(validate(Some("1e3")).unwrap().smallest_units(), units(1000));
        assert_eq!(validate(Some("2.5e-1")).unwrap().to_string(), "0.25");
        assert!(matches!(validate(Some("1e-19")), Err(AmountError::ExcessPrecision(_))));
    }

    #[test]
    fn test_missing() {
        assert_eq!(validate(None), Err(AmountError::MissingAmount));
        assert_eq!(validate(Some("   ")), Err(AmountError::MissingAmount));
    }

    #[test]
    fn test_not_a_number() {
        assert!(matches!(validate(Some("abc")), Err(AmountError::NotANumber(_))));
        assert!(matches!(validate(Some("1.2.3")), Err(AmountError::NotANumber(_))));
        assert!(matches!(validate(Some("NaN")), Err(AmountError::NotANumber(_))));
        assert!(matches!(validate(Some("inf")), Err(AmountError::NotANumber(_))));
        assert!(matches!(validate(Some("--1")), Err(AmountError::NotANumber(_))));
    }

    #[test]
    fn test_non_positive() {
        assert!(matches!(validate(Some("-1")), Err(AmountError::NonPositiveAmount(_))));
        assert!(matches!(validate(Some("0")), Err(AmountError::NonPositiveAmount(_))));
        assert!(matches!(validate(Some("-0.0")), Err(AmountError::NonPositiveAmount(_))));
        assert!(matches!(validate(Some("-1e3")), Err(AmountError::NonPositiveAmount(_))));
        // Sign wins over precision.
        assert!(matches!(
            validate(Some("-0.0000000000000000001")),
            Err(AmountError::NonPositiveAmount(_))
        ));
    }

    #[test]
    fn test_excess_precision() {
        assert!(matches!(
            validate(Some("0.0000000000000000001")),
            Err(AmountError::ExcessPrecision(_))
        ));
        // Trailing zeros beyond 18 places carry no value.
        assert_eq!(
            validate(Some("1.0000000000000000000000")).unwrap().smallest_units(),
            units(1)
        );
    }

    #[test]
    fn test_numeric_input() {
        let amount = ValidatedAmount::try_from(50.0).unwrap();
        assert_eq!(amount.smallest_units(), units(50));
        assert_eq!(ValidatedAmount::try_from(0.1).unwrap().to_string(), "0.1");
        assert!(matches!(
            ValidatedAmount::try_from(f64::NAN),
            Err(AmountError::NotANumber(_))
        ));
        assert!(matches!(
            ValidatedAmount::try_from(-3.0),
            Err(AmountError::NonPositiveAmount(_))
        ));
    }
}
