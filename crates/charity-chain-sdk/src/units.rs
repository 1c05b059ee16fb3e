/*!
# Native Currency Units

Exact conversion between the human-entered native amount (e.g. `"0.01"` ETH) and the
base units the factory contract stores as its minimum contribution (wei).

## Key Safety Features

- **No floating point**: amounts are parsed into `rust_decimal::Decimal` and scaled
  into a `U256` with integer arithmetic only
- **Precision aware**: input with more fractional digits than the currency has
  decimals is rejected instead of silently truncated
- **Overflow protection**: scaling uses checked `U256` multiplication

## Example Usage

```rust
use alloy_primitives::U256;
use charity_chain_sdk::{parse_to_base_units, NATIVE_DECIMALS};

let wei = parse_to_base_units("0.01", NATIVE_DECIMALS).unwrap();
assert_eq!(wei, U256::from(10_000_000_000_000_000u64));
```
*/

use alloy_primitives::U256;
use rust_decimal::Decimal;
use std::str::FromStr;
use thiserror::Error;

/// Decimal places of the chain's native currency (ether → wei)
pub const NATIVE_DECIMALS: u8 = 18;

/// Largest decimal expansion whose scale factor still fits into a `uint256`
///
/// 10^77 < 2^256 < 10^78
pub const MAX_SUPPORTED_DECIMALS: u8 = 77;

/// Errors that can occur while converting a native amount
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum UnitsError {
    #[error("Amount is empty")]
    Empty,

    #[error("Invalid amount: {0}")]
    Malformed(String),

    #[error("Amount {0} cannot be represented exactly")]
    Unrepresentable(String),

    #[error("Amount must not be negative: {0}")]
    Negative(String),

    #[error("Amount {amount} has more than {decimals} decimal places")]
    TooManyDecimals { amount: String, decimals: u8 },

    #[error("Max decimals exceeded: {0} (max 77 decimals supported)")]
    MaxDecimalsExceeded(u8),

    #[error("Base unit overflow: {amount} * 10^{decimals} does not fit into uint256")]
    Overflow { amount: String, decimals: u8 },
}

pub type UnitsResult<T> = Result<T, UnitsError>;

/// Parse a human-entered native amount into an exact decimal
///
/// Only plain `123.456` notation is accepted; surrounding whitespace is ignored.
/// Negative values are rejected; `"-0"` is zero. Input whose digits do not survive
/// the conversion unchanged is rejected rather than rounded.
pub fn parse_native_amount(input: &str) -> UnitsResult<Decimal> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(UnitsError::Empty);
    }

    let (negative, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (true, rest),
        None => (false, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let canonical =
        canonical_digits(digits).ok_or_else(|| UnitsError::Malformed(trimmed.to_string()))?;

    let amount = Decimal::from_str(digits)
        .map_err(|_| UnitsError::Unrepresentable(trimmed.to_string()))?;
    if amount.normalize().to_string() != canonical {
        return Err(UnitsError::Unrepresentable(trimmed.to_string()));
    }

    if negative && !amount.is_zero() {
        return Err(UnitsError::Negative(trimmed.to_string()));
    }

    Ok(amount)
}

/// `digits` with leading and trailing zeros stripped, or `None` if it is not plain decimal notation
fn canonical_digits(digits: &str) -> Option<String> {
    let all_digits = |part: &str| !part.is_empty() && part.bytes().all(|b| b.is_ascii_digit());
    let (whole, fraction) = match digits.split_once('.') {
        Some((whole, fraction)) if all_digits(whole) && all_digits(fraction) => (whole, fraction),
        None if all_digits(digits) => (digits, ""),
        _ => return None,
    };

    let whole = match whole.trim_start_matches('0') {
        "" => "0",
        trimmed => trimmed,
    };
    let fraction = fraction.trim_end_matches('0');

    Some(if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    })
}

/// Convert an exact decimal amount into base units (amount × 10^decimals)
///
/// # Arguments
/// * `amount` - Amount in human-readable units (e.g., 0.01 ETH)
/// * `decimals` - Number of decimals for the currency (e.g., 18 for ETH)
///
/// # Returns
/// * Amount in smallest units (e.g., 10000000000000000 wei)
pub fn to_base_units(amount: Decimal, decimals: u8) -> UnitsResult<U256> {
    if decimals > MAX_SUPPORTED_DECIMALS {
        return Err(UnitsError::MaxDecimalsExceeded(decimals));
    }
    if amount.is_sign_negative() && !amount.is_zero() {
        return Err(UnitsError::Negative(amount.to_string()));
    }

    // Drop trailing zeros so "1.500" is treated like "1.5"
    let amount = amount.normalize();
    let scale = amount.scale();
    if scale > u32::from(decimals) {
        return Err(UnitsError::TooManyDecimals {
            amount: amount.to_string(),
            decimals,
        });
    }

    // mantissa * 10^(decimals - scale), entirely in integer space
    let mantissa = U256::from(amount.mantissa().unsigned_abs());
    let exponent = U256::from(u32::from(decimals) - scale);
    let overflow = || UnitsError::Overflow {
        amount: amount.to_string(),
        decimals,
    };

    let scale_factor = U256::from(10u8)
        .checked_pow(exponent)
        .ok_or_else(overflow)?;

    mantissa.checked_mul(scale_factor).ok_or_else(overflow)
}

/// Parse and convert in one step
pub fn parse_to_base_units(input: &str, decimals: u8) -> UnitsResult<U256> {
    let amount = parse_native_amount(input)?;
    to_base_units(amount, decimals)
}

/// Render base units as a trimmed decimal string (e.g., 10^16 wei → "0.01")
pub fn format_base_units(value: U256, decimals: u8) -> String {
    let digits = value.to_string();
    let decimals = decimals as usize;

    if decimals == 0 {
        return digits;
    }

    let padded = if digits.len() <= decimals {
        format!("{}{}", "0".repeat(decimals - digits.len() + 1), digits)
    } else {
        digits
    };

    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::dec;

    #[test]
    fn test_one_hundredth_ether_is_exact() {
        let wei = parse_to_base_units("0.01", NATIVE_DECIMALS).unwrap();
        assert_eq!(wei, U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_one_ether_is_exact() {
        let wei = parse_to_base_units("1", NATIVE_DECIMALS).unwrap();
        assert_eq!(wei, U256::from(1_000_000_000_000_000_000u64));
    }

    #[test]
    fn test_float_drift_values() {
        // none of these are exactly representable as binary fractions
        assert_eq!(
            parse_to_base_units("0.3", NATIVE_DECIMALS).unwrap(),
            U256::from(300_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_to_base_units("1.15", NATIVE_DECIMALS).unwrap(),
            U256::from(1_150_000_000_000_000_000u64)
        );
        assert_eq!(
            parse_to_base_units("0.07", NATIVE_DECIMALS).unwrap(),
            U256::from(70_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_smallest_unit() {
        let wei = parse_to_base_units("0.000000000000000001", NATIVE_DECIMALS).unwrap();
        assert_eq!(wei, U256::from(1u8));
    }

    #[test]
    fn test_trailing_zeros_do_not_count_as_precision() {
        let wei = parse_to_base_units("0.0100000000000000000000", NATIVE_DECIMALS).unwrap();
        assert_eq!(wei, U256::from(10_000_000_000_000_000u64));
    }

    #[test]
    fn test_too_many_decimals_rejected() {
        let result = parse_to_base_units("0.0000000000000000001", NATIVE_DECIMALS);
        assert!(matches!(
            result,
            Err(UnitsError::TooManyDecimals { decimals: 18, .. })
        ));
    }

    #[test]
    fn test_large_amount_beyond_u64() {
        // 1,000,000 ETH does not fit into u64 wei
        let wei = to_base_units(dec!(1000000), NATIVE_DECIMALS).unwrap();
        assert_eq!(
            wei,
            U256::from(1_000_000u64) * U256::from(1_000_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_invalid_inputs() {
        assert_eq!(parse_native_amount(""), Err(UnitsError::Empty));
        assert_eq!(parse_native_amount("   "), Err(UnitsError::Empty));
        assert!(matches!(
            parse_native_amount("abc"),
            Err(UnitsError::Malformed(_))
        ));
        assert!(matches!(
            parse_native_amount("-1"),
            Err(UnitsError::Negative(_))
        ));
        assert_eq!(parse_native_amount("-0").unwrap(), Decimal::ZERO);
    }

    #[test]
    fn test_whitespace_and_notation() {
        assert_eq!(parse_native_amount(" 2.5 ").unwrap(), dec!(2.5));
        assert_eq!(parse_native_amount("+2.5").unwrap(), dec!(2.5));
        assert_eq!(parse_native_amount("007.50").unwrap(), dec!(7.5));

        for input in ["1e-2", "1_000", "1,000", "0x10", "1.2.3", ".", ".5", "5.", "- 1"] {
            assert_eq!(
                parse_native_amount(input),
                Err(UnitsError::Malformed(input.to_string())),
                "{input}"
            );
        }
    }

    #[test]
    fn test_digits_beyond_decimal_precision_are_rejected() {
        let long = "1234567890123456789012345.123456";
        assert_eq!(
            parse_to_base_units(long, NATIVE_DECIMALS),
            Err(UnitsError::Unrepresentable(long.to_string()))
        );

        let tiny = "0.0100000000000000000000000000001";
        assert_eq!(
            parse_native_amount(tiny),
            Err(UnitsError::Unrepresentable(tiny.to_string()))
        );

        let huge = "123456789012345678901234567890";
        assert_eq!(
            parse_native_amount(huge),
            Err(UnitsError::Unrepresentable(huge.to_string()))
        );

        // 25 integer digits plus 3 fractional digits still fit
        assert_eq!(
            parse_to_base_units("1234567890123456789012345.125", NATIVE_DECIMALS).unwrap(),
            U256::from(1_234_567_890_123_456_789_012_345_125u128)
                * U256::from(1_000_000_000_000_000u64)
        );
    }

    #[test]
    fn test_zero_decimal_currency() {
        assert_eq!(to_base_units(dec!(42), 0).unwrap(), U256::from(42u8));
        assert!(matches!(
            to_base_units(dec!(4.2), 0),
            Err(UnitsError::TooManyDecimals { .. })
        ));
    }

    #[test]
    fn test_excessive_decimal_precision() {
        assert_eq!(
            to_base_units(dec!(1), 78),
            Err(UnitsError::MaxDecimalsExceeded(78))
        );
        assert!(to_base_units(dec!(1), MAX_SUPPORTED_DECIMALS).is_ok());
    }

    #[test]
    fn test_overflow_detected() {
        let result = to_base_units(Decimal::MAX, MAX_SUPPORTED_DECIMALS);
        assert!(matches!(result, Err(UnitsError::Overflow { .. })));
    }

    #[test]
    fn test_format_base_units() {
        assert_eq!(
            format_base_units(U256::from(10_000_000_000_000_000u64), NATIVE_DECIMALS),
            "0.01"
        );
        assert_eq!(
            format_base_units(U256::from(1_000_000_000_000_000_000u64), NATIVE_DECIMALS),
            "1"
        );
        assert_eq!(format_base_units(U256::ZERO, NATIVE_DECIMALS), "0");
        assert_eq!(
            format_base_units(U256::from(1_500_000_000_000_000_001u64), NATIVE_DECIMALS),
            "1.500000000000000001"
        );
        assert_eq!(format_base_units(U256::from(42u8), 0), "42");
    }
}
