// SPDX-FileCopyrightText: 2026 TriliTech <contact@trili.tech>
//
// SPDX-License-Identifier: MIT

//! Conversions between the human-facing and on-chain representations.
//!
//! Prices cross the boundary as decimal ether strings, dates as Unix
//! seconds. Both conversions are exact: formatting a parsed amount yields
//! the canonical input back.

use chrono::{DateTime, Utc};
use ethers::types::U256;
use ethers::utils::parse_units;

use crate::error::ChainError;

/// Parses a decimal ether string into wei.
pub fn parse_eth(amount: &str) -> Result<U256, ChainError> {
    if amount.trim_start().starts_with('-') {
        return Err(ChainError::NegativeAmount(amount.to_string()));
    }
    let parsed = parse_units(amount, "ether").map_err(|source| ChainError::InvalidAmount {
        value: amount.to_string(),
        source,
    })?;
    Ok(parsed.into())
}

/// Renders a wei amount as a decimal ether string with trailing zeros
/// trimmed. Whole amounts keep one fractional digit, e.g. `"1.0"`.
pub fn format_eth(wei: U256) -> String {
    let one_eth = U256::exp10(18);
    let whole = wei / one_eth;
    let frac = wei % one_eth;
    if frac.is_zero() {
        return format!("{whole}.0");
    }
    let padded = format!("{:0>18}", frac.to_string());
    let trimmed = padded.trim_end_matches('0');
    format!("{whole}.{trimmed}")
}

/// Unix seconds for an event date, as the contract expects them.
pub fn to_unix_seconds(date: DateTime<Utc>) -> U256 {
    U256::from(date.timestamp().max(0) as u64)
}

/// Decodes the contract's Unix seconds back into a timestamp.
pub fn from_unix_seconds(seconds: U256) -> Result<DateTime<Utc>, ChainError> {
    let seconds =
        u64::try_from(seconds).map_err(|_| ChainError::InvalidTimestamp(seconds.to_string()))?;
    let seconds =
        i64::try_from(seconds).map_err(|_| ChainError::InvalidTimestamp(seconds.to_string()))?;
    DateTime::from_timestamp(seconds, 0)
        .ok_or_else(|| ChainError::InvalidTimestamp(seconds.to_string()))
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;
    use proptest::prelude::*;

    use super::*;

    #[test]
    fn parses_common_prices() {
        assert_eq!(parse_eth("0.01").unwrap(), U256::exp10(16));
        assert_eq!(parse_eth("0.5").unwrap(), U256::exp10(17) * 5u64);
        assert_eq!(parse_eth("1").unwrap(), U256::exp10(18));
        assert!(parse_eth("not-a-price").is_err());
        assert!(matches!(
            parse_eth("-1"),
            Err(ChainError::NegativeAmount(_))
        ));
    }

    #[test]
    fn formats_with_trailing_zeros_trimmed() {
        assert_eq!(format_eth(U256::exp10(16)), "0.01");
        assert_eq!(format_eth(U256::exp10(17) * 5u64), "0.5");
        assert_eq!(format_eth(U256::exp10(18)), "1.0");
        assert_eq!(format_eth(U256::zero()), "0.0");
        assert_eq!(format_eth(U256::from(1u64)), "0.000000000000000001");
    }

    #[test]
    fn price_round_trips_through_wei() {
        for price in ["0.01", "0.5", "0.15", "1.0", "12.345"] {
            let wei = parse_eth(price).unwrap();
            assert_eq!(format_eth(wei), price, "round trip of {price}");
        }
    }

    #[test]
    fn dates_round_trip_through_unix_seconds() {
        let date = Utc.with_ymd_and_hms(2024, 8, 15, 18, 30, 0).unwrap();
        let seconds = to_unix_seconds(date);
        assert_eq!(from_unix_seconds(seconds).unwrap(), date);
    }

    #[test]
    fn oversized_timestamps_are_rejected() {
        assert!(from_unix_seconds(U256::MAX).is_err());
    }

    proptest! {
        #[test]
        fn wei_round_trips_through_decimal(wei in any::<u128>()) {
            let wei = U256::from(wei);
            let formatted = format_eth(wei);
            prop_assert_eq!(parse_eth(&formatted).unwrap(), wei);
        }

        #[test]
        fn canonical_decimals_round_trip(
            whole in 0u64..1_000_000,
            digits in 1usize..=6,
            frac in 1u64..1_000_000,
        ) {
            // Build a fraction of the requested width whose last digit is
            // non-zero, so the decimal is already in canonical form.
            let frac = frac % 10u64.pow(digits as u32);
            prop_assume!(frac != 0 && frac % 10 != 0);
            let price = format!("{whole}.{frac:0digits$}");
            let wei = parse_eth(&price).unwrap();
            prop_assert_eq!(format_eth(wei), price);
        }
    }
}
