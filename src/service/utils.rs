//! Conversions between on-chain integers and human-readable amounts
//!
//! Amounts are parsed through `Decimal` so "0.05" never passes through floating point,
//! and prices derived from `sqrtPriceX96` are computed in 512-bit integers because the
//! squared Q64.96 value does not fit in 256 bits.

use std::str::FromStr;

use alloy::primitives::{U256, aliases::U512};
use rust_decimal::Decimal;

use super::ServiceResult;
use super::error::ServiceError;

/// Fractional digits kept when formatting a pool price.
pub const PRICE_DECIMALS: u8 = 18;

/// Parse human-readable amount (e.g., "0.05") to smallest unit based on decimals
///
/// Digits beyond the token's precision are truncated.
///
/// # Examples
/// - "0.05" with 18 decimals -> 50000000000000000
/// - "100" with 6 decimals -> 100000000
pub fn parse_amount(amount: &str, decimals: u8) -> ServiceResult<U256> {
    let value = Decimal::from_str(amount.trim())
        .map_err(|e| ServiceError::InvalidAmount(format!("'{amount}': {e}")))?;

    if value.is_sign_negative() && !value.is_zero() {
        return Err(ServiceError::InvalidAmount(format!(
            "'{amount}' must not be negative"
        )));
    }

    let mantissa = U256::from(value.mantissa().unsigned_abs());
    let scale = value.scale();
    let decimals = u32::from(decimals);
    let ten = U256::from(10u64);

    let overflow =
        || ServiceError::InvalidAmount(format!("'{amount}' overflows {decimals} decimals"));

    let smallest_unit = if decimals >= scale {
        let factor = ten
            .checked_pow(U256::from(decimals - scale))
            .ok_or_else(overflow)?;
        mantissa.checked_mul(factor).ok_or_else(overflow)?
    } else {
        // Every Decimal scale (at most 28) fits in a U256 power of ten
        mantissa / ten.pow(U256::from(scale - decimals))
    };

    Ok(smallest_unit)
}

/// Format balance from smallest unit to human-readable format
///
/// # Returns
/// Formatted balance as string with trailing zeros removed
pub fn format_balance(balance: U256, decimals: u8) -> String {
    format_digits(&balance.to_string(), decimals)
}

/// Places a decimal point `decimals` digits from the right of a base-10 integer string.
fn format_digits(digits: &str, decimals: u8) -> String {
    let decimals = decimals as usize;
    if decimals == 0 {
        return digits.to_string();
    }

    let padded = format!("{digits:0>width$}", width = decimals + 1);
    let (whole, fraction) = padded.split_at(padded.len() - decimals);
    let fraction = fraction.trim_end_matches('0');

    if fraction.is_empty() {
        whole.to_string()
    } else {
        format!("{whole}.{fraction}")
    }
}

/// Price of one token0 expressed in token1, from a pool's `sqrtPriceX96`
///
/// price = (sqrtPriceX96 / 2^96)^2 * 10^(decimals0 - decimals1)
///
/// # Returns
/// The price formatted with up to [`PRICE_DECIMALS`] fractional digits, or
/// [`ServiceError::InvalidAmount`] when the token precisions push it past 512 bits
pub fn sqrt_price_x96_to_price(
    sqrt_price_x96: U256,
    decimals0: u8,
    decimals1: u8,
) -> ServiceResult<String> {
    let overflow = || {
        ServiceError::InvalidAmount(format!(
            "price with decimals {decimals0}/{decimals1} overflows 512 bits"
        ))
    };
    let ten = U512::from(10u64);
    let sqrt_price = U512::from(sqrt_price_x96);

    let scale = ten
        .checked_pow(U512::from(u32::from(decimals0) + u32::from(PRICE_DECIMALS)))
        .ok_or_else(overflow)?;
    let numerator = (sqrt_price * sqrt_price)
        .checked_mul(scale)
        .ok_or_else(overflow)?;
    let denominator = ten
        .checked_pow(U512::from(decimals1))
        .and_then(|factor| factor.checked_mul(U512::from(1u64) << 192usize))
        .ok_or_else(overflow)?;

    Ok(format_digits(
        &(numerator / denominator).to_string(),
        PRICE_DECIMALS,
    ))
}

/// Unix timestamp `secs` seconds from now, as a contract deadline
pub fn deadline_from_now(secs: i64) -> U256 {
    U256::from((chrono::Utc::now().timestamp() + secs).max(0) as u64)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_amount_weth_should_work() {
        let amount = parse_amount("0.05", 18).unwrap();
        assert_eq!(amount, U256::from_str("50000000000000000").unwrap());
    }

    #[test]
    fn test_parse_amount_usdc_should_work() {
        let amount = parse_amount("100", 6).unwrap();
        assert_eq!(amount, U256::from(100_000_000u64));
    }

    #[test]
    fn test_parse_amount_truncates_excess_precision() {
        // USDC only has 6 decimals
        let amount = parse_amount("1.1234567", 6).unwrap();
        assert_eq!(amount, U256::from(1_123_456u64));
    }

    #[test]
    fn test_parse_amount_large_value_does_not_overflow() {
        let amount = parse_amount("1000000000000", 18).unwrap();
        assert_eq!(
            amount,
            U256::from_str("1000000000000000000000000000000").unwrap()
        );
    }

    #[test]
    fn test_parse_amount_rejects_garbage_and_negatives() {
        assert!(matches!(
            parse_amount("abc", 18),
            Err(ServiceError::InvalidAmount(_))
        ));
        assert!(matches!(
            parse_amount("-1", 18),
            Err(ServiceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_parse_amount_rejects_precision_beyond_u256() {
        // 10^80 has no U256 representation
        assert!(matches!(
            parse_amount("0.05", 80),
            Err(ServiceError::InvalidAmount(msg)) if msg.contains("overflows")
        ));

        // 10^77 fits, but a mantissa of 5 * 10^77 does not
        assert!(matches!(
            parse_amount("500", 77),
            Err(ServiceError::InvalidAmount(_))
        ));
        assert!(parse_amount("1", 77).is_ok());
    }

    #[test]
    fn test_format_balance_eth_should_work() {
        let wei = U256::from_str("1500000000000000000").unwrap();
        assert_eq!(format_balance(wei, 18), "1.5");
    }

    #[test]
    fn test_format_balance_usdc_should_work() {
        let amount = U256::from(100_500_000u64);
        assert_eq!(format_balance(amount, 6), "100.5");
    }

    #[test]
    fn test_format_balance_small_and_zero_values() {
        assert_eq!(format_balance(U256::from(1u64), 6), "0.000001");
        assert_eq!(format_balance(U256::ZERO, 18), "0");
        assert_eq!(format_balance(U256::from(42u64), 0), "42");
    }

    #[test]
    fn test_format_balance_whole_number_should_work() {
        let wei = U256::from_str("1000000000000000000").unwrap();
        assert_eq!(format_balance(wei, 18), "1");
    }

    #[test]
    fn test_sqrt_price_at_parity_is_one() {
        let sqrt_price = U256::from(1u64) << 96usize;
        assert_eq!(sqrt_price_x96_to_price(sqrt_price, 18, 18).unwrap(), "1");
    }

    #[test]
    fn test_sqrt_price_adjusts_for_decimals() {
        // raw price 4 with token0 at 6 decimals and token1 at 18 decimals
        let sqrt_price = U256::from(2u64) << 96usize;
        assert_eq!(
            sqrt_price_x96_to_price(sqrt_price, 6, 18).unwrap(),
            "0.000000000004"
        );

        // raw price 1 with token0 at 18 decimals and token1 at 6 decimals
        let sqrt_price = U256::from(1u64) << 96usize;
        assert_eq!(
            sqrt_price_x96_to_price(sqrt_price, 18, 6).unwrap(),
            "1000000000000"
        );
    }

    #[test]
    fn test_sqrt_price_at_max_does_not_overflow() {
        // sqrtPriceX96 is a uint160
        let sqrt_price = (U256::from(1u64) << 160usize) - U256::from(1u64);
        let price = sqrt_price_x96_to_price(sqrt_price, 18, 18).unwrap();
        assert!(!price.is_empty());
        assert!(price.starts_with("3402823669209384634"));
    }

    #[test]
    fn test_sqrt_price_with_extreme_decimals_is_an_error() {
        let sqrt_price = (U256::from(1u64) << 160usize) - U256::from(1u64);

        // Reachable through the on-chain decimals() fallback for unknown tokens
        assert!(matches!(
            sqrt_price_x96_to_price(sqrt_price, 200, 6),
            Err(ServiceError::InvalidAmount(_))
        ));
        assert!(matches!(
            sqrt_price_x96_to_price(U256::from(1u64) << 96usize, 18, 255),
            Err(ServiceError::InvalidAmount(_))
        ));
    }

    #[test]
    fn test_deadline_is_in_the_future() {
        let now = U256::from(chrono::Utc::now().timestamp() as u64);
        let deadline = deadline_from_now(600);
        assert!(deadline >= now + U256::from(600u64));
    }
}
