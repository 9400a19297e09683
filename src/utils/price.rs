//! Decimal price conversions for display and input parsing.
//!
//! Quotes work in Q64.64 square roots; these helpers translate to and
//! from human-readable token prices adjusted for mint decimals. They
//! use exact decimals end to end, floats never enter the engine.

use rust_decimal::Decimal;

use crate::error::CoreError;
use crate::math::big_num::U256;
use crate::math::fixed_point_64;
use crate::math::tick_math::{sqrt_price_to_tick_index, tick_index_to_sqrt_price};
use crate::state::tick::get_initializable_tick_index;

/// Price of token A in token B, adjusted for mint decimals.
///
/// # Errors
///
/// [`CoreError::ArithmeticOverflow`] when the value does not fit the
/// 96-bit decimal mantissa.
pub fn sqrt_price_to_price(
    sqrt_price: u128,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<Decimal, CoreError> {
    let sqrt = decimal_from_u128(sqrt_price)?;
    let ratio = sqrt / decimal_from_u128(fixed_point_64::Q64)?;
    let raw_price = ratio.checked_mul(ratio).ok_or(CoreError::ArithmeticOverflow)?;
    scale_by_decimals(raw_price, decimals_a, decimals_b)
}

/// Q64.64 square root of a decimal-adjusted price.
///
/// # Errors
///
/// [`CoreError::SqrtPriceOutOfBounds`] for a zero or negative price or a
/// result wider than u128.
pub fn price_to_sqrt_price(
    price: Decimal,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<u128, CoreError> {
    if price.is_sign_negative() || price.is_zero() {
        return Err(CoreError::SqrtPriceOutOfBounds);
    }
    // raw ratio = mantissa * 10^decimals_b / (10^scale * 10^decimals_a);
    // shifting by 2^128 up front makes the integer sqrt land on Q64.64
    let net_exponent =
        i64::from(decimals_b) - i64::from(decimals_a) - i64::from(price.scale());
    let shifted = U256::from(price.mantissa().unsigned_abs()) << 128;
    let squared = if net_exponent >= 0 {
        shifted
            .checked_mul(u256_pow10(net_exponent.unsigned_abs())?)
            .ok_or(CoreError::ArithmeticOverflow)?
    } else {
        shifted / u256_pow10(net_exponent.unsigned_abs())?
    };
    isqrt(squared).checked_as_u128().ok_or(CoreError::SqrtPriceOutOfBounds)
}

/// Decimal-adjusted price at an initializable tick.
pub fn tick_index_to_price(
    tick_index: i32,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<Decimal, CoreError> {
    sqrt_price_to_price(tick_index_to_sqrt_price(tick_index)?, decimals_a, decimals_b)
}

/// Tick whose price quantum contains the given decimal price.
pub fn price_to_tick_index(
    price: Decimal,
    decimals_a: u8,
    decimals_b: u8,
) -> Result<i32, CoreError> {
    sqrt_price_to_tick_index(price_to_sqrt_price(price, decimals_a, decimals_b)?)
}

/// Like [`price_to_tick_index`], snapped to the nearest initializable
/// tick toward zero.
pub fn price_to_initializable_tick_index(
    price: Decimal,
    decimals_a: u8,
    decimals_b: u8,
    tick_spacing: u16,
) -> Result<i32, CoreError> {
    Ok(get_initializable_tick_index(
        price_to_tick_index(price, decimals_a, decimals_b)?,
        tick_spacing,
    ))
}

fn decimal_from_u128(value: u128) -> Result<Decimal, CoreError> {
    let signed = i128::try_from(value).map_err(|_| CoreError::ArithmeticOverflow)?;
    Decimal::try_from_i128_with_scale(signed, 0).map_err(|_| CoreError::ArithmeticOverflow)
}

fn scale_by_decimals(value: Decimal, decimals_a: u8, decimals_b: u8) -> Result<Decimal, CoreError> {
    let shift = i32::from(decimals_a) - i32::from(decimals_b);
    let factor = decimal_pow10(shift.unsigned_abs())?;
    if shift >= 0 {
        value.checked_mul(factor).ok_or(CoreError::ArithmeticOverflow)
    } else {
        value.checked_div(factor).ok_or(CoreError::ArithmeticOverflow)
    }
}

fn decimal_pow10(exponent: u32) -> Result<Decimal, CoreError> {
    let value = 10i128.checked_pow(exponent).ok_or(CoreError::ArithmeticOverflow)?;
    Decimal::try_from_i128_with_scale(value, 0).map_err(|_| CoreError::ArithmeticOverflow)
}

fn u256_pow10(exponent: u64) -> Result<U256, CoreError> {
    U256::from(10u8)
        .checked_pow(U256::from(exponent))
        .ok_or(CoreError::ArithmeticOverflow)
}

/// Newton's method; converges monotonically from an over-estimate.
fn isqrt(value: U256) -> U256 {
    if value.is_zero() {
        return U256::zero();
    }
    let mut x = U256::one() << ((value.bits() + 1) / 2);
    let mut y = (x + value / x) >> 1;
    while y < x {
        x = y;
        y = (x + value / x) >> 1;
    }
    x
}
