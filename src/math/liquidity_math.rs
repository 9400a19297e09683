//! Liquidity obtainable from single-token deposits over a price range.
//!
//! The inverse direction (token amounts for a liquidity delta) lives in
//! `sqrt_price_math`; position quotes combine both.

use crate::error::CoreError;
use crate::math::big_num::U256;
use crate::math::fixed_point_64;

/// Liquidity for `token_delta_a` deposited across `[lower, upper]`:
/// `(token * √P_lower * √P_upper / Δ√P) >> 64`, floored.
pub fn try_get_liquidity_from_a(
    token_delta_a: u64,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> Result<u128, CoreError> {
    let sqrt_price_diff = nonzero_diff(sqrt_price_lower, sqrt_price_upper)?;
    let mul = U256::from(token_delta_a)
        .checked_mul(U256::from(sqrt_price_lower))
        .and_then(|p| p.checked_mul(U256::from(sqrt_price_upper)))
        .ok_or(CoreError::ArithmeticOverflow)?;
    let result = (mul / U256::from(sqrt_price_diff)) >> fixed_point_64::RESOLUTION;
    result.checked_as_u128().ok_or(CoreError::AmountExceedsMaxU64)
}

/// Liquidity for `token_delta_b` deposited across `[lower, upper]`:
/// `token * 2^64 / Δ√P`, floored.
pub fn try_get_liquidity_from_b(
    token_delta_b: u64,
    sqrt_price_lower: u128,
    sqrt_price_upper: u128,
) -> Result<u128, CoreError> {
    let sqrt_price_diff = nonzero_diff(sqrt_price_lower, sqrt_price_upper)?;
    let numerator = u128::from(token_delta_b) << fixed_point_64::RESOLUTION;
    Ok(numerator / sqrt_price_diff)
}

fn nonzero_diff(sqrt_price_lower: u128, sqrt_price_upper: u128) -> Result<u128, CoreError> {
    match sqrt_price_upper.checked_sub(sqrt_price_lower) {
        Some(diff) if diff != 0 => Ok(diff),
        _ => Err(CoreError::DivideByZero),
    }
}
