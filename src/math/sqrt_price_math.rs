//! Token deltas and next-price derivation on the constant-liquidity curve.
//!
//! Amount deltas round toward the pool (inputs up, outputs down) and the
//! next-price helpers round so a step never overshoots its target; both
//! behaviors are part of the on-chain validation contract.

use crate::error::CoreError;
use crate::math::big_num::U256;
use crate::math::{fixed_point_64, full_math};

/// Amount of token A between two sqrt prices for a given liquidity:
/// `L * |Δ√P| * 2^64 / (√P_lower * √P_upper)`.
///
/// # Arguments
/// * `round_up` - round toward the pool (true for amounts the pool takes)
pub fn try_get_amount_delta_a(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, CoreError> {
    let (lower, upper) = order_sqrt_prices(sqrt_price_0, sqrt_price_1);
    let sqrt_price_diff = upper - lower;

    let product = U256::from(liquidity) * U256::from(sqrt_price_diff);
    if !(product >> 192).is_zero() {
        return Err(CoreError::ArithmeticOverflow);
    }
    let numerator = product << 64;
    let denominator = U256::from(lower) * U256::from(upper);
    if denominator.is_zero() {
        return Err(CoreError::DivideByZero);
    }

    let (quotient, remainder) = numerator.div_mod(denominator);
    let result =
        if round_up && !remainder.is_zero() { quotient + U256::one() } else { quotient };
    result.checked_as_u64().ok_or(CoreError::AmountExceedsMaxU64)
}

/// Amount of token B between two sqrt prices for a given liquidity:
/// `L * |Δ√P| >> 64`.
///
/// Any result wider than u64 reports `AmountExceedsMaxU64`; the swap
/// step relies on that exact code to fall back to a partial step.
pub fn try_get_amount_delta_b(
    sqrt_price_0: u128,
    sqrt_price_1: u128,
    liquidity: u128,
    round_up: bool,
) -> Result<u64, CoreError> {
    let (lower, upper) = order_sqrt_prices(sqrt_price_0, sqrt_price_1);
    let product = U256::from(liquidity) * U256::from(upper - lower);
    let quotient = product >> fixed_point_64::RESOLUTION;
    let result = if round_up && !(product & U256::from(u64::MAX)).is_zero() {
        quotient + U256::one()
    } else {
        quotient
    };
    result.checked_as_u64().ok_or(CoreError::AmountExceedsMaxU64)
}

/// Next sqrt price after trading `amount` of token A:
/// `L * √P * 2^64 / (L * 2^64 ± amount * √P)`, always rounded up.
///
/// Adds to the denominator when A is the input (price falls), subtracts
/// when A is the output (price rises).
pub fn try_get_next_sqrt_price_from_a(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    specified_input: bool,
) -> Result<u128, CoreError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let numerator_base = U256::from(liquidity) * U256::from(sqrt_price);
    if !(numerator_base >> 192).is_zero() {
        return Err(CoreError::ArithmeticOverflow);
    }
    let numerator = numerator_base << 64;

    let liquidity_shl = U256::from(liquidity) << 64;
    let product = U256::from(amount) * U256::from(sqrt_price);
    let denominator = if specified_input {
        liquidity_shl + product
    } else {
        liquidity_shl.checked_sub(product).ok_or(CoreError::SqrtPriceOutOfBounds)?
    };
    if denominator.is_zero() {
        return Err(CoreError::SqrtPriceOutOfBounds);
    }

    let (quotient, remainder) = numerator.div_mod(denominator);
    let result = if remainder.is_zero() { quotient } else { quotient + U256::one() };
    result.checked_as_u128().ok_or(CoreError::SqrtPriceOutOfBounds)
}

/// Next sqrt price after trading `amount` of token B:
/// `√P ± amount * 2^64 / L`.
///
/// The delta is floored when B is the input (price rises no further than
/// paid for) and ceiled when B is the output (price falls at least far
/// enough to produce it).
pub fn try_get_next_sqrt_price_from_b(
    sqrt_price: u128,
    liquidity: u128,
    amount: u64,
    specified_input: bool,
) -> Result<u128, CoreError> {
    if amount == 0 {
        return Ok(sqrt_price);
    }

    let amount_shl = u128::from(amount) << 64;
    let delta = full_math::div_round_up(amount_shl, liquidity, !specified_input)?;

    if specified_input {
        sqrt_price.checked_add(delta).ok_or(CoreError::SqrtPriceOutOfBounds)
    } else {
        sqrt_price.checked_sub(delta).ok_or(CoreError::SqrtPriceOutOfBounds)
    }
}

fn order_sqrt_prices(sqrt_price_0: u128, sqrt_price_1: u128) -> (u128, u128) {
    if sqrt_price_0 < sqrt_price_1 { (sqrt_price_0, sqrt_price_1) } else { (sqrt_price_1, sqrt_price_0) }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::tick_math::tick_index_to_sqrt_price;

    const UNIT: u128 = 1u128 << 64;

    #[test]
    fn amount_delta_a_rounds_by_flag() {
        let lower = tick_index_to_sqrt_price(-10).unwrap();
        let upper = tick_index_to_sqrt_price(10).unwrap();
        assert_eq!(try_get_amount_delta_a(UNIT, upper, 1_000_000, true), Ok(500));
        assert_eq!(try_get_amount_delta_a(UNIT, upper, 1_000_000, false), Ok(499));
        assert_eq!(try_get_amount_delta_a(lower, upper, 1_000_000, true), Ok(1000));
        assert_eq!(try_get_amount_delta_a(lower, upper, 1_000_000, false), Ok(999));
        // argument order must not matter
        assert_eq!(try_get_amount_delta_a(upper, UNIT, 1_000_000, true), Ok(500));
    }

    #[test]
    fn amount_delta_b_rounds_by_flag() {
        let lower = tick_index_to_sqrt_price(-10).unwrap();
        let upper = tick_index_to_sqrt_price(10).unwrap();
        assert_eq!(try_get_amount_delta_b(lower, UNIT, 1_000_000, true), Ok(500));
        assert_eq!(try_get_amount_delta_b(lower, UNIT, 1_000_000, false), Ok(499));
        assert_eq!(try_get_amount_delta_b(lower, upper, 1_000_000, true), Ok(1000));
        assert_eq!(try_get_amount_delta_b(lower, upper, 1_000_000, false), Ok(999));
    }

    #[test]
    fn amount_delta_zero_width_range() {
        assert_eq!(try_get_amount_delta_a(UNIT, UNIT, u128::MAX, true), Ok(0));
        assert_eq!(try_get_amount_delta_b(UNIT, UNIT, u128::MAX, true), Ok(0));
    }

    #[test]
    fn amount_delta_a_narrows_to_u64() {
        let upper = tick_index_to_sqrt_price(100).unwrap();
        assert_eq!(
            try_get_amount_delta_a(UNIT, upper, u128::from(u64::MAX) << 30, true),
            Err(CoreError::AmountExceedsMaxU64)
        );
    }

    #[test]
    fn next_price_from_a_moves_against_input() {
        let next = try_get_next_sqrt_price_from_a(UNIT, 100_001_000, 997, true).unwrap();
        assert_eq!(next, 18446560163343826736);
        assert!(next < UNIT);
        assert_eq!(try_get_next_sqrt_price_from_a(UNIT, 100_001_000, 0, true), Ok(UNIT));
    }

    #[test]
    fn next_price_from_a_output_can_leave_bounds() {
        // Withdrawing more A than the pool holds pushes the denominator
        // through zero.
        assert_eq!(
            try_get_next_sqrt_price_from_a(UNIT, 1_000, u64::MAX, false),
            Err(CoreError::SqrtPriceOutOfBounds)
        );
    }

    #[test]
    fn next_price_from_b_moves_with_input() {
        let next = try_get_next_sqrt_price_from_b(UNIT, 100_000_000, 997, true).unwrap();
        assert_eq!(next, 18446927987747966500);
        assert!(next > UNIT);
        assert_eq!(
            try_get_next_sqrt_price_from_b(UNIT, 0, 1, true),
            Err(CoreError::DivideByZero)
        );
    }

    #[test]
    fn next_price_from_b_output_rounds_delta_up() {
        // 3 << 64 / 7 has a remainder; output-specified must move at
        // least that far down.
        let floor_delta = (3u128 << 64) / 7;
        let next = try_get_next_sqrt_price_from_b(UNIT, 7, 3, false).unwrap();
        assert_eq!(next, UNIT - floor_delta - 1);
    }
}
