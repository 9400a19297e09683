//! Width-checked multiply/divide helpers.
//!
//! The on-chain program computes in fixed widths; every product here is
//! formed in 256-bit space and checked against the caller's declared
//! width limit so the engine overflows at exactly the same points.

use crate::error::CoreError;
use crate::math::big_num::U256;
use crate::math::fixed_point_64;

/// Computes `n0 * n1 / d` with the product checked against
/// `2^width_limit - 1`, rounding up on a nonzero remainder when
/// `round_up` is set.
///
/// # Arguments
/// * `width_limit` - maximum bit width the product may occupy (64/128/256)
///
/// # Returns
/// The quotient, or `MultiplicationOverflow` / `DivideByZero`.
pub fn mul_div(
    n0: u128,
    n1: u128,
    d: u128,
    width_limit: u32,
    round_up: bool,
) -> Result<u128, CoreError> {
    if d == 0 {
        return Err(CoreError::DivideByZero);
    }
    let product = U256::from(n0) * U256::from(n1);
    check_width(product, width_limit)?;
    let (quotient, remainder) = product.div_mod(U256::from(d));
    let result =
        if round_up && !remainder.is_zero() { quotient + U256::one() } else { quotient };
    result.checked_as_u128().ok_or(CoreError::MultiplicationOverflow)
}

/// Computes `n0 * n1 >> 64`, converting a product of two Q64.64 values
/// back to Q64.64 scale. Rounds up when any shifted-out bit is set and
/// `round_up` is requested. The unshifted product is checked against
/// `2^width_limit - 1`.
pub fn mul_shift_right(
    n0: u128,
    n1: u128,
    width_limit: u32,
    round_up: bool,
) -> Result<u128, CoreError> {
    let product = U256::from(n0) * U256::from(n1);
    check_width(product, width_limit)?;
    let shifted = product >> fixed_point_64::RESOLUTION;
    let result = if round_up && !(product & U256::from(u64::MAX)).is_zero() {
        shifted + U256::one()
    } else {
        shifted
    };
    result.checked_as_u128().ok_or(CoreError::MultiplicationOverflow)
}

/// Integer division with optional ceiling rounding.
pub fn div_round_up(n: u128, d: u128, round_up: bool) -> Result<u128, CoreError> {
    if d == 0 {
        return Err(CoreError::DivideByZero);
    }
    let quotient = n / d;
    if round_up && n % d != 0 { Ok(quotient + 1) } else { Ok(quotient) }
}

fn check_width(value: U256, width_limit: u32) -> Result<(), CoreError> {
    if width_limit >= 256 {
        return Ok(());
    }
    if (value >> width_limit).is_zero() { Ok(()) } else { Err(CoreError::MultiplicationOverflow) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mul_div_rounds_by_flag() {
        // 30 / 4 = 7.5
        assert_eq!(mul_div(10, 3, 4, 128, true), Ok(8));
        assert_eq!(mul_div(10, 3, 4, 128, false), Ok(7));
    }

    #[test]
    fn mul_div_exact_quotient_ignores_round_up() {
        assert_eq!(mul_div(10, 2, 4, 128, true), Ok(5));
    }

    #[test]
    fn mul_div_rejects_zero_denominator() {
        assert_eq!(mul_div(1, 1, 0, 128, false), Err(CoreError::DivideByZero));
    }

    #[test]
    fn mul_div_enforces_width_limit() {
        // 2^32 * 2^32 needs 65 bits
        let n = 1u128 << 32;
        assert_eq!(mul_div(n, n, 1, 64, false), Err(CoreError::MultiplicationOverflow));
        assert_eq!(mul_div(n, n, 1, 128, false), Ok(1u128 << 64));
        assert_eq!(
            mul_div(u128::MAX, 2, 1, 128, false),
            Err(CoreError::MultiplicationOverflow)
        );
    }

    #[test]
    fn mul_div_width_256_narrows_result() {
        // Product fits 256 bits but the quotient does not fit u128.
        assert_eq!(
            mul_div(u128::MAX, u128::MAX, 1, 256, false),
            Err(CoreError::MultiplicationOverflow)
        );
        assert_eq!(mul_div(u128::MAX, u128::MAX, u128::MAX, 256, false), Ok(u128::MAX));
    }

    #[test]
    fn mul_shift_right_rescales() {
        assert_eq!(mul_shift_right(fixed_point_64::Q64, 5, 128, false), Ok(5));
        // 2^63 >> 64 = 0 with a shifted-out bit set
        assert_eq!(mul_shift_right(1u128 << 63, 1, 128, true), Ok(1));
        assert_eq!(mul_shift_right(1u128 << 63, 1, 128, false), Ok(0));
    }

    #[test]
    fn mul_shift_right_enforces_width_limit() {
        assert_eq!(
            mul_shift_right(u128::MAX, u128::MAX, 128, false),
            Err(CoreError::MultiplicationOverflow)
        );
    }

    #[test]
    fn div_round_up_behaviour() {
        assert_eq!(div_round_up(7, 2, true), Ok(4));
        assert_eq!(div_round_up(7, 2, false), Ok(3));
        assert_eq!(div_round_up(8, 2, true), Ok(4));
        assert_eq!(div_round_up(1, 0, true), Err(CoreError::DivideByZero));
    }
}
