//! Single-step swap arithmetic.
//!
//! A step advances the price toward one target inside a region of
//! constant liquidity; the loop in `quote::swap` strings steps together
//! across tick boundaries.

use crate::constants::pool::FEE_RATE_DENOMINATOR;
use crate::error::CoreError;
use crate::math::full_math;
use crate::math::sqrt_price_math::{
    try_get_amount_delta_a, try_get_amount_delta_b, try_get_next_sqrt_price_from_a,
    try_get_next_sqrt_price_from_b,
};

/// Outcome of one constant-liquidity step.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SwapStepQuote {
    pub amount_in: u64,
    pub amount_out: u64,
    pub next_sqrt_price: u128,
    pub fee_amount: u64,
}

/// Advances the price from `current_sqrt_price` toward
/// `target_sqrt_price`, spending at most `amount_remaining` of the
/// specified token.
///
/// The specified token fixes one side of the trade; the other side is
/// derived from the price actually reached. When the remaining amount
/// cannot reach the target the step stops early and, for exact-in, the
/// fee absorbs the rounding slack so `amount_in + fee_amount` equals
/// the remaining amount exactly.
///
/// # Arguments
/// * `fee_rate` - pool fee in parts per million
/// * `a_to_b` - price moves down when true
/// * `specified_input` - `amount_remaining` is input (true) or output
///
/// # Returns
/// The step quote, or an error when the inputs cannot produce one.
pub fn compute_swap_step(
    amount_remaining: u64,
    fee_rate: u16,
    current_liquidity: u128,
    current_sqrt_price: u128,
    target_sqrt_price: u128,
    a_to_b: bool,
    specified_input: bool,
) -> Result<SwapStepQuote, CoreError> {
    // The fixed-delta overflow is the only recoverable failure here; it
    // means the target is further than any u64 amount can reach.
    let initial_amount_fixed_delta = try_get_amount_fixed_delta(
        current_sqrt_price,
        target_sqrt_price,
        current_liquidity,
        a_to_b,
        specified_input,
    );
    let is_initial_amount_fixed_overflow =
        initial_amount_fixed_delta == Err(CoreError::AmountExceedsMaxU64);

    let amount_calculated = if specified_input {
        try_apply_swap_fee(amount_remaining, fee_rate)?
    } else {
        amount_remaining
    };

    let next_sqrt_price =
        if !is_initial_amount_fixed_overflow && initial_amount_fixed_delta? <= amount_calculated {
            target_sqrt_price
        } else {
            try_get_next_sqrt_price(
                current_sqrt_price,
                current_liquidity,
                amount_calculated,
                a_to_b,
                specified_input,
            )?
        };

    let is_max_swap = next_sqrt_price == target_sqrt_price;

    let amount_unfixed_delta = try_get_amount_unfixed_delta(
        current_sqrt_price,
        next_sqrt_price,
        current_liquidity,
        a_to_b,
        specified_input,
    )?;

    // A partial step spends the whole remaining amount, so the fixed
    // side must be recomputed against the price actually reached.
    let amount_fixed_delta = if !is_max_swap || is_initial_amount_fixed_overflow {
        try_get_amount_fixed_delta(
            current_sqrt_price,
            next_sqrt_price,
            current_liquidity,
            a_to_b,
            specified_input,
        )?
    } else {
        initial_amount_fixed_delta?
    };

    let (amount_in, mut amount_out) = if specified_input {
        (amount_fixed_delta, amount_unfixed_delta)
    } else {
        (amount_unfixed_delta, amount_fixed_delta)
    };

    // Never quote more output than the caller asked for.
    if !specified_input && amount_out > amount_remaining {
        amount_out = amount_remaining;
    }

    let fee_amount = if specified_input && !is_max_swap {
        amount_remaining - amount_in
    } else {
        let pre_fee_amount = try_reverse_apply_swap_fee(amount_in, fee_rate)?;
        pre_fee_amount - amount_in
    };

    Ok(SwapStepQuote { amount_in, amount_out, next_sqrt_price, fee_amount })
}

/// Removes the swap fee from an input amount, flooring the kept part.
pub fn try_apply_swap_fee(amount: u64, fee_rate: u16) -> Result<u64, CoreError> {
    let fee_basis = u128::from(FEE_RATE_DENOMINATOR) - u128::from(fee_rate);
    let result = full_math::mul_div(
        u128::from(amount),
        fee_basis,
        u128::from(FEE_RATE_DENOMINATOR),
        128,
        false,
    )?;
    result.try_into().map_err(|_| CoreError::AmountExceedsMaxU64)
}

/// Restores the pre-fee amount that nets `amount` after the swap fee,
/// rounding up.
pub fn try_reverse_apply_swap_fee(amount: u64, fee_rate: u16) -> Result<u64, CoreError> {
    let fee_basis = u128::from(FEE_RATE_DENOMINATOR) - u128::from(fee_rate);
    let result = full_math::mul_div(
        u128::from(amount),
        u128::from(FEE_RATE_DENOMINATOR),
        fee_basis,
        128,
        true,
    )?;
    result.try_into().map_err(|_| CoreError::AmountExceedsMaxU64)
}

// The fixed side is token A exactly when the trade direction and the
// specified side agree; amounts round toward the pool.

fn try_get_amount_fixed_delta(
    current_sqrt_price: u128,
    target_sqrt_price: u128,
    current_liquidity: u128,
    a_to_b: bool,
    specified_input: bool,
) -> Result<u64, CoreError> {
    if a_to_b == specified_input {
        try_get_amount_delta_a(current_sqrt_price, target_sqrt_price, current_liquidity, specified_input)
    } else {
        try_get_amount_delta_b(current_sqrt_price, target_sqrt_price, current_liquidity, specified_input)
    }
}

fn try_get_amount_unfixed_delta(
    current_sqrt_price: u128,
    target_sqrt_price: u128,
    current_liquidity: u128,
    a_to_b: bool,
    specified_input: bool,
) -> Result<u64, CoreError> {
    if specified_input == a_to_b {
        try_get_amount_delta_b(current_sqrt_price, target_sqrt_price, current_liquidity, !specified_input)
    } else {
        try_get_amount_delta_a(current_sqrt_price, target_sqrt_price, current_liquidity, !specified_input)
    }
}

fn try_get_next_sqrt_price(
    current_sqrt_price: u128,
    current_liquidity: u128,
    amount_calculated: u64,
    a_to_b: bool,
    specified_input: bool,
) -> Result<u128, CoreError> {
    if specified_input == a_to_b {
        try_get_next_sqrt_price_from_a(current_sqrt_price, current_liquidity, amount_calculated, specified_input)
    } else {
        try_get_next_sqrt_price_from_b(current_sqrt_price, current_liquidity, amount_calculated, specified_input)
    }
}
