//! Liquidity change quotes with slippage-bounded token amounts.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::error::CoreError;
use crate::math::liquidity_math::{try_get_liquidity_from_a, try_get_liquidity_from_b};
use crate::math::percentage::Percentage;
use crate::math::sqrt_price_math::{try_get_amount_delta_a, try_get_amount_delta_b};
use crate::math::tick_math::tick_index_to_sqrt_price;
use crate::state::position::{position_status, Position, PositionStatus};
use crate::state::tick::is_tick_initializable;
use crate::state::whirlpool::Whirlpool;

/// Quote for adding liquidity to a position range.
///
/// `token_max_a`/`token_max_b` are the deposit ceilings after slippage;
/// estimates round up so the deposit always covers the liquidity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IncreaseLiquidityQuote {
    pub liquidity_delta: u128,
    pub token_est_a: u64,
    pub token_est_b: u64,
    pub token_max_a: u64,
    pub token_max_b: u64,
}

/// Quote for removing liquidity from a position range.
///
/// `token_min_a`/`token_min_b` are the withdrawal floors after slippage;
/// estimates round down so the pool is never over-debited.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecreaseLiquidityQuote {
    pub liquidity_delta: u128,
    pub token_est_a: u64,
    pub token_est_b: u64,
    pub token_min_a: u64,
    pub token_min_b: u64,
}

/// Token amounts needed to add `liquidity_delta` over a tick range.
///
/// # Errors
///
/// * [`CoreError::InvalidTickRange`] - bounds not strictly ordered
/// * [`CoreError::InvalidTickIndex`] - bounds not spacing multiples
/// * [`CoreError::TickIndexOutOfBounds`] - bounds outside the global range
pub fn increase_liquidity_quote(
    liquidity_delta: u128,
    slippage_tolerance: Percentage,
    whirlpool: &Whirlpool,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<IncreaseLiquidityQuote, CoreError> {
    check_position_bounds(whirlpool, tick_lower_index, tick_upper_index)?;
    if liquidity_delta == 0 {
        return Ok(IncreaseLiquidityQuote::default());
    }
    let (token_est_a, token_est_b) =
        token_estimates(liquidity_delta, whirlpool, tick_lower_index, tick_upper_index, true)?;
    Ok(IncreaseLiquidityQuote {
        liquidity_delta,
        token_est_a,
        token_est_b,
        token_max_a: slippage_tolerance.adjust_up(token_est_a)?,
        token_max_b: slippage_tolerance.adjust_up(token_est_b)?,
    })
}

/// Like [`increase_liquidity_quote`], but sized by a single-token deposit.
///
/// The liquidity delta is derived from `token_amount` of `token_mint` at
/// the current price. A mint on the side the range cannot absorb yields
/// an empty quote.
///
/// # Errors
///
/// [`CoreError::InvalidTokenMint`] when the mint is not in the pool, plus
/// the bound checks of [`increase_liquidity_quote`].
pub fn increase_liquidity_quote_by_input_token(
    token_amount: u64,
    token_mint: Pubkey,
    slippage_tolerance: Percentage,
    whirlpool: &Whirlpool,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<IncreaseLiquidityQuote, CoreError> {
    check_position_bounds(whirlpool, tick_lower_index, tick_upper_index)?;
    if token_amount == 0 {
        return Ok(IncreaseLiquidityQuote::default());
    }
    let liquidity_delta =
        liquidity_from_token(token_amount, token_mint, whirlpool, tick_lower_index, tick_upper_index)?;
    increase_liquidity_quote(
        liquidity_delta,
        slippage_tolerance,
        whirlpool,
        tick_lower_index,
        tick_upper_index,
    )
}

/// Token amounts released by removing `liquidity_delta` from a position.
///
/// # Errors
///
/// [`CoreError::LiquidityExceedsPosition`] when the delta is more than
/// the position holds, plus the bound checks of
/// [`increase_liquidity_quote`].
pub fn decrease_liquidity_quote(
    liquidity_delta: u128,
    slippage_tolerance: Percentage,
    whirlpool: &Whirlpool,
    position: &Position,
) -> Result<DecreaseLiquidityQuote, CoreError> {
    check_position_bounds(whirlpool, position.tick_lower_index, position.tick_upper_index)?;
    if liquidity_delta > position.liquidity {
        return Err(CoreError::LiquidityExceedsPosition);
    }
    if liquidity_delta == 0 {
        return Ok(DecreaseLiquidityQuote::default());
    }
    let (token_est_a, token_est_b) = token_estimates(
        liquidity_delta,
        whirlpool,
        position.tick_lower_index,
        position.tick_upper_index,
        false,
    )?;
    Ok(DecreaseLiquidityQuote {
        liquidity_delta,
        token_est_a,
        token_est_b,
        token_min_a: slippage_tolerance.adjust_down(token_est_a)?,
        token_min_b: slippage_tolerance.adjust_down(token_est_b)?,
    })
}

/// Like [`decrease_liquidity_quote`], but sized by a single-token
/// withdrawal target.
pub fn decrease_liquidity_quote_by_input_token(
    token_amount: u64,
    token_mint: Pubkey,
    slippage_tolerance: Percentage,
    whirlpool: &Whirlpool,
    position: &Position,
) -> Result<DecreaseLiquidityQuote, CoreError> {
    check_position_bounds(whirlpool, position.tick_lower_index, position.tick_upper_index)?;
    if token_amount == 0 {
        return Ok(DecreaseLiquidityQuote::default());
    }
    let liquidity_delta = liquidity_from_token(
        token_amount,
        token_mint,
        whirlpool,
        position.tick_lower_index,
        position.tick_upper_index,
    )?;
    decrease_liquidity_quote(liquidity_delta, slippage_tolerance, whirlpool, position)
}

fn check_position_bounds(
    whirlpool: &Whirlpool,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<(), CoreError> {
    if tick_lower_index >= tick_upper_index {
        return Err(CoreError::InvalidTickRange);
    }
    if !is_tick_initializable(tick_lower_index, whirlpool.tick_spacing)
        || !is_tick_initializable(tick_upper_index, whirlpool.tick_spacing)
    {
        return Err(CoreError::InvalidTickIndex);
    }
    Ok(())
}

fn token_estimates(
    liquidity_delta: u128,
    whirlpool: &Whirlpool,
    tick_lower_index: i32,
    tick_upper_index: i32,
    round_up: bool,
) -> Result<(u64, u64), CoreError> {
    let lower_sqrt_price = tick_index_to_sqrt_price(tick_lower_index)?;
    let upper_sqrt_price = tick_index_to_sqrt_price(tick_upper_index)?;
    match position_status(whirlpool.tick_current_index, tick_lower_index, tick_upper_index)? {
        PositionStatus::BelowRange => Ok((
            try_get_amount_delta_a(lower_sqrt_price, upper_sqrt_price, liquidity_delta, round_up)?,
            0,
        )),
        PositionStatus::InRange => Ok((
            try_get_amount_delta_a(whirlpool.sqrt_price, upper_sqrt_price, liquidity_delta, round_up)?,
            try_get_amount_delta_b(lower_sqrt_price, whirlpool.sqrt_price, liquidity_delta, round_up)?,
        )),
        PositionStatus::AboveRange => Ok((
            0,
            try_get_amount_delta_b(lower_sqrt_price, upper_sqrt_price, liquidity_delta, round_up)?,
        )),
    }
}

/// Liquidity purchasable with one token at the current price. The side
/// the range cannot absorb maps to zero liquidity, not an error.
fn liquidity_from_token(
    token_amount: u64,
    token_mint: Pubkey,
    whirlpool: &Whirlpool,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<u128, CoreError> {
    let lower_sqrt_price = tick_index_to_sqrt_price(tick_lower_index)?;
    let upper_sqrt_price = tick_index_to_sqrt_price(tick_upper_index)?;
    let status =
        position_status(whirlpool.tick_current_index, tick_lower_index, tick_upper_index)?;
    if token_mint == whirlpool.token_mint_a {
        match status {
            PositionStatus::BelowRange => {
                try_get_liquidity_from_a(token_amount, lower_sqrt_price, upper_sqrt_price)
            }
            PositionStatus::InRange => {
                try_get_liquidity_from_a(token_amount, whirlpool.sqrt_price, upper_sqrt_price)
            }
            PositionStatus::AboveRange => Ok(0),
        }
    } else if token_mint == whirlpool.token_mint_b {
        match status {
            PositionStatus::BelowRange => Ok(0),
            PositionStatus::InRange => {
                try_get_liquidity_from_b(token_amount, lower_sqrt_price, whirlpool.sqrt_price)
            }
            PositionStatus::AboveRange => {
                try_get_liquidity_from_b(token_amount, lower_sqrt_price, upper_sqrt_price)
            }
        }
    } else {
        Err(CoreError::InvalidTokenMint)
    }
}
