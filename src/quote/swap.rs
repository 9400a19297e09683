//! Multi-step swap simulation and slippage-adjusted swap quotes.

use log::debug;
use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::pool::MAX_SWAP_TICK_ARRAYS;
use crate::error::CoreError;
use crate::math::percentage::Percentage;
use crate::math::swap_math::compute_swap_step;
use crate::math::tick_math::{
    sqrt_price_to_tick_index, tick_index_to_sqrt_price, MAX_SQRT_PRICE, MIN_SQRT_PRICE,
};
use crate::quote::tick_array_sequence::TickArraySequence;
use crate::state::tick::{Tick, TickArray};
use crate::state::whirlpool::Whirlpool;

/// Raw outcome of walking a swap across the tick window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SwapResult {
    pub token_a: u64,
    pub token_b: u64,
    pub trade_fee: u64,
    /// Pool price after the swap, as a Q64.64 square root.
    pub next_sqrt_price: u128,
    pub next_tick_index: i32,
}

/// Quote for a swap with the input amount fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactInSwapQuote {
    /// Input actually consumed; less than requested when the price limit
    /// cuts the swap short.
    pub token_in: u64,
    pub token_est_out: u64,
    /// Estimate reduced by the slippage tolerance.
    pub token_min_out: u64,
    pub trade_fee: u64,
    pub next_sqrt_price: u128,
    pub next_tick_index: i32,
    /// Start indexes of the tick arrays the swap reads, in traversal order.
    pub touched_tick_array_start_indexes: Vec<i32>,
}

/// Quote for a swap with the output amount fixed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExactOutSwapQuote {
    pub token_out: u64,
    pub token_est_in: u64,
    /// Estimate raised by the slippage tolerance.
    pub token_max_in: u64,
    pub trade_fee: u64,
    pub next_sqrt_price: u128,
    pub next_tick_index: i32,
    pub touched_tick_array_start_indexes: Vec<i32>,
}

/// Simulates a swap against pool state and a tick window.
///
/// Walks tick by tick, splitting the trade into steps that each end at
/// an initialized tick, the window edge, or the price limit. Liquidity
/// is re-read at every crossing. A `sqrt_price_limit` of zero means no
/// limit in the direction of the swap.
///
/// # Arguments
///
/// * `token_amount` - fixed amount: input when `specified_input`, output
///   otherwise
/// * `sqrt_price_limit` - Q64.64 price the swap must not move past
/// * `a_to_b` - `true` when selling token A (price moves down)
/// * `specified_input` - whether `token_amount` fixes the input side
///
/// # Errors
///
/// * [`CoreError::SqrtPriceLimitOutOfBounds`] - limit outside the global
///   price range
/// * [`CoreError::InvalidSqrtPriceLimitDirection`] - limit on the wrong
///   side of the current price
/// * [`CoreError::ZeroTradableAmount`] - `token_amount` is zero
/// * [`CoreError::TickArraySequenceInvalid`] - the swap runs off the
///   supplied tick window
pub fn compute_swap(
    token_amount: u64,
    sqrt_price_limit: u128,
    whirlpool: &Whirlpool,
    tick_sequence: &TickArraySequence<'_>,
    a_to_b: bool,
    specified_input: bool,
) -> Result<SwapResult, CoreError> {
    let sqrt_price_limit = match sqrt_price_limit {
        0 if a_to_b => MIN_SQRT_PRICE,
        0 => MAX_SQRT_PRICE,
        limit => limit,
    };

    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price_limit) {
        return Err(CoreError::SqrtPriceLimitOutOfBounds);
    }
    if (a_to_b && sqrt_price_limit >= whirlpool.sqrt_price)
        || (!a_to_b && sqrt_price_limit <= whirlpool.sqrt_price)
    {
        return Err(CoreError::InvalidSqrtPriceLimitDirection);
    }
    if token_amount == 0 {
        return Err(CoreError::ZeroTradableAmount);
    }

    let mut amount_remaining = token_amount;
    let mut amount_calculated = 0u64;
    let mut current_sqrt_price = whirlpool.sqrt_price;
    let mut current_tick_index = whirlpool.tick_current_index;
    let mut current_liquidity = whirlpool.liquidity;
    let mut trade_fee = 0u64;
    let mut steps = 0u32;

    while amount_remaining > 0 && current_sqrt_price != sqrt_price_limit {
        let (next_tick, next_tick_index) = if a_to_b {
            tick_sequence.prev_initialized_tick(current_tick_index)?
        } else {
            tick_sequence.next_initialized_tick(current_tick_index)?
        };
        let next_tick_sqrt_price = tick_index_to_sqrt_price(next_tick_index)?;
        let target_sqrt_price = if a_to_b {
            next_tick_sqrt_price.max(sqrt_price_limit)
        } else {
            next_tick_sqrt_price.min(sqrt_price_limit)
        };

        let step = compute_swap_step(
            amount_remaining,
            whirlpool.fee_rate,
            current_liquidity,
            current_sqrt_price,
            target_sqrt_price,
            a_to_b,
            specified_input,
        )?;

        trade_fee = trade_fee.checked_add(step.fee_amount).ok_or(CoreError::ArithmeticOverflow)?;

        if specified_input {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_in)
                .and_then(|remaining| remaining.checked_sub(step.fee_amount))
                .ok_or(CoreError::ArithmeticOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_out)
                .ok_or(CoreError::ArithmeticOverflow)?;
        } else {
            amount_remaining = amount_remaining
                .checked_sub(step.amount_out)
                .ok_or(CoreError::ArithmeticOverflow)?;
            amount_calculated = amount_calculated
                .checked_add(step.amount_in)
                .and_then(|calculated| calculated.checked_add(step.fee_amount))
                .ok_or(CoreError::ArithmeticOverflow)?;
        }

        if step.next_sqrt_price == next_tick_sqrt_price {
            current_liquidity = next_liquidity(current_liquidity, next_tick, a_to_b);
            current_tick_index = if a_to_b { next_tick_index - 1 } else { next_tick_index };
        } else if step.next_sqrt_price != current_sqrt_price {
            current_tick_index = sqrt_price_to_tick_index(step.next_sqrt_price)?;
        }

        current_sqrt_price = step.next_sqrt_price;
        steps += 1;
    }

    let swapped_amount = token_amount - amount_remaining;
    let token_a = if a_to_b == specified_input { swapped_amount } else { amount_calculated };
    let token_b = if a_to_b == specified_input { amount_calculated } else { swapped_amount };

    debug!(
        "swap simulated: a_to_b={a_to_b} specified_input={specified_input} \
         token_a={token_a} token_b={token_b} fee={trade_fee} steps={steps}"
    );

    Ok(SwapResult {
        token_a,
        token_b,
        trade_fee,
        next_sqrt_price: current_sqrt_price,
        next_tick_index: current_tick_index,
    })
}

/// Swap quote with the input amount fixed, resolved by input mint.
///
/// # Arguments
///
/// * `token_in` - input amount to trade
/// * `input_token_mint` - mint of the input token; must be one of the
///   pool's two mints
/// * `slippage_tolerance` - haircut applied to the output estimate
/// * `tick_arrays` - the arrays a swap from the current tick may read,
///   in any order
///
/// # Errors
///
/// [`CoreError::InvalidTokenMint`] when the mint is not in the pool,
/// plus everything [`compute_swap`] reports.
pub fn swap_quote_by_input_token(
    token_in: u64,
    input_token_mint: Pubkey,
    slippage_tolerance: Percentage,
    whirlpool: &Whirlpool,
    tick_arrays: [Option<&TickArray>; MAX_SWAP_TICK_ARRAYS],
) -> Result<ExactInSwapQuote, CoreError> {
    let a_to_b = direction_for_input_mint(whirlpool, input_token_mint)?;
    let tick_sequence = TickArraySequence::new(tick_arrays, whirlpool.tick_spacing)?;
    let result = compute_swap(token_in, 0, whirlpool, &tick_sequence, a_to_b, true)?;

    let (token_in_swapped, token_est_out) =
        if a_to_b { (result.token_a, result.token_b) } else { (result.token_b, result.token_a) };
    let token_min_out = slippage_tolerance.adjust_down(token_est_out)?;
    let touched = tick_sequence
        .touched_start_indexes(whirlpool.tick_current_index, result.next_tick_index);

    Ok(ExactInSwapQuote {
        token_in: token_in_swapped,
        token_est_out,
        token_min_out,
        trade_fee: result.trade_fee,
        next_sqrt_price: result.next_sqrt_price,
        next_tick_index: result.next_tick_index,
        touched_tick_array_start_indexes: touched,
    })
}

/// Swap quote with the output amount fixed, resolved by output mint.
///
/// # Errors
///
/// [`CoreError::InvalidTokenMint`] when the mint is not in the pool,
/// plus everything [`compute_swap`] reports.
pub fn swap_quote_by_output_token(
    token_out: u64,
    output_token_mint: Pubkey,
    slippage_tolerance: Percentage,
    whirlpool: &Whirlpool,
    tick_arrays: [Option<&TickArray>; MAX_SWAP_TICK_ARRAYS],
) -> Result<ExactOutSwapQuote, CoreError> {
    let a_to_b = direction_for_output_mint(whirlpool, output_token_mint)?;
    let tick_sequence = TickArraySequence::new(tick_arrays, whirlpool.tick_spacing)?;
    let result = compute_swap(token_out, 0, whirlpool, &tick_sequence, a_to_b, false)?;

    let (token_out_swapped, token_est_in) =
        if a_to_b { (result.token_b, result.token_a) } else { (result.token_a, result.token_b) };
    let token_max_in = slippage_tolerance.adjust_up(token_est_in)?;
    let touched = tick_sequence
        .touched_start_indexes(whirlpool.tick_current_index, result.next_tick_index);

    Ok(ExactOutSwapQuote {
        token_out: token_out_swapped,
        token_est_in,
        token_max_in,
        trade_fee: result.trade_fee,
        next_sqrt_price: result.next_sqrt_price,
        next_tick_index: result.next_tick_index,
        touched_tick_array_start_indexes: touched,
    })
}

fn direction_for_input_mint(whirlpool: &Whirlpool, mint: Pubkey) -> Result<bool, CoreError> {
    if mint == whirlpool.token_mint_a {
        Ok(true)
    } else if mint == whirlpool.token_mint_b {
        Ok(false)
    } else {
        Err(CoreError::InvalidTokenMint)
    }
}

fn direction_for_output_mint(whirlpool: &Whirlpool, mint: Pubkey) -> Result<bool, CoreError> {
    if mint == whirlpool.token_mint_b {
        Ok(true)
    } else if mint == whirlpool.token_mint_a {
        Ok(false)
    } else {
        Err(CoreError::InvalidTokenMint)
    }
}

/// Liquidity after crossing a tick. An uninitialized boundary carries no
/// net change.
fn next_liquidity(current_liquidity: u128, next_tick: Option<&Tick>, a_to_b: bool) -> u128 {
    let liquidity_net = next_tick.map(|tick| tick.liquidity_net).unwrap_or(0);
    let liquidity_net_unsigned = liquidity_net.unsigned_abs();
    if a_to_b {
        if liquidity_net < 0 {
            current_liquidity + liquidity_net_unsigned
        } else {
            current_liquidity - liquidity_net_unsigned
        }
    } else if liquidity_net < 0 {
        current_liquidity - liquidity_net_unsigned
    } else {
        current_liquidity + liquidity_net_unsigned
    }
}
