//! Fees owed to a position, from growth-accounting checkpoints.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::math::big_num::U256;
use crate::math::fixed_point_64;
use crate::state::position::Position;
use crate::state::tick::Tick;
use crate::state::whirlpool::Whirlpool;

/// Collectable swap fees per token.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectFeesQuote {
    pub fee_owed_a: u64,
    pub fee_owed_b: u64,
}

/// Fees owed to a position given current pool growth accumulators.
///
/// Growth values are monotone counters stored mod 2^128, so every
/// subtraction here wraps on purpose; a seemingly "negative" difference
/// is the counter having rolled over, not an error.
///
/// # Arguments
///
/// * `tick_lower` / `tick_upper` - snapshots of the position's boundary
///   ticks
///
/// # Errors
///
/// * [`CoreError::InvalidTickRange`] - position bounds not strictly
///   ordered
/// * [`CoreError::AmountExceedsMaxU64`] - owed delta wider than u64
/// * [`CoreError::ArithmeticOverflow`] - stored owed plus delta wider
///   than u64
pub fn collect_fees_quote(
    whirlpool: &Whirlpool,
    position: &Position,
    tick_lower: &Tick,
    tick_upper: &Tick,
) -> Result<CollectFeesQuote, CoreError> {
    if position.tick_lower_index >= position.tick_upper_index {
        return Err(CoreError::InvalidTickRange);
    }

    let fee_growth_inside_a = fee_growth_inside(
        whirlpool.fee_growth_global_a,
        tick_lower.fee_growth_outside_a,
        tick_upper.fee_growth_outside_a,
        whirlpool.tick_current_index,
        position.tick_lower_index,
        position.tick_upper_index,
    );
    let fee_growth_inside_b = fee_growth_inside(
        whirlpool.fee_growth_global_b,
        tick_lower.fee_growth_outside_b,
        tick_upper.fee_growth_outside_b,
        whirlpool.tick_current_index,
        position.tick_lower_index,
        position.tick_upper_index,
    );

    let delta_a = owed_delta(
        fee_growth_inside_a.wrapping_sub(position.fee_growth_checkpoint_a),
        position.liquidity,
    )?;
    let delta_b = owed_delta(
        fee_growth_inside_b.wrapping_sub(position.fee_growth_checkpoint_b),
        position.liquidity,
    )?;

    Ok(CollectFeesQuote {
        fee_owed_a: position
            .fee_owed_a
            .checked_add(delta_a)
            .ok_or(CoreError::ArithmeticOverflow)?,
        fee_owed_b: position
            .fee_owed_b
            .checked_add(delta_b)
            .ok_or(CoreError::ArithmeticOverflow)?,
    })
}

/// Growth accumulated strictly inside the position's bounds. Which side
/// of each boundary checkpoint counts depends on where the current tick
/// sits.
fn fee_growth_inside(
    growth_global: u128,
    lower_outside: u128,
    upper_outside: u128,
    tick_current_index: i32,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> u128 {
    let growth_below = if tick_current_index < tick_lower_index {
        growth_global.wrapping_sub(lower_outside)
    } else {
        lower_outside
    };
    let growth_above = if tick_current_index < tick_upper_index {
        upper_outside
    } else {
        growth_global.wrapping_sub(upper_outside)
    };
    growth_global.wrapping_sub(growth_below).wrapping_sub(growth_above)
}

/// `growth_delta * liquidity >> 64`, narrowed to a token amount.
fn owed_delta(growth_delta: u128, liquidity: u128) -> Result<u64, CoreError> {
    let product = U256::from(growth_delta) * U256::from(liquidity);
    (product >> fixed_point_64::RESOLUTION)
        .checked_as_u64()
        .ok_or(CoreError::AmountExceedsMaxU64)
}
