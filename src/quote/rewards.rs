//! Rewards owed to a position, per emission slot.

use log::debug;
use serde::{Deserialize, Serialize};

use crate::constants::pool::NUM_REWARDS;
use crate::error::CoreError;
use crate::math::big_num::U256;
use crate::math::fixed_point_64;
use crate::state::position::Position;
use crate::state::tick::Tick;
use crate::state::whirlpool::Whirlpool;

/// Collectable rewards per slot; `None` marks an uninitialized slot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CollectRewardsQuote {
    pub rewards: [Option<u64>; NUM_REWARDS],
}

/// Rewards owed to a position, with emissions rolled forward to
/// `current_timestamp`.
///
/// The pool only writes reward growth when touched, so the quote first
/// advances each slot's global growth by `emissions * elapsed /
/// liquidity` and then applies the same wrapping inside-growth algebra
/// used for fees. Slots whose mint is unset are reported as `None`.
///
/// # Errors
///
/// * [`CoreError::InvalidTickRange`] - position bounds not strictly
///   ordered
/// * [`CoreError::InvalidTimestamp`] - `current_timestamp` precedes the
///   pool's last reward update
/// * [`CoreError::ArithmeticOverflow`] - emission catch-up or stored
///   owed plus delta overflows
/// * [`CoreError::AmountExceedsMaxU64`] - owed delta wider than u64
pub fn collect_rewards_quote(
    whirlpool: &Whirlpool,
    position: &Position,
    tick_lower: &Tick,
    tick_upper: &Tick,
    current_timestamp: u64,
) -> Result<CollectRewardsQuote, CoreError> {
    if position.tick_lower_index >= position.tick_upper_index {
        return Err(CoreError::InvalidTickRange);
    }
    if current_timestamp < whirlpool.reward_last_updated_timestamp {
        return Err(CoreError::InvalidTimestamp);
    }
    let timestamp_delta = current_timestamp - whirlpool.reward_last_updated_timestamp;

    let mut rewards = [None; NUM_REWARDS];
    for (slot, reward) in whirlpool.reward_infos.iter().enumerate() {
        if !reward.initialized() {
            continue;
        }

        let mut growth_global = reward.growth_global_x64;
        if whirlpool.liquidity == 0 {
            debug!("reward slot {slot}: pool liquidity is zero, emission catch-up skipped");
        } else {
            let growth_delta = reward
                .emissions_per_second_x64
                .checked_mul(u128::from(timestamp_delta))
                .ok_or(CoreError::ArithmeticOverflow)?
                / whirlpool.liquidity;
            growth_global = growth_global.wrapping_add(growth_delta);
        }

        let growth_below = if whirlpool.tick_current_index < position.tick_lower_index {
            growth_global.wrapping_sub(tick_lower.reward_growths_outside[slot])
        } else {
            tick_lower.reward_growths_outside[slot]
        };
        let growth_above = if whirlpool.tick_current_index < position.tick_upper_index {
            tick_upper.reward_growths_outside[slot]
        } else {
            growth_global.wrapping_sub(tick_upper.reward_growths_outside[slot])
        };
        let growth_inside =
            growth_global.wrapping_sub(growth_below).wrapping_sub(growth_above);

        let growth_delta =
            growth_inside.wrapping_sub(position.reward_infos[slot].growth_inside_checkpoint);
        let product = U256::from(growth_delta) * U256::from(position.liquidity);
        let amount_delta = (product >> fixed_point_64::RESOLUTION)
            .checked_as_u64()
            .ok_or(CoreError::AmountExceedsMaxU64)?;

        let amount_owed = position.reward_infos[slot]
            .amount_owed
            .checked_add(amount_delta)
            .ok_or(CoreError::ArithmeticOverflow)?;
        rewards[slot] = Some(amount_owed);
    }

    Ok(CollectRewardsQuote { rewards })
}
