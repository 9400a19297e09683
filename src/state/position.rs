//! Position account snapshot and range classification.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::pool::NUM_REWARDS;
use crate::error::CoreError;

/// Decoded position state for liquidity, fee, and reward quotes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Position {
    pub whirlpool: Pubkey,
    pub position_mint: Pubkey,
    pub liquidity: u128,
    pub tick_lower_index: i32,
    pub tick_upper_index: i32,
    /// Fee growth of token A inside the range at the last on-chain update.
    pub fee_growth_checkpoint_a: u128,
    pub fee_owed_a: u64,
    pub fee_growth_checkpoint_b: u128,
    pub fee_owed_b: u64,
    pub reward_infos: [PositionRewardInfo; NUM_REWARDS],
}

/// One reward slot of a position.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PositionRewardInfo {
    pub growth_inside_checkpoint: u128,
    pub amount_owed: u64,
}

/// Where the pool's current tick sits relative to a position's range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PositionStatus {
    BelowRange,
    InRange,
    AboveRange,
}

/// Classifies the current tick against `[tick_lower_index, tick_upper_index)`.
///
/// # Errors
///
/// [`CoreError::InvalidTickRange`] when the bounds are not strictly ordered.
pub fn position_status(
    tick_current_index: i32,
    tick_lower_index: i32,
    tick_upper_index: i32,
) -> Result<PositionStatus, CoreError> {
    if tick_lower_index >= tick_upper_index {
        return Err(CoreError::InvalidTickRange);
    }
    if tick_current_index < tick_lower_index {
        Ok(PositionStatus::BelowRange)
    } else if tick_current_index < tick_upper_index {
        Ok(PositionStatus::InRange)
    } else {
        Ok(PositionStatus::AboveRange)
    }
}
