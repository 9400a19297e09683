//! Whirlpool account snapshot.

use serde::{Deserialize, Serialize};
use solana_sdk::pubkey::Pubkey;

use crate::constants::pool::NUM_REWARDS;

/// Decoded whirlpool state, the pricing inputs of every quote.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Whirlpool {
    pub token_mint_a: Pubkey,
    pub token_mint_b: Pubkey,
    /// Gap between initializable ticks; fixed per pool.
    pub tick_spacing: u16,
    /// Total swap fee in hundredths of a basis point.
    pub fee_rate: u16,
    /// Portion of the swap fee taken by the protocol, in basis points
    /// of the fee itself.
    pub protocol_fee_rate: u16,
    /// Liquidity active at the current price.
    pub liquidity: u128,
    /// Current price as a Q64.64 square root.
    pub sqrt_price: u128,
    pub tick_current_index: i32,
    pub fee_growth_global_a: u128,
    pub fee_growth_global_b: u128,
    pub reward_last_updated_timestamp: u64,
    pub reward_infos: [WhirlpoolRewardInfo; NUM_REWARDS],
}

/// One reward slot of a whirlpool.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WhirlpoolRewardInfo {
    pub mint: Pubkey,
    /// Tokens emitted per second across the whole pool, as Q64.64.
    pub emissions_per_second_x64: u128,
    pub growth_global_x64: u128,
}

impl WhirlpoolRewardInfo {
    /// A reward slot is live once its mint is set.
    pub fn initialized(&self) -> bool {
        self.mint != Pubkey::default()
    }
}
