pub mod constants;
pub mod error;
pub mod math;
pub mod quote;
pub mod state;
pub mod utils;

pub use crate::error::CoreError;
pub use crate::math::percentage::Percentage;
pub use crate::math::tick_math::{
    sqrt_price_to_tick_index, tick_index_to_sqrt_price, MAX_SQRT_PRICE, MAX_TICK_INDEX,
    MIN_SQRT_PRICE, MIN_TICK_INDEX,
};
pub use crate::quote::fees::{collect_fees_quote, CollectFeesQuote};
pub use crate::quote::liquidity::{
    decrease_liquidity_quote, decrease_liquidity_quote_by_input_token, increase_liquidity_quote,
    increase_liquidity_quote_by_input_token, DecreaseLiquidityQuote, IncreaseLiquidityQuote,
};
pub use crate::quote::rewards::{collect_rewards_quote, CollectRewardsQuote};
pub use crate::quote::swap::{
    compute_swap, swap_quote_by_input_token, swap_quote_by_output_token, ExactInSwapQuote,
    ExactOutSwapQuote, SwapResult,
};
pub use crate::quote::tick_array_sequence::TickArraySequence;
pub use crate::state::position::{position_status, Position, PositionRewardInfo, PositionStatus};
pub use crate::state::tick::{
    get_initializable_tick_index, swap_tick_array_start_indices, Tick, TickArray,
};
pub use crate::state::whirlpool::{Whirlpool, WhirlpoolRewardInfo};
pub use crate::utils::pda::{
    get_oracle_address, get_position_address, get_tick_array_address, get_whirlpool_address,
};
pub use crate::utils::price::{
    price_to_initializable_tick_index, price_to_sqrt_price, price_to_tick_index,
    sqrt_price_to_price, tick_index_to_price,
};
