pub mod fees;
pub mod liquidity;
pub mod rewards;
pub mod swap;
pub mod tick_array_sequence;

pub use fees::{collect_fees_quote, CollectFeesQuote};
pub use liquidity::{
    decrease_liquidity_quote, decrease_liquidity_quote_by_input_token, increase_liquidity_quote,
    increase_liquidity_quote_by_input_token, DecreaseLiquidityQuote, IncreaseLiquidityQuote,
};
pub use rewards::{collect_rewards_quote, CollectRewardsQuote};
pub use swap::{
    compute_swap, swap_quote_by_input_token, swap_quote_by_output_token, ExactInSwapQuote,
    ExactOutSwapQuote, SwapResult,
};
pub use tick_array_sequence::TickArraySequence;
