pub mod position;
pub mod tick;
pub mod whirlpool;

pub use position::{position_status, Position, PositionRewardInfo, PositionStatus};
pub use tick::{
    get_initializable_tick_index, is_tick_initializable, swap_tick_array_start_indices,
    tick_array_span, tick_array_start_tick_index, Tick, TickArray,
};
pub use whirlpool::{Whirlpool, WhirlpoolRewardInfo};
