//! Address derivation and price display helpers.

pub mod pda;
pub mod price;

pub use pda::{
    get_oracle_address, get_position_address, get_tick_array_address, get_whirlpool_address,
};
pub use price::{
    price_to_initializable_tick_index, price_to_sqrt_price, price_to_tick_index,
    sqrt_price_to_price, tick_index_to_price,
};
