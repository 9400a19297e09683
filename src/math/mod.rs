pub mod big_num;
pub mod fixed_point_64;
pub mod full_math;
pub mod liquidity_math;
pub mod percentage;
pub mod sqrt_price_math;
pub mod swap_math;
pub mod tick_math;

pub use big_num::U256;
pub use percentage::Percentage;
pub use swap_math::SwapStepQuote;
