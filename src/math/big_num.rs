//! Fixed-width big integers for intermediate products.
//!
//! The widest product the engine forms is `u64 × u128 × u128`, which fits
//! 256 bits, so a single `U256` covers every intermediate.

use uint::construct_uint;

construct_uint! {
    /// 256-bit unsigned integer.
    pub struct U256(4);
}

impl U256 {
    /// Narrows to `u128`, or `None` when the value does not fit.
    pub fn checked_as_u128(self) -> Option<u128> {
        if self > U256::from(u128::MAX) { None } else { Some(self.low_u128()) }
    }

    /// Narrows to `u64`, or `None` when the value does not fit.
    pub fn checked_as_u64(self) -> Option<u64> {
        if self > U256::from(u64::MAX) { None } else { Some(self.low_u64()) }
    }
}
