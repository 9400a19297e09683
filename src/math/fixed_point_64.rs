//! Q64.64 fixed-point scale.

/// One in Q64.64 (2^64).
pub const Q64: u128 = (u64::MAX as u128) + 1;

/// Number of fractional bits.
pub const RESOLUTION: u8 = 64;
