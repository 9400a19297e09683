//! Protocol constants shared with the on-chain program.
//!
//! These values are part of the program's validation contract and must
//! match it exactly.

/// Denominator for the pool fee rate (fee rates are parts-per-million).
pub const FEE_RATE_DENOMINATOR: u32 = 1_000_000;

/// Denominator for the protocol's share of the fee (basis points of the
/// collected fee).
pub const PROTOCOL_FEE_RATE_DENOMINATOR: u32 = 10_000;

/// Number of reward slots on a pool.
pub const NUM_REWARDS: usize = 3;

/// Ticks stored per tick array account.
pub const TICK_ARRAY_SIZE: usize = 88;

/// Most tick arrays a single swap may traverse.
pub const MAX_SWAP_TICK_ARRAYS: usize = 3;
