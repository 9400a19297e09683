//! Program accounts and PDA seeds for the Whirlpool program.

use solana_sdk::pubkey;

pub use solana_sdk::pubkey::Pubkey;

/// Whirlpool program (mainnet deployment).
pub const WHIRLPOOL_PROGRAM: Pubkey = pubkey!("whirLbMiicVdio4qvUfM5KAg6Ct8VwpYzGff3uctyCc");

/// Seeds for PDA derivation.
pub mod seeds {
    pub const WHIRLPOOL_SEED: &[u8] = b"whirlpool";
    pub const POSITION_SEED: &[u8] = b"position";
    pub const TICK_ARRAY_SEED: &[u8] = b"tick_array";
    pub const ORACLE_SEED: &[u8] = b"oracle";
}
