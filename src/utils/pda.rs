//! PDA derivation for Whirlpool program accounts.

use solana_sdk::pubkey::Pubkey;

use crate::constants::accounts::{seeds, WHIRLPOOL_PROGRAM};
use crate::error::CoreError;

/// Derives a pool's address from its config, mint pair, and tick spacing.
///
/// # Returns
/// The PDA and its bump seed.
pub fn get_whirlpool_address(
    whirlpools_config: &Pubkey,
    token_mint_a: &Pubkey,
    token_mint_b: &Pubkey,
    tick_spacing: u16,
) -> Result<(Pubkey, u8), CoreError> {
    Pubkey::try_find_program_address(
        &[
            seeds::WHIRLPOOL_SEED,
            whirlpools_config.as_ref(),
            token_mint_a.as_ref(),
            token_mint_b.as_ref(),
            &tick_spacing.to_le_bytes(),
        ],
        &WHIRLPOOL_PROGRAM,
    )
    .ok_or(CoreError::PdaDerivationFailed)
}

/// Derives a position's address from its mint.
pub fn get_position_address(position_mint: &Pubkey) -> Result<(Pubkey, u8), CoreError> {
    Pubkey::try_find_program_address(
        &[seeds::POSITION_SEED, position_mint.as_ref()],
        &WHIRLPOOL_PROGRAM,
    )
    .ok_or(CoreError::PdaDerivationFailed)
}

/// Derives a tick array's address. The start index is seeded as its
/// decimal string, sign included, exactly as the program expects.
pub fn get_tick_array_address(
    whirlpool: &Pubkey,
    start_tick_index: i32,
) -> Result<(Pubkey, u8), CoreError> {
    let start_tick_index = start_tick_index.to_string();
    Pubkey::try_find_program_address(
        &[seeds::TICK_ARRAY_SEED, whirlpool.as_ref(), start_tick_index.as_bytes()],
        &WHIRLPOOL_PROGRAM,
    )
    .ok_or(CoreError::PdaDerivationFailed)
}

/// Derives a pool's oracle account address.
pub fn get_oracle_address(whirlpool: &Pubkey) -> Result<(Pubkey, u8), CoreError> {
    Pubkey::try_find_program_address(&[seeds::ORACLE_SEED, whirlpool.as_ref()], &WHIRLPOOL_PROGRAM)
        .ok_or(CoreError::PdaDerivationFailed)
}
