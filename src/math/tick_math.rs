//! Tick index to sqrt price conversion and back.
//!
//! Prices are Q64.64 square roots of the B/A price; ticks step the price
//! by a factor of 1.0001. Both directions reproduce the on-chain
//! program's arithmetic exactly, including the tie-break between the low
//! and high tick candidates in the logarithm path.

use crate::error::CoreError;
use crate::math::big_num::U256;

/// Lowest representable tick index.
pub const MIN_TICK_INDEX: i32 = -443636;
/// Highest representable tick index.
pub const MAX_TICK_INDEX: i32 = 443636;

/// Sqrt price at `MIN_TICK_INDEX`.
pub const MIN_SQRT_PRICE: u128 = 4295048016;
/// Sqrt price at `MAX_TICK_INDEX`.
pub const MAX_SQRT_PRICE: u128 = 79226673515401279992447579055;

/// Iterations of the fractional log2 refinement.
pub const BIT_PRECISION: u32 = 14;

// log_2(1.0001) / 2 reciprocal in X32, and the asymmetric error margins
// the candidate ticks are widened by (2^-precision / log_2(b) + 0.01).
const LOG_B_2_X32: i128 = 59543866431248;
const LOG_B_P_ERR_MARGIN_LOWER_X64: i128 = 184467440737095516;
const LOG_B_P_ERR_MARGIN_UPPER_X64: i128 = 15793534762490258745;

/// Derives the sqrt price for a tick index.
///
/// # Arguments
/// * `tick_index` - tick in `[MIN_TICK_INDEX, MAX_TICK_INDEX]`
///
/// # Returns
/// The Q64.64 sqrt price, or `TickIndexOutOfBounds`.
pub fn tick_index_to_sqrt_price(tick_index: i32) -> Result<u128, CoreError> {
    if !(MIN_TICK_INDEX..=MAX_TICK_INDEX).contains(&tick_index) {
        return Err(CoreError::TickIndexOutOfBounds);
    }
    if tick_index >= 0 {
        Ok(get_sqrt_price_positive_tick(tick_index))
    } else {
        Ok(get_sqrt_price_negative_tick(tick_index))
    }
}

/// Derives the tick index whose price quantizes the given sqrt price
/// (the largest tick whose sqrt price is <= the input).
///
/// # Arguments
/// * `sqrt_price` - Q64.64 value in `[MIN_SQRT_PRICE, MAX_SQRT_PRICE]`
///
/// # Returns
/// The tick index, or `SqrtPriceOutOfBounds`.
pub fn sqrt_price_to_tick_index(sqrt_price: u128) -> Result<i32, CoreError> {
    if !(MIN_SQRT_PRICE..=MAX_SQRT_PRICE).contains(&sqrt_price) {
        return Err(CoreError::SqrtPriceOutOfBounds);
    }

    // Integer portion of log2(price) from the most significant bit.
    let msb: u32 = 128 - sqrt_price.leading_zeros() - 1;
    let log2p_integer_x32 = (msb as i128 - 64) << 32;

    // Fractional portion by repeated squaring of r in [1, 2), one result
    // bit per iteration.
    let mut bit: i128 = 0x8000_0000_0000_0000i128;
    let mut precision = 0;
    let mut log2p_fraction_x64: i128 = 0;

    let mut r = if msb >= 64 { sqrt_price >> (msb - 63) } else { sqrt_price << (63 - msb) };

    while bit > 0 && precision < BIT_PRECISION {
        r *= r;
        let is_r_more_than_two = r >> 127;
        r >>= 63 + is_r_more_than_two;
        log2p_fraction_x64 += bit * is_r_more_than_two as i128;
        bit >>= 1;
        precision += 1;
    }

    let log2p_fraction_x32 = log2p_fraction_x64 >> 32;
    let log2p_x32 = log2p_integer_x32 + log2p_fraction_x32;

    // Change of base to 1.0001.
    let logbp_x64 = log2p_x32 * LOG_B_2_X32;

    let tick_low = ((logbp_x64 - LOG_B_P_ERR_MARGIN_LOWER_X64) >> 64) as i32;
    let tick_high = ((logbp_x64 + LOG_B_P_ERR_MARGIN_UPPER_X64) >> 64) as i32;

    if tick_low == tick_high {
        return Ok(tick_low);
    }

    // The candidates straddle a boundary. The high candidate wins only if
    // its own sqrt price does not exceed the input; this decides which
    // side of the boundary the input resolves to and must not change.
    let actual_tick_high_sqrt_price = tick_index_to_sqrt_price(tick_high)?;
    if actual_tick_high_sqrt_price <= sqrt_price { Ok(tick_high) } else { Ok(tick_low) }
}

fn get_sqrt_price_positive_tick(tick: i32) -> u128 {
    let mut ratio: u128 = if tick & 1 != 0 {
        79232123823359799118286999567
    } else {
        79228162514264337593543950336
    };

    if tick & 2 != 0 {
        ratio = mul_shift_96(ratio, 79236085330515764027303304731);
    }
    if tick & 4 != 0 {
        ratio = mul_shift_96(ratio, 79244008939048815603706035061);
    }
    if tick & 8 != 0 {
        ratio = mul_shift_96(ratio, 79259858533276714757314932305);
    }
    if tick & 16 != 0 {
        ratio = mul_shift_96(ratio, 79291567232598584799939703904);
    }
    if tick & 32 != 0 {
        ratio = mul_shift_96(ratio, 79355022692464371645785046466);
    }
    if tick & 64 != 0 {
        ratio = mul_shift_96(ratio, 79482085999252804386437311141);
    }
    if tick & 128 != 0 {
        ratio = mul_shift_96(ratio, 79736823300114093921829183326);
    }
    if tick & 256 != 0 {
        ratio = mul_shift_96(ratio, 80248749790819932309965073892);
    }
    if tick & 512 != 0 {
        ratio = mul_shift_96(ratio, 81282483887344747381513967011);
    }
    if tick & 1024 != 0 {
        ratio = mul_shift_96(ratio, 83390072131320151908154831281);
    }
    if tick & 2048 != 0 {
        ratio = mul_shift_96(ratio, 87770609709833776024991924138);
    }
    if tick & 4096 != 0 {
        ratio = mul_shift_96(ratio, 97234110755111693312479820773);
    }
    if tick & 8192 != 0 {
        ratio = mul_shift_96(ratio, 119332217159966728226237229890);
    }
    if tick & 16384 != 0 {
        ratio = mul_shift_96(ratio, 179736315981702064433883588727);
    }
    if tick & 32768 != 0 {
        ratio = mul_shift_96(ratio, 407748233172238350107850275304);
    }
    if tick & 65536 != 0 {
        ratio = mul_shift_96(ratio, 2098478828474011932436660412517);
    }
    if tick & 131072 != 0 {
        ratio = mul_shift_96(ratio, 55581415166113811149459800483533);
    }
    if tick & 262144 != 0 {
        ratio = mul_shift_96(ratio, 38992368544603139932233054999993551);
    }

    // The running ratio is X96; drop to X64.
    ratio >> 32
}

fn get_sqrt_price_negative_tick(tick: i32) -> u128 {
    let abs_tick = tick.abs();

    let mut ratio: u128 =
        if abs_tick & 1 != 0 { 18445821805675392311 } else { 18446744073709551616 };

    // ratio <= 2^64 and every constant < 2^64, so the products below
    // stay inside u128.
    if abs_tick & 2 != 0 {
        ratio = (ratio * 18444899583751176498) >> 64;
    }
    if abs_tick & 4 != 0 {
        ratio = (ratio * 18443055278223354162) >> 64;
    }
    if abs_tick & 8 != 0 {
        ratio = (ratio * 18439367220385604838) >> 64;
    }
    if abs_tick & 16 != 0 {
        ratio = (ratio * 18431993317065449817) >> 64;
    }
    if abs_tick & 32 != 0 {
        ratio = (ratio * 18417254355718160513) >> 64;
    }
    if abs_tick & 64 != 0 {
        ratio = (ratio * 18387811781193591352) >> 64;
    }
    if abs_tick & 128 != 0 {
        ratio = (ratio * 18329067761203520168) >> 64;
    }
    if abs_tick & 256 != 0 {
        ratio = (ratio * 18212142134806087854) >> 64;
    }
    if abs_tick & 512 != 0 {
        ratio = (ratio * 17980523815641551639) >> 64;
    }
    if abs_tick & 1024 != 0 {
        ratio = (ratio * 17526086738831147013) >> 64;
    }
    if abs_tick & 2048 != 0 {
        ratio = (ratio * 16651378430235024244) >> 64;
    }
    if abs_tick & 4096 != 0 {
        ratio = (ratio * 15030750278693429944) >> 64;
    }
    if abs_tick & 8192 != 0 {
        ratio = (ratio * 12247334978882834399) >> 64;
    }
    if abs_tick & 16384 != 0 {
        ratio = (ratio * 8131365268884726200) >> 64;
    }
    if abs_tick & 32768 != 0 {
        ratio = (ratio * 3584323654723342297) >> 64;
    }
    if abs_tick & 65536 != 0 {
        ratio = (ratio * 696457651847595233) >> 64;
    }
    if abs_tick & 131072 != 0 {
        ratio = (ratio * 26294789957452057) >> 64;
    }
    if abs_tick & 262144 != 0 {
        ratio = (ratio * 37481735321082) >> 64;
    }

    ratio
}

fn mul_shift_96(n0: u128, n1: u128) -> u128 {
    // X96 ratios for in-range ticks never exceed MAX_SQRT_PRICE << 32,
    // which fits u128.
    ((U256::from(n0) * U256::from(n1)) >> 96).low_u128()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tick_zero_is_unit_price() {
        assert_eq!(tick_index_to_sqrt_price(0).unwrap(), 1u128 << 64);
        assert_eq!(sqrt_price_to_tick_index(1u128 << 64).unwrap(), 0);
    }

    #[test]
    fn bounds_map_to_contract_constants() {
        assert_eq!(tick_index_to_sqrt_price(MIN_TICK_INDEX).unwrap(), MIN_SQRT_PRICE);
        assert_eq!(tick_index_to_sqrt_price(MAX_TICK_INDEX).unwrap(), MAX_SQRT_PRICE);
        assert_eq!(sqrt_price_to_tick_index(MIN_SQRT_PRICE).unwrap(), MIN_TICK_INDEX);
        assert_eq!(sqrt_price_to_tick_index(MAX_SQRT_PRICE).unwrap(), MAX_TICK_INDEX);
    }

    #[test]
    fn known_single_tick_prices() {
        assert_eq!(tick_index_to_sqrt_price(1).unwrap(), 18447666387855959850);
        assert_eq!(tick_index_to_sqrt_price(-1).unwrap(), 18445821805675392311);
    }

    #[test]
    fn out_of_bounds_inputs_rejected() {
        assert_eq!(
            tick_index_to_sqrt_price(MAX_TICK_INDEX + 1),
            Err(CoreError::TickIndexOutOfBounds)
        );
        assert_eq!(
            tick_index_to_sqrt_price(MIN_TICK_INDEX - 1),
            Err(CoreError::TickIndexOutOfBounds)
        );
        assert_eq!(
            sqrt_price_to_tick_index(MAX_SQRT_PRICE + 1),
            Err(CoreError::SqrtPriceOutOfBounds)
        );
        assert_eq!(
            sqrt_price_to_tick_index(MIN_SQRT_PRICE - 1),
            Err(CoreError::SqrtPriceOutOfBounds)
        );
    }

    #[test]
    fn round_trip_identity_across_range() {
        let mut tick = MIN_TICK_INDEX;
        while tick <= MAX_TICK_INDEX {
            let sqrt_price = tick_index_to_sqrt_price(tick).unwrap();
            assert_eq!(sqrt_price_to_tick_index(sqrt_price).unwrap(), tick, "tick {tick}");
            tick += 7919;
        }
        for tick in [MIN_TICK_INDEX, -443_635, -39, -1, 1, 39, 443_635, MAX_TICK_INDEX] {
            let sqrt_price = tick_index_to_sqrt_price(tick).unwrap();
            assert_eq!(sqrt_price_to_tick_index(sqrt_price).unwrap(), tick, "tick {tick}");
        }
    }

    #[test]
    fn quantization_never_exceeds_input() {
        let mut tick = MIN_TICK_INDEX;
        while tick < MAX_TICK_INDEX {
            let base = tick_index_to_sqrt_price(tick).unwrap();
            for offset in [0u128, 1, 1_000, 1_000_000] {
                let p = base + offset;
                if p > MAX_SQRT_PRICE {
                    break;
                }
                let t = sqrt_price_to_tick_index(p).unwrap();
                assert!(tick_index_to_sqrt_price(t).unwrap() <= p, "price {p}");
            }
            tick += 15013;
        }
    }

    #[test]
    fn prices_strictly_increase_with_tick() {
        let mut tick = MIN_TICK_INDEX;
        let mut prev = tick_index_to_sqrt_price(tick).unwrap();
        while tick < MAX_TICK_INDEX {
            tick = (tick + 10_007).min(MAX_TICK_INDEX);
            let next = tick_index_to_sqrt_price(tick).unwrap();
            assert!(next > prev, "tick {tick}");
            prev = next;
        }
    }
}
