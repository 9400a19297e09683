//! End-to-end quote tests against hand-checked pool fixtures.
//!
//! Everything here goes through the crate root re-exports, the same
//! surface an SDK consumer sees.
//!
//! Run with:
//!     cargo test --test swap_quote_tests

use std::str::FromStr;

use solana_sdk::pubkey::Pubkey;
use whirlpool_quote_sdk::constants::MAX_SWAP_TICK_ARRAYS;
use whirlpool_quote_sdk::{
    collect_fees_quote, collect_rewards_quote, decrease_liquidity_quote, get_tick_array_address,
    increase_liquidity_quote, swap_quote_by_input_token, swap_quote_by_output_token,
    swap_tick_array_start_indices, tick_index_to_sqrt_price, DecreaseLiquidityQuote,
    ExactInSwapQuote, ExactOutSwapQuote, IncreaseLiquidityQuote, Percentage, Position,
    PositionRewardInfo, PositionStatus, Tick, TickArray, Whirlpool, WhirlpoolRewardInfo,
};

const Q64: u128 = 1u128 << 64;

fn mint_a() -> Pubkey {
    Pubkey::new_from_array([1u8; 32])
}

fn mint_b() -> Pubkey {
    Pubkey::new_from_array([2u8; 32])
}

fn test_pool(liquidity: u128) -> Whirlpool {
    Whirlpool {
        token_mint_a: mint_a(),
        token_mint_b: mint_b(),
        tick_spacing: 2,
        fee_rate: 3000,
        protocol_fee_rate: 1300,
        liquidity,
        sqrt_price: 1 << 64,
        tick_current_index: 0,
        fee_growth_global_a: 0,
        fee_growth_global_b: 0,
        reward_last_updated_timestamp: 0,
        reward_infos: Default::default(),
    }
}

/// Every tick initialized, adding 1000 liquidity toward tick zero from
/// either side.
fn uniform_array(start_tick_index: i32) -> TickArray {
    let mut array = TickArray::new_empty(start_tick_index);
    let liquidity_net = if start_tick_index < 0 { 1000 } else { -1000 };
    for tick in array.ticks.iter_mut() {
        *tick = Tick { liquidity_net, liquidity_gross: 1000, ..Default::default() };
    }
    array
}

fn quote_arrays(a_to_b: bool) -> [TickArray; MAX_SWAP_TICK_ARRAYS] {
    let starts = swap_tick_array_start_indices(0, 2, a_to_b);
    [
        uniform_array(starts[0]),
        uniform_array(starts[1]),
        uniform_array(starts[2]),
    ]
}

fn refs(arrays: &[TickArray; MAX_SWAP_TICK_ARRAYS]) -> [Option<&TickArray>; MAX_SWAP_TICK_ARRAYS] {
    [Some(&arrays[0]), Some(&arrays[1]), Some(&arrays[2])]
}

#[test]
fn sell_a_quote_end_to_end() {
    let whirlpool = test_pool(50_000_000);
    let arrays = quote_arrays(true);
    let quote = swap_quote_by_input_token(
        25_000,
        mint_a(),
        Percentage::from_basis_points(100),
        &whirlpool,
        refs(&arrays),
    )
    .unwrap();

    assert_eq!(quote.token_in, 25_000);
    assert_eq!(quote.token_est_out, 24_904);
    assert_eq!(quote.token_min_out, 24_654);
    assert_eq!(quote.trade_fee, 79);
    assert_eq!(quote.next_sqrt_price, 18437555056173552589);
    assert_eq!(quote.next_tick_index, -10);
    assert_eq!(quote.touched_tick_array_start_indexes, vec![0, -176]);
}

#[test]
fn buying_back_the_estimate_costs_the_original_input() {
    let whirlpool = test_pool(50_000_000);
    let arrays = quote_arrays(true);
    // ask for exactly the output the exact-in quote above estimated
    let quote = swap_quote_by_output_token(
        24_904,
        mint_b(),
        Percentage::from_basis_points(100),
        &whirlpool,
        refs(&arrays),
    )
    .unwrap();

    assert_eq!(quote.token_out, 24_904);
    assert_eq!(quote.token_est_in, 25_000);
    assert_eq!(quote.token_max_in, 25_250);
    assert_eq!(quote.trade_fee, 79);
    assert_eq!(quote.next_sqrt_price, 18437555272465809898);
    assert_eq!(quote.next_tick_index, -10);
    assert_eq!(quote.touched_tick_array_start_indexes, vec![0, -176]);
}

#[test]
fn sell_b_quote_end_to_end() {
    let whirlpool = test_pool(50_000_000);
    let arrays = quote_arrays(false);
    let quote = swap_quote_by_input_token(
        25_000,
        mint_b(),
        Percentage::from_basis_points(100),
        &whirlpool,
        refs(&arrays),
    )
    .unwrap();

    assert_eq!(quote.token_in, 25_000);
    assert_eq!(quote.token_est_out, 24_904);
    assert_eq!(quote.token_min_out, 24_654);
    assert_eq!(quote.trade_fee, 79);
    assert_eq!(quote.next_sqrt_price, 18455938076165513120);
    assert_eq!(quote.next_tick_index, 9);
    assert_eq!(quote.touched_tick_array_start_indexes, vec![0]);
}

#[test]
fn array_addresses_follow_the_swap_path() {
    let whirlpool = Pubkey::from_str("HJPjoWUrhoZzkNfRpHuieeFk9WcZWjwy6PBjZ81ngndJ").unwrap();
    let starts = swap_tick_array_start_indices(0, 64, true);
    assert_eq!(starts, [0, -5632, -11264]);

    let addresses: Vec<Pubkey> = starts
        .iter()
        .map(|start| get_tick_array_address(&whirlpool, *start).unwrap().0)
        .collect();
    assert_eq!(
        addresses[0],
        Pubkey::from_str("JCpxMSDRDPBMqjoX7LkhMwro2y6r85Q8E6p5zNdBZyWa").unwrap()
    );
    assert_eq!(
        addresses[1],
        Pubkey::from_str("9K1HWrGKZKfjTnKfF621BmEQdai4FcUz9tsoF41jwz5B").unwrap()
    );
    assert_ne!(addresses[1], addresses[2]);
}

#[test]
fn liquidity_quotes_round_against_the_user() {
    let mut whirlpool = test_pool(1_000_000_000);
    whirlpool.tick_current_index = 0;
    let slippage = Percentage::from_basis_points(100);

    let increase = increase_liquidity_quote(1_000_000, slippage, &whirlpool, -10, 10).unwrap();
    assert_eq!(increase.liquidity_delta, 1_000_000);
    assert_eq!((increase.token_est_a, increase.token_est_b), (500, 500));
    assert_eq!((increase.token_max_a, increase.token_max_b), (505, 505));

    let position = test_position(2_000_000, -10, 10);
    let decrease = decrease_liquidity_quote(1_000_000, slippage, &whirlpool, &position).unwrap();
    assert_eq!(decrease.liquidity_delta, 1_000_000);
    assert_eq!((decrease.token_est_a, decrease.token_est_b), (499, 499));
    assert_eq!((decrease.token_min_a, decrease.token_min_b), (494, 494));
}

fn test_position(liquidity: u128, lower: i32, upper: i32) -> Position {
    Position {
        whirlpool: Pubkey::new_from_array([7u8; 32]),
        position_mint: Pubkey::new_from_array([8u8; 32]),
        liquidity,
        tick_lower_index: lower,
        tick_upper_index: upper,
        fee_growth_checkpoint_a: 0,
        fee_owed_a: 0,
        fee_growth_checkpoint_b: 0,
        fee_owed_b: 0,
        reward_infos: [PositionRewardInfo::default(); 3],
    }
}

#[test]
fn fees_accrue_from_growth_deltas() {
    let mut whirlpool = test_pool(1_000_000);
    whirlpool.tick_spacing = 64;
    whirlpool.tick_current_index = 5;
    whirlpool.sqrt_price = tick_index_to_sqrt_price(5).unwrap();
    whirlpool.fee_growth_global_a = 500 * Q64;
    whirlpool.fee_growth_global_b = 80 * Q64;

    let mut position = test_position(4, 0, 64);
    position.fee_growth_checkpoint_a = 100 * Q64;
    position.fee_owed_a = 10;
    position.fee_growth_checkpoint_b = 30 * Q64;
    position.fee_owed_b = 2;

    let quote =
        collect_fees_quote(&whirlpool, &position, &Tick::default(), &Tick::default()).unwrap();
    assert_eq!(quote.fee_owed_a, 10 + 400 * 4);
    assert_eq!(quote.fee_owed_b, 2 + 50 * 4);
}

#[test]
fn rewards_roll_forward_with_time() {
    let mut whirlpool = test_pool(1000);
    whirlpool.tick_spacing = 64;
    whirlpool.tick_current_index = 5;
    whirlpool.sqrt_price = tick_index_to_sqrt_price(5).unwrap();
    whirlpool.reward_last_updated_timestamp = 500;
    whirlpool.reward_infos[0] = WhirlpoolRewardInfo {
        mint: Pubkey::new_from_array([5u8; 32]),
        emissions_per_second_x64: 10 * Q64,
        growth_global_x64: 2 * Q64,
    };

    let mut position = test_position(500, 0, 64);
    position.reward_infos[0] = PositionRewardInfo {
        growth_inside_checkpoint: 2 * Q64,
        amount_owed: 7,
    };

    // 100 seconds of emissions over 1000 pool liquidity adds one unit of
    // growth, which earns the 500-liquidity position 500 more tokens
    let quote = collect_rewards_quote(
        &whirlpool,
        &position,
        &Tick::default(),
        &Tick::default(),
        600,
    )
    .unwrap();
    assert_eq!(quote.rewards[0], Some(507));
    assert_eq!(quote.rewards[1], None);
    assert_eq!(quote.rewards[2], None);
}

#[test]
fn quote_json_field_names_are_stable() {
    let quote = ExactInSwapQuote {
        token_in: 1000,
        token_est_out: 996,
        token_min_out: 986,
        trade_fee: 3,
        next_sqrt_price: 123,
        next_tick_index: -1,
        touched_tick_array_start_indexes: vec![0, -176],
    };
    let value = serde_json::to_value(&quote).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        [
            "next_sqrt_price",
            "next_tick_index",
            "token_est_out",
            "token_in",
            "token_min_out",
            "touched_tick_array_start_indexes",
            "trade_fee",
        ]
    );
    let back: ExactInSwapQuote = serde_json::from_value(value).unwrap();
    assert_eq!(back, quote);

    let out_quote = ExactOutSwapQuote {
        token_out: 1000,
        token_est_in: 1005,
        token_max_in: 1016,
        trade_fee: 4,
        next_sqrt_price: 456,
        next_tick_index: 3,
        touched_tick_array_start_indexes: vec![0],
    };
    let value = serde_json::to_value(&out_quote).unwrap();
    assert_eq!(value["token_out"], 1000);
    assert_eq!(value["token_max_in"], 1016);

    let increase = IncreaseLiquidityQuote::default();
    let value = serde_json::to_value(&increase).unwrap();
    let mut keys: Vec<&str> = value.as_object().unwrap().keys().map(String::as_str).collect();
    keys.sort_unstable();
    assert_eq!(
        keys,
        ["liquidity_delta", "token_est_a", "token_est_b", "token_max_a", "token_max_b"]
    );

    let decrease = DecreaseLiquidityQuote::default();
    let value = serde_json::to_value(&decrease).unwrap();
    assert!(value.as_object().unwrap().contains_key("token_min_a"));

    assert_eq!(
        serde_json::to_value(PositionStatus::InRange).unwrap(),
        serde_json::json!("inrange")
    );
}
