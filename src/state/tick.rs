//! Tick and tick-array snapshots plus tick-array addressing.

use serde::{Deserialize, Serialize};

use crate::constants::pool::{MAX_SWAP_TICK_ARRAYS, NUM_REWARDS, TICK_ARRAY_SIZE};

/// One tick's crossing state, decoded from a tick array account.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tick {
    /// Net liquidity change applied when the price crosses the tick
    /// moving left to right.
    pub liquidity_net: i128,
    /// Total liquidity referencing the tick; nonzero means initialized.
    pub liquidity_gross: u128,
    pub fee_growth_outside_a: u128,
    pub fee_growth_outside_b: u128,
    pub reward_growths_outside: [u128; NUM_REWARDS],
}

impl Tick {
    /// Only initialized ticks take part in crossings and growth math.
    pub fn is_initialized(&self) -> bool {
        self.liquidity_gross != 0
    }
}

/// A block of [`TICK_ARRAY_SIZE`] potential ticks, spaced by the pool's
/// tick spacing, starting at `start_tick_index`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TickArray {
    pub start_tick_index: i32,
    pub ticks: [Tick; TICK_ARRAY_SIZE],
}

impl TickArray {
    /// An array of uninitialized ticks starting at `start_tick_index`.
    pub fn new_empty(start_tick_index: i32) -> Self {
        Self { start_tick_index, ticks: [Tick::default(); TICK_ARRAY_SIZE] }
    }

    /// Whether `tick_index` falls inside this array's covered span.
    pub fn contains_tick(&self, tick_index: i32, tick_spacing: u16) -> bool {
        let span = tick_array_span(tick_spacing);
        tick_index >= self.start_tick_index && tick_index < self.start_tick_index + span
    }

    /// The tick at `tick_index`, or `None` when the index is outside the
    /// array or not aligned to the spacing.
    pub fn tick(&self, tick_index: i32, tick_spacing: u16) -> Option<&Tick> {
        if !self.contains_tick(tick_index, tick_spacing) {
            return None;
        }
        let offset = tick_index - self.start_tick_index;
        if offset % i32::from(tick_spacing) != 0 {
            return None;
        }
        self.ticks.get((offset / i32::from(tick_spacing)) as usize)
    }
}

/// Number of tick indexes covered by one tick array.
pub fn tick_array_span(tick_spacing: u16) -> i32 {
    TICK_ARRAY_SIZE as i32 * i32::from(tick_spacing)
}

/// Start index of the tick array containing `tick_index`.
pub fn tick_array_start_tick_index(tick_index: i32, tick_spacing: u16) -> i32 {
    let span = tick_array_span(tick_spacing);
    tick_index.div_euclid(span) * span
}

/// Ordered start indexes of the arrays a swap from `tick_current_index`
/// may traverse, nearest first.
pub fn swap_tick_array_start_indices(
    tick_current_index: i32,
    tick_spacing: u16,
    a_to_b: bool,
) -> [i32; MAX_SWAP_TICK_ARRAYS] {
    let span = tick_array_span(tick_spacing);
    // B to A reads strictly above the current tick, so a pool sitting at
    // the very end of an array starts in the next one.
    let anchor = if a_to_b { tick_current_index } else { tick_current_index + i32::from(tick_spacing) };
    let first = tick_array_start_tick_index(anchor, tick_spacing);
    let step = if a_to_b { -span } else { span };
    [first, first + step, first + 2 * step]
}

/// Whether `tick_index` can be initialized under `tick_spacing`.
pub fn is_tick_initializable(tick_index: i32, tick_spacing: u16) -> bool {
    tick_index % i32::from(tick_spacing) == 0
}

/// Snaps a tick to its initializable neighbor, truncating toward zero.
pub fn get_initializable_tick_index(tick_index: i32, tick_spacing: u16) -> i32 {
    let spacing = i32::from(tick_spacing);
    tick_index / spacing * spacing
}
