//! Contiguous window over borrowed tick arrays for swap traversal.

use crate::constants::pool::MAX_SWAP_TICK_ARRAYS;
use crate::error::CoreError;
use crate::math::tick_math::{MAX_TICK_INDEX, MIN_TICK_INDEX};
use crate::state::tick::{tick_array_span, Tick, TickArray};

/// Up to three adjacent tick arrays, ordered by start index.
///
/// The sequence validates adjacency once at construction so the swap
/// loop can walk initialized ticks without re-checking coverage.
#[derive(Debug, Clone)]
pub struct TickArraySequence<'a> {
    arrays: [Option<&'a TickArray>; MAX_SWAP_TICK_ARRAYS],
    tick_spacing: u16,
    window_start: i32,
    window_end: i32,
}

impl<'a> TickArraySequence<'a> {
    /// Builds a sequence from the arrays a swap may traverse.
    ///
    /// # Errors
    ///
    /// [`CoreError::TickArraySequenceInvalid`] when no array is present,
    /// a start index is not a span multiple, or the present arrays are
    /// not adjacent.
    pub fn new(
        arrays: [Option<&'a TickArray>; MAX_SWAP_TICK_ARRAYS],
        tick_spacing: u16,
    ) -> Result<Self, CoreError> {
        if tick_spacing == 0 {
            return Err(CoreError::TickArraySequenceInvalid);
        }
        let span = tick_array_span(tick_spacing);
        let mut sorted = arrays;
        sorted.sort_unstable_by_key(|slot| slot.map(|a| a.start_tick_index).unwrap_or(i32::MAX));

        let starts: Vec<i32> = sorted.iter().flatten().map(|a| a.start_tick_index).collect();
        if starts.is_empty() {
            return Err(CoreError::TickArraySequenceInvalid);
        }
        for start in &starts {
            if start % span != 0 {
                return Err(CoreError::TickArraySequenceInvalid);
            }
        }
        for pair in starts.windows(2) {
            if pair[1] - pair[0] != span {
                return Err(CoreError::TickArraySequenceInvalid);
            }
        }

        let window_start = starts[0];
        let window_end = starts[starts.len() - 1] + span;
        Ok(Self { arrays: sorted, tick_spacing, window_start, window_end })
    }

    /// Lowest tick index covered by the sequence.
    pub fn start_tick_index(&self) -> i32 {
        self.window_start
    }

    /// One past the highest tick index covered.
    pub fn end_tick_index(&self) -> i32 {
        self.window_end
    }

    /// Whether the array at `array_index` (in window order) covers
    /// `tick_index`. Absent slots cover nothing.
    pub fn contains_tick(&self, array_index: usize, tick_index: i32) -> bool {
        match self.arrays.get(array_index).copied().flatten() {
            Some(array) => {
                tick_index >= array.start_tick_index
                    && tick_index < array.start_tick_index + self.span()
            }
            None => false,
        }
    }

    fn span(&self) -> i32 {
        tick_array_span(self.tick_spacing)
    }

    fn tick(&self, tick_index: i32) -> Result<&'a Tick, CoreError> {
        if tick_index < self.window_start || tick_index >= self.window_end {
            return Err(CoreError::TickArraySequenceInvalid);
        }
        let slot = ((tick_index - self.window_start) / self.span()) as usize;
        match self.arrays.get(slot).copied().flatten() {
            Some(array) => array
                .tick(tick_index, self.tick_spacing)
                .ok_or(CoreError::TickArraySequenceInvalid),
            None => Err(CoreError::TickArraySequenceInvalid),
        }
    }

    /// First initialized tick at or below `tick_index`, plus the index a
    /// downward swap stops at when the window holds none.
    ///
    /// # Errors
    ///
    /// [`CoreError::TickArraySequenceInvalid`] when `tick_index` is not
    /// covered by the window.
    pub fn prev_initialized_tick(
        &self,
        tick_index: i32,
    ) -> Result<(Option<&'a Tick>, i32), CoreError> {
        if tick_index < self.window_start || tick_index >= self.window_end {
            return Err(CoreError::TickArraySequenceInvalid);
        }
        let spacing = i32::from(self.tick_spacing);
        let mut candidate = tick_index.div_euclid(spacing) * spacing;
        while candidate >= self.window_start {
            let tick = self.tick(candidate)?;
            if tick.is_initialized() {
                return Ok((Some(tick), candidate));
            }
            candidate -= spacing;
        }
        Ok((None, self.window_start.max(MIN_TICK_INDEX)))
    }

    /// First initialized tick strictly above `tick_index`, plus the index
    /// an upward swap stops at when the window holds none.
    ///
    /// The query may sit one spacing below the window because upward
    /// array selection anchors at `tick_index + tick_spacing`.
    ///
    /// # Errors
    ///
    /// [`CoreError::TickArraySequenceInvalid`] when `tick_index` is not
    /// covered by the window.
    pub fn next_initialized_tick(
        &self,
        tick_index: i32,
    ) -> Result<(Option<&'a Tick>, i32), CoreError> {
        let spacing = i32::from(self.tick_spacing);
        if tick_index < self.window_start - spacing || tick_index >= self.window_end {
            return Err(CoreError::TickArraySequenceInvalid);
        }
        let mut candidate = tick_index.div_euclid(spacing) * spacing + spacing;
        while candidate < self.window_end {
            let tick = self.tick(candidate)?;
            if tick.is_initialized() {
                return Ok((Some(tick), candidate));
            }
            candidate += spacing;
        }
        Ok((None, self.window_end.min(MAX_TICK_INDEX)))
    }

    /// Start indexes of the arrays whose span intersects the traversed
    /// tick range, in traversal order.
    pub fn touched_start_indexes(&self, start_tick: i32, end_tick: i32) -> Vec<i32> {
        let span = self.span();
        let (lo, hi) = if start_tick <= end_tick {
            (start_tick, end_tick)
        } else {
            (end_tick, start_tick)
        };
        let mut touched: Vec<i32> = self
            .arrays
            .iter()
            .flatten()
            .map(|array| array.start_tick_index)
            .filter(|start| *start <= hi && start + span > lo)
            .collect();
        if start_tick > end_tick {
            touched.reverse();
        }
        touched
    }
}
