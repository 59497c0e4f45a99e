//! Slot array and progress cursor of a single build phase.

use pebble_primitives::OneWayFunction;
use tracing::trace;

use crate::{errors::PebbleError, schedule::advances, types::Order};

/// The `k + 1` pebble slots of one engine together with its progress cursor.
///
/// Slot `k` starts out holding the seed `x_0` and every other slot is empty.
/// Build round `r` performs `advances(k, r)` evaluations. Each evaluation writes
/// the slot under the cursor. When the cursor's quota is used up, the cursor
/// first steps down one slot and restarts from the slot above it with a fresh
/// quota of `2^i`. Once the build phase is over, slot `i` holds `x_{n − 2^i}`
/// for `i ≥ 1` and slot 0 holds `x_{n−1}`.
///
/// The slots are owned by this value alone. Which slot is written, and when,
/// is a function of `(order, round)` only.
#[derive(Debug)]
pub struct Pebbles<B> {
    order: Order,
    slots: Vec<Option<B>>,
    cursor: usize,
    remaining: u64,
    round: u64,
}

impl<B: Clone> Pebbles<B> {
    #[must_use]
    pub fn new(order: Order, seed: B) -> Self {
        let k = order.get() as usize;
        let mut slots = vec![None; k + 1];
        slots[k] = Some(seed);
        Self { order, slots, cursor: k, remaining: 0, round: 0 }
    }

    /// Run the next build round and return how many evaluations it took.
    ///
    /// # Errors
    ///
    /// `PebbleError::Evaluation` if the one-way function fails. The slot array
    /// is then in an unspecified state and must be discarded.
    pub fn build_round<F>(&mut self, f: &F) -> Result<u32, PebbleError>
    where
        F: OneWayFunction<Block = B> + ?Sized,
    {
        if self.is_built() {
            return Err(PebbleError::Invariant("build round requested after the build phase"));
        }
        self.round += 1;
        let count = advances(self.order.get(), self.round)?;
        for _ in 0..count {
            self.advance(f)?;
        }
        trace!(
            order = self.order.get(),
            round = self.round,
            advances = count,
            cursor = self.cursor,
            "build round"
        );
        Ok(count)
    }

    fn advance<F>(&mut self, f: &F) -> Result<(), PebbleError>
    where
        F: OneWayFunction<Block = B> + ?Sized,
    {
        let source = if self.remaining == 0 {
            let Some(below) = self.cursor.checked_sub(1) else {
                return Err(PebbleError::Invariant("cursor moved below slot 0"));
            };
            self.cursor = below;
            self.remaining = 1u64 << below;
            below + 1
        } else {
            self.cursor
        };
        let input = self.slots[source]
            .as_ref()
            .ok_or(PebbleError::Invariant("advance from an empty slot"))?;
        let next = f.evaluate(input)?;
        self.slots[self.cursor] = Some(next);
        self.remaining -= 1;
        Ok(())
    }

    /// Split a finished slot array into the value for slot 0 and the seeds of
    /// the sub-engines, ordered by sub-engine order (slot `j + 1` seeds order `j`).
    ///
    /// # Errors
    ///
    /// `PebbleError::Invariant` if called before the build phase is complete.
    pub fn into_parts(self) -> Result<(B, Vec<B>), PebbleError> {
        if !self.is_built() {
            return Err(PebbleError::Invariant("slots released before the build phase ended"));
        }
        let mut slots = self.slots.into_iter();
        let top = slots
            .next()
            .flatten()
            .ok_or(PebbleError::Invariant("slot 0 empty after the build phase"))?;
        let seeds = slots
            .map(|slot| slot.ok_or(PebbleError::Invariant("pebble missing after the build phase")))
            .collect::<Result<Vec<_>, _>>()?;
        Ok((top, seeds))
    }
}

impl<B> Pebbles<B> {
    #[must_use]
    pub const fn order(&self) -> Order {
        self.order
    }

    /// Build rounds completed so far.
    #[must_use]
    pub const fn round(&self) -> u64 {
        self.round
    }

    #[must_use]
    pub const fn is_built(&self) -> bool {
        self.round >= self.order.build_rounds()
    }

    /// Index of the slot currently being advanced.
    #[must_use]
    pub const fn cursor(&self) -> usize {
        self.cursor
    }

    /// Evaluations left before the cursor moves down again.
    #[must_use]
    pub const fn remaining(&self) -> u64 {
        self.remaining
    }

    #[must_use]
    pub fn slot(&self, index: usize) -> Option<&B> {
        self.slots.get(index).and_then(Option::as_ref)
    }

    #[must_use]
    pub fn live_blocks(&self) -> usize {
        self.slots.iter().filter(|s| s.is_some()).count()
    }
}
