//! Flat pebbling engine.
//!
//! Produces exactly the rounds of [`PebbleEngine`](crate::engine::PebbleEngine)
//! without nesting engines inside engines. The recursive engine's tree is kept
//! as a list of the slot arrays still building, in pre-order. When a frame
//! finishes its build phase it is replaced in place by the frames of its
//! sub-engines (orders `0 .. j`), which start building in the next round.
//! Pre-order keeps the lowest-order tie-break of the recursive polling, and
//! the list never holds more than `max(k, 1)` frames.

use pebble_primitives::OneWayFunction;
use tracing::{debug, trace, warn};

use crate::{
    errors::{PebbleError, Violation},
    pebbler::Pebbler,
    pebbles::Pebbles,
    types::{Order, StepOutcome, TailPolicy},
};

pub struct IterativeEngine<'f, F: OneWayFunction> {
    f: &'f F,
    order: Order,
    round: u64,
    policy: TailPolicy,
    frames: Vec<Pebbles<F::Block>>,
    peak_frames: usize,
    aborted: bool,
}

impl<'f, F: OneWayFunction> IterativeEngine<'f, F> {
    /// # Errors
    ///
    /// `PebbleError::Configuration` if `order` exceeds [`MAX_ORDER`](crate::types::MAX_ORDER).
    pub fn new(order: u32, seed: F::Block, f: &'f F) -> Result<Self, PebbleError> {
        Ok(Self::with_order(Order::new(order)?, seed, f))
    }

    #[must_use]
    pub fn with_order(order: Order, seed: F::Block, f: &'f F) -> Self {
        debug!(order = order.get(), rounds = order.total_rounds(), "iterative pebble engine created");
        let mut frames = Vec::with_capacity(order.get().max(1) as usize);
        frames.push(Pebbles::new(order, seed));
        Self {
            f,
            order,
            round: 0,
            policy: TailPolicy::default(),
            frames,
            peak_frames: 1,
            aborted: false,
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TailPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        self.aborted
    }

    /// Frames currently building.
    #[must_use]
    pub fn frame_count(&self) -> usize {
        self.frames.len()
    }

    /// Most frames held at once so far.
    #[must_use]
    pub const fn peak_frames(&self) -> usize {
        self.peak_frames
    }

    fn next_outcome(&mut self) -> Result<StepOutcome<F::Block>, PebbleError> {
        let mut revealed = None;
        let mut idx = 0;
        while idx < self.frames.len() {
            if !self.frames[idx].is_built() {
                self.frames[idx].build_round(self.f)?;
                idx += 1;
                continue;
            }
            let frame = self.frames.remove(idx);
            let order = frame.order();
            let (top, seeds) = frame.into_parts()?;
            // Pre-order keeps the lowest order first. Emission windows of sibling
            // frames are disjoint, so a second built frame never shows up here.
            if revealed.is_none() {
                revealed = Some(top);
            }
            let spawned: Vec<_> = order
                .sub_orders()
                .zip(seeds)
                .map(|(sub, seed)| Pebbles::new(sub, seed))
                .collect();
            let count = spawned.len();
            self.frames.splice(idx..idx, spawned);
            idx += count;
        }
        self.peak_frames = self.peak_frames.max(self.frames.len());

        match revealed {
            Some(v) => Ok(StepOutcome::Value(v)),
            None if self.round < self.order.build_rounds() => Ok(StepOutcome::Pending),
            None => Err(PebbleError::Invariant("no frame revealed a value")),
        }
    }
}

impl<F: OneWayFunction> Pebbler for IterativeEngine<'_, F> {
    type Block = F::Block;

    fn step(&mut self) -> Result<StepOutcome<F::Block>, PebbleError> {
        if self.aborted {
            return Err(Violation::AfterAbort.into());
        }
        if self.round >= self.order.total_rounds() {
            return match self.policy {
                TailPolicy::Idempotent => Ok(StepOutcome::Exhausted),
                TailPolicy::Strict => Err(Violation::AfterExhausted.into()),
            };
        }
        match self.next_outcome() {
            Ok(outcome) => {
                self.round += 1;
                trace!(
                    order = self.order.get(),
                    round = self.round,
                    frames = self.frames.len(),
                    revealed = !outcome.is_pending(),
                    "round complete"
                );
                Ok(outcome)
            }
            Err(err) => {
                warn!(order = self.order.get(), round = self.round + 1, %err, "pebble traversal aborted");
                self.aborted = true;
                self.frames.clear();
                Err(err)
            }
        }
    }

    fn order(&self) -> Order {
        self.order
    }

    fn rounds_completed(&self) -> u64 {
        self.round
    }

    fn live_blocks(&self) -> usize {
        self.frames.iter().map(Pebbles::live_blocks).sum()
    }
}
