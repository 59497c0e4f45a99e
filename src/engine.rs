//! Recursive pebbling engine.
//!
//! An order-`k` engine runs its own build phase on a [`Pebbles`] slot array.
//! In round `n` it reveals slot 0 and hands slots `1 ..= k` to `k` owned
//! sub-engines of orders `0 .. k`, which it then polls once per round through
//! [`step_children`]. Each sub-engine is itself a `PebbleEngine`, so the
//! nesting depth reaches `k`; [`IterativeEngine`](crate::iterative::IterativeEngine)
//! produces the same rounds from a flat frame list.

use std::mem;

use pebble_primitives::OneWayFunction;
use tracing::{debug, trace, warn};

use crate::{
    errors::{PebbleError, Violation},
    interleave::step_children,
    pebbler::Pebbler,
    pebbles::Pebbles,
    types::{Order, StepOutcome, TailPolicy},
};

pub struct PebbleEngine<'f, F: OneWayFunction> {
    f: &'f F,
    order: Order,
    depth: u32,
    round: u64,
    policy: TailPolicy,
    phase: Phase<'f, F>,
}

enum Phase<'f, F: OneWayFunction> {
    Building(Pebbles<F::Block>),
    Emitting(Vec<PebbleEngine<'f, F>>),
    Done,
    Aborted,
}

impl<'f, F: OneWayFunction> PebbleEngine<'f, F> {
    /// Engine for the chain of length `2^order` starting at `seed`.
    ///
    /// # Errors
    ///
    /// `PebbleError::Configuration` if `order` exceeds [`MAX_ORDER`](crate::types::MAX_ORDER).
    pub fn new(order: u32, seed: F::Block, f: &'f F) -> Result<Self, PebbleError> {
        Ok(Self::with_order(Order::new(order)?, seed, f))
    }

    #[must_use]
    pub fn with_order(order: Order, seed: F::Block, f: &'f F) -> Self {
        debug!(order = order.get(), rounds = order.total_rounds(), "pebble engine created");
        Self::nested(order, 0, seed, f)
    }

    fn nested(order: Order, depth: u32, seed: F::Block, f: &'f F) -> Self {
        Self {
            f,
            order,
            depth,
            round: 0,
            policy: TailPolicy::default(),
            phase: Phase::Building(Pebbles::new(order, seed)),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: TailPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub const fn policy(&self) -> TailPolicy {
        self.policy
    }

    #[must_use]
    pub const fn is_aborted(&self) -> bool {
        matches!(self.phase, Phase::Aborted)
    }

    /// Number of sub-engines still being polled.
    #[must_use]
    pub fn active_sub_engines(&self) -> usize {
        match &self.phase {
            Phase::Emitting(children) => children.len(),
            Phase::Building(_) | Phase::Done | Phase::Aborted => 0,
        }
    }

    fn next_outcome(&mut self) -> Result<StepOutcome<F::Block>, PebbleError> {
        let f = self.f;
        match &mut self.phase {
            Phase::Building(pebbles) => {
                if !pebbles.is_built() {
                    pebbles.build_round(f)?;
                    return Ok(StepOutcome::Pending);
                }
            }
            Phase::Emitting(children) => {
                return step_children(children)?
                    .map(StepOutcome::Value)
                    .ok_or(PebbleError::Invariant("no sub-engine revealed a value"));
            }
            Phase::Done | Phase::Aborted => {
                return Err(PebbleError::Invariant("stepped an engine past its last round"));
            }
        }

        // Round n: reveal slot 0 and hand every other slot to its sub-engine.
        let Phase::Building(pebbles) = mem::replace(&mut self.phase, Phase::Done) else {
            return Err(PebbleError::Invariant("engine left the build phase twice"));
        };
        let (top, seeds) = pebbles.into_parts()?;
        let depth = self.depth + 1;
        let children: Vec<_> = self
            .order
            .sub_orders()
            .zip(seeds)
            .map(|(order, seed)| Self::nested(order, depth, seed, f))
            .collect();
        if self.depth == 0 {
            debug!(order = self.order.get(), sub_engines = children.len(), "build phase complete");
        }
        if !children.is_empty() {
            self.phase = Phase::Emitting(children);
        }
        Ok(StepOutcome::Value(top))
    }
}

impl<F: OneWayFunction> Pebbler for PebbleEngine<'_, F> {
    type Block = F::Block;

    fn step(&mut self) -> Result<StepOutcome<F::Block>, PebbleError> {
        if self.is_aborted() {
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
                    depth = self.depth,
                    round = self.round,
                    revealed = !outcome.is_pending(),
                    "round complete"
                );
                Ok(outcome)
            }
            Err(err) => {
                if self.depth == 0 {
                    warn!(order = self.order.get(), round = self.round + 1, %err, "pebble traversal aborted");
                }
                self.phase = Phase::Aborted;
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
        match &self.phase {
            Phase::Building(pebbles) => pebbles.live_blocks(),
            Phase::Emitting(children) => children.iter().map(Pebbler::live_blocks).sum(),
            Phase::Done | Phase::Aborted => 0,
        }
    }
}
