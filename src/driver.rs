//! Lamport-style consumption of a reversed chain.
//!
//! The verifier side of the identification protocol keeps the last accepted
//! value as its commitment `v`. A newly revealed `x` is accepted only if
//! `f(x) == v`, after which `x` becomes the commitment. This is why the
//! engines must reveal values exactly and in strictly descending order.

use pebble_primitives::OneWayFunction;
use subtle::ConstantTimeEq;
use tracing::debug;

use crate::{errors::PebbleError, pebbler::Pebbler, types::StepOutcome};

/// Counters collected by [`ChainDriver::run`].
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct TraversalReport {
    pub rounds: u64,
    pub pending: u64,
    pub revealed: u64,
    pub peak_live_blocks: usize,
}

pub struct ChainDriver<'f, F: OneWayFunction> {
    f: &'f F,
    commitment: Option<F::Block>,
    accepted: u64,
}

impl<'f, F> ChainDriver<'f, F>
where
    F: OneWayFunction,
    F::Block: ConstantTimeEq,
{
    /// Driver that takes the first revealed value as its commitment.
    #[must_use]
    pub const fn new(f: &'f F) -> Self {
        Self { f, commitment: None, accepted: 0 }
    }

    /// Driver holding a commitment registered ahead of time, normally `x_{n−1}`
    /// or its image `x_n`.
    #[must_use]
    pub const fn with_commitment(f: &'f F, commitment: F::Block) -> Self {
        Self { f, commitment: Some(commitment), accepted: 0 }
    }

    #[must_use]
    pub const fn commitment(&self) -> Option<&F::Block> {
        self.commitment.as_ref()
    }

    /// Values accepted so far.
    #[must_use]
    pub const fn accepted(&self) -> u64 {
        self.accepted
    }

    /// Check `value` against the current commitment and advance to it.
    ///
    /// # Errors
    ///
    /// `PebbleError::ChainMismatch` if `f(value)` differs from the commitment;
    /// the commitment is left unchanged. `PebbleError::Evaluation` if the
    /// one-way function fails.
    pub fn accept(&mut self, value: F::Block) -> Result<(), PebbleError> {
        if let Some(current) = &self.commitment {
            let image = self.f.evaluate(&value)?;
            if !bool::from(image.ct_eq(current)) {
                return Err(PebbleError::ChainMismatch { position: self.accepted });
            }
        }
        self.commitment = Some(value);
        self.accepted += 1;
        Ok(())
    }

    /// Drive `engine` through its remaining rounds, accepting every revealed value.
    ///
    /// # Errors
    ///
    /// Any engine error, or a `ChainMismatch` from [`ChainDriver::accept`].
    pub fn run<P>(&mut self, engine: &mut P) -> Result<TraversalReport, PebbleError>
    where
        P: Pebbler<Block = F::Block>,
    {
        let total = engine.order().total_rounds();
        let mut report = TraversalReport { peak_live_blocks: engine.live_blocks(), ..TraversalReport::default() };
        for round in engine.rounds_completed() + 1..=total {
            match engine.step_round(round)? {
                StepOutcome::Pending => report.pending += 1,
                StepOutcome::Value(v) => {
                    self.accept(v)?;
                    report.revealed += 1;
                }
                StepOutcome::Exhausted => break,
            }
            report.rounds += 1;
            report.peak_live_blocks = report.peak_live_blocks.max(engine.live_blocks());
        }
        debug!(
            order = engine.order().get(),
            rounds = report.rounds,
            revealed = report.revealed,
            peak_live_blocks = report.peak_live_blocks,
            "chain traversal complete"
        );
        Ok(report)
    }
}
