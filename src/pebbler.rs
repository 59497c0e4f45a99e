use crate::{
    errors::{PebbleError, Violation},
    types::{Order, StepOutcome},
};

/// Step-driven traversal of one hash chain in reverse.
///
/// Round `r` is the `r`-th call to [`Pebbler::step`]. Rounds `1 ..= 2^k − 1`
/// are `Pending`, rounds `2^k ..= 2^(k+1) − 1` reveal `x_{n−1}, …, x_0`, and
/// what follows depends on the engine's [`TailPolicy`](crate::types::TailPolicy).
pub trait Pebbler {
    type Block;

    /// Run the next round.
    ///
    /// # Errors
    ///
    /// `PebbleError::Evaluation` aborts the traversal; any step after that is
    /// a `Violation::AfterAbort`.
    fn step(&mut self) -> Result<StepOutcome<Self::Block>, PebbleError>;

    fn order(&self) -> Order;

    fn rounds_completed(&self) -> u64;

    /// Blocks currently held, sub-engines included.
    fn live_blocks(&self) -> usize;

    fn is_exhausted(&self) -> bool {
        self.rounds_completed() >= self.order().total_rounds()
    }

    /// [`Pebbler::step`] for a driver that numbers its rounds.
    ///
    /// # Errors
    ///
    /// `Violation::OutOfOrder` unless `round` is the next round to run; a
    /// skipped or repeated round leaves the engine untouched.
    fn step_round(&mut self, round: u64) -> Result<StepOutcome<Self::Block>, PebbleError> {
        let expected = self.rounds_completed() + 1;
        if round != expected {
            return Err(Violation::OutOfOrder { expected, got: round }.into());
        }
        self.step()
    }
}
