//! Toy one-way functions for unit tests.

use std::cell::Cell;

use pebble_primitives::{EvaluationError, OneWayFunction};

/// `x ↦ x + 1`: chain values equal their index above the seed.
pub struct Succ;

impl OneWayFunction for Succ {
    type Block = u64;

    fn evaluate(&self, input: &u64) -> Result<u64, EvaluationError> {
        Ok(input + 1)
    }
}

/// `Succ` that fails once its evaluation budget is spent.
pub struct FailAfter {
    budget: Cell<u64>,
}

impl FailAfter {
    pub const fn new(budget: u64) -> Self {
        Self { budget: Cell::new(budget) }
    }
}

impl OneWayFunction for FailAfter {
    type Block = u64;

    fn evaluate(&self, input: &u64) -> Result<u64, EvaluationError> {
        let left = self.budget.get();
        if left == 0 {
            return Err(EvaluationError::new("share exchange timed out"));
        }
        self.budget.set(left - 1);
        Ok(input + 1)
    }
}
