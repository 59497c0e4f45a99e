use pebble_primitives::EvaluationError;
use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PebbleError {
    #[error("invalid order {order}: supported range is [0, {max}]")]
    Configuration { order: i64, max: u32 },

    #[error("round {round} outside the build schedule of order {order}")]
    RoundOutOfRange { order: u32, round: u64 },

    #[error("protocol violation: {0}")]
    ProtocolViolation(#[from] Violation),

    #[error(transparent)]
    Evaluation(#[from] EvaluationError),

    #[error("chain mismatch: value at position {position} does not hash to the commitment")]
    ChainMismatch { position: u64 },

    #[error("pebble invariant broken: {0}")]
    Invariant(&'static str),
}

/// Driver-side misuse of the step protocol. Never a recoverable runtime condition.
#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    #[error("round {got} requested, expected round {expected}")]
    OutOfOrder { expected: u64, got: u64 },

    #[error("step called after the traversal was exhausted")]
    AfterExhausted,

    #[error("step called after the traversal was aborted")]
    AfterAbort,
}
