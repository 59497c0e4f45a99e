#![forbid(unsafe_code)]
#![deny(warnings)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_possible_truncation
)]

//! Optimal binary pebbling for one-way hash chain reversal.
//!
//! A chain of order `k` is `x_i = f^i(x_0)` for `i < n = 2^k`. The engines in
//! this crate reveal `x_{n−1}, x_{n−2}, …, x_0` one per round, the order in
//! which a Lamport-style identification protocol consumes them, while holding
//! at most `k + 1` blocks and spending at most `⌈k/2⌉` evaluations per
//! revealing round.

// Traversal contract:
// - Rounds 1 ..= n−1 build the pebbles and return `Pending`
// - Rounds n ..= 2n−1 return one value each, in descending index order
// - After round 2n−1 the engine is exhausted
// - Which slot is advanced in which round depends only on (order, round);
//   block contents never steer control flow, so the same engine runs over
//   plaintext or protected one-way function backends.

pub mod types;
pub mod errors;
pub mod schedule;
pub mod pebbles;
pub mod pebbler;
pub mod interleave;
pub mod engine;
pub mod iterative;
pub mod driver;
pub mod reference;
pub mod hashers;

#[cfg(test)]
mod testing;

pub use types::*;
pub use errors::{PebbleError, Violation};
pub use schedule::{advances, bit_length, emission_round_cap, max_build_advances, Schedule};
pub use pebbles::Pebbles;
pub use pebbler::Pebbler;
pub use engine::PebbleEngine;
pub use iterative::IterativeEngine;
pub use driver::{ChainDriver, TraversalReport};
pub use reference::{forward_chain, naive_reverse};
pub use hashers::{derive_seed, random_seed, KeyedBlake3Owf, Metered, Sha3Owf};
pub use pebble_primitives::{Block, EvaluationError, OneWayFunction, BLOCK_LEN};

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
