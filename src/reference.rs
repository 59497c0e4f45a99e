//! Naive chain computations used as the conformance oracle.

use pebble_primitives::OneWayFunction;

use crate::{errors::PebbleError, types::Order};

/// `x_0 … x_{len−1}` computed forward from `seed`.
///
/// # Errors
///
/// Propagates one-way function failures.
pub fn forward_chain<F>(f: &F, seed: F::Block, len: u64) -> Result<Vec<F::Block>, PebbleError>
where
    F: OneWayFunction + ?Sized,
{
    let mut out = Vec::with_capacity(usize::try_from(len).unwrap_or(0));
    if len == 0 {
        return Ok(out);
    }
    let mut x = seed;
    for _ in 1..len {
        let next = f.evaluate(&x)?;
        out.push(x);
        x = next;
    }
    out.push(x);
    Ok(out)
}

/// `x_{n−1}, …, x_0`, each recomputed from the seed: `n(n−1)/2` evaluations.
///
/// # Errors
///
/// Propagates one-way function failures.
pub fn naive_reverse<F>(f: &F, order: Order, seed: &F::Block) -> Result<Vec<F::Block>, PebbleError>
where
    F: OneWayFunction + ?Sized,
{
    let n = order.chain_len();
    let mut out = Vec::with_capacity(usize::try_from(n).unwrap_or(0));
    for i in (0..n).rev() {
        let mut x = seed.clone();
        for _ in 0..i {
            x = f.evaluate(&x)?;
        }
        out.push(x);
    }
    Ok(out)
}
