//! Optimal binary pebbling schedule.
//!
//! `advances(k, r)` is the number of one-way function evaluations an order-`k`
//! engine performs in build round `r`. It depends on `(k, r)` alone, never on
//! block contents, so the schedule leaks nothing when the function runs over
//! protected values.
//!
//! Over rounds `1 ..= 2^k − 1` the counts sum to exactly `2^k − 1`. Rounds in
//! the first half of the build phase do no work at all; the second half is
//! capped at `⌈k/2⌉` except for the last build round of an even order, which
//! costs `k/2 + 1`.

use crate::{errors::PebbleError, types::{Order, MAX_ORDER}};

/// Number of bits needed to represent `v`; `bit_length(0) == 0`.
#[inline]
#[must_use]
pub const fn bit_length(v: u64) -> u32 {
    u64::BITS - v.leading_zeros()
}

/// Evaluations to perform in build round `round` of an order-`order` chain.
///
/// If `r < 2^(k−1)` the result is 0. Otherwise with `m = 2r mod 2^bitlen(2^k − r)`
/// the result is `⌊((k + r) mod 2 + k + 1 − bitlen(m)) / 2⌋`.
///
/// # Errors
///
/// `PebbleError::Configuration` for `order > MAX_ORDER`,
/// `PebbleError::RoundOutOfRange` unless `1 <= round <= 2^order − 1`.
pub fn advances(order: u32, round: u64) -> Result<u32, PebbleError> {
    let k = Order::new(order)?;
    if round == 0 || round > k.build_rounds() {
        return Err(PebbleError::RoundOutOfRange { order, round });
    }
    Ok(advances_unchecked(k, round))
}

/// `advances` for a round already known to lie in `1 ..= 2^k − 1`.
fn advances_unchecked(order: Order, round: u64) -> u32 {
    let k = order.get();
    let n = order.chain_len();
    if round < n >> 1 {
        return 0;
    }
    // r >= 2^(k-1), so 2^k - r <= 2^(k-1) and the modulus has at most k bits.
    let modulus = 1u64 << bit_length(n - round);
    let m = (2 * round) % modulus;
    let parity = u32::from((round + u64::from(k)) % 2 == 1);
    (parity + k + 1 - bit_length(m)) / 2
}

/// Largest per-round count the build phase of `order` can produce.
#[must_use]
pub const fn max_build_advances(order: u32) -> u32 {
    if order == 0 {
        0
    } else {
        order / 2 + 1
    }
}

/// Streams `advances(k, r)` for `r = 1 ..= 2^k − 1`.
pub struct Schedule {
    order: Order,
    round: u64,
    end: u64,
}

impl Schedule {
    #[must_use]
    pub const fn new(order: Order) -> Self {
        Self { order, round: 0, end: order.build_rounds() }
    }
}

impl Iterator for Schedule {
    type Item = u32;

    fn next(&mut self) -> Option<Self::Item> {
        if self.round >= self.end {
            return None;
        }
        self.round += 1;
        Some(advances_unchecked(self.order, self.round))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let left = usize::try_from(self.end - self.round).unwrap_or(usize::MAX);
        (left, Some(left))
    }
}

/// Per-round cap on evaluations, summed over the whole engine tree, once the
/// emission phase has started: `⌈k/2⌉`.
#[must_use]
pub const fn emission_round_cap(order: u32) -> u32 {
    order.div_ceil(2)
}

const _: () = assert!(bit_length(1u64 << MAX_ORDER) == MAX_ORDER + 1);
