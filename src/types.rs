use crate::errors::PebbleError;

/// Largest supported order. `2·2^k − 1` rounds must fit a `u64` round counter.
pub const MAX_ORDER: u32 = 62;

/// log2 of the chain length.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Order(u32);

impl Order {
    /// # Errors
    ///
    /// Returns `PebbleError::Configuration` if `k` exceeds [`MAX_ORDER`].
    pub fn new(k: u32) -> Result<Self, PebbleError> {
        if k > MAX_ORDER {
            return Err(PebbleError::Configuration { order: i64::from(k), max: MAX_ORDER });
        }
        Ok(Self(k))
    }

    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }

    /// `n = 2^k`
    #[must_use]
    pub const fn chain_len(self) -> u64 {
        1u64 << self.0
    }

    /// Rounds `1 ..= n − 1`, all `Pending`.
    #[must_use]
    pub const fn build_rounds(self) -> u64 {
        self.chain_len() - 1
    }

    /// `2n − 1`
    #[must_use]
    pub const fn total_rounds(self) -> u64 {
        2 * self.chain_len() - 1
    }

    /// Orders `0 .. k` of the sub-engines seeded from slots `1 ..= k`.
    pub fn sub_orders(self) -> impl Iterator<Item = Self> {
        (0..self.0).map(Self)
    }

    /// Evaluations spent by a complete traversal, sub-engines included: `k·2^(k−1)`.
    #[must_use]
    pub const fn traversal_cost(self) -> u128 {
        if self.0 == 0 {
            return 0;
        }
        (self.0 as u128) << (self.0 - 1)
    }
}

impl TryFrom<i64> for Order {
    type Error = PebbleError;

    fn try_from(k: i64) -> Result<Self, Self::Error> {
        u32::try_from(k)
            .ok()
            .filter(|k| *k <= MAX_ORDER)
            .map(Self)
            .ok_or(PebbleError::Configuration { order: k, max: MAX_ORDER })
    }
}

/// What a step after the final round does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum TailPolicy {
    /// Keep answering `Exhausted`.
    #[default]
    Idempotent,
    /// Treat the extra step as `Violation::AfterExhausted`.
    Strict,
}

/// Result of one round.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum StepOutcome<B> {
    Pending,
    Value(B),
    Exhausted,
}

impl<B> StepOutcome<B> {
    #[must_use]
    pub const fn is_pending(&self) -> bool {
        matches!(self, Self::Pending)
    }

    #[must_use]
    pub const fn is_exhausted(&self) -> bool {
        matches!(self, Self::Exhausted)
    }

    #[must_use]
    pub fn into_value(self) -> Option<B> {
        match self {
            Self::Value(v) => Some(v),
            Self::Pending | Self::Exhausted => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn order_bounds() {
        assert!(Order::new(0).is_ok());
        assert!(Order::new(MAX_ORDER).is_ok());
        assert_eq!(
            Order::new(MAX_ORDER + 1),
            Err(PebbleError::Configuration { order: 63, max: MAX_ORDER })
        );
        assert_eq!(
            Order::try_from(-1i64),
            Err(PebbleError::Configuration { order: -1, max: MAX_ORDER })
        );
        assert_eq!(Order::try_from(5i64).map(Order::get), Ok(5));
    }

    #[test]
    fn derived_lengths() {
        let k2 = Order::new(2).unwrap();
        assert_eq!(k2.chain_len(), 4);
        assert_eq!(k2.build_rounds(), 3);
        assert_eq!(k2.total_rounds(), 7);
        assert_eq!(k2.traversal_cost(), 4);

        let k0 = Order::new(0).unwrap();
        assert_eq!(k0.build_rounds(), 0);
        assert_eq!(k0.total_rounds(), 1);
        assert_eq!(k0.traversal_cost(), 0);

        let sub: Vec<u32> = Order::new(3).unwrap().sub_orders().map(Order::get).collect();
        assert_eq!(sub, vec![0, 1, 2]);
        assert_eq!(k0.sub_orders().count(), 0);

        let top = Order::new(MAX_ORDER).unwrap();
        assert_eq!(top.total_rounds(), (1u64 << 63) - 1);
    }
}
