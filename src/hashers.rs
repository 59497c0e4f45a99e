use std::cell::Cell;

use pebble_primitives::{constants::{TAG_OWF, TAG_SEED}, h_tag, Block, EvaluationError, OneWayFunction, BLOCK_LEN};
use rand_core::CryptoRngCore;

/// x_{i+1} = SHA3_256( "pebble.owf" || LE64(32) || x_i )
#[derive(Clone, Copy, Debug, Default)]
pub struct Sha3Owf;

impl OneWayFunction for Sha3Owf {
    type Block = Block;

    fn evaluate(&self, input: &Block) -> Result<Block, EvaluationError> {
        Ok(Block(h_tag(TAG_OWF, &[&input.0])))
    }
}

/// x_{i+1} = BLAKE3-keyed( K, x_i ) under a fixed key.
///
/// The keyed hasher state is set up once at construction and shared read-only
/// by every evaluation.
#[derive(Clone, Debug)]
pub struct KeyedBlake3Owf {
    keyed: blake3::Hasher,
}

impl KeyedBlake3Owf {
    #[must_use]
    pub fn new(key: &[u8; 32]) -> Self {
        Self { keyed: blake3::Hasher::new_keyed(key) }
    }
}

impl OneWayFunction for KeyedBlake3Owf {
    type Block = Block;

    fn evaluate(&self, input: &Block) -> Result<Block, EvaluationError> {
        let mut h = self.keyed.clone();
        h.update(&input.0);
        Ok(Block(*h.finalize().as_bytes()))
    }
}

/// Counts evaluations of the wrapped function.
#[derive(Debug, Default)]
pub struct Metered<F> {
    inner: F,
    evaluations: Cell<u64>,
}

impl<F> Metered<F> {
    pub const fn new(inner: F) -> Self {
        Self { inner, evaluations: Cell::new(0) }
    }

    /// Evaluations attempted so far, failed ones included.
    #[must_use]
    pub fn evaluations(&self) -> u64 {
        self.evaluations.get()
    }

    pub fn reset(&self) {
        self.evaluations.set(0);
    }

    pub fn into_inner(self) -> F {
        self.inner
    }
}

impl<F: OneWayFunction> OneWayFunction for Metered<F> {
    type Block = F::Block;

    fn evaluate(&self, input: &F::Block) -> Result<F::Block, EvaluationError> {
        self.evaluations.set(self.evaluations.get() + 1);
        self.inner.evaluate(input)
    }
}

/// SEED = SHA3_256( "pebble.seed" || LE64(|secret|) || secret )
#[must_use]
pub fn derive_seed(secret: &[u8]) -> Block {
    Block(h_tag(TAG_SEED, &[secret]))
}

/// Fresh uniformly random seed.
pub fn random_seed<R: CryptoRngCore + ?Sized>(rng: &mut R) -> Block {
    let mut out = [0u8; BLOCK_LEN];
    rng.fill_bytes(&mut out);
    Block(out)
}
