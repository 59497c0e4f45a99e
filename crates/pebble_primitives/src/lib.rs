#![forbid(unsafe_code)]
#![deny(clippy::all, clippy::pedantic, clippy::nursery, clippy::cargo)]
#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::missing_panics_doc
)]

//! Pebbling primitives: the chain block, the one-way function seam, domain-tagged hashing.
//
// This crate holds what every pebbling engine and every one-way function backend
// agree on:
//
// - A fixed-size 32-byte `Block`
// - The `OneWayFunction` capability and its failure type
// - Domain-tagged SHA3-256 with length framing
// - Constant-time equality for blocks

use sha3::{Digest, Sha3_256};
use subtle::{Choice, ConstantTimeEq};
use thiserror::Error;

pub mod constants;

/// Size of a chain block in bytes.
pub const BLOCK_LEN: usize = 32;

/// One value of a hash chain. Opaque to the pebbling engines.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[repr(transparent)]
pub struct Block(pub [u8; BLOCK_LEN]);

impl Block {
    #[must_use]
    pub const fn as_bytes(&self) -> &[u8; BLOCK_LEN] {
        &self.0
    }
}

impl From<[u8; BLOCK_LEN]> for Block {
    fn from(bytes: [u8; BLOCK_LEN]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for Block {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl TryFrom<&[u8]> for Block {
    type Error = PrimitiveError;

    fn try_from(b: &[u8]) -> Result<Self, Self::Error> {
        if b.len() != BLOCK_LEN {
            return Err(PrimitiveError::InvalidLength {
                expected: BLOCK_LEN,
                got: b.len(),
            });
        }
        let mut arr = [0u8; BLOCK_LEN];
        arr.copy_from_slice(b);
        Ok(Self(arr))
    }
}

impl ConstantTimeEq for Block {
    fn ct_eq(&self, other: &Self) -> Choice {
        self.0.ct_eq(&other.0)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PrimitiveError {
    #[error("invalid length: expected {expected} got {got}")]
    InvalidLength { expected: usize, got: usize },
}

/// Failure reported by a one-way function backend.
///
/// A plaintext hash never fails; protected backends (for example an evaluation
/// over secret-shared inputs that needs a round of coordination) report their
/// failure here and the traversal in progress is abandoned.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("one-way function evaluation failed: {reason}")]
pub struct EvaluationError {
    reason: String,
}

impl EvaluationError {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub fn reason(&self) -> &str {
        &self.reason
    }
}

/// A total, deterministic, side-effect-free map from block to block.
///
/// Engines only ever call `evaluate`; they never inspect a block, so the
/// associated `Block` type may be a plaintext digest or a protected
/// representation of one.
pub trait OneWayFunction {
    type Block: Clone;

    /// Apply the function once. One call is one unit of cost.
    fn evaluate(&self, input: &Self::Block) -> Result<Self::Block, EvaluationError>;
}

impl<F: OneWayFunction + ?Sized> OneWayFunction for &F {
    type Block = F::Block;

    fn evaluate(&self, input: &Self::Block) -> Result<Self::Block, EvaluationError> {
        (**self).evaluate(input)
    }
}

/// Convert an unsigned integer to fixed-width little-endian bytes.
#[must_use]
#[allow(clippy::cast_possible_truncation)]
pub fn le_bytes<const W: usize>(mut x: u128) -> [u8; W] {
    let mut out = [0u8; W];
    let mut i = 0usize;
    while i < W {
        out[i] = (x & 0xFF) as u8;
        x >>= 8;
        i += 1;
    }
    out
}

/// Domain-tagged SHA3-256 with length framing:
/// `H(tag_ascii, parts[])` = `SHA3_256`( UTF8(tag) || Σ ( LE(|p|,8) || p ) )
#[must_use]
pub fn h_tag(tag: &str, parts: &[&[u8]]) -> [u8; 32] {
    debug_assert!(
        tag.starts_with("pebble."),
        "non-pebble.* tag used in chain hashing: {tag}"
    );
    let mut hasher = Sha3_256::new();
    hasher.update(tag.as_bytes());
    for p in parts {
        let len_le = le_bytes::<8>(p.len() as u128);
        hasher.update(len_le);
        hasher.update(p);
    }
    let digest = hasher.finalize();
    let mut out = [0u8; 32];
    out.copy_from_slice(&digest);
    out
}

/// Constant-time equality for two blocks.
#[must_use]
pub fn ct_eq_block(a: &Block, b: &Block) -> bool {
    a.ct_eq(b).into()
}
