//! Round-robin polling of sub-engines.
//!
//! Every live sub-engine is stepped exactly once per parent round, in
//! ascending order. When more than one of them reveals a value in the same
//! round, the lowest-order one wins.

use crate::{errors::PebbleError, pebbler::Pebbler, types::StepOutcome};

/// Step every child once and return the first value offered, if any.
/// Children that have run all their rounds are dropped afterwards.
///
/// # Errors
///
/// The first child error is returned immediately; later children are not
/// stepped in that round.
pub fn step_children<P: Pebbler>(children: &mut Vec<P>) -> Result<Option<P::Block>, PebbleError> {
    let mut revealed = None;
    for child in children.iter_mut() {
        if let StepOutcome::Value(v) = child.step()? {
            if revealed.is_none() {
                revealed = Some(v);
            }
        }
    }
    children.retain(|c| !c.is_exhausted());
    Ok(revealed)
}
