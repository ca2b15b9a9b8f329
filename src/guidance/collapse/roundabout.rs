//! Roundabout circulation folds to a single enter maneuver counting the
//! exits passed.

use crate::guidance::collapse::{Collapser, Rewrite};
use crate::guidance::{Step, TurnType};

/// Folds a `StayOnRoundabout` step into the preceding enter (or depart,
/// for routes starting on the circle), accumulating its passed exits so
/// the surfaced maneuver can name the exit ordinal to take.
pub(super) fn roundabout_chain(_cx: &Collapser, steps: &[Step], index: usize) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;

    if !matches!(a.kind(), TurnType::EnterRoundabout | TurnType::Depart) {
        return None;
    }
    if b.kind() != TurnType::StayOnRoundabout {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);

    Some(Rewrite {
        consumed: 2,
        replacement: vec![merged],
    })
}
