//! Ramp chains: an on-ramp flowing straight into its merge is one event.

use crate::guidance::collapse::{Collapser, Rewrite};
use crate::guidance::{Step, TurnType};

/// Drops the `OnRamp` maneuver of an `OnRamp` → `Merge` chain by folding
/// the ramp step into its predecessor; the surviving merge carries the
/// event. Adjacency of the pair means no junction surfaced in between, so
/// the driver experiences the chain as the single merge.
pub(super) fn ramp_chain(_cx: &Collapser, steps: &[Step], index: usize) -> Option<Rewrite> {
    let previous = steps.get(index)?;
    let a = steps.get(index + 1)?;
    let b = steps.get(index + 2)?;

    if a.kind() != TurnType::OnRamp || b.kind() != TurnType::Merge {
        return None;
    }
    if previous.is_arrive() || previous.mode != a.mode {
        return None;
    }

    let mut merged = previous.clone();
    merged.absorb(a);

    Some(Rewrite {
        consumed: 2,
        replacement: vec![merged],
    })
}
