//! Name-change suppression: boundaries that exist only because the map's
//! naming is noisy.

use crate::guidance::collapse::{Collapser, Rewrite};
use crate::guidance::{Modifier, Step, TurnType};

/// Drops the maneuvers around a name-transparent middle step: an unnamed
/// stretch, or a named bridge/tunnel, splitting an otherwise continuous
/// road. At the list tail only the leading boundary is dropped so the
/// arrive maneuver survives.
///
/// Mode changes are never suppressed, and neither is a boundary whose
/// intersection offers a competing road of equal standing.
pub(super) fn transparent_name(cx: &Collapser, steps: &[Step], index: usize) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;
    let c = steps.get(index + 2)?;

    if a.is_arrive() {
        return None;
    }
    if a.mode != b.mode || b.mode != c.mode {
        return None;
    }
    if !(b.name_id().is_none() || b.is_structure) {
        return None;
    }
    if !droppable(cx, b) {
        return None;
    }

    if c.is_arrive() {
        let mut merged = a.clone();
        merged.absorb(b);

        return Some(Rewrite {
            consumed: 2,
            replacement: vec![merged],
        });
    }

    // The road must pick its identity back up on the far side.
    if a.name_id() != c.name_id() || !droppable(cx, c) {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);
    merged.absorb(c);

    Some(Rewrite {
        consumed: 3,
        replacement: vec![merged],
    })
}

/// Merges adjacent steps on the same `(name, ref, mode)` road whose
/// boundary says nothing: the silent-name-change rule behind the invariant
/// that no surfaced boundary separates two identically-labelled steps.
pub(super) fn silent_name(cx: &Collapser, steps: &[Step], index: usize) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;

    if a.is_arrive() || b.is_arrive() {
        return None;
    }
    if !a.same_road(b) {
        return None;
    }

    let silent = b.kind().is_silent()
        || (matches!(
            b.kind(),
            TurnType::Turn | TurnType::NewName | TurnType::Continue
        ) && b.modifier() == Modifier::Straight);
    if !silent || cx.important(b) {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);

    Some(Rewrite {
        consumed: 2,
        replacement: vec![merged],
    })
}

/// A boundary that may vanish: a plain near-straight turn or name change
/// at an unremarkable intersection.
fn droppable(cx: &Collapser, step: &Step) -> bool {
    matches!(
        step.kind(),
        TurnType::NewName | TurnType::Turn | TurnType::Continue
    ) && step.turn_degrees.abs() <= cx.config().suppression_straight_tolerance
        && !cx.important(step)
}
