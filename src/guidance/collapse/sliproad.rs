//! Sliproads: a short link cutting a corner between two roads is not an
//! intersection of its own.

use crate::guidance::collapse::{net_turn, Collapser, Rewrite};
use crate::guidance::{Modifier, Step, TurnInstruction, TurnType};

/// Folds a turn onto a sliproad together with the turn off it into a
/// single turn onto the cross street the sliproad reaches.
pub(super) fn sliproad_collapse(
    cx: &Collapser,
    steps: &[Step],
    index: usize,
) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;

    // The flag is assigned at build time; merges may have grown the step
    // past sliproad length since.
    if !a.is_sliproad || a.distance >= cx.config().sliproad_max_length {
        return None;
    }
    if !matches!(
        a.kind(),
        TurnType::Turn
            | TurnType::Fork
            | TurnType::OffRamp
            | TurnType::NewName
            | TurnType::Continue
    ) {
        return None;
    }
    // The far end must join a road in its own right, not another link.
    if !matches!(
        b.kind(),
        TurnType::Turn | TurnType::NewName | TurnType::EndOfRoad | TurnType::Merge
    ) || b.is_link
        || b.name_id().is_none()
    {
        return None;
    }
    if a.mode != b.mode {
        return None;
    }

    let net = net_turn(a, b);

    let mut merged = a.clone();
    merged.instruction = TurnInstruction::new(TurnType::Turn, Modifier::from_degrees(net));
    merged.turn_degrees = net;
    merged.name = b.name.clone();
    merged.reference = b.reference.clone();
    merged.is_link = false;
    merged.is_sliproad = false;
    merged.lane_description_changed = b.lane_description_changed;
    merged.absorb(b);

    Some(Rewrite {
        consumed: 2,
        replacement: vec![merged],
    })
}
