//! Segregated intersections: two maneuvers a few meters apart on the two
//! halves of a divided road are one event to the driver.

use rustc_hash::FxHashSet;

use crate::guidance::collapse::{net_turn, Collapser, Rewrite};
use crate::guidance::{Modifier, Step, TurnInstruction, TurnType};
use crate::model::NameId;

/// Merges the two halves of a segregated crossing into one maneuver with
/// the net direction, relabelling a full reversal onto the same road as a
/// continue-u-turn across the median.
///
/// Close turns that are *not* a recognised segregated pair are left alone,
/// however short the segment between them; two genuine turns must both
/// survive.
pub(super) fn segregated_merge(
    cx: &Collapser,
    steps: &[Step],
    index: usize,
) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;

    if !matches!(
        a.kind(),
        TurnType::Turn | TurnType::Fork | TurnType::EndOfRoad | TurnType::NewName
    ) {
        return None;
    }
    if !matches!(b.kind(), TurnType::Turn | TurnType::NewName) {
        return None;
    }
    if a.mode != b.mode {
        return None;
    }
    if a.distance >= cx.config().segregated_merge_distance {
        return None;
    }
    if !is_segregated_pair(a, b) {
        return None;
    }

    let net = net_turn(a, b);
    let previous = steps.get(index.checked_sub(1)?)?;

    // A net reversal back onto the road we arrived on is a median u-turn:
    // the driver continues on the same road, opposite half.
    let instruction = if net.abs() >= 175.0
        && !b.name_id().is_none()
        && b.name_id() == previous.name_id()
    {
        TurnInstruction::new(TurnType::Continue, Modifier::UTurn)
    } else {
        TurnInstruction::new(TurnType::Turn, Modifier::from_degrees(net))
    };

    let mut merged = a.clone();
    merged.instruction = instruction;
    merged.turn_degrees = net;
    merged.name = b.name.clone();
    merged.reference = b.reference.clone();
    merged.is_link = b.is_link;
    merged.is_sliproad = false;
    merged.lane_description_changed = b.lane_description_changed;
    merged.absorb(b);

    Some(Rewrite {
        consumed: 2,
        replacement: vec![merged],
    })
}

/// Whether two adjacent maneuvers straddle a segregated median: the
/// connecting segment is short one-way carriageway plumbing, and both
/// nodes see a shared named road that is not the connector itself.
fn is_segregated_pair(a: &Step, b: &Step) -> bool {
    if !a.is_oneway {
        return false;
    }

    let (Some(at), Some(bt)) = (a.view.as_ref(), b.view.as_ref()) else {
        return false;
    };

    let shared = at
        .incident_names()
        .intersection(&bt.incident_names())
        .copied()
        .collect::<FxHashSet<NameId>>();

    shared.iter().any(|name| *name != a.name_id())
}
