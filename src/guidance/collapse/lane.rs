//! Lane-use maneuvers survive only when the lane picture changes.

use crate::guidance::collapse::{Collapser, Rewrite};
use crate::guidance::{Step, TurnType};

/// Merges a `UseLane` step into its predecessor when the lane description
/// did not change across the boundary; an unchanged picture tells the
/// driver nothing.
pub(super) fn use_lane(_cx: &Collapser, steps: &[Step], index: usize) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;

    if a.is_arrive() || b.kind() != TurnType::UseLane || b.lane_description_changed {
        return None;
    }
    if a.mode != b.mode {
        return None;
    }

    let mut merged = a.clone();
    merged.absorb(b);

    Some(Rewrite {
        consumed: 2,
        replacement: vec![merged],
    })
}
