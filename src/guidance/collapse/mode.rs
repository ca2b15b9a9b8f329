//! Travel-mode boundaries always surface.

use crate::guidance::collapse::{Collapser, Rewrite};
use crate::guidance::{Modifier, Step, TurnInstruction, TurnType};

/// Upgrades a silent boundary sitting on a mode change to a notification
/// with the geometric side.
///
/// The classifier already emits notifications at mode changes, so this is
/// the collapsing engine's own guarantee that no rewrite sequence leaves a
/// boarding point untold.
pub(super) fn mode_boundary(_cx: &Collapser, steps: &[Step], index: usize) -> Option<Rewrite> {
    let a = steps.get(index)?;
    let b = steps.get(index + 1)?;

    if b.is_arrive() || a.mode == b.mode || !b.kind().is_silent() {
        return None;
    }

    let mut surfaced = b.clone();
    surfaced.instruction = TurnInstruction::new(
        TurnType::Notification,
        Modifier::from_degrees(b.turn_degrees),
    );

    Some(Rewrite {
        consumed: 2,
        replacement: vec![a.clone(), surfaced],
    })
}
