use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

use crate::guidance::{GuidanceConfig, IntersectionRoad, IntersectionView};
use crate::model::{lane_description_changed, Edge};

/// The structural kind of a maneuver.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TurnType {
    /// A traversed node that needs no telling; never survives collapsing.
    NoTurn,
    /// The road changes name without a meaningful turn.
    NewName,
    /// Stay on the same road through a maneuver, e.g. a forced u-turn
    /// across a median.
    Continue,
    Turn,
    /// A link joins a mainline the driver follows from here.
    Merge,
    /// A link continues into another link at a ramp junction.
    OnRamp,
    /// Leaving the through road onto a link.
    OffRamp,
    Fork,
    /// The arrival road ends; the driver must turn.
    EndOfRoad,
    /// Nothing structural, but the driver should be told — a travel-mode
    /// boundary such as boarding a ferry.
    Notification,
    EnterRoundabout,
    StayOnRoundabout,
    ExitRoundabout,
    /// Keep to the indicated lanes; surfaced only when the lane picture
    /// changes.
    UseLane,
    /// A maneuver the collapsing engine has struck; assembled output never
    /// contains one.
    Suppressed,
    Depart,
    Arrive,
}

impl TurnType {
    /// Whether a boundary of this kind is invisible to the driver.
    #[inline]
    pub fn is_silent(&self) -> bool {
        matches!(self, TurnType::NoTurn | TurnType::Suppressed)
    }
}

/// The direction a maneuver leans, binned from the signed deviation.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum Modifier {
    UTurn,
    SharpRight,
    Right,
    SlightRight,
    Straight,
    SlightLeft,
    Left,
    SharpLeft,
}

impl Modifier {
    /// Bins a signed deviation from straight (clockwise positive) into a
    /// modifier.
    pub fn from_degrees(theta: f64) -> Modifier {
        let magnitude = theta.abs();

        if magnitude >= 175.0 {
            Modifier::UTurn
        } else if magnitude >= 135.0 {
            if theta > 0.0 { Modifier::SharpRight } else { Modifier::SharpLeft }
        } else if magnitude >= 45.0 {
            if theta > 0.0 { Modifier::Right } else { Modifier::Left }
        } else if magnitude >= 10.0 {
            if theta > 0.0 { Modifier::SlightRight } else { Modifier::SlightLeft }
        } else {
            Modifier::Straight
        }
    }

    /// The slightest modifier on the side of `theta`; used where a
    /// direction must be reported even for near-straight geometry, such as
    /// fork tines and merges.
    pub fn leaning(theta: f64) -> Modifier {
        match Modifier::from_degrees(theta) {
            Modifier::Straight if theta > 0.0 => Modifier::SlightRight,
            Modifier::Straight if theta < 0.0 => Modifier::SlightLeft,
            modifier => modifier,
        }
    }

    /// `-1` left of straight, `1` right, `0` for straight and u-turns.
    #[inline]
    pub fn side(&self) -> i8 {
        match self {
            Modifier::SharpRight | Modifier::Right | Modifier::SlightRight => 1,
            Modifier::SharpLeft | Modifier::Left | Modifier::SlightLeft => -1,
            Modifier::Straight | Modifier::UTurn => 0,
        }
    }

    /// Whether the maneuver deviates at least a full turn from straight.
    #[inline]
    pub fn is_pronounced(&self) -> bool {
        matches!(
            self,
            Modifier::UTurn
                | Modifier::SharpRight
                | Modifier::Right
                | Modifier::SharpLeft
                | Modifier::Left
        )
    }
}

/// One classified maneuver: what to do, and which way it leans.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct TurnInstruction {
    pub kind: TurnType,
    pub modifier: Modifier,
}

impl TurnInstruction {
    pub const NO_TURN: TurnInstruction = TurnInstruction {
        kind: TurnType::NoTurn,
        modifier: Modifier::Straight,
    };

    pub const DEPART: TurnInstruction = TurnInstruction {
        kind: TurnType::Depart,
        modifier: Modifier::Straight,
    };

    pub const ARRIVE: TurnInstruction = TurnInstruction {
        kind: TurnType::Arrive,
        modifier: Modifier::Straight,
    };

    #[inline]
    pub fn new(kind: TurnType, modifier: Modifier) -> Self {
        Self { kind, modifier }
    }
}

/// The outcome of classifying one traversed node.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Classification {
    pub instruction: TurnInstruction,
    pub lane_description_changed: bool,
}

/// Assigns each traversed node its structural turn (C3).
#[derive(Debug, Clone, Copy)]
pub struct TurnClassifier<'a> {
    config: &'a GuidanceConfig,
}

impl<'a> TurnClassifier<'a> {
    pub fn new(config: &'a GuidanceConfig) -> Self {
        Self { config }
    }

    /// Classifies the maneuver at the node where `entry` meets `exit`.
    ///
    /// The decision ladder runs mode boundaries, roundabout boundaries,
    /// degree-2 through-nodes, forks, ramp transitions and end-of-road
    /// before falling back to a plain binned turn; a lane overlay then
    /// reclassifies straight-on maneuvers between lane-described edges.
    pub fn classify(&self, view: &IntersectionView, entry: &Edge, exit: &Edge) -> Classification {
        let theta = view.chosen().deviation;

        let instruction = if entry.mode != exit.mode {
            TurnInstruction::new(TurnType::Notification, Modifier::from_degrees(theta))
        } else if let Some(instruction) = self.roundabout(view, entry, exit) {
            instruction
        } else if let Some(instruction) = self.through_node(view, entry, exit) {
            instruction
        } else if let Some(instruction) = self.fork(view) {
            instruction
        } else if let Some(instruction) = self.ramp(view, entry, exit) {
            instruction
        } else if let Some(instruction) = self.end_of_road(view) {
            instruction
        } else {
            TurnInstruction::new(TurnType::Turn, Modifier::from_degrees(theta))
        };

        self.overlay_lanes(instruction, entry, exit)
    }

    /// Roundabout boundaries, keyed off the circulation flag flipping or
    /// persisting across the node.
    fn roundabout(
        &self,
        view: &IntersectionView,
        entry: &Edge,
        exit: &Edge,
    ) -> Option<TurnInstruction> {
        let theta = view.chosen().deviation;

        match (entry.roundabout, exit.roundabout) {
            (false, true) => Some(TurnInstruction::new(
                TurnType::EnterRoundabout,
                Modifier::from_degrees(theta),
            )),
            (true, false) => Some(TurnInstruction::new(
                TurnType::ExitRoundabout,
                Modifier::from_degrees(theta),
            )),
            (true, true) => {
                // Circulation nodes surface only where an exit passes by;
                // in between, the curvature of the circle is not a turn.
                if view.passed_exits().any(|road| !road.roundabout) {
                    Some(TurnInstruction::new(
                        TurnType::StayOnRoundabout,
                        Modifier::Straight,
                    ))
                } else {
                    Some(TurnInstruction::NO_TURN)
                }
            }
            (false, false) => None,
        }
    }

    /// Through-nodes: the only enterable exit continues more or less
    /// ahead.
    fn through_node(
        &self,
        view: &IntersectionView,
        entry: &Edge,
        exit: &Edge,
    ) -> Option<TurnInstruction> {
        // U-turn aside, the chosen exit must be the only enterable road.
        // A one-way feeder merging in does not make a continuation node a
        // junction.
        if view.allowed_exits().count() != 1 {
            return None;
        }
        // A link boundary is a ramp transition, never a mere name change.
        if entry.is_link() != exit.is_link() {
            return None;
        }

        let theta = view.chosen().deviation;
        // Anonymous halves of one physical road share the empty identity.
        let same_name = entry.name_id() == exit.name_id();

        if same_name && theta.abs() <= self.config.continue_straight_tolerance {
            return Some(TurnInstruction::NO_TURN);
        }
        if !same_name && theta.abs() <= self.config.new_name_tolerance {
            return Some(TurnInstruction::new(
                TurnType::NewName,
                Modifier::from_degrees(theta),
            ));
        }

        None
    }

    /// Two comparable exits straddling straight read as a fork.
    fn fork(&self, view: &IntersectionView) -> Option<TurnInstruction> {
        let mut exits = view.allowed_exits().collect::<Vec<_>>();
        if exits.len() < 2 {
            return None;
        }

        // Best two by priority, geometry breaking ties.
        exits.sort_by(|a, b| {
            a.priority
                .cmp(&b.priority)
                .then(a.deviation.abs().total_cmp(&b.deviation.abs()))
        });
        let (left, right) = order_by_side(exits[0], exits[1]);

        let chosen = view.chosen();
        if chosen.edge != left.edge && chosen.edge != right.edge {
            return None;
        }

        let tolerance = self.config.fork_tolerance;
        let straddles = left.deviation <= 10.0 && right.deviation >= -10.0;
        if left.deviation.abs() >= tolerance
            || right.deviation.abs() >= tolerance
            || !straddles
            || !left.priority.comparable(&right.priority)
        {
            return None;
        }

        Some(TurnInstruction::new(
            TurnType::Fork,
            Modifier::leaning(if chosen.edge == left.edge {
                chosen.deviation.min(-0.1)
            } else {
                chosen.deviation.max(0.1)
            }),
        ))
    }

    /// Link transitions: leaving the through road onto a ramp, following a
    /// ramp into another, or a ramp joining a mainline.
    fn ramp(
        &self,
        view: &IntersectionView,
        entry: &Edge,
        exit: &Edge,
    ) -> Option<TurnInstruction> {
        let theta = view.chosen().deviation;

        match (entry.is_link(), exit.is_link()) {
            (false, true) => Some(TurnInstruction::new(
                TurnType::OffRamp,
                Modifier::from_degrees(theta),
            )),
            (true, true) => Some(TurnInstruction::new(
                TurnType::OnRamp,
                Modifier::from_degrees(theta),
            )),
            (true, false) => {
                // Only a merge when a mainline actually passes through.
                let mainline = view.cross_roads().any(|road| {
                    !road.is_link
                        && (road.name_id == view.chosen().name_id
                            || road.class == view.chosen().class)
                });

                mainline.then(|| {
                    TurnInstruction::new(TurnType::Merge, Modifier::leaning(theta))
                })
            }
            (false, false) => None,
        }
    }

    /// The arrival road ends against a cross street with a single way on.
    fn end_of_road(&self, view: &IntersectionView) -> Option<TurnInstruction> {
        if view.degree() < 2 {
            return None;
        }

        let mut allowed = view.allowed_exits();
        let only = allowed.next()?;
        if allowed.next().is_some() || only.deviation.abs() < 45.0 {
            return None;
        }

        Some(TurnInstruction::new(
            TurnType::EndOfRoad,
            Modifier::from_degrees(only.deviation),
        ))
    }

    /// Reclassifies a straight-on maneuver between lane-described edges as
    /// a `UseLane`, recording whether the lane picture changed.
    fn overlay_lanes(
        &self,
        instruction: TurnInstruction,
        entry: &Edge,
        exit: &Edge,
    ) -> Classification {
        let straight_on = instruction.kind == TurnType::NoTurn
            || (matches!(
                instruction.kind,
                TurnType::Turn | TurnType::Continue | TurnType::NewName
            ) && instruction.modifier == Modifier::Straight);

        if straight_on && !entry.turn_lanes.is_empty() && !exit.turn_lanes.is_empty() {
            return Classification {
                instruction: TurnInstruction::new(TurnType::UseLane, Modifier::Straight),
                lane_description_changed: lane_description_changed(
                    &entry.turn_lanes,
                    &exit.turn_lanes,
                ),
            };
        }

        Classification {
            instruction,
            lane_description_changed: false,
        }
    }
}

/// Orders a pair of roads left-tine first.
fn order_by_side<'a>(
    a: &'a IntersectionRoad,
    b: &'a IntersectionRoad,
) -> (&'a IntersectionRoad, &'a IntersectionRoad) {
    if a.deviation <= b.deviation { (a, b) } else { (b, a) }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bins_deviation_into_modifiers() {
        assert_eq!(Modifier::from_degrees(0.0), Modifier::Straight);
        assert_eq!(Modifier::from_degrees(9.9), Modifier::Straight);
        assert_eq!(Modifier::from_degrees(20.0), Modifier::SlightRight);
        assert_eq!(Modifier::from_degrees(-20.0), Modifier::SlightLeft);
        assert_eq!(Modifier::from_degrees(90.0), Modifier::Right);
        assert_eq!(Modifier::from_degrees(-90.0), Modifier::Left);
        assert_eq!(Modifier::from_degrees(150.0), Modifier::SharpRight);
        assert_eq!(Modifier::from_degrees(-150.0), Modifier::SharpLeft);
        assert_eq!(Modifier::from_degrees(180.0), Modifier::UTurn);
        assert_eq!(Modifier::from_degrees(-176.0), Modifier::UTurn);
    }

    #[test]
    fn leaning_never_reports_straight_off_axis() {
        assert_eq!(Modifier::leaning(4.0), Modifier::SlightRight);
        assert_eq!(Modifier::leaning(-4.0), Modifier::SlightLeft);
        assert_eq!(Modifier::leaning(0.0), Modifier::Straight);
        assert_eq!(Modifier::leaning(-60.0), Modifier::Left);
    }

    #[test]
    fn sides_and_pronunciation() {
        assert_eq!(Modifier::SharpLeft.side(), -1);
        assert_eq!(Modifier::SlightRight.side(), 1);
        assert_eq!(Modifier::UTurn.side(), 0);

        assert!(Modifier::Right.is_pronounced());
        assert!(Modifier::UTurn.is_pronounced());
        assert!(!Modifier::SlightLeft.is_pronounced());
        assert!(!Modifier::Straight.is_pronounced());
    }

    #[test]
    fn serialized_names_are_snake_case() {
        assert_eq!(TurnType::OffRamp.to_string(), "off_ramp");
        assert_eq!(TurnType::EnterRoundabout.to_string(), "enter_roundabout");
        assert_eq!(Modifier::SlightLeft.to_string(), "slight_left");
    }
}
