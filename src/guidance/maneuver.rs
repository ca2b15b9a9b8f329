use geo::{Bearing, Haversine, LineString, Point};
use serde::Serialize;

use crate::geo::signed_delta;
use crate::guidance::step::append_line;
use crate::guidance::{Modifier, Step, TurnType};
use crate::model::{NodeId, RoadNetwork, TravelMode};

/// The destination sits to a side once the approach deviates this much
/// from dead ahead.
const ARRIVAL_SIDE_DEGREES: f64 = 30.0;

/// One driver-facing action in the final narrative.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Maneuver {
    pub node: NodeId,
    pub location: Point,
    pub kind: TurnType,
    pub modifier: Modifier,
    /// Name of the road being entered; empty when the road is anonymous.
    pub name: String,
    pub mode: TravelMode,
    /// For roundabout entries, the 1-based ordinal of the exit to take.
    pub exit: Option<u32>,
}

/// The assembled guidance answer: the maneuver list plus the route-level
/// aggregates a renderer wants alongside it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Route {
    pub maneuvers: Vec<Maneuver>,
    pub geometry: LineString,
    /// Meters.
    pub distance: f64,
    /// Seconds.
    pub duration: f64,
}

/// Maps the collapsed step list onto the output records (C6).
#[derive(Debug, Clone, Copy)]
pub struct ManeuverAssembler<'a> {
    network: &'a RoadNetwork,
}

impl<'a> ManeuverAssembler<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    /// Emits one maneuver per surviving step boundary. The reported name
    /// is the road being entered — the step's own — and an anonymous road
    /// stays an empty string with the structural maneuver preserved.
    pub fn assemble(&self, steps: &[Step], destination: Option<Point>) -> Route {
        let mut maneuvers = Vec::with_capacity(steps.len());
        let mut geometry = LineString::new(Vec::new());
        let mut distance = 0.0;
        let mut duration = 0.0;

        for step in steps {
            let location = self
                .network
                .position(step.maneuver_node)
                .or_else(|| step.geometry.points().next())
                .unwrap_or_default();

            let modifier = if step.is_arrive() {
                arrival_side(location, destination, step.entry_bearing)
            } else {
                step.modifier()
            };

            maneuvers.push(Maneuver {
                node: step.maneuver_node,
                location,
                kind: step.kind(),
                modifier,
                name: step.name.clone(),
                mode: step.mode,
                exit: (step.kind() == TurnType::EnterRoundabout)
                    .then(|| step.exits_passed + 1),
            });

            distance += step.distance;
            duration += step.duration;
            append_line(&mut geometry, &step.geometry);
        }

        Route {
            maneuvers,
            geometry,
            distance,
            duration,
        }
    }
}

/// Which side the destination lies on, relative to the final heading.
fn arrival_side(location: Point, destination: Option<Point>, final_bearing: f64) -> Modifier {
    let Some(destination) = destination else {
        return Modifier::Straight;
    };
    if destination == location {
        return Modifier::Straight;
    }

    let toward = Haversine::bearing(location, destination);
    let deviation = signed_delta(toward, final_bearing);

    if deviation.abs() <= ARRIVAL_SIDE_DEGREES {
        Modifier::Straight
    } else if deviation > 0.0 {
        Modifier::Right
    } else {
        Modifier::Left
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn arrival_side_tracks_the_destination() {
        let location = Point::new(0.0, 0.0);
        // Heading due north.
        let east = Point::new(0.001, 0.0);
        let west = Point::new(-0.001, 0.0);
        let ahead = Point::new(0.0, 0.001);

        assert_eq!(arrival_side(location, Some(east), 0.0), Modifier::Right);
        assert_eq!(arrival_side(location, Some(west), 0.0), Modifier::Left);
        assert_eq!(arrival_side(location, Some(ahead), 0.0), Modifier::Straight);
        assert_eq!(arrival_side(location, None, 0.0), Modifier::Straight);
    }
}
