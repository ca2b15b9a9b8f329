use rustc_hash::FxHashSet;

use crate::geo::{arrival_bearing, clockwise_from, departure_bearing, reverse, signed_delta};
use crate::guidance::{GuidanceError, RoadPriority};
use crate::model::{Edge, EdgeId, NameId, NodeId, RoadClass, RoadNetwork, TravelMode};

/// A bend sharper than this between an arrival edge and an outgoing edge
/// back to the previous node is read as the reverse half of the same road.
const UTURN_RECOGNITION_DEGREES: f64 = 150.0;

/// One incident road at a traversed node, as seen from the arrival edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionRoad {
    pub edge: EdgeId,
    /// Heading leaving the node along this road, relative to due north.
    pub bearing: f64,
    /// Signed deviation from continuing straight, clockwise positive.
    pub deviation: f64,
    /// Whether the road may legally be entered from the arrival edge.
    pub entry_allowed: bool,
    pub priority: RoadPriority,
    pub name_id: NameId,
    pub class: RoadClass,
    pub mode: TravelMode,
    pub is_link: bool,
    pub roundabout: bool,
    /// The u-turn candidate: the reverse half of the arrival road.
    pub uturn: bool,
    /// A road that only feeds the node; present for topology queries,
    /// never enterable.
    pub approaching: bool,
}

/// The ordered set of incident roads at one traversed node.
///
/// Roads are sorted by clockwise bearing measured from the reverse of the
/// arrival direction, which puts the u-turn candidate at index 0; it is
/// synthesised with `entry_allowed = false` when the arrival road has no
/// returning half. A plain record with precomputed fields, built once per
/// node and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct IntersectionView {
    pub node: NodeId,
    pub entry_edge: EdgeId,
    /// Heading arriving at the node, relative to due north.
    pub entry_bearing: f64,
    pub entry_name: NameId,
    roads: Vec<IntersectionRoad>,
    exit_index: usize,
}

impl IntersectionView {
    #[inline]
    pub fn roads(&self) -> &[IntersectionRoad] {
        &self.roads
    }

    /// The road the route departs on.
    #[inline]
    pub fn chosen(&self) -> &IntersectionRoad {
        &self.roads[self.exit_index]
    }

    #[inline]
    pub fn uturn(&self) -> Option<&IntersectionRoad> {
        self.roads.first().filter(|road| road.uturn)
    }

    /// Enterable roads other than the u-turn candidate.
    pub fn allowed_exits(&self) -> impl Iterator<Item = &IntersectionRoad> {
        self.roads
            .iter()
            .filter(|road| road.entry_allowed && !road.uturn)
    }

    /// Enterable roads the route did not take.
    pub fn passed_exits(&self) -> impl Iterator<Item = &IntersectionRoad> {
        let chosen = self.chosen().edge;
        self.allowed_exits().filter(move |road| road.edge != chosen)
    }

    /// Incident roads that are neither the u-turn candidate nor the chosen
    /// exit, regardless of enterability.
    pub fn cross_roads(&self) -> impl Iterator<Item = &IntersectionRoad> {
        let chosen = self.chosen().edge;
        self.roads
            .iter()
            .filter(move |road| !road.uturn && road.edge != chosen)
    }

    /// Count of incident roads besides the u-turn candidate; the node's
    /// degree as a driver perceives it.
    pub fn degree(&self) -> usize {
        self.roads.iter().filter(|road| !road.uturn).count()
    }

    /// Named identities of every incident road, the arrival road included.
    /// Segregated-half recognition intersects these across two nodes.
    pub fn incident_names(&self) -> FxHashSet<NameId> {
        self.roads
            .iter()
            .map(|road| road.name_id)
            .chain(std::iter::once(self.entry_name))
            .filter(|name| !name.is_none())
            .collect()
    }
}

/// Builds [`IntersectionView`]s against a [`RoadNetwork`].
#[derive(Debug, Clone, Copy)]
pub struct IntersectionAnalyser<'a> {
    network: &'a RoadNetwork,
}

impl<'a> IntersectionAnalyser<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self { network }
    }

    /// The view at the node where `entry` ends, departing on `exit`.
    ///
    /// Fails when the chosen exit does not leave the node, is banned by a
    /// restriction, runs against a one-way, or either edge has degenerate
    /// geometry — all upstream errors in the supplied path.
    pub fn view(&self, entry: &Edge, exit: EdgeId) -> crate::Result<IntersectionView> {
        let node = entry.target;
        let entry_bearing = arrival_bearing(&entry.geometry).ok_or_else(|| {
            GuidanceError::invalid(format!("degenerate geometry on edge {}", entry.id))
        })?;

        let origin = reverse(entry_bearing);
        let restrictions = self.network.restrictions();

        let mut roads = Vec::new();
        for candidate in self.network.outgoing(node) {
            let bearing = departure_bearing(&candidate.geometry).ok_or_else(|| {
                GuidanceError::invalid(format!("degenerate geometry on edge {}", candidate.id))
            })?;
            let deviation = signed_delta(bearing, entry_bearing);

            let returning = candidate.target == entry.source
                && deviation.abs() >= UTURN_RECOGNITION_DEGREES;

            roads.push(IntersectionRoad {
                edge: candidate.id,
                bearing,
                deviation,
                entry_allowed: restrictions.allows(entry.id, node, candidate.id)
                    && entry.mode.can_transition_to(candidate.mode),
                priority: RoadPriority::of(candidate, entry.name_id()),
                name_id: candidate.name_id(),
                class: candidate.class,
                mode: candidate.mode,
                is_link: candidate.is_link(),
                roundabout: candidate.roundabout,
                uturn: returning,
                approaching: false,
            });
        }

        // A road feeding the node on a one-way still shapes the driver's
        // perception of the junction; keep it visible, never enterable.
        for feeder in self.network.incoming(node) {
            if feeder.id == entry.id || self.network.has_edge(node, feeder.source) {
                continue;
            }

            let along = arrival_bearing(&feeder.geometry).ok_or_else(|| {
                GuidanceError::invalid(format!("degenerate geometry on edge {}", feeder.id))
            })?;
            let bearing = reverse(along);

            roads.push(IntersectionRoad {
                edge: feeder.id,
                bearing,
                deviation: signed_delta(bearing, entry_bearing),
                entry_allowed: false,
                priority: RoadPriority::of(feeder, entry.name_id()),
                name_id: feeder.name_id(),
                class: feeder.class,
                mode: feeder.mode,
                is_link: feeder.is_link(),
                roundabout: feeder.roundabout,
                uturn: false,
                approaching: true,
            });
        }

        if !roads.iter().any(|road| road.uturn) {
            roads.push(IntersectionRoad {
                edge: entry.id,
                bearing: origin,
                deviation: 180.0,
                entry_allowed: false,
                priority: RoadPriority::of(entry, entry.name_id()),
                name_id: entry.name_id(),
                class: entry.class,
                mode: entry.mode,
                is_link: entry.is_link(),
                roundabout: entry.roundabout,
                uturn: true,
                approaching: false,
            });
        }

        roads.sort_by(|a, b| {
            let key = |road: &IntersectionRoad| {
                if road.uturn {
                    -1.0
                } else {
                    clockwise_from(road.bearing, origin)
                }
            };

            key(a).total_cmp(&key(b))
        });

        let exit_index = roads
            .iter()
            .position(|road| road.edge == exit && !road.approaching)
            .ok_or_else(|| {
                GuidanceError::invalid(format!("edge {exit} does not leave node {node}"))
            })?;
        if !roads[exit_index].entry_allowed {
            return Err(GuidanceError::invalid(format!(
                "turn from edge {} onto edge {exit} at node {node} is not permitted",
                entry.id
            )));
        }

        Ok(IntersectionView {
            node,
            entry_edge: entry.id,
            entry_bearing,
            entry_name: entry.name_id(),
            roads,
            exit_index,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NetworkBuilder, RoadClass, TurnRestriction, WaySpec};
    use approx::assert_relative_eq;

    /// A crossroads: arrival from the west, exits north, east and south,
    /// plus the return half of the arrival road.
    fn crossroads() -> RoadNetwork {
        let mut builder = NetworkBuilder::default();
        builder
            .grid_node(1, -100.0, 0.0)
            .grid_node(2, 0.0, 0.0)
            .grid_node(3, 0.0, 100.0)
            .grid_node(4, 100.0, 0.0)
            .grid_node(5, 0.0, -100.0)
            .way(&[1, 2, 4], WaySpec::named("east-west").class(RoadClass::Secondary))
            .way(&[3, 2, 5], WaySpec::named("north-south").class(RoadClass::Secondary));

        builder.build()
    }

    #[test]
    fn orders_clockwise_from_the_uturn() {
        let network = crossroads();
        let entry = network.edge_between(1, 2).unwrap();
        let exit = network.edge_between(2, 4).unwrap().id;

        let view = IntersectionAnalyser::new(&network)
            .view(entry, exit)
            .unwrap();

        assert!(view.roads()[0].uturn);
        assert_eq!(view.degree(), 3);

        // After the u-turn: north (left), east (straight), south (right).
        let deviations = view.roads()[1..]
            .iter()
            .map(|road| road.deviation)
            .collect::<Vec<_>>();
        assert_relative_eq!(deviations[0], -90.0, epsilon = 0.5);
        assert_relative_eq!(deviations[1], 0.0, epsilon = 0.5);
        assert_relative_eq!(deviations[2], 90.0, epsilon = 0.5);

        assert_eq!(view.chosen().edge, exit);
        assert_relative_eq!(view.chosen().deviation, 0.0, epsilon = 0.5);
    }

    #[test]
    fn restrictions_withdraw_entry_permission() {
        let mut builder = NetworkBuilder::default();
        builder
            .grid_node(1, -100.0, 0.0)
            .grid_node(2, 0.0, 0.0)
            .grid_node(3, 0.0, 100.0)
            .grid_node(4, 100.0, 0.0)
            .way(&[1, 2, 4], WaySpec::named("ahead").class(RoadClass::Secondary))
            .way(&[2, 3], WaySpec::named("side").class(RoadClass::Secondary));
        let network = builder.build();

        let entry = network.edge_between(1, 2).unwrap();
        let side = network.edge_between(2, 3).unwrap().id;
        let ahead = network.edge_between(2, 4).unwrap().id;

        let mut restricted = NetworkBuilder::default();
        restricted
            .grid_node(1, -100.0, 0.0)
            .grid_node(2, 0.0, 0.0)
            .grid_node(3, 0.0, 100.0)
            .grid_node(4, 100.0, 0.0)
            .way(&[1, 2, 4], WaySpec::named("ahead").class(RoadClass::Secondary))
            .way(&[2, 3], WaySpec::named("side").class(RoadClass::Secondary))
            .restriction(TurnRestriction::No {
                from: entry.id,
                via: 2,
                to: side,
            });
        let restricted = restricted.build();

        let entry = restricted.edge_between(1, 2).unwrap();
        let view = IntersectionAnalyser::new(&restricted)
            .view(entry, ahead)
            .unwrap();
        let banned = view
            .roads()
            .iter()
            .find(|road| road.edge == side)
            .unwrap();
        assert!(!banned.entry_allowed);

        // Taking the banned exit is an input error, not a degraded result.
        assert!(IntersectionAnalyser::new(&restricted)
            .view(entry, side)
            .is_err());
    }

    #[test]
    fn oneway_feeders_stay_visible() {
        let mut builder = NetworkBuilder::default();
        builder
            .grid_node(1, -100.0, 0.0)
            .grid_node(2, 0.0, 0.0)
            .grid_node(3, 0.0, 100.0)
            .grid_node(4, 100.0, 0.0)
            .way(&[1, 2, 4], WaySpec::named("mainline").class(RoadClass::Primary))
            .way(
                &[3, 2],
                WaySpec::named("feeder").class(RoadClass::Primary).oneway(),
            );
        let network = builder.build();

        let entry = network.edge_between(1, 2).unwrap();
        let exit = network.edge_between(2, 4).unwrap().id;
        let view = IntersectionAnalyser::new(&network)
            .view(entry, exit)
            .unwrap();

        let feeder = view.roads().iter().find(|road| road.approaching).unwrap();
        assert!(!feeder.entry_allowed);
        assert_eq!(view.degree(), 2);
        assert!(view
            .incident_names()
            .contains(&NameId::of("feeder", "")));
    }
}
