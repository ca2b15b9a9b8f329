use geo::{Distance, Haversine, LineString, Point};
use log::warn;
use petgraph::prelude::DiGraphMap;
use petgraph::Direction;
use rustc_hash::FxHashMap;

use crate::model::{
    Edge, EdgeId, LaneTurn, NodeId, RestrictionTable, RoadClass, TravelMode, TurnRestriction,
};

/// The read-only road network guidance runs against.
///
/// Produced once by the ingestion stage (or a [`NetworkBuilder`] in tests)
/// and borrowed immutably for every query; nothing here mutates during
/// routing. The graph stores edge ids as weights, with the attribute
/// records held in a side table, matching the narrow oracle surface the
/// core consumes: incident edges, restrictions, bearings, distances.
#[derive(Debug, Clone, Default)]
pub struct RoadNetwork {
    graph: DiGraphMap<NodeId, EdgeId>,
    edges: FxHashMap<EdgeId, Edge>,
    positions: FxHashMap<NodeId, Point>,
    restrictions: RestrictionTable,
}

impl RoadNetwork {
    pub fn builder() -> NetworkBuilder {
        NetworkBuilder::default()
    }

    #[inline]
    pub fn edge(&self, id: EdgeId) -> Option<&Edge> {
        self.edges.get(&id)
    }

    #[inline]
    pub fn position(&self, node: NodeId) -> Option<Point> {
        self.positions.get(&node).copied()
    }

    #[inline]
    pub fn restrictions(&self) -> &RestrictionTable {
        &self.restrictions
    }

    /// Edges leaving `node`.
    pub fn outgoing(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.graph
            .edges_directed(node, Direction::Outgoing)
            .filter_map(|(_, _, id)| self.edges.get(id))
    }

    /// Edges arriving at `node`.
    pub fn incoming(&self, node: NodeId) -> impl Iterator<Item = &Edge> + '_ {
        self.graph
            .edges_directed(node, Direction::Incoming)
            .filter_map(|(_, _, id)| self.edges.get(id))
    }

    /// The directed edge from `source` to `target`, should one exist.
    pub fn edge_between(&self, source: NodeId, target: NodeId) -> Option<&Edge> {
        self.graph
            .edge_weight(source, target)
            .and_then(|id| self.edges.get(id))
    }

    #[inline]
    pub fn has_edge(&self, source: NodeId, target: NodeId) -> bool {
        self.graph.contains_edge(source, target)
    }

    /// Resolves a node walk into the edge sequence guidance consumes.
    ///
    /// Convenience for callers (and scenario fixtures) that think in nodes;
    /// `None` when any hop lacks a connecting edge.
    pub fn path_via(&self, nodes: &[NodeId]) -> Option<Vec<EdgeId>> {
        nodes
            .windows(2)
            .map(|pair| self.edge_between(pair[0], pair[1]).map(|edge| edge.id))
            .collect()
    }
}

/// Attributes shared by every edge cut from one way.
#[derive(Debug, Clone)]
pub struct WaySpec {
    name: String,
    reference: String,
    class: RoadClass,
    mode: TravelMode,
    lanes: u8,
    turn_lanes: Vec<LaneTurn>,
    oneway: bool,
    bridge: bool,
    tunnel: bool,
    roundabout: bool,
}

impl Default for WaySpec {
    fn default() -> Self {
        Self {
            name: String::new(),
            reference: String::new(),
            class: RoadClass::Other,
            mode: TravelMode::Driving,
            lanes: 0,
            turn_lanes: Vec::new(),
            oneway: false,
            bridge: false,
            tunnel: false,
            roundabout: false,
        }
    }
}

impl WaySpec {
    pub fn named(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn unnamed() -> Self {
        Self::default()
    }

    /// A ferry route: ferry class and ferry travel mode in one.
    pub fn ferry() -> Self {
        Self {
            class: RoadClass::Ferry,
            mode: TravelMode::Ferry,
            ..Self::default()
        }
    }

    pub fn reference(mut self, reference: &str) -> Self {
        self.reference = reference.to_string();
        self
    }

    pub fn class(mut self, class: RoadClass) -> Self {
        self.class = class;
        self
    }

    pub fn mode(mut self, mode: TravelMode) -> Self {
        self.mode = mode;
        self
    }

    pub fn lanes(mut self, lanes: u8) -> Self {
        self.lanes = lanes;
        self
    }

    pub fn turn_lanes(mut self, turn_lanes: &[LaneTurn]) -> Self {
        self.turn_lanes = turn_lanes.to_vec();
        self
    }

    pub fn oneway(mut self) -> Self {
        self.oneway = true;
        self
    }

    pub fn bridge(mut self) -> Self {
        self.bridge = true;
        self
    }

    pub fn tunnel(mut self) -> Self {
        self.tunnel = true;
        self
    }

    /// Roundabout circulation; implies oneway.
    pub fn roundabout(mut self) -> Self {
        self.roundabout = true;
        self.oneway = true;
        self
    }
}

/// Builds a [`RoadNetwork`] from nodes, ways and restrictions.
///
/// This is the synthetic-map surface the scenario harness drives: place
/// nodes, connect them with ways, and every consecutive node pair becomes a
/// directed edge (a mirrored pair unless the way is oneway). Distances come
/// from the geometry, durations from the class's free-flow speed, standing
/// in for the excluded weighting stage.
#[derive(Debug, Default)]
pub struct NetworkBuilder {
    nodes: FxHashMap<NodeId, Point>,
    ways: Vec<(Vec<NodeId>, WaySpec)>,
    restrictions: Vec<TurnRestriction>,
}

/// Meters per degree of latitude; fixtures live near the equator where a
/// degree of longitude spans the same.
const METERS_PER_DEGREE: f64 = 111_111.0;

impl NetworkBuilder {
    pub fn node(&mut self, id: NodeId, position: Point) -> &mut Self {
        self.nodes.insert(id, position);
        self
    }

    /// Places a node on a local metric grid: `x` meters east and `y` meters
    /// north of the origin.
    pub fn grid_node(&mut self, id: NodeId, x: f64, y: f64) -> &mut Self {
        self.node(
            id,
            Point::new(x / METERS_PER_DEGREE, y / METERS_PER_DEGREE),
        )
    }

    pub fn way(&mut self, nodes: &[NodeId], spec: WaySpec) -> &mut Self {
        self.ways.push((nodes.to_vec(), spec));
        self
    }

    pub fn restriction(&mut self, restriction: TurnRestriction) -> &mut Self {
        self.restrictions.push(restriction);
        self
    }

    pub fn build(&self) -> RoadNetwork {
        let mut network = RoadNetwork {
            restrictions: RestrictionTable::new(self.restrictions.iter().copied()),
            positions: self.nodes.clone(),
            ..RoadNetwork::default()
        };

        let mut next_id: EdgeId = 1;
        for (nodes, spec) in &self.ways {
            for pair in nodes.windows(2) {
                let (source, target) = (pair[0], pair[1]);

                let (Some(from), Some(to)) =
                    (self.nodes.get(&source), self.nodes.get(&target))
                else {
                    // Conservative degradation: an unplaced node drops the
                    // segment, and any path over it later reports as invalid.
                    warn!("way references unplaced node in {source} -> {target}, skipping");
                    continue;
                };

                Self::insert_edge(&mut network, next_id, source, target, *from, *to, spec);
                next_id += 1;

                if !spec.oneway {
                    Self::insert_edge(&mut network, next_id, target, source, *to, *from, spec);
                    next_id += 1;
                }
            }
        }

        network
    }

    fn insert_edge(
        network: &mut RoadNetwork,
        id: EdgeId,
        source: NodeId,
        target: NodeId,
        from: Point,
        to: Point,
        spec: &WaySpec,
    ) {
        if network.graph.contains_edge(source, target) {
            warn!("duplicate edge {source} -> {target}, keeping the first");
            return;
        }

        let distance = Haversine::distance(from, to);
        let edge = Edge {
            id,
            source,
            target,
            name: spec.name.clone(),
            reference: spec.reference.clone(),
            class: spec.class,
            mode: spec.mode,
            lanes: spec.lanes,
            turn_lanes: spec.turn_lanes.clone(),
            oneway: spec.oneway,
            bridge: spec.bridge,
            tunnel: spec.tunnel,
            roundabout: spec.roundabout,
            geometry: LineString::from(vec![from.0, to.0]),
            distance,
            duration: distance / spec.class.free_flow_speed(),
        };

        network.graph.add_edge(source, target, id);
        network.edges.insert(id, edge);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn corner() -> RoadNetwork {
        let mut builder = RoadNetwork::builder();
        builder
            .grid_node(1, 0.0, 0.0)
            .grid_node(2, 100.0, 0.0)
            .grid_node(3, 100.0, 100.0)
            .way(&[1, 2], WaySpec::named("east").class(RoadClass::Secondary))
            .way(
                &[2, 3],
                WaySpec::named("north").class(RoadClass::Secondary).oneway(),
            );

        builder.build()
    }

    #[test]
    fn two_way_ways_mirror_their_edges() {
        let network = corner();

        assert!(network.has_edge(1, 2));
        assert!(network.has_edge(2, 1));
        assert!(network.has_edge(2, 3));
        assert!(!network.has_edge(3, 2));
    }

    #[test]
    fn resolves_node_walks_to_edge_paths() {
        let network = corner();

        let path = network.path_via(&[1, 2, 3]).unwrap();
        assert_eq!(path.len(), 2);
        assert_eq!(network.edge(path[0]).unwrap().name, "east");
        assert_eq!(network.edge(path[1]).unwrap().name, "north");

        assert!(network.path_via(&[3, 2]).is_none());
    }

    #[test]
    fn grid_distances_are_metric() {
        let network = corner();

        let edge = network.edge_between(1, 2).unwrap();
        assert_relative_eq!(edge.distance, 100.0, max_relative = 0.01);
        assert!(edge.duration > 0.0);
    }
}
