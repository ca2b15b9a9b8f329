use geo::LineString;
use itertools::Itertools;
use log::trace;

use crate::geo::{arrival_bearing, departure_bearing};
use crate::guidance::{
    Classification, GuidanceConfig, GuidanceError, IntersectionAnalyser, IntersectionView,
    Modifier, TurnClassifier, TurnInstruction, TurnType,
};
use crate::model::{Edge, EdgeId, NameId, NodeId, RoadNetwork, TravelMode};

/// One pre-collapse segment of the route.
///
/// A step spans the edges between two surfaced maneuvers; its
/// `instruction` is the maneuver *into* the step, located at
/// `maneuver_node`. Steps are created by the step builder and afterwards
/// mutated only by the collapsing rewrites.
#[derive(Debug, Clone, PartialEq)]
pub struct Step {
    pub maneuver_node: NodeId,
    pub exit_node: NodeId,

    pub name: String,
    pub reference: String,
    pub mode: TravelMode,

    pub distance: f64,
    pub duration: f64,

    pub instruction: TurnInstruction,
    /// The view at `maneuver_node`; absent on the depart and arrive steps,
    /// which have no arrival edge or no departure edge.
    pub view: Option<IntersectionView>,
    pub geometry: LineString,

    /// Signed deviation taken at `maneuver_node`, clockwise positive.
    pub turn_degrees: f64,
    /// Heading arriving at `maneuver_node`.
    pub entry_bearing: f64,
    /// Heading leaving `maneuver_node`.
    pub exit_bearing: f64,

    /// Roundabout exits passed while this step was traversed.
    pub exits_passed: u32,

    pub is_sliproad: bool,
    pub is_link: bool,
    /// Every edge of the step is a bridge or tunnel.
    pub is_structure: bool,
    /// Every edge of the step is one-way.
    pub is_oneway: bool,
    pub lane_description_changed: bool,

    pub first_edge: Option<EdgeId>,
    pub last_edge: Option<EdgeId>,
}

impl Step {
    /// The opening step of a route, covering the first edge.
    fn depart(edge: &Edge) -> Self {
        let bearing = departure_bearing(&edge.geometry).unwrap_or_default();

        Self {
            maneuver_node: edge.source,
            exit_node: edge.target,
            name: edge.name.clone(),
            reference: edge.reference.clone(),
            mode: edge.mode,
            distance: edge.distance,
            duration: edge.duration,
            instruction: TurnInstruction::DEPART,
            view: None,
            geometry: edge.geometry.clone(),
            turn_degrees: 0.0,
            entry_bearing: bearing,
            exit_bearing: bearing,
            exits_passed: 0,
            is_sliproad: false,
            is_link: edge.is_link(),
            is_structure: edge.is_structure(),
            is_oneway: edge.oneway,
            lane_description_changed: false,
            first_edge: Some(edge.id),
            last_edge: Some(edge.id),
        }
    }

    /// A step opened by a surfaced maneuver onto `edge`.
    fn open(view: IntersectionView, classification: Classification, edge: &Edge) -> Self {
        let exits_passed = u32::from(classification.instruction.kind == TurnType::StayOnRoundabout);

        Self {
            maneuver_node: view.node,
            exit_node: edge.target,
            name: edge.name.clone(),
            reference: edge.reference.clone(),
            mode: edge.mode,
            distance: edge.distance,
            duration: edge.duration,
            instruction: classification.instruction,
            turn_degrees: view.chosen().deviation,
            entry_bearing: view.entry_bearing,
            exit_bearing: view.chosen().bearing,
            view: Some(view),
            geometry: edge.geometry.clone(),
            exits_passed,
            is_sliproad: false,
            is_link: edge.is_link(),
            is_structure: edge.is_structure(),
            is_oneway: edge.oneway,
            lane_description_changed: classification.lane_description_changed,
            first_edge: Some(edge.id),
            last_edge: Some(edge.id),
        }
    }

    /// The zero-length closing step at the destination.
    fn arrive(edge: &Edge) -> Self {
        let bearing = arrival_bearing(&edge.geometry).unwrap_or_default();
        let end = edge.geometry.0.last().copied().into_iter().collect::<Vec<_>>();

        Self {
            maneuver_node: edge.target,
            exit_node: edge.target,
            name: edge.name.clone(),
            reference: edge.reference.clone(),
            mode: edge.mode,
            distance: 0.0,
            duration: 0.0,
            instruction: TurnInstruction::ARRIVE,
            view: None,
            geometry: LineString::from(end),
            turn_degrees: 0.0,
            entry_bearing: bearing,
            exit_bearing: bearing,
            exits_passed: 0,
            is_sliproad: false,
            is_link: false,
            is_structure: false,
            is_oneway: false,
            lane_description_changed: false,
            first_edge: Some(edge.id),
            last_edge: None,
        }
    }

    /// Extends the step across a silent node onto `edge`.
    fn push_edge(&mut self, edge: &Edge) {
        self.distance += edge.distance;
        self.duration += edge.duration;
        self.exit_node = edge.target;
        self.last_edge = Some(edge.id);
        self.is_structure = self.is_structure && edge.is_structure();
        self.is_oneway = self.is_oneway && edge.oneway;
        append_line(&mut self.geometry, &edge.geometry);
    }

    /// Absorbs the following step, discarding its maneuver. The collapsing
    /// rewrites call this; the step keeps its own identity and instruction.
    pub(crate) fn absorb(&mut self, next: &Step) {
        self.distance += next.distance;
        self.duration += next.duration;
        self.exit_node = next.exit_node;
        self.last_edge = next.last_edge.or(self.last_edge);
        self.exits_passed += next.exits_passed;
        self.is_structure = self.is_structure && next.is_structure;
        self.is_oneway = self.is_oneway && next.is_oneway;
        append_line(&mut self.geometry, &next.geometry);
    }

    #[inline]
    pub fn kind(&self) -> TurnType {
        self.instruction.kind
    }

    #[inline]
    pub fn modifier(&self) -> Modifier {
        self.instruction.modifier
    }

    #[inline]
    pub fn name_id(&self) -> NameId {
        NameId::of(&self.name, &self.reference)
    }

    #[inline]
    pub fn is_depart(&self) -> bool {
        self.kind() == TurnType::Depart
    }

    #[inline]
    pub fn is_arrive(&self) -> bool {
        self.kind() == TurnType::Arrive
    }

    /// Same `(name, ref, mode)` identity, the triple the silent-boundary
    /// invariant is stated over.
    #[inline]
    pub fn same_road(&self, other: &Step) -> bool {
        self.name == other.name && self.reference == other.reference && self.mode == other.mode
    }
}

/// Appends `src` to `dst`, dropping the shared joint coordinate.
pub(crate) fn append_line(dst: &mut LineString, src: &LineString) {
    let joint = dst.0.last().copied();
    dst.0.extend(
        src.0
            .iter()
            .skip_while(|coord| joint.as_ref() == Some(*coord))
            .copied(),
    );
}

/// Cuts an edge sequence into [`Step`]s (C4).
///
/// Every traversed node is classified; silent nodes extend the current
/// step, everything else opens a new one. The list always starts with a
/// depart step and ends with a zero-length arrive step.
#[derive(Debug, Clone, Copy)]
pub struct StepBuilder<'a> {
    network: &'a RoadNetwork,
    config: &'a GuidanceConfig,
}

impl<'a> StepBuilder<'a> {
    pub fn new(network: &'a RoadNetwork, config: &'a GuidanceConfig) -> Self {
        Self { network, config }
    }

    pub fn build(&self, path: &[EdgeId]) -> crate::Result<Vec<Step>> {
        let edges = path
            .iter()
            .map(|id| {
                self.network
                    .edge(*id)
                    .ok_or_else(|| GuidanceError::invalid(format!("unknown edge {id}")))
            })
            .collect::<crate::Result<Vec<_>>>()?;

        let Some(&first) = edges.first() else {
            return Err(GuidanceError::invalid("empty edge sequence"));
        };

        let analyser = IntersectionAnalyser::new(self.network);
        let classifier = TurnClassifier::new(self.config);

        let mut steps = Vec::new();
        let mut current = Step::depart(first);

        for (entry, exit) in edges.iter().tuple_windows() {
            if entry.target != exit.source {
                return Err(GuidanceError::invalid(format!(
                    "edges {} and {} do not share a node",
                    entry.id, exit.id
                )));
            }

            let view = analyser.view(entry, exit.id)?;
            let classification = classifier.classify(&view, entry, exit);
            trace!(
                "node {}: {:?} {:?}",
                view.node,
                classification.instruction.kind,
                classification.instruction.modifier
            );

            if classification.instruction.kind == TurnType::NoTurn {
                current.push_edge(exit);
            } else {
                steps.push(std::mem::replace(
                    &mut current,
                    Step::open(view, classification, exit),
                ));
            }
        }

        let last = edges.last().copied().unwrap_or(first);
        steps.push(current);
        steps.push(Step::arrive(last));

        for step in &mut steps {
            step.is_sliproad = step.is_link
                && !step.is_depart()
                && !step.is_arrive()
                && step.distance < self.config.sliproad_max_length;
        }

        Ok(steps)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{NetworkBuilder, RoadClass, WaySpec};

    fn straight_road() -> (RoadNetwork, Vec<EdgeId>) {
        let mut builder = NetworkBuilder::default();
        builder
            .grid_node(1, 0.0, 0.0)
            .grid_node(2, 100.0, 0.0)
            .grid_node(3, 200.0, 0.0)
            .grid_node(4, 300.0, 0.0)
            .way(
                &[1, 2, 3, 4],
                WaySpec::named("long road").class(RoadClass::Primary),
            );
        let network = builder.build();
        let path = network.path_via(&[1, 2, 3, 4]).unwrap();

        (network, path)
    }

    #[test]
    fn silent_nodes_extend_the_depart_step() {
        let (network, path) = straight_road();
        let config = GuidanceConfig::default();

        let steps = StepBuilder::new(&network, &config).build(&path).unwrap();

        assert_eq!(steps.len(), 2);
        assert!(steps[0].is_depart());
        assert!(steps[1].is_arrive());
        assert!((steps[0].distance - 300.0).abs() < 3.0);
        assert_eq!(steps[0].geometry.0.len(), 4);
        assert_eq!(steps[0].exit_node, 4);
    }

    #[test]
    fn disconnected_paths_are_invalid() {
        let (network, _) = straight_road();
        let forward = network.edge_between(1, 2).unwrap().id;
        let disjoint = network.edge_between(3, 4).unwrap().id;

        let config = GuidanceConfig::default();
        let result = StepBuilder::new(&network, &config).build(&[forward, disjoint]);
        assert!(matches!(result, Err(GuidanceError::InvalidRouteInput(_))));
    }

    #[test]
    fn empty_paths_are_invalid() {
        let (network, _) = straight_road();
        let config = GuidanceConfig::default();

        assert!(StepBuilder::new(&network, &config).build(&[]).is_err());
        assert!(StepBuilder::new(&network, &config).build(&[999]).is_err());
    }
}
