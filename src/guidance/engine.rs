use geo::Point;

use crate::guidance::{Collapser, GuidanceConfig, ManeuverAssembler, Route, Step, StepBuilder};
use crate::model::{EdgeId, RoadNetwork};

/// The guidance pipeline, end to end.
///
/// Borrows the network immutably and owns nothing but its configuration;
/// a call allocates the transient step vector and the output route, so
/// concurrent requests simply run their own engines over the same shared
/// network.
#[derive(Debug, Clone, Copy)]
pub struct GuidanceEngine<'a> {
    network: &'a RoadNetwork,
    config: GuidanceConfig,
}

impl<'a> GuidanceEngine<'a> {
    pub fn new(network: &'a RoadNetwork) -> Self {
        Self::with_config(network, GuidanceConfig::default())
    }

    pub fn with_config(network: &'a RoadNetwork, config: GuidanceConfig) -> Self {
        Self { network, config }
    }

    /// The maneuver list for a traversed edge sequence.
    ///
    /// Total for any well-formed path of at least one edge: the result
    /// opens with a depart and closes with an arrive. The arrive side is
    /// reported straight; use [`GuidanceEngine::maneuvers_toward`] when the
    /// snapped destination point is known.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn maneuvers(&self, path: &[EdgeId]) -> crate::Result<Route> {
        self.run(path, None)
    }

    /// As [`GuidanceEngine::maneuvers`], with the arrive side derived from
    /// the destination's position relative to the final heading.
    #[cfg_attr(feature = "tracing", tracing::instrument(skip(self)))]
    pub fn maneuvers_toward(&self, path: &[EdgeId], destination: Point) -> crate::Result<Route> {
        self.run(path, Some(destination))
    }

    /// The collapsed step list itself; the assembled route is a projection
    /// of this.
    pub fn steps(&self, path: &[EdgeId]) -> crate::Result<Vec<Step>> {
        let raw = StepBuilder::new(self.network, &self.config).build(path)?;
        Ok(Collapser::new(&self.config).collapse(raw))
    }

    fn run(&self, path: &[EdgeId], destination: Option<Point>) -> crate::Result<Route> {
        let steps = self.steps(path)?;
        Ok(ManeuverAssembler::new(self.network).assemble(&steps, destination))
    }
}
