//! Guidance post-processing for a road-routing engine.
//!
//! The shortest-path search hands this crate an ordered sequence of directed
//! edges over an intersection graph. Real-world intersections are routinely
//! modelled as many graph nodes (segregated dual carriageways, sliproads,
//! medians, ramp braids), so a naive one-instruction-per-node narration is
//! unusable. The pipeline here recovers the driver's mental model of
//! "one intersection, one maneuver":
//!
//! 1. classify each traversed node into a structural turn
//!    ([`guidance::TurnInstruction`]) over an ordered
//!    [`guidance::IntersectionView`],
//! 2. cut the path into [`guidance::Step`]s,
//! 3. collapse the step list to a fixed point with local rewrites
//!    (segregated-pair merging, sliproad folding, name-change suppression, ...),
//! 4. assemble the surviving boundaries into the final [`guidance::Maneuver`]
//!    list.
//!
//! The crate performs no I/O, never suspends and owns no shared mutable
//! state; a [`model::RoadNetwork`] is borrowed immutably for the duration of
//! a call, making the core a pure function from `(network, path)` to a
//! [`guidance::Route`].

pub mod geo;
pub mod guidance;
pub mod model;

#[doc(inline)]
pub use guidance::{GuidanceConfig, GuidanceEngine, GuidanceError, Maneuver, Route};
#[doc(inline)]
pub use model::{Edge, EdgeId, NetworkBuilder, NodeId, RoadNetwork};

pub type Result<T> = std::result::Result<T, GuidanceError>;
