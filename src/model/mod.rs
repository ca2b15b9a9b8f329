//! The road-network data model guidance consumes.
//!
//! Everything here is an immutable input: edges with their classification
//! attributes, the directed graph they form, and the turn-restriction
//! oracle. The [`NetworkBuilder`] stands in for the excluded ingestion and
//! weighting stages when constructing synthetic networks.

pub mod edge;
pub mod lanes;
pub mod network;
pub mod restriction;
pub mod road_class;
pub mod transport;

#[doc(inline)]
pub use edge::{Edge, EdgeId, NameId, NodeId};
#[doc(inline)]
pub use lanes::{lane_description_changed, LaneTurn};
#[doc(inline)]
pub use network::{NetworkBuilder, RoadNetwork, WaySpec};
#[doc(inline)]
pub use restriction::{RestrictionTable, TurnRestriction};
#[doc(inline)]
pub use road_class::RoadClass;
#[doc(inline)]
pub use transport::TravelMode;
