use geo::LineString;
use rustc_hash::FxHasher;
use std::hash::{Hash, Hasher};

use crate::model::{LaneTurn, RoadClass, TravelMode};

/// Node identifier, as assigned by the upstream extract.
pub type NodeId = i64;

/// Directed edge identifier. Each direction of a two-way road is its own
/// edge with its own id.
pub type EdgeId = i64;

/// Interned identity of a road's `(name, ref)` pair.
///
/// Guidance compares road identity constantly (silent name changes,
/// segregated-half recognition, mainline detection), so the pair is hashed
/// once per edge instead of comparing strings at every window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct NameId(u64);

impl NameId {
    /// The identity of a road with neither name nor ref.
    pub const NONE: NameId = NameId(0);

    pub fn of(name: &str, reference: &str) -> NameId {
        if name.is_empty() && reference.is_empty() {
            return NameId::NONE;
        }

        let mut hasher = FxHasher::default();
        name.hash(&mut hasher);
        reference.hash(&mut hasher);

        // 0 is reserved for the unnamed identity.
        NameId(hasher.finish().max(1))
    }

    #[inline]
    pub fn is_none(&self) -> bool {
        *self == NameId::NONE
    }
}

/// A directed road edge with the attributes guidance classifies on.
///
/// Edges are immutable inputs produced by the excluded ingestion stage;
/// `distance` and `duration` arrive precomputed from the weighting stage.
/// Unknown attributes degrade to conservative defaults (empty name, class
/// [`RoadClass::Other`], zero lanes) rather than failing.
#[derive(Debug, Clone, PartialEq)]
pub struct Edge {
    pub id: EdgeId,
    pub source: NodeId,
    pub target: NodeId,

    /// Display name; possibly empty.
    pub name: String,
    /// Highway designation (route number); possibly empty.
    pub reference: String,

    pub class: RoadClass,
    pub mode: TravelMode,

    /// Lane count, `0` when unknown.
    pub lanes: u8,
    /// Per-lane turn indications, left to right; possibly empty.
    pub turn_lanes: Vec<LaneTurn>,

    pub oneway: bool,
    pub bridge: bool,
    pub tunnel: bool,
    pub roundabout: bool,

    /// Forward geometry from `source` to `target`.
    pub geometry: LineString,

    /// Length in meters.
    pub distance: f64,
    /// Traversal time in seconds.
    pub duration: f64,
}

impl Edge {
    #[inline]
    pub fn name_id(&self) -> NameId {
        NameId::of(&self.name, &self.reference)
    }

    #[inline]
    pub fn is_named(&self) -> bool {
        !self.name.is_empty() || !self.reference.is_empty()
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        self.class.is_link()
    }

    /// Bridges and tunnels are name-transparent: a name that exists only to
    /// label the structure does not constitute a road change.
    #[inline]
    pub fn is_structure(&self) -> bool {
        self.bridge || self.tunnel
    }
}
