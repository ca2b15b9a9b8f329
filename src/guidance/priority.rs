use std::cmp::Reverse;

use crate::model::{Edge, NameId};

/// Lexicographic importance of an incident road, lower compares as more
/// important.
///
/// Rank order: functional class first, then non-link over link of the same
/// class, then continuity with the arrival road's name, then lane count.
/// Bearing ties are broken at the call sites, which know the geometry.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub struct RoadPriority {
    class_rank: u8,
    link: bool,
    foreign_name: bool,
    lanes: Reverse<u8>,
}

impl RoadPriority {
    /// Ranks `edge` as seen from a road identified by `arrival_name`.
    pub fn of(edge: &Edge, arrival_name: NameId) -> Self {
        Self {
            class_rank: edge.class.rank(),
            link: edge.is_link(),
            foreign_name: edge.name_id() != arrival_name,
            lanes: Reverse(edge.lanes),
        }
    }

    #[inline]
    pub fn class_rank(&self) -> u8 {
        self.class_rank
    }

    #[inline]
    pub fn is_link(&self) -> bool {
        self.link
    }

    /// Whether two roads are close enough in importance to read as the two
    /// tines of a fork. Links only pair with links: a ramp peeling off a
    /// mainline is a ramp transition, not a fork.
    #[inline]
    pub fn comparable(&self, other: &RoadPriority) -> bool {
        self.link == other.link && self.class_rank.abs_diff(other.class_rank) <= 1
    }
}
