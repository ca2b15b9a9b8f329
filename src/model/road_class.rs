use strum::{AsRefStr, Display, EnumString};

/// The functional class of a road edge.
///
/// Mirrors the highway taxonomy of the upstream extract, reduced to the
/// classes the guidance core distinguishes. Anything unrecognised degrades
/// to [`RoadClass::Other`] rather than failing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum RoadClass {
    /// A restricted-access major divided highway. The highest class the
    /// core ranks.
    Motorway,

    /// The link roads (sliproads/ramps) leading to or from a motorway.
    /// The only class treated as a ramp by the turn classifier.
    MotorwayLink,

    /// The most important roads that aren't motorways; need not be a
    /// divided highway.
    Trunk,

    /// The next most important roads, often linking larger towns.
    Primary,

    /// Roads linking towns.
    Secondary,

    /// Roads linking smaller towns and villages.
    Tertiary,

    /// Access roads to housing, without a connecting function.
    Residential,

    /// Access roads within estates, car parks, alleys.
    Service,

    /// A boarding-capable ferry route. Ranked below every road class so a
    /// ferry never counts as the continuing mainline of one.
    Ferry,

    /// A road of unknown type; the conservative default.
    #[default]
    Other,
}

impl RoadClass {
    /// Importance rank, lower is more important. Drives the lexicographic
    /// [`RoadPriority`](crate::guidance::RoadPriority) comparison.
    #[inline]
    pub const fn rank(&self) -> u8 {
        match self {
            RoadClass::Motorway => 0,
            RoadClass::MotorwayLink => 1,
            RoadClass::Trunk => 2,
            RoadClass::Primary => 3,
            RoadClass::Secondary => 4,
            RoadClass::Tertiary => 5,
            RoadClass::Residential => 6,
            RoadClass::Service => 7,
            RoadClass::Ferry => 8,
            RoadClass::Other => 9,
        }
    }

    /// Whether this class is a ramp/sliproad connector rather than a road
    /// in its own right.
    #[inline]
    pub const fn is_link(&self) -> bool {
        matches!(self, RoadClass::MotorwayLink)
    }

    /// Free-flow speed assumed by the fixture builder when deriving edge
    /// durations, in meters per second. The production weighting stage
    /// supplies real durations; this only keeps synthetic networks
    /// plausible.
    #[inline]
    pub const fn free_flow_speed(&self) -> f64 {
        match self {
            RoadClass::Motorway => 31.0,
            RoadClass::MotorwayLink => 16.0,
            RoadClass::Trunk => 24.0,
            RoadClass::Primary => 18.0,
            RoadClass::Secondary => 14.0,
            RoadClass::Tertiary => 12.0,
            RoadClass::Residential => 8.0,
            RoadClass::Service => 4.0,
            RoadClass::Ferry => 5.0,
            RoadClass::Other => 8.0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn rank_orders_by_importance() {
        assert!(RoadClass::Motorway.rank() < RoadClass::Trunk.rank());
        assert!(RoadClass::Primary.rank() < RoadClass::Residential.rank());
        assert!(RoadClass::Service.rank() < RoadClass::Other.rank());
    }

    #[test]
    fn only_links_are_links() {
        assert!(RoadClass::MotorwayLink.is_link());
        assert!(!RoadClass::Motorway.is_link());
        assert!(!RoadClass::Service.is_link());
    }

    #[test]
    fn round_trips_tag_values() {
        assert_eq!(
            RoadClass::from_str("motorway_link").unwrap(),
            RoadClass::MotorwayLink
        );
        assert_eq!(RoadClass::Residential.to_string(), "residential");
        assert_eq!(RoadClass::from_str("sidewalk").ok(), None);
    }
}
