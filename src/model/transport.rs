use serde::Serialize;
use strum::{AsRefStr, Display, EnumString};

/// The mode of travel an edge is traversed with.
///
/// Mode boundaries are load-bearing for guidance: a change of mode always
/// survives collapsing as a surfaced maneuver, so a driver is told where to
/// board and where to disembark.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, EnumString, AsRefStr, Serialize,
)]
#[strum(serialize_all = "snake_case")]
#[serde(rename_all = "snake_case")]
#[repr(u8)]
pub enum TravelMode {
    /// On-road vehicle travel.
    #[default]
    Driving,

    /// A vehicle ferry; entered and left from driving edges.
    Ferry,

    /// Foot traffic.
    Walking,

    /// Bicycle traffic.
    Cycling,
}

impl TravelMode {
    /// Whether a route leg travelling as `self` may continue onto an edge
    /// of mode `other`.
    ///
    /// Boarding and alighting a ferry is always permitted; every other
    /// transition requires the modes to match. The routing profile upstream
    /// makes the broader call of which modes a query may use at all.
    #[inline]
    pub fn can_transition_to(&self, other: TravelMode) -> bool {
        self == &other || matches!(self, TravelMode::Ferry) || matches!(other, TravelMode::Ferry)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn ferries_board_from_anything() {
        assert!(TravelMode::Driving.can_transition_to(TravelMode::Ferry));
        assert!(TravelMode::Ferry.can_transition_to(TravelMode::Cycling));
        assert!(TravelMode::Walking.can_transition_to(TravelMode::Ferry));
    }

    #[test]
    fn land_modes_do_not_mix() {
        assert!(!TravelMode::Driving.can_transition_to(TravelMode::Walking));
        assert!(!TravelMode::Cycling.can_transition_to(TravelMode::Driving));
        assert!(TravelMode::Driving.can_transition_to(TravelMode::Driving));
    }

    #[test]
    fn round_trips_tag_values() {
        assert_eq!(TravelMode::from_str("ferry").unwrap(), TravelMode::Ferry);
        assert_eq!(TravelMode::Driving.to_string(), "driving");
    }
}
