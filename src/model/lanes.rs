use strum::{AsRefStr, Display, EnumString};

/// A single lane's signed turn indication, as tagged on the way.
///
/// An edge carries an ordered sequence of these, left to right in the
/// direction of travel. Two edges with differing sequences across a node
/// are a lane-description change the driver should be told about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, AsRefStr)]
#[strum(serialize_all = "snake_case")]
#[repr(u8)]
pub enum LaneTurn {
    /// A lane without an indicated turn.
    None,
    Through,
    Left,
    SlightLeft,
    SharpLeft,
    Right,
    SlightRight,
    SharpRight,
    ReverseLeft,
    ReverseRight,
    MergeToLeft,
    MergeToRight,
}

/// Whether two lane descriptions differ in a way worth surfacing.
///
/// Empty descriptions never differ from anything: an untagged edge carries
/// no lane information, not a zero-lane assertion.
#[inline]
pub fn lane_description_changed(from: &[LaneTurn], to: &[LaneTurn]) -> bool {
    !from.is_empty() && !to.is_empty() && from != to
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn change_requires_information_on_both_sides() {
        let wide = [LaneTurn::Left, LaneTurn::Through, LaneTurn::Through];
        let narrow = [LaneTurn::Through, LaneTurn::Right];

        assert!(lane_description_changed(&wide, &narrow));
        assert!(!lane_description_changed(&wide, &wide));
        assert!(!lane_description_changed(&[], &narrow));
        assert!(!lane_description_changed(&wide, &[]));
    }

    #[test]
    fn round_trips_tag_values() {
        assert_eq!(
            LaneTurn::from_str("slight_right").unwrap(),
            LaneTurn::SlightRight
        );
        assert_eq!(LaneTurn::MergeToLeft.to_string(), "merge_to_left");
    }
}
