/// Tunable thresholds of the collapsing engine.
///
/// The meter values are empirically tuned against real dual-carriageway and
/// sliproad geometry; they are configuration with documented defaults, not
/// invariants.
#[derive(Debug, Clone, Copy)]
pub struct GuidanceConfig {
    /// Longest intermediate segment two maneuvers may be apart and still
    /// merge as the two halves of one segregated intersection.
    pub segregated_merge_distance: f64,

    /// Longest link segment recognised as a sliproad; anything longer is a
    /// road in its own right.
    pub sliproad_max_length: f64,

    /// Degree-2 bends sharper than this open a step even on an unchanged
    /// road.
    pub continue_straight_tolerance: f64,

    /// Degree-2 name changes gentler than this stay classified as a plain
    /// name change rather than a turn.
    pub new_name_tolerance: f64,

    /// A name-transparent middle step is only suppressed while its entry
    /// deviation stays below this.
    pub suppression_straight_tolerance: f64,

    /// Widest deviation either branch of a fork may have from straight.
    pub fork_tolerance: f64,
}

impl Default for GuidanceConfig {
    fn default() -> Self {
        Self {
            segregated_merge_distance: 30.0,
            sliproad_max_length: 200.0,
            continue_straight_tolerance: 15.0,
            new_name_tolerance: 35.0,
            suppression_straight_tolerance: 20.0,
            fork_tolerance: 85.0,
        }
    }
}
