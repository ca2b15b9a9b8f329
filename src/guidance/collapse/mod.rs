//! The collapsing engine (C5): a fixed point of local rewrites over the
//! step list.
//!
//! Each rule is a pure function over a sliding window of two to four
//! adjacent steps, returning how many steps it consumed and what replaces
//! them. One full left-to-right scan is a round; the first applicable rule
//! at the leftmost window wins, and rounds repeat until a scan changes
//! nothing. Every rewrite either removes a step or silences a boundary, so
//! the fixed point is reached after at most O(n) effective rewrites.

mod lane;
mod mode;
mod ramp;
mod roundabout;
mod segregated;
mod sliproad;
mod suppress;

use log::debug;

use crate::geo::signed_delta;
use crate::guidance::{GuidanceConfig, Step};

/// The outcome of one applicable rewrite: `consumed` steps starting at the
/// window index are replaced wholesale.
#[derive(Debug, Clone)]
pub struct Rewrite {
    pub consumed: usize,
    pub replacement: Vec<Step>,
}

type Rule = fn(&Collapser, &[Step], usize) -> Option<Rewrite>;

/// Priority-ordered rule table; earlier entries win a window.
const RULES: &[(&str, Rule)] = &[
    ("segregated-merge", segregated::segregated_merge),
    ("sliproad-collapse", sliproad::sliproad_collapse),
    ("transparent-name", suppress::transparent_name),
    ("silent-name", suppress::silent_name),
    ("use-lane", lane::use_lane),
    ("ramp-chain", ramp::ramp_chain),
    ("mode-boundary", mode::mode_boundary),
    ("roundabout-chain", roundabout::roundabout_chain),
];

/// Drives the rewrite rules to their fixed point.
#[derive(Debug, Clone, Copy)]
pub struct Collapser<'a> {
    config: &'a GuidanceConfig,
}

impl<'a> Collapser<'a> {
    pub fn new(config: &'a GuidanceConfig) -> Self {
        Self { config }
    }

    #[inline]
    pub(crate) fn config(&self) -> &GuidanceConfig {
        self.config
    }

    pub fn collapse(&self, mut steps: Vec<Step>) -> Vec<Step> {
        loop {
            let mut changed = false;
            let mut index = 0;

            while index < steps.len() {
                match self.rewrite_at(&steps, index) {
                    Some((rule, rewrite)) => {
                        debug!(
                            "collapse {rule}: {} -> {} steps at {index}",
                            rewrite.consumed,
                            rewrite.replacement.len()
                        );
                        steps.splice(index..index + rewrite.consumed, rewrite.replacement);
                        changed = true;
                    }
                    None => index += 1,
                }
            }

            if !changed {
                return steps;
            }
        }
    }

    fn rewrite_at(&self, steps: &[Step], index: usize) -> Option<(&'static str, Rewrite)> {
        RULES
            .iter()
            .find_map(|(name, rule)| rule(self, steps, index).map(|rewrite| (*name, rewrite)))
    }

    /// The important-turn exemption: a step whose intersection offers
    /// another enterable road at least as important as the chosen one must
    /// keep its maneuver, or a real crossroads would vanish.
    pub(crate) fn important(&self, step: &Step) -> bool {
        step.view
            .as_ref()
            .is_some_and(|view| {
                view.passed_exits()
                    .any(|road| road.priority <= view.chosen().priority)
            })
    }
}

/// Net deviation across a merged pair: from the heading entering the first
/// maneuver to the heading leaving the second.
pub(crate) fn net_turn(a: &Step, b: &Step) -> f64 {
    signed_delta(b.exit_bearing, a.entry_bearing)
}
