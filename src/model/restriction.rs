use rustc_hash::{FxHashMap, FxHashSet};

use crate::model::{EdgeId, NodeId};

/// A single turn restriction from the extract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnRestriction {
    /// A `no_*` relation: the turn `from` → `to` across `via` is banned.
    No {
        from: EdgeId,
        via: NodeId,
        to: EdgeId,
    },
    /// An `only_*` relation: leaving `from` across `via`, the single legal
    /// continuation is `to`.
    Only {
        from: EdgeId,
        via: NodeId,
        to: EdgeId,
    },
}

/// The turn-restriction oracle.
///
/// Read-only shared data produced during preprocessing; guidance only ever
/// queries it. `no_*` entries are a ban set, `only_*` entries a mandate
/// keyed by the approach.
#[derive(Debug, Clone, Default)]
pub struct RestrictionTable {
    banned: FxHashSet<(EdgeId, NodeId, EdgeId)>,
    mandated: FxHashMap<(EdgeId, NodeId), EdgeId>,
}

impl RestrictionTable {
    pub fn new(restrictions: impl IntoIterator<Item = TurnRestriction>) -> Self {
        let mut table = RestrictionTable::default();
        for restriction in restrictions {
            table.insert(restriction);
        }

        table
    }

    pub fn insert(&mut self, restriction: TurnRestriction) {
        match restriction {
            TurnRestriction::No { from, via, to } => {
                self.banned.insert((from, via, to));
            }
            TurnRestriction::Only { from, via, to } => {
                self.mandated.insert((from, via), to);
            }
        }
    }

    /// Whether the turn `from` → `to` across `via` is legal.
    #[inline]
    pub fn allows(&self, from: EdgeId, via: NodeId, to: EdgeId) -> bool {
        if self.banned.contains(&(from, via, to)) {
            return false;
        }

        self.mandated
            .get(&(from, via))
            .is_none_or(|mandate| *mandate == to)
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.banned.is_empty() && self.mandated.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bans_individual_turns() {
        let table = RestrictionTable::new([TurnRestriction::No {
            from: 1,
            via: 10,
            to: 2,
        }]);

        assert!(!table.allows(1, 10, 2));
        assert!(table.allows(1, 10, 3));
        assert!(table.allows(2, 10, 1));
    }

    #[test]
    fn mandates_exclude_every_other_exit() {
        let table = RestrictionTable::new([TurnRestriction::Only {
            from: 1,
            via: 10,
            to: 2,
        }]);

        assert!(table.allows(1, 10, 2));
        assert!(!table.allows(1, 10, 3));
        // The mandate binds its approach only.
        assert!(table.allows(4, 10, 3));
    }
}
