//! Ranked partner entries.
//!
//! # Ranking
//!
//! Seen from a node `x`, a partner `(a, w)` ranks above `(b, w')` iff
//! `w > w'`, or `w == w'` and `a < b`.
//!
//! Every comparison in both matchers uses this one rule. It agrees with a
//! single global order on edges (weight descending, then `(min, max)`
//! endpoints ascending), so the greedy b-matching is unique and both the
//! static and the dynamic matcher converge to it.

use std::cmp::Ordering;

use suitor_graph::{EdgeWeight, NodeId};

/// A node held in another node's suitor list, with the connecting weight.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Partner {
    /// The neighbor on the other end of the edge
    pub node: NodeId,
    /// Weight of the connecting edge
    pub weight: EdgeWeight,
}

impl Partner {
    /// Create a partner entry.
    pub const fn new(node: NodeId, weight: EdgeWeight) -> Self {
        Self { node, weight }
    }

    /// Check if this entry ranks strictly above `other`.
    #[inline]
    pub fn outranks(&self, other: &Partner) -> bool {
        self.rank_cmp(other) == Ordering::Greater
    }

    /// Compare by rank: greater means preferred.
    pub fn rank_cmp(&self, other: &Partner) -> Ordering {
        self.weight
            .total_cmp(&other.weight)
            .then_with(|| other.node.cmp(&self.node))
    }

    /// Check if this entry would be accepted into a suitor list whose weakest
    /// entry is `weakest`, where `None` means a free slot.
    #[inline]
    pub fn beats(&self, weakest: Option<&Partner>) -> bool {
        weakest.map_or(true, |w| self.outranks(w))
    }
}

/// Only edges with a non-negative, non-NaN weight are ever matched.
#[inline]
pub(crate) fn is_matchable(weight: EdgeWeight) -> bool {
    weight >= 0.0
}

#[cfg(test)]
mod tests {
    use super::*;

    fn p(node: usize, weight: f64) -> Partner {
        Partner::new(NodeId(node), weight)
    }

    #[test]
    fn heavier_wins() {
        assert!(p(9, 2.0).outranks(&p(1, 1.0)));
        assert!(!p(1, 1.0).outranks(&p(9, 2.0)));
    }

    #[test]
    fn lower_id_breaks_ties() {
        assert!(p(1, 3.0).outranks(&p(2, 3.0)));
        assert!(!p(2, 3.0).outranks(&p(1, 3.0)));
        assert!(!p(2, 3.0).outranks(&p(2, 3.0)));
    }

    #[test]
    fn free_slot_accepts_anything() {
        assert!(p(5, 0.0).beats(None));
        assert!(p(5, 1.0).beats(Some(&p(6, 1.0))));
        assert!(!p(7, 1.0).beats(Some(&p(6, 1.0))));
    }

    #[test]
    fn matchable_weights() {
        assert!(is_matchable(0.0));
        assert!(is_matchable(4.5));
        assert!(!is_matchable(-1.0));
        assert!(!is_matchable(f64::NAN));
    }
}
