//! Suitor and proposal lists shared by the static and dynamic matchers.
//!
//! For every node `x`:
//! - `suitors[x]` holds the nodes `x` has accepted, ranked best first, with
//!   occupied slots packed at the front. The last slot of a full list is the
//!   weakest entry, the eviction candidate.
//! - `proposed[x]` holds the nodes `x` is currently a suitor of.
//!
//! `y ∈ proposed[x]` iff `x ∈ suitors[y]` at all times. Once the static run
//! has finished, and between dynamic updates, the suitor relation is also
//! symmetric, so `suitors[x]` and `proposed[x]` name the same nodes and
//! together describe the matching.

use suitor_graph::NodeId;

use crate::partner::Partner;
use crate::slots::SlotArena;

#[derive(Debug, Clone)]
pub(crate) struct SuitorState {
    suitors: SlotArena<Partner>,
    proposed: SlotArena<NodeId>,
}

impl SuitorState {
    pub(crate) fn new(capacities: &[usize]) -> Self {
        Self {
            suitors: SlotArena::new(capacities),
            proposed: SlotArena::new(capacities),
        }
    }

    pub(crate) fn nodes(&self) -> usize {
        self.suitors.nodes()
    }

    /// Accepted suitors of `x`, best first.
    pub(crate) fn suitors(&self, x: NodeId) -> impl Iterator<Item = Partner> + '_ {
        self.suitors.occupied(x)
    }

    pub(crate) fn has_suitor(&self, x: NodeId, node: NodeId) -> bool {
        self.suitors(x).any(|p| p.node == node)
    }

    /// The weakest suitor of `x` if its list is full, `None` while a slot is free.
    pub(crate) fn weakest(&self, x: NodeId) -> Option<Partner> {
        self.suitors.slots(x).last().copied().flatten()
    }

    /// Check if `x` would accept `candidate` right now.
    ///
    /// A node with capacity 0 accepts nobody.
    pub(crate) fn accepts(&self, x: NodeId, candidate: &Partner) -> bool {
        match self.suitors.slots(x).last() {
            None => false,
            Some(weakest) => candidate.beats(weakest.as_ref()),
        }
    }

    /// Insert `candidate` into `x`'s list at its ranked position.
    /// Returns the previous weakest entry if the list was full.
    ///
    /// # Panics
    ///
    /// If `x` would not accept `candidate`.
    pub(crate) fn insert_suitor(&mut self, x: NodeId, candidate: Partner) -> Option<Partner> {
        let slots = self.suitors.slots_mut(x);
        let Some(i) = slots
            .iter()
            .position(|slot| candidate.beats(slot.as_ref()))
        else {
            panic!("{} does not beat the weakest suitor of {x}", candidate.node);
        };
        let evicted = slots[slots.len() - 1];
        slots[i..].rotate_right(1);
        slots[i] = Some(candidate);
        evicted
    }

    /// Remove `node` from `x`'s list, keeping the ranking packed.
    pub(crate) fn remove_suitor(&mut self, x: NodeId, node: NodeId) -> Option<Partner> {
        self.suitors.remove_packed_where(x, |p| p.node == node)
    }

    pub(crate) fn has_proposed(&self, u: NodeId, x: NodeId) -> bool {
        self.proposed.contains(u, x)
    }

    /// Record that `u` is now a suitor of `x`.
    ///
    /// # Panics
    ///
    /// If `u` already holds `capacity(u)` proposals.
    pub(crate) fn add_proposal(&mut self, u: NodeId, x: NodeId) {
        assert!(
            self.proposed.insert_first_free(u, x),
            "node {u} has no proposal slot left for {x}"
        );
    }

    /// Record that `u` is no longer a suitor of `x`.
    ///
    /// # Panics
    ///
    /// If `u` had not proposed to `x`.
    pub(crate) fn withdraw_proposal(&mut self, u: NodeId, x: NodeId) {
        assert!(
            self.proposed.clear_value(u, x),
            "node {u} never proposed to {x}"
        );
    }

    /// Panic unless the suitor relation is mutual.
    pub(crate) fn check_symmetry(&self) {
        for i in 0..self.nodes() {
            let u = NodeId(i);
            for p in self.suitors(u) {
                assert!(
                    self.has_suitor(p.node, u),
                    "suitor relation is not symmetric: {} courts {u} but {u} does not court {}",
                    p.node,
                    p.node
                );
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId(i)
    }

    fn p(node: usize, weight: f64) -> Partner {
        Partner::new(n(node), weight)
    }

    #[test]
    fn insertion_keeps_ranking() {
        let mut state = SuitorState::new(&[3, 0, 0, 0, 0]);
        assert_eq!(state.insert_suitor(n(0), p(1, 1.0)), None);
        assert_eq!(state.insert_suitor(n(0), p(2, 3.0)), None);
        assert_eq!(state.insert_suitor(n(0), p(4, 2.0)), None);

        let order: Vec<_> = state.suitors(n(0)).map(|p| p.node.index()).collect();
        assert_eq!(order, vec![2, 4, 1]);
        assert_eq!(state.weakest(n(0)), Some(p(1, 1.0)));
    }

    #[test]
    fn full_list_evicts_weakest() {
        let mut state = SuitorState::new(&[2, 0, 0, 0]);
        state.insert_suitor(n(0), p(1, 5.0));
        state.insert_suitor(n(0), p(2, 4.0));

        assert!(state.accepts(n(0), &p(3, 4.5)));
        assert_eq!(state.insert_suitor(n(0), p(3, 4.5)), Some(p(2, 4.0)));
        assert!(!state.has_suitor(n(0), n(2)));
    }

    #[test]
    fn ties_prefer_lower_id() {
        let mut state = SuitorState::new(&[1, 0, 0, 0]);
        state.insert_suitor(n(0), p(2, 1.0));

        assert!(state.accepts(n(0), &p(1, 1.0)));
        assert!(!state.accepts(n(0), &p(3, 1.0)));
    }

    #[test]
    fn zero_capacity_accepts_nobody() {
        let state = SuitorState::new(&[0, 1]);
        assert!(!state.accepts(n(0), &p(1, 100.0)));
        assert!(state.accepts(n(1), &p(0, 0.0)));
    }

    #[test]
    #[should_panic(expected = "does not beat")]
    fn inserting_a_loser_panics() {
        let mut state = SuitorState::new(&[1, 0, 0]);
        state.insert_suitor(n(0), p(1, 2.0));
        state.insert_suitor(n(0), p(2, 1.0));
    }

    #[test]
    fn removal_repacks() {
        let mut state = SuitorState::new(&[3, 0, 0, 0]);
        state.insert_suitor(n(0), p(1, 3.0));
        state.insert_suitor(n(0), p(2, 2.0));
        state.insert_suitor(n(0), p(3, 1.0));

        assert_eq!(state.remove_suitor(n(0), n(1)), Some(p(1, 3.0)));
        assert_eq!(state.weakest(n(0)), None);
        let order: Vec<_> = state.suitors(n(0)).map(|p| p.node.index()).collect();
        assert_eq!(order, vec![2, 3]);
    }

    #[test]
    fn proposals_are_a_bounded_set() {
        let mut state = SuitorState::new(&[2, 1, 1]);
        state.add_proposal(n(0), n(1));
        state.add_proposal(n(0), n(2));
        assert!(state.has_proposed(n(0), n(2)));

        state.withdraw_proposal(n(0), n(1));
        assert!(!state.has_proposed(n(0), n(1)));
        state.add_proposal(n(0), n(1));
    }

    #[test]
    #[should_panic(expected = "never proposed")]
    fn withdrawing_unknown_proposal_panics() {
        let mut state = SuitorState::new(&[1, 1]);
        state.withdraw_proposal(n(0), n(1));
    }

    #[test]
    fn symmetric_relation_passes_check() {
        let mut state = SuitorState::new(&[1, 1]);
        state.insert_suitor(n(0), p(1, 1.0));
        state.insert_suitor(n(1), p(0, 1.0));
        state.check_symmetry();
    }

    #[test]
    #[should_panic(expected = "not symmetric")]
    fn asymmetric_relation_fails_check() {
        let mut state = SuitorState::new(&[1, 1]);
        state.insert_suitor(n(0), p(1, 1.0));
        state.check_symmetry();
    }
}
