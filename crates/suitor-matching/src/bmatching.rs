//! Bounded partner store: the externally visible b-matching.
//!
//! Each node owns `b(node)` partner slots. A matched pair `(u, v)` occupies
//! one slot at each endpoint, so the store is symmetric by construction as
//! long as it is only mutated through [`BMatching::match_pair`] and
//! [`BMatching::unmatch_pair`].

use suitor_graph::{EdgeWeight, NodeId, WeightedGraph};
use tracing::debug;

use crate::slots::SlotArena;
use crate::{Error, Result};

/// A b-matching: up to `b(node)` partners per node.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BMatching {
    slots: SlotArena<NodeId>,
}

impl BMatching {
    /// Create an empty matching with one capacity per node.
    pub fn new(capacities: &[usize]) -> Self {
        Self {
            slots: SlotArena::new(capacities),
        }
    }

    /// Create an empty matching where every node has capacity `b`.
    pub fn uniform(nodes: usize, b: usize) -> Self {
        Self::new(&vec![b; nodes])
    }

    /// Match `u` and `v`, taking the first free slot at each endpoint.
    ///
    /// # Panics
    ///
    /// If `u == v` or either endpoint has no free slot.
    pub fn match_pair(&mut self, u: NodeId, v: NodeId) {
        assert_ne!(u, v, "cannot match node {u} with itself");
        assert!(
            self.slots.insert_first_free(u, v),
            "node {u} has no free partner slot for {v}"
        );
        assert!(
            self.slots.insert_first_free(v, u),
            "node {v} has no free partner slot for {u}"
        );
    }

    /// Remove the pair `(u, v)`.
    ///
    /// # Panics
    ///
    /// If `u` and `v` are not matched.
    pub fn unmatch_pair(&mut self, u: NodeId, v: NodeId) {
        assert!(self.slots.clear_value(u, v), "{v} is not a partner of {u}");
        assert!(self.slots.clear_value(v, u), "{u} is not a partner of {v}");
    }

    /// Check that every occupied slot is mirrored at the partner and that
    /// every matched pair is an edge of `graph`.
    ///
    /// A graph with a different node count is never proper.
    pub fn is_proper<G: WeightedGraph>(&self, graph: &G) -> bool {
        if graph.number_of_nodes() != self.number_of_nodes() {
            debug!(
                graph = graph.number_of_nodes(),
                matching = self.number_of_nodes(),
                "node counts differ"
            );
            return false;
        }

        for v in graph.nodes() {
            for w in self.partners(v) {
                if !self.slots.contains(w, v) {
                    debug!(node = %v, partner = %w, "node is not symmetrically matched");
                    return false;
                }
            }
        }

        for v in graph.nodes() {
            for w in self.partners(v) {
                if !graph.has_edge(v, w) {
                    debug!(u = %v, v = %w, "matched pair is not an edge");
                    return false;
                }
            }
        }

        true
    }

    /// Total weight of matched edges, each pair counted once.
    ///
    /// Pairs that are not edges of `graph` contribute nothing.
    pub fn weight<G: WeightedGraph>(&self, graph: &G) -> EdgeWeight {
        self.pairs()
            .filter_map(|(u, v)| graph.weight(u, v))
            .sum()
    }

    /// Number of matched nodes of `graph` divided by two.
    pub fn size<G: WeightedGraph>(&self, graph: &G) -> usize {
        let nodes = self.number_of_nodes();
        graph
            .nodes()
            .filter(|&v| v.index() < nodes && !self.is_unmatched(v))
            .count()
            / 2
    }

    /// Check if `u` has no partner at all.
    pub fn is_unmatched(&self, u: NodeId) -> bool {
        self.slots.occupied(u).next().is_none()
    }

    /// Check if `u` and `v` are matched with each other.
    pub fn are_matched(&self, u: NodeId, v: NodeId) -> bool {
        self.slots.contains(u, v)
    }

    /// Raw partner slots of `u`, including empty ones.
    pub fn mates(&self, u: NodeId) -> &[Option<NodeId>] {
        self.slots.slots(u)
    }

    /// Partners of `u`.
    pub fn partners(&self, u: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        self.slots.occupied(u)
    }

    /// Number of partners of `u`.
    pub fn degree(&self, u: NodeId) -> usize {
        self.slots.occupied(u).count()
    }

    /// Maximum number of partners of `u`.
    pub fn capacity(&self, u: NodeId) -> usize {
        self.slots.capacity(u)
    }

    /// Capacity of every node.
    pub fn capacities(&self) -> Vec<usize> {
        (0..self.number_of_nodes())
            .map(|i| self.capacity(NodeId(i)))
            .collect()
    }

    /// Number of nodes covered by this matching.
    pub fn number_of_nodes(&self) -> usize {
        self.slots.nodes()
    }

    /// Every matched pair once, as `(u, v)` with `u < v`.
    pub fn pairs(&self) -> impl Iterator<Item = (NodeId, NodeId)> + '_ {
        (0..self.number_of_nodes()).map(NodeId).flat_map(move |u| {
            self.partners(u)
                .filter(move |&v| u < v)
                .map(move |v| (u, v))
        })
    }

    /// Per-node slot vectors.
    pub fn matrix(&self) -> Vec<Vec<Option<NodeId>>> {
        (0..self.number_of_nodes())
            .map(|i| self.mates(NodeId(i)).to_vec())
            .collect()
    }

    /// The single partner of every node.
    ///
    /// Only defined when every capacity is exactly 1.
    pub fn to_vector(&self) -> Result<Vec<Option<NodeId>>> {
        (0..self.number_of_nodes())
            .map(NodeId)
            .map(|u| match self.mates(u) {
                [mate] => Ok(*mate),
                slots => Err(Error::CapacityNotOne {
                    node: u,
                    capacity: slots.len(),
                }),
            })
            .collect()
    }
}
