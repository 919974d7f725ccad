//! Single-partner matching (capacity 1 everywhere).

use suitor_graph::{EdgeWeight, NodeId, WeightedGraph};

use crate::{BMatching, Error};

/// A matching in which every node has at most one mate.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Matching {
    mates: Vec<Option<NodeId>>,
}

impl Matching {
    /// Create an empty matching over `nodes` nodes.
    pub fn new(nodes: usize) -> Self {
        Self {
            mates: vec![None; nodes],
        }
    }

    /// Match `u` and `v`.
    ///
    /// # Panics
    ///
    /// If `u == v` or either node is already matched.
    pub fn match_pair(&mut self, u: NodeId, v: NodeId) {
        assert_ne!(u, v, "cannot match node {u} with itself");
        assert!(self.mates[u.index()].is_none(), "node {u} is already matched");
        assert!(self.mates[v.index()].is_none(), "node {v} is already matched");
        self.mates[u.index()] = Some(v);
        self.mates[v.index()] = Some(u);
    }

    /// Check if `u` has a mate.
    pub fn is_matched(&self, u: NodeId) -> bool {
        self.mates[u.index()].is_some()
    }

    /// The mate of `u`, if any.
    pub fn mate(&self, u: NodeId) -> Option<NodeId> {
        self.mates[u.index()]
    }

    /// The mate of every node.
    pub fn as_vector(&self) -> &[Option<NodeId>] {
        &self.mates
    }

    /// Check that mates are mutual and every pair is an edge of `graph`.
    pub fn is_proper<G: WeightedGraph>(&self, graph: &G) -> bool {
        graph.nodes().all(|u| match self.mate(u) {
            Some(v) => self.mate(v) == Some(u) && graph.has_edge(u, v),
            None => true,
        })
    }

    /// Total weight of matched edges.
    pub fn weight<G: WeightedGraph>(&self, graph: &G) -> EdgeWeight {
        graph
            .nodes()
            .filter_map(|u| self.mate(u).filter(|&v| u < v).map(|v| (u, v)))
            .filter_map(|(u, v)| graph.weight(u, v))
            .sum()
    }

    /// Number of matched pairs.
    pub fn size(&self) -> usize {
        self.mates.iter().filter(|m| m.is_some()).count() / 2
    }
}

impl TryFrom<&BMatching> for Matching {
    type Error = Error;

    fn try_from(matching: &BMatching) -> Result<Self, Error> {
        Ok(Self {
            mates: matching.to_vector()?,
        })
    }
}
