//! Suitor Graph
//!
//! Undirected weighted graphs with dense node identifiers in `[0, n)`.
//!
//! # Role
//!
//! The matchers in `suitor-matching` never touch graph storage directly.
//! They consume the read-only [`WeightedGraph`] trait:
//! - node enumeration and node count
//! - weighted-neighbor iteration yielding `(neighbor, weight)` pairs
//! - edge existence and weight lookup
//! - self-loop count and directedness, so invalid inputs can be rejected
//!
//! [`Graph`] is the adjacency-list implementation used throughout the
//! workspace. It permits self-loops and has a directed flavour only so that
//! consumers can prove they reject both.
//!
//! # Edges
//!
//! An [`Edge`] is an unordered pair. Two edges are the same edge when their
//! [`Edge::key`] matches, which orders the endpoints `(min, max)`.

mod edge;
mod error;
mod graph;
mod node;

pub use edge::{Edge, EdgeWeight, WeightedEdge};
pub use error::{Error, Result};
pub use graph::Graph;
pub use node::NodeId;

/// Read-only view of a weighted graph.
///
/// Node ids are dense: every id in `0..number_of_nodes()` is a node.
pub trait WeightedGraph {
    /// Number of nodes (upper bound of node ids).
    fn number_of_nodes(&self) -> usize;

    /// Iterate over `(neighbor, weight)` pairs of `node`.
    ///
    /// For undirected graphs every edge is reported from both endpoints.
    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, EdgeWeight)> + '_;

    /// Weight of the edge `(u, v)`, if it exists.
    fn weight(&self, u: NodeId, v: NodeId) -> Option<EdgeWeight>;

    /// Number of self-loops.
    fn number_of_self_loops(&self) -> usize;

    /// Whether edges are directed.
    fn is_directed(&self) -> bool;

    /// Check whether the edge `(u, v)` exists.
    fn has_edge(&self, u: NodeId, v: NodeId) -> bool {
        self.weight(u, v).is_some()
    }

    /// Iterate over all node ids in ascending order.
    fn nodes(&self) -> impl Iterator<Item = NodeId> {
        (0..self.number_of_nodes()).map(NodeId)
    }

    /// Check whether `node` is a valid id in this graph.
    fn contains(&self, node: NodeId) -> bool {
        node.index() < self.number_of_nodes()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trait_defaults_follow_storage() {
        let mut g = Graph::new(3);
        g.add_edge(NodeId(0), NodeId(2), 1.5).unwrap();

        assert!(g.has_edge(NodeId(2), NodeId(0)));
        assert!(!g.has_edge(NodeId(0), NodeId(1)));
        assert_eq!(g.nodes().collect::<Vec<_>>(), vec![NodeId(0), NodeId(1), NodeId(2)]);
        assert!(g.contains(NodeId(2)));
        assert!(!g.contains(NodeId(3)));
    }
}
