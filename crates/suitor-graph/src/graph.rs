//! Adjacency-list graph storage.

use crate::{EdgeWeight, Error, NodeId, Result, WeightedEdge, WeightedGraph};

/// Weighted graph stored as per-node adjacency lists.
///
/// Undirected edges are stored once in each endpoint's list, except
/// self-loops which are stored once. Multi-edges are rejected.
#[derive(Debug, Clone, Default, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Graph {
    adjacency: Vec<Vec<(NodeId, EdgeWeight)>>,
    directed: bool,
    edges: usize,
    self_loops: usize,
}

impl Graph {
    /// Create an undirected graph with `nodes` isolated nodes.
    pub fn new(nodes: usize) -> Self {
        Self {
            adjacency: vec![Vec::new(); nodes],
            ..Self::default()
        }
    }

    /// Create a directed graph with `nodes` isolated nodes.
    pub fn new_directed(nodes: usize) -> Self {
        Self {
            directed: true,
            ..Self::new(nodes)
        }
    }

    /// Build an undirected graph from an edge list.
    pub fn from_edges<I, E>(nodes: usize, edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<WeightedEdge>,
    {
        let mut graph = Self::new(nodes);
        for edge in edges {
            let edge = edge.into();
            graph.add_edge(edge.u, edge.v, edge.weight)?;
        }
        Ok(graph)
    }

    /// Append an isolated node and return its id.
    pub fn add_node(&mut self) -> NodeId {
        self.adjacency.push(Vec::new());
        NodeId(self.adjacency.len() - 1)
    }

    /// Insert the edge `(u, v)` with `weight`.
    pub fn add_edge(&mut self, u: NodeId, v: NodeId, weight: EdgeWeight) -> Result<()> {
        self.check_node(u)?;
        self.check_node(v)?;
        if self.has_edge(u, v) {
            return Err(Error::DuplicateEdge { u, v });
        }

        self.adjacency[u.index()].push((v, weight));
        if u == v {
            self.self_loops += 1;
        } else if !self.directed {
            self.adjacency[v.index()].push((u, weight));
        }
        self.edges += 1;
        Ok(())
    }

    /// Remove the edge `(u, v)` and return its weight.
    pub fn remove_edge(&mut self, u: NodeId, v: NodeId) -> Result<EdgeWeight> {
        self.check_node(u)?;
        self.check_node(v)?;

        let weight = Self::detach(&mut self.adjacency[u.index()], v)
            .ok_or(Error::MissingEdge { u, v })?;
        if u == v {
            self.self_loops -= 1;
        } else if !self.directed {
            Self::detach(&mut self.adjacency[v.index()], u);
        }
        self.edges -= 1;
        Ok(weight)
    }

    /// Change the weight of an existing edge.
    pub fn set_weight(&mut self, u: NodeId, v: NodeId, weight: EdgeWeight) -> Result<()> {
        self.check_node(u)?;
        self.check_node(v)?;

        let slot = self.adjacency[u.index()]
            .iter_mut()
            .find(|(x, _)| *x == v)
            .ok_or(Error::MissingEdge { u, v })?;
        slot.1 = weight;

        if u != v && !self.directed {
            if let Some(slot) = self.adjacency[v.index()].iter_mut().find(|(x, _)| *x == u) {
                slot.1 = weight;
            }
        }
        Ok(())
    }

    /// Number of edges (each undirected edge counted once).
    pub fn number_of_edges(&self) -> usize {
        self.edges
    }

    /// Number of neighbors of `node`.
    pub fn degree(&self, node: NodeId) -> usize {
        self.adjacency[node.index()].len()
    }

    /// Iterate over all edges.
    ///
    /// Undirected edges are reported once, with `u <= v`.
    pub fn edges(&self) -> impl Iterator<Item = WeightedEdge> + '_ {
        let directed = self.directed;
        self.adjacency.iter().enumerate().flat_map(move |(u, list)| {
            let u = NodeId(u);
            list.iter()
                .filter(move |(v, _)| directed || u <= *v)
                .map(move |&(v, weight)| WeightedEdge::new(u, v, weight))
        })
    }

    fn check_node(&self, node: NodeId) -> Result<()> {
        if node.index() < self.adjacency.len() {
            Ok(())
        } else {
            Err(Error::NodeOutOfRange {
                node,
                nodes: self.adjacency.len(),
            })
        }
    }

    fn detach(list: &mut Vec<(NodeId, EdgeWeight)>, target: NodeId) -> Option<EdgeWeight> {
        let position = list.iter().position(|(x, _)| *x == target)?;
        Some(list.swap_remove(position).1)
    }
}

impl WeightedGraph for Graph {
    fn number_of_nodes(&self) -> usize {
        self.adjacency.len()
    }

    fn neighbors(&self, node: NodeId) -> impl Iterator<Item = (NodeId, EdgeWeight)> + '_ {
        self.adjacency[node.index()].iter().copied()
    }

    fn weight(&self, u: NodeId, v: NodeId) -> Option<EdgeWeight> {
        self.adjacency
            .get(u.index())?
            .iter()
            .find(|(x, _)| *x == v)
            .map(|&(_, weight)| weight)
    }

    fn number_of_self_loops(&self) -> usize {
        self.self_loops
    }

    fn is_directed(&self) -> bool {
        self.directed
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn n(i: usize) -> NodeId {
        NodeId(i)
    }

    #[test]
    fn undirected_edges_are_symmetric() {
        let mut g = Graph::new(3);
        g.add_edge(n(0), n(1), 2.0).unwrap();

        assert_eq!(g.weight(n(0), n(1)), Some(2.0));
        assert_eq!(g.weight(n(1), n(0)), Some(2.0));
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(g.degree(n(0)), 1);
        assert_eq!(g.degree(n(2)), 0);
    }

    #[test]
    fn directed_edges_are_one_way() {
        let mut g = Graph::new_directed(2);
        g.add_edge(n(0), n(1), 1.0).unwrap();

        assert!(g.is_directed());
        assert!(g.has_edge(n(0), n(1)));
        assert!(!g.has_edge(n(1), n(0)));
    }

    #[test]
    fn duplicate_edge_rejected() {
        let mut g = Graph::new(2);
        g.add_edge(n(0), n(1), 1.0).unwrap();
        assert_eq!(
            g.add_edge(n(1), n(0), 3.0),
            Err(Error::DuplicateEdge { u: n(1), v: n(0) })
        );
    }

    #[test]
    fn out_of_range_rejected() {
        let mut g = Graph::new(2);
        assert_eq!(
            g.add_edge(n(0), n(2), 1.0),
            Err(Error::NodeOutOfRange { node: n(2), nodes: 2 })
        );
    }

    #[test]
    fn self_loops_counted() {
        let mut g = Graph::new(2);
        g.add_edge(n(1), n(1), 1.0).unwrap();
        assert_eq!(g.number_of_self_loops(), 1);
        assert_eq!(g.degree(n(1)), 1);

        g.remove_edge(n(1), n(1)).unwrap();
        assert_eq!(g.number_of_self_loops(), 0);
        assert_eq!(g.number_of_edges(), 0);
    }

    #[test]
    fn remove_edge_detaches_both_sides() {
        let mut g = Graph::from_edges(3, [(0, 1, 1.0), (1, 2, 4.0)]).unwrap();

        assert_eq!(g.remove_edge(n(2), n(1)), Ok(4.0));
        assert!(!g.has_edge(n(1), n(2)));
        assert!(g.has_edge(n(0), n(1)));
        assert_eq!(g.number_of_edges(), 1);
        assert_eq!(
            g.remove_edge(n(1), n(2)),
            Err(Error::MissingEdge { u: n(1), v: n(2) })
        );
    }

    #[test]
    fn set_weight_updates_both_sides() {
        let mut g = Graph::from_edges(2, [(0, 1, 1.0)]).unwrap();
        g.set_weight(n(1), n(0), 7.0).unwrap();
        assert_eq!(g.weight(n(0), n(1)), Some(7.0));
        assert_eq!(g.weight(n(1), n(0)), Some(7.0));
    }

    #[test]
    fn edges_reported_once() {
        let g = Graph::from_edges(4, [(0, 1, 1.0), (2, 1, 2.0), (3, 0, 3.0)]).unwrap();
        let mut edges: Vec<_> = g.edges().map(|e| (e.u.index(), e.v.index())).collect();
        edges.sort();
        assert_eq!(edges, vec![(0, 1), (0, 3), (1, 2)]);
    }

    #[test]
    fn add_node_extends_range() {
        let mut g = Graph::new(1);
        let id = g.add_node();
        assert_eq!(id, n(1));
        assert_eq!(g.number_of_nodes(), 2);
        g.add_edge(n(0), id, 1.0).unwrap();
    }
}
