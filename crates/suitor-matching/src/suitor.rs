//! Single-partner suitor matcher.
//!
//! The `b = 1` special case with one suitor slot per node and no proposal
//! bookkeeping: a node that loses its place simply becomes the current
//! proposer and searches again. Ranking and tie-breaking are the same as in
//! [`BSuitorMatcher`](crate::BSuitorMatcher), so with uniform capacity 1
//! both compute the same matching.

use suitor_graph::{NodeId, WeightedGraph};
use tracing::debug;

use crate::bsuitor::check_graph;
use crate::partner::{is_matchable, Partner};
use crate::{Error, MatcherConfig, Matching, Result};

/// Suitor matcher computing a 1-matching.
#[derive(Debug)]
pub struct SuitorMatcher<'g, G> {
    graph: &'g G,
    config: MatcherConfig,
    suitor: Vec<Option<Partner>>,
    matching: Matching,
    has_run: bool,
}

impl<'g, G: WeightedGraph> SuitorMatcher<'g, G> {
    /// Create a matcher. Fails on directed graphs and self-loops.
    pub fn new(graph: &'g G) -> Result<Self> {
        Self::with_config(graph, MatcherConfig::default())
    }

    /// Create a matcher with an explicit configuration.
    pub fn with_config(graph: &'g G, config: MatcherConfig) -> Result<Self> {
        check_graph(graph)?;
        let nodes = graph.number_of_nodes();
        Ok(Self {
            graph,
            config,
            suitor: vec![None; nodes],
            matching: Matching::new(nodes),
            has_run: false,
        })
    }

    /// Compute the matching.
    pub fn run(&mut self) {
        let graph = self.graph;
        let nodes = graph.number_of_nodes();
        self.suitor = vec![None; nodes];

        for u in graph.nodes() {
            let mut current = Some(u);
            while let Some(c) = current {
                current = None;
                if let Some(target) = self.find_preferred(c) {
                    let displaced = self.suitor[target.node.index()]
                        .replace(Partner::new(c, target.weight));
                    current = displaced.map(|p| p.node);
                }
            }
        }

        let mut matching = Matching::new(nodes);
        for u in graph.nodes() {
            let Some(p) = self.suitor[u.index()] else {
                continue;
            };
            let mutual = self.suitor[p.node.index()].map(|q| q.node) == Some(u);
            if self.config.verify_symmetry {
                assert!(mutual, "suitor of {u} is {} but not vice versa", p.node);
            }
            if mutual && u < p.node {
                matching.match_pair(u, p.node);
            }
        }

        debug!(nodes, pairs = matching.size(), "suitor run complete");
        self.matching = matching;
        self.has_run = true;
    }

    /// The computed matching.
    pub fn matching(&self) -> Result<&Matching> {
        if self.has_run {
            Ok(&self.matching)
        } else {
            Err(Error::NotRun)
        }
    }

    fn find_preferred(&self, y: NodeId) -> Option<Partner> {
        let mut best: Option<Partner> = None;

        for (v, weight) in self.graph.neighbors(y) {
            if !is_matchable(weight) {
                continue;
            }
            let candidate = Partner::new(v, weight);
            if candidate.beats(best.as_ref())
                && Partner::new(y, weight).beats(self.suitor[v.index()].as_ref())
            {
                best = Some(candidate);
            }
        }

        best
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use suitor_graph::Graph;

    fn n(i: usize) -> NodeId {
        NodeId(i)
    }

    #[test]
    fn rejects_invalid_graphs() {
        let g = Graph::new_directed(10);
        assert_eq!(SuitorMatcher::new(&g).unwrap_err(), Error::DirectedGraph);

        let mut g = Graph::new(10);
        g.add_edge(n(0), n(0), 1.0).unwrap();
        assert_eq!(
            SuitorMatcher::new(&g).unwrap_err(),
            Error::SelfLoops { count: 1 }
        );
    }

    #[test]
    fn matching_unavailable_before_run() {
        let g = Graph::new(2);
        let matcher = SuitorMatcher::new(&g).unwrap();
        assert_eq!(matcher.matching().unwrap_err(), Error::NotRun);
    }

    #[test]
    fn path_with_unit_weights() {
        let g = Graph::from_edges(4, [(0, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]).unwrap();
        let mut matcher = SuitorMatcher::with_config(&g, MatcherConfig::checked()).unwrap();
        matcher.run();
        let m = matcher.matching().unwrap();

        assert!(m.is_proper(&g));
        assert_eq!(m.mate(n(0)), Some(n(1)));
        assert_eq!(m.mate(n(2)), Some(n(3)));
    }

    #[test]
    fn displaced_suitor_searches_again() {
        let g = Graph::from_edges(4, [(0, 1, 2.0), (1, 2, 3.0), (0, 3, 1.0)]).unwrap();
        let mut matcher = SuitorMatcher::with_config(&g, MatcherConfig::checked()).unwrap();
        matcher.run();
        let m = matcher.matching().unwrap();

        assert_eq!(m.mate(n(1)), Some(n(2)));
        assert_eq!(m.mate(n(0)), Some(n(3)));
        assert_eq!(m.weight(&g), 4.0);
    }

    #[test]
    fn isolated_nodes_stay_unmatched() {
        let g = Graph::from_edges(3, [(0, 1, 1.0)]).unwrap();
        let mut matcher = SuitorMatcher::new(&g).unwrap();
        matcher.run();
        let m = matcher.matching().unwrap();
        assert!(!m.is_matched(n(2)));
        assert_eq!(m.size(), 1);
    }
}
