//! Dynamic b-suitor matcher.
//!
//! Starts from the state of a finished [`BSuitorMatcher`] and repairs it in
//! place as batches of edges are inserted into or removed from the graph.
//!
//! # Repair
//!
//! Between updates the suitor relation is mutual and there is no *blocking
//! pair*: an unmatched, matchable edge `(a, x)` such that `a` would accept
//! `x` and `x` would accept `a`. A single-edge update can only create
//! blocking pairs at the nodes whose lists it loosens, so those nodes are
//! marked affected and pushed onto a worklist. Each popped node links to its
//! best blocking partner, if any. Links evict the weakest entry of any full
//! list, and the evicted nodes are marked in turn.
//!
//! Every link adds an edge that outranks each edge it evicts, so the ranked
//! vector of matched edges strictly increases and the repair terminates.
//! With no blocking pair left the matching is again the greedy b-matching of
//! the current graph, the same one [`BSuitorMatcher::run`] computes.
//!
//! # Graph ownership
//!
//! The matcher does not own the graph. Callers mutate the graph first and
//! then pass it to [`add_edges`](DynamicBSuitorMatcher::add_edges) or
//! [`remove_edges`](DynamicBSuitorMatcher::remove_edges).

use std::collections::HashSet;

use suitor_graph::{Edge, EdgeWeight, NodeId, WeightedEdge, WeightedGraph};
use tracing::{debug, trace};

use crate::partner::{is_matchable, Partner};
use crate::state::SuitorState;
use crate::{BMatching, BSuitorMatcher, Capacity, Error, MatcherConfig, Result};

/// Incrementally maintained b-matching.
#[derive(Debug, Clone)]
pub struct DynamicBSuitorMatcher {
    config: MatcherConfig,
    capacities: Vec<usize>,
    state: SuitorState,
    matching: BMatching,
    /// Set while a node is queued in `affected_nodes`
    affected: Vec<bool>,
    /// Worklist of the current single-edge update, most recent last
    affected_nodes: Vec<NodeId>,
    /// Normalized batch edges not yet applied
    edge_batch: HashSet<Edge>,
    /// Nodes whose suitor list changed since construction or the last reset
    touched: HashSet<NodeId>,
}

impl DynamicBSuitorMatcher {
    /// Run the static matcher on `graph` and keep its state for updates.
    pub fn new<G: WeightedGraph>(graph: &G, capacity: impl Into<Capacity>) -> Result<Self> {
        Self::with_config(graph, capacity, MatcherConfig::default())
    }

    /// Like [`new`](Self::new) with an explicit configuration.
    pub fn with_config<G: WeightedGraph>(
        graph: &G,
        capacity: impl Into<Capacity>,
        config: MatcherConfig,
    ) -> Result<Self> {
        let mut matcher = BSuitorMatcher::with_config(graph, capacity, config)?;
        matcher.run();
        Self::from_matcher(matcher)
    }

    /// Take over the state of a static matcher that has already run.
    pub fn from_matcher<G: WeightedGraph>(matcher: BSuitorMatcher<'_, G>) -> Result<Self> {
        if !matcher.has_run() {
            return Err(Error::NotRun);
        }
        let (config, capacities, state, matching) = matcher.into_parts();
        let nodes = capacities.len();

        Ok(Self {
            config,
            capacities,
            state,
            matching,
            affected: vec![false; nodes],
            affected_nodes: Vec::new(),
            edge_batch: HashSet::new(),
            touched: HashSet::new(),
        })
    }

    /// The current b-matching.
    pub fn b_matching(&self) -> &BMatching {
        &self.matching
    }

    /// Resolved capacity of every node.
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    /// Number of distinct nodes whose partners changed since construction
    /// or the last [`reset_affected_count`](Self::reset_affected_count).
    pub fn affected_count(&self) -> usize {
        self.touched.len()
    }

    /// Start a new count for [`affected_count`](Self::affected_count).
    pub fn reset_affected_count(&mut self) {
        self.touched.clear();
    }

    /// Apply a batch of edges that have just been inserted into `graph`.
    ///
    /// Edges are applied heaviest first, each with its full cascade, before
    /// the next one is looked at. Edges of the batch that have not been
    /// applied yet are invisible to the repair.
    ///
    /// # Panics
    ///
    /// If `graph` is directed, has self-loops or a different node count, or if a batch
    /// edge is a self-loop, is out of range or is missing from `graph`.
    pub fn add_edges<G: WeightedGraph>(&mut self, graph: &G, batch: &[WeightedEdge]) {
        self.check_batch_graph(graph);

        let mut edges: Vec<(Edge, EdgeWeight)> = Vec::with_capacity(batch.len());
        for e in batch {
            let edge = self.checked_edge(e.edge());
            let Some(weight) = graph.weight(edge.u, edge.v) else {
                panic!("batch edge ({}, {}) is not in the graph", edge.u, edge.v);
            };
            debug_assert!(
                weight.total_cmp(&e.weight).is_eq(),
                "batch weight of ({}, {}) differs from the graph",
                edge.u,
                edge.v
            );
            edges.push((edge, weight));
        }
        edges.sort_by(|(a, wa), (b, wb)| wb.total_cmp(wa).then_with(|| a.key().cmp(&b.key())));

        debug!(edges = edges.len(), "applying insertion batch");
        self.edge_batch = edges.iter().map(|(edge, _)| *edge).collect();

        for (edge, weight) in edges {
            self.edge_batch.remove(&edge);
            let (u, v) = (edge.u, edge.v);

            if self.matching.are_matched(u, v)
                || !is_matchable(weight)
                || !self.state.accepts(u, &Partner::new(v, weight))
                || !self.state.accepts(v, &Partner::new(u, weight))
            {
                continue;
            }

            self.mark_affected(u);
            self.mark_affected(v);
            self.settle(graph);

            if self.config.verify_symmetry {
                self.state.check_symmetry();
            }
        }

        self.edge_batch.clear();
        debug!(affected = self.affected_count(), "insertion batch applied");
    }

    /// Apply a single inserted edge.
    pub fn add_edge<G: WeightedGraph>(&mut self, graph: &G, edge: WeightedEdge) {
        self.add_edges(graph, &[edge]);
    }

    /// Apply a batch of edges that have just been removed from `graph`.
    ///
    /// Edges that are not currently matched leave the matching unchanged.
    ///
    /// # Panics
    ///
    /// If `graph` is directed, has self-loops or a different node count, or if a batch
    /// edge is a self-loop, is out of range or is still present in `graph`.
    pub fn remove_edges<G: WeightedGraph>(&mut self, graph: &G, batch: &[Edge]) {
        self.check_batch_graph(graph);

        let edges: Vec<Edge> = batch.iter().map(|&e| self.checked_edge(e)).collect();
        for edge in &edges {
            assert!(
                !graph.has_edge(edge.u, edge.v),
                "batch edge ({}, {}) is still in the graph",
                edge.u,
                edge.v
            );
        }

        debug!(edges = edges.len(), "applying removal batch");

        for Edge { u, v } in edges {
            if !self.matching.are_matched(u, v) {
                continue;
            }

            self.unlink(u, v);
            self.touched.extend([u, v]);
            self.mark_affected(u);
            self.mark_affected(v);
            self.settle(graph);

            if self.config.verify_symmetry {
                self.state.check_symmetry();
            }
        }

        debug!(affected = self.affected_count(), "removal batch applied");
    }

    /// Apply a single removed edge.
    pub fn remove_edge<G: WeightedGraph>(&mut self, graph: &G, edge: Edge) {
        self.remove_edges(graph, &[edge]);
    }

    fn check_batch_graph<G: WeightedGraph>(&self, graph: &G) {
        assert!(!graph.is_directed(), "dynamic matching needs an undirected graph");
        assert_eq!(
            graph.number_of_self_loops(),
            0,
            "dynamic matching does not support self-loops"
        );
        assert_eq!(
            graph.number_of_nodes(),
            self.capacities.len(),
            "graph node count changed under the matcher"
        );
    }

    fn checked_edge(&self, edge: Edge) -> Edge {
        let nodes = self.capacities.len();
        assert!(
            edge.u.index() < nodes && edge.v.index() < nodes,
            "batch edge ({}, {}) out of range for {nodes} nodes",
            edge.u,
            edge.v
        );
        assert!(!edge.is_self_loop(), "batch edge ({}, {}) is a self-loop", edge.u, edge.v);
        edge.normalized()
    }

    fn mark_affected(&mut self, node: NodeId) {
        let flag = &mut self.affected[node.index()];
        if !*flag {
            *flag = true;
            self.affected_nodes.push(node);
        }
    }

    /// Drain the worklist until no affected node has a blocking partner.
    fn settle<G: WeightedGraph>(&mut self, graph: &G) {
        while let Some(a) = self.affected_nodes.pop() {
            self.affected[a.index()] = false;
            if let Some(target) = self.find_displacement(graph, a) {
                self.link(a, target);
                self.mark_affected(a);
            }
        }
    }

    /// The best neighbor `a` could link to, with both ends accepting.
    fn find_displacement<G: WeightedGraph>(&self, graph: &G, a: NodeId) -> Option<Partner> {
        let mut best: Option<Partner> = None;

        for (x, weight) in graph.neighbors(a) {
            if !is_matchable(weight)
                || self.state.has_suitor(a, x)
                || self.edge_batch.contains(&Edge::new(a, x).normalized())
            {
                continue;
            }
            let candidate = Partner::new(x, weight);
            if candidate.beats(best.as_ref())
                && self.state.accepts(a, &candidate)
                && self.state.accepts(x, &Partner::new(a, weight))
            {
                best = Some(candidate);
            }
        }

        best
    }

    /// Match `a` with `target`, evicting the weakest entry of a full list
    /// on either side.
    fn link(&mut self, a: NodeId, target: Partner) {
        let x = target.node;

        for node in [a, x] {
            if let Some(weakest) = self.state.weakest(node) {
                let evicted = weakest.node;
                self.unlink(node, evicted);
                self.touched.insert(evicted);
                self.mark_affected(evicted);
                trace!(node = %node, evicted = %evicted, "partner displaced");
            }
        }

        let displaced = self.state.insert_suitor(a, Partner::new(x, target.weight));
        debug_assert!(displaced.is_none());
        let displaced = self.state.insert_suitor(x, Partner::new(a, target.weight));
        debug_assert!(displaced.is_none());
        self.state.add_proposal(a, x);
        self.state.add_proposal(x, a);
        self.matching.match_pair(a, x);
        self.touched.extend([a, x]);

        trace!(u = %a, v = %x, weight = target.weight, "pair linked");
    }

    fn unlink(&mut self, p: NodeId, q: NodeId) {
        assert!(
            self.state.remove_suitor(p, q).is_some() && self.state.remove_suitor(q, p).is_some(),
            "suitor lists of {p} and {q} disagree"
        );
        self.state.withdraw_proposal(p, q);
        self.state.withdraw_proposal(q, p);
        self.matching.unmatch_pair(p, q);
    }
}
