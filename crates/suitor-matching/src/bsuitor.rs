//! Static b-suitor matcher.
//!
//! Every node `u` proposes up to `b(u)` times, each time to its preferred
//! target: the heaviest neighbor it has not proposed to whose weakest
//! accepted suitor it would beat. A proposal into a full list evicts the
//! weakest suitor, which withdraws and proposes again elsewhere. Evictions
//! form a cascade that is drained from an explicit stack.
//!
//! # Termination
//!
//! Every accepted proposal strictly improves the target's list, and a node
//! never proposes twice to a neighbor it is still courting. Each list can
//! only improve finitely often, so every cascade ends. The total work is
//! roughly `O(b · m)` neighbor scans.

use suitor_graph::{NodeId, WeightedGraph};
use tracing::{debug, trace};

use crate::partner::{is_matchable, Partner};
use crate::state::SuitorState;
use crate::{BMatching, Capacity, Error, MatcherConfig, Result};

/// Reject graphs the suitor matchers cannot handle.
pub(crate) fn check_graph<G: WeightedGraph>(graph: &G) -> Result<()> {
    if graph.is_directed() {
        return Err(Error::DirectedGraph);
    }
    let count = graph.number_of_self_loops();
    if count > 0 {
        return Err(Error::SelfLoops { count });
    }
    Ok(())
}

/// One-shot b-suitor matcher over a borrowed graph.
#[derive(Debug)]
pub struct BSuitorMatcher<'g, G> {
    graph: &'g G,
    config: MatcherConfig,
    capacities: Vec<usize>,
    state: SuitorState,
    matching: BMatching,
    has_run: bool,
}

impl<'g, G: WeightedGraph> BSuitorMatcher<'g, G> {
    /// Create a matcher with the default configuration.
    ///
    /// Fails if the graph is directed, has self-loops, or a per-node
    /// capacity vector does not match the node count.
    pub fn new(graph: &'g G, capacity: impl Into<Capacity>) -> Result<Self> {
        Self::with_config(graph, capacity, MatcherConfig::default())
    }

    /// Create a matcher with an explicit configuration.
    pub fn with_config(
        graph: &'g G,
        capacity: impl Into<Capacity>,
        config: MatcherConfig,
    ) -> Result<Self> {
        check_graph(graph)?;
        let capacities = capacity.into().resolve(graph.number_of_nodes())?;

        Ok(Self {
            graph,
            config,
            state: SuitorState::new(&capacities),
            matching: BMatching::new(&capacities),
            capacities,
            has_run: false,
        })
    }

    /// Compute the b-matching from scratch.
    ///
    /// # Panics
    ///
    /// If symmetry verification is enabled and the final suitor relation is
    /// not mutual.
    pub fn run(&mut self) {
        let graph = self.graph;
        self.state = SuitorState::new(&self.capacities);

        for u in graph.nodes() {
            self.find_suitors(u);
        }

        if self.config.verify_symmetry {
            self.state.check_symmetry();
        }

        let mut matching = BMatching::new(&self.capacities);
        for u in graph.nodes() {
            for p in self.state.suitors(u) {
                // each pair once
                if u < p.node {
                    matching.match_pair(u, p.node);
                }
            }
        }

        debug!(
            nodes = graph.number_of_nodes(),
            pairs = matching.pairs().count(),
            "b-suitor run complete"
        );
        self.matching = matching;
        self.has_run = true;
    }

    /// The computed b-matching.
    pub fn b_matching(&self) -> Result<&BMatching> {
        if self.has_run {
            Ok(&self.matching)
        } else {
            Err(Error::NotRun)
        }
    }

    /// Check if [`run`](Self::run) has completed.
    pub fn has_run(&self) -> bool {
        self.has_run
    }

    /// Resolved capacity of every node.
    pub fn capacities(&self) -> &[usize] {
        &self.capacities
    }

    pub(crate) fn into_parts(self) -> (MatcherConfig, Vec<usize>, SuitorState, BMatching) {
        (self.config, self.capacities, self.state, self.matching)
    }

    fn find_suitors(&mut self, u: NodeId) {
        for _ in 0..self.capacities[u.index()] {
            match self.find_preferred(u) {
                Some(target) => self.make_suitor(u, target),
                None => break,
            }
        }
    }

    /// The best neighbor `y` has not proposed to and would be accepted by.
    fn find_preferred(&self, y: NodeId) -> Option<Partner> {
        let mut best: Option<Partner> = None;

        for (v, weight) in self.graph.neighbors(y) {
            if !is_matchable(weight) || self.state.has_proposed(y, v) {
                continue;
            }
            let candidate = Partner::new(v, weight);
            if candidate.beats(best.as_ref())
                && self.state.accepts(v, &Partner::new(y, weight))
            {
                best = Some(candidate);
            }
        }

        best
    }

    /// Propose `u` to `target` and drain the resulting eviction cascade.
    fn make_suitor(&mut self, u: NodeId, target: Partner) {
        let mut pending = vec![(u, target)];

        while let Some((u, target)) = pending.pop() {
            let x = target.node;
            let evicted = self.state.insert_suitor(x, Partner::new(u, target.weight));
            self.state.add_proposal(u, x);
            trace!(suitor = %u, target = %x, weight = target.weight, "proposal accepted");

            if let Some(y) = evicted {
                self.state.withdraw_proposal(y.node, x);
                trace!(evicted = %y.node, by = %x, "suitor evicted");
                if let Some(next) = self.find_preferred(y.node) {
                    pending.push((y.node, next));
                }
            }
        }
    }
}
