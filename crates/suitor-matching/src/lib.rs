//! Suitor Matching
//!
//! Approximate maximum-weight b-matching with the b-suitor algorithm, plus
//! incremental repair under batched edge insertions and removals.
//!
//! # Model
//!
//! Every node `v` may keep up to `b(v)` matched edges. Nodes rank their
//! neighbors by edge weight, heaviest first, with the lower node id winning
//! ties. Only edges with non-negative weight are ever matched.
//!
//! Because that ranking is consistent with one global order on edges, the
//! result is always the greedy b-matching: scan edges heaviest first and
//! keep each one whose endpoints both have room. The greedy matching is a
//! 1/2-approximation of the maximum-weight b-matching.
//!
//! # Components
//!
//! - [`BMatching`]: the bounded partner store, `b(v)` slots per node
//! - [`BSuitorMatcher`]: computes a b-matching from scratch
//! - [`DynamicBSuitorMatcher`]: keeps it current as edges come and go
//! - [`SuitorMatcher`] and [`Matching`]: the single-partner special case
//!
//! # Example
//!
//! ```
//! use suitor_graph::{Graph, NodeId};
//! use suitor_matching::{BSuitorMatcher, Capacity};
//!
//! let graph = Graph::from_edges(4, [(0, 1, 1.0), (1, 2, 5.0), (2, 3, 1.0)]).unwrap();
//! let mut matcher = BSuitorMatcher::new(&graph, Capacity::Uniform(1)).unwrap();
//! matcher.run();
//!
//! let matching = matcher.b_matching().unwrap();
//! assert!(matching.are_matched(NodeId(1), NodeId(2)));
//! assert!(matching.is_unmatched(NodeId(0)));
//! ```

mod bmatching;
mod bsuitor;
mod config;
mod dynamic;
mod error;
mod matching;
mod partner;
mod slots;
mod state;
mod suitor;

pub use bmatching::BMatching;
pub use bsuitor::BSuitorMatcher;
pub use config::{Capacity, MatcherConfig};
pub use dynamic::DynamicBSuitorMatcher;
pub use error::{Error, Result};
pub use matching::Matching;
pub use partner::Partner;
pub use suitor::SuitorMatcher;
