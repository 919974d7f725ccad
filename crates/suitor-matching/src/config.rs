//! Matcher configuration: per-node capacities and verification switches.

use crate::{Error, Result};

/// How many partners each node may hold.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Capacity {
    /// Every node holds up to `b` partners.
    Uniform(usize),
    /// Node `i` holds up to `b[i]` partners.
    PerNode(Vec<usize>),
}

impl Capacity {
    /// Expand to one capacity per node for a graph with `nodes` nodes.
    pub fn resolve(&self, nodes: usize) -> Result<Vec<usize>> {
        match self {
            Capacity::Uniform(b) => Ok(vec![*b; nodes]),
            Capacity::PerNode(b) if b.len() == nodes => Ok(b.clone()),
            Capacity::PerNode(b) => Err(Error::CapacityLength {
                expected: nodes,
                actual: b.len(),
            }),
        }
    }
}

impl Default for Capacity {
    fn default() -> Self {
        Capacity::Uniform(1)
    }
}

impl From<usize> for Capacity {
    fn from(b: usize) -> Self {
        Capacity::Uniform(b)
    }
}

impl From<Vec<usize>> for Capacity {
    fn from(b: Vec<usize>) -> Self {
        Capacity::PerNode(b)
    }
}

/// Configuration shared by the static and dynamic matchers.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatcherConfig {
    /// Check that the suitor relation is mutual after `run()` and after
    /// every applied batch edge. A violation panics.
    ///
    /// Default: on in debug builds, off in release builds.
    pub verify_symmetry: bool,
}

impl Default for MatcherConfig {
    fn default() -> Self {
        Self {
            verify_symmetry: cfg!(debug_assertions),
        }
    }
}

impl MatcherConfig {
    /// Always verify, regardless of build profile.
    #[must_use]
    pub fn checked() -> Self {
        Self {
            verify_symmetry: true,
        }
    }

    /// Never verify.
    #[must_use]
    pub fn fast() -> Self {
        Self {
            verify_symmetry: false,
        }
    }
}
