//! Justifications for derived equalities.
//!
//! A justification is a hash-consed DAG whose leaves are caller-chosen fact
//! ids and whose inner nodes are unions. `None` stands for "no external
//! fact"; joining with it is the identity.

use rustc_hash::FxHashSet;
use std::fmt;

use crate::intern::InternTable;

/// A handle to a justification node.
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct Dep(u32);

impl Dep {
    /// The raw node index.
    #[must_use]
    pub const fn index(self) -> u32 {
        self.0
    }
}

impl fmt::Debug for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Dep({})", self.0)
    }
}

impl fmt::Display for Dep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "d{}", self.0)
    }
}

#[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
enum DepNode {
    Leaf(u32),
    Join(Dep, Dep),
}

/// Creates and inspects justifications.
#[derive(Debug, Default, Clone)]
pub struct DepManager {
    nodes: InternTable<DepNode>,
}

impl DepManager {
    /// Creates an empty manager.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    fn intern(&mut self, node: DepNode) -> Dep {
        Dep(self.nodes.intern(node))
    }

    /// The justification consisting of the single fact `fact`.
    pub fn leaf(&mut self, fact: u32) -> Dep {
        self.intern(DepNode::Leaf(fact))
    }

    /// Union of two justifications.
    pub fn join(&mut self, a: Option<Dep>, b: Option<Dep>) -> Option<Dep> {
        match (a, b) {
            (None, d) | (d, None) => d,
            (Some(a), Some(b)) if a == b => Some(a),
            (Some(a), Some(b)) => Some(self.intern(DepNode::Join(a.min(b), a.max(b)))),
        }
    }

    /// The sorted, duplicate-free set of facts under `d`.
    #[must_use]
    pub fn linearize(&self, d: Option<Dep>) -> Vec<u32> {
        let mut facts = Vec::new();
        let Some(root) = d else {
            return facts;
        };
        let mut seen = FxHashSet::default();
        let mut todo = vec![root];
        while let Some(d) = todo.pop() {
            if !seen.insert(d) {
                continue;
            }
            match self.nodes.get(d.0) {
                Some(DepNode::Leaf(fact)) => facts.push(*fact),
                Some(DepNode::Join(a, b)) => {
                    todo.push(*a);
                    todo.push(*b);
                }
                None => {}
            }
        }
        facts.sort_unstable();
        facts.dedup();
        facts
    }

    /// True if `fact` occurs under `d`.
    #[must_use]
    pub fn contains(&self, d: Option<Dep>, fact: u32) -> bool {
        self.linearize(d).binary_search(&fact).is_ok()
    }

    /// Number of nodes created so far.
    #[must_use]
    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    /// True if no justification was ever created.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}
