//! Tarjan's offline lowest common ancestor algorithm.
//!
//! The tree is walked once in depth-first order. Every discovered node starts
//! a singleton set in a [`UnionFind`]; when a node is finished its set is
//! merged into its manager's, and the manager becomes the recorded ancestor of
//! the merged set. At the moment a node `u` is finished, the lowest common
//! ancestor of `u` and any already finished node `v` is the recorded ancestor
//! of `v`'s set.

use std::collections::HashMap;

use bitvec::vec::BitVec;
use itertools::Itertools;

use super::post_order::{traverse, DfsEvent};
use crate::{Finder, Key, NodeIndex, OrgTree, UnionFind};

/// Precomputes the closest common manager of every pair of employees.
///
/// See [`AllPairs`].
pub fn all_pairs(tree: OrgTree) -> AllPairs {
    AllPairs::new(tree)
}

/// A table of closest common managers for every pair of employees.
///
/// Built with a single traversal in `O(n²)` time and memory, where `n` is the
/// number of employees. Queries are `O(1)`.
#[derive(Debug, Clone)]
pub struct AllPairs {
    tree: OrgTree,
    /// Answers keyed by the pair ordered with [`OrgTree::ordered_pair`].
    table: HashMap<(NodeIndex, NodeIndex), NodeIndex>,
}

impl AllPairs {
    /// Runs the offline traversal over the whole tree.
    ///
    /// Complexity: O(n²)
    pub fn new(tree: OrgTree) -> Self {
        let n = tree.node_count();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("all_pairs", employees = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut state = OfflineState::new(n);
        let mut table = HashMap::with_capacity(n * (n + 1) / 2);

        for event in traverse(&tree) {
            match event {
                DfsEvent::Discover(node) => state.discover(node),
                DfsEvent::Finish(node) => {
                    state.finish(node);
                    // Compare against every finished node, including `node`
                    // itself.
                    for i in 0..state.finished_order.len() {
                        let other = state.finished_order[i];
                        let manager = state.common_manager(&tree, node, other);
                        table.insert(tree.ordered_pair(node, other), manager);
                    }
                    if let Some(parent) = tree.parent(node) {
                        state.absorb(parent, node);
                    }
                }
            }
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(pairs = table.len(), "closest common managers computed");

        Self { tree, table }
    }

    /// Returns the tree the table was computed for.
    #[inline]
    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    /// Returns the number of recorded pairs, `n (n + 1) / 2` for a tree of `n`
    /// employees.
    #[inline]
    pub fn pair_count(&self) -> usize {
        self.table.len()
    }

    /// Returns the closest common manager of two nodes.
    ///
    /// Complexity: O(1)
    #[inline]
    pub fn find_index(&self, a: NodeIndex, b: NodeIndex) -> Option<NodeIndex> {
        self.table.get(&self.tree.ordered_pair(a, b)).copied()
    }

    /// Iterates over every pair `(a, b, manager)` with `a <= b`, sorted by key.
    pub fn sorted_pairs(&self) -> impl Iterator<Item = (&Key, &Key, &Key)> {
        self.table
            .iter()
            .map(|(&(a, b), &manager)| {
                (
                    self.tree.key(a),
                    self.tree.key(b),
                    self.tree.key(manager),
                )
            })
            .sorted_unstable()
    }
}

impl Finder for AllPairs {
    fn find(&self, a: &str, b: &str) -> Option<&Key> {
        let a = self.tree.index_of(a)?;
        let b = self.tree.index_of(b)?;
        let manager = self.find_index(a, b)?;
        Some(self.tree.key(manager))
    }
}

/// Computes the closest common manager of a single pair of employees.
///
/// The traversal stops as soon as both employees have been finished. Returns
/// `None` if either key is not part of the tree.
///
/// Complexity: O(n)
pub fn lca_pair(tree: &OrgTree, a: &str, b: &str) -> Option<NodeIndex> {
    let a = tree.index_of(a)?;
    let b = tree.index_of(b)?;

    #[cfg(feature = "tracing")]
    let span = tracing::debug_span!("lca_pair", a = ?a, b = ?b);
    #[cfg(feature = "tracing")]
    let _enter = span.enter();

    let mut state = OfflineState::new(tree.node_count());
    for event in traverse(tree) {
        match event {
            DfsEvent::Discover(node) => state.discover(node),
            DfsEvent::Finish(node) => {
                state.finish(node);
                let other = if node == a {
                    Some(b)
                } else if node == b {
                    Some(a)
                } else {
                    None
                };
                if let Some(other) = other.filter(|&other| state.is_finished(other)) {
                    return Some(state.common_manager(tree, node, other));
                }
                if let Some(parent) = tree.parent(node) {
                    state.absorb(parent, node);
                }
            }
        }
    }

    unreachable!("both employees are finished before the traversal ends")
}

/// The closest common manager of a single pair of employees, computed when
/// the query is constructed.
///
/// Answers [`Finder::find`] for that pair only, in either order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PairQuery {
    /// The queried keys, smaller key first.
    pair: (Key, Key),
    answer: Option<Key>,
}

impl PairQuery {
    /// Runs the single pair traversal for `a` and `b`.
    pub fn new(tree: &OrgTree, a: impl Into<Key>, b: impl Into<Key>) -> Self {
        let (a, b) = (a.into(), b.into());
        let answer = lca_pair(tree, a.as_str(), b.as_str()).map(|node| tree.key(node).clone());
        let pair = if a <= b { (a, b) } else { (b, a) };
        Self { pair, answer }
    }

    /// Returns the queried pair, smaller key first.
    #[inline]
    pub fn pair(&self) -> (&Key, &Key) {
        (&self.pair.0, &self.pair.1)
    }

    /// Returns the closest common manager, or `None` if an employee is
    /// unknown.
    #[inline]
    pub fn answer(&self) -> Option<&Key> {
        self.answer.as_ref()
    }
}

impl Finder for PairQuery {
    fn find(&self, a: &str, b: &str) -> Option<&Key> {
        let (a, b) = if a <= b { (a, b) } else { (b, a) };
        if self.pair.0 == a && self.pair.1 == b {
            self.answer()
        } else {
            None
        }
    }
}

/// Working state of a single offline traversal.
///
/// Discarded once the traversal completes.
#[derive(Debug)]
struct OfflineState {
    sets: UnionFind,
    /// The lowest known common ancestor of each set, indexed by the set's
    /// representative.
    ancestor: Vec<Option<NodeIndex>>,
    /// Whether each node has been finished.
    finished: BitVec,
    /// Finished nodes, in finishing order.
    finished_order: Vec<NodeIndex>,
}

impl OfflineState {
    fn new(capacity: usize) -> Self {
        Self {
            sets: UnionFind::with_capacity(capacity),
            ancestor: vec![None; capacity],
            finished: BitVec::repeat(false, capacity),
            finished_order: Vec::with_capacity(capacity),
        }
    }

    /// A newly discovered node is its own ancestor.
    fn discover(&mut self, node: NodeIndex) {
        self.sets.make_set(node);
        let root = self.sets.find(node);
        self.ancestor[root.index()] = Some(node);
    }

    fn finish(&mut self, node: NodeIndex) {
        debug_assert!(!self.finished[node.index()], "{node:?} finished twice");
        self.finished.set(node.index(), true);
        self.finished_order.push(node);
    }

    #[inline]
    fn is_finished(&self, node: NodeIndex) -> bool {
        self.finished[node.index()]
    }

    /// Merges a finished report's set into its manager's.
    fn absorb(&mut self, parent: NodeIndex, child: NodeIndex) {
        self.sets.union(parent, child);
        let root = self.sets.find(parent);
        self.ancestor[root.index()] = Some(parent);
    }

    /// Returns the closest common manager of the node being finished and an
    /// already finished node.
    fn common_manager(&mut self, tree: &OrgTree, current: NodeIndex, other: NodeIndex) -> NodeIndex {
        let root = self.sets.find(other);
        let lca = self.ancestor[root.index()]
            .unwrap_or_else(|| panic!("set of {other:?} has no recorded ancestor"));
        managerial(tree, lca, current, other)
    }
}

/// An employee is never their own common manager: when the lowest common
/// ancestor is one of the queried employees, their direct manager is reported
/// instead. The root keeps itself.
#[inline]
pub(super) fn managerial(tree: &OrgTree, lca: NodeIndex, a: NodeIndex, b: NodeIndex) -> NodeIndex {
    if lca == a || lca == b {
        tree.manager(lca)
    } else {
        lca
    }
}
