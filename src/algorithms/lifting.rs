//! Lowest common ancestor queries by binary lifting.

use super::post_order::{traverse, DfsEvent};
use super::tarjan::managerial;
use crate::{Finder, Key, NodeIndex, OrgTree};

/// A precomputed data structure for closest common manager queries, without
/// materialising every pair.
///
/// Given two nodes `a` and `b`, the lowest common ancestor is the node that is
/// an ancestor of both `a` and `b` and has the greatest depth. Queries apply
/// the same adjustment as [`AllPairs`]: an employee is never their own
/// manager.
///
/// The precomputation takes `O(n log n)` time, where `n` is the number of
/// employees. Each query takes `O(log n)` time.
///
/// [`AllPairs`]: super::AllPairs
#[derive(Debug, Clone)]
pub struct BinaryLifting {
    tree: OrgTree,
    /// For each node, stores the timestamp of the first visit in a depth-first
    /// traversal of the tree.
    first_visit: Vec<usize>,
    /// For each node, stores the timestamp of the last visit in a depth-first
    /// traversal of the tree.
    last_visit: Vec<usize>,
    /// For each node, stores the 1st, 2nd, 4th, 8th, ... ancestor.
    climb_nodes: Vec<Vec<NodeIndex>>,
}

impl BinaryLifting {
    /// Initializes the binary lifting tables.
    ///
    /// Complexity: O(n log n)
    pub fn new(tree: OrgTree) -> Self {
        let n = tree.node_count();

        #[cfg(feature = "tracing")]
        let span = tracing::info_span!("binary_lifting", employees = n);
        #[cfg(feature = "tracing")]
        let _enter = span.enter();

        let mut first_visit = vec![0; n];
        let mut last_visit = vec![0; n];
        let mut climb_nodes: Vec<Vec<NodeIndex>> = vec![Vec::new(); n];

        let mut timestamp = 0;
        for event in traverse(&tree) {
            match event {
                DfsEvent::Discover(node) => {
                    first_visit[node.index()] = timestamp;
                    timestamp += 1;

                    // Managers are discovered before their reports, so the
                    // parent's climb nodes are already complete.
                    if let Some(parent) = tree.parent(node) {
                        let mut climb = vec![parent];
                        let mut prev = parent;
                        for i in 1.. {
                            let Some(&u) = climb_nodes[prev.index()].get(i - 1) else {
                                break;
                            };
                            climb.push(u);
                            prev = u;
                        }
                        climb_nodes[node.index()] = climb;
                    }
                }
                DfsEvent::Finish(node) => {
                    last_visit[node.index()] = timestamp;
                    timestamp += 1;
                }
            }
        }

        Self {
            tree,
            first_visit,
            last_visit,
            climb_nodes,
        }
    }

    /// Returns the tree the tables were computed for.
    #[inline]
    pub fn tree(&self) -> &OrgTree {
        &self.tree
    }

    /// Returns `true` if `a` is an ancestor of `b` in the tree.
    ///
    /// If `a` and `b` are the same node, returns `true`.
    ///
    /// Complexity: O(1)
    #[inline]
    pub fn is_ancestor(&self, a: NodeIndex, b: NodeIndex) -> bool {
        self.first_visit[a.index()] <= self.first_visit[b.index()]
            && self.last_visit[a.index()] >= self.last_visit[b.index()]
    }

    /// Given two nodes, returns their lowest common ancestor, without the
    /// manager adjustment.
    ///
    /// Complexity: O(log n)
    pub fn lca(&self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        if self.is_ancestor(a, b) {
            return a;
        }
        if self.is_ancestor(b, a) {
            return b;
        }

        // Invariant: `u` is an ancestor of `a` (or `a`), but not an ancestor of `b`.
        //
        // Ancestors of `a` have at most as many climb nodes as `a`, so the
        // jump sizes can be taken from `a`'s table in decreasing order.
        let mut u = a;
        for i in (0..self.climb_nodes[a.index()].len()).rev() {
            // The 2^i ancestor of `u`, if it exists.
            if let Some(&v) = self.climb_nodes[u.index()].get(i) {
                if !self.is_ancestor(v, b) {
                    u = v;
                }
            }
        }

        // `u` is not the root, as the root is an ancestor of `b`.
        self.climb_nodes[u.index()][0]
    }

    /// Returns the closest common manager of two nodes.
    ///
    /// Complexity: O(log n)
    #[inline]
    pub fn find_index(&self, a: NodeIndex, b: NodeIndex) -> NodeIndex {
        managerial(&self.tree, self.lca(a, b), a, b)
    }
}

impl Finder for BinaryLifting {
    fn find(&self, a: &str, b: &str) -> Option<&Key> {
        let a = self.tree.index_of(a)?;
        let b = self.tree.index_of(b)?;
        Some(self.tree.key(self.find_index(a, b)))
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::{AllPairs, Node};
    use itertools::iproduct;
    use rstest::{fixture, rstest};

    /// A tree with some uneven branches.
    ///
    /// ```text
    /// n0 -> {
    ///   n1 -> {
    ///     n3 -> n4 -> n5 -> n6,
    ///     n7,
    ///   },
    ///   n2 -> n8 -> {n9, n10},
    /// }
    /// ```
    #[fixture]
    fn test_tree() -> OrgTree {
        let chain = Node::with_children(
            "n3",
            [Node::with_children(
                "n4",
                [Node::with_children("n5", [Node::new("n6")])],
            )],
        );
        let root = Node::with_children(
            "n0",
            [
                Node::with_children("n1", [chain, Node::new("n7")]),
                Node::with_children(
                    "n2",
                    [Node::with_children("n8", [Node::new("n9"), Node::new("n10")])],
                ),
            ],
        );
        OrgTree::new(&root).unwrap()
    }

    #[rstest]
    fn lca(test_tree: OrgTree) {
        let lifting = BinaryLifting::new(test_tree);

        // Little helper to convert keys to node indexes.
        let n = |i: usize| lifting.tree().index_of(&format!("n{i}")).unwrap();

        assert_eq!(lifting.lca(n(5), n(10)), n(0));
        assert_eq!(lifting.lca(n(10), n(5)), n(0));
        assert_eq!(lifting.lca(n(6), n(10)), n(0));
        assert_eq!(lifting.lca(n(10), n(6)), n(0));

        assert_eq!(lifting.lca(n(0), n(0)), n(0));
        assert_eq!(lifting.lca(n(0), n(1)), n(0));
        assert_eq!(lifting.lca(n(0), n(9)), n(0));
        assert_eq!(lifting.lca(n(1), n(0)), n(0));
        assert_eq!(lifting.lca(n(9), n(0)), n(0));

        assert_eq!(lifting.lca(n(1), n(2)), n(0));
        assert_eq!(lifting.lca(n(7), n(8)), n(0));
        assert_eq!(lifting.lca(n(6), n(7)), n(1));
        assert_eq!(lifting.lca(n(4), n(7)), n(1));
        assert_eq!(lifting.lca(n(9), n(10)), n(8));
        assert_eq!(lifting.lca(n(6), n(4)), n(4));

        assert_eq!(lifting.lca(n(2), n(10)), n(2));
        assert_eq!(lifting.lca(n(10), n(2)), n(2));
    }

    #[rstest]
    fn managers(test_tree: OrgTree) {
        let lifting = BinaryLifting::new(test_tree);

        assert_eq!(lifting.find("n0", "n0").unwrap(), "n0");
        assert_eq!(lifting.find("n0", "n6").unwrap(), "n0");
        assert_eq!(lifting.find("n4", "n6").unwrap(), "n3");
        assert_eq!(lifting.find("n6", "n4").unwrap(), "n3");
        assert_eq!(lifting.find("n6", "n6").unwrap(), "n5");
        assert_eq!(lifting.find("n9", "n10").unwrap(), "n8");
        assert_eq!(lifting.find("n2", "n10").unwrap(), "n0");
        assert_eq!(lifting.manager("n7").unwrap(), "n1");
        assert_eq!(lifting.find("n9", "n11"), None);
    }

    #[rstest]
    fn agrees_with_all_pairs(test_tree: OrgTree) {
        let all = AllPairs::new(test_tree.clone());
        let lifting = BinaryLifting::new(test_tree.clone());
        for (a, b) in iproduct!(test_tree.nodes_iter(), test_tree.nodes_iter()) {
            assert_eq!(all.find_index(a, b), Some(lifting.find_index(a, b)));
        }
    }

    #[test]
    fn long_chain() {
        let depth = 1_000;
        let mut node = Node::new(format!("e{}", depth - 1));
        for i in (0..depth - 1).rev() {
            node = Node::with_children(format!("e{i}"), [node]);
        }
        let tree = OrgTree::new(&node).unwrap();
        let lifting = BinaryLifting::new(tree);

        assert_eq!(lifting.find("e999", "e500").unwrap(), "e499");
        assert_eq!(lifting.find("e999", "e998").unwrap(), "e997");
        assert_eq!(lifting.find("e0", "e999").unwrap(), "e0");
    }

    #[cfg(feature = "proptest")]
    mod proptests {
        use super::*;
        use crate::proptest::gen_tree;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn lifting_matches_all_pairs(root in gen_tree(60)) {
                let tree = OrgTree::new(&root).unwrap();
                let all = AllPairs::new(tree.clone());
                let lifting = BinaryLifting::new(tree.clone());
                for (a, b) in iproduct!(tree.nodes_iter(), tree.nodes_iter()) {
                    prop_assert_eq!(all.find_index(a, b), Some(lifting.find_index(a, b)));
                }
            }
        }
    }
}
