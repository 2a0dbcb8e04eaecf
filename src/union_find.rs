//! Disjoint-set-union over node indices.
//!
//! [`UnionFind`] partitions registered [`NodeIndex`] values into disjoint
//! sets. It combines full path compression in [`UnionFind::find`] with
//! union-by-rank in [`UnionFind::link`], giving near constant amortized time
//! per operation.
//!
//! # Example
//!
//! ```
//! # use orgtree::{NodeIndex, UnionFind};
//! let [a, b, c] = [0, 1, 2].map(NodeIndex::new);
//! let mut sets = UnionFind::with_capacity(3);
//! for x in [a, b, c] {
//!     sets.make_set(x);
//! }
//!
//! sets.union(a, b);
//! assert!(sets.same_set(a, b));
//! assert!(!sets.same_set(a, c));
//! ```

use crate::NodeIndex;

/// A union-find structure with path compression and union-by-rank.
///
/// Elements must be registered with [`UnionFind::make_set`] before use.
/// Operating on an unregistered element panics.
#[derive(Debug, Clone, Default)]
pub struct UnionFind {
    /// Parent pointer of each element. Representatives point to themselves,
    /// unregistered slots are `None`.
    parent: Vec<Option<NodeIndex>>,
    /// Upper bound on the height of each representative's tree.
    rank: Vec<u8>,
    /// Number of registered elements.
    len: usize,
}

impl UnionFind {
    /// Creates an empty structure.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an empty structure with room for indices below `capacity`.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            parent: Vec::with_capacity(capacity),
            rank: Vec::with_capacity(capacity),
            len: 0,
        }
    }

    /// Returns the number of registered elements.
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if no element has been registered.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns `true` if `x` has been registered.
    #[inline]
    pub fn contains(&self, x: NodeIndex) -> bool {
        matches!(self.parent.get(x.index()), Some(Some(_)))
    }

    /// Registers `x` as a new singleton set.
    ///
    /// Registering an element twice resets it to a singleton of rank 0. The
    /// caller is responsible for not re-registering an element that other
    /// elements point to.
    pub fn make_set(&mut self, x: NodeIndex) {
        let index = x.index();
        if index >= self.parent.len() {
            self.parent.resize(index + 1, None);
            self.rank.resize(index + 1, 0);
        }
        if self.parent[index].replace(x).is_none() {
            self.len += 1;
        }
        self.rank[index] = 0;
    }

    /// Returns the representative of `x`'s set.
    ///
    /// Every element visited on the way is re-pointed directly at the
    /// representative.
    ///
    /// # Panics
    ///
    /// Panics if `x` has not been registered.
    pub fn find(&mut self, x: NodeIndex) -> NodeIndex {
        let mut root = x;
        loop {
            let parent = self.parent_of(root);
            if parent == root {
                break;
            }
            root = parent;
        }

        let mut node = x;
        while node != root {
            let next = self.parent_of(node);
            self.parent[node.index()] = Some(root);
            node = next;
        }

        root
    }

    /// Merges the sets of two representatives, returning the representative
    /// of the merged set.
    ///
    /// The representative with the higher rank becomes the parent. On a tie
    /// `y` becomes the parent and its rank grows by one.
    ///
    /// `x` and `y` must be distinct representatives. Use [`UnionFind::union`]
    /// for arbitrary elements.
    pub fn link(&mut self, x: NodeIndex, y: NodeIndex) -> NodeIndex {
        debug_assert_ne!(x, y, "cannot link a set with itself");
        debug_assert_eq!(self.parent_of(x), x, "{x:?} is not a representative");
        debug_assert_eq!(self.parent_of(y), y, "{y:?} is not a representative");

        let (rank_x, rank_y) = (self.rank[x.index()], self.rank[y.index()]);
        if rank_x > rank_y {
            self.parent[y.index()] = Some(x);
            x
        } else {
            self.parent[x.index()] = Some(y);
            if rank_x == rank_y {
                self.rank[y.index()] += 1;
            }
            y
        }
    }

    /// Merges the sets containing `x` and `y`.
    ///
    /// Returns `false` if they already were in the same set.
    ///
    /// # Panics
    ///
    /// Panics if either element has not been registered.
    pub fn union(&mut self, x: NodeIndex, y: NodeIndex) -> bool {
        let (x, y) = (self.find(x), self.find(y));
        if x == y {
            return false;
        }
        self.link(x, y);
        true
    }

    /// Returns `true` if `x` and `y` are in the same set.
    pub fn same_set(&mut self, x: NodeIndex, y: NodeIndex) -> bool {
        self.find(x) == self.find(y)
    }

    /// Returns the rank of `x`.
    ///
    /// Only meaningful for representatives.
    #[inline]
    pub fn rank(&self, x: NodeIndex) -> u8 {
        self.rank[x.index()]
    }

    #[inline]
    fn parent_of(&self, x: NodeIndex) -> NodeIndex {
        match self.parent.get(x.index()) {
            Some(Some(parent)) => *parent,
            _ => panic!("{x:?} is not registered in the union-find structure"),
        }
    }
}
