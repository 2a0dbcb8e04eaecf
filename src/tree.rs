//! Organisation trees.
//!
//! [`Node`] is the input form of an organisation: a key and an ordered list
//! of direct reports, as read from a configuration source. With the `serde`
//! feature enabled it (de)serializes as nested `{"name", "employees"}`
//! records.
//!
//! [`OrgTree`] is the validated, flattened form used by the finders. Each
//! employee receives a dense [`NodeIndex`] in pre-order, so the root is always
//! at index 0 and every manager has a smaller index than their reports.

use std::collections::HashMap;
use std::iter::FusedIterator;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{IndexError, Key, NodeIndex};

/// An employee and their direct reports.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct Node {
    /// Unique identifier of the employee.
    #[cfg_attr(feature = "serde", serde(rename = "name"))]
    pub key: Key,
    /// Direct reports, in order.
    #[cfg_attr(
        feature = "serde",
        serde(rename = "employees", default, skip_serializing_if = "Vec::is_empty")
    )]
    pub children: Vec<Node>,
}

impl Node {
    /// Creates an employee without reports.
    pub fn new(key: impl Into<Key>) -> Self {
        Self {
            key: key.into(),
            children: Vec::new(),
        }
    }

    /// Creates an employee with the given direct reports.
    pub fn with_children(key: impl Into<Key>, children: impl IntoIterator<Item = Node>) -> Self {
        Self {
            key: key.into(),
            children: children.into_iter().collect(),
        }
    }

    /// Appends a direct report.
    pub fn push(&mut self, child: Node) {
        self.children.push(child);
    }

    /// Returns the number of employees in this subtree, including `self`.
    pub fn size(&self) -> usize {
        let mut count = 0;
        let mut stack = vec![self];
        while let Some(node) = stack.pop() {
            count += 1;
            stack.extend(node.children.iter());
        }
        count
    }
}

impl Drop for Node {
    fn drop(&mut self) {
        // Deep chains of command would overflow the stack with the
        // recursive drop glue.
        let mut stack = std::mem::take(&mut self.children);
        while let Some(mut node) = stack.pop() {
            stack.append(&mut node.children);
        }
    }
}

/// A validated organisation tree with dense node indices.
///
/// Built from a [`Node`] tree by [`OrgTree::new`]. Read-only afterwards.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrgTree {
    /// Key of each node, indexed by [`NodeIndex`].
    keys: Vec<Key>,
    /// Direct manager of each node. `None` for the root.
    parents: Vec<Option<NodeIndex>>,
    /// Direct reports of each node, in input order.
    children: Vec<Vec<NodeIndex>>,
    /// Reverse lookup from keys to indices.
    lookup: HashMap<Key, NodeIndex>,
}

impl OrgTree {
    /// Validates and flattens a [`Node`] tree.
    ///
    /// Nodes are numbered in pre-order, respecting the order of each node's
    /// children.
    ///
    /// # Errors
    ///
    ///  - When two employees share a key.
    ///  - When the tree has more than [`NodeIndex::MAX`] employees.
    pub fn new(root: &Node) -> Result<Self, TreeError> {
        let mut tree = Self {
            keys: Vec::new(),
            parents: Vec::new(),
            children: Vec::new(),
            lookup: HashMap::new(),
        };

        let mut stack = vec![(root, None)];
        while let Some((node, parent)) = stack.pop() {
            let index = NodeIndex::try_from(tree.keys.len())?;
            if tree.lookup.insert(node.key.clone(), index).is_some() {
                return Err(TreeError::DuplicateKey {
                    key: node.key.clone(),
                });
            }
            tree.keys.push(node.key.clone());
            tree.parents.push(parent);
            tree.children.push(Vec::with_capacity(node.children.len()));
            if let Some(parent) = parent {
                tree.children[parent.index()].push(index);
            }

            // Push in reverse so the first child is numbered first.
            for child in node.children.iter().rev() {
                stack.push((child, Some(index)));
            }
        }

        Ok(tree)
    }

    /// Returns the root of the tree.
    #[inline]
    pub fn root(&self) -> NodeIndex {
        NodeIndex::new(0)
    }

    /// Returns the number of employees in the tree.
    #[inline]
    pub fn node_count(&self) -> usize {
        self.keys.len()
    }

    /// Returns the key of a node.
    ///
    /// # Panics
    ///
    /// Panics if the node is not part of the tree.
    #[inline]
    pub fn key(&self, node: NodeIndex) -> &Key {
        &self.keys[node.index()]
    }

    /// Returns the index of the employee with the given key, if any.
    #[inline]
    pub fn index_of(&self, key: &str) -> Option<NodeIndex> {
        self.lookup.get(key).copied()
    }

    /// Returns `true` if an employee with the given key exists.
    #[inline]
    pub fn contains_key(&self, key: &str) -> bool {
        self.lookup.contains_key(key)
    }

    /// Returns a node's parent or `None` if it is the root.
    #[inline]
    pub fn parent(&self, node: NodeIndex) -> Option<NodeIndex> {
        self.parents[node.index()]
    }

    /// Returns a node's direct manager.
    ///
    /// The root is its own manager.
    #[inline]
    pub fn manager(&self, node: NodeIndex) -> NodeIndex {
        self.parent(node).unwrap_or(node)
    }

    /// Returns a node's direct reports, in input order.
    #[inline]
    pub fn children(&self, node: NodeIndex) -> &[NodeIndex] {
        &self.children[node.index()]
    }

    /// Returns `true` if the node is the root.
    #[inline]
    pub fn is_root(&self, node: NodeIndex) -> bool {
        self.parents[node.index()].is_none()
    }

    /// Iterates over all nodes in pre-order.
    pub fn nodes_iter(&self) -> Nodes {
        Nodes {
            range: 0..self.keys.len(),
        }
    }

    /// Iterates over the ancestors of a node, starting with its parent and
    /// ending with the root.
    pub fn ancestors(&self, node: NodeIndex) -> Ancestors<'_> {
        Ancestors {
            tree: self,
            next: self.parent(node),
        }
    }

    /// Returns the pair `(a, b)` ordered by key, smaller key first.
    #[inline]
    pub fn ordered_pair(&self, a: NodeIndex, b: NodeIndex) -> (NodeIndex, NodeIndex) {
        if self.key(a) <= self.key(b) {
            (a, b)
        } else {
            (b, a)
        }
    }

    /// Rebuilds the nested [`Node`] form of the tree.
    pub fn to_node(&self) -> Node {
        let mut nodes: Vec<Option<Node>> =
            self.keys.iter().map(|k| Some(Node::new(k.clone()))).collect();
        // Reports always have larger indices than their managers, so every
        // subtree is complete by the time it is attached.
        for index in (1..nodes.len()).rev() {
            let node = nodes[index].take().unwrap();
            let parent = self.parents[index].unwrap().index();
            nodes[parent].as_mut().unwrap().children.push(node);
        }
        let mut root = nodes[0].take().unwrap();
        let mut stack = vec![&mut root];
        while let Some(node) = stack.pop() {
            node.children.reverse();
            stack.extend(node.children.iter_mut());
        }
        root
    }
}

impl TryFrom<&Node> for OrgTree {
    type Error = TreeError;

    fn try_from(root: &Node) -> Result<Self, Self::Error> {
        Self::new(root)
    }
}

/// Iterator created by [`OrgTree::nodes_iter`].
#[derive(Clone, Debug)]
pub struct Nodes {
    range: std::ops::Range<usize>,
}

impl Iterator for Nodes {
    type Item = NodeIndex;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.range.next().map(NodeIndex::new)
    }

    #[inline(always)]
    fn size_hint(&self) -> (usize, Option<usize>) {
        self.range.size_hint()
    }
}

impl ExactSizeIterator for Nodes {}

impl FusedIterator for Nodes {}

/// Iterator created by [`OrgTree::ancestors`].
#[derive(Clone, Debug)]
pub struct Ancestors<'a> {
    tree: &'a OrgTree,
    next: Option<NodeIndex>,
}

impl Iterator for Ancestors<'_> {
    type Item = NodeIndex;

    fn next(&mut self) -> Option<Self::Item> {
        let current = self.next?;
        self.next = self.tree.parent(current);
        Some(current)
    }
}

impl FusedIterator for Ancestors<'_> {}

/// Error produced when an organisation tree is malformed.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum TreeError {
    /// Two employees share the same key.
    #[error("the employee key {key} appears more than once")]
    DuplicateKey {
        /// The repeated key.
        key: Key,
    },
    /// The tree has too many employees to be indexed.
    #[error("the organisation is too large: {0}")]
    TooLarge(#[from] IndexError),
}
