#![warn(missing_docs)]
//! `orgtree` answers "closest common manager" queries over organisation
//! trees.
//!
//! An organisation is a rooted tree of employees, each identified by a unique
//! [`Key`]. The closest common manager of two employees is their lowest common
//! ancestor in the tree, with one adjustment: an employee is never reported as
//! their own manager. When one employee is an ancestor of the other (or both
//! are the same person) the answer is that employee's direct manager instead.
//! Only the root, which has no manager, may be reported for itself.
//!
//! A [`Node`] tree is first validated and flattened into an [`OrgTree`],
//! which assigns each employee a dense [`NodeIndex`]. Finders are then built
//! from the [`OrgTree`] and queried through the [`Finder`] trait:
//!
//! - [`AllPairs`] runs Tarjan's offline lowest common ancestor algorithm once,
//!   recording the answer for every pair of employees. Queries take `O(1)`.
//! - [`PairQuery`] runs the same traversal for a single pair, stopping as soon
//!   as both employees have been visited.
//! - [`BinaryLifting`] precomputes ancestor jump tables in `O(n log n)` and
//!   answers queries in `O(log n)`, for trees where a full pair table is too
//!   large.
//!
//! # Example
//!
//! ```
//! use orgtree::{AllPairs, Finder, Node, OrgTree};
//!
//! let ceo = Node::with_children(
//!     "CEO",
//!     [
//!         Node::with_children("VP1", [Node::new("Alice"), Node::new("Bob")]),
//!         Node::with_children("VP2", [Node::new("Carol")]),
//!     ],
//! );
//! let finder = AllPairs::new(OrgTree::new(&ceo).unwrap());
//!
//! assert_eq!(finder.find("Alice", "Bob").unwrap(), "VP1");
//! assert_eq!(finder.find("Carol", "Alice").unwrap(), "CEO");
//! // `VP1` manages `Alice`, so the answer is `VP1`'s own manager.
//! assert_eq!(finder.find("VP1", "Alice").unwrap(), "CEO");
//! assert_eq!(finder.manager("Alice").unwrap(), "VP1");
//! assert_eq!(finder.find("Alice", "Mallory"), None);
//! ```
//!
//! # Features
//!
//! - `serde` enables (de)serialization of [`Node`] trees and the
//!   [`service`] layer rendering JSON response envelopes.
//! - `tracing` emits spans and events while finders are being built.
//! - `proptest` exposes random tree strategies in [`proptest`](mod@crate::proptest).
//! - `cli` builds the `orgtree` command line front end.
//!
use std::borrow::Borrow;
use std::num::NonZeroU32;
use std::sync::Arc;
use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

pub mod algorithms;
pub mod shared;
pub mod tree;
pub mod union_find;

#[cfg(feature = "serde")]
pub mod service;

#[cfg(feature = "proptest")]
pub mod proptest;

#[doc(inline)]
pub use crate::algorithms::{lca_pair, AllPairs, BinaryLifting, PairQuery};
#[doc(inline)]
pub use crate::shared::SharedFinder;
#[doc(inline)]
pub use crate::tree::{Node, OrgTree, TreeError};
#[doc(inline)]
pub use crate::union_find::UnionFind;

/// Unique identifier of an employee.
///
/// Keys are compared lexicographically on the underlying string. Pairs of
/// keys are canonicalised with the smaller key first.
#[derive(Clone, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Key(String);

impl Key {
    /// Creates a new key.
    #[inline]
    pub fn new(key: impl Into<String>) -> Self {
        Self(key.into())
    }

    /// Returns the key as a string slice.
    #[inline]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for Key {
    #[inline]
    fn from(key: &str) -> Self {
        Self(key.to_owned())
    }
}

impl From<String> for Key {
    #[inline]
    fn from(key: String) -> Self {
        Self(key)
    }
}

impl Borrow<str> for Key {
    #[inline]
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl AsRef<str> for Key {
    #[inline]
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for Key {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for Key {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

impl std::fmt::Display for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl std::fmt::Debug for Key {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "Key({:?})", self.0)
    }
}

/// Index of a node within an [`OrgTree`].
///
/// Restricted to be at most `2^31 - 2`. This type admits the *null pointer
/// optimization* so that `Option<NodeIndex>` takes as much space as a
/// `NodeIndex` by itself.
#[repr(transparent)]
#[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Deserialize, Serialize))]
pub struct NodeIndex(NonZeroU32);

impl NodeIndex {
    /// Maximum allowed index.
    pub const MAX: usize = (u32::MAX / 2) as usize - 1;

    /// Creates a new node index from a `usize`.
    ///
    /// # Panics
    ///
    /// Panics if the index is greater than [`NodeIndex::MAX`].
    #[inline]
    pub fn new(index: usize) -> Self {
        index.try_into().unwrap()
    }

    /// Returns the index as a `usize`.
    #[inline]
    pub fn index(self) -> usize {
        self.into()
    }
}

impl From<NodeIndex> for usize {
    #[inline]
    fn from(index: NodeIndex) -> Self {
        u32::from(index.0) as usize - 1
    }
}

impl TryFrom<usize> for NodeIndex {
    type Error = IndexError;

    #[inline]
    fn try_from(index: usize) -> Result<Self, Self::Error> {
        if index > Self::MAX {
            Err(IndexError { index })
        } else {
            // SAFETY: The value cannot be zero
            Ok(Self(unsafe { NonZeroU32::new_unchecked(1 + index as u32) }))
        }
    }
}

impl std::fmt::Debug for NodeIndex {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // avoid unnecessary newlines in alternate mode
        write!(f, "NodeIndex({})", self.index())
    }
}

/// Error indicating a [`NodeIndex`] is too large.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("the index {index} is too large.")]
pub struct IndexError {
    index: usize,
}

/// Answers closest common manager queries.
pub trait Finder {
    /// Returns the closest common manager of employees `a` and `b`.
    ///
    /// The answer is the lowest common ancestor of `a` and `b`, except that an
    /// employee is never their own manager: when the lowest common ancestor is
    /// `a` or `b` itself, that employee's direct manager is returned instead.
    /// Only the root may be returned for itself.
    ///
    /// Returns `None` if either employee is unknown to the finder.
    fn find(&self, a: &str, b: &str) -> Option<&Key>;

    /// Returns the direct manager of an employee, or the root itself when
    /// `employee` is the root.
    #[inline]
    fn manager(&self, employee: &str) -> Option<&Key> {
        self.find(employee, employee)
    }
}

impl<F: Finder + ?Sized> Finder for &F {
    #[inline]
    fn find(&self, a: &str, b: &str) -> Option<&Key> {
        (**self).find(a, b)
    }
}

impl<F: Finder + ?Sized> Finder for Box<F> {
    #[inline]
    fn find(&self, a: &str, b: &str) -> Option<&Key> {
        (**self).find(a, b)
    }
}

impl<F: Finder + ?Sized> Finder for Arc<F> {
    #[inline]
    fn find(&self, a: &str, b: &str) -> Option<&Key> {
        (**self).find(a, b)
    }
}
