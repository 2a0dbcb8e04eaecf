//! A finder shared between readers and replaced wholesale on reload.
//!
//! Finders are immutable once built. Reloading the organisation means building
//! a new finder from scratch and swapping it in with
//! [`SharedFinder::replace`]. Readers take a snapshot with
//! [`SharedFinder::load`] and keep answering from it, even if a swap happens
//! in the meantime.
//!
//! # Example
//!
//! ```
//! # use orgtree::{AllPairs, Finder, Node, OrgTree, SharedFinder};
//! let build = |root: &Node| AllPairs::new(OrgTree::new(root).unwrap());
//!
//! let shared = SharedFinder::new(build(&Node::with_children("CEO", [Node::new("Alice")])));
//! let before = shared.load();
//!
//! shared.replace(build(&Node::with_children("CEO", [Node::new("Bob")])));
//! assert_eq!(shared.load().manager("Bob").unwrap(), "CEO");
//! assert_eq!(shared.load().manager("Alice"), None);
//!
//! // Earlier snapshots are unaffected.
//! assert_eq!(before.manager("Alice").unwrap(), "CEO");
//! ```

use std::sync::{Arc, PoisonError, RwLock};

/// A finder behind an atomically swappable pointer.
#[derive(Debug, Default)]
pub struct SharedFinder<F> {
    current: RwLock<Arc<F>>,
}

impl<F> SharedFinder<F> {
    /// Wraps a finder.
    pub fn new(finder: F) -> Self {
        Self {
            current: RwLock::new(Arc::new(finder)),
        }
    }

    /// Returns a snapshot of the current finder.
    pub fn load(&self) -> Arc<F> {
        // The lock only guards a pointer swap, so a poisoned lock still holds
        // a complete finder.
        let current = self.current.read().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(&current)
    }

    /// Swaps in a new finder, returning the previous one.
    pub fn replace(&self, finder: F) -> Arc<F> {
        let finder = Arc::new(finder);
        let mut current = self.current.write().unwrap_or_else(PoisonError::into_inner);
        std::mem::replace(&mut *current, finder)
    }
}

impl<F> From<F> for SharedFinder<F> {
    fn from(finder: F) -> Self {
        Self::new(finder)
    }
}
