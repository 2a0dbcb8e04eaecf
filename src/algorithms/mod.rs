//! Algorithms answering closest common manager queries over an [`OrgTree`].
//!
//! [`OrgTree`]: crate::OrgTree

mod lifting;
mod post_order;
mod tarjan;

pub use lifting::BinaryLifting;
pub use post_order::{postorder, traverse, DfsEvent, Traversal};
pub use tarjan::{all_pairs, lca_pair, AllPairs, PairQuery};
