use std::iter::FusedIterator;

use crate::{NodeIndex, OrgTree};

/// Returns an iterator over the nodes of an [`OrgTree`] in post-order.
///
/// Every node is returned after all of its reports. Siblings are visited in
/// input order.
pub fn postorder(tree: &OrgTree) -> impl Iterator<Item = NodeIndex> + '_ {
    traverse(tree).filter_map(|event| match event {
        DfsEvent::Finish(node) => Some(node),
        DfsEvent::Discover(_) => None,
    })
}

/// Returns an iterator over the discovery and finish events of a depth-first
/// traversal of an [`OrgTree`], starting at the root.
///
/// The traversal uses an explicit stack, so arbitrarily deep trees are
/// supported.
pub fn traverse(tree: &OrgTree) -> Traversal<'_> {
    Traversal::new(tree)
}

/// An event of a depth-first traversal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DfsEvent {
    /// A node is visited for the first time, before any of its reports.
    Discover(NodeIndex),
    /// All of the node's reports have been finished.
    Finish(NodeIndex),
}

/// Iterator created by [`traverse`].
#[derive(Debug, Clone)]
pub struct Traversal<'tree> {
    tree: &'tree OrgTree,
    stack: Vec<DfsEvent>,
}

impl<'tree> Traversal<'tree> {
    /// Starts a traversal at the root of the tree.
    pub fn new(tree: &'tree OrgTree) -> Self {
        let mut stack = Vec::with_capacity(tree.node_count().min(1024));
        stack.push(DfsEvent::Discover(tree.root()));
        Self { tree, stack }
    }
}

impl Iterator for Traversal<'_> {
    type Item = DfsEvent;

    fn next(&mut self) -> Option<Self::Item> {
        let event = self.stack.pop()?;
        if let DfsEvent::Discover(node) = event {
            // Leave the finish event below the reports, so it is popped once
            // the whole subtree is done.
            self.stack.push(DfsEvent::Finish(node));
            self.stack.extend(
                self.tree
                    .children(node)
                    .iter()
                    .rev()
                    .map(|&child| DfsEvent::Discover(child)),
            );
        }
        Some(event)
    }
}

impl FusedIterator for Traversal<'_> {}

#[cfg(test)]
mod test {
    use super::*;
    use crate::Node;

    #[test]
    fn events() {
        // CEO -> {VP1 -> {Alice}, VP2}
        let root = Node::with_children(
            "CEO",
            [
                Node::with_children("VP1", [Node::new("Alice")]),
                Node::new("VP2"),
            ],
        );
        let tree = OrgTree::new(&root).unwrap();
        let name = |node| tree.key(node).as_str();

        let events: Vec<_> = traverse(&tree)
            .map(|event| match event {
                DfsEvent::Discover(node) => format!("+{}", name(node)),
                DfsEvent::Finish(node) => format!("-{}", name(node)),
            })
            .collect();
        assert_eq!(
            events,
            ["+CEO", "+VP1", "+Alice", "-Alice", "-VP1", "+VP2", "-VP2", "-CEO"]
        );

        let order: Vec<_> = postorder(&tree).map(name).collect();
        assert_eq!(order, ["Alice", "VP1", "VP2", "CEO"]);
    }

    #[test]
    fn single_node() {
        let tree = OrgTree::new(&Node::new("CEO")).unwrap();
        let root = tree.root();
        assert_eq!(
            traverse(&tree).collect::<Vec<_>>(),
            [DfsEvent::Discover(root), DfsEvent::Finish(root)]
        );
    }
}
