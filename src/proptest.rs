//! Random organisation tree strategies.

use crate::Node;
use proptest::prelude::*;
use proptest::sample::Index;

/// A random parent assignment and a shuffled list of key suffixes.
///
/// Node `i > 0` reports to a node with a smaller index, so the assignment
/// always describes a tree rooted at node 0.
fn gen_parents(max_n_nodes: usize) -> impl Strategy<Value = (Vec<usize>, Vec<usize>)> {
    (1..=max_n_nodes.max(1)).prop_flat_map(|n_nodes| {
        let parents = prop::collection::vec(any::<Index>(), n_nodes - 1).prop_map(|choices| {
            choices
                .into_iter()
                .enumerate()
                .map(|(i, choice)| choice.index(i + 1))
                .collect::<Vec<_>>()
        });
        let names = Just((0..n_nodes).collect::<Vec<_>>()).prop_shuffle();
        (parents, names)
    })
}

prop_compose! {
    /// A random non-empty organisation tree.
    ///
    /// With at least 1 and at most `max_n_nodes` employees. Keys are unique,
    /// and their order is unrelated to the shape of the tree.
    pub fn gen_tree(max_n_nodes: usize)(
        (parents, names) in gen_parents(max_n_nodes)
    ) -> Node {
        let mut nodes: Vec<Option<Node>> = names
            .iter()
            .map(|name| Some(Node::new(format!("emp{name:03}"))))
            .collect();
        // Reports have larger indices than their managers, so every subtree
        // is complete when it is attached. Children are attached in reverse
        // and restored to index order when their own manager is attached.
        for index in (1..nodes.len()).rev() {
            let mut node = nodes[index].take().unwrap();
            node.children.reverse();
            nodes[parents[index - 1]].as_mut().unwrap().children.push(node);
        }
        let mut root = nodes[0].take().unwrap();
        root.children.reverse();
        root
    }
}
