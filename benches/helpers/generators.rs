//! Benchmark organisation generators.

use orgtree::{Node, OrgTree};

/// Create a complete tree where every manager has `fanout` reports.
///
/// Employees are numbered in breadth-first order.
pub fn make_wide_tree(size: usize, fanout: usize) -> OrgTree {
    assert!(size > 0 && fanout > 0);
    let mut nodes: Vec<Option<Node>> = (0..size)
        .map(|i| Some(Node::new(format!("e{i}"))))
        .collect();
    // The manager of `i` is `(i - 1) / fanout`, always a smaller index.
    for i in (1..size).rev() {
        let mut node = nodes[i].take().unwrap();
        node.children.reverse();
        nodes[(i - 1) / fanout].as_mut().unwrap().children.push(node);
    }
    let mut root = nodes[0].take().unwrap();
    root.children.reverse();
    OrgTree::new(&root).unwrap()
}

/// Create a single chain of command.
///
/// e0 -> e1 -> e2 -> ...
///
pub fn make_chain(size: usize) -> OrgTree {
    assert!(size > 0);
    let mut node = Node::new(format!("e{}", size - 1));
    for i in (0..size - 1).rev() {
        node = Node::with_children(format!("e{i}"), [node]);
    }
    OrgTree::new(&node).unwrap()
}
