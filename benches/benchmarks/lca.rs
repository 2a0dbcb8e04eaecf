#![allow(clippy::unit_arg)] // Required for black_box uses

use criterion::{black_box, criterion_group, Criterion};
use orgtree::{lca_pair, AllPairs, BinaryLifting, Finder, OrgTree};

use crate::helpers::*;

// -----------------------------------------------------------------------------
// Benchmark functions
// -----------------------------------------------------------------------------

struct BuildAllPairs {
    tree: OrgTree,
}
impl SizedBenchmark for BuildAllPairs {
    fn name() -> &'static str {
        "build_all_pairs"
    }

    // The table is quadratic in the number of employees.
    fn sizes() -> &'static [usize] {
        &[100, 500, 1_000]
    }

    fn setup(size: usize) -> Self {
        Self {
            tree: make_wide_tree(size, 4),
        }
    }

    fn run(&self) -> impl Sized {
        AllPairs::new(self.tree.clone()).pair_count()
    }
}

struct BuildBinaryLifting {
    tree: OrgTree,
}
impl SizedBenchmark for BuildBinaryLifting {
    fn name() -> &'static str {
        "build_binary_lifting"
    }

    fn setup(size: usize) -> Self {
        Self {
            tree: make_wide_tree(size, 4),
        }
    }

    fn run(&self) -> impl Sized {
        BinaryLifting::new(self.tree.clone())
            .tree()
            .node_count()
    }
}

struct SinglePair {
    tree: OrgTree,
    a: String,
    b: String,
}
impl SizedBenchmark for SinglePair {
    fn name() -> &'static str {
        "single_pair_chain"
    }

    fn setup(size: usize) -> Self {
        Self {
            tree: make_chain(size),
            a: format!("e{}", size / 2),
            b: format!("e{}", size - 1),
        }
    }

    fn run(&self) -> impl Sized {
        lca_pair(&self.tree, &self.a, &self.b)
    }
}

struct QueryAllPairs {
    finder: AllPairs,
    keys: Vec<String>,
}
impl SizedBenchmark for QueryAllPairs {
    fn name() -> &'static str {
        "query_all_pairs"
    }

    fn sizes() -> &'static [usize] {
        &[100, 500, 1_000]
    }

    fn setup(size: usize) -> Self {
        let tree = make_wide_tree(size, 4);
        let keys = tree.nodes_iter().map(|n| tree.key(n).to_string()).collect();
        Self {
            finder: AllPairs::new(tree),
            keys,
        }
    }

    fn run(&self) -> impl Sized {
        for (a, b) in self.keys.iter().zip(self.keys.iter().rev()) {
            black_box(self.finder.find(a, b));
        }
    }
}

struct QueryBinaryLifting {
    finder: BinaryLifting,
    keys: Vec<String>,
}
impl SizedBenchmark for QueryBinaryLifting {
    fn name() -> &'static str {
        "query_binary_lifting"
    }

    fn setup(size: usize) -> Self {
        let tree = make_wide_tree(size, 4);
        let keys = tree.nodes_iter().map(|n| tree.key(n).to_string()).collect();
        Self {
            finder: BinaryLifting::new(tree),
            keys,
        }
    }

    fn run(&self) -> impl Sized {
        for (a, b) in self.keys.iter().zip(self.keys.iter().rev()) {
            black_box(self.finder.find(a, b));
        }
    }
}

// -----------------------------------------------------------------------------
// Criterion definitions
// -----------------------------------------------------------------------------

criterion_group! {
    name = criterion_group;
    config = Criterion::default();
    targets =
        BuildAllPairs::criterion,
        BuildBinaryLifting::criterion,
        SinglePair::criterion,
        QueryAllPairs::criterion,
        QueryBinaryLifting::criterion,
}
