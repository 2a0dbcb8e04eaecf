use criterion::{criterion_group, Criterion};
use orgtree::{NodeIndex, UnionFind};

use crate::helpers::*;

// -----------------------------------------------------------------------------
// Benchmark functions
// -----------------------------------------------------------------------------

struct UnionChain {
    size: usize,
}
impl SizedBenchmark for UnionChain {
    fn name() -> &'static str {
        "union_find_chain"
    }

    fn sizes() -> &'static [usize] {
        &[1_000, 10_000, 100_000]
    }

    fn setup(size: usize) -> Self {
        Self { size }
    }

    fn run(&self) -> impl Sized {
        let mut sets = UnionFind::with_capacity(self.size);
        for i in 0..self.size {
            sets.make_set(NodeIndex::new(i));
        }
        for i in 1..self.size {
            sets.union(NodeIndex::new(i - 1), NodeIndex::new(i));
        }
        sets.find(NodeIndex::new(0))
    }
}

// -----------------------------------------------------------------------------
// Criterion definitions
// -----------------------------------------------------------------------------

criterion_group! {
    name = criterion_group;
    config = Criterion::default();
    targets =
        UnionChain::criterion,
}
