//! Wall-time benchmarks using criterion.

#[allow(dead_code)]
mod benchmarks;
#[allow(dead_code)]
mod helpers;

use criterion::criterion_main;

criterion_main! {
    benchmarks::lca::criterion_group,
    benchmarks::union_find::criterion_group,
}
