use criterion::{criterion_group, criterion_main};

mod common;

criterion_group!(
    liquidity_benches,
    common::bench_liquidity_amounts,
    common::bench_quote,
);
criterion_main!(liquidity_benches);
