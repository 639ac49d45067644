#![allow(dead_code)]

use clmm_liquidity_math::{
    U256,
    math::{liquidity_amounts, math_helpers, price_math, tick_math},
    quote::{self, DepositSide},
};
use criterion::Criterion;
use std::hint::black_box;

const TICKS: [i32; 6] = [-887220, -200000, -600, 0, 600, 200000];

fn sqrt_at(tick: i32) -> U256 {
    tick_math::get_sqrt_ratio_at_tick(tick).unwrap()
}

pub fn bench_tick_math(c: &mut Criterion) {
    c.bench_function("get_sqrt_ratio_at_tick", |b| {
        b.iter(|| {
            for tick in TICKS {
                black_box(tick_math::get_sqrt_ratio_at_tick(black_box(tick)).unwrap());
            }
        })
    });
    c.bench_function("align_range", |b| {
        b.iter(|| black_box(tick_math::align_range(black_box(-605.3), black_box(605.3), 60)))
    });
}

pub fn bench_price_math(c: &mut Criterion) {
    c.bench_function("tick_to_sqrt_price_x96", |b| {
        b.iter(|| {
            for tick in TICKS {
                black_box(price_math::tick_to_sqrt_price_x96(black_box(tick)));
            }
        })
    });
    let scaled = price_math::parse_scaled_price("1850.25").unwrap();
    c.bench_function("encode_price_sqrt_from_price", |b| {
        b.iter(|| black_box(price_math::encode_price_sqrt_from_price(black_box(scaled), 18, 6)))
    });
}

pub fn bench_math_helpers(c: &mut Criterion) {
    let value = U256::MAX >> 3;
    c.bench_function("isqrt", |b| b.iter(|| black_box(math_helpers::isqrt(black_box(value)))));
    c.bench_function("mul_div_wide", |b| {
        b.iter(|| {
            black_box(math_helpers::mul_div_wide(
                &[black_box(value >> 100), sqrt_at(600), sqrt_at(0)],
                &[sqrt_at(-600), sqrt_at(200)],
            ))
        })
    });
}

pub fn bench_liquidity_amounts(c: &mut Criterion) {
    let (current, lower, upper) = (sqrt_at(0), sqrt_at(-600), sqrt_at(600));
    let amount = U256::from(10u128.pow(18));

    c.bench_function("get_liquidity_for_amount0", |b| {
        b.iter(|| {
            black_box(liquidity_amounts::get_liquidity_for_amount0(
                current,
                lower,
                upper,
                black_box(amount),
            ))
        })
    });
    let liquidity = liquidity_amounts::get_liquidity_for_amount0(current, lower, upper, amount);
    c.bench_function("get_amounts_for_liquidity", |b| {
        b.iter(|| {
            black_box(liquidity_amounts::get_amounts_for_liquidity(
                current,
                lower,
                upper,
                black_box(liquidity),
            ))
        })
    });
}

pub fn bench_quote(c: &mut Criterion) {
    let (current, lower, upper) = (sqrt_at(0), sqrt_at(-600), sqrt_at(600));
    let amount = U256::from(10u128.pow(18));
    c.bench_function("quote_paired_amount", |b| {
        b.iter(|| {
            black_box(quote::quote_paired_amount(
                current,
                lower,
                upper,
                DepositSide::Token0,
                black_box(amount),
            ))
        })
    });
    c.bench_function("apply_slippage", |b| {
        b.iter(|| black_box(quote::apply_slippage(black_box(amount), black_box(50))))
    });
}
