//! Uniswap V3–style concentrated liquidity math for liquidity
//! management front ends, in pure Rust.
//!
//! This crate exposes:
//! - Low‑level primitives (`math::*`) converting between ticks, display
//!   prices, Q64.96 sqrt prices, liquidity and token amounts.
//! - A quote layer (`quote::*`) deriving paired deposit amounts, range
//!   side classification, slippage minimums and range APR estimates.
//!
//! Everything is synchronous and free of shared state; callers supply a
//! snapshot of pool state and get plain numbers back.
//!
//! # Examples
//!
//! ## Pure math
//! ```no_run
//! use clmm_liquidity_math::{math::tick_math, Q96};
//!
//! let sqrt_price = tick_math::get_sqrt_ratio_at_tick(0).unwrap();
//! assert_eq!(sqrt_price, Q96);
//! ```
//!
//! ## Quoting a deposit
//! ```no_run
//! use clmm_liquidity_math::{
//!     quote::{DepositSide, PoolSnapshot, PositionRange},
//!     QuoteConfig, U256,
//! };
//!
//! let pool = PoolSnapshot::from_tick(0, 60, 18, 6).unwrap();
//! let range = PositionRange::new(-600, 600, 60).unwrap();
//! let quote = pool
//!     .quote_deposit(&range, DepositSide::Token0, U256::from(10u128.pow(18)))
//!     .unwrap();
//! let params = pool
//!     .mint_params(&range, quote.amount0, quote.amount1, &QuoteConfig::default(), Some(50.0))
//!     .unwrap();
//! println!("amount1: {}, amount1Min: {}", quote.amount1, params.amount1_min);
//! ```

pub use alloy_primitives::aliases::I512;
pub use alloy_primitives::{Address, U256};

pub mod config;
pub mod error;
mod hash;
pub mod math;
pub mod quote;

pub use config::QuoteConfig;
pub use hash::FastMap;

pub const RESOLUTION: u8 = 96;
pub const Q96: U256 = U256::from_limbs([0, 4294967296, 0, 0]);
pub const Q192: U256 = U256::from_limbs([0, 0, 0, 1]);

/// Human prices handed to the exact encoder are fixed point with this
/// many decimals.
pub const PRICE_SCALE_DECIMALS: u8 = 18;

pub const BPS_DENOMINATOR: u32 = 10_000;
pub const DEFAULT_SLIPPAGE_BPS: u32 = 50;
pub const MAX_SLIPPAGE_BPS: u32 = 5_000;
