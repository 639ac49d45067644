//! Conversions between ticks, human readable prices and Q64.96 sqrt
//! prices.
//!
//! Two paths live here on purpose:
//! - Floating point helpers (`tick_to_price`, `price_to_tick`,
//!   `tick_to_sqrt_price_x96`, `sqrt_price_x96_to_price`) for display and
//!   estimation. They lose precision at extreme ticks.
//! - [`encode_price_sqrt_from_price`], an exact integer path for setting
//!   a starting price on-chain (pool initialization), fed by
//!   [`parse_scaled_price`].
//!
//! Prices are always token1 per one token0, adjusted for decimals.

use crate::error::MathError;
use crate::math::math_helpers::{
    f64_to_u256_floor, isqrt_512, narrow, pow10, u256_to_f64, widen,
};
use crate::{PRICE_SCALE_DECIMALS, Q192};
use alloy_primitives::U256;
use std::str::FromStr;
use tracing::debug;

/// `ln(1.0001)`, the log-space width of one tick.
pub const LN_TICK_BASE: f64 = 0.000_099_995_000_333_297_32;
const TICK_BASE: f64 = 1.0001;
const TWO_POW_96: f64 = 79_228_162_514_264_337_593_543_950_336.0;

#[inline]
fn decimal_shift(decimals0: u8, decimals1: u8) -> f64 {
    10f64.powi(decimals0 as i32 - decimals1 as i32)
}

/// Floating point `floor(sqrt(1.0001^tick) * 2^96)`.
///
/// The tick is not range checked; `None` is returned when the ratio is
/// not a positive finite number. Use
/// [`get_sqrt_ratio_at_tick`](crate::math::tick_math::get_sqrt_ratio_at_tick)
/// when the value has to match the contract bit for bit.
pub fn tick_to_sqrt_price_x96(tick: i32) -> Option<U256> {
    let ratio = TICK_BASE.powf(tick as f64);
    if !ratio.is_finite() || ratio <= 0.0 {
        debug!(tick, ratio, "tick ratio is not a positive finite number");
        return None;
    }
    f64_to_u256_floor(ratio.sqrt() * TWO_POW_96).filter(|sqrt| !sqrt.is_zero())
}

/// Display price (token1 per token0) at `tick`.
pub fn tick_to_price(tick: Option<i32>, decimals0: u8, decimals1: u8) -> Option<f64> {
    let tick = tick?;
    let price = (tick as f64 * LN_TICK_BASE).exp() * decimal_shift(decimals0, decimals1);
    price.is_finite().then_some(price)
}

/// Continuous tick for a display price.
///
/// The result is not a usable tick yet; round it with
/// [`align_range`](crate::math::tick_math::align_range) or the
/// `*_to_spacing` helpers first.
pub fn price_to_tick(price: f64, decimals0: u8, decimals1: u8) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    let raw = price / decimal_shift(decimals0, decimals1);
    let tick = raw.ln() / LN_TICK_BASE;
    tick.is_finite().then_some(tick)
}

/// Display price implied by a pool's `sqrtPriceX96`.
pub fn sqrt_price_x96_to_price(sqrt_price_x96: U256, decimals0: u8, decimals1: u8) -> Option<f64> {
    if sqrt_price_x96.is_zero() {
        return None;
    }
    let sqrt = u256_to_f64(sqrt_price_x96) / TWO_POW_96;
    let price = sqrt * sqrt * decimal_shift(decimals0, decimals1);
    (price.is_finite() && price > 0.0).then_some(price)
}

/// Flips a price between token1/token0 and token0/token1 quoting.
pub fn invert_price(price: f64) -> Option<f64> {
    if !price.is_finite() || price <= 0.0 {
        return None;
    }
    let inverted = 1.0 / price;
    inverted.is_finite().then_some(inverted)
}

fn try_encode_price_sqrt(
    scaled_price: U256,
    decimals0: u8,
    decimals1: u8,
) -> Result<U256, MathError> {
    let numerator = widen(scaled_price)
        .checked_mul(widen(pow10(decimals1)?))
        .and_then(|scaled| scaled.checked_mul(widen(Q192)))
        .ok_or(MathError::Overflow)?;
    let denominator = widen(pow10(decimals0)?) * widen(pow10(PRICE_SCALE_DECIMALS)?);
    narrow(isqrt_512(numerator / denominator))
}

/// Exact Q64.96 sqrt price for a display price given as a fixed point
/// integer scaled by `10^18`:
///
/// `sqrt(scaled_price * 10^decimals1 * 2^192 / (10^decimals0 * 10^18))`
///
/// No floating point is involved. Returns `None` when the price rounds
/// to a zero sqrt price or the intermediate overflows.
pub fn encode_price_sqrt_from_price(
    scaled_price: U256,
    decimals0: u8,
    decimals1: u8,
) -> Option<U256> {
    match try_encode_price_sqrt(scaled_price, decimals0, decimals1) {
        Ok(sqrt) if !sqrt.is_zero() => Some(sqrt),
        Ok(_) => None,
        Err(err) => {
            debug!(%scaled_price, decimals0, decimals1, %err, "failed to encode sqrt price");
            None
        }
    }
}

/// Parses a plain decimal string (`"1850.25"`) into a price scaled by
/// `10^18`. Digits past the 18th decimal place are truncated.
///
/// Signs, exponents and separators are rejected.
pub fn parse_scaled_price(input: &str) -> Option<U256> {
    let input = input.trim();
    let (integer, fraction) = match input.split_once('.') {
        Some((integer, fraction)) => (integer, fraction),
        None => (input, ""),
    };
    if integer.is_empty() && fraction.is_empty() {
        return None;
    }
    if !integer
        .bytes()
        .chain(fraction.bytes())
        .all(|b| b.is_ascii_digit())
    {
        return None;
    }

    let scale = PRICE_SCALE_DECIMALS as usize;
    let fraction = &fraction[..fraction.len().min(scale)];
    let digits = format!("{integer}{fraction:0<scale$}");
    U256::from_str(&digits).ok()
}
