use crate::{BPS_DENOMINATOR, MAX_SLIPPAGE_BPS, QuoteConfig};
use alloy_primitives::U256;

const U256_BPS: U256 = U256::from_limbs([BPS_DENOMINATOR as u64, 0, 0, 0]);

/// `floor(amount * (10000 - bps) / 10000)` with `bps` clamped to
/// `[0, 5000]`.
///
/// Integer exact for the whole `U256` range: the amount is split into
/// whole multiples of 10000 and a remainder so the product never
/// overflows.
pub fn apply_slippage(amount: U256, bps: u32) -> U256 {
    let keep = U256::from(BPS_DENOMINATOR - bps.min(MAX_SLIPPAGE_BPS));
    let (quotient, remainder) = amount.div_rem(U256_BPS);
    quotient * keep + remainder * keep / U256_BPS
}

/// Turns a raw numeric slippage (bps) into a usable value: negative or
/// non-finite input falls back to 50 bps, and the result is clamped to
/// 5000 bps.
pub fn normalize_slippage_bps(requested: f64) -> u32 {
    QuoteConfig::DEFAULT.slippage_bps(Some(requested))
}

/// Same as [`normalize_slippage_bps`] for text input; anything that
/// does not parse as a number gets the default.
pub fn parse_slippage_bps(input: &str) -> u32 {
    QuoteConfig::DEFAULT.slippage_bps(input.trim().parse::<f64>().ok())
}
