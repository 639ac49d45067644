//! Range APR estimate for display.
//!
//! This is a heuristic. It scales the pool-wide fee APR by how
//! concentrated the chosen range is relative to the current price. It
//! ignores the share of in-range liquidity, fee tier and price movement,
//! so it is not a yield guarantee.

use crate::QuoteConfig;
use crate::quote::range::RangeSide;
use tracing::trace;

/// `daily_fees_usd * days_per_year * 100 / tvl_usd`, or zero when TVL is
/// not a positive finite number.
pub fn base_apr(daily_fees_usd: f64, tvl_usd: f64, days_per_year: f64) -> f64 {
    let tvl_ok = tvl_usd.is_finite() && tvl_usd > 0.0;
    if !tvl_ok || !daily_fees_usd.is_finite() || daily_fees_usd < 0.0 {
        return 0.0;
    }
    let apr = daily_fees_usd * days_per_year * 100.0 / tvl_usd;
    if apr.is_finite() { apr } else { 0.0 }
}

/// Concentration multiplier `current_price / range_width`, clamped to
/// the configured bounds.
///
/// A zero width divides to infinity and lands on the upper clamp; a
/// negative width lands on the lower one. `None` when the current price
/// is not positive and finite or the width is NaN.
pub fn range_boost(range_width: f64, current_price: f64, config: &QuoteConfig) -> Option<f64> {
    if !current_price.is_finite() || current_price <= 0.0 || range_width.is_nan() {
        return None;
    }
    // 1 / (width / price)
    let boost = current_price / range_width;
    Some(boost.max(config.min_range_boost).min(config.max_range_boost))
}

/// Estimated APR (percent) for a position with the given range width,
/// using the configured clamps. Out-of-range positions earn nothing.
pub fn estimate_range_apr_with(
    config: &QuoteConfig,
    daily_fees_usd: f64,
    tvl_usd: f64,
    range_width: f64,
    current_price: f64,
    side: RangeSide,
) -> f64 {
    if !side.is_dual() {
        return 0.0;
    }
    let base = base_apr(daily_fees_usd, tvl_usd, config.days_per_year);
    let Some(boost) = range_boost(range_width, current_price, config) else {
        return 0.0;
    };
    trace!(base, boost, "range apr estimate");
    base * boost
}

/// [`estimate_range_apr_with`] using the default clamps `[0.2, 25]`.
pub fn estimate_range_apr(
    daily_fees_usd: f64,
    tvl_usd: f64,
    range_width: f64,
    current_price: f64,
    side: RangeSide,
) -> f64 {
    estimate_range_apr_with(
        &QuoteConfig::DEFAULT,
        daily_fees_usd,
        tvl_usd,
        range_width,
        current_price,
        side,
    )
}
