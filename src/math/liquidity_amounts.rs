use crate::Q96;
use crate::error::{Error, StateError};
use crate::math::math_helpers::{mul_div, mul_div_wide};
use alloy_primitives::U256;
use tracing::debug;

/// Raw token quantities in each token's base units.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct TokenAmounts {
    pub amount0: U256,
    pub amount1: U256,
}

#[inline(always)]
fn sort_bounds(sqrt_ratio_a_x96: U256, sqrt_ratio_b_x96: U256) -> (U256, U256) {
    if sqrt_ratio_a_x96 > sqrt_ratio_b_x96 {
        (sqrt_ratio_b_x96, sqrt_ratio_a_x96)
    } else {
        (sqrt_ratio_a_x96, sqrt_ratio_b_x96)
    }
}

fn check_prices(sqrt_current_x96: U256, lower: U256) -> Result<(), StateError> {
    // lower is the smaller bound, so this covers both bounds
    if sqrt_current_x96.is_zero() || lower.is_zero() {
        return Err(StateError::SqrtPriceIsZero);
    }
    Ok(())
}

/// Token amounts represented by `liquidity` in the range
/// `[sqrt_ratio_a_x96, sqrt_ratio_b_x96]` at the current sqrt price.
///
/// Bounds may be passed in either order. Each amount is computed with a
/// single floor division over the full‑width product: `mul_div_wide` for
/// the three-factor token0 side, `mul_div` for token1.
pub fn try_get_amounts_for_liquidity(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> Result<TokenAmounts, Error> {
    let (lower, upper) = sort_bounds(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    check_prices(sqrt_current_x96, lower)?;
    if liquidity.is_zero() {
        return Err(StateError::LiquidityIsZero.into());
    }

    let amounts = if sqrt_current_x96 <= lower {
        TokenAmounts {
            amount0: mul_div_wide(&[liquidity, upper - lower, Q96], &[upper, lower])?,
            amount1: U256::ZERO,
        }
    } else if sqrt_current_x96 >= upper {
        TokenAmounts {
            amount0: U256::ZERO,
            amount1: mul_div(liquidity, upper - lower, Q96)?,
        }
    } else {
        TokenAmounts {
            amount0: mul_div_wide(
                &[liquidity, upper - sqrt_current_x96, Q96],
                &[upper, sqrt_current_x96],
            )?,
            amount1: mul_div(liquidity, sqrt_current_x96 - lower, Q96)?,
        }
    };
    Ok(amounts)
}

/// Sentinel form of [`try_get_amounts_for_liquidity`]: `None` when any
/// input is zero or the amounts do not fit in 256 bits.
pub fn get_amounts_for_liquidity(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    liquidity: U256,
) -> Option<TokenAmounts> {
    try_get_amounts_for_liquidity(sqrt_current_x96, sqrt_ratio_a_x96, sqrt_ratio_b_x96, liquidity)
        .inspect_err(|err| debug!(%err, %liquidity, "no amounts for liquidity"))
        .ok()
}

/// Liquidity supplied by `amount0` of token0.
///
/// Token0 contributes nothing once the price is at or above the upper
/// bound, so that case is `Ok(0)` rather than an error.
pub fn try_get_liquidity_for_amount0(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> Result<U256, Error> {
    let (lower, upper) = sort_bounds(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    check_prices(sqrt_current_x96, lower)?;
    if amount0.is_zero() {
        return Err(StateError::AmountIsZero.into());
    }

    if sqrt_current_x96 >= upper {
        return Ok(U256::ZERO);
    }
    let start = sqrt_current_x96.max(lower);
    Ok(mul_div_wide(&[amount0, start, upper], &[upper - start, Q96])?)
}

/// Liquidity supplied by `amount1` of token1.
///
/// Token1 contributes nothing while the price is at or below the lower
/// bound, so that case is `Ok(0)` rather than an error.
pub fn try_get_liquidity_for_amount1(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> Result<U256, Error> {
    let (lower, upper) = sort_bounds(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    check_prices(sqrt_current_x96, lower)?;
    if amount1.is_zero() {
        return Err(StateError::AmountIsZero.into());
    }

    if sqrt_current_x96 <= lower {
        return Ok(U256::ZERO);
    }
    let end = sqrt_current_x96.min(upper);
    Ok(mul_div(amount1, Q96, end - lower)?)
}

/// Sentinel form of [`try_get_liquidity_for_amount0`], zero on any
/// degenerate input.
pub fn get_liquidity_for_amount0(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
) -> U256 {
    try_get_liquidity_for_amount0(sqrt_current_x96, sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount0)
        .inspect_err(|err| debug!(%err, %amount0, "no liquidity for amount0"))
        .unwrap_or_default()
}

/// Sentinel form of [`try_get_liquidity_for_amount1`], zero on any
/// degenerate input.
pub fn get_liquidity_for_amount1(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount1: U256,
) -> U256 {
    try_get_liquidity_for_amount1(sqrt_current_x96, sqrt_ratio_a_x96, sqrt_ratio_b_x96, amount1)
        .inspect_err(|err| debug!(%err, %amount1, "no liquidity for amount1"))
        .unwrap_or_default()
}

/// Largest liquidity that both `amount0` and `amount1` can fund, the
/// rule a position manager applies when minting with two desired
/// amounts. Out of range only the usable side counts.
pub fn get_liquidity_for_amounts(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    amount0: U256,
    amount1: U256,
) -> U256 {
    let (lower, upper) = sort_bounds(sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let liquidity0 = || get_liquidity_for_amount0(sqrt_current_x96, lower, upper, amount0);
    let liquidity1 = || get_liquidity_for_amount1(sqrt_current_x96, lower, upper, amount1);

    if sqrt_current_x96 <= lower {
        liquidity0()
    } else if sqrt_current_x96 >= upper {
        liquidity1()
    } else {
        liquidity0().min(liquidity1())
    }
}
