use crate::error::{Error, StateError};
use crate::math::liquidity_amounts::{get_liquidity_for_amounts, try_get_amounts_for_liquidity};
use crate::quote::range::PositionRange;
use crate::quote::slippage::apply_slippage;
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Arguments of a position manager `mint` / `increaseLiquidity` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct MintParams {
    pub tick_lower: i32,
    pub tick_upper: i32,
    pub amount0_desired: U256,
    pub amount1_desired: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
    /// Liquidity the desired amounts are expected to mint.
    pub liquidity: U256,
}

/// Arguments of a position manager `decreaseLiquidity` call.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct DecreaseParams {
    pub liquidity: U256,
    pub amount0_min: U256,
    pub amount1_min: U256,
}

/// Builds mint arguments for `range` at the current sqrt price.
///
/// Minimums are the desired amounts reduced by `slippage_bps`. Fails with
/// `StateError::LiquidityIsZero` when the desired amounts mint nothing,
/// e.g. only the disabled side of a single-sided range was funded.
pub fn build_mint_params(
    range: &PositionRange,
    sqrt_current_x96: U256,
    amount0_desired: U256,
    amount1_desired: U256,
    slippage_bps: u32,
) -> Result<MintParams, Error> {
    let (sqrt_lower, sqrt_upper) = range.sqrt_bounds()?;
    let liquidity = get_liquidity_for_amounts(
        sqrt_current_x96,
        sqrt_lower,
        sqrt_upper,
        amount0_desired,
        amount1_desired,
    );
    if liquidity.is_zero() {
        return Err(StateError::LiquidityIsZero.into());
    }

    let params = MintParams {
        tick_lower: range.tick_lower(),
        tick_upper: range.tick_upper(),
        amount0_desired,
        amount1_desired,
        amount0_min: apply_slippage(amount0_desired, slippage_bps),
        amount1_min: apply_slippage(amount1_desired, slippage_bps),
        liquidity,
    };
    debug!(
        tick_lower = params.tick_lower,
        tick_upper = params.tick_upper,
        %liquidity,
        slippage_bps,
        "built mint params"
    );
    Ok(params)
}

/// Builds arguments for removing `liquidity` from a position in `range`;
/// minimums are the amounts the liquidity is worth now, reduced by
/// `slippage_bps`.
pub fn build_decrease_params(
    range: &PositionRange,
    sqrt_current_x96: U256,
    liquidity: U256,
    slippage_bps: u32,
) -> Result<DecreaseParams, Error> {
    let (sqrt_lower, sqrt_upper) = range.sqrt_bounds()?;
    let amounts =
        try_get_amounts_for_liquidity(sqrt_current_x96, sqrt_lower, sqrt_upper, liquidity)?;
    Ok(DecreaseParams {
        liquidity,
        amount0_min: apply_slippage(amounts.amount0, slippage_bps),
        amount1_min: apply_slippage(amounts.amount1, slippage_bps),
    })
}
