use crate::QuoteConfig;
use crate::error::{Error, QuoteError, StateError};
use crate::math::price_math::{sqrt_price_x96_to_price, tick_to_price};
use crate::math::tick_math::{check_tick_spacing, get_sqrt_ratio_at_tick};
use crate::quote::apr::estimate_range_apr_with;
use crate::quote::deposit::{DepositQuote, DepositSide, quote_paired_amount};
use crate::quote::params::{DecreaseParams, MintParams, build_decrease_params, build_mint_params};
use crate::quote::range::{PositionRange, RangeSide};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// The slice of on-chain pool state the quote layer works from.
///
/// It is a plain value: fetch it however the caller likes and build a
/// new one whenever the pool moves. Decoding runs the same checks as
/// [`PoolSnapshot::new`].
#[derive(Copy, Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "RawPoolSnapshot")]
pub struct PoolSnapshot {
    pub sqrt_price_x96: U256,
    pub tick: i32,
    pub tick_spacing: i32,
    pub decimals0: u8,
    pub decimals1: u8,
}

#[derive(Deserialize)]
struct RawPoolSnapshot {
    sqrt_price_x96: U256,
    tick: i32,
    tick_spacing: i32,
    decimals0: u8,
    decimals1: u8,
}

impl TryFrom<RawPoolSnapshot> for PoolSnapshot {
    type Error = Error;

    fn try_from(raw: RawPoolSnapshot) -> Result<Self, Self::Error> {
        Self::new(
            raw.sqrt_price_x96,
            raw.tick,
            raw.tick_spacing,
            raw.decimals0,
            raw.decimals1,
        )
    }
}

impl PoolSnapshot {
    pub fn new(
        sqrt_price_x96: U256,
        tick: i32,
        tick_spacing: i32,
        decimals0: u8,
        decimals1: u8,
    ) -> Result<Self, Error> {
        if sqrt_price_x96.is_zero() {
            return Err(StateError::SqrtPriceIsZero.into());
        }
        check_tick_spacing(tick_spacing)?;
        Ok(Self {
            sqrt_price_x96,
            tick,
            tick_spacing,
            decimals0,
            decimals1,
        })
    }

    /// Snapshot of a pool sitting exactly at `tick`.
    pub fn from_tick(
        tick: i32,
        tick_spacing: i32,
        decimals0: u8,
        decimals1: u8,
    ) -> Result<Self, Error> {
        Self::new(
            get_sqrt_ratio_at_tick(tick)?,
            tick,
            tick_spacing,
            decimals0,
            decimals1,
        )
    }

    /// Current display price from the sqrt price.
    pub fn display_price(&self) -> Option<f64> {
        sqrt_price_x96_to_price(self.sqrt_price_x96, self.decimals0, self.decimals1)
    }

    /// Display price at the current tick, the coarser value most pool
    /// listings show.
    pub fn tick_price(&self) -> Option<f64> {
        tick_to_price(Some(self.tick), self.decimals0, self.decimals1)
    }

    pub fn full_range(&self) -> Result<PositionRange, QuoteError> {
        PositionRange::full_range(self.tick_spacing)
    }

    pub fn range_from_prices(
        &self,
        price_a: f64,
        price_b: f64,
    ) -> Result<PositionRange, QuoteError> {
        PositionRange::from_prices(
            price_a,
            price_b,
            self.decimals0,
            self.decimals1,
            self.tick_spacing,
        )
    }

    fn check_spacing(&self, range: &PositionRange) -> Result<(), QuoteError> {
        if range.tick_spacing() != self.tick_spacing {
            return Err(QuoteError::InvalidTickSpacing(range.tick_spacing()));
        }
        Ok(())
    }

    /// Whether the pool's current tick lies in `[tick_lower, tick_upper)`.
    pub fn is_in_range(&self, range: &PositionRange) -> bool {
        range.is_in_range(self.tick)
    }

    pub fn range_side(&self, range: &PositionRange) -> Result<RangeSide, Error> {
        self.check_spacing(range)?;
        Ok(range.sqrt_price_range(self.sqrt_price_x96)?.side())
    }

    pub fn quote_deposit(
        &self,
        range: &PositionRange,
        input: DepositSide,
        amount: U256,
    ) -> Result<DepositQuote, Error> {
        self.check_spacing(range)?;
        let (sqrt_lower, sqrt_upper) = range.sqrt_bounds()?;
        Ok(quote_paired_amount(
            self.sqrt_price_x96,
            sqrt_lower,
            sqrt_upper,
            input,
            amount,
        ))
    }

    /// Mint arguments with slippage resolved through `config`; a missing
    /// or invalid `slippage_bps` uses the configured default.
    pub fn mint_params(
        &self,
        range: &PositionRange,
        amount0_desired: U256,
        amount1_desired: U256,
        config: &QuoteConfig,
        slippage_bps: Option<f64>,
    ) -> Result<MintParams, Error> {
        self.check_spacing(range)?;
        build_mint_params(
            range,
            self.sqrt_price_x96,
            amount0_desired,
            amount1_desired,
            config.slippage_bps(slippage_bps),
        )
    }

    pub fn decrease_params(
        &self,
        range: &PositionRange,
        liquidity: U256,
        config: &QuoteConfig,
        slippage_bps: Option<f64>,
    ) -> Result<DecreaseParams, Error> {
        self.check_spacing(range)?;
        build_decrease_params(
            range,
            self.sqrt_price_x96,
            liquidity,
            config.slippage_bps(slippage_bps),
        )
    }

    /// Approximate APR for `range`, zero when it is out of range or the
    /// price cannot be displayed.
    pub fn estimate_apr(
        &self,
        range: &PositionRange,
        daily_fees_usd: f64,
        tvl_usd: f64,
        config: &QuoteConfig,
    ) -> f64 {
        let (Ok(side), Some(price), Some(width)) = (
            self.range_side(range),
            self.display_price(),
            range.width_in_price(self.decimals0, self.decimals1),
        ) else {
            return 0.0;
        };
        estimate_range_apr_with(config, daily_fees_usd, tvl_usd, width, price, side)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::Q96;

    fn pool() -> PoolSnapshot {
        PoolSnapshot::from_tick(0, 60, 18, 6).unwrap()
    }

    #[test]
    fn new_rejects_degenerate_state() {
        assert!(matches!(
            PoolSnapshot::new(U256::ZERO, 0, 60, 18, 6),
            Err(Error::StateError(StateError::SqrtPriceIsZero))
        ));
        assert!(matches!(
            PoolSnapshot::new(Q96, 0, 0, 18, 6),
            Err(Error::QuoteError(QuoteError::InvalidTickSpacing(0)))
        ));
        assert!(matches!(
            PoolSnapshot::from_tick(900_000, 60, 18, 6),
            Err(Error::StateError(StateError::TickOutOfBounds))
        ));
    }

    #[test]
    fn deserialize_runs_validation() {
        let pool = pool();
        let decoded: PoolSnapshot =
            serde_json::from_str(&serde_json::to_string(&pool).unwrap()).unwrap();
        assert_eq!(decoded, pool);

        // struct literals bypass `new`; their encodings must not decode
        let invalid = [
            PoolSnapshot {
                sqrt_price_x96: U256::ZERO,
                ..pool
            },
            PoolSnapshot {
                tick_spacing: 0,
                ..pool
            },
        ];
        for snapshot in invalid {
            let json = serde_json::to_string(&snapshot).unwrap();
            assert!(serde_json::from_str::<PoolSnapshot>(&json).is_err(), "{json}");
        }
    }

    #[test]
    fn prices_agree_at_exact_tick() {
        let pool = pool();
        let from_sqrt = pool.display_price().unwrap();
        let from_tick = pool.tick_price().unwrap();
        assert!((from_sqrt - from_tick).abs() / from_tick < 1e-12);
        assert!((from_sqrt - 1e12).abs() / 1e12 < 1e-12);
    }

    #[test]
    fn range_side_and_in_range() {
        let pool = pool();
        let inside = PositionRange::new(-600, 600, 60).unwrap();
        let above_price = PositionRange::new(60, 600, 60).unwrap();
        let starts_at_price = PositionRange::new(0, 600, 60).unwrap();

        assert_eq!(pool.range_side(&inside).unwrap(), RangeSide::Dual);
        assert_eq!(pool.range_side(&above_price).unwrap(), RangeSide::Token0Only);
        // the sqrt price sits exactly on the lower bound: single sided even
        // though the tick counts as in range
        assert_eq!(pool.range_side(&starts_at_price).unwrap(), RangeSide::Token0Only);
        assert!(pool.is_in_range(&starts_at_price));
        assert!(!pool.is_in_range(&above_price));
    }

    #[test]
    fn spacing_mismatch_is_rejected() {
        let range = PositionRange::new(-600, 600, 10).unwrap();
        assert!(matches!(
            pool().quote_deposit(&range, DepositSide::Token0, U256::ONE),
            Err(Error::QuoteError(QuoteError::InvalidTickSpacing(10)))
        ));
    }

    #[test]
    fn deposit_to_mint_params() {
        let pool = pool();
        let range = PositionRange::new(-600, 600, 60).unwrap();
        let quote = pool
            .quote_deposit(&range, DepositSide::Token0, U256::from(10u128.pow(18)))
            .unwrap();
        let params = pool
            .mint_params(&range, quote.amount0, quote.amount1, &QuoteConfig::default(), None)
            .unwrap();
        assert_eq!(params.amount0_desired, quote.amount0);
        assert_eq!(params.amount1_desired, quote.amount1);
        assert!(params.amount0_min < params.amount0_desired);
        // liquidity from both sides is bound by the side it was derived from
        assert!(params.liquidity <= quote.liquidity);
        assert!(quote.liquidity - params.liquidity <= U256::from(1_000u32));
    }

    #[test]
    fn decrease_params_use_configured_default() {
        let pool = pool();
        let range = PositionRange::new(-600, 600, 60).unwrap();
        let config = QuoteConfig {
            default_slippage_bps: 100,
            ..QuoteConfig::default()
        };
        let liquidity = U256::from(10u128.pow(20));
        let with_default = pool.decrease_params(&range, liquidity, &config, None).unwrap();
        let explicit = pool.decrease_params(&range, liquidity, &config, Some(100.0)).unwrap();
        assert_eq!(with_default, explicit);
    }

    #[test]
    fn apr_for_in_and_out_of_range() {
        let pool = pool();
        let config = QuoteConfig::default();
        let inside = PositionRange::new(-600, 600, 60).unwrap();
        let outside = PositionRange::new(600, 1200, 60).unwrap();

        // width is ~12% of the price: boost ~8.3 on a 100% base
        let apr = pool.estimate_apr(&inside, 100.0, 36_500.0, &config);
        assert!(apr > 800.0 && apr < 860.0, "{apr}");
        assert_eq!(pool.estimate_apr(&outside, 100.0, 36_500.0, &config), 0.0);
    }
}
