use crate::error::{QuoteError, StateError};
use crate::math::price_math::{price_to_tick, tick_to_price};
use crate::math::tick_math::{align_range, full_range_ticks, get_sqrt_ratio_at_tick};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};

/// Which tokens a position in a given range is made of at the current
/// price.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RangeSide {
    /// Price at or below the lower bound: only token0 can be deposited.
    Token0Only,
    /// Price at or above the upper bound: only token1 can be deposited.
    Token1Only,
    /// Price strictly inside the range.
    #[default]
    Dual,
}

impl RangeSide {
    #[inline]
    pub fn accepts_token0(self) -> bool {
        !matches!(self, RangeSide::Token1Only)
    }

    #[inline]
    pub fn accepts_token1(self) -> bool {
        !matches!(self, RangeSide::Token0Only)
    }

    #[inline]
    pub fn is_dual(self) -> bool {
        matches!(self, RangeSide::Dual)
    }
}

/// Classifies a range against the current sqrt price. Bounds may be
/// passed in either order.
pub fn classify_range_side(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
) -> RangeSide {
    let lower = sqrt_ratio_a_x96.min(sqrt_ratio_b_x96);
    let upper = sqrt_ratio_a_x96.max(sqrt_ratio_b_x96);
    if sqrt_current_x96 <= lower {
        RangeSide::Token0Only
    } else if sqrt_current_x96 >= upper {
        RangeSide::Token1Only
    } else {
        RangeSide::Dual
    }
}

/// The current sqrt price together with a range's sorted sqrt bounds.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct SqrtPriceRange {
    pub current: U256,
    pub lower: U256,
    pub upper: U256,
}

impl SqrtPriceRange {
    pub fn new(current: U256, bound_a: U256, bound_b: U256) -> Self {
        Self {
            current,
            lower: bound_a.min(bound_b),
            upper: bound_a.max(bound_b),
        }
    }

    #[inline]
    pub fn side(&self) -> RangeSide {
        classify_range_side(self.current, self.lower, self.upper)
    }
}

/// A validated `(tick_lower, tick_upper)` pair on a pool's spacing grid.
///
/// Deserialization goes through [`PositionRange::new`], so a decoded range
/// is as valid as a constructed one.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawPositionRange")]
pub struct PositionRange {
    tick_lower: i32,
    tick_upper: i32,
    tick_spacing: i32,
}

#[derive(Deserialize)]
struct RawPositionRange {
    tick_lower: i32,
    tick_upper: i32,
    tick_spacing: i32,
}

impl TryFrom<RawPositionRange> for PositionRange {
    type Error = QuoteError;

    fn try_from(raw: RawPositionRange) -> Result<Self, Self::Error> {
        Self::new(raw.tick_lower, raw.tick_upper, raw.tick_spacing)
    }
}

impl PositionRange {
    /// Validates explicit ticks: both must be usable multiples of the
    /// spacing and `tick_lower < tick_upper`.
    pub fn new(tick_lower: i32, tick_upper: i32, tick_spacing: i32) -> Result<Self, QuoteError> {
        let (min, max) = full_range_ticks(tick_spacing)?;
        for tick in [tick_lower, tick_upper] {
            if tick % tick_spacing != 0 || tick < min || tick > max {
                return Err(QuoteError::TickOutOfRange {
                    tick,
                    spacing: tick_spacing,
                });
            }
        }
        if tick_lower >= tick_upper {
            return Err(QuoteError::RangeTooNarrow {
                lower: tick_lower,
                upper: tick_upper,
            });
        }
        Ok(Self {
            tick_lower,
            tick_upper,
            tick_spacing,
        })
    }

    /// Builds a range from two display prices: the lower price rounds
    /// down and the upper price rounds up onto the spacing grid.
    pub fn from_prices(
        price_a: f64,
        price_b: f64,
        decimals0: u8,
        decimals1: u8,
        tick_spacing: i32,
    ) -> Result<Self, QuoteError> {
        let tick_a =
            price_to_tick(price_a, decimals0, decimals1).ok_or(QuoteError::InvalidPrice(price_a))?;
        let tick_b =
            price_to_tick(price_b, decimals0, decimals1).ok_or(QuoteError::InvalidPrice(price_b))?;
        let (tick_lower, tick_upper) = align_range(tick_a, tick_b, tick_spacing)?;
        Ok(Self {
            tick_lower,
            tick_upper,
            tick_spacing,
        })
    }

    pub fn full_range(tick_spacing: i32) -> Result<Self, QuoteError> {
        let (tick_lower, tick_upper) = full_range_ticks(tick_spacing)?;
        Self::new(tick_lower, tick_upper, tick_spacing)
    }

    #[inline]
    pub fn tick_lower(&self) -> i32 {
        self.tick_lower
    }

    #[inline]
    pub fn tick_upper(&self) -> i32 {
        self.tick_upper
    }

    #[inline]
    pub fn tick_spacing(&self) -> i32 {
        self.tick_spacing
    }

    pub fn is_full_range(&self) -> bool {
        full_range_ticks(self.tick_spacing) == Ok((self.tick_lower, self.tick_upper))
    }

    /// `tick_lower <= tick < tick_upper`.
    pub fn is_in_range(&self, tick: i32) -> bool {
        self.tick_lower <= tick && tick < self.tick_upper
    }

    /// Exact sqrt prices of both bounds.
    pub fn sqrt_bounds(&self) -> Result<(U256, U256), StateError> {
        Ok((
            get_sqrt_ratio_at_tick(self.tick_lower)?,
            get_sqrt_ratio_at_tick(self.tick_upper)?,
        ))
    }

    pub fn sqrt_price_range(&self, sqrt_current_x96: U256) -> Result<SqrtPriceRange, StateError> {
        let (lower, upper) = self.sqrt_bounds()?;
        Ok(SqrtPriceRange {
            current: sqrt_current_x96,
            lower,
            upper,
        })
    }

    /// Display prices of both bounds.
    pub fn price_bounds(&self, decimals0: u8, decimals1: u8) -> Option<(f64, f64)> {
        Some((
            tick_to_price(Some(self.tick_lower), decimals0, decimals1)?,
            tick_to_price(Some(self.tick_upper), decimals0, decimals1)?,
        ))
    }

    /// Distance between the bound prices in display units.
    pub fn width_in_price(&self, decimals0: u8, decimals1: u8) -> Option<f64> {
        let (lower, upper) = self.price_bounds(decimals0, decimals1)?;
        Some(upper - lower)
    }
}
