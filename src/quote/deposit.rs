use crate::math::liquidity_amounts::{
    get_amounts_for_liquidity, get_liquidity_for_amount0, get_liquidity_for_amount1,
};
use crate::quote::range::{RangeSide, SqrtPriceRange};
use alloy_primitives::U256;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// The deposit input a user just edited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DepositSide {
    Token0,
    Token1,
}

impl DepositSide {
    #[inline]
    pub fn other(self) -> Self {
        match self {
            DepositSide::Token0 => DepositSide::Token1,
            DepositSide::Token1 => DepositSide::Token0,
        }
    }

    #[inline]
    pub fn is_enabled(self, side: RangeSide) -> bool {
        match self {
            DepositSide::Token0 => side.accepts_token0(),
            DepositSide::Token1 => side.accepts_token1(),
        }
    }
}

/// A deposit where one side was entered and the other derived from it.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct DepositQuote {
    pub side: RangeSide,
    pub liquidity: U256,
    pub amount0: U256,
    pub amount1: U256,
}

/// Completes a deposit from the amount entered on one side.
///
/// The entered amount is converted to liquidity, and the other side is
/// read back from that liquidity. Whenever no liquidity results (the
/// entered side is disabled for this range, or the input is degenerate)
/// the derived side is zero, never left at a stale value. The same holds
/// when the derived amount does not fit in 256 bits, and the reported
/// liquidity is zeroed with it. An entered amount on a disabled side is
/// zeroed as well.
pub fn quote_paired_amount(
    sqrt_current_x96: U256,
    sqrt_ratio_a_x96: U256,
    sqrt_ratio_b_x96: U256,
    input: DepositSide,
    amount: U256,
) -> DepositQuote {
    let prices = SqrtPriceRange::new(sqrt_current_x96, sqrt_ratio_a_x96, sqrt_ratio_b_x96);
    let side = prices.side();

    let liquidity = match input {
        DepositSide::Token0 => {
            get_liquidity_for_amount0(prices.current, prices.lower, prices.upper, amount)
        }
        DepositSide::Token1 => {
            get_liquidity_for_amount1(prices.current, prices.lower, prices.upper, amount)
        }
    };

    let entered = if input.is_enabled(side) {
        amount
    } else {
        U256::ZERO
    };
    let amounts = if liquidity.is_zero() {
        None
    } else {
        get_amounts_for_liquidity(prices.current, prices.lower, prices.upper, liquidity)
    };
    // without amounts the liquidity cannot be minted either
    let (liquidity, derived) = match amounts {
        Some(amounts) => {
            let derived = match input {
                DepositSide::Token0 => amounts.amount1,
                DepositSide::Token1 => amounts.amount0,
            };
            (liquidity, derived)
        }
        None => {
            debug!(?input, ?side, %amount, "no liquidity from input, zeroing paired amount");
            (U256::ZERO, U256::ZERO)
        }
    };

    let (amount0, amount1) = match input {
        DepositSide::Token0 => (entered, derived),
        DepositSide::Token1 => (derived, entered),
    };
    DepositQuote {
        side,
        liquidity,
        amount0,
        amount1,
    }
}

/// Caller-owned state of a two-input deposit form.
///
/// Nothing here observes pool state; the caller invokes [`reprice`]
/// whenever the price or the range bounds change and [`set_amount`]
/// whenever the user edits an input.
///
/// [`reprice`]: DepositForm::reprice
/// [`set_amount`]: DepositForm::set_amount
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DepositForm {
    prices: SqrtPriceRange,
    side: RangeSide,
    amount0: U256,
    amount1: U256,
    liquidity: U256,
    last_edited: Option<DepositSide>,
}

impl DepositForm {
    pub fn new(prices: SqrtPriceRange) -> Self {
        Self {
            side: prices.side(),
            prices,
            amount0: U256::ZERO,
            amount1: U256::ZERO,
            liquidity: U256::ZERO,
            last_edited: None,
        }
    }

    #[inline]
    pub fn side(&self) -> RangeSide {
        self.side
    }

    #[inline]
    pub fn amount0(&self) -> U256 {
        self.amount0
    }

    #[inline]
    pub fn amount1(&self) -> U256 {
        self.amount1
    }

    #[inline]
    pub fn liquidity(&self) -> U256 {
        self.liquidity
    }

    #[inline]
    pub fn is_enabled(&self, input: DepositSide) -> bool {
        input.is_enabled(self.side)
    }

    fn amount(&self, input: DepositSide) -> U256 {
        match input {
            DepositSide::Token0 => self.amount0,
            DepositSide::Token1 => self.amount1,
        }
    }

    fn apply(&mut self, quote: DepositQuote) {
        self.side = quote.side;
        self.amount0 = quote.amount0;
        self.amount1 = quote.amount1;
        self.liquidity = quote.liquidity;
    }

    /// Records an edit of one input and re-derives the other.
    pub fn set_amount(&mut self, input: DepositSide, amount: U256) {
        self.last_edited = Some(input);
        let quote = quote_paired_amount(
            self.prices.current,
            self.prices.lower,
            self.prices.upper,
            input,
            amount,
        );
        self.apply(quote);
    }

    /// Re-evaluates the form against a new price or range.
    ///
    /// The side that just became disabled is zeroed. The amounts are then
    /// re-derived from the most recently edited input that is still
    /// enabled, so the pair never goes stale.
    pub fn reprice(&mut self, prices: SqrtPriceRange) {
        self.prices = prices;
        let side = prices.side();
        if side != self.side {
            debug!(from = ?self.side, to = ?side, "deposit range side changed");
        }
        self.side = side;
        if !side.accepts_token0() {
            self.amount0 = U256::ZERO;
        }
        if !side.accepts_token1() {
            self.amount1 = U256::ZERO;
        }

        let preferred = self.last_edited.unwrap_or(DepositSide::Token0);
        let source = [preferred, preferred.other()]
            .into_iter()
            .find(|&input| self.is_enabled(input) && !self.amount(input).is_zero());

        match source {
            Some(input) => self.set_amount(input, self.amount(input)),
            None => self.liquidity = U256::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::math::math_helpers::pow10;
    use crate::math::price_math::tick_to_price;
    use crate::math::tick_math::get_sqrt_ratio_at_tick;

    fn sqrt_at(tick: i32) -> U256 {
        get_sqrt_ratio_at_tick(tick).unwrap()
    }

    fn band() -> SqrtPriceRange {
        SqrtPriceRange::new(sqrt_at(0), sqrt_at(-600), sqrt_at(600))
    }

    fn quote(prices: SqrtPriceRange, input: DepositSide, amount: U256) -> DepositQuote {
        quote_paired_amount(prices.current, prices.lower, prices.upper, input, amount)
    }

    #[test]
    fn eighteen_six_decimals_scenario() {
        // tick 0 with 18/6 decimals displays as 1e12 token1 per token0
        let display = tick_to_price(Some(0), 18, 6).unwrap();
        assert!((display - 1e12).abs() / 1e12 < 1e-12);

        let one_token0 = pow10(18).unwrap();
        let prices = band();
        let quote = quote_paired_amount(
            prices.current,
            prices.lower,
            prices.upper,
            DepositSide::Token0,
            one_token0,
        );
        assert_eq!(quote.side, RangeSide::Dual);
        assert_eq!(quote.amount0, one_token0);
        assert!(quote.amount1 > U256::ZERO);
        // symmetric band around parity: roughly one token1 base unit per token0 unit
        assert!(quote.amount1 > pow10(17).unwrap() * U256::from(9u8));
        assert!(quote.amount1 < pow10(17).unwrap() * U256::from(11u8));

        let back =
            get_amounts_for_liquidity(prices.current, prices.lower, prices.upper, quote.liquidity)
                .unwrap();
        assert!(one_token0 - back.amount0 <= U256::from(2u8));
        assert_eq!(back.amount1, quote.amount1);
    }

    #[test]
    fn paired_amount_from_token1() {
        let prices = band();
        let amount = U256::from(5_000_000u64);
        let quote = quote(prices, DepositSide::Token1, amount);
        assert_eq!(quote.amount1, amount);
        assert!(quote.amount0 > U256::ZERO);
        assert!(!quote.liquidity.is_zero());
    }

    #[test]
    fn paired_amount_zeroed_when_side_disabled() {
        // price above the range: token0 cannot be deposited
        let prices = SqrtPriceRange::new(sqrt_at(1200), sqrt_at(-600), sqrt_at(600));
        let quote = quote_paired_amount(
            prices.current,
            prices.lower,
            prices.upper,
            DepositSide::Token0,
            U256::from(1000u32),
        );
        assert_eq!(quote.side, RangeSide::Token1Only);
        assert_eq!(quote.liquidity, U256::ZERO);
        assert_eq!(quote.amount0, U256::ZERO);
        assert_eq!(quote.amount1, U256::ZERO);
    }

    #[test]
    fn single_sided_token0_deposit() {
        let prices = SqrtPriceRange::new(sqrt_at(-1200), sqrt_at(-600), sqrt_at(600));
        let amount = U256::from(1_000_000u64);
        let quote = quote(prices, DepositSide::Token0, amount);
        assert_eq!(quote.side, RangeSide::Token0Only);
        assert_eq!(quote.amount0, amount);
        assert_eq!(quote.amount1, U256::ZERO);
        assert!(!quote.liquidity.is_zero());
    }

    #[test]
    fn overflowing_paired_amount_zeroes_liquidity() {
        // deep in a full range at a high price: 2^220 of token0 is about
        // 2^240 liquidity, which is worth about 2^260 of token1
        let prices = SqrtPriceRange::new(sqrt_at(277_200), sqrt_at(-887_220), sqrt_at(887_220));
        let amount = U256::ONE << 220;
        let liquidity =
            get_liquidity_for_amount0(prices.current, prices.lower, prices.upper, amount);
        assert!(!liquidity.is_zero());

        let quote = quote(prices, DepositSide::Token0, amount);
        assert_eq!(quote.side, RangeSide::Dual);
        assert_eq!(quote.liquidity, U256::ZERO);
        assert_eq!(quote.amount1, U256::ZERO);
    }

    #[test]
    fn form_derives_other_side() {
        let mut form = DepositForm::new(band());
        form.set_amount(DepositSide::Token1, U256::from(1_000_000u64));
        assert_eq!(form.side(), RangeSide::Dual);
        assert_eq!(form.amount1(), U256::from(1_000_000u64));
        assert!(form.amount0() > U256::ZERO);
        assert!(form.is_enabled(DepositSide::Token0));
    }

    #[test]
    fn form_zeroes_disabled_side_on_reprice() {
        let mut form = DepositForm::new(band());
        form.set_amount(DepositSide::Token0, U256::from(1_000_000u64));
        assert!(form.amount1() > U256::ZERO);

        // price drops below the range: token1 input disabled and zeroed
        form.reprice(SqrtPriceRange::new(sqrt_at(-1200), sqrt_at(-600), sqrt_at(600)));
        assert_eq!(form.side(), RangeSide::Token0Only);
        assert!(!form.is_enabled(DepositSide::Token1));
        assert_eq!(form.amount1(), U256::ZERO);
        assert_eq!(form.amount0(), U256::from(1_000_000u64));
        assert!(!form.liquidity().is_zero());
    }

    #[test]
    fn form_falls_back_to_remaining_side() {
        let mut form = DepositForm::new(band());
        form.set_amount(DepositSide::Token0, U256::from(1_000_000u64));
        let derived1 = form.amount1();

        // price rises above the range: the edited token0 side is disabled,
        // token1 keeps its amount and becomes the source
        form.reprice(SqrtPriceRange::new(sqrt_at(1200), sqrt_at(-600), sqrt_at(600)));
        assert_eq!(form.side(), RangeSide::Token1Only);
        assert_eq!(form.amount0(), U256::ZERO);
        assert_eq!(form.amount1(), derived1);

        // back inside the range the pair is re-derived from token1
        form.reprice(band());
        assert_eq!(form.side(), RangeSide::Dual);
        assert_eq!(form.amount1(), derived1);
        assert!(form.amount0() > U256::ZERO);
    }

    #[test]
    fn form_reclassifies_when_bounds_move() {
        let mut form = DepositForm::new(band());
        form.set_amount(DepositSide::Token1, U256::from(1_000_000u64));
        let amount0 = form.amount0();
        assert!(amount0 > U256::ZERO);

        // same price, range moved above it: token1 is disabled and the pair
        // is re-derived from the remaining token0 amount
        let moved = SqrtPriceRange::new(sqrt_at(0), sqrt_at(600), sqrt_at(1200));
        form.reprice(moved);
        assert_eq!(form.side(), RangeSide::Token0Only);
        assert!(!form.is_enabled(DepositSide::Token1));
        assert_eq!(form.amount1(), U256::ZERO);
        assert_eq!(form.amount0(), amount0);
        assert_eq!(
            form.liquidity(),
            get_liquidity_for_amount0(moved.current, moved.lower, moved.upper, amount0)
        );

        // widened back around the price: both sides are live again
        form.reprice(SqrtPriceRange::new(sqrt_at(0), sqrt_at(-1200), sqrt_at(1200)));
        assert_eq!(form.side(), RangeSide::Dual);
        assert_eq!(form.amount0(), amount0);
        assert!(form.amount1() > U256::ZERO);
    }

    #[test]
    fn form_with_nothing_entered_stays_empty() {
        let mut form = DepositForm::new(band());
        form.reprice(SqrtPriceRange::new(sqrt_at(1200), sqrt_at(-600), sqrt_at(600)));
        assert_eq!(form.amount0(), U256::ZERO);
        assert_eq!(form.amount1(), U256::ZERO);
        assert_eq!(form.liquidity(), U256::ZERO);
    }
}
