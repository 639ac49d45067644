use thiserror::Error;

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum MathError {
    #[error("Math error - overflow")]
    Overflow,
    #[error("Math error - division by zero")]
    DivisionByZero,
}

#[derive(Debug, Error, Clone, Copy, PartialEq, Eq)]
pub enum StateError {
    #[error("State error - sqrtPrice is 0")]
    SqrtPriceIsZero,
    #[error("State error - tick out of bounds")]
    TickOutOfBounds,
    #[error("State error - liquidity is 0")]
    LiquidityIsZero,
    #[error("State error - amount is 0")]
    AmountIsZero,
}

/// Conditions on user-chosen ranges and quote inputs that must block
/// transaction construction instead of degrading to a zero result.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum QuoteError {
    #[error("Quote error - range too narrow: lower tick {lower} is not below upper tick {upper}")]
    RangeTooNarrow { lower: i32, upper: i32 },
    #[error("Quote error - invalid tick spacing {0}")]
    InvalidTickSpacing(i32),
    #[error("Quote error - tick {tick} is not a usable multiple of spacing {spacing} in range")]
    TickOutOfRange { tick: i32, spacing: i32 },
    #[error("Quote error - price {0} is not positive and finite")]
    InvalidPrice(f64),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config error - malformed json: {0}")]
    Json(#[from] serde_json::Error),
    #[error("Config error - default slippage {default_bps} bps exceeds maximum {max_bps} bps")]
    SlippageAboveMax { default_bps: u32, max_bps: u32 },
    #[error("Config error - maximum slippage {0} bps is above 10000")]
    MaxSlippageTooLarge(u32),
    #[error("Config error - boost bounds [{min}, {max}] are not an increasing positive interval")]
    InvalidBoostBounds { min: f64, max: f64 },
}

#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    MathError(#[from] crate::error::MathError),

    #[error(transparent)]
    StateError(#[from] crate::error::StateError),

    #[error(transparent)]
    QuoteError(#[from] crate::error::QuoteError),

    #[error(transparent)]
    ConfigError(#[from] crate::error::ConfigError),
}
