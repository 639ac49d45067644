pub mod apr;
pub mod decimals;
pub mod deposit;
pub mod params;
pub mod range;
pub mod slippage;
pub mod snapshot;

pub use decimals::DecimalsCache;
pub use deposit::{DepositForm, DepositQuote, DepositSide, quote_paired_amount};
pub use params::{DecreaseParams, MintParams, build_decrease_params, build_mint_params};
pub use range::{PositionRange, RangeSide, SqrtPriceRange, classify_range_side};
pub use slippage::apply_slippage;
pub use snapshot::PoolSnapshot;
